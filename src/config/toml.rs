//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Webhook configuration section
    #[serde(default)]
    pub webhook: WebhookSection,

    /// Dispatch configuration section
    #[serde(default)]
    pub dispatch: DispatchSection,
}

/// Webhook configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Webhook URL
    pub url: Option<String>,
}

/// Dispatch configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DispatchSection {
    /// Messages to send
    #[serde(default)]
    pub messages: Vec<String>,

    /// File with one message per line
    pub messages_file: Option<String>,

    /// Number of messages per run
    pub count: Option<u64>,

    /// Delay between messages in seconds
    pub delay: Option<f64>,

    /// Pick messages at random instead of cycling in order
    #[serde(default)]
    pub random_order: bool,

    /// Pause after a rate-limited response, in seconds
    pub rate_limit_cooldown: Option<f64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# hook-pacer configuration file

[webhook]
# Webhook URL (required, must start with https://discord.com/api/)
# url = "https://discord.com/api/webhooks/<id>/<token>"

[dispatch]
# Messages to send, cycled in order unless random_order is set
# Note: --message / --messages-file on the CLI REPLACE these entirely
# messages = ["first message", "second message"]

# File with one message per line (blank lines are skipped, ~ is expanded)
# messages_file = "~/messages.txt"

# Number of messages per run (default: 50)
count = 50

# Delay between messages in seconds (default: 0.75)
delay = 0.75

# Pick a random message for every send
# random_order = false

# Pause after the webhook answers 429, in seconds (default: 3)
# rate_limit_cooldown = 3
"#
    .to_string()
}
