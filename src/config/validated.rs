//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::dispatch::{PayloadOrder, RunConfig};
use crate::webhook::is_valid_endpoint;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Webhook URL (required)
    pub url: Url,

    /// Messages to send. Empty only for the delete command.
    pub payloads: Vec<String>,

    /// Number of messages per run
    pub total_count: u64,

    /// Delay between messages
    pub inter_send_delay: Duration,

    /// Payload order
    pub order: PayloadOrder,

    /// Pause after a rate-limited response
    pub rate_limit_cooldown: Duration,

    /// Dry-run mode (log requests without sending them)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ url: {}://{}/..., messages: {}, count: {}, delay: {:.2}s, order: {}, \
             cooldown: {:.2}s, dry_run: {} }}",
            self.url.scheme(),
            self.url.host_str().unwrap_or_default(),
            self.payloads.len(),
            self.total_count,
            self.inter_send_delay.as_secs_f64(),
            self.order,
            self.rate_limit_cooldown.as_secs_f64(),
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The URL is missing, unparsable, or not a supported webhook
    /// - No messages are configured (send mode only)
    /// - The messages file cannot be read
    /// - Count is zero, delay is negative, or cooldown is not positive (send mode only)
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let url = Self::resolve_url(cli, toml)?;

        // The delete command never sends messages, so dispatch settings are not read
        let (payloads, total_count, inter_send_delay, rate_limit_cooldown) = if cli.is_delete() {
            (
                Vec::new(),
                defaults::COUNT,
                defaults::delay(),
                defaults::rate_limit_cooldown(),
            )
        } else {
            (
                Self::resolve_payloads(cli, toml)?,
                Self::resolve_count(cli, toml)?,
                Self::resolve_delay(cli, toml)?,
                Self::resolve_cooldown(toml)?,
            )
        };

        // Random order: CLI flag or TOML setting
        let random = cli.random || toml.is_some_and(|t| t.dispatch.random_order);

        Ok(Self {
            url,
            payloads,
            total_count,
            inter_send_delay,
            order: PayloadOrder::from_random_flag(random),
            rate_limit_cooldown,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Builds the run configuration for the dispatch loop.
    #[must_use]
    pub fn run_config(&self) -> RunConfig {
        RunConfig::new(self.url.clone(), self.payloads.clone())
            .with_total_count(self.total_count)
            .with_inter_send_delay(self.inter_send_delay)
            .with_order(self.order)
            .with_rate_limit_cooldown(self.rate_limit_cooldown)
    }

    fn resolve_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        // CLI takes precedence
        let url_str = cli
            .url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.webhook.url.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(field::URL, "Use --url or set webhook.url in config file")
            })?;

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        // Check the normalized form, which is what requests are sent to
        if !is_valid_endpoint(url.as_str()) {
            return Err(ConfigError::InvalidEndpoint {
                url: url_str.to_string(),
            });
        }

        Ok(url)
    }

    fn resolve_payloads(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Vec<String>, ConfigError> {
        let cli_given = !cli.messages.is_empty() || cli.messages_file.is_some();

        // CLI messages replace TOML messages entirely
        let payloads = if cli_given {
            let mut payloads = cli.messages.clone();
            if let Some(ref path) = cli.messages_file {
                payloads.extend(read_messages_file(path)?);
            }
            payloads
        } else if let Some(toml) = toml {
            let mut payloads = toml.dispatch.messages.clone();
            if let Some(ref path) = toml.dispatch.messages_file {
                payloads.extend(read_messages_file(Path::new(path))?);
            }
            payloads
        } else {
            Vec::new()
        };

        if payloads.is_empty() {
            return Err(ConfigError::missing(
                field::MESSAGES,
                "Use --message / --messages-file or set dispatch.messages in config file",
            ));
        }

        Ok(payloads)
    }

    fn resolve_count(cli: &Cli, toml: Option<&TomlConfig>) -> Result<u64, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let count = cli
            .count
            .or_else(|| toml.and_then(|t| t.dispatch.count))
            .unwrap_or(defaults::COUNT);

        if count == 0 {
            return Err(ConfigError::InvalidCount(count));
        }

        Ok(count)
    }

    fn resolve_delay(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        cli.delay
            .or_else(|| toml.and_then(|t| t.dispatch.delay))
            .map_or(Ok(defaults::delay()), |seconds| {
                seconds_to_duration(field::DELAY, seconds, false)
            })
    }

    fn resolve_cooldown(toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        toml.and_then(|t| t.dispatch.rate_limit_cooldown)
            .map_or(Ok(defaults::rate_limit_cooldown()), |seconds| {
                seconds_to_duration(field::RATE_LIMIT_COOLDOWN, seconds, true)
            })
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn seconds_to_duration(
    field: &'static str,
    seconds: f64,
    must_be_positive: bool,
) -> Result<Duration, ConfigError> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(ConfigError::InvalidDuration {
            field,
            reason: format!("{seconds} is not a non-negative number of seconds"),
        });
    }

    if must_be_positive && seconds <= 0.0 {
        return Err(ConfigError::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        });
    }

    Duration::try_from_secs_f64(seconds).map_err(|e| ConfigError::InvalidDuration {
        field,
        reason: e.to_string(),
    })
}

/// Expands a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}

/// Reads one message per line, skipping blank lines.
fn read_messages_file(path: &Path) -> Result<Vec<String>, ConfigError> {
    let path = expand_tilde(path);
    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::MessagesFile {
        path: path.clone(),
        source: e,
    })?;

    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(ToString::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_tilde_leaves_plain_paths() {
        assert_eq!(
            expand_tilde(Path::new("/tmp/messages.txt")),
            PathBuf::from("/tmp/messages.txt")
        );
        assert_eq!(
            expand_tilde(Path::new("messages.txt")),
            PathBuf::from("messages.txt")
        );
    }

    #[test]
    fn expand_tilde_uses_home_dir() {
        let Some(home) = dirs::home_dir() else {
            return;
        };

        assert_eq!(
            expand_tilde(Path::new("~/messages.txt")),
            home.join("messages.txt")
        );
    }

    #[test]
    fn seconds_to_duration_accepts_fractions() {
        assert_eq!(
            seconds_to_duration("delay", 0.75, false).unwrap(),
            Duration::from_millis(750)
        );
    }

    #[test]
    fn seconds_to_duration_rejects_nan() {
        assert!(seconds_to_duration("delay", f64::NAN, false).is_err());
        assert!(seconds_to_duration("delay", f64::INFINITY, false).is_err());
    }
}
