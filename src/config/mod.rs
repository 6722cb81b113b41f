//! Configuration layer for hook-pacer.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The webhook URL has no default and must come from one of the first two.
//!
//! Messages use "replace" semantics: if the CLI gives any `--message` or a
//! `--messages-file`, the TOML `messages` and `messages_file` are ignored.
//! Within one source, inline messages come first, followed by file lines.
//!
//! # Boolean Flag Semantics
//!
//! `--random` uses OR semantics with TOML `random_order`: once set `true` in
//! TOML, the CLI cannot turn it back off.
//!
//! # TOML-Only Options
//!
//! - `dispatch.rate_limit_cooldown` (default: 3s) - pause after a 429 answer

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
