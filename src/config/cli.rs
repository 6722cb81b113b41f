//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// hook-pacer: paced webhook message dispatcher
///
/// Posts messages to a webhook at a steady pace, waits out rate limits,
/// and stops cleanly on Ctrl+C. Without a subcommand, runs a send.
#[derive(Debug, Parser)]
#[command(name = "hook-pacer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Webhook URL (https://discord.com/api/...)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Message to send (can be specified multiple times)
    #[arg(long = "message", short = 'm', value_name = "TEXT")]
    pub messages: Vec<String>,

    /// File with one message per line (blank lines are skipped)
    #[arg(long = "messages-file", value_name = "PATH")]
    pub messages_file: Option<PathBuf>,

    /// Number of messages to send
    #[arg(long, short = 'n')]
    pub count: Option<u64>,

    /// Delay between messages in seconds (fractions allowed)
    #[arg(long, value_name = "SECONDS")]
    pub delay: Option<f64>,

    /// Pick a random message for every send instead of cycling in order
    #[arg(long)]
    pub random: bool,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Log requests instead of sending them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for hook-pacer
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Delete the webhook
    Delete,

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the delete command.
    #[must_use]
    pub const fn is_delete(&self) -> bool {
        matches!(self.command, Some(Command::Delete))
    }
}
