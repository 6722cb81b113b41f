//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

use crate::dispatch::RunConfig;

/// Default number of messages per run.
pub const COUNT: u64 = RunConfig::DEFAULT_TOTAL_COUNT;

/// Default config file written by `init`.
pub const CONFIG_FILE: &str = "hook-pacer.toml";

/// Default delay between messages as Duration.
#[must_use]
pub const fn delay() -> Duration {
    RunConfig::DEFAULT_INTER_SEND_DELAY
}

/// Default rate-limit cooldown as Duration.
#[must_use]
pub const fn rate_limit_cooldown() -> Duration {
    RunConfig::DEFAULT_RATE_LIMIT_COOLDOWN
}
