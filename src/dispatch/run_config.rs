//! Per-run configuration for the dispatch loop.

use std::fmt;
use std::time::Duration;

use url::Url;

use super::DispatchError;
use crate::webhook::is_valid_endpoint;

/// Order in which payloads are drawn from the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadOrder {
    /// Cycle through the pool in order, wrapping around at the end.
    #[default]
    Sequential,
    /// Draw a uniformly random payload on every attempt (repeats allowed).
    Random,
}

impl PayloadOrder {
    /// Maps a "random order" flag to an order.
    #[must_use]
    pub const fn from_random_flag(random: bool) -> Self {
        if random { Self::Random } else { Self::Sequential }
    }
}

impl fmt::Display for PayloadOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Random => write!(f, "random"),
        }
    }
}

/// Immutable description of one dispatch run.
///
/// Built by the caller before the run starts and never modified while it
/// is in flight.
///
/// # Defaults
///
/// - `total_count`: 50
/// - `inter_send_delay`: 750 ms
/// - `rate_limit_cooldown`: 3 seconds
/// - `order`: sequential
///
/// # Example
///
/// ```
/// use hook_pacer::dispatch::{PayloadOrder, RunConfig};
/// use std::time::Duration;
/// use url::Url;
///
/// let config = RunConfig::new(
///     Url::parse("https://discord.com/api/webhooks/1/token").unwrap(),
///     vec!["hello".to_string(), "world".to_string()],
/// )
/// .with_total_count(10)
/// .with_inter_send_delay(Duration::from_secs(1))
/// .with_order(PayloadOrder::Random);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Webhook every payload is posted to.
    pub endpoint: Url,

    /// Candidate payloads; must not be empty.
    pub payloads: Vec<String>,

    /// Number of counted attempts to make; must be at least 1.
    pub total_count: u64,

    /// Pause after each counted attempt except the last.
    pub inter_send_delay: Duration,

    /// How payloads are drawn from the pool.
    pub order: PayloadOrder,

    /// Pause after a rate-limited response, before retrying the same attempt.
    pub rate_limit_cooldown: Duration,
}

impl RunConfig {
    /// Default number of attempts per run.
    pub const DEFAULT_TOTAL_COUNT: u64 = 50;

    /// Default pacing delay (0.75 seconds).
    pub const DEFAULT_INTER_SEND_DELAY: Duration = Duration::from_millis(750);

    /// Default rate-limit cooldown (3 seconds).
    pub const DEFAULT_RATE_LIMIT_COOLDOWN: Duration = Duration::from_secs(3);

    /// Creates a run configuration with default pacing.
    #[must_use]
    pub const fn new(endpoint: Url, payloads: Vec<String>) -> Self {
        Self {
            endpoint,
            payloads,
            total_count: Self::DEFAULT_TOTAL_COUNT,
            inter_send_delay: Self::DEFAULT_INTER_SEND_DELAY,
            order: PayloadOrder::Sequential,
            rate_limit_cooldown: Self::DEFAULT_RATE_LIMIT_COOLDOWN,
        }
    }

    /// Sets the number of attempts.
    #[must_use]
    pub const fn with_total_count(mut self, total_count: u64) -> Self {
        self.total_count = total_count;
        self
    }

    /// Sets the pacing delay between attempts.
    #[must_use]
    pub const fn with_inter_send_delay(mut self, delay: Duration) -> Self {
        self.inter_send_delay = delay;
        self
    }

    /// Sets the payload order.
    #[must_use]
    pub const fn with_order(mut self, order: PayloadOrder) -> Self {
        self.order = order;
        self
    }

    /// Sets the rate-limit cooldown.
    #[must_use]
    pub const fn with_rate_limit_cooldown(mut self, cooldown: Duration) -> Self {
        self.rate_limit_cooldown = cooldown;
        self
    }

    /// Checks every precondition of a run.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::InvalidEndpoint`] if the endpoint fails
    ///   [`is_valid_endpoint`]
    /// - [`DispatchError::InvalidRunConfig`] if the payload pool is empty,
    ///   `total_count` is zero, or the cooldown is zero
    pub fn validate(&self) -> Result<(), DispatchError> {
        if !is_valid_endpoint(self.endpoint.as_str()) {
            return Err(DispatchError::InvalidEndpoint(self.endpoint.to_string()));
        }

        if self.payloads.is_empty() {
            return Err(DispatchError::InvalidRunConfig(
                "payloads must contain at least one message".to_string(),
            ));
        }

        if self.total_count == 0 {
            return Err(DispatchError::InvalidRunConfig(
                "total_count must be at least 1".to_string(),
            ));
        }

        // A zero cooldown would turn a rate-limited endpoint into a busy loop.
        if self.rate_limit_cooldown.is_zero() {
            return Err(DispatchError::InvalidRunConfig(
                "rate_limit_cooldown must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
