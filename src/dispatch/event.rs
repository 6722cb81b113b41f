//! Events and outcomes reported by a dispatch run.

use std::fmt;
use std::time::Duration;

/// What happened to a single send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryKind {
    /// The webhook accepted the payload (2xx).
    Sent,
    /// The webhook answered 429; the attempt will be retried after a cooldown.
    RateLimited,
    /// Any other status, or no response at all. Counted, never retried.
    Failed,
}

/// Per-attempt observability event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryEvent {
    /// Outcome of the attempt.
    pub kind: DeliveryKind,
    /// Zero-based attempt index. A retried attempt keeps its index.
    pub index: u64,
    /// Status code, when the webhook answered at all.
    pub status: Option<http::StatusCode>,
}

impl DeliveryEvent {
    /// Creates a delivery event.
    #[must_use]
    pub const fn new(kind: DeliveryKind, index: u64, status: Option<http::StatusCode>) -> Self {
        Self {
            kind,
            index,
            status,
        }
    }

    /// Returns true if this attempt counts towards `sent_count`.
    #[must_use]
    pub const fn is_counted(&self) -> bool {
        !matches!(self.kind, DeliveryKind::RateLimited)
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// Every attempt was made.
    Completed,
    /// Cancellation was observed at an attempt boundary.
    Cancelled,
}

/// Terminal value of a run, produced exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Counted attempts (sent or failed), rate-limited retries excluded.
    pub sent_count: u64,
    /// Why the run stopped.
    pub reason: StopReason,
}

impl fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            StopReason::Completed => write!(f, "Sent {} message(s)", self.sent_count),
            StopReason::Cancelled => {
                write!(f, "Stopped early. Messages sent: {}", self.sent_count)
            }
        }
    }
}

/// Everything a run reports to its observer, in emission order.
///
/// A run emits one `Started`, then one `Delivery` per attempt (including
/// each rate-limited retry), then one `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchEvent {
    /// The run passed validation and is about to send.
    Started {
        /// Attempts the run will make.
        total_count: u64,
        /// Pacing delay between attempts.
        inter_send_delay: Duration,
    },
    /// One attempt finished.
    Delivery(DeliveryEvent),
    /// The run stopped.
    Finished(DispatchOutcome),
}
