//! Error types for the dispatch layer.

use thiserror::Error;

/// Error type for dispatch operations.
///
/// Every variant is raised before the first request of a run goes out,
/// except [`DispatchError::Join`], which reports a run task that panicked
/// or was aborted. Rate limits and failed deliveries are never errors;
/// they surface as [`DeliveryEvent`](super::DeliveryEvent)s instead.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A precondition of the run configuration does not hold.
    #[error("Invalid run configuration: {0}")]
    InvalidRunConfig(String),

    /// A payload was requested from an empty pool.
    #[error("Payload set is empty")]
    EmptyPayloadSet,

    /// The target address is not a webhook of the supported provider.
    #[error("Invalid webhook URL '{0}'")]
    InvalidEndpoint(String),

    /// The spawned run task did not finish normally.
    #[error("Dispatch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
