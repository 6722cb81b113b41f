//! Error types for HTTP transport.

use thiserror::Error;

/// Error type for a request that produced no HTTP response at all.
///
/// The dispatch loop treats every variant like a non-2xx delivery: the
/// attempt is counted and the run moves on.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and connections dropped while reading the response.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// Only produced by clients that were built with an explicit timeout.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built from the given URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
