//! Webhook removal.

use std::fmt;

use url::Url;

use super::DispatchError;
use crate::webhook::{HttpClient, HttpRequest, is_valid_endpoint};

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeleteOutcome {
    /// The webhook was removed (2xx).
    Succeeded,
    /// The webhook is gone or the token no longer grants access (404 or 401).
    NotFound,
    /// Any other status, or no response at all.
    Failed,
}

impl DeleteOutcome {
    /// Classifies a delete response status.
    #[must_use]
    pub fn from_status(status: http::StatusCode) -> Self {
        if status.is_success() {
            Self::Succeeded
        } else if status == http::StatusCode::NOT_FOUND || status == http::StatusCode::UNAUTHORIZED
        {
            Self::NotFound
        } else {
            Self::Failed
        }
    }
}

impl fmt::Display for DeleteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => write!(f, "Webhook deleted"),
            Self::NotFound => write!(f, "Webhook doesn't exist"),
            Self::Failed => write!(f, "Failed to delete webhook"),
        }
    }
}

/// Sends a single DELETE to `url`. No retry, no pacing.
///
/// A transport failure is reported as [`DeleteOutcome::Failed`].
///
/// # Errors
///
/// Returns [`DispatchError::InvalidEndpoint`] without touching the network
/// if `url` fails [`is_valid_endpoint`].
pub async fn delete_endpoint<H: HttpClient>(
    client: &H,
    url: &Url,
) -> Result<DeleteOutcome, DispatchError> {
    if !is_valid_endpoint(url.as_str()) {
        return Err(DispatchError::InvalidEndpoint(url.to_string()));
    }

    let outcome = match client.request(HttpRequest::delete(url.clone())).await {
        Ok(response) => {
            let outcome = DeleteOutcome::from_status(response.status);
            tracing::debug!("Delete answered {}: {outcome:?}", response.status);
            outcome
        }
        Err(e) => {
            tracing::warn!("Delete request failed: {e}");
            DeleteOutcome::Failed
        }
    };

    Ok(outcome)
}
