//! Application execution logic.
//!
//! This module drives one send run or one delete request against the
//! configured webhook and turns the run's events into console output.

use std::fmt;

use thiserror::Error;
use tokio::signal;

use hook_pacer::config::ValidatedConfig;
use hook_pacer::dispatch::{
    DeleteOutcome, DeliveryKind, DispatchError, DispatchEvent, DispatchOutcome, Dispatcher,
    StopReason, delete_endpoint,
};
use hook_pacer::webhook::{DryRunClient, HttpClient, ReqwestClient};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The dispatch layer refused or lost the run.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// The delete request did not remove the webhook.
    #[error("{0}")]
    DeleteNotCompleted(DeleteOutcome),
}

/// What the binary was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Post messages to the webhook.
    Send,
    /// Delete the webhook.
    Delete,
}

/// Executes a send run or a delete request.
///
/// In dry-run mode every request is logged and answered locally.
///
/// # Errors
///
/// Returns an error if:
/// - The dispatch run could not start or its task panicked
/// - The delete request did not succeed
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, mode: Mode) -> Result<(), RunError> {
    if config.dry_run {
        tracing::info!("Dry-run mode enabled - requests will be logged but not sent");
    }

    match (mode, config.dry_run) {
        (Mode::Send, false) => send(ReqwestClient::new(), &config).await.map(drop),
        (Mode::Send, true) => send(DryRunClient, &config).await.map(drop),
        (Mode::Delete, false) => delete(&ReqwestClient::new(), &config).await.map(drop),
        (Mode::Delete, true) => delete(&DryRunClient, &config).await.map(drop),
    }
}

/// Runs the dispatch loop until it completes or Ctrl+C stops it.
///
/// The first shutdown signal asks the run to stop at its next attempt
/// boundary; the message in flight is allowed to finish.
#[cfg(not(tarpaulin_include))]
async fn send<H>(client: H, config: &ValidatedConfig) -> Result<DispatchOutcome, RunError>
where
    H: HttpClient + 'static,
{
    let mut handle = Dispatcher::new(client).spawn(config.run_config())?;
    let cancel = handle.cancel_token();
    let mut summary = RunSummary::default();

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown, if !cancel.is_cancelled() => {
                tracing::info!("Stop requested, finishing the current message...");
                cancel.cancel();
            }

            event = handle.next_event() => {
                let Some(event) = event else { break };
                summary.record(&event);
                if let DispatchEvent::Finished(_) = event {
                    println!("{summary}");
                }
            }
        }
    }

    Ok(handle.join().await?)
}

/// Sends the delete request and reports the result.
async fn delete<H: HttpClient>(
    client: &H,
    config: &ValidatedConfig,
) -> Result<DeleteOutcome, RunError> {
    let outcome = delete_endpoint(client, &config.url).await?;
    println!("{outcome}");
    delete_result(outcome)
}

/// Maps a delete outcome to the binary's success or failure.
fn delete_result(outcome: DeleteOutcome) -> Result<DeleteOutcome, RunError> {
    match outcome {
        DeleteOutcome::Succeeded => Ok(outcome),
        DeleteOutcome::NotFound | DeleteOutcome::Failed => {
            Err(RunError::DeleteNotCompleted(outcome))
        }
    }
}

/// Running tally of a send run, built from its events.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct RunSummary {
    total_count: u64,
    delivered: u64,
    failed: u64,
    rate_limited: u64,
    outcome: Option<DispatchOutcome>,
}

impl RunSummary {
    fn record(&mut self, event: &DispatchEvent) {
        match event {
            DispatchEvent::Started { total_count, .. } => self.total_count = *total_count,
            DispatchEvent::Delivery(delivery) => {
                match delivery.kind {
                    DeliveryKind::Sent => self.delivered += 1,
                    DeliveryKind::Failed => self.failed += 1,
                    DeliveryKind::RateLimited => self.rate_limited += 1,
                }
                tracing::debug!(
                    "Progress: {}/{} ({} failed, {} rate limited)",
                    self.delivered + self.failed,
                    self.total_count,
                    self.failed,
                    self.rate_limited,
                );
            }
            DispatchEvent::Finished(outcome) => self.outcome = Some(*outcome),
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome.map(|o| o.reason) {
            Some(StopReason::Completed) => {
                write!(f, "Successfully sent {} message(s)", self.delivered + self.failed)?;
            }
            Some(StopReason::Cancelled) => write!(
                f,
                "Stopped early. Messages sent: {}",
                self.delivered + self.failed
            )?,
            None => write!(f, "Run in progress")?,
        }

        if self.failed > 0 || self.rate_limited > 0 {
            write!(
                f,
                " ({} failed, {} rate limited)",
                self.failed, self.rate_limited
            )?;
        }

        Ok(())
    }
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
