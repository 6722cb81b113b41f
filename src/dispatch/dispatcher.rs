//! The dispatch loop and the handle for a spawned run.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_util::sync::CancellationToken;

use super::{
    DeliveryEvent, DeliveryKind, DispatchError, DispatchEvent, DispatchOutcome, RunConfig,
    StopReason, next_payload,
};
use crate::time::{Sleeper, TokioSleeper};
use crate::webhook::{HttpClient, HttpRequest};

/// Sends the payloads of a [`RunConfig`] to its webhook, one at a time.
///
/// Each attempt picks a payload, posts it as `{"content": <payload>}` and
/// classifies the answer:
///
/// - 429: emit [`DeliveryKind::RateLimited`], sleep for the cooldown and
///   retry the same attempt. There is no retry limit; only cancellation
///   ends a run against a permanently rate-limited webhook.
/// - 2xx: count it, emit [`DeliveryKind::Sent`].
/// - anything else, including transport errors: count it, emit
///   [`DeliveryKind::Failed`]. Never retried.
///
/// Counted attempts are followed by the pacing delay, except the last one.
///
/// Cancellation is checked only at the top of each attempt. A request,
/// cooldown or pacing delay already in progress always runs to completion.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `S`: The sleeper for pacing and cooldown (defaults to [`TokioSleeper`])
#[derive(Debug)]
pub struct Dispatcher<H, S = TokioSleeper> {
    client: H,
    sleeper: S,
}

impl<H> Dispatcher<H, TokioSleeper> {
    /// Creates a dispatcher that sleeps on the tokio timer.
    #[must_use]
    pub const fn new(client: H) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
        }
    }
}

impl<H, S> Dispatcher<H, S> {
    /// Replaces the sleeper used for pacing and cooldown.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Dispatcher<H, S2> {
        Dispatcher {
            client: self.client,
            sleeper,
        }
    }
}

/// Mutable bookkeeping owned by one in-flight run.
struct RunState {
    sent_count: u64,
    cancel: CancellationToken,
}

impl RunState {
    const fn new(cancel: CancellationToken) -> Self {
        Self {
            sent_count: 0,
            cancel,
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn outcome(&self, reason: StopReason) -> DispatchOutcome {
        DispatchOutcome {
            sent_count: self.sent_count,
            reason,
        }
    }
}

fn emit(events: &mpsc::UnboundedSender<DispatchEvent>, event: DispatchEvent) {
    // A closed channel only means nobody is watching; the run goes on.
    let _ = events.send(event);
}

fn message_body(payload: &str) -> Vec<u8> {
    serde_json::json!({ "content": payload })
        .to_string()
        .into_bytes()
}

impl<H: HttpClient, S: Sleeper> Dispatcher<H, S> {
    /// Runs the loop to completion or cancellation.
    ///
    /// Events are pushed to `events` as they happen; the returned outcome is
    /// also emitted as the final [`DispatchEvent::Finished`].
    ///
    /// # Errors
    ///
    /// Returns the [`RunConfig::validate`] error, before any request is
    /// made, if the configuration is unusable.
    pub async fn run(
        &self,
        config: &RunConfig,
        cancel: &CancellationToken,
        events: &mpsc::UnboundedSender<DispatchEvent>,
    ) -> Result<DispatchOutcome, DispatchError> {
        config.validate()?;

        tracing::info!(
            "Sending {} message(s) with {:.2}s delay ({} order)",
            config.total_count,
            config.inter_send_delay.as_secs_f64(),
            config.order,
        );
        emit(
            events,
            DispatchEvent::Started {
                total_count: config.total_count,
                inter_send_delay: config.inter_send_delay,
            },
        );

        let mut state = RunState::new(cancel.clone());
        let mut attempt_index = 0;

        let reason = loop {
            if attempt_index >= config.total_count {
                break StopReason::Completed;
            }
            if state.is_cancelled() {
                break StopReason::Cancelled;
            }

            let payload = next_payload(&config.payloads, attempt_index, config.order)?;
            let delivery = self.attempt(config, attempt_index, payload).await;
            emit(events, DispatchEvent::Delivery(delivery));

            if !delivery.is_counted() {
                self.sleeper.sleep(config.rate_limit_cooldown).await;
                continue;
            }

            state.sent_count += 1;
            attempt_index += 1;

            if attempt_index < config.total_count {
                self.sleeper.sleep(config.inter_send_delay).await;
            }
        };

        let outcome = state.outcome(reason);
        tracing::info!("{outcome}");
        emit(events, DispatchEvent::Finished(outcome));

        Ok(outcome)
    }

    /// Issues one request and classifies the answer.
    async fn attempt(&self, config: &RunConfig, index: u64, payload: &str) -> DeliveryEvent {
        let request =
            HttpRequest::post(config.endpoint.clone()).with_json_body(message_body(payload));

        match self.client.request(request).await {
            Ok(response) if response.is_rate_limited() => {
                tracing::warn!(
                    "Webhook hit rate limit at message {index}, continuing in {:.2}s",
                    config.rate_limit_cooldown.as_secs_f64(),
                );
                DeliveryEvent::new(DeliveryKind::RateLimited, index, Some(response.status))
            }
            Ok(response) if response.is_success() => {
                tracing::debug!("Message {index} delivered ({})", response.status);
                DeliveryEvent::new(DeliveryKind::Sent, index, Some(response.status))
            }
            Ok(response) => {
                tracing::warn!(
                    "Message {index} rejected with {}: {}",
                    response.status,
                    response.body_text().unwrap_or_default(),
                );
                DeliveryEvent::new(DeliveryKind::Failed, index, Some(response.status))
            }
            Err(e) => {
                tracing::warn!("Message {index} could not be sent: {e}");
                DeliveryEvent::new(DeliveryKind::Failed, index, None)
            }
        }
    }
}

impl<H, S> Dispatcher<H, S>
where
    H: HttpClient + 'static,
    S: Sleeper + 'static,
{
    /// Validates `config` and starts the run on a tokio task.
    ///
    /// The returned handle owns the run's cancellation token and event
    /// subscription.
    ///
    /// # Errors
    ///
    /// Returns the [`RunConfig::validate`] error synchronously; nothing is
    /// spawned in that case.
    pub fn spawn(self, config: RunConfig) -> Result<RunHandle, DispatchError> {
        config.validate()?;

        let cancel = CancellationToken::new();
        let (tx, rx) = mpsc::unbounded_channel();

        let task = {
            let cancel = cancel.clone();
            tokio::spawn(async move { self.run(&config, &cancel, &tx).await })
        };

        Ok(RunHandle {
            cancel,
            events: UnboundedReceiverStream::new(rx),
            task,
        })
    }
}

/// Control surface of a spawned run.
///
/// The event subscription ends after [`DispatchEvent::Finished`], once the
/// run task has dropped its sender.
#[derive(Debug)]
pub struct RunHandle {
    cancel: CancellationToken,
    events: UnboundedReceiverStream<DispatchEvent>,
    task: JoinHandle<Result<DispatchOutcome, DispatchError>>,
}

impl RunHandle {
    /// Asks the run to stop at its next attempt boundary.
    ///
    /// Idempotent. Work already in progress is not interrupted.
    pub fn request_cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns true once cancellation has been requested.
    #[must_use]
    pub fn is_cancel_requested(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Returns a clone of the run's cancellation token.
    ///
    /// Cancelling the clone is the same as calling [`Self::request_cancel`].
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Waits for the next event, or `None` once the run has ended.
    pub async fn next_event(&mut self) -> Option<DispatchEvent> {
        self.events.next().await
    }

    /// Detaches the run and returns its event stream.
    ///
    /// The run keeps going in the background; keep a [`Self::cancel_token`]
    /// clone beforehand to stop it later.
    #[must_use]
    pub fn into_event_stream(self) -> UnboundedReceiverStream<DispatchEvent> {
        self.events
    }

    /// Waits for the run to finish and returns its outcome.
    ///
    /// Events not yet consumed are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Join`] if the run task panicked.
    pub async fn join(self) -> Result<DispatchOutcome, DispatchError> {
        self.task.await?
    }
}
