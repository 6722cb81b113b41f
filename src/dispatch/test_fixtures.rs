//! Shared test fixtures for dispatch tests.

use crate::webhook::{HttpClient, HttpError, HttpRequest, HttpResponse};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_util::sync::CancellationToken;

/// Mock HTTP client answering from a script.
///
/// Once the script runs out, every further request gets `fallback`.
/// Every request is captured for later inspection.
pub struct MockClient {
    script: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    fallback: http::StatusCode,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
    cancel_on_call: Option<(usize, CancellationToken)>,
}

impl MockClient {
    pub fn new(script: Vec<Result<HttpResponse, HttpError>>, fallback: http::StatusCode) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
            cancel_on_call: None,
        }
    }

    /// Answers every request with 204.
    pub fn always_ok() -> Self {
        Self::always(http::StatusCode::NO_CONTENT)
    }

    /// Answers every request with `status`.
    pub fn always(status: http::StatusCode) -> Self {
        Self::new(Vec::new(), status)
    }

    /// Answers the scripted statuses in order, then 204.
    pub fn statuses(statuses: &[u16]) -> Self {
        let script = statuses
            .iter()
            .map(|code| {
                Ok(HttpResponse::from_status(
                    http::StatusCode::from_u16(*code).unwrap(),
                ))
            })
            .collect();
        Self::new(script, http::StatusCode::NO_CONTENT)
    }

    /// Cancels `token` while serving the `call`-th request (1-based).
    ///
    /// Stands in for a user pressing "stop" while that request is in flight.
    pub fn cancelling_on_call(mut self, call: usize, token: CancellationToken) -> Self {
        self.cancel_on_call = Some((call, token));
        self
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The `content` field of every captured request body, in order.
    pub fn captured_contents(&self) -> Vec<String> {
        self.captured_requests()
            .iter()
            .map(|req| {
                let body: serde_json::Value =
                    serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
                body["content"].as_str().unwrap().to_string()
            })
            .collect()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().unwrap().push(req);

        if let Some((at, token)) = &self.cancel_on_call {
            if *at == call {
                token.cancel();
            }
        }

        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::from_status(self.fallback)))
    }
}

pub fn hook_url() -> url::Url {
    url::Url::parse("https://discord.com/api/webhooks/123/abc").unwrap()
}

pub fn payloads(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
