//! Dispatch layer: paced delivery of payloads to one webhook.
//!
//! This module provides:
//! - Run configuration ([`RunConfig`], [`PayloadOrder`])
//! - Payload selection ([`next_payload`], [`next_payload_with`])
//! - The dispatch loop and its handle ([`Dispatcher`], [`RunHandle`])
//! - Run observability ([`DispatchEvent`], [`DeliveryEvent`], [`DispatchOutcome`])
//! - Webhook removal ([`delete_endpoint`], [`DeleteOutcome`])
//! - Error handling ([`DispatchError`])

mod delete;
mod dispatcher;
mod error;
mod event;
mod payload;
mod run_config;

#[cfg(test)]
mod test_fixtures;

pub use delete::{DeleteOutcome, delete_endpoint};
pub use dispatcher::{Dispatcher, RunHandle};
pub use error::DispatchError;
pub use event::{DeliveryEvent, DeliveryKind, DispatchEvent, DispatchOutcome, StopReason};
pub use payload::{next_payload, next_payload_with};
pub use run_config::{PayloadOrder, RunConfig};
