//! Webhook transport layer.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production and dry-run clients ([`ReqwestClient`], [`DryRunClient`])
//! - Gating which addresses may be targeted ([`is_valid_endpoint`])

mod client;
mod endpoint;
mod error;
mod http;


pub use client::{DryRunClient, ReqwestClient};
pub use endpoint::is_valid_endpoint;
pub use error::HttpError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
