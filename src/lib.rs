//! hook-pacer: paced webhook message dispatcher
//!
//! A library for posting a pool of messages to a webhook at a steady pace,
//! waiting out rate limits, and stopping cleanly on request.

pub mod config;
pub mod dispatch;
pub mod time;
pub mod webhook;
