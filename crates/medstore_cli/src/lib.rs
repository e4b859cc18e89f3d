//! HTTP client for the medstore server.
//!
//! # Responsibility
//! - Translate menu actions into HTTP+JSON calls against the fixed base URL.
//! - Surface transport failures and non-200 answers as `ClientError`.

pub mod client;
pub mod config;

pub use client::{ApiClient, ClientError, ClientResult};
pub use config::ClientConfig;
