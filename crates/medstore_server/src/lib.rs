//! HTTP surface of medstore.
//!
//! # Responsibility
//! - Expose fetch/insert/update/delete over HTTP+JSON.
//! - Provide the fixed server configuration used by the dual-mode binary.
//!
//! # Invariants
//! - Handlers reach the database only through an injected `StoreHandle`.

pub mod config;
pub mod http;

pub use config::ServerConfig;
pub use http::{router, serve, serve_with_shutdown};
