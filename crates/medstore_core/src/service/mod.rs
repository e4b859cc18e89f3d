//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep HTTP and console layers decoupled from storage details.

pub mod medicine_service;
