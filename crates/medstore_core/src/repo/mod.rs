//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the store contract for medicine records.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs surface driver failures unchanged; "no matching row"
//!   is reported as zero affected rows, not as an error.

pub mod medicine_repo;
