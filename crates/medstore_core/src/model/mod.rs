//! Domain model for inventory records.
//!
//! # Responsibility
//! - Define the record shape shared by the store, HTTP layer and CLIs.
//!
//! # Invariants
//! - Every stored record is identified by a store-assigned `MedicineId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod medicine;
