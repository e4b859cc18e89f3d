//! Core domain logic for medstore.
//! This crate owns the record model, the SQLite store and the shared console.

pub mod console;
pub mod db;
pub mod logging;
pub mod model;
pub mod protocol;
pub mod repo;
pub mod service;
pub mod worker;

pub use console::{render_medicine, InputError, Menu, MenuBackend, MenuChoice};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::medicine::{Medicine, MedicineId};
pub use repo::medicine_repo::{
    MedicineRepository, RepoError, RepoResult, SqliteMedicineRepository,
};
pub use service::medicine_service::MedicineService;
pub use worker::{spawn_store_worker, StoreError, StoreHandle, StoreResult, StoreWorker};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
