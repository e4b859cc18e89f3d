//! Medicine use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for the store worker.
//! - Emit one metadata-only log event per store operation.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Update/delete matching no row succeed and are logged as `status=noop`.

use crate::model::medicine::{Medicine, MedicineId};
use crate::repo::medicine_repo::{MedicineRepository, RepoResult};
use log::{error, info, warn};

/// Use-case service wrapper for medicine CRUD operations.
pub struct MedicineService<R: MedicineRepository> {
    repo: R,
}

impl<R: MedicineRepository> MedicineService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every stored medicine.
    pub fn list_medicines(&self) -> RepoResult<Vec<Medicine>> {
        match self.repo.list_medicines() {
            Ok(medicines) => {
                info!(
                    "event=medicine_list module=service status=ok count={}",
                    medicines.len()
                );
                Ok(medicines)
            }
            Err(err) => {
                error!("event=medicine_list module=service status=error error={err}");
                Err(err)
            }
        }
    }

    /// Inserts a medicine and returns the store-assigned id.
    pub fn insert_medicine(&self, medicine: &Medicine) -> RepoResult<MedicineId> {
        match self.repo.insert_medicine(medicine) {
            Ok(id) => {
                info!("event=medicine_insert module=service status=ok id={id}");
                Ok(id)
            }
            Err(err) => {
                error!("event=medicine_insert module=service status=error error={err}");
                Err(err)
            }
        }
    }

    /// Updates the medicine addressed by `medicine.id`.
    ///
    /// Returns the number of affected rows (`0` when the id is unknown).
    pub fn update_medicine(&self, medicine: &Medicine) -> RepoResult<usize> {
        let result = self.repo.update_medicine(medicine);
        log_write("medicine_update", medicine.id, &result);
        result
    }

    /// Deletes the medicine with `id`.
    ///
    /// Returns the number of affected rows (`0` when the id is unknown).
    pub fn delete_medicine(&self, id: MedicineId) -> RepoResult<usize> {
        let result = self.repo.delete_medicine(id);
        log_write("medicine_delete", id, &result);
        result
    }
}

fn log_write(event: &str, id: MedicineId, result: &RepoResult<usize>) {
    match result {
        Ok(0) => warn!("event={event} module=service status=noop id={id} affected=0"),
        Ok(affected) => {
            info!("event={event} module=service status=ok id={id} affected={affected}")
        }
        Err(err) => error!("event={event} module=service status=error id={id} error={err}"),
    }
}
