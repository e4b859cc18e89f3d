//! Medicine record model.
//!
//! # Responsibility
//! - Define the single inventory record persisted in `medicines`.
//! - Define the JSON wire shape used between client and server.
//!
//! # Invariants
//! - `id` is assigned by the store on insert and never changes afterwards.
//! - No value validation: negative quantity/price and empty names are legal.
//!   Only a non-finite price is refused, by the repository.

use serde::{Deserialize, Serialize};

/// Store-assigned record identifier (SQLite `INTEGER PRIMARY KEY`).
pub type MedicineId = i64;

/// One row of the `medicines` table.
///
/// Decoding is lenient in two ways only: missing fields fall back to zero
/// values, and the exact capitalized names sent by older clients (`ID`,
/// `Name`, `Quantity`, `Price`) are accepted as aliases. Any other casing is
/// an unknown field and is skipped. Trailing data and a `null` body fail.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Medicine {
    /// Ignored on insert; selects the row on update.
    #[serde(alias = "ID")]
    pub id: MedicineId,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Quantity")]
    pub quantity: i64,
    /// Currency value, rendered with two decimals.
    #[serde(alias = "Price")]
    pub price: f64,
}

impl Medicine {
    /// Creates a record that has not been stored yet (`id == 0`).
    pub fn new(name: impl Into<String>, quantity: i64, price: f64) -> Self {
        Self::with_id(0, name, quantity, price)
    }

    /// Creates a record addressing an existing row.
    pub fn with_id(id: MedicineId, name: impl Into<String>, quantity: i64, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Medicine;

    #[test]
    fn new_record_has_unassigned_id() {
        let medicine = Medicine::new("aspirin", 10, 2.5);
        assert_eq!(medicine.id, 0);
        assert_eq!(medicine.name, "aspirin");
    }
}
