//! Medicine repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the four store operations over the `medicines` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Every operation is exactly one SQL statement; no multi-statement
//!   transactions.
//! - Update and delete report affected rows and never treat zero as an error.
//! - Prices are finite on the way in and on the way out.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::medicine::{Medicine, MedicineId};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MEDICINES_TABLE: &str = "medicines";
const MEDICINE_COLUMNS: [&str; 4] = ["ID", "Name", "Quantity", "Price"];
const MEDICINE_SELECT_SQL: &str = "SELECT ID, Name, Quantity, Price FROM medicines";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for medicine persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Connection schema version does not match this binary's migrations.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "medicine repository requires schema version {expected_version}, found {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "medicine repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "medicine repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid medicine data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Store interface for medicine records.
pub trait MedicineRepository {
    /// Returns every record in ascending id order.
    fn list_medicines(&self) -> RepoResult<Vec<Medicine>>;
    /// Inserts a record, ignoring `medicine.id`, and returns the assigned id.
    fn insert_medicine(&self, medicine: &Medicine) -> RepoResult<MedicineId>;
    /// Overwrites the row matching `medicine.id`; returns affected rows.
    fn update_medicine(&self, medicine: &Medicine) -> RepoResult<usize>;
    /// Removes the row matching `id`; returns affected rows.
    fn delete_medicine(&self, id: MedicineId) -> RepoResult<usize>;
}

/// SQLite-backed medicine repository.
pub struct SqliteMedicineRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMedicineRepository<'conn> {
    /// Wraps a connection that is known to be migrated.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Wraps a connection after checking schema version, table and columns.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl MedicineRepository for SqliteMedicineRepository<'_> {
    fn list_medicines(&self) -> RepoResult<Vec<Medicine>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MEDICINE_SELECT_SQL} ORDER BY ID ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut medicines = Vec::new();

        while let Some(row) = rows.next()? {
            medicines.push(parse_medicine_row(row)?);
        }

        Ok(medicines)
    }

    fn insert_medicine(&self, medicine: &Medicine) -> RepoResult<MedicineId> {
        ensure_finite_price(medicine.price)?;
        self.conn.execute(
            "INSERT INTO medicines (Name, Quantity, Price) VALUES (?1, ?2, ?3);",
            params![medicine.name.as_str(), medicine.quantity, medicine.price],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_medicine(&self, medicine: &Medicine) -> RepoResult<usize> {
        ensure_finite_price(medicine.price)?;
        let changed = self.conn.execute(
            "UPDATE medicines
             SET
                Name = ?1,
                Quantity = ?2,
                Price = ?3
             WHERE ID = ?4;",
            params![
                medicine.name.as_str(),
                medicine.quantity,
                medicine.price,
                medicine.id,
            ],
        )?;

        Ok(changed)
    }

    fn delete_medicine(&self, id: MedicineId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM medicines WHERE ID = ?1;", [id])?;

        Ok(changed)
    }
}

fn parse_medicine_row(row: &Row<'_>) -> RepoResult<Medicine> {
    let id: MedicineId = row.get("ID")?;
    let price: f64 = row.get("Price")?;
    if !price.is_finite() {
        return Err(RepoError::InvalidData(format!(
            "non-finite price `{price}` in medicines.Price for ID {id}"
        )));
    }

    Ok(Medicine {
        id,
        name: row.get("Name")?,
        quantity: row.get("Quantity")?,
        price,
    })
}

// JSON has no encoding for NaN or infinity.
fn ensure_finite_price(price: f64) -> RepoResult<()> {
    if price.is_finite() {
        Ok(())
    } else {
        Err(RepoError::InvalidData(format!("non-finite price `{price}`")))
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, MEDICINES_TABLE)? {
        return Err(RepoError::MissingRequiredTable(MEDICINES_TABLE));
    }

    for column in MEDICINE_COLUMNS {
        if !table_has_column(conn, MEDICINES_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: MEDICINES_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
