//! HTTP wire contract shared by server and client.
//!
//! Bodies are JSON-encoded `Medicine` values (or arrays of them for fetch);
//! successful writes answer with a plain-text confirmation.

use crate::model::medicine::MedicineId;

/// Port the server listens on and the client connects to.
pub const SERVER_PORT: u16 = 9040;

/// `GET`: every record as a JSON array.
pub const ENDPOINT_FETCH: &str = "/fetch";
/// `POST`: JSON record body; the supplied id is ignored.
pub const ENDPOINT_INSERT: &str = "/insert";
/// `PUT`: JSON record body addressed by its id.
pub const ENDPOINT_UPDATE: &str = "/update";
/// `DELETE`: id passed as the `id` query parameter.
pub const ENDPOINT_DELETE: &str = "/delete";
pub const DELETE_ID_PARAM: &str = "id";

pub const INSERT_OK_MESSAGE: &str = "Data inserted successfully";
pub const UPDATE_OK_MESSAGE: &str = "Data updated successfully";
pub const INVALID_ID_MESSAGE: &str = "Invalid ID";

/// Confirmation text returned by a successful delete.
pub fn delete_ok_message(id: MedicineId) -> String {
    format!("Medicine with ID {id} deleted successfully")
}
