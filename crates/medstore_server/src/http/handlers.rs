//! Request handlers for the four record endpoints.
//!
//! # Responsibility
//! - Decode request bodies and query strings into store commands.
//! - Map store outcomes onto status codes and plain-text confirmations.
//!
//! # Invariants
//! - Any body that does not decode as a record answers 400 and writes nothing.
//! - Any store failure answers 500 with the error text, including rows the
//!   store refuses to return.
//! - Update and delete of an id matching no row still answer 200.

use axum::body::Bytes;
use axum::extract::{Extension, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, info, warn};
use medstore_core::protocol::{
    delete_ok_message, INSERT_OK_MESSAGE, INVALID_ID_MESSAGE, UPDATE_OK_MESSAGE,
};
use medstore_core::{Medicine, MedicineId, StoreError, StoreHandle};
use serde::Deserialize;

/// Query string of `DELETE /delete`.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Option<String>,
}

/// `GET /fetch`: every record as a JSON array.
pub async fn handle_fetch(Extension(store): Extension<StoreHandle>) -> Response {
    match store.list_medicines().await {
        Ok(medicines) => {
            info!(
                "event=http_fetch module=http status=ok count={}",
                medicines.len()
            );
            (StatusCode::OK, Json(medicines)).into_response()
        }
        Err(err) => internal_error("http_fetch", err),
    }
}

/// `POST /insert`: stores the decoded record under a new id.
pub async fn handle_insert(Extension(store): Extension<StoreHandle>, body: Bytes) -> Response {
    let medicine = match decode_medicine("http_insert", &body) {
        Ok(medicine) => medicine,
        Err(rejection) => return rejection,
    };

    match store.insert_medicine(medicine).await {
        Ok(id) => {
            info!("event=http_insert module=http status=ok id={id}");
            (StatusCode::OK, INSERT_OK_MESSAGE).into_response()
        }
        Err(err) => internal_error("http_insert", err),
    }
}

/// `PUT /update`: overwrites the record addressed by the body's id.
///
/// An id matching no row still answers 200.
pub async fn handle_update(Extension(store): Extension<StoreHandle>, body: Bytes) -> Response {
    let medicine = match decode_medicine("http_update", &body) {
        Ok(medicine) => medicine,
        Err(rejection) => return rejection,
    };
    let id = medicine.id;

    match store.update_medicine(medicine).await {
        Ok(affected) => {
            info!("event=http_update module=http status=ok id={id} affected={affected}");
            (StatusCode::OK, UPDATE_OK_MESSAGE).into_response()
        }
        Err(err) => internal_error("http_update", err),
    }
}

/// `DELETE /delete?id=<int>`: removes the addressed record.
///
/// An id matching no row still answers 200.
pub async fn handle_delete(
    Extension(store): Extension<StoreHandle>,
    Query(params): Query<DeleteParams>,
) -> Response {
    let Some(id) = params
        .id
        .as_deref()
        .and_then(|raw| raw.parse::<MedicineId>().ok())
    else {
        warn!(
            "event=http_delete module=http status=rejected error_code=invalid_id raw_id={:?}",
            params.id
        );
        return (StatusCode::BAD_REQUEST, INVALID_ID_MESSAGE).into_response();
    };

    match store.delete_medicine(id).await {
        Ok(affected) => {
            info!("event=http_delete module=http status=ok id={id} affected={affected}");
            (StatusCode::OK, delete_ok_message(id)).into_response()
        }
        Err(err) => internal_error("http_delete", err),
    }
}

fn decode_medicine(event: &str, body: &[u8]) -> Result<Medicine, Response> {
    serde_json::from_slice(body).map_err(|err| {
        warn!("event={event} module=http status=rejected error_code=malformed_json error={err}");
        (StatusCode::BAD_REQUEST, err.to_string()).into_response()
    })
}

fn internal_error(event: &str, err: StoreError) -> Response {
    error!("event={event} module=http status=error error={err}");
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
}
