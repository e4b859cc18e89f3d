//! HTTP router and listener.
//!
//! # Responsibility
//! - Bind the four record endpoints to their handlers.
//! - Inject the shared `StoreHandle` into every handler.
//!
//! # Invariants
//! - Each endpoint answers only its documented method; others get 405.

mod handlers;

pub use handlers::{handle_delete, handle_fetch, handle_insert, handle_update, DeleteParams};

use axum::routing::{delete, get, post, put};
use axum::{Extension, Router};
use medstore_core::protocol::{ENDPOINT_DELETE, ENDPOINT_FETCH, ENDPOINT_INSERT, ENDPOINT_UPDATE};
use medstore_core::StoreHandle;
use std::future::Future;
use tokio::net::TcpListener;

/// Builds the application router around `store`.
pub fn router(store: StoreHandle) -> Router {
    Router::new()
        .route(ENDPOINT_FETCH, get(handle_fetch))
        .route(ENDPOINT_INSERT, post(handle_insert))
        .route(ENDPOINT_UPDATE, put(handle_update))
        .route(ENDPOINT_DELETE, delete(handle_delete))
        .layer(Extension(store))
}

/// Serves the router on `listener` until the listener fails.
pub async fn serve(listener: TcpListener, store: StoreHandle) -> std::io::Result<()> {
    axum::serve(listener, router(store)).await
}

/// Serves until `shutdown` resolves, then drains open connections.
///
/// Every `StoreHandle` clone held by the router is dropped before this
/// returns.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    store: StoreHandle,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown)
        .await
}
