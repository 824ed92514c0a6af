//! HTTP resource API for standup.
//!
//! Exposes the record store as a REST-ish JSON interface. This module
//! owns the router and the serve loop; request handling lives in
//! [`handlers`].

pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{delete, get};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::info;

use crate::error::Result;
use crate::store::Store;

/// Shared state for request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The record store, shared across concurrent requests.
    pub(crate) store: Arc<Mutex<Store>>,
}

impl AppState {
    /// Wrap a store for use as handler state.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

/// Build the API router.
///
/// `/standups/clear` is registered as a static route; the axum router
/// matches it ahead of the `/standups/:id` capture.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/standups",
            get(handlers::list_standups).post(handlers::create_standup),
        )
        .route("/standups/clear", delete(handlers::clear_standups))
        .route(
            "/standups/:id",
            get(handlers::get_standup)
                .put(handlers::update_standup)
                .delete(handlers::delete_standup),
        )
        .with_state(state)
}

/// Bind the given address and serve the API until the task is cancelled.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn serve(addr: SocketAddr, store: Store) -> Result<()> {
    let app = router(AppState::new(store));

    let listener = TcpListener::bind(addr).await?;
    info!("API listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
