//! kotoba - a small personal Japanese study-aid backend
//!
//! Stores vocabulary, grammar points, honorific pairs, り-adverbs,
//! and onomatopoeia in SQLite, and serves paginated search/list
//! endpoints, CSV bulk import, single-item create/update, and a star
//! (favorite) toggle over HTTP.

pub mod csv_import;
pub mod error;
pub mod page;
pub mod routes;
pub mod settings;
pub mod storage;

use std::sync::Arc;

use axum::Router;

use crate::settings::Settings;
use crate::storage::SqliteStore;

/// Shared state handed to every handler.
pub struct AppState {
    pub store: SqliteStore,
}

/// Build the application router over an already-opened store.
pub fn app(store: SqliteStore, settings: &Settings) -> Router {
    routes::router(Arc::new(AppState { store }), settings)
}
