//! HTTP surface
//!
//! One module per resource. The router carries the CORS policy, the
//! request trace layer, and the static-asset fallback; everything
//! else is plain handlers over the storage traits.

use std::sync::Arc;

use axum::extract::Multipart;
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::error::ApiError;
use crate::settings::Settings;

mod grammar;
mod reference;
mod vocabulary;

pub fn router(state: Arc<AppState>, settings: &Settings) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/vocabulary", get(vocabulary::list).post(vocabulary::create))
        .route("/vocabulary/csv", post(vocabulary::import_csv))
        .route(
            "/vocabulary/{id}",
            get(vocabulary::by_id).put(vocabulary::update),
        )
        .route("/vocabulary/{id}/star", post(vocabulary::toggle_star))
        .route("/grammar", get(grammar::list).post(grammar::create))
        .route("/grammar/csv", post(grammar::import_csv))
        .route("/grammar/{id}", get(grammar::by_id).put(grammar::update))
        .route("/grammar/{id}/star", post(grammar::toggle_star))
        .route("/honorific", get(reference::honorifics))
        .route("/ri-adverb", get(reference::ri_adverbs))
        .route("/onomatopoeia", get(reference::onomatopoeia))
        .fallback_service(ServeDir::new(&settings.public_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The `{"success": true}` body shared by update, star, and import
/// responses.
fn success() -> Json<Value> {
    Json(json!({ "success": true }))
}

/// Pull the `file` part out of a multipart upload, rejecting anything
/// that is not declared `text/csv` before parsing.
async fn read_csv_upload(multipart: &mut Multipart) -> Result<axum::body::Bytes, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        if field.content_type() != Some("text/csv") {
            return Err(ApiError::UnsupportedMediaType);
        }
        return field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("failed to read upload: {e}")));
    }
    Err(ApiError::Validation("missing file field".into()))
}
