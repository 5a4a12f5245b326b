//! Read-only reference endpoints: honorifics, り-adverbs, onomatopoeia

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiError;
use crate::storage::traits::ReferenceStore;
use crate::storage::types::{Honorific, HonorificKind, Onomatopoeia, RiAdverb};

#[derive(Debug, Deserialize)]
pub struct HonorificQuery {
    #[serde(rename = "type")]
    kind: HonorificKind,
}

pub async fn honorifics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HonorificQuery>,
) -> Result<Json<Vec<Honorific>>, ApiError> {
    Ok(Json(state.store.honorifics(query.kind).await?))
}

pub async fn ri_adverbs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RiAdverb>>, ApiError> {
    Ok(Json(state.store.ri_adverbs().await?))
}

pub async fn onomatopoeia(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Onomatopoeia>>, ApiError> {
    Ok(Json(state.store.onomatopoeia().await?))
}
