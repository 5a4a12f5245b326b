//! Vocabulary endpoints

use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use serde_json::Value;

use super::{read_csv_upload, success};
use crate::AppState;
use crate::csv_import;
use crate::error::ApiError;
use crate::page::{Page, PageQuery};
use crate::storage::traits::VocabularyStore;
use crate::storage::types::{NewVocabulary, Vocabulary};

fn validate(row: &NewVocabulary) -> Result<(), ApiError> {
    if row.kanji.trim().is_empty() {
        return Err(ApiError::Validation("kanji must not be empty".into()));
    }
    if row.meaning.trim().is_empty() {
        return Err(ApiError::Validation("meaning must not be empty".into()));
    }
    Ok(())
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Vocabulary>>, ApiError> {
    query.validate()?;
    let (rows, total) = state
        .store
        .list_vocabulary(&query.filter(), query.skip(), query.page_size)
        .await?;
    Ok(Json(Page::assemble(rows, &query, total)?))
}

pub async fn by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vocabulary>, ApiError> {
    let vocabulary = state
        .store
        .vocabulary_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("vocabulary"))?;
    Ok(Json(vocabulary))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(row): Json<NewVocabulary>,
) -> Result<Json<Vocabulary>, ApiError> {
    validate(&row)?;
    let created = state.store.create_vocabulary(&row).await?;
    tracing::info!(id = created.id, kanji = %created.kanji, "created vocabulary");
    Ok(Json(created))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(row): Json<NewVocabulary>,
) -> Result<Json<Value>, ApiError> {
    validate(&row)?;
    if !state.store.update_vocabulary(id, &row).await? {
        return Err(ApiError::NotFound("vocabulary"));
    }
    Ok(success())
}

pub async fn toggle_star(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if !state.store.toggle_vocabulary_star(id).await? {
        return Err(ApiError::NotFound("vocabulary"));
    }
    Ok(success())
}

/// Import a CSV upload. The upsert completes before the response is
/// sent, so a failed import surfaces to the caller.
pub async fn import_csv(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let bytes = read_csv_upload(&mut multipart).await?;
    let rows = csv_import::parse_vocabulary(&bytes)?;
    state.store.upsert_vocabulary(&rows).await?;
    tracing::info!(rows = rows.len(), "imported vocabulary CSV");
    Ok(success())
}
