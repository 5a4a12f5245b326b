//! Grammar endpoints

use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use serde_json::Value;

use super::{read_csv_upload, success};
use crate::AppState;
use crate::csv_import;
use crate::error::ApiError;
use crate::page::{Page, PageQuery};
use crate::storage::traits::GrammarStore;
use crate::storage::types::{Grammar, NewGrammar};

fn validate(row: &NewGrammar) -> Result<(), ApiError> {
    if row.grammar.trim().is_empty() {
        return Err(ApiError::Validation("grammar must not be empty".into()));
    }
    if row.meaning.trim().is_empty() {
        return Err(ApiError::Validation("meaning must not be empty".into()));
    }
    Ok(())
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Grammar>>, ApiError> {
    query.validate()?;
    let (rows, total) = state
        .store
        .list_grammar(&query.filter(), query.skip(), query.page_size)
        .await?;
    Ok(Json(Page::assemble(rows, &query, total)?))
}

pub async fn by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Grammar>, ApiError> {
    let grammar = state
        .store
        .grammar_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("grammar"))?;
    Ok(Json(grammar))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(row): Json<NewGrammar>,
) -> Result<Json<Grammar>, ApiError> {
    validate(&row)?;
    let created = state.store.create_grammar(&row).await?;
    tracing::info!(id = created.id, grammar = %created.grammar, "created grammar");
    Ok(Json(created))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(row): Json<NewGrammar>,
) -> Result<Json<Value>, ApiError> {
    validate(&row)?;
    if !state.store.update_grammar(id, &row).await? {
        return Err(ApiError::NotFound("grammar"));
    }
    Ok(success())
}

pub async fn toggle_star(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if !state.store.toggle_grammar_star(id).await? {
        return Err(ApiError::NotFound("grammar"));
    }
    Ok(success())
}

pub async fn import_csv(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let bytes = read_csv_upload(&mut multipart).await?;
    let rows = csv_import::parse_grammar(&bytes)?;
    state.store.upsert_grammar(&rows).await?;
    tracing::info!(rows = rows.len(), "imported grammar CSV");
    Ok(success())
}
