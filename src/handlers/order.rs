//! Order CRUD handlers: create, list, read, update, delete.

use crate::error::AppError;
use crate::model::OrderDraft;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str.parse().map_err(|_| AppError::invalid_order_id())
}

/// Decoded regardless of Content-Type; decode failures are reported verbatim.
fn parse_draft(body: &[u8]) -> Result<OrderDraft, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(e.to_string()))
}

pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse, AppError> {
    let draft = parse_draft(&body)?;
    let order = state.store.create(draft).await?;
    tracing::info!(id = order.id, "order created");
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let orders = state.store.get_all().await?;
    Ok((StatusCode::OK, Json(orders)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let order = state
        .store
        .get_by_id(id)
        .await?
        .ok_or_else(AppError::order_not_found)?;
    Ok((StatusCode::OK, Json(order)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let draft = parse_draft(&body)?;
    // The store reports an unknown id as zero rows affected, not as an error.
    let order = state
        .store
        .update(id, draft)
        .await?
        .ok_or_else(AppError::order_not_found)?;
    tracing::info!(id, "order updated");
    Ok((StatusCode::OK, Json(order)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.store.delete(id).await?;
    tracing::info!(id, "order deleted");
    Ok(StatusCode::NO_CONTENT)
}
