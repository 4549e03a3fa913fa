//! Card Routes
//!
//! Card registry endpoints.
//!
//! - GET /api/v1/cards - List all cards
//! - POST /api/v1/cards - Register a card (returns the existing one if known)
//! - PUT /api/v1/cards/:id - Update holder information
//! - DELETE /api/v1/cards/:id - Delete a card and its punches
//! - GET /api/v1/overview - Presence overview

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CardListResponse, CreateCardRequest, OverviewResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::storage::{Card, CardUpdate};

/// GET /api/v1/cards
pub async fn list_cards(State(state): State<Arc<AppState>>) -> ApiResult<Json<CardListResponse>> {
    let cards = state.attendance_task(|a| a.overview()).await?;

    Ok(Json(CardListResponse {
        total: cards.len(),
        cards,
    }))
}

/// POST /api/v1/cards
pub async fn create_card(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCardRequest>,
) -> ApiResult<Json<Card>> {
    let card = state
        .attendance_task(move |a| a.find_or_create_card(&req.card_number))
        .await?;
    Ok(Json(card))
}

/// PUT /api/v1/cards/:id
pub async fn update_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<CardUpdate>,
) -> ApiResult<Json<Card>> {
    let card = state
        .attendance_task(move |a| a.update_card_info(id, req))
        .await?;
    tracing::info!(card_id = id, "Card info updated");
    Ok(Json(card))
}

/// DELETE /api/v1/cards/:id
pub async fn delete_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.attendance_task(move |a| a.delete_card(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/overview
pub async fn overview(State(state): State<Arc<AppState>>) -> ApiResult<Json<OverviewResponse>> {
    let cards = state.attendance_task(|a| a.overview()).await?;

    Ok(Json(OverviewResponse {
        present: cards.iter().filter(|c| c.is_present).count(),
        total: cards.len(),
        cards,
    }))
}
