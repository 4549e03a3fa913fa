//! Scan Route
//!
//! Entry point for the card reader.
//!
//! - POST /api/v1/scan - Apply a card scan (arrival or leave)

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::ScanRequest;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::attendance::{ScanMode, ScanOutcome};

/// POST /api/v1/scan
///
/// Applies the scan rules and reports what was recorded. Scans of
/// unregistered cards succeed with the `unknown_card` outcome so the
/// terminal can offer registration.
pub async fn scan_card(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScanRequest>,
) -> ApiResult<Json<ScanOutcome>> {
    if req.uid.is_empty() {
        return Err(ApiError::Validation("uid cannot be empty".to_string()));
    }

    let mode = if req.is_leave {
        ScanMode::Leave(req.leave_type)
    } else {
        ScanMode::Arrival
    };

    let outcome = state
        .attendance_task(move |a| a.scan(&req.uid, mode))
        .await?;
    Ok(Json(outcome))
}
