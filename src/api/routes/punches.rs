//! Punch Routes
//!
//! Punch log and explicit terminal actions.
//!
//! - GET /api/v1/punches - Punch log, newest first
//! - DELETE /api/v1/punches - Clear the punch log
//! - POST /api/v1/punches/leave - Register a leave for a card
//! - POST /api/v1/punches/out - Punch a card out

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{ClearLogResponse, LeaveRequest, PunchLogResponse, PunchOutRequest};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::attendance::LeaveRegistration;
use crate::storage::Punch;

/// GET /api/v1/punches
pub async fn punch_log(State(state): State<Arc<AppState>>) -> ApiResult<Json<PunchLogResponse>> {
    let entries = state.attendance_task(|a| a.punch_log()).await?;

    Ok(Json(PunchLogResponse {
        total: entries.len(),
        entries,
    }))
}

/// DELETE /api/v1/punches
pub async fn clear_punch_log(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ClearLogResponse>> {
    let removed = state.attendance_task(|a| a.clear_punch_log()).await?;
    Ok(Json(ClearLogResponse { removed }))
}

/// POST /api/v1/punches/leave
pub async fn register_leave(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LeaveRequest>,
) -> ApiResult<Json<LeaveRegistration>> {
    let registration = state
        .attendance_task(move |a| a.register_leave(&req.card_number, req.leave_type.as_deref()))
        .await?;
    Ok(Json(registration))
}

/// POST /api/v1/punches/out
pub async fn punch_out(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PunchOutRequest>,
) -> ApiResult<Json<Punch>> {
    let punch = state
        .attendance_task(move |a| a.punch_out(&req.card_number))
        .await?;
    Ok(Json(punch))
}
