//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::storage::{Card, PunchLogEntry};

// ============================================
// SCAN DTOs
// ============================================

/// Reader scan request
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    /// Raw card UID bytes as read by the reader
    pub uid: Vec<u8>,
    /// Record a leave instead of an arrival
    #[serde(default)]
    pub is_leave: bool,
    /// Leave kind message key, used when `is_leave` is set
    #[serde(default)]
    pub leave_type: Option<String>,
}

// ============================================
// CARD DTOs
// ============================================

/// Register (or look up) a card
#[derive(Debug, Deserialize)]
pub struct CreateCardRequest {
    pub card_number: String,
}

/// Card list response
#[derive(Debug, Serialize)]
pub struct CardListResponse {
    pub cards: Vec<Card>,
    pub total: usize,
}

/// Presence overview response
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub cards: Vec<Card>,
    pub present: usize,
    pub total: usize,
}

// ============================================
// PUNCH DTOs
// ============================================

/// Leave registration request
#[derive(Debug, Deserialize)]
pub struct LeaveRequest {
    pub card_number: String,
    #[serde(default)]
    pub leave_type: Option<String>,
}

/// Punch-out request
#[derive(Debug, Deserialize)]
pub struct PunchOutRequest {
    pub card_number: String,
}

/// Punch log response
#[derive(Debug, Serialize)]
pub struct PunchLogResponse {
    pub entries: Vec<PunchLogEntry>,
    pub total: usize,
}

/// Punch log clear response
#[derive(Debug, Serialize)]
pub struct ClearLogResponse {
    pub removed: usize,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub uptime_seconds: u64,
    pub version: String,
}
