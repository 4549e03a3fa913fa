//! HTTP API Client
//!
//! Functions for communicating with the Punchclock REST API.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8090/api/v1";

const API_URL_KEY: &str = "punchclock_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten());

    normalize_base(stored.as_deref().unwrap_or(DEFAULT_API_BASE))
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

// ============ Response Types ============

/// A registered card
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Card {
    pub id: i64,
    pub card_number: String,
    #[serde(default)]
    pub card_name: Option<String>,
    #[serde(default)]
    pub user_fullname: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    pub is_present: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Card {
    /// Best available label for the card holder
    pub fn display_name(&self) -> &str {
        self.user_fullname
            .as_deref()
            .or(self.card_name.as_deref())
            .unwrap_or(&self.card_number)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct PunchLogEntry {
    pub id: i64,
    pub card_number: String,
    #[serde(default)]
    pub card_name: Option<String>,
    #[serde(default)]
    pub user_fullname: Option<String>,
    /// `In`, `Out` or a `leave_type.*` key
    pub status: String,
    pub timestamp: i64,
}

impl PunchLogEntry {
    /// Message key describing the status
    pub fn status_key(&self) -> String {
        if self.status.starts_with("leave_type.") {
            self.status.clone()
        } else {
            format!("status.{}", self.status)
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct OverviewResponse {
    pub cards: Vec<Card>,
    pub present: usize,
    pub total: usize,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CardListResponse {
    pub cards: Vec<Card>,
    pub total: usize,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct PunchLogResponse {
    pub entries: Vec<PunchLogEntry>,
    pub total: usize,
}

#[derive(Debug, serde::Deserialize)]
pub struct ClearLogResponse {
    pub removed: usize,
}

/// Failure of an API request
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// The request never reached the server
    #[error("network error: {0}")]
    Ne// ============ API Functions ============

async fn read_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    if !response.ok() {
        let status = response.status();
        return Err(match response.json::<ApiErrorBody>().await {
            Ok(body) => ClientError::Api {
                code: body.error.code,
                message: body.error.message,
            },
            Err(_) => ClientError::Status(status),
        });
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::Parse(e.to_string()))
}

/// Fetch every card with its presence flag and the server's counts
pub async fn fetch_overview() -> ClientResult<OverviewResponse> {
    let response = Request::get(&format!("{}/overview", get_api_base()))
        .send()
        .await?;

    read_json(response).await
}

pub async fn fetch_cards() -> ClientResult<CardListResponse> {
    let response = Request::get(&format!("{}/cards", get_api_base()))
        .send()
        .await?;

    read_json(response).await
}

/// Fetch the punch log, newest first
pub async fn fetch_punch_log() -> ClientResult<PunchLogResponse> {
    let response = Request::get(&format!("{}/punches", get_api_base()))
        .send()
        .await?;

    read_json(response).await
}

/// Delete every punch. Returns the number removed.
pub async fn clear_punch_log() -> ClientResult<usize> {
    let response = Request::delete(&format!("{}/punches", get_api_base()))
        .send()
        .await?;

    let result: ClearLogResponse = read_json(response).await?;
    Ok(result.removed)
}

st first
pub async fn fetch_punch_log() -> Result<Vec<PunchLogEntry>, String> {
    let response = Request::get(&format!("{}/punches", get_api_base()))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    let result: PunchLogResponse = read_json(response).await?;
    Ok(result.entries)
}

/// Delete every punch. Returns the number removed.
pub async fn clear_punch_log() -> Result<usize, String> {
    let response = Request::delete(&format!("{}/punches", get_api_base()))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    let result: ClearLogResponse = read_json(response).await?;
    Ok(result.removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("http://host:8090/api/v1/"), "http://host:8090/api/v1");
        assert_eq!(normalize_base(DEFAULT_API_BASE), DEFAULT_API_BASE);
    }

    #[test]
    fn test_card_display_name() {
        let mut card: Card = serde_json::from_str(
            r#"{"id": 1, "card_number": "ab:ba", "is_present": true, "created_at": 0, "updated_at": 0}"#,
        )
        .unwrap();
        assert_eq!(card.display_name(), "ab:ba");

        card.card_name = Some("Blue tag".to_string());
        assert_eq!(card.display_name(), "Blue tag");

        card.user_fullname = Some("Ana Novak".to_string());
        assert_eq!(card.display_name(), "Ana Novak");
    }

    #[test]
    fn test_status_key() {
        let entry: PunchLogEntry = serde_json::from_str(
            r#"{"id": 1, "card_number": "ab", "status": "In", "timestamp": 5}"#,
        )
        .unwrap();
        assert_eq!(entry.status_key(), "status.In");

        let leave = PunchLogEntry {
            status: "leave_type.doctor".to_string(),
            ..entry
        };
        assert_eq!(leave.status_key(), "leave_type.doctor");
    }

    #[test]
    fn test_client_error_kinds() {
        let network = ClientError::Network("connection refused".to_string());
        assert!(network.is_network());
        assert_eq!(network.to_string(), "network error: connection refused");

        let api = ClientError::Api {
            code: "CARD_NOT_FOUND".to_string(),
            message: "Card 7 not found".to_string(),
        };
        assert!(!api.is_network());
        assert_eq!(api.to_string(), "CARD_NOT_FOUND: Card 7 not found");
        assert_eq!(ClientError::Status(502).to_string(), "HTTP 502");
    }

    #[test]
    fn test_error_body_shape() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"error": {"code": "DATABASE_ERROR", "message": "locked"}}"#,
        )
        .unwrap();
        assert_eq!(body.error.code, "DATABASE_ERROR");
        assert_eq!(body.error.message, "locked");
    }

    #[test]
    fn test_overview_counts_come_from_server() {
        let overview: OverviewResponse = serde_json::from_str(
            r#"{"cards": [], "present": 3, "total": 5}"#,
        )
        .unwrap();
        assert!(overview.cards.is_empty());
        assert_eq!((overview.present, overview.total), (3, 5));
    }
}
