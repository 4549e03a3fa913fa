//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::api::error::{ApiError, ApiResult};
use crate::attendance::{AttendanceResult, AttendanceService};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Attendance rules over the card store
    pub attendance: Arc<AttendanceService>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(attendance: Arc<AttendanceService>, config: ApiConfig) -> Self {
        Self {
            attendance,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Run an attendance operation on the blocking thread pool.
    ///
    /// SQLite statements hold the connection mutex and must not block the
    /// async workers.
    pub async fn attendance_task<T, F>(&self, task: F) -> ApiResult<T>
    where
        F: FnOnce(&AttendanceService) -> AttendanceResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let attendance = Arc::clone(&self.attendance);
        let result = tokio::task::spawn_blocking(move || task(&attendance))
            .await
            .map_err(|e| ApiError::Internal(format!("Attendance task failed: {}", e)))?;
        Ok(result?)
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Origins allowed to call the API (empty allows any)
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8090,
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance::{AttendanceConfig, AttendanceError};
    use crate::storage::Database;

    fn state() -> AppState {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let attendance = Arc::new(AttendanceService::new(db, AttendanceConfig::default()));
        AppState::new(attendance, ApiConfig::default())
    }

    #[tokio::test]
    async fn test_attendance_task_runs_off_the_async_workers() {
        let state = state();
        let card = state
            .attendance_task(|attendance| attendance.find_or_create_card("aa:bb"))
            .await
            .unwrap();
        assert_eq!(card.card_number, "aa:bb");

        let cards = state.attendance_task(|attendance| attendance.overview()).await.unwrap();
        assert_eq!(cards.len(), 1);
    }

    #[tokio::test]
    async fn test_attendance_task_maps_errors() {
        let err = state()
            .attendance_task(|attendance| attendance.delete_card(42))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Attendance(AttendanceError::CardIdNotFound(42))
        ));
    }
}
