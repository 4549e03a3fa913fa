//! Punchclock REST API
//!
//! HTTP API layer for the attendance terminal, built with Axum.
//!
//! # Endpoints
//!
//! ## Terminal
//! - `POST /api/v1/scan` - Apply a card scan
//! - `POST /api/v1/punches/leave` - Register a leave
//! - `POST /api/v1/punches/out` - Punch a card out
//!
//! ## Cards
//! - `GET /api/v1/cards` - List all cards
//! - `POST /api/v1/cards` - Register a card
//! - `PUT /api/v1/cards/:id` - Update holder information
//! - `DELETE /api/v1/cards/:id` - Delete a card
//! - `GET /api/v1/overview` - Presence overview
//!
//! ## Punch log
//! - `GET /api/v1/punches` - Punch log, newest first
//! - `DELETE /api/v1/punches` - Clear the punch log
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use punchclock::api::{serve, ApiConfig, AppState};
//! use punchclock::attendance::{AttendanceConfig, AttendanceService};
//! use punchclock::storage::Database;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Arc::new(Database::open("./terminal.db".as_ref())?);
//!     let attendance = Arc::new(AttendanceService::new(db, AttendanceConfig::default()));
//!     let config = ApiConfig::default();
//!
//!     serve(AppState::new(attendance, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Terminal routes
        .route("/scan", post(routes::scan::scan_card))
        // Card routes
        .route(
            "/cards",
            get(routes::cards::list_cards).post(routes::cards::create_card),
        )
        .route(
            "/cards/:id",
            put(routes::cards::update_card).delete(routes::cards::delete_card),
        )
        .route("/overview", get(routes::cards::overview))
        // Punch routes
        .route(
            "/punches",
            get(routes::punches::punch_log).delete(routes::punches::clear_punch_log),
        )
        .route("/punches/leave", post(routes::punches::register_leave))
        .route("/punches/out", post(routes::punches::punch_out));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS for the terminal frontend; any origin when none are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Punchclock API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Punchclock API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance::{AttendanceConfig, AttendanceService};
    use crate::storage::Database;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let attendance = Arc::new(AttendanceService::new(db, AttendanceConfig::default()));
        build_router(AppState::new(attendance, ApiConfig::default()))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = create_test_app();

        let (status, _) = send(&app, "GET", "/health/live", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "GET", "/health/ready", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_list_cards_empty() {
        let app = create_test_app();
        let (status, body) = send(&app, "GET", "/api/v1/cards", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 0);
    }

    #[tokio::test]
    async fn test_scan_unknown_then_registered_card() {
        let app = create_test_app();
        let scan = r#"{"uid": [171, 186, 222, 218]}"#;

        let (status, body) = send(&app, "POST", "/api/v1/scan", Some(scan)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "unknown_card");
        assert_eq!(body["card_number"], "ab:ba:de:da");

        let (status, card) = send(
            &app,
            "POST",
            "/api/v1/cards",
            Some(r#"{"card_number": "ab:ba:de:da"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(card["is_present"], false);

        let (_, body) = send(&app, "POST", "/api/v1/scan", Some(scan)).await;
        assert_eq!(body["outcome"], "punched_in");

        let (_, overview) = send(&app, "GET", "/api/v1/overview", None).await;
        assert_eq!(overview["present"], 1);

        let (_, log) = send(&app, "GET", "/api/v1/punches", None).await;
        assert_eq!(log["total"], 1);
        assert_eq!(log["entries"][0]["status"], "In");
    }

    #[tokio::test]
    async fn test_scan_empty_uid_rejected() {
        let app = create_test_app();
        let (status, body) = send(&app, "POST", "/api/v1/scan", Some(r#"{"uid": []}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_punch_out_unknown_card() {
        let app = create_test_app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/punches/out",
            Some(r#"{"card_number": "01:02"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "CARD_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_leave_update_delete_flow() {
        let app = create_test_app();
        let (_, card) = send(
            &app,
            "POST",
            "/api/v1/cards",
            Some(r#"{"card_number": "aa:bb"}"#),
        )
        .await;
        let id = card["id"].as_i64().unwrap();

        let (status, leave) = send(
            &app,
            "POST",
            "/api/v1/punches/leave",
            Some(r#"{"card_number": "aa:bb", "leave_type": "leave_type.sick"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(leave["punch"]["status"], "leave_type.sick");

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/api/v1/cards/{}", id),
            Some(r#"{"user_fullname": "Ana Novak"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["user_fullname"], "Ana Novak");

        let (status, cleared) = send(&app, "DELETE", "/api/v1/punches", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cleared["removed"], 1);

        let (status, _) = send(&app, "DELETE", &format!("/api/v1/cards/{}", id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "DELETE", &format!("/api/v1/cards/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_json_rejected() {
        let app = create_test_app();
        let (status, _) = send(&app, "POST", "/api/v1/scan", Some("not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
