//! # Punchclock
//!
//! Attendance terminal backend: registers reader cards, records arrivals,
//! leaves and departures, and serves the presence overview and punch log to
//! the terminal frontend (`punchclock-ui`).
//!
//! ## Modules
//!
//! - [`storage`]: SQLite card and punch store
//! - [`attendance`]: Scan rules and card administration
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use punchclock::attendance::{AttendanceConfig, AttendanceService, ScanMode};
//! use punchclock::storage::Database;
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Arc::new(Database::open_in_memory()?);
//!     let attendance = AttendanceService::new(db, AttendanceConfig::default());
//!
//!     attendance.find_or_create_card("ab:ba:de:da")?;
//!     let outcome = attendance.scan(&[0xAB, 0xBA, 0xDE, 0xDA], ScanMode::Arrival)?;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod attendance;
pub mod config;
pub mod storage;

// Re-export top-level types for convenience
pub use storage::{
    Card, CardUpdate, Database, Punch, PunchLogEntry, PunchStatus, StorageError, StorageResult,
};

pub use attendance::{
    AttendanceConfig, AttendanceError, AttendanceResult, AttendanceService, LeaveRegistration,
    ScanMode, ScanOutcome,
};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{generate_default_config, Config, ConfigError, LoggingConfig};
