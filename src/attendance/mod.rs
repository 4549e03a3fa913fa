//! Attendance
//!
//! Rules for turning card scans into punches and keeping presence flags in
//! sync. See [`service`] for the scan state table.

pub mod error;
pub mod service;

pub use error::{AttendanceError, AttendanceResult};
pub use service::{
    normalize_card_number, AttendanceConfig, AttendanceService, LeaveRegistration, ScanMode,
    ScanOutcome,
};
