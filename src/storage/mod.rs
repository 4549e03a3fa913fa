//! Punchclock Storage
//!
//! SQLite persistence for the attendance terminal:
//!
//! - **types**: Core records (Card, Punch, PunchStatus, PunchLogEntry)
//! - **database**: Connection handle, migrations, transactions
//! - **queries**: Card and punch statements
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use punchclock::storage::{queries, Database, PunchStatus};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::open(std::path::Path::new("./terminal.db"))?;
//!
//!     let card = db.write(|tx| queries::insert_card(tx, "ab:ba:de:da", 0))?;
//!     db.write(|tx| queries::insert_punch(tx, card.id, &PunchStatus::In, 1_000))?;
//!
//!     let log = db.read(queries::punch_log)?;
//!     println!("{} punches", log.len());
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
pub mod queries;
pub mod types;

// Re-export commonly used types
pub use database::Database;
pub use error::{StorageError, StorageResult};
pub use types::{
    card_number_from_uid, now_millis, Card, CardUpdate, Punch, PunchLogEntry, PunchStatus,
    UNKNOWN_LEAVE,
};
