//! API Routes
//!
//! Route handlers organized by functionality.

pub mod cards;
pub mod health;
pub mod punches;
pub mod scan;
