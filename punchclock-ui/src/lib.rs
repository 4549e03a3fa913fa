//! Punchclock Terminal
//!
//! Attendance terminal frontend built with Leptos (WASM).
//!
//! # Architecture
//!
//! Client-side rendered (CSR) Leptos application. Startup builds the
//! localization context (`sl` with `en` fallback) and the in-memory router
//! for `/`, `/overview` and `/admin`, then mounts onto `#app`. Data comes
//! from the Punchclock API over HTTP.

pub mod api;
pub mod app;
pub mod bootstrap;
pub mod components;
pub mod i18n;
pub mod pages;
pub mod router;
