//! Rollcall Core - in-memory roster logic with no external dependencies
//!
//! This crate holds the domain types (students, courses, grades), the
//! `Roster` store that owns them, and the ports through which the store
//! announces changes. Terminal rendering, configuration files and logging
//! setup live in the application crate.

pub mod app;
pub mod domain;
pub mod error;
pub mod ports;

// Re-exports for ergonomics
pub use app::Roster;
pub use domain::*;
pub use error::*;
