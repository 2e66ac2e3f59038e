//! Rollcall application library
//!
//! Exposes the terminal front end (config, CLI, service, TUI) so the binary
//! and the integration tests share one code path.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod services;
pub mod tui;
