pub mod listener;

// Re-exports
pub use listener::*;
