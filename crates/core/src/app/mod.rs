pub mod commands;
pub mod queries;
pub mod roster;

pub use commands::*;
pub use queries::*;
pub use roster::*;
