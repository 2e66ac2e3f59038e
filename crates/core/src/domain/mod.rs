pub mod course;
pub mod events;
pub mod student;

// Re-exports for convenience
pub use course::*;
pub use events::*;
pub use student::*;
