use thiserror::Error;

/// Errors raised by roster mutations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A required field was left empty
    #[error("{reason}")]
    Validation { reason: String },

    #[error("ID already exists: {id}")]
    DuplicateId { id: String },

    #[error("Student not found: {id}")]
    StudentNotFound { id: String },
}

impl CoreError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::validation("ID and Name are required fields").to_string(),
            "ID and Name are required fields"
        );
        assert_eq!(
            CoreError::DuplicateId { id: "S001".into() }.to_string(),
            "ID already exists: S001"
        );
        assert_eq!(
            CoreError::StudentNotFound { id: "S404".into() }.to_string(),
            "Student not found: S404"
        );
    }
}
