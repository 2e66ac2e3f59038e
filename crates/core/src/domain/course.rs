use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Unique code of a course, e.g. `CS101`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseCode(pub String);

impl CourseCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CourseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CourseCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for CourseCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

// Lets sets and maps keyed by `CourseCode` be queried with a plain `&str`.
impl Borrow<str> for CourseCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A course that students can enroll in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    code: CourseCode,
    pub name: String,
}

impl Course {
    pub fn new(code: impl Into<CourseCode>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    pub fn code(&self) -> &CourseCode {
        &self.code
    }
}

impl std::fmt::Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.code, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_course_display() {
        let course = Course::new("CS101", "Introduction to Programming");
        assert_eq!(course.to_string(), "CS101 - Introduction to Programming");
        assert_eq!(course.code().as_str(), "CS101");
    }

    #[test]
    fn test_course_code_lookup_by_str() {
        let mut codes = BTreeSet::new();
        codes.insert(CourseCode::from("MATH201"));
        assert!(codes.contains("MATH201"));
        assert!(!codes.contains("math201"));
    }
}
