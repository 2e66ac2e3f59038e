use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use super::course::CourseCode;
use crate::error::{CoreError, Result};

/// Letter grades keyed by course code; an empty string means "no grade recorded"
pub type GradeMap = BTreeMap<CourseCode, String>;

/// Unique, immutable identifier of a student
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub String);

impl StudentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StudentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StudentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A student with their enrollments and grades
///
/// Grade keys are expected to be enrolled course codes, but nothing here
/// enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    id: StudentId,
    pub name: String,
    pub email: String,
    pub major: String,
    enrolled_courses: BTreeSet<CourseCode>,
    grades: GradeMap,
}

impl Student {
    pub fn new(
        id: impl Into<StudentId>,
        name: impl Into<String>,
        email: impl Into<String>,
        major: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            major: major.into(),
            enrolled_courses: BTreeSet::new(),
            grades: GradeMap::new(),
        }
    }

    pub fn id(&self) -> &StudentId {
        &self.id
    }

    pub fn enrolled_courses(&self) -> &BTreeSet<CourseCode> {
        &self.enrolled_courses
    }

    pub fn grades(&self) -> &GradeMap {
        &self.grades
    }

    /// Recorded grade for a course, `None` when the mapping has no entry
    pub fn grade(&self, course_code: &str) -> Option<&str> {
        self.grades.get(course_code).map(String::as_str)
    }

    pub fn is_enrolled(&self, course_code: &str) -> bool {
        self.enrolled_courses.contains(course_code)
    }

    /// Adds the course to the enrollment set.
    ///
    /// Returns `false` when the student was already enrolled. The code is not
    /// checked against any course roster.
    pub fn enroll(&mut self, course_code: impl Into<CourseCode>) -> bool {
        self.enrolled_courses.insert(course_code.into())
    }

    /// Replaces the whole grade mapping. Entries missing from `grades` are dropped.
    pub fn set_grades(&mut self, grades: GradeMap) {
        self.grades = grades;
    }

    /// Overwrites name, email and major; id, enrollments and grades stay as they are
    pub fn apply_update(&mut self, update: StudentUpdate) {
        self.name = update.name;
        self.email = update.email;
        self.major = update.major;
    }

    /// Multi-line summary used by the details view
    pub fn detailed_info(&self) -> String {
        let mut info = String::new();
        let _ = writeln!(info, "Student ID: {}", self.id);
        let _ = writeln!(info, "Name: {}", self.name);
        let _ = writeln!(info, "Email: {}", self.email);
        let _ = writeln!(info, "Major: {}", self.major);
        info.push('\n');

        info.push_str("Enrolled Courses:\n");
        if self.enrolled_courses.is_empty() {
            info.push_str("  No courses enrolled\n");
        } else {
            for code in &self.enrolled_courses {
                let _ = write!(info, "  - {}", code);
                if let Some(grade) = self.grades.get(code) {
                    let _ = write!(info, " (Grade: {})", grade);
                }
                info.push('\n');
            }
        }

        info
    }
}

impl std::fmt::Display for Student {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Input for the add-student flow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub major: String,
}

impl NewStudent {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        major: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            major: major.into(),
        }
    }

    /// Checks that the required fields are present
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() || self.name.is_empty() {
            return Err(CoreError::validation("ID and Name are required fields"));
        }
        Ok(())
    }

    pub fn into_student(self) -> Student {
        Student::new(self.id, self.name, self.email, self.major)
    }
}

/// Input for the update-student flow; the id is not editable
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentUpdate {
    pub name: String,
    pub email: String,
    pub major: String,
}

impl StudentUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(CoreError::validation("Name is a required field"));
        }
        Ok(())
    }
}

impl From<&Student> for StudentUpdate {
    fn from(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            email: student.email.clone(),
            major: student.major.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Student {
        Student::new("S001", "Student 1", "student1@email.com", "Computer Science")
    }

    #[test]
    fn test_new_student_has_no_enrollments_or_grades() {
        let student = sample();
        assert_eq!(student.id().as_str(), "S001");
        assert!(student.enrolled_courses().is_empty());
        assert!(student.grades().is_empty());
    }

    #[test]
    fn test_enroll_is_idempotent() {
        let mut student = sample();
        assert!(student.enroll("CS101"));
        let once = student.enrolled_courses().clone();

        assert!(!student.enroll("CS101"));
        assert_eq!(student.enrolled_courses(), &once);
        assert!(student.is_enrolled("CS101"));
    }

    #[test]
    fn test_enroll_accepts_unknown_codes() {
        let mut student = sample();
        assert!(student.enroll("NOPE999"));
        assert!(student.is_enrolled("NOPE999"));
    }

    #[test]
    fn test_set_grades_replaces_rather_than_merges() {
        let mut student = sample();
        student.set_grades(GradeMap::from([("CS101".into(), "A".to_string())]));
        student.set_grades(GradeMap::from([("MATH201".into(), "B".to_string())]));

        let expected = GradeMap::from([("MATH201".into(), "B".to_string())]);
        assert_eq!(student.grades(), &expected);
        assert_eq!(student.grade("CS101"), None);
        assert_eq!(student.grade("MATH201"), Some("B"));
    }

    #[test]
    fn test_apply_update_keeps_identity_enrollment_and_grades() {
        let mut student = sample();
        student.enroll("CS101");
        student.set_grades(GradeMap::from([("CS101".into(), "A".to_string())]));
        let before = student.clone();

        student.apply_update(StudentUpdate {
            name: "Student 1".into(),
            email: "s1@uni.edu".into(),
            major: "Physics".into(),
        });

        assert_eq!(student.major, "Physics");
        assert_eq!(student.email, "s1@uni.edu");
        assert_eq!(student.id(), before.id());
        assert_eq!(student.enrolled_courses(), before.enrolled_courses());
        assert_eq!(student.grades(), before.grades());
    }

    #[test]
    fn test_detailed_info_lists_courses_and_grades() {
        let mut student = sample();
        assert!(student.detailed_info().contains("No courses enrolled"));

        student.enroll("CS101");
        student.enroll("MATH201");
        student.set_grades(GradeMap::from([("CS101".into(), "A".to_string())]));

        let info = student.detailed_info();
        assert!(info.starts_with("Student ID: S001\n"));
        assert!(info.contains("  - CS101 (Grade: A)\n"));
        assert!(info.contains("  - MATH201\n"));
    }

    #[test]
    fn test_display() {
        assert_eq!(sample().to_string(), "Student 1 (S001)");
    }

    #[test]
    fn test_new_student_validation() {
        assert!(NewStudent::new("S010", "Ada", "", "").validate().is_ok());
        assert!(matches!(
            NewStudent::new("", "Ada", "", "").validate(),
            Err(CoreError::Validation { .. })
        ));
        assert!(matches!(
            NewStudent::new("S010", "", "", "").validate(),
            Err(CoreError::Validation { .. })
        ));
    }

    #[test]
    fn test_update_validation() {
        let update = StudentUpdate::default();
        assert!(matches!(update.validate(), Err(CoreError::Validation { .. })));
    }
}
