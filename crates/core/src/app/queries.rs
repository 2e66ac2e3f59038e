use super::roster::Roster;
use crate::domain::{Course, Student};

/// One line of a student's grade sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeRow<'a> {
    pub course: &'a Course,
    /// Recorded grade, empty when none was saved
    pub grade: &'a str,
}

// Read side. Every query is a full scan; nothing is cached.
impl Roster {
    /// Students not yet enrolled in `course_code`, in roster order
    pub fn eligible_students(&self, course_code: &str) -> Vec<&Student> {
        self.students()
            .iter()
            .filter(|student| !student.is_enrolled(course_code))
            .collect()
    }

    /// Courses a student is enrolled in. Codes with no matching course are skipped.
    pub fn enrolled_courses(&self, student: &Student) -> Vec<&Course> {
        student
            .enrolled_courses()
            .iter()
            .filter_map(|code| self.find_course_by_code(code.as_str()))
            .collect()
    }

    /// Enrolled courses paired with the student's recorded grade
    pub fn grade_rows<'a>(&'a self, student: &'a Student) -> Vec<GradeRow<'a>> {
        self.enrolled_courses(student)
            .into_iter()
            .map(|course| GradeRow {
                course,
                grade: student.grade(course.code().as_str()).unwrap_or(""),
            })
            .collect()
    }
}
