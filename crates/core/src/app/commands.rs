use crate::domain::{CourseCode, GradeMap, NewStudent, StudentId, StudentUpdate};

/// Commands that can be sent to the application service
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Append a new student to the roster
    AddStudent(NewStudent),

    /// Edit the mutable fields of an existing student
    UpdateStudent { id: StudentId, update: StudentUpdate },

    /// Enroll a student in a course
    Enroll {
        student_id: StudentId,
        course_code: CourseCode,
    },

    /// Replace a student's grade mapping
    SaveGrades { student_id: StudentId, grades: GradeMap },

    /// Quit the application
    Quit,
}
