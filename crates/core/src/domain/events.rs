use super::{course::CourseCode, student::StudentId};

/// Change notifications emitted by the roster after a successful mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEvent {
    /// A new student was appended to the roster
    StudentAdded { id: StudentId },

    /// Name, email or major of a student changed
    StudentUpdated { id: StudentId },

    /// A student was enrolled in a course they were not enrolled in before
    StudentEnrolled { id: StudentId, course: CourseCode },

    /// A student's grade mapping was replaced
    GradesSaved { id: StudentId },
}

impl RosterEvent {
    /// The student this event concerns
    pub fn student_id(&self) -> &StudentId {
        match self {
            RosterEvent::StudentAdded { id }
            | RosterEvent::StudentUpdated { id }
            | RosterEvent::StudentEnrolled { id, .. }
            | RosterEvent::GradesSaved { id } => id,
        }
    }
}
