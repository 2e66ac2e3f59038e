use crate::domain::{
    Course, CourseCode, GradeMap, NewStudent, RosterEvent, Student, StudentId, StudentUpdate,
};
use crate::error::{CoreError, Result};
use crate::ports::ChangeListener;
use tracing::{debug, info};

/// The authoritative student and course collections
///
/// Created once at startup and handed to every consumer. All mutations go
/// through the methods below so that registered listeners see every change.
#[derive(Default)]
pub struct Roster {
    students: Vec<Student>,
    courses: Vec<Course>,
    listeners: Vec<Box<dyn ChangeListener>>,
}

impl std::fmt::Debug for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Roster")
            .field("students", &self.students)
            .field("courses", &self.courses)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener that is notified after every committed mutation
    pub fn subscribe(&mut self, listener: impl ChangeListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn find_student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id().as_str() == id)
    }

    pub fn find_course_by_code(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code().as_str() == code)
    }

    /// Add a course to the catalogue. Only used while seeding.
    pub fn add_course(&mut self, course: Course) -> Result<()> {
        if self.find_course_by_code(course.code().as_str()).is_some() {
            return Err(CoreError::DuplicateId {
                id: course.code().to_string(),
            });
        }
        debug!("Course added: {}", course);
        self.courses.push(course);
        Ok(())
    }

    /// Append a student, rejecting an id that is already taken
    pub fn add_student(&mut self, student: Student) -> Result<()> {
        if self.find_student(student.id().as_str()).is_some() {
            return Err(CoreError::DuplicateId {
                id: student.id().to_string(),
            });
        }

        let id = student.id().clone();
        info!("Student added: {}", student);
        self.students.push(student);
        self.emit(RosterEvent::StudentAdded { id });
        Ok(())
    }

    /// The add-student flow: required fields first, then id uniqueness
    pub fn create_student(&mut self, new_student: NewStudent) -> Result<StudentId> {
        new_student.validate()?;
        let student = new_student.into_student();
        let id = student.id().clone();
        self.add_student(student)?;
        Ok(id)
    }

    /// The update-student flow. The id never changes.
    pub fn update_student(&mut self, id: &str, update: StudentUpdate) -> Result<()> {
        update.validate()?;
        let student = self.student_mut(id)?;
        student.apply_update(update);

        let id = student.id().clone();
        info!("Student updated: {}", student);
        self.emit(RosterEvent::StudentUpdated { id });
        Ok(())
    }

    /// Enroll a student in a course.
    ///
    /// Returns whether the enrollment set changed; listeners are only told
    /// about real changes. The course code is not checked against the catalogue.
    pub fn enroll(&mut self, student_id: &str, course_code: impl Into<CourseCode>) -> Result<bool> {
        let course = course_code.into();
        let student = self.student_mut(student_id)?;
        if !student.enroll(course.clone()) {
            debug!("{} already enrolled in {}", student, course);
            return Ok(false);
        }

        let id = student.id().clone();
        info!("{} enrolled in {}", student, course);
        self.emit(RosterEvent::StudentEnrolled { id, course });
        Ok(true)
    }

    /// Replace a student's grades with `grades`
    pub fn save_grades(&mut self, student_id: &str, grades: GradeMap) -> Result<()> {
        let student = self.student_mut(student_id)?;
        student.set_grades(grades);

        let id = student.id().clone();
        info!("Grades saved for {}", student);
        self.emit(RosterEvent::GradesSaved { id });
        Ok(())
    }

    fn student_mut(&mut self, id: &str) -> Result<&mut Student> {
        self.students
            .iter_mut()
            .find(|s| s.id().as_str() == id)
            .ok_or_else(|| CoreError::StudentNotFound { id: id.to_string() })
    }

    fn emit(&self, event: RosterEvent) {
        debug!("Notifying {} listener(s): {:?}", self.listeners.len(), event);
        for listener in &self.listeners {
            listener.notify(&event);
        }
    }
}
