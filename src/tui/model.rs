use rollcall_core::app::Command;
use rollcall_core::{Course, CourseCode, GradeMap, Roster, RosterEvent, Student, StudentId};

/// Grades the grade sheet lets the user pick from; the empty string means "no grade"
pub const GRADE_OPTIONS: [&str; 6] = ["", "A", "B", "C", "D", "F"];

/// The TUI Model - the complete UI state
///
/// Roster data itself is never copied in here; views read it from the
/// `Roster` at render time. Only derived lists are cached: the eligible
/// students (rebuilt by `refresh`) and the editable grade sheet (rebuilt by
/// `reload_grade_rows`).
#[derive(Debug, Default)]
pub struct TuiModel {
    /// Which tab is shown
    pub tab: Tab,

    /// Cursor positions and derived lists
    pub ui_state: UiState,

    /// Add/update dialog, if open
    pub form: Option<StudentForm>,

    /// Student shown in the details overlay
    pub details: Option<StudentId>,

    pub show_help: bool,

    /// Error messages to display; they block input until dismissed
    pub errors: Vec<String>,

    /// Status messages to display
    pub messages: Vec<String>,

    /// Whether the application should quit
    pub should_quit: bool,
}

/// The three tabs of the main window
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Students,
    Enrollment,
    Grades,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Students, Tab::Enrollment, Tab::Grades];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Students => "Student Management",
            Tab::Enrollment => "Course Enrollment",
            Tab::Grades => "Grade Management",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Students => 0,
            Tab::Enrollment => 1,
            Tab::Grades => 2,
        }
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn previous(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

#[derive(Debug, Default)]
pub struct UiState {
    /// Selected row in the student table
    pub student_cursor: usize,

    /// Course picked on the enrollment tab
    pub course_index: usize,

    /// Students not enrolled in the picked course, rebuilt on every refresh
    pub eligible: Vec<StudentId>,

    /// Selected row in the eligible-students table
    pub eligible_cursor: usize,

    /// Student picked on the grades tab
    pub grade_student_index: usize,

    /// Editable copy of the picked student's grade sheet
    pub grade_rows: Vec<GradeDraft>,

    /// Selected row in the grade sheet
    pub grade_cursor: usize,

    pub show_email_column: bool,
}

/// One editable row of the grade sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeDraft {
    pub code: CourseCode,
    pub course_name: String,
    pub grade: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    Add,
    Edit { id: StudentId },
}

/// The add/update student dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentForm {
    pub kind: FormKind,
    /// Field values in `FIELD_LABELS` order
    pub fields: [String; 4],
    pub focus: usize,
}

impl StudentForm {
    pub const FIELD_LABELS: [&'static str; 4] = ["Student ID", "Name", "Email", "Major"];

    pub fn add() -> Self {
        Self {
            kind: FormKind::Add,
            fields: Default::default(),
            focus: 0,
        }
    }

    pub fn edit(student: &Student) -> Self {
        Self {
            kind: FormKind::Edit {
                id: student.id().clone(),
            },
            fields: [
                student.id().to_string(),
                student.name.clone(),
                student.email.clone(),
                student.major.clone(),
            ],
            focus: 1,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            FormKind::Add => "Add New Student",
            FormKind::Edit { .. } => "Update Student",
        }
    }

    /// The id cannot be changed once a student exists
    pub fn is_read_only(&self, field: usize) -> bool {
        field == 0 && matches!(self.kind, FormKind::Edit { .. })
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
        if self.is_read_only(self.focus) {
            self.focus_next();
        }
    }

    pub fn focus_previous(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        if self.is_read_only(self.focus) {
            self.focus_previous();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if !self.is_read_only(self.focus) {
            self.fields[self.focus].push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if !self.is_read_only(self.focus) {
            self.fields[self.focus].pop();
        }
    }
}

impl TuiModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state for a freshly loaded roster
    pub fn with_roster(roster: &Roster, show_email_column: bool) -> Self {
        let mut model = Self::new();
        model.ui_state.show_email_column = show_email_column;
        model.refresh(roster);
        model.reload_grade_rows(roster);
        model
    }

    /// Re-derive the dependent views after a roster change.
    ///
    /// Unsaved grade edits are only thrown away when the change concerns the
    /// student whose sheet is open.
    pub fn apply_event(&mut self, event: &RosterEvent, roster: &Roster) {
        self.refresh(roster);

        let grade_student = self.grade_student(roster).map(|s| s.id().clone());
        let concerns_sheet = grade_student.as_ref() == Some(event.student_id());
        if concerns_sheet || self.ui_state.grade_rows.is_empty() {
            self.reload_grade_rows(roster);
        }
    }

    /// Clamp cursors and rebuild the eligible-student list
    pub fn refresh(&mut self, roster: &Roster) {
        let ui = &mut self.ui_state;
        ui.student_cursor = clamp(ui.student_cursor, roster.students().len());
        ui.course_index = clamp(ui.course_index, roster.courses().len());
        ui.grade_student_index = clamp(ui.grade_student_index, roster.students().len());

        ui.eligible = match roster.courses().get(ui.course_index) {
            Some(course) => roster
                .eligible_students(course.code().as_str())
                .into_iter()
                .map(|s| s.id().clone())
                .collect(),
            None => Vec::new(),
        };
        ui.eligible_cursor = clamp(ui.eligible_cursor, ui.eligible.len());
    }

    /// Replace the editable grade sheet with the stored grades of the picked student
    pub fn reload_grade_rows(&mut self, roster: &Roster) {
        let rows = match self.grade_student(roster) {
            Some(student) => roster
                .grade_rows(student)
                .into_iter()
                .map(|row| GradeDraft {
                    code: row.course.code().clone(),
                    course_name: row.course.name.clone(),
                    grade: row.grade.to_string(),
                })
                .collect(),
            None => Vec::new(),
        };
        self.ui_state.grade_rows = rows;
        self.ui_state.grade_cursor =
            clamp(self.ui_state.grade_cursor, self.ui_state.grade_rows.len());
    }

    pub fn selected_student<'a>(&self, roster: &'a Roster) -> Option<&'a Student> {
        roster.students().get(self.ui_state.student_cursor)
    }

    pub fn selected_course<'a>(&self, roster: &'a Roster) -> Option<&'a Course> {
        roster.courses().get(self.ui_state.course_index)
    }

    pub fn selected_eligible(&self) -> Option<&StudentId> {
        self.ui_state.eligible.get(self.ui_state.eligible_cursor)
    }

    pub fn grade_student<'a>(&self, roster: &'a Roster) -> Option<&'a Student> {
        roster.students().get(self.ui_state.grade_student_index)
    }

    /// The grade sheet as it would be saved: every row, including empty grades
    pub fn grade_sheet(&self) -> GradeMap {
        self.ui_state
            .grade_rows
            .iter()
            .map(|row| (row.code.clone(), row.grade.clone()))
            .collect()
    }

    /// Move the selected grade row through `GRADE_OPTIONS`
    pub fn cycle_grade(&mut self, forward: bool) {
        let cursor = self.ui_state.grade_cursor;
        if let Some(row) = self.ui_state.grade_rows.get_mut(cursor) {
            let current = GRADE_OPTIONS
                .iter()
                .position(|g| *g == row.grade)
                .unwrap_or(0);
            let len = GRADE_OPTIONS.len();
            let next = if forward {
                (current + 1) % len
            } else {
                (current + len - 1) % len
            };
            row.grade = GRADE_OPTIONS[next].to_string();
        }
    }

    pub fn set_grade(&mut self, grade: &str) {
        let cursor = self.ui_state.grade_cursor;
        if let Some(row) = self.ui_state.grade_rows.get_mut(cursor) {
            row.grade = grade.to_string();
        }
    }

    /// Close dialogs and report success once a command has been committed
    pub fn command_succeeded(&mut self, cmd: &Command, roster: &Roster) {
        let message = match cmd {
            Command::AddStudent(_) => {
                self.form = None;
                "Student added successfully!".to_string()
            }
            Command::UpdateStudent { .. } => {
                self.form = None;
                "Student updated successfully!".to_string()
            }
            Command::Enroll {
                student_id,
                course_code,
            } => {
                let student = roster
                    .find_student(student_id.as_str())
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| student_id.to_string());
                let course = roster
                    .find_course_by_code(course_code.as_str())
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| course_code.to_string());
                format!("{} enrolled in {}", student, course)
            }
            Command::SaveGrades { .. } => "Grades saved successfully!".to_string(),
            Command::Quit => return,
        };
        self.add_message(message);
    }

    /// Clear all error messages
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Clear all status messages
    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    /// Add a status message
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);
    }

    /// Add an error message
    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }
}

fn clamp(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}
