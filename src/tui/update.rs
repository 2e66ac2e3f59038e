use crossterm::event::{KeyCode, KeyModifiers};
use rollcall_core::app::Command;
use rollcall_core::{NewStudent, Roster, StudentUpdate};

use super::model::{FormKind, StudentForm, Tab, TuiModel};

/// Messages that can be sent from the TUI to the application service
#[derive(Debug, Clone, PartialEq)]
pub enum TuiMessage {
    /// Send a command to the app service
    Command(Command),

    /// No action needed
    None,
}

/// The Update function - handles user input and updates the model
pub struct TuiUpdate;

impl TuiUpdate {
    /// Handle a key press and update the model accordingly.
    ///
    /// Overlays take input first, in stacking order: errors, the student
    /// form, details, help. Only then do global and per-tab keys apply.
    pub fn handle_key(
        model: &mut TuiModel,
        roster: &Roster,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) -> TuiMessage {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return TuiMessage::Command(Command::Quit);
        }

        // Any key dismisses the error popup
        if !model.errors.is_empty() {
            model.clear_errors();
            return TuiMessage::None;
        }

        model.clear_messages();

        if model.form.is_some() {
            return Self::handle_form_keys(model, key);
        }

        if model.details.is_some() {
            model.details = None;
            return TuiMessage::None;
        }

        if model.show_help {
            model.show_help = false;
            return TuiMessage::None;
        }

        if let Some(msg) = Self::handle_global_keys(model, roster, key) {
            return msg;
        }

        match model.tab {
            Tab::Students => Self::handle_student_keys(model, roster, key),
            Tab::Enrollment => Self::handle_enrollment_keys(model, roster, key),
            Tab::Grades => Self::handle_grade_keys(model, roster, key),
        }
    }

    /// Keys that work on every tab
    fn handle_global_keys(model: &mut TuiModel, roster: &Roster, key: KeyCode) -> Option<TuiMessage> {
        match key {
            KeyCode::Char('q') => Some(TuiMessage::Command(Command::Quit)),

            KeyCode::Char('?') => {
                model.show_help = true;
                Some(TuiMessage::None)
            }

            KeyCode::Tab => {
                Self::switch_tab(model, roster, model.tab.next());
                Some(TuiMessage::None)
            }

            KeyCode::BackTab => {
                Self::switch_tab(model, roster, model.tab.previous());
                Some(TuiMessage::None)
            }

            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                Self::switch_tab(model, roster, Tab::ALL[index]);
                Some(TuiMessage::None)
            }

            _ => None,
        }
    }

    fn switch_tab(model: &mut TuiModel, roster: &Roster, tab: Tab) {
        model.tab = tab;
        model.refresh(roster);
    }

    fn handle_student_keys(model: &mut TuiModel, roster: &Roster, key: KeyCode) -> TuiMessage {
        let count = roster.students().len();
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                model.ui_state.student_cursor = model.ui_state.student_cursor.saturating_sub(1);
            }

            KeyCode::Down | KeyCode::Char('j') => {
                if model.ui_state.student_cursor + 1 < count {
                    model.ui_state.student_cursor += 1;
                }
            }

            KeyCode::Char('a') => {
                model.form = Some(StudentForm::add());
            }

            KeyCode::Char('e') => match model.selected_student(roster) {
                Some(student) => model.form = Some(StudentForm::edit(student)),
                None => model.add_error("Please select a student to update".to_string()),
            },

            KeyCode::Enter | KeyCode::Char('v') => match model.selected_student(roster) {
                Some(student) => model.details = Some(student.id().clone()),
                None => model.add_error("Please select a student to view".to_string()),
            },

            _ => {}
        }
        TuiMessage::None
    }

    fn handle_enrollment_keys(model: &mut TuiModel, roster: &Roster, key: KeyCode) -> TuiMessage {
        let course_count = roster.courses().len();
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                model.ui_state.eligible_cursor = model.ui_state.eligible_cursor.saturating_sub(1);
            }

            KeyCode::Down | KeyCode::Char('j') => {
                if model.ui_state.eligible_cursor + 1 < model.ui_state.eligible.len() {
                    model.ui_state.eligible_cursor += 1;
                }
            }

            KeyCode::Left | KeyCode::Char('[') if course_count > 0 => {
                model.ui_state.course_index =
                    (model.ui_state.course_index + course_count - 1) % course_count;
                model.ui_state.eligible_cursor = 0;
                model.refresh(roster);
            }

            KeyCode::Right | KeyCode::Char(']') if course_count > 0 => {
                model.ui_state.course_index = (model.ui_state.course_index + 1) % course_count;
                model.ui_state.eligible_cursor = 0;
                model.refresh(roster);
            }

            KeyCode::Enter => {
                let course = model.selected_course(roster).map(|c| c.code().clone());
                match (model.selected_eligible().cloned(), course) {
                    (Some(student_id), Some(course_code)) => {
                        return TuiMessage::Command(Command::Enroll {
                            student_id,
                            course_code,
                        });
                    }
                    _ => model.add_error("Please select a student to enroll".to_string()),
                }
            }

            _ => {}
        }
        TuiMessage::None
    }

    fn handle_grade_keys(model: &mut TuiModel, roster: &Roster, key: KeyCode) -> TuiMessage {
        let student_count = roster.students().len();
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                model.ui_state.grade_cursor = model.ui_state.grade_cursor.saturating_sub(1);
            }

            KeyCode::Down | KeyCode::Char('j') => {
                if model.ui_state.grade_cursor + 1 < model.ui_state.grade_rows.len() {
                    model.ui_state.grade_cursor += 1;
                }
            }

            KeyCode::Char('[') if student_count > 0 => {
                model.ui_state.grade_student_index =
                    (model.ui_state.grade_student_index + student_count - 1) % student_count;
                model.ui_state.grade_cursor = 0;
                model.reload_grade_rows(roster);
            }

            KeyCode::Char(']') if student_count > 0 => {
                model.ui_state.grade_student_index =
                    (model.ui_state.grade_student_index + 1) % student_count;
                model.ui_state.grade_cursor = 0;
                model.reload_grade_rows(roster);
            }

            KeyCode::Right => model.cycle_grade(true),
            KeyCode::Left => model.cycle_grade(false),

            KeyCode::Char(c @ ('a' | 'b' | 'c' | 'd' | 'f' | 'A' | 'B' | 'C' | 'D' | 'F')) => {
                model.set_grade(&c.to_ascii_uppercase().to_string());
            }

            KeyCode::Backspace | KeyCode::Delete => model.set_grade(""),

            KeyCode::Char('s') => {
                if let Some(student) = model.grade_student(roster) {
                    return TuiMessage::Command(Command::SaveGrades {
                        student_id: student.id().clone(),
                        grades: model.grade_sheet(),
                    });
                }
            }

            _ => {}
        }
        TuiMessage::None
    }

    /// Keys while the add/update dialog is open.
    ///
    /// Submitting does not close the dialog; it stays open until the command
    /// is committed so a rejected entry can be corrected.
    fn handle_form_keys(model: &mut TuiModel, key: KeyCode) -> TuiMessage {
        let Some(form) = model.form.as_mut() else {
            return TuiMessage::None;
        };

        match key {
            KeyCode::Esc => model.form = None,
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
            KeyCode::Backspace => form.pop_char(),
            KeyCode::Char(c) => form.push_char(c),
            KeyCode::Enter => return TuiMessage::Command(Self::submit_form(form)),
            _ => {}
        }
        TuiMessage::None
    }

    fn submit_form(form: &StudentForm) -> Command {
        let [id, name, email, major] = form.fields.clone();
        match &form.kind {
            FormKind::Add => Command::AddStudent(NewStudent::new(id, name, email, major)),
            FormKind::Edit { id } => Command::UpdateStudent {
                id: id.clone(),
                update: StudentUpdate { name, email, major },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_core::{Course, StudentId};

    fn roster() -> Roster {
        let mut roster = Roster::new();
        roster.add_course(Course::new("CS101", "Introduction to Programming")).unwrap();
        roster.add_course(Course::new("ENG101", "English Composition")).unwrap();
        roster.create_student(NewStudent::new("S001", "Student 1", "", "Physics")).unwrap();
        roster.enroll("S001", "CS101").unwrap();
        roster
    }

    fn press(model: &mut TuiModel, roster: &Roster, key: KeyCode) -> TuiMessage {
        TuiUpdate::handle_key(model, roster, key, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        let roster = roster();
        let mut model = TuiModel::with_roster(&roster, true);
        assert_eq!(press(&mut model, &roster, KeyCode::Char('q')), TuiMessage::Command(Command::Quit));
        assert_eq!(
            TuiUpdate::handle_key(&mut model, &roster, KeyCode::Char('c'), KeyModifiers::CONTROL),
            TuiMessage::Command(Command::Quit)
        );
    }

    #[test]
    fn test_esc_cancels_form_without_quitting() {
        let roster = roster();
        let mut model = TuiModel::with_roster(&roster, true);
        press(&mut model, &roster, KeyCode::Char('a'));

        assert_eq!(press(&mut model, &roster, KeyCode::Esc), TuiMessage::None);
        assert!(model.form.is_none());
        assert_eq!(press(&mut model, &roster, KeyCode::Esc), TuiMessage::None);
        assert!(!model.should_quit);
    }

    #[test]
    fn test_typing_q_in_form_does_not_quit() {
        let roster = roster();
        let mut model = TuiModel::with_roster(&roster, true);
        press(&mut model, &roster, KeyCode::Char('a'));

        assert_eq!(press(&mut model, &roster, KeyCode::Char('q')), TuiMessage::None);
        assert_eq!(model.form.as_ref().unwrap().fields[0], "q");
    }

    #[test]
    fn test_add_form_submits_command() {
        let roster = roster();
        let mut model = TuiModel::with_roster(&roster, true);
        press(&mut model, &roster, KeyCode::Char('a'));
        for c in "S009".chars() {
            press(&mut model, &roster, KeyCode::Char(c));
        }
        press(&mut model, &roster, KeyCode::Tab);
        for c in "Ada".chars() {
            press(&mut model, &roster, KeyCode::Char(c));
        }

        let msg = press(&mut model, &roster, KeyCode::Enter);
        assert_eq!(
            msg,
            TuiMessage::Command(Command::AddStudent(NewStudent::new("S009", "Ada", "", "")))
        );
        assert!(model.form.is_some(), "form stays open until the command commits");
    }

    #[test]
    fn test_edit_form_prefills_selected_student() {
        let roster = roster();
        let mut model = TuiModel::with_roster(&roster, true);
        press(&mut model, &roster, KeyCode::Char('e'));

        let form = model.form.as_ref().unwrap();
        assert_eq!(form.fields, ["S001", "Student 1", "", "Physics"].map(String::from));
        assert_eq!(form.kind, FormKind::Edit { id: StudentId::from("S001") });
    }

    #[test]
    fn test_enroll_on_enrollment_tab() {
        let roster = roster();
        let mut model = TuiModel::with_roster(&roster, true);
        press(&mut model, &roster, KeyCode::Char('2'));
        assert_eq!(model.tab, Tab::Enrollment);

        // CS101 is selected and S001 is already in it
        assert!(model.ui_state.eligible.is_empty());
        assert_eq!(press(&mut model, &roster, KeyCode::Enter), TuiMessage::None);
        assert_eq!(model.errors.len(), 1);

        press(&mut model, &roster, KeyCode::Char('x'));
        press(&mut model, &roster, KeyCode::Char(']'));
        assert_eq!(
            press(&mut model, &roster, KeyCode::Enter),
            TuiMessage::Command(Command::Enroll {
                student_id: StudentId::from("S001"),
                course_code: "ENG101".into(),
            })
        );
    }

    #[test]
    fn test_grade_keys_build_save_command() {
        let roster = roster();
        let mut model = TuiModel::with_roster(&roster, true);
        press(&mut model, &roster, KeyCode::Char('3'));
        press(&mut model, &roster, KeyCode::Char('b'));

        match press(&mut model, &roster, KeyCode::Char('s')) {
            TuiMessage::Command(Command::SaveGrades { student_id, grades }) => {
                assert_eq!(student_id.as_str(), "S001");
                assert_eq!(grades.get("CS101").map(String::as_str), Some("B"));
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_error_popup_swallows_next_key() {
        let roster = roster();
        let mut model = TuiModel::with_roster(&roster, true);
        model.add_error("boom".to_string());

        assert_eq!(press(&mut model, &roster, KeyCode::Char('q')), TuiMessage::None);
        assert!(model.errors.is_empty());
    }
}
