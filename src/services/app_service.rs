use crossbeam_channel::Receiver;
use rollcall_core::app::Command;
use rollcall_core::{Roster, RosterEvent};
use tracing::{info, warn};

use crate::adapters::ChannelListener;

/// Owns the roster and turns UI commands into store mutations
///
/// Every committed mutation is mirrored into an internal channel; the UI
/// drains it with [`AppService::drain_events`] to refresh dependent views.
#[derive(Debug)]
pub struct AppService {
    roster: Roster,
    event_rx: Receiver<RosterEvent>,
}

impl AppService {
    pub fn new(mut roster: Roster) -> Self {
        let (listener, event_rx) = ChannelListener::new();
        roster.subscribe(listener);
        Self { roster, event_rx }
    }

    /// Read access for views and queries
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Apply a command to the roster. Nothing is committed on error.
    pub fn handle_command(&mut self, cmd: Command) -> rollcall_core::Result<()> {
        let result = match cmd {
            Command::AddStudent(new_student) => {
                info!("Adding student {}", new_student.id);
                self.roster.create_student(new_student).map(|_| ())
            }
            Command::UpdateStudent { id, update } => {
                info!("Updating student {}", id);
                self.roster.update_student(id.as_str(), update)
            }
            Command::Enroll {
                student_id,
                course_code,
            } => {
                info!("Enrolling {} in {}", student_id, course_code);
                self.roster
                    .enroll(student_id.as_str(), course_code)
                    .map(|_| ())
            }
            Command::SaveGrades { student_id, grades } => {
                info!("Saving {} grade(s) for {}", grades.len(), student_id);
                self.roster.save_grades(student_id.as_str(), grades)
            }
            Command::Quit => {
                info!("Quit command received");
                Ok(())
            }
        };

        if let Err(e) = &result {
            warn!("Command rejected: {}", e);
        }
        result
    }

    /// Events emitted since the last call, oldest first
    pub fn drain_events(&self) -> Vec<RosterEvent> {
        self.event_rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_core::{CoreError, Course, GradeMap, NewStudent, StudentId, StudentUpdate};

    fn service() -> AppService {
        let mut roster = Roster::new();
        roster.add_course(Course::new("CS101", "Introduction to Programming")).unwrap();
        AppService::new(roster)
    }

    #[test]
    fn test_commands_emit_events() {
        let mut service = service();
        service
            .handle_command(Command::AddStudent(NewStudent::new("S001", "Ada", "", "")))
            .unwrap();
        service
            .handle_command(Command::Enroll {
                student_id: StudentId::from("S001"),
                course_code: "CS101".into(),
            })
            .unwrap();
        service
            .handle_command(Command::SaveGrades {
                student_id: StudentId::from("S001"),
                grades: GradeMap::from([("CS101".into(), "A".to_string())]),
            })
            .unwrap();

        let events = service.drain_events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], RosterEvent::StudentAdded { .. }));
        assert!(matches!(events[1], RosterEvent::StudentEnrolled { .. }));
        assert!(matches!(events[2], RosterEvent::GradesSaved { .. }));
        assert!(service.drain_events().is_empty());
    }

    #[test]
    fn test_rejected_command_emits_nothing() {
        let mut service = service();
        let err = service
            .handle_command(Command::UpdateStudent {
                id: StudentId::from("S404"),
                update: StudentUpdate {
                    name: "Nobody".into(),
                    ..StudentUpdate::default()
                },
            })
            .unwrap_err();

        assert_eq!(err, CoreError::StudentNotFound { id: "S404".into() });
        assert!(service.drain_events().is_empty());
    }
}
