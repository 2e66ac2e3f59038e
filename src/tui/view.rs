use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap},
};
use rollcall_core::Roster;

use super::model::{StudentForm, Tab, TuiModel};

/// The View component of MVU - responsible for rendering the model
pub struct TuiView;

impl TuiView {
    /// Render the entire TUI based on the current model state
    pub fn render(model: &TuiModel, roster: &Roster, frame: &mut Frame) {
        let size = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Length(3), // Tabs
                Constraint::Min(0),    // Main content
                Constraint::Length(2), // Status bar
            ])
            .split(size);

        Self::render_title_bar(roster, frame, chunks[0]);
        Self::render_tabs(model, frame, chunks[1]);

        match model.tab {
            Tab::Students => Self::render_students(model, roster, frame, chunks[2]),
            Tab::Enrollment => Self::render_enrollment(model, roster, frame, chunks[2]),
            Tab::Grades => Self::render_grades(model, roster, frame, chunks[2]),
        }

        Self::render_status_bar(model, frame, chunks[3]);

        // Overlays, bottom to top
        if model.show_help {
            Self::render_help(frame, size);
        }
        if let Some(id) = &model.details {
            Self::render_details(roster, id.as_str(), frame, size);
        }
        if let Some(form) = &model.form {
            Self::render_form(form, frame, size);
        }
        if !model.errors.is_empty() {
            Self::render_error_overlay(model, frame, size);
        }
    }

    fn render_title_bar(roster: &Roster, frame: &mut Frame, area: Rect) {
        let title = format!(
            "Student Management System - {} students, {} courses",
            roster.students().len(),
            roster.courses().len()
        );
        let paragraph = Paragraph::new(title)
            .style(Style::default().fg(Color::White).bg(Color::Blue))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn render_tabs(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
            .collect();

        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL))
            .select(model.tab.index())
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    fn render_students(model: &TuiModel, roster: &Roster, frame: &mut Frame, area: Rect) {
        let show_email = model.ui_state.show_email_column;

        let mut header = vec!["ID", "Name"];
        if show_email {
            header.push("Email");
        }
        header.push("Major");

        let rows: Vec<Row> = roster
            .students()
            .iter()
            .map(|student| {
                let mut cells = vec![
                    Cell::from(student.id().to_string()),
                    Cell::from(student.name.clone()),
                ];
                if show_email {
                    cells.push(Cell::from(student.email.clone()));
                }
                cells.push(Cell::from(student.major.clone()));
                Row::new(cells)
            })
            .collect();

        let widths: Vec<Constraint> = if show_email {
            vec![
                Constraint::Length(8),
                Constraint::Percentage(30),
                Constraint::Percentage(35),
                Constraint::Percentage(25),
            ]
        } else {
            vec![
                Constraint::Length(8),
                Constraint::Percentage(50),
                Constraint::Percentage(40),
            ]
        };

        let table = Table::new(rows, widths)
            .header(Self::header_row(header))
            .block(Block::default().borders(Borders::ALL).title("Students"))
            .row_highlight_style(Self::selected_style());
        let mut state = Self::table_state(model.ui_state.student_cursor, roster.students().len());
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_enrollment(model: &TuiModel, roster: &Roster, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let course_text = match model.selected_course(roster) {
            Some(course) => course.to_string(),
            None => "No courses available".to_string(),
        };
        let picker = Paragraph::new(Line::from(vec![
            Span::raw("◀ "),
            Span::styled(course_text, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" ▶"),
        ]))
        .block(Block::default().borders(Borders::ALL).title("Select Course"));
        frame.render_widget(picker, chunks[0]);

        let rows: Vec<Row> = model
            .ui_state
            .eligible
            .iter()
            .filter_map(|id| roster.find_student(id.as_str()))
            .map(|student| {
                Row::new(vec![
                    student.id().to_string(),
                    student.name.clone(),
                    student.major.clone(),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(8),
                Constraint::Percentage(50),
                Constraint::Percentage(40),
            ],
        )
        .header(Self::header_row(vec!["ID", "Name", "Major"]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Eligible Students"),
        )
        .row_highlight_style(Self::selected_style());
        let mut state =
            Self::table_state(model.ui_state.eligible_cursor, model.ui_state.eligible.len());
        frame.render_stateful_widget(table, chunks[1], &mut state);
    }

    fn render_grades(model: &TuiModel, roster: &Roster, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let student_text = match model.grade_student(roster) {
            Some(student) => student.to_string(),
            None => "No students available".to_string(),
        };
        let picker = Paragraph::new(Line::from(vec![
            Span::raw("[ "),
            Span::styled(student_text, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" ]"),
        ]))
        .block(Block::default().borders(Borders::ALL).title("Select Student"));
        frame.render_widget(picker, chunks[0]);

        let rows: Vec<Row> = model
            .ui_state
            .grade_rows
            .iter()
            .map(|row| {
                let grade = if row.grade.is_empty() {
                    Span::styled("-", Style::default().fg(Color::DarkGray))
                } else {
                    Span::styled(row.grade.clone(), Style::default().fg(Color::Green))
                };
                Row::new(vec![
                    Cell::from(row.code.to_string()),
                    Cell::from(row.course_name.clone()),
                    Cell::from(grade),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Percentage(60),
                Constraint::Length(6),
            ],
        )
        .header(Self::header_row(vec!["Course Code", "Course Name", "Grade"]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Enrolled Courses"),
        )
        .row_highlight_style(Self::selected_style());
        let mut state =
            Self::table_state(model.ui_state.grade_cursor, model.ui_state.grade_rows.len());
        frame.render_stateful_widget(table, chunks[1], &mut state);
    }

    fn render_status_bar(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let status = model.messages.last().cloned().unwrap_or_default();
        let status_paragraph =
            Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::DarkGray));
        frame.render_widget(status_paragraph, chunks[0]);

        let hints = Paragraph::new(Self::get_key_hints(model)).style(Style::default().fg(Color::Gray));
        frame.render_widget(hints, chunks[1]);
    }

    /// Get key hints for current tab
    fn get_key_hints(model: &TuiModel) -> &'static str {
        if model.form.is_some() {
            return "Tab/↓ Next field | ↑ Previous | Enter Save | Esc Cancel";
        }
        match model.tab {
            Tab::Students => "a Add | e Update | Enter Details | Tab Switch | ? Help | q Quit",
            Tab::Enrollment => "[/] Course | j/k Select | Enter Enroll | Tab Switch | q Quit",
            Tab::Grades => "[/] Student | ←/→ or A-F Grade | s Save | Tab Switch | q Quit",
        }
    }

    fn render_form(form: &StudentForm, frame: &mut Frame, area: Rect) {
        let popup_area = Self::centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let mut lines = Vec::new();
        for (i, (label, value)) in StudentForm::FIELD_LABELS.iter().zip(&form.fields).enumerate() {
            let focused = i == form.focus;
            let label_style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let value_style = if form.is_read_only(i) {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().add_modifier(Modifier::UNDERLINED)
            };
            let cursor = if focused { "_" } else { "" };
            lines.push(Line::from(vec![
                Span::styled(format!("{:>11}: ", label), label_style),
                Span::styled(format!("{}{}", value, cursor), value_style),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from("Enter Save | Esc Cancel"));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(form.title()))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, popup_area);
    }

    fn render_details(roster: &Roster, id: &str, frame: &mut Frame, area: Rect) {
        let Some(student) = roster.find_student(id) else {
            return;
        };
        let popup_area = Self::centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let lines: Vec<Line> = student
            .detailed_info()
            .lines()
            .map(|line| Line::from(line.to_string()))
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Student Details: {}", student.name)),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, popup_area);
    }

    fn render_help(frame: &mut Frame, area: Rect) {
        let popup_area = Self::centered_rect(70, 80, area);
        frame.render_widget(Clear, popup_area);

        let heading = Style::default().add_modifier(Modifier::UNDERLINED);
        let help_text = vec![
            Line::from(Span::styled("Global:", heading)),
            Line::from("  Tab / Shift+Tab / 1-3 - Switch tab"),
            Line::from("  ? - Show this help"),
            Line::from("  q / Ctrl+C - Quit"),
            Line::from(""),
            Line::from(Span::styled("Students:", heading)),
            Line::from("  ↑/k ↓/j - Move"),
            Line::from("  a - Add student"),
            Line::from("  e - Update selected student"),
            Line::from("  Enter/v - View details"),
            Line::from(""),
            Line::from(Span::styled("Enrollment:", heading)),
            Line::from("  [ ] / ← → - Choose course"),
            Line::from("  Enter - Enroll selected student"),
            Line::from(""),
            Line::from(Span::styled("Grades:", heading)),
            Line::from("  [ ] - Choose student"),
            Line::from("  ← → - Cycle grade, A-F set, Backspace clear"),
            Line::from("  s - Save grades"),
            Line::from(""),
            Line::from("Press any key to close help..."),
        ];

        let help = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .wrap(Wrap { trim: true });
        frame.render_widget(help, popup_area);
    }

    /// Render error overlay
    fn render_error_overlay(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let popup_area = Self::centered_rect(60, 20, area);

        frame.render_widget(Clear, popup_area);

        let error_text: Vec<Line> = model
            .errors
            .iter()
            .map(|error| Line::from(error.as_str()))
            .collect();

        let error_popup = Paragraph::new(error_text)
            .block(Block::default().borders(Borders::ALL).title("Error"))
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });

        frame.render_widget(error_popup, popup_area);
    }

    fn header_row(titles: Vec<&str>) -> Row<'_> {
        Row::new(titles).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    }

    fn selected_style() -> Style {
        Style::default().bg(Color::DarkGray)
    }

    /// Selection for a table of `len` rows. Ratatui scrolls the table so the
    /// selected row stays inside the viewport.
    fn table_state(cursor: usize, len: usize) -> TableState {
        let selected = (len > 0).then(|| cursor.min(len - 1));
        TableState::default().with_selected(selected)
    }

    /// Helper to create centered rectangle
    fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}
