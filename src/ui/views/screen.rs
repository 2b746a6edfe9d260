//! # Screen Composition
//!
//! Lays the application state out as plain text lines. Nothing here touches
//! the terminal; [`super::TerminalRenderer`] draws whatever this returns, so
//! layout is tested on strings alone.
//!
//! Modal content (alerts and the edit dialog) is boxed and laid over the
//! screen underneath it, just below the header.

use super::bar_chart::{self, CHART_HEIGHT};
use crate::ui::models::{EditBuffer, EditField, LoginField, LoginForm, Session, Student, Subject};
use crate::ui::state::{AppState, Screen};
use crate::ui::view_models::{
    can_edit_field, can_manage, format_percentile, subject_toppers, top_students, ChartSeries,
    MAX_TOTAL_MARKS,
};

pub const LOGIN_TITLE: &str = "Log In to view Student Details";
pub const TOP_STUDENTS_TITLE: &str = "Top 5 Students";
pub const TOPPERS_TITLE: &str = "Topper of Each Subject";
pub const STUDENTS_TITLE: &str = "Students";
pub const CHART_TITLE: &str = "Student Marks Distribution";
pub const DIALOG_TITLE: &str = "Edit/Add Student Details";

const MODAL_ROW: usize = 2;
const LABEL_WIDTH: usize = 16;

/// One screen row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    /// Drawn in reverse video
    pub highlight: bool,
}

impl Line {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlight: false,
        }
    }

    pub fn highlighted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlight: true,
        }
    }

    pub fn blank() -> Self {
        Self::plain("")
    }
}

/// Compose the full screen for a terminal `width` columns wide
pub fn compose(state: &AppState, width: u16) -> Vec<Line> {
    let width = width as usize;
    let mut lines = if state.session.is_logged_in() {
        dashboard(state, width)
    } else {
        login(&state.login_form)
    };

    match state.screen() {
        Screen::Alert => {
            if let Some(message) = state.alert() {
                overlay(&mut lines, alert_box(message, width));
            }
        }
        Screen::EditDialog => {
            if let Some(buffer) = &state.edit {
                overlay(&mut lines, edit_dialog(buffer, &state.session, width));
            }
        }
        Screen::Login | Screen::Dashboard => {}
    }
    lines
}

fn header(session: &Session) -> Line {
    match session.user() {
        Some(user) => Line::plain(format!("markline  |  Welcome {}", user.name)),
        None => Line::plain("markline"),
    }
}

fn focus_marker(focused: bool) -> &'static str {
    if focused {
        "> "
    } else {
        "  "
    }
}

fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}

fn login(form: &LoginForm) -> Vec<Line> {
    vec![
        header(&Session::LoggedOut),
        Line::blank(),
        Line::plain(LOGIN_TITLE),
        Line::blank(),
        Line::plain(format!(
            "{}{:<LABEL_WIDTH$}{}",
            focus_marker(form.focus == LoginField::Username),
            "Username",
            form.username
        )),
        Line::plain(format!(
            "{}{:<LABEL_WIDTH$}{}",
            focus_marker(form.focus == LoginField::Password),
            "Password",
            mask(&form.password)
        )),
        Line::blank(),
        Line::plain("Tab: next field  Enter: log in  Ctrl+C: quit"),
    ]
}

/// Left-aligned columns separated by two spaces
fn table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_row(headers.to_vec())];
    lines.extend(
        rows.iter()
            .map(|row| format_row(row.iter().map(String::as_str).collect())),
    );
    lines
}

fn dashboard(state: &AppState, width: usize) -> Vec<Line> {
    let mut lines = vec![header(&state.session), Line::blank()];

    lines.push(Line::plain(TOP_STUDENTS_TITLE));
    let top_rows: Vec<Vec<String>> = top_students(&state.roster)
        .into_iter()
        .map(|s| vec![s.name.clone(), s.total_marks.to_string()])
        .collect();
    lines.extend(indent(table(&["Name", "Total Marks"], &top_rows)));
    lines.push(Line::blank());

    lines.push(Line::plain(TOPPERS_TITLE));
    let topper_rows: Vec<Vec<String>> = subject_toppers(&state.roster)
        .into_iter()
        .map(|t| {
            vec![
                t.subject.title().to_string(),
                t.student.name.clone(),
                t.mark.to_string(),
            ]
        })
        .collect();
    lines.extend(indent(table(&["Subject", "Topper", "Marks"], &topper_rows)));
    lines.push(Line::blank());

    lines.push(Line::plain(STUDENTS_TITLE));
    lines.extend(students_table(state));
    lines.push(Line::blank());

    lines.push(Line::plain(CHART_TITLE));
    let series = ChartSeries::from_roster(&state.roster);
    lines.extend(
        bar_chart::draw(&series, width.saturating_sub(2), CHART_HEIGHT)
            .into_iter()
            .map(|line| Line::plain(format!("  {line}"))),
    );
    lines.push(Line::blank());

    let help = if can_manage(&state.session) {
        "Up/Down: select  a: add  e/Enter: edit  r: refresh  o: logout  q: quit"
    } else {
        "Up/Down: select  r: refresh  o: logout  q: quit"
    };
    lines.push(Line::plain(help));
    lines
}

fn indent(rows: Vec<String>) -> impl Iterator<Item = Line> {
    rows.into_iter().map(|row| Line::plain(format!("  {row}")))
}

fn student_row(student: &Student) -> Vec<String> {
    let mut cells = vec![student.name.clone()];
    cells.extend(Subject::ALL.iter().map(|subject| {
        student
            .mark(*subject)
            .map(|mark| mark.to_string())
            .unwrap_or_default()
    }));
    cells.push(format!("{}/{}", student.total_marks, MAX_TOTAL_MARKS));
    cells.push(format_percentile(student.total_marks));
    cells
}

fn students_table(state: &AppState) -> Vec<Line> {
    if state.roster.is_empty() {
        return vec![Line::plain("  No students")];
    }

    let mut headers = vec!["Name"];
    headers.extend(Subject::ALL.iter().map(|subject| subject.title()));
    headers.extend(["Total Marks", "Percentile"]);

    let rows: Vec<Vec<String>> = state.roster.iter().map(student_row).collect();
    let mut formatted = table(&headers, &rows).into_iter();

    let own_name = state
        .session
        .user()
        .filter(|user| user.student)
        .map(|user| user.name.as_str());

    let mut lines = Vec::with_capacity(state.roster.len() + 1);
    if let Some(header_row) = formatted.next() {
        lines.push(Line::plain(format!("  {header_row}")));
    }
    for (index, (row, student)) in formatted.zip(&state.roster).enumerate() {
        let text = format!("{}{row}", focus_marker(index == state.selected));
        if own_name == Some(student.name.as_str()) {
            lines.push(Line::highlighted(text));
        } else {
            lines.push(Line::plain(text));
        }
    }
    lines
}

fn field_label(field: EditField) -> &'static str {
    match field {
        EditField::Name => "Name",
        EditField::Password => "Password",
        EditField::Mark(subject) => subject.title(),
    }
}

fn edit_dialog(buffer: &EditBuffer, session: &Session, width: usize) -> Vec<Line> {
    let mut body = Vec::new();
    for field in buffer.fields() {
        let value = match field {
            EditField::Password => mask(buffer.field_text(field)),
            _ => buffer.field_text(field).to_string(),
        };
        let lock = if can_edit_field(session, field) {
            ""
        } else {
            "  (locked)"
        };
        body.push(format!(
            "{}{:<LABEL_WIDTH$}{value}{lock}",
            focus_marker(buffer.focus() == field),
            field_label(field)
        ));
    }
    body.push(String::new());
    if buffer.is_saving() {
        body.push("Saving...".to_string());
    } else {
        body.push("Tab: next field  Enter: save  Esc: cancel".to_string());
    }
    boxed(DIALOG_TITLE, body, width)
}

fn alert_box(message: &str, width: usize) -> Vec<Line> {
    boxed(
        "Alert",
        vec![message.to_string(), String::new(), "Enter: OK".to_string()],
        width,
    )
}

/// Frame `body` with a titled border no wider than `width`
fn boxed(title: &str, body: Vec<String>, width: usize) -> Vec<Line> {
    let longest = body
        .iter()
        .map(|line| line.chars().count())
        .chain(std::iter::once(title.chars().count() + 2))
        .max()
        .unwrap_or(0);
    let inner = longest.min(width.saturating_sub(4));

    let mut lines = vec![Line::plain(format!(
        "┌─ {title} {}┐",
        "─".repeat((inner + 2).saturating_sub(title.chars().count() + 3))
    ))];
    for row in body {
        let row: String = row.chars().take(inner).collect();
        lines.push(Line::plain(format!("│ {row:<inner$} │")));
    }
    lines.push(Line::plain(format!("└{}┘", "─".repeat(inner + 2))));
    lines
}

/// Replace the rows under a modal, padding the screen if it is too short
fn overlay(lines: &mut Vec<Line>, modal: Vec<Line>) {
    let end = MODAL_ROW + modal.len();
    if lines.len() < end {
        lines.resize(end, Line::blank());
    }
    for (offset, line) in modal.into_iter().enumerate() {
        lines[MODAL_ROW + offset] = line;
    }
}
