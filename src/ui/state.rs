//! # Application State
//!
//! The whole client state lives in [`AppState`] and changes only through
//! [`update`]. The reducer never performs I/O; remote calls are returned as
//! [`Effect`]s for the controller to dispatch, and their outcomes come back
//! as [`Action::Api`].

use crate::ui::models::{EditBuffer, EditMode, LoginForm, Session, Student, StudentId};
use crate::ui::services::ApiEvent;
use crate::ui::view_models::{can_edit_field, can_manage};
use std::collections::VecDeque;

pub const LOGIN_SUCCESS_ALERT: &str = "Logged in successfully";
pub const UNAUTHORIZED_ALERT: &str = "Unauthorized";
pub const STUDENT_ADDED_ALERT: &str = "Student added successfully";
pub const MARKS_UPDATED_ALERT: &str = "Marks updated successfully";

/// Identifies one opened edit dialog
pub type DraftId = u64;

/// User intents and remote outcomes
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Type into the focused field of the open form
    InsertChar(char),
    /// Erase the last character of the focused field
    DeleteChar,
    NextField,
    PrevField,
    SubmitLogin,
    Logout,
    Refresh,
    SelectNext,
    SelectPrev,
    OpenCreate,
    OpenEdit,
    CancelEdit,
    SaveEdit,
    DismissAlert,
    Api(ApiEvent),
}

/// Remote calls requested by the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Authenticate {
        username: String,
        password: String,
    },
    FetchRoster,
    CreateStudent {
        draft: DraftId,
        student: Student,
        username: String,
    },
    UpdateStudent {
        draft: DraftId,
        id: StudentId,
        student: Student,
        username: String,
    },
}

/// What currently owns the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Alert,
    Login,
    Dashboard,
    EditDialog,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub session: Session,
    pub login_form: LoginForm,
    /// Last fetched roster, replaced wholesale on every fetch
    pub roster: Vec<Student>,
    /// Highlighted row of the students table
    pub selected: usize,
    pub edit: Option<EditBuffer>,
    /// Draft id of `edit`, bumped every time a dialog opens
    draft: DraftId,
    /// Pending modal messages, oldest first
    alerts: VecDeque<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the login form pre-filled
    pub fn with_login_username(username: impl Into<String>) -> Self {
        Self {
            login_form: LoginForm::with_username(username),
            ..Self::default()
        }
    }

    pub fn screen(&self) -> Screen {
        if !self.alerts.is_empty() {
            Screen::Alert
        } else if !self.session.is_logged_in() {
            Screen::Login
        } else if self.edit.is_some() {
            Screen::EditDialog
        } else {
            Screen::Dashboard
        }
    }

    /// Alert currently shown, if any
    pub fn alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub fn selected_student(&self) -> Option<&Student> {
        self.roster.get(self.selected)
    }

    fn push_alert(&mut self, message: impl Into<String>) {
        self.alerts.push_back(message.into());
    }

    fn requesting_username(&self) -> Option<String> {
        self.session.user().map(|user| user.name.clone())
    }

    fn open_draft(&mut self, buffer: EditBuffer) {
        self.draft += 1;
        self.edit = Some(buffer);
    }

    /// The open draft, if it is the one that sent write `draft`
    fn saving_draft(&mut self, draft: DraftId) -> Option<&mut EditBuffer> {
        if self.draft != draft {
            return None;
        }
        self.edit.as_mut().filter(|buffer| buffer.is_saving())
    }
}

/// Apply an action and return the remote calls it requires
pub fn update(state: &mut AppState, action: Action) -> Vec<Effect> {
    if let Action::Api(event) = action {
        return apply_api_event(state, event);
    }

    match (state.screen(), action) {
        (Screen::Alert, Action::DismissAlert) => {
            state.alerts.pop_front();
            vec![]
        }
        (Screen::Alert, _) => vec![],

        (Screen::Login, action) => apply_login_action(state, action),
        (Screen::EditDialog, action) => apply_edit_action(state, action),
        (Screen::Dashboard, action) => apply_dashboard_action(state, action),
    }
}

fn apply_login_action(state: &mut AppState, action: Action) -> Vec<Effect> {
    let form = &mut state.login_form;
    match action {
        Action::InsertChar(ch) => form.insert_char(ch),
        Action::DeleteChar => form.delete_char(),
        Action::NextField | Action::PrevField => form.toggle_focus(),
        Action::SubmitLogin => {
            return vec![Effect::Authenticate {
                username: form.username.clone(),
                password: form.password.clone(),
            }];
        }
        _ => {}
    }
    vec![]
}

fn apply_dashboard_action(state: &mut AppState, action: Action) -> Vec<Effect> {
    match action {
        Action::Logout => {
            if let Some(user) = state.session.user() {
                tracing::info!("Session ended for '{}'", user.name);
            }
            state.session = Session::LoggedOut;
            state.roster.clear();
            state.selected = 0;
            state.edit = None;
            state.login_form.password.clear();
        }
        Action::Refresh => return vec![Effect::FetchRoster],
        Action::SelectNext => {
            if state.selected + 1 < state.roster.len() {
                state.selected += 1;
            }
        }
        Action::SelectPrev => state.selected = state.selected.saturating_sub(1),
        Action::OpenCreate if can_manage(&state.session) => {
            state.open_draft(EditBuffer::creating());
        }
        Action::OpenEdit if can_manage(&state.session) => {
            if let Some(buffer) = state.selected_student().map(EditBuffer::editing) {
                state.open_draft(buffer);
            }
        }
        _ => {}
    }
    vec![]
}

fn apply_edit_action(state: &mut AppState, action: Action) -> Vec<Effect> {
    let session = &state.session;
    let Some(buffer) = state.edit.as_mut() else {
        return vec![];
    };

    match action {
        Action::InsertChar(ch) if can_edit_field(session, buffer.focus()) => buffer.insert_char(ch),
        Action::DeleteChar if can_edit_field(session, buffer.focus()) => buffer.delete_char(),
        Action::NextField => buffer.focus_next(|field| can_edit_field(session, field)),
        Action::PrevField => buffer.focus_prev(|field| can_edit_field(session, field)),
        Action::CancelEdit => state.edit = None,
        Action::SaveEdit => return save_edit(state),
        _ => {}
    }
    vec![]
}

fn save_edit(state: &mut AppState) -> Vec<Effect> {
    let Some(username) = state.requesting_username() else {
        return vec![];
    };
    let Some(buffer) = state.edit.as_mut() else {
        return vec![];
    };
    if buffer.is_saving() {
        tracing::debug!("Save ignored, a write is already in flight");
        return vec![];
    }

    let student = match buffer.validate() {
        Ok(student) => student,
        Err(e) => {
            tracing::debug!("Draft rejected: {e:?}");
            state.push_alert(e.to_string());
            return vec![];
        }
    };

    let draft = state.draft;
    let effect = match (buffer.mode(), student.id.clone()) {
        (EditMode::Create, _) => Effect::CreateStudent {
            draft,
            student,
            username,
        },
        (EditMode::Edit, Some(id)) => Effect::UpdateStudent {
            draft,
            id,
            student,
            username,
        },
        // validate() refuses edits without an id
        (EditMode::Edit, None) => return vec![],
    };

    buffer.set_saving(true);
    vec![effect]
}

fn apply_api_event(state: &mut AppState, event: ApiEvent) -> Vec<Effect> {
    match event {
        ApiEvent::LoggedIn(user) => {
            tracing::info!("Session started for '{}'", user.name);
            state.session = Session::LoggedIn(user);
            state.push_alert(LOGIN_SUCCESS_ALERT);
            vec![Effect::FetchRoster]
        }
        ApiEvent::LoginRejected => {
            state.push_alert(UNAUTHORIZED_ALERT);
            vec![]
        }
        ApiEvent::RosterLoaded(students) => {
            if !state.session.is_logged_in() {
                tracing::debug!("Dropping roster that arrived after logout");
                return vec![];
            }
            state.roster = students;
            state.selected = state.selected.min(state.roster.len().saturating_sub(1));
            vec![]
        }
        ApiEvent::StudentCreated(draft) => finish_write(state, draft, STUDENT_ADDED_ALERT),
        ApiEvent::StudentUpdated(draft) => finish_write(state, draft, MARKS_UPDATED_ALERT),
        ApiEvent::WriteFailed(draft, _) => {
            // The draft stays open as typed
            if let Some(buffer) = state.saving_draft(draft) {
                buffer.set_saving(false);
            }
            vec![]
        }
        ApiEvent::LoginFailed(_) | ApiEvent::RosterFailed(_) => vec![],
    }
}

fn finish_write(state: &mut AppState, draft: DraftId, message: &str) -> Vec<Effect> {
    if state.saving_draft(draft).is_none() {
        // Its dialog was cancelled; the roster still changed on the server
        tracing::debug!("Write from closed draft {draft} finished");
        if !state.session.is_logged_in() {
            return vec![];
        }
        return vec![Effect::FetchRoster];
    }
    state.edit = None;
    state.push_alert(message);
    vec![Effect::FetchRoster]
}
