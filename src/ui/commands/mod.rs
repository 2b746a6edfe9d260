//! # Key Commands
//!
//! Commands translate key presses into reducer actions. Each command decides
//! whether it applies to a key on the current screen; the registry runs the
//! first one that does.

pub mod app;
pub mod dashboard;
pub mod form;

use anyhow::Result;
use crossterm::event::KeyEvent;

use crate::ui::state::{Action, AppState, Screen};
use crate::ui::view_models::can_manage;

pub use app::{AppTerminateCommand, DismissAlertCommand};
pub use dashboard::{
    AddStudentCommand, EditStudentCommand, LogoutCommand, QuitCommand, RefreshCommand,
    SelectionCommand,
};
pub use form::{
    CancelEditCommand, FieldFocusCommand, FormBackspaceCommand, FormInputCommand,
    SaveEditCommand, SubmitLoginCommand,
};

/// What a command asks the controller to do
#[derive(Debug, Clone, PartialEq)]
pub enum CommandEvent {
    /// Feed an action to the reducer
    Dispatch(Action),
    /// Leave the application
    QuitRequested,
}

impl From<Action> for CommandEvent {
    fn from(action: Action) -> Self {
        CommandEvent::Dispatch(action)
    }
}

/// Read-only view of the state that commands match against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandContext {
    pub screen: Screen,
    pub can_manage: bool,
}

impl CommandContext {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            screen: state.screen(),
            can_manage: can_manage(&state.session),
        }
    }
}

/// A key binding
pub trait Command: Send + Sync {
    /// Whether this command handles `event` in `context`
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool;

    /// Produce the events for a relevant key
    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>>;

    fn name(&self) -> &'static str;
}

/// Ordered set of commands; the first relevant one wins
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        let commands: Vec<Box<dyn Command>> = vec![
            Box::new(AppTerminateCommand),
            Box::new(DismissAlertCommand),
            Box::new(SubmitLoginCommand),
            Box::new(SaveEditCommand),
            Box::new(CancelEditCommand),
            Box::new(FieldFocusCommand),
            Box::new(FormBackspaceCommand),
            Box::new(FormInputCommand),
            Box::new(SelectionCommand),
            Box::new(AddStudentCommand),
            Box::new(EditStudentCommand),
            Box::new(RefreshCommand),
            Box::new(LogoutCommand),
            Box::new(QuitCommand),
        ];
        Self { commands }
    }

    /// Run the first command relevant to `event`
    pub fn process_event(
        &self,
        event: KeyEvent,
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        match self
            .commands
            .iter()
            .find(|command| command.is_relevant(context, &event))
        {
            Some(command) => {
                tracing::debug!("Key {:?} handled by {}", event.code, command.name());
                command.execute(event, context)
            }
            None => Ok(vec![]),
        }
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
