//! # Application Control Commands
//!
//! Keys that work regardless of what is on screen.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};
use crate::ui::state::{Action, Screen};

/// Terminate application (Ctrl+C)
pub struct AppTerminateCommand;

impl Command for AppTerminateCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Char('c')) && event.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::QuitRequested])
    }

    fn name(&self) -> &'static str {
        "AppTerminate"
    }
}

/// Acknowledge the modal alert (Enter, Esc or Space)
pub struct DismissAlertCommand;

impl Command for DismissAlertCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.screen == Screen::Alert
            && matches!(
                event.code,
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')
            )
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![Action::DismissAlert.into()])
    }

    fn name(&self) -> &'static str {
        "DismissAlert"
    }
}
