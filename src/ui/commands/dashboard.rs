//! # Dashboard Commands
//!
//! Roster navigation and the entry points to the edit dialog. Add and edit
//! are only bound for sessions that may manage students.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};
use crate::ui::state::{Action, Screen};

fn is_plain_key(context: &CommandContext, event: &KeyEvent) -> bool {
    context.screen == Screen::Dashboard
        && !event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// Up/k and Down/j move the row selection
pub struct SelectionCommand;

impl Command for SelectionCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_plain_key(context, event)
            && matches!(
                event.code,
                KeyCode::Up | KeyCode::Down | KeyCode::Char('k') | KeyCode::Char('j')
            )
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let action = match event.code {
            KeyCode::Up | KeyCode::Char('k') => Action::SelectPrev,
            _ => Action::SelectNext,
        };
        Ok(vec![action.into()])
    }

    fn name(&self) -> &'static str {
        "Selection"
    }
}

/// 'a' opens the dialog with a blank student
pub struct AddStudentCommand;

impl Command for AddStudentCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_plain_key(context, event) && context.can_manage && event.code == KeyCode::Char('a')
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![Action::OpenCreate.into()])
    }

    fn name(&self) -> &'static str {
        "AddStudent"
    }
}

/// 'e' or Enter opens the dialog on the selected student
pub struct EditStudentCommand;

impl Command for EditStudentCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_plain_key(context, event)
            && context.can_manage
            && matches!(event.code, KeyCode::Char('e') | KeyCode::Enter)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![Action::OpenEdit.into()])
    }

    fn name(&self) -> &'static str {
        "EditStudent"
    }
}

/// 'r' refetches the roster
pub struct RefreshCommand;

impl Command for RefreshCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_plain_key(context, event) && event.code == KeyCode::Char('r')
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![Action::Refresh.into()])
    }

    fn name(&self) -> &'static str {
        "Refresh"
    }
}

/// 'o' logs out
pub struct LogoutCommand;

impl Command for LogoutCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_plain_key(context, event) && event.code == KeyCode::Char('o')
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![Action::Logout.into()])
    }

    fn name(&self) -> &'static str {
        "Logout"
    }
}

/// 'q' leaves the application from the dashboard
pub struct QuitCommand;

impl Command for QuitCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_plain_key(context, event) && event.code == KeyCode::Char('q')
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::QuitRequested])
    }

    fn name(&self) -> &'static str {
        "Quit"
    }
}
