//! # Form Commands
//!
//! Text entry and navigation for the login form and the edit dialog.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};
use crate::ui::state::{Action, Screen};

fn is_form(context: &CommandContext) -> bool {
    matches!(context.screen, Screen::Login | Screen::EditDialog)
}

/// Printable characters go into the focused field
pub struct FormInputCommand;

impl Command for FormInputCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_form(context)
            && matches!(event.code, KeyCode::Char(_))
            && !event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        match event.code {
            KeyCode::Char(ch) => Ok(vec![Action::InsertChar(ch).into()]),
            _ => Ok(vec![]),
        }
    }

    fn name(&self) -> &'static str {
        "FormInput"
    }
}

/// Backspace erases in the focused field
pub struct FormBackspaceCommand;

impl Command for FormBackspaceCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_form(context) && event.code == KeyCode::Backspace
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![Action::DeleteChar.into()])
    }

    fn name(&self) -> &'static str {
        "FormBackspace"
    }
}

/// Tab/Down and Shift+Tab/Up move between fields
pub struct FieldFocusCommand;

impl Command for FieldFocusCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_form(context)
            && matches!(
                event.code,
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down
            )
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let backwards = matches!(event.code, KeyCode::BackTab | KeyCode::Up)
            || (event.code == KeyCode::Tab && event.modifiers.contains(KeyModifiers::SHIFT));
        let action = if backwards {
            Action::PrevField
        } else {
            Action::NextField
        };
        Ok(vec![action.into()])
    }

    fn name(&self) -> &'static str {
        "FieldFocus"
    }
}

/// Enter on the login screen sends the credentials
pub struct SubmitLoginCommand;

impl Command for SubmitLoginCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.screen == Screen::Login && event.code == KeyCode::Enter
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![Action::SubmitLogin.into()])
    }

    fn name(&self) -> &'static str {
        "SubmitLogin"
    }
}

/// Enter in the edit dialog saves the draft
pub struct SaveEditCommand;

impl Command for SaveEditCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.screen == Screen::EditDialog && event.code == KeyCode::Enter
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![Action::SaveEdit.into()])
    }

    fn name(&self) -> &'static str {
        "SaveEdit"
    }
}

/// Esc in the edit dialog throws the draft away
pub struct CancelEditCommand;

impl Command for CancelEditCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.screen == Screen::EditDialog && event.code == KeyCode::Esc
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![Action::CancelEdit.into()])
    }

    fn name(&self) -> &'static str {
        "CancelEdit"
    }
}
