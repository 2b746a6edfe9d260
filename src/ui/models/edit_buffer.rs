//! Edit buffer model
//!
//! Transient draft of a student being added or edited. Nothing in here is
//! persisted until `validate` produces a complete record and the write
//! succeeds.

use super::student::{Student, StudentId, Subject};
use std::collections::BTreeMap;
use thiserror::Error;

/// Lowest accepted mark
pub const MIN_MARK: i32 = 0;

/// Highest accepted mark
pub const MAX_MARK: i32 = 100;

/// Whether the draft will be created or will replace an existing record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Create,
    Edit,
}

/// An input field of the edit dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Name,
    Password,
    Mark(Subject),
}

/// Reasons a draft is refused before any request is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter name and password")]
    MissingCredentials,
    #[error("Marks should be between 0 and 100")]
    MarkOutOfRange { subject: Subject },
    #[error("Selected student has no id")]
    MissingId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    mode: EditMode,
    id: Option<StudentId>,
    name: String,
    password: String,
    /// Marks are kept as typed and parsed on validation
    mark_inputs: BTreeMap<Subject, String>,
    focus: EditField,
    saving: bool,
}

impl EditBuffer {
    /// Start a new record from the blank template
    pub fn creating() -> Self {
        Self::from_student(EditMode::Create, &Student::template())
    }

    /// Start editing a copy of an existing record
    pub fn editing(student: &Student) -> Self {
        Self::from_student(EditMode::Edit, student)
    }

    fn from_student(mode: EditMode, student: &Student) -> Self {
        Self {
            mode,
            id: student.id.clone(),
            name: student.name.clone(),
            password: student.password.clone(),
            // A cleared mark comes back as a blank field to fill in
            mark_inputs: Subject::ALL
                .iter()
                .map(|subject| {
                    let input = student.mark(*subject).map(|m| m.to_string());
                    (*subject, input.unwrap_or_default())
                })
                .collect(),
            focus: EditField::Name,
            saving: false,
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn id(&self) -> Option<&StudentId> {
        self.id.as_ref()
    }

    pub fn focus(&self) -> EditField {
        self.focus
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn set_saving(&mut self, saving: bool) {
        self.saving = saving;
    }

    /// Fields in dialog order
    pub fn fields(&self) -> Vec<EditField> {
        let mut fields = vec![EditField::Name, EditField::Password];
        fields.extend(self.mark_inputs.keys().map(|s| EditField::Mark(*s)));
        fields
    }

    /// Current text of a field
    pub fn field_text(&self, field: EditField) -> &str {
        match field {
            EditField::Name => &self.name,
            EditField::Password => &self.password,
            EditField::Mark(subject) => self
                .mark_inputs
                .get(&subject)
                .map(String::as_str)
                .unwrap_or(""),
        }
    }

    /// Replace the text of a field; marks absent from the draft are ignored
    pub fn set_field_text(&mut self, field: EditField, text: impl Into<String>) {
        match field {
            EditField::Name => self.name = text.into(),
            EditField::Password => self.password = text.into(),
            EditField::Mark(subject) => {
                if let Some(input) = self.mark_inputs.get_mut(&subject) {
                    *input = text.into();
                }
            }
        }
    }

    /// Type a character into the focused field
    ///
    /// Mark fields only take digits and a minus sign.
    pub fn insert_char(&mut self, ch: char) {
        match self.focus {
            EditField::Name => self.name.push(ch),
            EditField::Password => self.password.push(ch),
            EditField::Mark(subject) => {
                if ch.is_ascii_digit() || ch == '-' {
                    if let Some(input) = self.mark_inputs.get_mut(&subject) {
                        input.push(ch);
                    }
                }
            }
        }
    }

    /// Remove the last character of the focused field
    pub fn delete_char(&mut self) {
        match self.focus {
            EditField::Name => {
                self.name.pop();
            }
            EditField::Password => {
                self.password.pop();
            }
            EditField::Mark(subject) => {
                if let Some(input) = self.mark_inputs.get_mut(&subject) {
                    input.pop();
                }
            }
        }
    }

    /// Move focus to the next field accepted by `editable`, wrapping around
    pub fn focus_next(&mut self, editable: impl Fn(EditField) -> bool) {
        self.step_focus(1, editable);
    }

    /// Move focus to the previous field accepted by `editable`, wrapping around
    pub fn focus_prev(&mut self, editable: impl Fn(EditField) -> bool) {
        self.step_focus(-1, editable);
    }

    fn step_focus(&mut self, step: isize, editable: impl Fn(EditField) -> bool) {
        let fields = self.fields();
        let len = fields.len() as isize;
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;

        for offset in 1..=len {
            let candidate = fields[(current + step * offset).rem_euclid(len) as usize];
            if editable(candidate) {
                self.focus = candidate;
                return;
            }
        }
    }

    /// Check the draft and build the record to send
    ///
    /// The returned student has `total_marks` recomputed from its marks.
    pub fn validate(&self) -> Result<Student, ValidationError> {
        if self.name.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }

        let mut marks = BTreeMap::new();
        for (subject, input) in &self.mark_inputs {
            let mark = input
                .trim()
                .parse::<i32>()
                .ok()
                .filter(|m| (MIN_MARK..=MAX_MARK).contains(m))
                .ok_or(ValidationError::MarkOutOfRange { subject: *subject })?;
            marks.insert(*subject, mark);
        }

        if self.mode == EditMode::Edit && self.id.is_none() {
            return Err(ValidationError::MissingId);
        }

        Ok(Student {
            id: self.id.clone(),
            name: self.name.clone(),
            password: self.password.clone(),
            marks,
            total_marks: 0,
        }
        .with_recomputed_total())
    }
}
