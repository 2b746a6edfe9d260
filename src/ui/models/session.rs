//! Session model
//!
//! Who is logged in and what they are allowed to touch.

use super::student::{marks_skipping_null, null_as_zero, Marks, Subject};
use serde::{Deserialize, Serialize};

/// The authenticated user as returned by `POST /login`
///
/// Shaped like a student record; the `student` flag marks the restricted
/// self-service role and `subject` scopes a subject teacher to one mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub name: String,
    #[serde(default)]
    pub student: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Subject>,
    #[serde(default, deserialize_with = "marks_skipping_null")]
    pub marks: Marks,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_marks: i32,
}

impl SessionUser {
    /// Administrative user with no subject scope
    pub fn admin(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            student: false,
            subject: None,
            marks: Marks::new(),
            total_marks: 0,
        }
    }

    /// Restricted self-service user
    pub fn student(name: impl Into<String>) -> Self {
        Self {
            student: true,
            ..Self::admin(name)
        }
    }

    /// Subject teacher limited to a single mark column
    pub fn subject_teacher(name: impl Into<String>, subject: Subject) -> Self {
        Self {
            subject: Some(subject),
            ..Self::admin(name)
        }
    }
}

/// Session state: explicitly logged out or logged in as a user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn(SessionUser),
}

impl Session {
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Session::LoggedIn(user) => Some(user),
            Session::LoggedOut => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::LoggedIn(_))
    }
}
