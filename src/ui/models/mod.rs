//! # Models Module
//!
//! Plain data owned by the application state: student records, the session,
//! the login form and the edit buffer.

pub mod edit_buffer;
pub mod login_form;
pub mod session;
pub mod student;

pub use edit_buffer::{EditBuffer, EditField, EditMode, ValidationError, MAX_MARK, MIN_MARK};
pub use login_form::{LoginField, LoginForm};
pub use session::{Session, SessionUser};
pub use student::{total_marks, Marks, Student, StudentId, Subject};
