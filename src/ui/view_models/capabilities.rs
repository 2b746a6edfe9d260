//! Role checks applied to every editable affordance

use crate::ui::models::{EditField, Session, Subject};

/// Whether the session may add students or open the edit dialog
pub fn can_manage(session: &Session) -> bool {
    session.user().is_some_and(|user| !user.student)
}

/// Whether the session may change a subject's mark
///
/// A subject teacher is limited to their own subject.
pub fn can_edit(session: &Session, subject: Subject) -> bool {
    match session.user() {
        Some(user) if !user.student => user.subject.map_or(true, |scope| scope == subject),
        _ => false,
    }
}

/// Whether a field of the edit dialog accepts input
pub fn can_edit_field(session: &Session, field: EditField) -> bool {
    match field {
        EditField::Name | EditField::Password => can_manage(session),
        EditField::Mark(subject) => can_edit(session, subject),
    }
}
