//! # Derived Views
//!
//! Pure selectors computed from the roster on every render. Nothing is
//! cached; the roster is the single source.

use crate::ui::models::{Student, Subject};

/// Maximum attainable total: five subjects at 100 each
pub const MAX_TOTAL_MARKS: i32 = 500;

/// Length of the leaderboard
pub const TOP_STUDENTS: usize = 5;

/// Best mark in one subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectTopper<'a> {
    pub subject: Subject,
    pub student: &'a Student,
    pub mark: i32,
}

/// Share of the 500 point maximum, e.g. `423 -> 84.6`
pub fn percentile(total_marks: i32) -> f64 {
    (f64::from(total_marks) / f64::from(MAX_TOTAL_MARKS)) * 100.0
}

/// Percentile rendered with two decimals and a percent sign, e.g. `84.60%`
pub fn format_percentile(total_marks: i32) -> String {
    format!("{:.2}%", percentile(total_marks))
}

/// Students ordered by total marks, best first, at most five
///
/// Equal totals keep roster order.
pub fn top_students(roster: &[Student]) -> Vec<&Student> {
    let mut ranked: Vec<&Student> = roster.iter().collect();
    ranked.sort_by(|a, b| b.total_marks.cmp(&a.total_marks));
    ranked.truncate(TOP_STUDENTS);
    ranked
}

/// Highest mark per subject, earliest student winning ties
///
/// Subjects are taken from the first roster entry. Students without a mark
/// for a subject are not candidates for it.
pub fn subject_toppers(roster: &[Student]) -> Vec<SubjectTopper<'_>> {
    let Some(first) = roster.first() else {
        return Vec::new();
    };

    first
        .marks
        .keys()
        .filter_map(|subject| subject_topper(roster, *subject))
        .collect()
}

/// Highest mark for one subject
pub fn subject_topper(roster: &[Student], subject: Subject) -> Option<SubjectTopper<'_>> {
    let mut best: Option<SubjectTopper<'_>> = None;
    for student in roster {
        let Some(mark) = student.mark(subject) else {
            continue;
        };
        if best.as_ref().map_or(true, |b| mark > b.mark) {
            best = Some(SubjectTopper {
                subject,
                student,
                mark,
            });
        }
    }
    best
}
