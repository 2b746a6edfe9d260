//! Student record model
//!
//! Wire-compatible representation of a student as served by the marks server,
//! plus the fixed subject set every record carries marks for.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Marks keyed by subject, in subject declaration order
pub type Marks = BTreeMap<Subject, i32>;

/// The fixed set of examined subjects
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Subject {
    English,
    Math,
    Hindi,
    Science,
    SocialScience,
}

impl Subject {
    /// All subjects in table column order
    pub const ALL: [Subject; 5] = [
        Subject::English,
        Subject::Math,
        Subject::Hindi,
        Subject::Science,
        Subject::SocialScience,
    ];

    /// Human readable column title
    pub fn title(&self) -> &'static str {
        match self {
            Subject::English => "English",
            Subject::Math => "Math",
            Subject::Hindi => "Hindi",
            Subject::Science => "Science",
            Subject::SocialScience => "Social Science",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Server-assigned student identifier
///
/// The server may hand out numeric or string ids; the original form is kept
/// so it round-trips unchanged in request bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StudentId {
    Number(u64),
    Text(String),
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudentId::Number(n) => write!(f, "{n}"),
            StudentId::Text(s) => f.write_str(s),
        }
    }
}

/// A student record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StudentId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, deserialize_with = "marks_skipping_null")]
    pub marks: Marks,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_marks: i32,
}

/// Marks mapping where `null` entries (cleared fields) count as absent
pub(crate) fn marks_skipping_null<'de, D>(deserializer: D) -> Result<Marks, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<Subject, Option<i32>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(subject, mark)| mark.map(|mark| (subject, mark)))
        .collect())
}

pub(crate) fn null_as_zero<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i32>::deserialize(deserializer)?.unwrap_or_default())
}

impl Student {
    /// Blank record used when adding a student: every subject starts at zero
    pub fn template() -> Self {
        Self {
            id: None,
            name: String::new(),
            password: String::new(),
            marks: Subject::ALL.iter().map(|s| (*s, 0)).collect(),
            total_marks: 0,
        }
    }

    /// Mark for a subject, if the record carries one
    pub fn mark(&self, subject: Subject) -> Option<i32> {
        self.marks.get(&subject).copied()
    }

    /// Recompute `total_marks` from the marks mapping
    pub fn with_recomputed_total(mut self) -> Self {
        self.total_marks = total_marks(&self.marks);
        self
    }
}

/// Sum of all marks in a mapping
pub fn total_marks(marks: &Marks) -> i32 {
    marks.values().sum()
}
