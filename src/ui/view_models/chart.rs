//! Bar chart series of total marks per student

use super::selectors::MAX_TOTAL_MARKS;
use crate::ui::models::Student;

/// Legend of the only dataset
pub const SERIES_LABEL: &str = "Total Marks";

/// Data for a vertical bar chart with a zero origin and a fixed ceiling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSeries {
    pub label: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<i32>,
    pub y_max: i32,
}

impl ChartSeries {
    /// One bar per student, in roster order
    pub fn from_roster(roster: &[Student]) -> Self {
        Self {
            label: SERIES_LABEL,
            labels: roster.iter().map(|s| s.name.clone()).collect(),
            values: roster.iter().map(|s| s.total_marks).collect(),
            y_max: MAX_TOTAL_MARKS,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bars as `(label, value)` pairs
    pub fn bars(&self) -> impl Iterator<Item = (&str, i32)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}
