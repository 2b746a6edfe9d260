//! # View Models
//!
//! Presentation data derived from the application state: leaderboards,
//! percentiles, the chart series and role checks. All functions here are
//! pure and independent of the terminal.

pub mod capabilities;
pub mod chart;
pub mod selectors;

pub use capabilities::{can_edit, can_edit_field, can_manage};
pub use chart::{ChartSeries, SERIES_LABEL};
pub use selectors::{
    format_percentile, percentile, subject_topper, subject_toppers, top_students, SubjectTopper,
    MAX_TOTAL_MARKS, TOP_STUDENTS,
};
