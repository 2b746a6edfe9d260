//! # markline - Terminal Client for Student Marks
//!
//! Log in to a marks server, browse the roster with its leaderboards and
//! chart, and add students or edit their marks from the keyboard.
//!
//! ## Architecture
//!
//! State changes flow one way through a reducer:
//!
//! ```text
//! ┌──────────┐  KeyEvent  ┌──────────┐   Action   ┌──────────┐
//! │ Terminal │───────────▶│ Commands │───────────▶│  update  │──┐
//! └──────────┘            └──────────┘            └──────────┘  │
//!      ▲                                               │  ▲     │ Effect
//!      │ lines                                AppState │  │     ▼
//! ┌──────────┐  selectors ┌────────────┐               │  │ ┌────────────┐
//! │  Views   │◀───────────│ ViewModels │◀──────────────┘  └─│ ApiService │
//! └──────────┘            └────────────┘   Action::Api     └────────────┘
//! ```
//!
//! The reducer never performs I/O. Remote calls run as tokio tasks and report
//! back over a channel that the controller polls between key presses.

pub mod cmd_args;
pub mod config;
pub mod ui;

// Re-export main types for easy access
pub use ui::*;
