//! # Views Module
//!
//! Screen composition and the terminal renderer that draws it.

pub mod bar_chart;
pub mod screen;
pub mod terminal_renderer;

pub use screen::{compose, Line};
pub use terminal_renderer::{TerminalRenderer, ViewRenderer};
