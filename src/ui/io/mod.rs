//! # Terminal I/O Seams
//!
//! Key input and screen output sit behind two traits so the controller can
//! run against a real terminal or against scripted events and a captured
//! screen.
//!
//! ```text
//! Production:  AppController ──▶ TerminalEventStream ──▶ crossterm::event
//!                            ──▶ TerminalRenderStream ──▶ crossterm::execute!
//!
//! Testing:     AppController ──▶ MockEventStream     ──▶ scripted Events
//!                            ──▶ MockRenderStream    ──▶ captured rows
//! ```

use anyhow::Result;
use crossterm::event::Event;
use std::io::Write;
use std::time::Duration;

pub mod mock;
pub mod terminal;

pub use mock::{MockEventHandle, MockEventStream, MockRenderStream, ScreenCapture};
pub use terminal::{TerminalEventStream, TerminalRenderStream};

/// Terminal size as (width, height)
pub type TerminalSize = (u16, u16);

/// Source of key and resize events
pub trait EventStream: Send {
    /// Whether an event is ready within `timeout`
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Next event; only call after `poll` returned true
    fn read(&mut self) -> Result<Event>;
}

/// Sink for screen output
pub trait RenderStream: Write + Send {
    fn clear_screen(&mut self) -> Result<()>;

    /// Move the cursor to (column, row)
    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()>;

    fn hide_cursor(&mut self) -> Result<()>;

    fn show_cursor(&mut self) -> Result<()>;

    /// Toggle reverse video for subsequent writes
    fn set_reverse(&mut self, on: bool) -> Result<()>;

    fn get_size(&self) -> Result<TerminalSize>;

    /// Enter the alternate screen in raw mode
    fn enter_app_screen(&mut self) -> Result<()>;

    /// Restore the terminal to how it was before `enter_app_screen`
    fn leave_app_screen(&mut self) -> Result<()>;
}
