//! # Terminal Renderer
//!
//! Draws composed screen lines through a [`RenderStream`]. Every render is a
//! full redraw; the screen is small enough that partial updates are not
//! worth tracking.

use super::screen::{compose, Line};
use crate::ui::io::{RenderStream, TerminalSize};
use crate::ui::state::AppState;
use anyhow::Result;

/// Trait for rendering the application state
pub trait ViewRenderer {
    /// Take over the terminal
    fn initialize(&mut self) -> Result<()>;

    /// Redraw the whole screen from `state`
    fn render(&mut self, state: &AppState) -> Result<()>;

    /// Give the terminal back
    fn cleanup(&mut self) -> Result<()>;
}

pub struct TerminalRenderer<RS: RenderStream> {
    render_stream: RS,
    terminal_size: TerminalSize,
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    pub fn with_render_stream(render_stream: RS) -> Result<Self> {
        let terminal_size = render_stream.get_size()?;
        Ok(Self {
            render_stream,
            terminal_size,
        })
    }

    pub fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    pub fn terminal_size(&self) -> TerminalSize {
        self.terminal_size
    }

    fn draw_line(&mut self, row: u16, line: &Line) -> Result<()> {
        let (width, _) = self.terminal_size;
        let text: String = line.text.chars().take(width as usize).collect();

        self.render_stream.move_cursor(0, row)?;
        if line.highlight {
            self.render_stream.set_reverse(true)?;
            self.render_stream.write_all(text.as_bytes())?;
            self.render_stream.set_reverse(false)?;
        } else {
            self.render_stream.write_all(text.as_bytes())?;
        }
        Ok(())
    }
}

impl<RS: RenderStream> ViewRenderer for TerminalRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.render_stream.enter_app_screen()?;
        self.render_stream.clear_screen()?;
        self.render_stream.flush().map_err(anyhow::Error::from)
    }

    fn render(&mut self, state: &AppState) -> Result<()> {
        let (width, height) = self.terminal_size;
        let lines = compose(state, width);

        self.render_stream.hide_cursor()?;
        self.render_stream.clear_screen()?;
        for (row, line) in lines.iter().take(height as usize).enumerate() {
            self.draw_line(row as u16, line)?;
        }
        self.render_stream.flush().map_err(anyhow::Error::from)
    }

    fn cleanup(&mut self) -> Result<()> {
        self.render_stream.clear_screen()?;
        self.render_stream.leave_app_screen()?;
        self.render_stream.flush().map_err(anyhow::Error::from)
    }
}
