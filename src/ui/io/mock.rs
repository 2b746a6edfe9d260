//! # Mock I/O
//!
//! Scripted input and a captured screen for driving the controller in tests.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::collections::{BTreeSet, VecDeque};
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

type EventQueue = Arc<Mutex<VecDeque<Event>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Event stream fed from a shared queue
pub struct MockEventStream {
    events: EventQueue,
}

/// Producer side of a [`MockEventStream`], kept by the test
#[derive(Clone)]
pub struct MockEventHandle {
    events: EventQueue,
}

impl MockEventStream {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: Arc::new(Mutex::new(events.into_iter().collect())),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn handle(&self) -> MockEventHandle {
        MockEventHandle {
            events: Arc::clone(&self.events),
        }
    }
}

impl Default for MockEventStream {
    fn default() -> Self {
        Self::empty()
    }
}

impl MockEventHandle {
    pub fn push_event(&self, event: Event) {
        lock(&self.events).push_back(event);
    }

    pub fn push_key(&self, code: KeyCode) {
        self.push_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    pub fn push_ctrl(&self, ch: char) {
        self.push_event(Event::Key(KeyEvent::new(
            KeyCode::Char(ch),
            KeyModifiers::CONTROL,
        )));
    }

    /// Queue one key press per character
    pub fn type_text(&self, text: &str) {
        for ch in text.chars() {
            self.push_key(KeyCode::Char(ch));
        }
    }

    pub fn pending(&self) -> usize {
        lock(&self.events).len()
    }
}

impl EventStream for MockEventStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!lock(&self.events).is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        lock(&self.events)
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No events available"))
    }
}

#[derive(Debug, Default)]
struct ScreenState {
    rows: Vec<String>,
    cursor: (u16, u16),
    app_screen: bool,
    cursor_visible: bool,
    reverse: bool,
    highlighted: BTreeSet<usize>,
    flushes: usize,
}

impl ScreenState {
    fn put_text(&mut self, text: &str) {
        let (x, y) = self.cursor;
        let y = y as usize;
        if self.rows.len() <= y {
            self.rows.resize(y + 1, String::new());
        }

        if self.reverse && !text.trim().is_empty() {
            self.highlighted.insert(y);
        }

        let row = &mut self.rows[y];
        let mut chars: Vec<char> = row.chars().collect();
        chars.resize(chars.len().max(x as usize), ' ');
        chars.truncate(x as usize);
        let written: Vec<char> = text.chars().collect();
        self.cursor.0 = x + written.len() as u16;
        chars.extend(written);
        *row = chars.into_iter().collect();
    }
}

/// Read side of a [`MockRenderStream`], kept by the test
#[derive(Clone)]
pub struct ScreenCapture {
    state: Arc<Mutex<ScreenState>>,
}

impl ScreenCapture {
    /// Screen rows with trailing blanks trimmed
    pub fn rows(&self) -> Vec<String> {
        lock(&self.state)
            .rows
            .iter()
            .map(|row| row.trim_end().to_string())
            .collect()
    }

    /// Rows that had any reverse-video text written to them
    pub fn highlighted_rows(&self) -> Vec<String> {
        let state = lock(&self.state);
        state
            .highlighted
            .iter()
            .filter_map(|&y| state.rows.get(y))
            .map(|row| row.trim_end().to_string())
            .collect()
    }

    pub fn text(&self) -> String {
        self.rows().join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.rows().iter().any(|row| row.contains(needle))
    }

    pub fn is_app_screen(&self) -> bool {
        lock(&self.state).app_screen
    }

    pub fn flush_count(&self) -> usize {
        lock(&self.state).flushes
    }
}

/// Render stream that keeps a plain-text copy of the screen
pub struct MockRenderStream {
    state: Arc<Mutex<ScreenState>>,
    size: TerminalSize,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::with_size((100, 60))
    }

    pub fn with_size(size: TerminalSize) -> Self {
        Self {
            state: Arc::new(Mutex::new(ScreenState {
                cursor_visible: true,
                ..ScreenState::default()
            })),
            size,
        }
    }

    pub fn capture(&self) -> ScreenCapture {
        ScreenCapture {
            state: Arc::clone(&self.state),
        }
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        lock(&self.state).put_text(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        lock(&self.state).flushes += 1;
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        let mut state = lock(&self.state);
        state.rows.clear();
        state.highlighted.clear();
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        lock(&self.state).cursor = (x, y);
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        lock(&self.state).cursor_visible = false;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        lock(&self.state).cursor_visible = true;
        Ok(())
    }

    fn set_reverse(&mut self, on: bool) -> Result<()> {
        lock(&self.state).reverse = on;
        Ok(())
    }

    fn get_size(&self) -> Result<TerminalSize> {
        Ok(self.size)
    }

    fn enter_app_screen(&mut self) -> Result<()> {
        lock(&self.state).app_screen = true;
        Ok(())
    }

    fn leave_app_screen(&mut self) -> Result<()> {
        lock(&self.state).app_screen = false;
        Ok(())
    }
}
