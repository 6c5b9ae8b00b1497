//! Keyboard control: bounded-wait polling and key classification

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

/// Interpreted result of one poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keypress {
    IncreaseSpeed,
    DecreaseSpeed,
    Quit,
    None,
}

impl Keypress {
    pub fn classify(key: KeyEvent) -> Self {
        if key.kind != KeyEventKind::Press {
            return Keypress::None;
        }
        match key.code {
            // Raw mode swallows SIGINT, so Ctrl+C shows up here as a key
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Keypress::Quit,
            KeyCode::Char('+') => Keypress::IncreaseSpeed,
            KeyCode::Char('-') => Keypress::DecreaseSpeed,
            KeyCode::Char('q') | KeyCode::Char('Q') => Keypress::Quit,
            _ => Keypress::None,
        }
    }
}

/// Something that can hand over at most one key event within a deadline
pub trait KeySource {
    /// Wait up to `timeout` for a key. Returns `Ok(None)` on timeout.
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>>;
}

/// Reads keys from the real terminal through crossterm's event queue
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if event::poll(timeout)? {
            // Non-key events (resize, focus) are consumed and ignored
            if let Event::Key(key) = event::read()? {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }
}

pub struct InputController<S> {
    source: S,
}

impl<S: KeySource> InputController<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Never blocks longer than `timeout`; reads at most one key
    pub fn poll(&mut self, timeout: Duration) -> io::Result<Keypress> {
        Ok(self
            .source
            .next_key(timeout)?
            .map(Keypress::classify)
            .unwrap_or(Keypress::None))
    }
}
