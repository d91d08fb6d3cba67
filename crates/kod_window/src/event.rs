use std::collections::VecDeque;

use anyhow::Result;
use crossterm::event::{self as ct, KeyCode, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character; this is the key's rune.
    Char(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Insert,
    Esc,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        alt: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub const fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// The character this key produces, if any.
    pub fn rune(&self) -> Option<char> {
        match self.key {
            Key::Char(ch) => Some(ch),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
}

impl Event {
    pub const fn key(key: Key) -> Self {
        Self::Key(KeyEvent::new(key))
    }
}

/// Blocking producer of terminal input.
///
/// Runs on its own thread, so it must not touch any editor state.
pub trait EventSource: Send + 'static {
    fn poll_event(&mut self) -> Result<Event>;
}

fn convert_key_code(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Insert => Key::Insert,
        KeyCode::Esc => Key::Esc,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    };
    Some(key)
}

fn convert_modifiers(modifiers: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: modifiers.contains(KeyModifiers::CONTROL),
        alt: modifiers.contains(KeyModifiers::ALT),
    }
}

/// Terminals differ in how a pasted line break arrives: `\r\n`, a lone
/// `\r` (xterm) and `\n` each become exactly one `Enter`.
fn convert_paste(text: &str) -> Vec<Event> {
    let mut events = vec![];
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        let key = match ch {
            '\r' => {
                chars.next_if_eq(&'\n');
                Key::Enter
            }
            '\n' => Key::Enter,
            '\t' => Key::Tab,
            ch => Key::Char(ch),
        };
        events.push(Event::key(key));
    }

    events
}

/// Translate one crossterm event into zero or more editor events.
///
/// A bracketed paste turns into one key event per character, so the
/// whole paste lands in the queue as a single burst.
pub fn convert_event(event: ct::Event) -> Vec<Event> {
    match event {
        ct::Event::Key(ct::KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press | KeyEventKind::Repeat,
            ..
        }) => convert_key_code(code)
            .map(|key| Event::Key(KeyEvent::with_modifiers(key, convert_modifiers(modifiers))))
            .into_iter()
            .collect(),
        ct::Event::Resize(width, height) => vec![Event::Resize { width, height }],
        ct::Event::Paste(text) => convert_paste(&text),
        _ => vec![],
    }
}

/// Reads terminal input through `crossterm::event::read`.
#[derive(Default)]
pub struct CrosstermEvents {
    pending: VecDeque<Event>,
}

impl CrosstermEvents {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSource for CrosstermEvents {
    fn poll_event(&mut self) -> Result<Event> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(event);
            }
            self.pending.extend(convert_event(ct::read()?));
        }
    }
}
