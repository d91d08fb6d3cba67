//! The terminal driver boundary: what the editor core draws to and
//! where its input comes from.

pub mod crossterm_screen;
pub mod event;
pub mod screen;
pub mod terminal;

pub use crossterm_screen::CrosstermScreen;
pub use event::{CrosstermEvents, Event, EventSource, Key, KeyEvent, Modifiers};
pub use screen::{Screen, Style, TerminalPos, TerminalSize};
