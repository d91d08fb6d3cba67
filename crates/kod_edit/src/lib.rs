//! The editor core: the buffer/view model and the single-threaded
//! dispatch loop that owns it.

pub mod buffer;
pub mod command;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod line;
pub mod mode;
pub mod view;

pub use buffer::Buffer;
pub use command::{CommandSender, EditorCommand};
pub use config::EditorConfig;
pub use cursor::Cursor;
pub use editor::{Editor, LoopControl};
pub use error::{EditorError, LoadError};
pub use line::Line;
pub use mode::{InsertMode, Mode, ModeContext};
pub use view::View;
