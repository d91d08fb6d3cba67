use std::fmt;

use crossbeam_channel::Sender;

use crate::{buffer::Buffer, editor::Editor, error::EditorError, mode::Mode, view::View};

/// A deferred mutation of the editor. Whoever produces it, it is only
/// ever applied on the editor's own thread, once.
pub enum EditorCommand {
    /// Open `Buffer` in a new view behind the current one.
    AppendView(Buffer),
    SetMode(Box<dyn Mode>),
    MoveCursor {
        dx: isize,
        dy: isize,
    },
    SetCursor {
        col: usize,
        row: usize,
    },
    InsertText(String),
    Quit,
    Custom(Box<dyn FnOnce(&mut Editor) + Send>),
}

impl EditorCommand {
    pub fn custom<F>(f: F) -> Self
    where
        F: FnOnce(&mut Editor) + Send + 'static,
    {
        Self::Custom(Box::new(f))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::AppendView(_) => "append-view",
            Self::SetMode(_) => "set-mode",
            Self::MoveCursor { .. } => "move-cursor",
            Self::SetCursor { .. } => "set-cursor",
            Self::InsertText(_) => "insert-text",
            Self::Quit => "quit",
            Self::Custom(_) => "custom",
        }
    }

    pub fn apply(self, editor: &mut Editor) {
        match self {
            Self::AppendView(buffer) => editor.append_view(View::new(buffer)),
            Self::SetMode(mode) => editor.set_mode(mode),
            Self::MoveCursor { dx, dy } => editor.cur_view_mut().buffer_mut().move_cursor(dx, dy),
            Self::SetCursor { col, row } => editor.cur_view_mut().buffer_mut().set_cursor(col, row),
            Self::InsertText(text) => editor.cur_view_mut().buffer_mut().insert_str(text),
            Self::Quit => editor.quit(),
            Self::Custom(f) => f(editor),
        }
    }
}

impl fmt::Debug for EditorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveCursor { dx, dy } => write!(f, "MoveCursor({dx}, {dy})"),
            Self::SetCursor { col, row } => write!(f, "SetCursor({col}, {row})"),
            Self::SetMode(mode) => write!(f, "SetMode({})", mode.name()),
            _ => f.write_str(self.name()),
        }
    }
}

/// Producer side of the editor's command queue. Cheap to clone and
/// safe to hand to other threads.
#[derive(Clone)]
pub struct CommandSender {
    tx: Sender<EditorCommand>,
}

impl CommandSender {
    pub(crate) fn new(tx: Sender<EditorCommand>) -> Self {
        Self { tx }
    }

    /// Enqueue `command`, blocking while the queue is full.
    pub fn send(&self, command: EditorCommand) -> Result<(), EditorError> {
        self.tx
            .send(command)
            .map_err(|_| EditorError::Disconnected("commands"))
    }
}
