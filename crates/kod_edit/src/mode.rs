use kod_window::{Key, KeyEvent, Modifiers};

use crate::{buffer::Buffer, command::EditorCommand, view::View};

/// What a mode gets to touch while it handles one key.
pub struct ModeContext<'a> {
    view: &'a mut View,
    emitted: Vec<EditorCommand>,
}

impl<'a> ModeContext<'a> {
    pub fn new(view: &'a mut View) -> Self {
        Self {
            view,
            emitted: vec![],
        }
    }

    pub fn view(&mut self) -> &mut View {
        self.view
    }

    pub fn buffer(&mut self) -> &mut Buffer {
        self.view.buffer_mut()
    }

    /// Queue a command to run once the current key has been handled.
    /// Commands run in the order they were emitted.
    pub fn emit(&mut self, command: EditorCommand) {
        self.emitted.push(command);
    }

    pub(crate) fn into_emitted(self) -> Vec<EditorCommand> {
        self.emitted
    }
}

/// A key-handling policy. Exactly one is installed in the editor at a
/// time; replacing it only affects keys that have not been handed out
/// yet.
pub trait Mode: Send {
    fn name(&self) -> &'static str;

    fn on_key(&mut self, key: &KeyEvent, ctx: &mut ModeContext<'_>);
}

/// Plain typing: characters go into the buffer, the usual keys move
/// around and erase.
#[derive(Debug, Default, Clone, Copy)]
pub struct InsertMode;

impl InsertMode {
    pub fn new() -> Self {
        Self
    }
}

fn to_isize(value: usize) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}

impl Mode for InsertMode {
    fn name(&self) -> &'static str {
        "insert"
    }

    fn on_key(&mut self, key: &KeyEvent, ctx: &mut ModeContext<'_>) {
        let page = to_isize(ctx.view().page_height());
        let buffer = ctx.buffer();

        match (key.modifiers, key.key) {
            (Modifiers { ctrl: false, alt: false, .. }, Key::Char(ch)) => buffer.insert_char(ch),
            (_, Key::Enter) => buffer.insert_newline(),
            (_, Key::Tab) => buffer.insert_char('\t'),
            (_, Key::Backspace) => buffer.delete_char_before(),
            (_, Key::Delete) => buffer.delete_char_at(),
            (_, Key::Left) => buffer.move_left(),
            (_, Key::Right) => buffer.move_right(),
            (_, Key::Up) => buffer.move_cursor(0, -1),
            (_, Key::Down) => buffer.move_cursor(0, 1),
            (_, Key::Home) => buffer.move_to_line_start(),
            (_, Key::End) => buffer.move_to_line_end(),
            (_, Key::PageUp) => buffer.move_cursor(0, page.saturating_neg()),
            (_, Key::PageDown) => buffer.move_cursor(0, page),
            _ => log::debug!("insert mode ignores {key:?}"),
        }
    }
}
