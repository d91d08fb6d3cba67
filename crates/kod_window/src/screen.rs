use anyhow::Result;
use kod_base::color::Color;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerminalSize {
    pub x: u16,
    pub y: u16,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerminalPos {
    pub x: u16,
    pub y: u16,
}

/// How a cell is painted. `None` leaves the terminal's own color in place.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

impl Style {
    pub const DEFAULT: Self = Self {
        foreground: None,
        background: None,
    };

    pub const fn with_foreground(self, color: Color) -> Self {
        Self {
            foreground: Some(color),
            ..self
        }
    }
}

/// A character grid the editor paints into.
///
/// Drawing calls only touch the back buffer; nothing reaches the
/// terminal until [`Screen::show`] flips the whole frame at once.
pub trait Screen {
    /// Acquire the terminal session (raw mode, alternate screen).
    fn init(&mut self) -> Result<()>;

    /// Release the terminal session. Calling it twice is harmless.
    fn fini(&mut self) -> Result<()>;

    /// The style used for cells that were cleared and never set.
    fn set_style(&mut self, style: Style);

    fn clear(&mut self);

    /// Cells outside the screen are ignored.
    fn set_cell(&mut self, col: u16, row: u16, style: Style, ch: char);

    fn show_cursor(&mut self, col: u16, row: u16);

    fn show(&mut self) -> Result<()>;

    /// Re-read the terminal geometry and repaint everything on the next
    /// [`Screen::show`].
    fn sync(&mut self) -> Result<()>;

    fn size(&self) -> TerminalSize;
}
