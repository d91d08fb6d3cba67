use std::io::{self, Stdout, Write};

use anyhow::Result;
use kod_base::color::Color;

use crate::{
    screen::{Screen, Style, TerminalPos, TerminalSize},
    terminal,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    style: Style,
}

/// The back buffer: every cell of the next frame plus where the
/// hardware cursor should end up.
struct CellGrid {
    size: TerminalSize,
    cells: Vec<Cell>,
    cursor: Option<TerminalPos>,
}

impl CellGrid {
    fn new(size: TerminalSize, style: Style) -> Self {
        let mut grid = Self {
            size,
            cells: vec![],
            cursor: None,
        };
        grid.clear(style);
        grid
    }

    fn clear(&mut self, style: Style) {
        let len = usize::from(self.size.x).saturating_mul(usize::from(self.size.y));
        self.cells.clear();
        self.cells.resize(len, Cell { ch: ' ', style });
        self.cursor = None;
    }

    fn resize(&mut self, size: TerminalSize, style: Style) {
        self.size = size;
        self.clear(style);
    }

    fn index(&self, col: u16, row: u16) -> Option<usize> {
        if col < self.size.x && row < self.size.y {
            Some(
                usize::from(row)
                    .saturating_mul(usize::from(self.size.x))
                    .saturating_add(usize::from(col)),
            )
        } else {
            None
        }
    }

    fn row(&self, row: u16) -> &[Cell] {
        let width = usize::from(self.size.x);
        let start = usize::from(row).saturating_mul(width);
        self.cells
            .get(start..start.saturating_add(width))
            .unwrap_or(&[])
    }
}

fn convert_color_to_crossterm_color(color: Color) -> crossterm::style::Color {
    crossterm::style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// A [`Screen`] on a real terminal, driven through crossterm.
///
/// `show` writes the whole frame inside a synchronized update and
/// flushes once, so the terminal never displays a half-drawn frame.
pub struct CrosstermScreen<W: Write = Stdout> {
    out: W,
    grid: CellGrid,
    default_style: Style,
    active: bool,
}

impl CrosstermScreen<Stdout> {
    pub fn new() -> Result<Self> {
        Ok(Self::with_writer(io::stdout(), terminal::size()?))
    }
}

impl<W: Write> CrosstermScreen<W> {
    /// Build a screen that paints into `out` with a fixed initial size.
    pub fn with_writer(out: W, size: TerminalSize) -> Self {
        Self {
            out,
            grid: CellGrid::new(size, Style::DEFAULT),
            default_style: Style::DEFAULT,
            active: false,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn draw_row(&mut self, row: u16) -> Result<()> {
        // consecutive cells that share a style are printed in one go
        let mut runs: Vec<(u16, Style, String)> = vec![];
        for (col, cell) in (0..).zip(self.grid.row(row)) {
            match runs.last_mut() {
                Some((_, style, text)) if *style == cell.style => text.push(cell.ch),
                _ => runs.push((col, cell.style, cell.ch.to_string())),
            }
        }

        for (col, style, text) in runs {
            terminal::draw_colored_text(
                &mut self.out,
                TerminalPos { x: col, y: row },
                text,
                style.foreground.map(convert_color_to_crossterm_color),
                style.background.map(convert_color_to_crossterm_color),
            )?;
        }

        Ok(())
    }
}

impl<W: Write> Screen for CrosstermScreen<W> {
    fn init(&mut self) -> Result<()> {
        // set first so a half-finished init is still undone by fini
        self.active = true;
        terminal::init_terminal(&mut self.out)?;
        log::debug!("terminal session started at {:?}", self.grid.size);
        Ok(())
    }

    fn fini(&mut self) -> Result<()> {
        if self.active {
            self.active = false;
            terminal::end_terminal(&mut self.out)?;
            log::debug!("terminal session ended");
        }
        Ok(())
    }

    fn set_style(&mut self, style: Style) {
        self.default_style = style;
    }

    fn clear(&mut self) {
        self.grid.clear(self.default_style);
    }

    fn set_cell(&mut self, col: u16, row: u16, style: Style, ch: char) {
        if let Some(idx) = self.grid.index(col, row) {
            if let Some(cell) = self.grid.cells.get_mut(idx) {
                *cell = Cell { ch, style };
            }
        }
    }

    fn show_cursor(&mut self, col: u16, row: u16) {
        self.grid.cursor = Some(TerminalPos { x: col, y: row });
    }

    fn show(&mut self) -> Result<()> {
        terminal::start_draw(&mut self.out)?;
        for row in 0..self.grid.size.y {
            self.draw_row(row)?;
        }
        terminal::end_draw(&mut self.out, self.grid.cursor)?;
        Ok(())
    }

    fn sync(&mut self) -> Result<()> {
        let size = if self.active {
            terminal::size()?
        } else {
            self.grid.size
        };
        self.grid.resize(size, self.default_style);
        terminal::clear_all(&mut self.out)?;
        Ok(())
    }

    fn size(&self) -> TerminalSize {
        self.grid.size
    }
}

impl<W: Write> Drop for CrosstermScreen<W> {
    fn drop(&mut self) {
        if let Err(err) = self.fini() {
            log::error!("unable to restore terminal: {err:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(x: u16, y: u16) -> CrosstermScreen<Vec<u8>> {
        CrosstermScreen::with_writer(vec![], TerminalSize { x, y })
    }

    fn output(screen: &CrosstermScreen<Vec<u8>>) -> String {
        String::from_utf8_lossy(screen.writer()).to_string()
    }

    #[test]
    fn test_show_writes_cells() {
        let mut screen = screen(4, 2);
        screen.clear();
        screen.set_cell(0, 0, Style::DEFAULT, 'h');
        screen.set_cell(1, 0, Style::DEFAULT, 'i');
        screen.set_cell(0, 1, Style::DEFAULT, '!');
        screen.show_cursor(2, 0);
        screen.show().unwrap();

        let out = output(&screen);
        assert!(out.contains("hi  "));
        assert!(out.contains("!   "));
    }

    #[test]
    fn test_out_of_bounds_cells_are_ignored() {
        let mut screen = screen(2, 1);
        screen.set_cell(5, 0, Style::DEFAULT, 'x');
        screen.set_cell(0, 9, Style::DEFAULT, 'y');
        screen.show().unwrap();

        let out = output(&screen);
        assert!(!out.contains('x'));
        assert!(!out.contains('y'));
    }

    #[test]
    fn test_clear_resets_cells_and_cursor() {
        let mut screen = screen(3, 1);
        screen.set_cell(0, 0, Style::DEFAULT, 'z');
        screen.show_cursor(1, 0);
        screen.clear();

        assert!(screen.grid.cells.iter().all(|cell| cell.ch == ' '));
        assert_eq!(screen.grid.cursor, None);
    }

    #[test]
    fn test_styled_cells_are_grouped_into_runs() {
        let red = Style::DEFAULT.with_foreground(Color::RED);
        let mut screen = screen(4, 1);
        screen.set_cell(0, 0, red, 'a');
        screen.set_cell(1, 0, red, 'b');
        screen.set_cell(2, 0, Style::DEFAULT, 'c');
        screen.show().unwrap();

        let out = output(&screen);
        assert!(out.contains("ab"));
        assert!(out.contains("c "));
    }

    #[test]
    fn test_sync_keeps_size_when_inactive() {
        let mut screen = screen(3, 2);
        screen.set_cell(0, 0, Style::DEFAULT, 'q');
        screen.sync().unwrap();

        assert_eq!(screen.size(), TerminalSize { x: 3, y: 2 });
        assert!(screen.grid.cells.iter().all(|cell| cell.ch == ' '));
    }
}
