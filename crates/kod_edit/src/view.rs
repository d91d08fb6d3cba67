use kod_base::math::{Bounds2u, ToU16Clamp, Vec2u};
use kod_window::{Screen, Style};

use crate::buffer::Buffer;

/// Control characters (tabs included) take one blank cell, so the
/// terminal never moves its own cursor while a frame is written.
fn cell_char(ch: char) -> char {
    if ch.is_control() {
        ' '
    } else {
        ch
    }
}

/// Shows one buffer inside a rectangle of the screen.
pub struct View {
    buffer: Buffer,
    region: Bounds2u,
    /// The buffer position drawn at the top-left corner of `region`.
    scroll: Vec2u,
}

impl View {
    pub fn new(buffer: Buffer) -> Self {
        Self {
            buffer,
            region: Bounds2u::ZERO,
            scroll: Vec2u::ZERO,
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    pub fn region(&self) -> Bounds2u {
        self.region
    }

    pub fn set_region(&mut self, region: Bounds2u) {
        self.region = region;
        self.scroll_to_cursor();
    }

    pub fn scroll(&self) -> Vec2u {
        self.scroll
    }

    /// Number of lines one page up/down should travel.
    pub fn page_height(&self) -> usize {
        self.region.size.y.max(1)
    }

    /// Shift the scroll offset just enough to keep the cursor inside
    /// the region.
    pub fn scroll_to_cursor(&mut self) {
        let cursor = self.buffer.cursor();
        let size = self.region.size;

        if cursor.col < self.scroll.x {
            self.scroll.x = cursor.col;
        } else if size.x > 0 && cursor.col >= self.scroll.x.saturating_add(size.x) {
            self.scroll.x = cursor.col.saturating_sub(size.x).saturating_add(1);
        }

        if cursor.row < self.scroll.y {
            self.scroll.y = cursor.row;
        } else if size.y > 0 && cursor.row >= self.scroll.y.saturating_add(size.y) {
            self.scroll.y = cursor.row.saturating_sub(size.y).saturating_add(1);
        }
    }

    /// Paint the visible part of the buffer and place the cursor. The
    /// caller owns clearing and presenting the frame.
    pub fn render(&self, screen: &mut dyn Screen, style: Style) {
        if self.region.is_empty() {
            return;
        }

        let visible_rows = self
            .buffer
            .lines()
            .iter()
            .skip(self.scroll.y)
            .take(self.region.size.y);

        for (y, line) in visible_rows.enumerate() {
            let row = self.region.pos.y.saturating_add(y).to_u16_clamp();
            let visible_chars = line
                .chars()
                .iter()
                .skip(self.scroll.x)
                .take(self.region.size.x);

            for (x, ch) in visible_chars.enumerate() {
                let col = self.region.pos.x.saturating_add(x).to_u16_clamp();
                // TODO: draw with line.style() once lines get highlighted
                screen.set_cell(col, row, style, cell_char(*ch));
            }
        }

        let cursor = self.buffer.cursor();
        screen.show_cursor(
            self.region
                .pos
                .x
                .saturating_add(cursor.col.saturating_sub(self.scroll.x))
                .to_u16_clamp(),
            self.region
                .pos
                .y
                .saturating_add(cursor.row.saturating_sub(self.scroll.y))
                .to_u16_clamp(),
        );
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use kod_window::TerminalSize;

    use super::*;

    #[derive(Default)]
    struct GridScreen {
        cells: Vec<(u16, u16, char)>,
        cursor: Option<(u16, u16)>,
    }

    impl Screen for GridScreen {
        fn init(&mut self) -> Result<()> {
            Ok(())
        }
        fn fini(&mut self) -> Result<()> {
            Ok(())
        }
        fn set_style(&mut self, _style: Style) {}
        fn clear(&mut self) {
            self.cells.clear();
        }
        fn set_cell(&mut self, col: u16, row: u16, _style: Style, ch: char) {
            self.cells.push((col, row, ch));
        }
        fn show_cursor(&mut self, col: u16, row: u16) {
            self.cursor = Some((col, row));
        }
        fn show(&mut self) -> Result<()> {
            Ok(())
        }
        fn sync(&mut self) -> Result<()> {
            Ok(())
        }
        fn size(&self) -> TerminalSize {
            TerminalSize { x: 80, y: 24 }
        }
    }

    fn region(x: usize, y: usize, w: usize, h: usize) -> Bounds2u {
        Bounds2u {
            pos: Vec2u::new(x, y),
            size: Vec2u::new(w, h),
        }
    }

    #[test]
    fn test_render_paints_each_character_at_its_position() {
        let mut view = View::new(Buffer::from_text("ab\nc", None));
        view.set_region(region(0, 0, 80, 24));
        view.buffer_mut().set_cursor(1, 1);

        let mut screen = GridScreen::default();
        view.render(&mut screen, Style::DEFAULT);

        assert_eq!(screen.cells, vec![(0, 0, 'a'), (1, 0, 'b'), (0, 1, 'c')]);
        assert_eq!(screen.cursor, Some((1, 1)));
    }

    #[test]
    fn test_render_is_offset_by_region() {
        let mut view = View::new(Buffer::from_text("x", None));
        view.set_region(region(3, 2, 10, 10));

        let mut screen = GridScreen::default();
        view.render(&mut screen, Style::DEFAULT);

        assert_eq!(screen.cells, vec![(3, 2, 'x')]);
        assert_eq!(screen.cursor, Some((3, 2)));
    }

    #[test]
    fn test_render_clips_to_region() {
        let mut view = View::new(Buffer::from_text("abcdef\n1\n2\n3", None));
        view.set_region(region(0, 0, 3, 2));

        let mut screen = GridScreen::default();
        view.render(&mut screen, Style::DEFAULT);

        assert_eq!(
            screen.cells,
            vec![(0, 0, 'a'), (1, 0, 'b'), (2, 0, 'c'), (0, 1, '1')]
        );
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let mut view = View::new(Buffer::from_text("a\nb\nc\nd\ne", None));
        view.set_region(region(0, 0, 5, 2));

        view.buffer_mut().set_cursor(0, 4);
        view.scroll_to_cursor();
        assert_eq!(view.scroll(), Vec2u::new(0, 3));

        let mut screen = GridScreen::default();
        view.render(&mut screen, Style::DEFAULT);
        assert_eq!(screen.cells, vec![(0, 0, 'd'), (0, 1, 'e')]);
        assert_eq!(screen.cursor, Some((0, 1)));

        view.buffer_mut().set_cursor(0, 0);
        view.scroll_to_cursor();
        assert_eq!(view.scroll(), Vec2u::ZERO);
    }

    #[test]
    fn test_tab_is_drawn_as_one_blank_cell() {
        let mut view = View::new(Buffer::from_text("a\tb", None));
        view.set_region(region(0, 0, 80, 24));

        let mut screen = GridScreen::default();
        view.render(&mut screen, Style::DEFAULT);

        assert_eq!(screen.cells, vec![(0, 0, 'a'), (1, 0, ' '), (2, 0, 'b')]);
    }

    #[test]
    fn test_empty_region_draws_nothing() {
        let view = View::new(Buffer::from_text("abc", None));

        let mut screen = GridScreen::default();
        view.render(&mut screen, Style::DEFAULT);

        assert!(screen.cells.is_empty());
        assert_eq!(screen.cursor, None);
    }
}
