use kod_base::math::offset_clamp;

use crate::line::Line;

/// A position inside a buffer. `col` may sit one past the last
/// character of the line, which is where appended text goes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cursor {
    pub col: usize,
    pub row: usize,
}

impl Cursor {
    pub const ORIGIN: Self = Self { col: 0, row: 0 };

    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Build a cursor at (`col`, `row`), pulled back inside `lines`.
    pub fn clamped(col: usize, row: usize, lines: &[Line]) -> Self {
        let row = row.min(lines.len().saturating_sub(1));
        let line_len = lines.get(row).map_or(0, Line::len);
        Self {
            col: col.min(line_len),
            row,
        }
    }

    /// Apply a signed offset and clamp the result inside `lines`.
    pub fn offset(self, dx: isize, dy: isize, lines: &[Line]) -> Self {
        let last_row = lines.len().saturating_sub(1);
        let row = offset_clamp(self.row, dy, last_row);
        let line_len = lines.get(row).map_or(0, Line::len);
        let col = offset_clamp(self.col, dx, line_len);
        Self { col, row }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[&str]) -> Vec<Line> {
        texts.iter().map(|text| Line::from_text(text)).collect()
    }

    #[test]
    fn test_clamped() {
        let lines = lines(&["abc", "d"]);
        assert_eq!(Cursor::clamped(10, 0, &lines), Cursor::new(3, 0));
        assert_eq!(Cursor::clamped(10, 10, &lines), Cursor::new(1, 1));
        assert_eq!(Cursor::clamped(0, 0, &[]), Cursor::ORIGIN);
    }

    #[test]
    fn test_offset_shortens_col_on_shorter_line() {
        let lines = lines(&["hello", "hi"]);
        let cursor = Cursor::new(5, 0).offset(0, 1, &lines);
        assert_eq!(cursor, Cursor::new(2, 1));
    }

    #[test]
    fn test_offset_extreme_deltas() {
        let lines = lines(&["one", "two", "three"]);
        assert_eq!(
            Cursor::new(1, 1).offset(isize::MAX, isize::MAX, &lines),
            Cursor::new(5, 2)
        );
        assert_eq!(
            Cursor::new(1, 1).offset(isize::MIN, isize::MIN, &lines),
            Cursor::ORIGIN
        );
    }
}
