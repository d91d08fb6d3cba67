use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};

use crate::{cursor::Cursor, error::LoadError, line::Line};

/// The lines of one document plus its cursor.
///
/// There is always at least one line, and the cursor always points
/// inside the text: every mutation clamps it back in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<Line>,
    cursor: Cursor,
    name: Option<String>,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
            cursor: Cursor::ORIGIN,
            name: None,
        }
    }

    /// An empty buffer that remembers where it is meant to come from.
    pub fn new_named<T: AsRef<str>>(name: T) -> Self {
        Self {
            name: Some(name.as_ref().to_string()),
            ..Self::new()
        }
    }

    pub fn from_text<T: AsRef<str>>(text: T, name: Option<String>) -> Self {
        let mut lines: Vec<Line> = text
            .as_ref()
            .lines()
            .map(Line::from_text)
            .collect();
        if lines.is_empty() {
            lines.push(Line::new());
        }

        Self {
            lines,
            cursor: Cursor::ORIGIN,
            name,
        }
    }

    /// Read everything from `reader` and split it into lines. Bytes
    /// that are not valid UTF-8 are replaced rather than rejected.
    pub fn from_reader<R: Read>(mut reader: R, name: Option<String>) -> io::Result<Self> {
        let mut bytes = vec![];
        reader.read_to_end(&mut bytes)?;
        Ok(Self::from_text(String::from_utf8_lossy(&bytes), name))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let name = Some(path.display().to_string());
        File::open(path)
            .and_then(|file| Self::from_reader(file, name))
            .map_err(|source| LoadError {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, row: usize) -> Option<&Line> {
        self.lines.get(row)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn current_line_len(&self) -> usize {
        self.lines.get(self.cursor.row).map_or(0, Line::len)
    }

    pub fn set_cursor(&mut self, col: usize, row: usize) {
        self.cursor = Cursor::clamped(col, row, &self.lines);
    }

    pub fn move_cursor(&mut self, dx: isize, dy: isize) {
        self.cursor = self.cursor.offset(dx, dy, &self.lines);
    }

    pub fn move_to_line_start(&mut self) {
        self.cursor.col = 0;
    }

    pub fn move_to_line_end(&mut self) {
        self.cursor.col = self.current_line_len();
    }

    /// Step one character left, wrapping to the end of the previous line.
    pub fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.move_cursor(-1, 0);
        } else if self.cursor.row > 0 {
            self.move_cursor(0, -1);
            self.move_to_line_end();
        }
    }

    /// Step one character right, wrapping to the start of the next line.
    pub fn move_right(&mut self) {
        if self.cursor.col < self.current_line_len() {
            self.move_cursor(1, 0);
        } else if self.cursor.row.saturating_add(1) < self.lines.len() {
            self.set_cursor(0, self.cursor.row.saturating_add(1));
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.insert_newline();
            return;
        }

        if let Some(line) = self.lines.get_mut(self.cursor.row) {
            line.insert(self.cursor.col, ch);
            self.cursor.col = self.cursor.col.saturating_add(1);
        }
    }

    pub fn insert_str<T: AsRef<str>>(&mut self, text: T) {
        text.as_ref().chars().for_each(|ch| self.insert_char(ch));
    }

    /// Split the current line at the cursor and move to the new line.
    pub fn insert_newline(&mut self) {
        let row = self.cursor.row;
        if let Some(line) = self.lines.get_mut(row) {
            let tail = line.split_off(self.cursor.col);
            self.lines.insert(row.saturating_add(1), tail);
            self.cursor = Cursor::new(0, row.saturating_add(1));
        }
    }

    /// Backspace: remove the character left of the cursor, or join the
    /// current line onto the previous one when at column 0.
    pub fn delete_char_before(&mut self) {
        let Cursor { col, row } = self.cursor;
        if col > 0 {
            if let Some(line) = self.lines.get_mut(row) {
                line.remove(col.saturating_sub(1));
                self.cursor.col = col.saturating_sub(1);
            }
        } else if row > 0 {
            let previous_len = self
                .lines
                .get(row.saturating_sub(1))
                .map_or(0, Line::len);
            self.join_with_next_line(row.saturating_sub(1));
            self.cursor = Cursor::new(previous_len, row.saturating_sub(1));
        }
    }

    /// Delete: remove the character under the cursor, or pull the next
    /// line up when at the end of the line.
    pub fn delete_char_at(&mut self) {
        let Cursor { col, row } = self.cursor;
        if col < self.current_line_len() {
            if let Some(line) = self.lines.get_mut(row) {
                line.remove(col);
            }
        } else {
            self.join_with_next_line(row);
        }
    }

    fn join_with_next_line(&mut self, row: usize) {
        if row.saturating_add(1) < self.lines.len() {
            let next = self.lines.remove(row.saturating_add(1));
            if let Some(line) = self.lines.get_mut(row) {
                line.append(next);
            }
        }
    }
}
