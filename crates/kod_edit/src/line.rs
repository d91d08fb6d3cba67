use kod_window::Style;

/// One line of text. Every stored `char` takes exactly one column on
/// screen; wide and combining characters are not accounted for.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Line {
    content: Vec<char>,
    style: Style,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text<T: AsRef<str>>(text: T) -> Self {
        Self {
            content: text.as_ref().chars().collect(),
            style: Style::DEFAULT,
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.content
    }

    pub fn text(&self) -> String {
        self.content.iter().collect()
    }

    /// The style this line asks to be drawn with. Views currently draw
    /// every line with the editor's default style.
    pub fn style(&self) -> Style {
        self.style
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// Insert `ch` before column `col`; past the end it appends.
    pub fn insert(&mut self, col: usize, ch: char) {
        let col = col.min(self.content.len());
        self.content.insert(col, ch);
    }

    pub fn remove(&mut self, col: usize) -> Option<char> {
        (col < self.content.len()).then(|| self.content.remove(col))
    }

    /// Cut the line at `col`, returning everything from `col` onwards.
    /// The tail keeps this line's style.
    pub fn split_off(&mut self, col: usize) -> Line {
        let col = col.min(self.content.len());
        Line {
            content: self.content.split_off(col),
            style: self.style,
        }
    }

    pub fn append(&mut self, other: Line) {
        self.content.extend(other.content);
    }
}
