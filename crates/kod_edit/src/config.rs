use kod_window::{Key, Style};

/// Knobs of the editor loop. Built in code, there is no config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    /// Capacity of both the input-event queue and the command queue.
    /// Producers block once it is reached.
    pub queue_capacity: usize,
    /// Global binding that ends the editor, checked before any mode.
    pub quit_key: Key,
    pub default_style: Style,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 50,
            quit_key: Key::F(1),
            default_style: Style::DEFAULT,
        }
    }
}
