//! Rendering seam between the pager and whatever paints the screen.
//!
//! The control loop only talks to a [`RenderDriver`]: it asks for the screen
//! size, paints rows, presents them and blocks for the next [`Key`]. The
//! crossterm/ratatui implementation lives in [`crate::terminal`]; tests drive
//! the loop with an in-memory implementation.

use crate::highlight::ColorPair;
use anyhow::Result;
use std::fmt;

/// keyboard input, already decoded from the backend's event type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Backspace,
    Esc,
    /// ctrl-c
    Interrupt,
    /// the screen changed size; dimensions are already updated
    Resize { rows: usize, cols: usize },
    /// anything else, named for messages
    Other(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "'{}'", c),
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::PageUp => f.write_str("PageUp"),
            Key::PageDown => f.write_str("PageDown"),
            Key::Home => f.write_str("Home"),
            Key::End => f.write_str("End"),
            Key::Enter => f.write_str("Enter"),
            Key::Backspace => f.write_str("Backspace"),
            Key::Esc => f.write_str("Esc"),
            Key::Interrupt => f.write_str("Ctrl-C"),
            Key::Resize { rows, cols } => write!(f, "Resize({}x{})", cols, rows),
            Key::Other(name) => f.write_str(name),
        }
    }
}

/// color of one entry row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorTag {
    #[default]
    Default,
    Pair(ColorPair),
}

/// one row of the entry list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow<'a> {
    /// 1-based entry number
    pub index: usize,
    /// digits reserved for the number column
    pub index_width: usize,
    pub text: &'a str,
    pub color: ColorTag,
}

impl EntryRow<'_> {
    /// `{index:>width}: {text}`
    pub fn to_plain_string(&self) -> String {
        format!("{:>width$}: {}", self.index, self.text, width = self.index_width)
    }
}

pub trait RenderDriver {
    /// `(rows, cols)` of the drawable area
    fn dimensions(&self) -> (usize, usize);

    /// `false` makes the pager paint every row with [`ColorTag::Default`]
    fn supports_color(&self) -> bool {
        true
    }

    /// forget everything painted since the last present
    fn clear(&mut self);

    fn paint_entry(&mut self, row: usize, entry: &EntryRow<'_>);

    fn paint_text(&mut self, row: usize, col: usize, text: &str);

    /// transient message over the current screen
    fn paint_notice(&mut self, row: usize, text: &str) {
        self.paint_text(row, 0, text);
    }

    /// horizontal rule from `col` to the right edge
    fn paint_rule(&mut self, row: usize, col: usize);

    /// bottom row
    fn paint_status(&mut self, text: &str);

    /// flush painted rows to the screen
    fn present(&mut self) -> Result<()>;

    /// block until the next key (or resize) arrives
    fn next_key(&mut self) -> Result<Key>;
}
