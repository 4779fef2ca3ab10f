use crate::types::{Rgb, TextStyle};

/// One terminal cell, exactly as it will be flushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub style: TextStyle,
    /// Right half of a double-width glyph drawn in the cell to the left.
    /// Never flushed on its own.
    pub wide_continuation: bool,
}

impl Cell {
    pub const DEFAULT_FG: Rgb = Rgb::new(255, 255, 255);
    pub const DEFAULT_BG: Rgb = Rgb::new(0, 0, 0);

    /// An unpainted cell.
    pub const BLANK: Cell = Cell {
        char: ' ',
        fg: Self::DEFAULT_FG,
        bg: Self::DEFAULT_BG,
        style: TextStyle::new(),
        wide_continuation: false,
    };

    /// A glyph painted over `bg`.
    pub const fn glyph(char: char, fg: Rgb, bg: Rgb, style: TextStyle) -> Self {
        Self {
            char,
            fg,
            bg,
            style,
            wide_continuation: false,
        }
    }

    /// The cell covered by the right half of a wide glyph.
    pub const fn continuation(fg: Rgb, bg: Rgb) -> Self {
        Self {
            char: ' ',
            fg,
            bg,
            style: TextStyle::new(),
            wide_continuation: true,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}
