/// Sizing directive for an element's width or height.
///
/// Table cells interpret `Fixed` as a content width (padding and border are
/// added on top), every other element as its outer width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Size {
    Fixed(u16),
    /// Percentage of the available space, 0..=100.
    Percent(u16),
    Fill,
    #[default]
    Auto,
}

impl Size {
    /// Resolve against the available space. `Auto` has no resolution here.
    pub fn resolve(self, available: u16) -> Option<u16> {
        match self {
            Size::Fixed(n) => Some(n),
            Size::Percent(p) => Some((available as u32 * p.min(100) as u32 / 100) as u16),
            Size::Fill => Some(available),
            Size::Auto => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Row,
    #[default]
    Column,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Static,
    /// Establishes a stacking context for its children.
    Relative,
    /// Placed against the viewport, outside normal flow.
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Auto,
}

impl Overflow {
    pub const fn clips(self) -> bool {
        !matches!(self, Overflow::Visible)
    }
}

/// Column sizing algorithm of a table, mirroring CSS `table-layout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableLayout {
    /// Columns grow to fit the widest cell in any row.
    #[default]
    Auto,
    /// Columns take their widths from the first row only.
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub dim: bool,
    pub reverse: bool,
}

impl TextStyle {
    pub const fn new() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            dim: false,
            reverse: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub const fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}
