use super::Element;
use crate::types::TableLayout;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Content {
    #[default]
    None,
    Text(String),
    Children(Vec<Element>),
    Table(TableContent),
}

/// A table: an optional header row followed by body rows of cells.
///
/// Cells are ordinary elements; their `width` is the column width request
/// and their padding/border are part of the column's outer width.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableContent {
    pub layout: TableLayout,
    pub head: Vec<Element>,
    pub rows: Vec<Vec<Element>>,
}

impl TableContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout(mut self, layout: TableLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn head(mut self, cells: Vec<Element>) -> Self {
        self.head = cells;
        self
    }

    pub fn row(mut self, cells: Vec<Element>) -> Self {
        self.rows.push(cells);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Vec<Element>>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Number of columns, taken from the widest row.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.head.len()))
            .max()
            .unwrap_or(0)
    }

    /// All rows in paint order, the header row first when present.
    pub fn all_rows(&self) -> impl Iterator<Item = &Vec<Element>> {
        let head = (!self.head.is_empty()).then_some(&self.head);
        head.into_iter().chain(self.rows.iter())
    }

    pub fn cells(&self) -> impl Iterator<Item = &Element> {
        self.all_rows().flatten()
    }
}
