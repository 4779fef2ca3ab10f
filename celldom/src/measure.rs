//! Reading back cell geometry from a laid-out table.

use crate::element::{find_element, Content, Element};
use crate::layout::{LayoutResult, Rect};
use crate::types::Edges;

/// Which cells of a table to read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// The header row.
    Head,
    /// The first body row. An empty body yields no cells.
    FirstRow,
}

/// Geometry of one laid-out table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellBox {
    pub id: String,
    pub rect: Rect,
    pub padding: Edges,
    pub border: Edges,
}

impl CellBox {
    /// Width inside the border: content plus padding.
    pub fn client_width(&self) -> u16 {
        self.rect
            .width
            .saturating_sub(self.border.horizontal_total())
    }

    /// Left and right padding plus left and right border.
    pub fn horizontal_inset(&self) -> u16 {
        self.padding.horizontal_total() + self.border.horizontal_total()
    }
}

/// Geometry of the cells in one section of the table with the given id.
///
/// Returns `None` when the table is not in the tree, is not a table, or has
/// not been laid out yet. Callers treat that as "not mounted".
pub fn cell_boxes(
    root: &Element,
    layout: &LayoutResult,
    table_id: &str,
    section: Section,
) -> Option<Vec<CellBox>> {
    let element = find_element(root, table_id)?;
    let Content::Table(table) = &element.content else {
        return None;
    };
    if !layout.contains(&element.id) {
        return None;
    }

    let cells: &[Element] = match section {
        Section::Head => &table.head,
        Section::FirstRow => table.rows.first().map(Vec::as_slice).unwrap_or(&[]),
    };

    cells
        .iter()
        .map(|cell| {
            layout.get(&cell.id).map(|rect| CellBox {
                id: cell.id.clone(),
                rect: *rect,
                padding: cell.padding,
                border: cell.border,
            })
        })
        .collect()
}
