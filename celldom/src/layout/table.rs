//! Table column sizing.
//!
//! Two algorithms, selected per table:
//! - `Auto`: every column is as wide as its widest cell in any row. A cell's
//!   width request acts as a floor.
//! - `Fixed`: column widths come from the first row only (the header row
//!   when present). Later rows never widen a column.
//!
//! In both cases a cell's `Size::Fixed` is its content width; the column's
//! outer width adds the cell's padding and border. When the table carries a
//! minimum width larger than the column sum, the last column absorbs the
//! difference.

use super::flow::{content_size, place, table_min_total};
use super::{LayoutResult, Rect};
use crate::element::{Element, TableContent};
use crate::types::{Size, TableLayout};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct TableMetrics {
    /// Outer width of each column.
    pub columns: Vec<u16>,
    /// Height of each row, header row first when present.
    pub rows: Vec<u16>,
}

impl TableMetrics {
    pub fn size(&self) -> (u16, u16) {
        (
            self.columns.iter().fold(0u16, |a, w| a.saturating_add(*w)),
            self.rows.iter().fold(0u16, |a, h| a.saturating_add(*h)),
        )
    }
}

pub(super) fn measure_table(
    table: &TableContent,
    min_total: Option<u16>,
    avail_w: u16,
) -> TableMetrics {
    let mut columns = vec![0u16; table.column_count()];

    match table.layout {
        TableLayout::Auto => {
            for row in table.all_rows() {
                widen(&mut columns, row, avail_w);
            }
        }
        TableLayout::Fixed => {
            let mut rows = table.all_rows();
            if let Some(first) = rows.next() {
                for (i, cell) in first.iter().enumerate() {
                    columns[i] = declared_outer_width(cell, avail_w)
                        .unwrap_or_else(|| cell_outer_width(cell, avail_w));
                }
                // Columns the first row does not reach fall back to content
                for row in rows {
                    for (i, cell) in row.iter().enumerate().skip(first.len()) {
                        columns[i] = columns[i].max(cell_outer_width(cell, avail_w));
                    }
                }
            }
        }
    }

    if let (Some(min), Some(last)) = (min_total, columns.len().checked_sub(1)) {
        let sum = columns.iter().fold(0u16, |a, w| a.saturating_add(*w));
        if sum < min {
            columns[last] += min - sum;
        }
    }

    let rows = table
        .all_rows()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(i, cell)| cell_outer_height(cell, columns[i]))
                .max()
                .unwrap_or(0)
        })
        .collect();

    TableMetrics { columns, rows }
}

fn widen(columns: &mut [u16], row: &[Element], avail_w: u16) {
    for (i, cell) in row.iter().enumerate() {
        columns[i] = columns[i].max(cell_outer_width(cell, avail_w));
    }
}

/// Width a cell asks for regardless of its content, if it asks at all.
fn declared_outer_width(cell: &Element, avail_w: u16) -> Option<u16> {
    match cell.width {
        Size::Fixed(_) | Size::Percent(_) => cell
            .width
            .resolve(avail_w)
            .map(|w| w.saturating_add(cell.insets().horizontal_total())),
        Size::Fill | Size::Auto => None,
    }
}

fn cell_outer_width(cell: &Element, avail_w: u16) -> u16 {
    let insets = cell.insets().horizontal_total();
    let (content_w, _) = content_size(cell, avail_w, u16::MAX);
    let requested = match cell.width {
        Size::Fixed(n) => n,
        Size::Percent(_) => cell.width.resolve(avail_w).unwrap_or(0),
        Size::Fill | Size::Auto => 0,
    };
    requested
        .max(content_w)
        .max(cell.min_width.unwrap_or(0))
        .saturating_add(insets)
}

fn cell_outer_height(cell: &Element, column_width: u16) -> u16 {
    let insets = cell.insets();
    let inner_w = column_width.saturating_sub(insets.horizontal_total());
    let (_, content_h) = content_size(cell, inner_w, u16::MAX);
    let requested = match cell.height {
        Size::Fixed(n) => n,
        _ => 0,
    };
    requested
        .max(content_h)
        .saturating_add(insets.vertical_total())
}

/// Place every cell of a table inside the table element's content box.
pub(super) fn layout_table(
    element: &Element,
    table: &TableContent,
    inner: Rect,
    result: &mut LayoutResult,
) -> (u16, u16) {
    let metrics = measure_table(table, table_min_total(element), inner.width);

    let mut y = inner.y;
    for (row, height) in table.all_rows().zip(&metrics.rows) {
        let mut x = inner.x;
        for (cell, width) in row.iter().zip(&metrics.columns) {
            place(cell, Rect::new(x, y, *width, *height), result);
            x = x.saturating_add(*width);
        }
        y = y.saturating_add(*height);
    }

    metrics.size()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Edges;

    fn cell(text: &str) -> Element {
        Element::text(text).padding(Edges::horizontal(1))
    }

    #[test]
    fn auto_layout_takes_widest_cell() {
        let table = TableContent::new()
            .head(vec![cell("id"), cell("name")])
            .row(vec![cell("1"), cell("alexandra")]);
        let metrics = measure_table(&table, None, 80);
        assert_eq!(metrics.columns, vec![4, 11]);
        assert_eq!(metrics.rows, vec![1, 1]);
    }

    #[test]
    fn fixed_layout_ignores_later_rows() {
        let table = TableContent::new()
            .layout(TableLayout::Fixed)
            .head(vec![
                cell("id").width(Size::Fixed(3)),
                cell("name").width(Size::Fixed(2)),
                cell("age"),
            ])
            .row(vec![cell("1"), cell("alexandra"), cell("100")]);
        let metrics = measure_table(&table, None, 80);
        assert_eq!(metrics.columns, vec![5, 4, 5]);
    }

    #[test]
    fn min_total_widens_last_column() {
        let table = TableContent::new().head(vec![cell("a"), cell("b")]);
        let metrics = measure_table(&table, Some(10), 80);
        assert_eq!(metrics.columns, vec![3, 7]);
    }
}
