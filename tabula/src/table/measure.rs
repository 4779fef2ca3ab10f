use celldom::CellBox;

use super::cache::WidthCache;
use super::column::Column;

/// Result of one measurement pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    /// One width per logical column.
    pub widths: Vec<u16>,
    /// Padding plus border of each column's body cell. Not folded into
    /// `widths`; kept for callers that align against the cell edges.
    pub insets: Vec<u16>,
}

/// Resolve one width per column from laid-out header and first-row cells.
///
/// Both cell lists still include the selection cell when the table has one;
/// it is dropped here and never measured. Cached keys win over geometry.
/// With a selection column the first logical width is one cell narrower, to
/// make room for the selection cell's border.
pub fn measure_pass(
    columns: &[Column],
    head: &[CellBox],
    body: &[CellBox],
    has_selection_column: bool,
    cache: &mut WidthCache,
) -> Measurement {
    let skip = usize::from(has_selection_column);
    let head = head.get(skip..).unwrap_or_default();
    let body = body.get(skip..).unwrap_or_default();

    let mut widths: Vec<u16> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| resolve_width(column, body.get(i), head.get(i), cache))
        .collect();

    let insets = (0..columns.len())
        .map(|i| body.get(i).map_or(0, CellBox::horizontal_inset))
        .collect();

    if has_selection_column {
        if let Some(first) = widths.first_mut() {
            *first = first.saturating_sub(1);
        }
    }

    Measurement { widths, insets }
}

fn resolve_width(
    column: &Column,
    body: Option<&CellBox>,
    head: Option<&CellBox>,
    cache: &mut WidthCache,
) -> u16 {
    if let Some(width) = column.key.as_deref().and_then(|key| cache.get(key)) {
        return width;
    }

    let content_width = body.map_or(0, CellBox::client_width);
    let heading_width = head.map_or(0, CellBox::client_width);
    let higher = content_width.max(heading_width);

    if let Some(key) = &column.key {
        cache.insert(key.clone(), higher);
    }
    higher
}
