use std::borrow::Cow;

use celldom::TableLayout;

use super::column::{combine_widths, Column, Length};

/// Columns as they should be rendered, with the table sizing that goes with
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedColumns<'a> {
    pub columns: Cow<'a, [Column]>,
    pub layout: TableLayout,
    pub min_width: Option<u16>,
}

/// Apply resolved widths to `columns`.
///
/// Resolved widths are only used when at least one column sizes itself from
/// content and a non-empty width set exists. In that case the table switches
/// to fixed layout so that header and body fragments share column widths,
/// and its minimum width is the sum of the columns' declared cell widths.
/// Columns without a declared width do not count towards that minimum.
pub fn apply_widths<'a>(columns: &'a [Column], widths: Option<&[u16]>) -> AppliedColumns<'a> {
    let all_explicit = columns.iter().all(Column::has_explicit_width);

    let widths = match widths {
        Some(widths) if !all_explicit && !widths.is_empty() => widths,
        _ => {
            return AppliedColumns {
                columns: Cow::Borrowed(columns),
                layout: TableLayout::Auto,
                min_width: None,
            };
        }
    };

    let min_width = combine_widths(columns.iter().map(|c| c.width.as_ref()));

    let resolved = columns
        .iter()
        .enumerate()
        .map(|(i, column)| match widths.get(i) {
            Some(&width) => column.clone().width(Length::Cells(width)),
            None => column.clone(),
        })
        .collect();

    AppliedColumns {
        columns: Cow::Owned(resolved),
        layout: TableLayout::Fixed,
        min_width: (min_width > 0).then_some(min_width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn without_widths_columns_are_untouched() {
        let columns = [Column::new("a"), Column::new("b")];
        for widths in [None, Some(&[][..])] {
            let applied = apply_widths(&columns, widths);
            assert!(matches!(applied.columns, Cow::Borrowed(_)));
            assert_eq!(applied.layout, TableLayout::Auto);
            assert_eq!(applied.min_width, None);
        }
    }

    #[test]
    fn resolved_widths_override_declared_ones() {
        let columns = [Column::new("a").width(Length::Cells(10)), Column::new("b")];
        let applied = apply_widths(&columns, Some(&[12, 7]));
        assert_eq!(applied.layout, TableLayout::Fixed);
        assert_eq!(applied.columns[0].width, Some(Length::Cells(12)));
        assert_eq!(applied.columns[1].width, Some(Length::Cells(7)));
        assert_eq!(applied.min_width, Some(10));
    }
}
