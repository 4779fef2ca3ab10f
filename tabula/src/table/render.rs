//! Default heading and row renderers.
//!
//! Renderers turn [`TableProps`] into cell elements. Both receive the
//! columns with effective widths already applied and must emit cells in
//! column order, with the selection cell first when the table has one.

use celldom::{Edges, Element, Size, Style};

use super::column::{Column, Length};
use super::props::TableProps;

const CELL_PADDING: Edges = Edges::horizontal(1);
const CELL_BORDER: Edges = Edges::right(1);
const SELECTION_WIDTH: u16 = 3;

/// A row that can be displayed in a [`DataTable`](super::DataTable).
///
/// # Example
///
/// ```ignore
/// struct User {
///     name: String,
///     email: String,
/// }
///
/// impl TableRow for User {
///     fn cell(&self, column: &Column) -> Element {
///         match column.key.as_deref() {
///             Some("name") => Element::text(&self.name),
///             Some("email") => Element::text(&self.email),
///             _ => Element::text(""),
///         }
///     }
/// }
/// ```
pub trait TableRow {
    /// Content for the cell in `column`. The renderer wraps it in the cell
    /// box and assigns its id.
    fn cell(&self, column: &Column) -> Element;
}

/// Produces the header row's cells.
pub trait HeadingRenderer<R> {
    fn render_head(&self, props: &TableProps<'_, R>) -> Vec<Element>;
}

/// Produces the body rows' cells.
pub trait RowRenderer<R> {
    fn render_rows(&self, props: &TableProps<'_, R>) -> Vec<Vec<Element>>;
}

/// Header cells showing column names and the sort indicator.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingRow;

impl<R> HeadingRenderer<R> for HeadingRow {
    fn render_head(&self, props: &TableProps<'_, R>) -> Vec<Element> {
        let mut cells = Vec::with_capacity(props.columns.len() + 1);

        if props.has_selection_column() {
            let all_selected = !props.filtered_rows.is_empty()
                && props.filtered_rows.iter().all(|row| props.is_selected(row));
            cells.push(selection_cell(format!("{}-th-select", props.id), all_selected));
        }

        for (i, column) in props.columns.iter().enumerate() {
            let label = match &props.ui_state.sort {
                Some(sort) if column.key.as_deref() == Some(sort.column.as_str()) => {
                    let arrow = if sort.ascending { '▲' } else { '▼' };
                    format!("{} {arrow}", column.name)
                }
                _ => column.name.clone(),
            };
            let content = Element::text(label).style(Style::new().bold());
            cells.push(cell(format!("{}-th-{i}", props.id), column, content));
        }

        cells
    }
}

/// Body rows for `filtered_rows`, one cell per column.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataRowList;

impl<R: TableRow> RowRenderer<R> for DataRowList {
    fn render_rows(&self, props: &TableProps<'_, R>) -> Vec<Vec<Element>> {
        let with_selection = props.has_selection_column();

        props
            .filtered_rows
            .iter()
            .enumerate()
            .map(|(r, row)| {
                let mut cells = Vec::with_capacity(props.columns.len() + 1);
                if with_selection {
                    let id = format!("{}-r{r}-select", props.id);
                    cells.push(selection_cell(id, props.is_selected(row)));
                }
                cells.extend(props.columns.iter().enumerate().map(|(i, column)| {
                    cell(format!("{}-r{r}-c{i}", props.id), column, row.cell(column))
                }));
                cells
            })
            .collect()
    }
}

fn cell(id: String, column: &Column, content: Element) -> Element {
    let width = column.width.map_or(Size::Auto, Length::to_size);
    Element::box_()
        .id(&id)
        .width(width)
        .padding(CELL_PADDING)
        .border(CELL_BORDER)
        .child(content.id(format!("{id}-content")))
}

fn selection_cell(id: String, selected: bool) -> Element {
    let mark = if selected {
        Element::text("[x]")
    } else {
        Element::text("[ ]").style(Style::new().dim())
    };
    Element::box_()
        .id(&id)
        .width(Size::Fixed(SELECTION_WIDTH))
        .padding(CELL_PADDING)
        .border(CELL_BORDER)
        .child(mark.id(format!("{id}-content")))
}
