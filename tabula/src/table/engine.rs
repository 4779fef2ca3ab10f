use std::fmt;
use std::mem;
use std::sync::Arc;

use celldom::{
    cell_boxes, CellBox, Element, Event, LayoutResult, Overflow, Section, Size, TableContent,
};

use super::cache::WidthCache;
use super::column::{Column, Length};
use super::measure::{measure_pass, Measurement};
use super::options::{has_selection_hooks, EventHandlers, TableOptions};
use super::props::{Action, TableProps, UiState};
use super::render::{DataRowList, HeadingRenderer, HeadingRow, RowRenderer, TableRow};
use super::widths::{apply_widths, AppliedColumns};
use crate::bus::{Signal, UiEventBus};
use crate::error::TableError;

/// How a table is laid out on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// A single table, header and body together.
    Plain,
    /// Header and body as separate tables, the body bounded and scrolling.
    Sticky { max_height: Length },
}

/// Data table with measured column widths and an optional sticky header.
///
/// The table is driven from the outside in three steps:
///
/// 1. [`view`](Self::view) builds the element tree.
/// 2. The shell lays it out (and usually paints it).
/// 3. [`did_render`](Self::did_render) receives the tree and its layout and,
///    when a measurement is pending, resolves one width per column.
///
/// A completed measurement publishes [`Signal::LayoutChanged`] so the shell
/// knows to render again with the resolved widths.
///
/// # Example
///
/// ```ignore
/// let mut table = DataTable::new("users", bus.clone(), columns, rows)
///     .options(TableOptions::new().use_sticky_header(true).table_body_max_height("10"));
///
/// let root = table.view();
/// let layout = celldom::layout(&root, viewport);
/// table.did_render(&root, &layout);
/// ```
pub struct DataTable<R> {
    id: String,
    bus: UiEventBus,
    options: TableOptions<R>,
    event_handlers: EventHandlers<R>,
    columns: Arc<[Column]>,
    rows: Arc<[R]>,
    filtered_rows: Option<Arc<[R]>>,
    actions: Vec<Action<R>>,
    ui_state: UiState,
    heading: Box<dyn HeadingRenderer<R>>,
    body: Box<dyn RowRenderer<R>>,

    widths: Option<Vec<u16>>,
    insets: Vec<u16>,
    cache: WidthCache,
    measure_pending: bool,

    header_scroll_x: u16,
    body_scroll: (u16, u16),

    diagnostics: Vec<TableError>,
}

impl<R: TableRow + 'static> DataTable<R> {
    pub fn new(
        id: impl Into<String>,
        bus: UiEventBus,
        columns: impl Into<Arc<[Column]>>,
        rows: impl Into<Arc<[R]>>,
    ) -> Self {
        Self {
            id: id.into(),
            bus,
            options: TableOptions::default(),
            event_handlers: EventHandlers::default(),
            columns: columns.into(),
            rows: rows.into(),
            filtered_rows: None,
            actions: Vec::new(),
            ui_state: UiState::default(),
            heading: Box::new(HeadingRow),
            body: Box::new(DataRowList),
            widths: None,
            insets: Vec::new(),
            cache: WidthCache::new(),
            measure_pending: true,
            header_scroll_x: 0,
            body_scroll: (0, 0),
            diagnostics: Vec::new(),
        }
    }
}

impl<R: 'static> DataTable<R> {
    // -------------------------------------------------------------------------
    // Builder
    // -------------------------------------------------------------------------

    pub fn options(mut self, options: TableOptions<R>) -> Self {
        self.options = options;
        self
    }

    pub fn event_handlers(mut self, handlers: EventHandlers<R>) -> Self {
        self.event_handlers = handlers;
        self
    }

    /// Rows to display. Without it every row is displayed.
    pub fn filtered_rows(mut self, rows: impl Into<Arc<[R]>>) -> Self {
        self.filtered_rows = Some(rows.into());
        self
    }

    pub fn actions(mut self, actions: Vec<Action<R>>) -> Self {
        self.actions = actions;
        self
    }

    pub fn ui_state(mut self, ui_state: UiState) -> Self {
        self.ui_state = ui_state;
        self
    }

    pub fn heading_renderer(mut self, renderer: impl HeadingRenderer<R> + 'static) -> Self {
        self.heading = Box::new(renderer);
        self
    }

    pub fn row_renderer(mut self, renderer: impl RowRenderer<R> + 'static) -> Self {
        self.body = Box::new(renderer);
        self
    }

    // -------------------------------------------------------------------------
    // Data updates
    // -------------------------------------------------------------------------

    /// Replace the column sequence.
    ///
    /// Sequences are compared by identity, not content: passing the same
    /// `Arc` again is a no-op, while an equal but freshly built sequence
    /// discards the resolved widths and schedules a new measurement.
    /// Returns whether the columns were replaced.
    pub fn set_columns(&mut self, columns: impl Into<Arc<[Column]>>) -> bool {
        let columns = columns.into();
        if Arc::ptr_eq(&self.columns, &columns) {
            return false;
        }

        log::debug!(
            "table {}: columns replaced ({} -> {}), re-measuring",
            self.id,
            self.columns.len(),
            columns.len()
        );
        self.columns = columns;
        self.widths = None;
        self.insets.clear();
        self.measure_pending = true;
        true
    }

    pub fn set_rows(&mut self, rows: impl Into<Arc<[R]>>) {
        self.rows = rows.into();
    }

    pub fn set_filtered_rows(&mut self, rows: Option<Arc<[R]>>) {
        self.filtered_rows = rows;
    }

    pub fn set_ui_state(&mut self, ui_state: UiState) {
        self.ui_state = ui_state;
    }

    pub fn set_options(&mut self, options: TableOptions<R>) {
        self.options = options;
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Decide between the plain and the sticky layout.
    pub fn render_mode(&self) -> Result<RenderMode, TableError> {
        if !self.options.use_sticky_header {
            return Ok(RenderMode::Plain);
        }

        let value = self
            .options
            .table_body_max_height
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .ok_or(TableError::StickyHeaderWithoutMaxHeight)?;

        value
            .parse::<Length>()
            .map(|max_height| RenderMode::Sticky { max_height })
            .map_err(|_| TableError::InvalidMaxHeight {
                value: value.to_string(),
            })
    }

    /// Build the element tree for the current state.
    ///
    /// A misconfigured sticky header is logged on every call, recorded once
    /// in [`diagnostics`](Self::diagnostics) and rendered plain.
    pub fn view(&mut self) -> Element {
        match self.render_mode() {
            Ok(RenderMode::Plain) => self.plain_view(),
            Ok(RenderMode::Sticky { max_height }) => self.sticky_view(max_height),
            Err(err) => {
                log::error!("table {}: {err}", self.id);
                if !self.diagnostics.contains(&err) {
                    self.diagnostics.push(err);
                }
                self.plain_view()
            }
        }
    }

    fn props<'a>(&'a self, columns: &'a [Column]) -> TableProps<'a, R> {
        TableProps {
            id: &self.id,
            options: &self.options,
            rows: &self.rows,
            filtered_rows: self.visible_rows(),
            actions: &self.actions,
            event_handlers: &self.event_handlers,
            ui_state: &self.ui_state,
            columns,
        }
    }

    fn plain_view(&self) -> Element {
        let props = self.props(&self.columns);
        let table = TableContent::new()
            .head(self.heading.render_head(&props))
            .rows(self.body.render_rows(&props));

        Element::col()
            .id(&self.id)
            .width(Size::Fill)
            .child(Element::table(table).id(format!("{}-table", self.id)))
    }

    fn sticky_view(&self, max_height: Length) -> Element {
        let applied = apply_widths(&self.columns, self.widths.as_deref());
        let props = self.props(&applied.columns);

        let heading_table = fragment(
            self.heading_table_id(),
            &applied,
            TableContent::new().head(self.heading.render_head(&props)),
        );
        let content_table = fragment(
            self.content_table_id(),
            &applied,
            TableContent::new().rows(self.body.render_rows(&props)),
        );

        let header = Element::box_()
            .id(format!("{}-header", self.id))
            .width(Size::Fill)
            .overflow_x(Overflow::Hidden)
            .scroll_offset(self.header_scroll_x, 0)
            .child(heading_table);

        let body = Element::box_()
            .id(self.body_id())
            .width(Size::Fill)
            .max_height(max_height.to_size())
            .overflow(Overflow::Auto)
            .scroll_offset(self.body_scroll.0, self.body_scroll.1)
            .child(content_table);

        let sticky = with_min_width(
            Element::col()
                .id(format!("{}-sticky", self.id))
                .width(Size::Fill)
                .child(header)
                .child(body),
            applied.min_width,
        );

        with_min_width(
            Element::col().id(&self.id).width(Size::Fill).child(sticky),
            applied.min_width,
        )
    }

    // -------------------------------------------------------------------------
    // Measurement
    // -------------------------------------------------------------------------

    /// Run a pending measurement against a laid-out tree.
    ///
    /// The body scroll offset is first pulled back into the scrollable range
    /// of `layout`, so shrinking content or a smaller terminal never leaves
    /// the body scrolled past its end.
    ///
    /// Measuring does nothing unless a measurement is pending. If either
    /// table fragment is missing from the tree or the layout (the plain
    /// layout has neither) the pass is skipped and stays pending. Returns
    /// whether a pass ran.
    pub fn did_render(&mut self, root: &Element, layout: &LayoutResult) -> bool {
        self.clamp_body_scroll(layout);
        if !self.measure_pending {
            return false;
        }

        let head = cell_boxes(root, layout, &self.heading_table_id(), Section::Head);
        let body = cell_boxes(root, layout, &self.content_table_id(), Section::FirstRow);
        let (Some(head), Some(body)) = (head, body) else {
            log::trace!("table {}: fragments not laid out, measurement deferred", self.id);
            return false;
        };

        self.measure(&head, &body);
        true
    }

    /// Resolve column widths from header cells and first-row body cells.
    pub fn measure(&mut self, head: &[CellBox], body: &[CellBox]) {
        let with_selection = self.has_selection_column();
        let Measurement { widths, insets } =
            measure_pass(&self.columns, head, body, with_selection, &mut self.cache);

        log::debug!("table {}: resolved widths {widths:?}", self.id);
        self.widths = Some(widths);
        self.insets = insets;
        self.measure_pending = false;
        self.bus.publish(Signal::LayoutChanged);
    }

    // -------------------------------------------------------------------------
    // Scrolling
    // -------------------------------------------------------------------------

    /// The body scrolled to `(x, y)`. The header follows horizontally.
    pub fn on_body_scroll(&mut self, x: u16, y: u16) {
        self.body_scroll = (x, y);
        if self.header_scroll_x != x {
            log::debug!("table {}: header scroll {} -> {x}", self.id, self.header_scroll_x);
            self.header_scroll_x = x;
        }
        self.bus.publish(Signal::ScrollChanged);
    }

    /// Scroll the header alone. The body never follows the header.
    pub fn scroll_header_to(&mut self, x: u16) {
        self.header_scroll_x = x;
    }

    /// Scroll the body by a delta, clamped to its scrollable range in
    /// `layout`. Returns whether the offset changed.
    pub fn scroll_body_by(&mut self, dx: i16, dy: i16, layout: &LayoutResult) -> bool {
        let (max_x, max_y) = layout.max_scroll(&self.body_id()).unwrap_or((0, 0));
        let next = (
            step(self.body_scroll.0, dx, max_x),
            step(self.body_scroll.1, dy, max_y),
        );
        if next == self.body_scroll {
            return false;
        }
        self.on_body_scroll(next.0, next.1);
        true
    }

    fn clamp_body_scroll(&mut self, layout: &LayoutResult) {
        let Some((max_x, max_y)) = layout.max_scroll(&self.body_id()) else {
            return;
        };
        let (x, y) = self.body_scroll;
        let clamped = (x.min(max_x), y.min(max_y));
        if clamped != self.body_scroll {
            log::debug!(
                "table {}: body scroll {:?} clamped to {clamped:?}",
                self.id,
                self.body_scroll
            );
            self.on_body_scroll(clamped.0, clamped.1);
        }
    }

    /// Handle input aimed at the table. Wheel events over the body scroll it;
    /// clicks on a selection cell toggle that row. Returns whether the event
    /// was consumed.
    pub fn handle_event(&mut self, event: &Event, layout: &LayoutResult) -> bool {
        let Some(body) = layout.get(&self.body_id()).copied() else {
            return false;
        };

        match *event {
            Event::Scroll {
                x,
                y,
                delta_x,
                delta_y,
            } if body.contains(x, y) => self.scroll_body_by(delta_x, delta_y, layout),
            Event::Click { x, y } if body.contains(x, y) && self.has_selection_column() => {
                let doc_x = x.saturating_add(self.body_scroll.0);
                let doc_y = y.saturating_add(self.body_scroll.1);
                let hit = (0..self.visible_rows().len()).find(|r| {
                    layout
                        .get(&format!("{}-r{r}-select", self.id))
                        .is_some_and(|rect| rect.contains(doc_x, doc_y))
                });
                hit.is_some_and(|r| self.toggle_row(r))
            }
            _ => false,
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Whether the synthetic selection column is shown.
    pub fn has_selection_column(&self) -> bool {
        has_selection_hooks(&self.options, &self.event_handlers)
    }

    /// Select or deselect the displayed row at `index`, depending on its
    /// current state. Returns false without a selection column or when the
    /// index is out of range.
    pub fn toggle_row(&self, index: usize) -> bool {
        if !self.has_selection_column() {
            return false;
        }
        let Some(row) = self.visible_rows().get(index) else {
            return false;
        };

        let selected = self
            .options
            .is_row_selected
            .as_ref()
            .is_some_and(|predicate| predicate(row));
        let handler = if selected {
            &self.event_handlers.on_row_deselect
        } else {
            &self.event_handlers.on_row_select
        };
        if let Some(handler) = handler {
            handler(row);
        }
        true
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn bus(&self) -> &UiEventBus {
        &self.bus
    }

    pub fn columns(&self) -> &Arc<[Column]> {
        &self.columns
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Rows currently displayed.
    pub fn visible_rows(&self) -> &[R] {
        self.filtered_rows.as_deref().unwrap_or(&*self.rows)
    }

    /// One width per column, or `None` before the first measurement and
    /// right after the columns were replaced.
    pub fn resolved_widths(&self) -> Option<&[u16]> {
        self.widths.as_deref()
    }

    /// Horizontal padding plus border of each column's body cell, from the
    /// last measurement.
    pub fn cell_insets(&self) -> &[u16] {
        &self.insets
    }

    pub fn width_cache(&self) -> &WidthCache {
        &self.cache
    }

    pub fn measure_pending(&self) -> bool {
        self.measure_pending
    }

    pub fn header_scroll_x(&self) -> u16 {
        self.header_scroll_x
    }

    pub fn body_scroll(&self) -> (u16, u16) {
        self.body_scroll
    }

    pub fn diagnostics(&self) -> &[TableError] {
        &self.diagnostics
    }

    /// Drain the configuration problems reported so far.
    pub fn take_diagnostics(&mut self) -> Vec<TableError> {
        mem::take(&mut self.diagnostics)
    }

    fn heading_table_id(&self) -> String {
        format!("{}-heading-table", self.id)
    }

    fn content_table_id(&self) -> String {
        format!("{}-content-table", self.id)
    }

    fn body_id(&self) -> String {
        format!("{}-body", self.id)
    }
}

impl<R> fmt::Debug for DataTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("id", &self.id)
            .field("options", &self.options)
            .field("columns", &self.columns.len())
            .field("rows", &self.rows.len())
            .field("widths", &self.widths)
            .field("measure_pending", &self.measure_pending)
            .field("header_scroll_x", &self.header_scroll_x)
            .field("body_scroll", &self.body_scroll)
            .finish_non_exhaustive()
    }
}

fn fragment(id: String, applied: &AppliedColumns<'_>, content: TableContent) -> Element {
    let table = Element::table(content.layout(applied.layout)).id(id);
    with_min_width(table, applied.min_width)
}

fn with_min_width(element: Element, min_width: Option<u16>) -> Element {
    match min_width {
        Some(min) => element.min_width(min),
        None => element,
    }
}

fn step(current: u16, delta: i16, max: u16) -> u16 {
    (i32::from(current) + i32::from(delta)).clamp(0, i32::from(max)) as u16
}
