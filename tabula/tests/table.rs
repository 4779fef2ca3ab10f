use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use celldom::element::find_element;
use celldom::{layout, Content, Element, Event, LayoutResult, Rect, Size, TableLayout};
use tabula::prelude::*;

#[derive(Debug, Clone)]
struct User {
    name: &'static str,
    role: &'static str,
}

impl TableRow for User {
    fn cell(&self, column: &Column) -> Element {
        match column.key.as_deref() {
            Some("name") => Element::text(self.name),
            Some("role") => Element::text(self.role),
            _ => Element::text(""),
        }
    }
}

fn users() -> Vec<User> {
    vec![
        User { name: "alice", role: "ops" },
        User { name: "bob", role: "dev" },
        User { name: "carol", role: "qa" },
        User { name: "dave", role: "dev" },
        User { name: "erin", role: "ops" },
    ]
}

fn columns() -> Vec<Column> {
    vec![Column::keyed("name", "Name"), Column::keyed("role", "Role")]
}

fn sticky(max_height: &str) -> TableOptions<User> {
    TableOptions::new()
        .use_sticky_header(true)
        .table_body_max_height(max_height)
}

fn viewport() -> Rect {
    Rect::new(0, 0, 80, 24)
}

/// Render, lay out and hand the geometry back, like one frame of the shell.
fn frame(table: &mut DataTable<User>) -> (Element, LayoutResult) {
    frame_in(table, viewport())
}

fn frame_in(table: &mut DataTable<User>, viewport: Rect) -> (Element, LayoutResult) {
    let root = table.view();
    let layout = layout(&root, viewport);
    table.did_render(&root, &layout);
    (root, layout)
}

fn table_of<'a>(root: &'a Element, id: &str) -> &'a celldom::TableContent {
    match find_element(root, id).map(|e| &e.content) {
        Some(Content::Table(table)) => table,
        other => panic!("{id} is not a table: {other:?}"),
    }
}

fn layout_changes(bus: &UiEventBus) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    bus.subscribe(Signal::LayoutChanged, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    count
}

#[test]
fn all_explicit_columns_never_use_resolved_widths() {
    let columns = vec![
        Column::keyed("name", "Name").width(Length::Cells(10)),
        Column::keyed("role", "Role").width(Length::Cells(6)),
    ];
    let mut table =
        DataTable::new("t", UiEventBus::new(), columns, users()).options(sticky("5"));

    frame(&mut table);
    assert!(table.resolved_widths().is_some());

    let root = table.view();
    let heading = table_of(&root, "t-heading-table");
    assert_eq!(heading.layout, TableLayout::Auto);
    assert_eq!(heading.head[0].width, Size::Fixed(10));
    assert_eq!(heading.head[1].width, Size::Fixed(6));
    assert_eq!(find_element(&root, "t-heading-table").and_then(|e| e.min_width), None);
}

#[test]
fn measured_widths_are_applied_to_both_fragments() {
    let mut table =
        DataTable::new("t", UiEventBus::new(), columns(), users()).options(sticky("5"));

    frame(&mut table);
    // "Name" header client 6 vs "alice" client 7; "Role" 6 vs "ops" 5
    assert_eq!(table.resolved_widths(), Some(&[7, 6][..]));
    assert_eq!(table.cell_insets(), &[3, 3]);

    let root = table.view();
    for id in ["t-heading-table", "t-content-table"] {
        assert_eq!(table_of(&root, id).layout, TableLayout::Fixed, "{id}");
    }
    let heading = table_of(&root, "t-heading-table");
    let content = table_of(&root, "t-content-table");
    assert_eq!(heading.head[0].width, Size::Fixed(7));
    assert_eq!(content.rows[0][0].width, Size::Fixed(7));
    assert_eq!(content.rows[4][1].width, Size::Fixed(6));

    let layout = layout(&root, viewport());
    let header_cell = layout.get("t-th-1").copied();
    let body_cell = layout.get("t-r0-c1").copied();
    assert_eq!(header_cell.map(|r| (r.x, r.width)), body_cell.map(|r| (r.x, r.width)));
}

#[test]
fn cached_widths_survive_content_changes() {
    let mut table =
        DataTable::new("t", UiEventBus::new(), columns(), users()).options(sticky("5"));
    frame(&mut table);
    assert_eq!(table.resolved_widths(), Some(&[7, 6][..]));

    table.set_rows(vec![User { name: "bartholomew", role: "operations" }]);
    assert!(table.set_columns(columns()));
    frame(&mut table);

    assert_eq!(table.resolved_widths(), Some(&[7, 6][..]));
    assert_eq!(table.width_cache().get("name"), Some(7));
}

#[test]
fn unkeyed_columns_are_measured_every_pass() {
    let unkeyed = || vec![Column::new("Name"), Column::new("Role")];
    let mut table = DataTable::new("t", UiEventBus::new(), unkeyed(), users())
        .options(sticky("5"))
        .row_renderer(DataRowList)
        .heading_renderer(HeadingRow);
    frame(&mut table);
    // Unkeyed columns render empty body cells, so the header decides
    assert_eq!(table.resolved_widths(), Some(&[6, 6][..]));
    assert!(table.width_cache().is_empty());

    let renamed = vec![Column::new("Full name"), Column::new("Role")];
    table.set_columns(renamed);
    frame(&mut table);
    assert_eq!(table.resolved_widths(), Some(&[11, 6][..]));
}

#[test]
fn selection_column_trims_first_width() {
    let mut table = DataTable::new("t", UiEventBus::new(), columns(), users())
        .options(sticky("5").is_row_selected(|u: &User| u.name == "alice"))
        .event_handlers(EventHandlers::new().on_row_select(|_| {}).on_row_deselect(|_| {}));
    assert!(table.has_selection_column());

    frame(&mut table);
    assert_eq!(table.resolved_widths(), Some(&[6, 6][..]));
    assert_eq!(table.width_cache().get("name"), Some(7));

    let root = table.view();
    let heading = table_of(&root, "t-heading-table");
    assert_eq!(heading.head.len(), 3);
    assert_eq!(heading.head[0].id, "t-th-select");
    assert_eq!(heading.head[1].width, Size::Fixed(6));
}

#[test]
fn selection_column_needs_all_three_hooks() {
    let partial = [
        (
            TableOptions::new().is_row_selected(|_: &User| true),
            EventHandlers::new().on_row_select(|_| {}),
        ),
        (
            TableOptions::new(),
            EventHandlers::new().on_row_select(|_| {}).on_row_deselect(|_| {}),
        ),
        (
            TableOptions::new().is_row_selected(|_: &User| true),
            EventHandlers::new().on_row_deselect(|_| {}),
        ),
    ];
    for (options, handlers) in partial {
        let table = DataTable::new("t", UiEventBus::new(), columns(), users())
            .options(options)
            .event_handlers(handlers);
        assert!(!table.has_selection_column());
        assert!(!table.toggle_row(0));
    }
}

#[test]
fn body_scroll_drives_header_but_not_the_reverse() {
    let bus = UiEventBus::new();
    let scrolls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&scrolls);
    bus.subscribe(Signal::ScrollChanged, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let mut table = DataTable::new("t", bus, columns(), users()).options(sticky("5"));
    table.on_body_scroll(5, 2);
    assert_eq!(table.header_scroll_x(), 5);
    assert_eq!(scrolls.load(Ordering::SeqCst), 1);

    table.scroll_header_to(9);
    assert_eq!(table.header_scroll_x(), 9);
    assert_eq!(table.body_scroll(), (5, 2));
    assert_eq!(scrolls.load(Ordering::SeqCst), 1);

    table.on_body_scroll(5, 3);
    let root = table.view();
    assert_eq!(find_element(&root, "t-header").map(|e| e.scroll_offset), Some((5, 0)));
    assert_eq!(find_element(&root, "t-body").map(|e| e.scroll_offset), Some((5, 3)));
}

#[test]
fn wheel_over_body_scrolls_within_bounds() {
    let mut table =
        DataTable::new("t", UiEventBus::new(), columns(), users()).options(sticky("2"));
    let (_, layout) = frame(&mut table);

    // Header on row 0, two visible body rows below it, five rows of content
    let down = Event::Scroll { x: 1, y: 1, delta_x: 0, delta_y: 10 };
    assert!(table.handle_event(&down, &layout));
    assert_eq!(table.body_scroll(), (0, 3));
    assert!(!table.handle_event(&down, &layout));

    let over_header = Event::Scroll { x: 1, y: 0, delta_x: 0, delta_y: -1 };
    assert!(!table.handle_event(&over_header, &layout));
    assert_eq!(table.body_scroll(), (0, 3));

    let up = Event::Scroll { x: 1, y: 2, delta_x: 0, delta_y: -1 };
    assert!(table.handle_event(&up, &layout));
    assert_eq!(table.body_scroll(), (0, 2));
}

#[test]
fn shrinking_rows_pulls_body_scroll_back() {
    let mut table =
        DataTable::new("t", UiEventBus::new(), columns(), users()).options(sticky("2"));
    let (_, layout) = frame(&mut table);

    let down = Event::Scroll { x: 1, y: 1, delta_x: 0, delta_y: 10 };
    assert!(table.handle_event(&down, &layout));
    assert_eq!(table.body_scroll(), (0, 3));

    table.set_rows(vec![User { name: "zed", role: "ops" }]);
    let (_, layout) = frame(&mut table);
    assert_eq!(layout.max_scroll("t-body"), Some((0, 0)));
    assert_eq!(table.body_scroll(), (0, 0));

    let root = table.view();
    assert_eq!(find_element(&root, "t-body").map(|e| e.scroll_offset), Some((0, 0)));
}

#[test]
fn horizontal_wheel_moves_header_with_body() {
    let bus = UiEventBus::new();
    let scrolls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&scrolls);
    bus.subscribe(Signal::ScrollChanged, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    // Narrower than either column, so the body overflows sideways
    let narrow = Rect::new(0, 0, 4, 24);
    let mut table = DataTable::new("t", bus, columns(), users()).options(sticky("3"));
    frame_in(&mut table, narrow);
    let (_, layout) = frame_in(&mut table, narrow);
    let (max_x, _) = layout.max_scroll("t-body").unwrap_or_default();
    assert!(max_x > 2, "body should overflow, max_x = {max_x}");

    let right = Event::Scroll { x: 1, y: 1, delta_x: 2, delta_y: 0 };
    assert!(table.handle_event(&right, &layout));
    assert_eq!(table.body_scroll(), (2, 0));
    assert_eq!(table.header_scroll_x(), 2);
    assert_eq!(scrolls.load(Ordering::SeqCst), 1);

    let far_right = Event::Scroll { x: 1, y: 1, delta_x: i16::MAX, delta_y: 0 };
    assert!(table.handle_event(&far_right, &layout));
    assert_eq!(table.body_scroll(), (max_x, 0));
    assert_eq!(table.header_scroll_x(), max_x);

    let root = table.view();
    assert_eq!(find_element(&root, "t-header").map(|e| e.scroll_offset), Some((max_x, 0)));

    // A wide enough terminal has nothing to scroll, header included
    frame(&mut table);
    assert_eq!(table.body_scroll(), (0, 0));
    assert_eq!(table.header_scroll_x(), 0);
}

#[test]
fn sticky_without_max_height_renders_plain() {
    let mut misconfigured = DataTable::new("t", UiEventBus::new(), columns(), users())
        .options(TableOptions::new().use_sticky_header(true));
    let mut plain = DataTable::new("t", UiEventBus::new(), columns(), users());

    assert_eq!(
        misconfigured.render_mode(),
        Err(TableError::StickyHeaderWithoutMaxHeight)
    );
    assert_eq!(misconfigured.view(), plain.view());
    assert_eq!(
        misconfigured.take_diagnostics(),
        vec![TableError::StickyHeaderWithoutMaxHeight]
    );
    assert!(plain.take_diagnostics().is_empty());
}

#[test]
fn unparseable_max_height_is_reported() {
    let mut table =
        DataTable::new("t", UiEventBus::new(), columns(), users()).options(sticky("tall"));
    let root = table.view();

    assert!(find_element(&root, "t-table").is_some());
    assert_eq!(
        table.diagnostics(),
        &[TableError::InvalidMaxHeight { value: "tall".into() }]
    );
}

#[test]
fn font_relative_max_height_falls_back_to_plain() {
    let mut table =
        DataTable::new("t", UiEventBus::new(), columns(), users()).options(sticky("20em"));
    assert_eq!(
        table.render_mode(),
        Err(TableError::InvalidMaxHeight { value: "20em".into() })
    );

    // Every render falls back, but the problem is recorded once
    for _ in 0..3 {
        let root = table.view();
        assert!(find_element(&root, "t-table").is_some());
        assert!(find_element(&root, "t-sticky").is_none());
    }
    assert_eq!(
        table.take_diagnostics(),
        vec![TableError::InvalidMaxHeight { value: "20em".into() }]
    );
}

#[test]
fn render_mode_follows_options() {
    let table = DataTable::new("t", UiEventBus::new(), columns(), users());
    assert_eq!(table.render_mode(), Ok(RenderMode::Plain));

    let table = table.options(sticky("40%"));
    assert_eq!(
        table.render_mode(),
        Ok(RenderMode::Sticky { max_height: Length::Percent(40) })
    );
}

#[test]
fn plain_mode_never_measures() {
    let bus = UiEventBus::new();
    let changes = layout_changes(&bus);
    let mut table = DataTable::new("t", bus, columns(), users());

    frame(&mut table);
    frame(&mut table);
    assert!(table.measure_pending());
    assert_eq!(table.resolved_widths(), None);
    assert_eq!(changes.load(Ordering::SeqCst), 0);
}

#[test]
fn column_replacement_triggers_exactly_one_pass() {
    let bus = UiEventBus::new();
    let changes = layout_changes(&bus);
    let columns: Arc<[Column]> = columns().into();
    let mut table =
        DataTable::new("t", bus, Arc::clone(&columns), users()).options(sticky("5"));

    frame(&mut table);
    assert_eq!(changes.load(Ordering::SeqCst), 1);

    assert!(!table.set_columns(Arc::clone(&columns)));
    assert!(table.resolved_widths().is_some());

    let same_content: Arc<[Column]> = columns.to_vec().into();
    assert!(table.set_columns(same_content));
    assert_eq!(table.resolved_widths(), None);
    assert!(table.measure_pending());

    // No geometry yet: nothing happens
    let root = table.view();
    assert!(!table.did_render(&root, &LayoutResult::new(viewport())));
    assert_eq!(changes.load(Ordering::SeqCst), 1);

    frame(&mut table);
    frame(&mut table);
    assert_eq!(changes.load(Ordering::SeqCst), 2);
    assert!(!table.measure_pending());
}

#[test]
fn min_width_counts_only_declared_widths() {
    // Columns without a declared width do not contribute to the minimum,
    // even though they have a resolved width by now.
    let columns = vec![
        Column::keyed("name", "Name").width(Length::Cells(12)),
        Column::keyed("role", "Role"),
    ];
    let mut table =
        DataTable::new("t", UiEventBus::new(), columns, users()).options(sticky("5"));
    frame(&mut table);
    assert_eq!(table.resolved_widths(), Some(&[14, 6][..]));

    let root = table.view();
    for id in ["t", "t-sticky", "t-heading-table", "t-content-table"] {
        assert_eq!(find_element(&root, id).and_then(|e| e.min_width), Some(12), "{id}");
    }
}

#[test]
fn toggle_row_dispatches_on_selection_state() {
    let selected = Arc::new(AtomicUsize::new(0));
    let deselected = Arc::new(AtomicUsize::new(0));
    let (s, d) = (Arc::clone(&selected), Arc::clone(&deselected));

    let mut table = DataTable::new("t", UiEventBus::new(), columns(), users())
        .options(sticky("5").is_row_selected(|u: &User| u.name == "alice"))
        .event_handlers(
            EventHandlers::new()
                .on_row_select(move |_| {
                    s.fetch_add(1, Ordering::SeqCst);
                })
                .on_row_deselect(move |_| {
                    d.fetch_add(1, Ordering::SeqCst);
                }),
        );

    assert!(table.toggle_row(0));
    assert_eq!(deselected.load(Ordering::SeqCst), 1);
    assert!(table.toggle_row(1));
    assert_eq!(selected.load(Ordering::SeqCst), 1);
    assert!(!table.toggle_row(99));

    // Clicking the selection cell of the second body row
    let (_, layout) = frame(&mut table);
    assert!(table.handle_event(&Event::Click { x: 1, y: 2 }, &layout));
    assert_eq!(selected.load(Ordering::SeqCst), 2);
}

#[test]
fn filtered_rows_replace_rows_in_the_body() {
    let mut table = DataTable::new("t", UiEventBus::new(), columns(), users())
        .filtered_rows(vec![User { name: "zed", role: "ops" }]);
    let root = table.view();

    assert_eq!(table_of(&root, "t-table").rows.len(), 1);
    assert_eq!(
        find_element(&root, "t-r0-c0-content").map(|e| &e.content),
        Some(&Content::Text("zed".into()))
    );
    assert_eq!(table.rows().len(), 5);
}

#[test]
fn header_shows_sort_direction() {
    let mut table = DataTable::new("t", UiEventBus::new(), columns(), users())
        .ui_state(UiState::sorted_by("role", false));
    let root = table.view();

    assert_eq!(
        find_element(&root, "t-th-1-content").map(|e| &e.content),
        Some(&Content::Text("Role ▼".into()))
    );
    assert_eq!(
        find_element(&root, "t-th-0-content").map(|e| &e.content),
        Some(&Content::Text("Name".into()))
    );
}
