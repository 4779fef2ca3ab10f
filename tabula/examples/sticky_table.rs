use std::collections::HashSet;
use std::fs::File;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use celldom::{Color, Edges, Element, Event, Key, Style, Terminal};
use simplelog::{Config, LevelFilter, WriteLogger};
use tabula::prelude::*;

#[derive(Debug, Clone)]
struct Host {
    name: String,
    region: &'static str,
    cpu: u8,
    status: &'static str,
}

impl TableRow for Host {
    fn cell(&self, column: &Column) -> Element {
        match column.key.as_deref() {
            Some("name") => Element::text(&self.name),
            Some("region") => Element::text(self.region),
            Some("cpu") => Element::text(format!("{:>3}%", self.cpu)),
            Some("status") => {
                let color = if self.status == "up" { Color::Green } else { Color::Red };
                Element::text(self.status).style(Style::new().foreground(color))
            }
            Some("notes") => Element::text(column.meta.get("placeholder").map_or("", String::as_str)),
            _ => Element::text(""),
        }
    }
}

fn hosts() -> Vec<Host> {
    let regions = ["eu-west", "us-east", "ap-south"];
    (0..40)
        .map(|i| Host {
            name: format!("node-{i:02}.cluster.internal"),
            region: regions[i % regions.len()],
            cpu: ((i * 37) % 100) as u8,
            status: if i % 7 == 3 { "down" } else { "up" },
        })
        .collect()
}

fn wide_columns() -> Vec<Column> {
    vec![
        Column::keyed("name", "Host"),
        Column::keyed("region", "Region"),
        Column::keyed("cpu", "CPU").width(Length::Cells(6)),
        Column::keyed("status", "Status"),
        Column::keyed("notes", "Notes").meta("placeholder", "no maintenance window scheduled"),
    ]
}

fn narrow_columns() -> Vec<Column> {
    vec![Column::keyed("name", "Host"), Column::keyed("status", "Status")]
}

fn dialog(n: usize) -> Element {
    let offset = u16::try_from(n).unwrap_or(0).min(8);
    Element::box_()
        .padding(Edges::new(3 + offset, 0, 0, 6 + offset * 2))
        .pointer_events(false)
        .child(
            Element::box_()
                .border(Edges::all(1))
                .padding(Edges::horizontal(1))
                .style(Style::new().background(Color::Blue))
                .child(Element::text(format!("Overlay #{n}\n'x' closes the top one"))),
        )
}

fn main() -> std::io::Result<()> {
    let log_file = File::create("sticky_table.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let bus = UiEventBus::new();
    let relayout = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&relayout);
    bus.subscribe(Signal::LayoutChanged, move |_| flag.store(true, Ordering::SeqCst));

    let selected: Arc<RwLock<HashSet<String>>> = Arc::default();
    let (is_selected, select, deselect) = (selected.clone(), selected.clone(), selected);

    let mut table = DataTable::new("hosts", bus.clone(), wide_columns(), hosts())
        .options(
            TableOptions::new()
                .use_sticky_header(true)
                .table_body_max_height("60%")
                .is_row_selected(move |h: &Host| {
                    is_selected.read().is_ok_and(|s| s.contains(&h.name))
                }),
        )
        .event_handlers(
            EventHandlers::new()
                .on_row_select(move |h: &Host| {
                    if let Ok(mut s) = select.write() {
                        s.insert(h.name.clone());
                    }
                })
                .on_row_deselect(move |h: &Host| {
                    if let Ok(mut s) = deselect.write() {
                        s.remove(&h.name);
                    }
                }),
        );

    let boundary = OverlayBoundary::new("app", OverlayStack::new(), bus);
    let mut term = Terminal::new()?;
    let mut narrow = false;
    let mut opened = 0;

    loop {
        let root = boundary.view(|_| table.view());
        let layout = term.render(&root)?.clone();
        table.did_render(&root, &layout);

        // Widths or overlays changed: draw again before waiting for input
        let layout_changed = relayout.swap(false, Ordering::SeqCst);
        if boundary.stack().take_dirty() || layout_changed {
            continue;
        }

        for event in term.poll(Duration::from_millis(250))? {
            if table.handle_event(&event, &layout) {
                continue;
            }

            let Event::Key { key, modifiers } = event else {
                continue;
            };
            if modifiers.ctrl && key == Key::Char('c') {
                return Ok(());
            }
            if !modifiers.none() {
                continue;
            }
            match key {
                Key::Char('q') | Key::Escape => return Ok(()),
                Key::Char('o') => {
                    opened += 1;
                    let n = opened;
                    boundary.context().add_overlay(move || dialog(n));
                }
                Key::Char('x') => {
                    if let Some(id) = boundary.stack().ids().last().copied() {
                        boundary.stack().remove_overlay(id);
                    }
                }
                Key::Char('c') => {
                    narrow = !narrow;
                    table.set_columns(if narrow { narrow_columns() } else { wide_columns() });
                }
                Key::Char(d @ '1'..='9') => {
                    let index = d as usize - '1' as usize;
                    table.toggle_row(index + usize::from(table.body_scroll().1));
                }
                Key::Up => {
                    table.scroll_body_by(0, -1, &layout);
                }
                Key::Down => {
                    table.scroll_body_by(0, 1, &layout);
                }
                Key::PageUp => {
                    table.scroll_body_by(0, -10, &layout);
                }
                Key::PageDown => {
                    table.scroll_body_by(0, 10, &layout);
                }
                Key::Left => {
                    table.scroll_body_by(-4, 0, &layout);
                }
                Key::Right => {
                    table.scroll_body_by(4, 0, &layout);
                }
                _ => {}
            }
        }
    }
}
