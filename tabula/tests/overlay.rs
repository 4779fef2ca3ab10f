use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use celldom::element::find_element;
use celldom::{hit_test, layout, render_to_buffer, Buffer, Content, Element, Rect};
use tabula::overlay::RenderFn;
use tabula::prelude::*;

fn text(label: &'static str) -> RenderFn {
    Arc::new(move || Element::text(label))
}

fn boundary() -> OverlayBoundary {
    OverlayBoundary::new("app", OverlayStack::new(), UiEventBus::new())
}

fn page(_: &ViewContext) -> Element {
    Element::text("page content").id("page")
}

#[test]
fn overlays_keep_insertion_order() {
    let stack = OverlayStack::new();
    let a = stack.add_overlay(text("a"));
    let b = stack.add_overlay(text("b"));
    let c = stack.add_overlay(text("c"));

    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_ne!(a, c);
    assert_eq!(stack.ids(), vec![a, b, c]);

    stack.remove_overlay(b);
    assert_eq!(stack.ids(), vec![a, c]);

    stack.remove_overlay(b);
    assert_eq!(stack.ids(), vec![a, c]);
}

#[test]
fn layer_is_emitted_only_with_active_overlays() {
    let boundary = boundary();
    let root = boundary.view(page);
    assert!(find_element(&root, "app-content").is_some());
    assert!(find_element(&root, "app-layers").is_none());

    let id = boundary.stack().add_overlay(text("dialog"));
    let root = boundary.view(page);
    let wrapper = find_element(&root, "app-wrapper");
    assert!(wrapper.is_some_and(|w| !w.pointer_events));

    boundary.stack().remove_overlay(id);
    let root = boundary.view(page);
    assert!(find_element(&root, "app-layers").is_none());
}

#[test]
fn overlay_containers_are_keyed_by_position() {
    let boundary = boundary();
    let first = boundary.stack().add_overlay(text("first"));
    boundary.stack().add_overlay(text("second"));

    boundary.stack().remove_overlay(first);
    let root = boundary.view(page);

    let container = find_element(&root, "app-overlay-0");
    let label = container.and_then(|c| match &c.content {
        Content::Children(children) => children.first().map(|e| e.content.clone()),
        _ => None,
    });
    assert_eq!(label, Some(Content::Text("second".into())));
    assert!(find_element(&root, "app-overlay-1").is_none());
}

#[test]
fn later_overlays_paint_on_top_and_pass_clicks_through() {
    let boundary = boundary();
    boundary.stack().add_overlay(text("AAA"));
    boundary
        .stack()
        .add_overlay(Arc::new(|| Element::text("BB").id("top")));

    let root = boundary.view(page);
    let viewport = Rect::new(0, 0, 20, 3);
    let layout = layout(&root, viewport);
    let mut buf = Buffer::new(20, 3);
    render_to_buffer(&root, &layout, &mut buf);

    assert_eq!(buf.row_text(0).trim_end(), "BBAe content");
    assert_eq!(hit_test(&layout, &root, 0, 0), Some("top".to_string()));
    assert_eq!(hit_test(&layout, &root, 5, 0), Some("page".to_string()));
}

#[test]
fn content_reaches_the_stack_through_its_context() {
    let boundary = boundary();
    let mut opened = None;

    let root = boundary.view(|cx| {
        opened = Some(cx.add_overlay(|| Element::text("from content")));
        page(cx)
    });

    assert!(find_element(&root, "app-layers").is_some());
    assert!(boundary.stack().take_dirty());

    let cx = boundary.context();
    if let Some(id) = opened {
        cx.remove_overlay(id);
    }
    assert!(boundary.stack().is_empty());
    assert!(boundary.stack().is_dirty());
}

#[test]
fn context_shares_the_boundary_bus() {
    let bus = UiEventBus::new();
    let heard = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&heard);
    bus.subscribe(Signal::LayoutChanged, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let boundary = OverlayBoundary::new("app", OverlayStack::new(), bus);
    boundary.view(|cx| {
        cx.bus().publish(Signal::LayoutChanged);
        page(cx)
    });

    assert_eq!(heard.load(Ordering::SeqCst), 1);
}

fn open_and_close(host: &impl OverlayHost) {
    let id = host.add_overlay(text("transient"));
    host.remove_overlay(id);
}

#[test]
fn stack_and_context_are_both_hosts() {
    let boundary = boundary();
    open_and_close(boundary.stack());
    open_and_close(&boundary.context());
    assert!(boundary.stack().is_empty());
    assert!(boundary.stack().take_dirty());
}
