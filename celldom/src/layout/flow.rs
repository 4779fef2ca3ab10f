use super::table::{layout_table, measure_table};
use super::{LayoutResult, Rect};
use crate::element::{Content, Element};
use crate::text::text_extent;
use crate::types::{Direction, Position, Size};

pub fn layout(root: &Element, viewport: Rect) -> LayoutResult {
    let mut result = LayoutResult::new(viewport);
    layout_element(root, viewport, &mut result);
    result
}

/// Size an element within `available` and place it at its origin.
fn layout_element(element: &Element, available: Rect, result: &mut LayoutResult) {
    let available = if element.position == Position::Fixed {
        result.viewport()
    } else {
        available
    };
    let (width, height) = outer_size(element, available.width, available.height);
    place(element, Rect::new(available.x, available.y, width, height), result);
}

/// Place an element at an already decided rect and lay out its content.
pub(super) fn place(element: &Element, rect: Rect, result: &mut LayoutResult) {
    result.insert(&element.id, rect);
    let inner = rect.shrink(element.insets());

    let content = match &element.content {
        Content::Children(children) => layout_children(element, children, inner, result),
        Content::Table(table) => layout_table(element, table, inner, result),
        Content::Text(text) => {
            let (w, h) = text_extent(text);
            (clamp(w), clamp(h))
        }
        Content::None => (0, 0),
    };

    result.set_sizes(&element.id, content, (inner.width, inner.height));
}

/// Outer size of an element given the space its parent offers.
pub(super) fn outer_size(element: &Element, avail_w: u16, avail_h: u16) -> (u16, u16) {
    let insets = element.insets();

    let needs_content = element.width.resolve(avail_w).is_none()
        || element.height.resolve(avail_h).is_none();
    let (content_w, content_h) = if needs_content {
        content_size(
            element,
            avail_w.saturating_sub(insets.horizontal_total()),
            avail_h.saturating_sub(insets.vertical_total()),
        )
    } else {
        (0, 0)
    };

    let width = element
        .width
        .resolve(avail_w)
        .unwrap_or_else(|| content_w.saturating_add(insets.horizontal_total()));
    let width = width.max(element.min_width.unwrap_or(0));

    let height = element
        .height
        .resolve(avail_h)
        .unwrap_or_else(|| content_h.saturating_add(insets.vertical_total()));
    let height = match element.max_height.and_then(|max| max.resolve(avail_h)) {
        Some(max) => height.min(max),
        None => height,
    };

    (width, height)
}

/// Intrinsic size of an element's content box.
pub(super) fn content_size(element: &Element, avail_w: u16, avail_h: u16) -> (u16, u16) {
    match &element.content {
        Content::None => (0, 0),
        Content::Text(text) => {
            let (w, h) = text_extent(text);
            (clamp(w), clamp(h))
        }
        Content::Table(table) => {
            let min_total = table_min_total(element);
            measure_table(table, min_total, avail_w).size()
        }
        Content::Children(children) => {
            let is_row = element.direction == Direction::Row;
            children
                .iter()
                .filter(|c| c.position != Position::Fixed)
                .map(|c| outer_size(c, avail_w, avail_h))
                .fold((0u16, 0u16), |(w, h), (cw, ch)| {
                    if is_row {
                        (w.saturating_add(cw), h.max(ch))
                    } else {
                        (w.max(cw), h.saturating_add(ch))
                    }
                })
        }
    }
}

/// Minimum width of a table's column sum, derived from the element's min width.
pub(super) fn table_min_total(element: &Element) -> Option<u16> {
    element
        .min_width
        .map(|min| min.saturating_sub(element.insets().horizontal_total()))
}

fn layout_children(
    element: &Element,
    children: &[Element],
    inner: Rect,
    result: &mut LayoutResult,
) -> (u16, u16) {
    let is_row = element.direction == Direction::Row;
    let flow: Vec<&Element> = children
        .iter()
        .filter(|c| c.position != Position::Fixed)
        .collect();

    // First pass: size non-fill children, count fill children on the main axis
    let mut sizes: Vec<(u16, u16)> = Vec::with_capacity(flow.len());
    let mut used = 0u16;
    let mut fill_count = 0u16;
    for child in &flow {
        let size = outer_size(child, inner.width, inner.height);
        let main_is_fill = if is_row {
            child.width == Size::Fill
        } else {
            child.height == Size::Fill
        };
        if main_is_fill {
            fill_count += 1;
        } else {
            used = used.saturating_add(if is_row { size.0 } else { size.1 });
        }
        sizes.push(size);
    }

    let main_total = if is_row { inner.width } else { inner.height };
    let fill_each = main_total
        .saturating_sub(used)
        .checked_div(fill_count)
        .unwrap_or(0);

    // Second pass: place flow children one after another
    let mut cursor = if is_row { inner.x } else { inner.y };
    let mut extent = (0u16, 0u16);
    for (child, (mut w, mut h)) in flow.iter().zip(sizes) {
        if is_row && child.width == Size::Fill {
            w = fill_each;
        } else if !is_row && child.height == Size::Fill {
            h = fill_each;
            if let Some(max) = child.max_height.and_then(|m| m.resolve(inner.height)) {
                h = h.min(max);
            }
        }

        let rect = if is_row {
            Rect::new(cursor, inner.y, w, h)
        } else {
            Rect::new(inner.x, cursor, w, h)
        };
        place(child, rect, result);

        cursor = cursor.saturating_add(if is_row { w } else { h });
        extent.0 = extent.0.max(rect.right() - inner.x);
        extent.1 = extent.1.max(rect.bottom() - inner.y);
    }

    // Fixed children sit against the viewport and do not take part in flow
    for child in children.iter().filter(|c| c.position == Position::Fixed) {
        layout_element(child, result.viewport(), result);
    }

    extent
}

fn clamp(n: usize) -> u16 {
    n.min(u16::MAX as usize) as u16
}
