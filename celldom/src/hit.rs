use crate::element::{Content, Element};
use crate::layout::LayoutResult;
use crate::types::Position;

/// Find the topmost element at the given screen coordinates that accepts
/// pointer input.
///
/// Children are tested in reverse paint order. Elements with
/// `pointer_events` disabled are transparent, but their children are not.
pub fn hit_test(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    hit_test_element(layout, root, i32::from(x), i32::from(y), (0, 0))
}

fn hit_test_element(
    layout: &LayoutResult,
    element: &Element,
    x: i32,
    y: i32,
    offset: (i32, i32),
) -> Option<String> {
    let rect = layout.get(&element.id)?;
    let offset = if element.position == Position::Fixed {
        (0, 0)
    } else {
        offset
    };

    let left = i32::from(rect.x) - offset.0;
    let top = i32::from(rect.y) - offset.1;
    let inside = x >= left
        && x < left + i32::from(rect.width)
        && y >= top
        && y < top + i32::from(rect.height);

    let child_offset = (
        offset.0 + i32::from(element.scroll_offset.0),
        offset.1 + i32::from(element.scroll_offset.1),
    );

    match &element.content {
        Content::Children(children) => {
            for child in paint_order(children).into_iter().rev() {
                // Scroll containers clip their children to their own box
                if element.is_scroll_container() && !inside && child.position != Position::Fixed {
                    continue;
                }
                if let Some(id) = hit_test_element(layout, child, x, y, child_offset) {
                    return Some(id);
                }
            }
        }
        Content::Table(table) if inside => {
            for cell in table.cells() {
                if let Some(id) = hit_test_element(layout, cell, x, y, child_offset) {
                    return Some(id);
                }
            }
        }
        _ => {}
    }

    (inside && element.pointer_events).then(|| element.id.clone())
}

/// Children sorted by z-index; equal z-indices keep tree order.
pub(crate) fn paint_order(children: &[Element]) -> Vec<&Element> {
    let mut ordered: Vec<&Element> = children.iter().collect();
    ordered.sort_by_key(|c| c.z_index);
    ordered
}
