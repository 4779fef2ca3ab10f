mod flow;
mod rect;
mod table;

use std::collections::HashMap;

pub use flow::layout;
pub use rect::Rect;

/// Geometry produced by a layout pass, keyed by element id.
///
/// Positions are document coordinates: scroll offsets are not applied here,
/// the renderer and hit tester translate children of scroll containers.
#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    viewport: Rect,
    rects: HashMap<String, Rect>,
    content_sizes: HashMap<String, (u16, u16)>,
    viewport_sizes: HashMap<String, (u16, u16)>,
}

impl LayoutResult {
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn get(&self, id: &str) -> Option<&Rect> {
        self.rects.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rects.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Size of everything inside the element's content box.
    pub fn content_size(&self, id: &str) -> Option<(u16, u16)> {
        self.content_sizes.get(id).copied()
    }

    /// Size of the element's content box (rect minus padding and border).
    pub fn viewport_size(&self, id: &str) -> Option<(u16, u16)> {
        self.viewport_sizes.get(id).copied()
    }

    /// Largest scroll offset that still keeps content in view.
    pub fn max_scroll(&self, id: &str) -> Option<(u16, u16)> {
        let (content_w, content_h) = self.content_size(id)?;
        let (view_w, view_h) = self.viewport_size(id)?;
        Some((
            content_w.saturating_sub(view_w),
            content_h.saturating_sub(view_h),
        ))
    }

    pub(crate) fn insert(&mut self, id: &str, rect: Rect) {
        self.rects.insert(id.to_string(), rect);
    }

    pub(crate) fn set_sizes(&mut self, id: &str, content: (u16, u16), viewport: (u16, u16)) {
        self.content_sizes.insert(id.to_string(), content);
        self.viewport_sizes.insert(id.to_string(), viewport);
    }
}
