use celldom::{Element, Position, Size};

use super::OverlayStack;
use crate::bus::UiEventBus;
use crate::context::ViewContext;

const CONTENT_LAYER: i16 = 1;
const OVERLAY_LAYER: i16 = 2;

/// Root of a view that can host overlays.
///
/// The boundary hands a [`ViewContext`] to the content it wraps and paints
/// the active overlays in a layer above that content.
#[derive(Debug, Clone)]
pub struct OverlayBoundary {
    id: String,
    stack: OverlayStack,
    bus: UiEventBus,
}

impl OverlayBoundary {
    pub fn new(id: impl Into<String>, stack: OverlayStack, bus: UiEventBus) -> Self {
        Self {
            id: id.into(),
            stack,
            bus,
        }
    }

    pub fn stack(&self) -> &OverlayStack {
        &self.stack
    }

    /// Context for content rendered inside this boundary.
    pub fn context(&self) -> ViewContext {
        ViewContext::new(self.stack.clone(), self.bus.clone())
    }

    /// Render `content` with access to the overlay stack, then the overlay
    /// layer on top when any overlay is active.
    pub fn view(&self, content: impl FnOnce(&ViewContext) -> Element) -> Element {
        let cx = self.context();
        let content = Element::box_()
            .id(format!("{}-content", self.id))
            .width(Size::Fill)
            .z_index(CONTENT_LAYER)
            .child(content(&cx));

        let root = Element::box_()
            .id(&self.id)
            .position(Position::Relative)
            .width(Size::Fill)
            .child(content);

        // Snapshot first: overlay content runs outside the stack lock
        let overlays = self.stack.snapshot();
        if overlays.is_empty() {
            return root;
        }

        let wrapper = Element::box_()
            .id(format!("{}-wrapper", self.id))
            .position(Position::Fixed)
            .width(Size::Fill)
            .height(Size::Fill)
            .pointer_events(false)
            .children(overlays.iter().enumerate().map(|(index, overlay)| {
                Element::box_()
                    .id(format!("{}-overlay-{index}", self.id))
                    .position(Position::Fixed)
                    .width(Size::Fill)
                    .height(Size::Fill)
                    .pointer_events(false)
                    .z_index(overlay_z(index))
                    .child(overlay.render())
            }));

        let layer = Element::box_()
            .id(format!("{}-layers", self.id))
            .z_index(OVERLAY_LAYER)
            .child(wrapper);

        root.child(layer)
    }
}

/// Paint order of the overlay at `index`, saturating so later overlays never
/// sort below earlier ones.
fn overlay_z(index: usize) -> i16 {
    i16::try_from(index).unwrap_or(i16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_z_saturates() {
        assert_eq!(overlay_z(0), 0);
        assert_eq!(overlay_z(7), 7);
        assert_eq!(overlay_z(32_767), i16::MAX);
        assert_eq!(overlay_z(40_000), i16::MAX);
    }
}
