//! Capabilities handed to content rendered inside an [`OverlayBoundary`].
//!
//! [`OverlayBoundary`]: crate::overlay::OverlayBoundary

use std::sync::Arc;

use celldom::Element;

use crate::bus::UiEventBus;
use crate::overlay::{OverlayHost, OverlayId, OverlayStack, RenderFn};

/// What a view may do beyond building elements: open and close overlays and
/// reach the UI event bus.
///
/// Passed down explicitly; cloning is cheap and clones share the same stack
/// and bus.
#[derive(Debug, Clone)]
pub struct ViewContext {
    overlays: OverlayStack,
    bus: UiEventBus,
}

impl ViewContext {
    pub fn new(overlays: OverlayStack, bus: UiEventBus) -> Self {
        Self { overlays, bus }
    }

    /// Open an overlay whose content is built by `render` on every pass.
    pub fn add_overlay(&self, render: impl Fn() -> Element + Send + Sync + 'static) -> OverlayId {
        OverlayHost::add_overlay(self, Arc::new(render))
    }

    /// Close an overlay. Unknown ids are ignored.
    pub fn remove_overlay(&self, id: OverlayId) {
        OverlayHost::remove_overlay(self, id);
    }

    pub fn overlays(&self) -> &OverlayStack {
        &self.overlays
    }

    pub fn bus(&self) -> &UiEventBus {
        &self.bus
    }
}

impl OverlayHost for ViewContext {
    fn add_overlay(&self, render: RenderFn) -> OverlayId {
        self.overlays.add_overlay(render)
    }

    fn remove_overlay(&self, id: OverlayId) {
        self.overlays.remove_overlay(id);
    }
}
