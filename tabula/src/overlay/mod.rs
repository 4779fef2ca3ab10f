//! Overlay stacking for transient surfaces such as dialogs and popups.
//!
//! Overlays paint above the regular content in the order they were added,
//! the most recent one on top. They live until they are removed explicitly.
//!
//! # Usage
//!
//! ```ignore
//! let boundary = OverlayBoundary::new("app", OverlayStack::new(), bus.clone());
//!
//! let root = boundary.view(|cx| {
//!     let id = cx.add_overlay(|| Element::text("Saved"));
//!     // later: cx.remove_overlay(id);
//!     Element::text("content")
//! });
//! ```

mod boundary;
mod stack;

pub use boundary::OverlayBoundary;
pub use stack::OverlayStack;

use std::fmt;
use std::sync::Arc;

use celldom::Element;
use uuid::Uuid;

/// Identifies an active overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(Uuid);

impl OverlayId {
    pub(crate) fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Builds an overlay's content. Called once per render pass.
pub type RenderFn = Arc<dyn Fn() -> Element + Send + Sync>;

/// An active overlay.
#[derive(Clone)]
pub struct Overlay {
    id: OverlayId,
    render: RenderFn,
}

impl Overlay {
    pub fn id(&self) -> OverlayId {
        self.id
    }

    pub fn render(&self) -> Element {
        (self.render)()
    }
}

impl fmt::Debug for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overlay").field("id", &self.id).finish_non_exhaustive()
    }
}

/// Adding and removing overlays.
///
/// Implemented by the overlay stack itself and by [`ViewContext`], which is
/// what content under an [`OverlayBoundary`] receives.
///
/// [`ViewContext`]: crate::ViewContext
pub trait OverlayHost {
    /// Push an overlay on top of the stack and return its id.
    fn add_overlay(&self, render: RenderFn) -> OverlayId;

    /// Remove the overlay with `id`. Unknown ids are ignored.
    fn remove_overlay(&self, id: OverlayId);
}
