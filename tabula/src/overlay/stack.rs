use std::sync::{Arc, RwLock};

use super::{Overlay, OverlayHost, OverlayId, RenderFn};

#[derive(Default)]
struct StackInner {
    overlays: Vec<Overlay>,
    dirty: bool,
}

/// Ordered collection of active overlays.
///
/// Cheap to clone; clones share the same stack. Every change marks the stack
/// dirty so the shell knows to render again.
#[derive(Clone, Default)]
pub struct OverlayStack {
    inner: Arc<RwLock<StackInner>>,
}

impl OverlayStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of the active overlays, bottom to top.
    pub fn ids(&self) -> Vec<OverlayId> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.overlays.iter().map(Overlay::id).collect()
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the active overlays, bottom to top. Rendering works from a
    /// snapshot so overlay content never runs under the lock.
    pub fn snapshot(&self) -> Vec<Overlay> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.overlays.clone()
    }

    /// Whether the stack changed since the last [`take_dirty`](Self::take_dirty).
    pub fn is_dirty(&self) -> bool {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.dirty
    }

    /// Clear the dirty flag, returning its previous value.
    pub fn take_dirty(&self) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut inner.dirty)
    }
}

impl OverlayHost for OverlayStack {
    fn add_overlay(&self, render: RenderFn) -> OverlayId {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());

        let mut id = OverlayId::new_v4();
        while inner.overlays.iter().any(|o| o.id == id) {
            id = OverlayId::new_v4();
        }

        inner.overlays.push(Overlay { id, render });
        inner.dirty = true;
        log::debug!("overlay {id} added ({} active)", inner.overlays.len());
        id
    }

    fn remove_overlay(&self, id: OverlayId) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let Some(index) = inner.overlays.iter().position(|o| o.id == id) else {
            log::trace!("overlay {id} not active, nothing to remove");
            return;
        };

        inner.overlays.remove(index);
        inner.dirty = true;
        log::debug!("overlay {id} removed ({} active)", inner.overlays.len());
    }
}

impl std::fmt::Debug for OverlayStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayStack")
            .field("overlays", &self.ids())
            .field("dirty", &self.is_dirty())
            .finish()
    }
}
