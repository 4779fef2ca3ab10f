//! Sticky-header data tables and overlay stacking for `celldom` terminal UIs.

pub mod bus;
pub mod context;
pub mod error;
pub mod overlay;
pub mod table;

pub use bus::{Signal, SubscriptionId, UiEventBus};
pub use context::ViewContext;
pub use error::TableError;

pub mod prelude {
    pub use crate::bus::{Signal, SubscriptionId, UiEventBus};
    pub use crate::context::ViewContext;
    pub use crate::error::TableError;
    pub use crate::overlay::{Overlay, OverlayBoundary, OverlayHost, OverlayId, OverlayStack};
    pub use crate::table::{
        Action, Column, DataRowList, DataTable, EventHandlers, HeadingRenderer, HeadingRow,
        Length, RenderMode, RowRenderer, Sort, TableOptions, TableProps, TableRow, UiState,
        WidthCache,
    };
}
