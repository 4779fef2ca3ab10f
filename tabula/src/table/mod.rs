//! Data table with an optional sticky header.
//!
//! The sticky layout renders the header and the body as two separate tables
//! so the header can stay put while the body scrolls. [`DataTable`] keeps
//! the two in step: it measures both after they are laid out, resolves one
//! width per column, and copies the body's horizontal scroll onto the header.

mod cache;
mod column;
mod engine;
mod measure;
mod options;
mod props;
mod render;
mod widths;

pub use cache::WidthCache;
pub use column::{combine_widths, Column, Length};
pub use engine::{DataTable, RenderMode};
pub use measure::{measure_pass, Measurement};
pub use options::{EventHandlers, RowCallback, RowPredicate, TableOptions};
pub use props::{Action, Sort, TableProps, UiState};
pub use render::{DataRowList, HeadingRenderer, HeadingRow, RowRenderer, TableRow};
pub use widths::{apply_widths, AppliedColumns};
