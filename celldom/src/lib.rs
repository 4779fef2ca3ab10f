pub mod buffer;
pub mod element;
pub mod event;
pub mod hit;
pub mod layout;
pub mod measure;
pub mod render;
pub mod terminal;
pub mod text;
pub mod types;

pub use buffer::{Buffer, Cell};
pub use element::{Content, Element, TableContent};
pub use event::{Event, Key, Modifiers};
pub use hit::hit_test;
pub use layout::{layout, LayoutResult, Rect};
pub use measure::{cell_boxes, CellBox, Section};
pub use render::render_to_buffer;
pub use terminal::Terminal;
pub use types::*;
