mod content;
mod node;

pub use content::{Content, TableContent};
pub use node::Element;

/// Find an element by ID in the tree, descending into table cells.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    match &root.content {
        Content::Children(children) => children.iter().find_map(|c| find_element(c, id)),
        Content::Table(table) => table.cells().find_map(|c| find_element(c, id)),
        Content::None | Content::Text(_) => None,
    }
}
