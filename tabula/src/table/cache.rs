use std::collections::HashMap;

/// Widths measured for keyed columns, kept for the lifetime of a table.
///
/// Entries are never refreshed: once a key has a width, later measurement
/// passes reuse it even if the content has grown or shrunk. This keeps
/// columns from jumping around as rows change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidthCache {
    widths: HashMap<String, u16>,
}

impl WidthCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<u16> {
        self.widths.get(key).copied()
    }

    pub fn insert(&mut self, key: impl Into<String>, width: u16) {
        self.widths.insert(key.into(), width);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.widths.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}
