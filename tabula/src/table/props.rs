use std::fmt;
use std::sync::Arc;

use super::column::Column;
use super::options::{has_selection_hooks, EventHandlers, TableOptions};

/// A bulk action offered for the table's rows.
pub struct Action<R> {
    pub label: String,
    pub handler: Arc<dyn Fn(&[R]) + Send + Sync>,
}

impl<R> Action<R> {
    pub fn new(label: impl Into<String>, handler: impl Fn(&[R]) + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            handler: Arc::new(handler),
        }
    }
}

impl<R> Clone for Action<R> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<R> fmt::Debug for Action<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("label", &self.label).finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub column: String,
    pub ascending: bool,
}

/// Presentation state owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub sort: Option<Sort>,
}

impl UiState {
    pub fn sorted_by(column: impl Into<String>, ascending: bool) -> Self {
        Self {
            sort: Some(Sort {
                column: column.into(),
                ascending,
            }),
        }
    }
}

/// Everything a heading or row renderer gets to see.
pub struct TableProps<'a, R> {
    /// Prefix for element ids, unique per table.
    pub id: &'a str,
    pub options: &'a TableOptions<R>,
    pub rows: &'a [R],
    pub filtered_rows: &'a [R],
    pub actions: &'a [Action<R>],
    pub event_handlers: &'a EventHandlers<R>,
    pub ui_state: &'a UiState,
    /// Columns with their effective widths already applied.
    pub columns: &'a [Column],
}

impl<R> TableProps<'_, R> {
    pub fn has_selection_column(&self) -> bool {
        has_selection_hooks(self.options, self.event_handlers)
    }

    pub fn is_selected(&self, row: &R) -> bool {
        self.options
            .is_row_selected
            .as_ref()
            .is_some_and(|predicate| predicate(row))
    }
}
