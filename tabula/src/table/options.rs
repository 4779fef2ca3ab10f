use std::fmt;
use std::sync::Arc;

/// Decides whether a row is currently selected.
pub type RowPredicate<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

/// Called with the row a user acted on.
pub type RowCallback<R> = Arc<dyn Fn(&R) + Send + Sync>;

/// Table configuration.
pub struct TableOptions<R> {
    /// Pin the header above a separately scrolling body.
    pub use_sticky_header: bool,
    /// Bound for the scrolling body, as a length string (`"20"`, `"60%"`).
    /// Required when `use_sticky_header` is set.
    pub table_body_max_height: Option<String>,
    /// Selection state lookup. One of the three hooks that together enable
    /// the selection column.
    pub is_row_selected: Option<RowPredicate<R>>,
}

impl<R> Default for TableOptions<R> {
    fn default() -> Self {
        Self {
            use_sticky_header: false,
            table_body_max_height: None,
            is_row_selected: None,
        }
    }
}

impl<R> Clone for TableOptions<R> {
    fn clone(&self) -> Self {
        Self {
            use_sticky_header: self.use_sticky_header,
            table_body_max_height: self.table_body_max_height.clone(),
            is_row_selected: self.is_row_selected.clone(),
        }
    }
}

impl<R> TableOptions<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn use_sticky_header(mut self, enabled: bool) -> Self {
        self.use_sticky_header = enabled;
        self
    }

    pub fn table_body_max_height(mut self, height: impl Into<String>) -> Self {
        self.table_body_max_height = Some(height.into());
        self
    }

    pub fn is_row_selected(mut self, predicate: impl Fn(&R) -> bool + Send + Sync + 'static) -> Self {
        self.is_row_selected = Some(Arc::new(predicate));
        self
    }
}

impl<R> fmt::Debug for TableOptions<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableOptions")
            .field("use_sticky_header", &self.use_sticky_header)
            .field("table_body_max_height", &self.table_body_max_height)
            .field("is_row_selected", &self.is_row_selected.is_some())
            .finish()
    }
}

/// Callbacks for row interaction.
pub struct EventHandlers<R> {
    pub on_row_select: Option<RowCallback<R>>,
    pub on_row_deselect: Option<RowCallback<R>>,
}

impl<R> Default for EventHandlers<R> {
    fn default() -> Self {
        Self {
            on_row_select: None,
            on_row_deselect: None,
        }
    }
}

impl<R> Clone for EventHandlers<R> {
    fn clone(&self) -> Self {
        Self {
            on_row_select: self.on_row_select.clone(),
            on_row_deselect: self.on_row_deselect.clone(),
        }
    }
}

impl<R> EventHandlers<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_row_select(mut self, handler: impl Fn(&R) + Send + Sync + 'static) -> Self {
        self.on_row_select = Some(Arc::new(handler));
        self
    }

    pub fn on_row_deselect(mut self, handler: impl Fn(&R) + Send + Sync + 'static) -> Self {
        self.on_row_deselect = Some(Arc::new(handler));
        self
    }
}

impl<R> fmt::Debug for EventHandlers<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandlers")
            .field("on_row_select", &self.on_row_select.is_some())
            .field("on_row_deselect", &self.on_row_deselect.is_some())
            .finish()
    }
}

/// The selection column exists only when all three hooks are present.
pub(crate) fn has_selection_hooks<R>(options: &TableOptions<R>, handlers: &EventHandlers<R>) -> bool {
    options.is_row_selected.is_some()
        && handlers.on_row_select.is_some()
        && handlers.on_row_deselect.is_some()
}
