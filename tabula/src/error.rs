//! Error types surfaced by table configuration.

use thiserror::Error;

/// Configuration problems. None of these abort rendering: the table reports
/// them as diagnostics and degrades to the plain layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Sticky header requested without a bound for the scrolling body.
    #[error(
        "\"use_sticky_header\" is enabled but no \"table_body_max_height\" is set; \
         set a length such as \"20\" or \"40%\" to use a sticky header"
    )]
    StickyHeaderWithoutMaxHeight,

    /// Sticky header requested with a body bound that is not a length.
    #[error(
        "\"use_sticky_header\" is enabled but \"table_body_max_height\" ({value:?}) is not a length"
    )]
    InvalidMaxHeight { value: String },

    /// A length string could not be parsed.
    #[error("invalid length {input:?}: expected cells (\"12\", \"12px\", \"12ch\") or a percentage (\"40%\")")]
    InvalidLength { input: String },
}
