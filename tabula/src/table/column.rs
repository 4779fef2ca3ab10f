use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use celldom::Size;
use regex::Regex;

use crate::error::TableError;

static LENGTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\s*(px|ch|%)?\s*$").expect("length pattern is valid")
});

/// A sizing directive written the way stylesheets write them.
///
/// Terminal cells are the only absolute unit, so `px` and `ch` are accepted
/// as synonyms for a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    Cells(u16),
    Percent(u16),
}

impl Length {
    pub fn to_size(self) -> Size {
        match self {
            Length::Cells(n) => Size::Fixed(n),
            Length::Percent(p) => Size::Percent(p),
        }
    }
}

impl FromStr for Length {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TableError::InvalidLength {
            input: s.to_string(),
        };
        let caps = LENGTH_RE.captures(s).ok_or_else(invalid)?;
        let value: u16 = caps[1].parse().map_err(|_| invalid())?;
        match caps.get(2).map(|m| m.as_str()) {
            Some("%") => Ok(Length::Percent(value)),
            _ => Ok(Length::Cells(value)),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Cells(n) => write!(f, "{n}"),
            Length::Percent(p) => write!(f, "{p}%"),
        }
    }
}

/// Sum of the absolute widths among `widths`. Missing and percentage widths
/// contribute nothing.
pub fn combine_widths<'a>(widths: impl IntoIterator<Item = Option<&'a Length>>) -> u16 {
    widths
        .into_iter()
        .flatten()
        .map(|length| match length {
            Length::Cells(n) => *n,
            Length::Percent(_) => 0,
        })
        .fold(0u16, u16::saturating_add)
}

/// A table column definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Stable identifier. Only keyed columns have their width cached.
    pub key: Option<String>,
    /// Header text.
    pub name: String,
    /// Explicit width, or `None` to size from content.
    pub width: Option<Length>,
    /// Free-form data for row renderers.
    pub meta: HashMap<String, String>,
}

impl Column {
    /// Create an unkeyed column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            key: None,
            name: name.into(),
            width: None,
            meta: HashMap::new(),
        }
    }

    /// Create a keyed column.
    pub fn keyed(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::new(name)
        }
    }

    pub fn width(mut self, width: Length) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the width from a length string such as `"12"` or `"25%"`.
    pub fn try_width(self, width: &str) -> Result<Self, TableError> {
        Ok(self.width(width.parse()?))
    }

    pub fn meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    pub fn has_explicit_width(&self) -> bool {
        self.width.is_some()
    }
}
