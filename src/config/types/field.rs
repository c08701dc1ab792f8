//! Config field path used in diagnostics.

use crate::logger::paint;
use owo_colors::{Stream, Style};
use std::fmt;

/// Dotted path of a config field, e.g. `render.measure_size`.
///
/// # Example
///
/// ```ignore
/// diag.error(RenderConfig::MEASURE_SIZE, "must be at least 64");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted = format!("`{}`", self.0);
        write!(f, "{}", paint(Stream::Stderr, quoted, Style::new().bright_blue()))
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        self.0
    }
}
