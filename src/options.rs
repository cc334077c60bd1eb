use serde::{Deserialize, Serialize};

/// Deepest group nesting the parser accepts by default. Queries built by the
/// search forms and facets stay in single digits.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Knobs for [`parse_query_with`](crate::parse_query_with).
///
/// Deserializes with defaults for missing keys so it can sit inside a host
/// application's own configuration:
///
/// ```
/// use imeji_syntax::ParseOptions;
///
/// let options: ParseOptions = serde_json::from_str(r#"{ "max_depth": 8 }"#).unwrap();
/// assert!(options.fulltext_fallback);
/// assert_eq!(options.max_depth, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Free text expands to `(all=text OR fulltext=text)` when set, and to
    /// the single pair `all=text` otherwise.
    pub fulltext_fallback: bool,
    /// Maximum group nesting; deeper input fails with
    /// [`ParseErrorKind::TooDeeplyNested`](crate::ParseErrorKind).
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            fulltext_fallback: true,
            max_depth: MAX_NESTING_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn without_fulltext(mut self) -> Self {
        self.fulltext_fallback = false;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
