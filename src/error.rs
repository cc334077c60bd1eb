use std::fmt;

/// Why a query string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// Unbalanced parentheses, an empty field/operator/value token, or a
    /// fragment none of the pair shapes accept.
    MalformedQuery,
    /// A field identifier the catalog does not know.
    UnknownField,
    /// Group nesting exceeded [`ParseOptions::max_depth`](crate::ParseOptions).
    TooDeeplyNested,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParseErrorKind::MalformedQuery => "malformed query",
            ParseErrorKind::UnknownField => "unknown field",
            ParseErrorKind::TooDeeplyNested => "query nested too deeply",
        })
    }
}

/// A failed parse. Parsing is all-or-nothing, so the error is the only
/// result: no partial tree survives it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}: `{fragment}`")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    /// The substring the parser was looking at when it gave up.
    pub fragment: String,
    /// The complete query handed to the parser.
    pub query: String,
}

impl ParseError {
    pub(crate) fn new(
        kind: ParseErrorKind,
        message: impl Into<String>,
        fragment: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            fragment: fragment.into(),
            query: query.into(),
        }
    }

    pub fn is_malformed(&self) -> bool {
        self.kind == ParseErrorKind::MalformedQuery
    }
}
