//! Turns one flat, bracket-free fragment into a leaf element.
//!
//! Shapes are tried in a fixed order: item metadata (`md.x.y=v`), collection
//! metadata (`collection.md.x=v`), technical (`technical[x]=v`), field
//! (`title=v`). Anything else is free text. Values and free text lose their
//! escaping backslashes here.

use crate::{
    builder::QueryBuilder,
    catalog::{FieldCatalog, SearchField},
    error::{ParseError, ParseErrorKind},
    escape::unescape,
    model::{CollectionMetadataPair, Element, MetadataPair, Operator, Pair, TechnicalPair},
    options::ParseOptions,
};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

// Only the first two path segments are used; `md.a.text.x=1` reads as `md.a.text=1`.
static METADATA_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^md\.([a-zA-Z0-9:_.-]+)([=<>]{1,2})(.+)$").expect("metadata pattern")
});

static COLLECTION_METADATA_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(collection\.md\.[a-zA-Z0-9:_.-]+)([=<>]{1,2})(.+)$")
        .expect("collection metadata pattern")
});

// The label is greedy and unrestricted, so `technical[a]=b]=c` has label `a]=b`.
// `@` is accepted as an operator character and reads as `=`.
static TECHNICAL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^technical\[(.+)\]([=<>@]{1,2})(.+)$").expect("technical pattern")
});

static PAIR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^([a-zA-Z0-9_.-]+)([=<>]{1,2})(.+)$").expect("pair pattern")
});

static MISSING_VALUE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^[^=<>\s]*[^=<>\s\\][=<>]{1,2}$").expect("missing value pattern")
});

/// Classifies `fragment` with the default catalog and options.
///
/// ```
/// use imeji_syntax::{classify, Element, MetadataField};
///
/// let Element::Metadata(pair) = classify("md.description.text=Bob", false).unwrap() else {
///     panic!("expected a metadata pair");
/// };
/// assert_eq!(pair.index, "description");
/// assert_eq!(pair.metadata_field, Some(MetadataField::Text));
/// ```
pub fn classify(fragment: &str, negated: bool) -> Result<Element, ParseError> {
    let options = ParseOptions::default();
    Classifier::new(&crate::DefaultCatalog, &options, fragment).classify(fragment, negated)
}

pub(crate) struct Classifier<'a, C: ?Sized> {
    catalog: &'a C,
    options: &'a ParseOptions,
    query: &'a str,
}

impl<'a, C: FieldCatalog + ?Sized> Classifier<'a, C> {
    pub(crate) fn new(catalog: &'a C, options: &'a ParseOptions, query: &'a str) -> Self {
        Self {
            catalog,
            options,
            query,
        }
    }

    pub(crate) fn classify(&self, fragment: &str, negated: bool) -> Result<Element, ParseError> {
        if fragment.is_empty() {
            return Err(self.error(
                ParseErrorKind::MalformedQuery,
                "expected a search term",
                fragment,
            ));
        }

        if let Some(caps) = METADATA_PATTERN.captures(fragment) {
            debug!(fragment, "classified as metadata pair");
            let mut path = caps[1].split('.');
            let index = path.next().unwrap_or_default();
            if index.is_empty() {
                return Err(self.error(
                    ParseErrorKind::MalformedQuery,
                    "missing statement index after `md.`",
                    fragment,
                ));
            }
            let metadata_field = match path.next().filter(|name| !name.is_empty()) {
                Some(name) => Some(self.catalog.lookup_metadata_field(name).ok_or_else(|| {
                    self.error(
                        ParseErrorKind::UnknownField,
                        format!("unknown metadata field `{name}`"),
                        fragment,
                    )
                })?),
                None => None,
            };
            let pair = MetadataPair::new(
                index,
                metadata_field,
                Operator::from_token(&caps[2]),
                unescape(&caps[3]),
            );
            return Ok(pair.with_negated(negated).into());
        }

        if let Some(caps) = COLLECTION_METADATA_PATTERN.captures(fragment) {
            debug!(fragment, "classified as collection metadata pair");
            let pair = CollectionMetadataPair::from_index(
                &caps[1],
                Operator::from_token(&caps[2]),
                unescape(&caps[3]),
            );
            return Ok(pair.with_negated(negated).into());
        }

        if let Some(caps) = TECHNICAL_PATTERN.captures(fragment) {
            debug!(fragment, "classified as technical pair");
            let pair = TechnicalPair::new(
                &caps[1],
                Operator::from_token(&caps[2]),
                unescape(&caps[3]),
            );
            return Ok(pair.with_negated(negated).into());
        }

        if let Some(caps) = PAIR_PATTERN.captures(fragment) {
            let name = &caps[1];
            let field = self.catalog.lookup_field(name).ok_or_else(|| {
                self.error(
                    ParseErrorKind::UnknownField,
                    format!("unknown field `{name}`"),
                    fragment,
                )
            })?;
            debug!(fragment, field = field.index(), "classified as field pair");
            let pair = Pair::new(field, Operator::from_token(&caps[2]), unescape(&caps[3]));
            return Ok(pair.with_negated(negated).into());
        }

        self.reject_dangling(fragment)?;
        debug!(fragment, "classified as free text");
        Ok(self.free_text(&unescape(fragment), negated))
    }

    // Fragments that clearly meant to be a pair but lost a token.
    fn reject_dangling(&self, fragment: &str) -> Result<(), ParseError> {
        let message = if fragment.starts_with(['=', '<', '>']) {
            "missing field name before operator"
        } else if MISSING_VALUE_PATTERN.is_match(fragment) {
            "missing value after operator"
        } else if fragment.starts_with("technical[") {
            "expected `technical[<label>]<operator><value>`"
        } else {
            return Ok(());
        };
        Err(self.error(ParseErrorKind::MalformedQuery, message, fragment))
    }

    fn free_text(&self, text: &str, negated: bool) -> Element {
        if self.options.fulltext_fallback {
            QueryBuilder::new()
                .or([
                    Pair::equals(SearchField::All, text),
                    Pair::equals(SearchField::Fulltext, text),
                ])
                .build_as_group()
                .with_negated(negated)
                .into()
        } else {
            Pair::equals(SearchField::All, text)
                .with_negated(negated)
                .into()
        }
    }

    fn error(&self, kind: ParseErrorKind, message: impl Into<String>, fragment: &str) -> ParseError {
        ParseError::new(kind, message, fragment, self.query)
    }
}
