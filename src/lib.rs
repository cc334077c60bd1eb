//! # imeji search query syntax
//!
//! `imeji-syntax` reads the text queries that the imeji search forms, saved
//! searches and shared URLs carry, and turns them into a typed tree of
//! field/metadata/technical pairs joined by `AND`/`OR` and grouped by
//! parentheses. A backslash makes a following `(`, `)`, `=`, `<` or `>`
//! part of a value. The tree renders back to the same text, so a query can be
//! parsed, rewritten and handed on without touching strings.
//!
//! ## Example
//! ```
//! use imeji_syntax::{parse_query, render_query, Element, Entry, Relation, SearchField};
//!
//! let query = parse_query("title=cat OR NOT (md.size.number>3 AND technical[ColorSpace]=RGB)").unwrap();
//! let mut links = query.links();
//! let (_, first) = links.next().unwrap();
//! assert!(matches!(first, Element::Pair(pair) if pair.field == SearchField::Title));
//! let (relation, second) = links.next().unwrap();
//! assert_eq!(relation, Some(Relation::Or));
//! assert!(matches!(second, Element::Group(group) if group.negated));
//! assert!(matches!(query.entries()[1], Entry::Relation(Relation::Or)));
//!
//! assert_eq!(
//!     render_query(&query),
//!     "title=cat OR NOT (md.size.number>3 AND technical[ColorSpace]=RGB)"
//! );
//! ```
//!
//! Text without any `field=value` shape is a simple search and expands to
//! `(all=text OR fulltext=text)`, or to a bare `all=text` when the full text
//! fallback is switched off:
//! ```
//! use imeji_syntax::{
//!     is_simple_search, parse_query, parse_query_with, render_query, DefaultCatalog, ParseOptions,
//! };
//!
//! let query = parse_query("sunset").unwrap();
//! assert_eq!(render_query(&query), "(all=sunset OR fulltext=sunset)");
//!
//! let options = ParseOptions::default().without_fulltext();
//! let query = parse_query_with("sunset", &options, &DefaultCatalog).unwrap();
//! assert_eq!(render_query(&query), "all=sunset");
//! assert!(is_simple_search(&query));
//! ```

mod builder;
mod catalog;
mod classifier;
mod error;
mod escape;
mod model;
mod options;
mod parser;
mod render;

pub use builder::QueryBuilder;
pub use catalog::{DefaultCatalog, FieldCatalog, MetadataField, SearchField};
pub use classifier::classify;
pub use error::{ParseError, ParseErrorKind};
pub use model::{
    is_simple_search, CollectionMetadataPair, Element, Entry, Group, Links, MetadataPair, Operator,
    Pair, Query, Relation, TechnicalPair,
};
pub use options::{ParseOptions, MAX_NESTING_DEPTH};
pub use render::{render_pretty, render_query, render_url_encoded};

use parser::Parser;

/// Parses a query string with the default catalog and options.
pub fn parse_query(input: &str) -> Result<Query, ParseError> {
    parse_query_with(input, &ParseOptions::default(), &DefaultCatalog)
}

/// Parses a query string against `catalog` with `options`.
pub fn parse_query_with<C>(
    input: &str,
    options: &ParseOptions,
    catalog: &C,
) -> Result<Query, ParseError>
where
    C: FieldCatalog + ?Sized,
{
    Parser::new(input, options, catalog).parse()
}

/// Parses a query taken from a URL parameter. `+` counts as a space, then
/// percent escapes are decoded as UTF-8.
pub fn parse_url_query(encoded: &str) -> Result<Query, ParseError> {
    parse_url_query_with(encoded, &ParseOptions::default(), &DefaultCatalog)
}

/// [`parse_url_query`] against `catalog` with `options`.
pub fn parse_url_query_with<C>(
    encoded: &str,
    options: &ParseOptions,
    catalog: &C,
) -> Result<Query, ParseError>
where
    C: FieldCatalog + ?Sized,
{
    let form = encoded.replace('+', " ");
    let decoded = urlencoding::decode(&form).map_err(|_| {
        ParseError::new(
            ParseErrorKind::MalformedQuery,
            "percent-encoded query is not valid UTF-8",
            encoded,
            encoded,
        )
    })?;
    parse_query_with(&decoded, options, catalog)
}
