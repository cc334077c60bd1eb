#![allow(dead_code)]
//! Shared helpers for `imeji-syntax` integration tests.

use imeji_syntax::*;

/// Installs a test subscriber once so `RUST_LOG=imeji_syntax=trace` shows
/// the scanner at work when a test fails.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn parse_ok(input: &str) -> Query {
    init_tracing();
    parse_query(input).unwrap_or_else(|e| panic!("failed to parse {input:?}: {e}"))
}

pub fn parse_err(input: &str) -> ParseError {
    init_tracing();
    match parse_query(input) {
        Ok(query) => panic!("expected {input:?} to fail, got: {query:?}"),
        Err(e) => e,
    }
}

/// Parses, renders and parses again; both trees must match.
pub fn round_trip(input: &str) -> String {
    let first = parse_ok(input);
    let rendered = render_query(&first);
    let second = parse_ok(&rendered);
    assert_eq!(first, second, "tree changed after rendering {input:?} as {rendered:?}");
    rendered
}

pub fn element_at(entries: &[Entry], index: usize) -> &Element {
    match &entries[index] {
        Entry::Element(element) => element,
        other => panic!("expected element at {index}, got: {other:?}"),
    }
}

pub fn relation_at(entries: &[Entry], index: usize) -> Relation {
    match &entries[index] {
        Entry::Relation(relation) => *relation,
        other => panic!("expected relation at {index}, got: {other:?}"),
    }
}

pub fn as_pair(element: &Element) -> &Pair {
    match element {
        Element::Pair(pair) => pair,
        other => panic!("expected Pair, got: {other:?}"),
    }
}

pub fn as_metadata(element: &Element) -> &MetadataPair {
    match element {
        Element::Metadata(pair) => pair,
        other => panic!("expected MetadataPair, got: {other:?}"),
    }
}

pub fn as_collection_metadata(element: &Element) -> &CollectionMetadataPair {
    match element {
        Element::CollectionMetadata(pair) => pair,
        other => panic!("expected CollectionMetadataPair, got: {other:?}"),
    }
}

pub fn as_technical(element: &Element) -> &TechnicalPair {
    match element {
        Element::Technical(pair) => pair,
        other => panic!("expected TechnicalPair, got: {other:?}"),
    }
}

pub fn as_group(element: &Element) -> &Group {
    match element {
        Element::Group(group) => group,
        other => panic!("expected Group, got: {other:?}"),
    }
}

pub fn pair_is(element: &Element, field: SearchField, operator: Operator, value: &str) {
    let pair = as_pair(element);
    assert_eq!(pair.field, field);
    assert_eq!(pair.operator, operator);
    assert_eq!(pair.value, value);
}

/// Asserts the `(all=text OR fulltext=text)` free-text expansion.
pub fn fulltext_group_is(element: &Element, text: &str) {
    let group = as_group(element);
    let entries = group.entries();
    assert_eq!(entries.len(), 3);
    pair_is(element_at(entries, 0), SearchField::All, Operator::Equals, text);
    assert_eq!(relation_at(entries, 1), Relation::Or);
    pair_is(element_at(entries, 2), SearchField::Fulltext, Operator::Equals, text);
}

/// Number of parenthesis levels in canonical text.
pub fn paren_depth(text: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    for ch in text.chars() {
        match ch {
            '(' => {
                depth += 1;
                max = max.max(depth);
            }
            ')' => depth -= 1,
            _ => {}
        }
    }
    max
}
