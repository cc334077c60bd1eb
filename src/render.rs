//! Canonical text form of a query tree.
//!
//! Values are written with `(`, `)`, `=`, `<`, `>` and `\` escaped, so the
//! output is what [`parse_query`](crate::parse_query) reads back into an
//! equal tree, provided no value contains ` AND ` or ` OR `.

use crate::{
    escape::{escape, unescape},
    model::{
        CollectionMetadataPair, Element, Entry, Group, MetadataPair, Operator, Pair, Query,
        Relation, TechnicalPair,
    },
};
use std::fmt;

/// Renders `query` in canonical text form. Empty groups render as nothing
/// and take their joining relation with them.
pub fn render_query(query: &Query) -> String {
    let mut out = String::new();
    write_entries(query.entries(), &mut out);
    out.truncate(out.trim_end().len());
    out
}

/// [`render_query`] form-encoded for a URL query parameter: spaces become
/// `+`, and everything outside `A-Z a-z 0-9 * - . _` is percent-encoded.
///
/// ```
/// use imeji_syntax::{parse_url_query, render_url_encoded, parse_query};
///
/// let query = parse_query("title=red cat").unwrap();
/// let encoded = render_url_encoded(&query);
/// assert_eq!(encoded, "title%3Dred+cat");
/// assert_eq!(parse_url_query(&encoded).unwrap(), query);
/// ```
pub fn render_url_encoded(query: &Query) -> String {
    form_urlencoded::byte_serialize(render_query(query).as_bytes()).collect()
}

/// [`render_query`] with the escaping backslashes removed, for showing a
/// query to a person. The result does not always parse back.
pub fn render_pretty(query: &Query) -> String {
    unescape(&render_query(query)).into_owned()
}

fn write_entries(entries: &[Entry], out: &mut String) {
    let mut pending: Option<Relation> = None;
    for entry in entries {
        match entry {
            Entry::Relation(relation) => pending = Some(*relation),
            Entry::Element(element) => {
                let rendered = element.to_string();
                if rendered.is_empty() {
                    pending = None;
                    continue;
                }
                if !out.is_empty() {
                    out.push(' ');
                    out.push_str(pending.unwrap_or_default().keyword());
                    out.push(' ');
                }
                out.push_str(&rendered);
                pending = None;
            }
        }
    }
}

fn write_negation(negated: bool, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if negated { f.write_str("NOT ") } else { Ok(()) }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_negation(self.negated, f)?;
        write!(f, "{}{}{}", self.field.index(), self.operator, escape(&self.value))
    }
}

impl fmt::Display for MetadataPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_negation(self.negated, f)?;
        write!(f, "md.{}", self.index)?;
        if let Some(field) = self.metadata_field {
            write!(f, ".{}", field.index())?;
        }
        write!(f, "{}{}", self.operator, escape(&self.value))
    }
}

impl fmt::Display for CollectionMetadataPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_negation(self.negated, f)?;
        write!(f, "{}{}{}", self.index(), self.operator, escape(&self.value))
    }
}

impl fmt::Display for TechnicalPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_negation(self.negated, f)?;
        write!(f, "technical[{}]{}{}", self.label, self.operator, escape(&self.value))
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut inner = String::new();
        write_entries(self.entries(), &mut inner);
        if inner.is_empty() {
            return Ok(());
        }
        write_negation(self.negated, f)?;
        write!(f, "({inner})")
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Pair(pair) => fmt::Display::fmt(pair, f),
            Element::Metadata(pair) => fmt::Display::fmt(pair, f),
            Element::CollectionMetadata(pair) => fmt::Display::fmt(pair, f),
            Element::Technical(pair) => fmt::Display::fmt(pair, f),
            Element::Group(group) => fmt::Display::fmt(group, f),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_query(self))
    }
}
