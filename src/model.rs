//! The expression tree.
//!
//! A [`Query`] (and every [`Group`] inside it) is a flat sequence of
//! [`Entry`] values that alternates `element, relation, element, ...`. The
//! sequence is only ever assembled by [`QueryBuilder`](crate::QueryBuilder),
//! which is what keeps the alternation intact; readers get slices and
//! iterators, never a mutable `Vec`.

use crate::catalog::{MetadataField, SearchField};
use serde::{Deserialize, Serialize};

/// Comparison between an addressed field and a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// `=`
    #[default]
    Equals,
    /// `>`
    Greater,
    /// `<`
    Lesser,
    /// `>=`
    GreaterEquals,
    /// `<=`
    LesserEquals,
}

impl Operator {
    /// Maps an operator token to its variant. Tokens outside the table
    /// (`==`, `=>`, `<>` ...) fall back to [`Operator::Equals`].
    pub fn from_token(token: &str) -> Self {
        match token {
            ">" => Operator::Greater,
            "<" => Operator::Lesser,
            ">=" => Operator::GreaterEquals,
            "<=" => Operator::LesserEquals,
            _ => Operator::Equals,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::Greater => ">",
            Operator::Lesser => "<",
            Operator::GreaterEquals => ">=",
            Operator::LesserEquals => "<=",
        }
    }
}

/// `AND` / `OR` marker between two sibling elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    #[default]
    And,
    Or,
}

impl Relation {
    pub fn keyword(self) -> &'static str {
        match self {
            Relation::And => "AND",
            Relation::Or => "OR",
        }
    }
}

/// `field<op>value` against a system field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pair {
    pub field: SearchField,
    pub operator: Operator,
    pub value: String,
    pub negated: bool,
}

impl Pair {
    pub fn new(field: SearchField, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
            negated: false,
        }
    }

    /// `field=value`, the shape facets and the simple search produce.
    pub fn equals(field: SearchField, value: impl Into<String>) -> Self {
        Self::new(field, Operator::Equals, value)
    }

    pub fn with_negated(mut self, negated: bool) -> Self {
        self.negated = negated;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// `md.<statement>[.<field>]<op>value` against a user metadata statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataPair {
    /// Statement index, e.g. `description` in `md.description.text=Bob`.
    pub index: String,
    pub metadata_field: Option<MetadataField>,
    pub operator: Operator,
    pub value: String,
    pub negated: bool,
}

impl MetadataPair {
    pub fn new(
        index: impl Into<String>,
        metadata_field: Option<MetadataField>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            index: index.into(),
            metadata_field,
            operator,
            value: value.into(),
            negated: false,
        }
    }

    pub fn with_negated(mut self, negated: bool) -> Self {
        self.negated = negated;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// `collection.md.<label><op>value` against a metadata field of the
/// collection that holds the item. Spaces in the label are written as `_`
/// in query text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionMetadataPair {
    pub label: String,
    pub operator: Operator,
    pub value: String,
    pub negated: bool,
}

impl CollectionMetadataPair {
    pub(crate) const PREFIX: &'static str = "collection.md.";

    pub fn new(label: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            operator,
            value: value.into(),
            negated: false,
        }
    }

    /// Builds a pair from its query index, e.g. `collection.md.Project_Name`.
    pub fn from_index(index: &str, operator: Operator, value: impl Into<String>) -> Self {
        let label = index.strip_prefix(Self::PREFIX).unwrap_or(index);
        Self::new(label.replace('_', " "), operator, value)
    }

    /// The label as it appears in query text.
    pub fn index(&self) -> String {
        format!("{}{}", Self::PREFIX, self.label.replace(' ', "_"))
    }

    pub fn with_negated(mut self, negated: bool) -> Self {
        self.negated = negated;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// `technical[<label>]<op>value` against extracted file metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechnicalPair {
    pub label: String,
    pub operator: Operator,
    pub value: String,
    pub negated: bool,
}

impl TechnicalPair {
    pub fn new(label: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            operator,
            value: value.into(),
            negated: false,
        }
    }

    pub fn with_negated(mut self, negated: bool) -> Self {
        self.negated = negated;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// One node of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Pair(Pair),
    Metadata(MetadataPair),
    CollectionMetadata(CollectionMetadataPair),
    Technical(TechnicalPair),
    Group(Group),
}

impl Element {
    pub fn is_negated(&self) -> bool {
        match self {
            Element::Pair(pair) => pair.negated,
            Element::Metadata(pair) => pair.negated,
            Element::CollectionMetadata(pair) => pair.negated,
            Element::Technical(pair) => pair.negated,
            Element::Group(group) => group.negated,
        }
    }

    /// Compares what two elements search for, ignoring negation.
    ///
    /// A group holding a single element is compared as that element, so
    /// `(title=cat)` is the same as `title=cat`.
    pub fn is_same(&self, other: &Element) -> bool {
        match (self.reduced(), other.reduced()) {
            (Element::Pair(a), Element::Pair(b)) => {
                a.field == b.field && a.operator == b.operator && a.value == b.value
            }
            (Element::Metadata(a), Element::Metadata(b)) => {
                a.index == b.index
                    && a.metadata_field == b.metadata_field
                    && a.operator == b.operator
                    && a.value == b.value
            }
            (Element::CollectionMetadata(a), Element::CollectionMetadata(b)) => {
                a.label == b.label && a.operator == b.operator && a.value == b.value
            }
            (Element::Technical(a), Element::Technical(b)) => {
                a.label == b.label && a.operator == b.operator && a.value == b.value
            }
            (Element::Group(a), Element::Group(b)) => entries_are_same(&a.entries, &b.entries),
            _ => false,
        }
    }

    fn reduced(&self) -> &Element {
        match self {
            Element::Group(group) => match group.entries.as_slice() {
                [Entry::Element(only)] => only.reduced(),
                _ => self,
            },
            _ => self,
        }
    }
}

impl From<Pair> for Element {
    fn from(pair: Pair) -> Self {
        Element::Pair(pair)
    }
}

impl From<MetadataPair> for Element {
    fn from(pair: MetadataPair) -> Self {
        Element::Metadata(pair)
    }
}

impl From<CollectionMetadataPair> for Element {
    fn from(pair: CollectionMetadataPair) -> Self {
        Element::CollectionMetadata(pair)
    }
}

impl From<TechnicalPair> for Element {
    fn from(pair: TechnicalPair) -> Self {
        Element::Technical(pair)
    }
}

impl From<Group> for Element {
    fn from(group: Group) -> Self {
        Element::Group(group)
    }
}

/// A position in an alternating sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Entry {
    Element(Element),
    Relation(Relation),
}

/// Parenthesized sequence of elements, optionally negated as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Group {
    entries: Vec<Entry>,
    pub negated: bool,
}

impl Group {
    pub(crate) fn from_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            negated: false,
        }
    }

    pub fn with_negated(mut self, negated: bool) -> Self {
        self.negated = negated;
        self
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Each element paired with the relation joining it to its predecessor
    /// (`None` for the first one).
    pub fn links(&self) -> Links<'_> {
        Links::new(&self.entries)
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.links().map(|(_, element)| element)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nesting depth counting this group: `(title=cat)` is 1.
    pub fn depth(&self) -> usize {
        1 + max_group_depth(&self.entries)
    }
}

/// Top-level sequence handed out by the parser and the builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Query {
    entries: Vec<Entry>,
}

impl Query {
    pub(crate) fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn links(&self) -> Links<'_> {
        Links::new(&self.entries)
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.links().map(|(_, element)| element)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deepest group nesting; a query without groups has depth 0.
    pub fn depth(&self) -> usize {
        max_group_depth(&self.entries)
    }

    /// Wraps the whole query in a (non-negated) group so it can be nested
    /// into another tree.
    pub fn into_group(self) -> Group {
        Group::from_entries(self.entries)
    }

    /// Returns a copy of the tree in which every metadata pair addressing
    /// statement `from` addresses `to` instead.
    pub fn rename_statement(&self, from: &str, to: &str) -> Query {
        Query::from_entries(rename_entries(&self.entries, from, to))
    }
}

/// True when the query came from the simple search box, i.e. one of its
/// top-level elements is a pair on the `all` field.
pub fn is_simple_search(query: &Query) -> bool {
    query
        .elements()
        .any(|element| matches!(element, Element::Pair(pair) if pair.field == SearchField::All))
}

/// Iterator returned by [`Group::links`] and [`Query::links`].
pub struct Links<'a> {
    entries: std::slice::Iter<'a, Entry>,
}

impl<'a> Links<'a> {
    fn new(entries: &'a [Entry]) -> Self {
        Self {
            entries: entries.iter(),
        }
    }
}

impl<'a> Iterator for Links<'a> {
    type Item = (Option<Relation>, &'a Element);

    fn next(&mut self) -> Option<Self::Item> {
        let mut relation = None;
        loop {
            match self.entries.next()? {
                Entry::Relation(r) => relation = Some(*r),
                Entry::Element(element) => return Some((relation, element)),
            }
        }
    }
}

fn max_group_depth(entries: &[Entry]) -> usize {
    entries
        .iter()
        .filter_map(|entry| match entry {
            Entry::Element(Element::Group(group)) => Some(group.depth()),
            _ => None,
        })
        .max()
        .unwrap_or(0)
}

fn entries_are_same(left: &[Entry], right: &[Entry]) -> bool {
    left.len() == right.len()
        && left.iter().zip(right).all(|pair| match pair {
            (Entry::Relation(a), Entry::Relation(b)) => a == b,
            (Entry::Element(a), Entry::Element(b)) => a.is_same(b),
            _ => false,
        })
}

fn rename_entries(entries: &[Entry], from: &str, to: &str) -> Vec<Entry> {
    entries
        .iter()
        .map(|entry| match entry {
            Entry::Element(Element::Metadata(pair)) if pair.index == from => {
                Entry::Element(Element::Metadata(MetadataPair {
                    index: to.to_string(),
                    ..pair.clone()
                }))
            }
            Entry::Element(Element::Group(group)) => Entry::Element(Element::Group(Group {
                entries: rename_entries(&group.entries, from, to),
                negated: group.negated,
            })),
            other => other.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QueryBuilder;

    #[test]
    fn unknown_operator_tokens_fall_back_to_equals() {
        for token in ["==", "=>", "<>", "", "~", "@"] {
            assert_eq!(Operator::from_token(token), Operator::Equals);
        }
    }

    #[test]
    fn operator_tokens_are_inverse() {
        let all = [
            Operator::Equals,
            Operator::Greater,
            Operator::Lesser,
            Operator::GreaterEquals,
            Operator::LesserEquals,
        ];
        for op in all {
            assert_eq!(Operator::from_token(op.token()), op);
        }
    }

    #[test]
    fn links_pair_each_element_with_its_relation() {
        let query = QueryBuilder::new()
            .and([
                Pair::equals(SearchField::Title, "cat"),
                Pair::equals(SearchField::Filename, "dog"),
            ])
            .or([Pair::equals(SearchField::License, "CC0")])
            .build();
        let relations: Vec<_> = query.links().map(|(relation, _)| relation).collect();
        assert_eq!(relations, [None, Some(Relation::And), Some(Relation::Or)]);
    }

    #[test]
    fn is_same_ignores_negation_and_single_element_groups() {
        let pair = Element::from(Pair::equals(SearchField::Title, "cat"));
        let negated = Element::from(Pair::equals(SearchField::Title, "cat").with_negated(true));
        let wrapped = Element::from(
            QueryBuilder::new()
                .and([Pair::equals(SearchField::Title, "cat")])
                .build_as_group(),
        );
        assert!(pair.is_same(&negated));
        assert!(pair.is_same(&wrapped));
        assert!(!pair.is_same(&Element::from(Pair::equals(SearchField::Title, "dog"))));
        assert!(!pair.is_same(&Element::from(TechnicalPair::new(
            "title",
            Operator::Equals,
            "cat"
        ))));
    }

    #[test]
    fn collection_label_maps_underscores_to_spaces() {
        let pair = CollectionMetadataPair::from_index(
            "collection.md.Project_Name",
            Operator::Equals,
            "Atlas",
        );
        assert_eq!(pair.label, "Project Name");
        assert_eq!(pair.index(), "collection.md.Project_Name");

        let other = Element::from(CollectionMetadataPair::new(
            "Project Name",
            Operator::Equals,
            "Atlas",
        ));
        assert!(Element::from(pair.with_negated(true)).is_same(&other));
        assert!(!Element::from(MetadataPair::new(
            "Project Name",
            None,
            Operator::Equals,
            "Atlas"
        ))
        .is_same(&other));
    }

    #[test]
    fn rename_statement_leaves_input_untouched() {
        let inner = QueryBuilder::new()
            .or([
                MetadataPair::new("author", Some(MetadataField::Familyname), Operator::Equals, "Doe"),
                MetadataPair::new("title", None, Operator::Equals, "Doe"),
            ])
            .build_as_group();
        let query = QueryBuilder::new()
            .and([Element::from(MetadataPair::new(
                "author",
                None,
                Operator::Equals,
                "x",
            ))])
            .and([inner])
            .build();

        let renamed = query.rename_statement("author", "creator");
        let indexes = |q: &Query| -> Vec<String> {
            fn walk(entries: &[Entry], out: &mut Vec<String>) {
                for entry in entries {
                    match entry {
                        Entry::Element(Element::Metadata(pair)) => out.push(pair.index.clone()),
                        Entry::Element(Element::Group(group)) => walk(group.entries(), out),
                        _ => {}
                    }
                }
            }
            let mut out = Vec::new();
            walk(q.entries(), &mut out);
            out
        };
        assert_eq!(indexes(&query), ["author", "author", "title"]);
        assert_eq!(indexes(&renamed), ["creator", "creator", "title"]);
    }

    #[test]
    fn depth_counts_nested_groups() {
        let leaf = || Pair::equals(SearchField::Title, "cat");
        let mut group = QueryBuilder::new().and([leaf()]).build_as_group();
        for _ in 0..3 {
            group = QueryBuilder::new().and([group]).build_as_group();
        }
        assert_eq!(group.depth(), 4);
        let query = QueryBuilder::new().and([Element::from(leaf())]).and([group]).build();
        assert_eq!(query.depth(), 4);
        assert_eq!(QueryBuilder::new().and([leaf()]).build().depth(), 0);
    }

    #[test]
    fn simple_search_detection() {
        let simple = QueryBuilder::new()
            .and([Pair::equals(SearchField::All, "sunset")])
            .build();
        let advanced = QueryBuilder::new()
            .and([Pair::equals(SearchField::Title, "sunset")])
            .build();
        assert!(is_simple_search(&simple));
        assert!(!is_simple_search(&advanced));
    }
}
