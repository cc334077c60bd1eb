use crate::model::{Element, Entry, Group, Query, Relation};

/// Accumulates an alternating `element, relation, element, ...` sequence.
///
/// The parser uses it as its accumulator; application code uses it to
/// compose trees without going through text:
///
/// ```
/// use imeji_syntax::{Pair, QueryBuilder, SearchField, render_query};
///
/// let licenses = QueryBuilder::new()
///     .or([
///         Pair::equals(SearchField::License, "CC0"),
///         Pair::equals(SearchField::License, "CC_BY"),
///     ])
///     .build_as_group();
/// let query = QueryBuilder::new()
///     .and([Pair::equals(SearchField::Filetype, "image")])
///     .and([licenses])
///     .build();
/// assert_eq!(
///     render_query(&query),
///     "filetype=image AND (license=CC0 OR license=CC_BY)"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    entries: Vec<Entry>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `element`, joined to the previous one by `relation`
    /// (`AND` when `None`). The relation of the first element is dropped so
    /// the sequence never starts with a marker.
    pub fn add_element(
        &mut self,
        element: impl Into<Element>,
        relation: impl Into<Option<Relation>>,
    ) -> &mut Self {
        if !self.entries.is_empty() {
            let relation = relation.into().unwrap_or_default();
            self.entries.push(Entry::Relation(relation));
        }
        self.entries.push(Entry::Element(element.into()));
        self
    }

    /// Appends every element joined by `AND`.
    pub fn and<I, E>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Element>,
    {
        for element in elements {
            self.add_element(element, Relation::And);
        }
        self
    }

    /// Appends every element joined by `OR`.
    pub fn or<I, E>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Element>,
    {
        for element in elements {
            self.add_element(element, Relation::Or);
        }
        self
    }

    /// Number of elements (relations not counted).
    pub fn len(&self) -> usize {
        self.entries.len().div_ceil(2)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn build(self) -> Query {
        Query::from_entries(self.entries)
    }

    pub fn build_as_group(self) -> Group {
        Group::from_entries(self.entries)
    }
}

impl From<Query> for QueryBuilder {
    /// Continues building on top of an existing query.
    fn from(query: Query) -> Self {
        Self {
            entries: query.entries().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pair, SearchField};

    fn title(value: &str) -> Pair {
        Pair::equals(SearchField::Title, value)
    }

    fn assert_alternates(entries: &[Entry]) {
        for (i, entry) in entries.iter().enumerate() {
            match entry {
                Entry::Element(_) => assert_eq!(i % 2, 0, "element at odd position {i}"),
                Entry::Relation(_) => assert_eq!(i % 2, 1, "relation at even position {i}"),
            }
        }
        if let Some(last) = entries.last() {
            assert!(matches!(last, Entry::Element(_)), "sequence ends with a relation");
        }
    }

    #[test]
    fn empty_builder_builds_empty_query() {
        let builder = QueryBuilder::new();
        assert!(builder.is_empty());
        assert_eq!(builder.len(), 0);
        assert!(builder.build().is_empty());
    }

    #[test]
    fn first_relation_is_dropped() {
        let mut builder = QueryBuilder::new();
        builder.add_element(title("a"), Relation::Or);
        let query = builder.build();
        assert_eq!(query.entries(), [Entry::Element(title("a").into())]);
    }

    #[test]
    fn missing_relation_defaults_to_and() {
        let mut builder = QueryBuilder::new();
        builder
            .add_element(title("a"), None::<Relation>)
            .add_element(title("b"), None::<Relation>);
        let query = builder.build();
        assert_eq!(query.entries()[1], Entry::Relation(Relation::And));
    }

    #[test]
    fn mixed_and_or_keeps_alternation() {
        let mut builder = QueryBuilder::new().and([title("a"), title("b")]).or([
            title("c"),
            title("d"),
        ]);
        builder.add_element(title("e"), Relation::And);
        assert_eq!(builder.len(), 5);
        let group = builder.build_as_group();
        assert_alternates(group.entries());
        assert!(!group.negated);
        assert_eq!(
            group.entries()[3],
            Entry::Relation(Relation::Or),
            "or() joins its first element with OR too"
        );
    }

    #[test]
    fn continues_from_existing_query() {
        let base = QueryBuilder::new().and([title("a")]).build();
        let query = QueryBuilder::from(base)
            .and([Pair::equals(SearchField::License, "CC0")])
            .build();
        assert_eq!(query.entries().len(), 3);
        assert_alternates(query.entries());
    }
}
