//! Character scanner that splits a query into groups and flat terms.
//!
//! The scanner does not tokenize. It grows a `part` buffer one character at
//! a time and decides after every character whether the buffer now holds a
//! complete parenthesized group (recurse into it) or a complete term ended by
//! a ` AND ` / ` OR ` stop word (hand it to the classifier). The relation
//! that joins the *next* element is read from the tail of the term that was
//! just flushed.
//!
//! A `\(` or `\)` is a literal character and never opens or closes a
//! group. An unescaped `(` or `)` inside a value is taken as group
//! punctuation and the query is rejected as malformed.
//!
//! Keywords are only looked for in the first word of a part, and leading
//! whitespace never enters the buffer, so scanning stays linear in the
//! input length.

use crate::{
    builder::QueryBuilder,
    catalog::FieldCatalog,
    classifier::Classifier,
    error::{ParseError, ParseErrorKind},
    escape::ESCAPE,
    model::{Query, Relation},
    options::ParseOptions,
};
use tracing::{debug, trace, warn};

pub(crate) struct Parser<'a, C: ?Sized> {
    query: &'a str,
    options: &'a ParseOptions,
    classifier: Classifier<'a, C>,
}

#[derive(Debug, Clone, Copy)]
enum Keyword {
    Not,
    Relation(Relation),
}

impl<'a, C: FieldCatalog + ?Sized> Parser<'a, C> {
    pub(crate) fn new(query: &'a str, options: &'a ParseOptions, catalog: &'a C) -> Self {
        Self {
            query,
            options,
            classifier: Classifier::new(catalog, options, query),
        }
    }

    pub(crate) fn parse(self) -> Result<Query, ParseError> {
        self.parse_group(self.query, 0)
            .map(QueryBuilder::build)
            .inspect_err(|err| {
                warn!(kind = ?err.kind, fragment = %err.fragment, "query could not be parsed");
            })
    }

    fn parse_group(&self, group: &str, level: usize) -> Result<QueryBuilder, ParseError> {
        let mut builder = QueryBuilder::new();
        let mut part = String::new();
        let mut depth = 0usize;
        let mut in_bracket = false;
        let mut negated = false;
        let mut relation = Relation::And;
        // Set once the first word of `part` has ended.
        let mut head_done = false;
        // The previous character was an unescaped backslash.
        let mut escaped = false;

        for ch in group.chars() {
            if part.is_empty() && ch.is_whitespace() {
                continue;
            }
            part.push(ch);
            let literal = escaped;
            escaped = !literal && ch == ESCAPE;

            let bracket = !literal && matches!(ch, '(' | ')');
            if bracket && ch == '(' {
                depth += 1;
                in_bracket = true;
                if level + depth > self.options.max_depth {
                    return Err(self.error(
                        ParseErrorKind::TooDeeplyNested,
                        format!("groups nest deeper than {}", self.options.max_depth),
                        group,
                    ));
                }
            } else if bracket {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    self.error(ParseErrorKind::MalformedQuery, "unmatched `)`", part.trim())
                })?;
            }

            // Keywords only count as whole words at the start of an element,
            // so `NOTarrow=1` and `title=NOT` stay plain text.
            if !head_done && (ch.is_whitespace() || (bracket && ch == '(')) {
                head_done = true;
                let head = &part[..part.len() - ch.len_utf8()];
                if let Some(keyword) = as_keyword(head) {
                    match keyword {
                        Keyword::Not => negated = true,
                        Keyword::Relation(r) => relation = r,
                    }
                    part.clear();
                    head_done = false;
                    if ch == '(' {
                        part.push(ch);
                        head_done = true;
                    }
                    continue;
                }
            }

            if in_bracket && depth == 0 {
                let fragment = part.trim();
                let inner = fragment
                    .strip_prefix('(')
                    .and_then(|rest| rest.strip_suffix(')'))
                    .ok_or_else(|| {
                        self.error(
                            ParseErrorKind::MalformedQuery,
                            "parenthesis inside an unbracketed value",
                            fragment,
                        )
                    })?;
                let child = self.parse_group(inner, level + 1)?;
                if child.is_empty() {
                    debug!(fragment, "dropping empty group");
                } else {
                    builder.add_element(child.build_as_group().with_negated(negated), relation);
                }
                part.clear();
                head_done = false;
                in_bracket = false;
                negated = false;
            } else if !in_bracket && ends_with_stop_word(&part) {
                relation = self.flush(&mut builder, &part, negated, relation)?;
                part.clear();
                head_done = false;
                negated = false;
            }
        }

        if depth > 0 {
            return Err(self.error(
                ParseErrorKind::MalformedQuery,
                "unmatched `(`",
                part.trim(),
            ));
        }
        if !part.trim().is_empty() {
            self.flush(&mut builder, &part, negated, relation)?;
        }
        Ok(builder)
    }

    // Classifies one term and returns the relation for the element after it.
    fn flush(
        &self,
        builder: &mut QueryBuilder,
        raw: &str,
        negated: bool,
        relation: Relation,
    ) -> Result<Relation, ParseError> {
        let fragment = raw.trim();
        let next = if fragment.ends_with("OR") {
            Relation::Or
        } else {
            Relation::And
        };
        let term = strip_relation(fragment);
        trace!(term, ?relation, negated, "flushing term");
        let element = self.classifier.classify(term, negated)?;
        builder.add_element(element, relation);
        Ok(next)
    }

    fn error(&self, kind: ParseErrorKind, message: impl Into<String>, fragment: &str) -> ParseError {
        ParseError::new(kind, message, fragment, self.query)
    }
}

fn as_keyword(word: &str) -> Option<Keyword> {
    match word {
        "NOT" => Some(Keyword::Not),
        "AND" => Some(Keyword::Relation(Relation::And)),
        "OR" => Some(Keyword::Relation(Relation::Or)),
        _ => None,
    }
}

fn ends_with_stop_word(part: &str) -> bool {
    part.ends_with(" AND ") || part.ends_with(" OR ")
}

fn strip_relation(fragment: &str) -> &str {
    fragment
        .strip_suffix(" AND")
        .or_else(|| fragment.strip_suffix(" OR"))
        .unwrap_or(fragment)
        .trim()
}
