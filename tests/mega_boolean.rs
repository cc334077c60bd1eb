//! Combinational coverage of relations, negation and grouping.
//! Every generated query must parse, and its rendering must parse back to
//! the same tree.

mod common;
use common::*;
use imeji_syntax::*;

const ATOMS: [&str; 19] = [
    "title=cat",
    "filename=Tulips.jpg",
    "filesize>1024",
    "filesize<=2048",
    "date>=2012-01-01",
    "license=CC0",
    r#"col="http://imeji.org/collection/86""#,
    "md.description.text=Bob",
    "md.created.date<2000",
    "md.location.placename=Munich",
    "md.size>3",
    "technical[ColorSpace]=RGB",
    "technical[Exif Image Width]>=800",
    "sunset",
    "red sunset",
    "title=this is an example",
    r"title=f\(x\) \= y",
    "collection.md.Project_Name>=Atlas",
    "technical[ColorSpace]@RGB",
];

const RELATIONS: [&str; 2] = [" AND ", " OR "];
const NOTS: [&str; 2] = ["", "NOT "];

fn assert_stable(query: &str) {
    let first = parse_query(query).unwrap_or_else(|e| panic!("failed to parse {query:?}: {e}"));
    let rendered = render_query(&first);
    let second = parse_query(&rendered)
        .unwrap_or_else(|e| panic!("failed to reparse {rendered:?} (from {query:?}): {e}"));
    assert_eq!(first, second, "{query:?} rendered as {rendered:?}");
    assert_eq!(
        render_query(&second),
        rendered,
        "rendering is not a fixed point for {query:?}"
    );
}

#[test]
fn single_atoms() {
    init_tracing();
    for a in ATOMS {
        for n in NOTS {
            assert_stable(&format!("{n}{a}"));
            assert_stable(&format!("{n}({a})"));
        }
    }
}

#[test]
fn pairs_of_atoms() {
    for a in ATOMS {
        for b in ATOMS {
            for r in RELATIONS {
                for n in NOTS {
                    assert_stable(&format!("{n}{a}{r}{b}"));
                    assert_stable(&format!("{a}{r}{n}{b}"));
                    assert_stable(&format!("{n}({a}{r}{b})"));
                }
            }
        }
    }
}

#[test]
fn grouped_precedence_variations() {
    for a in ATOMS.iter().take(8) {
        for b in ATOMS.iter().skip(4).take(8) {
            for c in ATOMS.iter().skip(8) {
                for r in RELATIONS {
                    for s in RELATIONS {
                        assert_stable(&format!("({a}{r}{b}){s}{c}"));
                        assert_stable(&format!("{a}{r}({b}{s}{c})"));
                        assert_stable(&format!("NOT ({a}{r}{b}){s}NOT ({c})"));
                        assert_stable(&format!("{a}{r}{b}{s}{c}"));
                    }
                }
            }
        }
    }
}

#[test]
fn element_counts_match_the_generated_shape() {
    for a in ATOMS {
        for b in ATOMS {
            for r in RELATIONS {
                let query = parse_ok(&format!("({a}){r}{b}{r}({a}{r}{b})"));
                assert_eq!(query.elements().count(), 3);
                let expected = if r == " OR " { Relation::Or } else { Relation::And };
                assert!(
                    query
                        .links()
                        .skip(1)
                        .all(|(relation, _)| relation == Some(expected))
                );
            }
        }
    }
}

#[test]
fn deep_alternating_nesting() {
    for depth in 1..=12 {
        let mut q = String::from("title=leaf");
        for level in 0..depth {
            let relation = RELATIONS[level % 2];
            let not = NOTS[level % 2];
            q = format!("{not}({q}{relation}{})", ATOMS[level % ATOMS.len()]);
        }
        let query = parse_ok(&q);
        assert_eq!(query.depth(), depth, "{q:?}");
        assert_stable(&q);
    }
}
