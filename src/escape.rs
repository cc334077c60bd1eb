//! Backslash escapes for characters that carry meaning in query text.
//!
//! A `\` in front of `(`, `)`, `=`, `<` or `>` makes it literal, so values
//! can hold brackets and operators. The backslash escapes itself as `\\`.

use std::borrow::Cow;

pub(crate) const ESCAPE: char = '\\';

const SPECIAL: [char; 5] = ['(', ')', '=', '<', '>'];

/// Prefixes every special character and every backslash with `\`.
pub(crate) fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(|c: char| c == ESCAPE || SPECIAL.contains(&c)) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        if c == ESCAPE || SPECIAL.contains(&c) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    Cow::Owned(out)
}

/// Drops each escaping backslash and keeps the character after it. A
/// trailing lone backslash is dropped too.
pub(crate) fn unescape(text: &str) -> Cow<'_, str> {
    if !text.contains(ESCAPE) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == ESCAPE {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}
