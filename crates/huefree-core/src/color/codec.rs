//! CSS `rgb()` / `rgba()` text codec.
//!
//! Grammar (first match wins, anywhere inside the text):
//!
//! ```text
//! rgba?\(\s*N\s*,\s*N\s*,\s*N(\s*,\s*N)?\s*\)      N = -?[0-9]+(\.[0-9]+)?
//! ```
//!
//! # Prefix-driven slicing
//!
//! The payload is sliced right after the literal prefix found at the match
//! site (`rgb(` or `rgba(`) and split on commas. The number of components is
//! therefore the number of fields actually written, not what the prefix
//! implies: `rgba(10, 20, 30)` parses to a 3-tuple and `rgb(1, 2, 3, 4)` to a
//! 4-tuple. Callers relying on the prefix to tell RGB from RGBA must check
//! [`ColorTuple::len`] instead.

use std::fmt;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use super::ColorTuple;

/// The color grammar, unanchored.
static COLOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    const N: &str = r"-?[0-9]+(?:\.[0-9]+)?";
    Regex::new(&format!(
        r"rgba?\(\s*({N})\s*,\s*({N})\s*,\s*({N})(?:\s*,\s*({N}))?\s*\)"
    ))
    .expect("color grammar is a valid regex")
});

/// Result of [`format_color`].
#[derive(Debug, Clone, PartialEq)]
pub enum FormattedColor {
    /// `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    Css(String),
    /// The tuple had neither 3 nor 4 components and is handed back untouched.
    Passthrough(ColorTuple),
}

impl FormattedColor {
    /// The CSS text, if the tuple could be serialized.
    pub fn as_css(&self) -> Option<&str> {
        match self {
            Self::Css(text) => Some(text),
            Self::Passthrough(_) => None,
        }
    }
}

impl fmt::Display for FormattedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(text) => f.write_str(text),
            Self::Passthrough(tuple) => tuple.fmt(f),
        }
    }
}

/// Whether `text` contains anything matching the color grammar.
pub fn contains_color(text: &str) -> bool {
    COLOR_PATTERN.is_match(text)
}

/// Parse the first `rgb()`/`rgba()` occurrence in `text`.
///
/// Returns `None` when nothing in the text matches the grammar.
pub fn parse_color(text: &str) -> Option<ColorTuple> {
    let found = COLOR_PATTERN.find(text)?;
    let matched = found.as_str();

    let payload_start = match matched.as_bytes().get(3) {
        Some(b'a') => "rgba(".len(),
        Some(b'(') => "rgb(".len(),
        _ => return None,
    };
    // The match always ends with ')'.
    let payload = &matched[payload_start..matched.len() - 1];

    payload
        .split(',')
        .map(|field| field.trim().parse::<f64>().ok())
        .collect::<Option<Vec<_>>>()
        .map(ColorTuple::new)
}

/// Serialize a tuple as CSS text.
///
/// Components use the shortest decimal form that reads back to the same
/// `f64`, so `parse_color(format_color(t))` returns `t` for 3- and
/// 4-component tuples of finite values.
pub fn format_color(tuple: &ColorTuple) -> FormattedColor {
    match tuple.as_slice() {
        [r, g, b] => FormattedColor::Css(format!("rgb({r}, {g}, {b})")),
        [r, g, b, a] => FormattedColor::Css(format!("rgba({r}, {g}, {b}, {a})")),
        _ => FormattedColor::Passthrough(tuple.clone()),
    }
}

/// Replace the first color in `haystack` with `value`.
///
/// `value` is inserted literally. Text without a color is returned as-is.
pub fn substitute_color(haystack: &str, value: &str) -> String {
    COLOR_PATTERN
        .replacen(haystack, 1, NoExpand(value))
        .into_owned()
}
