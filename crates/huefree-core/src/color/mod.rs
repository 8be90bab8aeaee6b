//! Color values: the numeric tuple, its CSS text codec, and sRGB gamma curves.

pub mod codec;
pub mod gamma;

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Number of color channels a transform touches. A 4th component is alpha.
pub const RGB_CHANNELS: usize = 3;

/// An ordered sequence of color components: `[r, g, b]` or `[r, g, b, a]`.
///
/// Channels are `0..=255` when gamma-encoded and unconstrained floats in
/// linear space. Alpha is never touched by any transform stage.
///
/// The length is not enforced: custom maps may hand back tuples of any
/// length, and the codec passes those through instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorTuple(Vec<f64>);

impl ColorTuple {
    /// Wrap raw components.
    pub fn new(components: Vec<f64>) -> Self {
        Self(components)
    }

    /// Build a 3-component tuple.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self(vec![r, g, b])
    }

    /// Build a 4-component tuple.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self(vec![r, g, b, a])
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the tuple has no components at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The alpha component, if this is an RGBA tuple.
    pub fn alpha(&self) -> Option<f64> {
        self.0.get(RGB_CHANNELS).copied()
    }

    /// Components as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Consume the tuple, returning its components.
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Mutable access to the color channels (at most the first three).
    pub(crate) fn channels_mut(&mut self) -> &mut [f64] {
        let n = self.0.len().min(RGB_CHANNELS);
        &mut self.0[..n]
    }
}

impl Index<usize> for ColorTuple {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl IndexMut<usize> for ColorTuple {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.0[index]
    }
}

impl From<[f64; 3]> for ColorTuple {
    fn from(rgb: [f64; 3]) -> Self {
        Self(rgb.to_vec())
    }
}

impl From<[f64; 4]> for ColorTuple {
    fn from(rgba: [f64; 4]) -> Self {
        Self(rgba.to_vec())
    }
}

impl From<[u8; 4]> for ColorTuple {
    fn from(px: [u8; 4]) -> Self {
        Self(px.iter().map(|&c| f64::from(c)).collect())
    }
}

impl From<Vec<f64>> for ColorTuple {
    fn from(components: Vec<f64>) -> Self {
        Self(components)
    }
}

/// Comma-joined components, e.g. `1,2,3,4,5`.
///
/// This is how a tuple the codec cannot serialize ends up rendered when it
/// is substituted back into a style string.
impl fmt::Display for ColorTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Input accepted by the gamma stages: either CSS text or an already
/// parsed tuple.
#[derive(Debug, Clone)]
pub enum ColorInput<'a> {
    /// CSS color text, parsed with [`codec::parse_color`].
    Text(&'a str),
    /// A numeric tuple, used as-is.
    Tuple(ColorTuple),
}

impl ColorInput<'_> {
    /// Resolve to a tuple. Text that does not contain a color yields `None`.
    pub fn into_tuple(self) -> Option<ColorTuple> {
        match self {
            Self::Text(text) => codec::parse_color(text),
            Self::Tuple(tuple) => Some(tuple),
        }
    }
}

impl<'a> From<&'a str> for ColorInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for ColorInput<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text.as_str())
    }
}

impl From<ColorTuple> for ColorInput<'_> {
    fn from(tuple: ColorTuple) -> Self {
        Self::Tuple(tuple)
    }
}

impl From<&ColorTuple> for ColorInput<'_> {
    fn from(tuple: &ColorTuple) -> Self {
        Self::Tuple(tuple.clone())
    }
}
