//! Caller-supplied color maps.

use std::fmt;
use std::sync::Arc;

use crate::color::ColorTuple;

/// An arbitrary function over gamma-encoded tuples.
///
/// Maps see the raw `0..=255` tuple, not linear light, and whatever they
/// return is used verbatim.
#[derive(Clone)]
pub struct ColorMap(Arc<dyn Fn(&ColorTuple) -> ColorTuple + Send + Sync>);

impl ColorMap {
    /// Wrap a mapping function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&ColorTuple) -> ColorTuple + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the map.
    pub fn call(&self, tuple: &ColorTuple) -> ColorTuple {
        (self.0)(tuple)
    }
}

impl fmt::Debug for ColorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ColorMap(..)")
    }
}

/// Apply `map` to `tuple` and return its result unchanged.
pub fn apply_map(map: &ColorMap, tuple: &ColorTuple) -> ColorTuple {
    map.call(tuple)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_is_returned_verbatim() {
        let invert = ColorMap::new(|t| {
            ColorTuple::new(
                t.as_slice()
                    .iter()
                    .enumerate()
                    .map(|(i, &c)| if i < 3 { 255.0 - c } else { c })
                    .collect(),
            )
        });
        let out = apply_map(&invert, &ColorTuple::rgba(0.0, 55.0, 255.0, 0.5));
        assert_eq!(out, ColorTuple::rgba(255.0, 200.0, 0.0, 0.5));
    }

    #[test]
    fn test_map_may_change_length() {
        let widen = ColorMap::new(|_| ColorTuple::new(vec![1.0; 5]));
        assert_eq!(apply_map(&widen, &ColorTuple::rgb(0.0, 0.0, 0.0)).len(), 5);
    }
}
