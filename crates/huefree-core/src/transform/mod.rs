//! Vision transforms: linear matrices and custom color maps.

pub mod map;
pub mod matrix;

pub use map::{ColorMap, apply_map};
pub use matrix::{VisionMatrix, apply_matrix};

use crate::color::ColorTuple;

/// How a vision recolors a tuple.
#[derive(Debug, Clone)]
pub enum VisionTransform {
    /// Linear-light 3x3 matrix. Inputs are linearized first.
    LinearMatrix(VisionMatrix),
    /// Black-box map over gamma-encoded tuples. No linearization.
    CustomMap(ColorMap),
}

impl VisionTransform {
    /// The matrix, for matrix visions.
    pub fn matrix(&self) -> Option<&VisionMatrix> {
        match self {
            Self::LinearMatrix(m) => Some(m),
            Self::CustomMap(_) => None,
        }
    }

    /// Whether this is a custom map.
    pub fn is_map(&self) -> bool {
        matches!(self, Self::CustomMap(_))
    }
}

impl From<VisionMatrix> for VisionTransform {
    fn from(m: VisionMatrix) -> Self {
        Self::LinearMatrix(m)
    }
}

impl From<ColorMap> for VisionTransform {
    fn from(map: ColorMap) -> Self {
        Self::CustomMap(map)
    }
}

/// Apply a transform to `tuple` exactly as given.
///
/// No gamma conversion happens here: matrix callers pass linear tuples,
/// map callers pass encoded ones. See [`crate::pipeline`] for the full chain.
pub fn apply_transform(transform: &VisionTransform, tuple: &ColorTuple) -> ColorTuple {
    match transform {
        VisionTransform::LinearMatrix(m) => apply_matrix(m, tuple),
        VisionTransform::CustomMap(map) => apply_map(map, tuple),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch() {
        let t = ColorTuple::rgb(1.0, 2.0, 3.0);
        let m = VisionTransform::from(VisionMatrix::identity());
        assert_eq!(apply_transform(&m, &t), t);
        assert!(!m.is_map());

        let zero = VisionTransform::from(ColorMap::new(|_| ColorTuple::rgb(0.0, 0.0, 0.0)));
        assert_eq!(apply_transform(&zero, &t), ColorTuple::rgb(0.0, 0.0, 0.0));
        assert!(zero.matrix().is_none());
    }
}
