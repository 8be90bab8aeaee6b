//! 3x3 linear-RGB transform matrices.

use serde::{Deserialize, Serialize};

use crate::color::{ColorTuple, RGB_CHANNELS};

/// A 3x3 matrix applied to linear RGB. Rows produce output channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisionMatrix(pub [[f64; 3]; 3]);

impl VisionMatrix {
    /// Returns the identity matrix (no-op transform).
    pub const fn identity() -> Self {
        Self([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Matrix rows.
    pub const fn rows(&self) -> &[[f64; 3]; 3] {
        &self.0
    }

    /// Apply this matrix to the RGB channels of `tuple`.
    ///
    /// `out[i] = Σ_j m[i][j] × in[j]` for `i, j` in `0..3`. Alpha is copied
    /// through and the result has the input's length. Missing channels of a
    /// short tuple read as zero and are not added to the output.
    pub fn apply(&self, tuple: &ColorTuple) -> ColorTuple {
        let input = tuple.as_slice();
        let channel = |j: usize| input.get(j).copied().unwrap_or(0.0);

        let mut out = tuple.clone();
        for (i, row) in self.0.iter().enumerate().take(input.len().min(RGB_CHANNELS)) {
            out[i] = row[0] * channel(0) + row[1] * channel(1) + row[2] * channel(2);
        }
        out
    }
}

impl Default for VisionMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[[f64; 3]; 3]> for VisionMatrix {
    fn from(rows: [[f64; 3]; 3]) -> Self {
        Self(rows)
    }
}

/// Apply `matrix` to `tuple`. See [`VisionMatrix::apply`].
pub fn apply_matrix(matrix: &VisionMatrix, tuple: &ColorTuple) -> ColorTuple {
    matrix.apply(tuple)
}
