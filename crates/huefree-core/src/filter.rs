//! SVG `feColorMatrix` filters for matrix visions.
//!
//! A filter recolors an image without touching its pixels. The filter id is
//! derived from the vision name and the matrix, so one filter serves every
//! element recolored with that vision, and two filters share an id only if
//! both name and matrix are equal.

use std::fmt::Write;

use sha2::{Digest, Sha256};

use crate::transform::VisionMatrix;

const ID_PREFIX: &str = "huefree-";
/// Bytes of the matrix digest kept in the id.
const DIGEST_BYTES: usize = 8;

/// A reusable color-matrix filter for one vision.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMatrixFilter {
    id: String,
    matrix: VisionMatrix,
}

impl ColorMatrixFilter {
    /// Build the filter for `vision`.
    pub fn new(vision: &str, matrix: &VisionMatrix) -> Self {
        Self {
            id: filter_id(vision, matrix),
            matrix: *matrix,
        }
    }

    /// Element id of the `<filter>`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The 4x5 `values` list: RGB rows from the matrix, alpha untouched.
    pub fn values(&self) -> String {
        let mut rows: Vec<String> = self
            .matrix
            .rows()
            .iter()
            .map(|r| format!("{} {} {} 0 0", r[0], r[1], r[2]))
            .collect();
        rows.push("0 0 0 1 0".to_owned());
        rows.join(" ")
    }

    /// A zero-size `<svg>` element holding the filter definition.
    pub fn to_svg(&self) -> String {
        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="0" height="0">"#,
                r#"<filter id="{}"><feColorMatrix type="matrix" values="{}"/></filter>"#,
                "</svg>"
            ),
            self.id,
            self.values()
        )
    }

    /// Value for the CSS `filter` property.
    pub fn css_reference(&self) -> String {
        format!("url(#{})", self.id)
    }
}

/// `huefree-<escaped name>-<matrix digest>`.
///
/// ASCII alphanumerics and `-` are kept; every other byte becomes `_` plus
/// two hex digits, so distinct names never escape to the same text. The
/// digest has a fixed width, which keeps the split point unambiguous.
fn filter_id(vision: &str, matrix: &VisionMatrix) -> String {
    let mut id = String::with_capacity(ID_PREFIX.len() + vision.len() + 2 * DIGEST_BYTES + 1);
    id.push_str(ID_PREFIX);
    for b in vision.bytes() {
        if b.is_ascii_alphanumeric() || b == b'-' {
            id.push(char::from(b));
        } else {
            let _ = write!(id, "_{b:02x}");
        }
    }
    id.push('-');
    for b in matrix_digest(matrix).iter().take(DIGEST_BYTES) {
        let _ = write!(id, "{b:02x}");
    }
    id
}

fn matrix_digest(matrix: &VisionMatrix) -> Vec<u8> {
    let mut hasher = Sha256::new();
    for v in matrix.rows().as_flattened() {
        hasher.update(v.to_bits().to_le_bytes());
    }
    hasher.finalize().to_vec()
}
