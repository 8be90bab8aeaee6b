//! A single named vision: an optional description plus how it recolors.

use serde::{Deserialize, Serialize};

use crate::color::ColorTuple;
use crate::transform::{ColorMap, VisionMatrix, VisionTransform};

/// One vision entry in a registry.
///
/// A definition without a transform is valid (custom sets start out that
/// way) but applying it does nothing.
#[derive(Debug, Clone, Default)]
pub struct VisionDefinition {
    /// Human-readable description.
    pub description: Option<String>,
    /// The recoloring strategy, if one has been set.
    pub transform: Option<VisionTransform>,
}

impl VisionDefinition {
    /// An empty definition: no description, no transform.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A matrix vision.
    pub fn from_matrix(matrix: impl Into<VisionMatrix>) -> Self {
        Self {
            description: None,
            transform: Some(VisionTransform::LinearMatrix(matrix.into())),
        }
    }

    /// A custom-map vision.
    pub fn from_map<F>(f: F) -> Self
    where
        F: Fn(&ColorTuple) -> ColorTuple + Send + Sync + 'static,
    {
        Self {
            description: None,
            transform: Some(VisionTransform::CustomMap(ColorMap::new(f))),
        }
    }

    /// Builder-style description setter.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the transform with a matrix.
    pub fn set_matrix(&mut self, matrix: impl Into<VisionMatrix>) {
        self.transform = Some(VisionTransform::LinearMatrix(matrix.into()));
    }

    /// Replace the transform with a custom map.
    pub fn set_map<F>(&mut self, f: F)
    where
        F: Fn(&ColorTuple) -> ColorTuple + Send + Sync + 'static,
    {
        self.transform = Some(VisionTransform::CustomMap(ColorMap::new(f)));
    }

    /// The matrix, for matrix visions.
    pub fn matrix(&self) -> Option<&VisionMatrix> {
        self.transform.as_ref().and_then(VisionTransform::matrix)
    }

    /// Whether this vision recolors through a custom map.
    pub fn uses_map(&self) -> bool {
        self.transform.as_ref().is_some_and(VisionTransform::is_map)
    }

    /// Whether applying this definition is a no-op.
    pub fn is_empty(&self) -> bool {
        self.transform.is_none()
    }
}

/// What kind of transform a definition carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisionKind {
    /// Linear 3x3 matrix.
    Matrix,
    /// Custom map.
    Map,
    /// No transform set.
    Empty,
}

/// Serializable summary of a definition, for front ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionDetail {
    /// Vision name.
    pub name: String,
    /// Description, if any.
    pub description: Option<String>,
    /// Transform kind.
    pub kind: VisionKind,
    /// The matrix, for matrix visions.
    pub trans_matrix: Option<VisionMatrix>,
}

impl VisionDetail {
    /// Summarize `definition` under `name`.
    pub fn new(name: &str, definition: &VisionDefinition) -> Self {
        let kind = match &definition.transform {
            Some(VisionTransform::LinearMatrix(_)) => VisionKind::Matrix,
            Some(VisionTransform::CustomMap(_)) => VisionKind::Map,
            None => VisionKind::Empty,
        };
        Self {
            name: name.to_owned(),
            description: definition.description.clone(),
            kind,
            trans_matrix: definition.matrix().copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_definition() {
        let d = VisionDefinition::empty();
        assert!(d.is_empty());
        assert!(!d.uses_map());
        assert!(d.matrix().is_none());
        assert_eq!(VisionDetail::new("x", &d).kind, VisionKind::Empty);
    }

    #[test]
    fn test_setters_switch_strategy() {
        let mut d = VisionDefinition::empty();
        d.set_map(|t| t.clone());
        assert!(d.uses_map());
        d.set_matrix(VisionMatrix::identity());
        assert!(!d.uses_map());
        assert_eq!(d.matrix(), Some(&VisionMatrix::identity()));
    }

    #[test]
    fn test_detail_serializes_camel_case() {
        let d = VisionDefinition::from_matrix(VisionMatrix::identity()).with_description("none");
        let json = serde_json::to_value(VisionDetail::new("identity", &d)).unwrap();
        assert_eq!(json["kind"], "matrix");
        assert_eq!(json["description"], "none");
        assert_eq!(json["transMatrix"][1][1], 1.0);
    }
}
