//! Caller-built vision sets.
//!
//! A set keeps insertion order. Entries start empty and are filled in with
//! [`CustomVisionSet::vision_mut`] or replaced with [`CustomVisionSet::define`].
//! Sets are plain owned data; concurrent mutation must be serialized by the
//! caller.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{VisionDefinition, VisionSource};
use crate::error::VisionSetError;
use crate::transform::VisionMatrix;

/// An ordered, mutable mapping from vision name to definition.
#[derive(Debug, Clone, Default)]
pub struct CustomVisionSet {
    entries: Vec<(String, VisionDefinition)>,
}

/// On-disk form of one vision. Maps cannot be stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VisionRecord {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trans_matrix: Option<VisionMatrix>,
}

impl CustomVisionSet {
    /// A set seeded with empty definitions for `names`.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        set.add_visions(names);
        set
    }

    /// Insert empty definitions for `names`.
    ///
    /// A name already present is reset to an empty definition but keeps its
    /// position.
    pub fn add_visions<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.define(name, VisionDefinition::empty());
        }
    }

    /// Remove `names`. Names not in the set are ignored.
    pub fn remove_visions<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            self.entries.retain(|(n, _)| n != name);
        }
    }

    /// Insert or replace a definition. Replacing keeps the entry's position.
    pub fn define(&mut self, name: impl Into<String>, definition: VisionDefinition) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = definition,
            None => self.entries.push((name, definition)),
        }
    }

    /// Mutable access to a definition.
    pub fn vision_mut(&mut self, name: &str) -> Option<&mut VisionDefinition> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d)
    }

    /// Number of visions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a set from a JSON array of `{ name, description?, transMatrix? }`.
    pub fn from_json(json: &str) -> Result<Self, VisionSetError> {
        let records: Vec<VisionRecord> = serde_json::from_str(json)?;
        let mut set = Self::default();
        for record in records {
            let mut definition = VisionDefinition::empty();
            definition.description = record.description;
            if let Some(matrix) = record.trans_matrix {
                definition.set_matrix(matrix);
            }
            set.define(record.name, definition);
        }
        tracing::debug!("loaded {} custom visions", set.len());
        Ok(set)
    }

    /// Load a set from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, VisionSetError> {
        let json = std::fs::read_to_string(path).map_err(|source| VisionSetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Serialize the set. Map transforms are dropped with a warning.
    pub fn to_json(&self) -> Result<String, VisionSetError> {
        let records: Vec<VisionRecord> = self
            .entries
            .iter()
            .map(|(name, d)| {
                if d.uses_map() {
                    tracing::warn!("vision '{name}' uses a custom map, which cannot be saved");
                }
                VisionRecord {
                    name: name.clone(),
                    description: d.description.clone(),
                    trans_matrix: d.matrix().copied(),
                }
            })
            .collect();
        Ok(serde_json::to_string_pretty(&records)?)
    }
}

impl VisionSource for CustomVisionSet {
    fn vision(&self, name: &str) -> Option<&VisionDefinition> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d)
    }

    fn vision_names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }
}
