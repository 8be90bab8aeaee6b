//! Element-tree recoloring for HueFree.
//!
//! Defines the [`ElementTree`] trait that abstracts over whatever hosts the
//! styled elements (a browser DOM binding, a UI toolkit, the in-memory
//! [`MemoryTree`]). The recolorer only needs to read computed styles, write
//! single style properties, walk children, and reach image pixels once an
//! image has finished loading.

pub mod error;
pub mod load;
pub mod memory;
pub mod recolor;

use std::fmt::Debug;
use std::hash::Hash;

use huefree_core::{ColorMatrixFilter, PixelBuffer};

pub use error::ElementError;
pub use load::{LoadNotifier, LoadSignal};
pub use memory::{MemoryTree, NodeId};
pub use recolor::{ElementRecolorer, ElementReport, ImageOutcome, RecursiveReport};

// ── Tree contract ────────────────────────────────────────────────

/// A tree of styled nodes the recolorer can read and write.
pub trait ElementTree {
    /// Handle to a node. Cheap to copy.
    type Node: Copy + Eq + Hash + Debug;

    /// Whether `node` is an element (as opposed to text or comments).
    /// Only elements carry styles.
    fn is_element(&self, node: Self::Node) -> bool;

    /// Whether `node` is an image element.
    fn is_image(&self, node: Self::Node) -> bool;

    /// Computed style properties as `(name, value)` pairs.
    ///
    /// The order must be stable between calls.
    fn computed_styles(&self, node: Self::Node) -> Vec<(String, String)>;

    /// Write one style property.
    fn set_style(&mut self, node: Self::Node, property: &str, value: &str);

    /// Direct children, in document order.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Whether an image has finished loading. Non-images count as loaded.
    fn is_loaded(&self, node: Self::Node) -> bool;

    /// A signal that resolves once the image has finished loading.
    fn subscribe_loaded(&self, node: Self::Node) -> LoadSignal;

    /// Decoded pixels of an image.
    fn read_pixels(&self, node: Self::Node) -> Result<PixelBuffer, ElementError>;

    /// Replace an image's pixels, producing a new encoded resource.
    fn write_pixels(&mut self, node: Self::Node, pixels: &PixelBuffer)
    -> Result<(), ElementError>;

    /// Whether a filter with this id is already installed.
    fn has_filter(&self, id: &str) -> bool;

    /// Install a filter definition so style properties can reference it.
    fn install_filter(&mut self, filter: &ColorMatrixFilter);
}
