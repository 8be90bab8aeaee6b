//! Applies a vision to elements, their color-bearing styles, and images.
//!
//! Images are recolored one of two ways, picked by the vision's transform:
//!
//! - matrix visions install a reusable SVG color-matrix filter and point the
//!   element's `filter` property at it; pixels are left alone.
//! - map visions read the decoded pixels, run every pixel through the map,
//!   and write a new encoded image back.
//!
//! Both wait for an image that is still loading before touching it.

use std::collections::{HashMap, VecDeque};

use huefree_core::color::codec::contains_color;
use huefree_core::{ColorMatrixFilter, VisionPipeline, VisionSource, VisionTransform};
use parking_lot::Mutex;

use crate::ElementTree;

/// CSS property the filter strategy writes.
const FILTER_PROPERTY: &str = "filter";

/// What happened to an image element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    /// The node is not an image.
    NotImage,
    /// A color-matrix filter was applied.
    Filtered {
        /// Id of the filter the element now references.
        filter_id: String,
    },
    /// Pixels were recolored and written back.
    Recolored {
        /// Distinct source colors in the image.
        distinct_colors: usize,
    },
    /// Pixels could not be read or written. Already logged.
    Failed,
}

/// Result of recoloring one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementReport {
    /// Style properties rewritten.
    pub properties: usize,
    /// Image handling.
    pub image: ImageOutcome,
}

/// Result of recoloring a subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecursiveReport {
    /// Element nodes visited.
    pub elements: usize,
    /// Style properties rewritten across the subtree.
    pub properties: usize,
    /// Outcome for each image, in traversal order.
    pub images: Vec<ImageOutcome>,
}

/// Recolors element trees with visions from one registry.
pub struct ElementRecolorer<'a> {
    pipeline: VisionPipeline<'a>,
    /// Filters built so far, by vision name. The registry is borrowed for
    /// the recolorer's lifetime, so entries cannot go stale.
    filters: Mutex<HashMap<String, ColorMatrixFilter>>,
}

impl ElementRecolorer<'static> {
    /// A recolorer over the built-in vision table.
    pub fn builtin() -> Self {
        Self::from_pipeline(VisionPipeline::builtin())
    }
}

impl<'a> ElementRecolorer<'a> {
    /// A recolorer reading visions from `visions`.
    pub fn new(visions: &'a dyn VisionSource) -> Self {
        Self::from_pipeline(VisionPipeline::new(visions))
    }

    /// Wrap an existing pipeline.
    pub fn from_pipeline(pipeline: VisionPipeline<'a>) -> Self {
        Self {
            pipeline,
            filters: Mutex::new(HashMap::new()),
        }
    }

    /// The underlying text pipeline.
    pub fn pipeline(&self) -> &VisionPipeline<'a> {
        &self.pipeline
    }

    /// Recolor a CSS string. Same contract as [`VisionPipeline::apply`].
    pub fn apply_text(&self, text: &str, vision: &str) -> Option<String> {
        self.pipeline.apply(text, vision)
    }

    /// Recolor one element.
    ///
    /// Returns `None` for an unknown or empty vision. Image elements that are
    /// still loading are waited for; if the load never completes, neither
    /// does this call.
    pub async fn apply_vision<T: ElementTree>(
        &self,
        tree: &mut T,
        node: T::Node,
        vision: &str,
    ) -> Option<ElementReport> {
        let transform = self.pipeline.transform_of(vision)?;

        let image = if tree.is_image(node) {
            if !tree.is_loaded(node) {
                tracing::debug!("waiting for image {node:?} to load");
                tree.subscribe_loaded(node).wait().await;
            }
            match transform {
                VisionTransform::LinearMatrix(_) => self.apply_filter(tree, node, vision),
                VisionTransform::CustomMap(_) => self.recolor_image(tree, node, vision),
            }
        } else {
            ImageOutcome::NotImage
        };

        let styles = color_styles(tree, node);
        let properties = self.rewrite_styles(tree, node, &styles, vision);
        Some(ElementReport { properties, image })
    }

    /// Recolor `root` and every element below it.
    ///
    /// Nodes are discovered breadth-first and their color-bearing properties
    /// snapshotted before anything is written, then processed in discovery
    /// order. Images go through [`Self::apply_vision`].
    pub async fn apply_vision_recursive<T: ElementTree>(
        &self,
        tree: &mut T,
        root: T::Node,
        vision: &str,
    ) -> Option<RecursiveReport> {
        self.pipeline.transform_of(vision)?;

        let mut snapshot = Vec::new();
        let mut queue = VecDeque::from([root]);
        while let Some(node) = queue.pop_front() {
            if tree.is_element(node) {
                snapshot.push((node, color_styles(tree, node)));
            }
            queue.extend(tree.children(node));
        }

        let mut report = RecursiveReport::default();
        for (node, styles) in snapshot {
            report.elements += 1;
            if tree.is_image(node) {
                if let Some(r) = self.apply_vision(tree, node, vision).await {
                    report.properties += r.properties;
                    report.images.push(r.image);
                }
                continue;
            }
            report.properties += self.rewrite_styles(tree, node, &styles, vision);
        }

        tracing::debug!(
            "applied '{vision}' to {} elements ({} properties)",
            report.elements,
            report.properties
        );
        Some(report)
    }

    fn rewrite_styles<T: ElementTree>(
        &self,
        tree: &mut T,
        node: T::Node,
        styles: &[(String, String)],
        vision: &str,
    ) -> usize {
        let mut written = 0;
        for (property, value) in styles {
            if let Some(recolored) = self.pipeline.apply(value, vision) {
                tree.set_style(node, property, &recolored);
                written += 1;
            }
        }
        written
    }

    fn apply_filter<T: ElementTree>(
        &self,
        tree: &mut T,
        node: T::Node,
        vision: &str,
    ) -> ImageOutcome {
        let filter = {
            let mut filters = self.filters.lock();
            match filters.get(vision) {
                Some(f) => f.clone(),
                None => {
                    let Some(f) = self.pipeline.filter_for(vision) else {
                        return ImageOutcome::Failed;
                    };
                    filters.insert(vision.to_owned(), f.clone());
                    f
                }
            }
        };

        if !tree.has_filter(filter.id()) {
            tracing::debug!("installing filter {}", filter.id());
            tree.install_filter(&filter);
        }
        tree.set_style(node, FILTER_PROPERTY, &filter.css_reference());
        ImageOutcome::Filtered {
            filter_id: filter.id().to_owned(),
        }
    }

    fn recolor_image<T: ElementTree>(
        &self,
        tree: &mut T,
        node: T::Node,
        vision: &str,
    ) -> ImageOutcome {
        let mut pixels = match tree.read_pixels(node) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!("error processing image {node:?}: {e}");
                return ImageOutcome::Failed;
            }
        };

        let Some(distinct_colors) = self.pipeline.recolor_pixels(&mut pixels, vision) else {
            return ImageOutcome::Failed;
        };

        if let Err(e) = tree.write_pixels(node, &pixels) {
            tracing::error!("error writing image {node:?}: {e}");
            return ImageOutcome::Failed;
        }
        ImageOutcome::Recolored { distinct_colors }
    }
}

/// Computed properties whose value contains a color.
fn color_styles<T: ElementTree>(tree: &T, node: T::Node) -> Vec<(String, String)> {
    let mut styles = tree.computed_styles(node);
    styles.retain(|(_, value)| contains_color(value));
    styles
}
