//! The recoloring pipeline. Applies a named vision to CSS text, tuples and
//! pixel buffers.
//!
//! Matrix visions run the full chain:
//!
//! ```text
//!   text ──→ parse ──→ linearize ──→ matrix ──→ delinearize ──→ format ──→ substitute
//! ```
//!
//! Map visions skip both gamma stages and hand the encoded tuple straight to
//! the map:
//!
//! ```text
//!   text ──→ parse ──→ map ──→ format ──→ substitute
//! ```
//!
//! Nothing here fails. An unknown vision, or one whose definition has no
//! transform, yields `None`; text without a color comes back unchanged.

use std::collections::HashMap;

use crate::color::ColorTuple;
use crate::color::codec::{contains_color, format_color, parse_color, substitute_color};
use crate::color::gamma::{delinearize, linearize};
use crate::filter::ColorMatrixFilter;
use crate::image::PixelBuffer;
use crate::transform::{VisionTransform, apply_map, apply_matrix};
use crate::vision::{VisionSource, builtin_visions};

/// Applies visions looked up from an injected registry.
#[derive(Clone, Copy)]
pub struct VisionPipeline<'a> {
    visions: &'a dyn VisionSource,
}

impl VisionPipeline<'static> {
    /// A pipeline over the built-in vision table.
    pub fn builtin() -> Self {
        Self::new(builtin_visions())
    }
}

impl<'a> VisionPipeline<'a> {
    /// A pipeline reading visions from `visions`.
    pub fn new(visions: &'a dyn VisionSource) -> Self {
        Self { visions }
    }

    /// The registry this pipeline reads from.
    pub fn visions(&self) -> &'a dyn VisionSource {
        self.visions
    }

    /// The transform registered for `vision`, if there is anything to apply.
    pub fn transform_of(&self, vision: &str) -> Option<&'a VisionTransform> {
        let Some(definition) = self.visions.vision(vision) else {
            tracing::debug!("unknown vision '{vision}'");
            return None;
        };
        if definition.transform.is_none() {
            tracing::debug!("vision '{vision}' has no transform set");
        }
        definition.transform.as_ref()
    }

    /// Recolor the first color in `text`.
    ///
    /// Returns `None` for an unknown or empty vision and `text` unchanged
    /// when it holds no color. Anything around the color is kept, so whole
    /// style values such as `1px solid rgb(..)` can be passed in.
    pub fn apply(&self, text: &str, vision: &str) -> Option<String> {
        let transform = self.transform_of(vision)?;
        if !contains_color(text) {
            return Some(text.to_owned());
        }

        let tuple = parse_color(text)?;
        let recolored = recolor(transform, &tuple)?;
        let value = format_color(&recolored).to_string();
        Some(substitute_color(text, &value))
    }

    /// Recolor a gamma-encoded tuple.
    pub fn transform_tuple(&self, tuple: &ColorTuple, vision: &str) -> Option<ColorTuple> {
        recolor(self.transform_of(vision)?, tuple)
    }

    /// The SVG color-matrix filter for a matrix vision.
    ///
    /// Map visions cannot be expressed as a filter and yield `None`.
    pub fn filter_for(&self, vision: &str) -> Option<ColorMatrixFilter> {
        let matrix = self.transform_of(vision)?.matrix()?;
        Some(ColorMatrixFilter::new(vision, matrix))
    }

    /// Recolor every pixel of `buffer` in place.
    ///
    /// Results are stored as bytes: NaN becomes 0, values are clamped to
    /// `0..=255` and rounded half to even. Components a map leaves out keep
    /// their original value. Returns the number of distinct source colors.
    pub fn recolor_pixels(&self, buffer: &mut PixelBuffer, vision: &str) -> Option<usize> {
        let transform = self.transform_of(vision)?;

        let mut cache: HashMap<[u8; 4], [u8; 4]> = HashMap::new();
        for px in buffer.pixels.iter_mut() {
            if let Some(done) = cache.get(px) {
                *px = *done;
                continue;
            }
            let src = *px;
            let mut out = src;
            if let Some(recolored) = recolor(transform, &ColorTuple::from(src)) {
                for (dst, &c) in out.iter_mut().zip(recolored.as_slice()) {
                    *dst = to_byte(c);
                }
            }
            cache.insert(src, out);
            *px = out;
        }

        tracing::debug!(
            "recolored {}x{} pixels ({} distinct) with '{vision}'",
            buffer.width,
            buffer.height,
            cache.len()
        );
        Some(cache.len())
    }
}

/// Apply `vision` from `visions` to the first color in `text`.
/// See [`VisionPipeline::apply`].
pub fn apply_vision(text: &str, vision: &str, visions: &dyn VisionSource) -> Option<String> {
    VisionPipeline::new(visions).apply(text, vision)
}

fn recolor(transform: &VisionTransform, tuple: &ColorTuple) -> Option<ColorTuple> {
    match transform {
        VisionTransform::LinearMatrix(m) => {
            let linear = linearize(tuple)?;
            delinearize(apply_matrix(m, &linear))
        }
        VisionTransform::CustomMap(map) => Some(apply_map(map, tuple)),
    }
}

/// Byte conversion with canvas-style clamping.
fn to_byte(c: f64) -> u8 {
    if c.is_nan() {
        return 0;
    }
    c.clamp(0.0, 255.0).round_ties_even() as u8
}
