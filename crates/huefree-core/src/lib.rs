//! HueFree Core: color-vision deficiency simulation for CSS colors.
//!
//! Parses `rgb()`/`rgba()` text, moves it between sRGB and linear light,
//! applies a vision's matrix or custom map, and writes the result back into
//! the original text. Synchronous and stateless; registries are the only
//! data that outlives a call.

pub mod color;
pub mod error;
pub mod filter;
pub mod image;
pub mod pipeline;
pub mod transform;
pub mod vision;

// Re-exports for convenience.
pub use color::codec::{FormattedColor, format_color, parse_color, substitute_color};
pub use color::gamma::{delinearize, linearize};
pub use color::{ColorInput, ColorTuple};
pub use error::{ImageCodecError, VisionSetError};
pub use filter::ColorMatrixFilter;
pub use image::PixelBuffer;
pub use pipeline::{VisionPipeline, apply_vision};
pub use transform::{ColorMap, VisionMatrix, VisionTransform, apply_transform};
pub use vision::{
    BuiltinVisions, CustomVisionSet, VisionDefinition, VisionDetail, VisionSource,
    builtin_visions, get_vision_detail, list_visions,
};
