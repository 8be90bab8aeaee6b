//! Vision registries: the built-in table, custom sets, and lookups over both.

pub mod builtin;
pub mod custom;
pub mod definition;

pub use builtin::{BuiltinVisions, builtin_visions};
pub use custom::CustomVisionSet;
pub use definition::{VisionDefinition, VisionDetail, VisionKind};

/// A name → definition lookup the pipeline reads visions from.
pub trait VisionSource {
    /// The definition registered under `name`.
    fn vision(&self, name: &str) -> Option<&VisionDefinition>;

    /// All names, in the registry's natural order.
    fn vision_names(&self) -> Vec<&str>;
}

/// Names of every vision in `source`.
pub fn list_visions(source: &dyn VisionSource) -> Vec<&str> {
    source.vision_names()
}

/// The definition for `name`, if registered.
pub fn get_vision_detail<'a>(
    name: &str,
    source: &'a dyn VisionSource,
) -> Option<&'a VisionDefinition> {
    source.vision(name)
}
