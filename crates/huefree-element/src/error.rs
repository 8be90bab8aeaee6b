use huefree_core::ImageCodecError;

/// Errors reported by an element tree.
#[derive(Debug, thiserror::Error)]
pub enum ElementError {
    #[error("pixels of {0} are not readable (cross-origin resource?)")]
    PixelAccess(String),
    #[error("{0} is not an image")]
    NotAnImage(String),
    #[error(transparent)]
    Codec(#[from] ImageCodecError),
}
