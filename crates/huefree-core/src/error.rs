use std::path::PathBuf;

/// Errors loading or saving a custom vision set.
#[derive(Debug, thiserror::Error)]
pub enum VisionSetError {
    #[error("invalid vision set JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read vision set {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors decoding or encoding an image resource.
#[derive(Debug, thiserror::Error)]
pub enum ImageCodecError {
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("failed to encode image: {0}")]
    Encode(image::ImageError),
    #[error("pixel data does not match {width}x{height}")]
    Dimensions { width: u32, height: u32 },
    #[error("not a base64 PNG data URL")]
    DataUrl,
}
