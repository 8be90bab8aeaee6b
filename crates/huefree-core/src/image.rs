//! 8-bit RGBA pixel buffers and their encoded forms.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};

use crate::error::ImageCodecError;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Decoded image pixels, row-major, one `[r, g, b, a]` per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data, `width × height` entries.
    pub pixels: Vec<[u8; 4]>,
}

impl PixelBuffer {
    /// Wrap pixel data, checking it matches the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 4]>) -> Result<Self, ImageCodecError> {
        if pixels.len() as u64 != u64::from(width) * u64::from(height) {
            return Err(ImageCodecError::Dimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decode any supported encoded image (PNG, JPEG).
    pub fn decode(bytes: &[u8]) -> Result<Self, ImageCodecError> {
        let img = image::load_from_memory(bytes).map_err(ImageCodecError::Decode)?;
        Ok(Self::from(img.to_rgba8()))
    }

    /// Decode a `data:image/png;base64,` URL.
    pub fn from_data_url(url: &str) -> Result<Self, ImageCodecError> {
        let payload = url
            .strip_prefix(PNG_DATA_URL_PREFIX)
            .ok_or(ImageCodecError::DataUrl)?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|_| ImageCodecError::DataUrl)?;
        Self::decode(&bytes)
    }

    /// Convert to an `image` RGBA buffer.
    pub fn to_rgba_image(&self) -> Result<RgbaImage, ImageCodecError> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.as_flattened().to_vec()).ok_or(
            ImageCodecError::Dimensions {
                width: self.width,
                height: self.height,
            },
        )
    }

    /// Encode as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, ImageCodecError> {
        let img = self.to_rgba_image()?;
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png)
            .map_err(ImageCodecError::Encode)?;
        Ok(out.into_inner())
    }

    /// Encode as a `data:image/png;base64,` URL.
    pub fn to_data_url(&self) -> Result<String, ImageCodecError> {
        let png = self.encode_png()?;
        Ok(format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(png)))
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.pixels().map(|p| p.0).collect(),
        }
    }
}
