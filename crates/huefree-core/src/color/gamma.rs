//! sRGB gamma curves (IEC 61966-2-1) over 8-bit-scaled color tuples.
//!
//! ```text
//! to linear:  v = c / 255
//!             v <= 0.04045   → v / 12.92
//!             v >  0.04045   → ((v + 0.055) / 1.055) ^ 2.4
//!
//! to gamma:   l <= 0.0031308 → 255 × 12.92 × l
//!             l >  0.0031308 → 255 × (1.055 × l^(1/2.4) − 0.055)
//! ```
//!
//! Only the first three components are touched; alpha and anything past it
//! pass through unchanged. Results are not clamped.

use super::{ColorInput, ColorTuple};

/// Full-scale value of a gamma-encoded channel.
pub const MAX_CHANNEL: f64 = 255.0;

const DECODE_THRESHOLD: f64 = 0.04045;
const ENCODE_THRESHOLD: f64 = 0.0031308;
const LINEAR_SLOPE: f64 = 12.92;
const OFFSET: f64 = 0.055;
const GAMMA: f64 = 2.4;

/// Decode one normalized sRGB channel (`0..=1`) to linear light.
#[inline]
pub fn channel_to_linear(encoded: f64) -> f64 {
    if encoded <= DECODE_THRESHOLD {
        encoded / LINEAR_SLOPE
    } else {
        ((encoded + OFFSET) / (1.0 + OFFSET)).powf(GAMMA)
    }
}

/// Encode one linear channel to normalized sRGB (`0..=1`).
#[inline]
pub fn channel_to_gamma(linear: f64) -> f64 {
    if linear <= ENCODE_THRESHOLD {
        LINEAR_SLOPE * linear
    } else {
        (1.0 + OFFSET) * linear.powf(1.0 / GAMMA) - OFFSET
    }
}

/// Convert a gamma-encoded tuple (`0..=255` channels) to linear light.
///
/// Accepts CSS text or a tuple; text without a color yields `None`.
pub fn linearize<'a>(color: impl Into<ColorInput<'a>>) -> Option<ColorTuple> {
    let mut tuple = color.into().into_tuple()?;
    for c in tuple.channels_mut() {
        *c = channel_to_linear(*c / MAX_CHANNEL);
    }
    Some(tuple)
}

/// Convert a linear tuple back to gamma-encoded `0..=255` channels.
///
/// Accepts CSS text or a tuple; text without a color yields `None`.
pub fn delinearize<'a>(color: impl Into<ColorInput<'a>>) -> Option<ColorTuple> {
    let mut tuple = color.into().into_tuple()?;
    for c in tuple.channels_mut() {
        *c = MAX_CHANNEL * channel_to_gamma(*c);
    }
    Some(tuple)
}
