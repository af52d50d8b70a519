//! sRGB transfer functions and alpha premultiplication.
//!
//! Resampling happens in linear light on premultiplied pixels. These helpers
//! move a [`Colorf32`] into and out of that working space. Alpha is never
//! passed through a transfer function.

use crate::storage::Colorf32;

/// Alpha at or below this value is treated as opaque when un-premultiplying.
pub const ALPHA_EPSILON: f32 = 1e-6;

/// sRGB electro-optical transfer: encoded value to linear light.
#[inline]
pub fn srgb_to_linear(s: f32) -> f32 {
    if s <= 0.04045 {
        s / 12.92
    } else {
        ((s + 0.055) / 1.055).powf(2.4)
    }
}

/// Inverse of [`srgb_to_linear`].
#[inline]
pub fn linear_to_srgb(l: f32) -> f32 {
    if l <= 0.0031308 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

/// Linearize RGB, then multiply it by alpha.
#[inline]
pub fn linearize_premultiply(c: Colorf32) -> Colorf32 {
    Colorf32::new(
        srgb_to_linear(c.r) * c.a,
        srgb_to_linear(c.g) * c.a,
        srgb_to_linear(c.b) * c.a,
        c.a,
    )
}

/// Divide RGB by alpha, then re-encode it as sRGB.
///
/// Near-zero alpha divides by one instead, so fully transparent pixels keep
/// their (zero) premultiplied colour rather than blowing up.
#[inline]
pub fn unpremultiply_delinearize(c: Colorf32) -> Colorf32 {
    let a = if c.a <= ALPHA_EPSILON { 1.0 } else { c.a };
    Colorf32::new(
        linear_to_srgb(c.r / a),
        linear_to_srgb(c.g / a),
        linear_to_srgb(c.b / a),
        c.a,
    )
}
