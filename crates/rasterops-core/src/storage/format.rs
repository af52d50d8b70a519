//! Pixel format descriptors.

use serde::{Deserialize, Serialize};

/// Layout of a single pixel in a [`PixelStorage`](super::PixelStorage) buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    /// One byte per pixel indexing into an RGBA8 palette.
    Indexed8,
    /// 8-bit grayscale.
    Gray8,
    /// 8-bit grayscale with alpha.
    GrayAlpha8,
    /// 8-bit RGB.
    Rgb8,
    /// 8-bit RGBA.
    Rgba8,
    /// 16-bit RGBA, native endian.
    Rgba16,
    /// 32-bit float RGBA.
    RgbaF32,
}

impl PixelFormat {
    /// All supported formats.
    pub const ALL: [PixelFormat; 7] = [
        PixelFormat::Indexed8,
        PixelFormat::Gray8,
        PixelFormat::GrayAlpha8,
        PixelFormat::Rgb8,
        PixelFormat::Rgba8,
        PixelFormat::Rgba16,
        PixelFormat::RgbaF32,
    ];

    /// Bytes per pixel.
    #[inline]
    pub fn pixel_stride(self) -> usize {
        match self {
            PixelFormat::Indexed8 | PixelFormat::Gray8 => 1,
            PixelFormat::GrayAlpha8 => 2,
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
            PixelFormat::Rgba16 => 8,
            PixelFormat::RgbaF32 => 16,
        }
    }

    /// Returns true if pixels are palette indices.
    #[inline]
    pub fn is_indexed(self) -> bool {
        matches!(self, PixelFormat::Indexed8)
    }

    /// Returns true if the format stores a per-pixel alpha channel.
    ///
    /// Indexed pixels carry alpha through their palette entries.
    #[inline]
    pub fn has_alpha(self) -> bool {
        !matches!(self, PixelFormat::Gray8 | PixelFormat::Rgb8)
    }
}
