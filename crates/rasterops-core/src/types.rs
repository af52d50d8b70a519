//! Core types shared by every transform.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::storage::{convert, PixelFormat, PixelStorage};

/// Error types for transform and storage operations.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A pixel buffer could not be allocated.
    #[error("Out of memory: {0}")]
    OutOfMemory(#[from] TryReserveError),

    /// The pixel buffer does not hold `width * height` entries.
    #[error("Pixel buffer size mismatch: expected {expected} pixels, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Conversion to an indexed format was requested without a palette.
    #[error("Indexed conversion requires a non-empty palette")]
    MissingPalette,

    /// Indexed storage supports at most 256 palette entries.
    #[error("Palette has {0} entries, at most 256 are supported")]
    PaletteTooLarge(usize),

    /// Requested output dimensions cannot be produced.
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// A raster image: dimensions plus exclusively owned pixel storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Row-major pixel data holding exactly `width * height` entries.
    pub pixels: PixelStorage,
}

impl Image {
    /// Create an image, checking that the storage matches the dimensions.
    pub fn new(width: usize, height: usize, pixels: PixelStorage) -> Result<Self, TransformError> {
        let expected = width
            .checked_mul(height)
            .ok_or_else(|| TransformError::InvalidDimensions(format!("{width}x{height} overflows")))?;
        if pixels.len() != expected {
            return Err(TransformError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Allocate a zero-filled image of the given format.
    ///
    /// Indexed images start with an empty palette.
    pub fn allocate(
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> Result<Self, TransformError> {
        let count = width
            .checked_mul(height)
            .ok_or_else(|| TransformError::InvalidDimensions(format!("{width}x{height} overflows")))?;
        Ok(Self {
            width,
            height,
            pixels: PixelStorage::allocate(format, count)?,
        })
    }

    /// Pixel format of the underlying storage.
    pub fn format(&self) -> PixelFormat {
        self.pixels.format()
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.as_bytes().len()
    }

    /// Check if this image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Mirror the image top to bottom in place.
    pub fn flip_vertically(&mut self) -> Result<(), TransformError> {
        crate::transform::flip_vertically(self.pixels.as_bytes_mut(), self.height)
    }

    /// Convert to another pixel format, keeping dimensions.
    ///
    /// Converting to `Indexed8` maps onto `palette`, or onto the image's own
    /// palette when it is already indexed and `palette` is `None`.
    pub fn convert(
        &self,
        format: PixelFormat,
        palette: Option<&[[u8; 4]]>,
    ) -> Result<Self, TransformError> {
        let palette = palette.or_else(|| self.pixels.palette());
        Ok(Self {
            width: self.width,
            height: self.height,
            pixels: convert(&self.pixels, format, palette)?,
        })
    }

    /// Create an `Image` from an `image::DynamicImage`.
    ///
    /// Formats with a direct storage counterpart are copied without conversion,
    /// everything else is widened to RGBA f32.
    pub fn from_dynamic(img: image::DynamicImage) -> Self {
        use image::DynamicImage;

        let (width, height) = (img.width() as usize, img.height() as usize);
        let pixels = match img {
            DynamicImage::ImageLuma8(buf) => PixelStorage::Gray8(buf.into_raw()),
            DynamicImage::ImageLumaA8(buf) => {
                PixelStorage::GrayAlpha8(bytemuck::cast_slice(&buf.into_raw()).to_vec())
            }
            DynamicImage::ImageRgb8(buf) => {
                PixelStorage::Rgb8(bytemuck::cast_slice(&buf.into_raw()).to_vec())
            }
            DynamicImage::ImageRgba8(buf) => {
                PixelStorage::Rgba8(bytemuck::cast_slice(&buf.into_raw()).to_vec())
            }
            DynamicImage::ImageRgba16(buf) => {
                PixelStorage::Rgba16(bytemuck::cast_slice(&buf.into_raw()).to_vec())
            }
            DynamicImage::ImageRgba32F(buf) => {
                PixelStorage::RgbaF32(bytemuck::cast_slice(&buf.into_raw()).to_vec())
            }
            other => PixelStorage::RgbaF32(
                bytemuck::cast_slice(&other.into_rgba32f().into_raw()).to_vec(),
            ),
        };
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an `image::DynamicImage` for further processing.
    ///
    /// Indexed images are expanded through their palette to RGBA8. Returns
    /// `None` if the dimensions do not fit in `u32`.
    pub fn to_dynamic(&self) -> Option<image::DynamicImage> {
        use image::{DynamicImage, ImageBuffer};

        let width = u32::try_from(self.width).ok()?;
        let height = u32::try_from(self.height).ok()?;
        let img = match &self.pixels {
            PixelStorage::Gray8(data) => {
                DynamicImage::ImageLuma8(ImageBuffer::from_raw(width, height, data.clone())?)
            }
            PixelStorage::GrayAlpha8(data) => DynamicImage::ImageLumaA8(ImageBuffer::from_raw(
                width,
                height,
                bytemuck::cast_slice(data).to_vec(),
            )?),
            PixelStorage::Rgb8(data) => DynamicImage::ImageRgb8(ImageBuffer::from_raw(
                width,
                height,
                bytemuck::cast_slice(data).to_vec(),
            )?),
            PixelStorage::Rgba8(data) => DynamicImage::ImageRgba8(ImageBuffer::from_raw(
                width,
                height,
                bytemuck::cast_slice(data).to_vec(),
            )?),
            PixelStorage::Rgba16(data) => DynamicImage::ImageRgba16(ImageBuffer::from_raw(
                width,
                height,
                bytemuck::cast_slice(data).to_vec(),
            )?),
            PixelStorage::RgbaF32(data) => DynamicImage::ImageRgba32F(ImageBuffer::from_raw(
                width,
                height,
                bytemuck::cast_slice(data).to_vec(),
            )?),
            PixelStorage::Indexed8 { .. } => {
                let expanded = convert(&self.pixels, PixelFormat::Rgba8, None).ok()?;
                DynamicImage::ImageRgba8(ImageBuffer::from_raw(
                    width,
                    height,
                    expanded.as_bytes().to_vec(),
                )?)
            }
        };
        Some(img)
    }
}
