//! Rectangular cropping.
//!
//! A [`CropBox`] is an unvalidated request in pixel coordinates. [`crop`]
//! clamps it against the source dimensions and copies the covered rows into
//! newly allocated storage of the same format.
//!
//! # Coordinate System
//!
//! - (0, 0) = top-left pixel
//! - `x`/`y` are never moved by clamping; only `width`/`height` shrink
//!
//! # Example
//!
//! ```ignore
//! // Crop a 50x50 region starting at (25, 25)
//! let cropped = crop(&image, CropBox::new(25, 25, 50, 50))?;
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::storage::PixelStorage;
use crate::types::{Image, TransformError};

/// A candidate crop rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CropBox {
    /// Left edge of the region.
    pub x: usize,
    /// Top edge of the region.
    pub y: usize,
    /// Requested width; may overflow the image.
    pub width: usize,
    /// Requested height; may overflow the image.
    pub height: usize,
}

impl CropBox {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a box from normalized coordinates (0.0 to 1.0).
    ///
    /// Inputs are clamped to `[0, 1]` and rounded to the nearest pixel, so the
    /// result always satisfies the preconditions of [`CropBox::clamp`] for the
    /// same image dimensions.
    pub fn from_normalized(
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        image_width: usize,
        image_height: usize,
    ) -> Self {
        let src_w = image_width as f64;
        let src_h = image_height as f64;

        let x = ((left.clamp(0.0, 1.0) * src_w).round() as usize).min(image_width);
        let y = ((top.clamp(0.0, 1.0) * src_h).round() as usize).min(image_height);
        let width = (width.clamp(0.0, 1.0) * src_w).round() as usize;
        let height = (height.clamp(0.0, 1.0) * src_h).round() as usize;

        Self::new(x, y, width, height)
    }

    /// Shrink the box so it lies inside an `image_width` x `image_height` image.
    ///
    /// # Panics
    ///
    /// Panics if `x > image_width` or `y > image_height`. Such a box has no
    /// valid overlap to shrink to and indicates a caller bug.
    pub fn clamp(self, image_width: usize, image_height: usize) -> CropBox {
        assert!(
            self.x <= image_width,
            "crop x ({}) exceeds image width ({})",
            self.x,
            image_width
        );
        assert!(
            self.y <= image_height,
            "crop y ({}) exceeds image height ({})",
            self.y,
            image_height
        );

        CropBox {
            width: self.width.min(image_width - self.x),
            height: self.height.min(image_height - self.y),
            ..self
        }
    }

    /// Number of pixels covered by the box.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Check if the box covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Crop an image to the given box.
///
/// The request is clamped against the source first, so the output dimensions
/// are those of the clamped box. Indexed images get a copy of the full source
/// palette. Zero-area results are valid empty images.
///
/// # Errors
///
/// Returns `TransformError::OutOfMemory` if the destination cannot be allocated.
///
/// # Panics
///
/// Panics if the request starts outside the image (see [`CropBox::clamp`]).
pub fn crop(image: &Image, request: CropBox) -> Result<Image, TransformError> {
    let bounds = request.clamp(image.width, image.height);
    debug!(
        src_width = image.width,
        src_height = image.height,
        x = bounds.x,
        y = bounds.y,
        width = bounds.width,
        height = bounds.height,
        format = ?image.format(),
        "crop"
    );

    let mut pixels = PixelStorage::allocate(image.format(), bounds.area())?;
    if let Some(palette) = image.pixels.palette() {
        pixels.set_palette(palette)?;
    }

    let mut output = Image {
        width: bounds.width,
        height: bounds.height,
        pixels,
    };

    if bounds.is_empty() || image.is_empty() {
        trace!("crop produced an empty image, nothing to copy");
        return Ok(output);
    }

    let stride = image.pixels.pixel_stride();
    let row_bytes = bounds.width * stride;
    let src = image.pixels.as_bytes();
    let dst = output.pixels.as_bytes_mut();
    assert_eq!(dst.len(), bounds.area() * stride, "crop destination size");

    // Copy pixel data row by row
    for y in 0..bounds.height {
        let src_row_start = bounds.x * stride + (y + bounds.y) * image.width * stride;
        let dst_row_start = y * row_bytes;

        dst[dst_row_start..dst_row_start + row_bytes]
            .copy_from_slice(&src[src_row_start..src_row_start + row_bytes]);
    }

    Ok(output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::storage::PixelFormat;
    use proptest::prelude::*;

    /// Strategy for generating image dimensions (keep reasonable for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (usize, usize)> {
        (0usize..=40, 0usize..=40)
    }

    fn format_strategy() -> impl Strategy<Value = PixelFormat> {
        prop::sample::select(PixelFormat::ALL.to_vec())
    }

    /// Create a test image with a distinct byte pattern in every format.
    fn create_test_image(width: usize, height: usize, format: PixelFormat) -> Image {
        let mut img = Image::allocate(width, height, format).unwrap();
        for (i, b) in img.pixels.as_bytes_mut().iter_mut().enumerate() {
            *b = (i % 251) as u8;
        }
        img.pixels.set_palette(&[[1, 2, 3, 4], [5, 6, 7, 8]]).unwrap();
        img
    }

    proptest! {
        /// Property: Output dimensions equal the clamped request.
        #[test]
        fn prop_output_matches_clamped_box(
            (width, height) in dimensions_strategy(),
            format in format_strategy(),
            fx in 0.0f64..=1.0,
            fy in 0.0f64..=1.0,
            crop_w in 0usize..=60,
            crop_h in 0usize..=60,
        ) {
            let img = create_test_image(width, height, format);
            let x = (fx * width as f64) as usize;
            let y = (fy * height as f64) as usize;
            let request = CropBox::new(x, y, crop_w, crop_h);

            let result = crop(&img, request).unwrap();
            let clamped = request.clamp(width, height);

            prop_assert_eq!(result.width, clamped.width);
            prop_assert_eq!(result.height, clamped.height);
            prop_assert!(x + result.width <= width);
            prop_assert!(y + result.height <= height);
        }

        /// Property: Pixel data length matches dimensions.
        #[test]
        fn prop_pixel_data_matches_dimensions(
            (width, height) in dimensions_strategy(),
            format in format_strategy(),
            crop_w in 0usize..=60,
            crop_h in 0usize..=60,
        ) {
            let img = create_test_image(width, height, format);
            let result = crop(&img, CropBox::new(0, 0, crop_w, crop_h)).unwrap();

            prop_assert_eq!(result.pixels.len(), result.width * result.height);
            prop_assert_eq!(
                result.byte_size(),
                result.width * result.height * format.pixel_stride()
            );
        }

        /// Property: Full crop returns original image.
        #[test]
        fn prop_full_crop_returns_original(
            (width, height) in dimensions_strategy(),
            format in format_strategy(),
        ) {
            let img = create_test_image(width, height, format);
            let result = crop(&img, CropBox::new(0, 0, width, height)).unwrap();

            prop_assert_eq!(result, img);
        }

        /// Property: Every cropped pixel equals the source pixel it came from.
        #[test]
        fn prop_cropped_pixels_from_original(
            (width, height) in (1usize..=30, 1usize..=30),
            format in format_strategy(),
            x in 0usize..30,
            y in 0usize..30,
            crop_w in 0usize..=30,
            crop_h in 0usize..=30,
        ) {
            let img = create_test_image(width, height, format);
            let request = CropBox::new(x.min(width), y.min(height), crop_w, crop_h);
            let result = crop(&img, request).unwrap();

            let stride = format.pixel_stride();
            let src = img.pixels.as_bytes();
            let dst = result.pixels.as_bytes();
            for row in 0..result.height {
                for col in 0..result.width {
                    let s = ((request.y + row) * width + request.x + col) * stride;
                    let d = (row * result.width + col) * stride;
                    prop_assert_eq!(&dst[d..d + stride], &src[s..s + stride]);
                }
            }
        }

        /// Property: Indexed palette is copied unchanged for any region.
        #[test]
        fn prop_palette_preserved(
            (width, height) in dimensions_strategy(),
            crop_w in 0usize..=60,
            crop_h in 0usize..=60,
        ) {
            let img = create_test_image(width, height, PixelFormat::Indexed8);
            let result = crop(&img, CropBox::new(0, 0, crop_w, crop_h)).unwrap();

            prop_assert_eq!(result.pixels.palette(), img.pixels.palette());
        }

        /// Property: Sequential crops compose like a single offset crop.
        #[test]
        fn prop_sequential_crops(
            (width, height) in (20usize..=40, 20usize..=40),
        ) {
            let img = create_test_image(width, height, PixelFormat::Rgb8);

            let crop1 = crop(&img, CropBox::new(5, 5, 10, 10)).unwrap();
            let crop2 = crop(&crop1, CropBox::new(2, 3, 4, 4)).unwrap();
            let direct = crop(&img, CropBox::new(7, 8, 4, 4)).unwrap();

            prop_assert_eq!(crop2, direct);
        }
    }
}
