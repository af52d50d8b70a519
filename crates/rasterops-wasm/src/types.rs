//! WASM-compatible wrapper types for image data.
//!
//! JavaScript only ever sees RGBA8 images: four bytes per pixel, row-major,
//! the layout `ImageData` and `<canvas>` use. Conversion to and from the core
//! [`Image`] happens here.

use rasterops_core::{Image, PixelFormat, PixelStorage, TransformError};
use wasm_bindgen::prelude::*;

const RGBA_STRIDE: usize = 4;

/// An RGBA8 image for JavaScript.
///
/// # Memory Management
///
/// The pixel data lives in WASM memory. `pixels()` copies it out into a
/// `Uint8Array`. Calling `free()` releases the WASM side immediately; the
/// wasm-bindgen finalizer does the same eventually.
#[wasm_bindgen]
pub struct JsImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsImage {
    /// Create an image from RGBA8 pixel data.
    ///
    /// Throws if `pixels` is not exactly `width * height * 4` bytes long.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsImage, JsValue> {
        Self::from_rgba(width, height, pixels).map_err(crate::to_js_error)
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as a Uint8Array copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsImage {
    /// Validate and wrap an RGBA8 buffer.
    pub(crate) fn from_rgba(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<Self, TransformError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(RGBA_STRIDE))
            .ok_or_else(|| {
                TransformError::InvalidDimensions(format!("{width}x{height} overflows"))
            })?;
        if pixels.len() != expected {
            return Err(TransformError::InvalidDimensions(format!(
                "{width}x{height} RGBA needs {expected} bytes, got {}",
                pixels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Copy into a core image.
    pub(crate) fn to_core(&self) -> Result<Image, TransformError> {
        let pixels = self
            .pixels
            .chunks_exact(RGBA_STRIDE)
            .map(|px| [px[0], px[1], px[2], px[3]])
            .collect();
        Image::new(
            self.width as usize,
            self.height as usize,
            PixelStorage::Rgba8(pixels),
        )
    }

    /// Wrap a core image, converting it to RGBA8 if needed.
    pub(crate) fn from_core(image: Image) -> Result<Self, TransformError> {
        let image = if image.format() == PixelFormat::Rgba8 {
            image
        } else {
            image.convert(PixelFormat::Rgba8, None)?
        };
        let width = dimension_to_u32(image.width)?;
        let height = dimension_to_u32(image.height)?;

        Ok(Self {
            width,
            height,
            pixels: image.pixels.as_bytes().to_vec(),
        })
    }

    /// Overwrite the pixel buffer in place.
    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }
}

fn dimension_to_u32(value: usize) -> Result<u32, TransformError> {
    u32::try_from(value)
        .map_err(|_| TransformError::InvalidDimensions(format!("dimension {value} exceeds u32")))
}
