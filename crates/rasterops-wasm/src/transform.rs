//! WASM bindings for image transformation operations.
//!
//! Each binding is a thin wrapper over a plain Rust function returning
//! `Result<_, TransformError>`. The wrappers only convert errors into
//! `js_sys::Error` and report clamped crops on the browser console, so the
//! logic stays testable on native targets.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const image = new JsImage(width, height, rgbaBytes);
//! flip_vertically(image);
//! const thumb = resize_to_fit(crop(image, 10, 10, 200, 200), 64);
//! ```

use crate::types::JsImage;
use rasterops_core::transform::{self as ops, CropBox};
use rasterops_core::TransformError;
use wasm_bindgen::prelude::*;

/// Flip an image top to bottom in place.
#[wasm_bindgen]
pub fn flip_vertically(image: &mut JsImage) -> Result<(), JsValue> {
    flip_image(image).map_err(crate::to_js_error)
}

/// Crop an image to a pixel rectangle.
///
/// A rectangle that runs past the right or bottom edge is shrunk to fit and a
/// warning is logged to the console. An origin outside the image throws.
///
/// # Example (TypeScript)
///
/// ```typescript
/// // 50x50 region starting at (25, 25)
/// const cropped = crop(sourceImage, 25, 25, 50, 50);
/// ```
#[wasm_bindgen]
pub fn crop(image: &JsImage, x: u32, y: u32, width: u32, height: u32) -> Result<JsImage, JsValue> {
    let request = CropBox::new(x as usize, y as usize, width as usize, height as usize);
    crop_checked(image, request)
}

/// Crop an image using a `{ x, y, width, height }` object.
#[wasm_bindgen]
pub fn crop_box(image: &JsImage, request: JsValue) -> Result<JsImage, JsValue> {
    let request: CropBox = serde_wasm_bindgen::from_value(request)
        .map_err(|e| crate::js_error(&format!("Invalid crop box: {}", e)))?;
    crop_checked(image, request)
}

/// Crop an image using normalized coordinates in the range [0, 1].
///
/// # Example (TypeScript)
///
/// ```typescript
/// // Center 50% of the image
/// const cropped = crop_normalized(sourceImage, 0.25, 0.25, 0.5, 0.5);
/// ```
#[wasm_bindgen]
pub fn crop_normalized(
    image: &JsImage,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
) -> Result<JsImage, JsValue> {
    let request = CropBox::from_normalized(
        left,
        top,
        width,
        height,
        image.width() as usize,
        image.height() as usize,
    );
    crop_checked(image, request)
}

/// Resize an image to exact dimensions with linear-light bilinear filtering.
#[wasm_bindgen]
pub fn resize(image: &JsImage, width: u32, height: u32) -> Result<JsImage, JsValue> {
    resize_image(image, width, height).map_err(crate::to_js_error)
}

/// Resize an image so its longest edge is `max_edge`, preserving aspect ratio.
#[wasm_bindgen]
pub fn resize_to_fit(image: &JsImage, max_edge: u32) -> Result<JsImage, JsValue> {
    fit_image(image, max_edge).map_err(crate::to_js_error)
}

fn crop_checked(image: &JsImage, request: CropBox) -> Result<JsImage, JsValue> {
    let (result, clamped) = crop_image(image, request).map_err(crate::to_js_error)?;
    if clamped {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "crop {}x{} at ({}, {}) clamped to {}x{}",
            request.width,
            request.height,
            request.x,
            request.y,
            result.width(),
            result.height()
        )));
    }
    Ok(result)
}

pub(crate) fn flip_image(image: &mut JsImage) -> Result<(), TransformError> {
    let height = image.height() as usize;
    ops::flip_vertically(image.pixels_mut(), height)
}

/// Crop, reporting whether the request had to be shrunk to fit.
pub(crate) fn crop_image(
    image: &JsImage,
    request: CropBox,
) -> Result<(JsImage, bool), TransformError> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    if request.x > width || request.y > height {
        return Err(TransformError::InvalidDimensions(format!(
            "crop origin ({}, {}) is outside the {}x{} image",
            request.x, request.y, width, height
        )));
    }

    let clamped = request.clamp(width, height) != request;
    let result = ops::crop(&image.to_core()?, request)?;
    Ok((JsImage::from_core(result)?, clamped))
}

pub(crate) fn resize_image(
    image: &JsImage,
    width: u32,
    height: u32,
) -> Result<JsImage, TransformError> {
    let result = ops::resize(&image.to_core()?, width as usize, height as usize)?;
    JsImage::from_core(result)
}

pub(crate) fn fit_image(image: &JsImage, max_edge: u32) -> Result<JsImage, TransformError> {
    let result = ops::resize_to_fit(&image.to_core()?, max_edge as usize)?;
    JsImage::from_core(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Each pixel's red channel holds its index.
    fn test_image(width: u32, height: u32) -> JsImage {
        let pixels: Vec<u8> = (0..(width * height) as usize)
            .flat_map(|i| [(i % 256) as u8, 0, 0, 255])
            .collect();
        JsImage::from_rgba(width, height, pixels).unwrap()
    }

    fn red_channel(image: &JsImage) -> Vec<u8> {
        image.pixels().chunks_exact(4).map(|px| px[0]).collect()
    }

    #[test]
    fn test_flip() {
        let mut img = test_image(2, 3);
        flip_image(&mut img).unwrap();
        assert_eq!(red_channel(&img), vec![4, 5, 2, 3, 0, 1]);
    }

    #[test]
    fn test_crop_inside() {
        let img = test_image(4, 4);
        let (result, clamped) = crop_image(&img, CropBox::new(1, 1, 2, 2)).unwrap();
        assert!(!clamped);
        assert_eq!(result.width(), 2);
        assert_eq!(result.height(), 2);
        assert_eq!(red_channel(&result), vec![5, 6, 9, 10]);
    }

    #[test]
    fn test_crop_overflow_is_clamped() {
        let img = test_image(4, 4);
        let (result, clamped) = crop_image(&img, CropBox::new(2, 3, 10, 10)).unwrap();
        assert!(clamped);
        assert_eq!(result.width(), 2);
        assert_eq!(result.height(), 1);
        assert_eq!(red_channel(&result), vec![14, 15]);
    }

    #[test]
    fn test_crop_origin_outside_is_error() {
        let img = test_image(4, 4);
        let err = crop_image(&img, CropBox::new(5, 0, 1, 1)).err().unwrap();
        assert!(matches!(err, TransformError::InvalidDimensions(_)));
    }

    #[test]
    fn test_crop_at_edge_is_empty() {
        let img = test_image(4, 4);
        let (result, _) = crop_image(&img, CropBox::new(4, 4, 1, 1)).unwrap();
        assert_eq!(result.byte_length(), 0);
    }

    #[test]
    fn test_resize() {
        let img = test_image(8, 4);
        let result = resize_image(&img, 4, 2).unwrap();
        assert_eq!(result.width(), 4);
        assert_eq!(result.height(), 2);
        assert_eq!(result.byte_length(), 4 * 2 * 4);
    }

    #[test]
    fn test_resize_same_size_is_copy() {
        let img = test_image(3, 3);
        let result = resize_image(&img, 3, 3).unwrap();
        assert_eq!(result.pixels(), img.pixels());
    }

    #[test]
    fn test_resize_to_fit() {
        let img = test_image(200, 100);
        let result = fit_image(&img, 50).unwrap();
        assert_eq!(result.width(), 50);
        assert_eq!(result.height(), 25);
    }

    #[test]
    fn test_resize_to_fit_zero_is_error() {
        let img = test_image(4, 4);
        assert!(fit_image(&img, 0).is_err());
    }
}
