//! Bilinear resize in linear light with premultiplied alpha.
//!
//! # Pipeline
//!
//! Each stage takes ownership of the previous stage's buffer, so at most two
//! float buffers are alive at once and every one of them is released on any
//! early return:
//!
//! 1. Convert the source storage to RGBA f32
//! 2. Linearize RGB from sRGB and premultiply by alpha
//! 3. Bilinear interpolation into a buffer of the target size
//! 4. Un-premultiply and re-encode RGB as sRGB
//! 5. Convert back to the source format (indexed sources map onto their palette)
//!
//! Working in linear, premultiplied space keeps transparent neighbours from
//! darkening the edges of opaque regions.
//!
//! # Sampling
//!
//! Destination pixel `(x, y)` maps to source position
//! `(x / new_width * old_width, y / new_height * old_height)`. The four
//! neighbours around that position are blended, with the right and bottom
//! neighbours clamped to the last column and row at the image edge.

use tracing::{debug, trace};

use crate::color::{linearize_premultiply, unpremultiply_delinearize};
use crate::storage::{convert, try_alloc, Colorf32, PixelFormat, PixelStorage};
use crate::types::{Image, TransformError};

/// Resize an image to exact dimensions using bilinear interpolation.
///
/// Equal dimensions return a deep copy. The result has the source's pixel
/// format; integer formats are quantized only in the final conversion.
///
/// A zero target dimension yields an empty image. A zero-sized source has
/// nothing to sample and yields a transparent black image of the target size.
/// An indexed source with an empty palette yields zeroed indices and keeps
/// its empty palette.
///
/// # Errors
///
/// Returns `TransformError::OutOfMemory` if any intermediate buffer cannot
/// be allocated.
pub fn resize(image: &Image, new_width: usize, new_height: usize) -> Result<Image, TransformError> {
    // Fast path: if dimensions match, just copy
    if image.width == new_width && image.height == new_height {
        trace!(width = new_width, height = new_height, "resize to same size, copying");
        return Ok(Image {
            width: new_width,
            height: new_height,
            pixels: image.pixels.try_clone()?,
        });
    }

    let count = new_width.checked_mul(new_height).ok_or_else(|| {
        TransformError::InvalidDimensions(format!("{new_width}x{new_height} overflows"))
    })?;
    debug!(
        src_width = image.width,
        src_height = image.height,
        width = new_width,
        height = new_height,
        format = ?image.format(),
        "resize"
    );

    // Every index of an empty-palette image decodes to transparent black
    if image.pixels.palette().is_some_and(|p| p.is_empty()) {
        trace!("indexed source without palette, emitting zeroed indices");
        return Image::allocate(new_width, new_height, PixelFormat::Indexed8);
    }

    let premultiplied = premultiply(to_float(&image.pixels)?);
    let resampled = interpolate(
        &premultiplied,
        image.width,
        image.height,
        new_width,
        new_height,
        count,
    )?;
    drop(premultiplied);
    let straight = unpremultiply(resampled);
    let pixels = from_float(straight, image.format(), image.pixels.palette())?;

    Ok(Image {
        width: new_width,
        height: new_height,
        pixels,
    })
}

/// Resize an image to fit within a maximum edge length while preserving aspect ratio.
///
/// The image is scaled so that its longest edge equals `max_edge`. If the
/// image already fits, it is returned unchanged.
///
/// # Errors
///
/// Returns `TransformError::InvalidDimensions` if `max_edge` is zero, and
/// `TransformError::OutOfMemory` if the resize cannot allocate.
pub fn resize_to_fit(image: &Image, max_edge: usize) -> Result<Image, TransformError> {
    if max_edge == 0 {
        return Err(TransformError::InvalidDimensions(
            "max_edge must be non-zero".to_string(),
        ));
    }

    // If already fits, just copy
    if image.width <= max_edge && image.height <= max_edge {
        return resize(image, image.width, image.height);
    }

    let (new_width, new_height) = calculate_fit_dimensions(image.width, image.height, max_edge);
    resize(image, new_width, new_height)
}

/// Calculate dimensions to fit within max_edge while preserving aspect ratio.
pub fn calculate_fit_dimensions(width: usize, height: usize, max_edge: usize) -> (usize, usize) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        // Landscape or square: constrain by width
        let new_height = (max_edge as f64 / ratio).round() as usize;
        (max_edge, new_height.max(1))
    } else {
        // Portrait: constrain by height
        let new_width = (max_edge as f64 * ratio).round() as usize;
        (new_width.max(1), max_edge)
    }
}

fn to_float(pixels: &PixelStorage) -> Result<Vec<Colorf32>, TransformError> {
    let colors = convert(pixels, PixelFormat::RgbaF32, None)?;
    Ok(colors
        .into_rgba_f32()
        .unwrap_or_else(|| unreachable!("RgbaF32 conversion produced another format")))
}

fn from_float(
    colors: Vec<Colorf32>,
    format: PixelFormat,
    palette: Option<&[[u8; 4]]>,
) -> Result<PixelStorage, TransformError> {
    let colors = PixelStorage::RgbaF32(colors);
    if format == PixelFormat::RgbaF32 {
        return Ok(colors);
    }
    convert(&colors, format, palette)
}

fn premultiply(mut colors: Vec<Colorf32>) -> Vec<Colorf32> {
    for c in colors.iter_mut() {
        *c = linearize_premultiply(*c);
    }
    colors
}

fn unpremultiply(mut colors: Vec<Colorf32>) -> Vec<Colorf32> {
    for c in colors.iter_mut() {
        *c = unpremultiply_delinearize(*c);
    }
    colors
}

fn interpolate(
    src: &[Colorf32],
    src_width: usize,
    src_height: usize,
    dst_width: usize,
    dst_height: usize,
    count: usize,
) -> Result<Vec<Colorf32>, TransformError> {
    let mut output = try_alloc(count, Colorf32::TRANSPARENT)?;
    if count == 0 || src_width == 0 || src_height == 0 {
        return Ok(output);
    }

    for (dst_y, row) in output.chunks_exact_mut(dst_width).enumerate() {
        let gy = dst_y as f32 / dst_height as f32 * src_height as f32;
        for (dst_x, out) in row.iter_mut().enumerate() {
            let gx = dst_x as f32 / dst_width as f32 * src_width as f32;
            *out = sample_bilinear(src, src_width, src_height, gx, gy);
        }
    }

    Ok(output)
}

/// Sample a pixel using bilinear interpolation.
///
/// `x` and `y` must lie in `[0, src_width)` and `[0, src_height)`. The right
/// and bottom neighbours are clamped to the image edge.
#[inline]
fn sample_bilinear(src: &[Colorf32], src_width: usize, src_height: usize, x: f32, y: f32) -> Colorf32 {
    let x0 = (x.floor() as usize).min(src_width - 1);
    let y0 = (y.floor() as usize).min(src_height - 1);
    let x1 = (x0 + 1).min(src_width - 1);
    let y1 = (y0 + 1).min(src_height - 1);

    // Fractional distances
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = src[y0 * src_width + x0];
    let p10 = src[y0 * src_width + x1];
    let p01 = src[y1 * src_width + x0];
    let p11 = src[y1 * src_width + x1];

    let w00 = (1.0 - fx) * (1.0 - fy);
    let w10 = fx * (1.0 - fy);
    let w01 = (1.0 - fx) * fy;
    let w11 = fx * fy;

    Colorf32::new(
        p00.r * w00 + p10.r * w10 + p01.r * w01 + p11.r * w11,
        p00.g * w00 + p10.g * w10 + p01.g * w01 + p11.g * w11,
        p00.b * w00 + p10.b * w10 + p01.b * w01 + p11.b * w11,
        p00.a * w00 + p10.a * w10 + p01.a * w01 + p11.a * w11,
    )
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn rgba_pixels(len: usize) -> impl Strategy<Value = Vec<[u8; 4]>> {
        prop::collection::vec(any::<[u8; 4]>(), len)
    }

    fn integer_format_strategy() -> impl Strategy<Value = PixelFormat> {
        prop::sample::select(vec![
            PixelFormat::Gray8,
            PixelFormat::GrayAlpha8,
            PixelFormat::Rgb8,
            PixelFormat::Rgba8,
            PixelFormat::Rgba16,
        ])
    }

    fn source_strategy() -> impl Strategy<Value = (usize, usize, Vec<[u8; 4]>)> {
        (1usize..=8, 1usize..=8)
            .prop_flat_map(|(w, h)| (Just(w), Just(h), rgba_pixels(w * h)))
    }

    proptest! {
        /// Property: Output has the requested size and the source format.
        #[test]
        fn prop_output_dimensions_and_format(
            (width, height, pixels) in source_strategy(),
            format in integer_format_strategy(),
            new_width in 0usize..=12,
            new_height in 0usize..=12,
        ) {
            let src = Image::new(width, height, PixelStorage::Rgba8(pixels)).unwrap();
            let img = src.convert(format, None).unwrap();

            let resized = resize(&img, new_width, new_height).unwrap();

            prop_assert_eq!(resized.width, new_width);
            prop_assert_eq!(resized.height, new_height);
            prop_assert_eq!(resized.format(), format);
            prop_assert_eq!(resized.byte_size(), new_width * new_height * format.pixel_stride());
        }

        /// Property: Opaque input stays fully opaque after resampling.
        #[test]
        fn prop_opaque_stays_opaque(
            (width, height, mut pixels) in source_strategy(),
            new_width in 1usize..=12,
            new_height in 1usize..=12,
        ) {
            for p in pixels.iter_mut() {
                p[3] = 255;
            }
            let img = Image::new(width, height, PixelStorage::Rgba8(pixels)).unwrap();
            let resized = resize(&img, new_width, new_height).unwrap();

            for px in resized.pixels.as_rgba8().unwrap() {
                prop_assert_eq!(px[3], 255);
            }
        }

        /// Property: Fully transparent input resizes to transparent black.
        #[test]
        fn prop_transparent_stays_transparent(
            (width, height, mut pixels) in source_strategy(),
            new_width in 1usize..=12,
            new_height in 1usize..=12,
        ) {
            for p in pixels.iter_mut() {
                p[3] = 0;
            }
            let img = Image::new(width, height, PixelStorage::Rgba8(pixels)).unwrap();
            let resized = resize(&img, new_width, new_height).unwrap();

            for px in resized.pixels.as_rgba8().unwrap() {
                prop_assert_eq!(*px, [0, 0, 0, 0]);
            }
        }

        /// Property: Uniform images stay uniform at any size.
        #[test]
        fn prop_uniform_color_preserved(
            color in any::<[u8; 3]>(),
            (width, height) in (1usize..=6, 1usize..=6),
            new_width in 1usize..=12,
            new_height in 1usize..=12,
        ) {
            let px = [color[0], color[1], color[2], 255];
            let img = Image::new(width, height, PixelStorage::Rgba8(vec![px; width * height])).unwrap();
            let resized = resize(&img, new_width, new_height).unwrap();

            for out in resized.pixels.as_rgba8().unwrap() {
                for c in 0..4 {
                    prop_assert!((out[c] as i32 - px[c] as i32).abs() <= 1);
                }
            }
        }

        /// Property: Float results stay finite for in-range input.
        #[test]
        fn prop_float_output_finite(
            (width, height, pixels) in source_strategy(),
            new_width in 1usize..=12,
            new_height in 1usize..=12,
        ) {
            let src = Image::new(width, height, PixelStorage::Rgba8(pixels)).unwrap();
            let img = src.convert(PixelFormat::RgbaF32, None).unwrap();
            let resized = resize(&img, new_width, new_height).unwrap();

            for c in resized.pixels.as_rgba_f32().unwrap() {
                prop_assert!(c.r.is_finite() && c.g.is_finite() && c.b.is_finite() && c.a.is_finite());
            }
        }
    }
}
