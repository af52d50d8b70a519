//! Conversion between storage formats.
//!
//! Every format decodes to [`Colorf32`] and encodes from it, so any pair of
//! formats is reachable through one intermediate float buffer. Integer
//! channels are normalized by their maximum value; encoding clamps to
//! `[0, 1]` and rounds. Float-to-float conversion copies without clamping.

use super::buffer::{try_alloc, Colorf32, PixelStorage, MAX_PALETTE_LEN};
use super::PixelFormat;
use crate::luminance::calculate_luminance;
use crate::types::TransformError;

/// Convert storage to `format`.
///
/// `palette` is only consulted for an `Indexed8` target: pixels are mapped to
/// the nearest palette entry. An indexed source converted to `Indexed8` with
/// no palette (or its own palette) is copied unchanged.
///
/// # Errors
///
/// - `OutOfMemory` if an intermediate or output buffer cannot be allocated
/// - `MissingPalette` for an indexed target without a non-empty palette
/// - `PaletteTooLarge` if the target palette exceeds 256 entries
pub fn convert(
    src: &PixelStorage,
    format: PixelFormat,
    palette: Option<&[[u8; 4]]>,
) -> Result<PixelStorage, TransformError> {
    let same_palette = palette.is_none() || palette == src.palette();
    if src.format() == format && (!format.is_indexed() || same_palette) {
        return src.try_clone();
    }

    let decoded;
    let colors = match src.as_rgba_f32() {
        Some(colors) => colors,
        None => {
            decoded = decode(src)?;
            decoded.as_slice()
        }
    };

    encode(colors, format, palette)
}

/// Collect an exact-size iterator into a fallibly allocated `Vec`.
fn try_collect<T, I>(iter: I) -> Result<Vec<T>, TransformError>
where
    I: ExactSizeIterator<Item = T>,
{
    let mut buf = Vec::new();
    buf.try_reserve_exact(iter.len())?;
    buf.extend(iter);
    Ok(buf)
}

#[inline]
fn u8_to_f32(v: u8) -> f32 {
    v as f32 / 255.0
}

#[inline]
fn u16_to_f32(v: u16) -> f32 {
    v as f32 / 65535.0
}

#[inline]
fn f32_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[inline]
fn f32_to_u16(v: f32) -> u16 {
    (v.clamp(0.0, 1.0) * 65535.0).round() as u16
}

#[inline]
fn rgba8_to_color(p: [u8; 4]) -> Colorf32 {
    Colorf32::new(u8_to_f32(p[0]), u8_to_f32(p[1]), u8_to_f32(p[2]), u8_to_f32(p[3]))
}

#[inline]
fn color_to_rgba8(c: Colorf32) -> [u8; 4] {
    [f32_to_u8(c.r), f32_to_u8(c.g), f32_to_u8(c.b), f32_to_u8(c.a)]
}

fn decode(src: &PixelStorage) -> Result<Vec<Colorf32>, TransformError> {
    match src {
        PixelStorage::Indexed8 { indices, palette } => try_collect(indices.iter().map(|&i| {
            palette
                .get(i as usize)
                .map_or(Colorf32::TRANSPARENT, |&p| rgba8_to_color(p))
        })),
        PixelStorage::Gray8(data) => try_collect(data.iter().map(|&v| {
            let v = u8_to_f32(v);
            Colorf32::new(v, v, v, 1.0)
        })),
        PixelStorage::GrayAlpha8(data) => try_collect(data.iter().map(|&[v, a]| {
            let v = u8_to_f32(v);
            Colorf32::new(v, v, v, u8_to_f32(a))
        })),
        PixelStorage::Rgb8(data) => try_collect(
            data.iter()
                .map(|&[r, g, b]| Colorf32::new(u8_to_f32(r), u8_to_f32(g), u8_to_f32(b), 1.0)),
        ),
        PixelStorage::Rgba8(data) => try_collect(data.iter().map(|&p| rgba8_to_color(p))),
        PixelStorage::Rgba16(data) => try_collect(data.iter().map(|&[r, g, b, a]| {
            Colorf32::new(u16_to_f32(r), u16_to_f32(g), u16_to_f32(b), u16_to_f32(a))
        })),
        PixelStorage::RgbaF32(data) => try_collect(data.iter().copied()),
    }
}

fn encode(
    colors: &[Colorf32],
    format: PixelFormat,
    palette: Option<&[[u8; 4]]>,
) -> Result<PixelStorage, TransformError> {
    Ok(match format {
        PixelFormat::Indexed8 => {
            let palette = palette
                .filter(|p| !p.is_empty())
                .ok_or(TransformError::MissingPalette)?;
            if palette.len() > MAX_PALETTE_LEN {
                return Err(TransformError::PaletteTooLarge(palette.len()));
            }
            let mut owned_palette = try_alloc(palette.len(), [0u8; 4])?;
            owned_palette.copy_from_slice(palette);
            PixelStorage::Indexed8 {
                indices: try_collect(
                    colors
                        .iter()
                        .map(|&c| nearest_palette_index(palette, color_to_rgba8(c))),
                )?,
                palette: owned_palette,
            }
        }
        PixelFormat::Gray8 => PixelStorage::Gray8(try_collect(
            colors
                .iter()
                .map(|c| f32_to_u8(calculate_luminance(c.r, c.g, c.b))),
        )?),
        PixelFormat::GrayAlpha8 => PixelStorage::GrayAlpha8(try_collect(colors.iter().map(|c| {
            [f32_to_u8(calculate_luminance(c.r, c.g, c.b)), f32_to_u8(c.a)]
        }))?),
        PixelFormat::Rgb8 => PixelStorage::Rgb8(try_collect(
            colors
                .iter()
                .map(|c| [f32_to_u8(c.r), f32_to_u8(c.g), f32_to_u8(c.b)]),
        )?),
        PixelFormat::Rgba8 => {
            PixelStorage::Rgba8(try_collect(colors.iter().map(|&c| color_to_rgba8(c)))?)
        }
        PixelFormat::Rgba16 => PixelStorage::Rgba16(try_collect(colors.iter().map(|c| {
            [f32_to_u16(c.r), f32_to_u16(c.g), f32_to_u16(c.b), f32_to_u16(c.a)]
        }))?),
        PixelFormat::RgbaF32 => PixelStorage::RgbaF32(try_collect(colors.iter().copied())?),
    })
}

/// Index of the palette entry closest to `target` by squared RGBA distance.
///
/// Ties resolve to the lowest index.
fn nearest_palette_index(palette: &[[u8; 4]], target: [u8; 4]) -> u8 {
    palette
        .iter()
        .enumerate()
        .min_by_key(|(_, entry)| {
            entry
                .iter()
                .zip(target.iter())
                .map(|(&a, &b)| {
                    let d = a as i32 - b as i32;
                    (d * d) as u32
                })
                .sum::<u32>()
        })
        .map_or(0, |(i, _)| i as u8)
}
