//! Typed pixel buffers.

use bytemuck::{Pod, Zeroable};

use super::PixelFormat;
use crate::types::TransformError;

/// Maximum number of palette entries for indexed storage.
pub const MAX_PALETTE_LEN: usize = 256;

/// A floating-point RGBA pixel.
///
/// Channels are nominally in `[0, 1]` but are never clamped here; only
/// conversion to an integer format enforces the range.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Colorf32 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Colorf32 {
    /// Fully transparent black.
    pub const TRANSPARENT: Colorf32 = Colorf32::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Pixel data for one image, tagged by format.
///
/// The buffer holds one element per logical pixel in row-major order, so the
/// byte length is always `len() * format().pixel_stride()`.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelStorage {
    /// Palette indices plus the palette they refer to.
    Indexed8 {
        indices: Vec<u8>,
        palette: Vec<[u8; 4]>,
    },
    Gray8(Vec<u8>),
    GrayAlpha8(Vec<[u8; 2]>),
    Rgb8(Vec<[u8; 3]>),
    Rgba8(Vec<[u8; 4]>),
    Rgba16(Vec<[u16; 4]>),
    RgbaF32(Vec<Colorf32>),
}

/// Allocate `len` copies of `value`, reporting allocation failure instead of aborting.
pub(crate) fn try_alloc<T: Clone>(len: usize, value: T) -> Result<Vec<T>, TransformError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)?;
    buf.resize(len, value);
    Ok(buf)
}

/// Copy a slice into a freshly allocated `Vec`, reporting allocation failure.
pub(crate) fn try_copy<T: Copy>(src: &[T]) -> Result<Vec<T>, TransformError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(src.len())?;
    buf.extend_from_slice(src);
    Ok(buf)
}

impl PixelStorage {
    /// Allocate zero-filled storage for `pixel_count` pixels.
    ///
    /// Indexed storage starts with an empty palette.
    pub fn allocate(format: PixelFormat, pixel_count: usize) -> Result<Self, TransformError> {
        Ok(match format {
            PixelFormat::Indexed8 => PixelStorage::Indexed8 {
                indices: try_alloc(pixel_count, 0)?,
                palette: Vec::new(),
            },
            PixelFormat::Gray8 => PixelStorage::Gray8(try_alloc(pixel_count, 0)?),
            PixelFormat::GrayAlpha8 => PixelStorage::GrayAlpha8(try_alloc(pixel_count, [0; 2])?),
            PixelFormat::Rgb8 => PixelStorage::Rgb8(try_alloc(pixel_count, [0; 3])?),
            PixelFormat::Rgba8 => PixelStorage::Rgba8(try_alloc(pixel_count, [0; 4])?),
            PixelFormat::Rgba16 => PixelStorage::Rgba16(try_alloc(pixel_count, [0; 4])?),
            PixelFormat::RgbaF32 => {
                PixelStorage::RgbaF32(try_alloc(pixel_count, Colorf32::TRANSPARENT)?)
            }
        })
    }

    /// Create indexed storage, rejecting palettes longer than [`MAX_PALETTE_LEN`].
    pub fn from_indexed(indices: Vec<u8>, palette: Vec<[u8; 4]>) -> Result<Self, TransformError> {
        if palette.len() > MAX_PALETTE_LEN {
            return Err(TransformError::PaletteTooLarge(palette.len()));
        }
        Ok(PixelStorage::Indexed8 { indices, palette })
    }

    /// Deep copy with fallible allocation.
    pub fn try_clone(&self) -> Result<Self, TransformError> {
        Ok(match self {
            PixelStorage::Indexed8 { indices, palette } => PixelStorage::Indexed8 {
                indices: try_copy(indices)?,
                palette: try_copy(palette)?,
            },
            PixelStorage::Gray8(data) => PixelStorage::Gray8(try_copy(data)?),
            PixelStorage::GrayAlpha8(data) => PixelStorage::GrayAlpha8(try_copy(data)?),
            PixelStorage::Rgb8(data) => PixelStorage::Rgb8(try_copy(data)?),
            PixelStorage::Rgba8(data) => PixelStorage::Rgba8(try_copy(data)?),
            PixelStorage::Rgba16(data) => PixelStorage::Rgba16(try_copy(data)?),
            PixelStorage::RgbaF32(data) => PixelStorage::RgbaF32(try_copy(data)?),
        })
    }

    pub fn format(&self) -> PixelFormat {
        match self {
            PixelStorage::Indexed8 { .. } => PixelFormat::Indexed8,
            PixelStorage::Gray8(_) => PixelFormat::Gray8,
            PixelStorage::GrayAlpha8(_) => PixelFormat::GrayAlpha8,
            PixelStorage::Rgb8(_) => PixelFormat::Rgb8,
            PixelStorage::Rgba8(_) => PixelFormat::Rgba8,
            PixelStorage::Rgba16(_) => PixelFormat::Rgba16,
            PixelStorage::RgbaF32(_) => PixelFormat::RgbaF32,
        }
    }

    /// Bytes per pixel for the active format.
    #[inline]
    pub fn pixel_stride(&self) -> usize {
        self.format().pixel_stride()
    }

    /// Number of logical pixels.
    pub fn len(&self) -> usize {
        match self {
            PixelStorage::Indexed8 { indices, .. } => indices.len(),
            PixelStorage::Gray8(data) => data.len(),
            PixelStorage::GrayAlpha8(data) => data.len(),
            PixelStorage::Rgb8(data) => data.len(),
            PixelStorage::Rgba8(data) => data.len(),
            PixelStorage::Rgba16(data) => data.len(),
            PixelStorage::RgbaF32(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw pixel bytes. For indexed storage this is the index buffer only.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PixelStorage::Indexed8 { indices, .. } => indices.as_slice(),
            PixelStorage::Gray8(data) => data.as_slice(),
            PixelStorage::GrayAlpha8(data) => bytemuck::cast_slice(data),
            PixelStorage::Rgb8(data) => bytemuck::cast_slice(data),
            PixelStorage::Rgba8(data) => bytemuck::cast_slice(data),
            PixelStorage::Rgba16(data) => bytemuck::cast_slice(data),
            PixelStorage::RgbaF32(data) => bytemuck::cast_slice(data),
        }
    }

    /// Mutable raw pixel bytes. For indexed storage this is the index buffer only.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        match self {
            PixelStorage::Indexed8 { indices, .. } => indices.as_mut_slice(),
            PixelStorage::Gray8(data) => data.as_mut_slice(),
            PixelStorage::GrayAlpha8(data) => bytemuck::cast_slice_mut(data),
            PixelStorage::Rgb8(data) => bytemuck::cast_slice_mut(data),
            PixelStorage::Rgba8(data) => bytemuck::cast_slice_mut(data),
            PixelStorage::Rgba16(data) => bytemuck::cast_slice_mut(data),
            PixelStorage::RgbaF32(data) => bytemuck::cast_slice_mut(data),
        }
    }

    /// Palette entries, if the storage is indexed.
    pub fn palette(&self) -> Option<&[[u8; 4]]> {
        match self {
            PixelStorage::Indexed8 { palette, .. } => Some(palette.as_slice()),
            _ => None,
        }
    }

    /// Mutable palette, if the storage is indexed.
    pub fn palette_mut(&mut self) -> Option<&mut Vec<[u8; 4]>> {
        match self {
            PixelStorage::Indexed8 { palette, .. } => Some(palette),
            _ => None,
        }
    }

    /// Replace the palette with a copy of `entries`.
    ///
    /// Has no effect on non-indexed storage.
    pub fn set_palette(&mut self, entries: &[[u8; 4]]) -> Result<(), TransformError> {
        if entries.len() > MAX_PALETTE_LEN {
            return Err(TransformError::PaletteTooLarge(entries.len()));
        }
        if let Some(palette) = self.palette_mut() {
            *palette = try_copy(entries)?;
        }
        Ok(())
    }

    pub fn as_rgba8(&self) -> Option<&[[u8; 4]]> {
        match self {
            PixelStorage::Rgba8(data) => Some(data.as_slice()),
            _ => None,
        }
    }

    pub fn as_rgba_f32(&self) -> Option<&[Colorf32]> {
        match self {
            PixelStorage::RgbaF32(data) => Some(data.as_slice()),
            _ => None,
        }
    }

    /// Take the float buffer out of `RgbaF32` storage.
    pub fn into_rgba_f32(self) -> Option<Vec<Colorf32>> {
        match self {
            PixelStorage::RgbaF32(data) => Some(data),
            _ => None,
        }
    }
}
