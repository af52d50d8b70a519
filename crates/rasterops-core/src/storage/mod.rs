//! Pixel storage: format descriptors, typed buffers and format conversion.
//!
//! Every transform in this crate works against [`PixelStorage`], a closed enum
//! over the supported pixel layouts. Storage exposes a byte view for the
//! memory-layout transforms (flip, crop) and typed views for the numeric ones
//! (resize). [`convert`] is the single boundary between representations.
//!
//! # Supported Formats
//!
//! | Format       | Stride | Element              |
//! |--------------|--------|----------------------|
//! | `Indexed8`   | 1      | palette index        |
//! | `Gray8`      | 1      | luma                 |
//! | `GrayAlpha8` | 2      | luma, alpha          |
//! | `Rgb8`       | 3      | r, g, b              |
//! | `Rgba8`      | 4      | r, g, b, a           |
//! | `Rgba16`     | 8      | r, g, b, a (u16)     |
//! | `RgbaF32`    | 16     | [`Colorf32`]         |

mod buffer;
mod convert;
mod format;

pub use buffer::{Colorf32, PixelStorage, MAX_PALETTE_LEN};
pub(crate) use buffer::try_alloc;
pub use convert::convert;
pub use format::PixelFormat;
