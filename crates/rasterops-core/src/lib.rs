//! Rasterops Core - in-memory raster transforms
//!
//! This crate provides vertical flip, rectangular crop and bilinear resize
//! over images stored in any of several pixel formats (indexed, 8/16-bit
//! integer, 32-bit float).
//!
//! # Architecture
//!
//! - [`storage`] holds the pixel container and the format converter
//! - [`color`] has the sRGB transfer functions and alpha premultiplication
//! - [`transform`] implements the operations themselves
//!
//! All operations are synchronous. Sources are borrowed and results are newly
//! allocated; allocation failure surfaces as [`TransformError::OutOfMemory`]
//! instead of aborting.
//!
//! # Logging
//!
//! Operations emit `tracing` events at `debug` and `trace` level. The crate
//! never installs a subscriber.

pub mod color;
pub mod luminance;
pub mod storage;
pub mod transform;
mod types;

pub use storage::{convert, Colorf32, PixelFormat, PixelStorage};
pub use transform::{crop, flip_vertically, resize, resize_to_fit, CropBox};
pub use types::{Image, TransformError};
