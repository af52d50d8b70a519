//! Image transformation operations: flip, crop and resize.
//!
//! Every operation takes its source by reference and returns a freshly
//! allocated image, except [`flip_vertically`], which rewrites a caller-owned
//! buffer in place. Allocation failure is the only runtime error.
//!
//! # Coordinate System
//!
//! - Crop boxes are in pixels, origin at the top-left corner
//! - Resize maps destination pixels onto the source grid from the top-left
//!   corner (no half-pixel offset)

mod crop;
mod flip;
mod resize;

pub use crop::{crop, CropBox};
pub use flip::flip_vertically;
pub use resize::{calculate_fit_dimensions, resize, resize_to_fit};
