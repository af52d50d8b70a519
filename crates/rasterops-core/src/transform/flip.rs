//! In-place vertical flip over a raw pixel buffer.

use tracing::debug;

use crate::storage::try_alloc;
use crate::types::TransformError;

/// Mirror `bytes` top to bottom by swapping whole rows.
///
/// The row size is `bytes.len() / height`, so the buffer must hold a whole
/// number of rows. A single scratch row is allocated; rows are swapped from
/// both ends toward the middle.
///
/// # Errors
///
/// Returns `TransformError::OutOfMemory` if the scratch row cannot be allocated.
///
/// # Panics
///
/// Panics if `height` does not evenly divide `bytes.len()`, or if `height` is
/// zero and the buffer is not empty.
pub fn flip_vertically(bytes: &mut [u8], height: usize) -> Result<(), TransformError> {
    if height == 0 {
        assert!(bytes.is_empty(), "zero-height flip over a non-empty buffer");
        return Ok(());
    }
    assert_eq!(
        bytes.len() % height,
        0,
        "buffer length {} is not a multiple of height {}",
        bytes.len(),
        height
    );

    let row_size = bytes.len() / height;
    debug!(height, row_size, "flip_vertically");
    if height < 2 || row_size == 0 {
        return Ok(());
    }

    let mut scratch = try_alloc(row_size, 0u8)?;
    let mut top = 0;
    let mut bottom = bytes.len() - row_size;
    while top < bottom {
        scratch.copy_from_slice(&bytes[top..top + row_size]);
        bytes.copy_within(bottom..bottom + row_size, top);
        bytes[bottom..bottom + row_size].copy_from_slice(&scratch);

        top += row_size;
        bottom -= row_size;
    }

    Ok(())
}
