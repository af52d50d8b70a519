//! Rasterops WASM - WebAssembly bindings for rasterops
//!
//! This crate exposes the rasterops-core transforms to JavaScript/TypeScript
//! applications. Images cross the boundary as RGBA8 buffers.
//!
//! # Module Structure
//!
//! - `types` - `JsImage`, the RGBA8 wrapper
//! - `transform` - flip, crop and resize bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsImage, resize } from '@rasterops/wasm';
//!
//! await init();
//!
//! const data = ctx.getImageData(0, 0, w, h);
//! const image = new JsImage(w, h, new Uint8Array(data.data.buffer));
//! const half = resize(image, w / 2, h / 2);
//! ```

use rasterops_core::TransformError;
use wasm_bindgen::prelude::*;

mod transform;
mod types;

pub use transform::{crop, crop_box, crop_normalized, flip_vertically, resize, resize_to_fit};
pub use types::JsImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub(crate) fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}

pub(crate) fn to_js_error(err: TransformError) -> JsValue {
    js_error(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
