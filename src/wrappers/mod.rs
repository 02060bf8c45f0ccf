//! Per-structure wrappers
//!
//! One small type per Xlib structure. Fixed-size structs are held as a copy
//! of the C value with field accessors; structs that point at
//! library-allocated memory are copied out into Rust-owned data so the C
//! allocation can be released immediately.

pub mod color;
pub mod font;
pub mod gc;
pub mod hints;
pub mod host;
pub mod image;
pub mod keyboard;
pub mod property;
pub mod region;
pub mod resource;
pub mod visual;
pub mod window;

pub use color::*;
pub use font::*;
pub use gc::*;
pub use hints::*;
pub use host::*;
pub use image::*;
pub use keyboard::*;
pub use property::*;
pub use region::*;
pub use resource::*;
pub use visual::*;
pub use window::*;

use std::ffi::CStr;

use libc::c_char;

/// Copy a C string into an owned `String`, replacing invalid UTF-8.
///
/// # Safety
/// `ptr` must be null or point at a NUL-terminated string.
pub(crate) unsafe fn string_from_c(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
    }
}

/// Copy a counted array of C strings.
///
/// # Safety
/// `list` must be null or point at `count` valid C strings.
pub(crate) unsafe fn strings_from_c(list: *const *mut c_char, count: usize) -> Vec<String> {
    if list.is_null() {
        return Vec::new();
    }
    std::slice::from_raw_parts(list, count)
        .iter()
        .filter_map(|&s| string_from_c(s))
        .collect()
}
