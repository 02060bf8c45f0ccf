//! Raw Xlib declarations
//!
//! This module mirrors the C headers one-to-one: typedefs, constants,
//! structure layouts, the `XEvent` union and the table of entry points.
//! Nothing in here is safe to use without reading the Xlib manual for the
//! call in question; the rest of the crate wraps it.
//!
//! Do not glob-import this module next to code that uses `Option`: the
//! X.h constant `None` would shadow the prelude variant.

#![allow(non_camel_case_types, non_snake_case, non_upper_case_globals)]
#![allow(clippy::upper_case_acronyms, clippy::type_complexity)]

pub mod constants;
pub mod events;
pub mod functions;
pub mod structs;
pub mod types;

pub use constants::*;
pub use events::*;
pub use functions::*;
pub use structs::*;
pub use types::*;

/// Sizes and offsets of the LP64 ABI, as reported by the C compiler
#[cfg(all(test, target_os = "linux", target_pointer_width = "64"))]
mod layout_tests {
    use std::mem::{offset_of, size_of};

    use super::*;

    #[test]
    fn test_core_struct_sizes() {
        assert_eq!(size_of::<XEvent>(), 192);
        assert_eq!(size_of::<XWindowAttributes>(), 136);
        assert_eq!(size_of::<XSetWindowAttributes>(), 112);
        assert_eq!(size_of::<XGCValues>(), 128);
        assert_eq!(size_of::<XFontStruct>(), 96);
        assert_eq!(size_of::<XCharStruct>(), 12);
        assert_eq!(size_of::<XImage>(), 136);
        assert_eq!(size_of::<XColor>(), 16);
        assert_eq!(size_of::<XVisualInfo>(), 64);
        assert_eq!(size_of::<XSizeHints>(), 80);
        assert_eq!(size_of::<XWMHints>(), 56);
    }

    #[test]
    fn test_event_member_sizes() {
        assert_eq!(size_of::<XAnyEvent>(), 40);
        assert_eq!(size_of::<XKeyEvent>(), 96);
        assert_eq!(size_of::<XClientMessageEvent>(), 96);
        assert_eq!(offset_of!(XKeyEvent, keycode), 84);
        assert_eq!(offset_of!(XClientMessageEvent, data), 56);
    }

    #[test]
    fn test_field_offsets() {
        assert_eq!(offset_of!(XWindowAttributes, colormap), 80);
        assert_eq!(offset_of!(XWindowAttributes, screen), 128);
        assert_eq!(offset_of!(XGCValues, tile), 64);
        assert_eq!(offset_of!(XGCValues, dashes), 124);
        assert_eq!(offset_of!(XFontStruct, min_bounds), 56);
        assert_eq!(offset_of!(XFontStruct, per_char), 80);
        assert_eq!(offset_of!(XImage, red_mask), 56);
        assert_eq!(offset_of!(XImage, funcs), 88);
        assert_eq!(offset_of!(XSizeHints, min_aspect), 48);
    }
}
