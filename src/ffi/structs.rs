//! Structure layouts from Xlib.h, Xutil.h and Xresource.h
//!
//! Every struct here is `#[repr(C)]` and laid out exactly as in the
//! canonical headers. Field names follow the headers except where they
//! collide with Rust keywords (`class` becomes `c_class`).

use libc::{
    c_char, c_int, c_long, c_short, c_uchar, c_uint, c_ulong, c_ushort,
};

use super::types::*;

/// Implements `Default` as the all-zero bit pattern, which Xlib itself uses
/// to initialise these structures (every field is an integer, a nullable
/// pointer or an `Option` of a function pointer).
macro_rules! zeroed_default {
    ($($name:ty),* $(,)?) => {
        $(
            impl Default for $name {
                fn default() -> Self {
                    // SAFETY: all-zero is a valid value for every field type
                    unsafe { std::mem::zeroed() }
                }
            }
        )*
    };
}

pub(crate) use zeroed_default;

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Visual {
    pub ext_data: *mut XExtData,
    pub visualid: VisualID,
    pub c_class: c_int,
    pub red_mask: c_ulong,
    pub green_mask: c_ulong,
    pub blue_mask: c_ulong,
    pub bits_per_rgb: c_int,
    pub map_entries: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Depth {
    pub depth: c_int,
    pub nvisuals: c_int,
    pub visuals: *mut Visual,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Screen {
    pub ext_data: *mut XExtData,
    pub display: *mut Display,
    pub root: Window,
    pub width: c_int,
    pub height: c_int,
    pub mwidth: c_int,
    pub mheight: c_int,
    pub ndepths: c_int,
    pub depths: *mut Depth,
    pub root_depth: c_int,
    pub root_visual: *mut Visual,
    pub default_gc: GC,
    pub cmap: Colormap,
    pub white_pixel: c_ulong,
    pub black_pixel: c_ulong,
    pub max_maps: c_int,
    pub min_maps: c_int,
    pub backing_store: c_int,
    pub save_unders: Bool,
    pub root_input_mask: c_long,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XExtCodes {
    pub extension: c_int,
    pub major_opcode: c_int,
    pub first_event: c_int,
    pub first_error: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XPixmapFormatValues {
    pub depth: c_int,
    pub bits_per_pixel: c_int,
    pub scanline_pad: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XGCValues {
    pub function: c_int,
    pub plane_mask: c_ulong,
    pub foreground: c_ulong,
    pub background: c_ulong,
    pub line_width: c_int,
    pub line_style: c_int,
    pub cap_style: c_int,
    pub join_style: c_int,
    pub fill_style: c_int,
    pub fill_rule: c_int,
    pub arc_mode: c_int,
    pub tile: Pixmap,
    pub stipple: Pixmap,
    pub ts_x_origin: c_int,
    pub ts_y_origin: c_int,
    pub font: Font,
    pub subwindow_mode: c_int,
    pub graphics_exposures: Bool,
    pub clip_x_origin: c_int,
    pub clip_y_origin: c_int,
    pub clip_mask: Pixmap,
    pub dash_offset: c_int,
    pub dashes: c_char,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XSetWindowAttributes {
    pub background_pixmap: Pixmap,
    pub background_pixel: c_ulong,
    pub border_pixmap: Pixmap,
    pub border_pixel: c_ulong,
    pub bit_gravity: c_int,
    pub win_gravity: c_int,
    pub backing_store: c_int,
    pub backing_planes: c_ulong,
    pub backing_pixel: c_ulong,
    pub save_under: Bool,
    pub event_mask: c_long,
    pub do_not_propagate_mask: c_long,
    pub override_redirect: Bool,
    pub colormap: Colormap,
    pub cursor: Cursor,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XWindowAttributes {
    pub x: c_int,
    pub y: c_int,
    pub width: c_int,
    pub height: c_int,
    pub border_width: c_int,
    pub depth: c_int,
    pub visual: *mut Visual,
    pub root: Window,
    pub c_class: c_int,
    pub bit_gravity: c_int,
    pub win_gravity: c_int,
    pub backing_store: c_int,
    pub backing_planes: c_ulong,
    pub backing_pixel: c_ulong,
    pub save_under: Bool,
    pub colormap: Colormap,
    pub map_installed: Bool,
    pub map_state: c_int,
    pub all_event_masks: c_long,
    pub your_event_mask: c_long,
    pub do_not_propagate_mask: c_long,
    pub override_redirect: Bool,
    pub screen: *mut Screen,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XHostAddress {
    pub family: c_int,
    pub length: c_int,
    pub address: *mut c_char,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XServerInterpretedAddress {
    pub typelength: c_int,
    pub valuelength: c_int,
    pub type_: *mut c_char,
    pub value: *mut c_char,
}

/// Per-image function table filled in by XCreateImage/XInitImage
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ImageFns {
    pub create_image: Option<
        unsafe extern "C" fn(
            *mut Display,
            *mut Visual,
            c_uint,
            c_int,
            c_int,
            *mut c_char,
            c_uint,
            c_uint,
            c_int,
            c_int,
        ) -> *mut XImage,
    >,
    pub destroy_image: Option<unsafe extern "C" fn(*mut XImage) -> c_int>,
    pub get_pixel: Option<unsafe extern "C" fn(*mut XImage, c_int, c_int) -> c_ulong>,
    pub put_pixel: Option<unsafe extern "C" fn(*mut XImage, c_int, c_int, c_ulong) -> c_int>,
    pub sub_image:
        Option<unsafe extern "C" fn(*mut XImage, c_int, c_int, c_uint, c_uint) -> *mut XImage>,
    pub add_pixel: Option<unsafe extern "C" fn(*mut XImage, c_long) -> c_int>,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XImage {
    pub width: c_int,
    pub height: c_int,
    pub xoffset: c_int,
    pub format: c_int,
    pub data: *mut c_char,
    pub byte_order: c_int,
    pub bitmap_unit: c_int,
    pub bitmap_bit_order: c_int,
    pub bitmap_pad: c_int,
    pub depth: c_int,
    pub bytes_per_line: c_int,
    pub bits_per_pixel: c_int,
    pub red_mask: c_ulong,
    pub green_mask: c_ulong,
    pub blue_mask: c_ulong,
    pub obdata: XPointer,
    pub funcs: ImageFns,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XWindowChanges {
    pub x: c_int,
    pub y: c_int,
    pub width: c_int,
    pub height: c_int,
    pub border_width: c_int,
    pub sibling: Window,
    pub stack_mode: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XColor {
    pub pixel: c_ulong,
    pub red: c_ushort,
    pub green: c_ushort,
    pub blue: c_ushort,
    pub flags: c_char,
    pub pad: c_char,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XSegment {
    pub x1: c_short,
    pub y1: c_short,
    pub x2: c_short,
    pub y2: c_short,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XPoint {
    pub x: c_short,
    pub y: c_short,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XRectangle {
    pub x: c_short,
    pub y: c_short,
    pub width: c_ushort,
    pub height: c_ushort,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XArc {
    pub x: c_short,
    pub y: c_short,
    pub width: c_ushort,
    pub height: c_ushort,
    pub angle1: c_short,
    pub angle2: c_short,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XKeyboardControl {
    pub key_click_percent: c_int,
    pub bell_percent: c_int,
    pub bell_pitch: c_int,
    pub bell_duration: c_int,
    pub led: c_int,
    pub led_mode: c_int,
    pub key: c_int,
    pub auto_repeat_mode: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XKeyboardState {
    pub key_click_percent: c_int,
    pub bell_percent: c_int,
    pub bell_pitch: c_uint,
    pub bell_duration: c_uint,
    pub led_mask: c_ulong,
    pub global_auto_repeat: c_int,
    pub auto_repeats: [c_char; 32],
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XTimeCoord {
    pub time: Time,
    pub x: c_short,
    pub y: c_short,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XModifierKeymap {
    pub max_keypermod: c_int,
    pub modifiermap: *mut KeyCode,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XCharStruct {
    pub lbearing: c_short,
    pub rbearing: c_short,
    pub width: c_short,
    pub ascent: c_short,
    pub descent: c_short,
    pub attributes: c_ushort,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XFontProp {
    pub name: Atom,
    pub card32: c_ulong,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XFontStruct {
    pub ext_data: *mut XExtData,
    pub fid: Font,
    pub direction: c_uint,
    pub min_char_or_byte2: c_uint,
    pub max_char_or_byte2: c_uint,
    pub min_byte1: c_uint,
    pub max_byte1: c_uint,
    pub all_chars_exist: Bool,
    pub default_char: c_uint,
    pub n_properties: c_int,
    pub properties: *mut XFontProp,
    pub min_bounds: XCharStruct,
    pub max_bounds: XCharStruct,
    pub per_char: *mut XCharStruct,
    pub ascent: c_int,
    pub descent: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XTextItem {
    pub chars: *mut c_char,
    pub nchars: c_int,
    pub delta: c_int,
    pub font: Font,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XChar2b {
    pub byte1: c_uchar,
    pub byte2: c_uchar,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XTextItem16 {
    pub chars: *mut XChar2b,
    pub nchars: c_int,
    pub delta: c_int,
    pub font: Font,
}

// Xutil.h

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct AspectRatio {
    pub x: c_int,
    pub y: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XSizeHints {
    pub flags: c_long,
    pub x: c_int,
    pub y: c_int,
    pub width: c_int,
    pub height: c_int,
    pub min_width: c_int,
    pub min_height: c_int,
    pub max_width: c_int,
    pub max_height: c_int,
    pub width_inc: c_int,
    pub height_inc: c_int,
    pub min_aspect: AspectRatio,
    pub max_aspect: AspectRatio,
    pub base_width: c_int,
    pub base_height: c_int,
    pub win_gravity: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XWMHints {
    pub flags: c_long,
    pub input: Bool,
    pub initial_state: c_int,
    pub icon_pixmap: Pixmap,
    pub icon_window: Window,
    pub icon_x: c_int,
    pub icon_y: c_int,
    pub icon_mask: Pixmap,
    pub window_group: XID,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XTextProperty {
    pub value: *mut c_uchar,
    pub encoding: Atom,
    pub format: c_int,
    pub nitems: c_ulong,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XIconSize {
    pub min_width: c_int,
    pub min_height: c_int,
    pub max_width: c_int,
    pub max_height: c_int,
    pub width_inc: c_int,
    pub height_inc: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XClassHint {
    pub res_name: *mut c_char,
    pub res_class: *mut c_char,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XComposeStatus {
    pub compose_ptr: XPointer,
    pub chars_matched: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XVisualInfo {
    pub visual: *mut Visual,
    pub visualid: VisualID,
    pub screen: c_int,
    pub depth: c_int,
    pub c_class: c_int,
    pub red_mask: c_ulong,
    pub green_mask: c_ulong,
    pub blue_mask: c_ulong,
    pub colormap_size: c_int,
    pub bits_per_rgb: c_int,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XStandardColormap {
    pub colormap: Colormap,
    pub red_max: c_ulong,
    pub red_mult: c_ulong,
    pub green_max: c_ulong,
    pub green_mult: c_ulong,
    pub blue_max: c_ulong,
    pub blue_mult: c_ulong,
    pub base_pixel: c_ulong,
    pub visualid: VisualID,
    pub killid: XID,
}

// Xresource.h

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XrmValue {
    pub size: c_uint,
    pub addr: XPointer,
}

zeroed_default!(
    Visual,
    Screen,
    XPixmapFormatValues,
    XGCValues,
    XSetWindowAttributes,
    XWindowAttributes,
    XHostAddress,
    XServerInterpretedAddress,
    XImage,
    XWindowChanges,
    XColor,
    XSegment,
    XPoint,
    XRectangle,
    XArc,
    XKeyboardControl,
    XKeyboardState,
    XTimeCoord,
    XModifierKeymap,
    XCharStruct,
    XFontProp,
    XFontStruct,
    XTextItem,
    XSizeHints,
    XWMHints,
    XTextProperty,
    XIconSize,
    XClassHint,
    XComposeStatus,
    XVisualInfo,
    XStandardColormap,
    XrmValue,
);
