//! Window attributes, configuration and creation parameters

use libc::{c_int, c_long, c_uint, c_ulong};

use crate::ffi;
use crate::field::{accessors, masked_accessors};
use crate::types::*;

/// Attributes reported by XGetWindowAttributes.
///
/// The visual and screen pointers are dropped; the visual is kept by id.
#[derive(Clone, Copy, Default)]
pub struct WindowAttributes {
    raw: ffi::XWindowAttributes,
    visual_id: VisualId,
}

// SAFETY: pointer fields are cleared on construction
unsafe impl Send for WindowAttributes {}
unsafe impl Sync for WindowAttributes {}

impl WindowAttributes {
    pub fn from_raw(mut raw: ffi::XWindowAttributes, visual_id: VisualId) -> Self {
        raw.visual = std::ptr::null_mut();
        raw.screen = std::ptr::null_mut();
        WindowAttributes { raw, visual_id }
    }

    pub fn as_raw(&self) -> &ffi::XWindowAttributes {
        &self.raw
    }

    pub fn visual_id(&self) -> VisualId {
        self.visual_id
    }

    pub fn set_visual_id(&mut self, id: VisualId) {
        self.visual_id = id;
    }

    pub fn class(&self) -> Option<WindowClass> {
        WindowClass::from_raw(self.raw.c_class as c_uint)
    }

    pub fn set_class(&mut self, class: WindowClass) {
        self.raw.c_class = class.to_raw() as c_int;
    }

    pub fn map_state_kind(&self) -> Option<MapState> {
        MapState::from_raw(self.raw.map_state)
    }

    pub fn is_viewable(&self) -> bool {
        self.raw.map_state == ffi::IsViewable
    }

    pub fn rectangle(&self) -> Rectangle {
        Rectangle::new(
            self.raw.x as i16,
            self.raw.y as i16,
            self.raw.width as u16,
            self.raw.height as u16,
        )
    }
}

accessors!(WindowAttributes {
    x, set_x: i32;
    y, set_y: i32;
    width, set_width: i32;
    height, set_height: i32;
    border_width, set_border_width: i32;
    depth, set_depth: i32;
    root, set_root: Window;
    bit_gravity, set_bit_gravity: i32;
    win_gravity, set_win_gravity: i32;
    backing_store, set_backing_store: i32;
    backing_planes, set_backing_planes: c_ulong;
    backing_pixel, set_backing_pixel: c_ulong;
    save_under, set_save_under: bool;
    colormap, set_colormap: Colormap;
    map_installed, set_map_installed: bool;
    map_state, set_map_state: i32;
    all_event_masks, set_all_event_masks: c_long;
    your_event_mask, set_your_event_mask: c_long;
    do_not_propagate_mask, set_do_not_propagate_mask: c_long;
    override_redirect, set_override_redirect: bool;
});

/// The value list of XCreateWindow and XChangeWindowAttributes
#[derive(Clone, Copy, Default)]
pub struct SetWindowAttributes {
    mask: c_ulong,
    raw: ffi::XSetWindowAttributes,
}

impl SetWindowAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_raw(&self) -> &ffi::XSetWindowAttributes {
        &self.raw
    }

    pub fn with_backing_store_kind(self, store: BackingStore) -> Self {
        self.with_backing_store(store.to_raw())
    }

    pub fn with_win_gravity_kind(self, gravity: Gravity) -> Self {
        self.with_win_gravity(gravity.to_raw())
    }
}

masked_accessors!(SetWindowAttributes, mask: c_ulong = mask {
    background_pixmap, set_background_pixmap, with_background_pixmap: Pixmap = ffi::CWBackPixmap;
    background_pixel, set_background_pixel, with_background_pixel: c_ulong = ffi::CWBackPixel;
    border_pixmap, set_border_pixmap, with_border_pixmap: Pixmap = ffi::CWBorderPixmap;
    border_pixel, set_border_pixel, with_border_pixel: c_ulong = ffi::CWBorderPixel;
    bit_gravity, set_bit_gravity, with_bit_gravity: c_int = ffi::CWBitGravity;
    win_gravity, set_win_gravity, with_win_gravity: c_int = ffi::CWWinGravity;
    backing_store, set_backing_store, with_backing_store: c_int = ffi::CWBackingStore;
    backing_planes, set_backing_planes, with_backing_planes: c_ulong = ffi::CWBackingPlanes;
    backing_pixel, set_backing_pixel, with_backing_pixel: c_ulong = ffi::CWBackingPixel;
    override_redirect, set_override_redirect, with_override_redirect: bool = ffi::CWOverrideRedirect;
    save_under, set_save_under, with_save_under: bool = ffi::CWSaveUnder;
    event_mask, set_event_mask, with_event_mask: c_long = ffi::CWEventMask;
    do_not_propagate_mask, set_do_not_propagate_mask, with_do_not_propagate_mask: c_long = ffi::CWDontPropagate;
    colormap, set_colormap, with_colormap: Colormap = ffi::CWColormap;
    cursor, set_cursor, with_cursor: Cursor = ffi::CWCursor;
});

/// The value list of XConfigureWindow
#[derive(Clone, Copy, Default)]
pub struct WindowChanges {
    mask: c_uint,
    raw: ffi::XWindowChanges,
}

impl WindowChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_raw(&self) -> &ffi::XWindowChanges {
        &self.raw
    }

    pub fn with_position(self, x: i32, y: i32) -> Self {
        self.with_x(x).with_y(y)
    }

    pub fn with_size(self, width: i32, height: i32) -> Self {
        self.with_width(width).with_height(height)
    }

    pub fn with_stack(self, mode: StackMode) -> Self {
        self.with_stack_mode(mode.to_raw())
    }

    pub fn stack(&self) -> Option<StackMode> {
        if self.is_set(ffi::CWStackMode) {
            StackMode::from_raw(self.raw.stack_mode)
        } else {
            None
        }
    }
}

masked_accessors!(WindowChanges, mask: c_uint = mask {
    x, set_x, with_x: c_int = ffi::CWX;
    y, set_y, with_y: c_int = ffi::CWY;
    width, set_width, with_width: c_int = ffi::CWWidth;
    height, set_height, with_height: c_int = ffi::CWHeight;
    border_width, set_border_width, with_border_width: c_int = ffi::CWBorderWidth;
    sibling, set_sibling, with_sibling: Window = ffi::CWSibling;
    stack_mode, set_stack_mode, with_stack_mode: c_int = ffi::CWStackMode;
});

/// Result of XGetGeometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    pub root: Window,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub border_width: u32,
    pub depth: u32,
}

/// Result of XQueryTree
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryTree {
    pub root: Window,
    pub parent: Window,
    /// Bottom-most first
    pub children: Vec<Window>,
}

/// Result of XQueryPointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerState {
    /// False when the pointer is on another screen
    pub same_screen: bool,
    pub root: Window,
    pub child: Window,
    pub root_x: i32,
    pub root_y: i32,
    pub win_x: i32,
    pub win_y: i32,
    pub mask: u32,
}

/// Result of XTranslateCoordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TranslatedCoordinates {
    pub same_screen: bool,
    pub x: i32,
    pub y: i32,
    pub child: Window,
}

/// Parameters for creating a window
#[derive(Debug, Clone, Copy)]
pub struct WindowParams {
    pub parent: Window,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub border_width: u32,
    /// 0 copies the parent's depth
    pub depth: i32,
    pub class: WindowClass,
    /// `None` copies the parent's visual
    pub visual: Option<VisualId>,
    pub attributes: SetWindowAttributes,
}

impl WindowParams {
    pub fn new(parent: Window, x: i32, y: i32, width: u32, height: u32) -> Self {
        WindowParams {
            parent,
            x,
            y,
            width,
            height,
            border_width: 0,
            depth: 0,
            class: WindowClass::InputOutput,
            visual: None,
            attributes: SetWindowAttributes::new(),
        }
    }

    pub fn border_width(mut self, width: u32) -> Self {
        self.border_width = width;
        self
    }

    pub fn depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    pub fn class(mut self, class: WindowClass) -> Self {
        self.class = class;
        self
    }

    pub fn visual(mut self, visual: VisualId) -> Self {
        self.visual = Some(visual);
        self
    }

    pub fn attributes(mut self, attributes: SetWindowAttributes) -> Self {
        self.attributes = attributes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_window_attributes_mask() {
        let attrs = SetWindowAttributes::new()
            .with_background_pixel(0xffffff)
            .with_event_mask(event_mask::EXPOSURE | event_mask::KEY_PRESS)
            .with_override_redirect(true);

        assert_eq!(
            attrs.mask(),
            ffi::CWBackPixel | ffi::CWEventMask | ffi::CWOverrideRedirect
        );
        assert_eq!(attrs.as_raw().override_redirect, ffi::True);
        assert_eq!(attrs.event_mask(), ffi::ExposureMask | ffi::KeyPressMask);
    }

    #[test]
    fn test_window_changes() {
        let changes = WindowChanges::new()
            .with_position(10, 20)
            .with_stack(StackMode::Above);

        assert_eq!(changes.mask(), ffi::CWX | ffi::CWY | ffi::CWStackMode);
        assert_eq!(changes.stack(), Some(StackMode::Above));
        assert_eq!(WindowChanges::new().with_width(5).stack(), None);
    }

    #[test]
    fn test_window_attributes_drops_pointers() {
        let raw = ffi::XWindowAttributes {
            width: 640,
            height: 480,
            map_state: ffi::IsViewable,
            c_class: ffi::InputOutput as c_int,
            visual: std::ptr::NonNull::dangling().as_ptr(),
            ..Default::default()
        };
        let attrs = WindowAttributes::from_raw(raw, VisualId(0x21));

        assert!(attrs.as_raw().visual.is_null());
        assert!(attrs.is_viewable());
        assert_eq!(attrs.class(), Some(WindowClass::InputOutput));
        assert_eq!(attrs.rectangle(), Rectangle::new(0, 0, 640, 480));
        assert_eq!(attrs.visual_id(), VisualId(0x21));
    }

    #[test]
    fn test_window_params_defaults() {
        let params = WindowParams::new(Window(0x100), 0, 0, 100, 50).border_width(2);
        assert_eq!(params.class, WindowClass::InputOutput);
        assert_eq!(params.visual, None);
        assert_eq!(params.attributes.mask(), 0);
        assert_eq!(params.border_width, 2);
    }
}
