//! ICCCM window manager hints

use libc::{c_int, c_long};

use crate::ffi;
use crate::field::{masked_accessors, raw_wrapper};
use crate::types::*;

/// WM_NORMAL_HINTS. Setting a field sets its `P*` flag.
#[derive(Clone, Copy, Default)]
pub struct SizeHints {
    raw: ffi::XSizeHints,
}

impl SizeHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_raw(raw: ffi::XSizeHints) -> Self {
        SizeHints { raw }
    }

    pub fn as_raw(&self) -> &ffi::XSizeHints {
        &self.raw
    }

    pub fn into_raw(self) -> ffi::XSizeHints {
        self.raw
    }

    /// User-specified position and size
    pub fn with_user_position(mut self) -> Self {
        self.raw.flags |= ffi::USPosition | ffi::USSize;
        self
    }

    pub fn with_min_size(self, width: i32, height: i32) -> Self {
        self.with_min_width(width).with_min_height(height)
    }

    pub fn with_max_size(self, width: i32, height: i32) -> Self {
        self.with_max_width(width).with_max_height(height)
    }

    /// Minimum and maximum aspect ratio as (x, y) pairs
    pub fn aspect(&self) -> Option<((i32, i32), (i32, i32))> {
        if !self.is_set(ffi::PAspect) {
            return None;
        }
        let (min, max) = (self.raw.min_aspect, self.raw.max_aspect);
        Some(((min.x, min.y), (max.x, max.y)))
    }

    pub fn set_aspect(&mut self, min: (i32, i32), max: (i32, i32)) {
        self.raw.min_aspect = ffi::AspectRatio { x: min.0, y: min.1 };
        self.raw.max_aspect = ffi::AspectRatio { x: max.0, y: max.1 };
        self.raw.flags |= ffi::PAspect;
    }

    pub fn win_gravity_kind(&self) -> Option<Gravity> {
        Gravity::from_raw(self.raw.win_gravity)
    }

    /// A hint that pins the window to one size
    pub fn fixed(width: i32, height: i32) -> Self {
        SizeHints::new()
            .with_min_size(width, height)
            .with_max_size(width, height)
    }
}

masked_accessors!(SizeHints, mask: c_long = raw.flags {
    x, set_x, with_x: c_int = ffi::PPosition;
    y, set_y, with_y: c_int = ffi::PPosition;
    width, set_width, with_width: c_int = ffi::PSize;
    height, set_height, with_height: c_int = ffi::PSize;
    min_width, set_min_width, with_min_width: c_int = ffi::PMinSize;
    min_height, set_min_height, with_min_height: c_int = ffi::PMinSize;
    max_width, set_max_width, with_max_width: c_int = ffi::PMaxSize;
    max_height, set_max_height, with_max_height: c_int = ffi::PMaxSize;
    width_inc, set_width_inc, with_width_inc: c_int = ffi::PResizeInc;
    height_inc, set_height_inc, with_height_inc: c_int = ffi::PResizeInc;
    base_width, set_base_width, with_base_width: c_int = ffi::PBaseSize;
    base_height, set_base_height, with_base_height: c_int = ffi::PBaseSize;
    win_gravity, set_win_gravity, with_win_gravity: c_int = ffi::PWinGravity;
});

/// WM_HINTS
#[derive(Clone, Copy, Default)]
pub struct WmHints {
    raw: ffi::XWMHints,
}

impl WmHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_raw(raw: ffi::XWMHints) -> Self {
        WmHints { raw }
    }

    pub fn as_raw(&self) -> &ffi::XWMHints {
        &self.raw
    }

    pub fn into_raw(self) -> ffi::XWMHints {
        self.raw
    }

    pub fn state(&self) -> Option<WmState> {
        if self.is_set(ffi::StateHint) {
            WmState::from_raw(self.raw.initial_state)
        } else {
            None
        }
    }

    pub fn with_state(self, state: WmState) -> Self {
        self.with_initial_state(state.to_raw())
    }

    pub fn urgency(&self) -> bool {
        self.raw.flags & ffi::XUrgencyHint != 0
    }

    pub fn set_urgency(&mut self, urgent: bool) {
        if urgent {
            self.raw.flags |= ffi::XUrgencyHint;
        } else {
            self.raw.flags &= !ffi::XUrgencyHint;
        }
    }
}

masked_accessors!(WmHints, mask: c_long = raw.flags {
    input, set_input, with_input: bool = ffi::InputHint;
    initial_state, set_initial_state, with_initial_state: c_int = ffi::StateHint;
    icon_pixmap, set_icon_pixmap, with_icon_pixmap: Pixmap = ffi::IconPixmapHint;
    icon_window, set_icon_window, with_icon_window: Window = ffi::IconWindowHint;
    icon_x, set_icon_x, with_icon_x: c_int = ffi::IconPositionHint;
    icon_y, set_icon_y, with_icon_y: c_int = ffi::IconPositionHint;
    icon_mask, set_icon_mask, with_icon_mask: Pixmap = ffi::IconMaskHint;
    window_group, set_window_group, with_window_group: Window = ffi::WindowGroupHint;
});

/// WM_CLASS
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassHint {
    pub res_name: String,
    pub res_class: String,
}

impl ClassHint {
    pub fn new(res_name: impl Into<String>, res_class: impl Into<String>) -> Self {
        ClassHint {
            res_name: res_name.into(),
            res_class: res_class.into(),
        }
    }

    /// Parse the raw WM_CLASS property: two NUL-terminated strings
    pub fn from_property(data: &[u8]) -> Option<Self> {
        let mut parts = data.split(|&b| b == 0);
        let name = parts.next()?;
        let class = parts.next().unwrap_or_default();
        Some(ClassHint {
            res_name: String::from_utf8_lossy(name).into_owned(),
            res_class: String::from_utf8_lossy(class).into_owned(),
        })
    }

    pub fn to_property(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.res_name.len() + self.res_class.len() + 2);
        data.extend_from_slice(self.res_name.as_bytes());
        data.push(0);
        data.extend_from_slice(self.res_class.as_bytes());
        data.push(0);
        data
    }
}

raw_wrapper! {
    /// One entry of WM_ICON_SIZE
    pub struct IconSize(ffi::XIconSize) {
        min_width, set_min_width: i32;
        min_height, set_min_height: i32;
        max_width, set_max_width: i32;
        max_height, set_max_height: i32;
        width_inc, set_width_inc: i32;
        height_inc, set_height_inc: i32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_hints_flags() {
        let hints = SizeHints::fixed(300, 200);
        assert_eq!(hints.mask(), ffi::PMinSize | ffi::PMaxSize);
        assert_eq!(hints.max_width(), 300);
        assert!(hints.aspect().is_none());

        let mut hints = hints;
        hints.set_aspect((4, 3), (16, 9));
        assert_eq!(hints.aspect(), Some(((4, 3), (16, 9))));
        assert!(hints.is_set(ffi::PAspect));
    }

    #[test]
    fn test_wm_hints_urgency_and_state() {
        let mut hints = WmHints::new().with_input(true).with_state(WmState::Iconic);
        assert_eq!(hints.mask(), ffi::InputHint | ffi::StateHint);
        assert_eq!(hints.state(), Some(WmState::Iconic));

        hints.set_urgency(true);
        assert!(hints.urgency());
        hints.set_urgency(false);
        assert!(!hints.urgency());
        assert!(hints.input());
    }

    #[test]
    fn test_class_hint_property() {
        let hint = ClassHint::new("xterm", "XTerm");
        let data = hint.to_property();
        assert_eq!(data, b"xterm\0XTerm\0");
        assert_eq!(ClassHint::from_property(&data), Some(hint));
    }
}
