//! Property encodings of the ICCCM client hints
//!
//! Every hint is a list of 32-bit items. Readers accept the shorter lists
//! written by pre-ICCCM clients and clear the flags those lack.

use libc::c_long;

use crate::ffi;
use crate::wrappers::{IconSize, PropertyValue, SizeHints, WmHints};

/// Items in WM_HINTS
pub(super) const WM_HINTS_ITEMS: usize = 9;
/// Items in WM_SIZE_HINTS, and in the pre-ICCCM form
pub(super) const SIZE_HINTS_ITEMS: usize = 18;
pub(super) const OLD_SIZE_HINTS_ITEMS: usize = 15;
const ICON_SIZE_ITEMS: usize = 6;

pub(super) fn encode_wm_hints(hints: &WmHints) -> PropertyValue {
    let raw = hints.as_raw();
    PropertyValue::Format32(vec![
        raw.flags as u32,
        raw.input as u32,
        raw.initial_state as u32,
        raw.icon_pixmap as u32,
        raw.icon_window as u32,
        raw.icon_x as u32,
        raw.icon_y as u32,
        raw.icon_mask as u32,
        raw.window_group as u32,
    ])
}

pub(super) fn decode_wm_hints(items: &[u32]) -> Option<WmHints> {
    if items.len() < WM_HINTS_ITEMS - 1 {
        return None;
    }
    let mut raw = ffi::XWMHints {
        flags: items[0] as c_long,
        input: items[1] as i32,
        initial_state: items[2] as i32,
        icon_pixmap: ffi::XID::from(items[3]),
        icon_window: ffi::XID::from(items[4]),
        icon_x: items[5] as i32,
        icon_y: items[6] as i32,
        icon_mask: ffi::XID::from(items[7]),
        window_group: 0,
    };
    match items.get(8) {
        Some(&group) => raw.window_group = ffi::XID::from(group),
        None => raw.flags &= !ffi::WindowGroupHint,
    }
    Some(WmHints::from_raw(raw))
}

pub(super) fn encode_size_hints(hints: &SizeHints) -> PropertyValue {
    let raw = hints.as_raw();
    let items = [
        raw.flags as i32,
        raw.x,
        raw.y,
        raw.width,
        raw.height,
        raw.min_width,
        raw.min_height,
        raw.max_width,
        raw.max_height,
        raw.width_inc,
        raw.height_inc,
        raw.min_aspect.x,
        raw.min_aspect.y,
        raw.max_aspect.x,
        raw.max_aspect.y,
        raw.base_width,
        raw.base_height,
        raw.win_gravity,
    ];
    PropertyValue::Format32(items.iter().map(|&v| v as u32).collect())
}

pub(super) fn decode_size_hints(items: &[u32]) -> Option<SizeHints> {
    if items.len() < OLD_SIZE_HINTS_ITEMS {
        return None;
    }
    let v = |i: usize| items.get(i).map_or(0, |&item| item as i32);
    let mut raw = ffi::XSizeHints {
        flags: c_long::from(v(0)),
        x: v(1),
        y: v(2),
        width: v(3),
        height: v(4),
        min_width: v(5),
        min_height: v(6),
        max_width: v(7),
        max_height: v(8),
        width_inc: v(9),
        height_inc: v(10),
        min_aspect: ffi::AspectRatio { x: v(11), y: v(12) },
        max_aspect: ffi::AspectRatio { x: v(13), y: v(14) },
        base_width: v(15),
        base_height: v(16),
        win_gravity: v(17),
    };
    if items.len() < SIZE_HINTS_ITEMS {
        raw.flags &= !(ffi::PBaseSize | ffi::PWinGravity);
    }
    Some(SizeHints::from_raw(raw))
}

pub(super) fn encode_icon_sizes(sizes: &[IconSize]) -> PropertyValue {
    let items = sizes
        .iter()
        .flat_map(|size| {
            [
                size.min_width(),
                size.min_height(),
                size.max_width(),
                size.max_height(),
                size.width_inc(),
                size.height_inc(),
            ]
        })
        .map(|v| v as u32)
        .collect();
    PropertyValue::Format32(items)
}

pub(super) fn decode_icon_sizes(items: &[u32]) -> Vec<IconSize> {
    items
        .chunks_exact(ICON_SIZE_ITEMS)
        .map(|c| {
            IconSize::from_raw(ffi::XIconSize {
                min_width: c[0] as i32,
                min_height: c[1] as i32,
                max_width: c[2] as i32,
                max_height: c[3] as i32,
                width_inc: c[4] as i32,
                height_inc: c[5] as i32,
            })
        })
        .collect()
}

/// WM_COMMAND: each argument followed by a NUL
pub(super) fn encode_command(argv: &[&str]) -> PropertyValue {
    let mut bytes = Vec::new();
    for arg in argv {
        bytes.extend_from_slice(arg.as_bytes());
        bytes.push(0);
    }
    PropertyValue::Format8(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    fn items(value: &PropertyValue) -> Vec<u32> {
        match value {
            PropertyValue::Format32(items) => items.clone(),
            other => panic!("unexpected format {}", other.format()),
        }
    }

    #[test]
    fn test_wm_hints_layout() {
        let hints = WmHints::new()
            .with_input(true)
            .with_window_group(Window::new(0x400001));
        let encoded = items(&encode_wm_hints(&hints));
        assert_eq!(encoded.len(), WM_HINTS_ITEMS);
        assert_eq!(encoded[0] as c_long, ffi::InputHint | ffi::WindowGroupHint);
        assert_eq!(encoded[8], 0x400001);

        let decoded = decode_wm_hints(&encoded).unwrap();
        assert!(decoded.input());
        assert_eq!(decoded.window_group(), Window::new(0x400001));
    }

    #[test]
    fn test_short_wm_hints_drop_window_group() {
        let mut encoded = items(&encode_wm_hints(&WmHints::new().with_window_group(Window::new(7))));
        encoded.truncate(8);
        let decoded = decode_wm_hints(&encoded).unwrap();
        assert!(!decoded.is_set(ffi::WindowGroupHint));
        assert!(decode_wm_hints(&encoded[..7]).is_none());
    }

    #[test]
    fn test_size_hints_layout() {
        let mut hints = SizeHints::fixed(200, 100).with_base_width(10).with_base_height(10);
        hints.set_aspect((1, 2), (3, 4));
        let encoded = items(&encode_size_hints(&hints));
        assert_eq!(encoded.len(), SIZE_HINTS_ITEMS);
        assert_eq!(encoded[5], 200);
        assert_eq!(encoded[14], 4);

        let decoded = decode_size_hints(&encoded).unwrap();
        assert_eq!(decoded.max_width(), 200);
        assert_eq!(decoded.aspect(), Some(((1, 2), (3, 4))));
        assert!(decoded.is_set(ffi::PBaseSize));

        let old = decode_size_hints(&encoded[..OLD_SIZE_HINTS_ITEMS]).unwrap();
        assert!(!old.is_set(ffi::PBaseSize));
        assert!(old.is_set(ffi::PMinSize));
    }

    #[test]
    fn test_icon_sizes_and_command() {
        let mut size = IconSize::default();
        size.set_max_width(64);
        size.set_width_inc(8);
        let encoded = items(&encode_icon_sizes(&[size, size]));
        assert_eq!(encoded.len(), 12);
        let decoded = decode_icon_sizes(&encoded[..11]);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].max_width(), 64);

        assert_eq!(
            encode_command(&["xterm", "-e", "top"]),
            PropertyValue::Format8(b"xterm\0-e\0top\0".to_vec())
        );
    }
}
