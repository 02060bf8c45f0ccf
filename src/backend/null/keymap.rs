//! Built-in keyboard layout
//!
//! Keycodes 8 to 102 carry the printable ASCII keysyms in order, with the
//! uppercase letter in the shifted column. A handful of keycodes above
//! that carry modifiers and editing keys.

use libc::c_uint;

use crate::backend::LookedUpKey;
use crate::ffi;
use crate::types::*;
use crate::wrappers::{KeyboardMapping, ModifierKeymap};

pub(super) const MIN_KEYCODE: u8 = 8;
pub(super) const MAX_KEYCODE: u8 = 255;
pub(super) const KEYSYMS_PER_KEYCODE: usize = 2;

const XK_BACKSPACE: ffi::KeySym = 0xff08;
const XK_TAB: ffi::KeySym = 0xff09;
const XK_RETURN: ffi::KeySym = 0xff0d;
const XK_ESCAPE: ffi::KeySym = 0xff1b;

const FUNCTION_KEYS: [(u8, ffi::KeySym); 10] = [
    (110, 0xffe1), // Shift_L
    (111, 0xffe2), // Shift_R
    (112, 0xffe3), // Control_L
    (113, 0xffe4), // Control_R
    (114, 0xffe5), // Caps_Lock
    (115, 0xffe9), // Alt_L
    (116, XK_RETURN),
    (117, XK_ESCAPE),
    (118, XK_BACKSPACE),
    (119, XK_TAB),
];

#[derive(Debug, Clone)]
pub(super) struct Keymap {
    keysyms: Vec<KeySym>,
}

impl Keymap {
    pub(super) fn new() -> Self {
        let count = usize::from(MAX_KEYCODE - MIN_KEYCODE) + 1;
        let mut keysyms = vec![KeySym::NONE; count * KEYSYMS_PER_KEYCODE];

        for (i, ch) in (0x20u8..=0x7e).enumerate() {
            let base = i * KEYSYMS_PER_KEYCODE;
            keysyms[base] = KeySym(ffi::KeySym::from(ch));
            if ch.is_ascii_lowercase() {
                keysyms[base + 1] = KeySym(ffi::KeySym::from(ch.to_ascii_uppercase()));
            }
        }
        for (code, sym) in FUNCTION_KEYS {
            keysyms[usize::from(code - MIN_KEYCODE) * KEYSYMS_PER_KEYCODE] = KeySym(sym);
        }

        Keymap { keysyms }
    }

    pub(super) fn keysyms_for(&self, key: KeyCode) -> &[KeySym] {
        if key.0 < MIN_KEYCODE {
            return &[];
        }
        let start = usize::from(key.0 - MIN_KEYCODE) * KEYSYMS_PER_KEYCODE;
        self.keysyms
            .get(start..start + KEYSYMS_PER_KEYCODE)
            .unwrap_or(&[])
    }

    pub(super) fn keysym(&self, key: KeyCode, index: usize) -> Option<KeySym> {
        self.keysyms_for(key)
            .get(index)
            .copied()
            .filter(|sym| !sym.is_none())
    }

    /// First keycode producing `sym` in any column
    pub(super) fn keycode(&self, sym: KeySym) -> Option<KeyCode> {
        if sym.is_none() {
            return None;
        }
        self.keysyms
            .iter()
            .position(|&s| s == sym)
            .map(|i| KeyCode(MIN_KEYCODE + (i / KEYSYMS_PER_KEYCODE) as u8))
    }

    pub(super) fn mapping(&self, first: KeyCode, count: u32) -> KeyboardMapping {
        let start = usize::from(first.0 - MIN_KEYCODE) * KEYSYMS_PER_KEYCODE;
        let end = start + count as usize * KEYSYMS_PER_KEYCODE;
        KeyboardMapping {
            first_keycode: first,
            keysyms_per_keycode: KEYSYMS_PER_KEYCODE,
            keysyms: self.keysyms[start..end].to_vec(),
        }
    }

    /// Keysym and Latin-1 text for a key pressed with modifier `state`
    pub(super) fn lookup(&self, key: KeyCode, state: c_uint) -> LookedUpKey {
        let shifted = state & (ffi::ShiftMask | ffi::LockMask) != 0;
        let sym = match self.keysyms_for(key) {
            [_, upper] if shifted && !upper.is_none() => *upper,
            [base, _] => *base,
            _ => KeySym::NONE,
        };
        if sym.is_none() {
            return LookedUpKey::default();
        }
        LookedUpKey {
            keysym: Some(sym),
            text: text_for(sym, state & ffi::ControlMask != 0),
        }
    }
}

fn text_for(sym: KeySym, control: bool) -> String {
    let ch = match sym.0 {
        0x20..=0x7e | 0xa0..=0xff => char::from(sym.0 as u8),
        XK_RETURN => '\r',
        XK_TAB => '\t',
        XK_BACKSPACE => '\x08',
        XK_ESCAPE => '\x1b',
        _ => return String::new(),
    };
    if control && (ch == ' ' || ('@'..='~').contains(&ch)) {
        return char::from(ch as u8 & 0x1f).to_string();
    }
    ch.to_string()
}

/// Shift, Lock, Control and Mod1 bound to the keycodes above
pub(super) fn modifier_map() -> ModifierKeymap {
    let mut map = ModifierKeymap::new(2);
    map.insert(0, KeyCode(110));
    map.insert(0, KeyCode(111));
    map.insert(1, KeyCode(114));
    map.insert(2, KeyCode(112));
    map.insert(2, KeyCode(113));
    map.insert(3, KeyCode(115));
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_have_shifted_column() {
        let keymap = Keymap::new();
        let a = keymap.keycode(KeySym(0x61)).unwrap();
        assert_eq!(keymap.keysym(a, 0), Some(KeySym(0x61)));
        assert_eq!(keymap.keysym(a, 1), Some(KeySym(0x41)));

        let one = keymap.keycode(KeySym(0x31)).unwrap();
        assert_eq!(keymap.keysym(one, 1), None);
    }

    #[test]
    fn test_lookup_text() {
        let keymap = Keymap::new();
        let a = keymap.keycode(KeySym(0x61)).unwrap();

        assert_eq!(keymap.lookup(a, 0).text, "a");
        assert_eq!(keymap.lookup(a, ffi::ShiftMask).text, "A");
        assert_eq!(keymap.lookup(a, ffi::LockMask).keysym, Some(KeySym(0x41)));
        assert_eq!(keymap.lookup(a, ffi::ControlMask).text, "\x01");

        let ret = KeyCode(116);
        assert_eq!(keymap.lookup(ret, 0).text, "\r");
        assert_eq!(keymap.lookup(KeyCode(110), 0).text, "");
        assert_eq!(keymap.lookup(KeyCode(200), 0), LookedUpKey::default());
    }

    #[test]
    fn test_mapping_slice() {
        let keymap = Keymap::new();
        let mapping = keymap.mapping(KeyCode(8), 2);
        assert_eq!(mapping.keycode_count(), 2);
        assert_eq!(mapping.keysyms_for(KeyCode(8)), &[KeySym(0x20), KeySym::NONE]);
    }

    #[test]
    fn test_modifier_map() {
        let map = modifier_map();
        assert_eq!(map.modifier_of(KeyCode(111)), Some(0));
        assert_eq!(map.modifier_of(KeyCode(115)), Some(3));
        assert_eq!(map.modifier_of(KeyCode(40)), None);
    }
}
