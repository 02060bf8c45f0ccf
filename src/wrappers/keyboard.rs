//! Keyboard state, control and mappings

use libc::{c_int, c_uint, c_ulong};

use crate::ffi;
use crate::field::{accessors, masked_accessors};
use crate::types::*;

/// Result of XGetKeyboardControl
#[derive(Clone, Copy, Default)]
pub struct KeyboardState {
    raw: ffi::XKeyboardState,
}

impl KeyboardState {
    pub fn from_raw(raw: ffi::XKeyboardState) -> Self {
        KeyboardState { raw }
    }

    pub fn as_raw(&self) -> &ffi::XKeyboardState {
        &self.raw
    }

    /// Bit vector of keys with auto-repeat enabled, one bit per keycode
    pub fn auto_repeats(&self) -> [u8; 32] {
        self.raw.auto_repeats.map(|b| b as u8)
    }

    pub fn set_auto_repeats(&mut self, bits: [u8; 32]) {
        self.raw.auto_repeats = bits.map(|b| b as libc::c_char);
    }

    pub fn key_repeats(&self, key: KeyCode) -> bool {
        let byte = self.raw.auto_repeats[usize::from(key.0 / 8)] as u8;
        byte & (1 << (key.0 % 8)) != 0
    }

    pub fn led_on(&self, led: u32) -> bool {
        (1..=32).contains(&led) && self.raw.led_mask & (1 << (led - 1)) != 0
    }
}

accessors!(KeyboardState {
    key_click_percent, set_key_click_percent: i32;
    bell_percent, set_bell_percent: i32;
    bell_pitch, set_bell_pitch: c_uint;
    bell_duration, set_bell_duration: c_uint;
    led_mask, set_led_mask: c_ulong;
    global_auto_repeat, set_global_auto_repeat: bool;
});

/// The value list of XChangeKeyboardControl
#[derive(Clone, Copy, Default)]
pub struct KeyboardControl {
    mask: c_ulong,
    raw: ffi::XKeyboardControl,
}

impl KeyboardControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_raw(&self) -> &ffi::XKeyboardControl {
        &self.raw
    }

    /// Turn one LED on or off
    pub fn with_led_state(self, led: i32, on: bool) -> Self {
        let mode = if on { ffi::LedModeOn } else { ffi::LedModeOff };
        self.with_led(led).with_led_mode(mode)
    }

    /// Enable or disable auto-repeat for one key
    pub fn with_key_repeat(self, key: KeyCode, on: bool) -> Self {
        let mode = if on {
            ffi::AutoRepeatModeOn
        } else {
            ffi::AutoRepeatModeOff
        };
        self.with_key(c_int::from(key.0)).with_auto_repeat_mode(mode)
    }
}

masked_accessors!(KeyboardControl, mask: c_ulong = mask {
    key_click_percent, set_key_click_percent, with_key_click_percent: c_int = ffi::KBKeyClickPercent;
    bell_percent, set_bell_percent, with_bell_percent: c_int = ffi::KBBellPercent;
    bell_pitch, set_bell_pitch, with_bell_pitch: c_int = ffi::KBBellPitch;
    bell_duration, set_bell_duration, with_bell_duration: c_int = ffi::KBBellDuration;
    led, set_led, with_led: c_int = ffi::KBLed;
    led_mode, set_led_mode, with_led_mode: c_int = ffi::KBLedMode;
    key, set_key, with_key: c_int = ffi::KBKey;
    auto_repeat_mode, set_auto_repeat_mode, with_auto_repeat_mode: c_int = ffi::KBAutoRepeatMode;
});

/// The keycodes bound to the eight modifiers, `max_keypermod` per modifier
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModifierKeymap {
    max_keypermod: usize,
    keycodes: Vec<KeyCode>,
}

impl ModifierKeymap {
    pub fn new(max_keypermod: usize) -> Self {
        ModifierKeymap {
            max_keypermod,
            keycodes: vec![KeyCode(0); 8 * max_keypermod],
        }
    }

    /// Copy a keymap returned by XGetModifierMapping.
    ///
    /// # Safety
    /// `raw.modifiermap` must hold `8 * raw.max_keypermod` keycodes.
    pub unsafe fn from_raw(raw: &ffi::XModifierKeymap) -> Self {
        let max_keypermod = raw.max_keypermod.max(0) as usize;
        let keycodes = if raw.modifiermap.is_null() {
            vec![KeyCode(0); 8 * max_keypermod]
        } else {
            std::slice::from_raw_parts(raw.modifiermap, 8 * max_keypermod)
                .iter()
                .map(|&k| KeyCode(k))
                .collect()
        };
        ModifierKeymap {
            max_keypermod,
            keycodes,
        }
    }

    /// Build the C form and pass it to `f`; the pointer is valid during the
    /// call only.
    pub fn with_raw<R>(&self, f: impl FnOnce(*mut ffi::XModifierKeymap) -> R) -> R {
        let mut codes: Vec<ffi::KeyCode> = self.keycodes.iter().map(|k| k.0).collect();
        let mut raw = ffi::XModifierKeymap {
            max_keypermod: self.max_keypermod as c_int,
            modifiermap: codes.as_mut_ptr(),
        };
        f(&mut raw)
    }

    pub fn max_keypermod(&self) -> usize {
        self.max_keypermod
    }

    /// Keycodes of modifier `index` (0 = Shift .. 7 = Mod5), zeros included
    pub fn modifier(&self, index: usize) -> &[KeyCode] {
        let start = index * self.max_keypermod;
        self.keycodes
            .get(start..start + self.max_keypermod)
            .unwrap_or(&[])
    }

    /// Add a keycode to a modifier, growing the table when its row is full
    pub fn insert(&mut self, index: usize, key: KeyCode) {
        if index >= 8 || self.modifier(index).contains(&key) {
            return;
        }
        let start = index * self.max_keypermod;
        if let Some(slot) = self.keycodes[start..start + self.max_keypermod]
            .iter_mut()
            .find(|k| k.0 == 0)
        {
            *slot = key;
            return;
        }
        let old = std::mem::replace(self, ModifierKeymap::new(self.max_keypermod + 1));
        let width = self.max_keypermod;
        for m in 0..8 {
            let row = old.modifier(m);
            self.keycodes[m * width..m * width + row.len()].copy_from_slice(row);
        }
        self.keycodes[index * width + old.max_keypermod] = key;
    }

    /// Remove a keycode from a modifier
    pub fn remove(&mut self, index: usize, key: KeyCode) {
        if index >= 8 {
            return;
        }
        let start = index * self.max_keypermod;
        for slot in &mut self.keycodes[start..start + self.max_keypermod] {
            if *slot == key {
                *slot = KeyCode(0);
            }
        }
    }

    /// Modifier index the keycode is bound to
    pub fn modifier_of(&self, key: KeyCode) -> Option<usize> {
        (0..8).find(|&m| self.modifier(m).contains(&key))
    }
}

/// Keysyms of a keycode range, `keysyms_per_keycode` per keycode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyboardMapping {
    pub first_keycode: KeyCode,
    pub keysyms_per_keycode: usize,
    pub keysyms: Vec<KeySym>,
}

impl KeyboardMapping {
    pub fn keysyms_for(&self, key: KeyCode) -> &[KeySym] {
        if key < self.first_keycode || self.keysyms_per_keycode == 0 {
            return &[];
        }
        let start = usize::from(key.0 - self.first_keycode.0) * self.keysyms_per_keycode;
        self.keysyms
            .get(start..start + self.keysyms_per_keycode)
            .unwrap_or(&[])
    }

    pub fn keycode_count(&self) -> usize {
        if self.keysyms_per_keycode == 0 {
            0
        } else {
            self.keysyms.len() / self.keysyms_per_keycode
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_repeats_bit_vector() {
        let mut state = KeyboardState::default();
        let mut bits = [0u8; 32];
        bits[4] = 0b0000_0100;
        state.set_auto_repeats(bits);

        assert!(state.key_repeats(KeyCode(34)));
        assert!(!state.key_repeats(KeyCode(35)));
    }

    #[test]
    fn test_keyboard_control_mask() {
        let control = KeyboardControl::new()
            .with_bell_percent(50)
            .with_key_repeat(KeyCode(38), false);
        assert_eq!(
            control.mask(),
            ffi::KBBellPercent | ffi::KBKey | ffi::KBAutoRepeatMode
        );
        assert_eq!(control.key(), 38);
        assert_eq!(control.auto_repeat_mode(), ffi::AutoRepeatModeOff);
    }

    #[test]
    fn test_modifier_keymap_insert_grows() {
        let mut map = ModifierKeymap::new(1);
        map.insert(0, KeyCode(50));
        assert_eq!(map.modifier(0), &[KeyCode(50)]);

        map.insert(0, KeyCode(62));
        assert_eq!(map.max_keypermod(), 2);
        assert_eq!(map.modifier(0), &[KeyCode(50), KeyCode(62)]);
        assert_eq!(map.modifier_of(KeyCode(62)), Some(0));

        map.remove(0, KeyCode(50));
        assert_eq!(map.modifier_of(KeyCode(50)), None);
    }

    #[test]
    fn test_modifier_keymap_raw_round_trip() {
        let mut map = ModifierKeymap::new(2);
        map.insert(2, KeyCode(37));
        let copy = map.with_raw(|raw| unsafe { ModifierKeymap::from_raw(&*raw) });
        assert_eq!(copy, map);
    }

    #[test]
    fn test_keyboard_mapping_lookup() {
        let mapping = KeyboardMapping {
            first_keycode: KeyCode(8),
            keysyms_per_keycode: 2,
            keysyms: vec![KeySym(0x61), KeySym(0x41), KeySym(0x62), KeySym(0x42)],
        };
        assert_eq!(mapping.keysyms_for(KeyCode(9)), &[KeySym(0x62), KeySym(0x42)]);
        assert!(mapping.keysyms_for(KeyCode(7)).is_empty());
        assert!(mapping.keysyms_for(KeyCode(10)).is_empty());
        assert_eq!(mapping.keycode_count(), 2);
    }
}
