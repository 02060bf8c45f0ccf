//! Pointer, grabs and keyboard control of the null server

use libc::{c_int, c_uint, c_ulong};

use super::keymap::{MAX_KEYCODE, MIN_KEYCODE};
use super::{Checked, NullBackend, PassiveGrab, ROOT, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::ErrorCode;
use crate::event::*;
use crate::ffi;
use crate::types::*;
use crate::wrappers::{KeyboardControl, KeyboardState};

const DEFAULT_BELL_PERCENT: i32 = 50;
const DEFAULT_BELL_PITCH: c_uint = 400;
const DEFAULT_BELL_DURATION: c_uint = 100;

/// Keyboard control values at server reset
pub(super) fn initial_keyboard() -> KeyboardState {
    let mut state = KeyboardState::default();
    state.set_bell_percent(DEFAULT_BELL_PERCENT);
    state.set_bell_pitch(DEFAULT_BELL_PITCH);
    state.set_bell_duration(DEFAULT_BELL_DURATION);
    state.set_global_auto_repeat(true);
    state.set_auto_repeats([0xff; 32]);
    state
}

/// A control value where -1 restores the default
fn control_value(value: c_int, default: c_int, max: Option<c_int>) -> Checked<c_int> {
    match value {
        -1 => Ok(default),
        v if v < 0 || max.is_some_and(|max| v > max) => Err((ErrorCode::Value, v as ffi::XID)),
        v => Ok(v),
    }
}

/// Passive grabs match when detail and modifiers agree; zero detail and
/// AnyModifier act as wildcards on removal
fn covers(pattern: &PassiveGrab, grab: &PassiveGrab) -> bool {
    pattern.window == grab.window
        && (pattern.detail == 0 || pattern.detail == grab.detail)
        && (pattern.modifiers == ffi::AnyModifier || pattern.modifiers == grab.modifiers)
}

impl NullBackend {
    /// Status of an active grab on `window`. Bad arguments are errors;
    /// windows that cannot take the grab give GrabNotViewable.
    pub(super) fn grab_status(&self, window: Window, confine_to: Window, cursor: Cursor) -> Checked<GrabStatus> {
        self.window_ref(window)?;
        if !confine_to.is_none() {
            self.window_ref(confine_to)?;
        }
        if !cursor.is_none() && !self.cursors.contains(&cursor) {
            return Err((ErrorCode::Cursor, cursor.0));
        }
        if !self.viewable(window) || (!confine_to.is_none() && !self.viewable(confine_to)) {
            return Ok(GrabStatus::NotViewable);
        }
        Ok(GrabStatus::Success)
    }

    pub(super) fn check_keycode(&self, key: KeyCode) -> Checked<()> {
        if key == KeyCode::ANY || (MIN_KEYCODE..=MAX_KEYCODE).contains(&key.0) {
            Ok(())
        } else {
            Err((ErrorCode::Value, ffi::XID::from(key.0)))
        }
    }

    /// Add a passive grab, replacing one on the same combination
    pub(super) fn add_grab(grabs: &mut Vec<PassiveGrab>, grab: PassiveGrab) {
        grabs.retain(|g| !(g.window == grab.window && g.detail == grab.detail && g.modifiers == grab.modifiers));
        grabs.push(grab);
    }

    pub(super) fn remove_grabs(grabs: &mut Vec<PassiveGrab>, pattern: PassiveGrab) {
        grabs.retain(|g| !covers(&pattern, g));
    }

    fn crossing(&self, window: Window, detail: c_int) -> CrossingEvent {
        let (ox, oy) = self.origin(window);
        let (x, y) = self.pointer;
        let mut crossing = CrossingEvent::default();
        crossing.set_window(window);
        crossing.set_root(ROOT);
        crossing.set_time(self.now());
        crossing.set_x(x - ox);
        crossing.set_y(y - oy);
        crossing.set_x_root(x);
        crossing.set_y_root(y);
        crossing.set_mode(ffi::NotifyNormal);
        crossing.set_detail(detail);
        crossing.set_same_screen(true);
        crossing.set_focus(self.focus.0 == window);
        crossing
    }

    /// Move the pointer to a root position, reporting the crossing and
    /// the motion
    pub(super) fn move_pointer(&mut self, x: i32, y: i32) {
        let x = x.clamp(0, SCREEN_WIDTH as i32 - 1);
        let y = y.clamp(0, SCREEN_HEIGHT as i32 - 1);
        let old = self.window_at(self.pointer.0, self.pointer.1);
        self.pointer = (x, y);
        let new = self.window_at(x, y);

        if old != new {
            let (leave, enter) = if self.is_inferior(new, old) {
                (ffi::NotifyInferior, ffi::NotifyAncestor)
            } else if self.is_inferior(old, new) {
                (ffi::NotifyAncestor, ffi::NotifyInferior)
            } else {
                (ffi::NotifyNonlinear, ffi::NotifyNonlinear)
            };
            let event = Event::LeaveNotify(self.crossing(old, leave));
            self.notify(old, ffi::LeaveWindowMask, event);
            let event = Event::EnterNotify(self.crossing(new, enter));
            self.notify(new, ffi::EnterWindowMask, event);
        }

        let mut current = new;
        while let Some(state) = self.windows.get(&current) {
            if state.event_mask() & ffi::PointerMotionMask != 0 {
                let (ox, oy) = self.origin(current);
                let mut motion = MotionEvent::default();
                motion.set_window(current);
                motion.set_root(ROOT);
                motion.set_subwindow(if current == new { Window::NONE } else { new });
                motion.set_time(self.now());
                motion.set_x(x - ox);
                motion.set_y(y - oy);
                motion.set_x_root(x);
                motion.set_y_root(y);
                motion.set_same_screen(true);
                self.enqueue(Event::MotionNotify(motion));
                return;
            }
            let blocked = state.attributes.is_set(ffi::CWDontPropagate)
                && state.attributes.do_not_propagate_mask() & ffi::PointerMotionMask != 0;
            if blocked {
                return;
            }
            current = state.parent;
        }
    }

    /// Apply a ChangeKeyboardControl value list. Nothing changes unless
    /// every value is valid.
    pub(super) fn keyboard_control(&mut self, control: &KeyboardControl) -> Checked<()> {
        let mut state = self.keyboard;
        if control.is_set(ffi::KBKeyClickPercent) {
            state.set_key_click_percent(control_value(control.key_click_percent(), 0, Some(100))?);
        }
        if control.is_set(ffi::KBBellPercent) {
            state.set_bell_percent(control_value(control.bell_percent(), DEFAULT_BELL_PERCENT, Some(100))?);
        }
        if control.is_set(ffi::KBBellPitch) {
            let pitch = control_value(control.bell_pitch(), DEFAULT_BELL_PITCH as c_int, None)?;
            state.set_bell_pitch(pitch as c_uint);
        }
        if control.is_set(ffi::KBBellDuration) {
            let duration = control_value(control.bell_duration(), DEFAULT_BELL_DURATION as c_int, None)?;
            state.set_bell_duration(duration as c_uint);
        }

        if control.is_set(ffi::KBLed) && !control.is_set(ffi::KBLedMode) {
            return Err((ErrorCode::Match, 0));
        }
        if control.is_set(ffi::KBLedMode) {
            let on = match control.led_mode() {
                ffi::LedModeOn => true,
                ffi::LedModeOff => false,
                mode => return Err((ErrorCode::Value, mode as ffi::XID)),
            };
            let bits: c_ulong = if control.is_set(ffi::KBLed) {
                let led = control.led();
                if !(1..=32).contains(&led) {
                    return Err((ErrorCode::Value, led as ffi::XID));
                }
                1 << (led - 1)
            } else {
                0xffff_ffff
            };
            let mask = state.led_mask();
            state.set_led_mask(if on { mask | bits } else { mask & !bits });
        }

        if control.is_set(ffi::KBKey) && !control.is_set(ffi::KBAutoRepeatMode) {
            return Err((ErrorCode::Match, 0));
        }
        if control.is_set(ffi::KBAutoRepeatMode) {
            let mode = control.auto_repeat_mode();
            if !(ffi::AutoRepeatModeOff..=ffi::AutoRepeatModeDefault).contains(&mode) {
                return Err((ErrorCode::Value, mode as ffi::XID));
            }
            let on = mode != ffi::AutoRepeatModeOff;
            if control.is_set(ffi::KBKey) {
                let key = control.key();
                if !(c_int::from(MIN_KEYCODE)..=c_int::from(MAX_KEYCODE)).contains(&key) {
                    return Err((ErrorCode::Value, key as ffi::XID));
                }
                let mut bits = state.auto_repeats();
                let (byte, bit) = (key as usize / 8, key % 8);
                if on {
                    bits[byte] |= 1 << bit;
                } else {
                    bits[byte] &= !(1 << bit);
                }
                state.set_auto_repeats(bits);
            } else {
                state.set_global_auto_repeat(on);
            }
        }

        self.keyboard = state;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_value_defaults() {
        assert_eq!(control_value(-1, 50, Some(100)), Ok(50));
        assert_eq!(control_value(70, 50, Some(100)), Ok(70));
        assert!(control_value(101, 50, Some(100)).is_err());
        assert!(control_value(-2, 400, None).is_err());
    }

    #[test]
    fn test_wildcard_removal() {
        let window = Window::new(0x400001);
        let grab = |detail, modifiers| PassiveGrab {
            window,
            detail,
            modifiers,
        };
        let mut grabs = Vec::new();
        NullBackend::add_grab(&mut grabs, grab(1, 0));
        NullBackend::add_grab(&mut grabs, grab(1, 0));
        NullBackend::add_grab(&mut grabs, grab(3, ffi::ShiftMask));
        assert_eq!(grabs.len(), 2);

        NullBackend::remove_grabs(&mut grabs, grab(1, ffi::ShiftMask));
        assert_eq!(grabs.len(), 2);
        NullBackend::remove_grabs(&mut grabs, grab(0, ffi::AnyModifier));
        assert!(grabs.is_empty());
    }
}
