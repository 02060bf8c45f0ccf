//! Atoms, window properties and selections

use super::{Checked, NullBackend};
use crate::error::ErrorCode;
use crate::event::*;
use crate::ffi;
use crate::types::*;
use crate::wrappers::{Property, PropertyValue};

/// Property items as the bytes a GetProperty offset counts in
fn value_bytes(value: &PropertyValue) -> Vec<u8> {
    match value {
        PropertyValue::Format8(items) => items.clone(),
        PropertyValue::Format16(items) => items.iter().flat_map(|v| v.to_ne_bytes()).collect(),
        PropertyValue::Format32(items) => items.iter().flat_map(|v| v.to_ne_bytes()).collect(),
    }
}

fn value_from_bytes(format: i32, bytes: &[u8]) -> PropertyValue {
    match format {
        16 => PropertyValue::Format16(
            bytes
                .chunks_exact(2)
                .map(|c| u16::from_ne_bytes([c[0], c[1]]))
                .collect(),
        ),
        32 => PropertyValue::Format32(
            bytes
                .chunks_exact(4)
                .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
        ),
        _ => PropertyValue::Format8(bytes.to_vec()),
    }
}

fn empty_like(value: &PropertyValue) -> PropertyValue {
    value_from_bytes(value.format(), &[])
}

fn concat(first: &PropertyValue, second: &PropertyValue) -> PropertyValue {
    let mut bytes = value_bytes(first);
    bytes.extend(value_bytes(second));
    value_from_bytes(first.format(), &bytes)
}

impl NullBackend {
    pub(super) fn atom_exists(&self, atom: Atom) -> bool {
        atom.predefined_name().is_some()
            || atom
                .0
                .checked_sub(Atom::FIRST_USER_ATOM)
                .is_some_and(|i| (i as usize) < self.atoms.len())
    }

    pub(super) fn atom_name(&self, atom: Atom) -> Option<String> {
        if let Some(name) = atom.predefined_name() {
            return Some(name.to_string());
        }
        let index = atom.0.checked_sub(Atom::FIRST_USER_ATOM)?;
        self.atoms.get(index as usize).cloned()
    }

    /// InternAtom. Unknown names give NONE when `only_if_exists` is set.
    pub(super) fn intern(&mut self, name: &str, only_if_exists: bool) -> Atom {
        if let Some(atom) = Atom::predefined(name) {
            return atom;
        }
        if let Some(i) = self.atoms.iter().position(|n| n == name) {
            return Atom(Atom::FIRST_USER_ATOM + i as ffi::Atom);
        }
        if only_if_exists {
            return Atom::NONE;
        }
        self.atoms.push(name.to_string());
        Atom(Atom::FIRST_USER_ATOM + (self.atoms.len() - 1) as ffi::Atom)
    }

    pub(super) fn check_atom(&self, atom: Atom) -> Checked<()> {
        if self.atom_exists(atom) {
            Ok(())
        } else {
            Err((ErrorCode::Atom, atom.0))
        }
    }

    fn property_notify(&mut self, window: Window, atom: Atom, state: i32) {
        let mut event = PropertyEvent::default();
        event.set_window(window);
        event.set_atom(atom);
        event.set_time(self.now());
        event.set_state(state);
        self.notify(window, ffi::PropertyChangeMask, Event::PropertyNotify(event));
    }

    pub(super) fn put_property(
        &mut self,
        window: Window,
        property: Atom,
        type_: Atom,
        mode: PropMode,
        value: &PropertyValue,
    ) -> Checked<()> {
        self.window_ref(window)?;
        self.check_atom(property)?;
        self.check_atom(type_)?;

        let state = self.window_mut(window)?;
        match state.properties.iter_mut().find(|(name, _)| *name == property) {
            Some((_, existing)) if mode != PropMode::Replace => {
                if existing.type_ != type_ || existing.format() != value.format() {
                    return Err((ErrorCode::Match, window.0));
                }
                existing.value = match mode {
                    PropMode::Prepend => concat(value, &existing.value),
                    _ => concat(&existing.value, value),
                };
            }
            Some((_, existing)) => *existing = Property::new(type_, value.clone()),
            None => state.properties.push((property, Property::new(type_, value.clone()))),
        }
        self.property_notify(window, property, ffi::PropertyNewValue);
        Ok(())
    }

    /// GetProperty. `offset` and `length` count 4-byte units. A type
    /// mismatch returns the actual type and size with no data.
    pub(super) fn read_property(
        &mut self,
        window: Window,
        property: Atom,
        offset: i64,
        length: i64,
        delete: bool,
        req_type: Atom,
    ) -> Checked<Option<Property>> {
        let state = self.window_ref(window)?;
        self.check_atom(property)?;
        if !req_type.is_none() {
            self.check_atom(req_type)?;
        }
        if offset < 0 {
            return Err((ErrorCode::Value, offset as ffi::XID));
        }
        if length < 0 {
            return Err((ErrorCode::Value, length as ffi::XID));
        }
        let Some(stored) = state.property(property) else {
            return Ok(None);
        };

        let bytes = value_bytes(&stored.value);
        let total = bytes.len() as u64;
        if !req_type.is_none() && req_type != stored.type_ {
            return Ok(Some(Property {
                type_: stored.type_,
                value: empty_like(&stored.value),
                bytes_after: total,
            }));
        }
        let start = (offset as u64).saturating_mul(4);
        if start > total {
            return Err((ErrorCode::Value, offset as ffi::XID));
        }
        let end = total.min(start.saturating_add((length as u64).saturating_mul(4)));
        let reply = Property {
            type_: stored.type_,
            value: value_from_bytes(stored.format(), &bytes[start as usize..end as usize]),
            bytes_after: total - end,
        };

        if delete && reply.bytes_after == 0 {
            self.remove_property(window, property)?;
        }
        Ok(Some(reply))
    }

    pub(super) fn remove_property(&mut self, window: Window, property: Atom) -> Checked<()> {
        self.check_atom(property)?;
        let state = self.window_mut(window)?;
        let before = state.properties.len();
        state.properties.retain(|(name, _)| *name != property);
        if state.properties.len() != before {
            self.property_notify(window, property, ffi::PropertyDelete);
        }
        Ok(())
    }

    pub(super) fn property_names(&self, window: Window) -> Checked<Vec<Atom>> {
        Ok(self
            .window_ref(window)?
            .properties
            .iter()
            .map(|(name, _)| *name)
            .collect())
    }

    /// Read a whole property of one type for the client-side hint calls.
    /// Errors are raised; a missing or mistyped property reads as `None`.
    pub(super) fn whole_property(
        &mut self,
        request: &'static str,
        window: Window,
        property: Atom,
        type_: Atom,
    ) -> Option<Property> {
        self.record(request);
        match self.read_property(window, property, 0, i64::from(i32::MAX), false, type_) {
            Ok(found) => found.filter(|p| p.type_ == type_),
            Err(err) => {
                self.raise(err, ffi::X_GetProperty);
                None
            }
        }
    }

    /// SetSelectionOwner. Requests with a time before the last change or
    /// after the current server time are ignored.
    pub(super) fn set_owner(&mut self, selection: Atom, owner: Window, time: Timestamp) -> Checked<()> {
        self.check_atom(selection)?;
        if !owner.is_none() {
            self.window_ref(owner)?;
        }
        let now = self.now();
        let time = if time == Timestamp::CURRENT_TIME { now } else { time };
        let previous = self.selections.get(&selection).copied();
        if time > now || previous.is_some_and(|(_, changed)| time < changed) {
            log::debug!("Ignoring stale ownership change of {}", selection);
            return Ok(());
        }

        self.selections.insert(selection, (owner, time));
        if let Some((old, _)) = previous {
            if !old.is_none() && old != owner {
                let mut clear = SelectionClearEvent::default();
                clear.set_window(old);
                clear.set_selection(selection);
                clear.set_time(time);
                self.enqueue(Event::SelectionClear(clear));
            }
        }
        Ok(())
    }

    pub(super) fn owner(&self, selection: Atom) -> Checked<Window> {
        self.check_atom(selection)?;
        Ok(self
            .selections
            .get(&selection)
            .map_or(Window::NONE, |&(owner, _)| owner))
    }

    /// ConvertSelection: a SelectionRequest to the owner, or a refusing
    /// SelectionNotify to the requestor when there is none
    pub(super) fn convert(
        &mut self,
        selection: Atom,
        target: Atom,
        property: Atom,
        requestor: Window,
        time: Timestamp,
    ) -> Checked<()> {
        self.window_ref(requestor)?;
        self.check_atom(target)?;
        if !property.is_none() {
            self.check_atom(property)?;
        }
        let owner = self.owner(selection)?;

        let event = if owner.is_none() {
            let mut notify = SelectionEvent::default();
            notify.set_requestor(requestor);
            notify.set_selection(selection);
            notify.set_target(target);
            notify.set_property(Atom::NONE);
            notify.set_time(time);
            Event::SelectionNotify(notify)
        } else {
            let mut request = SelectionRequestEvent::default();
            request.set_owner(owner);
            request.set_requestor(requestor);
            request.set_selection(selection);
            request.set_target(target);
            request.set_property(property);
            request.set_time(time);
            Event::SelectionRequest(request)
        };
        self.enqueue(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_slicing_keeps_format() {
        let value = PropertyValue::Format16(vec![1, 2, 3, 4]);
        let bytes = value_bytes(&value);
        assert_eq!(bytes.len(), 8);
        assert_eq!(value_from_bytes(16, &bytes[4..]), PropertyValue::Format16(vec![3, 4]));
        assert_eq!(empty_like(&value), PropertyValue::Format16(Vec::new()));
    }

    #[test]
    fn test_concat() {
        let a = PropertyValue::string("ab");
        let b = PropertyValue::string("cd");
        assert_eq!(concat(&a, &b), PropertyValue::string("abcd"));
        assert_eq!(
            concat(&PropertyValue::Format32(vec![7]), &PropertyValue::Format32(vec![8])),
            PropertyValue::Format32(vec![7, 8])
        );
    }
}
