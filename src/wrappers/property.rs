//! Window property values
//!
//! Xlib hands 32-bit property data back as an array of C `long`, so on
//! 64-bit hosts each item occupies eight bytes. [`PropertyValue`] stores
//! items at their declared width and converts at the boundary.

use libc::{c_int, c_long, c_uchar, c_ulong};

use crate::types::*;

/// Property items, by format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Format8(Vec<u8>),
    Format16(Vec<u16>),
    Format32(Vec<u32>),
}

impl PropertyValue {
    pub fn format(&self) -> c_int {
        match self {
            PropertyValue::Format8(_) => 8,
            PropertyValue::Format16(_) => 16,
            PropertyValue::Format32(_) => 32,
        }
    }

    /// Number of items
    pub fn len(&self) -> usize {
        match self {
            PropertyValue::Format8(v) => v.len(),
            PropertyValue::Format16(v) => v.len(),
            PropertyValue::Format32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn atoms(atoms: &[Atom]) -> Self {
        PropertyValue::Format32(atoms.iter().map(|a| a.0 as u32).collect())
    }

    pub fn windows(windows: &[Window]) -> Self {
        PropertyValue::Format32(windows.iter().map(|w| w.0 as u32).collect())
    }

    pub fn string(text: &str) -> Self {
        PropertyValue::Format8(text.as_bytes().to_vec())
    }

    /// Copy `nitems` items returned by XGetWindowProperty.
    ///
    /// # Safety
    /// `data` must point to `nitems` items laid out for `format`, with
    /// format-32 items stored as C longs.
    pub unsafe fn from_raw(format: c_int, data: *const c_uchar, nitems: c_ulong) -> Option<Self> {
        let n = nitems as usize;
        if data.is_null() {
            return match format {
                8 => Some(PropertyValue::Format8(Vec::new())),
                16 => Some(PropertyValue::Format16(Vec::new())),
                32 => Some(PropertyValue::Format32(Vec::new())),
                _ => None,
            };
        }
        match format {
            8 => Some(PropertyValue::Format8(
                std::slice::from_raw_parts(data, n).to_vec(),
            )),
            16 => Some(PropertyValue::Format16(
                std::slice::from_raw_parts(data as *const libc::c_short, n)
                    .iter()
                    .map(|&v| v as u16)
                    .collect(),
            )),
            32 => Some(PropertyValue::Format32(
                std::slice::from_raw_parts(data as *const c_long, n)
                    .iter()
                    .map(|&v| v as u32)
                    .collect(),
            )),
            _ => None,
        }
    }

    /// Lay out the items the way XChangeProperty reads them and pass the
    /// buffer and item count to `f`
    pub fn with_raw<R>(&self, f: impl FnOnce(*const c_uchar, c_int) -> R) -> R {
        match self {
            PropertyValue::Format8(v) => f(v.as_ptr(), v.len() as c_int),
            PropertyValue::Format16(v) => {
                let items: Vec<libc::c_short> = v.iter().map(|&x| x as libc::c_short).collect();
                f(items.as_ptr() as *const c_uchar, items.len() as c_int)
            }
            PropertyValue::Format32(v) => {
                let items: Vec<c_long> = v.iter().map(|&x| x as c_long).collect();
                f(items.as_ptr() as *const c_uchar, items.len() as c_int)
            }
        }
    }
}

/// A property read back from a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub type_: Atom,
    pub value: PropertyValue,
    /// Bytes left on the server past the requested range
    pub bytes_after: u64,
}

impl Property {
    pub fn new(type_: Atom, value: PropertyValue) -> Self {
        Property {
            type_,
            value,
            bytes_after: 0,
        }
    }

    pub fn format(&self) -> c_int {
        self.value.format()
    }

    /// Format-8 data as text, lossily decoded and without a trailing NUL
    pub fn as_string(&self) -> Option<String> {
        match &self.value {
            PropertyValue::Format8(bytes) => {
                let trimmed = bytes.strip_suffix(&[0]).unwrap_or(bytes);
                Some(String::from_utf8_lossy(trimmed).into_owned())
            }
            _ => None,
        }
    }

    /// Format-8 data split at NULs, as in WM_COMMAND
    pub fn as_strings(&self) -> Option<Vec<String>> {
        match &self.value {
            PropertyValue::Format8(bytes) => {
                let trimmed = bytes.strip_suffix(&[0]).unwrap_or(bytes);
                if trimmed.is_empty() {
                    return Some(Vec::new());
                }
                Some(
                    trimmed
                        .split(|&b| b == 0)
                        .map(|s| String::from_utf8_lossy(s).into_owned())
                        .collect(),
                )
            }
            _ => None,
        }
    }

    pub fn as_cardinals(&self) -> Option<&[u32]> {
        match &self.value {
            PropertyValue::Format32(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_atoms(&self) -> Option<Vec<Atom>> {
        self.as_cardinals()
            .map(|items| items.iter().map(|&a| Atom(c_ulong::from(a))).collect())
    }

    pub fn as_windows(&self) -> Option<Vec<Window>> {
        self.as_cardinals()
            .map(|items| items.iter().map(|&w| Window(c_ulong::from(w))).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format32_is_marshalled_as_long() {
        let value = PropertyValue::atoms(&[Atom::WM_NAME, Atom::STRING]);
        let copy = value.with_raw(|data, n| unsafe {
            PropertyValue::from_raw(32, data, n as c_ulong)
        });
        assert_eq!(copy, Some(value));
    }

    #[test]
    fn test_string_accessors() {
        let prop = Property::new(Atom::STRING, PropertyValue::Format8(b"xterm\0-e\0vi\0".to_vec()));
        assert_eq!(prop.as_strings(), Some(vec!["xterm".into(), "-e".into(), "vi".into()]));
        assert_eq!(prop.as_atoms(), None);

        let name = Property::new(Atom::STRING, PropertyValue::string("hello"));
        assert_eq!(name.as_string().as_deref(), Some("hello"));
    }

    #[test]
    fn test_atom_list() {
        let prop = Property::new(Atom::ATOM, PropertyValue::atoms(&[Atom(300), Atom(301)]));
        assert_eq!(prop.format(), 32);
        assert_eq!(prop.as_atoms(), Some(vec![Atom(300), Atom(301)]));
        assert_eq!(prop.as_string(), None);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let data = [0u8; 4];
        assert_eq!(unsafe { PropertyValue::from_raw(24, data.as_ptr(), 1) }, None);
    }
}
