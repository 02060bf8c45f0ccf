//! The loaded Xlib and its display-independent calls

use std::ffi::CString;
use std::path::Path;
use std::sync::Arc;

use libc::{c_char, c_int, c_uint};

use crate::error::{check_status, Error, Result};
use crate::ffi;
use crate::types::{FillRule, KeySym, Point};
use crate::wrappers::{string_from_c, CharMetrics, FontInfo, Region, ResourceDatabase, TextExtents};

/// A resource manager quark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quark(pub ffi::XrmQuark);

/// Result of [`Library::parse_geometry`]. Absent components are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParsedGeometry {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// The x offset was given relative to the right edge
    pub x_negative: bool,
    /// The y offset was given relative to the bottom edge
    pub y_negative: bool,
}

/// Handle to a loaded libX11. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Library {
    xlib: Arc<ffi::Xlib>,
}

impl Library {
    /// Load libX11 under its usual names
    pub fn load() -> Result<Self> {
        Self::load_from(ffi::DEFAULT_LIBRARY_NAMES)
    }

    /// Load the first of `names` that opens and resolves
    pub fn load_from(names: &[&str]) -> Result<Self> {
        let xlib = ffi::Xlib::open_any(names)?;
        log::debug!("Resolved Xlib entry points from {}", xlib.library_name());
        Ok(Library {
            xlib: Arc::new(xlib),
        })
    }

    #[cfg(test)]
    pub(crate) fn from_xlib(xlib: ffi::Xlib) -> Self {
        Library { xlib: Arc::new(xlib) }
    }

    /// The function table, for calls this crate does not wrap
    pub fn raw(&self) -> &ffi::Xlib {
        &self.xlib
    }

    pub(crate) fn shared(&self) -> Arc<ffi::Xlib> {
        self.xlib.clone()
    }

    pub fn library_name(&self) -> &str {
        self.xlib.library_name()
    }

    /// XInitThreads. Must come before any other Xlib call for the
    /// library's internal locking to take effect.
    pub fn init_threads(&self) -> Result<()> {
        // SAFETY: no arguments
        let status = unsafe { (self.xlib.XInitThreads)() };
        check_status(status, "XInitThreads")
    }

    /// Keysym named `name`, e.g. "Return" or "a"
    pub fn string_to_keysym(&self, name: &str) -> Result<Option<KeySym>> {
        let c_name = CString::new(name)?;
        // SAFETY: c_name is NUL-terminated
        let sym = unsafe { (self.xlib.XStringToKeysym)(c_name.as_ptr()) };
        Ok(if sym == ffi::NoSymbol {
            None
        } else {
            Some(KeySym(sym))
        })
    }

    pub fn keysym_to_string(&self, sym: KeySym) -> Option<String> {
        // SAFETY: the result is a static string owned by Xlib, or null
        unsafe { string_from_c((self.xlib.XKeysymToString)(sym.0)) }
    }

    /// Lower and upper case forms of a keysym
    pub fn convert_case(&self, sym: KeySym) -> (KeySym, KeySym) {
        let (mut lower, mut upper) = (0, 0);
        // SAFETY: out parameters are writable
        unsafe { (self.xlib.XConvertCase)(sym.0, &mut lower, &mut upper) };
        (KeySym(lower), KeySym(upper))
    }

    /// Parse a standard geometry string such as `80x24+10-20`
    pub fn parse_geometry(&self, spec: &str) -> Result<ParsedGeometry> {
        let c_spec = CString::new(spec)?;
        let (mut x, mut y): (c_int, c_int) = (0, 0);
        let (mut width, mut height): (c_uint, c_uint) = (0, 0);
        // SAFETY: c_spec is NUL-terminated and out parameters are writable
        let flags = unsafe {
            (self.xlib.XParseGeometry)(c_spec.as_ptr(), &mut x, &mut y, &mut width, &mut height)
        };
        if flags == ffi::NoValue && !spec.trim().is_empty() {
            return Err(Error::InvalidArgument(format!("bad geometry {:?}", spec)));
        }
        let has = |bit: c_int| flags & bit != 0;
        Ok(ParsedGeometry {
            x: has(ffi::XValue).then_some(x),
            y: has(ffi::YValue).then_some(y),
            width: has(ffi::WidthValue).then_some(width),
            height: has(ffi::HeightValue).then_some(height),
            x_negative: has(ffi::XNegative),
            y_negative: has(ffi::YNegative),
        })
    }

    /// XTextWidth over the metrics in `font`
    pub fn text_width(&self, font: &FontInfo, text: &[u8]) -> Result<i32> {
        let len = text_len(text)?;
        // SAFETY: the font struct and text outlive the call
        font.with_raw(|raw| unsafe { (self.xlib.XTextWidth)(raw, text.as_ptr() as *const c_char, len) })
    }

    /// XTextExtents over the metrics in `font`
    pub fn text_extents(&self, font: &FontInfo, text: &[u8]) -> Result<TextExtents> {
        let len = text_len(text)?;
        let (mut direction, mut font_ascent, mut font_descent) = (0, 0, 0);
        let mut overall = ffi::XCharStruct::default();
        // SAFETY: the font struct and text outlive the call and the out
        // parameters are writable
        font.with_raw(|raw| unsafe {
            (self.xlib.XTextExtents)(
                raw,
                text.as_ptr() as *const c_char,
                len,
                &mut direction,
                &mut font_ascent,
                &mut font_descent,
                &mut overall,
            )
        })?;
        Ok(TextExtents {
            direction,
            font_ascent,
            font_descent,
            overall: CharMetrics::from_raw(overall),
        })
    }

    /// Whether Xlib supports the current C locale
    pub fn supports_locale(&self) -> bool {
        // SAFETY: no arguments
        unsafe { (self.xlib.XSupportsLocale)() != ffi::False }
    }

    /// Set the locale modifiers; returns the previous list
    pub fn set_locale_modifiers(&self, modifiers: &str) -> Result<Option<String>> {
        let c_mods = CString::new(modifiers)?;
        // SAFETY: c_mods is NUL-terminated; the result is owned by Xlib
        Ok(unsafe { string_from_c((self.xlib.XSetLocaleModifiers)(c_mods.as_ptr())) })
    }

    /// The display name XOpenDisplay would use for `name`; with `None` this
    /// is `$DISPLAY`
    pub fn display_name(&self, name: Option<&str>) -> Result<String> {
        let c_name = name.map(CString::new).transpose()?;
        let ptr = c_name.as_ref().map_or(std::ptr::null(), |s| s.as_ptr());
        // SAFETY: ptr is null or NUL-terminated; the result is owned by Xlib
        let result = unsafe { string_from_c((self.xlib.XDisplayName)(ptr)) };
        Ok(result.unwrap_or_default())
    }

    pub fn create_region(&self) -> Result<Region> {
        Region::new(self.shared())
    }

    pub fn polygon_region(&self, points: &[Point], rule: FillRule) -> Result<Region> {
        Region::polygon(self.shared(), points, rule)
    }

    /// A database parsed from resource-file syntax
    pub fn resource_database(&self, data: &str) -> Result<ResourceDatabase> {
        ResourceDatabase::from_string(self.shared(), data)
    }

    pub fn resource_database_from_file(&self, path: &Path) -> Result<ResourceDatabase> {
        ResourceDatabase::from_file(self.shared(), path)
    }

    pub fn empty_resource_database(&self) -> ResourceDatabase {
        ResourceDatabase::empty(self.shared())
    }

    pub fn quark(&self, name: &str) -> Result<Quark> {
        let c_name = CString::new(name)?;
        // SAFETY: c_name is NUL-terminated
        Ok(Quark(unsafe { (self.xlib.XrmStringToQuark)(c_name.as_ptr()) }))
    }

    pub fn unique_quark(&self) -> Quark {
        // SAFETY: no arguments
        Quark(unsafe { (self.xlib.XrmUniqueQuark)() })
    }

    pub fn quark_name(&self, quark: Quark) -> Option<String> {
        // SAFETY: the result is owned by Xlib, or null
        unsafe { string_from_c((self.xlib.XrmQuarkToString)(quark.0)) }
    }
}

fn text_len(text: &[u8]) -> Result<c_int> {
    c_int::try_from(text.len())
        .map_err(|_| Error::InvalidArgument(format!("text of {} bytes is too long", text.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> Option<Library> {
        ffi::xlib_for_tests().map(Library::from_xlib)
    }

    #[test]
    fn test_missing_library_reports_every_name() {
        let err = Library::load_from(&["libdoes-not-exist.so.1", "libnor-this.so"]).unwrap_err();
        match err {
            Error::LibraryLoad { names, reason } => {
                assert_eq!(names.len(), 2);
                assert!(reason.contains("libdoes-not-exist.so.1"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_keysym_names() {
        let Some(lib) = library() else {
            return;
        };
        let ret = lib.string_to_keysym("Return").unwrap();
        assert_eq!(ret, Some(KeySym(0xff0d)));
        assert_eq!(lib.keysym_to_string(KeySym(0x61)).as_deref(), Some("a"));
        assert_eq!(lib.string_to_keysym("NoSuchKeysymName").unwrap(), None);
        assert_eq!(lib.convert_case(KeySym(0x61)), (KeySym(0x61), KeySym(0x41)));
    }

    #[test]
    fn test_parse_geometry() {
        let Some(lib) = library() else {
            return;
        };
        let geo = lib.parse_geometry("80x24+10-20").unwrap();
        assert_eq!(geo.width, Some(80));
        assert_eq!(geo.height, Some(24));
        assert_eq!(geo.x, Some(10));
        assert_eq!(geo.y, Some(-20));
        assert!(geo.y_negative);
        assert!(!geo.x_negative);

        let size = lib.parse_geometry("640x480").unwrap();
        assert_eq!(size.x, None);
        assert!(lib.parse_geometry("garbage").is_err());
    }

    #[test]
    fn test_quarks() {
        let Some(lib) = library() else {
            return;
        };
        let q = lib.quark("background").unwrap();
        assert_eq!(lib.quark("background").unwrap(), q);
        assert_eq!(lib.quark_name(q).as_deref(), Some("background"));
        assert_ne!(lib.unique_quark(), lib.unique_quark());
    }

    #[test]
    fn test_text_metrics_match_xlib() {
        let Some(lib) = library() else {
            return;
        };
        let mut per_char = vec![CharMetrics::new(0, 6, 6, 10, 2); 256];
        per_char.extend(vec![CharMetrics::new(-1, 8, 7, 12, 3); 256]);
        per_char[usize::from(b'b')] = CharMetrics::new(1, 9, 8, 11, 2);
        let font = FontInfo {
            min_byte1: 0,
            max_byte1: 1,
            min_char_or_byte2: 0,
            max_char_or_byte2: 255,
            default_char: 0x20,
            min_bounds: CharMetrics::new(-1, 6, 6, 10, 2),
            max_bounds: CharMetrics::new(1, 9, 8, 12, 3),
            per_char,
            ascent: 12,
            descent: 3,
            ..Default::default()
        };

        let texts: [&[u8]; 4] = [b"abc", b"", b"bbb", b"\xff\x00"];
        for text in texts {
            assert_eq!(lib.text_width(&font, text).unwrap(), font.text_width(text));
            assert_eq!(lib.text_extents(&font, text).unwrap(), font.text_extents(text));
        }
        assert_eq!(lib.text_width(&font, b"abc").unwrap(), 20);

        let mut short = font.clone();
        short.per_char.truncate(10);
        assert!(matches!(lib.text_width(&short, b"a"), Err(Error::InvalidArgument(_))));
    }
}
