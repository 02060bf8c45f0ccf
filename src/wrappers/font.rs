//! Font metrics
//!
//! `XFontStruct` points at library-allocated per-character metrics and
//! properties. [`FontInfo`] copies all of it out so the C struct can be
//! released as soon as a query returns.

use libc::{c_int, c_ulong};

use crate::error::{Error, Result};
use crate::ffi;
use crate::field::raw_wrapper;
use crate::types::*;

raw_wrapper! {
    /// Metrics of one character, or the min/max bounds of a font
    pub struct CharMetrics(ffi::XCharStruct) {
        lbearing, set_lbearing: i16;
        rbearing, set_rbearing: i16;
        width, set_width: i16;
        ascent, set_ascent: i16;
        descent, set_descent: i16;
        attributes, set_attributes: u16;
    }
}

impl PartialEq for CharMetrics {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (&self.raw, &other.raw);
        a.lbearing == b.lbearing
            && a.rbearing == b.rbearing
            && a.width == b.width
            && a.ascent == b.ascent
            && a.descent == b.descent
            && a.attributes == b.attributes
    }
}

impl CharMetrics {
    pub fn new(lbearing: i16, rbearing: i16, width: i16, ascent: i16, descent: i16) -> Self {
        CharMetrics::from_raw(ffi::XCharStruct {
            lbearing,
            rbearing,
            width,
            ascent,
            descent,
            attributes: 0,
        })
    }

    /// Zero width and zero bounding box mark a nonexistent character.
    /// The attributes field is ignored.
    pub fn is_nonexistent(&self) -> bool {
        let r = &self.raw;
        r.width == 0 && r.lbearing == 0 && r.rbearing == 0 && r.ascent == 0 && r.descent == 0
    }
}

raw_wrapper! {
    /// A font property: an atom naming it and a 32-bit value
    pub struct FontProp(ffi::XFontProp) {
        name, set_name: Atom;
        card32, set_card32: c_ulong;
    }
}

/// Direction, ascent, descent and overall metrics of a string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtents {
    pub direction: i32,
    pub font_ascent: i32,
    pub font_descent: i32,
    pub overall: CharMetrics,
}

/// Everything XQueryFont reports about a font
#[derive(Debug, Clone, Default)]
pub struct FontInfo {
    pub fid: Font,
    pub direction: u32,
    pub min_char_or_byte2: u32,
    pub max_char_or_byte2: u32,
    pub min_byte1: u32,
    pub max_byte1: u32,
    pub all_chars_exist: bool,
    pub default_char: u32,
    pub properties: Vec<FontProp>,
    pub min_bounds: CharMetrics,
    pub max_bounds: CharMetrics,
    /// Empty when every character has the min_bounds metrics
    pub per_char: Vec<CharMetrics>,
    pub ascent: i32,
    pub descent: i32,
}

impl FontInfo {
    /// Copy a font struct, including its per-character metrics and
    /// properties.
    ///
    /// # Safety
    /// `raw` must be a font struct filled in by Xlib.
    pub unsafe fn from_raw(raw: &ffi::XFontStruct) -> Self {
        let properties = if raw.properties.is_null() || raw.n_properties <= 0 {
            Vec::new()
        } else {
            std::slice::from_raw_parts(raw.properties, raw.n_properties as usize)
                .iter()
                .map(|p| FontProp::from_raw(*p))
                .collect()
        };

        let mut info = FontInfo {
            fid: Font(raw.fid),
            direction: raw.direction,
            min_char_or_byte2: raw.min_char_or_byte2,
            max_char_or_byte2: raw.max_char_or_byte2,
            min_byte1: raw.min_byte1,
            max_byte1: raw.max_byte1,
            all_chars_exist: from_bool(raw.all_chars_exist),
            default_char: raw.default_char,
            properties,
            min_bounds: CharMetrics::from_raw(raw.min_bounds),
            max_bounds: CharMetrics::from_raw(raw.max_bounds),
            per_char: Vec::new(),
            ascent: raw.ascent,
            descent: raw.descent,
        };

        if !raw.per_char.is_null() {
            let count = info.char_count();
            info.per_char = std::slice::from_raw_parts(raw.per_char, count)
                .iter()
                .map(|c| CharMetrics::from_raw(*c))
                .collect();
        }

        info
    }

    /// Build a C font struct whose arrays point into this value and pass it
    /// to `f`. The pointer is only valid for the duration of the call.
    ///
    /// Fails when `per_char` is neither empty nor `char_count()` long, since
    /// Xlib would index past its end.
    pub fn with_raw<R>(&self, f: impl FnOnce(*mut ffi::XFontStruct) -> R) -> Result<R> {
        if !self.per_char.is_empty() && self.per_char.len() != self.char_count() {
            return Err(Error::InvalidArgument(format!(
                "font has {} per-char entries, {} needed",
                self.per_char.len(),
                self.char_count()
            )));
        }
        let mut properties: Vec<ffi::XFontProp> =
            self.properties.iter().map(|p| p.into_raw()).collect();
        let mut per_char: Vec<ffi::XCharStruct> =
            self.per_char.iter().map(|c| c.into_raw()).collect();

        let mut raw = ffi::XFontStruct {
            fid: self.fid.0,
            direction: self.direction,
            min_char_or_byte2: self.min_char_or_byte2,
            max_char_or_byte2: self.max_char_or_byte2,
            min_byte1: self.min_byte1,
            max_byte1: self.max_byte1,
            all_chars_exist: to_bool(self.all_chars_exist),
            default_char: self.default_char,
            n_properties: properties.len() as c_int,
            properties: if properties.is_empty() {
                std::ptr::null_mut()
            } else {
                properties.as_mut_ptr()
            },
            min_bounds: self.min_bounds.into_raw(),
            max_bounds: self.max_bounds.into_raw(),
            per_char: if per_char.is_empty() {
                std::ptr::null_mut()
            } else {
                per_char.as_mut_ptr()
            },
            ascent: self.ascent,
            descent: self.descent,
            ..Default::default()
        };

        Ok(f(&mut raw))
    }

    /// Number of entries a per-char table of this font holds
    pub fn char_count(&self) -> usize {
        let cols = self.max_char_or_byte2.saturating_sub(self.min_char_or_byte2) + 1;
        let rows = self.max_byte1.saturating_sub(self.min_byte1) + 1;
        if self.max_char_or_byte2 < self.min_char_or_byte2 {
            0
        } else {
            (cols * rows) as usize
        }
    }

    pub fn height(&self) -> i32 {
        self.ascent + self.descent
    }

    /// Value of a font property, such as `Atom::POINT_SIZE`
    pub fn property(&self, name: Atom) -> Option<c_ulong> {
        self.properties
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.card32())
    }

    /// Metrics of an 8-bit character, falling back to the default char for
    /// characters outside the font. Two-byte fonts are read from row 0.
    pub fn char_metrics(&self, ch: u8) -> Option<CharMetrics> {
        self.cell(0, u32::from(ch)).or_else(|| self.default_metrics())
    }

    fn default_metrics(&self) -> Option<CharMetrics> {
        self.cell(self.default_char >> 8, self.default_char & 0xff)
    }

    fn cell(&self, row: u32, col: u32) -> Option<CharMetrics> {
        if row < self.min_byte1 || row > self.max_byte1 {
            return None;
        }
        if col < self.min_char_or_byte2 || col > self.max_char_or_byte2 {
            return None;
        }
        if self.per_char.is_empty() {
            return Some(self.min_bounds);
        }
        let cols = (self.max_char_or_byte2 - self.min_char_or_byte2 + 1) as usize;
        let index = (row - self.min_byte1) as usize * cols + (col - self.min_char_or_byte2) as usize;
        self.per_char.get(index).copied().filter(|m| !m.is_nonexistent())
    }

    /// Width of `text` in pixels, computed from the metrics the way
    /// XTextWidth does
    pub fn text_width(&self, text: &[u8]) -> i32 {
        if self.default_metrics().is_some() && self.min_bounds.width() == self.max_bounds.width() {
            return i32::from(self.min_bounds.width()) * text.len() as i32;
        }
        text.iter()
            .filter_map(|&ch| self.char_metrics(ch))
            .map(|m| i32::from(m.width()))
            .sum()
    }

    /// Overall metrics of `text`, computed the way XTextExtents does
    pub fn text_extents(&self, text: &[u8]) -> TextExtents {
        let mut overall = CharMetrics::default();
        let mut first = true;

        for metrics in text.iter().filter_map(|&ch| self.char_metrics(ch)) {
            let x = i32::from(overall.width());
            if first {
                overall = CharMetrics::new(
                    metrics.lbearing(),
                    metrics.rbearing(),
                    metrics.width(),
                    metrics.ascent(),
                    metrics.descent(),
                );
                first = false;
            } else {
                overall.set_ascent(overall.ascent().max(metrics.ascent()));
                overall.set_descent(overall.descent().max(metrics.descent()));
                overall.set_lbearing(overall.lbearing().min((x + i32::from(metrics.lbearing())) as i16));
                overall.set_rbearing(overall.rbearing().max((x + i32::from(metrics.rbearing())) as i16));
                overall.set_width((x + i32::from(metrics.width())) as i16);
            }
        }

        TextExtents {
            direction: self.direction as i32,
            font_ascent: self.ascent,
            font_descent: self.descent,
            overall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_font() -> FontInfo {
        FontInfo {
            fid: Font::new(0x200000),
            min_char_or_byte2: 32,
            max_char_or_byte2: 126,
            default_char: 32,
            all_chars_exist: true,
            min_bounds: CharMetrics::new(0, 6, 6, 10, 3),
            max_bounds: CharMetrics::new(0, 6, 6, 10, 3),
            ascent: 10,
            descent: 3,
            properties: vec![FontProp::from_raw(ffi::XFontProp {
                name: ffi::XA_POINT_SIZE,
                card32: 120,
            })],
            ..Default::default()
        }
    }

    #[test]
    fn test_monospace_width() {
        let font = fixed_font();
        assert_eq!(font.text_width(b"hello"), 30);
        assert_eq!(font.height(), 13);
        assert_eq!(font.char_count(), 95);
    }

    #[test]
    fn test_out_of_range_uses_default_char() {
        let font = fixed_font();
        assert_eq!(font.text_width(b"\x01"), 6);
    }

    #[test]
    fn test_per_char_metrics() {
        let mut font = fixed_font();
        font.min_char_or_byte2 = 97;
        font.max_char_or_byte2 = 98;
        font.default_char = 97;
        font.per_char = vec![CharMetrics::new(0, 5, 5, 7, 0), CharMetrics::new(-1, 9, 8, 11, 2)];

        let extents = font.text_extents(b"ab");
        assert_eq!(extents.overall.width(), 13);
        assert_eq!(extents.overall.ascent(), 11);
        assert_eq!(extents.overall.descent(), 2);
        assert_eq!(extents.overall.lbearing(), 0);
        assert_eq!(extents.overall.rbearing(), 14);
    }

    #[test]
    fn test_property_lookup() {
        let font = fixed_font();
        assert_eq!(font.property(Atom::POINT_SIZE), Some(120));
        assert_eq!(font.property(Atom::WEIGHT), None);
    }

    #[test]
    fn test_raw_round_trip_keeps_tables() {
        let mut font = fixed_font();
        font.min_char_or_byte2 = 65;
        font.max_char_or_byte2 = 66;
        font.per_char = vec![CharMetrics::new(0, 4, 4, 8, 0), CharMetrics::new(0, 5, 5, 8, 0)];

        let copy = font.with_raw(|raw| unsafe { FontInfo::from_raw(&*raw) }).unwrap();
        assert_eq!(copy.per_char, font.per_char);
        assert_eq!(copy.property(Atom::POINT_SIZE), Some(120));
        assert_eq!(copy.fid, font.fid);
    }

    fn two_row_font() -> FontInfo {
        let mut per_char = vec![CharMetrics::new(0, 5, 5, 9, 2); 256];
        per_char.extend(vec![CharMetrics::new(0, 9, 9, 9, 2); 256]);
        FontInfo {
            min_byte1: 0,
            max_byte1: 1,
            min_char_or_byte2: 0,
            max_char_or_byte2: 255,
            default_char: 0x20,
            min_bounds: CharMetrics::new(0, 5, 5, 9, 2),
            max_bounds: CharMetrics::new(0, 9, 9, 9, 2),
            per_char,
            ascent: 9,
            descent: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_two_byte_font_reads_row_zero() {
        let font = two_row_font();
        assert_eq!(font.char_count(), 512);
        assert_eq!(font.text_width(b"abc"), 15);
        assert_eq!(font.text_extents(b"abc").overall.rbearing(), 15);
    }

    #[test]
    fn test_missing_per_char_uses_min_bounds() {
        let mut font = fixed_font();
        font.min_bounds = CharMetrics::new(0, 4, 4, 8, 1);
        font.max_bounds = CharMetrics::new(0, 8, 8, 10, 3);
        assert_eq!(font.text_width(b"abc"), 12);
        assert_eq!(font.text_extents(b"ab").overall.ascent(), 8);
    }

    #[test]
    fn test_nonexistent_chars_are_skipped() {
        let mut font = two_row_font();
        font.per_char[usize::from(b'x')] = CharMetrics::default();
        font.default_char = 0x1ff;
        // default_char names row 1, so a missing char still counts
        assert_eq!(font.text_width(b"xa"), 14);

        font.default_char = 0x300;
        assert_eq!(font.text_width(b"xa"), 5);
        assert_eq!(font.text_extents(b"x").overall, CharMetrics::default());
    }

    #[test]
    fn test_short_per_char_table() {
        let mut font = fixed_font();
        font.min_bounds = CharMetrics::new(0, 4, 4, 8, 1);
        font.per_char = vec![CharMetrics::new(0, 6, 6, 10, 3)];
        // 'a' is past the end of the table; the default char (space) is not
        assert_eq!(font.text_width(b"a"), 6);
        assert_eq!(font.text_extents(b"aa").overall.width(), 12);
        assert!(font.with_raw(|_| ()).is_err());
    }
}
