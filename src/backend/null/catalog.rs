//! Named colors and fonts known to the null server

use crate::types::{Atom, Font};
use crate::wrappers::{CharMetrics, Color, FontInfo, FontProp};
use crate::ffi;

/// Color database, keys lowercase without spaces
const COLOR_NAMES: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 255, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("gray", [190, 190, 190]),
    ("grey", [190, 190, 190]),
    ("darkgray", [169, 169, 169]),
    ("darkgrey", [169, 169, 169]),
    ("lightgray", [211, 211, 211]),
    ("lightgrey", [211, 211, 211]),
    ("orange", [255, 165, 0]),
    ("navy", [0, 0, 128]),
    ("navyblue", [0, 0, 128]),
    ("purple", [160, 32, 240]),
    ("brown", [165, 42, 42]),
    ("pink", [255, 192, 203]),
    ("gold", [255, 215, 0]),
];

/// Exact database value of a color name. Case and spaces are ignored.
pub(super) fn named_color(name: &str) -> Option<Color> {
    let key: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    COLOR_NAMES
        .iter()
        .find(|(n, _)| *n == key)
        .map(|(_, [r, g, b])| Color::rgb8(*r, *g, *b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FontFace {
    /// 6x13 character cell font
    Fixed,
    /// Glyphs of the standard cursor shapes
    Cursor,
}

pub(super) const FONT_NAMES: &[(&str, FontFace)] = &[
    ("-misc-fixed-medium-r-semicondensed--13-120-75-75-c-60-iso8859-1", FontFace::Fixed),
    ("6x13", FontFace::Fixed),
    ("cursor", FontFace::Cursor),
    ("fixed", FontFace::Fixed),
];

/// The font a name or pattern opens: the first match in list order
pub(super) fn find_font(pattern: &str) -> Option<FontFace> {
    FONT_NAMES
        .iter()
        .find(|(name, _)| glob_match(pattern, name))
        .map(|&(_, face)| face)
}

impl FontFace {
    pub(super) fn last_char(self) -> u32 {
        match self {
            FontFace::Fixed => 255,
            FontFace::Cursor => 153,
        }
    }

    pub(super) fn info(self, fid: Font) -> FontInfo {
        let (metrics, ascent, descent, point_size) = match self {
            FontFace::Fixed => (CharMetrics::new(0, 6, 6, 11, 2), 11, 2, 120),
            FontFace::Cursor => (CharMetrics::new(0, 16, 16, 16, 0), 16, 0, 160),
        };
        let prop = |name: Atom, value: ffi::XID| {
            let mut p = FontProp::default();
            p.set_name(name);
            p.set_card32(value);
            p
        };
        FontInfo {
            fid,
            direction: ffi::FontLeftToRight as u32,
            min_char_or_byte2: 0,
            max_char_or_byte2: self.last_char(),
            min_byte1: 0,
            max_byte1: 0,
            all_chars_exist: true,
            default_char: 0,
            properties: vec![
                prop(Atom::POINT_SIZE, point_size),
                prop(Atom::QUAD_WIDTH, metrics.width() as ffi::XID),
            ],
            min_bounds: metrics,
            max_bounds: metrics,
            per_char: Vec::new(),
            ascent,
            descent,
        }
    }
}

/// Case-insensitive match with `*` and `?` wildcards, as XListFonts uses
pub(super) fn glob_match(pattern: &str, name: &str) -> bool {
    fn matches(p: &[u8], n: &[u8]) -> bool {
        match (p.first(), n.first()) {
            (None, None) => true,
            (Some(b'*'), _) => matches(&p[1..], n) || (!n.is_empty() && matches(p, &n[1..])),
            (Some(b'?'), Some(_)) => matches(&p[1..], &n[1..]),
            (Some(a), Some(b)) if a.eq_ignore_ascii_case(b) => matches(&p[1..], &n[1..]),
            _ => false,
        }
    }
    matches(pattern.as_bytes(), name.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_names_ignore_case_and_spaces() {
        let c = named_color("Dark Gray").unwrap();
        assert_eq!(c.red(), 169 * 0x101);
        assert_eq!(named_color("RED"), named_color("red"));
        assert!(named_color("no such color").is_none());
    }

    #[test]
    fn test_glob() {
        assert!(glob_match("*", "fixed"));
        assert!(glob_match("FIX?D", "fixed"));
        assert!(glob_match("-misc-*-120-*", FONT_NAMES[0].0));
        assert!(!glob_match("fix", "fixed"));
        assert!(!glob_match("?", ""));
    }

    #[test]
    fn test_find_font() {
        assert_eq!(find_font("fixed"), Some(FontFace::Fixed));
        assert_eq!(find_font("cur*"), Some(FontFace::Cursor));
        assert_eq!(find_font("*helvetica*"), None);
    }

    #[test]
    fn test_fixed_metrics() {
        let info = FontFace::Fixed.info(Font::new(0x22));
        assert_eq!(info.text_width(b"abc"), 18);
        assert_eq!(info.height(), 13);
        assert_eq!(info.property(Atom::POINT_SIZE), Some(120));
    }
}
