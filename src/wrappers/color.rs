//! Colors

use libc::{c_char, c_ulong};

use crate::ffi;
use crate::field::raw_wrapper;

raw_wrapper! {
    /// A colormap entry. Components are 16 bit; `flags` selects which of
    /// them a store applies to.
    pub struct Color(ffi::XColor) {
        pixel, set_pixel: c_ulong;
        red, set_red: u16;
        green, set_green: u16;
        blue, set_blue: u16;
        flags, set_flags: c_char;
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.pixel() == other.pixel()
            && self.red() == other.red()
            && self.green() == other.green()
            && self.blue() == other.blue()
    }
}

impl Eq for Color {}

/// DoRed | DoGreen | DoBlue
pub const DO_ALL: c_char = (ffi::DoRed | ffi::DoGreen | ffi::DoBlue) as c_char;

impl Color {
    /// A color with 16-bit components and all of DoRed, DoGreen, DoBlue set
    pub fn rgb(red: u16, green: u16, blue: u16) -> Self {
        let mut color = Color::default();
        color.set_red(red);
        color.set_green(green);
        color.set_blue(blue);
        color.set_flags(DO_ALL);
        color
    }

    /// A color from 8-bit components, scaled the way Xlib scales hex specs
    pub fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Color::rgb(
            u16::from(red) * 0x101,
            u16::from(green) * 0x101,
            u16::from(blue) * 0x101,
        )
    }

    /// A color naming only a pixel, as passed to XQueryColor
    pub fn from_pixel(pixel: c_ulong) -> Self {
        let mut color = Color::default();
        color.set_pixel(pixel);
        color
    }

    /// Parse the numeric color specifications Xlib understands without a
    /// server: `#RGB`, `#RRGGBB`, `#RRRGGGBBB`, `#RRRRGGGGBBBB` and
    /// `rgb:r/g/b` with one to four hex digits per component.
    pub fn parse_numeric(spec: &str) -> Option<Color> {
        if let Some(hex) = spec.strip_prefix('#') {
            if hex.is_empty() || hex.len() % 3 != 0 || hex.len() > 12 {
                return None;
            }
            let n = hex.len() / 3;
            let component = |i: usize| -> Option<u16> {
                let digits = hex.get(i * n..(i + 1) * n)?;
                let value = u16::from_str_radix(digits, 16).ok()?;
                // Old-style specs are left-justified in 16 bits
                Some(value << (16 - 4 * n as u32))
            };
            return Some(Color::rgb(component(0)?, component(1)?, component(2)?));
        }

        if let Some(body) = spec.strip_prefix("rgb:") {
            let parts: Vec<&str> = body.split('/').collect();
            if parts.len() != 3 {
                return None;
            }
            let mut values = [0u16; 3];
            for (value, part) in values.iter_mut().zip(parts) {
                if part.is_empty() || part.len() > 4 {
                    return None;
                }
                let raw = u32::from_str_radix(part, 16).ok()?;
                // New-style specs scale: "f" means 0xffff
                let max = (1u32 << (4 * part.len())) - 1;
                *value = (raw * 0xffff / max) as u16;
            }
            return Some(Color::rgb(values[0], values[1], values[2]));
        }

        None
    }
}

/// Result of a named-color lookup: the closest color the screen supports
/// and the exact database value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub screen: Color,
    pub exact: Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_specs() {
        let c = Color::parse_numeric("#ff8000").unwrap();
        assert_eq!((c.red(), c.green(), c.blue()), (0xff00, 0x8000, 0x0000));

        let c = Color::parse_numeric("#f00").unwrap();
        assert_eq!(c.red(), 0xf000);

        let c = Color::parse_numeric("#123456789abc").unwrap();
        assert_eq!((c.red(), c.green(), c.blue()), (0x1234, 0x5678, 0x9abc));
        assert_eq!(c.flags(), DO_ALL);
    }

    #[test]
    fn test_parse_rgb_specs() {
        let c = Color::parse_numeric("rgb:f/80/0").unwrap();
        assert_eq!(c.red(), 0xffff);
        assert_eq!(c.green(), 0x8080);
        assert_eq!(c.blue(), 0);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Color::parse_numeric("#12").is_none());
        assert!(Color::parse_numeric("#gggggg").is_none());
        assert!(Color::parse_numeric("rgb:1/2").is_none());
        assert!(Color::parse_numeric("red").is_none());
    }

    #[test]
    fn test_rgb8_scaling() {
        let c = Color::rgb8(0xff, 0x80, 0x00);
        assert_eq!((c.red(), c.green(), c.blue()), (0xffff, 0x8080, 0));
    }
}
