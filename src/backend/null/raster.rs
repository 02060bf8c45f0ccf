//! Pixel operations on pixmap contents
//!
//! Pixmaps keep their pixels in a ZPixmap [`Image`]. Every write goes
//! through the GC's function, plane mask and clip.

use libc::{c_int, c_ulong};

use crate::ffi;
use crate::types::*;
use crate::wrappers::{GcValues, Image};

/// Clip state of a GC beyond the clip origin
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Clip {
    None,
    Rectangles(Vec<Rectangle>),
    Mask(Pixmap),
}

/// Server side of a graphics context
#[derive(Debug, Clone)]
pub(super) struct GcState {
    pub(super) depth: u32,
    pub(super) values: GcValues,
    pub(super) dashes: Vec<u8>,
    pub(super) clip: Clip,
    pub(super) gcontext: GContext,
}

/// Clip resolved for one request, relative to the drawable
pub(super) enum ClipTest {
    All,
    Rectangles { origin: (i32, i32), rects: Vec<Rectangle> },
    Mask { origin: (i32, i32), mask: Image },
}

impl ClipTest {
    fn allows(&self, x: i32, y: i32) -> bool {
        match self {
            ClipTest::All => true,
            ClipTest::Rectangles { origin, rects } => {
                rects.iter().any(|r| r.contains(x - origin.0, y - origin.1))
            }
            ClipTest::Mask { origin, mask } => {
                let (mx, my) = (x - origin.0, y - origin.1);
                mx >= 0 && my >= 0 && mask.get_pixel(mx as u32, my as u32) == Some(1)
            }
        }
    }
}

pub(super) fn apply_function(function: c_int, src: c_ulong, dst: c_ulong) -> c_ulong {
    match function {
        ffi::GXclear => 0,
        ffi::GXand => src & dst,
        ffi::GXandReverse => src & !dst,
        ffi::GXcopy => src,
        ffi::GXandInverted => !src & dst,
        ffi::GXnoop => dst,
        ffi::GXxor => src ^ dst,
        ffi::GXor => src | dst,
        ffi::GXnor => !(src | dst),
        ffi::GXequiv => !src ^ dst,
        ffi::GXinvert => !dst,
        ffi::GXorReverse => src | !dst,
        ffi::GXcopyInverted => !src,
        ffi::GXorInverted => !src | dst,
        ffi::GXnand => !(src & dst),
        ffi::GXset => !0,
        _ => src,
    }
}

pub(super) struct Painter<'a> {
    image: &'a mut Image,
    function: c_int,
    plane_mask: c_ulong,
    clip: ClipTest,
    not_last: bool,
}

impl<'a> Painter<'a> {
    pub(super) fn new(image: &'a mut Image, values: &GcValues, clip: ClipTest) -> Self {
        Painter {
            image,
            function: values.function(),
            plane_mask: values.plane_mask(),
            clip,
            not_last: values.cap_style() == ffi::CapNotLast,
        }
    }

    pub(super) fn plot(&mut self, x: i32, y: i32, pixel: c_ulong) {
        if x < 0 || y < 0 || !self.clip.allows(x, y) {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        let Some(dst) = self.image.get_pixel(x, y) else {
            return;
        };
        let value = apply_function(self.function, pixel, dst);
        self.image
            .put_pixel(x, y, (value & self.plane_mask) | (dst & !self.plane_mask));
    }

    /// Bresenham line from (x0, y0) towards (x1, y1). The end point is
    /// drawn when `last` is set and the cap style is not CapNotLast.
    pub(super) fn line(&mut self, (x0, y0): (i32, i32), (x1, y1): (i32, i32), last: bool, pixel: c_ulong) {
        let (dx, dy) = ((x1 - x0).abs(), -(y1 - y0).abs());
        let (sx, sy) = ((x1 - x0).signum(), (y1 - y0).signum());
        let (mut x, mut y, mut err) = (x0, y0, dx + dy);
        loop {
            if x == x1 && y == y1 {
                if last && !self.not_last {
                    self.plot(x, y, pixel);
                }
                return;
            }
            self.plot(x, y, pixel);
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Connected lines through `points`, each joint drawn once
    pub(super) fn polyline(&mut self, points: &[(i32, i32)], pixel: c_ulong) {
        match points {
            [] => {}
            [only] => self.plot(only.0, only.1, pixel),
            _ => {
                let n = points.len();
                for (i, pair) in points.windows(2).enumerate() {
                    self.line(pair[0], pair[1], i == n - 2, pixel);
                }
            }
        }
    }

    pub(super) fn fill(&mut self, rect: &Rectangle, pixel: c_ulong) {
        let (x0, y0) = (i32::from(rect.x), i32::from(rect.y));
        for y in y0..y0 + i32::from(rect.height) {
            for x in x0..x0 + i32::from(rect.width) {
                self.plot(x, y, pixel);
            }
        }
    }

    /// Outline covering `width + 1` by `height + 1` pixels, each pixel once
    pub(super) fn outline(&mut self, rect: &Rectangle, pixel: c_ulong) {
        let (x0, y0) = (i32::from(rect.x), i32::from(rect.y));
        let (x1, y1) = (x0 + i32::from(rect.width), y0 + i32::from(rect.height));
        for x in x0..=x1 {
            self.plot(x, y0, pixel);
            if y1 != y0 {
                self.plot(x, y1, pixel);
            }
        }
        for y in y0 + 1..y1 {
            self.plot(x0, y, pixel);
            if x1 != x0 {
                self.plot(x1, y, pixel);
            }
        }
    }
}

/// Absolute points of a point list in either coordinate mode
pub(super) fn absolute_points(points: &[Point], mode: CoordMode) -> Vec<(i32, i32)> {
    let mut out = Vec::with_capacity(points.len());
    let mut last = (0, 0);
    for (i, p) in points.iter().enumerate() {
        let (x, y) = (i32::from(p.x), i32::from(p.y));
        last = if mode == CoordMode::Previous && i > 0 {
            (last.0 + x, last.1 + y)
        } else {
            (x, y)
        };
        out.push(last);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrappers::default_gc_values;

    fn canvas() -> Image {
        Image::new(ImageFormat::ZPixmap, 8, 8, 24, 32).unwrap()
    }

    fn count(image: &Image, pixel: c_ulong) -> usize {
        (0..image.height())
            .flat_map(|y| (0..image.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| image.get_pixel(x, y) == Some(pixel))
            .count()
    }

    #[test]
    fn test_functions() {
        assert_eq!(apply_function(ffi::GXxor, 0b1100, 0b1010), 0b0110);
        assert_eq!(apply_function(ffi::GXandInverted, 0b1100, 0b1010), 0b0010);
        assert_eq!(apply_function(ffi::GXnoop, 5, 9), 9);
        assert_eq!(apply_function(ffi::GXset, 0, 0), !0);
    }

    #[test]
    fn test_fill_respects_plane_mask() {
        let mut image = canvas();
        let values = default_gc_values().with_plane_mask(0x00ff00);
        Painter::new(&mut image, &values, ClipTest::All).fill(&Rectangle::new(0, 0, 2, 2), 0xffffff);
        assert_eq!(image.get_pixel(1, 1), Some(0x00ff00));
        assert_eq!(image.get_pixel(2, 2), Some(0));
    }

    #[test]
    fn test_xor_outline_draws_each_pixel_once() {
        let mut image = canvas();
        let values = default_gc_values().with_gc_function(GcFunction::Xor);
        Painter::new(&mut image, &values, ClipTest::All).outline(&Rectangle::new(1, 1, 3, 2), 1);
        // (3 + 1) * 2 along the top and bottom, 1 * 2 on the sides
        assert_eq!(count(&image, 1), 10);
    }

    #[test]
    fn test_line_and_cap_not_last() {
        let mut image = canvas();
        let values = default_gc_values();
        Painter::new(&mut image, &values, ClipTest::All).line((0, 0), (3, 3), true, 7);
        assert_eq!(count(&image, 7), 4);

        let mut image = canvas();
        let values = default_gc_values().with_cap_style(ffi::CapNotLast);
        Painter::new(&mut image, &values, ClipTest::All).line((0, 0), (3, 0), true, 7);
        assert_eq!(image.get_pixel(3, 0), Some(0));
        assert_eq!(image.get_pixel(2, 0), Some(7));
    }

    #[test]
    fn test_clip_rectangles_offset_by_origin() {
        let mut image = canvas();
        let clip = ClipTest::Rectangles {
            origin: (2, 2),
            rects: vec![Rectangle::new(0, 0, 2, 2)],
        };
        Painter::new(&mut image, &default_gc_values(), clip).fill(&Rectangle::new(0, 0, 8, 8), 3);
        assert_eq!(count(&image, 3), 4);
        assert_eq!(image.get_pixel(2, 2), Some(3));
        assert_eq!(image.get_pixel(1, 1), Some(0));
    }

    #[test]
    fn test_relative_points() {
        let points = [Point::new(1, 1), Point::new(2, 0), Point::new(0, 3)];
        assert_eq!(
            absolute_points(&points, CoordMode::Previous),
            vec![(1, 1), (3, 1), (3, 4)]
        );
        assert_eq!(absolute_points(&points, CoordMode::Origin)[2], (0, 3));
    }
}
