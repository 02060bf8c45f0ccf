//! Graphics contexts and drawing into pixmaps
//!
//! Every drawing request is validated against the drawable and GC the way
//! the server checks it. Only pixmap contents are stored; requests on a
//! window are checked and then dropped.

use libc::{c_int, c_ulong};

use super::raster::{absolute_points, Clip, ClipTest, GcState, Painter};
use super::{Checked, NullBackend, DEFAULT_FONT, DEPTHS};
use crate::error::ErrorCode;
use crate::event::*;
use crate::ffi;
use crate::types::*;
use crate::wrappers::{default_gc_values, GcValues, Image};

/// Every GC component bit
pub(super) const ALL_GC_BITS: c_ulong = (1 << (ffi::GCLastBit + 1)) - 1;

/// Bits per pixel of the ZPixmap format for a depth
pub(super) fn bits_per_pixel(depth: u32) -> u32 {
    match depth {
        1 => 1,
        2..=8 => 8,
        9..=16 => 16,
        _ => 32,
    }
}

pub(super) fn new_pixmap_image(width: u32, height: u32, depth: u32) -> Option<Image> {
    Image::new(ImageFormat::ZPixmap, width, height, depth, bits_per_pixel(depth))
        .ok()
        .map(|image| image.with_byte_order(ByteOrder::LSBFirst))
}

/// A new GC for drawables of `depth`
pub(super) fn initial_gc(depth: u32, gcontext: GContext) -> GcState {
    let values = GcValues::from_raw(ALL_GC_BITS, *default_gc_values().as_raw()).with_font(DEFAULT_FONT);
    GcState {
        depth,
        values,
        dashes: vec![values.dashes()],
        clip: Clip::None,
        gcontext,
    }
}

/// Store the components set in `values`. Callers validate first.
pub(super) fn apply_gc_values(state: &mut GcState, values: &GcValues) {
    state.values.merge(values);
    if values.is_set(ffi::GCClipMask) {
        let mask = values.clip_mask();
        state.clip = if mask.is_none() {
            Clip::None
        } else {
            Clip::Mask(mask)
        };
    }
    if values.is_set(ffi::GCDashList) {
        state.dashes = vec![values.dashes()];
    }
}

/// Point inside a polygon under the given fill rule
fn inside_polygon(points: &[(i32, i32)], x: f64, y: f64, rule: c_int) -> bool {
    let mut crossings = 0;
    let mut winding = 0;
    let n = points.len();
    for i in 0..n {
        let (x0, y0) = (f64::from(points[i].0), f64::from(points[i].1));
        let (x1, y1) = (f64::from(points[(i + 1) % n].0), f64::from(points[(i + 1) % n].1));
        if (y0 <= y) == (y1 <= y) {
            continue;
        }
        let cross_x = x0 + (y - y0) * (x1 - x0) / (y1 - y0);
        if cross_x > x {
            crossings += 1;
            winding += if y1 > y0 { 1 } else { -1 };
        }
    }
    if rule == ffi::WindingRule {
        winding != 0
    } else {
        crossings % 2 == 1
    }
}

/// Angle of a point around an arc's centre, in 1/64 degrees counter-clockwise
/// from three o'clock, normalised to [0, 360 * 64)
fn arc_angle(dx: f64, dy: f64) -> f64 {
    let degrees = (-dy).atan2(dx).to_degrees();
    (degrees.rem_euclid(360.0)) * 64.0
}

fn within_arc(arc: &ArcSegment, angle: f64) -> bool {
    let extent = f64::from(arc.angle2);
    if extent.abs() >= 360.0 * 64.0 {
        return true;
    }
    let start = f64::from(arc.angle1).rem_euclid(360.0 * 64.0);
    let (from, span) = if extent >= 0.0 {
        (start, extent)
    } else {
        ((start + extent).rem_euclid(360.0 * 64.0), -extent)
    };
    (angle - from).rem_euclid(360.0 * 64.0) <= span
}

/// Pixels on the outline of an arc
fn arc_outline(arc: &ArcSegment) -> Vec<(i32, i32)> {
    let (rx, ry) = (f64::from(arc.width) / 2.0, f64::from(arc.height) / 2.0);
    let (cx, cy) = (f64::from(arc.x) + rx, f64::from(arc.y) + ry);
    let steps = ((rx + ry) * 8.0).max(8.0) as usize;
    let start = f64::from(arc.angle1) / 64.0;
    let extent = f64::from(arc.angle2).clamp(-360.0 * 64.0, 360.0 * 64.0) / 64.0;
    let mut out: Vec<(i32, i32)> = Vec::new();
    for i in 0..=steps {
        let theta = (start + extent * i as f64 / steps as f64).to_radians();
        let point = (
            (cx + rx * theta.cos()).round() as i32,
            (cy - ry * theta.sin()).round() as i32,
        );
        if !out.contains(&point) {
            out.push(point);
        }
    }
    out
}

impl NullBackend {
    /// Depth of a drawable. InputOnly windows cannot be drawn to.
    pub(super) fn drawable_depth(&self, drawable: Drawable) -> Checked<u32> {
        if let Some(image) = self.pixmaps.get(&Pixmap(drawable.0)) {
            return Ok(image.depth());
        }
        match self.windows.get(&Window(drawable.0)) {
            Some(state) if state.class == WindowClass::InputOnly => Err((ErrorCode::Match, drawable.0)),
            Some(state) => Ok(state.depth),
            None => Err((ErrorCode::Drawable, drawable.0)),
        }
    }

    pub(super) fn gc_ref(&self, gc: Gc) -> Checked<&GcState> {
        self.gcs
            .get(&gc.handle())
            .ok_or((ErrorCode::GContext, gc.handle() as ffi::XID))
    }

    pub(super) fn gc_mut(&mut self, gc: Gc) -> Checked<&mut GcState> {
        self.gcs
            .get_mut(&gc.handle())
            .ok_or((ErrorCode::GContext, gc.handle() as ffi::XID))
    }

    pub(super) fn font_exists(&self, font: Font) -> bool {
        font == DEFAULT_FONT || self.fonts.contains_key(&font)
    }

    /// Check the resources and enumerations named by a GC value list
    pub(super) fn check_gc_values(&self, depth: u32, values: &GcValues) -> Checked<()> {
        if values.is_set(ffi::GCFunction) && !(ffi::GXclear..=ffi::GXset).contains(&values.function()) {
            return Err((ErrorCode::Value, values.function() as ffi::XID));
        }
        if values.is_set(ffi::GCLineStyle) && LineStyle::from_raw(values.line_style()).is_none() {
            return Err((ErrorCode::Value, values.line_style() as ffi::XID));
        }
        if values.is_set(ffi::GCFillStyle) && FillStyle::from_raw(values.fill_style()).is_none() {
            return Err((ErrorCode::Value, values.fill_style() as ffi::XID));
        }
        for (bit, pixmap, needed) in [
            (ffi::GCTile, values.tile(), depth),
            (ffi::GCStipple, values.stipple(), 1),
            (ffi::GCClipMask, values.clip_mask(), 1),
        ] {
            if !values.is_set(bit) || (bit == ffi::GCClipMask && pixmap.is_none()) {
                continue;
            }
            match self.pixmaps.get(&pixmap) {
                None => return Err((ErrorCode::Pixmap, pixmap.0)),
                Some(image) if image.depth() != needed => return Err((ErrorCode::Match, pixmap.0)),
                Some(_) => {}
            }
        }
        if values.is_set(ffi::GCFont) && !self.font_exists(values.font()) {
            return Err((ErrorCode::Font, values.font().0));
        }
        if values.is_set(ffi::GCDashList) && values.dashes() == 0 {
            return Err((ErrorCode::Value, 0));
        }
        Ok(())
    }

    fn clip_test(&self, state: &GcState) -> ClipTest {
        let origin = (state.values.clip_x_origin(), state.values.clip_y_origin());
        match &state.clip {
            Clip::None => ClipTest::All,
            Clip::Rectangles(rects) => ClipTest::Rectangles {
                origin,
                rects: rects.clone(),
            },
            Clip::Mask(mask) => match self.pixmaps.get(mask) {
                Some(image) => ClipTest::Mask {
                    origin,
                    mask: image.clone(),
                },
                None => ClipTest::All,
            },
        }
    }

    /// Validate a drawing request and run `paint` on the pixmap contents.
    /// The GC must have been created for the drawable's depth.
    pub(super) fn draw(
        &mut self,
        drawable: Drawable,
        gc: Gc,
        paint: impl FnOnce(&mut Image, &GcValues, ClipTest),
    ) -> Checked<()> {
        let depth = self.drawable_depth(drawable)?;
        let state = self.gc_ref(gc)?;
        if state.depth != depth {
            return Err((ErrorCode::Match, state.gcontext.0));
        }
        let values = state.values;
        let clip = self.clip_test(state);
        if let Some(image) = self.pixmaps.get_mut(&Pixmap(drawable.0)) {
            paint(image, &values, clip);
        }
        Ok(())
    }

    pub(super) fn poly_point(&mut self, drawable: Drawable, gc: Gc, points: &[Point], mode: CoordMode) -> Checked<()> {
        let points = absolute_points(points, mode);
        self.draw(drawable, gc, |image, values, clip| {
            let mut painter = Painter::new(image, values, clip);
            for (x, y) in points {
                painter.plot(x, y, values.foreground());
            }
        })
    }

    pub(super) fn poly_line(&mut self, drawable: Drawable, gc: Gc, points: &[Point], mode: CoordMode) -> Checked<()> {
        let points = absolute_points(points, mode);
        self.draw(drawable, gc, |image, values, clip| {
            Painter::new(image, values, clip).polyline(&points, values.foreground());
        })
    }

    pub(super) fn poly_segment(&mut self, drawable: Drawable, gc: Gc, segments: &[Segment]) -> Checked<()> {
        self.draw(drawable, gc, |image, values, clip| {
            let mut painter = Painter::new(image, values, clip);
            for s in segments {
                let from = (i32::from(s.x1), i32::from(s.y1));
                let to = (i32::from(s.x2), i32::from(s.y2));
                painter.line(from, to, true, values.foreground());
            }
        })
    }

    pub(super) fn poly_rectangle(&mut self, drawable: Drawable, gc: Gc, rects: &[Rectangle], fill: bool) -> Checked<()> {
        self.draw(drawable, gc, |image, values, clip| {
            let mut painter = Painter::new(image, values, clip);
            for rect in rects {
                if fill {
                    painter.fill(rect, values.foreground());
                } else {
                    painter.outline(rect, values.foreground());
                }
            }
        })
    }

    pub(super) fn poly_arc(&mut self, drawable: Drawable, gc: Gc, arcs: &[ArcSegment], fill: bool) -> Checked<()> {
        self.draw(drawable, gc, |image, values, clip| {
            let mut painter = Painter::new(image, values, clip);
            for arc in arcs {
                if !fill {
                    for (x, y) in arc_outline(arc) {
                        painter.plot(x, y, values.foreground());
                    }
                    continue;
                }
                let (rx, ry) = (f64::from(arc.width) / 2.0, f64::from(arc.height) / 2.0);
                let (cx, cy) = (f64::from(arc.x) + rx, f64::from(arc.y) + ry);
                if rx <= 0.0 || ry <= 0.0 {
                    continue;
                }
                for y in i32::from(arc.y)..i32::from(arc.y) + i32::from(arc.height) {
                    for x in i32::from(arc.x)..i32::from(arc.x) + i32::from(arc.width) {
                        let (dx, dy) = (f64::from(x) + 0.5 - cx, f64::from(y) + 0.5 - cy);
                        let inside = (dx / rx).powi(2) + (dy / ry).powi(2) <= 1.0;
                        if inside && within_arc(arc, arc_angle(dx, dy)) {
                            painter.plot(x, y, values.foreground());
                        }
                    }
                }
            }
        })
    }

    pub(super) fn fill_poly(&mut self, drawable: Drawable, gc: Gc, points: &[Point], mode: CoordMode) -> Checked<()> {
        let points = absolute_points(points, mode);
        self.draw(drawable, gc, |image, values, clip| {
            if points.len() < 3 {
                return;
            }
            let min_y = points.iter().map(|p| p.1).min().unwrap_or(0);
            let max_y = points.iter().map(|p| p.1).max().unwrap_or(0);
            let min_x = points.iter().map(|p| p.0).min().unwrap_or(0);
            let max_x = points.iter().map(|p| p.0).max().unwrap_or(0);
            let rule = values.fill_rule();
            let mut painter = Painter::new(image, values, clip);
            for y in min_y..max_y {
                for x in min_x..max_x {
                    if inside_polygon(&points, f64::from(x) + 0.5, f64::from(y) + 0.5, rule) {
                        painter.plot(x, y, values.foreground());
                    }
                }
            }
        })
    }

    /// Fill the background box behind `width` pixels of text whose origin
    /// is (x, y). The GC function is ignored and the plane mask honoured.
    pub(super) fn image_text(
        &mut self,
        drawable: Drawable,
        gc: Gc,
        (x, y): (i32, i32),
        width: i32,
        (ascent, descent): (i32, i32),
    ) -> Checked<()> {
        self.draw(drawable, gc, |image, values, clip| {
            let copy = values.with_function(ffi::GXcopy);
            let rect = Rectangle::new(x as i16, (y - ascent) as i16, width as u16, (ascent + descent) as u16);
            Painter::new(image, &copy, clip).fill(&rect, values.background());
        })
    }

    /// The font a GC draws text with
    pub(super) fn gc_font(&self, gc: Gc) -> Checked<Font> {
        let font = self.gc_ref(gc)?.values.font();
        if self.font_exists(font) {
            Ok(font)
        } else {
            Err((ErrorCode::Font, font.0))
        }
    }

    /// Pixel of a drawable, `None` outside it. Windows read back as their
    /// background pixel since window contents are not kept.
    fn source_pixel(&self, drawable: Drawable, x: i32, y: i32) -> Option<c_ulong> {
        if x < 0 || y < 0 {
            return None;
        }
        if let Some(image) = self.pixmaps.get(&Pixmap(drawable.0)) {
            return image.get_pixel(x as u32, y as u32);
        }
        let state = self.windows.get(&Window(drawable.0))?;
        if x as u32 >= state.width || y as u32 >= state.height || !self.viewable(Window(drawable.0)) {
            return None;
        }
        Some(if state.attributes.is_set(ffi::CWBackPixel) {
            state.attributes.background_pixel()
        } else {
            0
        })
    }

    /// Shared part of CopyArea and CopyPlane. `convert` maps a source
    /// pixel to the pixel written; the graphics exposure for source areas
    /// that could not be read is queued with `opcode`.
    #[allow(clippy::too_many_arguments)]
    pub(super) fn copy_pixels(
        &mut self,
        src: Drawable,
        dst: Drawable,
        gc: Gc,
        (src_x, src_y): (i32, i32),
        (width, height): (u32, u32),
        (dst_x, dst_y): (i32, i32),
        opcode: u8,
        convert: impl Fn(c_ulong, &GcValues) -> c_ulong,
    ) -> Checked<()> {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        let mut complete = true;
        for dy in 0..height as i32 {
            for dx in 0..width as i32 {
                let pixel = self.source_pixel(src, src_x + dx, src_y + dy);
                complete &= pixel.is_some();
                pixels.push(pixel);
            }
        }

        let exposures = self.gc_ref(gc)?.values.graphics_exposures();
        self.draw(dst, gc, |image, values, clip| {
            let mut painter = Painter::new(image, values, clip);
            for (i, pixel) in pixels.iter().enumerate() {
                if let Some(pixel) = pixel {
                    let (dx, dy) = ((i % width as usize) as i32, (i / width as usize) as i32);
                    painter.plot(dst_x + dx, dst_y + dy, convert(*pixel, values));
                }
            }
        })?;

        if exposures {
            let event = if complete {
                let mut none = NoExposeEvent::default();
                none.set_drawable(dst);
                none.set_major_code(i32::from(opcode));
                Event::NoExpose(none)
            } else {
                let mut expose = GraphicsExposeEvent::default();
                expose.set_drawable(dst);
                expose.set_x(dst_x);
                expose.set_y(dst_y);
                expose.set_width(width as i32);
                expose.set_height(height as i32);
                expose.set_major_code(i32::from(opcode));
                Event::GraphicsExpose(expose)
            };
            self.enqueue(event);
        }
        Ok(())
    }

    /// Read a rectangle of a drawable into an image in the server's layout
    #[allow(clippy::too_many_arguments)]
    pub(super) fn read_image(
        &self,
        drawable: Drawable,
        (x, y): (i32, i32),
        (width, height): (u32, u32),
        plane_mask: c_ulong,
        format: ImageFormat,
    ) -> Checked<Image> {
        let depth = self.drawable_depth(drawable)?;
        if format == ImageFormat::XYBitmap {
            return Err((ErrorCode::Value, format.to_raw() as ffi::XID));
        }
        let (dw, dh) = match self.pixmaps.get(&Pixmap(drawable.0)) {
            Some(image) => (image.width(), image.height()),
            None => {
                let window = Window(drawable.0);
                let state = self.window_ref(window)?;
                if !self.viewable(window) {
                    return Err((ErrorCode::Match, drawable.0));
                }
                (state.width, state.height)
            }
        };
        let inside = x >= 0
            && y >= 0
            && width > 0
            && height > 0
            && x as u64 + u64::from(width) <= u64::from(dw)
            && y as u64 + u64::from(height) <= u64::from(dh);
        if !inside {
            return Err((ErrorCode::Match, drawable.0));
        }

        let bpp = match format {
            ImageFormat::ZPixmap => bits_per_pixel(depth),
            _ => 1,
        };
        let mut image = Image::new(format, width, height, depth, bpp)
            .map_err(|_| (ErrorCode::Match, drawable.0))?
            .with_byte_order(ByteOrder::LSBFirst);
        if depth == DEPTHS[0] {
            image = image.with_masks(0xff0000, 0x00ff00, 0x0000ff);
        }
        for dy in 0..height {
            for dx in 0..width {
                let pixel = self
                    .source_pixel(drawable, x + dx as i32, y + dy as i32)
                    .unwrap_or(0);
                image.put_pixel(dx, dy, pixel & plane_mask);
            }
        }
        Ok(image)
    }

    /// Copy a rectangle of `image` into a drawable through the GC
    #[allow(clippy::too_many_arguments)]
    pub(super) fn write_image(
        &mut self,
        drawable: Drawable,
        gc: Gc,
        image: &Image,
        (src_x, src_y): (i32, i32),
        (dst_x, dst_y): (i32, i32),
        (width, height): (u32, u32),
    ) -> Checked<()> {
        let depth = self.drawable_depth(drawable)?;
        let bitmap = image.format() == ImageFormat::XYBitmap;
        if (bitmap && image.depth() != 1) || (!bitmap && image.depth() != depth) {
            return Err((ErrorCode::Match, drawable.0));
        }
        self.draw(drawable, gc, |target, values, clip| {
            let mut painter = Painter::new(target, values, clip);
            for dy in 0..height as i32 {
                for dx in 0..width as i32 {
                    let (sx, sy) = (src_x + dx, src_y + dy);
                    if sx < 0 || sy < 0 {
                        continue;
                    }
                    let Some(pixel) = image.get_pixel(sx as u32, sy as u32) else {
                        continue;
                    };
                    let pixel = match (bitmap, pixel) {
                        (true, 0) => values.background(),
                        (true, _) => values.foreground(),
                        (false, p) => p,
                    };
                    painter.plot(dst_x + dx, dst_y + dy, pixel);
                }
            }
        })
    }

    pub(super) fn check_depth(&self, depth: u32) -> Checked<()> {
        if DEPTHS.contains(&depth) {
            Ok(())
        } else {
            Err((ErrorCode::Value, ffi::XID::from(depth)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_per_pixel() {
        assert_eq!(bits_per_pixel(1), 1);
        assert_eq!(bits_per_pixel(4), 8);
        assert_eq!(bits_per_pixel(15), 16);
        assert_eq!(bits_per_pixel(24), 32);
    }

    #[test]
    fn test_polygon_fill_rules() {
        // A square traced twice counts as winding 2 but two crossings
        let square = [(0, 0), (4, 0), (4, 4), (0, 4), (0, 0), (4, 0), (4, 4), (0, 4)];
        assert!(inside_polygon(&square, 2.0, 2.0, ffi::WindingRule));
        assert!(!inside_polygon(&square, 2.0, 2.0, ffi::EvenOddRule));
        assert!(!inside_polygon(&square[..4], 5.0, 2.0, ffi::EvenOddRule));
    }

    #[test]
    fn test_arc_angles() {
        let quarter = ArcSegment {
            x: 0,
            y: 0,
            width: 10,
            height: 10,
            angle1: 0,
            angle2: 90 * 64,
        };
        // Up and to the right of the centre
        assert!(within_arc(&quarter, arc_angle(1.0, -1.0)));
        assert!(!within_arc(&quarter, arc_angle(-1.0, 1.0)));
        assert!(within_arc(&ArcSegment::ellipse(0, 0, 4, 4), arc_angle(-1.0, 1.0)));
    }

    #[test]
    fn test_arc_outline_stays_on_ellipse() {
        let points = arc_outline(&ArcSegment::ellipse(0, 0, 10, 6));
        assert!(points.contains(&(10, 3)));
        assert!(points.contains(&(5, 0)));
        assert!(points.iter().all(|&(x, y)| (0..=10).contains(&x) && (0..=6).contains(&y)));
    }

    #[test]
    fn test_initial_gc_has_every_component() {
        let state = initial_gc(24, GContext::new(5));
        assert_eq!(state.values.mask(), ALL_GC_BITS);
        assert_eq!(state.values.font(), DEFAULT_FONT);
        assert_eq!(state.dashes, vec![4]);
        assert_eq!(state.clip, Clip::None);
    }
}
