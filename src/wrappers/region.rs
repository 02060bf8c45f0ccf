//! Client-side regions

use std::sync::Arc;

use libc::c_int;

use crate::error::{Error, Result};
use crate::ffi;
use crate::types::{FillRule, Point, Rectangle};

/// Where a rectangle lies relative to a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectPosition {
    Out,
    In,
    Part,
}

/// An Xlib region, destroyed on drop.
///
/// Region operations run entirely in the client; they need the library but
/// no display connection.
pub struct Region {
    xlib: Arc<ffi::Xlib>,
    raw: ffi::Region,
}

// SAFETY: the region is heap data owned by this value and the Xlib region
// functions keep no global state
unsafe impl Send for Region {}

impl Region {
    pub(crate) fn new(xlib: Arc<ffi::Xlib>) -> Result<Self> {
        // SAFETY: XCreateRegion takes no arguments
        let raw = unsafe { (xlib.XCreateRegion)() };
        Self::wrap(xlib, raw, "XCreateRegion")
    }

    pub(crate) fn polygon(xlib: Arc<ffi::Xlib>, points: &[Point], rule: FillRule) -> Result<Self> {
        let mut points = points.to_vec();
        // SAFETY: Point is layout-compatible with XPoint
        let raw = unsafe {
            (xlib.XPolygonRegion)(
                points.as_mut_ptr() as *mut ffi::XPoint,
                points.len() as c_int,
                rule.to_raw(),
            )
        };
        Self::wrap(xlib, raw, "XPolygonRegion")
    }

    fn wrap(xlib: Arc<ffi::Xlib>, raw: ffi::Region, request: &'static str) -> Result<Self> {
        if raw.is_null() {
            return Err(Error::NullReturn(request));
        }
        Ok(Region { xlib, raw })
    }

    pub fn as_raw(&self) -> ffi::Region {
        self.raw
    }

    fn combine(
        &self,
        other: &Region,
        op: unsafe extern "C" fn(ffi::Region, ffi::Region, ffi::Region) -> c_int,
    ) -> Result<Region> {
        let result = Region::new(self.xlib.clone())?;
        // SAFETY: all three regions are live
        unsafe {
            op(self.raw, other.raw, result.raw);
        }
        Ok(result)
    }

    pub fn union(&self, other: &Region) -> Result<Region> {
        self.combine(other, self.xlib.XUnionRegion)
    }

    pub fn intersect(&self, other: &Region) -> Result<Region> {
        self.combine(other, self.xlib.XIntersectRegion)
    }

    /// Parts of this region not in `other`
    pub fn subtract(&self, other: &Region) -> Result<Region> {
        self.combine(other, self.xlib.XSubtractRegion)
    }

    pub fn xor(&self, other: &Region) -> Result<Region> {
        self.combine(other, self.xlib.XXorRegion)
    }

    /// Add a rectangle to this region in place
    pub fn union_rect(&mut self, rect: Rectangle) {
        let mut raw = ffi::XRectangle {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        };
        // SAFETY: source and destination may be the same region
        unsafe {
            (self.xlib.XUnionRectWithRegion)(&mut raw, self.raw, self.raw);
        }
    }

    pub fn offset(&mut self, dx: i32, dy: i32) {
        // SAFETY: region is live
        unsafe {
            (self.xlib.XOffsetRegion)(self.raw, dx, dy);
        }
    }

    /// Shrink by `dx`, `dy` on each side; negative values grow the region
    pub fn shrink(&mut self, dx: i32, dy: i32) {
        // SAFETY: region is live
        unsafe {
            (self.xlib.XShrinkRegion)(self.raw, dx, dy);
        }
    }

    pub fn is_empty(&self) -> bool {
        // SAFETY: region is live
        unsafe { (self.xlib.XEmptyRegion)(self.raw) != ffi::False }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        // SAFETY: region is live
        unsafe { (self.xlib.XPointInRegion)(self.raw, x, y) != ffi::False }
    }

    pub fn rect_position(&self, rect: Rectangle) -> RectPosition {
        // SAFETY: region is live
        let result = unsafe {
            (self.xlib.XRectInRegion)(
                self.raw,
                c_int::from(rect.x),
                c_int::from(rect.y),
                u32::from(rect.width),
                u32::from(rect.height),
            )
        };
        match result {
            ffi::RectangleIn => RectPosition::In,
            ffi::RectanglePart => RectPosition::Part,
            _ => RectPosition::Out,
        }
    }

    /// Smallest rectangle enclosing the region
    pub fn clip_box(&self) -> Rectangle {
        let mut raw = ffi::XRectangle::default();
        // SAFETY: region is live and raw is writable
        unsafe {
            (self.xlib.XClipBox)(self.raw, &mut raw);
        }
        Rectangle::new(raw.x, raw.y, raw.width, raw.height)
    }
}

impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        // SAFETY: both regions are live
        unsafe { (self.xlib.XEqualRegion)(self.raw, other.raw) != ffi::False }
    }
}

impl std::fmt::Debug for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Region")
            .field("clip_box", &self.clip_box())
            .finish()
    }
}

impl Drop for Region {
    fn drop(&mut self) {
        // SAFETY: raw came from XCreateRegion or XPolygonRegion and is only
        // destroyed here
        unsafe {
            (self.xlib.XDestroyRegion)(self.raw);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xlib() -> Option<Arc<ffi::Xlib>> {
        ffi::xlib_for_tests().map(Arc::new)
    }

    #[test]
    fn test_region_set_operations() {
        let Some(xlib) = xlib() else {
            return;
        };
        let mut a = Region::new(xlib.clone()).unwrap();
        assert!(a.is_empty());
        a.union_rect(Rectangle::new(0, 0, 10, 10));
        let mut b = Region::new(xlib).unwrap();
        b.union_rect(Rectangle::new(5, 5, 10, 10));

        let both = a.intersect(&b).unwrap();
        assert_eq!(both.clip_box(), Rectangle::new(5, 5, 5, 5));
        assert!(both.contains(7, 7));
        assert!(!both.contains(2, 2));

        let all = a.union(&b).unwrap();
        assert_eq!(all.clip_box(), Rectangle::new(0, 0, 15, 15));
        assert_eq!(all.rect_position(Rectangle::new(1, 1, 2, 2)), RectPosition::In);
        assert_eq!(all.rect_position(Rectangle::new(12, 0, 2, 2)), RectPosition::Out);
        assert_eq!(all.rect_position(Rectangle::new(8, 8, 10, 10)), RectPosition::Part);

        let rest = a.subtract(&a).unwrap();
        assert!(rest.is_empty());
    }

    #[test]
    fn test_polygon_region() {
        let Some(xlib) = xlib() else {
            return;
        };
        let square = [
            Point::new(0, 0),
            Point::new(20, 0),
            Point::new(20, 20),
            Point::new(0, 20),
        ];
        let mut region = Region::polygon(xlib, &square, FillRule::EvenOdd).unwrap();
        assert!(region.contains(10, 10));
        region.offset(100, 0);
        assert!(region.contains(110, 10));
        assert!(!region.contains(10, 10));
    }
}
