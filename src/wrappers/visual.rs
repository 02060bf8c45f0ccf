//! Visuals and pixmap formats

use libc::{c_int, c_long, c_ulong};

use crate::ffi;
use crate::field::{accessors, raw_wrapper};
use crate::types::*;

/// A visual as reported by XGetVisualInfo or XMatchVisualInfo.
///
/// The `Visual` pointer of the C struct is not kept; visuals are referred to
/// by id and resolved again by the backend when needed.
#[derive(Clone, Copy, Default)]
pub struct VisualInfo {
    raw: ffi::XVisualInfo,
}

// SAFETY: the only pointer field is cleared on construction
unsafe impl Send for VisualInfo {}
unsafe impl Sync for VisualInfo {}

impl VisualInfo {
    pub fn from_raw(mut raw: ffi::XVisualInfo) -> Self {
        raw.visual = std::ptr::null_mut();
        VisualInfo { raw }
    }

    pub fn as_raw(&self) -> &ffi::XVisualInfo {
        &self.raw
    }

    pub fn visual_id(&self) -> VisualId {
        VisualId(self.raw.visualid)
    }

    pub fn class(&self) -> Option<VisualClass> {
        VisualClass::from_raw(self.raw.c_class)
    }

    pub fn set_class(&mut self, class: VisualClass) {
        self.raw.c_class = class.to_raw();
    }
}

accessors!(VisualInfo {
    visualid, set_visualid: VisualId;
    screen, set_screen: i32;
    depth, set_depth: i32;
    red_mask, set_red_mask: c_ulong;
    green_mask, set_green_mask: c_ulong;
    blue_mask, set_blue_mask: c_ulong;
    colormap_size, set_colormap_size: i32;
    bits_per_rgb, set_bits_per_rgb: i32;
});

/// Template and mask for XGetVisualInfo. Only fields that were set take part
/// in the match.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisualTemplate {
    mask: c_long,
    info: VisualInfo,
}

impl VisualTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visual_id(mut self, id: VisualId) -> Self {
        self.info.set_visualid(id);
        self.mask |= ffi::VisualIDMask;
        self
    }

    pub fn screen(mut self, screen: i32) -> Self {
        self.info.set_screen(screen);
        self.mask |= ffi::VisualScreenMask;
        self
    }

    pub fn depth(mut self, depth: i32) -> Self {
        self.info.set_depth(depth);
        self.mask |= ffi::VisualDepthMask;
        self
    }

    pub fn class(mut self, class: VisualClass) -> Self {
        self.info.set_class(class);
        self.mask |= ffi::VisualClassMask;
        self
    }

    pub fn colormap_size(mut self, size: i32) -> Self {
        self.info.set_colormap_size(size);
        self.mask |= ffi::VisualColormapSizeMask;
        self
    }

    pub fn bits_per_rgb(mut self, bits: i32) -> Self {
        self.info.set_bits_per_rgb(bits);
        self.mask |= ffi::VisualBitsPerRGBMask;
        self
    }

    pub fn mask(&self) -> c_long {
        self.mask
    }

    pub fn template(&self) -> &VisualInfo {
        &self.info
    }

    /// Whether `info` satisfies every field selected by the mask
    pub fn matches(&self, info: &VisualInfo) -> bool {
        let t = &self.info;
        let check = |bit: c_long, same: bool| self.mask & bit == 0 || same;

        check(ffi::VisualIDMask, t.visualid() == info.visualid())
            && check(ffi::VisualScreenMask, t.screen() == info.screen())
            && check(ffi::VisualDepthMask, t.depth() == info.depth())
            && check(ffi::VisualClassMask, t.as_raw().c_class == info.as_raw().c_class)
            && check(ffi::VisualRedMaskMask, t.red_mask() == info.red_mask())
            && check(ffi::VisualGreenMaskMask, t.green_mask() == info.green_mask())
            && check(ffi::VisualBlueMaskMask, t.blue_mask() == info.blue_mask())
            && check(ffi::VisualColormapSizeMask, t.colormap_size() == info.colormap_size())
            && check(ffi::VisualBitsPerRGBMask, t.bits_per_rgb() == info.bits_per_rgb())
    }
}

raw_wrapper! {
    /// Depth, bits per pixel and scanline padding of one pixmap format
    pub struct PixmapFormat(ffi::XPixmapFormatValues) {
        depth, set_depth: c_int;
        bits_per_pixel, set_bits_per_pixel: c_int;
        scanline_pad, set_scanline_pad: c_int;
    }
}

impl PixmapFormat {
    pub fn new(depth: i32, bits_per_pixel: i32, scanline_pad: i32) -> Self {
        PixmapFormat::from_raw(ffi::XPixmapFormatValues {
            depth,
            bits_per_pixel,
            scanline_pad,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn true_color(id: u64, depth: i32) -> VisualInfo {
        let mut info = VisualInfo::default();
        info.set_visualid(VisualId::new(id as ffi::VisualID));
        info.set_depth(depth);
        info.set_class(VisualClass::TrueColor);
        info.set_red_mask(0xff0000);
        info
    }

    #[test]
    fn test_template_matches_only_masked_fields() {
        let info = true_color(0x21, 24);

        assert!(VisualTemplate::new().matches(&info));
        assert!(VisualTemplate::new().depth(24).matches(&info));
        assert!(!VisualTemplate::new().depth(32).matches(&info));
        assert!(VisualTemplate::new()
            .class(VisualClass::TrueColor)
            .visual_id(VisualId::new(0x21))
            .matches(&info));
        assert!(!VisualTemplate::new().class(VisualClass::PseudoColor).matches(&info));
    }

    #[test]
    fn test_template_mask_bits() {
        let template = VisualTemplate::new().screen(0).depth(24);
        assert_eq!(template.mask(), ffi::VisualScreenMask | ffi::VisualDepthMask);
    }

    #[test]
    fn test_visual_pointer_is_dropped() {
        let mut raw = ffi::XVisualInfo::default();
        raw.visual = 0x1000 as *mut ffi::Visual;
        raw.visualid = 0x22;
        let info = VisualInfo::from_raw(raw);
        assert!(info.as_raw().visual.is_null());
        assert_eq!(info.visual_id(), VisualId::new(0x22));
    }
}
