//! Graphics context values

use libc::{c_int, c_ulong};

use crate::ffi;
use crate::field::masked_accessors;
use crate::types::*;

/// The value list of XCreateGC and XChangeGC. Setting a field sets its
/// `GC*` bit in the value mask.
#[derive(Clone, Copy, Default)]
pub struct GcValues {
    mask: c_ulong,
    raw: ffi::XGCValues,
}

impl GcValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap values returned by XGetGCValues for the fields in `mask`
    pub fn from_raw(mask: c_ulong, raw: ffi::XGCValues) -> Self {
        GcValues { mask, raw }
    }

    pub fn as_raw(&self) -> &ffi::XGCValues {
        &self.raw
    }

    pub fn function_kind(&self) -> Option<GcFunction> {
        GcFunction::from_raw(self.raw.function)
    }

    pub fn with_gc_function(self, function: GcFunction) -> Self {
        self.with_function(function.to_raw())
    }

    pub fn with_line_style_kind(self, style: LineStyle) -> Self {
        self.with_line_style(style.to_raw())
    }

    pub fn with_fill_style_kind(self, style: FillStyle) -> Self {
        self.with_fill_style(style.to_raw())
    }

    /// A single dash length, used for both on and off segments
    pub fn with_dash(mut self, length: u8) -> Self {
        self.raw.dashes = length as libc::c_char;
        self.mask |= ffi::GCDashList;
        self
    }

    pub fn dashes(&self) -> u8 {
        self.raw.dashes as u8
    }

    /// Merge the fields set in `other` into these values
    pub fn merge(&mut self, other: &GcValues) {
        macro_rules! take {
            ($($bit:ident => $field:ident),* $(,)?) => {
                $(if other.mask & ffi::$bit != 0 {
                    self.raw.$field = other.raw.$field;
                })*
            };
        }
        take!(
            GCFunction => function,
            GCPlaneMask => plane_mask,
            GCForeground => foreground,
            GCBackground => background,
            GCLineWidth => line_width,
            GCLineStyle => line_style,
            GCCapStyle => cap_style,
            GCJoinStyle => join_style,
            GCFillStyle => fill_style,
            GCFillRule => fill_rule,
            GCTile => tile,
            GCStipple => stipple,
            GCTileStipXOrigin => ts_x_origin,
            GCTileStipYOrigin => ts_y_origin,
            GCFont => font,
            GCSubwindowMode => subwindow_mode,
            GCGraphicsExposures => graphics_exposures,
            GCClipXOrigin => clip_x_origin,
            GCClipYOrigin => clip_y_origin,
            GCClipMask => clip_mask,
            GCDashOffset => dash_offset,
            GCDashList => dashes,
            GCArcMode => arc_mode,
        );
        self.mask |= other.mask;
    }

    /// Keep only the fields selected by `mask`
    pub fn restricted(mut self, mask: c_ulong) -> Self {
        self.mask &= mask;
        self
    }
}

masked_accessors!(GcValues, mask: c_ulong = mask {
    function, set_function, with_function: c_int = ffi::GCFunction;
    plane_mask, set_plane_mask, with_plane_mask: c_ulong = ffi::GCPlaneMask;
    foreground, set_foreground, with_foreground: c_ulong = ffi::GCForeground;
    background, set_background, with_background: c_ulong = ffi::GCBackground;
    line_width, set_line_width, with_line_width: c_int = ffi::GCLineWidth;
    line_style, set_line_style, with_line_style: c_int = ffi::GCLineStyle;
    cap_style, set_cap_style, with_cap_style: c_int = ffi::GCCapStyle;
    join_style, set_join_style, with_join_style: c_int = ffi::GCJoinStyle;
    fill_style, set_fill_style, with_fill_style: c_int = ffi::GCFillStyle;
    fill_rule, set_fill_rule, with_fill_rule: c_int = ffi::GCFillRule;
    arc_mode, set_arc_mode, with_arc_mode: c_int = ffi::GCArcMode;
    tile, set_tile, with_tile: Pixmap = ffi::GCTile;
    stipple, set_stipple, with_stipple: Pixmap = ffi::GCStipple;
    ts_x_origin, set_ts_x_origin, with_ts_x_origin: c_int = ffi::GCTileStipXOrigin;
    ts_y_origin, set_ts_y_origin, with_ts_y_origin: c_int = ffi::GCTileStipYOrigin;
    font, set_font, with_font: Font = ffi::GCFont;
    subwindow_mode, set_subwindow_mode, with_subwindow_mode: c_int = ffi::GCSubwindowMode;
    graphics_exposures, set_graphics_exposures, with_graphics_exposures: bool = ffi::GCGraphicsExposures;
    clip_x_origin, set_clip_x_origin, with_clip_x_origin: c_int = ffi::GCClipXOrigin;
    clip_y_origin, set_clip_y_origin, with_clip_y_origin: c_int = ffi::GCClipYOrigin;
    clip_mask, set_clip_mask, with_clip_mask: Pixmap = ffi::GCClipMask;
    dash_offset, set_dash_offset, with_dash_offset: c_int = ffi::GCDashOffset;
});

/// The values a new GC starts with, as the protocol defines them
pub fn default_gc_values() -> GcValues {
    let mut values = GcValues::new();
    values.raw.function = ffi::GXcopy;
    values.raw.plane_mask = ffi::AllPlanes;
    values.raw.foreground = 0;
    values.raw.background = 1;
    values.raw.line_style = ffi::LineSolid;
    values.raw.cap_style = ffi::CapButt;
    values.raw.join_style = ffi::JoinMiter;
    values.raw.fill_style = ffi::FillSolid;
    values.raw.fill_rule = ffi::EvenOddRule;
    values.raw.arc_mode = ffi::ArcPieSlice;
    values.raw.subwindow_mode = ffi::ClipByChildren;
    values.raw.graphics_exposures = ffi::True;
    values.raw.dashes = 4;
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_mask_bits() {
        let values = GcValues::new()
            .with_foreground(0xff0000)
            .with_line_width(3)
            .with_graphics_exposures(false);

        assert_eq!(
            values.mask(),
            ffi::GCForeground | ffi::GCLineWidth | ffi::GCGraphicsExposures
        );
        assert_eq!(values.foreground(), 0xff0000);
        assert_eq!(values.line_width(), 3);
        assert!(!values.graphics_exposures());
        assert!(values.is_set(ffi::GCForeground));
        assert!(!values.is_set(ffi::GCBackground));
    }

    #[test]
    fn test_typed_setters() {
        let values = GcValues::new()
            .with_gc_function(GcFunction::Xor)
            .with_line_style_kind(LineStyle::OnOffDash);
        assert_eq!(values.function_kind(), Some(GcFunction::Xor));
        assert_eq!(values.line_style(), ffi::LineOnOffDash);
    }

    #[test]
    fn test_merge_only_copies_set_fields() {
        let mut base = default_gc_values();
        base.merge(&GcValues::new().with_foreground(7).with_font(Font::new(0x20)));

        assert_eq!(base.foreground(), 7);
        assert_eq!(base.font(), Font::new(0x20));
        assert_eq!(base.background(), 1);
        assert_eq!(base.function(), ffi::GXcopy);
    }

    #[test]
    fn test_debug_lists_set_fields_only() {
        let text = format!("{:?}", GcValues::new().with_background(3));
        assert!(text.contains("background"));
        assert!(!text.contains("foreground"));
    }
}
