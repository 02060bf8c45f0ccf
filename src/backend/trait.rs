//! Backend trait definition
//!
//! Every call the [`Display`](crate::Display) façade makes goes through this
//! trait. [`NativeBackend`](super::NativeBackend) forwards each method to the
//! matching Xlib function; [`NullBackend`](super::NullBackend) answers from
//! an in-memory model so the façade can be tested without a server.
//!
//! Methods that Xlib itself implements in terms of a more general request
//! have default implementations doing the same, so a backend only has to
//! provide the general form.

use libc::{c_long, c_uint, c_ulong};

use crate::error::{ErrorHandler, IoErrorHandler, Result};
use crate::event::{Event, EventType, KeyEvent};
use crate::ffi;
use crate::types::*;
use crate::wrappers::*;

/// Information about one screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenInfo {
    pub number: i32,
    pub root: Window,
    pub width: u32,
    pub height: u32,
    pub width_mm: u32,
    pub height_mm: u32,
    pub root_visual: VisualId,
    pub root_depth: u32,
    pub default_colormap: Colormap,
    pub white_pixel: c_ulong,
    pub black_pixel: c_ulong,
    /// Colormap entries of the default colormap
    pub cells: u32,
}

/// Reply of XQueryExtension for a present extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionInfo {
    pub major_opcode: i32,
    pub first_event: i32,
    pub first_error: i32,
}

/// Screen saver parameters, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSaverSettings {
    pub timeout: i32,
    pub interval: i32,
    pub prefer_blanking: i32,
    pub allow_exposures: i32,
}

impl Default for ScreenSaverSettings {
    fn default() -> Self {
        ScreenSaverSettings {
            timeout: 600,
            interval: 600,
            prefer_blanking: ffi::PreferBlanking,
            allow_exposures: ffi::AllowExposures,
        }
    }
}

/// Result of XLookupString
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LookedUpKey {
    pub keysym: Option<KeySym>,
    pub text: String,
}

/// Pointer grab parameters shared by XGrabPointer and XGrabButton
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerGrab {
    pub owner_events: bool,
    pub event_mask: c_uint,
    pub pointer_mode: GrabMode,
    pub keyboard_mode: GrabMode,
    pub confine_to: Window,
    pub cursor: Cursor,
}

impl PointerGrab {
    pub fn new(event_mask: c_long) -> Self {
        PointerGrab {
            owner_events: false,
            event_mask: event_mask as c_uint,
            pointer_mode: GrabMode::Async,
            keyboard_mode: GrabMode::Async,
            confine_to: Window::NONE,
            cursor: Cursor::NONE,
        }
    }
}

/// The main backend trait
///
/// Resource ids and GC handles passed in must have come from the same
/// backend. Requests that Xlib queues without a reply return `Ok` even when
/// the server later rejects them; those errors arrive through the error
/// handler.
pub trait Backend: Send {
    // Connection

    fn default_screen(&self) -> i32;

    fn screen_count(&self) -> i32;

    /// Get screen information
    fn screen_info(&self, screen: i32) -> Result<ScreenInfo>;

    fn server_vendor(&self) -> String;

    fn vendor_release(&self) -> i32;

    /// Major and minor protocol version
    fn protocol_version(&self) -> (i32, i32);

    /// The display name the connection was opened with
    fn display_string(&self) -> String;

    /// File descriptor of the connection, if there is one
    fn connection_number(&self) -> Option<i32>;

    fn pixmap_formats(&self) -> Result<Vec<PixmapFormat>>;

    fn depths(&self, screen: i32) -> Result<Vec<i32>>;

    fn image_byte_order(&self) -> ByteOrder;

    /// Largest request the server accepts, in 4-byte units
    fn max_request_size(&self) -> usize;

    fn list_extensions(&self) -> Result<Vec<String>>;

    fn query_extension(&self, name: &str) -> Result<Option<ExtensionInfo>>;

    fn flush(&mut self) -> Result<()>;

    /// Flush and wait until every request has been processed
    fn sync(&mut self, discard: bool) -> Result<()>;

    /// Turn synchronous mode on or off
    fn synchronize(&mut self, on: bool);

    /// Events available without blocking (flushes first)
    fn pending(&mut self) -> i32;

    fn events_queued(&mut self, mode: QueuedMode) -> i32;

    fn lock(&self);

    fn unlock(&self);

    fn bell(&mut self, percent: i32) -> Result<()>;

    fn set_close_down_mode(&mut self, mode: CloseDownMode) -> Result<()>;

    fn kill_client(&mut self, resource: ffi::XID) -> Result<()>;

    fn grab_server(&mut self) -> Result<()>;

    fn ungrab_server(&mut self) -> Result<()>;

    fn no_op(&mut self) -> Result<()>;

    /// Text describing a protocol error code
    fn error_text(&self, code: u8) -> String;

    /// Install the closure receiving asynchronous protocol errors, or
    /// restore the default (logging) with `None`
    fn set_error_handler(&mut self, handler: Option<ErrorHandler>);

    fn set_io_error_handler(&mut self, handler: Option<IoErrorHandler>);

    /// RESOURCE_MANAGER contents of the root window at connect time
    fn resource_manager_string(&self) -> Option<String>;

    /// Resource lookup for `program.option` in the display's database
    fn get_default(&self, program: &str, option: &str) -> Result<Option<String>>;

    /// Serial number of the next request
    fn next_request(&self) -> u64;

    fn last_known_request_processed(&self) -> u64;

    // Windows

    #[allow(clippy::too_many_arguments)]
    fn create_simple_window(
        &mut self,
        parent: Window,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        border_width: u32,
        border: c_ulong,
        background: c_ulong,
    ) -> Result<Window> {
        let attributes = SetWindowAttributes::new()
            .with_border_pixel(border)
            .with_background_pixel(background);
        let params = WindowParams::new(parent, x, y, width, height)
            .border_width(border_width)
            .class(WindowClass::CopyFromParent)
            .attributes(attributes);
        self.create_window(&params)
    }

    fn create_window(&mut self, params: &WindowParams) -> Result<Window>;

    fn destroy_window(&mut self, window: Window) -> Result<()>;

    fn destroy_subwindows(&mut self, window: Window) -> Result<()>;

    fn map_window(&mut self, window: Window) -> Result<()>;

    /// Map a window on top of its siblings
    fn map_raised(&mut self, window: Window) -> Result<()> {
        self.raise_window(window)?;
        self.map_window(window)
    }

    fn map_subwindows(&mut self, window: Window) -> Result<()>;

    fn unmap_window(&mut self, window: Window) -> Result<()>;

    fn unmap_subwindows(&mut self, window: Window) -> Result<()>;

    fn raise_window(&mut self, window: Window) -> Result<()> {
        self.configure_window(window, &WindowChanges::new().with_stack(StackMode::Above))
    }

    fn lower_window(&mut self, window: Window) -> Result<()> {
        self.configure_window(window, &WindowChanges::new().with_stack(StackMode::Below))
    }

    fn circulate_subwindows(&mut self, window: Window, direction: Circulation) -> Result<()>;

    /// Restack `windows` top to bottom. All must be siblings.
    fn restack_windows(&mut self, windows: &[Window]) -> Result<()> {
        for pair in windows.windows(2) {
            let changes = WindowChanges::new()
                .with_sibling(pair[0])
                .with_stack(StackMode::Below);
            self.configure_window(pair[1], &changes)?;
        }
        Ok(())
    }

    fn configure_window(&mut self, window: Window, changes: &WindowChanges) -> Result<()>;

    fn move_window(&mut self, window: Window, x: i32, y: i32) -> Result<()> {
        self.configure_window(window, &WindowChanges::new().with_position(x, y))
    }

    fn resize_window(&mut self, window: Window, width: u32, height: u32) -> Result<()> {
        self.configure_window(
            window,
            &WindowChanges::new().with_size(width as i32, height as i32),
        )
    }

    fn move_resize_window(
        &mut self,
        window: Window,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    ) -> Result<()> {
        let changes = WindowChanges::new()
            .with_position(x, y)
            .with_size(width as i32, height as i32);
        self.configure_window(window, &changes)
    }

    fn set_window_border_width(&mut self, window: Window, width: u32) -> Result<()> {
        self.configure_window(window, &WindowChanges::new().with_border_width(width as i32))
    }

    fn change_window_attributes(
        &mut self,
        window: Window,
        attributes: &SetWindowAttributes,
    ) -> Result<()>;

    fn get_window_attributes(&self, window: Window) -> Result<WindowAttributes>;

    fn get_geometry(&self, drawable: Drawable) -> Result<Geometry>;

    fn query_tree(&self, window: Window) -> Result<QueryTree>;

    fn reparent_window(&mut self, window: Window, parent: Window, x: i32, y: i32) -> Result<()>;

    /// Translate coordinates from `src` to `dst`. `same_screen` is false,
    /// with zero coordinates, when the windows are on different screens.
    fn translate_coordinates(
        &self,
        src: Window,
        dst: Window,
        x: i32,
        y: i32,
    ) -> Result<TranslatedCoordinates>;

    fn set_window_background(&mut self, window: Window, pixel: c_ulong) -> Result<()> {
        let attributes = SetWindowAttributes::new().with_background_pixel(pixel);
        self.change_window_attributes(window, &attributes)
    }

    fn set_window_background_pixmap(&mut self, window: Window, pixmap: Pixmap) -> Result<()> {
        let attributes = SetWindowAttributes::new().with_background_pixmap(pixmap);
        self.change_window_attributes(window, &attributes)
    }

    fn set_window_border(&mut self, window: Window, pixel: c_ulong) -> Result<()> {
        let attributes = SetWindowAttributes::new().with_border_pixel(pixel);
        self.change_window_attributes(window, &attributes)
    }

    fn set_window_colormap(&mut self, window: Window, colormap: Colormap) -> Result<()> {
        let attributes = SetWindowAttributes::new().with_colormap(colormap);
        self.change_window_attributes(window, &attributes)
    }

    /// Clear an area of a window. A zero width or height extends to the
    /// window edge.
    fn clear_area(
        &mut self,
        window: Window,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        exposures: bool,
    ) -> Result<()>;

    fn clear_window(&mut self, window: Window) -> Result<()> {
        self.clear_area(window, 0, 0, 0, 0, false)
    }

    fn select_input(&mut self, window: Window, mask: c_long) -> Result<()> {
        let attributes = SetWindowAttributes::new().with_event_mask(mask);
        self.change_window_attributes(window, &attributes)
    }

    fn define_cursor(&mut self, window: Window, cursor: Cursor) -> Result<()> {
        let attributes = SetWindowAttributes::new().with_cursor(cursor);
        self.change_window_attributes(window, &attributes)
    }

    fn undefine_cursor(&mut self, window: Window) -> Result<()> {
        self.define_cursor(window, Cursor::NONE)
    }

    /// Ask the window manager to iconify a top-level window
    fn iconify_window(&mut self, window: Window, screen: i32) -> Result<()>;

    /// Unmap a top-level window and tell the window manager
    fn withdraw_window(&mut self, window: Window, screen: i32) -> Result<()>;

    fn add_to_save_set(&mut self, window: Window) -> Result<()>;

    fn remove_from_save_set(&mut self, window: Window) -> Result<()>;

    // Atoms, properties and ICCCM helpers

    /// Intern an atom. With `only_if_exists` an unknown name yields
    /// `Atom::NONE`.
    fn intern_atom(&mut self, name: &str, only_if_exists: bool) -> Result<Atom>;

    fn intern_atoms(&mut self, names: &[&str], only_if_exists: bool) -> Result<Vec<Atom>> {
        names
            .iter()
            .map(|name| self.intern_atom(name, only_if_exists))
            .collect()
    }

    fn get_atom_name(&self, atom: Atom) -> Result<String>;

    fn change_property(
        &mut self,
        window: Window,
        property: Atom,
        type_: Atom,
        mode: PropMode,
        value: &PropertyValue,
    ) -> Result<()>;

    /// Read `length` 32-bit units starting at `offset` units. Returns
    /// `None` when the property does not exist.
    #[allow(clippy::too_many_arguments)]
    fn get_property(
        &mut self,
        window: Window,
        property: Atom,
        offset: i64,
        length: i64,
        delete: bool,
        req_type: Atom,
    ) -> Result<Option<Property>>;

    fn delete_property(&mut self, window: Window, property: Atom) -> Result<()>;

    fn list_properties(&self, window: Window) -> Result<Vec<Atom>>;

    /// Set WM_NAME
    fn store_name(&mut self, window: Window, name: &str) -> Result<()>;

    fn fetch_name(&mut self, window: Window) -> Result<Option<String>>;

    /// Set WM_ICON_NAME
    fn set_icon_name(&mut self, window: Window, name: &str) -> Result<()>;

    fn get_icon_name(&mut self, window: Window) -> Result<Option<String>>;

    fn set_wm_protocols(&mut self, window: Window, protocols: &[Atom]) -> Result<()>;

    fn get_wm_protocols(&mut self, window: Window) -> Result<Vec<Atom>>;

    fn set_wm_hints(&mut self, window: Window, hints: &WmHints) -> Result<()>;

    fn get_wm_hints(&mut self, window: Window) -> Result<Option<WmHints>>;

    fn set_wm_normal_hints(&mut self, window: Window, hints: &SizeHints) -> Result<()>;

    fn get_wm_normal_hints(&mut self, window: Window) -> Result<Option<SizeHints>>;

    fn set_class_hint(&mut self, window: Window, hint: &ClassHint) -> Result<()>;

    fn get_class_hint(&mut self, window: Window) -> Result<Option<ClassHint>>;

    fn set_transient_for_hint(&mut self, window: Window, owner: Window) -> Result<()>;

    fn get_transient_for_hint(&mut self, window: Window) -> Result<Option<Window>>;

    /// Set WM_COMMAND
    fn set_command(&mut self, window: Window, argv: &[&str]) -> Result<()>;

    fn get_command(&mut self, window: Window) -> Result<Vec<String>>;

    fn set_icon_sizes(&mut self, window: Window, sizes: &[IconSize]) -> Result<()>;

    fn get_icon_sizes(&mut self, window: Window) -> Result<Vec<IconSize>>;

    fn set_selection_owner(&mut self, selection: Atom, owner: Window, time: Timestamp) -> Result<()>;

    fn get_selection_owner(&self, selection: Atom) -> Result<Window>;

    fn convert_selection(
        &mut self,
        selection: Atom,
        target: Atom,
        property: Atom,
        requestor: Window,
        time: Timestamp,
    ) -> Result<()>;

    // Events

    /// Remove and return the next event, blocking until one arrives
    fn next_event(&mut self) -> Result<Event>;

    /// Return the next event without removing it, blocking until one arrives
    fn peek_event(&mut self) -> Result<Event>;

    /// Next event for `window` matching `mask`, blocking
    fn window_event(&mut self, window: Window, mask: c_long) -> Result<Event>;

    /// Next event matching `mask`, blocking
    fn mask_event(&mut self, mask: c_long) -> Result<Event>;

    fn check_window_event(&mut self, window: Window, mask: c_long) -> Option<Event>;

    fn check_mask_event(&mut self, mask: c_long) -> Option<Event>;

    fn check_typed_event(&mut self, kind: EventType) -> Option<Event>;

    fn check_typed_window_event(&mut self, window: Window, kind: EventType) -> Option<Event>;

    /// Push an event back onto the head of the queue
    fn put_back_event(&mut self, event: &Event) -> Result<()>;

    fn send_event(&mut self, window: Window, propagate: bool, mask: c_long, event: &Event) -> Result<()>;

    fn allow_events(&mut self, mode: AllowEvents, time: Timestamp) -> Result<()>;

    // Input

    fn grab_pointer(&mut self, window: Window, grab: &PointerGrab, time: Timestamp) -> Result<GrabStatus>;

    fn ungrab_pointer(&mut self, time: Timestamp) -> Result<()>;

    fn grab_keyboard(
        &mut self,
        window: Window,
        owner_events: bool,
        pointer_mode: GrabMode,
        keyboard_mode: GrabMode,
        time: Timestamp,
    ) -> Result<GrabStatus>;

    fn ungrab_keyboard(&mut self, time: Timestamp) -> Result<()>;

    fn grab_button(&mut self, button: Button, modifiers: c_uint, window: Window, grab: &PointerGrab) -> Result<()>;

    fn ungrab_button(&mut self, button: Button, modifiers: c_uint, window: Window) -> Result<()>;

    #[allow(clippy::too_many_arguments)]
    fn grab_key(
        &mut self,
        key: KeyCode,
        modifiers: c_uint,
        window: Window,
        owner_events: bool,
        pointer_mode: GrabMode,
        keyboard_mode: GrabMode,
    ) -> Result<()>;

    fn ungrab_key(&mut self, key: KeyCode, modifiers: c_uint, window: Window) -> Result<()>;

    fn query_pointer(&self, window: Window) -> Result<PointerState>;

    /// Move the pointer. With `src` not NONE the move only happens when the
    /// pointer is inside the given rectangle of `src`.
    #[allow(clippy::too_many_arguments)]
    fn warp_pointer(
        &mut self,
        src: Window,
        dst: Window,
        src_x: i32,
        src_y: i32,
        src_width: u32,
        src_height: u32,
        dst_x: i32,
        dst_y: i32,
    ) -> Result<()>;

    fn set_input_focus(&mut self, window: Window, revert_to: RevertTo, time: Timestamp) -> Result<()>;

    fn get_input_focus(&self) -> Result<(Window, RevertTo)>;

    /// Keycode producing `sym`, `None` when no key does
    fn keysym_to_keycode(&self, sym: KeySym) -> Option<KeyCode>;

    fn keycode_to_keysym(&self, key: KeyCode, index: i32) -> Option<KeySym>;

    /// Smallest and largest keycode the server uses
    fn display_keycodes(&self) -> (KeyCode, KeyCode);

    fn get_keyboard_mapping(&self, first: KeyCode, count: u32) -> Result<KeyboardMapping>;

    fn get_modifier_mapping(&self) -> Result<ModifierKeymap>;

    /// Bit vector of keys currently pressed
    fn query_keymap(&self) -> Result<[u8; 32]>;

    fn get_keyboard_control(&self) -> Result<KeyboardState>;

    fn change_keyboard_control(&mut self, control: &KeyboardControl) -> Result<()>;

    fn set_auto_repeat(&mut self, on: bool) -> Result<()>;

    fn get_pointer_mapping(&self) -> Result<Vec<u8>>;

    /// Translate a key event to a keysym and Latin-1 text
    fn lookup_string(&self, event: &KeyEvent) -> LookedUpKey;

    // Graphics contexts

    fn create_gc(&mut self, drawable: Drawable, values: &GcValues) -> Result<Gc>;

    fn default_gc(&self, screen: i32) -> Gc;

    fn change_gc(&mut self, gc: Gc, values: &GcValues) -> Result<()>;

    fn get_gc_values(&self, gc: Gc, mask: c_ulong) -> Result<GcValues>;

    fn copy_gc(&mut self, src: Gc, mask: c_ulong, dst: Gc) -> Result<()>;

    fn free_gc(&mut self, gc: Gc) -> Result<()>;

    fn gcontext_from_gc(&self, gc: Gc) -> GContext;

    fn set_foreground(&mut self, gc: Gc, pixel: c_ulong) -> Result<()> {
        self.change_gc(gc, &GcValues::new().with_foreground(pixel))
    }

    fn set_background(&mut self, gc: Gc, pixel: c_ulong) -> Result<()> {
        self.change_gc(gc, &GcValues::new().with_background(pixel))
    }

    fn set_function(&mut self, gc: Gc, function: GcFunction) -> Result<()> {
        self.change_gc(gc, &GcValues::new().with_gc_function(function))
    }

    fn set_plane_mask(&mut self, gc: Gc, planes: c_ulong) -> Result<()> {
        self.change_gc(gc, &GcValues::new().with_plane_mask(planes))
    }

    fn set_line_attributes(
        &mut self,
        gc: Gc,
        width: u32,
        line_style: LineStyle,
        cap_style: CapStyle,
        join_style: JoinStyle,
    ) -> Result<()> {
        let values = GcValues::new()
            .with_line_width(width as i32)
            .with_line_style(line_style.to_raw())
            .with_cap_style(cap_style.to_raw())
            .with_join_style(join_style.to_raw());
        self.change_gc(gc, &values)
    }

    fn set_dashes(&mut self, gc: Gc, offset: i32, dashes: &[u8]) -> Result<()>;

    fn set_fill_style(&mut self, gc: Gc, style: FillStyle) -> Result<()> {
        self.change_gc(gc, &GcValues::new().with_fill_style_kind(style))
    }

    fn set_fill_rule(&mut self, gc: Gc, rule: FillRule) -> Result<()> {
        self.change_gc(gc, &GcValues::new().with_fill_rule(rule.to_raw()))
    }

    fn set_font(&mut self, gc: Gc, font: Font) -> Result<()> {
        self.change_gc(gc, &GcValues::new().with_font(font))
    }

    fn set_clip_mask(&mut self, gc: Gc, mask: Pixmap) -> Result<()> {
        self.change_gc(gc, &GcValues::new().with_clip_mask(mask))
    }

    fn set_clip_origin(&mut self, gc: Gc, x: i32, y: i32) -> Result<()> {
        let values = GcValues::new().with_clip_x_origin(x).with_clip_y_origin(y);
        self.change_gc(gc, &values)
    }

    fn set_clip_rectangles(
        &mut self,
        gc: Gc,
        x: i32,
        y: i32,
        rectangles: &[Rectangle],
        ordering: ClipOrdering,
    ) -> Result<()>;

    /// Clip to a region
    fn set_region(&mut self, gc: Gc, region: &Region) -> Result<()>;

    fn set_subwindow_mode(&mut self, gc: Gc, mode: SubwindowMode) -> Result<()> {
        self.change_gc(gc, &GcValues::new().with_subwindow_mode(mode.to_raw()))
    }

    fn set_graphics_exposures(&mut self, gc: Gc, on: bool) -> Result<()> {
        self.change_gc(gc, &GcValues::new().with_graphics_exposures(on))
    }

    fn set_arc_mode(&mut self, gc: Gc, mode: ArcMode) -> Result<()> {
        self.change_gc(gc, &GcValues::new().with_arc_mode(mode.to_raw()))
    }

    fn set_tile(&mut self, gc: Gc, tile: Pixmap) -> Result<()> {
        self.change_gc(gc, &GcValues::new().with_tile(tile))
    }

    fn set_stipple(&mut self, gc: Gc, stipple: Pixmap) -> Result<()> {
        self.change_gc(gc, &GcValues::new().with_stipple(stipple))
    }

    fn set_ts_origin(&mut self, gc: Gc, x: i32, y: i32) -> Result<()> {
        let values = GcValues::new().with_ts_x_origin(x).with_ts_y_origin(y);
        self.change_gc(gc, &values)
    }

    // Drawing

    fn draw_point(&mut self, drawable: Drawable, gc: Gc, x: i32, y: i32) -> Result<()> {
        self.draw_points(drawable, gc, &[Point::new(x as i16, y as i16)], CoordMode::Origin)
    }

    fn draw_points(&mut self, drawable: Drawable, gc: Gc, points: &[Point], mode: CoordMode) -> Result<()>;

    fn draw_line(&mut self, drawable: Drawable, gc: Gc, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<()> {
        let segment = Segment::new(x1 as i16, y1 as i16, x2 as i16, y2 as i16);
        self.draw_segments(drawable, gc, &[segment])
    }

    fn draw_lines(&mut self, drawable: Drawable, gc: Gc, points: &[Point], mode: CoordMode) -> Result<()>;

    fn draw_segments(&mut self, drawable: Drawable, gc: Gc, segments: &[Segment]) -> Result<()>;

    fn draw_rectangle(&mut self, drawable: Drawable, gc: Gc, rect: Rectangle) -> Result<()> {
        self.draw_rectangles(drawable, gc, &[rect])
    }

    fn draw_rectangles(&mut self, drawable: Drawable, gc: Gc, rectangles: &[Rectangle]) -> Result<()>;

    fn fill_rectangle(&mut self, drawable: Drawable, gc: Gc, rect: Rectangle) -> Result<()> {
        self.fill_rectangles(drawable, gc, &[rect])
    }

    fn fill_rectangles(&mut self, drawable: Drawable, gc: Gc, rectangles: &[Rectangle]) -> Result<()>;

    fn draw_arc(&mut self, drawable: Drawable, gc: Gc, arc: ArcSegment) -> Result<()> {
        self.draw_arcs(drawable, gc, &[arc])
    }

    fn draw_arcs(&mut self, drawable: Drawable, gc: Gc, arcs: &[ArcSegment]) -> Result<()>;

    fn fill_arc(&mut self, drawable: Drawable, gc: Gc, arc: ArcSegment) -> Result<()> {
        self.fill_arcs(drawable, gc, &[arc])
    }

    fn fill_arcs(&mut self, drawable: Drawable, gc: Gc, arcs: &[ArcSegment]) -> Result<()>;

    fn fill_polygon(
        &mut self,
        drawable: Drawable,
        gc: Gc,
        points: &[Point],
        shape: Shape,
        mode: CoordMode,
    ) -> Result<()>;

    /// Draw 8-bit text using the GC's font
    fn draw_string(&mut self, drawable: Drawable, gc: Gc, x: i32, y: i32, text: &[u8]) -> Result<()>;

    /// Draw 8-bit text over a background-filled box
    fn draw_image_string(&mut self, drawable: Drawable, gc: Gc, x: i32, y: i32, text: &[u8]) -> Result<()>;

    #[allow(clippy::too_many_arguments)]
    fn copy_area(
        &mut self,
        src: Drawable,
        dst: Drawable,
        gc: Gc,
        src_x: i32,
        src_y: i32,
        width: u32,
        height: u32,
        dst_x: i32,
        dst_y: i32,
    ) -> Result<()>;

    #[allow(clippy::too_many_arguments)]
    fn copy_plane(
        &mut self,
        src: Drawable,
        dst: Drawable,
        gc: Gc,
        src_x: i32,
        src_y: i32,
        width: u32,
        height: u32,
        dst_x: i32,
        dst_y: i32,
        plane: c_ulong,
    ) -> Result<()>;

    // Pixmaps, images and cursors

    fn create_pixmap(&mut self, drawable: Drawable, width: u32, height: u32, depth: u32) -> Result<Pixmap>;

    fn free_pixmap(&mut self, pixmap: Pixmap) -> Result<()>;

    /// Depth-1 pixmap from LSB-first bitmap data, rows padded to bytes
    fn create_bitmap_from_data(&mut self, drawable: Drawable, data: &[u8], width: u32, height: u32) -> Result<Pixmap>;

    #[allow(clippy::too_many_arguments)]
    fn create_pixmap_from_bitmap_data(
        &mut self,
        drawable: Drawable,
        data: &[u8],
        width: u32,
        height: u32,
        foreground: c_ulong,
        background: c_ulong,
        depth: u32,
    ) -> Result<Pixmap>;

    #[allow(clippy::too_many_arguments)]
    fn get_image(
        &mut self,
        drawable: Drawable,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        plane_mask: c_ulong,
        format: ImageFormat,
    ) -> Result<Image>;

    #[allow(clippy::too_many_arguments)]
    fn put_image(
        &mut self,
        drawable: Drawable,
        gc: Gc,
        image: &Image,
        src_x: i32,
        src_y: i32,
        dst_x: i32,
        dst_y: i32,
        width: u32,
        height: u32,
    ) -> Result<()>;

    fn create_font_cursor(&mut self, shape: StandardCursor) -> Result<Cursor>;

    #[allow(clippy::too_many_arguments)]
    fn create_pixmap_cursor(
        &mut self,
        source: Pixmap,
        mask: Pixmap,
        foreground: &Color,
        background: &Color,
        x: u32,
        y: u32,
    ) -> Result<Cursor>;

    #[allow(clippy::too_many_arguments)]
    fn create_glyph_cursor(
        &mut self,
        source_font: Font,
        mask_font: Font,
        source_char: u32,
        mask_char: u32,
        foreground: &Color,
        background: &Color,
    ) -> Result<Cursor>;

    fn free_cursor(&mut self, cursor: Cursor) -> Result<()>;

    fn recolor_cursor(&mut self, cursor: Cursor, foreground: &Color, background: &Color) -> Result<()>;

    /// Size closest to the one given that the server handles best
    fn query_best_size(&self, class: BestSizeClass, drawable: Drawable, width: u32, height: u32) -> Result<(u32, u32)>;

    // Colormaps and colors

    fn create_colormap(&mut self, window: Window, visual: VisualId, alloc_all: bool) -> Result<Colormap>;

    fn free_colormap(&mut self, colormap: Colormap) -> Result<()>;

    fn copy_colormap_and_free(&mut self, colormap: Colormap) -> Result<Colormap>;

    fn install_colormap(&mut self, colormap: Colormap) -> Result<()>;

    fn uninstall_colormap(&mut self, colormap: Colormap) -> Result<()>;

    fn list_installed_colormaps(&self, window: Window) -> Result<Vec<Colormap>>;

    /// Allocate the closest read-only cell; the returned color carries the
    /// pixel and the actual RGB values
    fn alloc_color(&mut self, colormap: Colormap, color: Color) -> Result<Color>;

    fn alloc_named_color(&mut self, colormap: Colormap, name: &str) -> Result<ColorPair>;

    /// Resolve a color name to exact and closest-supported values
    fn lookup_color(&self, colormap: Colormap, name: &str) -> Result<ColorPair>;

    /// Parse a name or numeric specification
    fn parse_color(&self, colormap: Colormap, spec: &str) -> Result<Color>;

    fn query_color(&self, colormap: Colormap, pixel: c_ulong) -> Result<Color> {
        let mut colors = [Color::from_pixel(pixel)];
        self.query_colors(colormap, &mut colors)?;
        Ok(colors[0])
    }

    /// Fill in the RGB values of each color's pixel
    fn query_colors(&self, colormap: Colormap, colors: &mut [Color]) -> Result<()>;

    fn store_color(&mut self, colormap: Colormap, color: &Color) -> Result<()> {
        self.store_colors(colormap, std::slice::from_ref(color))
    }

    fn store_colors(&mut self, colormap: Colormap, colors: &[Color]) -> Result<()>;

    fn free_colors(&mut self, colormap: Colormap, pixels: &[c_ulong], planes: c_ulong) -> Result<()>;

    fn get_visual_info(&self, template: &VisualTemplate) -> Result<Vec<VisualInfo>>;

    fn match_visual_info(&self, screen: i32, depth: i32, class: VisualClass) -> Result<Option<VisualInfo>> {
        let template = VisualTemplate::new().screen(screen).depth(depth).class(class);
        Ok(self.get_visual_info(&template)?.into_iter().next())
    }

    // Fonts

    fn load_font(&mut self, name: &str) -> Result<Font>;

    fn unload_font(&mut self, font: Font) -> Result<()>;

    /// Load a font and return its metrics. The font stays loaded until
    /// `unload_font`.
    fn load_query_font(&mut self, name: &str) -> Result<FontInfo> {
        let font = self.load_font(name)?;
        self.query_font(font.id())
    }

    /// Metrics of a font, or of the font of a GContext
    fn query_font(&mut self, font: ffi::XID) -> Result<FontInfo>;

    fn list_fonts(&self, pattern: &str, max_names: u32) -> Result<Vec<String>>;

    fn list_fonts_with_info(&self, pattern: &str, max_names: u32) -> Result<Vec<(String, FontInfo)>>;

    /// Width of `text` in `font`, computed from its metrics without a round
    /// trip
    fn text_width(&self, font: &FontInfo, text: &[u8]) -> Result<i32>;

    fn text_extents(&self, font: &FontInfo, text: &[u8]) -> Result<TextExtents>;

    /// Text extents computed by the server
    fn query_text_extents(&self, font: ffi::XID, text: &[u8]) -> Result<TextExtents>;

    fn set_font_path(&mut self, directories: &[&str]) -> Result<()>;

    fn get_font_path(&self) -> Result<Vec<String>>;

    // Access control and screen saver

    fn add_host(&mut self, host: &HostAddress) -> Result<()>;

    fn add_hosts(&mut self, hosts: &[HostAddress]) -> Result<()> {
        hosts.iter().try_for_each(|host| self.add_host(host))
    }

    fn remove_host(&mut self, host: &HostAddress) -> Result<()>;

    fn remove_hosts(&mut self, hosts: &[HostAddress]) -> Result<()> {
        hosts.iter().try_for_each(|host| self.remove_host(host))
    }

    /// Access list entries and whether access control is enabled
    fn list_hosts(&self) -> Result<(Vec<HostAddress>, bool)>;

    fn set_access_control(&mut self, enabled: bool) -> Result<()>;

    fn enable_access_control(&mut self) -> Result<()> {
        self.set_access_control(true)
    }

    fn disable_access_control(&mut self) -> Result<()> {
        self.set_access_control(false)
    }

    fn set_screen_saver(&mut self, settings: &ScreenSaverSettings) -> Result<()>;

    fn get_screen_saver(&self) -> Result<ScreenSaverSettings>;

    fn force_screen_saver(&mut self, mode: ScreenSaverMode) -> Result<()>;

    fn activate_screen_saver(&mut self) -> Result<()> {
        self.force_screen_saver(ScreenSaverMode::Active)
    }

    fn reset_screen_saver(&mut self) -> Result<()> {
        self.force_screen_saver(ScreenSaverMode::Reset)
    }
}
