//! The `Display` façade
//!
//! A [`Display`] owns one connection and exposes the Xlib calls as methods
//! taking and returning the crate's own types. Every call goes through a
//! [`Backend`]: [`NativeBackend`] by default, or any other implementation
//! passed to [`Display::with_backend`].

mod options;

pub use options::{ConnectOptions, LIBRARY_ENV, SYNC_ENV};

use std::cell::Cell;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

use libc::{c_long, c_uint, c_ulong};

use crate::backend::*;
use crate::error::{self, Error, ErrorEvent, ErrorHandler, IoErrorHandler, Result};
use crate::event::{Event, EventType, KeyEvent};
use crate::ffi;
use crate::library::Library;
use crate::types::*;
use crate::wrappers::*;

/// Generate methods that hand their arguments straight to the backend
macro_rules! forward {
    (
        ref {
            $(
                $(#[$rmeta:meta])*
                fn $rname:ident($($rarg:ident: $rty:ty),*) -> $rret:ty;
            )*
        }
        mut {
            $(
                $(#[$mmeta:meta])*
                fn $mname:ident($($marg:ident: $mty:ty),*) -> $mret:ty;
            )*
        }
    ) => {
        $(
            $(#[$rmeta])*
            pub fn $rname(&self, $($rarg: $rty),*) -> $rret {
                self.backend.$rname($($rarg),*)
            }
        )*
        $(
            $(#[$mmeta])*
            pub fn $mname(&mut self, $($marg: $mty),*) -> $mret {
                self.backend.$mname($($marg),*)
            }
        )*
    };
}

/// A connection to an X server
///
/// `Display` can move between threads but cannot be shared by reference;
/// Xlib serializes access to one connection only when XInitThreads was
/// called, and even then the façade hands out `&mut` for requests.
pub struct Display<B: Backend = NativeBackend> {
    backend: B,
    _not_sync: PhantomData<Cell<()>>,
}

impl Display<NativeBackend> {
    /// Connect to `name`, or `$DISPLAY` when `None`. Library names and
    /// synchronous mode come from the environment.
    pub fn open(name: Option<&str>) -> Result<Self> {
        let mut options = ConnectOptions::from_env();
        options.display_name = name.map(String::from);
        Self::open_with(&options)
    }

    pub fn open_with(options: &ConnectOptions) -> Result<Self> {
        let names: Vec<&str> = options.library_names.iter().map(String::as_str).collect();
        let lib = Library::load_from(&names)?;
        if options.init_threads {
            lib.init_threads()?;
        }
        let backend = NativeBackend::open(lib, options.display_name.as_deref())?;

        let mut display = Display::with_backend(backend);
        if options.synchronous {
            log::debug!("Synchronous mode on");
            display.synchronize(true);
        }
        Ok(display)
    }

    pub fn library(&self) -> &Library {
        self.backend.library()
    }

    /// The underlying `Display *` for calls this crate does not wrap
    pub fn as_raw(&self) -> *mut ffi::Display {
        self.backend.as_raw()
    }
}

impl<B: Backend> Display<B> {
    pub fn with_backend(backend: B) -> Self {
        Display {
            backend,
            _not_sync: PhantomData,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Close the connection. Dropping the display does the same.
    pub fn close(self) {
        log::debug!("Closing {}", self.backend.display_string());
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn default_root_window(&self) -> Result<Window> {
        Ok(self.default_screen_info()?.root)
    }

    pub fn default_screen_info(&self) -> Result<ScreenInfo> {
        self.backend.screen_info(self.backend.default_screen())
    }

    /// Lock the connection against other threads until the guard drops
    pub fn lock(&mut self) -> DisplayLock<'_, B> {
        self.backend.lock();
        DisplayLock { display: self }
    }

    /// Run `f` and collect the protocol errors its requests raise instead
    /// of passing them to the error handler. The queue is synced before
    /// returning so every error has arrived.
    pub fn trap_errors<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> (R, Vec<ErrorEvent>) {
        let trap = Trap::push();
        let result = f(self);
        if let Err(err) = self.backend.sync(false) {
            log::warn!("Sync after trapped requests failed: {}", err);
        }
        (result, trap.finish())
    }

    /// Iterate over the events already queued without blocking
    pub fn events(&mut self) -> Events<'_, B> {
        Events { display: self }
    }

    /// Next event, waiting at most `timeout` for one to arrive. A backend
    /// without a connection descriptor only returns what is queued.
    pub fn wait_event_timeout(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if self.backend.pending() > 0 {
            return self.backend.next_event().map(Some);
        }
        let Some(fd) = self.backend.connection_number() else {
            return Ok(None);
        };

        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            wait_readable(fd, remaining)?;
            if self.backend.pending() > 0 {
                return self.backend.next_event().map(Some);
            }
            if remaining.is_zero() {
                return Ok(None);
            }
        }
    }

    pub fn synchronize(&mut self, on: bool) {
        self.backend.synchronize(on);
    }

    /// Install a handler for protocol errors, or restore logging them
    pub fn set_error_handler(&mut self, handler: Option<ErrorHandler>) {
        self.backend.set_error_handler(handler);
    }

    pub fn set_io_error_handler(&mut self, handler: Option<IoErrorHandler>) {
        self.backend.set_io_error_handler(handler);
    }

    /// XGrabPointer. Anything but GrabSuccess is an error.
    pub fn grab_pointer(&mut self, window: Window, grab: &PointerGrab, time: Timestamp) -> Result<()> {
        grab_result(self.backend.grab_pointer(window, grab, time)?)
    }

    /// XGrabKeyboard. Anything but GrabSuccess is an error.
    pub fn grab_keyboard(
        &mut self,
        window: Window,
        owner_events: bool,
        pointer_mode: GrabMode,
        keyboard_mode: GrabMode,
        time: Timestamp,
    ) -> Result<()> {
        let status = self
            .backend
            .grab_keyboard(window, owner_events, pointer_mode, keyboard_mode, time)?;
        grab_result(status)
    }

    forward! {
        ref {
            fn default_screen() -> i32;
            fn screen_count() -> i32;
            fn screen_info(screen: i32) -> Result<ScreenInfo>;
            /// XServerVendor
            fn server_vendor() -> String;
            fn vendor_release() -> i32;
            /// Major and minor protocol version
            fn protocol_version() -> (i32, i32);
            fn display_string() -> String;
            /// File descriptor of the connection, if there is one
            fn connection_number() -> Option<i32>;
            fn pixmap_formats() -> Result<Vec<PixmapFormat>>;
            /// Depths supported on `screen`
            fn depths(screen: i32) -> Result<Vec<i32>>;
            fn image_byte_order() -> ByteOrder;
            /// Largest request the server accepts, in 4-byte units
            fn max_request_size() -> usize;
            fn list_extensions() -> Result<Vec<String>>;
            fn query_extension(name: &str) -> Result<Option<ExtensionInfo>>;
            /// XGetErrorText
            fn error_text(code: u8) -> String;
            /// The RESOURCE_MANAGER property of the first root window
            fn resource_manager_string() -> Option<String>;
            /// XGetDefault
            fn get_default(program: &str, option: &str) -> Result<Option<String>>;
            fn next_request() -> u64;
            fn last_known_request_processed() -> u64;

            fn get_window_attributes(window: Window) -> Result<WindowAttributes>;
            fn get_geometry(drawable: Drawable) -> Result<Geometry>;
            fn query_tree(window: Window) -> Result<QueryTree>;
            fn translate_coordinates(src: Window, dst: Window, x: i32, y: i32) -> Result<TranslatedCoordinates>;

            fn get_atom_name(atom: Atom) -> Result<String>;
            fn list_properties(window: Window) -> Result<Vec<Atom>>;
            fn get_selection_owner(selection: Atom) -> Result<Window>;

            fn query_pointer(window: Window) -> Result<PointerState>;
            fn get_input_focus() -> Result<(Window, RevertTo)>;
            fn keysym_to_keycode(sym: KeySym) -> Option<KeyCode>;
            fn keycode_to_keysym(key: KeyCode, index: i32) -> Option<KeySym>;
            /// Lowest and highest keycode the server reports
            fn display_keycodes() -> (KeyCode, KeyCode);
            fn get_keyboard_mapping(first: KeyCode, count: u32) -> Result<KeyboardMapping>;
            fn get_modifier_mapping() -> Result<ModifierKeymap>;
            /// One bit per keycode, set while the key is down
            fn query_keymap() -> Result<[u8; 32]>;
            fn get_keyboard_control() -> Result<KeyboardState>;
            fn get_pointer_mapping() -> Result<Vec<u8>>;
            /// XLookupString without a compose status
            fn lookup_string(event: &KeyEvent) -> LookedUpKey;

            fn default_gc(screen: i32) -> Gc;
            fn get_gc_values(gc: Gc, mask: c_ulong) -> Result<GcValues>;
            fn gcontext_from_gc(gc: Gc) -> GContext;

            fn query_best_size(class: BestSizeClass, drawable: Drawable, width: u32, height: u32) -> Result<(u32, u32)>;

            fn list_installed_colormaps(window: Window) -> Result<Vec<Colormap>>;
            /// Exact and closest screen color for a name, without allocating
            fn lookup_color(colormap: Colormap, name: &str) -> Result<ColorPair>;
            fn parse_color(colormap: Colormap, spec: &str) -> Result<Color>;
            fn query_color(colormap: Colormap, pixel: c_ulong) -> Result<Color>;
            /// Fill in the RGB values of each color's pixel
            fn query_colors(colormap: Colormap, colors: &mut [Color]) -> Result<()>;
            fn get_visual_info(template: &VisualTemplate) -> Result<Vec<VisualInfo>>;
            fn match_visual_info(screen: i32, depth: i32, class: VisualClass) -> Result<Option<VisualInfo>>;

            fn list_fonts(pattern: &str, max_names: u32) -> Result<Vec<String>>;
            fn list_fonts_with_info(pattern: &str, max_names: u32) -> Result<Vec<(String, FontInfo)>>;
            fn text_width(font: &FontInfo, text: &[u8]) -> Result<i32>;
            fn text_extents(font: &FontInfo, text: &[u8]) -> Result<TextExtents>;
            /// Extents computed by the server for a font or GContext id
            fn query_text_extents(font: ffi::XID, text: &[u8]) -> Result<TextExtents>;
            fn get_font_path() -> Result<Vec<String>>;

            /// Hosts on the access list and whether access control is on
            fn list_hosts() -> Result<(Vec<HostAddress>, bool)>;
            fn get_screen_saver() -> Result<ScreenSaverSettings>;
        }
        mut {
            fn flush() -> Result<()>;
            /// XSync. With `discard` the event queue is emptied too.
            fn sync(discard: bool) -> Result<()>;
            /// Events queued or readable; flushes the output buffer
            fn pending() -> i32;
            fn events_queued(mode: QueuedMode) -> i32;
            fn bell(percent: i32) -> Result<()>;
            fn set_close_down_mode(mode: CloseDownMode) -> Result<()>;
            fn kill_client(resource: ffi::XID) -> Result<()>;
            fn grab_server() -> Result<()>;
            fn ungrab_server() -> Result<()>;
            fn no_op() -> Result<()>;

            #[allow(clippy::too_many_arguments)]
            fn create_simple_window(
                parent: Window,
                x: i32,
                y: i32,
                width: u32,
                height: u32,
                border_width: u32,
                border: c_ulong,
                background: c_ulong
            ) -> Result<Window>;
            fn create_window(params: &WindowParams) -> Result<Window>;
            fn destroy_window(window: Window) -> Result<()>;
            fn destroy_subwindows(window: Window) -> Result<()>;
            fn map_window(window: Window) -> Result<()>;
            fn map_raised(window: Window) -> Result<()>;
            fn map_subwindows(window: Window) -> Result<()>;
            fn unmap_window(window: Window) -> Result<()>;
            fn unmap_subwindows(window: Window) -> Result<()>;
            fn raise_window(window: Window) -> Result<()>;
            fn lower_window(window: Window) -> Result<()>;
            fn circulate_subwindows(window: Window, direction: Circulation) -> Result<()>;
            /// Stack `windows` top to bottom; the first one keeps its place
            fn restack_windows(windows: &[Window]) -> Result<()>;
            fn configure_window(window: Window, changes: &WindowChanges) -> Result<()>;
            fn move_window(window: Window, x: i32, y: i32) -> Result<()>;
            fn resize_window(window: Window, width: u32, height: u32) -> Result<()>;
            fn move_resize_window(window: Window, x: i32, y: i32, width: u32, height: u32) -> Result<()>;
            fn set_window_border_width(window: Window, width: u32) -> Result<()>;
            fn change_window_attributes(window: Window, attributes: &SetWindowAttributes) -> Result<()>;
            fn reparent_window(window: Window, parent: Window, x: i32, y: i32) -> Result<()>;
            fn set_window_background(window: Window, pixel: c_ulong) -> Result<()>;
            fn set_window_background_pixmap(window: Window, pixmap: Pixmap) -> Result<()>;
            fn set_window_border(window: Window, pixel: c_ulong) -> Result<()>;
            fn set_window_colormap(window: Window, colormap: Colormap) -> Result<()>;
            /// XClearArea. A zero width or height extends to the window edge.
            fn clear_area(window: Window, x: i32, y: i32, width: u32, height: u32, exposures: bool) -> Result<()>;
            fn clear_window(window: Window) -> Result<()>;
            fn select_input(window: Window, mask: c_long) -> Result<()>;
            fn define_cursor(window: Window, cursor: Cursor) -> Result<()>;
            fn undefine_cursor(window: Window) -> Result<()>;
            fn iconify_window(window: Window, screen: i32) -> Result<()>;
            fn withdraw_window(window: Window, screen: i32) -> Result<()>;
            fn add_to_save_set(window: Window) -> Result<()>;
            fn remove_from_save_set(window: Window) -> Result<()>;

            /// XInternAtom. With `only_if_exists` an unknown name gives
            /// [`Atom::NONE`].
            fn intern_atom(name: &str, only_if_exists: bool) -> Result<Atom>;
            fn intern_atoms(names: &[&str], only_if_exists: bool) -> Result<Vec<Atom>>;
            fn change_property(
                window: Window,
                property: Atom,
                type_: Atom,
                mode: PropMode,
                value: &PropertyValue
            ) -> Result<()>;
            /// XGetWindowProperty. `offset` and `length` count 4-byte units;
            /// `None` when the property does not exist.
            fn get_property(
                window: Window,
                property: Atom,
                offset: i64,
                length: i64,
                delete: bool,
                req_type: Atom
            ) -> Result<Option<Property>>;
            fn delete_property(window: Window, property: Atom) -> Result<()>;
            fn store_name(window: Window, name: &str) -> Result<()>;
            fn fetch_name(window: Window) -> Result<Option<String>>;
            fn set_icon_name(window: Window, name: &str) -> Result<()>;
            fn get_icon_name(window: Window) -> Result<Option<String>>;
            fn set_wm_protocols(window: Window, protocols: &[Atom]) -> Result<()>;
            fn get_wm_protocols(window: Window) -> Result<Vec<Atom>>;
            fn set_wm_hints(window: Window, hints: &WmHints) -> Result<()>;
            fn get_wm_hints(window: Window) -> Result<Option<WmHints>>;
            fn set_wm_normal_hints(window: Window, hints: &SizeHints) -> Result<()>;
            fn get_wm_normal_hints(window: Window) -> Result<Option<SizeHints>>;
            fn set_class_hint(window: Window, hint: &ClassHint) -> Result<()>;
            fn get_class_hint(window: Window) -> Result<Option<ClassHint>>;
            fn set_transient_for_hint(window: Window, owner: Window) -> Result<()>;
            fn get_transient_for_hint(window: Window) -> Result<Option<Window>>;
            fn set_command(window: Window, argv: &[&str]) -> Result<()>;
            fn get_command(window: Window) -> Result<Vec<String>>;
            fn set_icon_sizes(window: Window, sizes: &[IconSize]) -> Result<()>;
            fn get_icon_sizes(window: Window) -> Result<Vec<IconSize>>;
            fn set_selection_owner(selection: Atom, owner: Window, time: Timestamp) -> Result<()>;
            fn convert_selection(
                selection: Atom,
                target: Atom,
                property: Atom,
                requestor: Window,
                time: Timestamp
            ) -> Result<()>;

            /// Block until an event arrives and remove it from the queue
            fn next_event() -> Result<Event>;
            fn peek_event() -> Result<Event>;
            fn window_event(window: Window, mask: c_long) -> Result<Event>;
            fn mask_event(mask: c_long) -> Result<Event>;
            fn check_window_event(window: Window, mask: c_long) -> Option<Event>;
            fn check_mask_event(mask: c_long) -> Option<Event>;
            fn check_typed_event(kind: EventType) -> Option<Event>;
            fn check_typed_window_event(window: Window, kind: EventType) -> Option<Event>;
            /// Push an event back on the front of the queue
            fn put_back_event(event: &Event) -> Result<()>;
            fn send_event(window: Window, propagate: bool, mask: c_long, event: &Event) -> Result<()>;
            fn allow_events(mode: AllowEvents, time: Timestamp) -> Result<()>;

            fn ungrab_pointer(time: Timestamp) -> Result<()>;
            fn ungrab_keyboard(time: Timestamp) -> Result<()>;
            fn grab_button(button: Button, modifiers: c_uint, window: Window, grab: &PointerGrab) -> Result<()>;
            fn ungrab_button(button: Button, modifiers: c_uint, window: Window) -> Result<()>;
            fn grab_key(
                key: KeyCode,
                modifiers: c_uint,
                window: Window,
                owner_events: bool,
                pointer_mode: GrabMode,
                keyboard_mode: GrabMode
            ) -> Result<()>;
            fn ungrab_key(key: KeyCode, modifiers: c_uint, window: Window) -> Result<()>;
            #[allow(clippy::too_many_arguments)]
            fn warp_pointer(
                src: Window,
                dst: Window,
                src_x: i32,
                src_y: i32,
                src_width: u32,
                src_height: u32,
                dst_x: i32,
                dst_y: i32
            ) -> Result<()>;
            fn set_input_focus(window: Window, revert_to: RevertTo, time: Timestamp) -> Result<()>;
            fn change_keyboard_control(control: &KeyboardControl) -> Result<()>;
            fn set_auto_repeat(on: bool) -> Result<()>;

            fn create_gc(drawable: Drawable, values: &GcValues) -> Result<Gc>;
            fn change_gc(gc: Gc, values: &GcValues) -> Result<()>;
            /// Copy the components in `mask` from `src` to `dst`
            fn copy_gc(src: Gc, mask: c_ulong, dst: Gc) -> Result<()>;
            fn free_gc(gc: Gc) -> Result<()>;
            fn set_foreground(gc: Gc, pixel: c_ulong) -> Result<()>;
            fn set_background(gc: Gc, pixel: c_ulong) -> Result<()>;
            fn set_function(gc: Gc, function: GcFunction) -> Result<()>;
            fn set_plane_mask(gc: Gc, planes: c_ulong) -> Result<()>;
            fn set_line_attributes(
                gc: Gc,
                width: u32,
                line_style: LineStyle,
                cap_style: CapStyle,
                join_style: JoinStyle
            ) -> Result<()>;
            fn set_dashes(gc: Gc, offset: i32, dashes: &[u8]) -> Result<()>;
            fn set_fill_style(gc: Gc, style: FillStyle) -> Result<()>;
            fn set_fill_rule(gc: Gc, rule: FillRule) -> Result<()>;
            fn set_font(gc: Gc, font: Font) -> Result<()>;
            fn set_clip_mask(gc: Gc, mask: Pixmap) -> Result<()>;
            fn set_clip_origin(gc: Gc, x: i32, y: i32) -> Result<()>;
            fn set_clip_rectangles(
                gc: Gc,
                x: i32,
                y: i32,
                rectangles: &[Rectangle],
                ordering: ClipOrdering
            ) -> Result<()>;
            fn set_region(gc: Gc, region: &Region) -> Result<()>;
            fn set_subwindow_mode(gc: Gc, mode: SubwindowMode) -> Result<()>;
            fn set_graphics_exposures(gc: Gc, on: bool) -> Result<()>;
            fn set_arc_mode(gc: Gc, mode: ArcMode) -> Result<()>;
            fn set_tile(gc: Gc, tile: Pixmap) -> Result<()>;
            fn set_stipple(gc: Gc, stipple: Pixmap) -> Result<()>;
            fn set_ts_origin(gc: Gc, x: i32, y: i32) -> Result<()>;

            fn draw_point(drawable: Drawable, gc: Gc, x: i32, y: i32) -> Result<()>;
            fn draw_points(drawable: Drawable, gc: Gc, points: &[Point], mode: CoordMode) -> Result<()>;
            fn draw_line(drawable: Drawable, gc: Gc, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<()>;
            fn draw_lines(drawable: Drawable, gc: Gc, points: &[Point], mode: CoordMode) -> Result<()>;
            fn draw_segments(drawable: Drawable, gc: Gc, segments: &[Segment]) -> Result<()>;
            fn draw_rectangle(drawable: Drawable, gc: Gc, rect: Rectangle) -> Result<()>;
            fn draw_rectangles(drawable: Drawable, gc: Gc, rectangles: &[Rectangle]) -> Result<()>;
            fn fill_rectangle(drawable: Drawable, gc: Gc, rect: Rectangle) -> Result<()>;
            fn fill_rectangles(drawable: Drawable, gc: Gc, rectangles: &[Rectangle]) -> Result<()>;
            fn draw_arc(drawable: Drawable, gc: Gc, arc: ArcSegment) -> Result<()>;
            fn draw_arcs(drawable: Drawable, gc: Gc, arcs: &[ArcSegment]) -> Result<()>;
            fn fill_arc(drawable: Drawable, gc: Gc, arc: ArcSegment) -> Result<()>;
            fn fill_arcs(drawable: Drawable, gc: Gc, arcs: &[ArcSegment]) -> Result<()>;
            fn fill_polygon(drawable: Drawable, gc: Gc, points: &[Point], shape: Shape, mode: CoordMode) -> Result<()>;
            /// Draw 8-bit text with the GC's font, foreground only
            fn draw_string(drawable: Drawable, gc: Gc, x: i32, y: i32, text: &[u8]) -> Result<()>;
            /// Draw 8-bit text over a background filled box
            fn draw_image_string(drawable: Drawable, gc: Gc, x: i32, y: i32, text: &[u8]) -> Result<()>;
            #[allow(clippy::too_many_arguments)]
            fn copy_area(
                src: Drawable,
                dst: Drawable,
                gc: Gc,
                src_x: i32,
                src_y: i32,
                width: u32,
                height: u32,
                dst_x: i32,
                dst_y: i32
            ) -> Result<()>;
            #[allow(clippy::too_many_arguments)]
            fn copy_plane(
                src: Drawable,
                dst: Drawable,
                gc: Gc,
                src_x: i32,
                src_y: i32,
                width: u32,
                height: u32,
                dst_x: i32,
                dst_y: i32,
                plane: c_ulong
            ) -> Result<()>;

            fn create_pixmap(drawable: Drawable, width: u32, height: u32, depth: u32) -> Result<Pixmap>;
            fn free_pixmap(pixmap: Pixmap) -> Result<()>;
            /// A depth-1 pixmap from XBM-ordered rows
            fn create_bitmap_from_data(drawable: Drawable, data: &[u8], width: u32, height: u32) -> Result<Pixmap>;
            #[allow(clippy::too_many_arguments)]
            fn create_pixmap_from_bitmap_data(
                drawable: Drawable,
                data: &[u8],
                width: u32,
                height: u32,
                foreground: c_ulong,
                background: c_ulong,
                depth: u32
            ) -> Result<Pixmap>;
            #[allow(clippy::too_many_arguments)]
            fn get_image(
                drawable: Drawable,
                x: i32,
                y: i32,
                width: u32,
                height: u32,
                plane_mask: c_ulong,
                format: ImageFormat
            ) -> Result<Image>;
            #[allow(clippy::too_many_arguments)]
            fn put_image(
                drawable: Drawable,
                gc: Gc,
                image: &Image,
                src_x: i32,
                src_y: i32,
                dst_x: i32,
                dst_y: i32,
                width: u32,
                height: u32
            ) -> Result<()>;

            fn create_font_cursor(shape: StandardCursor) -> Result<Cursor>;
            fn create_pixmap_cursor(
                source: Pixmap,
                mask: Pixmap,
                foreground: &Color,
                background: &Color,
                x: u32,
                y: u32
            ) -> Result<Cursor>;
            fn create_glyph_cursor(
                source_font: Font,
                mask_font: Font,
                source_char: u32,
                mask_char: u32,
                foreground: &Color,
                background: &Color
            ) -> Result<Cursor>;
            fn free_cursor(cursor: Cursor) -> Result<()>;
            fn recolor_cursor(cursor: Cursor, foreground: &Color, background: &Color) -> Result<()>;

            fn create_colormap(window: Window, visual: VisualId, alloc_all: bool) -> Result<Colormap>;
            fn free_colormap(colormap: Colormap) -> Result<()>;
            fn copy_colormap_and_free(colormap: Colormap) -> Result<Colormap>;
            fn install_colormap(colormap: Colormap) -> Result<()>;
            fn uninstall_colormap(colormap: Colormap) -> Result<()>;
            /// XAllocColor. The returned color carries the pixel and the
            /// values the hardware actually uses.
            fn alloc_color(colormap: Colormap, color: Color) -> Result<Color>;
            fn alloc_named_color(colormap: Colormap, name: &str) -> Result<ColorPair>;
            fn store_color(colormap: Colormap, color: &Color) -> Result<()>;
            fn store_colors(colormap: Colormap, colors: &[Color]) -> Result<()>;
            fn free_colors(colormap: Colormap, pixels: &[c_ulong], planes: c_ulong) -> Result<()>;

            fn load_font(name: &str) -> Result<Font>;
            fn unload_font(font: Font) -> Result<()>;
            fn load_query_font(name: &str) -> Result<FontInfo>;
            fn query_font(font: ffi::XID) -> Result<FontInfo>;
            fn set_font_path(directories: &[&str]) -> Result<()>;

            fn add_host(host: &HostAddress) -> Result<()>;
            fn add_hosts(hosts: &[HostAddress]) -> Result<()>;
            fn remove_host(host: &HostAddress) -> Result<()>;
            fn remove_hosts(hosts: &[HostAddress]) -> Result<()>;
            fn set_access_control(enabled: bool) -> Result<()>;
            fn enable_access_control() -> Result<()>;
            fn disable_access_control() -> Result<()>;
            fn set_screen_saver(settings: &ScreenSaverSettings) -> Result<()>;
            fn force_screen_saver(mode: ScreenSaverMode) -> Result<()>;
            fn activate_screen_saver() -> Result<()>;
            fn reset_screen_saver() -> Result<()>;
        }
    }
}

impl<B: Backend + Default> Default for Display<B> {
    fn default() -> Self {
        Display::with_backend(B::default())
    }
}

impl<B: Backend + std::fmt::Debug> std::fmt::Debug for Display<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Display").field("backend", &self.backend).finish()
    }
}

fn grab_result(status: GrabStatus) -> Result<()> {
    match status {
        GrabStatus::Success => Ok(()),
        status => Err(Error::GrabFailed(status)),
    }
}

/// Wait until `fd` is readable or `timeout` passes
#[cfg(unix)]
fn wait_readable(fd: i32, timeout: Duration) -> Result<()> {
    use nix::errno::Errno;
    use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
    use std::os::fd::BorrowedFd;

    // SAFETY: the descriptor belongs to the open connection, which outlives
    // this call
    let fd = unsafe { BorrowedFd::borrow_raw(fd) };
    let millis = u16::try_from(timeout.as_nanos().div_ceil(1_000_000)).unwrap_or(u16::MAX);
    let mut fds = [PollFd::new(fd, PollFlags::POLLIN)];
    match poll(&mut fds, PollTimeout::from(millis)) {
        Ok(_) | Err(Errno::EINTR) => Ok(()),
        Err(err) => Err(Error::Poll(err)),
    }
}

#[cfg(not(unix))]
fn wait_readable(_fd: i32, _timeout: Duration) -> Result<()> {
    Err(Error::Unsupported("waiting on the connection descriptor"))
}

/// One frame on the error trap stack, popped on drop so a panic inside
/// `trap_errors` leaves the stack balanced
struct Trap;

impl Trap {
    fn push() -> Self {
        error::push_trap();
        Trap
    }

    fn finish(self) -> Vec<ErrorEvent> {
        let errors = error::pop_trap();
        std::mem::forget(self);
        errors
    }
}

impl Drop for Trap {
    fn drop(&mut self) {
        error::pop_trap();
    }
}

/// Holds XLockDisplay until dropped
pub struct DisplayLock<'a, B: Backend> {
    display: &'a mut Display<B>,
}

impl<B: Backend> Deref for DisplayLock<'_, B> {
    type Target = Display<B>;

    fn deref(&self) -> &Display<B> {
        self.display
    }
}

impl<B: Backend> DerefMut for DisplayLock<'_, B> {
    fn deref_mut(&mut self) -> &mut Display<B> {
        self.display
    }
}

impl<B: Backend> Drop for DisplayLock<'_, B> {
    fn drop(&mut self) {
        self.display.backend.unlock();
    }
}

/// Iterator returned by [`Display::events`]
pub struct Events<'a, B: Backend> {
    display: &'a mut Display<B>,
}

impl<B: Backend> Iterator for Events<'_, B> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        if self.display.backend.pending() == 0 {
            return None;
        }
        match self.display.backend.next_event() {
            Ok(event) => Some(event),
            Err(err) => {
                log::warn!("Reading a pending event failed: {}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NullBackend;

    fn display() -> Display<NullBackend> {
        Display::with_backend(NullBackend::new())
    }

    #[test]
    fn test_forwarding_records_requests() {
        let mut display = display();
        let root = display.default_root_window().unwrap();
        let window = display
            .create_simple_window(root, 0, 0, 10, 10, 0, 0, 0)
            .unwrap();
        display.map_window(window).unwrap();
        display.flush().unwrap();

        let requests = display.backend().requests();
        assert!(requests.contains(&"XCreateWindow"));
        assert!(requests.contains(&"XMapWindow"));
        assert!(requests.contains(&"XFlush"));
    }

    #[test]
    fn test_lock_guard_unlocks() {
        let mut display = display();
        {
            let mut guard = display.lock();
            assert_eq!(guard.backend().lock_depth(), 1);
            guard.bell(0).unwrap();
        }
        assert_eq!(display.backend().lock_depth(), 0);
    }

    #[test]
    fn test_trap_errors_collects() {
        let mut display = display();
        let (result, errors) = display.trap_errors(|d| d.map_window(Window::new(0x1234)));
        assert!(result.is_ok());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), Some(crate::error::ErrorCode::Window));
        assert_eq!(errors[0].resource_id(), 0x1234);

        let (_, errors) = display.trap_errors(|d| d.no_op());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_events_drains_queue() {
        let mut display = display();
        let root = display.default_root_window().unwrap();
        let window = display
            .create_simple_window(root, 0, 0, 10, 10, 0, 0, 0)
            .unwrap();
        display
            .select_input(window, ffi::StructureNotifyMask | ffi::ExposureMask)
            .unwrap();
        display.map_window(window).unwrap();

        let kinds: Vec<_> = display.events().map(|e| e.event_type()).collect();
        assert_eq!(kinds, vec![Some(EventType::MapNotify), Some(EventType::Expose)]);
        assert_eq!(display.pending(), 0);
        assert!(display.events().next().is_none());
    }

    #[test]
    fn test_wait_without_descriptor() {
        let mut display = display();
        assert!(display
            .wait_event_timeout(Duration::from_millis(5))
            .unwrap()
            .is_none());

        let root = display.default_root_window().unwrap();
        let window = display
            .create_simple_window(root, 0, 0, 10, 10, 0, 0, 0)
            .unwrap();
        display.select_input(window, ffi::StructureNotifyMask).unwrap();
        display.map_window(window).unwrap();
        let event = display.wait_event_timeout(Duration::ZERO).unwrap();
        assert!(matches!(event, Some(Event::MapNotify(_))));
    }

    #[test]
    fn test_grab_failure_is_an_error() {
        let mut display = display();
        let root = display.default_root_window().unwrap();
        let window = display
            .create_simple_window(root, 0, 0, 10, 10, 0, 0, 0)
            .unwrap();
        let grab = PointerGrab::new(ffi::ButtonPressMask);

        let err = display
            .grab_pointer(window, &grab, Timestamp::CURRENT_TIME)
            .unwrap_err();
        assert!(matches!(err, Error::GrabFailed(GrabStatus::NotViewable)));

        display.map_window(window).unwrap();
        display.grab_pointer(window, &grab, Timestamp::CURRENT_TIME).unwrap();
        display.ungrab_pointer(Timestamp::CURRENT_TIME).unwrap();
    }
}
