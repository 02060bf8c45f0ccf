//! In-memory backend
//!
//! [`NullBackend`] answers every request from a model of a single-screen
//! TrueColor server with one connected client. It keeps the window tree,
//! properties, selections, GCs, pixmap contents, colormaps and input state,
//! and queues the events those changes generate for windows that selected
//! them.
//!
//! Requests are numbered like a real connection. A request the server would
//! reject raises the same protocol error, delivered through the error
//! handler or a trap, while the call itself still returns `Ok` the way
//! Xlib's queued requests do. Calls that wait for a reply fail with
//! [`Error::Status`] or [`Error::NullReturn`] as Xlib reports them.
//!
//! Nothing ever arrives from outside, so the blocking event calls fail on
//! an empty queue instead of waiting.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::ffi::CString;

use libc::{c_long, c_uint, c_ulong};

use super::check_bitmap_len;
use super::r#trait::*;
use crate::error::{self, Error, ErrorCode, ErrorEvent, ErrorHandler, IoErrorHandler, Result};
use crate::event::*;
use crate::ffi;
use crate::types::*;
use crate::wrappers::*;

mod atoms;
mod catalog;
mod icccm;
mod input;
mod keymap;
mod paint;
mod raster;
mod tree;

use catalog::FontFace;
use keymap::{Keymap, MAX_KEYCODE, MIN_KEYCODE};
use paint::{apply_gc_values, initial_gc, new_pixmap_image};
use raster::GcState;
use tree::WindowState;

/// Outcome of a request on the server side: the error code and bad
/// resource or value it would report
type Checked<T> = std::result::Result<T, (ErrorCode, ffi::XID)>;

const ROOT: Window = Window(0x100);
const DEFAULT_COLORMAP: Colormap = Colormap(0x20);
const ROOT_VISUAL: VisualId = VisualId(0x21);
const DEFAULT_FONT: Font = Font(0x22);
const DEFAULT_GCONTEXT: GContext = GContext(0x23);
const DEFAULT_GC: Gc = Gc(1);
/// First id handed to the client
const RESOURCE_BASE: ffi::XID = 0x0040_0000;

const ROOT_DEPTH: u32 = 24;
/// Supported depths, the root depth first
const DEPTHS: [u32; 7] = [ROOT_DEPTH, 1, 4, 8, 15, 16, 32];
const SCREEN_WIDTH: u32 = 1920;
const SCREEN_HEIGHT: u32 = 1080;
const SCREEN_WIDTH_MM: u32 = 508;
const SCREEN_HEIGHT_MM: u32 = 285;
const WHITE_PIXEL: c_ulong = 0xff_ffff;
const BLACK_PIXEL: c_ulong = 0;

const VENDOR: &str = "xlibwrap null server";
const MAX_REQUEST_SIZE: usize = 65535;
const EXTENSIONS: [&str; 2] = ["BIG-REQUESTS", "XC-MISC"];
/// Depth, bits per pixel and scanline pad
const PIXMAP_FORMATS: [(i32, i32, i32); 7] =
    [(1, 1, 32), (4, 8, 32), (8, 8, 32), (15, 16, 32), (16, 16, 32), (24, 32, 32), (32, 32, 32)];
const DEFAULT_FONT_PATH: &str = "built-ins";
const MAX_CURSOR_SIZE: u32 = 64;

/// A passive button or key grab. `detail` is the button or keycode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PassiveGrab {
    window: Window,
    detail: u32,
    modifiers: c_uint,
}

/// Reject strings Xlib would have to pass as C strings
fn c_string(text: &str) -> Result<()> {
    CString::new(text)?;
    Ok(())
}

/// The pixel and rounded components a TrueColor visual gives a color
fn true_color(color: &Color) -> Color {
    let (r, g, b) = (color.red() >> 8, color.green() >> 8, color.blue() >> 8);
    let mut out = Color::rgb(r * 0x101, g * 0x101, b * 0x101);
    out.set_pixel(c_ulong::from(r) << 16 | c_ulong::from(g) << 8 | c_ulong::from(b));
    out
}

fn pixel_color(pixel: c_ulong) -> Color {
    let channel = |shift: u32| ((pixel >> shift) & 0xff) as u16 * 0x101;
    let mut color = Color::rgb(channel(16), channel(8), channel(0));
    color.set_pixel(pixel);
    color
}

fn resolve_color(name: &str) -> Option<Color> {
    Color::parse_numeric(name).or_else(|| catalog::named_color(name))
}

fn root_visual_info() -> VisualInfo {
    let mut info = VisualInfo::default();
    info.set_visualid(ROOT_VISUAL);
    info.set_screen(0);
    info.set_depth(ROOT_DEPTH as i32);
    info.set_class(VisualClass::TrueColor);
    info.set_red_mask(0xff_0000);
    info.set_green_mask(0x00_ff00);
    info.set_blue_mask(0x00_00ff);
    info.set_colormap_size(256);
    info.set_bits_per_rgb(8);
    info
}

/// Whether `event` is one of the types `mask` selects
fn selected_by(event: &Event, mask: c_long) -> bool {
    event.event_type().is_some_and(|t| t.mask() & mask != 0)
}

/// The value of `option` for `program` in resource manager text
fn resource_value(text: &str, program: &str, option: &str) -> Option<String> {
    let entries: Vec<(&str, &str)> = text
        .lines()
        .filter(|line| !line.trim_start().starts_with('!'))
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim(), value.trim()))
        .collect();
    [
        format!("{}.{}", program, option),
        format!("{}*{}", program, option),
        format!("*{}", option),
    ]
    .iter()
    .find_map(|wanted| entries.iter().find(|(key, _)| key == wanted))
    .map(|(_, value)| value.to_string())
}

/// Server model behind a [`Display`](crate::Display) in tests
pub struct NullBackend {
    display_name: String,
    serial: Cell<u64>,
    requests: RefCell<Vec<&'static str>>,
    handler: RefCell<Option<ErrorHandler>>,
    io_handler: Option<IoErrorHandler>,
    lock_depth: Cell<u32>,
    synchronous: bool,
    next_id: ffi::XID,
    queue: VecDeque<Event>,

    windows: HashMap<Window, WindowState>,
    atoms: Vec<String>,
    /// Owner and time of the last change
    selections: HashMap<Atom, (Window, Timestamp)>,
    gcs: HashMap<usize, GcState>,
    next_gc: usize,
    pixmaps: HashMap<Pixmap, Image>,
    cursors: HashSet<Cursor>,
    fonts: HashMap<Font, FontFace>,
    font_path: Vec<String>,
    colormaps: HashSet<Colormap>,
    installed: Colormap,

    focus: (Window, RevertTo),
    pointer: (i32, i32),
    pointer_grab: Option<Window>,
    keyboard_grab: Option<Window>,
    button_grabs: Vec<PassiveGrab>,
    key_grabs: Vec<PassiveGrab>,
    keymap: Keymap,
    modifiers: ModifierKeymap,
    keyboard: KeyboardState,
    pointer_map: Vec<u8>,

    hosts: Vec<HostAddress>,
    access_control: bool,
    screen_saver: ScreenSaverSettings,
    saver_active: bool,
    close_down: CloseDownMode,
    server_grabbed: bool,
}

impl Default for NullBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl NullBackend {
    pub fn new() -> Self {
        let mut windows = HashMap::new();
        windows.insert(
            ROOT,
            WindowState::root(SCREEN_WIDTH, SCREEN_HEIGHT, ROOT_VISUAL, DEFAULT_COLORMAP),
        );
        let mut default_gc = initial_gc(ROOT_DEPTH, DEFAULT_GCONTEXT);
        default_gc.values.set_foreground(BLACK_PIXEL);
        default_gc.values.set_background(WHITE_PIXEL);
        let mut gcs = HashMap::new();
        gcs.insert(DEFAULT_GC.handle(), default_gc);

        NullBackend {
            display_name: ":0".to_string(),
            serial: Cell::new(0),
            requests: RefCell::new(Vec::new()),
            handler: RefCell::new(None),
            io_handler: None,
            lock_depth: Cell::new(0),
            synchronous: false,
            next_id: RESOURCE_BASE,
            queue: VecDeque::new(),
            windows,
            atoms: Vec::new(),
            selections: HashMap::new(),
            gcs,
            next_gc: DEFAULT_GC.handle() + 1,
            pixmaps: HashMap::new(),
            cursors: HashSet::new(),
            fonts: HashMap::new(),
            font_path: vec![DEFAULT_FONT_PATH.to_string()],
            colormaps: HashSet::from([DEFAULT_COLORMAP]),
            installed: DEFAULT_COLORMAP,
            focus: (Window::POINTER_ROOT, RevertTo::PointerRoot),
            pointer: (0, 0),
            pointer_grab: None,
            keyboard_grab: None,
            button_grabs: Vec::new(),
            key_grabs: Vec::new(),
            keymap: Keymap::new(),
            modifiers: keymap::modifier_map(),
            keyboard: input::initial_keyboard(),
            pointer_map: vec![1, 2, 3, 4, 5],
            hosts: Vec::new(),
            access_control: false,
            screen_saver: ScreenSaverSettings::default(),
            saver_active: false,
            close_down: CloseDownMode::DestroyAll,
            server_grabbed: false,
        }
    }

    /// A server whose root window carries `text` as RESOURCE_MANAGER
    pub fn with_resources(text: &str) -> Self {
        let mut backend = Self::new();
        let value = PropertyValue::string(text);
        if let Err((code, _)) = backend.put_property(ROOT, Atom::RESOURCE_MANAGER, Atom::STRING, PropMode::Replace, &value)
        {
            log::warn!("Could not store RESOURCE_MANAGER: {}", code.as_str());
        }
        backend
    }

    /// Names of the Xlib calls made so far, oldest first
    pub fn requests(&self) -> Vec<&'static str> {
        self.requests.borrow().clone()
    }

    pub fn clear_requests(&mut self) {
        self.requests.get_mut().clear();
    }

    /// Queue an event as if the server had sent it
    pub fn queue_event(&mut self, event: Event) {
        self.enqueue(event);
    }

    /// Number of `lock` calls not yet matched by `unlock`
    pub fn lock_depth(&self) -> u32 {
        self.lock_depth.get()
    }

    pub fn is_synchronous(&self) -> bool {
        self.synchronous
    }

    /// Report a lost connection to the I/O error handler
    pub fn fail_connection(&mut self) {
        log::info!("Simulating loss of connection to {}", self.display_name);
        match self.io_handler.as_mut() {
            Some(handler) => handler(),
            None => log::warn!("Connection to {} lost with no I/O error handler", self.display_name),
        }
    }

    fn record(&self, request: &'static str) {
        let serial = self.serial.get() + 1;
        self.serial.set(serial);
        log::debug!("{} (serial {})", request, serial);
        self.requests.borrow_mut().push(request);
    }

    /// Deliver the protocol error for the current request
    fn raise(&self, (code, resource): (ErrorCode, ffi::XID), opcode: u8) {
        let event = ErrorEvent::new(self.serial.get(), code as u8, opcode, 0, resource);
        error::deliver(event, self.handler.borrow_mut().as_mut());
    }

    /// A request without a reply. Rejections are raised, never returned.
    fn request(&mut self, name: &'static str, opcode: u8, apply: impl FnOnce(&mut Self) -> Checked<()>) -> Result<()> {
        self.record(name);
        if let Err(err) = apply(self) {
            self.raise(err, opcode);
        }
        Ok(())
    }

    /// A round trip. A rejection is raised and fails the call.
    fn reply<T>(&self, name: &'static str, opcode: u8, answer: impl FnOnce(&Self) -> Checked<T>) -> Result<T> {
        self.record(name);
        answer(self).map_err(|err| {
            self.raise(err, opcode);
            Error::Status { request: name }
        })
    }

    fn reply_mut<T>(
        &mut self,
        name: &'static str,
        opcode: u8,
        answer: impl FnOnce(&mut Self) -> Checked<T>,
    ) -> Result<T> {
        self.record(name);
        match answer(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.raise(err, opcode);
                Err(Error::Status { request: name })
            }
        }
    }

    fn alloc_id(&mut self) -> ffi::XID {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Server time, which advances by one per request
    fn now(&self) -> Timestamp {
        Timestamp(self.serial.get() as ffi::Time)
    }

    fn check_screen(screen: i32) -> Result<()> {
        if screen == 0 {
            Ok(())
        } else {
            Err(Error::InvalidArgument(format!("no screen {}", screen)))
        }
    }

    fn check_colormap(&self, colormap: Colormap) -> Checked<()> {
        if self.colormaps.contains(&colormap) {
            Ok(())
        } else {
            Err((ErrorCode::Colormap, colormap.0))
        }
    }

    fn check_pixel(pixel: c_ulong) -> Checked<()> {
        if pixel > WHITE_PIXEL {
            Err((ErrorCode::Value, pixel))
        } else {
            Ok(())
        }
    }

    fn font_face(&self, font: Font) -> FontFace {
        self.fonts.get(&font).copied().unwrap_or(FontFace::Fixed)
    }

    /// The font a QueryFont or QueryTextExtents id names: a font, or the
    /// font of a GContext
    fn resolve_font(&self, id: ffi::XID) -> Checked<FontFace> {
        if self.font_exists(Font(id)) {
            return Ok(self.font_face(Font(id)));
        }
        self.gcs
            .values()
            .find(|state| state.gcontext.0 == id)
            .map(|state| self.font_face(state.values.font()))
            .ok_or((ErrorCode::Font, id))
    }

    fn take_event(&mut self, matches: impl Fn(&Event) -> bool) -> Option<Event> {
        let index = self.queue.iter().position(matches)?;
        self.queue.remove(index)
    }

    fn empty_queue() -> Error {
        Error::Unsupported("blocking on an empty event queue")
    }

    /// Destination of a SendEvent naming PointerWindow or InputFocus
    fn send_target(&self, window: Window) -> Window {
        let under_pointer = self.window_at(self.pointer.0, self.pointer.1);
        match window {
            Window::NONE => under_pointer,
            Window::INPUT_FOCUS => {
                let focus = self.focus.0;
                if focus == Window::POINTER_ROOT {
                    under_pointer
                } else if self.is_inferior(under_pointer, focus) {
                    under_pointer
                } else {
                    focus
                }
            }
            window => window,
        }
    }

    fn set_bitmap_pixels(&mut self, pixmap: Pixmap, bits: &Image, foreground: c_ulong, background: c_ulong) {
        if let Some(image) = self.pixmaps.get_mut(&pixmap) {
            for y in 0..bits.height() {
                for x in 0..bits.width() {
                    let set = bits.get_pixel(x, y).unwrap_or(0) != 0;
                    image.put_pixel(x, y, if set { foreground } else { background });
                }
            }
        }
    }

    fn check_host(host: &HostAddress) -> Checked<()> {
        let len = host.address().len();
        let valid = match host.family() {
            HostFamily::Internet => len == 4,
            HostFamily::Internet6 => len == 16,
            HostFamily::DECnet | HostFamily::Chaos => len == 2,
            HostFamily::ServerInterpreted => host.address().contains(&0),
        };
        if valid {
            Ok(())
        } else {
            Err((ErrorCode::Value, len as ffi::XID))
        }
    }

    /// Send ColormapNotify to every window using `colormap`
    fn notify_colormap_users(&mut self, colormap: Colormap) {
        let users: Vec<Window> = self
            .windows
            .iter()
            .filter(|(_, state)| state.attributes.colormap() == colormap)
            .map(|(&window, _)| window)
            .collect();
        for window in users {
            self.colormap_notify(window, colormap, false);
        }
    }
}

impl Backend for NullBackend {
    fn default_screen(&self) -> i32 {
        0
    }

    fn screen_count(&self) -> i32 {
        1
    }

    fn screen_info(&self, screen: i32) -> Result<ScreenInfo> {
        Self::check_screen(screen)?;
        Ok(ScreenInfo {
            number: 0,
            root: ROOT,
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            width_mm: SCREEN_WIDTH_MM,
            height_mm: SCREEN_HEIGHT_MM,
            root_visual: ROOT_VISUAL,
            root_depth: ROOT_DEPTH,
            default_colormap: DEFAULT_COLORMAP,
            white_pixel: WHITE_PIXEL,
            black_pixel: BLACK_PIXEL,
            cells: 256,
        })
    }

    fn server_vendor(&self) -> String {
        VENDOR.to_string()
    }

    fn vendor_release(&self) -> i32 {
        1
    }

    fn protocol_version(&self) -> (i32, i32) {
        (11, 0)
    }

    fn display_string(&self) -> String {
        self.display_name.clone()
    }

    fn connection_number(&self) -> Option<i32> {
        None
    }

    fn pixmap_formats(&self) -> Result<Vec<PixmapFormat>> {
        Ok(PIXMAP_FORMATS
            .iter()
            .map(|&(depth, bpp, pad)| PixmapFormat::new(depth, bpp, pad))
            .collect())
    }

    fn depths(&self, screen: i32) -> Result<Vec<i32>> {
        Self::check_screen(screen)?;
        Ok(DEPTHS.iter().map(|&d| d as i32).collect())
    }

    fn image_byte_order(&self) -> ByteOrder {
        ByteOrder::LSBFirst
    }

    fn max_request_size(&self) -> usize {
        MAX_REQUEST_SIZE
    }

    fn list_extensions(&self) -> Result<Vec<String>> {
        self.reply("XListExtensions", ffi::X_ListExtensions, |_| {
            Ok(EXTENSIONS.iter().map(|e| e.to_string()).collect())
        })
    }

    fn query_extension(&self, name: &str) -> Result<Option<ExtensionInfo>> {
        c_string(name)?;
        self.reply("XQueryExtension", ffi::X_QueryExtension, |_| {
            Ok(EXTENSIONS.iter().position(|&e| e == name).map(|i| ExtensionInfo {
                major_opcode: 128 + i as i32,
                first_event: 0,
                first_error: 0,
            }))
        })
    }

    fn flush(&mut self) -> Result<()> {
        // Nothing goes on the wire, so no serial
        self.requests.borrow_mut().push("XFlush");
        Ok(())
    }

    fn sync(&mut self, discard: bool) -> Result<()> {
        self.record("XSync");
        if discard {
            self.queue.clear();
        }
        Ok(())
    }

    fn synchronize(&mut self, on: bool) {
        self.synchronous = on;
    }

    fn pending(&mut self) -> i32 {
        self.queue.len() as i32
    }

    fn events_queued(&mut self, _mode: QueuedMode) -> i32 {
        self.queue.len() as i32
    }

    fn lock(&self) {
        self.lock_depth.set(self.lock_depth.get() + 1);
    }

    fn unlock(&self) {
        self.lock_depth.set(self.lock_depth.get().saturating_sub(1));
    }

    fn bell(&mut self, percent: i32) -> Result<()> {
        if !(-100..=100).contains(&percent) {
            return Err(Error::InvalidArgument(format!("bell percent {}", percent)));
        }
        self.request("XBell", ffi::X_Bell, |_| Ok(()))
    }

    fn set_close_down_mode(&mut self, mode: CloseDownMode) -> Result<()> {
        self.request("XSetCloseDownMode", ffi::X_SetCloseDownMode, |s| {
            s.close_down = mode;
            Ok(())
        })
    }

    fn kill_client(&mut self, resource: ffi::XID) -> Result<()> {
        self.request("XKillClient", ffi::X_KillClient, |s| {
            if resource == ffi::AllTemporary {
                return Ok(());
            }
            let window = Window(resource);
            if s.windows.contains_key(&window) && window != ROOT {
                s.destroy_tree(window);
            } else if s.pixmaps.remove(&Pixmap(resource)).is_none()
                && !s.cursors.remove(&Cursor(resource))
                && s.fonts.remove(&Font(resource)).is_none()
                && !(resource != DEFAULT_COLORMAP.0 && s.colormaps.remove(&Colormap(resource)))
            {
                return Err((ErrorCode::Value, resource));
            }
            Ok(())
        })
    }

    fn grab_server(&mut self) -> Result<()> {
        self.request("XGrabServer", ffi::X_GrabServer, |s| {
            s.server_grabbed = true;
            Ok(())
        })
    }

    fn ungrab_server(&mut self) -> Result<()> {
        self.request("XUngrabServer", ffi::X_UngrabServer, |s| {
            s.server_grabbed = false;
            Ok(())
        })
    }

    fn no_op(&mut self) -> Result<()> {
        self.request("XNoOp", ffi::X_NoOperation, |_| Ok(()))
    }

    fn error_text(&self, code: u8) -> String {
        match ErrorCode::from_u8(code) {
            Some(code) => code.as_str().to_string(),
            None => code.to_string(),
        }
    }

    fn set_error_handler(&mut self, handler: Option<ErrorHandler>) {
        *self.handler.get_mut() = handler;
    }

    fn set_io_error_handler(&mut self, handler: Option<IoErrorHandler>) {
        self.io_handler = handler;
    }

    fn resource_manager_string(&self) -> Option<String> {
        self.windows
            .get(&ROOT)
            .and_then(|root| root.property(Atom::RESOURCE_MANAGER))
            .and_then(|p| p.as_string())
    }

    fn get_default(&self, program: &str, option: &str) -> Result<Option<String>> {
        c_string(program)?;
        c_string(option)?;
        Ok(self
            .resource_manager_string()
            .and_then(|text| resource_value(&text, program, option)))
    }

    fn next_request(&self) -> u64 {
        self.serial.get() + 1
    }

    fn last_known_request_processed(&self) -> u64 {
        self.serial.get()
    }

    // Windows

    fn create_window(&mut self, params: &WindowParams) -> Result<Window> {
        let window = Window(self.alloc_id());
        self.request("XCreateWindow", ffi::X_CreateWindow, |s| s.create(window, params))?;
        Ok(window)
    }

    fn destroy_window(&mut self, window: Window) -> Result<()> {
        self.request("XDestroyWindow", ffi::X_DestroyWindow, |s| {
            s.window_ref(window)?;
            if window != ROOT {
                s.destroy_tree(window);
            }
            Ok(())
        })
    }

    fn destroy_subwindows(&mut self, window: Window) -> Result<()> {
        self.request("XDestroySubwindows", ffi::X_DestroySubwindows, |s| {
            let children = s.window_ref(window)?.children.clone();
            for child in children.into_iter().rev() {
                s.destroy_tree(child);
            }
            Ok(())
        })
    }

    fn map_window(&mut self, window: Window) -> Result<()> {
        self.request("XMapWindow", ffi::X_MapWindow, |s| {
            s.window_ref(window)?;
            s.map_one(window);
            Ok(())
        })
    }

    fn map_subwindows(&mut self, window: Window) -> Result<()> {
        self.request("XMapSubwindows", ffi::X_MapSubwindows, |s| {
            let children = s.window_ref(window)?.children.clone();
            for child in children.into_iter().rev() {
                s.map_one(child);
            }
            Ok(())
        })
    }

    fn unmap_window(&mut self, window: Window) -> Result<()> {
        self.request("XUnmapWindow", ffi::X_UnmapWindow, |s| {
            s.window_ref(window)?;
            s.unmap_one(window);
            Ok(())
        })
    }

    fn unmap_subwindows(&mut self, window: Window) -> Result<()> {
        self.request("XUnmapSubwindows", ffi::X_UnmapSubwindows, |s| {
            let children = s.window_ref(window)?.children.clone();
            for child in children {
                s.unmap_one(child);
            }
            Ok(())
        })
    }

    fn circulate_subwindows(&mut self, window: Window, direction: Circulation) -> Result<()> {
        self.request("XCirculateSubwindows", ffi::X_CirculateWindow, |s| {
            s.circulate(window, direction)
        })
    }

    fn configure_window(&mut self, window: Window, changes: &WindowChanges) -> Result<()> {
        self.request("XConfigureWindow", ffi::X_ConfigureWindow, |s| {
            s.configure(window, changes)
        })
    }

    fn change_window_attributes(&mut self, window: Window, attributes: &SetWindowAttributes) -> Result<()> {
        self.request("XChangeWindowAttributes", ffi::X_ChangeWindowAttributes, |s| {
            s.change_attributes(window, attributes)
        })
    }

    fn get_window_attributes(&self, window: Window) -> Result<WindowAttributes> {
        self.reply("XGetWindowAttributes", ffi::X_GetWindowAttributes, |s| {
            let state = s.window_ref(window)?;
            let set = &state.attributes;
            let or = |bit: c_ulong, value: i32, default: i32| if set.is_set(bit) { value } else { default };

            let mut attrs = WindowAttributes::default();
            attrs.set_x(state.x);
            attrs.set_y(state.y);
            attrs.set_width(state.width as i32);
            attrs.set_height(state.height as i32);
            attrs.set_border_width(state.border_width as i32);
            attrs.set_depth(state.depth as i32);
            attrs.set_root(ROOT);
            attrs.set_class(state.class);
            attrs.set_visual_id(state.visual);
            attrs.set_bit_gravity(or(ffi::CWBitGravity, set.bit_gravity(), ffi::ForgetGravity));
            attrs.set_win_gravity(or(ffi::CWWinGravity, set.win_gravity(), ffi::NorthWestGravity));
            attrs.set_backing_store(or(ffi::CWBackingStore, set.backing_store(), ffi::NotUseful));
            attrs.set_backing_planes(if set.is_set(ffi::CWBackingPlanes) {
                set.backing_planes()
            } else {
                ffi::AllPlanes
            });
            attrs.set_backing_pixel(set.backing_pixel());
            attrs.set_save_under(set.save_under());
            attrs.set_override_redirect(set.override_redirect());
            attrs.set_your_event_mask(state.event_mask());
            attrs.set_all_event_masks(state.event_mask());
            attrs.set_do_not_propagate_mask(set.do_not_propagate_mask());

            let colormap = if state.class == WindowClass::InputOnly {
                Colormap::NONE
            } else {
                set.colormap()
            };
            attrs.set_colormap(colormap);
            attrs.set_map_installed(!colormap.is_none() && colormap == s.installed);
            attrs.set_map_state(if !state.mapped {
                ffi::IsUnmapped
            } else if s.viewable(window) {
                ffi::IsViewable
            } else {
                ffi::IsUnviewable
            });
            Ok(attrs)
        })
    }

    fn get_geometry(&self, drawable: Drawable) -> Result<Geometry> {
        self.reply("XGetGeometry", ffi::X_GetGeometry, |s| {
            if let Some(image) = s.pixmaps.get(&Pixmap(drawable.0)) {
                return Ok(Geometry {
                    root: ROOT,
                    x: 0,
                    y: 0,
                    width: image.width(),
                    height: image.height(),
                    border_width: 0,
                    depth: image.depth(),
                });
            }
            let state = s
                .windows
                .get(&Window(drawable.0))
                .ok_or((ErrorCode::Drawable, drawable.0))?;
            Ok(Geometry {
                root: ROOT,
                x: state.x,
                y: state.y,
                width: state.width,
                height: state.height,
                border_width: state.border_width,
                depth: state.depth,
            })
        })
    }

    fn query_tree(&self, window: Window) -> Result<QueryTree> {
        self.reply("XQueryTree", ffi::X_QueryTree, |s| {
            let state = s.window_ref(window)?;
            Ok(QueryTree {
                root: ROOT,
                parent: state.parent,
                children: state.children.clone(),
            })
        })
    }

    fn reparent_window(&mut self, window: Window, parent: Window, x: i32, y: i32) -> Result<()> {
        self.request("XReparentWindow", ffi::X_ReparentWindow, |s| {
            s.reparent(window, parent, x, y)
        })
    }

    fn translate_coordinates(&self, src: Window, dst: Window, x: i32, y: i32) -> Result<TranslatedCoordinates> {
        self.reply("XTranslateCoordinates", ffi::X_TranslateCoords, |s| {
            s.window_ref(src)?;
            s.window_ref(dst)?;
            let (sx, sy) = s.origin(src);
            let (dx, dy) = s.origin(dst);
            let (x, y) = (x + sx - dx, y + sy - dy);
            Ok(TranslatedCoordinates {
                same_screen: true,
                x,
                y,
                child: s.child_at(dst, x, y),
            })
        })
    }

    fn clear_area(&mut self, window: Window, x: i32, y: i32, width: u32, height: u32, exposures: bool) -> Result<()> {
        self.request("XClearArea", ffi::X_ClearArea, |s| {
            let state = s.window_ref(window)?;
            if state.class == WindowClass::InputOnly {
                return Err((ErrorCode::Match, window.0));
            }
            let extent = |size: u32, from: i32, total: u32| {
                if size == 0 {
                    total as i32 - from
                } else {
                    size as i32
                }
            };
            let w = extent(width, x, state.width);
            let h = extent(height, y, state.height);
            if exposures && w > 0 && h > 0 && s.viewable(window) {
                let event = tree::expose_event(window, x, y, w as u32, h as u32);
                s.notify(window, ffi::ExposureMask, event);
            }
            Ok(())
        })
    }

    fn iconify_window(&mut self, window: Window, screen: i32) -> Result<()> {
        Self::check_screen(screen)?;
        let change_state = self.intern_atom("WM_CHANGE_STATE", false)?;
        let mut message = ClientMessageEvent::default();
        message.set_window(window);
        message.set_message_type(change_state);
        message.set_format(32);
        message.set_data_l([c_long::from(ffi::IconicState), 0, 0, 0, 0]);
        self.send_event(
            ROOT,
            false,
            ffi::SubstructureRedirectMask | ffi::SubstructureNotifyMask,
            &Event::ClientMessage(message),
        )
    }

    fn withdraw_window(&mut self, window: Window, screen: i32) -> Result<()> {
        Self::check_screen(screen)?;
        self.unmap_window(window)?;
        let mut unmap = UnmapEvent::default();
        unmap.set_event(ROOT);
        unmap.set_window(window);
        self.send_event(
            ROOT,
            false,
            ffi::SubstructureRedirectMask | ffi::SubstructureNotifyMask,
            &Event::UnmapNotify(unmap),
        )
    }

    fn add_to_save_set(&mut self, window: Window) -> Result<()> {
        // Every window belongs to the one client, which may not save its own
        self.request("XAddToSaveSet", ffi::X_ChangeSaveSet, |s| {
            s.window_ref(window)?;
            Err((ErrorCode::Match, window.0))
        })
    }

    fn remove_from_save_set(&mut self, window: Window) -> Result<()> {
        self.request("XRemoveFromSaveSet", ffi::X_ChangeSaveSet, |s| {
            s.window_ref(window)?;
            Err((ErrorCode::Match, window.0))
        })
    }

    // Atoms and properties

    fn intern_atom(&mut self, name: &str, only_if_exists: bool) -> Result<Atom> {
        c_string(name)?;
        self.record("XInternAtom");
        Ok(self.intern(name, only_if_exists))
    }

    fn get_atom_name(&self, atom: Atom) -> Result<String> {
        self.reply("XGetAtomName", ffi::X_GetAtomName, |s| {
            s.atom_name(atom).ok_or((ErrorCode::Atom, atom.0))
        })
        .map_err(|_| Error::NullReturn("XGetAtomName"))
    }

    fn change_property(
        &mut self,
        window: Window,
        property: Atom,
        type_: Atom,
        mode: PropMode,
        value: &PropertyValue,
    ) -> Result<()> {
        self.request("XChangeProperty", ffi::X_ChangeProperty, |s| {
            s.put_property(window, property, type_, mode, value)
        })
    }

    fn get_property(
        &mut self,
        window: Window,
        property: Atom,
        offset: i64,
        length: i64,
        delete: bool,
        req_type: Atom,
    ) -> Result<Option<Property>> {
        self.reply_mut("XGetWindowProperty", ffi::X_GetProperty, |s| {
            s.read_property(window, property, offset, length, delete, req_type)
        })
    }

    fn delete_property(&mut self, window: Window, property: Atom) -> Result<()> {
        self.request("XDeleteProperty", ffi::X_DeleteProperty, |s| {
            s.remove_property(window, property)
        })
    }

    fn list_properties(&self, window: Window) -> Result<Vec<Atom>> {
        self.reply("XListProperties", ffi::X_ListProperties, |s| s.property_names(window))
    }

    fn store_name(&mut self, window: Window, name: &str) -> Result<()> {
        c_string(name)?;
        self.request("XStoreName", ffi::X_ChangeProperty, |s| {
            s.put_property(window, Atom::WM_NAME, Atom::STRING, PropMode::Replace, &PropertyValue::string(name))
        })
    }

    fn fetch_name(&mut self, window: Window) -> Result<Option<String>> {
        Ok(self
            .whole_property("XFetchName", window, Atom::WM_NAME, Atom::STRING)
            .and_then(|p| p.as_string()))
    }

    fn set_icon_name(&mut self, window: Window, name: &str) -> Result<()> {
        c_string(name)?;
        self.request("XSetIconName", ffi::X_ChangeProperty, |s| {
            s.put_property(window, Atom::WM_ICON_NAME, Atom::STRING, PropMode::Replace, &PropertyValue::string(name))
        })
    }

    fn get_icon_name(&mut self, window: Window) -> Result<Option<String>> {
        Ok(self
            .whole_property("XGetIconName", window, Atom::WM_ICON_NAME, Atom::STRING)
            .and_then(|p| p.as_string()))
    }

    fn set_wm_protocols(&mut self, window: Window, protocols: &[Atom]) -> Result<()> {
        let wm_protocols = self.intern_atom("WM_PROTOCOLS", false)?;
        self.request("XSetWMProtocols", ffi::X_ChangeProperty, |s| {
            s.put_property(window, wm_protocols, Atom::ATOM, PropMode::Replace, &PropertyValue::atoms(protocols))
        })
    }

    fn get_wm_protocols(&mut self, window: Window) -> Result<Vec<Atom>> {
        let wm_protocols = self.intern_atom("WM_PROTOCOLS", false)?;
        Ok(self
            .whole_property("XGetWMProtocols", window, wm_protocols, Atom::ATOM)
            .and_then(|p| p.as_atoms())
            .unwrap_or_default())
    }

    fn set_wm_hints(&mut self, window: Window, hints: &WmHints) -> Result<()> {
        self.request("XSetWMHints", ffi::X_ChangeProperty, |s| {
            s.put_property(window, Atom::WM_HINTS, Atom::WM_HINTS, PropMode::Replace, &icccm::encode_wm_hints(hints))
        })
    }

    fn get_wm_hints(&mut self, window: Window) -> Result<Option<WmHints>> {
        Ok(self
            .whole_property("XGetWMHints", window, Atom::WM_HINTS, Atom::WM_HINTS)
            .and_then(|p| p.as_cardinals().and_then(icccm::decode_wm_hints)))
    }

    fn set_wm_normal_hints(&mut self, window: Window, hints: &SizeHints) -> Result<()> {
        self.request("XSetWMNormalHints", ffi::X_ChangeProperty, |s| {
            s.put_property(
                window,
                Atom::WM_NORMAL_HINTS,
                Atom::WM_SIZE_HINTS,
                PropMode::Replace,
                &icccm::encode_size_hints(hints),
            )
        })
    }

    fn get_wm_normal_hints(&mut self, window: Window) -> Result<Option<SizeHints>> {
        Ok(self
            .whole_property("XGetWMNormalHints", window, Atom::WM_NORMAL_HINTS, Atom::WM_SIZE_HINTS)
            .and_then(|p| p.as_cardinals().and_then(icccm::decode_size_hints)))
    }

    fn set_class_hint(&mut self, window: Window, hint: &ClassHint) -> Result<()> {
        c_string(&hint.res_name)?;
        c_string(&hint.res_class)?;
        self.request("XSetClassHint", ffi::X_ChangeProperty, |s| {
            let value = PropertyValue::Format8(hint.to_property());
            s.put_property(window, Atom::WM_CLASS, Atom::STRING, PropMode::Replace, &value)
        })
    }

    fn get_class_hint(&mut self, window: Window) -> Result<Option<ClassHint>> {
        Ok(self
            .whole_property("XGetClassHint", window, Atom::WM_CLASS, Atom::STRING)
            .and_then(|p| match &p.value {
                PropertyValue::Format8(bytes) => ClassHint::from_property(bytes),
                _ => None,
            }))
    }

    fn set_transient_for_hint(&mut self, window: Window, owner: Window) -> Result<()> {
        self.request("XSetTransientForHint", ffi::X_ChangeProperty, |s| {
            let value = PropertyValue::windows(&[owner]);
            s.put_property(window, Atom::WM_TRANSIENT_FOR, Atom::WINDOW, PropMode::Replace, &value)
        })
    }

    fn get_transient_for_hint(&mut self, window: Window) -> Result<Option<Window>> {
        Ok(self
            .whole_property("XGetTransientForHint", window, Atom::WM_TRANSIENT_FOR, Atom::WINDOW)
            .and_then(|p| p.as_windows())
            .and_then(|windows| windows.first().copied()))
    }

    fn set_command(&mut self, window: Window, argv: &[&str]) -> Result<()> {
        for arg in argv {
            c_string(arg)?;
        }
        self.request("XSetCommand", ffi::X_ChangeProperty, |s| {
            s.put_property(window, Atom::WM_COMMAND, Atom::STRING, PropMode::Replace, &icccm::encode_command(argv))
        })
    }

    fn get_command(&mut self, window: Window) -> Result<Vec<String>> {
        Ok(self
            .whole_property("XGetCommand", window, Atom::WM_COMMAND, Atom::STRING)
            .and_then(|p| p.as_strings())
            .unwrap_or_default())
    }

    fn set_icon_sizes(&mut self, window: Window, sizes: &[IconSize]) -> Result<()> {
        self.request("XSetIconSizes", ffi::X_ChangeProperty, |s| {
            let value = icccm::encode_icon_sizes(sizes);
            s.put_property(window, Atom::WM_ICON_SIZE, Atom::WM_ICON_SIZE, PropMode::Replace, &value)
        })
    }

    fn get_icon_sizes(&mut self, window: Window) -> Result<Vec<IconSize>> {
        Ok(self
            .whole_property("XGetIconSizes", window, Atom::WM_ICON_SIZE, Atom::WM_ICON_SIZE)
            .and_then(|p| p.as_cardinals().map(icccm::decode_icon_sizes))
            .unwrap_or_default())
    }

    // Selections

    fn set_selection_owner(&mut self, selection: Atom, owner: Window, time: Timestamp) -> Result<()> {
        self.request("XSetSelectionOwner", ffi::X_SetSelectionOwner, |s| {
            s.set_owner(selection, owner, time)
        })
    }

    fn get_selection_owner(&self, selection: Atom) -> Result<Window> {
        self.reply("XGetSelectionOwner", ffi::X_GetSelectionOwner, |s| s.owner(selection))
    }

    fn convert_selection(
        &mut self,
        selection: Atom,
        target: Atom,
        property: Atom,
        requestor: Window,
        time: Timestamp,
    ) -> Result<()> {
        self.request("XConvertSelection", ffi::X_ConvertSelection, |s| {
            s.convert(selection, target, property, requestor, time)
        })
    }

    // Events

    fn next_event(&mut self) -> Result<Event> {
        self.queue.pop_front().ok_or_else(Self::empty_queue)
    }

    fn peek_event(&mut self) -> Result<Event> {
        self.queue.front().copied().ok_or_else(Self::empty_queue)
    }

    fn window_event(&mut self, window: Window, mask: c_long) -> Result<Event> {
        self.check_window_event(window, mask).ok_or_else(Self::empty_queue)
    }

    fn mask_event(&mut self, mask: c_long) -> Result<Event> {
        self.check_mask_event(mask).ok_or_else(Self::empty_queue)
    }

    fn check_window_event(&mut self, window: Window, mask: c_long) -> Option<Event> {
        self.take_event(|e| e.window() == Some(window) && selected_by(e, mask))
    }

    fn check_mask_event(&mut self, mask: c_long) -> Option<Event> {
        self.take_event(|e| selected_by(e, mask))
    }

    fn check_typed_event(&mut self, kind: EventType) -> Option<Event> {
        self.take_event(|e| e.event_type() == Some(kind))
    }

    fn check_typed_window_event(&mut self, window: Window, kind: EventType) -> Option<Event> {
        self.take_event(|e| e.window() == Some(window) && e.event_type() == Some(kind))
    }

    fn put_back_event(&mut self, event: &Event) -> Result<()> {
        self.queue.push_front(*event);
        Ok(())
    }

    fn send_event(&mut self, window: Window, propagate: bool, mask: c_long, event: &Event) -> Result<()> {
        if matches!(event, Event::Generic(_) | Event::Other(_)) {
            return Err(Error::Status { request: "XSendEvent" });
        }
        self.request("XSendEvent", ffi::X_SendEvent, |s| {
            let target = s.send_target(window);
            if target.is_none() {
                return Ok(());
            }
            s.window_ref(target)?;
            let event = event.with_header(s.serial.get(), true);

            let mut current = target;
            let delivered = loop {
                if mask == 0 || s.selects(current, mask) {
                    break true;
                }
                let Some(state) = s.windows.get(&current) else {
                    break false;
                };
                let blocked = state.attributes.is_set(ffi::CWDontPropagate)
                    && state.attributes.do_not_propagate_mask() & mask != 0;
                if !propagate || blocked || state.parent.is_none() || current == s.focus.0 {
                    break false;
                }
                current = state.parent;
            };
            if delivered {
                s.queue.push_back(event);
            }
            Ok(())
        })
    }

    fn allow_events(&mut self, _mode: AllowEvents, _time: Timestamp) -> Result<()> {
        self.request("XAllowEvents", ffi::X_AllowEvents, |_| Ok(()))
    }

    // Input

    fn grab_pointer(&mut self, window: Window, grab: &PointerGrab, _time: Timestamp) -> Result<GrabStatus> {
        self.reply_mut("XGrabPointer", ffi::X_GrabPointer, |s| {
            let status = s.grab_status(window, grab.confine_to, grab.cursor)?;
            if status == GrabStatus::Success {
                s.pointer_grab = Some(window);
            }
            Ok(status)
        })
    }

    fn ungrab_pointer(&mut self, _time: Timestamp) -> Result<()> {
        self.request("XUngrabPointer", ffi::X_UngrabPointer, |s| {
            s.pointer_grab = None;
            Ok(())
        })
    }

    fn grab_keyboard(
        &mut self,
        window: Window,
        _owner_events: bool,
        _pointer_mode: GrabMode,
        _keyboard_mode: GrabMode,
        _time: Timestamp,
    ) -> Result<GrabStatus> {
        self.reply_mut("XGrabKeyboard", ffi::X_GrabKeyboard, |s| {
            let status = s.grab_status(window, Window::NONE, Cursor::NONE)?;
            if status == GrabStatus::Success {
                s.keyboard_grab = Some(window);
            }
            Ok(status)
        })
    }

    fn ungrab_keyboard(&mut self, _time: Timestamp) -> Result<()> {
        self.request("XUngrabKeyboard", ffi::X_UngrabKeyboard, |s| {
            s.keyboard_grab = None;
            Ok(())
        })
    }

    fn grab_button(&mut self, button: Button, modifiers: c_uint, window: Window, grab: &PointerGrab) -> Result<()> {
        self.request("XGrabButton", ffi::X_GrabButton, |s| {
            s.grab_status(window, grab.confine_to, grab.cursor)?;
            let grab = PassiveGrab {
                window,
                detail: button.get(),
                modifiers,
            };
            Self::add_grab(&mut s.button_grabs, grab);
            Ok(())
        })
    }

    fn ungrab_button(&mut self, button: Button, modifiers: c_uint, window: Window) -> Result<()> {
        self.request("XUngrabButton", ffi::X_UngrabButton, |s| {
            s.window_ref(window)?;
            let pattern = PassiveGrab {
                window,
                detail: button.get(),
                modifiers,
            };
            Self::remove_grabs(&mut s.button_grabs, pattern);
            Ok(())
        })
    }

    fn grab_key(
        &mut self,
        key: KeyCode,
        modifiers: c_uint,
        window: Window,
        _owner_events: bool,
        _pointer_mode: GrabMode,
        _keyboard_mode: GrabMode,
    ) -> Result<()> {
        self.request("XGrabKey", ffi::X_GrabKey, |s| {
            s.window_ref(window)?;
            s.check_keycode(key)?;
            let grab = PassiveGrab {
                window,
                detail: u32::from(key.0),
                modifiers,
            };
            Self::add_grab(&mut s.key_grabs, grab);
            Ok(())
        })
    }

    fn ungrab_key(&mut self, key: KeyCode, modifiers: c_uint, window: Window) -> Result<()> {
        self.request("XUngrabKey", ffi::X_UngrabKey, |s| {
            s.window_ref(window)?;
            s.check_keycode(key)?;
            let pattern = PassiveGrab {
                window,
                detail: u32::from(key.0),
                modifiers,
            };
            Self::remove_grabs(&mut s.key_grabs, pattern);
            Ok(())
        })
    }

    fn query_pointer(&self, window: Window) -> Result<PointerState> {
        self.reply("XQueryPointer", ffi::X_QueryPointer, |s| {
            s.window_ref(window)?;
            let (root_x, root_y) = s.pointer;
            let (ox, oy) = s.origin(window);
            let (win_x, win_y) = (root_x - ox, root_y - oy);
            Ok(PointerState {
                same_screen: true,
                root: ROOT,
                child: s.child_at(window, win_x, win_y),
                root_x,
                root_y,
                win_x,
                win_y,
                mask: 0,
            })
        })
    }

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
    ) -> Result<()> {
        self.request("XWarpPointer", ffi::X_WarpPointer, |s| {
            if !dst.is_none() {
                s.window_ref(dst)?;
            }
            if !src.is_none() {
                let state = s.window_ref(src)?;
                let w = if src_width == 0 { state.width as i32 - src_x } else { src_width as i32 };
                let h = if src_height == 0 { state.height as i32 - src_y } else { src_height as i32 };
                let (ox, oy) = s.origin(src);
                let (px, py) = (s.pointer.0 - ox, s.pointer.1 - oy);
                let inside = px >= src_x && py >= src_y && px < src_x + w && py < src_y + h;
                if !inside {
                    return Ok(());
                }
            }
            let (x, y) = if dst.is_none() {
                (s.pointer.0 + dst_x, s.pointer.1 + dst_y)
            } else {
                let (ox, oy) = s.origin(dst);
                (ox + dst_x, oy + dst_y)
            };
            s.move_pointer(x, y);
            Ok(())
        })
    }

    fn set_input_focus(&mut self, window: Window, revert_to: RevertTo, _time: Timestamp) -> Result<()> {
        self.request("XSetInputFocus", ffi::X_SetInputFocus, |s| {
            if !window.is_none() && window != Window::POINTER_ROOT {
                s.window_ref(window)?;
                if !s.viewable(window) {
                    return Err((ErrorCode::Match, window.0));
                }
            }
            s.set_focus(window, revert_to);
            Ok(())
        })
    }

    fn get_input_focus(&self) -> Result<(Window, RevertTo)> {
        self.reply("XGetInputFocus", ffi::X_GetInputFocus, |s| Ok(s.focus))
    }

    // Keyboard

    fn keysym_to_keycode(&self, sym: KeySym) -> Option<KeyCode> {
        self.keymap.keycode(sym)
    }

    fn keycode_to_keysym(&self, key: KeyCode, index: i32) -> Option<KeySym> {
        usize::try_from(index).ok().and_then(|i| self.keymap.keysym(key, i))
    }

    fn display_keycodes(&self) -> (KeyCode, KeyCode) {
        (KeyCode(MIN_KEYCODE), KeyCode(MAX_KEYCODE))
    }

    fn get_keyboard_mapping(&self, first: KeyCode, count: u32) -> Result<KeyboardMapping> {
        if count == 0 {
            return Err(Error::InvalidArgument("keycode count must be positive".into()));
        }
        self.reply("XGetKeyboardMapping", ffi::X_GetKeyboardMapping, |s| {
            let last = u64::from(first.0) + u64::from(count) - 1;
            if first.0 < MIN_KEYCODE || last > u64::from(MAX_KEYCODE) {
                return Err((ErrorCode::Value, ffi::XID::from(first.0)));
            }
            Ok(s.keymap.mapping(first, count))
        })
        .map_err(|_| Error::NullReturn("XGetKeyboardMapping"))
    }

    fn get_modifier_mapping(&self) -> Result<ModifierKeymap> {
        self.reply("XGetModifierMapping", ffi::X_GetModifierMapping, |s| Ok(s.modifiers.clone()))
    }

    fn query_keymap(&self) -> Result<[u8; 32]> {
        self.reply("XQueryKeymap", ffi::X_QueryKeymap, |_| Ok([0; 32]))
    }

    fn get_keyboard_control(&self) -> Result<KeyboardState> {
        self.reply("XGetKeyboardControl", ffi::X_GetKeyboardControl, |s| Ok(s.keyboard))
    }

    fn change_keyboard_control(&mut self, control: &KeyboardControl) -> Result<()> {
        self.request("XChangeKeyboardControl", ffi::X_ChangeKeyboardControl, |s| {
            s.keyboard_control(control)
        })
    }

    fn set_auto_repeat(&mut self, on: bool) -> Result<()> {
        let mode = if on {
            ffi::AutoRepeatModeOn
        } else {
            ffi::AutoRepeatModeOff
        };
        self.change_keyboard_control(&KeyboardControl::new().with_auto_repeat_mode(mode))
    }

    fn get_pointer_mapping(&self) -> Result<Vec<u8>> {
        self.reply("XGetPointerMapping", ffi::X_GetPointerMapping, |s| Ok(s.pointer_map.clone()))
    }

    fn lookup_string(&self, event: &KeyEvent) -> LookedUpKey {
        self.keymap.lookup(event.keycode(), event.state())
    }

    // Graphics contexts

    fn create_gc(&mut self, drawable: Drawable, values: &GcValues) -> Result<Gc> {
        let gc = Gc(self.next_gc);
        self.next_gc += 1;
        let gcontext = GContext(self.alloc_id());
        self.request("XCreateGC", ffi::X_CreateGC, |s| {
            let depth = s.drawable_depth(drawable)?;
            s.check_gc_values(depth, values)?;
            let mut state = initial_gc(depth, gcontext);
            apply_gc_values(&mut state, values);
            s.gcs.insert(gc.handle(), state);
            Ok(())
        })?;
        Ok(gc)
    }

    fn default_gc(&self, _screen: i32) -> Gc {
        DEFAULT_GC
    }

    fn change_gc(&mut self, gc: Gc, values: &GcValues) -> Result<()> {
        self.request("XChangeGC", ffi::X_ChangeGC, |s| {
            let depth = s.gc_ref(gc)?.depth;
            s.check_gc_values(depth, values)?;
            apply_gc_values(s.gc_mut(gc)?, values);
            Ok(())
        })
    }

    fn get_gc_values(&self, gc: Gc, mask: c_ulong) -> Result<GcValues> {
        // Xlib answers from its GC cache, which holds no clip or dash list
        if mask & (ffi::GCClipMask | ffi::GCDashList) != 0 {
            return Err(Error::Status { request: "XGetGCValues" });
        }
        self.gcs
            .get(&gc.handle())
            .map(|state| state.values.restricted(mask))
            .ok_or(Error::Status { request: "XGetGCValues" })
    }

    fn copy_gc(&mut self, src: Gc, mask: c_ulong, dst: Gc) -> Result<()> {
        self.request("XCopyGC", ffi::X_CopyGC, |s| {
            let source = s.gc_ref(src)?.clone();
            let target = s.gc_mut(dst)?;
            if source.depth != target.depth {
                return Err((ErrorCode::Match, target.gcontext.0));
            }
            target.values.merge(&source.values.restricted(mask));
            if mask & ffi::GCClipMask != 0 {
                target.clip = source.clip;
            }
            if mask & ffi::GCDashList != 0 {
                target.dashes = source.dashes;
            }
            Ok(())
        })
    }

    fn free_gc(&mut self, gc: Gc) -> Result<()> {
        self.request("XFreeGC", ffi::X_FreeGC, |s| {
            if gc == DEFAULT_GC {
                return Ok(());
            }
            s.gcs
                .remove(&gc.handle())
                .map(drop)
                .ok_or((ErrorCode::GContext, gc.handle() as ffi::XID))
        })
    }

    fn gcontext_from_gc(&self, gc: Gc) -> GContext {
        self.gcs
            .get(&gc.handle())
            .map_or(GContext::NONE, |state| state.gcontext)
    }

    fn set_dashes(&mut self, gc: Gc, offset: i32, dashes: &[u8]) -> Result<()> {
        if dashes.is_empty() || dashes.contains(&0) {
            return Err(Error::InvalidArgument("dash lengths must be non-zero".into()));
        }
        self.request("XSetDashes", ffi::X_SetDashes, |s| {
            let state = s.gc_mut(gc)?;
            state.values.set_dash_offset(offset);
            state.dashes = dashes.to_vec();
            Ok(())
        })
    }

    fn set_clip_rectangles(
        &mut self,
        gc: Gc,
        x: i32,
        y: i32,
        rectangles: &[Rectangle],
        _ordering: ClipOrdering,
    ) -> Result<()> {
        self.request("XSetClipRectangles", ffi::X_SetClipRectangles, |s| {
            let state = s.gc_mut(gc)?;
            state.values.set_clip_x_origin(x);
            state.values.set_clip_y_origin(y);
            state.clip = raster::Clip::Rectangles(rectangles.to_vec());
            Ok(())
        })
    }

    fn set_region(&mut self, gc: Gc, region: &Region) -> Result<()> {
        let bounds = region.clip_box();
        self.request("XSetRegion", ffi::X_SetClipRectangles, |s| {
            let state = s.gc_mut(gc)?;
            state.values.set_clip_x_origin(0);
            state.values.set_clip_y_origin(0);
            state.clip = raster::Clip::Rectangles(vec![bounds]);
            Ok(())
        })
    }

    // Drawing

    fn draw_points(&mut self, drawable: Drawable, gc: Gc, points: &[Point], mode: CoordMode) -> Result<()> {
        self.request("XDrawPoints", ffi::X_PolyPoint, |s| s.poly_point(drawable, gc, points, mode))
    }

    fn draw_lines(&mut self, drawable: Drawable, gc: Gc, points: &[Point], mode: CoordMode) -> Result<()> {
        self.request("XDrawLines", ffi::X_PolyLine, |s| s.poly_line(drawable, gc, points, mode))
    }

    fn draw_segments(&mut self, drawable: Drawable, gc: Gc, segments: &[Segment]) -> Result<()> {
        self.request("XDrawSegments", ffi::X_PolySegment, |s| s.poly_segment(drawable, gc, segments))
    }

    fn draw_rectangles(&mut self, drawable: Drawable, gc: Gc, rectangles: &[Rectangle]) -> Result<()> {
        self.request("XDrawRectangles", ffi::X_PolyRectangle, |s| {
            s.poly_rectangle(drawable, gc, rectangles, false)
        })
    }

    fn fill_rectangles(&mut self, drawable: Drawable, gc: Gc, rectangles: &[Rectangle]) -> Result<()> {
        self.request("XFillRectangles", ffi::X_PolyFillRectangle, |s| {
            s.poly_rectangle(drawable, gc, rectangles, true)
        })
    }

    fn draw_arcs(&mut self, drawable: Drawable, gc: Gc, arcs: &[ArcSegment]) -> Result<()> {
        self.request("XDrawArcs", ffi::X_PolyArc, |s| s.poly_arc(drawable, gc, arcs, false))
    }

    fn fill_arcs(&mut self, drawable: Drawable, gc: Gc, arcs: &[ArcSegment]) -> Result<()> {
        self.request("XFillArcs", ffi::X_PolyFillArc, |s| s.poly_arc(drawable, gc, arcs, true))
    }

    fn fill_polygon(&mut self, drawable: Drawable, gc: Gc, points: &[Point], _shape: Shape, mode: CoordMode) -> Result<()> {
        self.request("XFillPolygon", ffi::X_FillPoly, |s| s.fill_poly(drawable, gc, points, mode))
    }

    fn draw_string(&mut self, drawable: Drawable, gc: Gc, _x: i32, _y: i32, _text: &[u8]) -> Result<()> {
        self.request("XDrawString", ffi::X_PolyText8, |s| {
            s.gc_font(gc)?;
            s.draw(drawable, gc, |_, _, _| {})
        })
    }

    fn draw_image_string(&mut self, drawable: Drawable, gc: Gc, x: i32, y: i32, text: &[u8]) -> Result<()> {
        self.request("XDrawImageString", ffi::X_ImageText8, |s| {
            let font = s.gc_font(gc)?;
            let info = s.font_face(font).info(font);
            s.image_text(drawable, gc, (x, y), info.text_width(text), (info.ascent, info.descent))
        })
    }

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
    ) -> Result<()> {
        self.request("XCopyArea", ffi::X_CopyArea, |s| {
            if s.drawable_depth(src)? != s.drawable_depth(dst)? {
                return Err((ErrorCode::Match, src.0));
            }
            s.copy_pixels(
                src,
                dst,
                gc,
                (src_x, src_y),
                (width, height),
                (dst_x, dst_y),
                ffi::X_CopyArea,
                |pixel, _| pixel,
            )
        })
    }

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
    ) -> Result<()> {
        if plane.count_ones() != 1 {
            return Err(Error::InvalidArgument(format!("plane 0x{:x} must be a single bit", plane)));
        }
        self.request("XCopyPlane", ffi::X_CopyPlane, |s| {
            let depth = s.drawable_depth(src)?;
            if (1 as c_ulong).checked_shl(depth).is_some_and(|limit| plane >= limit) {
                return Err((ErrorCode::Value, plane));
            }
            s.copy_pixels(
                src,
                dst,
                gc,
                (src_x, src_y),
                (width, height),
                (dst_x, dst_y),
                ffi::X_CopyPlane,
                |pixel, values| {
                    if pixel & plane != 0 {
                        values.foreground()
                    } else {
                        values.background()
                    }
                },
            )
        })
    }

    // Pixmaps and images

    fn create_pixmap(&mut self, drawable: Drawable, width: u32, height: u32, depth: u32) -> Result<Pixmap> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidArgument("pixmap size must be non-zero".into()));
        }
        let pixmap = Pixmap(self.alloc_id());
        self.request("XCreatePixmap", ffi::X_CreatePixmap, |s| {
            let exists = s.windows.contains_key(&Window(drawable.0)) || s.pixmaps.contains_key(&Pixmap(drawable.0));
            if !exists {
                return Err((ErrorCode::Drawable, drawable.0));
            }
            s.check_depth(depth)?;
            let image = new_pixmap_image(width, height, depth).ok_or((ErrorCode::Alloc, pixmap.0))?;
            s.pixmaps.insert(pixmap, image);
            Ok(())
        })?;
        Ok(pixmap)
    }

    fn free_pixmap(&mut self, pixmap: Pixmap) -> Result<()> {
        self.request("XFreePixmap", ffi::X_FreePixmap, |s| {
            s.pixmaps
                .remove(&pixmap)
                .map(drop)
                .ok_or((ErrorCode::Pixmap, pixmap.0))
        })
    }

    fn create_bitmap_from_data(&mut self, drawable: Drawable, data: &[u8], width: u32, height: u32) -> Result<Pixmap> {
        check_bitmap_len(data, width, height)?;
        let bits = Image::from_bitmap_data(width, height, data)?;
        let pixmap = self.create_pixmap(drawable, width, height, 1)?;
        self.set_bitmap_pixels(pixmap, &bits, 1, 0);
        Ok(pixmap)
    }

    fn create_pixmap_from_bitmap_data(
        &mut self,
        drawable: Drawable,
        data: &[u8],
        width: u32,
        height: u32,
        foreground: c_ulong,
        background: c_ulong,
        depth: u32,
    ) -> Result<Pixmap> {
        check_bitmap_len(data, width, height)?;
        let bits = Image::from_bitmap_data(width, height, data)?;
        let pixmap = self.create_pixmap(drawable, width, height, depth)?;
        self.set_bitmap_pixels(pixmap, &bits, foreground, background);
        Ok(pixmap)
    }

    fn get_image(
        &mut self,
        drawable: Drawable,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        plane_mask: c_ulong,
        format: ImageFormat,
    ) -> Result<Image> {
        self.reply("XGetImage", ffi::X_GetImage, |s| {
            s.read_image(drawable, (x, y), (width, height), plane_mask, format)
        })
        .map_err(|_| Error::NullReturn("XGetImage"))
    }

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
    ) -> Result<()> {
        self.request("XPutImage", ffi::X_PutImage, |s| {
            s.write_image(drawable, gc, image, (src_x, src_y), (dst_x, dst_y), (width, height))
        })
    }

    // Cursors

    fn create_font_cursor(&mut self, _shape: StandardCursor) -> Result<Cursor> {
        let cursor = Cursor(self.alloc_id());
        self.request("XCreateFontCursor", ffi::X_CreateGlyphCursor, |s| {
            s.cursors.insert(cursor);
            Ok(())
        })?;
        Ok(cursor)
    }

    fn create_pixmap_cursor(
        &mut self,
        source: Pixmap,
        mask: Pixmap,
        _foreground: &Color,
        _background: &Color,
        x: u32,
        y: u32,
    ) -> Result<Cursor> {
        let cursor = Cursor(self.alloc_id());
        self.request("XCreatePixmapCursor", ffi::X_CreateCursor, |s| {
            let image = s.pixmaps.get(&source).ok_or((ErrorCode::Pixmap, source.0))?;
            if image.depth() != 1 || x >= image.width() || y >= image.height() {
                return Err((ErrorCode::Match, source.0));
            }
            if !mask.is_none() {
                let shape = s.pixmaps.get(&mask).ok_or((ErrorCode::Pixmap, mask.0))?;
                if shape.depth() != 1 || (shape.width(), shape.height()) != (image.width(), image.height()) {
                    return Err((ErrorCode::Match, mask.0));
                }
            }
            s.cursors.insert(cursor);
            Ok(())
        })?;
        Ok(cursor)
    }

    fn create_glyph_cursor(
        &mut self,
        source_font: Font,
        mask_font: Font,
        source_char: u32,
        mask_char: u32,
        _foreground: &Color,
        _background: &Color,
    ) -> Result<Cursor> {
        let cursor = Cursor(self.alloc_id());
        self.request("XCreateGlyphCursor", ffi::X_CreateGlyphCursor, |s| {
            let glyphs = [(source_font, source_char), (mask_font, mask_char)];
            for (i, (font, ch)) in glyphs.into_iter().enumerate() {
                if i == 1 && font.is_none() {
                    continue;
                }
                if !s.font_exists(font) {
                    return Err((ErrorCode::Font, font.0));
                }
                if ch > s.font_face(font).last_char() {
                    return Err((ErrorCode::Value, ffi::XID::from(ch)));
                }
            }
            s.cursors.insert(cursor);
            Ok(())
        })?;
        Ok(cursor)
    }

    fn free_cursor(&mut self, cursor: Cursor) -> Result<()> {
        self.request("XFreeCursor", ffi::X_FreeCursor, |s| {
            if s.cursors.remove(&cursor) {
                Ok(())
            } else {
                Err((ErrorCode::Cursor, cursor.0))
            }
        })
    }

    fn recolor_cursor(&mut self, cursor: Cursor, _foreground: &Color, _background: &Color) -> Result<()> {
        self.request("XRecolorCursor", ffi::X_RecolorCursor, |s| {
            if s.cursors.contains(&cursor) {
                Ok(())
            } else {
                Err((ErrorCode::Cursor, cursor.0))
            }
        })
    }

    fn query_best_size(&self, class: BestSizeClass, drawable: Drawable, width: u32, height: u32) -> Result<(u32, u32)> {
        self.reply("XQueryBestSize", ffi::X_QueryBestSize, |s| {
            let exists = s.windows.contains_key(&Window(drawable.0)) || s.pixmaps.contains_key(&Pixmap(drawable.0));
            if !exists {
                return Err((ErrorCode::Drawable, drawable.0));
            }
            Ok(match class {
                BestSizeClass::Cursor => (width.min(MAX_CURSOR_SIZE), height.min(MAX_CURSOR_SIZE)),
                BestSizeClass::Tile | BestSizeClass::Stipple => (width.max(1), height.max(1)),
            })
        })
    }

    // Colors

    fn create_colormap(&mut self, window: Window, visual: VisualId, alloc_all: bool) -> Result<Colormap> {
        let colormap = Colormap(self.alloc_id());
        self.request("XCreateColormap", ffi::X_CreateColormap, |s| {
            s.window_ref(window)?;
            // TrueColor has no writable cells to allocate
            if visual != ROOT_VISUAL || alloc_all {
                return Err((ErrorCode::Match, visual.0));
            }
            s.colormaps.insert(colormap);
            Ok(())
        })?;
        Ok(colormap)
    }

    fn free_colormap(&mut self, colormap: Colormap) -> Result<()> {
        self.request("XFreeColormap", ffi::X_FreeColormap, |s| {
            s.check_colormap(colormap)?;
            if colormap == DEFAULT_COLORMAP {
                return Ok(());
            }
            if s.installed == colormap {
                s.installed = DEFAULT_COLORMAP;
            }
            let users: Vec<Window> = s
                .windows
                .iter()
                .filter(|(_, state)| state.attributes.colormap() == colormap)
                .map(|(&window, _)| window)
                .collect();
            for window in users {
                if let Some(state) = s.windows.get_mut(&window) {
                    state.attributes.set_colormap(Colormap::NONE);
                }
                s.colormap_notify(window, Colormap::NONE, true);
            }
            s.colormaps.remove(&colormap);
            Ok(())
        })
    }

    fn copy_colormap_and_free(&mut self, colormap: Colormap) -> Result<Colormap> {
        let copy = Colormap(self.alloc_id());
        self.request("XCopyColormapAndFree", ffi::X_CopyColormapAndFree, |s| {
            s.check_colormap(colormap)?;
            s.colormaps.insert(copy);
            Ok(())
        })?;
        Ok(copy)
    }

    fn install_colormap(&mut self, colormap: Colormap) -> Result<()> {
        self.request("XInstallColormap", ffi::X_InstallColormap, |s| {
            s.check_colormap(colormap)?;
            let previous = s.installed;
            if previous != colormap {
                s.installed = colormap;
                s.notify_colormap_users(previous);
                s.notify_colormap_users(colormap);
            }
            Ok(())
        })
    }

    fn uninstall_colormap(&mut self, colormap: Colormap) -> Result<()> {
        self.request("XUninstallColormap", ffi::X_UninstallColormap, |s| {
            s.check_colormap(colormap)?;
            if s.installed == colormap && colormap != DEFAULT_COLORMAP {
                s.installed = DEFAULT_COLORMAP;
                s.notify_colormap_users(colormap);
                s.notify_colormap_users(DEFAULT_COLORMAP);
            }
            Ok(())
        })
    }

    fn list_installed_colormaps(&self, window: Window) -> Result<Vec<Colormap>> {
        self.reply("XListInstalledColormaps", ffi::X_ListInstalledColormaps, |s| {
            s.window_ref(window)?;
            Ok(vec![s.installed])
        })
    }

    fn alloc_color(&mut self, colormap: Colormap, color: Color) -> Result<Color> {
        self.reply("XAllocColor", ffi::X_AllocColor, |s| {
            s.check_colormap(colormap)?;
            Ok(true_color(&color))
        })
    }

    fn alloc_named_color(&mut self, colormap: Colormap, name: &str) -> Result<ColorPair> {
        c_string(name)?;
        let exact = self
            .reply("XAllocNamedColor", ffi::X_AllocNamedColor, |s| {
                s.check_colormap(colormap)?;
                Ok(resolve_color(name))
            })?
            .ok_or_else(|| Error::BadName(name.to_string()))?;
        Ok(ColorPair {
            screen: true_color(&exact),
            exact,
        })
    }

    fn lookup_color(&self, colormap: Colormap, name: &str) -> Result<ColorPair> {
        c_string(name)?;
        let exact = self
            .reply("XLookupColor", ffi::X_LookupColor, |s| {
                s.check_colormap(colormap)?;
                Ok(resolve_color(name))
            })?
            .ok_or_else(|| Error::BadName(name.to_string()))?;
        Ok(ColorPair {
            screen: true_color(&exact),
            exact,
        })
    }

    fn parse_color(&self, colormap: Colormap, spec: &str) -> Result<Color> {
        c_string(spec)?;
        if let Some(color) = Color::parse_numeric(spec) {
            return Ok(color);
        }
        self.reply("XParseColor", ffi::X_LookupColor, |s| {
            s.check_colormap(colormap)?;
            Ok(catalog::named_color(spec))
        })?
        .ok_or_else(|| Error::BadName(spec.to_string()))
    }

    fn query_colors(&self, colormap: Colormap, colors: &mut [Color]) -> Result<()> {
        self.reply("XQueryColors", ffi::X_QueryColors, |s| {
            s.check_colormap(colormap)?;
            for color in colors.iter() {
                Self::check_pixel(color.pixel())?;
            }
            for color in colors.iter_mut() {
                *color = pixel_color(color.pixel());
            }
            Ok(())
        })
    }

    fn store_colors(&mut self, colormap: Colormap, colors: &[Color]) -> Result<()> {
        self.request("XStoreColors", ffi::X_StoreColors, |s| {
            s.check_colormap(colormap)?;
            // Every TrueColor cell is read-only
            match colors.first() {
                Some(color) => Err((ErrorCode::Access, color.pixel())),
                None => Ok(()),
            }
        })
    }

    fn free_colors(&mut self, colormap: Colormap, pixels: &[c_ulong], _planes: c_ulong) -> Result<()> {
        self.request("XFreeColors", ffi::X_FreeColors, |s| {
            s.check_colormap(colormap)?;
            pixels.iter().try_for_each(|&pixel| Self::check_pixel(pixel))
        })
    }

    fn get_visual_info(&self, template: &VisualTemplate) -> Result<Vec<VisualInfo>> {
        let info = root_visual_info();
        Ok(if template.matches(&info) { vec![info] } else { Vec::new() })
    }

    // Fonts

    fn load_font(&mut self, name: &str) -> Result<Font> {
        c_string(name)?;
        let font = Font(self.alloc_id());
        self.request("XLoadFont", ffi::X_OpenFont, |s| {
            let face = catalog::find_font(name).ok_or((ErrorCode::Name, 0))?;
            s.fonts.insert(font, face);
            Ok(())
        })?;
        Ok(font)
    }

    fn unload_font(&mut self, font: Font) -> Result<()> {
        self.request("XUnloadFont", ffi::X_CloseFont, |s| {
            if font == DEFAULT_FONT {
                return Ok(());
            }
            s.fonts.remove(&font).map(drop).ok_or((ErrorCode::Font, font.0))
        })
    }

    fn load_query_font(&mut self, name: &str) -> Result<FontInfo> {
        c_string(name)?;
        self.record("XLoadQueryFont");
        let face = catalog::find_font(name).ok_or_else(|| Error::BadName(name.to_string()))?;
        let font = Font(self.alloc_id());
        self.fonts.insert(font, face);
        Ok(face.info(font))
    }

    fn query_font(&mut self, font: ffi::XID) -> Result<FontInfo> {
        self.reply("XQueryFont", ffi::X_QueryFont, |s| {
            s.resolve_font(font).map(|face| face.info(Font(font)))
        })
        .map_err(|_| Error::NullReturn("XQueryFont"))
    }

    fn list_fonts(&self, pattern: &str, max_names: u32) -> Result<Vec<String>> {
        c_string(pattern)?;
        self.reply("XListFonts", ffi::X_ListFonts, |_| {
            Ok(catalog::FONT_NAMES
                .iter()
                .filter(|(name, _)| catalog::glob_match(pattern, name))
                .take(max_names as usize)
                .map(|(name, _)| name.to_string())
                .collect())
        })
    }

    fn list_fonts_with_info(&self, pattern: &str, max_names: u32) -> Result<Vec<(String, FontInfo)>> {
        c_string(pattern)?;
        self.reply("XListFontsWithInfo", ffi::X_ListFontsWithInfo, |_| {
            Ok(catalog::FONT_NAMES
                .iter()
                .filter(|(name, _)| catalog::glob_match(pattern, name))
                .take(max_names as usize)
                .map(|&(name, face)| (name.to_string(), face.info(Font::NONE)))
                .collect())
        })
    }

    fn text_width(&self, font: &FontInfo, text: &[u8]) -> Result<i32> {
        Ok(font.text_width(text))
    }

    fn text_extents(&self, font: &FontInfo, text: &[u8]) -> Result<TextExtents> {
        Ok(font.text_extents(text))
    }

    fn query_text_extents(&self, font: ffi::XID, text: &[u8]) -> Result<TextExtents> {
        self.reply("XQueryTextExtents", ffi::X_QueryTextExtents, |s| {
            s.resolve_font(font).map(|face| face.info(Font(font)).text_extents(text))
        })
    }

    fn set_font_path(&mut self, directories: &[&str]) -> Result<()> {
        for dir in directories {
            c_string(dir)?;
        }
        self.request("XSetFontPath", ffi::X_SetFontPath, |s| {
            if directories.iter().any(|d| d.is_empty()) {
                return Err((ErrorCode::Value, 0));
            }
            s.font_path = if directories.is_empty() {
                vec![DEFAULT_FONT_PATH.to_string()]
            } else {
                directories.iter().map(|d| d.to_string()).collect()
            };
            Ok(())
        })
    }

    fn get_font_path(&self) -> Result<Vec<String>> {
        self.reply("XGetFontPath", ffi::X_GetFontPath, |s| Ok(s.font_path.clone()))
    }

    // Hosts and screen saver

    fn add_host(&mut self, host: &HostAddress) -> Result<()> {
        self.request("XAddHost", ffi::X_ChangeHosts, |s| {
            Self::check_host(host)?;
            if !s.hosts.contains(host) {
                s.hosts.push(host.clone());
            }
            Ok(())
        })
    }

    fn remove_host(&mut self, host: &HostAddress) -> Result<()> {
        self.request("XRemoveHost", ffi::X_ChangeHosts, |s| {
            Self::check_host(host)?;
            s.hosts.retain(|h| h != host);
            Ok(())
        })
    }

    fn list_hosts(&self) -> Result<(Vec<HostAddress>, bool)> {
        self.reply("XListHosts", ffi::X_ListHosts, |s| Ok((s.hosts.clone(), s.access_control)))
    }

    fn set_access_control(&mut self, enabled: bool) -> Result<()> {
        self.request("XSetAccessControl", ffi::X_SetAccessControl, |s| {
            s.access_control = enabled;
            Ok(())
        })
    }

    fn set_screen_saver(&mut self, settings: &ScreenSaverSettings) -> Result<()> {
        self.request("XSetScreenSaver", ffi::X_SetScreenSaver, |s| {
            let defaults = ScreenSaverSettings::default();
            let seconds = |value: i32, default: i32| match value {
                -1 => Ok(default),
                v if v < -1 => Err((ErrorCode::Value, v as ffi::XID)),
                v => Ok(v),
            };
            let choice = |value: i32, default: i32| match value {
                0 | 1 => Ok(value),
                2 => Ok(default),
                v => Err((ErrorCode::Value, v as ffi::XID)),
            };
            s.screen_saver = ScreenSaverSettings {
                timeout: seconds(settings.timeout, defaults.timeout)?,
                interval: seconds(settings.interval, defaults.interval)?,
                prefer_blanking: choice(settings.prefer_blanking, defaults.prefer_blanking)?,
                allow_exposures: choice(settings.allow_exposures, defaults.allow_exposures)?,
            };
            Ok(())
        })
    }

    fn get_screen_saver(&self) -> Result<ScreenSaverSettings> {
        self.reply("XGetScreenSaver", ffi::X_GetScreenSaver, |s| Ok(s.screen_saver))
    }

    fn force_screen_saver(&mut self, mode: ScreenSaverMode) -> Result<()> {
        self.request("XForceScreenSaver", ffi::X_ForceScreenSaver, |s| {
            s.saver_active = mode == ScreenSaverMode::Active;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// A backend whose protocol errors land in the returned list
    fn collecting() -> (NullBackend, Arc<Mutex<Vec<ErrorEvent>>>) {
        let mut backend = NullBackend::new();
        let errors = Arc::new(Mutex::new(Vec::new()));
        let sink = errors.clone();
        backend.set_error_handler(Some(Box::new(move |e: &ErrorEvent| {
            sink.lock().unwrap().push(*e);
        })));
        (backend, errors)
    }

    fn window(backend: &mut NullBackend, parent: Window, mask: c_long) -> Window {
        let params = WindowParams::new(parent, 10, 20, 100, 50)
            .attributes(SetWindowAttributes::new().with_event_mask(mask).with_background_pixel(0x336699));
        backend.create_window(&params).unwrap()
    }

    fn drain(backend: &mut NullBackend) -> Vec<Event> {
        std::iter::from_fn(|| backend.queue.pop_front()).collect()
    }

    #[test]
    fn test_screen_and_connection_info() {
        let backend = NullBackend::new();
        let screen = backend.screen_info(0).unwrap();
        assert_eq!(screen.root, ROOT);
        assert_eq!((screen.width, screen.height), (1920, 1080));
        assert_eq!(screen.root_depth, 24);
        assert!(matches!(backend.screen_info(1), Err(Error::InvalidArgument(_))));
        assert_eq!(backend.depths(0).unwrap()[0], 24);
        assert_eq!(backend.protocol_version(), (11, 0));
        assert_eq!(backend.query_extension("XC-MISC").unwrap().map(|e| e.major_opcode), Some(129));
        assert_eq!(backend.query_extension("RANDR").unwrap(), None);
    }

    #[test]
    fn test_create_map_expose() {
        let mut backend = NullBackend::new();
        let mask = ffi::ExposureMask | ffi::StructureNotifyMask;
        let top = window(&mut backend, ROOT, mask);
        let child = window(&mut backend, top, ffi::ExposureMask);
        backend.map_window(child).unwrap();
        assert!(backend.queue.is_empty());

        backend.map_window(top).unwrap();
        let events = drain(&mut backend);
        assert!(matches!(events[0], Event::MapNotify(e) if e.window() == top));
        assert!(events.iter().any(|e| matches!(e, Event::Expose(x) if x.window() == top && x.width() == 100)));
        assert!(events.iter().any(|e| matches!(e, Event::Expose(x) if x.window() == child)));

        let attrs = backend.get_window_attributes(child).unwrap();
        assert!(attrs.is_viewable());
        assert_eq!(attrs.colormap(), DEFAULT_COLORMAP);
        assert_eq!(attrs.your_event_mask(), ffi::ExposureMask);
        assert_eq!(backend.query_tree(top).unwrap().children, vec![child]);
    }

    #[test]
    fn test_bad_window_is_raised_not_returned() {
        let (mut backend, errors) = collecting();
        assert!(backend.map_window(Window::new(0xdead)).is_ok());
        let errors = errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), Some(ErrorCode::Window));
        assert_eq!(errors[0].request_code(), ffi::X_MapWindow);
        assert_eq!(errors[0].resource_id(), 0xdead);
        assert_eq!(errors[0].serial(), 1);
    }

    #[test]
    fn test_reply_errors_fail_the_call() {
        let (backend, errors) = collecting();
        assert!(matches!(
            backend.get_geometry(Drawable::new(0xdead)),
            Err(Error::Status { request: "XGetGeometry" })
        ));
        assert!(matches!(backend.get_atom_name(Atom::new(5000)), Err(Error::NullReturn("XGetAtomName"))));
        assert_eq!(errors.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_create_window_checks() {
        let (mut backend, errors) = collecting();
        let input_only = WindowParams::new(ROOT, 0, 0, 10, 10).class(WindowClass::InputOnly);
        let io = backend.create_window(&input_only).unwrap();
        assert!(errors.lock().unwrap().is_empty());
        assert_eq!(backend.get_geometry(io.into()).unwrap().depth, 0);

        // InputOutput under InputOnly, a zero size, a foreign depth
        backend.create_window(&WindowParams::new(io, 0, 0, 5, 5)).unwrap();
        backend.create_window(&WindowParams::new(ROOT, 0, 0, 0, 5)).unwrap();
        backend.create_window(&WindowParams::new(ROOT, 0, 0, 5, 5).depth(8)).unwrap();
        let codes: Vec<_> = errors.lock().unwrap().iter().map(|e| e.code()).collect();
        assert_eq!(
            codes,
            vec![Some(ErrorCode::Match), Some(ErrorCode::Value), Some(ErrorCode::Match)]
        );
    }

    #[test]
    fn test_destroy_notifies_inferiors_first() {
        let mut backend = NullBackend::new();
        let top = window(&mut backend, ROOT, ffi::StructureNotifyMask | ffi::SubstructureNotifyMask);
        let child = window(&mut backend, top, ffi::StructureNotifyMask);
        drain(&mut backend);

        backend.destroy_window(top).unwrap();
        let destroyed: Vec<Window> = drain(&mut backend)
            .into_iter()
            .filter_map(|e| match e {
                Event::DestroyNotify(d) => Some(d.window()),
                _ => None,
            })
            .collect();
        assert_eq!(destroyed.first(), Some(&child));
        assert_eq!(destroyed.last(), Some(&top));
        assert!(backend.get_window_attributes(child).is_err());
    }

    #[test]
    fn test_configure_and_translate() {
        let mut backend = NullBackend::new();
        let top = window(&mut backend, ROOT, ffi::StructureNotifyMask);
        let child = window(&mut backend, top, 0);
        backend
            .configure_window(top, &WindowChanges::new().with_position(100, 200).with_border_width(2))
            .unwrap();
        let events = drain(&mut backend);
        assert!(matches!(events.last(), Some(Event::ConfigureNotify(c)) if c.x() == 100 && c.border_width() == 2));

        let coords = backend.translate_coordinates(child, ROOT, 0, 0).unwrap();
        // child at (10, 20) inside top at (100, 200) with a 2 pixel border
        assert_eq!((coords.x, coords.y), (112, 222));
        let back = backend.translate_coordinates(ROOT, top, 112, 222).unwrap();
        assert_eq!((back.x, back.y), (10, 20));
        assert_eq!(back.child, Window::NONE);
    }

    #[test]
    fn test_properties() {
        let mut backend = NullBackend::new();
        let w = window(&mut backend, ROOT, ffi::PropertyChangeMask);
        let atom = backend.intern_atom("_TEST", false).unwrap();
        assert_eq!(backend.intern_atom("_TEST", true).unwrap(), atom);
        assert_eq!(backend.intern_atom("_MISSING", true).unwrap(), Atom::NONE);
        assert_eq!(backend.get_atom_name(atom).unwrap(), "_TEST");

        let items = PropertyValue::Format32(vec![1, 2, 3]);
        backend
            .change_property(w, atom, Atom::CARDINAL, PropMode::Replace, &items)
            .unwrap();
        backend
            .change_property(w, atom, Atom::CARDINAL, PropMode::Append, &PropertyValue::Format32(vec![4]))
            .unwrap();

        let part = backend.get_property(w, atom, 1, 2, false, Atom::CARDINAL).unwrap().unwrap();
        assert_eq!(part.value, PropertyValue::Format32(vec![2, 3]));
        assert_eq!(part.bytes_after, 4);

        let mismatch = backend.get_property(w, atom, 0, 10, false, Atom::STRING).unwrap().unwrap();
        assert_eq!(mismatch.type_, Atom::CARDINAL);
        assert!(mismatch.value.is_empty());
        assert_eq!(mismatch.bytes_after, 16);

        let all = backend.get_property(w, atom, 0, 10, true, Atom::ANY_PROPERTY_TYPE).unwrap().unwrap();
        assert_eq!(all.as_cardinals(), Some(&[1, 2, 3, 4][..]));
        assert!(backend.list_properties(w).unwrap().is_empty());

        let states: Vec<bool> = drain(&mut backend)
            .into_iter()
            .filter_map(|e| match e {
                Event::PropertyNotify(p) => Some(p.is_deleted()),
                _ => None,
            })
            .collect();
        assert_eq!(states, vec![false, false, true]);
    }

    #[test]
    fn test_append_with_other_type_is_bad_match() {
        let (mut backend, errors) = collecting();
        let w = window(&mut backend, ROOT, 0);
        backend
            .change_property(w, Atom::WM_NAME, Atom::STRING, PropMode::Replace, &PropertyValue::string("a"))
            .unwrap();
        backend
            .change_property(w, Atom::WM_NAME, Atom::ATOM, PropMode::Append, &PropertyValue::atoms(&[Atom::PRIMARY]))
            .unwrap();
        assert_eq!(errors.lock().unwrap()[0].code(), Some(ErrorCode::Match));
        assert_eq!(backend.fetch_name(w).unwrap().as_deref(), Some("a"));
    }

    #[test]
    fn test_icccm_hints() {
        let mut backend = NullBackend::new();
        let w = window(&mut backend, ROOT, 0);
        backend.store_name(w, "title").unwrap();
        backend.set_class_hint(w, &ClassHint::new("demo", "Demo")).unwrap();
        backend.set_command(w, &["demo", "--flag"]).unwrap();
        backend.set_transient_for_hint(w, ROOT).unwrap();
        let delete = backend.intern_atom("WM_DELETE_WINDOW", false).unwrap();
        backend.set_wm_protocols(w, &[delete]).unwrap();
        backend.set_wm_normal_hints(w, &SizeHints::fixed(100, 50)).unwrap();

        assert_eq!(backend.fetch_name(w).unwrap().as_deref(), Some("title"));
        assert_eq!(backend.get_class_hint(w).unwrap(), Some(ClassHint::new("demo", "Demo")));
        assert_eq!(backend.get_command(w).unwrap(), vec!["demo", "--flag"]);
        assert_eq!(backend.get_transient_for_hint(w).unwrap(), Some(ROOT));
        assert_eq!(backend.get_wm_protocols(w).unwrap(), vec![delete]);
        assert_eq!(backend.get_wm_normal_hints(w).unwrap().map(|h| h.max_width()), Some(100));
        assert_eq!(backend.get_icon_name(w).unwrap(), None);
        assert!(matches!(backend.store_name(w, "a\0b"), Err(Error::NulByte(_))));
    }

    #[test]
    fn test_selection_ownership() {
        let mut backend = NullBackend::new();
        let first = window(&mut backend, ROOT, 0);
        let second = window(&mut backend, ROOT, 0);

        backend.set_selection_owner(Atom::PRIMARY, first, Timestamp::CURRENT_TIME).unwrap();
        assert_eq!(backend.get_selection_owner(Atom::PRIMARY).unwrap(), first);
        backend.set_selection_owner(Atom::PRIMARY, second, Timestamp::CURRENT_TIME).unwrap();
        let events = drain(&mut backend);
        assert!(matches!(events.as_slice(), [Event::SelectionClear(c)] if c.window() == first));

        // Older than the last change
        backend.set_selection_owner(Atom::PRIMARY, first, Timestamp::new(1)).unwrap();
        assert_eq!(backend.get_selection_owner(Atom::PRIMARY).unwrap(), second);

        backend
            .convert_selection(Atom::PRIMARY, Atom::STRING, Atom::PRIMARY, first, Timestamp::CURRENT_TIME)
            .unwrap();
        assert!(matches!(drain(&mut backend)[0], Event::SelectionRequest(r) if r.owner() == second));
        backend
            .convert_selection(Atom::SECONDARY, Atom::STRING, Atom::PRIMARY, first, Timestamp::CURRENT_TIME)
            .unwrap();
        assert!(matches!(drain(&mut backend)[0], Event::SelectionNotify(n) if n.property() == Atom::NONE));
    }

    #[test]
    fn test_event_queue_matching() {
        let mut backend = NullBackend::new();
        let w = window(&mut backend, ROOT, ffi::ExposureMask | ffi::StructureNotifyMask);
        backend.map_window(w).unwrap();
        assert_eq!(backend.pending(), 2);

        let expose = backend.check_typed_window_event(w, EventType::Expose).unwrap();
        assert!(matches!(expose, Event::Expose(_)));
        assert!(backend.check_mask_event(ffi::ButtonPressMask).is_none());
        backend.put_back_event(&expose).unwrap();
        assert!(matches!(backend.peek_event().unwrap(), Event::Expose(_)));
        assert!(backend.next_event().is_ok());
        assert!(backend.next_event().is_ok());
        assert!(matches!(backend.next_event(), Err(Error::Unsupported(_))));
    }

    #[test]
    fn test_send_event_propagates_to_selecting_ancestor() {
        let mut backend = NullBackend::new();
        let top = window(&mut backend, ROOT, ffi::KeyPressMask);
        let child = window(&mut backend, top, 0);
        let mut key = KeyEvent::default();
        key.set_window(child);
        key.set_keycode(KeyCode(40));

        backend.send_event(child, false, ffi::KeyPressMask, &Event::KeyPress(key)).unwrap();
        assert_eq!(backend.pending(), 0);
        backend.send_event(child, true, ffi::KeyPressMask, &Event::KeyPress(key)).unwrap();
        let sent = backend.next_event().unwrap();
        assert!(sent.is_send_event());
        assert_eq!(sent.serial(), backend.last_known_request_processed());
    }

    #[test]
    fn test_drawing_reads_back() {
        let mut backend = NullBackend::new();
        let pixmap = backend.create_pixmap(ROOT.into(), 8, 8, 24).unwrap();
        let gc = backend
            .create_gc(pixmap.into(), &GcValues::new().with_foreground(0xff0000))
            .unwrap();
        backend
            .fill_rectangles(pixmap.into(), gc, &[Rectangle::new(2, 2, 3, 3)])
            .unwrap();
        backend.draw_lines(pixmap.into(), gc, &[Point::new(0, 7), Point::new(7, 7)], CoordMode::Origin).unwrap();

        let image = backend.get_image(pixmap.into(), 0, 0, 8, 8, ffi::AllPlanes, ImageFormat::ZPixmap).unwrap();
        assert_eq!(image.get_pixel(3, 3), Some(0xff0000));
        assert_eq!(image.get_pixel(5, 5), Some(0));
        assert_eq!(image.get_pixel(7, 7), Some(0xff0000));

        let values = backend.get_gc_values(gc, ffi::GCForeground | ffi::GCFunction).unwrap();
        assert_eq!(values.foreground(), 0xff0000);
        assert_eq!(values.function(), ffi::GXcopy);
        assert!(backend.get_gc_values(gc, ffi::GCClipMask).is_err());
    }

    #[test]
    fn test_gc_depth_mismatch() {
        let (mut backend, errors) = collecting();
        let bitmap = backend.create_pixmap(ROOT.into(), 4, 4, 1).unwrap();
        let default_gc = backend.default_gc(0);
        backend
            .fill_rectangles(bitmap.into(), default_gc, &[Rectangle::new(0, 0, 1, 1)])
            .unwrap();
        assert_eq!(errors.lock().unwrap()[0].code(), Some(ErrorCode::Match));
        assert_eq!(errors.lock().unwrap()[0].resource_id(), DEFAULT_GCONTEXT.0);
    }

    #[test]
    fn test_copy_plane_and_exposures() {
        let mut backend = NullBackend::new();
        let bits = backend.create_bitmap_from_data(ROOT.into(), &[0b0000_0101], 3, 1).unwrap();
        let target = backend.create_pixmap(ROOT.into(), 3, 1, 24).unwrap();
        let gc = backend
            .create_gc(
                target.into(),
                &GcValues::new().with_foreground(7).with_background(9).with_graphics_exposures(true),
            )
            .unwrap();
        backend.copy_plane(bits.into(), target.into(), gc, 0, 0, 3, 1, 0, 0, 1).unwrap();
        let image = backend.get_image(target.into(), 0, 0, 3, 1, ffi::AllPlanes, ImageFormat::ZPixmap).unwrap();
        assert_eq!(
            (image.get_pixel(0, 0), image.get_pixel(1, 0), image.get_pixel(2, 0)),
            (Some(7), Some(9), Some(7))
        );
        assert!(matches!(backend.next_event().unwrap(), Event::NoExpose(_)));
        assert!(matches!(
            backend.copy_plane(bits.into(), target.into(), gc, 0, 0, 3, 1, 0, 0, 3),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_colors() {
        let mut backend = NullBackend::new();
        let pair = backend.alloc_named_color(DEFAULT_COLORMAP, "Orange").unwrap();
        assert_eq!(pair.screen.pixel(), 0xffa500);
        assert_eq!(pair.exact.green(), 165 * 0x101);
        assert!(matches!(
            backend.lookup_color(DEFAULT_COLORMAP, "no such color"),
            Err(Error::BadName(_))
        ));
        assert_eq!(backend.parse_color(DEFAULT_COLORMAP, "#102030").unwrap().red(), 0x1000);

        let mut colors = [Color::from_pixel(0x00ff00)];
        backend.query_colors(DEFAULT_COLORMAP, &mut colors).unwrap();
        assert_eq!((colors[0].red(), colors[0].green()), (0, 0xffff));
        let allocated = backend.alloc_color(DEFAULT_COLORMAP, Color::rgb(0x1234, 0, 0xffff)).unwrap();
        assert_eq!(allocated.pixel(), 0x1200ff);
    }

    #[test]
    fn test_colormap_install_notifies_users() {
        let mut backend = NullBackend::new();
        let w = window(&mut backend, ROOT, ffi::ColormapChangeMask);
        let colormap = backend.create_colormap(w, ROOT_VISUAL, false).unwrap();
        backend
            .change_window_attributes(w, &SetWindowAttributes::new().with_colormap(colormap))
            .unwrap();
        backend.install_colormap(colormap).unwrap();
        let events = drain(&mut backend);
        assert!(matches!(events[0], Event::ColormapNotify(c) if c.is_new() && c.colormap() == colormap));
        assert!(matches!(events[1], Event::ColormapNotify(c) if !c.is_new() && c.state() == ffi::ColormapInstalled));
        assert_eq!(backend.list_installed_colormaps(ROOT).unwrap(), vec![colormap]);
    }

    #[test]
    fn test_fonts() {
        let mut backend = NullBackend::new();
        let info = backend.load_query_font("fixed").unwrap();
        assert_eq!(info.text_width(b"hello"), 30);
        assert!(matches!(backend.load_query_font("nope"), Err(Error::BadName(_))));
        assert_eq!(backend.list_fonts("*", 2).unwrap().len(), 2);

        let gc = backend.default_gc(0);
        let gcontext = backend.gcontext_from_gc(gc);
        assert_eq!(backend.query_font(gcontext.0).unwrap().ascent, 11);
        assert!(matches!(backend.query_font(0xdead), Err(Error::NullReturn("XQueryFont"))));
        let extents = backend.query_text_extents(info.fid.0, b"ab").unwrap();
        assert_eq!(extents.overall.width(), 12);
    }

    #[test]
    fn test_grabs() {
        let mut backend = NullBackend::new();
        let w = window(&mut backend, ROOT, 0);
        let grab = PointerGrab::new(ffi::ButtonPressMask);
        assert_eq!(backend.grab_pointer(w, &grab, Timestamp::CURRENT_TIME).unwrap(), GrabStatus::NotViewable);
        backend.map_window(w).unwrap();
        assert_eq!(backend.grab_pointer(w, &grab, Timestamp::CURRENT_TIME).unwrap(), GrabStatus::Success);
        assert!(backend.grab_pointer(Window::new(0xdead), &grab, Timestamp::CURRENT_TIME).is_err());

        backend.grab_key(KeyCode(40), ffi::ControlMask, w, false, GrabMode::Async, GrabMode::Async).unwrap();
        backend.ungrab_key(KeyCode::ANY, ffi::AnyModifier, w).unwrap();
        assert!(backend.key_grabs.is_empty());
    }

    #[test]
    fn test_warp_pointer_crossing() {
        let mut backend = NullBackend::new();
        let w = window(&mut backend, ROOT, ffi::EnterWindowMask | ffi::PointerMotionMask);
        backend.map_window(w).unwrap();
        drain(&mut backend);

        backend.warp_pointer(Window::NONE, w, 0, 0, 0, 0, 5, 5).unwrap();
        let events = drain(&mut backend);
        assert!(matches!(events[0], Event::EnterNotify(c) if c.x() == 5 && c.detail() == ffi::NotifyAncestor));
        assert!(matches!(events[1], Event::MotionNotify(m) if m.x_root() == 15 && m.y_root() == 25));
        let pointer = backend.query_pointer(ROOT).unwrap();
        assert_eq!(pointer.child, w);
    }

    #[test]
    fn test_focus_reverts_on_unmap() {
        let mut backend = NullBackend::new();
        let w = window(&mut backend, ROOT, ffi::FocusChangeMask);
        assert!(backend.set_input_focus(w, RevertTo::Parent, Timestamp::CURRENT_TIME).is_ok());
        assert_eq!(backend.get_input_focus().unwrap().0, Window::POINTER_ROOT);

        backend.map_window(w).unwrap();
        backend.set_input_focus(w, RevertTo::Parent, Timestamp::CURRENT_TIME).unwrap();
        assert_eq!(backend.get_input_focus().unwrap(), (w, RevertTo::Parent));
        backend.unmap_window(w).unwrap();
        assert_eq!(backend.get_input_focus().unwrap(), (ROOT, RevertTo::None));
    }

    #[test]
    fn test_keyboard() {
        let mut backend = NullBackend::new();
        let a = backend.keysym_to_keycode(KeySym::new(0x61)).unwrap();
        assert_eq!(backend.keycode_to_keysym(a, 1), Some(KeySym::new(0x41)));
        assert!(matches!(backend.get_keyboard_mapping(a, 0), Err(Error::InvalidArgument(_))));
        assert!(matches!(
            backend.get_keyboard_mapping(KeyCode(250), 10),
            Err(Error::NullReturn("XGetKeyboardMapping"))
        ));

        backend
            .change_keyboard_control(&KeyboardControl::new().with_bell_percent(80).with_led_state(3, true))
            .unwrap();
        backend.set_auto_repeat(false).unwrap();
        let state = backend.get_keyboard_control().unwrap();
        assert_eq!(state.bell_percent(), 80);
        assert!(state.led_on(3));
        assert!(!state.global_auto_repeat());

        let mut key = KeyEvent::default();
        key.set_keycode(a);
        key.set_state(ffi::ShiftMask);
        assert_eq!(backend.lookup_string(&key).text, "A");
    }

    #[test]
    fn test_resources_and_defaults() {
        let backend = NullBackend::with_resources("xterm*background: black\n*font: fixed\nxterm.geometry: 80x24\n");
        assert_eq!(backend.get_default("xterm", "geometry").unwrap().as_deref(), Some("80x24"));
        assert_eq!(backend.get_default("xterm", "background").unwrap().as_deref(), Some("black"));
        assert_eq!(backend.get_default("xclock", "font").unwrap().as_deref(), Some("fixed"));
        assert_eq!(backend.get_default("xclock", "geometry").unwrap(), None);
        assert!(backend.resource_manager_string().unwrap().contains("xterm"));
    }

    #[test]
    fn test_hosts_and_screen_saver() {
        let (mut backend, errors) = collecting();
        let host = HostAddress::ipv4(std::net::Ipv4Addr::new(10, 0, 0, 1));
        backend.add_host(&host).unwrap();
        backend.add_host(&host).unwrap();
        backend.add_host(&HostAddress::new(HostFamily::Internet, vec![1, 2])).unwrap();
        backend.set_access_control(true).unwrap();
        assert_eq!(backend.list_hosts().unwrap(), (vec![host], true));
        assert_eq!(errors.lock().unwrap().len(), 1);

        let settings = ScreenSaverSettings {
            timeout: 30,
            interval: -1,
            prefer_blanking: ffi::DontPreferBlanking,
            allow_exposures: ffi::DefaultExposures,
        };
        backend.set_screen_saver(&settings).unwrap();
        let stored = backend.get_screen_saver().unwrap();
        assert_eq!((stored.timeout, stored.interval), (30, 600));
        assert_eq!(stored.allow_exposures, ffi::AllowExposures);
    }

    #[test]
    fn test_requests_are_recorded_in_order() {
        let mut backend = NullBackend::new();
        let w = window(&mut backend, ROOT, 0);
        backend.map_window(w).unwrap();
        backend.sync(false).unwrap();
        assert_eq!(backend.requests(), vec!["XCreateWindow", "XMapWindow", "XSync"]);
        assert_eq!(backend.next_request(), 4);
        backend.clear_requests();
        assert!(backend.requests().is_empty());
    }
}
