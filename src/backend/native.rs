//! Native backend - forwards every call to libX11
//!
//! Holds the loaded library and one `Display` connection. Data the library
//! allocates is copied into Rust-owned values and released before the call
//! returns.

use std::ffi::CString;
use std::ptr;

use libc::{c_char, c_int, c_long, c_uint, c_ulong, c_void};

use super::check_bitmap_len;
use super::r#trait::*;
use crate::error::{self, check_status, Error, ErrorHandler, IoErrorHandler, Result};
use crate::event::{Event, EventType, KeyEvent};
use crate::ffi;
use crate::library::Library;
use crate::types::*;
use crate::wrappers::*;

/// Call an Xlib function whose first argument is the connection
macro_rules! xcall {
    ($self:ident . $func:ident ( $($arg:expr),* $(,)? )) => {{
        log::debug!("{}", stringify!($func));
        // SAFETY: the display stays open for the backend's lifetime and
        // pointer arguments outlive the call
        unsafe { ($self.lib.raw().$func)($self.display $(, $arg)*) }
    }};
}

pub struct NativeBackend {
    lib: Library,
    display: *mut ffi::Display,
}

// SAFETY: the connection is only reached through &mut self or, for
// read-only queries, &self on a value that is not Sync
unsafe impl Send for NativeBackend {}

impl NativeBackend {
    /// Connect to `name`, or to `$DISPLAY` when `None`
    pub fn open(lib: Library, name: Option<&str>) -> Result<Self> {
        let c_name = name.map(CString::new).transpose()?;
        let name_ptr = c_name.as_ref().map_or(ptr::null(), |s| s.as_ptr());
        // SAFETY: name_ptr is null or NUL-terminated
        let display = unsafe { (lib.raw().XOpenDisplay)(name_ptr) };
        if display.is_null() {
            return Err(Error::OpenDisplay(lib.display_name(name)?));
        }

        // SAFETY: the trampolines match the handler signatures
        unsafe {
            (lib.raw().XSetErrorHandler)(Some(error::error_trampoline));
            (lib.raw().XSetIOErrorHandler)(Some(error::io_error_trampoline));
        }

        let backend = NativeBackend { lib, display };
        log::info!(
            "Connected to {} ({} release {})",
            backend.display_string(),
            backend.server_vendor(),
            backend.vendor_release()
        );
        Ok(backend)
    }

    /// The connection pointer, for calls this crate does not wrap
    pub fn as_raw(&self) -> *mut ffi::Display {
        self.display
    }

    pub fn library(&self) -> &Library {
        &self.lib
    }

    fn xlib(&self) -> &ffi::Xlib {
        self.lib.raw()
    }

    /// Copy `count` items out of a list the library allocated, then free it
    unsafe fn take_list<T, U>(&self, list: *mut T, count: c_int, f: impl FnMut(&T) -> U) -> Vec<U> {
        if list.is_null() {
            return Vec::new();
        }
        let items = std::slice::from_raw_parts(list, count.max(0) as usize)
            .iter()
            .map(f)
            .collect();
        (self.xlib().XFree)(list as *mut c_void);
        items
    }

    /// Copy a string the library allocated, then free it
    unsafe fn take_string(&self, s: *mut c_char) -> Option<String> {
        let copy = string_from_c(s);
        if !s.is_null() {
            (self.xlib().XFree)(s as *mut c_void);
        }
        copy
    }

    /// The `Visual` pointer for an id, as XCreateWindow and XCreateColormap
    /// need it
    fn visual(&self, id: VisualId) -> Result<*mut ffi::Visual> {
        let mut template = ffi::XVisualInfo {
            visualid: id.0,
            ..Default::default()
        };
        let mut count = 0;
        let list = xcall!(self.XGetVisualInfo(ffi::VisualIDMask, &mut template, &mut count));
        // SAFETY: list holds count entries
        let visuals = unsafe { self.take_list(list, count, |info| info.visual) };
        visuals
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidArgument(format!("no visual 0x{:x}", id.0)))
    }

    /// An event as Xlib expects it back, owned by this connection
    fn raw_event(&self, event: &Event) -> ffi::XEvent {
        let mut raw = event.to_raw();
        // SAFETY: every XEvent member starts with the XAnyEvent fields
        let mut any = unsafe { raw.any };
        any.display = self.display;
        raw.any = any;
        raw
    }

    fn visual_id(&self, visual: *mut ffi::Visual) -> VisualId {
        if visual.is_null() {
            return VisualId::default();
        }
        // SAFETY: visual came from the library
        VisualId(unsafe { (self.xlib().XVisualIDFromVisual)(visual) })
    }

    fn read_event(&mut self, f: impl FnOnce(&mut Self, &mut ffi::XEvent) -> c_int) -> Event {
        let mut raw = ffi::XEvent::default();
        f(self, &mut raw);
        Event::from_raw(&raw)
    }

    fn check_event(&mut self, f: impl FnOnce(&mut Self, &mut ffi::XEvent) -> ffi::Bool) -> Option<Event> {
        let mut raw = ffi::XEvent::default();
        from_bool(f(self, &mut raw)).then(|| Event::from_raw(&raw))
    }

    fn grab_status(status: c_int, request: &'static str) -> Result<GrabStatus> {
        GrabStatus::from_raw(status).ok_or(Error::Status { request })
    }
}

impl Drop for NativeBackend {
    fn drop(&mut self) {
        log::info!("Closing display {}", self.display_string());
        xcall!(self.XCloseDisplay());
    }
}

fn c_strings(items: &[&str]) -> Result<Vec<CString>> {
    items.iter().map(|s| Ok(CString::new(*s)?)).collect()
}

fn c_pointers(strings: &[CString]) -> Vec<*mut c_char> {
    strings.iter().map(|s| s.as_ptr() as *mut c_char).collect()
}

impl Backend for NativeBackend {
    fn default_screen(&self) -> i32 {
        xcall!(self.XDefaultScreen())
    }

    fn screen_count(&self) -> i32 {
        xcall!(self.XScreenCount())
    }

    fn screen_info(&self, screen: i32) -> Result<ScreenInfo> {
        if screen < 0 || screen >= self.screen_count() {
            return Err(Error::InvalidArgument(format!("no screen {}", screen)));
        }
        let visual = xcall!(self.XDefaultVisual(screen));
        Ok(ScreenInfo {
            number: screen,
            root: Window(xcall!(self.XRootWindow(screen))),
            width: xcall!(self.XDisplayWidth(screen)) as u32,
            height: xcall!(self.XDisplayHeight(screen)) as u32,
            width_mm: xcall!(self.XDisplayWidthMM(screen)) as u32,
            height_mm: xcall!(self.XDisplayHeightMM(screen)) as u32,
            root_visual: self.visual_id(visual),
            root_depth: xcall!(self.XDefaultDepth(screen)) as u32,
            default_colormap: Colormap(xcall!(self.XDefaultColormap(screen))),
            white_pixel: xcall!(self.XWhitePixel(screen)),
            black_pixel: xcall!(self.XBlackPixel(screen)),
            cells: xcall!(self.XDisplayCells(screen)) as u32,
        })
    }

    fn server_vendor(&self) -> String {
        // SAFETY: the vendor string is owned by the display
        unsafe { string_from_c(xcall!(self.XServerVendor())) }.unwrap_or_default()
    }

    fn vendor_release(&self) -> i32 {
        xcall!(self.XVendorRelease())
    }

    fn protocol_version(&self) -> (i32, i32) {
        (xcall!(self.XProtocolVersion()), xcall!(self.XProtocolRevision()))
    }

    fn display_string(&self) -> String {
        // SAFETY: the string is owned by the display
        unsafe { string_from_c(xcall!(self.XDisplayString())) }.unwrap_or_default()
    }

    fn connection_number(&self) -> Option<i32> {
        Some(xcall!(self.XConnectionNumber()))
    }

    fn pixmap_formats(&self) -> Result<Vec<PixmapFormat>> {
        let mut count = 0;
        let list = xcall!(self.XListPixmapFormats(&mut count));
        if list.is_null() {
            return Err(Error::NullReturn("XListPixmapFormats"));
        }
        // SAFETY: list holds count entries
        Ok(unsafe { self.take_list(list, count, |f| PixmapFormat::from_raw(*f)) })
    }

    fn depths(&self, screen: i32) -> Result<Vec<i32>> {
        let mut count = 0;
        let list = xcall!(self.XListDepths(screen, &mut count));
        if list.is_null() {
            return Err(Error::NullReturn("XListDepths"));
        }
        // SAFETY: list holds count entries
        Ok(unsafe { self.take_list(list, count, |d| *d) })
    }

    fn image_byte_order(&self) -> ByteOrder {
        ByteOrder::from_raw(xcall!(self.XImageByteOrder())).unwrap_or(ByteOrder::native())
    }

    fn max_request_size(&self) -> usize {
        match xcall!(self.XExtendedMaxRequestSize()) {
            0 => xcall!(self.XMaxRequestSize()) as usize,
            size => size as usize,
        }
    }

    fn list_extensions(&self) -> Result<Vec<String>> {
        let mut count = 0;
        let list = xcall!(self.XListExtensions(&mut count));
        // SAFETY: list is null or holds count strings
        let names = unsafe { strings_from_c(list, count.max(0) as usize) };
        if !list.is_null() {
            // SAFETY: list came from XListExtensions
            unsafe { (self.xlib().XFreeExtensionList)(list) };
        }
        Ok(names)
    }

    fn query_extension(&self, name: &str) -> Result<Option<ExtensionInfo>> {
        let c_name = CString::new(name)?;
        let (mut major_opcode, mut first_event, mut first_error) = (0, 0, 0);
        let present = xcall!(self.XQueryExtension(
            c_name.as_ptr(),
            &mut major_opcode,
            &mut first_event,
            &mut first_error,
        ));
        Ok(from_bool(present).then_some(ExtensionInfo {
            major_opcode,
            first_event,
            first_error,
        }))
    }

    fn flush(&mut self) -> Result<()> {
        xcall!(self.XFlush());
        Ok(())
    }

    fn sync(&mut self, discard: bool) -> Result<()> {
        xcall!(self.XSync(to_bool(discard)));
        Ok(())
    }

    fn synchronize(&mut self, on: bool) {
        xcall!(self.XSynchronize(to_bool(on)));
    }

    fn pending(&mut self) -> i32 {
        xcall!(self.XPending())
    }

    fn events_queued(&mut self, mode: QueuedMode) -> i32 {
        xcall!(self.XEventsQueued(mode.to_raw()))
    }

    fn lock(&self) {
        xcall!(self.XLockDisplay());
    }

    fn unlock(&self) {
        xcall!(self.XUnlockDisplay());
    }

    fn bell(&mut self, percent: i32) -> Result<()> {
        if !(-100..=100).contains(&percent) {
            return Err(Error::InvalidArgument(format!("bell percent {}", percent)));
        }
        xcall!(self.XBell(percent));
        Ok(())
    }

    fn set_close_down_mode(&mut self, mode: CloseDownMode) -> Result<()> {
        xcall!(self.XSetCloseDownMode(mode.to_raw()));
        Ok(())
    }

    fn kill_client(&mut self, resource: ffi::XID) -> Result<()> {
        xcall!(self.XKillClient(resource));
        Ok(())
    }

    fn grab_server(&mut self) -> Result<()> {
        xcall!(self.XGrabServer());
        Ok(())
    }

    fn ungrab_server(&mut self) -> Result<()> {
        xcall!(self.XUngrabServer());
        Ok(())
    }

    fn no_op(&mut self) -> Result<()> {
        xcall!(self.XNoOp());
        Ok(())
    }

    fn error_text(&self, code: u8) -> String {
        let mut buffer = [0 as c_char; 256];
        xcall!(self.XGetErrorText(code as c_int, buffer.as_mut_ptr(), buffer.len() as c_int));
        // SAFETY: XGetErrorText NUL-terminates within the buffer
        unsafe { string_from_c(buffer.as_ptr()) }.unwrap_or_default()
    }

    fn set_error_handler(&mut self, handler: Option<ErrorHandler>) {
        error::set_global_handler(handler);
    }

    fn set_io_error_handler(&mut self, handler: Option<IoErrorHandler>) {
        error::set_global_io_handler(handler);
    }

    fn resource_manager_string(&self) -> Option<String> {
        // SAFETY: the string is owned by the display
        unsafe { string_from_c(xcall!(self.XResourceManagerString())) }
    }

    fn get_default(&self, program: &str, option: &str) -> Result<Option<String>> {
        let c_program = CString::new(program)?;
        let c_option = CString::new(option)?;
        // SAFETY: the value is owned by the display's database
        Ok(unsafe { string_from_c(xcall!(self.XGetDefault(c_program.as_ptr(), c_option.as_ptr()))) })
    }

    fn next_request(&self) -> u64 {
        xcall!(self.XNextRequest()) as u64
    }

    fn last_known_request_processed(&self) -> u64 {
        xcall!(self.XLastKnownRequestProcessed()) as u64
    }

    // Windows

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
        let id = xcall!(self.XCreateSimpleWindow(
            parent.0,
            x,
            y,
            width,
            height,
            border_width,
            border,
            background,
        ));
        if id == 0 {
            return Err(Error::NullReturn("XCreateSimpleWindow"));
        }
        Ok(Window(id))
    }

    fn create_window(&mut self, params: &WindowParams) -> Result<Window> {
        let visual = match params.visual {
            Some(id) => self.visual(id)?,
            None => ptr::null_mut(),
        };
        let mut attributes = *params.attributes.as_raw();
        let id = xcall!(self.XCreateWindow(
            params.parent.0,
            params.x,
            params.y,
            params.width,
            params.height,
            params.border_width,
            params.depth,
            params.class.to_raw(),
            visual,
            params.attributes.mask(),
            &mut attributes,
        ));
        if id == 0 {
            return Err(Error::NullReturn("XCreateWindow"));
        }
        Ok(Window(id))
    }

    fn destroy_window(&mut self, window: Window) -> Result<()> {
        xcall!(self.XDestroyWindow(window.0));
        Ok(())
    }

    fn destroy_subwindows(&mut self, window: Window) -> Result<()> {
        xcall!(self.XDestroySubwindows(window.0));
        Ok(())
    }

    fn map_window(&mut self, window: Window) -> Result<()> {
        xcall!(self.XMapWindow(window.0));
        Ok(())
    }

    fn map_raised(&mut self, window: Window) -> Result<()> {
        xcall!(self.XMapRaised(window.0));
        Ok(())
    }

    fn map_subwindows(&mut self, window: Window) -> Result<()> {
        xcall!(self.XMapSubwindows(window.0));
        Ok(())
    }

    fn unmap_window(&mut self, window: Window) -> Result<()> {
        xcall!(self.XUnmapWindow(window.0));
        Ok(())
    }

    fn unmap_subwindows(&mut self, window: Window) -> Result<()> {
        xcall!(self.XUnmapSubwindows(window.0));
        Ok(())
    }

    fn raise_window(&mut self, window: Window) -> Result<()> {
        xcall!(self.XRaiseWindow(window.0));
        Ok(())
    }

    fn lower_window(&mut self, window: Window) -> Result<()> {
        xcall!(self.XLowerWindow(window.0));
        Ok(())
    }

    fn circulate_subwindows(&mut self, window: Window, direction: Circulation) -> Result<()> {
        xcall!(self.XCirculateSubwindows(window.0, direction.to_raw()));
        Ok(())
    }

    fn restack_windows(&mut self, windows: &[Window]) -> Result<()> {
        let mut ids: Vec<ffi::Window> = windows.iter().map(|w| w.0).collect();
        xcall!(self.XRestackWindows(ids.as_mut_ptr(), ids.len() as c_int));
        Ok(())
    }

    fn configure_window(&mut self, window: Window, changes: &WindowChanges) -> Result<()> {
        let mut raw = *changes.as_raw();
        xcall!(self.XConfigureWindow(window.0, changes.mask(), &mut raw));
        Ok(())
    }

    fn move_window(&mut self, window: Window, x: i32, y: i32) -> Result<()> {
        xcall!(self.XMoveWindow(window.0, x, y));
        Ok(())
    }

    fn resize_window(&mut self, window: Window, width: u32, height: u32) -> Result<()> {
        xcall!(self.XResizeWindow(window.0, width, height));
        Ok(())
    }

    fn move_resize_window(
        &mut self,
        window: Window,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    ) -> Result<()> {
        xcall!(self.XMoveResizeWindow(window.0, x, y, width, height));
        Ok(())
    }

    fn set_window_border_width(&mut self, window: Window, width: u32) -> Result<()> {
        xcall!(self.XSetWindowBorderWidth(window.0, width));
        Ok(())
    }

    fn change_window_attributes(
        &mut self,
        window: Window,
        attributes: &SetWindowAttributes,
    ) -> Result<()> {
        let mut raw = *attributes.as_raw();
        xcall!(self.XChangeWindowAttributes(window.0, attributes.mask(), &mut raw));
        Ok(())
    }

    fn get_window_attributes(&self, window: Window) -> Result<WindowAttributes> {
        let mut raw = ffi::XWindowAttributes::default();
        check_status(
            xcall!(self.XGetWindowAttributes(window.0, &mut raw)),
            "XGetWindowAttributes",
        )?;
        let visual = self.visual_id(raw.visual);
        Ok(WindowAttributes::from_raw(raw, visual))
    }

    fn get_geometry(&self, drawable: Drawable) -> Result<Geometry> {
        let mut root = 0;
        let (mut x, mut y) = (0, 0);
        let (mut width, mut height, mut border_width, mut depth) = (0, 0, 0, 0);
        check_status(
            xcall!(self.XGetGeometry(
                drawable.0,
                &mut root,
                &mut x,
                &mut y,
                &mut width,
                &mut height,
                &mut border_width,
                &mut depth,
            )),
            "XGetGeometry",
        )?;
        Ok(Geometry {
            root: Window(root),
            x,
            y,
            width,
            height,
            border_width,
            depth,
        })
    }

    fn query_tree(&self, window: Window) -> Result<QueryTree> {
        let (mut root, mut parent) = (0, 0);
        let mut children = ptr::null_mut();
        let mut count: c_uint = 0;
        check_status(
            xcall!(self.XQueryTree(window.0, &mut root, &mut parent, &mut children, &mut count)),
            "XQueryTree",
        )?;
        // SAFETY: children holds count ids
        let children = unsafe { self.take_list(children, count as c_int, |w| Window(*w)) };
        Ok(QueryTree {
            root: Window(root),
            parent: Window(parent),
            children,
        })
    }

    fn reparent_window(&mut self, window: Window, parent: Window, x: i32, y: i32) -> Result<()> {
        xcall!(self.XReparentWindow(window.0, parent.0, x, y));
        Ok(())
    }

    fn translate_coordinates(
        &self,
        src: Window,
        dst: Window,
        x: i32,
        y: i32,
    ) -> Result<TranslatedCoordinates> {
        let (mut dst_x, mut dst_y) = (0, 0);
        let mut child = 0;
        let same_screen = xcall!(self.XTranslateCoordinates(
            src.0,
            dst.0,
            x,
            y,
            &mut dst_x,
            &mut dst_y,
            &mut child,
        ));
        Ok(TranslatedCoordinates {
            same_screen: from_bool(same_screen),
            x: dst_x,
            y: dst_y,
            child: Window(child),
        })
    }

    fn set_window_background(&mut self, window: Window, pixel: c_ulong) -> Result<()> {
        xcall!(self.XSetWindowBackground(window.0, pixel));
        Ok(())
    }

    fn set_window_background_pixmap(&mut self, window: Window, pixmap: Pixmap) -> Result<()> {
        xcall!(self.XSetWindowBackgroundPixmap(window.0, pixmap.0));
        Ok(())
    }

    fn set_window_border(&mut self, window: Window, pixel: c_ulong) -> Result<()> {
        xcall!(self.XSetWindowBorder(window.0, pixel));
        Ok(())
    }

    fn set_window_colormap(&mut self, window: Window, colormap: Colormap) -> Result<()> {
        xcall!(self.XSetWindowColormap(window.0, colormap.0));
        Ok(())
    }

    fn clear_area(
        &mut self,
        window: Window,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        exposures: bool,
    ) -> Result<()> {
        xcall!(self.XClearArea(window.0, x, y, width, height, to_bool(exposures)));
        Ok(())
    }

    fn clear_window(&mut self, window: Window) -> Result<()> {
        xcall!(self.XClearWindow(window.0));
        Ok(())
    }

    fn select_input(&mut self, window: Window, mask: c_long) -> Result<()> {
        xcall!(self.XSelectInput(window.0, mask));
        Ok(())
    }

    fn define_cursor(&mut self, window: Window, cursor: Cursor) -> Result<()> {
        xcall!(self.XDefineCursor(window.0, cursor.0));
        Ok(())
    }

    fn undefine_cursor(&mut self, window: Window) -> Result<()> {
        xcall!(self.XUndefineCursor(window.0));
        Ok(())
    }

    fn iconify_window(&mut self, window: Window, screen: i32) -> Result<()> {
        check_status(xcall!(self.XIconifyWindow(window.0, screen)), "XIconifyWindow")
    }

    fn withdraw_window(&mut self, window: Window, screen: i32) -> Result<()> {
        check_status(xcall!(self.XWithdrawWindow(window.0, screen)), "XWithdrawWindow")
    }

    fn add_to_save_set(&mut self, window: Window) -> Result<()> {
        xcall!(self.XAddToSaveSet(window.0));
        Ok(())
    }

    fn remove_from_save_set(&mut self, window: Window) -> Result<()> {
        xcall!(self.XRemoveFromSaveSet(window.0));
        Ok(())
    }

    // Atoms, properties and ICCCM helpers

    fn intern_atom(&mut self, name: &str, only_if_exists: bool) -> Result<Atom> {
        let c_name = CString::new(name)?;
        let atom = xcall!(self.XInternAtom(c_name.as_ptr(), to_bool(only_if_exists)));
        if atom == 0 && !only_if_exists {
            return Err(Error::NullReturn("XInternAtom"));
        }
        Ok(Atom(atom))
    }

    fn intern_atoms(&mut self, names: &[&str], only_if_exists: bool) -> Result<Vec<Atom>> {
        let strings = c_strings(names)?;
        let mut pointers = c_pointers(&strings);
        let mut atoms: Vec<ffi::Atom> = vec![0; names.len()];
        let status = xcall!(self.XInternAtoms(
            pointers.as_mut_ptr(),
            pointers.len() as c_int,
            to_bool(only_if_exists),
            atoms.as_mut_ptr(),
        ));
        // With only_if_exists a zero status just means some names are unknown
        if !only_if_exists {
            check_status(status, "XInternAtoms")?;
        }
        Ok(atoms.into_iter().map(Atom).collect())
    }

    fn get_atom_name(&self, atom: Atom) -> Result<String> {
        let name = xcall!(self.XGetAtomName(atom.0));
        // SAFETY: name is null or a library-allocated string
        unsafe { self.take_string(name) }.ok_or(Error::NullReturn("XGetAtomName"))
    }

    fn change_property(
        &mut self,
        window: Window,
        property: Atom,
        type_: Atom,
        mode: PropMode,
        value: &PropertyValue,
    ) -> Result<()> {
        let format = value.format();
        value.with_raw(|data, count| {
            xcall!(self.XChangeProperty(window.0, property.0, type_.0, format, mode.to_raw(), data, count))
        });
        Ok(())
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
        let mut actual_type = 0;
        let mut format = 0;
        let (mut nitems, mut bytes_after) = (0, 0);
        let mut data = ptr::null_mut();
        let status = xcall!(self.XGetWindowProperty(
            window.0,
            property.0,
            offset as c_long,
            length as c_long,
            to_bool(delete),
            req_type.0,
            &mut actual_type,
            &mut format,
            &mut nitems,
            &mut bytes_after,
            &mut data,
        ));
        if status != ffi::Success as c_int {
            return Err(Error::Status {
                request: "XGetWindowProperty",
            });
        }

        // SAFETY: data holds nitems items of the returned format
        let value = unsafe { PropertyValue::from_raw(format, data, nitems) };
        if !data.is_null() {
            // SAFETY: data came from XGetWindowProperty
            unsafe { (self.xlib().XFree)(data as *mut c_void) };
        }
        if actual_type == 0 {
            return Ok(None);
        }
        let value = value.ok_or_else(|| Error::InvalidArgument(format!("property format {}", format)))?;
        Ok(Some(Property {
            type_: Atom(actual_type),
            value,
            bytes_after: bytes_after as u64,
        }))
    }

    fn delete_property(&mut self, window: Window, property: Atom) -> Result<()> {
        xcall!(self.XDeleteProperty(window.0, property.0));
        Ok(())
    }

    fn list_properties(&self, window: Window) -> Result<Vec<Atom>> {
        let mut count = 0;
        let list = xcall!(self.XListProperties(window.0, &mut count));
        // SAFETY: list is null or holds count atoms
        Ok(unsafe { self.take_list(list, count, |a| Atom(*a)) })
    }

    fn store_name(&mut self, window: Window, name: &str) -> Result<()> {
        let c_name = CString::new(name)?;
        xcall!(self.XStoreName(window.0, c_name.as_ptr()));
        Ok(())
    }

    fn fetch_name(&mut self, window: Window) -> Result<Option<String>> {
        let mut name = ptr::null_mut();
        if xcall!(self.XFetchName(window.0, &mut name)) == 0 {
            return Ok(None);
        }
        // SAFETY: name is a library-allocated string
        Ok(unsafe { self.take_string(name) })
    }

    fn set_icon_name(&mut self, window: Window, name: &str) -> Result<()> {
        let c_name = CString::new(name)?;
        xcall!(self.XSetIconName(window.0, c_name.as_ptr()));
        Ok(())
    }

    fn get_icon_name(&mut self, window: Window) -> Result<Option<String>> {
        let mut name = ptr::null_mut();
        if xcall!(self.XGetIconName(window.0, &mut name)) == 0 {
            return Ok(None);
        }
        // SAFETY: name is a library-allocated string
        Ok(unsafe { self.take_string(name) })
    }

    fn set_wm_protocols(&mut self, window: Window, protocols: &[Atom]) -> Result<()> {
        let mut atoms: Vec<ffi::Atom> = protocols.iter().map(|a| a.0).collect();
        check_status(
            xcall!(self.XSetWMProtocols(window.0, atoms.as_mut_ptr(), atoms.len() as c_int)),
            "XSetWMProtocols",
        )
    }

    fn get_wm_protocols(&mut self, window: Window) -> Result<Vec<Atom>> {
        let mut list = ptr::null_mut();
        let mut count = 0;
        if xcall!(self.XGetWMProtocols(window.0, &mut list, &mut count)) == 0 {
            return Ok(Vec::new());
        }
        // SAFETY: list holds count atoms
        Ok(unsafe { self.take_list(list, count, |a| Atom(*a)) })
    }

    fn set_wm_hints(&mut self, window: Window, hints: &WmHints) -> Result<()> {
        let mut raw = *hints.as_raw();
        xcall!(self.XSetWMHints(window.0, &mut raw));
        Ok(())
    }

    fn get_wm_hints(&mut self, window: Window) -> Result<Option<WmHints>> {
        let raw = xcall!(self.XGetWMHints(window.0));
        // SAFETY: raw is null or one library-allocated struct
        Ok(unsafe { self.take_list(raw, 1, |h| WmHints::from_raw(*h)) }.pop())
    }

    fn set_wm_normal_hints(&mut self, window: Window, hints: &SizeHints) -> Result<()> {
        let mut raw = *hints.as_raw();
        xcall!(self.XSetWMNormalHints(window.0, &mut raw));
        Ok(())
    }

    fn get_wm_normal_hints(&mut self, window: Window) -> Result<Option<SizeHints>> {
        let mut raw = ffi::XSizeHints::default();
        let mut supplied = 0;
        if xcall!(self.XGetWMNormalHints(window.0, &mut raw, &mut supplied)) == 0 {
            return Ok(None);
        }
        Ok(Some(SizeHints::from_raw(raw)))
    }

    fn set_class_hint(&mut self, window: Window, hint: &ClassHint) -> Result<()> {
        let name = CString::new(hint.res_name.as_str())?;
        let class = CString::new(hint.res_class.as_str())?;
        let mut raw = ffi::XClassHint {
            res_name: name.as_ptr() as *mut c_char,
            res_class: class.as_ptr() as *mut c_char,
        };
        xcall!(self.XSetClassHint(window.0, &mut raw));
        Ok(())
    }

    fn get_class_hint(&mut self, window: Window) -> Result<Option<ClassHint>> {
        let mut raw = ffi::XClassHint::default();
        if xcall!(self.XGetClassHint(window.0, &mut raw)) == 0 {
            return Ok(None);
        }
        // SAFETY: both fields are library-allocated strings
        let (name, class) = unsafe { (self.take_string(raw.res_name), self.take_string(raw.res_class)) };
        Ok(Some(ClassHint::new(name.unwrap_or_default(), class.unwrap_or_default())))
    }

    fn set_transient_for_hint(&mut self, window: Window, owner: Window) -> Result<()> {
        xcall!(self.XSetTransientForHint(window.0, owner.0));
        Ok(())
    }

    fn get_transient_for_hint(&mut self, window: Window) -> Result<Option<Window>> {
        let mut owner = 0;
        if xcall!(self.XGetTransientForHint(window.0, &mut owner)) == 0 {
            return Ok(None);
        }
        Ok(Some(Window(owner)))
    }

    fn set_command(&mut self, window: Window, argv: &[&str]) -> Result<()> {
        let strings = c_strings(argv)?;
        let mut pointers = c_pointers(&strings);
        xcall!(self.XSetCommand(window.0, pointers.as_mut_ptr(), pointers.len() as c_int));
        Ok(())
    }

    fn get_command(&mut self, window: Window) -> Result<Vec<String>> {
        let mut argv = ptr::null_mut();
        let mut argc = 0;
        if xcall!(self.XGetCommand(window.0, &mut argv, &mut argc)) == 0 {
            return Ok(Vec::new());
        }
        // SAFETY: argv holds argc strings allocated as one string list
        unsafe {
            let args = strings_from_c(argv, argc.max(0) as usize);
            (self.xlib().XFreeStringList)(argv);
            Ok(args)
        }
    }

    fn set_icon_sizes(&mut self, window: Window, sizes: &[IconSize]) -> Result<()> {
        let mut raw: Vec<ffi::XIconSize> = sizes.iter().map(|s| s.into_raw()).collect();
        xcall!(self.XSetIconSizes(window.0, raw.as_mut_ptr(), raw.len() as c_int));
        Ok(())
    }

    fn get_icon_sizes(&mut self, window: Window) -> Result<Vec<IconSize>> {
        let mut list = ptr::null_mut();
        let mut count = 0;
        if xcall!(self.XGetIconSizes(window.0, &mut list, &mut count)) == 0 {
            return Ok(Vec::new());
        }
        // SAFETY: list holds count entries
        Ok(unsafe { self.take_list(list, count, |s| IconSize::from_raw(*s)) })
    }

    fn set_selection_owner(&mut self, selection: Atom, owner: Window, time: Timestamp) -> Result<()> {
        xcall!(self.XSetSelectionOwner(selection.0, owner.0, time.0));
        Ok(())
    }

    fn get_selection_owner(&self, selection: Atom) -> Result<Window> {
        Ok(Window(xcall!(self.XGetSelectionOwner(selection.0))))
    }

    fn convert_selection(
        &mut self,
        selection: Atom,
        target: Atom,
        property: Atom,
        requestor: Window,
        time: Timestamp,
    ) -> Result<()> {
        xcall!(self.XConvertSelection(selection.0, target.0, property.0, requestor.0, time.0));
        Ok(())
    }

    // Events

    fn next_event(&mut self) -> Result<Event> {
        Ok(self.read_event(|this, raw| xcall!(this.XNextEvent(raw))))
    }

    fn peek_event(&mut self) -> Result<Event> {
        Ok(self.read_event(|this, raw| xcall!(this.XPeekEvent(raw))))
    }

    fn window_event(&mut self, window: Window, mask: c_long) -> Result<Event> {
        Ok(self.read_event(|this, raw| xcall!(this.XWindowEvent(window.0, mask, raw))))
    }

    fn mask_event(&mut self, mask: c_long) -> Result<Event> {
        Ok(self.read_event(|this, raw| xcall!(this.XMaskEvent(mask, raw))))
    }

    fn check_window_event(&mut self, window: Window, mask: c_long) -> Option<Event> {
        self.check_event(|this, raw| xcall!(this.XCheckWindowEvent(window.0, mask, raw)))
    }

    fn check_mask_event(&mut self, mask: c_long) -> Option<Event> {
        self.check_event(|this, raw| xcall!(this.XCheckMaskEvent(mask, raw)))
    }

    fn check_typed_event(&mut self, kind: EventType) -> Option<Event> {
        self.check_event(|this, raw| xcall!(this.XCheckTypedEvent(kind.to_raw(), raw)))
    }

    fn check_typed_window_event(&mut self, window: Window, kind: EventType) -> Option<Event> {
        self.check_event(|this, raw| xcall!(this.XCheckTypedWindowEvent(window.0, kind.to_raw(), raw)))
    }

    fn put_back_event(&mut self, event: &Event) -> Result<()> {
        let mut raw = self.raw_event(event);
        xcall!(self.XPutBackEvent(&mut raw));
        Ok(())
    }

    fn send_event(&mut self, window: Window, propagate: bool, mask: c_long, event: &Event) -> Result<()> {
        let mut raw = self.raw_event(event);
        check_status(
            xcall!(self.XSendEvent(window.0, to_bool(propagate), mask, &mut raw)),
            "XSendEvent",
        )
    }

    fn allow_events(&mut self, mode: AllowEvents, time: Timestamp) -> Result<()> {
        xcall!(self.XAllowEvents(mode.to_raw(), time.0));
        Ok(())
    }

    // Input

    fn grab_pointer(&mut self, window: Window, grab: &PointerGrab, time: Timestamp) -> Result<GrabStatus> {
        let status = xcall!(self.XGrabPointer(
            window.0,
            to_bool(grab.owner_events),
            grab.event_mask,
            grab.pointer_mode.to_raw(),
            grab.keyboard_mode.to_raw(),
            grab.confine_to.0,
            grab.cursor.0,
            time.0,
        ));
        Self::grab_status(status, "XGrabPointer")
    }

    fn ungrab_pointer(&mut self, time: Timestamp) -> Result<()> {
        xcall!(self.XUngrabPointer(time.0));
        Ok(())
    }

    fn grab_keyboard(
        &mut self,
        window: Window,
        owner_events: bool,
        pointer_mode: GrabMode,
        keyboard_mode: GrabMode,
        time: Timestamp,
    ) -> Result<GrabStatus> {
        let status = xcall!(self.XGrabKeyboard(
            window.0,
            to_bool(owner_events),
            pointer_mode.to_raw(),
            keyboard_mode.to_raw(),
            time.0,
        ));
        Self::grab_status(status, "XGrabKeyboard")
    }

    fn ungrab_keyboard(&mut self, time: Timestamp) -> Result<()> {
        xcall!(self.XUngrabKeyboard(time.0));
        Ok(())
    }

    fn grab_button(&mut self, button: Button, modifiers: c_uint, window: Window, grab: &PointerGrab) -> Result<()> {
        xcall!(self.XGrabButton(
            button.0,
            modifiers,
            window.0,
            to_bool(grab.owner_events),
            grab.event_mask,
            grab.pointer_mode.to_raw(),
            grab.keyboard_mode.to_raw(),
            grab.confine_to.0,
            grab.cursor.0,
        ));
        Ok(())
    }

    fn ungrab_button(&mut self, button: Button, modifiers: c_uint, window: Window) -> Result<()> {
        xcall!(self.XUngrabButton(button.0, modifiers, window.0));
        Ok(())
    }

    fn grab_key(
        &mut self,
        key: KeyCode,
        modifiers: c_uint,
        window: Window,
        owner_events: bool,
        pointer_mode: GrabMode,
        keyboard_mode: GrabMode,
    ) -> Result<()> {
        xcall!(self.XGrabKey(
            key.0 as c_int,
            modifiers,
            window.0,
            to_bool(owner_events),
            pointer_mode.to_raw(),
            keyboard_mode.to_raw(),
        ));
        Ok(())
    }

    fn ungrab_key(&mut self, key: KeyCode, modifiers: c_uint, window: Window) -> Result<()> {
        xcall!(self.XUngrabKey(key.0 as c_int, modifiers, window.0));
        Ok(())
    }

    fn query_pointer(&self, window: Window) -> Result<PointerState> {
        let (mut root, mut child) = (0, 0);
        let (mut root_x, mut root_y, mut win_x, mut win_y) = (0, 0, 0, 0);
        let mut mask = 0;
        let same_screen = xcall!(self.XQueryPointer(
            window.0,
            &mut root,
            &mut child,
            &mut root_x,
            &mut root_y,
            &mut win_x,
            &mut win_y,
            &mut mask,
        ));
        Ok(PointerState {
            same_screen: from_bool(same_screen),
            root: Window(root),
            child: Window(child),
            root_x,
            root_y,
            win_x,
            win_y,
            mask,
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
        xcall!(self.XWarpPointer(src.0, dst.0, src_x, src_y, src_width, src_height, dst_x, dst_y));
        Ok(())
    }

    fn set_input_focus(&mut self, window: Window, revert_to: RevertTo, time: Timestamp) -> Result<()> {
        xcall!(self.XSetInputFocus(window.0, revert_to.to_raw(), time.0));
        Ok(())
    }

    fn get_input_focus(&self) -> Result<(Window, RevertTo)> {
        let mut focus = 0;
        let mut revert_to = 0;
        xcall!(self.XGetInputFocus(&mut focus, &mut revert_to));
        Ok((Window(focus), RevertTo::from_raw(revert_to).unwrap_or(RevertTo::None)))
    }

    fn keysym_to_keycode(&self, sym: KeySym) -> Option<KeyCode> {
        match xcall!(self.XKeysymToKeycode(sym.0)) {
            0 => None,
            code => Some(KeyCode(code)),
        }
    }

    fn keycode_to_keysym(&self, key: KeyCode, index: i32) -> Option<KeySym> {
        match xcall!(self.XKeycodeToKeysym(key.0, index)) {
            ffi::NoSymbol => None,
            sym => Some(KeySym(sym)),
        }
    }

    fn display_keycodes(&self) -> (KeyCode, KeyCode) {
        let (mut min, mut max) = (0, 0);
        xcall!(self.XDisplayKeycodes(&mut min, &mut max));
        (KeyCode(min as u8), KeyCode(max as u8))
    }

    fn get_keyboard_mapping(&self, first: KeyCode, count: u32) -> Result<KeyboardMapping> {
        if count == 0 {
            return Err(Error::InvalidArgument("keycode count must be positive".into()));
        }
        let mut per_keycode = 0;
        let list = xcall!(self.XGetKeyboardMapping(first.0, count as c_int, &mut per_keycode));
        if list.is_null() {
            return Err(Error::NullReturn("XGetKeyboardMapping"));
        }
        let total = count as c_int * per_keycode;
        // SAFETY: list holds count * per_keycode keysyms
        let keysyms = unsafe { self.take_list(list, total, |k| KeySym(*k)) };
        Ok(KeyboardMapping {
            first_keycode: first,
            keysyms_per_keycode: per_keycode.max(0) as usize,
            keysyms,
        })
    }

    fn get_modifier_mapping(&self) -> Result<ModifierKeymap> {
        let raw = xcall!(self.XGetModifierMapping());
        if raw.is_null() {
            return Err(Error::NullReturn("XGetModifierMapping"));
        }
        // SAFETY: raw is a keymap allocated by the library
        unsafe {
            let keymap = ModifierKeymap::from_raw(&*raw);
            (self.xlib().XFreeModifiermap)(raw);
            Ok(keymap)
        }
    }

    fn query_keymap(&self) -> Result<[u8; 32]> {
        let mut keys = [0 as c_char; 32];
        xcall!(self.XQueryKeymap(keys.as_mut_ptr()));
        Ok(keys.map(|b| b as u8))
    }

    fn get_keyboard_control(&self) -> Result<KeyboardState> {
        let mut raw = ffi::XKeyboardState::default();
        xcall!(self.XGetKeyboardControl(&mut raw));
        Ok(KeyboardState::from_raw(raw))
    }

    fn change_keyboard_control(&mut self, control: &KeyboardControl) -> Result<()> {
        let mut raw = *control.as_raw();
        xcall!(self.XChangeKeyboardControl(control.mask(), &mut raw));
        Ok(())
    }

    fn set_auto_repeat(&mut self, on: bool) -> Result<()> {
        if on {
            xcall!(self.XAutoRepeatOn());
        } else {
            xcall!(self.XAutoRepeatOff());
        }
        Ok(())
    }

    fn get_pointer_mapping(&self) -> Result<Vec<u8>> {
        let mut map = [0u8; 256];
        let count = xcall!(self.XGetPointerMapping(map.as_mut_ptr(), map.len() as c_int));
        Ok(map[..count.clamp(0, 256) as usize].to_vec())
    }

    fn lookup_string(&self, event: &KeyEvent) -> LookedUpKey {
        let mut raw = event.into_raw();
        // Xlib translates the keycode through event->display
        raw.display = self.display;
        let mut buffer = [0 as c_char; 32];
        let mut sym = 0;
        // SAFETY: buffer and sym are writable; the compose status may be null
        let count = unsafe {
            (self.xlib().XLookupString)(
                &mut raw,
                buffer.as_mut_ptr(),
                buffer.len() as c_int,
                &mut sym,
                ptr::null_mut(),
            )
        };
        // XLookupString produces Latin-1
        let text = buffer[..count.clamp(0, 32) as usize]
            .iter()
            .map(|&b| b as u8 as char)
            .collect();
        LookedUpKey {
            keysym: (sym != ffi::NoSymbol).then_some(KeySym(sym)),
            text,
        }
    }

    // Graphics contexts

    fn create_gc(&mut self, drawable: Drawable, values: &GcValues) -> Result<Gc> {
        let mut raw = *values.as_raw();
        let gc = xcall!(self.XCreateGC(drawable.0, values.mask(), &mut raw));
        if gc.is_null() {
            return Err(Error::NullReturn("XCreateGC"));
        }
        Ok(Gc::from_raw(gc))
    }

    fn default_gc(&self, screen: i32) -> Gc {
        Gc::from_raw(xcall!(self.XDefaultGC(screen)))
    }

    fn change_gc(&mut self, gc: Gc, values: &GcValues) -> Result<()> {
        let mut raw = *values.as_raw();
        xcall!(self.XChangeGC(gc.as_raw(), values.mask(), &mut raw));
        Ok(())
    }

    fn get_gc_values(&self, gc: Gc, mask: c_ulong) -> Result<GcValues> {
        let mut raw = ffi::XGCValues::default();
        check_status(xcall!(self.XGetGCValues(gc.as_raw(), mask, &mut raw)), "XGetGCValues")?;
        Ok(GcValues::from_raw(mask, raw))
    }

    fn copy_gc(&mut self, src: Gc, mask: c_ulong, dst: Gc) -> Result<()> {
        xcall!(self.XCopyGC(src.as_raw(), mask, dst.as_raw()));
        Ok(())
    }

    fn free_gc(&mut self, gc: Gc) -> Result<()> {
        xcall!(self.XFreeGC(gc.as_raw()));
        Ok(())
    }

    fn gcontext_from_gc(&self, gc: Gc) -> GContext {
        // SAFETY: gc came from this display
        GContext(unsafe { (self.xlib().XGContextFromGC)(gc.as_raw()) })
    }

    fn set_foreground(&mut self, gc: Gc, pixel: c_ulong) -> Result<()> {
        xcall!(self.XSetForeground(gc.as_raw(), pixel));
        Ok(())
    }

    fn set_background(&mut self, gc: Gc, pixel: c_ulong) -> Result<()> {
        xcall!(self.XSetBackground(gc.as_raw(), pixel));
        Ok(())
    }

    fn set_line_attributes(
        &mut self,
        gc: Gc,
        width: u32,
        line_style: LineStyle,
        cap_style: CapStyle,
        join_style: JoinStyle,
    ) -> Result<()> {
        xcall!(self.XSetLineAttributes(
            gc.as_raw(),
            width,
            line_style.to_raw(),
            cap_style.to_raw(),
            join_style.to_raw(),
        ));
        Ok(())
    }

    fn set_dashes(&mut self, gc: Gc, offset: i32, dashes: &[u8]) -> Result<()> {
        if dashes.is_empty() || dashes.contains(&0) {
            return Err(Error::InvalidArgument("dash lengths must be non-zero".into()));
        }
        xcall!(self.XSetDashes(gc.as_raw(), offset, dashes.as_ptr() as *const c_char, dashes.len() as c_int));
        Ok(())
    }

    fn set_clip_rectangles(
        &mut self,
        gc: Gc,
        x: i32,
        y: i32,
        rectangles: &[Rectangle],
        ordering: ClipOrdering,
    ) -> Result<()> {
        let mut rects = rectangles.to_vec();
        xcall!(self.XSetClipRectangles(
            gc.as_raw(),
            x,
            y,
            rects.as_mut_ptr() as *mut ffi::XRectangle,
            rects.len() as c_int,
            ordering.to_raw(),
        ));
        Ok(())
    }

    fn set_region(&mut self, gc: Gc, region: &Region) -> Result<()> {
        xcall!(self.XSetRegion(gc.as_raw(), region.as_raw()));
        Ok(())
    }

    // Drawing

    fn draw_point(&mut self, drawable: Drawable, gc: Gc, x: i32, y: i32) -> Result<()> {
        xcall!(self.XDrawPoint(drawable.0, gc.as_raw(), x, y));
        Ok(())
    }

    fn draw_points(&mut self, drawable: Drawable, gc: Gc, points: &[Point], mode: CoordMode) -> Result<()> {
        let mut points = points.to_vec();
        xcall!(self.XDrawPoints(
            drawable.0,
            gc.as_raw(),
            points.as_mut_ptr() as *mut ffi::XPoint,
            points.len() as c_int,
            mode.to_raw(),
        ));
        Ok(())
    }

    fn draw_line(&mut self, drawable: Drawable, gc: Gc, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<()> {
        xcall!(self.XDrawLine(drawable.0, gc.as_raw(), x1, y1, x2, y2));
        Ok(())
    }

    fn draw_lines(&mut self, drawable: Drawable, gc: Gc, points: &[Point], mode: CoordMode) -> Result<()> {
        let mut points = points.to_vec();
        xcall!(self.XDrawLines(
            drawable.0,
            gc.as_raw(),
            points.as_mut_ptr() as *mut ffi::XPoint,
            points.len() as c_int,
            mode.to_raw(),
        ));
        Ok(())
    }

    fn draw_segments(&mut self, drawable: Drawable, gc: Gc, segments: &[Segment]) -> Result<()> {
        let mut segments = segments.to_vec();
        xcall!(self.XDrawSegments(
            drawable.0,
            gc.as_raw(),
            segments.as_mut_ptr() as *mut ffi::XSegment,
            segments.len() as c_int,
        ));
        Ok(())
    }

    fn draw_rectangles(&mut self, drawable: Drawable, gc: Gc, rectangles: &[Rectangle]) -> Result<()> {
        let mut rects = rectangles.to_vec();
        xcall!(self.XDrawRectangles(
            drawable.0,
            gc.as_raw(),
            rects.as_mut_ptr() as *mut ffi::XRectangle,
            rects.len() as c_int,
        ));
        Ok(())
    }

    fn fill_rectangles(&mut self, drawable: Drawable, gc: Gc, rectangles: &[Rectangle]) -> Result<()> {
        let mut rects = rectangles.to_vec();
        xcall!(self.XFillRectangles(
            drawable.0,
            gc.as_raw(),
            rects.as_mut_ptr() as *mut ffi::XRectangle,
            rects.len() as c_int,
        ));
        Ok(())
    }

    fn draw_arcs(&mut self, drawable: Drawable, gc: Gc, arcs: &[ArcSegment]) -> Result<()> {
        let mut arcs = arcs.to_vec();
        xcall!(self.XDrawArcs(drawable.0, gc.as_raw(), arcs.as_mut_ptr() as *mut ffi::XArc, arcs.len() as c_int));
        Ok(())
    }

    fn fill_arcs(&mut self, drawable: Drawable, gc: Gc, arcs: &[ArcSegment]) -> Result<()> {
        let mut arcs = arcs.to_vec();
        xcall!(self.XFillArcs(drawable.0, gc.as_raw(), arcs.as_mut_ptr() as *mut ffi::XArc, arcs.len() as c_int));
        Ok(())
    }

    fn fill_polygon(
        &mut self,
        drawable: Drawable,
        gc: Gc,
        points: &[Point],
        shape: Shape,
        mode: CoordMode,
    ) -> Result<()> {
        let mut points = points.to_vec();
        xcall!(self.XFillPolygon(
            drawable.0,
            gc.as_raw(),
            points.as_mut_ptr() as *mut ffi::XPoint,
            points.len() as c_int,
            shape.to_raw(),
            mode.to_raw(),
        ));
        Ok(())
    }

    fn draw_string(&mut self, drawable: Drawable, gc: Gc, x: i32, y: i32, text: &[u8]) -> Result<()> {
        xcall!(self.XDrawString(drawable.0, gc.as_raw(), x, y, text.as_ptr() as *const c_char, text.len() as c_int));
        Ok(())
    }

    fn draw_image_string(&mut self, drawable: Drawable, gc: Gc, x: i32, y: i32, text: &[u8]) -> Result<()> {
        xcall!(self.XDrawImageString(
            drawable.0,
            gc.as_raw(),
            x,
            y,
            text.as_ptr() as *const c_char,
            text.len() as c_int,
        ));
        Ok(())
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
        xcall!(self.XCopyArea(src.0, dst.0, gc.as_raw(), src_x, src_y, width, height, dst_x, dst_y));
        Ok(())
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
        xcall!(self.XCopyPlane(src.0, dst.0, gc.as_raw(), src_x, src_y, width, height, dst_x, dst_y, plane));
        Ok(())
    }

    // Pixmaps, images and cursors

    fn create_pixmap(&mut self, drawable: Drawable, width: u32, height: u32, depth: u32) -> Result<Pixmap> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidArgument("pixmap size must be non-zero".into()));
        }
        Ok(Pixmap(xcall!(self.XCreatePixmap(drawable.0, width, height, depth))))
    }

    fn free_pixmap(&mut self, pixmap: Pixmap) -> Result<()> {
        xcall!(self.XFreePixmap(pixmap.0));
        Ok(())
    }

    fn create_bitmap_from_data(&mut self, drawable: Drawable, data: &[u8], width: u32, height: u32) -> Result<Pixmap> {
        check_bitmap_len(data, width, height)?;
        let id = xcall!(self.XCreateBitmapFromData(drawable.0, data.as_ptr() as *const c_char, width, height));
        if id == 0 {
            return Err(Error::NullReturn("XCreateBitmapFromData"));
        }
        Ok(Pixmap(id))
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
        let mut data = data.to_vec();
        let id = xcall!(self.XCreatePixmapFromBitmapData(
            drawable.0,
            data.as_mut_ptr() as *mut c_char,
            width,
            height,
            foreground,
            background,
            depth,
        ));
        if id == 0 {
            return Err(Error::NullReturn("XCreatePixmapFromBitmapData"));
        }
        Ok(Pixmap(id))
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
        let raw = xcall!(self.XGetImage(drawable.0, x, y, width, height, plane_mask, format.to_raw()));
        if raw.is_null() {
            return Err(Error::NullReturn("XGetImage"));
        }
        // SAFETY: raw is a complete image whose function table XGetImage
        // filled in; XDestroyImage is that table's destroy entry
        unsafe {
            let image = Image::from_raw(&*raw);
            if let Some(destroy) = (*raw).funcs.destroy_image {
                destroy(raw);
            }
            image
        }
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
        image.with_raw(|raw| {
            // SAFETY: raw describes a buffer that lives for this closure
            check_status(unsafe { (self.xlib().XInitImage)(raw) }, "XInitImage")?;
            xcall!(self.XPutImage(drawable.0, gc.as_raw(), raw, src_x, src_y, dst_x, dst_y, width, height));
            Ok(())
        })
    }

    fn create_font_cursor(&mut self, shape: StandardCursor) -> Result<Cursor> {
        Ok(Cursor(xcall!(self.XCreateFontCursor(shape.to_raw()))))
    }

    fn create_pixmap_cursor(
        &mut self,
        source: Pixmap,
        mask: Pixmap,
        foreground: &Color,
        background: &Color,
        x: u32,
        y: u32,
    ) -> Result<Cursor> {
        let mut fg = foreground.into_raw();
        let mut bg = background.into_raw();
        Ok(Cursor(xcall!(self.XCreatePixmapCursor(source.0, mask.0, &mut fg, &mut bg, x, y))))
    }

    fn create_glyph_cursor(
        &mut self,
        source_font: Font,
        mask_font: Font,
        source_char: u32,
        mask_char: u32,
        foreground: &Color,
        background: &Color,
    ) -> Result<Cursor> {
        Ok(Cursor(xcall!(self.XCreateGlyphCursor(
            source_font.0,
            mask_font.0,
            source_char,
            mask_char,
            foreground.as_raw(),
            background.as_raw(),
        ))))
    }

    fn free_cursor(&mut self, cursor: Cursor) -> Result<()> {
        xcall!(self.XFreeCursor(cursor.0));
        Ok(())
    }

    fn recolor_cursor(&mut self, cursor: Cursor, foreground: &Color, background: &Color) -> Result<()> {
        let mut fg = foreground.into_raw();
        let mut bg = background.into_raw();
        xcall!(self.XRecolorCursor(cursor.0, &mut fg, &mut bg));
        Ok(())
    }

    fn query_best_size(&self, class: BestSizeClass, drawable: Drawable, width: u32, height: u32) -> Result<(u32, u32)> {
        let (mut best_width, mut best_height) = (0, 0);
        check_status(
            xcall!(self.XQueryBestSize(class.to_raw(), drawable.0, width, height, &mut best_width, &mut best_height)),
            "XQueryBestSize",
        )?;
        Ok((best_width, best_height))
    }

    // Colormaps and colors

    fn create_colormap(&mut self, window: Window, visual: VisualId, alloc_all: bool) -> Result<Colormap> {
        let visual = self.visual(visual)?;
        let alloc = if alloc_all { ffi::AllocAll } else { ffi::AllocNone };
        Ok(Colormap(xcall!(self.XCreateColormap(window.0, visual, alloc))))
    }

    fn free_colormap(&mut self, colormap: Colormap) -> Result<()> {
        xcall!(self.XFreeColormap(colormap.0));
        Ok(())
    }

    fn copy_colormap_and_free(&mut self, colormap: Colormap) -> Result<Colormap> {
        Ok(Colormap(xcall!(self.XCopyColormapAndFree(colormap.0))))
    }

    fn install_colormap(&mut self, colormap: Colormap) -> Result<()> {
        xcall!(self.XInstallColormap(colormap.0));
        Ok(())
    }

    fn uninstall_colormap(&mut self, colormap: Colormap) -> Result<()> {
        xcall!(self.XUninstallColormap(colormap.0));
        Ok(())
    }

    fn list_installed_colormaps(&self, window: Window) -> Result<Vec<Colormap>> {
        let mut count = 0;
        let list = xcall!(self.XListInstalledColormaps(window.0, &mut count));
        // SAFETY: list is null or holds count ids
        Ok(unsafe { self.take_list(list, count, |c| Colormap(*c)) })
    }

    fn alloc_color(&mut self, colormap: Colormap, color: Color) -> Result<Color> {
        let mut raw = color.into_raw();
        check_status(xcall!(self.XAllocColor(colormap.0, &mut raw)), "XAllocColor")?;
        Ok(Color::from_raw(raw))
    }

    fn alloc_named_color(&mut self, colormap: Colormap, name: &str) -> Result<ColorPair> {
        let c_name = CString::new(name)?;
        let (mut screen, mut exact) = (ffi::XColor::default(), ffi::XColor::default());
        if xcall!(self.XAllocNamedColor(colormap.0, c_name.as_ptr(), &mut screen, &mut exact)) == 0 {
            return Err(Error::BadName(name.to_string()));
        }
        Ok(ColorPair {
            screen: Color::from_raw(screen),
            exact: Color::from_raw(exact),
        })
    }

    fn lookup_color(&self, colormap: Colormap, name: &str) -> Result<ColorPair> {
        let c_name = CString::new(name)?;
        let (mut exact, mut screen) = (ffi::XColor::default(), ffi::XColor::default());
        if xcall!(self.XLookupColor(colormap.0, c_name.as_ptr(), &mut exact, &mut screen)) == 0 {
            return Err(Error::BadName(name.to_string()));
        }
        Ok(ColorPair {
            screen: Color::from_raw(screen),
            exact: Color::from_raw(exact),
        })
    }

    fn parse_color(&self, colormap: Colormap, spec: &str) -> Result<Color> {
        let c_spec = CString::new(spec)?;
        let mut raw = ffi::XColor::default();
        if xcall!(self.XParseColor(colormap.0, c_spec.as_ptr(), &mut raw)) == 0 {
            return Err(Error::BadName(spec.to_string()));
        }
        Ok(Color::from_raw(raw))
    }

    fn query_colors(&self, colormap: Colormap, colors: &mut [Color]) -> Result<()> {
        let mut raw: Vec<ffi::XColor> = colors.iter().map(|c| c.into_raw()).collect();
        xcall!(self.XQueryColors(colormap.0, raw.as_mut_ptr(), raw.len() as c_int));
        for (color, raw) in colors.iter_mut().zip(raw) {
            *color = Color::from_raw(raw);
        }
        Ok(())
    }

    fn store_colors(&mut self, colormap: Colormap, colors: &[Color]) -> Result<()> {
        let mut raw: Vec<ffi::XColor> = colors.iter().map(|c| c.into_raw()).collect();
        xcall!(self.XStoreColors(colormap.0, raw.as_mut_ptr(), raw.len() as c_int));
        Ok(())
    }

    fn free_colors(&mut self, colormap: Colormap, pixels: &[c_ulong], planes: c_ulong) -> Result<()> {
        let mut pixels = pixels.to_vec();
        xcall!(self.XFreeColors(colormap.0, pixels.as_mut_ptr(), pixels.len() as c_int, planes));
        Ok(())
    }

    fn get_visual_info(&self, template: &VisualTemplate) -> Result<Vec<VisualInfo>> {
        let mut raw = *template.template().as_raw();
        let mut count = 0;
        let list = xcall!(self.XGetVisualInfo(template.mask(), &mut raw, &mut count));
        // SAFETY: list is null or holds count entries
        Ok(unsafe { self.take_list(list, count, |v| VisualInfo::from_raw(*v)) })
    }

    fn match_visual_info(&self, screen: i32, depth: i32, class: VisualClass) -> Result<Option<VisualInfo>> {
        let mut raw = ffi::XVisualInfo::default();
        if xcall!(self.XMatchVisualInfo(screen, depth, class.to_raw(), &mut raw)) == 0 {
            return Ok(None);
        }
        Ok(Some(VisualInfo::from_raw(raw)))
    }

    // Fonts

    fn load_font(&mut self, name: &str) -> Result<Font> {
        let c_name = CString::new(name)?;
        Ok(Font(xcall!(self.XLoadFont(c_name.as_ptr()))))
    }

    fn unload_font(&mut self, font: Font) -> Result<()> {
        xcall!(self.XUnloadFont(font.0));
        Ok(())
    }

    fn load_query_font(&mut self, name: &str) -> Result<FontInfo> {
        let c_name = CString::new(name)?;
        let raw = xcall!(self.XLoadQueryFont(c_name.as_ptr()));
        if raw.is_null() {
            return Err(Error::BadName(name.to_string()));
        }
        // SAFETY: raw is a font struct from the library. XFreeFontInfo
        // releases the struct and leaves the font loaded.
        unsafe {
            let info = FontInfo::from_raw(&*raw);
            (self.xlib().XFreeFontInfo)(ptr::null_mut(), raw, 1);
            Ok(info)
        }
    }

    fn query_font(&mut self, font: ffi::XID) -> Result<FontInfo> {
        let raw = xcall!(self.XQueryFont(font));
        if raw.is_null() {
            return Err(Error::NullReturn("XQueryFont"));
        }
        // SAFETY: raw is a font struct from the library
        unsafe {
            let info = FontInfo::from_raw(&*raw);
            (self.xlib().XFreeFontInfo)(ptr::null_mut(), raw, 1);
            Ok(info)
        }
    }

    fn list_fonts(&self, pattern: &str, max_names: u32) -> Result<Vec<String>> {
        let c_pattern = CString::new(pattern)?;
        let mut count = 0;
        let list = xcall!(self.XListFonts(c_pattern.as_ptr(), max_names as c_int, &mut count));
        if list.is_null() {
            return Ok(Vec::new());
        }
        // SAFETY: list holds count names
        unsafe {
            let names = strings_from_c(list, count.max(0) as usize);
            (self.xlib().XFreeFontNames)(list);
            Ok(names)
        }
    }

    fn list_fonts_with_info(&self, pattern: &str, max_names: u32) -> Result<Vec<(String, FontInfo)>> {
        let c_pattern = CString::new(pattern)?;
        let mut count = 0;
        let mut info = ptr::null_mut();
        let names = xcall!(self.XListFontsWithInfo(c_pattern.as_ptr(), max_names as c_int, &mut count, &mut info));
        if names.is_null() {
            return Ok(Vec::new());
        }
        // SAFETY: names and info each hold count entries and are released
        // together by XFreeFontInfo
        unsafe {
            let count = count.max(0) as usize;
            let fonts = strings_from_c(names, count)
                .into_iter()
                .zip(std::slice::from_raw_parts(info, count))
                .map(|(name, raw)| (name, FontInfo::from_raw(raw)))
                .collect();
            (self.xlib().XFreeFontInfo)(names, info, count as c_int);
            Ok(fonts)
        }
    }

    fn text_width(&self, font: &FontInfo, text: &[u8]) -> Result<i32> {
        log::debug!("XTextWidth");
        self.lib.text_width(font, text)
    }

    fn text_extents(&self, font: &FontInfo, text: &[u8]) -> Result<TextExtents> {
        log::debug!("XTextExtents");
        self.lib.text_extents(font, text)
    }

    fn query_text_extents(&self, font: ffi::XID, text: &[u8]) -> Result<TextExtents> {
        let (mut direction, mut font_ascent, mut font_descent) = (0, 0, 0);
        let mut overall = ffi::XCharStruct::default();
        xcall!(self.XQueryTextExtents(
            font,
            text.as_ptr() as *const c_char,
            text.len() as c_int,
            &mut direction,
            &mut font_ascent,
            &mut font_descent,
            &mut overall,
        ));
        Ok(TextExtents {
            direction,
            font_ascent,
            font_descent,
            overall: CharMetrics::from_raw(overall),
        })
    }

    fn set_font_path(&mut self, directories: &[&str]) -> Result<()> {
        let strings = c_strings(directories)?;
        let mut pointers = c_pointers(&strings);
        xcall!(self.XSetFontPath(pointers.as_mut_ptr(), pointers.len() as c_int));
        Ok(())
    }

    fn get_font_path(&self) -> Result<Vec<String>> {
        let mut count = 0;
        let list = xcall!(self.XGetFontPath(&mut count));
        if list.is_null() {
            return Ok(Vec::new());
        }
        // SAFETY: list holds count directories
        unsafe {
            let path = strings_from_c(list, count.max(0) as usize);
            (self.xlib().XFreeFontPath)(list);
            Ok(path)
        }
    }

    // Access control and screen saver

    fn add_host(&mut self, host: &HostAddress) -> Result<()> {
        host.with_raw(|raw| xcall!(self.XAddHost(raw)));
        Ok(())
    }

    fn remove_host(&mut self, host: &HostAddress) -> Result<()> {
        host.with_raw(|raw| xcall!(self.XRemoveHost(raw)));
        Ok(())
    }

    fn list_hosts(&self) -> Result<(Vec<HostAddress>, bool)> {
        let mut count = 0;
        let mut enabled = 0;
        let list = xcall!(self.XListHosts(&mut count, &mut enabled));
        // SAFETY: list is null or holds count entries whose addresses live
        // in the same allocation
        let hosts = unsafe { self.take_list(list, count, |h| HostAddress::from_raw(h)) };
        Ok((hosts.into_iter().flatten().collect(), from_bool(enabled)))
    }

    fn set_access_control(&mut self, enabled: bool) -> Result<()> {
        let mode = if enabled { ffi::EnableAccess } else { ffi::DisableAccess };
        xcall!(self.XSetAccessControl(mode));
        Ok(())
    }

    fn set_screen_saver(&mut self, settings: &ScreenSaverSettings) -> Result<()> {
        xcall!(self.XSetScreenSaver(
            settings.timeout,
            settings.interval,
            settings.prefer_blanking,
            settings.allow_exposures,
        ));
        Ok(())
    }

    fn get_screen_saver(&self) -> Result<ScreenSaverSettings> {
        let (mut timeout, mut interval, mut prefer_blanking, mut allow_exposures) = (0, 0, 0, 0);
        xcall!(self.XGetScreenSaver(&mut timeout, &mut interval, &mut prefer_blanking, &mut allow_exposures));
        Ok(ScreenSaverSettings {
            timeout,
            interval,
            prefer_blanking,
            allow_exposures,
        })
    }

    fn force_screen_saver(&mut self, mode: ScreenSaverMode) -> Result<()> {
        xcall!(self.XForceScreenSaver(mode.to_raw()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_bad_display_fails() {
        let Some(xlib) = ffi::xlib_for_tests() else {
            return;
        };
        let lib = Library::from_xlib(xlib);
        match NativeBackend::open(lib, Some(":4095")) {
            Err(Error::OpenDisplay(name)) => assert_eq!(name, ":4095"),
            Err(other) => panic!("unexpected error {:?}", other),
            Ok(_) => {}
        }
    }

    #[test]
    fn test_events_carry_the_connection() {
        let Some(xlib) = ffi::xlib_for_tests() else {
            return;
        };
        let fake = 0x1000 as *mut ffi::Display;
        let backend = NativeBackend {
            lib: Library::from_xlib(xlib),
            display: fake,
        };
        let event = Event::ClientMessage(crate::event::ClientMessageEvent::default());
        let raw = backend.raw_event(&event);
        // The connection is not real, so it must never reach XCloseDisplay
        std::mem::forget(backend);
        // SAFETY: any is valid for every event type
        assert_eq!(unsafe { raw.any.display }, fake);
        assert_eq!(unsafe { raw.any.type_ }, ffi::ClientMessage);
    }
}
