//! Xlib entry points, resolved from the shared library at run time
//!
//! The table below is the crate's declaration of the Xlib C API. Each entry
//! becomes a typed `unsafe extern "C" fn` field on [`Xlib`], looked up with
//! `dlsym` when the library is opened. Variadic entry points (the XIM/XOC
//! value-list calls) are not declared.

use std::ffi::{CStr, CString};
use std::fmt;

use libc::{
    c_char, c_int, c_long, c_uchar, c_uint, c_ulong, c_void,
};

use super::events::*;
use super::structs::*;
use super::types::*;
use crate::error::{Error, Result};

/// Sonames tried in order by [`Xlib::open`]
pub const DEFAULT_LIBRARY_NAMES: &[&str] = &["libX11.so.6", "libX11.so"];

/// A `dlopen` handle, closed on drop
pub struct LibraryHandle {
    handle: *mut c_void,
    name: String,
}

// SAFETY: the handle is only used for dlsym/dlclose, both thread-safe
unsafe impl Send for LibraryHandle {}
unsafe impl Sync for LibraryHandle {}

impl LibraryHandle {
    pub fn open(names: &[&str]) -> Result<Self> {
        let mut reasons = Vec::new();

        for name in names {
            let c_name = CString::new(*name)?;
            // SAFETY: c_name is a valid NUL-terminated string
            let handle = unsafe { libc::dlopen(c_name.as_ptr(), libc::RTLD_LAZY | libc::RTLD_LOCAL) };
            if !handle.is_null() {
                log::debug!("Loaded {}", name);
                return Ok(LibraryHandle {
                    handle,
                    name: name.to_string(),
                });
            }
            reasons.push(format!("{}: {}", name, last_dl_error()));
        }

        Err(Error::LibraryLoad {
            names: names.iter().map(|s| s.to_string()).collect(),
            reason: reasons.join("; "),
        })
    }

    /// Look up a NUL-terminated symbol name
    pub fn symbol(&self, name: &'static str) -> Result<*mut c_void> {
        debug_assert!(name.ends_with('\0'));
        // SAFETY: handle is live and name is NUL-terminated
        let ptr = unsafe { libc::dlsym(self.handle, name.as_ptr() as *const c_char) };
        if ptr.is_null() {
            return Err(Error::MissingSymbol(name.trim_end_matches('\0').to_string()));
        }
        Ok(ptr)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for LibraryHandle {
    fn drop(&mut self) {
        // SAFETY: handle came from a successful dlopen
        unsafe {
            libc::dlclose(self.handle);
        }
    }
}

fn last_dl_error() -> String {
    // SAFETY: dlerror returns either null or a valid C string
    unsafe {
        let err = libc::dlerror();
        if err.is_null() {
            "unknown error".to_string()
        } else {
            CStr::from_ptr(err).to_string_lossy().into_owned()
        }
    }
}

macro_rules! x11_functions {
    (
        $(#[$attr:meta])*
        pub struct $name:ident;
        $(fn $func:ident($($arg:ty),* $(,)?) -> $ret:ty;)*
    ) => {
        $(#[$attr])*
        pub struct $name {
            lib: LibraryHandle,
            $(pub $func: unsafe extern "C" fn($($arg),*) -> $ret,)*
        }

        impl $name {
            /// Open libX11 under its usual sonames
            pub fn open() -> Result<Self> {
                Self::open_any(DEFAULT_LIBRARY_NAMES)
            }

            /// Open the first loadable library among `names` and resolve
            /// every entry point. A missing symbol fails the whole load.
            pub fn open_any(names: &[&str]) -> Result<Self> {
                let lib = LibraryHandle::open(names)?;
                // SAFETY: each symbol is given the signature the Xlib
                // headers declare for it
                unsafe {
                    Ok($name {
                        $($func: std::mem::transmute::<*mut c_void, unsafe extern "C" fn($($arg),*) -> $ret>(
                            lib.symbol(concat!(stringify!($func), "\0"))?,
                        ),)*
                        lib,
                    })
                }
            }

            pub fn library_name(&self) -> &str {
                self.lib.name()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("library", &self.lib.name())
                    .finish_non_exhaustive()
            }
        }
    };
}

x11_functions! {
    /// Function table of libX11
    #[allow(non_snake_case)]
    pub struct Xlib;

    // Connection and display information
    fn XOpenDisplay(*const c_char) -> *mut Display;
    fn XCloseDisplay(*mut Display) -> c_int;
    fn XDisplayName(*const c_char) -> *mut c_char;
    fn XDisplayString(*mut Display) -> *mut c_char;
    fn XConnectionNumber(*mut Display) -> c_int;
    fn XDefaultScreen(*mut Display) -> c_int;
    fn XScreenCount(*mut Display) -> c_int;
    fn XScreenOfDisplay(*mut Display, c_int) -> *mut Screen;
    fn XRootWindow(*mut Display, c_int) -> Window;
    fn XDefaultRootWindow(*mut Display) -> Window;
    fn XDefaultVisual(*mut Display, c_int) -> *mut Visual;
    fn XDefaultDepth(*mut Display, c_int) -> c_int;
    fn XDefaultColormap(*mut Display, c_int) -> Colormap;
    fn XDefaultGC(*mut Display, c_int) -> GC;
    fn XBlackPixel(*mut Display, c_int) -> c_ulong;
    fn XWhitePixel(*mut Display, c_int) -> c_ulong;
    fn XDisplayWidth(*mut Display, c_int) -> c_int;
    fn XDisplayHeight(*mut Display, c_int) -> c_int;
    fn XDisplayWidthMM(*mut Display, c_int) -> c_int;
    fn XDisplayHeightMM(*mut Display, c_int) -> c_int;
    fn XDisplayPlanes(*mut Display, c_int) -> c_int;
    fn XDisplayCells(*mut Display, c_int) -> c_int;
    fn XServerVendor(*mut Display) -> *mut c_char;
    fn XVendorRelease(*mut Display) -> c_int;
    fn XProtocolVersion(*mut Display) -> c_int;
    fn XProtocolRevision(*mut Display) -> c_int;
    fn XQLength(*mut Display) -> c_int;
    fn XMaxRequestSize(*mut Display) -> c_long;
    fn XExtendedMaxRequestSize(*mut Display) -> c_long;
    fn XNextRequest(*mut Display) -> c_ulong;
    fn XLastKnownRequestProcessed(*mut Display) -> c_ulong;
    fn XImageByteOrder(*mut Display) -> c_int;
    fn XBitmapUnit(*mut Display) -> c_int;
    fn XBitmapBitOrder(*mut Display) -> c_int;
    fn XBitmapPad(*mut Display) -> c_int;
    fn XListPixmapFormats(*mut Display, *mut c_int) -> *mut XPixmapFormatValues;
    fn XListDepths(*mut Display, c_int, *mut c_int) -> *mut c_int;
    fn XDisplayMotionBufferSize(*mut Display) -> c_ulong;
    fn XFree(*mut c_void) -> c_int;
    fn XFlush(*mut Display) -> c_int;
    fn XSync(*mut Display, Bool) -> c_int;
    fn XSynchronize(*mut Display, Bool) -> XAfterFunction;
    fn XNoOp(*mut Display) -> c_int;
    fn XBell(*mut Display, c_int) -> c_int;
    fn XInitThreads() -> Status;
    fn XLockDisplay(*mut Display) -> ();
    fn XUnlockDisplay(*mut Display) -> ();
    fn XSetErrorHandler(XErrorHandler) -> XErrorHandler;
    fn XSetIOErrorHandler(XIOErrorHandler) -> XIOErrorHandler;
    fn XGetErrorText(*mut Display, c_int, *mut c_char, c_int) -> c_int;
    fn XGetErrorDatabaseText(*mut Display, *const c_char, *const c_char, *const c_char, *mut c_char, c_int) -> c_int;
    fn XSetCloseDownMode(*mut Display, c_int) -> c_int;
    fn XKillClient(*mut Display, XID) -> c_int;
    fn XGrabServer(*mut Display) -> c_int;
    fn XUngrabServer(*mut Display) -> c_int;
    fn XQueryExtension(*mut Display, *const c_char, *mut c_int, *mut c_int, *mut c_int) -> Bool;
    fn XListExtensions(*mut Display, *mut c_int) -> *mut *mut c_char;
    fn XFreeExtensionList(*mut *mut c_char) -> c_int;
    fn XGetMotionEvents(*mut Display, Window, Time, Time, *mut c_int) -> *mut XTimeCoord;
    fn XResourceManagerString(*mut Display) -> *mut c_char;
    fn XScreenResourceString(*mut Screen) -> *mut c_char;
    fn XGetDefault(*mut Display, *const c_char, *const c_char) -> *mut c_char;

    // Window management
    fn XCreateSimpleWindow(*mut Display, Window, c_int, c_int, c_uint, c_uint, c_uint, c_ulong, c_ulong) -> Window;
    fn XCreateWindow(*mut Display, Window, c_int, c_int, c_uint, c_uint, c_uint, c_int, c_uint, *mut Visual, c_ulong, *mut XSetWindowAttributes) -> Window;
    fn XDestroyWindow(*mut Display, Window) -> c_int;
    fn XDestroySubwindows(*mut Display, Window) -> c_int;
    fn XMapWindow(*mut Display, Window) -> c_int;
    fn XMapRaised(*mut Display, Window) -> c_int;
    fn XMapSubwindows(*mut Display, Window) -> c_int;
    fn XUnmapWindow(*mut Display, Window) -> c_int;
    fn XUnmapSubwindows(*mut Display, Window) -> c_int;
    fn XRaiseWindow(*mut Display, Window) -> c_int;
    fn XLowerWindow(*mut Display, Window) -> c_int;
    fn XCirculateSubwindows(*mut Display, Window, c_int) -> c_int;
    fn XRestackWindows(*mut Display, *mut Window, c_int) -> c_int;
    fn XMoveWindow(*mut Display, Window, c_int, c_int) -> c_int;
    fn XResizeWindow(*mut Display, Window, c_uint, c_uint) -> c_int;
    fn XMoveResizeWindow(*mut Display, Window, c_int, c_int, c_uint, c_uint) -> c_int;
    fn XSetWindowBorderWidth(*mut Display, Window, c_uint) -> c_int;
    fn XConfigureWindow(*mut Display, Window, c_uint, *mut XWindowChanges) -> c_int;
    fn XChangeWindowAttributes(*mut Display, Window, c_ulong, *mut XSetWindowAttributes) -> c_int;
    fn XGetWindowAttributes(*mut Display, Window, *mut XWindowAttributes) -> Status;
    fn XGetGeometry(*mut Display, Drawable, *mut Window, *mut c_int, *mut c_int, *mut c_uint, *mut c_uint, *mut c_uint, *mut c_uint) -> Status;
    fn XQueryTree(*mut Display, Window, *mut Window, *mut Window, *mut *mut Window, *mut c_uint) -> Status;
    fn XReparentWindow(*mut Display, Window, Window, c_int, c_int) -> c_int;
    fn XTranslateCoordinates(*mut Display, Window, Window, c_int, c_int, *mut c_int, *mut c_int, *mut Window) -> Bool;
    fn XSetWindowBackground(*mut Display, Window, c_ulong) -> c_int;
    fn XSetWindowBackgroundPixmap(*mut Display, Window, Pixmap) -> c_int;
    fn XSetWindowBorder(*mut Display, Window, c_ulong) -> c_int;
    fn XSetWindowColormap(*mut Display, Window, Colormap) -> c_int;
    fn XClearWindow(*mut Display, Window) -> c_int;
    fn XClearArea(*mut Display, Window, c_int, c_int, c_uint, c_uint, Bool) -> c_int;
    fn XSelectInput(*mut Display, Window, c_long) -> c_int;
    fn XDefineCursor(*mut Display, Window, Cursor) -> c_int;
    fn XUndefineCursor(*mut Display, Window) -> c_int;
    fn XIconifyWindow(*mut Display, Window, c_int) -> Status;
    fn XWithdrawWindow(*mut Display, Window, c_int) -> Status;
    fn XAddToSaveSet(*mut Display, Window) -> c_int;
    fn XRemoveFromSaveSet(*mut Display, Window) -> c_int;

    // Window manager hints
    fn XStoreName(*mut Display, Window, *const c_char) -> c_int;
    fn XFetchName(*mut Display, Window, *mut *mut c_char) -> Status;
    fn XSetIconName(*mut Display, Window, *const c_char) -> c_int;
    fn XGetIconName(*mut Display, Window, *mut *mut c_char) -> Status;
    fn XSetWMProtocols(*mut Display, Window, *mut Atom, c_int) -> Status;
    fn XGetWMProtocols(*mut Display, Window, *mut *mut Atom, *mut c_int) -> Status;
    fn XSetWMHints(*mut Display, Window, *mut XWMHints) -> c_int;
    fn XGetWMHints(*mut Display, Window) -> *mut XWMHints;
    fn XSetWMNormalHints(*mut Display, Window, *mut XSizeHints) -> ();
    fn XGetWMNormalHints(*mut Display, Window, *mut XSizeHints, *mut c_long) -> Status;
    fn XSetClassHint(*mut Display, Window, *mut XClassHint) -> c_int;
    fn XGetClassHint(*mut Display, Window, *mut XClassHint) -> Status;
    fn XSetTransientForHint(*mut Display, Window, Window) -> c_int;
    fn XGetTransientForHint(*mut Display, Window, *mut Window) -> Status;
    fn XSetWMName(*mut Display, Window, *mut XTextProperty) -> ();
    fn XGetWMName(*mut Display, Window, *mut XTextProperty) -> Status;
    fn XSetIconSizes(*mut Display, Window, *mut XIconSize, c_int) -> c_int;
    fn XGetIconSizes(*mut Display, Window, *mut *mut XIconSize, *mut c_int) -> Status;
    fn XSetCommand(*mut Display, Window, *mut *mut c_char, c_int) -> c_int;
    fn XGetCommand(*mut Display, Window, *mut *mut *mut c_char, *mut c_int) -> Status;
    fn XAllocSizeHints() -> *mut XSizeHints;
    fn XAllocWMHints() -> *mut XWMHints;
    fn XAllocClassHint() -> *mut XClassHint;
    fn XAllocIconSize() -> *mut XIconSize;
    fn XStringListToTextProperty(*mut *mut c_char, c_int, *mut XTextProperty) -> Status;
    fn XTextPropertyToStringList(*mut XTextProperty, *mut *mut *mut c_char, *mut c_int) -> Status;
    fn XFreeStringList(*mut *mut c_char) -> ();

    // Atoms, properties and selections
    fn XInternAtom(*mut Display, *const c_char, Bool) -> Atom;
    fn XInternAtoms(*mut Display, *mut *mut c_char, c_int, Bool, *mut Atom) -> Status;
    fn XGetAtomName(*mut Display, Atom) -> *mut c_char;
    fn XChangeProperty(*mut Display, Window, Atom, Atom, c_int, c_int, *const c_uchar, c_int) -> c_int;
    fn XGetWindowProperty(*mut Display, Window, Atom, c_long, c_long, Bool, Atom, *mut Atom, *mut c_int, *mut c_ulong, *mut c_ulong, *mut *mut c_uchar) -> c_int;
    fn XDeleteProperty(*mut Display, Window, Atom) -> c_int;
    fn XListProperties(*mut Display, Window, *mut c_int) -> *mut Atom;
    fn XRotateWindowProperties(*mut Display, Window, *mut Atom, c_int, c_int) -> c_int;
    fn XSetSelectionOwner(*mut Display, Atom, Window, Time) -> c_int;
    fn XGetSelectionOwner(*mut Display, Atom) -> Window;
    fn XConvertSelection(*mut Display, Atom, Atom, Atom, Window, Time) -> c_int;

    // Events
    fn XNextEvent(*mut Display, *mut XEvent) -> c_int;
    fn XPeekEvent(*mut Display, *mut XEvent) -> c_int;
    fn XPending(*mut Display) -> c_int;
    fn XEventsQueued(*mut Display, c_int) -> c_int;
    fn XWindowEvent(*mut Display, Window, c_long, *mut XEvent) -> c_int;
    fn XCheckWindowEvent(*mut Display, Window, c_long, *mut XEvent) -> Bool;
    fn XMaskEvent(*mut Display, c_long, *mut XEvent) -> c_int;
    fn XCheckMaskEvent(*mut Display, c_long, *mut XEvent) -> Bool;
    fn XCheckTypedEvent(*mut Display, c_int, *mut XEvent) -> Bool;
    fn XCheckTypedWindowEvent(*mut Display, Window, c_int, *mut XEvent) -> Bool;
    fn XPutBackEvent(*mut Display, *mut XEvent) -> c_int;
    fn XSendEvent(*mut Display, Window, Bool, c_long, *mut XEvent) -> Status;
    fn XAllowEvents(*mut Display, c_int, Time) -> c_int;
    fn XFilterEvent(*mut XEvent, Window) -> Bool;
    fn XGetEventData(*mut Display, *mut XGenericEventCookie) -> Bool;
    fn XFreeEventData(*mut Display, *mut XGenericEventCookie) -> ();
    fn XRefreshKeyboardMapping(*mut XMappingEvent) -> c_int;

    // Pointer and keyboard
    fn XGrabPointer(*mut Display, Window, Bool, c_uint, c_int, c_int, Window, Cursor, Time) -> c_int;
    fn XUngrabPointer(*mut Display, Time) -> c_int;
    fn XChangeActivePointerGrab(*mut Display, c_uint, Cursor, Time) -> c_int;
    fn XGrabKeyboard(*mut Display, Window, Bool, c_int, c_int, Time) -> c_int;
    fn XUngrabKeyboard(*mut Display, Time) -> c_int;
    fn XGrabButton(*mut Display, c_uint, c_uint, Window, Bool, c_uint, c_int, c_int, Window, Cursor) -> c_int;
    fn XUngrabButton(*mut Display, c_uint, c_uint, Window) -> c_int;
    fn XGrabKey(*mut Display, c_int, c_uint, Window, Bool, c_int, c_int) -> c_int;
    fn XUngrabKey(*mut Display, c_int, c_uint, Window) -> c_int;
    fn XQueryPointer(*mut Display, Window, *mut Window, *mut Window, *mut c_int, *mut c_int, *mut c_int, *mut c_int, *mut c_uint) -> Bool;
    fn XWarpPointer(*mut Display, Window, Window, c_int, c_int, c_uint, c_uint, c_int, c_int) -> c_int;
    fn XSetInputFocus(*mut Display, Window, c_int, Time) -> c_int;
    fn XGetInputFocus(*mut Display, *mut Window, *mut c_int) -> c_int;
    fn XKeysymToKeycode(*mut Display, KeySym) -> KeyCode;
    fn XKeycodeToKeysym(*mut Display, KeyCode, c_int) -> KeySym;
    fn XLookupKeysym(*mut XKeyEvent, c_int) -> KeySym;
    fn XLookupString(*mut XKeyEvent, *mut c_char, c_int, *mut KeySym, *mut XComposeStatus) -> c_int;
    fn XStringToKeysym(*const c_char) -> KeySym;
    fn XKeysymToString(KeySym) -> *mut c_char;
    fn XConvertCase(KeySym, *mut KeySym, *mut KeySym) -> ();
    fn XDisplayKeycodes(*mut Display, *mut c_int, *mut c_int) -> c_int;
    fn XGetKeyboardMapping(*mut Display, KeyCode, c_int, *mut c_int) -> *mut KeySym;
    fn XGetModifierMapping(*mut Display) -> *mut XModifierKeymap;
    fn XFreeModifiermap(*mut XModifierKeymap) -> c_int;
    fn XQueryKeymap(*mut Display, *mut c_char) -> c_int;
    fn XGetKeyboardControl(*mut Display, *mut XKeyboardState) -> c_int;
    fn XChangeKeyboardControl(*mut Display, c_ulong, *mut XKeyboardControl) -> c_int;
    fn XAutoRepeatOn(*mut Display) -> c_int;
    fn XAutoRepeatOff(*mut Display) -> c_int;
    fn XGetPointerMapping(*mut Display, *mut c_uchar, c_int) -> c_int;
    fn XGetPointerControl(*mut Display, *mut c_int, *mut c_int, *mut c_int) -> c_int;
    fn XChangePointerControl(*mut Display, Bool, Bool, c_int, c_int, c_int) -> c_int;

    // Graphics contexts
    fn XCreateGC(*mut Display, Drawable, c_ulong, *mut XGCValues) -> GC;
    fn XChangeGC(*mut Display, GC, c_ulong, *mut XGCValues) -> c_int;
    fn XGetGCValues(*mut Display, GC, c_ulong, *mut XGCValues) -> Status;
    fn XCopyGC(*mut Display, GC, c_ulong, GC) -> c_int;
    fn XFreeGC(*mut Display, GC) -> c_int;
    fn XGContextFromGC(GC) -> GContext;
    fn XSetForeground(*mut Display, GC, c_ulong) -> c_int;
    fn XSetBackground(*mut Display, GC, c_ulong) -> c_int;
    fn XSetFunction(*mut Display, GC, c_int) -> c_int;
    fn XSetPlaneMask(*mut Display, GC, c_ulong) -> c_int;
    fn XSetLineAttributes(*mut Display, GC, c_uint, c_int, c_int, c_int) -> c_int;
    fn XSetDashes(*mut Display, GC, c_int, *const c_char, c_int) -> c_int;
    fn XSetFillStyle(*mut Display, GC, c_int) -> c_int;
    fn XSetFillRule(*mut Display, GC, c_int) -> c_int;
    fn XSetFont(*mut Display, GC, Font) -> c_int;
    fn XSetClipMask(*mut Display, GC, Pixmap) -> c_int;
    fn XSetClipOrigin(*mut Display, GC, c_int, c_int) -> c_int;
    fn XSetClipRectangles(*mut Display, GC, c_int, c_int, *mut XRectangle, c_int, c_int) -> c_int;
    fn XSetRegion(*mut Display, GC, Region) -> c_int;
    fn XSetSubwindowMode(*mut Display, GC, c_int) -> c_int;
    fn XSetGraphicsExposures(*mut Display, GC, Bool) -> c_int;
    fn XSetArcMode(*mut Display, GC, c_int) -> c_int;
    fn XSetTile(*mut Display, GC, Pixmap) -> c_int;
    fn XSetStipple(*mut Display, GC, Pixmap) -> c_int;
    fn XSetTSOrigin(*mut Display, GC, c_int, c_int) -> c_int;

    // Drawing
    fn XDrawPoint(*mut Display, Drawable, GC, c_int, c_int) -> c_int;
    fn XDrawPoints(*mut Display, Drawable, GC, *mut XPoint, c_int, c_int) -> c_int;
    fn XDrawLine(*mut Display, Drawable, GC, c_int, c_int, c_int, c_int) -> c_int;
    fn XDrawLines(*mut Display, Drawable, GC, *mut XPoint, c_int, c_int) -> c_int;
    fn XDrawSegments(*mut Display, Drawable, GC, *mut XSegment, c_int) -> c_int;
    fn XDrawRectangle(*mut Display, Drawable, GC, c_int, c_int, c_uint, c_uint) -> c_int;
    fn XDrawRectangles(*mut Display, Drawable, GC, *mut XRectangle, c_int) -> c_int;
    fn XFillRectangle(*mut Display, Drawable, GC, c_int, c_int, c_uint, c_uint) -> c_int;
    fn XFillRectangles(*mut Display, Drawable, GC, *mut XRectangle, c_int) -> c_int;
    fn XDrawArc(*mut Display, Drawable, GC, c_int, c_int, c_uint, c_uint, c_int, c_int) -> c_int;
    fn XDrawArcs(*mut Display, Drawable, GC, *mut XArc, c_int) -> c_int;
    fn XFillArc(*mut Display, Drawable, GC, c_int, c_int, c_uint, c_uint, c_int, c_int) -> c_int;
    fn XFillArcs(*mut Display, Drawable, GC, *mut XArc, c_int) -> c_int;
    fn XFillPolygon(*mut Display, Drawable, GC, *mut XPoint, c_int, c_int, c_int) -> c_int;
    fn XDrawString(*mut Display, Drawable, GC, c_int, c_int, *const c_char, c_int) -> c_int;
    fn XDrawImageString(*mut Display, Drawable, GC, c_int, c_int, *const c_char, c_int) -> c_int;
    fn XDrawString16(*mut Display, Drawable, GC, c_int, c_int, *const XChar2b, c_int) -> c_int;
    fn XDrawText(*mut Display, Drawable, GC, c_int, c_int, *mut XTextItem, c_int) -> c_int;
    fn XCopyArea(*mut Display, Drawable, Drawable, GC, c_int, c_int, c_uint, c_uint, c_int, c_int) -> c_int;
    fn XCopyPlane(*mut Display, Drawable, Drawable, GC, c_int, c_int, c_uint, c_uint, c_int, c_int, c_ulong) -> c_int;

    // Pixmaps, images and cursors
    fn XCreatePixmap(*mut Display, Drawable, c_uint, c_uint, c_uint) -> Pixmap;
    fn XFreePixmap(*mut Display, Pixmap) -> c_int;
    fn XCreateBitmapFromData(*mut Display, Drawable, *const c_char, c_uint, c_uint) -> Pixmap;
    fn XCreatePixmapFromBitmapData(*mut Display, Drawable, *mut c_char, c_uint, c_uint, c_ulong, c_ulong, c_uint) -> Pixmap;
    fn XCreateImage(*mut Display, *mut Visual, c_uint, c_int, c_int, *mut c_char, c_uint, c_uint, c_int, c_int) -> *mut XImage;
    fn XInitImage(*mut XImage) -> Status;
    fn XGetImage(*mut Display, Drawable, c_int, c_int, c_uint, c_uint, c_ulong, c_int) -> *mut XImage;
    fn XPutImage(*mut Display, Drawable, GC, *mut XImage, c_int, c_int, c_int, c_int, c_uint, c_uint) -> c_int;
    fn XCreateFontCursor(*mut Display, c_uint) -> Cursor;
    fn XCreatePixmapCursor(*mut Display, Pixmap, Pixmap, *mut XColor, *mut XColor, c_uint, c_uint) -> Cursor;
    fn XCreateGlyphCursor(*mut Display, Font, Font, c_uint, c_uint, *const XColor, *const XColor) -> Cursor;
    fn XFreeCursor(*mut Display, Cursor) -> c_int;
    fn XRecolorCursor(*mut Display, Cursor, *mut XColor, *mut XColor) -> c_int;
    fn XQueryBestSize(*mut Display, c_int, Drawable, c_uint, c_uint, *mut c_uint, *mut c_uint) -> Status;
    fn XQueryBestCursor(*mut Display, Drawable, c_uint, c_uint, *mut c_uint, *mut c_uint) -> Status;

    // Colormaps and colors
    fn XCreateColormap(*mut Display, Window, *mut Visual, c_int) -> Colormap;
    fn XFreeColormap(*mut Display, Colormap) -> c_int;
    fn XCopyColormapAndFree(*mut Display, Colormap) -> Colormap;
    fn XInstallColormap(*mut Display, Colormap) -> c_int;
    fn XUninstallColormap(*mut Display, Colormap) -> c_int;
    fn XListInstalledColormaps(*mut Display, Window, *mut c_int) -> *mut Colormap;
    fn XAllocColor(*mut Display, Colormap, *mut XColor) -> Status;
    fn XAllocNamedColor(*mut Display, Colormap, *const c_char, *mut XColor, *mut XColor) -> Status;
    fn XAllocColorCells(*mut Display, Colormap, Bool, *mut c_ulong, c_uint, *mut c_ulong, c_uint) -> Status;
    fn XLookupColor(*mut Display, Colormap, *const c_char, *mut XColor, *mut XColor) -> Status;
    fn XParseColor(*mut Display, Colormap, *const c_char, *mut XColor) -> Status;
    fn XQueryColor(*mut Display, Colormap, *mut XColor) -> c_int;
    fn XQueryColors(*mut Display, Colormap, *mut XColor, c_int) -> c_int;
    fn XStoreColor(*mut Display, Colormap, *mut XColor) -> c_int;
    fn XStoreColors(*mut Display, Colormap, *mut XColor, c_int) -> c_int;
    fn XStoreNamedColor(*mut Display, Colormap, *const c_char, c_ulong, c_int) -> c_int;
    fn XFreeColors(*mut Display, Colormap, *mut c_ulong, c_int, c_ulong) -> c_int;

    // Visuals
    fn XGetVisualInfo(*mut Display, c_long, *mut XVisualInfo, *mut c_int) -> *mut XVisualInfo;
    fn XMatchVisualInfo(*mut Display, c_int, c_int, c_int, *mut XVisualInfo) -> Status;
    fn XVisualIDFromVisual(*mut Visual) -> VisualID;

    // Fonts and text
    fn XLoadFont(*mut Display, *const c_char) -> Font;
    fn XUnloadFont(*mut Display, Font) -> c_int;
    fn XLoadQueryFont(*mut Display, *const c_char) -> *mut XFontStruct;
    fn XQueryFont(*mut Display, XID) -> *mut XFontStruct;
    fn XFreeFont(*mut Display, *mut XFontStruct) -> c_int;
    fn XFreeFontInfo(*mut *mut c_char, *mut XFontStruct, c_int) -> c_int;
    fn XListFonts(*mut Display, *const c_char, c_int, *mut c_int) -> *mut *mut c_char;
    fn XFreeFontNames(*mut *mut c_char) -> c_int;
    fn XListFontsWithInfo(*mut Display, *const c_char, c_int, *mut c_int, *mut *mut XFontStruct) -> *mut *mut c_char;
    fn XTextWidth(*mut XFontStruct, *const c_char, c_int) -> c_int;
    fn XTextWidth16(*mut XFontStruct, *const XChar2b, c_int) -> c_int;
    fn XTextExtents(*mut XFontStruct, *const c_char, c_int, *mut c_int, *mut c_int, *mut c_int, *mut XCharStruct) -> c_int;
    fn XQueryTextExtents(*mut Display, XID, *const c_char, c_int, *mut c_int, *mut c_int, *mut c_int, *mut XCharStruct) -> c_int;
    fn XGetFontProperty(*mut XFontStruct, Atom, *mut c_ulong) -> Bool;
    fn XSetFontPath(*mut Display, *mut *mut c_char, c_int) -> c_int;
    fn XGetFontPath(*mut Display, *mut c_int) -> *mut *mut c_char;
    fn XFreeFontPath(*mut *mut c_char) -> c_int;

    // Host access and screen saver
    fn XAddHost(*mut Display, *mut XHostAddress) -> c_int;
    fn XAddHosts(*mut Display, *mut XHostAddress, c_int) -> c_int;
    fn XRemoveHost(*mut Display, *mut XHostAddress) -> c_int;
    fn XRemoveHosts(*mut Display, *mut XHostAddress, c_int) -> c_int;
    fn XListHosts(*mut Display, *mut c_int, *mut Bool) -> *mut XHostAddress;
    fn XEnableAccessControl(*mut Display) -> c_int;
    fn XDisableAccessControl(*mut Display) -> c_int;
    fn XSetAccessControl(*mut Display, c_int) -> c_int;
    fn XSetScreenSaver(*mut Display, c_int, c_int, c_int, c_int) -> c_int;
    fn XGetScreenSaver(*mut Display, *mut c_int, *mut c_int, *mut c_int, *mut c_int) -> c_int;
    fn XForceScreenSaver(*mut Display, c_int) -> c_int;
    fn XActivateScreenSaver(*mut Display) -> c_int;
    fn XResetScreenSaver(*mut Display) -> c_int;

    // Regions
    fn XCreateRegion() -> Region;
    fn XDestroyRegion(Region) -> c_int;
    fn XPolygonRegion(*mut XPoint, c_int, c_int) -> Region;
    fn XUnionRectWithRegion(*mut XRectangle, Region, Region) -> c_int;
    fn XUnionRegion(Region, Region, Region) -> c_int;
    fn XIntersectRegion(Region, Region, Region) -> c_int;
    fn XSubtractRegion(Region, Region, Region) -> c_int;
    fn XXorRegion(Region, Region, Region) -> c_int;
    fn XOffsetRegion(Region, c_int, c_int) -> c_int;
    fn XShrinkRegion(Region, c_int, c_int) -> c_int;
    fn XEmptyRegion(Region) -> Bool;
    fn XEqualRegion(Region, Region) -> Bool;
    fn XPointInRegion(Region, c_int, c_int) -> Bool;
    fn XRectInRegion(Region, c_int, c_int, c_uint, c_uint) -> c_int;
    fn XClipBox(Region, *mut XRectangle) -> c_int;

    // Resource manager
    fn XrmInitialize() -> ();
    fn XrmGetStringDatabase(*const c_char) -> XrmDatabase;
    fn XrmGetFileDatabase(*const c_char) -> XrmDatabase;
    fn XrmPutFileDatabase(XrmDatabase, *const c_char) -> ();
    fn XrmGetResource(XrmDatabase, *const c_char, *const c_char, *mut *mut c_char, *mut XrmValue) -> Bool;
    fn XrmPutStringResource(*mut XrmDatabase, *const c_char, *const c_char) -> ();
    fn XrmPutLineResource(*mut XrmDatabase, *const c_char) -> ();
    fn XrmMergeDatabases(XrmDatabase, *mut XrmDatabase) -> ();
    fn XrmDestroyDatabase(XrmDatabase) -> ();
    fn XrmStringToQuark(*const c_char) -> XrmQuark;
    fn XrmQuarkToString(XrmQuark) -> XrmString;
    fn XrmUniqueQuark() -> XrmQuark;

    // Miscellaneous utilities
    fn XParseGeometry(*const c_char, *mut c_int, *mut c_int, *mut c_uint, *mut c_uint) -> c_int;
    fn XSupportsLocale() -> Bool;
    fn XSetLocaleModifiers(*const c_char) -> *mut c_char;
}

/// libX11 for tests. `None` only when no soname can be opened at all; a
/// library that opens but lacks an entry point fails the test.
#[cfg(test)]
pub(crate) fn xlib_for_tests() -> Option<Xlib> {
    if let Err(e) = LibraryHandle::open(DEFAULT_LIBRARY_NAMES) {
        eprintln!("skipping: {}", e);
        return None;
    }
    match Xlib::open() {
        Ok(xlib) => Some(xlib),
        Err(e) => panic!("libX11 is installed but did not resolve: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entry_point_resolves() {
        let Some(xlib) = xlib_for_tests() else {
            return;
        };
        assert!(DEFAULT_LIBRARY_NAMES.contains(&xlib.library_name()));
        assert!(format!("{:?}", xlib).contains(xlib.library_name()));
    }

    #[test]
    fn test_unknown_symbol() {
        let Ok(lib) = LibraryHandle::open(DEFAULT_LIBRARY_NAMES) else {
            return;
        };
        match lib.symbol("XNoSuchEntryPoint\0") {
            Err(Error::MissingSymbol(name)) => assert_eq!(name, "XNoSuchEntryPoint"),
            other => panic!("unexpected result {:?}", other),
        }
    }
}
