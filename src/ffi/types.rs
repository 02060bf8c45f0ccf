//! Scalar typedefs and opaque handles from X.h, Xlib.h and Xresource.h

use libc::{c_char, c_int, c_uchar, c_ulong, c_void};

/// Generic resource identifier. Only the low 29 bits are ever used.
pub type XID = c_ulong;
pub type Mask = c_ulong;
pub type Atom = c_ulong;
pub type VisualID = c_ulong;
pub type Time = c_ulong;

pub type Window = XID;
pub type Drawable = XID;
pub type Font = XID;
pub type Pixmap = XID;
pub type Cursor = XID;
pub type Colormap = XID;
pub type GContext = XID;
pub type KeySym = XID;

pub type KeyCode = c_uchar;

/// Xlib booleans are plain ints
pub type Bool = c_int;
pub type Status = c_int;

pub type XPointer = *mut c_char;

pub const True: Bool = 1;
pub const False: Bool = 0;

/// Opaque connection structure. Only ever handled by pointer.
#[repr(C)]
pub struct Display {
    _private: [u8; 0],
}

#[repr(C)]
pub struct _XGC {
    _private: [u8; 0],
}

/// Client-side handle on a server graphics context
pub type GC = *mut _XGC;

#[repr(C)]
pub struct _XRegion {
    _private: [u8; 0],
}

pub type Region = *mut _XRegion;

#[repr(C)]
pub struct _XrmHashBucketRec {
    _private: [u8; 0],
}

pub type XrmDatabase = *mut _XrmHashBucketRec;
pub type XrmQuark = c_int;
pub type XrmString = *mut c_char;

#[repr(C)]
pub struct _XPrivate {
    _private: [u8; 0],
}

/// Extension private data hung off several structures
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XExtData {
    pub number: c_int,
    pub next: *mut XExtData,
    pub free_private: Option<unsafe extern "C" fn(*mut XExtData) -> c_int>,
    pub private_data: XPointer,
}

pub type XErrorHandler =
    Option<unsafe extern "C" fn(*mut Display, *mut super::events::XErrorEvent) -> c_int>;
pub type XIOErrorHandler = Option<unsafe extern "C" fn(*mut Display) -> c_int>;

/// Return type of XSynchronize / XSetAfterFunction
pub type XAfterFunction = Option<unsafe extern "C" fn(*mut Display) -> c_int>;

pub type XFreeFunc = Option<unsafe extern "C" fn(*mut c_void)>;
