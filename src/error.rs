//! Errors and protocol error handling
//!
//! Synchronous failures (a failed `Status`, a null return, a bad name) come
//! back as [`Error`]. Protocol errors arrive asynchronously through the
//! library's error handler; they are delivered to an installed Rust closure,
//! collected by [`crate::Display::trap_errors`], or logged.

use std::cell::RefCell;
use std::ffi::NulError;
use std::fmt;
use std::sync::Mutex;

use libc::c_int;

use crate::ffi;
use crate::types::GrabStatus;

/// Errors returned by this crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not load Xlib from any of {names:?}: {reason}")]
    LibraryLoad { names: Vec<String>, reason: String },

    #[error("Xlib symbol {0} not found")]
    MissingSymbol(String),

    #[error("cannot open display {0:?}")]
    OpenDisplay(String),

    #[error("string argument contains a NUL byte")]
    NulByte(#[from] NulError),

    #[error("{request} failed")]
    Status { request: &'static str },

    #[error("{0} returned no data")]
    NullReturn(&'static str),

    #[error("unknown name {0:?}")]
    BadName(String),

    #[error("grab failed: {0:?}")]
    GrabFailed(GrabStatus),

    #[error("{0}")]
    Protocol(ErrorEvent),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(unix)]
    #[error("poll on the display connection failed: {0}")]
    Poll(#[from] nix::errno::Errno),

    #[error("{0} is not supported by this backend")]
    Unsupported(&'static str),
}

/// Result type for Xlib operations
pub type Result<T> = std::result::Result<T, Error>;

/// Turns a zero `Status` into [`Error::Status`]
pub(crate) fn check_status(status: ffi::Status, request: &'static str) -> Result<()> {
    if status == 0 {
        Err(Error::Status { request })
    } else {
        Ok(())
    }
}

/// Core protocol error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorCode {
    Request = 1,
    Value = 2,
    Window = 3,
    Pixmap = 4,
    Atom = 5,
    Cursor = 6,
    Font = 7,
    Match = 8,
    Drawable = 9,
    Access = 10,
    Alloc = 11,
    Colormap = 12,
    GContext = 13,
    IDChoice = 14,
    Name = 15,
    Length = 16,
    Implementation = 17,
}

impl ErrorCode {
    pub fn from_u8(code: u8) -> Option<Self> {
        match code {
            1 => Some(ErrorCode::Request),
            2 => Some(ErrorCode::Value),
            3 => Some(ErrorCode::Window),
            4 => Some(ErrorCode::Pixmap),
            5 => Some(ErrorCode::Atom),
            6 => Some(ErrorCode::Cursor),
            7 => Some(ErrorCode::Font),
            8 => Some(ErrorCode::Match),
            9 => Some(ErrorCode::Drawable),
            10 => Some(ErrorCode::Access),
            11 => Some(ErrorCode::Alloc),
            12 => Some(ErrorCode::Colormap),
            13 => Some(ErrorCode::GContext),
            14 => Some(ErrorCode::IDChoice),
            15 => Some(ErrorCode::Name),
            16 => Some(ErrorCode::Length),
            17 => Some(ErrorCode::Implementation),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Request => "BadRequest (invalid request code or no such operation)",
            ErrorCode::Value => "BadValue (integer parameter out of range for operation)",
            ErrorCode::Window => "BadWindow (invalid Window parameter)",
            ErrorCode::Pixmap => "BadPixmap (invalid Pixmap parameter)",
            ErrorCode::Atom => "BadAtom (invalid Atom parameter)",
            ErrorCode::Cursor => "BadCursor (invalid Cursor parameter)",
            ErrorCode::Font => "BadFont (invalid Font parameter)",
            ErrorCode::Match => "BadMatch (invalid parameter attributes)",
            ErrorCode::Drawable => "BadDrawable (invalid Pixmap or Window parameter)",
            ErrorCode::Access => "BadAccess (attempt to access private resource denied)",
            ErrorCode::Alloc => "BadAlloc (insufficient resources for operation)",
            ErrorCode::Colormap => "BadColor (invalid Colormap parameter)",
            ErrorCode::GContext => "BadGC (invalid GC parameter)",
            ErrorCode::IDChoice => "BadIDChoice (invalid resource ID chosen for this connection)",
            ErrorCode::Name => "BadName (named color or font does not exist)",
            ErrorCode::Length => "BadLength (poly request too large or internal Xlib length error)",
            ErrorCode::Implementation => "BadImplementation (server does not implement operation)",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An asynchronous protocol error, copied out of `XErrorEvent`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorEvent {
    serial: u64,
    error_code: u8,
    request_code: u8,
    minor_code: u8,
    resource_id: ffi::XID,
}

impl ErrorEvent {
    pub fn new(
        serial: u64,
        error_code: u8,
        request_code: u8,
        minor_code: u8,
        resource_id: ffi::XID,
    ) -> Self {
        ErrorEvent {
            serial,
            error_code,
            request_code,
            minor_code,
            resource_id,
        }
    }

    pub fn from_raw(raw: &ffi::XErrorEvent) -> Self {
        ErrorEvent {
            serial: raw.serial as u64,
            error_code: raw.error_code,
            request_code: raw.request_code,
            minor_code: raw.minor_code,
            resource_id: raw.resourceid,
        }
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn error_code(&self) -> u8 {
        self.error_code
    }

    /// The core error this code names, `None` for extension errors
    pub fn code(&self) -> Option<ErrorCode> {
        ErrorCode::from_u8(self.error_code)
    }

    pub fn request_code(&self) -> u8 {
        self.request_code
    }

    pub fn minor_code(&self) -> u8 {
        self.minor_code
    }

    pub fn resource_id(&self) -> ffi::XID {
        self.resource_id
    }
}

impl fmt::Display for ErrorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code() {
            Some(code) => write!(f, "X error: {}", code)?,
            None => write!(f, "X error: code {}", self.error_code)?,
        }
        write!(
            f,
            " (request {}.{}, resource 0x{:x}, serial {})",
            self.request_code, self.minor_code, self.resource_id, self.serial
        )
    }
}

impl std::error::Error for ErrorEvent {}

/// Closure receiving asynchronous protocol errors
pub type ErrorHandler = Box<dyn FnMut(&ErrorEvent) + Send>;

/// Closure called when the connection is lost. Xlib exits the process when
/// the handler returns.
pub type IoErrorHandler = Box<dyn FnMut() + Send>;

static ERROR_HANDLER: Mutex<Option<ErrorHandler>> = Mutex::new(None);
static IO_ERROR_HANDLER: Mutex<Option<IoErrorHandler>> = Mutex::new(None);

thread_local! {
    // One frame per active trap_errors call on this thread
    static TRAPS: RefCell<Vec<Vec<ErrorEvent>>> = const { RefCell::new(Vec::new()) };
}

/// Route an error to the innermost trap on this thread, else to `handler`,
/// else to the log.
pub(crate) fn deliver(event: ErrorEvent, handler: Option<&mut ErrorHandler>) {
    let trapped = TRAPS.with(|traps| match traps.borrow_mut().last_mut() {
        Some(frame) => {
            frame.push(event);
            true
        }
        None => false,
    });
    if trapped {
        log::debug!("Trapped {}", event);
        return;
    }

    match handler {
        Some(handler) => handler(&event),
        None => log::warn!("Unhandled {}", event),
    }
}

/// Begin collecting errors raised on this thread
pub(crate) fn push_trap() {
    TRAPS.with(|traps| traps.borrow_mut().push(Vec::new()));
}

/// Stop collecting and return what was raised since the matching push
pub(crate) fn pop_trap() -> Vec<ErrorEvent> {
    TRAPS.with(|traps| traps.borrow_mut().pop().unwrap_or_default())
}

/// Install the process-wide handler used by the native trampoline
pub(crate) fn set_global_handler(handler: Option<ErrorHandler>) {
    match ERROR_HANDLER.lock() {
        Ok(mut slot) => *slot = handler,
        Err(poisoned) => *poisoned.into_inner() = handler,
    }
}

pub(crate) fn set_global_io_handler(handler: Option<IoErrorHandler>) {
    match IO_ERROR_HANDLER.lock() {
        Ok(mut slot) => *slot = handler,
        Err(poisoned) => *poisoned.into_inner() = handler,
    }
}

/// `XSetErrorHandler` target
pub(crate) unsafe extern "C" fn error_trampoline(
    _display: *mut ffi::Display,
    event: *mut ffi::XErrorEvent,
) -> c_int {
    if event.is_null() {
        return 0;
    }
    let event = ErrorEvent::from_raw(&*event);
    match ERROR_HANDLER.lock() {
        Ok(mut slot) => deliver(event, slot.as_mut()),
        Err(_) => deliver(event, None),
    }
    0
}

/// `XSetIOErrorHandler` target
pub(crate) unsafe extern "C" fn io_error_trampoline(_display: *mut ffi::Display) -> c_int {
    log::error!("Connection to the X server lost");
    if let Ok(mut slot) = IO_ERROR_HANDLER.lock() {
        if let Some(handler) = slot.as_mut() {
            handler();
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_error_code_lookup() {
        assert_eq!(ErrorCode::from_u8(3), Some(ErrorCode::Window));
        assert_eq!(ErrorCode::from_u8(0), None);
        assert_eq!(ErrorCode::from_u8(18), None);
        assert!(ErrorCode::Match.as_str().starts_with("BadMatch"));
    }

    #[test]
    fn test_error_event_display() {
        let event = ErrorEvent::new(42, 3, ffi::X_MapWindow, 0, 0x400001);
        let text = event.to_string();
        assert!(text.contains("BadWindow"));
        assert!(text.contains("0x400001"));
        assert!(text.contains("serial 42"));
    }

    #[test]
    fn test_trap_takes_precedence_over_handler() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut handler: ErrorHandler = Box::new(move |e| sink.lock().unwrap().push(*e));

        push_trap();
        deliver(ErrorEvent::new(1, 8, 1, 0, 0), Some(&mut handler));
        let trapped = pop_trap();
        assert_eq!(trapped.len(), 1);
        assert!(seen.lock().unwrap().is_empty());

        deliver(ErrorEvent::new(2, 9, 1, 0, 0), Some(&mut handler));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_nested_traps() {
        push_trap();
        push_trap();
        deliver(ErrorEvent::new(5, 2, 1, 0, 0), None);
        assert_eq!(pop_trap().len(), 1);
        assert!(pop_trap().is_empty());
    }

    #[test]
    fn test_check_status() {
        assert!(check_status(1, "XGetWindowAttributes").is_ok());
        let err = check_status(0, "XGetWindowAttributes").unwrap_err();
        assert_eq!(err.to_string(), "XGetWindowAttributes failed");
    }
}
