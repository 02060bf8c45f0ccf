//! xlibwrap - Xlib bindings for Rust
//!
//! Three layers, each usable on its own:
//!
//! * [`ffi`]: the Xlib C declarations, loaded from libX11 at run time
//! * [`wrappers`] and [`event`]: Rust types holding copies of the Xlib
//!   structures, with accessors named after their fields
//! * [`Display`]: one connection, with a method per Xlib call
//!
//! The [`Backend`] trait sits between [`Display`] and libX11, so the same
//! code runs against [`NullBackend`], an in-memory server used in tests.
//!
//! ```no_run
//! use xlibwrap::{ffi, Display, Result};
//!
//! fn main() -> Result<()> {
//!     let mut display = Display::open(None)?;
//!     let root = display.default_root_window()?;
//!     let window = display.create_simple_window(root, 0, 0, 200, 100, 1, 0, 0xffffff)?;
//!     display.select_input(window, ffi::ExposureMask | ffi::KeyPressMask)?;
//!     display.map_window(window)?;
//!     loop {
//!         if let xlibwrap::Event::KeyPress(_) = display.next_event()? {
//!             return Ok(());
//!         }
//!     }
//! }
//! ```

pub mod ffi;

pub mod backend;
pub mod display;
pub mod error;
pub mod event;
pub mod library;
pub mod types;
pub mod wrappers;

pub(crate) mod field;

pub use backend::{Backend, NativeBackend, NullBackend, ScreenInfo};
pub use display::{ConnectOptions, Display, DisplayLock, Events};
pub use error::{Error, ErrorCode, ErrorEvent, Result};
pub use event::{Event, EventType};
pub use library::Library;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
