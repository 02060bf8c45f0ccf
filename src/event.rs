//! X11 events
//!
//! [`Event`] mirrors the `XEvent` union as a sum type. Each variant holds a
//! wrapper owning a copy of the matching C struct, with one accessor per
//! field. [`Event::from_raw`] dispatches on the type tag and
//! [`Event::to_raw`] rebuilds the union for `XSendEvent` and
//! `XPutBackEvent`.

use libc::{c_char, c_int, c_long, c_short, c_ulong};

use crate::ffi;
use crate::field::accessors;
use crate::types::*;

raw_enum! {
    /// Event type codes
    pub enum EventType: c_int {
        KeyPress = ffi::KeyPress,
        KeyRelease = ffi::KeyRelease,
        ButtonPress = ffi::ButtonPress,
        ButtonRelease = ffi::ButtonRelease,
        MotionNotify = ffi::MotionNotify,
        EnterNotify = ffi::EnterNotify,
        LeaveNotify = ffi::LeaveNotify,
        FocusIn = ffi::FocusIn,
        FocusOut = ffi::FocusOut,
        KeymapNotify = ffi::KeymapNotify,
        Expose = ffi::Expose,
        GraphicsExpose = ffi::GraphicsExpose,
        NoExpose = ffi::NoExpose,
        VisibilityNotify = ffi::VisibilityNotify,
        CreateNotify = ffi::CreateNotify,
        DestroyNotify = ffi::DestroyNotify,
        UnmapNotify = ffi::UnmapNotify,
        MapNotify = ffi::MapNotify,
        MapRequest = ffi::MapRequest,
        ReparentNotify = ffi::ReparentNotify,
        ConfigureNotify = ffi::ConfigureNotify,
        ConfigureRequest = ffi::ConfigureRequest,
        GravityNotify = ffi::GravityNotify,
        ResizeRequest = ffi::ResizeRequest,
        CirculateNotify = ffi::CirculateNotify,
        CirculateRequest = ffi::CirculateRequest,
        PropertyNotify = ffi::PropertyNotify,
        SelectionClear = ffi::SelectionClear,
        SelectionRequest = ffi::SelectionRequest,
        SelectionNotify = ffi::SelectionNotify,
        ColormapNotify = ffi::ColormapNotify,
        ClientMessage = ffi::ClientMessage,
        MappingNotify = ffi::MappingNotify,
        GenericEvent = ffi::GenericEvent,
    }
}

impl EventType {
    /// Event-mask bits that select this event type. Zero for the types
    /// that are always delivered.
    pub fn mask(self) -> c_long {
        use EventType::*;
        match self {
            KeyPress => ffi::KeyPressMask,
            KeyRelease => ffi::KeyReleaseMask,
            ButtonPress => ffi::ButtonPressMask,
            ButtonRelease => ffi::ButtonReleaseMask,
            MotionNotify => {
                ffi::PointerMotionMask
                    | ffi::PointerMotionHintMask
                    | ffi::Button1MotionMask
                    | ffi::Button2MotionMask
                    | ffi::Button3MotionMask
                    | ffi::Button4MotionMask
                    | ffi::Button5MotionMask
                    | ffi::ButtonMotionMask
            }
            EnterNotify => ffi::EnterWindowMask,
            LeaveNotify => ffi::LeaveWindowMask,
            FocusIn | FocusOut => ffi::FocusChangeMask,
            KeymapNotify => ffi::KeymapStateMask,
            Expose | GraphicsExpose | NoExpose => ffi::ExposureMask,
            VisibilityNotify => ffi::VisibilityChangeMask,
            CreateNotify => ffi::SubstructureNotifyMask,
            DestroyNotify | UnmapNotify | MapNotify | ReparentNotify | ConfigureNotify
            | GravityNotify | CirculateNotify => {
                ffi::StructureNotifyMask | ffi::SubstructureNotifyMask
            }
            MapRequest | ConfigureRequest | CirculateRequest => ffi::SubstructureRedirectMask,
            ResizeRequest => ffi::ResizeRedirectMask,
            PropertyNotify => ffi::PropertyChangeMask,
            ColormapNotify => ffi::ColormapChangeMask,
            SelectionClear | SelectionRequest | SelectionNotify | ClientMessage
            | MappingNotify | GenericEvent => 0,
        }
    }
}

/// Declares an event wrapper. Every event carries `serial` and
/// `send_event` ahead of its own fields.
macro_rules! event_struct {
    (
        $(#[$meta:meta])*
        pub struct $name:ident($raw:ty) {
            $( $field:ident, $setter:ident : $ty:ty; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default)]
        pub struct $name {
            raw: $raw,
        }

        // SAFETY: the display pointer inside the copy is never dereferenced
        unsafe impl Send for $name {}
        unsafe impl Sync for $name {}

        impl $name {
            pub fn from_raw(raw: $raw) -> Self {
                $name { raw }
            }

            pub fn as_raw(&self) -> &$raw {
                &self.raw
            }

            pub fn into_raw(self) -> $raw {
                self.raw
            }
        }

        accessors!($name {
            serial, set_serial: c_ulong;
            send_event, set_send_event: bool;
            $( $field, $setter : $ty; )*
        });
    };
}

event_struct! {
    /// KeyPress and KeyRelease
    pub struct KeyEvent(ffi::XKeyEvent) {
        window, set_window: Window;
        root, set_root: Window;
        subwindow, set_subwindow: Window;
        time, set_time: Timestamp;
        x, set_x: i32;
        y, set_y: i32;
        x_root, set_x_root: i32;
        y_root, set_y_root: i32;
        state, set_state: u32;
        keycode, set_keycode: KeyCode;
        same_screen, set_same_screen: bool;
    }
}

event_struct! {
    /// ButtonPress and ButtonRelease
    pub struct ButtonEvent(ffi::XButtonEvent) {
        window, set_window: Window;
        root, set_root: Window;
        subwindow, set_subwindow: Window;
        time, set_time: Timestamp;
        x, set_x: i32;
        y, set_y: i32;
        x_root, set_x_root: i32;
        y_root, set_y_root: i32;
        state, set_state: u32;
        button, set_button: u32;
        same_screen, set_same_screen: bool;
    }
}

event_struct! {
    pub struct MotionEvent(ffi::XMotionEvent) {
        window, set_window: Window;
        root, set_root: Window;
        subwindow, set_subwindow: Window;
        time, set_time: Timestamp;
        x, set_x: i32;
        y, set_y: i32;
        x_root, set_x_root: i32;
        y_root, set_y_root: i32;
        state, set_state: u32;
        is_hint, set_is_hint: bool;
        same_screen, set_same_screen: bool;
    }
}

event_struct! {
    /// EnterNotify and LeaveNotify
    pub struct CrossingEvent(ffi::XCrossingEvent) {
        window, set_window: Window;
        root, set_root: Window;
        subwindow, set_subwindow: Window;
        time, set_time: Timestamp;
        x, set_x: i32;
        y, set_y: i32;
        x_root, set_x_root: i32;
        y_root, set_y_root: i32;
        mode, set_mode: i32;
        detail, set_detail: i32;
        same_screen, set_same_screen: bool;
        focus, set_focus: bool;
        state, set_state: u32;
    }
}

event_struct! {
    /// FocusIn and FocusOut
    pub struct FocusChangeEvent(ffi::XFocusChangeEvent) {
        window, set_window: Window;
        mode, set_mode: i32;
        detail, set_detail: i32;
    }
}

event_struct! {
    pub struct KeymapEvent(ffi::XKeymapEvent) {
        window, set_window: Window;
    }
}

impl KeymapEvent {
    /// Bit vector of pressed keys, one bit per keycode
    pub fn key_vector(&self) -> [u8; 32] {
        self.raw.key_vector.map(|b| b as u8)
    }

    pub fn set_key_vector(&mut self, keys: [u8; 32]) {
        self.raw.key_vector = keys.map(|b| b as c_char);
    }
}

event_struct! {
    pub struct ExposeEvent(ffi::XExposeEvent) {
        window, set_window: Window;
        x, set_x: i32;
        y, set_y: i32;
        width, set_width: i32;
        height, set_height: i32;
        count, set_count: i32;
    }
}

event_struct! {
    pub struct GraphicsExposeEvent(ffi::XGraphicsExposeEvent) {
        drawable, set_drawable: Drawable;
        x, set_x: i32;
        y, set_y: i32;
        width, set_width: i32;
        height, set_height: i32;
        count, set_count: i32;
        major_code, set_major_code: i32;
        minor_code, set_minor_code: i32;
    }
}

event_struct! {
    pub struct NoExposeEvent(ffi::XNoExposeEvent) {
        drawable, set_drawable: Drawable;
        major_code, set_major_code: i32;
        minor_code, set_minor_code: i32;
    }
}

event_struct! {
    pub struct VisibilityEvent(ffi::XVisibilityEvent) {
        window, set_window: Window;
        state, set_state: i32;
    }
}

event_struct! {
    pub struct CreateWindowEvent(ffi::XCreateWindowEvent) {
        parent, set_parent: Window;
        window, set_window: Window;
        x, set_x: i32;
        y, set_y: i32;
        width, set_width: i32;
        height, set_height: i32;
        border_width, set_border_width: i32;
        override_redirect, set_override_redirect: bool;
    }
}

event_struct! {
    pub struct DestroyWindowEvent(ffi::XDestroyWindowEvent) {
        event, set_event: Window;
        window, set_window: Window;
    }
}

event_struct! {
    pub struct UnmapEvent(ffi::XUnmapEvent) {
        event, set_event: Window;
        window, set_window: Window;
        from_configure, set_from_configure: bool;
    }
}

event_struct! {
    pub struct MapEvent(ffi::XMapEvent) {
        event, set_event: Window;
        window, set_window: Window;
        override_redirect, set_override_redirect: bool;
    }
}

event_struct! {
    pub struct MapRequestEvent(ffi::XMapRequestEvent) {
        parent, set_parent: Window;
        window, set_window: Window;
    }
}

event_struct! {
    pub struct ReparentEvent(ffi::XReparentEvent) {
        event, set_event: Window;
        window, set_window: Window;
        parent, set_parent: Window;
        x, set_x: i32;
        y, set_y: i32;
        override_redirect, set_override_redirect: bool;
    }
}

event_struct! {
    pub struct ConfigureEvent(ffi::XConfigureEvent) {
        event, set_event: Window;
        window, set_window: Window;
        x, set_x: i32;
        y, set_y: i32;
        width, set_width: i32;
        height, set_height: i32;
        border_width, set_border_width: i32;
        above, set_above: Window;
        override_redirect, set_override_redirect: bool;
    }
}

event_struct! {
    pub struct GravityEvent(ffi::XGravityEvent) {
        event, set_event: Window;
        window, set_window: Window;
        x, set_x: i32;
        y, set_y: i32;
    }
}

event_struct! {
    pub struct ResizeRequestEvent(ffi::XResizeRequestEvent) {
        window, set_window: Window;
        width, set_width: i32;
        height, set_height: i32;
    }
}

event_struct! {
    pub struct ConfigureRequestEvent(ffi::XConfigureRequestEvent) {
        parent, set_parent: Window;
        window, set_window: Window;
        x, set_x: i32;
        y, set_y: i32;
        width, set_width: i32;
        height, set_height: i32;
        border_width, set_border_width: i32;
        above, set_above: Window;
        detail, set_detail: i32;
        value_mask, set_value_mask: c_ulong;
    }
}

event_struct! {
    pub struct CirculateEvent(ffi::XCirculateEvent) {
        event, set_event: Window;
        window, set_window: Window;
        place, set_place: i32;
    }
}

event_struct! {
    pub struct CirculateRequestEvent(ffi::XCirculateRequestEvent) {
        parent, set_parent: Window;
        window, set_window: Window;
        place, set_place: i32;
    }
}

event_struct! {
    pub struct PropertyEvent(ffi::XPropertyEvent) {
        window, set_window: Window;
        atom, set_atom: Atom;
        time, set_time: Timestamp;
        state, set_state: i32;
    }
}

impl PropertyEvent {
    pub fn is_deleted(&self) -> bool {
        self.raw.state == ffi::PropertyDelete
    }
}

event_struct! {
    pub struct SelectionClearEvent(ffi::XSelectionClearEvent) {
        window, set_window: Window;
        selection, set_selection: Atom;
        time, set_time: Timestamp;
    }
}

event_struct! {
    pub struct SelectionRequestEvent(ffi::XSelectionRequestEvent) {
        owner, set_owner: Window;
        requestor, set_requestor: Window;
        selection, set_selection: Atom;
        target, set_target: Atom;
        property, set_property: Atom;
        time, set_time: Timestamp;
    }
}

event_struct! {
    /// SelectionNotify
    pub struct SelectionEvent(ffi::XSelectionEvent) {
        requestor, set_requestor: Window;
        selection, set_selection: Atom;
        target, set_target: Atom;
        property, set_property: Atom;
        time, set_time: Timestamp;
    }
}

event_struct! {
    pub struct ColormapEvent(ffi::XColormapEvent) {
        window, set_window: Window;
        colormap, set_colormap: Colormap;
        state, set_state: i32;
    }
}

impl ColormapEvent {
    /// True when the colormap attribute changed, false when it was
    /// installed or uninstalled
    pub fn is_new(&self) -> bool {
        from_bool(self.raw.new)
    }

    pub fn set_is_new(&mut self, new: bool) {
        self.raw.new = to_bool(new);
    }
}

event_struct! {
    pub struct ClientMessageEvent(ffi::XClientMessageEvent) {
        window, set_window: Window;
        message_type, set_message_type: Atom;
        format, set_format: i32;
    }
}

impl ClientMessageEvent {
    /// Data as twenty 8-bit items
    pub fn data_b(&self) -> [u8; 20] {
        // SAFETY: every bit pattern is a valid [c_char; 20]
        unsafe { self.raw.data.b }.map(|b| b as u8)
    }

    /// Data as ten 16-bit items
    pub fn data_s(&self) -> [i16; 10] {
        // SAFETY: every bit pattern is a valid [c_short; 10]
        unsafe { self.raw.data.s }
    }

    /// Data as five 32-bit items, each stored in a C `long`
    pub fn data_l(&self) -> [c_long; 5] {
        // SAFETY: every bit pattern is a valid [c_long; 5]
        unsafe { self.raw.data.l }
    }

    pub fn set_data_b(&mut self, data: [u8; 20]) {
        self.raw.data = ffi::ClientMessageData {
            b: data.map(|b| b as c_char),
        };
        self.raw.format = 8;
    }

    pub fn set_data_s(&mut self, data: [c_short; 10]) {
        self.raw.data = ffi::ClientMessageData { s: data };
        self.raw.format = 16;
    }

    pub fn set_data_l(&mut self, data: [c_long; 5]) {
        self.raw.data = ffi::ClientMessageData { l: data };
        self.raw.format = 32;
    }
}

event_struct! {
    pub struct MappingEvent(ffi::XMappingEvent) {
        window, set_window: Window;
        request, set_request: i32;
        first_keycode, set_first_keycode: i32;
        count, set_count: i32;
    }
}

event_struct! {
    /// An extension event delivered through the generic event mechanism
    pub struct GenericEvent(ffi::XGenericEvent) {
        extension, set_extension: i32;
        evtype, set_evtype: i32;
    }
}

/// An event of a type this crate does not decode (extension events),
/// kept as the raw union
#[derive(Clone, Copy, Default)]
pub struct RawEvent {
    raw: ffi::XEvent,
}

// SAFETY: the display pointer inside the copy is never dereferenced
unsafe impl Send for RawEvent {}
unsafe impl Sync for RawEvent {}

impl RawEvent {
    pub fn from_raw(raw: ffi::XEvent) -> Self {
        RawEvent { raw }
    }

    pub fn as_raw(&self) -> &ffi::XEvent {
        &self.raw
    }

    pub fn type_code(&self) -> c_int {
        self.raw.get_type()
    }
}

impl std::fmt::Debug for RawEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawEvent")
            .field("type", &self.type_code())
            .finish_non_exhaustive()
    }
}

/// A decoded X event
#[derive(Debug, Clone, Copy)]
pub enum Event {
    KeyPress(KeyEvent),
    KeyRelease(KeyEvent),
    ButtonPress(ButtonEvent),
    ButtonRelease(ButtonEvent),
    MotionNotify(MotionEvent),
    EnterNotify(CrossingEvent),
    LeaveNotify(CrossingEvent),
    FocusIn(FocusChangeEvent),
    FocusOut(FocusChangeEvent),
    KeymapNotify(KeymapEvent),
    Expose(ExposeEvent),
    GraphicsExpose(GraphicsExposeEvent),
    NoExpose(NoExposeEvent),
    VisibilityNotify(VisibilityEvent),
    CreateNotify(CreateWindowEvent),
    DestroyNotify(DestroyWindowEvent),
    UnmapNotify(UnmapEvent),
    MapNotify(MapEvent),
    MapRequest(MapRequestEvent),
    ReparentNotify(ReparentEvent),
    ConfigureNotify(ConfigureEvent),
    ConfigureRequest(ConfigureRequestEvent),
    GravityNotify(GravityEvent),
    ResizeRequest(ResizeRequestEvent),
    CirculateNotify(CirculateEvent),
    CirculateRequest(CirculateRequestEvent),
    PropertyNotify(PropertyEvent),
    SelectionClear(SelectionClearEvent),
    SelectionRequest(SelectionRequestEvent),
    SelectionNotify(SelectionEvent),
    ColormapNotify(ColormapEvent),
    ClientMessage(ClientMessageEvent),
    MappingNotify(MappingEvent),
    Generic(GenericEvent),
    Other(RawEvent),
}

impl Event {
    /// Decode an event filled in by Xlib
    pub fn from_raw(raw: &ffi::XEvent) -> Event {
        // SAFETY: the member read matches the type tag, and every member is
        // plain data no larger than the union
        unsafe {
            match raw.get_type() {
                ffi::KeyPress => Event::KeyPress(KeyEvent::from_raw(raw.key)),
                ffi::KeyRelease => Event::KeyRelease(KeyEvent::from_raw(raw.key)),
                ffi::ButtonPress => Event::ButtonPress(ButtonEvent::from_raw(raw.button)),
                ffi::ButtonRelease => Event::ButtonRelease(ButtonEvent::from_raw(raw.button)),
                ffi::MotionNotify => Event::MotionNotify(MotionEvent::from_raw(raw.motion)),
                ffi::EnterNotify => Event::EnterNotify(CrossingEvent::from_raw(raw.crossing)),
                ffi::LeaveNotify => Event::LeaveNotify(CrossingEvent::from_raw(raw.crossing)),
                ffi::FocusIn => Event::FocusIn(FocusChangeEvent::from_raw(raw.focus_change)),
                ffi::FocusOut => Event::FocusOut(FocusChangeEvent::from_raw(raw.focus_change)),
                ffi::KeymapNotify => Event::KeymapNotify(KeymapEvent::from_raw(raw.keymap)),
                ffi::Expose => Event::Expose(ExposeEvent::from_raw(raw.expose)),
                ffi::GraphicsExpose => {
                    Event::GraphicsExpose(GraphicsExposeEvent::from_raw(raw.graphics_expose))
                }
                ffi::NoExpose => Event::NoExpose(NoExposeEvent::from_raw(raw.no_expose)),
                ffi::VisibilityNotify => {
                    Event::VisibilityNotify(VisibilityEvent::from_raw(raw.visibility))
                }
                ffi::CreateNotify => {
                    Event::CreateNotify(CreateWindowEvent::from_raw(raw.create_window))
                }
                ffi::DestroyNotify => {
                    Event::DestroyNotify(DestroyWindowEvent::from_raw(raw.destroy_window))
                }
                ffi::UnmapNotify => Event::UnmapNotify(UnmapEvent::from_raw(raw.unmap)),
                ffi::MapNotify => Event::MapNotify(MapEvent::from_raw(raw.map)),
                ffi::MapRequest => Event::MapRequest(MapRequestEvent::from_raw(raw.map_request)),
                ffi::ReparentNotify => Event::ReparentNotify(ReparentEvent::from_raw(raw.reparent)),
                ffi::ConfigureNotify => {
                    Event::ConfigureNotify(ConfigureEvent::from_raw(raw.configure))
                }
                ffi::ConfigureRequest => {
                    Event::ConfigureRequest(ConfigureRequestEvent::from_raw(raw.configure_request))
                }
                ffi::GravityNotify => Event::GravityNotify(GravityEvent::from_raw(raw.gravity)),
                ffi::ResizeRequest => {
                    Event::ResizeRequest(ResizeRequestEvent::from_raw(raw.resize_request))
                }
                ffi::CirculateNotify => {
                    Event::CirculateNotify(CirculateEvent::from_raw(raw.circulate))
                }
                ffi::CirculateRequest => {
                    Event::CirculateRequest(CirculateRequestEvent::from_raw(raw.circulate_request))
                }
                ffi::PropertyNotify => Event::PropertyNotify(PropertyEvent::from_raw(raw.property)),
                ffi::SelectionClear => {
                    Event::SelectionClear(SelectionClearEvent::from_raw(raw.selection_clear))
                }
                ffi::SelectionRequest => {
                    Event::SelectionRequest(SelectionRequestEvent::from_raw(raw.selection_request))
                }
                ffi::SelectionNotify => {
                    Event::SelectionNotify(SelectionEvent::from_raw(raw.selection))
                }
                ffi::ColormapNotify => Event::ColormapNotify(ColormapEvent::from_raw(raw.colormap)),
                ffi::ClientMessage => {
                    Event::ClientMessage(ClientMessageEvent::from_raw(raw.client_message))
                }
                ffi::MappingNotify => Event::MappingNotify(MappingEvent::from_raw(raw.mapping)),
                ffi::GenericEvent => Event::Generic(GenericEvent::from_raw(raw.generic)),
                _ => Event::Other(RawEvent::from_raw(*raw)),
            }
        }
    }

    /// Rebuild the C union. The type tag is taken from the variant.
    pub fn to_raw(&self) -> ffi::XEvent {
        let mut raw = ffi::XEvent::default();

        macro_rules! put {
            ($member:ident, $event:expr, $code:expr) => {{
                let mut member = $event.into_raw();
                member.type_ = $code;
                raw.$member = member;
            }};
        }

        match *self {
            Event::KeyPress(e) => put!(key, e, ffi::KeyPress),
            Event::KeyRelease(e) => put!(key, e, ffi::KeyRelease),
            Event::ButtonPress(e) => put!(button, e, ffi::ButtonPress),
            Event::ButtonRelease(e) => put!(button, e, ffi::ButtonRelease),
            Event::MotionNotify(e) => put!(motion, e, ffi::MotionNotify),
            Event::EnterNotify(e) => put!(crossing, e, ffi::EnterNotify),
            Event::LeaveNotify(e) => put!(crossing, e, ffi::LeaveNotify),
            Event::FocusIn(e) => put!(focus_change, e, ffi::FocusIn),
            Event::FocusOut(e) => put!(focus_change, e, ffi::FocusOut),
            Event::KeymapNotify(e) => put!(keymap, e, ffi::KeymapNotify),
            Event::Expose(e) => put!(expose, e, ffi::Expose),
            Event::GraphicsExpose(e) => put!(graphics_expose, e, ffi::GraphicsExpose),
            Event::NoExpose(e) => put!(no_expose, e, ffi::NoExpose),
            Event::VisibilityNotify(e) => put!(visibility, e, ffi::VisibilityNotify),
            Event::CreateNotify(e) => put!(create_window, e, ffi::CreateNotify),
            Event::DestroyNotify(e) => put!(destroy_window, e, ffi::DestroyNotify),
            Event::UnmapNotify(e) => put!(unmap, e, ffi::UnmapNotify),
            Event::MapNotify(e) => put!(map, e, ffi::MapNotify),
            Event::MapRequest(e) => put!(map_request, e, ffi::MapRequest),
            Event::ReparentNotify(e) => put!(reparent, e, ffi::ReparentNotify),
            Event::ConfigureNotify(e) => put!(configure, e, ffi::ConfigureNotify),
            Event::ConfigureRequest(e) => put!(configure_request, e, ffi::ConfigureRequest),
            Event::GravityNotify(e) => put!(gravity, e, ffi::GravityNotify),
            Event::ResizeRequest(e) => put!(resize_request, e, ffi::ResizeRequest),
            Event::CirculateNotify(e) => put!(circulate, e, ffi::CirculateNotify),
            Event::CirculateRequest(e) => put!(circulate_request, e, ffi::CirculateRequest),
            Event::PropertyNotify(e) => put!(property, e, ffi::PropertyNotify),
            Event::SelectionClear(e) => put!(selection_clear, e, ffi::SelectionClear),
            Event::SelectionRequest(e) => put!(selection_request, e, ffi::SelectionRequest),
            Event::SelectionNotify(e) => put!(selection, e, ffi::SelectionNotify),
            Event::ColormapNotify(e) => put!(colormap, e, ffi::ColormapNotify),
            Event::ClientMessage(e) => put!(client_message, e, ffi::ClientMessage),
            Event::MappingNotify(e) => put!(mapping, e, ffi::MappingNotify),
            Event::Generic(e) => put!(generic, e, ffi::GenericEvent),
            Event::Other(e) => raw = *e.as_raw(),
        }

        raw
    }

    /// The raw type tag
    pub fn type_code(&self) -> c_int {
        self.to_raw().get_type()
    }

    pub fn event_type(&self) -> Option<EventType> {
        EventType::from_raw(self.type_code())
    }

    fn any(&self) -> ffi::XAnyEvent {
        // SAFETY: every member starts with the XAnyEvent fields
        unsafe { self.to_raw().any }
    }

    pub fn serial(&self) -> u64 {
        self.any().serial as u64
    }

    /// True when the event came from a SendEvent request
    pub fn is_send_event(&self) -> bool {
        from_bool(self.any().send_event)
    }

    /// The window the event was reported relative to. For structure
    /// notifications this is the `event` window, for GraphicsExpose and
    /// NoExpose the drawable id. Generic events carry none.
    pub fn window(&self) -> Option<Window> {
        match self {
            Event::Generic(_) => None,
            _ => Some(Window(self.any().window)),
        }
    }

    /// The same event with its serial number and send_event flag replaced
    pub fn with_header(&self, serial: u64, send_event: bool) -> Event {
        let mut any = self.any();
        any.serial = serial as c_ulong;
        any.send_event = to_bool(send_event);
        let mut raw = self.to_raw();
        raw.any = any;
        Event::from_raw(&raw)
    }

    /// True for KeyPress and ButtonPress
    pub fn is_press(&self) -> bool {
        matches!(self, Event::KeyPress(_) | Event::ButtonPress(_))
    }
}

impl From<&ffi::XEvent> for Event {
    fn from(raw: &ffi::XEvent) -> Self {
        Event::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_event_accessors() {
        let mut key = KeyEvent::default();
        key.set_window(Window::new(0x400001));
        key.set_keycode(KeyCode::new(38));
        key.set_state(ffi::ShiftMask | ffi::ControlMask);
        key.set_same_screen(true);

        assert_eq!(key.window(), Window::new(0x400001));
        assert_eq!(key.keycode(), KeyCode::new(38));
        assert_eq!(key.state() & ffi::ShiftMask, ffi::ShiftMask);
        assert!(key.same_screen());
        assert_eq!(key.as_raw().same_screen, ffi::True);
    }

    #[test]
    fn test_dispatch_by_type() {
        let mut raw = ffi::XEvent::default();
        let mut expose = ffi::XExposeEvent::default();
        expose.type_ = ffi::Expose;
        expose.window = 0x1234;
        expose.width = 640;
        expose.count = 2;
        raw.expose = expose;

        match Event::from_raw(&raw) {
            Event::Expose(e) => {
                assert_eq!(e.window(), Window::new(0x1234));
                assert_eq!(e.width(), 640);
                assert_eq!(e.count(), 2);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_to_raw_sets_type_from_variant() {
        let mut button = ButtonEvent::default();
        button.set_button(3);
        button.set_window(Window::new(9));

        let press = Event::ButtonPress(button).to_raw();
        let release = Event::ButtonRelease(button).to_raw();
        assert_eq!(press.get_type(), ffi::ButtonPress);
        assert_eq!(release.get_type(), ffi::ButtonRelease);

        match Event::from_raw(&release) {
            Event::ButtonRelease(e) => assert_eq!(e.button(), 3),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_structure_event_window_is_event_field() {
        let mut destroy = DestroyWindowEvent::default();
        destroy.set_event(Window::new(1));
        destroy.set_window(Window::new(2));

        let event = Event::DestroyNotify(destroy);
        assert_eq!(event.window(), Some(Window::new(1)));
        assert_eq!(event.event_type(), Some(EventType::DestroyNotify));
    }

    #[test]
    fn test_client_message_data_views() {
        let mut msg = ClientMessageEvent::default();
        msg.set_message_type(Atom::new(300));
        msg.set_data_l([301, 0, 0, 0, 0]);

        assert_eq!(msg.format(), 32);
        assert_eq!(msg.data_l()[0], 301);

        msg.set_data_b(*b"hello, world\0\0\0\0\0\0\0\0");
        assert_eq!(msg.format(), 8);
        assert_eq!(&msg.data_b()[..5], b"hello");
    }

    #[test]
    fn test_unknown_type_is_kept_raw() {
        let mut raw = ffi::XEvent::default();
        raw.type_ = 90;
        let event = Event::from_raw(&raw);
        assert!(matches!(event, Event::Other(_)));
        assert_eq!(event.type_code(), 90);
        assert_eq!(event.event_type(), None);
    }

    #[test]
    fn test_send_event_flag() {
        let mut prop = PropertyEvent::default();
        prop.set_send_event(true);
        prop.set_atom(Atom::WM_NAME);
        let event = Event::PropertyNotify(prop);
        assert!(event.is_send_event());
        assert_eq!(event.serial(), 0);
    }

    #[test]
    fn test_event_type_masks() {
        assert_eq!(EventType::Expose.mask(), ffi::ExposureMask);
        assert_eq!(
            EventType::MapNotify.mask(),
            ffi::StructureNotifyMask | ffi::SubstructureNotifyMask
        );
        assert_eq!(EventType::ClientMessage.mask(), 0);
        assert_ne!(EventType::MotionNotify.mask() & ffi::ButtonMotionMask, 0);
    }

    #[test]
    fn test_event_type_codes() {
        assert_eq!(EventType::KeyPress.to_raw(), 2);
        assert_eq!(EventType::MappingNotify.to_raw(), 34);
        assert_eq!(EventType::from_raw(1), None);
    }
}
