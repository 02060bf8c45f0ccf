//! Core X11 types
//!
//! Safe newtypes over the raw Xlib identifiers and the small enums the
//! protocol defines. They are kept minimal and convert losslessly to and
//! from the values the C API expects.

use std::fmt;

use libc::{c_int, c_uint};

use crate::ffi;

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name(pub ffi::XID);

        impl $name {
            pub const NONE: $name = $name(0);

            pub fn new(id: ffi::XID) -> Self {
                $name(id)
            }

            pub fn id(&self) -> ffi::XID {
                self.0
            }

            pub fn is_none(&self) -> bool {
                self.0 == 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{:08x}", self.0)
            }
        }

        impl From<$name> for ffi::XID {
            fn from(value: $name) -> ffi::XID {
                value.0
            }
        }
    };
}

resource_id!(
    /// Window ID
    Window
);
resource_id!(
    /// Pixmap ID
    Pixmap
);
resource_id!(
    /// Drawable - a Window or a Pixmap. Xlib cannot tell them apart from the
    /// id alone, so this is a plain id with conversions from both.
    Drawable
);
resource_id!(
    /// Colormap ID
    Colormap
);
resource_id!(
    /// Cursor ID
    Cursor
);
resource_id!(
    /// Font ID
    Font
);
resource_id!(
    /// Server-side graphics context ID, as returned by XGContextFromGC
    GContext
);
resource_id!(
    /// Keyboard symbol
    KeySym
);

impl Window {
    /// PointerRoot as a focus target
    pub const POINTER_ROOT: Window = Window(ffi::PointerRoot);
    /// InputFocus as a SendEvent destination
    pub const INPUT_FOCUS: Window = Window(ffi::InputFocus);
}

impl From<Window> for Drawable {
    fn from(window: Window) -> Self {
        Drawable(window.0)
    }
}

impl From<Pixmap> for Drawable {
    fn from(pixmap: Pixmap) -> Self {
        Drawable(pixmap.0)
    }
}

impl Pixmap {
    /// ParentRelative as a background pixmap
    pub const PARENT_RELATIVE: Pixmap = Pixmap(ffi::ParentRelative);
}

/// Atom - interned string identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Atom(pub ffi::Atom);

impl Atom {
    pub const NONE: Atom = Atom(0);
    pub const ANY_PROPERTY_TYPE: Atom = Atom(ffi::AnyPropertyType);
    pub const PRIMARY: Atom = Atom(1);
    pub const SECONDARY: Atom = Atom(2);
    pub const ARC: Atom = Atom(3);
    pub const ATOM: Atom = Atom(4);
    pub const BITMAP: Atom = Atom(5);
    pub const CARDINAL: Atom = Atom(6);
    pub const COLORMAP: Atom = Atom(7);
    pub const CURSOR: Atom = Atom(8);
    pub const CUT_BUFFER0: Atom = Atom(9);
    pub const CUT_BUFFER1: Atom = Atom(10);
    pub const CUT_BUFFER2: Atom = Atom(11);
    pub const CUT_BUFFER3: Atom = Atom(12);
    pub const CUT_BUFFER4: Atom = Atom(13);
    pub const CUT_BUFFER5: Atom = Atom(14);
    pub const CUT_BUFFER6: Atom = Atom(15);
    pub const CUT_BUFFER7: Atom = Atom(16);
    pub const DRAWABLE: Atom = Atom(17);
    pub const FONT: Atom = Atom(18);
    pub const INTEGER: Atom = Atom(19);
    pub const PIXMAP: Atom = Atom(20);
    pub const POINT: Atom = Atom(21);
    pub const RECTANGLE: Atom = Atom(22);
    pub const RESOURCE_MANAGER: Atom = Atom(23);
    pub const RGB_COLOR_MAP: Atom = Atom(24);
    pub const RGB_BEST_MAP: Atom = Atom(25);
    pub const RGB_BLUE_MAP: Atom = Atom(26);
    pub const RGB_DEFAULT_MAP: Atom = Atom(27);
    pub const RGB_GRAY_MAP: Atom = Atom(28);
    pub const RGB_GREEN_MAP: Atom = Atom(29);
    pub const RGB_RED_MAP: Atom = Atom(30);
    pub const STRING: Atom = Atom(31);
    pub const VISUALID: Atom = Atom(32);
    pub const WINDOW: Atom = Atom(33);
    pub const WM_COMMAND: Atom = Atom(34);
    pub const WM_HINTS: Atom = Atom(35);
    pub const WM_CLIENT_MACHINE: Atom = Atom(36);
    pub const WM_ICON_NAME: Atom = Atom(37);
    pub const WM_ICON_SIZE: Atom = Atom(38);
    pub const WM_NAME: Atom = Atom(39);
    pub const WM_NORMAL_HINTS: Atom = Atom(40);
    pub const WM_SIZE_HINTS: Atom = Atom(41);
    pub const WM_ZOOM_HINTS: Atom = Atom(42);
    pub const MIN_SPACE: Atom = Atom(43);
    pub const NORM_SPACE: Atom = Atom(44);
    pub const MAX_SPACE: Atom = Atom(45);
    pub const END_SPACE: Atom = Atom(46);
    pub const SUPERSCRIPT_X: Atom = Atom(47);
    pub const SUPERSCRIPT_Y: Atom = Atom(48);
    pub const SUBSCRIPT_X: Atom = Atom(49);
    pub const SUBSCRIPT_Y: Atom = Atom(50);
    pub const UNDERLINE_POSITION: Atom = Atom(51);
    pub const UNDERLINE_THICKNESS: Atom = Atom(52);
    pub const STRIKEOUT_ASCENT: Atom = Atom(53);
    pub const STRIKEOUT_DESCENT: Atom = Atom(54);
    pub const ITALIC_ANGLE: Atom = Atom(55);
    pub const X_HEIGHT: Atom = Atom(56);
    pub const QUAD_WIDTH: Atom = Atom(57);
    pub const WEIGHT: Atom = Atom(58);
    pub const POINT_SIZE: Atom = Atom(59);
    pub const RESOLUTION: Atom = Atom(60);
    pub const COPYRIGHT: Atom = Atom(61);
    pub const NOTICE: Atom = Atom(62);
    pub const FONT_NAME: Atom = Atom(63);
    pub const FAMILY_NAME: Atom = Atom(64);
    pub const FULL_NAME: Atom = Atom(65);
    pub const CAP_HEIGHT: Atom = Atom(66);
    pub const WM_CLASS: Atom = Atom(67);
    pub const WM_TRANSIENT_FOR: Atom = Atom(68);

    /// First atom id not predefined by the core protocol
    pub const FIRST_USER_ATOM: ffi::Atom = 69;

    /// Names of the predefined atoms, indexed by id - 1
    pub const PREDEFINED_NAMES: [&'static str; 68] = [
        "PRIMARY",
        "SECONDARY",
        "ARC",
        "ATOM",
        "BITMAP",
        "CARDINAL",
        "COLORMAP",
        "CURSOR",
        "CUT_BUFFER0",
        "CUT_BUFFER1",
        "CUT_BUFFER2",
        "CUT_BUFFER3",
        "CUT_BUFFER4",
        "CUT_BUFFER5",
        "CUT_BUFFER6",
        "CUT_BUFFER7",
        "DRAWABLE",
        "FONT",
        "INTEGER",
        "PIXMAP",
        "POINT",
        "RECTANGLE",
        "RESOURCE_MANAGER",
        "RGB_COLOR_MAP",
        "RGB_BEST_MAP",
        "RGB_BLUE_MAP",
        "RGB_DEFAULT_MAP",
        "RGB_GRAY_MAP",
        "RGB_GREEN_MAP",
        "RGB_RED_MAP",
        "STRING",
        "VISUALID",
        "WINDOW",
        "WM_COMMAND",
        "WM_HINTS",
        "WM_CLIENT_MACHINE",
        "WM_ICON_NAME",
        "WM_ICON_SIZE",
        "WM_NAME",
        "WM_NORMAL_HINTS",
        "WM_SIZE_HINTS",
        "WM_ZOOM_HINTS",
        "MIN_SPACE",
        "NORM_SPACE",
        "MAX_SPACE",
        "END_SPACE",
        "SUPERSCRIPT_X",
        "SUPERSCRIPT_Y",
        "SUBSCRIPT_X",
        "SUBSCRIPT_Y",
        "UNDERLINE_POSITION",
        "UNDERLINE_THICKNESS",
        "STRIKEOUT_ASCENT",
        "STRIKEOUT_DESCENT",
        "ITALIC_ANGLE",
        "X_HEIGHT",
        "QUAD_WIDTH",
        "WEIGHT",
        "POINT_SIZE",
        "RESOLUTION",
        "COPYRIGHT",
        "NOTICE",
        "FONT_NAME",
        "FAMILY_NAME",
        "FULL_NAME",
        "CAP_HEIGHT",
        "WM_CLASS",
        "WM_TRANSIENT_FOR",
    ];

    pub fn new(id: ffi::Atom) -> Self {
        Atom(id)
    }

    pub fn get(&self) -> ffi::Atom {
        self.0
    }

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }

    /// Name of a predefined atom, without a server round trip
    pub fn predefined_name(&self) -> Option<&'static str> {
        match self.0 {
            1..=68 => Some(Self::PREDEFINED_NAMES[self.0 as usize - 1]),
            _ => None,
        }
    }

    /// Look up a predefined atom by name
    pub fn predefined(name: &str) -> Option<Atom> {
        Self::PREDEFINED_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| Atom(i as ffi::Atom + 1))
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.predefined_name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "atom#{}", self.0),
        }
    }
}

/// Visual ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VisualId(pub ffi::VisualID);

impl VisualId {
    pub fn new(id: ffi::VisualID) -> Self {
        VisualId(id)
    }

    pub fn get(&self) -> ffi::VisualID {
        self.0
    }
}

/// Server timestamp (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(pub ffi::Time);

impl Timestamp {
    pub const CURRENT_TIME: Timestamp = Timestamp(ffi::CurrentTime);

    pub fn new(ms: ffi::Time) -> Self {
        Timestamp(ms)
    }

    pub fn get(&self) -> ffi::Time {
        self.0
    }
}

/// Keycode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct KeyCode(pub u8);

impl KeyCode {
    pub const ANY: KeyCode = KeyCode(ffi::AnyKey as u8);

    pub fn new(code: u8) -> Self {
        KeyCode(code)
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

/// Pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Button(pub u32);

impl Button {
    pub const ANY: Button = Button(ffi::AnyButton);
    pub const BUTTON1: Button = Button(1);
    pub const BUTTON2: Button = Button(2);
    pub const BUTTON3: Button = Button(3);
    pub const BUTTON4: Button = Button(4);
    pub const BUTTON5: Button = Button(5);

    pub fn new(button: u32) -> Self {
        Button(button)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

/// Client-side graphics context handle.
///
/// Under the native backend this is the `GC` pointer Xlib hands out; it is
/// only meaningful to the backend that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gc(pub(crate) usize);

impl Gc {
    pub(crate) fn from_raw(gc: ffi::GC) -> Self {
        Gc(gc as usize)
    }

    pub(crate) fn as_raw(&self) -> ffi::GC {
        self.0 as ffi::GC
    }

    pub(crate) fn handle(&self) -> usize {
        self.0
    }
}

/// Point (x, y coordinate), layout-compatible with XPoint
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub fn new(x: i16, y: i16) -> Self {
        Point { x, y }
    }
}

/// Rectangle, layout-compatible with XRectangle
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rectangle {
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
}

impl Rectangle {
    pub fn new(x: i16, y: i16, width: u16, height: u16) -> Self {
        Rectangle {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (rx, ry) = (self.x as i32, self.y as i32);
        x >= rx && y >= ry && x < rx + self.width as i32 && y < ry + self.height as i32
    }
}

/// Segment (for drawing line segments), layout-compatible with XSegment
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Segment {
    pub x1: i16,
    pub y1: i16,
    pub x2: i16,
    pub y2: i16,
}

impl Segment {
    pub fn new(x1: i16, y1: i16, x2: i16, y2: i16) -> Self {
        Segment { x1, y1, x2, y2 }
    }
}

/// Arc (for drawing arcs and ellipses), layout-compatible with XArc
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArcSegment {
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
    pub angle1: i16, // Start angle in 1/64 degrees
    pub angle2: i16, // Arc angle in 1/64 degrees
}

impl ArcSegment {
    /// A full ellipse inscribed in the given box
    pub fn ellipse(x: i16, y: i16, width: u16, height: u16) -> Self {
        ArcSegment {
            x,
            y,
            width,
            height,
            angle1: 0,
            angle2: 360 * 64,
        }
    }
}

const _: () = assert!(std::mem::size_of::<Point>() == std::mem::size_of::<ffi::XPoint>());
const _: () = assert!(std::mem::size_of::<Rectangle>() == std::mem::size_of::<ffi::XRectangle>());
const _: () = assert!(std::mem::size_of::<Segment>() == std::mem::size_of::<ffi::XSegment>());
const _: () = assert!(std::mem::size_of::<ArcSegment>() == std::mem::size_of::<ffi::XArc>());

/// Declares a C-valued enum with lossless conversion from and to the raw
/// constant.
macro_rules! raw_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $raw:ty {
            $($variant:ident = $value:expr),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            pub fn from_raw(value: $raw) -> Option<Self> {
                $(if value == $value {
                    return Some($name::$variant);
                })*
                None
            }

            pub fn to_raw(self) -> $raw {
                match self {
                    $($name::$variant => $value),*
                }
            }
        }
    };
}

pub(crate) use raw_enum;

raw_enum! {
    /// Window class
    pub enum WindowClass: c_uint {
        CopyFromParent = 0,
        InputOutput = ffi::InputOutput,
        InputOnly = ffi::InputOnly,
    }
}

raw_enum! {
    /// Backing store hint
    pub enum BackingStore: c_int {
        NotUseful = ffi::NotUseful,
        WhenMapped = ffi::WhenMapped,
        Always = ffi::Always,
    }
}

raw_enum! {
    /// Map state
    pub enum MapState: c_int {
        Unmapped = ffi::IsUnmapped,
        Unviewable = ffi::IsUnviewable,
        Viewable = ffi::IsViewable,
    }
}

raw_enum! {
    /// Stack mode for ConfigureWindow
    pub enum StackMode: c_int {
        Above = ffi::Above,
        Below = ffi::Below,
        TopIf = ffi::TopIf,
        BottomIf = ffi::BottomIf,
        Opposite = ffi::Opposite,
    }
}

raw_enum! {
    /// Bit and window gravity. `Forget` doubles as `Unmap` for window gravity.
    pub enum Gravity: c_int {
        Forget = ffi::ForgetGravity,
        NorthWest = ffi::NorthWestGravity,
        North = ffi::NorthGravity,
        NorthEast = ffi::NorthEastGravity,
        West = ffi::WestGravity,
        Center = ffi::CenterGravity,
        East = ffi::EastGravity,
        SouthWest = ffi::SouthWestGravity,
        South = ffi::SouthGravity,
        SouthEast = ffi::SouthEastGravity,
        Static = ffi::StaticGravity,
    }
}

raw_enum! {
    /// GC function
    pub enum GcFunction: c_int {
        Clear = ffi::GXclear,
        And = ffi::GXand,
        AndReverse = ffi::GXandReverse,
        Copy = ffi::GXcopy,
        AndInverted = ffi::GXandInverted,
        NoOp = ffi::GXnoop,
        Xor = ffi::GXxor,
        Or = ffi::GXor,
        Nor = ffi::GXnor,
        Equiv = ffi::GXequiv,
        Invert = ffi::GXinvert,
        OrReverse = ffi::GXorReverse,
        CopyInverted = ffi::GXcopyInverted,
        OrInverted = ffi::GXorInverted,
        Nand = ffi::GXnand,
        Set = ffi::GXset,
    }
}

raw_enum! {
    /// Line style
    pub enum LineStyle: c_int {
        Solid = ffi::LineSolid,
        OnOffDash = ffi::LineOnOffDash,
        DoubleDash = ffi::LineDoubleDash,
    }
}

raw_enum! {
    /// Cap style
    pub enum CapStyle: c_int {
        NotLast = ffi::CapNotLast,
        Butt = ffi::CapButt,
        Round = ffi::CapRound,
        Projecting = ffi::CapProjecting,
    }
}

raw_enum! {
    /// Join style
    pub enum JoinStyle: c_int {
        Miter = ffi::JoinMiter,
        Round = ffi::JoinRound,
        Bevel = ffi::JoinBevel,
    }
}

raw_enum! {
    /// Fill style
    pub enum FillStyle: c_int {
        Solid = ffi::FillSolid,
        Tiled = ffi::FillTiled,
        Stippled = ffi::FillStippled,
        OpaqueStippled = ffi::FillOpaqueStippled,
    }
}

raw_enum! {
    /// Fill rule
    pub enum FillRule: c_int {
        EvenOdd = ffi::EvenOddRule,
        Winding = ffi::WindingRule,
    }
}

raw_enum! {
    /// Arc mode
    pub enum ArcMode: c_int {
        Chord = ffi::ArcChord,
        PieSlice = ffi::ArcPieSlice,
    }
}

raw_enum! {
    pub enum SubwindowMode: c_int {
        ClipByChildren = ffi::ClipByChildren,
        IncludeInferiors = ffi::IncludeInferiors,
    }
}

raw_enum! {
    /// Ordering promised to XSetClipRectangles
    pub enum ClipOrdering: c_int {
        Unsorted = ffi::Unsorted,
        YSorted = ffi::YSorted,
        YXSorted = ffi::YXSorted,
        YXBanded = ffi::YXBanded,
    }
}

raw_enum! {
    /// Image format
    pub enum ImageFormat: c_int {
        XYBitmap = ffi::XYBitmap,
        XYPixmap = ffi::XYPixmap,
        ZPixmap = ffi::ZPixmap,
    }
}

raw_enum! {
    /// Byte order
    pub enum ByteOrder: c_int {
        LSBFirst = ffi::LSBFirst,
        MSBFirst = ffi::MSBFirst,
    }
}

impl ByteOrder {
    pub fn native() -> Self {
        if cfg!(target_endian = "little") {
            ByteOrder::LSBFirst
        } else {
            ByteOrder::MSBFirst
        }
    }
}

raw_enum! {
    /// Visual class
    pub enum VisualClass: c_int {
        StaticGray = ffi::StaticGray,
        GrayScale = ffi::GrayScale,
        StaticColor = ffi::StaticColor,
        PseudoColor = ffi::PseudoColor,
        TrueColor = ffi::TrueColor,
        DirectColor = ffi::DirectColor,
    }
}

raw_enum! {
    pub enum GrabMode: c_int {
        Sync = ffi::GrabModeSync,
        Async = ffi::GrabModeAsync,
    }
}

raw_enum! {
    /// Reply to a pointer or keyboard grab
    pub enum GrabStatus: c_int {
        Success = ffi::GrabSuccess,
        AlreadyGrabbed = ffi::AlreadyGrabbed,
        InvalidTime = ffi::GrabInvalidTime,
        NotViewable = ffi::GrabNotViewable,
        Frozen = ffi::GrabFrozen,
    }
}

raw_enum! {
    pub enum AllowEvents: c_int {
        AsyncPointer = ffi::AsyncPointer,
        SyncPointer = ffi::SyncPointer,
        ReplayPointer = ffi::ReplayPointer,
        AsyncKeyboard = ffi::AsyncKeyboard,
        SyncKeyboard = ffi::SyncKeyboard,
        ReplayKeyboard = ffi::ReplayKeyboard,
        AsyncBoth = ffi::AsyncBoth,
        SyncBoth = ffi::SyncBoth,
    }
}

raw_enum! {
    /// Where focus goes when the focus window becomes unviewable
    pub enum RevertTo: c_int {
        None = ffi::RevertToNone,
        PointerRoot = ffi::RevertToPointerRoot,
        Parent = ffi::RevertToParent,
    }
}

raw_enum! {
    pub enum PropMode: c_int {
        Replace = ffi::PropModeReplace,
        Prepend = ffi::PropModePrepend,
        Append = ffi::PropModeAppend,
    }
}

raw_enum! {
    pub enum CoordMode: c_int {
        Origin = ffi::CoordModeOrigin,
        Previous = ffi::CoordModePrevious,
    }
}

raw_enum! {
    /// Polygon shape hint for XFillPolygon
    pub enum Shape: c_int {
        Complex = ffi::Complex,
        Nonconvex = ffi::Nonconvex,
        Convex = ffi::Convex,
    }
}

raw_enum! {
    pub enum CloseDownMode: c_int {
        DestroyAll = ffi::DestroyAll,
        RetainPermanent = ffi::RetainPermanent,
        RetainTemporary = ffi::RetainTemporary,
    }
}

raw_enum! {
    pub enum Circulation: c_int {
        RaiseLowest = ffi::RaiseLowest,
        LowerHighest = ffi::LowerHighest,
    }
}

raw_enum! {
    pub enum ScreenSaverMode: c_int {
        Reset = ffi::ScreenSaverReset,
        Active = ffi::ScreenSaverActive,
    }
}

raw_enum! {
    /// ICCCM window state, as used in WM_HINTS and XIconifyWindow
    pub enum WmState: c_int {
        Withdrawn = ffi::WithdrawnState,
        Normal = ffi::NormalState,
        Iconic = ffi::IconicState,
    }
}

raw_enum! {
    /// Class argument of XQueryBestSize
    pub enum BestSizeClass: c_int {
        Cursor = ffi::CursorShape,
        Tile = ffi::TileShape,
        Stipple = ffi::StippleShape,
    }
}

raw_enum! {
    /// Mode argument of XEventsQueued
    pub enum QueuedMode: c_int {
        Already = ffi::QueuedAlready,
        AfterReading = ffi::QueuedAfterReading,
        AfterFlush = ffi::QueuedAfterFlush,
    }
}

raw_enum! {
    /// Address family of a host access entry
    pub enum HostFamily: c_int {
        Internet = ffi::FamilyInternet,
        DECnet = ffi::FamilyDECnet,
        Chaos = ffi::FamilyChaos,
        ServerInterpreted = ffi::FamilyServerInterpreted,
        Internet6 = ffi::FamilyInternet6,
    }
}

raw_enum! {
    /// Standard X11 cursor shapes (from cursor font glyph indices)
    pub enum StandardCursor: c_uint {
        XCursor = ffi::XC_X_cursor,
        Arrow = ffi::XC_arrow,
        BottomLeftCorner = ffi::XC_bottom_left_corner,
        BottomRightCorner = ffi::XC_bottom_right_corner,
        BottomSide = ffi::XC_bottom_side,
        Crosshair = ffi::XC_crosshair,
        Fleur = ffi::XC_fleur,
        Hand1 = ffi::XC_hand1,
        Hand2 = ffi::XC_hand2,
        LeftPtr = ffi::XC_left_ptr,
        LeftSide = ffi::XC_left_side,
        Pencil = ffi::XC_pencil,
        Plus = ffi::XC_plus,
        QuestionArrow = ffi::XC_question_arrow,
        RightSide = ffi::XC_right_side,
        SbHDoubleArrow = ffi::XC_sb_h_double_arrow,
        SbVDoubleArrow = ffi::XC_sb_v_double_arrow,
        Sizing = ffi::XC_sizing,
        TopLeftCorner = ffi::XC_top_left_corner,
        TopRightCorner = ffi::XC_top_right_corner,
        TopSide = ffi::XC_top_side,
        Watch = ffi::XC_watch,
        Xterm = ffi::XC_xterm,
    }
}

/// Event masks
pub mod event_mask {
    use libc::c_long;

    use crate::ffi;

    pub const NO_EVENT: c_long = ffi::NoEventMask;
    pub const KEY_PRESS: c_long = ffi::KeyPressMask;
    pub const KEY_RELEASE: c_long = ffi::KeyReleaseMask;
    pub const BUTTON_PRESS: c_long = ffi::ButtonPressMask;
    pub const BUTTON_RELEASE: c_long = ffi::ButtonReleaseMask;
    pub const ENTER_WINDOW: c_long = ffi::EnterWindowMask;
    pub const LEAVE_WINDOW: c_long = ffi::LeaveWindowMask;
    pub const POINTER_MOTION: c_long = ffi::PointerMotionMask;
    pub const POINTER_MOTION_HINT: c_long = ffi::PointerMotionHintMask;
    pub const BUTTON1_MOTION: c_long = ffi::Button1MotionMask;
    pub const BUTTON2_MOTION: c_long = ffi::Button2MotionMask;
    pub const BUTTON3_MOTION: c_long = ffi::Button3MotionMask;
    pub const BUTTON4_MOTION: c_long = ffi::Button4MotionMask;
    pub const BUTTON5_MOTION: c_long = ffi::Button5MotionMask;
    pub const BUTTON_MOTION: c_long = ffi::ButtonMotionMask;
    pub const KEYMAP_STATE: c_long = ffi::KeymapStateMask;
    pub const EXPOSURE: c_long = ffi::ExposureMask;
    pub const VISIBILITY_CHANGE: c_long = ffi::VisibilityChangeMask;
    pub const STRUCTURE_NOTIFY: c_long = ffi::StructureNotifyMask;
    pub const RESIZE_REDIRECT: c_long = ffi::ResizeRedirectMask;
    pub const SUBSTRUCTURE_NOTIFY: c_long = ffi::SubstructureNotifyMask;
    pub const SUBSTRUCTURE_REDIRECT: c_long = ffi::SubstructureRedirectMask;
    pub const FOCUS_CHANGE: c_long = ffi::FocusChangeMask;
    pub const PROPERTY_CHANGE: c_long = ffi::PropertyChangeMask;
    pub const COLORMAP_CHANGE: c_long = ffi::ColormapChangeMask;
    pub const OWNER_GRAB_BUTTON: c_long = ffi::OwnerGrabButtonMask;
}

/// Keyboard/pointer modifier masks
pub mod modifier_mask {
    use libc::c_uint;

    use crate::ffi;

    pub const SHIFT: c_uint = ffi::ShiftMask;
    pub const LOCK: c_uint = ffi::LockMask;
    pub const CONTROL: c_uint = ffi::ControlMask;
    pub const MOD1: c_uint = ffi::Mod1Mask;
    pub const MOD2: c_uint = ffi::Mod2Mask;
    pub const MOD3: c_uint = ffi::Mod3Mask;
    pub const MOD4: c_uint = ffi::Mod4Mask;
    pub const MOD5: c_uint = ffi::Mod5Mask;
    pub const BUTTON1: c_uint = ffi::Button1Mask;
    pub const BUTTON2: c_uint = ffi::Button2Mask;
    pub const BUTTON3: c_uint = ffi::Button3Mask;
    pub const BUTTON4: c_uint = ffi::Button4Mask;
    pub const BUTTON5: c_uint = ffi::Button5Mask;
    pub const ANY: c_uint = ffi::AnyModifier;
}

/// Converts a Rust bool to an Xlib Bool
pub(crate) fn to_bool(value: bool) -> ffi::Bool {
    if value {
        ffi::True
    } else {
        ffi::False
    }
}

/// Converts an Xlib Bool to a Rust bool. Any non-zero value is true.
pub(crate) fn from_bool(value: ffi::Bool) -> bool {
    value != ffi::False
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predefined_atoms() {
        assert_eq!(Atom::WM_NAME.predefined_name(), Some("WM_NAME"));
        assert_eq!(Atom::predefined("WM_TRANSIENT_FOR"), Some(Atom::WM_TRANSIENT_FOR));
        assert_eq!(Atom::predefined("_NET_WM_NAME"), None);
        assert_eq!(Atom::new(Atom::FIRST_USER_ATOM).predefined_name(), None);
        assert_eq!(Atom::STRING.get(), ffi::XA_STRING);
    }

    #[test]
    fn test_raw_enum_round_trip() {
        assert_eq!(GcFunction::from_raw(ffi::GXxor), Some(GcFunction::Xor));
        assert_eq!(GcFunction::Xor.to_raw(), 6);
        assert_eq!(Gravity::from_raw(42), None);
        assert_eq!(WmState::from_raw(3), Some(WmState::Iconic));
        assert_eq!(StandardCursor::Xterm.to_raw(), 152);
    }

    #[test]
    fn test_resource_id_display() {
        assert_eq!(Window::new(0x1a00003).to_string(), "0x01a00003");
        assert!(Pixmap::NONE.is_none());
        assert_eq!(Drawable::from(Window::new(7)), Drawable::new(7));
    }

    #[test]
    fn test_rectangle_contains() {
        let rect = Rectangle::new(10, 10, 5, 5);
        assert!(rect.contains(10, 10));
        assert!(rect.contains(14, 14));
        assert!(!rect.contains(15, 10));
        assert!(!rect.contains(9, 12));
    }
}
