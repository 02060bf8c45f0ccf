//! Constants from X.h, Xlib.h, Xutil.h, Xatom.h, Xproto.h and cursorfont.h

use libc::{c_int, c_long, c_uchar, c_uint, c_ulong};

use super::types::{Atom, Time, XID};

// X.h: reserved resource and constant definitions
pub const None: XID = 0;
pub const ParentRelative: XID = 1;
pub const CopyFromParent: XID = 0;
pub const PointerWindow: XID = 0;
pub const InputFocus: XID = 1;
pub const PointerRoot: XID = 1;
pub const AnyPropertyType: Atom = 0;
pub const AnyKey: c_int = 0;
pub const AnyButton: c_uint = 0;
pub const AllTemporary: XID = 0;
pub const CurrentTime: Time = 0;
pub const NoSymbol: XID = 0;

// Input event masks
pub const NoEventMask: c_long = 0;
pub const KeyPressMask: c_long = 1 << 0;
pub const KeyReleaseMask: c_long = 1 << 1;
pub const ButtonPressMask: c_long = 1 << 2;
pub const ButtonReleaseMask: c_long = 1 << 3;
pub const EnterWindowMask: c_long = 1 << 4;
pub const LeaveWindowMask: c_long = 1 << 5;
pub const PointerMotionMask: c_long = 1 << 6;
pub const PointerMotionHintMask: c_long = 1 << 7;
pub const Button1MotionMask: c_long = 1 << 8;
pub const Button2MotionMask: c_long = 1 << 9;
pub const Button3MotionMask: c_long = 1 << 10;
pub const Button4MotionMask: c_long = 1 << 11;
pub const Button5MotionMask: c_long = 1 << 12;
pub const ButtonMotionMask: c_long = 1 << 13;
pub const KeymapStateMask: c_long = 1 << 14;
pub const ExposureMask: c_long = 1 << 15;
pub const VisibilityChangeMask: c_long = 1 << 16;
pub const StructureNotifyMask: c_long = 1 << 17;
pub const ResizeRedirectMask: c_long = 1 << 18;
pub const SubstructureNotifyMask: c_long = 1 << 19;
pub const SubstructureRedirectMask: c_long = 1 << 20;
pub const FocusChangeMask: c_long = 1 << 21;
pub const PropertyChangeMask: c_long = 1 << 22;
pub const ColormapChangeMask: c_long = 1 << 23;
pub const OwnerGrabButtonMask: c_long = 1 << 24;

// Event names
pub const KeyPress: c_int = 2;
pub const KeyRelease: c_int = 3;
pub const ButtonPress: c_int = 4;
pub const ButtonRelease: c_int = 5;
pub const MotionNotify: c_int = 6;
pub const EnterNotify: c_int = 7;
pub const LeaveNotify: c_int = 8;
pub const FocusIn: c_int = 9;
pub const FocusOut: c_int = 10;
pub const KeymapNotify: c_int = 11;
pub const Expose: c_int = 12;
pub const GraphicsExpose: c_int = 13;
pub const NoExpose: c_int = 14;
pub const VisibilityNotify: c_int = 15;
pub const CreateNotify: c_int = 16;
pub const DestroyNotify: c_int = 17;
pub const UnmapNotify: c_int = 18;
pub const MapNotify: c_int = 19;
pub const MapRequest: c_int = 20;
pub const ReparentNotify: c_int = 21;
pub const ConfigureNotify: c_int = 22;
pub const ConfigureRequest: c_int = 23;
pub const GravityNotify: c_int = 24;
pub const ResizeRequest: c_int = 25;
pub const CirculateNotify: c_int = 26;
pub const CirculateRequest: c_int = 27;
pub const PropertyNotify: c_int = 28;
pub const SelectionClear: c_int = 29;
pub const SelectionRequest: c_int = 30;
pub const SelectionNotify: c_int = 31;
pub const ColormapNotify: c_int = 32;
pub const ClientMessage: c_int = 33;
pub const MappingNotify: c_int = 34;
pub const GenericEvent: c_int = 35;
pub const LASTEvent: c_int = 36;

// Key masks
pub const ShiftMask: c_uint = 1 << 0;
pub const LockMask: c_uint = 1 << 1;
pub const ControlMask: c_uint = 1 << 2;
pub const Mod1Mask: c_uint = 1 << 3;
pub const Mod2Mask: c_uint = 1 << 4;
pub const Mod3Mask: c_uint = 1 << 5;
pub const Mod4Mask: c_uint = 1 << 6;
pub const Mod5Mask: c_uint = 1 << 7;

pub const ShiftMapIndex: c_int = 0;
pub const LockMapIndex: c_int = 1;
pub const ControlMapIndex: c_int = 2;
pub const Mod1MapIndex: c_int = 3;
pub const Mod2MapIndex: c_int = 4;
pub const Mod3MapIndex: c_int = 5;
pub const Mod4MapIndex: c_int = 6;
pub const Mod5MapIndex: c_int = 7;

// Button masks and names
pub const Button1Mask: c_uint = 1 << 8;
pub const Button2Mask: c_uint = 1 << 9;
pub const Button3Mask: c_uint = 1 << 10;
pub const Button4Mask: c_uint = 1 << 11;
pub const Button5Mask: c_uint = 1 << 12;
pub const AnyModifier: c_uint = 1 << 15;

pub const Button1: c_uint = 1;
pub const Button2: c_uint = 2;
pub const Button3: c_uint = 3;
pub const Button4: c_uint = 4;
pub const Button5: c_uint = 5;

// Notify modes
pub const NotifyNormal: c_int = 0;
pub const NotifyGrab: c_int = 1;
pub const NotifyUngrab: c_int = 2;
pub const NotifyWhileGrabbed: c_int = 3;

pub const NotifyHint: c_int = 1;

// Notify detail
pub const NotifyAncestor: c_int = 0;
pub const NotifyVirtual: c_int = 1;
pub const NotifyInferior: c_int = 2;
pub const NotifyNonlinear: c_int = 3;
pub const NotifyNonlinearVirtual: c_int = 4;
pub const NotifyPointer: c_int = 5;
pub const NotifyPointerRoot: c_int = 6;
pub const NotifyDetailNone: c_int = 7;

// Visibility notify
pub const VisibilityUnobscured: c_int = 0;
pub const VisibilityPartiallyObscured: c_int = 1;
pub const VisibilityFullyObscured: c_int = 2;

// Circulation request
pub const PlaceOnTop: c_int = 0;
pub const PlaceOnBottom: c_int = 1;

// Protocol families
pub const FamilyInternet: c_int = 0;
pub const FamilyDECnet: c_int = 1;
pub const FamilyChaos: c_int = 2;
pub const FamilyServerInterpreted: c_int = 5;
pub const FamilyInternet6: c_int = 6;

// Property notification
pub const PropertyNewValue: c_int = 0;
pub const PropertyDelete: c_int = 1;

// Color map notification
pub const ColormapUninstalled: c_int = 0;
pub const ColormapInstalled: c_int = 1;

// Grab modes and replies
pub const GrabModeSync: c_int = 0;
pub const GrabModeAsync: c_int = 1;

pub const GrabSuccess: c_int = 0;
pub const AlreadyGrabbed: c_int = 1;
pub const GrabInvalidTime: c_int = 2;
pub const GrabNotViewable: c_int = 3;
pub const GrabFrozen: c_int = 4;

// AllowEvents modes
pub const AsyncPointer: c_int = 0;
pub const SyncPointer: c_int = 1;
pub const ReplayPointer: c_int = 2;
pub const AsyncKeyboard: c_int = 3;
pub const SyncKeyboard: c_int = 4;
pub const ReplayKeyboard: c_int = 5;
pub const AsyncBoth: c_int = 6;
pub const SyncBoth: c_int = 7;

// Input focus reversion
pub const RevertToNone: c_int = 0;
pub const RevertToPointerRoot: c_int = 1;
pub const RevertToParent: c_int = 2;

// Protocol error codes
pub const Success: c_uchar = 0;
pub const BadRequest: c_uchar = 1;
pub const BadValue: c_uchar = 2;
pub const BadWindow: c_uchar = 3;
pub const BadPixmap: c_uchar = 4;
pub const BadAtom: c_uchar = 5;
pub const BadCursor: c_uchar = 6;
pub const BadFont: c_uchar = 7;
pub const BadMatch: c_uchar = 8;
pub const BadDrawable: c_uchar = 9;
pub const BadAccess: c_uchar = 10;
pub const BadAlloc: c_uchar = 11;
pub const BadColor: c_uchar = 12;
pub const BadGC: c_uchar = 13;
pub const BadIDChoice: c_uchar = 14;
pub const BadName: c_uchar = 15;
pub const BadLength: c_uchar = 16;
pub const BadImplementation: c_uchar = 17;
pub const FirstExtensionError: c_uchar = 128;
pub const LastExtensionError: c_uchar = 255;

// Window classes
pub const InputOutput: c_uint = 1;
pub const InputOnly: c_uint = 2;

// Window attributes for CreateWindow and ChangeWindowAttributes
pub const CWBackPixmap: c_ulong = 1 << 0;
pub const CWBackPixel: c_ulong = 1 << 1;
pub const CWBorderPixmap: c_ulong = 1 << 2;
pub const CWBorderPixel: c_ulong = 1 << 3;
pub const CWBitGravity: c_ulong = 1 << 4;
pub const CWWinGravity: c_ulong = 1 << 5;
pub const CWBackingStore: c_ulong = 1 << 6;
pub const CWBackingPlanes: c_ulong = 1 << 7;
pub const CWBackingPixel: c_ulong = 1 << 8;
pub const CWOverrideRedirect: c_ulong = 1 << 9;
pub const CWSaveUnder: c_ulong = 1 << 10;
pub const CWEventMask: c_ulong = 1 << 11;
pub const CWDontPropagate: c_ulong = 1 << 12;
pub const CWColormap: c_ulong = 1 << 13;
pub const CWCursor: c_ulong = 1 << 14;

// ConfigureWindow structure
pub const CWX: c_uint = 1 << 0;
pub const CWY: c_uint = 1 << 1;
pub const CWWidth: c_uint = 1 << 2;
pub const CWHeight: c_uint = 1 << 3;
pub const CWBorderWidth: c_uint = 1 << 4;
pub const CWSibling: c_uint = 1 << 5;
pub const CWStackMode: c_uint = 1 << 6;

// Bit and window gravity
pub const ForgetGravity: c_int = 0;
pub const UnmapGravity: c_int = 0;
pub const NorthWestGravity: c_int = 1;
pub const NorthGravity: c_int = 2;
pub const NorthEastGravity: c_int = 3;
pub const WestGravity: c_int = 4;
pub const CenterGravity: c_int = 5;
pub const EastGravity: c_int = 6;
pub const SouthWestGravity: c_int = 7;
pub const SouthGravity: c_int = 8;
pub const SouthEastGravity: c_int = 9;
pub const StaticGravity: c_int = 10;

// Backing store
pub const NotUseful: c_int = 0;
pub const WhenMapped: c_int = 1;
pub const Always: c_int = 2;

// Map state
pub const IsUnmapped: c_int = 0;
pub const IsUnviewable: c_int = 1;
pub const IsViewable: c_int = 2;

// ChangeSaveSet
pub const SetModeInsert: c_int = 0;
pub const SetModeDelete: c_int = 1;

// ChangeCloseDownMode
pub const DestroyAll: c_int = 0;
pub const RetainPermanent: c_int = 1;
pub const RetainTemporary: c_int = 2;

// Window stacking method
pub const Above: c_int = 0;
pub const Below: c_int = 1;
pub const TopIf: c_int = 2;
pub const BottomIf: c_int = 3;
pub const Opposite: c_int = 4;

// Circulation direction
pub const RaiseLowest: c_int = 0;
pub const LowerHighest: c_int = 1;

// Property modes
pub const PropModeReplace: c_int = 0;
pub const PropModePrepend: c_int = 1;
pub const PropModeAppend: c_int = 2;

// Graphics functions
pub const GXclear: c_int = 0x0;
pub const GXand: c_int = 0x1;
pub const GXandReverse: c_int = 0x2;
pub const GXcopy: c_int = 0x3;
pub const GXandInverted: c_int = 0x4;
pub const GXnoop: c_int = 0x5;
pub const GXxor: c_int = 0x6;
pub const GXor: c_int = 0x7;
pub const GXnor: c_int = 0x8;
pub const GXequiv: c_int = 0x9;
pub const GXinvert: c_int = 0xa;
pub const GXorReverse: c_int = 0xb;
pub const GXcopyInverted: c_int = 0xc;
pub const GXorInverted: c_int = 0xd;
pub const GXnand: c_int = 0xe;
pub const GXset: c_int = 0xf;

// LineStyle
pub const LineSolid: c_int = 0;
pub const LineOnOffDash: c_int = 1;
pub const LineDoubleDash: c_int = 2;

// capStyle
pub const CapNotLast: c_int = 0;
pub const CapButt: c_int = 1;
pub const CapRound: c_int = 2;
pub const CapProjecting: c_int = 3;

// joinStyle
pub const JoinMiter: c_int = 0;
pub const JoinRound: c_int = 1;
pub const JoinBevel: c_int = 2;

// fillStyle
pub const FillSolid: c_int = 0;
pub const FillTiled: c_int = 1;
pub const FillStippled: c_int = 2;
pub const FillOpaqueStippled: c_int = 3;

// fillRule
pub const EvenOddRule: c_int = 0;
pub const WindingRule: c_int = 1;

// subwindow mode
pub const ClipByChildren: c_int = 0;
pub const IncludeInferiors: c_int = 1;

// SetClipRectangles ordering
pub const Unsorted: c_int = 0;
pub const YSorted: c_int = 1;
pub const YXSorted: c_int = 2;
pub const YXBanded: c_int = 3;

// CoordinateMode for drawing routines
pub const CoordModeOrigin: c_int = 0;
pub const CoordModePrevious: c_int = 1;

// Polygon shapes
pub const Complex: c_int = 0;
pub const Nonconvex: c_int = 1;
pub const Convex: c_int = 2;

// Arc modes for PolyFillArc
pub const ArcChord: c_int = 0;
pub const ArcPieSlice: c_int = 1;

// GC components
pub const GCFunction: c_ulong = 1 << 0;
pub const GCPlaneMask: c_ulong = 1 << 1;
pub const GCForeground: c_ulong = 1 << 2;
pub const GCBackground: c_ulong = 1 << 3;
pub const GCLineWidth: c_ulong = 1 << 4;
pub const GCLineStyle: c_ulong = 1 << 5;
pub const GCCapStyle: c_ulong = 1 << 6;
pub const GCJoinStyle: c_ulong = 1 << 7;
pub const GCFillStyle: c_ulong = 1 << 8;
pub const GCFillRule: c_ulong = 1 << 9;
pub const GCTile: c_ulong = 1 << 10;
pub const GCStipple: c_ulong = 1 << 11;
pub const GCTileStipXOrigin: c_ulong = 1 << 12;
pub const GCTileStipYOrigin: c_ulong = 1 << 13;
pub const GCFont: c_ulong = 1 << 14;
pub const GCSubwindowMode: c_ulong = 1 << 15;
pub const GCGraphicsExposures: c_ulong = 1 << 16;
pub const GCClipXOrigin: c_ulong = 1 << 17;
pub const GCClipYOrigin: c_ulong = 1 << 18;
pub const GCClipMask: c_ulong = 1 << 19;
pub const GCDashOffset: c_ulong = 1 << 20;
pub const GCDashList: c_ulong = 1 << 21;
pub const GCArcMode: c_ulong = 1 << 22;
pub const GCLastBit: c_int = 22;

// Fonts
pub const FontChange: c_int = 255;
pub const FontLeftToRight: c_int = 0;
pub const FontRightToLeft: c_int = 1;

// Image formats
pub const XYBitmap: c_int = 0;
pub const XYPixmap: c_int = 1;
pub const ZPixmap: c_int = 2;

// Color map alloc
pub const AllocNone: c_int = 0;
pub const AllocAll: c_int = 1;

// Flags used in StoreNamedColor, StoreColors
pub const DoRed: c_uchar = 1 << 0;
pub const DoGreen: c_uchar = 1 << 1;
pub const DoBlue: c_uchar = 1 << 2;

// QueryBestSize classes
pub const CursorShape: c_int = 0;
pub const TileShape: c_int = 1;
pub const StippleShape: c_int = 2;

// Keyboard and pointer
pub const AutoRepeatModeOff: c_int = 0;
pub const AutoRepeatModeOn: c_int = 1;
pub const AutoRepeatModeDefault: c_int = 2;

pub const LedModeOff: c_int = 0;
pub const LedModeOn: c_int = 1;

pub const KBKeyClickPercent: c_ulong = 1 << 0;
pub const KBBellPercent: c_ulong = 1 << 1;
pub const KBBellPitch: c_ulong = 1 << 2;
pub const KBBellDuration: c_ulong = 1 << 3;
pub const KBLed: c_ulong = 1 << 4;
pub const KBLedMode: c_ulong = 1 << 5;
pub const KBKey: c_ulong = 1 << 6;
pub const KBAutoRepeatMode: c_ulong = 1 << 7;

pub const MappingSuccess: c_int = 0;
pub const MappingBusy: c_int = 1;
pub const MappingFailed: c_int = 2;

pub const MappingModifier: c_int = 0;
pub const MappingKeyboard: c_int = 1;
pub const MappingPointer: c_int = 2;

// Screen saver
pub const DontPreferBlanking: c_int = 0;
pub const PreferBlanking: c_int = 1;
pub const DefaultBlanking: c_int = 2;

pub const DisableScreenSaver: c_int = 0;
pub const DisableScreenInterval: c_int = 0;

pub const DontAllowExposures: c_int = 0;
pub const AllowExposures: c_int = 1;
pub const DefaultExposures: c_int = 2;

pub const ScreenSaverReset: c_int = 0;
pub const ScreenSaverActive: c_int = 1;

// Hosts and connections
pub const HostInsert: c_int = 0;
pub const HostDelete: c_int = 1;

pub const EnableAccess: c_int = 1;
pub const DisableAccess: c_int = 0;

// Display classes
pub const StaticGray: c_int = 0;
pub const GrayScale: c_int = 1;
pub const StaticColor: c_int = 2;
pub const PseudoColor: c_int = 3;
pub const TrueColor: c_int = 4;
pub const DirectColor: c_int = 5;

// Byte order used in imageByteOrder and bitmapBitOrder
pub const LSBFirst: c_int = 0;
pub const MSBFirst: c_int = 1;

// Xlib.h
pub const XlibSpecificationRelease: c_int = 6;

pub const QueuedAlready: c_int = 0;
pub const QueuedAfterReading: c_int = 1;
pub const QueuedAfterFlush: c_int = 2;

pub const AllPlanes: c_ulong = !0;

// Xutil.h: XParseGeometry return bits
pub const NoValue: c_int = 0x0000;
pub const XValue: c_int = 0x0001;
pub const YValue: c_int = 0x0002;
pub const WidthValue: c_int = 0x0004;
pub const HeightValue: c_int = 0x0008;
pub const AllValues: c_int = 0x000F;
pub const XNegative: c_int = 0x0010;
pub const YNegative: c_int = 0x0020;

// XSizeHints flags
pub const USPosition: c_long = 1 << 0;
pub const USSize: c_long = 1 << 1;
pub const PPosition: c_long = 1 << 2;
pub const PSize: c_long = 1 << 3;
pub const PMinSize: c_long = 1 << 4;
pub const PMaxSize: c_long = 1 << 5;
pub const PResizeInc: c_long = 1 << 6;
pub const PAspect: c_long = 1 << 7;
pub const PBaseSize: c_long = 1 << 8;
pub const PWinGravity: c_long = 1 << 9;
pub const PAllHints: c_long = PPosition | PSize | PMinSize | PMaxSize | PResizeInc | PAspect;

// XWMHints flags
pub const InputHint: c_long = 1 << 0;
pub const StateHint: c_long = 1 << 1;
pub const IconPixmapHint: c_long = 1 << 2;
pub const IconWindowHint: c_long = 1 << 3;
pub const IconPositionHint: c_long = 1 << 4;
pub const IconMaskHint: c_long = 1 << 5;
pub const WindowGroupHint: c_long = 1 << 6;
pub const AllHints: c_long = InputHint
    | StateHint
    | IconPixmapHint
    | IconWindowHint
    | IconPositionHint
    | IconMaskHint
    | WindowGroupHint;
pub const XUrgencyHint: c_long = 1 << 8;

// Window states
pub const WithdrawnState: c_int = 0;
pub const NormalState: c_int = 1;
pub const IconicState: c_int = 3;
pub const DontCareState: c_int = 0;
pub const ZoomState: c_int = 2;
pub const InactiveState: c_int = 4;

// XVisualInfo masks
pub const VisualNoMask: c_long = 0x0;
pub const VisualIDMask: c_long = 0x1;
pub const VisualScreenMask: c_long = 0x2;
pub const VisualDepthMask: c_long = 0x4;
pub const VisualClassMask: c_long = 0x8;
pub const VisualRedMaskMask: c_long = 0x10;
pub const VisualGreenMaskMask: c_long = 0x20;
pub const VisualBlueMaskMask: c_long = 0x40;
pub const VisualColormapSizeMask: c_long = 0x80;
pub const VisualBitsPerRGBMask: c_long = 0x100;
pub const VisualAllMask: c_long = 0x1FF;

// XRectInRegion results
pub const RectangleOut: c_int = 0;
pub const RectangleIn: c_int = 1;
pub const RectanglePart: c_int = 2;

// Bitmap file results
pub const BitmapSuccess: c_int = 0;
pub const BitmapOpenFailed: c_int = 1;
pub const BitmapFileInvalid: c_int = 2;
pub const BitmapNoMemory: c_int = 3;

// Context manager
pub const XCSUCCESS: c_int = 0;
pub const XCNOMEM: c_int = 1;
pub const XCNOENT: c_int = 2;

pub const ReleaseByFreeingColormap: XID = 1;

// Xatom.h: predefined atoms
pub const XA_PRIMARY: Atom = 1;
pub const XA_SECONDARY: Atom = 2;
pub const XA_ARC: Atom = 3;
pub const XA_ATOM: Atom = 4;
pub const XA_BITMAP: Atom = 5;
pub const XA_CARDINAL: Atom = 6;
pub const XA_COLORMAP: Atom = 7;
pub const XA_CURSOR: Atom = 8;
pub const XA_CUT_BUFFER0: Atom = 9;
pub const XA_CUT_BUFFER1: Atom = 10;
pub const XA_CUT_BUFFER2: Atom = 11;
pub const XA_CUT_BUFFER3: Atom = 12;
pub const XA_CUT_BUFFER4: Atom = 13;
pub const XA_CUT_BUFFER5: Atom = 14;
pub const XA_CUT_BUFFER6: Atom = 15;
pub const XA_CUT_BUFFER7: Atom = 16;
pub const XA_DRAWABLE: Atom = 17;
pub const XA_FONT: Atom = 18;
pub const XA_INTEGER: Atom = 19;
pub const XA_PIXMAP: Atom = 20;
pub const XA_POINT: Atom = 21;
pub const XA_RECTANGLE: Atom = 22;
pub const XA_RESOURCE_MANAGER: Atom = 23;
pub const XA_RGB_COLOR_MAP: Atom = 24;
pub const XA_RGB_BEST_MAP: Atom = 25;
pub const XA_RGB_BLUE_MAP: Atom = 26;
pub const XA_RGB_DEFAULT_MAP: Atom = 27;
pub const XA_RGB_GRAY_MAP: Atom = 28;
pub const XA_RGB_GREEN_MAP: Atom = 29;
pub const XA_RGB_RED_MAP: Atom = 30;
pub const XA_STRING: Atom = 31;
pub const XA_VISUALID: Atom = 32;
pub const XA_WINDOW: Atom = 33;
pub const XA_WM_COMMAND: Atom = 34;
pub const XA_WM_HINTS: Atom = 35;
pub const XA_WM_CLIENT_MACHINE: Atom = 36;
pub const XA_WM_ICON_NAME: Atom = 37;
pub const XA_WM_ICON_SIZE: Atom = 38;
pub const XA_WM_NAME: Atom = 39;
pub const XA_WM_NORMAL_HINTS: Atom = 40;
pub const XA_WM_SIZE_HINTS: Atom = 41;
pub const XA_WM_ZOOM_HINTS: Atom = 42;
pub const XA_MIN_SPACE: Atom = 43;
pub const XA_NORM_SPACE: Atom = 44;
pub const XA_MAX_SPACE: Atom = 45;
pub const XA_END_SPACE: Atom = 46;
pub const XA_SUPERSCRIPT_X: Atom = 47;
pub const XA_SUPERSCRIPT_Y: Atom = 48;
pub const XA_SUBSCRIPT_X: Atom = 49;
pub const XA_SUBSCRIPT_Y: Atom = 50;
pub const XA_UNDERLINE_POSITION: Atom = 51;
pub const XA_UNDERLINE_THICKNESS: Atom = 52;
pub const XA_STRIKEOUT_ASCENT: Atom = 53;
pub const XA_STRIKEOUT_DESCENT: Atom = 54;
pub const XA_ITALIC_ANGLE: Atom = 55;
pub const XA_X_HEIGHT: Atom = 56;
pub const XA_QUAD_WIDTH: Atom = 57;
pub const XA_WEIGHT: Atom = 58;
pub const XA_POINT_SIZE: Atom = 59;
pub const XA_RESOLUTION: Atom = 60;
pub const XA_COPYRIGHT: Atom = 61;
pub const XA_NOTICE: Atom = 62;
pub const XA_FONT_NAME: Atom = 63;
pub const XA_FAMILY_NAME: Atom = 64;
pub const XA_FULL_NAME: Atom = 65;
pub const XA_CAP_HEIGHT: Atom = 66;
pub const XA_WM_CLASS: Atom = 67;
pub const XA_WM_TRANSIENT_FOR: Atom = 68;
pub const XA_LAST_PREDEFINED: Atom = 68;

// Xproto.h: core request opcodes, as reported in XErrorEvent::request_code
pub const X_CreateWindow: c_uchar = 1;
pub const X_ChangeWindowAttributes: c_uchar = 2;
pub const X_GetWindowAttributes: c_uchar = 3;
pub const X_DestroyWindow: c_uchar = 4;
pub const X_DestroySubwindows: c_uchar = 5;
pub const X_ChangeSaveSet: c_uchar = 6;
pub const X_ReparentWindow: c_uchar = 7;
pub const X_MapWindow: c_uchar = 8;
pub const X_MapSubwindows: c_uchar = 9;
pub const X_UnmapWindow: c_uchar = 10;
pub const X_UnmapSubwindows: c_uchar = 11;
pub const X_ConfigureWindow: c_uchar = 12;
pub const X_CirculateWindow: c_uchar = 13;
pub const X_GetGeometry: c_uchar = 14;
pub const X_QueryTree: c_uchar = 15;
pub const X_InternAtom: c_uchar = 16;
pub const X_GetAtomName: c_uchar = 17;
pub const X_ChangeProperty: c_uchar = 18;
pub const X_DeleteProperty: c_uchar = 19;
pub const X_GetProperty: c_uchar = 20;
pub const X_ListProperties: c_uchar = 21;
pub const X_SetSelectionOwner: c_uchar = 22;
pub const X_GetSelectionOwner: c_uchar = 23;
pub const X_ConvertSelection: c_uchar = 24;
pub const X_SendEvent: c_uchar = 25;
pub const X_GrabPointer: c_uchar = 26;
pub const X_UngrabPointer: c_uchar = 27;
pub const X_GrabButton: c_uchar = 28;
pub const X_UngrabButton: c_uchar = 29;
pub const X_ChangeActivePointerGrab: c_uchar = 30;
pub const X_GrabKeyboard: c_uchar = 31;
pub const X_UngrabKeyboard: c_uchar = 32;
pub const X_GrabKey: c_uchar = 33;
pub const X_UngrabKey: c_uchar = 34;
pub const X_AllowEvents: c_uchar = 35;
pub const X_GrabServer: c_uchar = 36;
pub const X_UngrabServer: c_uchar = 37;
pub const X_QueryPointer: c_uchar = 38;
pub const X_GetMotionEvents: c_uchar = 39;
pub const X_TranslateCoords: c_uchar = 40;
pub const X_WarpPointer: c_uchar = 41;
pub const X_SetInputFocus: c_uchar = 42;
pub const X_GetInputFocus: c_uchar = 43;
pub const X_QueryKeymap: c_uchar = 44;
pub const X_OpenFont: c_uchar = 45;
pub const X_CloseFont: c_uchar = 46;
pub const X_QueryFont: c_uchar = 47;
pub const X_QueryTextExtents: c_uchar = 48;
pub const X_ListFonts: c_uchar = 49;
pub const X_ListFontsWithInfo: c_uchar = 50;
pub const X_SetFontPath: c_uchar = 51;
pub const X_GetFontPath: c_uchar = 52;
pub const X_CreatePixmap: c_uchar = 53;
pub const X_FreePixmap: c_uchar = 54;
pub const X_CreateGC: c_uchar = 55;
pub const X_ChangeGC: c_uchar = 56;
pub const X_CopyGC: c_uchar = 57;
pub const X_SetDashes: c_uchar = 58;
pub const X_SetClipRectangles: c_uchar = 59;
pub const X_FreeGC: c_uchar = 60;
pub const X_ClearArea: c_uchar = 61;
pub const X_CopyArea: c_uchar = 62;
pub const X_CopyPlane: c_uchar = 63;
pub const X_PolyPoint: c_uchar = 64;
pub const X_PolyLine: c_uchar = 65;
pub const X_PolySegment: c_uchar = 66;
pub const X_PolyRectangle: c_uchar = 67;
pub const X_PolyArc: c_uchar = 68;
pub const X_FillPoly: c_uchar = 69;
pub const X_PolyFillRectangle: c_uchar = 70;
pub const X_PolyFillArc: c_uchar = 71;
pub const X_PutImage: c_uchar = 72;
pub const X_GetImage: c_uchar = 73;
pub const X_PolyText8: c_uchar = 74;
pub const X_PolyText16: c_uchar = 75;
pub const X_ImageText8: c_uchar = 76;
pub const X_ImageText16: c_uchar = 77;
pub const X_CreateColormap: c_uchar = 78;
pub const X_FreeColormap: c_uchar = 79;
pub const X_CopyColormapAndFree: c_uchar = 80;
pub const X_InstallColormap: c_uchar = 81;
pub const X_UninstallColormap: c_uchar = 82;
pub const X_ListInstalledColormaps: c_uchar = 83;
pub const X_AllocColor: c_uchar = 84;
pub const X_AllocNamedColor: c_uchar = 85;
pub const X_AllocColorCells: c_uchar = 86;
pub const X_AllocColorPlanes: c_uchar = 87;
pub const X_FreeColors: c_uchar = 88;
pub const X_StoreColors: c_uchar = 89;
pub const X_StoreNamedColor: c_uchar = 90;
pub const X_QueryColors: c_uchar = 91;
pub const X_LookupColor: c_uchar = 92;
pub const X_CreateCursor: c_uchar = 93;
pub const X_CreateGlyphCursor: c_uchar = 94;
pub const X_FreeCursor: c_uchar = 95;
pub const X_RecolorCursor: c_uchar = 96;
pub const X_QueryBestSize: c_uchar = 97;
pub const X_QueryExtension: c_uchar = 98;
pub const X_ListExtensions: c_uchar = 99;
pub const X_ChangeKeyboardMapping: c_uchar = 100;
pub const X_GetKeyboardMapping: c_uchar = 101;
pub const X_ChangeKeyboardControl: c_uchar = 102;
pub const X_GetKeyboardControl: c_uchar = 103;
pub const X_Bell: c_uchar = 104;
pub const X_ChangePointerControl: c_uchar = 105;
pub const X_GetPointerControl: c_uchar = 106;
pub const X_SetScreenSaver: c_uchar = 107;
pub const X_GetScreenSaver: c_uchar = 108;
pub const X_ChangeHosts: c_uchar = 109;
pub const X_ListHosts: c_uchar = 110;
pub const X_SetAccessControl: c_uchar = 111;
pub const X_SetCloseDownMode: c_uchar = 112;
pub const X_KillClient: c_uchar = 113;
pub const X_RotateProperties: c_uchar = 114;
pub const X_ForceScreenSaver: c_uchar = 115;
pub const X_SetPointerMapping: c_uchar = 116;
pub const X_GetPointerMapping: c_uchar = 117;
pub const X_SetModifierMapping: c_uchar = 118;
pub const X_GetModifierMapping: c_uchar = 119;
pub const X_NoOperation: c_uchar = 127;

// cursorfont.h
pub const XC_num_glyphs: c_uint = 154;
pub const XC_X_cursor: c_uint = 0;
pub const XC_arrow: c_uint = 2;
pub const XC_based_arrow_down: c_uint = 4;
pub const XC_based_arrow_up: c_uint = 6;
pub const XC_boat: c_uint = 8;
pub const XC_bogosity: c_uint = 10;
pub const XC_bottom_left_corner: c_uint = 12;
pub const XC_bottom_right_corner: c_uint = 14;
pub const XC_bottom_side: c_uint = 16;
pub const XC_bottom_tee: c_uint = 18;
pub const XC_box_spiral: c_uint = 20;
pub const XC_center_ptr: c_uint = 22;
pub const XC_circle: c_uint = 24;
pub const XC_clock: c_uint = 26;
pub const XC_coffee_mug: c_uint = 28;
pub const XC_cross: c_uint = 30;
pub const XC_cross_reverse: c_uint = 32;
pub const XC_crosshair: c_uint = 34;
pub const XC_diamond_cross: c_uint = 36;
pub const XC_dot: c_uint = 38;
pub const XC_dotbox: c_uint = 40;
pub const XC_double_arrow: c_uint = 42;
pub const XC_draft_large: c_uint = 44;
pub const XC_draft_small: c_uint = 46;
pub const XC_draped_box: c_uint = 48;
pub const XC_exchange: c_uint = 50;
pub const XC_fleur: c_uint = 52;
pub const XC_gobbler: c_uint = 54;
pub const XC_gumby: c_uint = 56;
pub const XC_hand1: c_uint = 58;
pub const XC_hand2: c_uint = 60;
pub const XC_heart: c_uint = 62;
pub const XC_icon: c_uint = 64;
pub const XC_iron_cross: c_uint = 66;
pub const XC_left_ptr: c_uint = 68;
pub const XC_left_side: c_uint = 70;
pub const XC_left_tee: c_uint = 72;
pub const XC_leftbutton: c_uint = 74;
pub const XC_ll_angle: c_uint = 76;
pub const XC_lr_angle: c_uint = 78;
pub const XC_man: c_uint = 80;
pub const XC_middlebutton: c_uint = 82;
pub const XC_mouse: c_uint = 84;
pub const XC_pencil: c_uint = 86;
pub const XC_pirate: c_uint = 88;
pub const XC_plus: c_uint = 90;
pub const XC_question_arrow: c_uint = 92;
pub const XC_right_ptr: c_uint = 94;
pub const XC_right_side: c_uint = 96;
pub const XC_right_tee: c_uint = 98;
pub const XC_rightbutton: c_uint = 100;
pub const XC_rtl_logo: c_uint = 102;
pub const XC_sailboat: c_uint = 104;
pub const XC_sb_down_arrow: c_uint = 106;
pub const XC_sb_h_double_arrow: c_uint = 108;
pub const XC_sb_left_arrow: c_uint = 110;
pub const XC_sb_right_arrow: c_uint = 112;
pub const XC_sb_up_arrow: c_uint = 114;
pub const XC_sb_v_double_arrow: c_uint = 116;
pub const XC_shuttle: c_uint = 118;
pub const XC_sizing: c_uint = 120;
pub const XC_spider: c_uint = 122;
pub const XC_spraycan: c_uint = 124;
pub const XC_star: c_uint = 126;
pub const XC_target: c_uint = 128;
pub const XC_tcross: c_uint = 130;
pub const XC_top_left_arrow: c_uint = 132;
pub const XC_top_left_corner: c_uint = 134;
pub const XC_top_right_corner: c_uint = 136;
pub const XC_top_side: c_uint = 138;
pub const XC_top_tee: c_uint = 140;
pub const XC_trek: c_uint = 142;
pub const XC_ul_angle: c_uint = 144;
pub const XC_umbrella: c_uint = 146;
pub const XC_ur_angle: c_uint = 148;
pub const XC_watch: c_uint = 150;
pub const XC_xterm: c_uint = 152;

// Xresource.h binding kinds
pub const XrmBindTightly: c_int = 0;
pub const XrmBindLoosely: c_int = 1;
