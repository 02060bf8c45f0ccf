//! Window tree of the null server
//!
//! Stacking order, mapping, focus and the structure notifications those
//! changes generate. Children are kept bottom-most first, as XQueryTree
//! reports them.

use libc::{c_long, c_ulong};

use super::{Checked, NullBackend, ROOT, ROOT_DEPTH, ROOT_VISUAL};
use crate::error::ErrorCode;
use crate::event::*;
use crate::ffi;
use crate::types::*;
use crate::wrappers::{Property, SetWindowAttributes, WindowChanges, WindowParams};

/// The only attributes an InputOnly window accepts
const INPUT_ONLY_ATTRIBUTES: c_ulong =
    ffi::CWWinGravity | ffi::CWEventMask | ffi::CWDontPropagate | ffi::CWOverrideRedirect | ffi::CWCursor;

#[derive(Debug, Clone)]
pub(super) struct WindowState {
    pub(super) parent: Window,
    pub(super) children: Vec<Window>,
    pub(super) x: i32,
    pub(super) y: i32,
    pub(super) width: u32,
    pub(super) height: u32,
    pub(super) border_width: u32,
    /// 0 for InputOnly windows
    pub(super) depth: u32,
    pub(super) class: WindowClass,
    pub(super) visual: VisualId,
    pub(super) attributes: SetWindowAttributes,
    pub(super) mapped: bool,
    /// In creation order, as XListProperties reports them
    pub(super) properties: Vec<(Atom, Property)>,
}

impl WindowState {
    pub(super) fn root(width: u32, height: u32, visual: VisualId, colormap: Colormap) -> Self {
        WindowState {
            parent: Window::NONE,
            children: Vec::new(),
            x: 0,
            y: 0,
            width,
            height,
            border_width: 0,
            depth: ROOT_DEPTH,
            class: WindowClass::InputOutput,
            visual,
            attributes: SetWindowAttributes::new()
                .with_colormap(colormap)
                .with_background_pixel(0),
            mapped: true,
            properties: Vec::new(),
        }
    }

    pub(super) fn event_mask(&self) -> c_long {
        if self.attributes.is_set(ffi::CWEventMask) {
            self.attributes.event_mask()
        } else {
            0
        }
    }

    /// Extent including the border, in the parent's coordinates
    fn outer(&self) -> (i32, i32, i32, i32) {
        let bw = 2 * self.border_width as i32;
        (self.x, self.y, self.width as i32 + bw, self.height as i32 + bw)
    }

    pub(super) fn contains(&self, x: i32, y: i32) -> bool {
        let (ox, oy, w, h) = self.outer();
        x >= ox && y >= oy && x < ox + w && y < oy + h
    }

    fn overlaps(&self, other: &WindowState) -> bool {
        let (ax, ay, aw, ah) = self.outer();
        let (bx, by, bw, bh) = other.outer();
        ax < bx + bw && bx < ax + aw && ay < by + bh && by < ay + ah
    }

    pub(super) fn property(&self, atom: Atom) -> Option<&Property> {
        self.properties
            .iter()
            .find(|(name, _)| *name == atom)
            .map(|(_, property)| property)
    }
}

/// Copy the attributes set in `from` over `into`
pub(super) fn merge_attributes(into: &mut SetWindowAttributes, from: &SetWindowAttributes) {
    macro_rules! take {
        ($($bit:ident => $get:ident, $set:ident;)*) => {
            $(if from.is_set(ffi::$bit) {
                into.$set(from.$get());
            })*
        };
    }
    take! {
        CWBackPixmap => background_pixmap, set_background_pixmap;
        CWBackPixel => background_pixel, set_background_pixel;
        CWBorderPixmap => border_pixmap, set_border_pixmap;
        CWBorderPixel => border_pixel, set_border_pixel;
        CWBitGravity => bit_gravity, set_bit_gravity;
        CWWinGravity => win_gravity, set_win_gravity;
        CWBackingStore => backing_store, set_backing_store;
        CWBackingPlanes => backing_planes, set_backing_planes;
        CWBackingPixel => backing_pixel, set_backing_pixel;
        CWOverrideRedirect => override_redirect, set_override_redirect;
        CWSaveUnder => save_under, set_save_under;
        CWEventMask => event_mask, set_event_mask;
        CWDontPropagate => do_not_propagate_mask, set_do_not_propagate_mask;
        CWColormap => colormap, set_colormap;
        CWCursor => cursor, set_cursor;
    }
}

pub(super) fn expose_event(window: Window, x: i32, y: i32, width: u32, height: u32) -> Event {
    let mut expose = ExposeEvent::default();
    expose.set_window(window);
    expose.set_x(x);
    expose.set_y(y);
    expose.set_width(width as i32);
    expose.set_height(height as i32);
    Event::Expose(expose)
}

impl NullBackend {
    pub(super) fn window_ref(&self, window: Window) -> Checked<&WindowState> {
        self.windows
            .get(&window)
            .ok_or((ErrorCode::Window, window.0))
    }

    pub(super) fn window_mut(&mut self, window: Window) -> Checked<&mut WindowState> {
        self.windows
            .get_mut(&window)
            .ok_or((ErrorCode::Window, window.0))
    }

    /// Mapped, with every ancestor mapped
    pub(super) fn viewable(&self, window: Window) -> bool {
        let mut current = window;
        loop {
            match self.windows.get(&current) {
                Some(state) if state.mapped => {
                    if state.parent.is_none() {
                        return true;
                    }
                    current = state.parent;
                }
                _ => return false,
            }
        }
    }

    /// True when `window` is a proper descendant of `ancestor`
    pub(super) fn is_inferior(&self, window: Window, ancestor: Window) -> bool {
        let mut current = window;
        while let Some(state) = self.windows.get(&current) {
            if state.parent == ancestor {
                return true;
            }
            current = state.parent;
        }
        false
    }

    /// Root coordinates of the inside corner of `window`
    pub(super) fn origin(&self, window: Window) -> (i32, i32) {
        let (mut x, mut y) = (0, 0);
        let mut current = window;
        while let Some(state) = self.windows.get(&current) {
            if state.parent.is_none() {
                break;
            }
            x += state.x + state.border_width as i32;
            y += state.y + state.border_width as i32;
            current = state.parent;
        }
        (x, y)
    }

    /// Topmost mapped child of `window` containing a point given in the
    /// window's coordinates
    pub(super) fn child_at(&self, window: Window, x: i32, y: i32) -> Window {
        let Some(state) = self.windows.get(&window) else {
            return Window::NONE;
        };
        state
            .children
            .iter()
            .rev()
            .copied()
            .find(|child| {
                self.windows
                    .get(child)
                    .is_some_and(|c| c.mapped && c.contains(x, y))
            })
            .unwrap_or(Window::NONE)
    }

    /// Deepest viewable window under a root position
    pub(super) fn window_at(&self, x: i32, y: i32) -> Window {
        let (mut window, mut wx, mut wy) = (ROOT, x, y);
        loop {
            let child = self.child_at(window, wx, wy);
            let Some(state) = self.windows.get(&child) else {
                return window;
            };
            wx -= state.x + state.border_width as i32;
            wy -= state.y + state.border_width as i32;
            window = child;
        }
    }

    pub(super) fn selects(&self, window: Window, mask: c_long) -> bool {
        self.windows
            .get(&window)
            .is_some_and(|state| state.event_mask() & mask != 0)
    }

    pub(super) fn enqueue(&mut self, event: Event) {
        log::trace!("Queued {:?}", event.event_type());
        self.queue
            .push_back(event.with_header(self.serial.get(), false));
    }

    /// Queue `event` if `window` selected any of `mask`
    pub(super) fn notify(&mut self, window: Window, mask: c_long, event: Event) {
        if self.selects(window, mask) {
            self.enqueue(event);
        }
    }

    /// StructureNotify on the window itself and SubstructureNotify on its
    /// parent. `make` builds the event reported to a given event window.
    pub(super) fn structure_notify(&mut self, window: Window, make: impl Fn(Window) -> Event) {
        let parent = self.windows.get(&window).map_or(Window::NONE, |s| s.parent);
        self.notify(window, ffi::StructureNotifyMask, make(window));
        if !parent.is_none() {
            self.notify(parent, ffi::SubstructureNotifyMask, make(parent));
        }
    }

    pub(super) fn expose_window(&mut self, window: Window) {
        if let Some(state) = self.windows.get(&window) {
            if state.class == WindowClass::InputOutput {
                let event = expose_event(window, 0, 0, state.width, state.height);
                self.notify(window, ffi::ExposureMask, event);
            }
        }
    }

    /// Expose a window that just became viewable and its mapped inferiors
    fn expose_tree(&mut self, window: Window) {
        self.expose_window(window);
        let children = self
            .windows
            .get(&window)
            .map(|s| s.children.clone())
            .unwrap_or_default();
        for child in children {
            if self.windows.get(&child).is_some_and(|c| c.mapped) {
                self.expose_tree(child);
            }
        }
    }

    pub(super) fn map_one(&mut self, window: Window) {
        let Some(state) = self.windows.get_mut(&window) else {
            return;
        };
        if state.mapped {
            return;
        }
        state.mapped = true;
        let override_redirect = state.attributes.override_redirect();
        self.structure_notify(window, |event| {
            let mut map = MapEvent::default();
            map.set_event(event);
            map.set_window(window);
            map.set_override_redirect(override_redirect);
            Event::MapNotify(map)
        });
        if self.viewable(window) {
            self.expose_tree(window);
        }
    }

    pub(super) fn unmap_one(&mut self, window: Window) {
        let Some(state) = self.windows.get_mut(&window) else {
            return;
        };
        if !state.mapped || state.parent.is_none() {
            return;
        }
        state.mapped = false;
        self.structure_notify(window, |event| {
            let mut unmap = UnmapEvent::default();
            unmap.set_event(event);
            unmap.set_window(window);
            Event::UnmapNotify(unmap)
        });
        self.check_focus(ROOT);
    }

    /// Destroy a window and its inferiors, inferiors first
    pub(super) fn destroy_tree(&mut self, window: Window) {
        let Some(parent) = self.windows.get(&window).map(|s| s.parent) else {
            return;
        };
        self.unmap_one(window);
        self.destroy_subtree(window);
        if let Some(state) = self.windows.get_mut(&parent) {
            state.children.retain(|&c| c != window);
        }
        self.check_focus(parent);
    }

    fn destroy_subtree(&mut self, window: Window) {
        let children = self
            .windows
            .get(&window)
            .map(|s| s.children.clone())
            .unwrap_or_default();
        for child in children {
            self.destroy_subtree(child);
        }
        self.structure_notify(window, |event| {
            let mut destroy = DestroyWindowEvent::default();
            destroy.set_event(event);
            destroy.set_window(window);
            Event::DestroyNotify(destroy)
        });

        self.windows.remove(&window);
        self.selections.retain(|_, (owner, _)| *owner != window);
        self.button_grabs.retain(|g| g.window != window);
        self.key_grabs.retain(|g| g.window != window);
        if self.pointer_grab == Some(window) {
            self.pointer_grab = None;
        }
        if self.keyboard_grab == Some(window) {
            self.keyboard_grab = None;
        }
    }

    /// Revert the focus when its window stopped being viewable. `fallback`
    /// starts the search for a viewable ancestor when the window is gone.
    fn check_focus(&mut self, fallback: Window) {
        let focus = self.focus.0;
        if focus.is_none() || focus == Window::POINTER_ROOT {
            return;
        }
        match self.windows.get(&focus).map(|s| s.parent) {
            Some(_) if self.viewable(focus) => {}
            Some(parent) => self.revert_focus(parent),
            None => self.revert_focus(fallback),
        }
    }

    fn revert_focus(&mut self, from: Window) {
        let (target, revert) = match self.focus.1 {
            RevertTo::Parent => {
                let mut current = from;
                while !self.viewable(current) {
                    current = self.windows.get(&current).map_or(ROOT, |s| s.parent);
                }
                (current, RevertTo::None)
            }
            RevertTo::PointerRoot => (Window::POINTER_ROOT, RevertTo::PointerRoot),
            RevertTo::None => (Window::NONE, RevertTo::None),
        };
        log::debug!("Focus reverts to {}", target);
        self.set_focus(target, revert);
    }

    pub(super) fn set_focus(&mut self, window: Window, revert: RevertTo) {
        let old = self.focus.0;
        self.focus = (window, revert);
        if old == window {
            return;
        }
        for (target, focus_in) in [(old, false), (window, true)] {
            let mut change = FocusChangeEvent::default();
            change.set_window(target);
            change.set_mode(ffi::NotifyNormal);
            change.set_detail(ffi::NotifyNonlinear);
            let event = if focus_in {
                Event::FocusIn(change)
            } else {
                Event::FocusOut(change)
            };
            self.notify(target, ffi::FocusChangeMask, event);
        }
    }

    /// Sibling directly below `window`, or NONE at the bottom
    pub(super) fn sibling_below(&self, window: Window) -> Window {
        let siblings = self
            .windows
            .get(&window)
            .and_then(|s| self.windows.get(&s.parent))
            .map(|p| p.children.as_slice())
            .unwrap_or_default();
        match siblings.iter().position(|&c| c == window) {
            Some(i) if i > 0 => siblings[i - 1],
            _ => Window::NONE,
        }
    }

    /// Both mapped and overlapping
    fn obscures(&self, a: Window, b: Window) -> bool {
        match (self.windows.get(&a), self.windows.get(&b)) {
            (Some(a), Some(b)) => a.mapped && b.mapped && a.overlaps(b),
            _ => false,
        }
    }

    /// Move `window` within its parent's stacking order. Returns whether
    /// the order changed.
    pub(super) fn restack(&mut self, window: Window, mode: StackMode, sibling: Option<Window>) -> bool {
        let Some(parent) = self.windows.get(&window).map(|s| s.parent) else {
            return false;
        };
        let Some(siblings) = self.windows.get(&parent).map(|s| s.children.clone()) else {
            return false;
        };
        let Some(pos) = siblings.iter().position(|&c| c == window) else {
            return false;
        };

        let others: Vec<(usize, Window)> = siblings
            .iter()
            .copied()
            .enumerate()
            .filter(|&(i, c)| i != pos && sibling.map_or(true, |s| s == c))
            .collect();
        let occluded = others.iter().any(|&(i, c)| i > pos && self.obscures(c, window));
        let occluding = others.iter().any(|&(i, c)| i < pos && self.obscures(window, c));

        let mut order = siblings.clone();
        order.remove(pos);
        let top = order.len();
        let index_of = |w: Window| order.iter().position(|&c| c == w);
        let at = match (mode, sibling) {
            (StackMode::Above, None) => Some(top),
            (StackMode::Above, Some(s)) => index_of(s).map(|i| i + 1),
            (StackMode::Below, None) => Some(0),
            (StackMode::Below, Some(s)) => index_of(s),
            (StackMode::TopIf, _) => occluded.then_some(top),
            (StackMode::BottomIf, _) => occluding.then_some(0),
            (StackMode::Opposite, _) if occluded => Some(top),
            (StackMode::Opposite, _) => occluding.then_some(0),
        };
        let Some(at) = at else {
            return false;
        };
        order.insert(at, window);

        let changed = order != siblings;
        if let Some(state) = self.windows.get_mut(&parent) {
            state.children = order;
        }
        changed
    }

    /// Apply a ConfigureWindow value list
    pub(super) fn configure(&mut self, window: Window, changes: &WindowChanges) -> Checked<()> {
        let state = self.window_ref(window)?;
        if state.parent.is_none() {
            return Ok(());
        }
        let parent = state.parent;
        let class = state.class;
        let old_size = (state.width, state.height);

        let sibling = changes.is_set(ffi::CWSibling).then(|| changes.sibling());
        let mode = changes.stack();
        if changes.is_set(ffi::CWStackMode) && mode.is_none() {
            return Err((ErrorCode::Value, changes.stack_mode() as ffi::XID));
        }
        if let Some(sibling) = sibling {
            let is_sibling = sibling != window
                && self.windows.get(&sibling).is_some_and(|s| s.parent == parent);
            if mode.is_none() || !is_sibling {
                return Err((ErrorCode::Match, sibling.0));
            }
        }
        for bit in [ffi::CWWidth, ffi::CWHeight] {
            let value = if bit == ffi::CWWidth {
                changes.width()
            } else {
                changes.height()
            };
            if changes.is_set(bit) && value <= 0 {
                return Err((ErrorCode::Value, value as ffi::XID));
            }
        }
        if changes.is_set(ffi::CWBorderWidth) {
            let width = changes.border_width();
            if width < 0 {
                return Err((ErrorCode::Value, width as ffi::XID));
            }
            if class == WindowClass::InputOnly && width != 0 {
                return Err((ErrorCode::Match, window.0));
            }
        }

        let state = self.window_mut(window)?;
        if changes.is_set(ffi::CWX) {
            state.x = changes.x();
        }
        if changes.is_set(ffi::CWY) {
            state.y = changes.y();
        }
        if changes.is_set(ffi::CWWidth) {
            state.width = changes.width() as u32;
        }
        if changes.is_set(ffi::CWHeight) {
            state.height = changes.height() as u32;
        }
        if changes.is_set(ffi::CWBorderWidth) {
            state.border_width = changes.border_width() as u32;
        }
        let (x, y, width, height, border_width) =
            (state.x, state.y, state.width, state.height, state.border_width);
        let override_redirect = state.attributes.override_redirect();

        if let Some(mode) = mode {
            self.restack(window, mode, sibling);
        }
        let above = self.sibling_below(window);
        self.structure_notify(window, |event| {
            let mut configure = ConfigureEvent::default();
            configure.set_event(event);
            configure.set_window(window);
            configure.set_x(x);
            configure.set_y(y);
            configure.set_width(width as i32);
            configure.set_height(height as i32);
            configure.set_border_width(border_width as i32);
            configure.set_above(above);
            configure.set_override_redirect(override_redirect);
            Event::ConfigureNotify(configure)
        });

        if (width, height) != old_size && self.viewable(window) {
            self.expose_window(window);
        }
        Ok(())
    }

    /// Raise the lowest occluded child, or lower the highest occluding one
    pub(super) fn circulate(&mut self, parent: Window, direction: Circulation) -> Checked<()> {
        let children = self.window_ref(parent)?.children.clone();
        let n = children.len();
        let found = match direction {
            Circulation::RaiseLowest => (0..n).find(|&i| {
                (i + 1..n).any(|j| self.obscures(children[j], children[i]))
            }),
            Circulation::LowerHighest => (0..n).rev().find(|&i| {
                (0..i).any(|j| self.obscures(children[i], children[j]))
            }),
        };
        let Some(i) = found else {
            return Ok(());
        };
        let child = children[i];
        let (mode, place) = match direction {
            Circulation::RaiseLowest => (StackMode::Above, ffi::PlaceOnTop),
            Circulation::LowerHighest => (StackMode::Below, ffi::PlaceOnBottom),
        };
        self.restack(child, mode, None);
        self.structure_notify(child, |event| {
            let mut circulate = CirculateEvent::default();
            circulate.set_event(event);
            circulate.set_window(child);
            circulate.set_place(place);
            Event::CirculateNotify(circulate)
        });
        Ok(())
    }

    pub(super) fn reparent(&mut self, window: Window, parent: Window, x: i32, y: i32) -> Checked<()> {
        let state = self.window_ref(window)?;
        let (old_parent, class, was_mapped) = (state.parent, state.class, state.mapped);
        let override_redirect = state.attributes.override_redirect();
        let new_parent = self.window_ref(parent)?;
        if old_parent.is_none()
            || parent == window
            || self.is_inferior(parent, window)
            || (class == WindowClass::InputOutput && new_parent.class == WindowClass::InputOnly)
        {
            return Err((ErrorCode::Match, window.0));
        }

        if was_mapped {
            self.unmap_one(window);
        }
        if let Some(old) = self.windows.get_mut(&old_parent) {
            old.children.retain(|&c| c != window);
        }
        if let Some(new) = self.windows.get_mut(&parent) {
            new.children.push(window);
        }
        let state = self.window_mut(window)?;
        state.parent = parent;
        state.x = x;
        state.y = y;

        let make = |event: Window| {
            let mut reparent = ReparentEvent::default();
            reparent.set_event(event);
            reparent.set_window(window);
            reparent.set_parent(parent);
            reparent.set_x(x);
            reparent.set_y(y);
            reparent.set_override_redirect(override_redirect);
            Event::ReparentNotify(reparent)
        };
        self.notify(window, ffi::StructureNotifyMask, make(window));
        self.notify(old_parent, ffi::SubstructureNotifyMask, make(old_parent));
        self.notify(parent, ffi::SubstructureNotifyMask, make(parent));

        if was_mapped {
            self.map_one(window);
        }
        Ok(())
    }

    /// Validate a window attribute value list for a window of the given
    /// class and depth
    fn check_attributes(
        &self,
        window: Window,
        class: WindowClass,
        depth: u32,
        attributes: &SetWindowAttributes,
    ) -> Checked<()> {
        if class == WindowClass::InputOnly && attributes.mask() & !INPUT_ONLY_ATTRIBUTES != 0 {
            return Err((ErrorCode::Match, window.0));
        }
        for (bit, pixmap) in [
            (ffi::CWBackPixmap, attributes.background_pixmap()),
            (ffi::CWBorderPixmap, attributes.border_pixmap()),
        ] {
            let parent_relative = bit == ffi::CWBackPixmap && pixmap == Pixmap::PARENT_RELATIVE;
            if !attributes.is_set(bit) || pixmap.is_none() || parent_relative {
                continue;
            }
            match self.pixmaps.get(&pixmap) {
                None => return Err((ErrorCode::Pixmap, pixmap.0)),
                Some(image) if image.depth() != depth => return Err((ErrorCode::Match, pixmap.0)),
                Some(_) => {}
            }
        }
        for (bit, value, max) in [
            (ffi::CWBitGravity, attributes.bit_gravity(), ffi::StaticGravity),
            (ffi::CWWinGravity, attributes.win_gravity(), ffi::StaticGravity),
            (ffi::CWBackingStore, attributes.backing_store(), ffi::Always),
        ] {
            if attributes.is_set(bit) && !(0..=max).contains(&value) {
                return Err((ErrorCode::Value, value as ffi::XID));
            }
        }
        let colormap = attributes.colormap();
        if attributes.is_set(ffi::CWColormap) && !colormap.is_none() && !self.colormaps.contains(&colormap) {
            return Err((ErrorCode::Colormap, colormap.0));
        }
        let cursor = attributes.cursor();
        if attributes.is_set(ffi::CWCursor) && !cursor.is_none() && !self.cursors.contains(&cursor) {
            return Err((ErrorCode::Cursor, cursor.0));
        }
        Ok(())
    }

    /// CreateWindow. Depth and visual must be those of the root, since
    /// it is the only visual the screen has.
    pub(super) fn create(&mut self, id: Window, params: &WindowParams) -> Checked<()> {
        let parent = self.window_ref(params.parent)?;
        if params.width == 0 || params.height == 0 {
            return Err((ErrorCode::Value, 0));
        }
        let class = match params.class {
            WindowClass::CopyFromParent => parent.class,
            class => class,
        };
        let depth = match class {
            WindowClass::InputOnly => {
                if params.border_width != 0 || params.depth != 0 {
                    return Err((ErrorCode::Match, id.0));
                }
                0
            }
            _ => {
                let depth = if params.depth == 0 {
                    parent.depth
                } else {
                    params.depth as u32
                };
                if parent.class == WindowClass::InputOnly || depth != ROOT_DEPTH {
                    return Err((ErrorCode::Match, id.0));
                }
                depth
            }
        };
        let visual = params.visual.unwrap_or(parent.visual);
        if visual != ROOT_VISUAL {
            return Err((ErrorCode::Match, visual.0));
        }
        let inherited = parent.attributes.colormap();
        self.check_attributes(id, class, depth, &params.attributes)?;

        let mut attributes = SetWindowAttributes::new();
        merge_attributes(&mut attributes, &params.attributes);
        if attributes.colormap().is_none() {
            attributes.set_colormap(inherited);
        }
        let override_redirect = attributes.override_redirect();
        self.windows.insert(
            id,
            WindowState {
                parent: params.parent,
                children: Vec::new(),
                x: params.x,
                y: params.y,
                width: params.width,
                height: params.height,
                border_width: params.border_width,
                depth,
                class,
                visual,
                attributes,
                mapped: false,
                properties: Vec::new(),
            },
        );
        if let Some(parent) = self.windows.get_mut(&params.parent) {
            parent.children.push(id);
        }

        let mut create = CreateWindowEvent::default();
        create.set_parent(params.parent);
        create.set_window(id);
        create.set_x(params.x);
        create.set_y(params.y);
        create.set_width(params.width as i32);
        create.set_height(params.height as i32);
        create.set_border_width(params.border_width as i32);
        create.set_override_redirect(override_redirect);
        self.notify(params.parent, ffi::SubstructureNotifyMask, Event::CreateNotify(create));
        Ok(())
    }

    pub(super) fn change_attributes(&mut self, window: Window, attributes: &SetWindowAttributes) -> Checked<()> {
        let state = self.window_ref(window)?;
        let (class, depth, parent) = (state.class, state.depth, state.parent);
        let old_colormap = state.attributes.colormap();
        self.check_attributes(window, class, depth, attributes)?;

        let mut changes = *attributes;
        if changes.is_set(ffi::CWColormap) && changes.colormap().is_none() {
            let inherited = self
                .windows
                .get(&parent)
                .map_or(Colormap::NONE, |p| p.attributes.colormap());
            changes.set_colormap(inherited);
        }
        let state = self.window_mut(window)?;
        merge_attributes(&mut state.attributes, &changes);
        let colormap = state.attributes.colormap();
        if colormap != old_colormap {
            self.colormap_notify(window, colormap, true);
        }
        Ok(())
    }

    /// ColormapNotify to one window. `new` is set when the window's
    /// colormap attribute changed rather than the colormap's install state.
    pub(super) fn colormap_notify(&mut self, window: Window, colormap: Colormap, new: bool) {
        let mut event = ColormapEvent::default();
        event.set_window(window);
        event.set_colormap(colormap);
        event.set_is_new(new);
        event.set_state(if colormap == self.installed {
            ffi::ColormapInstalled
        } else {
            ffi::ColormapUninstalled
        });
        self.notify(window, ffi::ColormapChangeMask, Event::ColormapNotify(event));
    }
}
