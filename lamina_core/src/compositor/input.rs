// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input entry points and the hot/focus/capture state machine.
//!
//! Without capture, cursor movement re-resolves the hot panel (sending
//! `CursorExit` to the old one and `CursorEnter` to the new one) and sends
//! `CursorMove` to the hot panel. A press on a movable panel inside its
//! capture rect starts a capture: from then on hot is frozen, and every move
//! first resolves the drop target (sending the drop transition events) and
//! then sends `CursorDrag` to the captured panel. Releasing the capturing
//! button sends `CursorDrop` to the drop target, ends the capture, and
//! re-resolves hot.

use core::iter;

use kurbo::{Point, Vec2};

use crate::event::{CursorButton, EventArgs, EventKind, Modifiers};
use crate::panel::{PanelFlags, PanelId};
use crate::trace::{
    CaptureChangedEvent, DropTargetChangedEvent, FocusChangedEvent, HotChangedEvent,
};

use super::Compositor;

impl Compositor {
    /// Builds an event record carrying the current interaction state.
    #[must_use]
    pub fn event_args(&self, kind: EventKind) -> EventArgs {
        EventArgs {
            focus: self.focus,
            hot: self.hot,
            capture: self.capture,
            cursor: self.last_cursor,
            modifiers: self.key_modifiers,
            ..EventArgs::new(kind)
        }
    }

    /// The cursor moved to `(x, y)` in compositor space.
    ///
    /// Does nothing if the position did not change.
    pub fn cursor_move_absolute(&mut self, x: f64, y: f64) {
        let point = Point::new(x, y);
        let delta = point - self.last_cursor;
        if delta == Vec2::ZERO {
            return;
        }
        self.last_cursor = point;

        if let Some(capture) = self.capture {
            self.update_drop_target(capture, delta);
            // Drop handlers may have ended the capture.
            if let Some(capture) = self.capture {
                let mut args = self.event_args(EventKind::CursorDrag);
                args.delta = delta;
                args.cursor_button = self.capture_button;
                let _ = self.dispatch(capture, &mut args);
            }
        } else {
            self.find_new_hot(delta.x, delta.y);
            if let Some(hot) = self.hot {
                let mut args = self.event_args(EventKind::CursorMove);
                args.delta = delta;
                let _ = self.dispatch(hot, &mut args);
            }
        }
    }

    /// A cursor button went down or up.
    pub fn cursor_button(&mut self, button: CursorButton, is_down: bool) {
        if is_down {
            self.cursor_pressed(button);
        } else {
            self.cursor_released(button);
        }
    }

    fn cursor_pressed(&mut self, button: CursorButton) {
        if self.hot.is_none() {
            self.find_new_hot(0.0, 0.0);
        }
        let Some(hot) = self.hot else {
            return;
        };

        let mut args = self.event_args(EventKind::CursorButtonPressed);
        args.cursor_button = button;
        let handled = self.dispatch(hot, &mut args);
        if !self.panels.is_alive(hot) {
            return;
        }

        if !handled && self.focus != Some(hot) {
            self.set_focus(Some(hot));
        }
        if self.capture.is_none() && self.panels.has_flags(hot, PanelFlags::CAN_MOVE) {
            let local = self.panels.compositor_to_local(hot, self.last_cursor);
            if self.panel_point_in_capture_rect(hot, local) {
                self.set_capture(hot, button);
            }
        }
        if self.panels.is_alive(hot) {
            self.send_to_front(hot);
        }
    }

    fn cursor_released(&mut self, button: CursorButton) {
        if let Some(hot) = self.hot {
            let mut args = self.event_args(EventKind::CursorButtonReleased);
            args.cursor_button = button;
            let _ = self.dispatch(hot, &mut args);
        }

        if self.capture.is_none() || self.capture_button != button {
            return;
        }
        if let Some(target) = self.drop_target {
            let mut args = self.event_args(EventKind::CursorDrop);
            args.cursor_button = button;
            let _ = self.dispatch(target, &mut args);
        }
        self.release_capture();
        self.set_drop_target(None);
        self.find_new_hot(0.0, 0.0);
    }

    /// The scroll wheel turned; positive `direction` scrolls up.
    pub fn cursor_scroll(&mut self, direction: i16) {
        let Some(hot) = self.hot else {
            return;
        };
        let mut args = self.event_args(EventKind::CursorScroll);
        args.wheel = direction;
        let _ = self.dispatch(hot, &mut args);
    }

    /// A key went down or up. `modifiers` replace the sticky modifier state.
    pub fn key_event(&mut self, unicode: u32, is_down: bool, key: u32, modifiers: Modifiers) {
        self.key_modifiers = modifiers;
        let Some(focus) = self.focus else {
            return;
        };
        let kind = if is_down {
            EventKind::KeyButtonPressed
        } else {
            EventKind::KeyButtonReleased
        };
        let mut args = self.event_args(kind);
        args.unicode = unicode;
        args.key = key;
        let _ = self.dispatch(focus, &mut args);
    }

    /// Re-resolves the hot panel under the last cursor position.
    ///
    /// If it changed, sends `CursorExit` to the old hot panel and then
    /// `CursorEnter` to the new one, and notifies the listener. Hot is
    /// frozen while a panel holds capture.
    pub fn find_new_hot(&mut self, dx: f64, dy: f64) {
        if self.capture.is_some() {
            return;
        }
        let new_hot = self.find_panel_at_location(self.last_cursor, None);
        let old = self.hot;
        if old == Some(new_hot) {
            return;
        }
        let delta = Vec2::new(dx, dy);

        if let Some(old) = old {
            let mut args = self.event_args(EventKind::CursorExit);
            args.delta = delta;
            let _ = self.dispatch(old, &mut args);
        }
        // Exit handlers may have destroyed the panel we found.
        let new_hot = if self.panels.is_alive(new_hot) {
            new_hot
        } else {
            self.find_panel_at_location(self.last_cursor, None)
        };
        self.hot = Some(new_hot);
        let mut args = self.event_args(EventKind::CursorEnter);
        args.delta = delta;
        let _ = self.dispatch(new_hot, &mut args);

        if let Some(listener) = self.listener.as_mut() {
            listener.hot_changed(old, Some(new_hot));
        }
        let e = HotChangedEvent {
            frame_index: self.frame_index,
            old,
            new: Some(new_hot),
        };
        self.tracer().hot_changed(&e);
    }

    /// Moves keyboard focus, sending `FocusLost` to the old panel and then
    /// `FocusGain` to the new one.
    pub fn set_focus(&mut self, panel: Option<PanelId>) {
        let old = self.focus;
        if old == panel {
            return;
        }
        if let Some(old) = old {
            let mut args = self.event_args(EventKind::FocusLost);
            let _ = self.dispatch(old, &mut args);
        }
        let panel = panel.filter(|&p| self.panels.is_alive(p));
        if let Some(new) = panel {
            let mut args = self.event_args(EventKind::FocusGain);
            let _ = self.dispatch(new, &mut args);
        }
        self.focus = panel;

        if let Some(listener) = self.listener.as_mut() {
            listener.focus_changed(old, panel);
        }
        let e = FocusChangedEvent {
            frame_index: self.frame_index,
            old,
            new: panel,
        };
        self.tracer().focus_changed(&e);
    }

    /// Gives `panel` exclusive receipt of drag input until `button` is
    /// released.
    pub fn set_capture(&mut self, panel: PanelId, button: CursorButton) {
        self.panels.validate(panel);
        self.capture = Some(panel);
        self.capture_button = button;
        let e = CaptureChangedEvent {
            frame_index: self.frame_index,
            panel: Some(panel),
            button,
        };
        self.tracer().capture_changed(&e);
    }

    /// Ends the current capture, if any.
    pub fn release_capture(&mut self) {
        if self.capture.is_none() {
            return;
        }
        let button = self.capture_button;
        self.capture = None;
        self.capture_button = CursorButton::None;
        let e = CaptureChangedEvent {
            frame_index: self.frame_index,
            panel: None,
            button,
        };
        self.tracer().capture_changed(&e);
    }

    /// Raises the top-level window containing `panel` above its siblings,
    /// and `panel` itself among its siblings if its widget allows it.
    pub fn send_to_front(&mut self, panel: PanelId) {
        let root = self.root;
        let top = iter::once(panel)
            .chain(self.panels.ancestors(panel))
            .find(|&p| self.panels.parent(p) == Some(root));
        if let Some(top) = top {
            self.panels.zsort_children(root, top);
        }
        let raise = self
            .panels
            .widget_ref(panel)
            .is_some_and(|w| w.can_send_to_front());
        if raise {
            self.bring_to_front(panel);
        }
    }

    /// Raises `panel` to the front of its siblings.
    pub fn bring_to_front(&mut self, panel: PanelId) {
        if let Some(parent) = self.panels.parent(panel) {
            self.panels.zsort_children(parent, panel);
        }
    }

    /// Resolves the drop target under the cursor for the captured panel and
    /// sends the drop transition events.
    fn update_drop_target(&mut self, capture: PanelId, delta: Vec2) {
        let under = self.find_panel_at_location(self.last_cursor, Some(capture));
        let candidate = iter::once(under)
            .chain(self.panels.ancestors(under))
            .find(|&p| {
                self.panels.has_flags(p, PanelFlags::CAN_DROP)
                    && !self.panels.is_ancestor_or_self(capture, p)
            });

        if candidate == self.drop_target {
            if let Some(target) = candidate {
                let mut args = self.event_args(EventKind::CursorDropMove);
                args.delta = delta;
                args.cursor_button = self.capture_button;
                let _ = self.dispatch(target, &mut args);
            }
            return;
        }

        if let Some(old) = self.drop_target {
            let mut args = self.event_args(EventKind::CursorDropExit);
            args.delta = delta;
            args.cursor_button = self.capture_button;
            let _ = self.dispatch(old, &mut args);
        }
        let candidate = candidate.filter(|&p| self.panels.is_alive(p));
        self.set_drop_target(candidate);
        if let Some(new) = candidate {
            let mut args = self.event_args(EventKind::CursorDropEnter);
            args.delta = delta;
            args.cursor_button = self.capture_button;
            let _ = self.dispatch(new, &mut args);
        }
    }

    pub(super) fn set_drop_target(&mut self, target: Option<PanelId>) {
        let old = self.drop_target;
        if old == target {
            return;
        }
        self.drop_target = target;
        let e = DropTargetChangedEvent {
            frame_index: self.frame_index,
            old,
            new: target,
        };
        self.tracer().drop_target_changed(&e);
    }
}
