// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events, event records, and the application-facing event hooks.
//!
//! Every input entry point on the [`Compositor`] builds an [`EventArgs`]
//! record and dispatches it along the target's ancestor chain, root first.
//! Handlers set [`EventArgs::handled`] to stop propagation.

use alloc::rc::Rc;
use core::cell::RefCell;

use bitflags::bitflags;
use kurbo::{Point, Vec2};

use crate::compositor::Compositor;
use crate::panel::PanelId;

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The cursor moved over the hot panel with no capture active.
    CursorMove,
    /// The cursor moved while a panel holds capture.
    CursorDrag,
    /// The cursor entered a panel (it became hot).
    CursorEnter,
    /// The cursor left a panel (it stopped being hot).
    CursorExit,
    /// A captured panel was dragged over a new drop target.
    CursorDropEnter,
    /// A captured panel was dragged off a drop target.
    CursorDropExit,
    /// A captured panel moved over the current drop target.
    CursorDropMove,
    /// A captured panel was released over a drop target.
    CursorDrop,
    /// The scroll wheel turned.
    CursorScroll,
    /// A cursor button went down.
    CursorButtonPressed,
    /// A cursor button went up.
    CursorButtonReleased,
    /// A key went down.
    KeyButtonPressed,
    /// A key went up.
    KeyButtonReleased,
    /// The panel received keyboard focus.
    FocusGain,
    /// The panel lost keyboard focus.
    FocusLost,
    /// A button was clicked (queued for the application).
    Click,
    /// A control's value changed (queued for the application).
    ValueChanged,
}

impl EventKind {
    /// Returns the variant name, for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CursorMove => "CursorMove",
            Self::CursorDrag => "CursorDrag",
            Self::CursorEnter => "CursorEnter",
            Self::CursorExit => "CursorExit",
            Self::CursorDropEnter => "CursorDropEnter",
            Self::CursorDropExit => "CursorDropExit",
            Self::CursorDropMove => "CursorDropMove",
            Self::CursorDrop => "CursorDrop",
            Self::CursorScroll => "CursorScroll",
            Self::CursorButtonPressed => "CursorButtonPressed",
            Self::CursorButtonReleased => "CursorButtonReleased",
            Self::KeyButtonPressed => "KeyButtonPressed",
            Self::KeyButtonReleased => "KeyButtonReleased",
            Self::FocusGain => "FocusGain",
            Self::FocusLost => "FocusLost",
            Self::Click => "Click",
            Self::ValueChanged => "ValueChanged",
        }
    }

    /// Every kind, in declaration order.
    pub const ALL: [Self; 17] = [
        Self::CursorMove,
        Self::CursorDrag,
        Self::CursorEnter,
        Self::CursorExit,
        Self::CursorDropEnter,
        Self::CursorDropExit,
        Self::CursorDropMove,
        Self::CursorDrop,
        Self::CursorScroll,
        Self::CursorButtonPressed,
        Self::CursorButtonReleased,
        Self::KeyButtonPressed,
        Self::KeyButtonReleased,
        Self::FocusGain,
        Self::FocusLost,
        Self::Click,
        Self::ValueChanged,
    ];

    /// Returns the stable wire tag of this kind.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Inverse of [`tag`](Self::tag).
    #[must_use]
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.get(tag as usize).copied()
    }
}

/// A cursor button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CursorButton {
    /// No button (move, scroll, and key events).
    #[default]
    None,
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
    /// First extra button.
    Mouse4,
    /// Second extra button.
    Mouse5,
}

impl CursorButton {
    /// Returns the stable wire tag of this button.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Inverse of [`tag`](Self::tag).
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => Self::None,
            1 => Self::Left,
            2 => Self::Right,
            3 => Self::Middle,
            4 => Self::Mouse4,
            5 => Self::Mouse5,
            _ => return None,
        })
    }
}

bitflags! {
    /// Keyboard modifier state. Sticky on the compositor until the next key
    /// event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Either shift key.
        const SHIFT = 1 << 0;
        /// Either control key.
        const CTRL  = 1 << 1;
        /// Either alt/option key.
        const ALT   = 1 << 2;
        /// Either super/command key.
        const SUPER = 1 << 3;
    }
}

/// One dispatch's worth of event data.
///
/// Created fresh for each dispatch with a snapshot of the compositor's
/// interaction state. `sender` and `local` are rewritten at every level of
/// the ancestor chain as the event travels toward `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventArgs {
    /// What happened.
    pub kind: EventKind,
    /// Set by a handler to stop propagation.
    pub handled: bool,
    /// Focus at the time of dispatch.
    pub focus: Option<PanelId>,
    /// Hot panel at the time of dispatch.
    pub hot: Option<PanelId>,
    /// Captured panel at the time of dispatch.
    pub capture: Option<PanelId>,
    /// The panel currently handling the event.
    pub sender: Option<PanelId>,
    /// The panel the event was dispatched to.
    pub target: Option<PanelId>,
    /// Cursor position in compositor space.
    pub cursor: Point,
    /// Cursor movement since the previous input event.
    pub delta: Vec2,
    /// Cursor position in the current sender's local space.
    pub local: Point,
    /// Button involved in a press, release, or capture.
    pub cursor_button: CursorButton,
    /// Keyboard modifiers.
    pub modifiers: Modifiers,
    /// Scroll wheel direction.
    pub wheel: i16,
    /// Translated character for key events.
    pub unicode: u32,
    /// Platform key code for key events.
    pub key: u32,
}

impl EventArgs {
    /// Creates an unhandled record of `kind` with every other field empty.
    #[must_use]
    pub const fn new(kind: EventKind) -> Self {
        Self {
            kind,
            handled: false,
            focus: None,
            hot: None,
            capture: None,
            sender: None,
            target: None,
            cursor: Point::ZERO,
            delta: Vec2::ZERO,
            local: Point::ZERO,
            cursor_button: CursorButton::None,
            modifiers: Modifiers::empty(),
            wheel: 0,
            unicode: 0,
            key: 0,
        }
    }
}

/// Vetoes propagation during a filtered dispatch.
pub trait EventFilter {
    /// Called at each level of the ancestor chain before the panel's layout
    /// and widget see the event. Return `false` to stop propagation.
    fn allow(&mut self, compositor: &Compositor, panel: PanelId, args: &EventArgs) -> bool;
}

impl<F> EventFilter for F
where
    F: FnMut(&Compositor, PanelId, &EventArgs) -> bool,
{
    fn allow(&mut self, compositor: &Compositor, panel: PanelId, args: &EventArgs) -> bool {
        self(compositor, panel, args)
    }
}

/// Application hook for compositor-level notifications.
///
/// All methods default to no-ops.
pub trait Listener {
    /// The hot panel changed.
    fn hot_changed(&mut self, old: Option<PanelId>, new: Option<PanelId>) {
        _ = (old, new);
    }

    /// Keyboard focus changed.
    fn focus_changed(&mut self, old: Option<PanelId>, new: Option<PanelId>) {
        _ = (old, new);
    }

    /// A queued event is being delivered at the end of a tick.
    fn handle_event(&mut self, args: &EventArgs) {
        _ = args;
    }
}

impl<L: Listener + ?Sized> Listener for Rc<RefCell<L>> {
    fn hot_changed(&mut self, old: Option<PanelId>, new: Option<PanelId>) {
        self.borrow_mut().hot_changed(old, new);
    }

    fn focus_changed(&mut self, old: Option<PanelId>, new: Option<PanelId>) {
        self.borrow_mut().focus_changed(old, new);
    }

    fn handle_event(&mut self, args: &EventArgs) {
        self.borrow_mut().handle_event(args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_round_trip() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(EventKind::from_tag(17), None);
    }

    #[test]
    fn new_args_are_unhandled_and_empty() {
        let args = EventArgs::new(EventKind::Click);
        assert!(!args.handled);
        assert_eq!(args.target, None);
        assert_eq!(args.cursor_button, CursorButton::None);
        assert!(args.modifiers.is_empty());
    }

    #[test]
    fn button_tags() {
        assert_eq!(CursorButton::from_tag(CursorButton::Mouse5.tag()), Some(CursorButton::Mouse5));
        assert_eq!(CursorButton::from_tag(9), None);
    }
}
