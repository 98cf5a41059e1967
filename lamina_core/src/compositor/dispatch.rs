// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event propagation along the ancestor chain.
//!
//! Dispatch runs **root first**: the event visits every ancestor of the
//! target, outermost first, before the target itself. At each level the
//! optional filter may veto, then the panel's layout, then its widget (or
//! the plain panel behaviour) handle it. The first handler to set
//! `handled` stops the walk, so an ancestor can swallow an event before any
//! descendant sees it.

use crate::event::{EventArgs, EventFilter};
use crate::panel::PanelId;
use crate::trace::DispatchEvent;
use crate::widget::handle_panel_event;

use super::Compositor;

/// The filter used by unfiltered dispatch.
struct AllowAll;

impl EventFilter for AllowAll {
    fn allow(&mut self, _: &Compositor, _: PanelId, _: &EventArgs) -> bool {
        true
    }
}

impl Compositor {
    /// Dispatches `args` to `target` through its ancestors.
    ///
    /// Returns whether the event was consumed. Dispatching to a destroyed
    /// panel does nothing.
    pub fn dispatch(&mut self, target: PanelId, args: &mut EventArgs) -> bool {
        self.dispatch_filtered(target, args, &mut AllowAll)
    }

    /// Like [`dispatch`](Self::dispatch), with `filter` consulted at every
    /// level before the panel's handlers.
    pub fn dispatch_filtered(
        &mut self,
        target: PanelId,
        args: &mut EventArgs,
        filter: &mut dyn EventFilter,
    ) -> bool {
        if !self.panels.is_alive(target) {
            return false;
        }
        args.target = Some(target);
        let consumed = self.dispatch_recursive(target, args, filter);

        let e = DispatchEvent {
            frame_index: self.frame_index,
            kind: args.kind,
            target: Some(target),
            consumer: if args.handled { args.sender } else { None },
        };
        self.tracer().dispatch(&e);
        consumed
    }

    /// Delivers `args` to `panel`'s ancestors, outermost first, and then to
    /// `panel`.
    ///
    /// Returns `true` once propagation stopped, either because a handler set
    /// `args.handled` or because `filter` vetoed.
    pub fn dispatch_recursive(
        &mut self,
        panel: PanelId,
        args: &mut EventArgs,
        filter: &mut dyn EventFilter,
    ) -> bool {
        if let Some(parent) = self.panels.parent(panel)
            && self.dispatch_recursive(parent, args, filter)
        {
            return true;
        }
        // An ancestor's handler may have destroyed this panel.
        if !self.panels.is_alive(panel) {
            return false;
        }

        args.sender = Some(panel);
        args.local = self.panels.compositor_to_local(panel, args.cursor);

        if !filter.allow(self, panel, args) {
            return true;
        }

        let idx = panel.idx as usize;
        if let Some(mut layout) = self.panels.layout[idx].take() {
            layout.handle_event(self, panel, args);
            self.restore_layout(panel, layout);
            if args.handled {
                return true;
            }
        }
        if !self.panels.is_alive(panel) {
            return args.handled;
        }

        match self.panels.widget[idx].take() {
            Some(mut widget) => {
                widget.handle_event(self, panel, args);
                self.restore_widget(panel, widget);
            }
            None => handle_panel_event(self, panel, args),
        }
        args.handled
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{Point, Size};

    use super::*;
    use crate::compositor::test_util::{Log, Recorder};
    use crate::event::EventKind;

    fn chain(log: &Log) -> (Compositor, [PanelId; 3]) {
        let mut compositor = Compositor::new(100.0, 100.0);
        let root = compositor.root();
        let a = compositor.create_widget_panel(root, Recorder::new("a", log));
        let b = compositor.create_widget_panel(a, Recorder::new("b", log));
        let c = compositor.create_widget_panel(b, Recorder::new("c", log));
        (compositor, [a, b, c])
    }

    #[test]
    fn ancestors_see_events_first() {
        let log = Log::default();
        let (mut compositor, [_, _, c]) = chain(&log);
        let mut args = EventArgs::new(EventKind::KeyButtonPressed);
        assert!(!compositor.dispatch(c, &mut args));
        assert_eq!(log.names(), vec!["a", "b", "c"]);
        assert_eq!(args.target, Some(c));
        assert_eq!(args.sender, Some(c));
    }

    #[test]
    fn handled_ancestor_swallows_event() {
        let log = Log::default();
        let (mut compositor, [a, _, c]) = chain(&log);
        if let Some(rec) = compositor.widget_mut::<Recorder>(a) {
            rec.consume = true;
        }
        let mut args = EventArgs::new(EventKind::KeyButtonPressed);
        assert!(compositor.dispatch(c, &mut args));
        assert_eq!(log.names(), vec!["a"]);
        assert_eq!(args.sender, Some(a));
    }

    #[test]
    fn filter_veto_stops_propagation() {
        let log = Log::default();
        let (mut compositor, [_, b, c]) = chain(&log);
        let mut filter = |_: &Compositor, panel: PanelId, _: &EventArgs| panel != b;
        let mut args = EventArgs::new(EventKind::KeyButtonPressed);
        assert!(compositor.dispatch_filtered(c, &mut args, &mut filter));
        assert_eq!(log.names(), vec!["a"]);
        assert!(!args.handled);
    }

    #[test]
    fn local_is_rewritten_per_level() {
        let log = Log::default();
        let (mut compositor, [a, b, c]) = chain(&log);
        let panels = compositor.panels_mut();
        panels.set_origin(a, Point::new(10.0, 10.0));
        panels.set_origin(b, Point::new(5.0, 0.0));
        panels.set_origin(c, Point::new(1.0, 1.0));
        for id in [a, b, c] {
            panels.set_size(id, Size::new(50.0, 50.0));
        }

        let mut args = EventArgs::new(EventKind::CursorMove);
        args.cursor = Point::new(20.0, 20.0);
        let _ = compositor.dispatch(c, &mut args);
        assert_eq!(args.local, Point::new(4.0, 9.0));
        assert_eq!(log.locals(), vec![Point::new(10.0, 10.0), Point::new(5.0, 10.0), Point::new(4.0, 9.0)]);
    }

    #[test]
    fn layout_gets_first_refusal() {
        use crate::layout::Layout;

        struct Swallow(Log);
        impl Layout for Swallow {
            fn update(&mut self, _: &mut Compositor, _: PanelId, _: &[PanelId]) {}
            fn handle_event(&mut self, _: &mut Compositor, _: PanelId, args: &mut EventArgs) {
                self.0.push("layout", args);
                args.handled = true;
            }
        }

        let log = Log::default();
        let (mut compositor, [_, b, c]) = chain(&log);
        compositor.set_layout(b, alloc::boxed::Box::new(Swallow(log.clone())));
        let mut args = EventArgs::new(EventKind::KeyButtonPressed);
        assert!(compositor.dispatch(c, &mut args));
        assert_eq!(log.names(), vec!["a", "layout"]);
    }

    #[test]
    fn dispatch_to_destroyed_panel_is_a_no_op() {
        let log = Log::default();
        let (mut compositor, [a, _, c]) = chain(&log);
        compositor.destroy_panel(a);
        let mut args = EventArgs::new(EventKind::KeyButtonPressed);
        assert!(!compositor.dispatch(c, &mut args));
        assert!(log.names().is_empty());
    }
}
