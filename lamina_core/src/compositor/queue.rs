// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Application event queue.
//!
//! Widgets queue high-level events (`Click`, `ValueChanged`) during
//! dispatch; the compositor delivers them to the [`Listener`] at the end of
//! the next tick, in queue order.
//!
//! [`Listener`]: crate::event::Listener

use crate::event::EventArgs;

use super::Compositor;

impl Compositor {
    /// Queues an application event for delivery at the end of the next tick.
    ///
    /// Returns `false`, and drops the event, if the queue already holds
    /// [`event_queue_capacity`](super::CompositorConfig::event_queue_capacity)
    /// events.
    pub fn queue_event(&mut self, args: EventArgs) -> bool {
        if self.queue.len() >= self.config.event_queue_capacity {
            log::warn!(
                "event queue full ({} events), dropping {}",
                self.queue.len(),
                args.kind.name()
            );
            return false;
        }
        self.queue.push(args);
        true
    }

    /// Returns the events waiting for the next tick.
    #[must_use]
    pub fn pending_events(&self) -> &[EventArgs] {
        &self.queue
    }

    /// Delivers every queued event to the listener and empties the queue.
    pub(crate) fn process_events(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            for args in &self.queue {
                listener.handle_event(args);
            }
        }
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::*;
    use crate::compositor::CompositorConfig;
    use crate::event::{EventKind, Listener};

    #[derive(Default)]
    struct Collect {
        kinds: Vec<EventKind>,
    }

    impl Listener for Collect {
        fn handle_event(&mut self, args: &EventArgs) {
            self.kinds.push(args.kind);
        }
    }

    #[test]
    fn queued_events_reach_listener_on_tick() {
        let seen = Rc::new(RefCell::new(Collect::default()));
        let mut compositor = Compositor::new(10.0, 10.0);
        compositor.set_listener(Box::new(seen.clone()));

        assert!(compositor.queue_event(EventArgs::new(EventKind::Click)));
        assert!(compositor.queue_event(EventArgs::new(EventKind::ValueChanged)));
        assert!(seen.borrow().kinds.is_empty(), "delivery waits for tick");
        assert_eq!(compositor.pending_events().len(), 2);

        let _ = compositor.tick(0.0);
        assert_eq!(
            seen.borrow().kinds,
            [EventKind::Click, EventKind::ValueChanged]
        );
        assert!(compositor.pending_events().is_empty());
    }

    #[test]
    fn overflow_drops_new_events() {
        let config = CompositorConfig {
            event_queue_capacity: 2,
            ..CompositorConfig::default()
        };
        let mut compositor = Compositor::new(10.0, 10.0).with_config(config);
        assert!(compositor.queue_event(EventArgs::new(EventKind::Click)));
        assert!(compositor.queue_event(EventArgs::new(EventKind::Click)));
        assert!(!compositor.queue_event(EventArgs::new(EventKind::ValueChanged)));
        assert_eq!(compositor.pending_events().len(), 2);
    }

    #[test]
    fn queue_is_emptied_without_listener() {
        let mut compositor = Compositor::new(10.0, 10.0);
        let _ = compositor.queue_event(EventArgs::new(EventKind::Click));
        let _ = compositor.tick(0.0);
        assert!(compositor.pending_events().is_empty());
    }
}
