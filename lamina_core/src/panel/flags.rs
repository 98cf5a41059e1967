// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-panel flags.

use bitflags::bitflags;

bitflags! {
    /// Per-panel state and capability bits.
    ///
    /// `TRANSFORM_DIRTY` and `NEEDS_LAYOUT` are maintained by the store and
    /// cleared during [`Compositor::tick`](crate::Compositor::tick); the rest
    /// are set by callers.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PanelFlags: u16 {
        /// The panel and its subtree are drawn and can be hit.
        const VISIBLE         = 1 << 0;
        /// The panel takes part in hit testing.
        const CURSOR_ENABLED  = 1 << 1;
        /// The cached local transform is out of date.
        const TRANSFORM_DIRTY = 1 << 2;
        /// A press inside the capture rect starts a drag capture.
        const CAN_MOVE        = 1 << 3;
        /// The panel accepts drops from a captured panel.
        const CAN_DROP        = 1 << 4;
        /// The panel's layout must run on the next tick.
        const NEEDS_LAYOUT    = 1 << 5;
        /// The panel sorts in front of siblings without this flag.
        const ALWAYS_ON_TOP   = 1 << 6;
    }
}

impl Default for PanelFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::CURSOR_ENABLED
    }
}
