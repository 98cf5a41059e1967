// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel identity.

use core::fmt;

/// Sentinel value indicating "no panel" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to a panel in a [`PanelStore`](super::PanelStore).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a panel is destroyed and the slot is reused. Any
/// reference a widget or the compositor keeps to another panel (hot, focus,
/// capture, a scrollbar's thumb) is a `PanelId`, never a borrow.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelId {
    /// Slot index into the store's arrays.
    pub(crate) idx: u32,
    /// Generation counter; must match the store's generation for this slot.
    pub(crate) generation: u32,
}

impl PanelId {
    /// Rebuilds a handle from its raw parts.
    ///
    /// Intended for decoding recorded traces; the result is only meaningful
    /// against the store that issued the original handle.
    #[inline]
    #[must_use]
    pub const fn from_raw(idx: u32, generation: u32) -> Self {
        Self { idx, generation }
    }

    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PanelId({}@gen{})", self.idx, self.generation)
    }
}
