// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use super::id::{INVALID, PanelId};
use super::store::PanelStore;

/// An iterator over the direct children of a panel, in insertion order.
///
/// Created by [`PanelStore::children`].
#[derive(Debug)]
pub struct Children<'a> {
    store: &'a PanelStore,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(store: &'a PanelStore, first: u32) -> Self {
        Self {
            store,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = PanelId;

    fn next(&mut self) -> Option<PanelId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.store.next_sibling[idx as usize];
        Some(self.store.id_at_unchecked(idx))
    }
}

/// An iterator from a panel up to the root, starting with the panel's
/// parent.
///
/// Created by [`PanelStore::ancestors`].
#[derive(Debug)]
pub struct Ancestors<'a> {
    store: &'a PanelStore,
    current: u32,
}

impl<'a> Ancestors<'a> {
    pub(crate) fn new(store: &'a PanelStore, start: u32) -> Self {
        Self {
            store,
            current: start,
        }
    }
}

impl Iterator for Ancestors<'_> {
    type Item = PanelId;

    fn next(&mut self) -> Option<PanelId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.store.parent[idx as usize];
        Some(self.store.id_at_unchecked(idx))
    }
}
