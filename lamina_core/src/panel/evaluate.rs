// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame evaluation of dirty panel state.
//!
//! The compositor drives three drains each tick:
//!
//! 1. **TRANSFORM**: drain the affected set, order it parent before child,
//!    recompute `local_transform` where `TRANSFORM_DIRTY` is set, then
//!    `world_transform = parent_world * local_transform` and the cached
//!    compositor-space quad.
//! 2. **LAYOUT**: drain panels whose layout must run, plus any
//!    transform-dirty panel that owns a layout (its size may have changed).
//! 3. **TOPOLOGY**: drain and report whether anything was linked, unlinked,
//!    created, or destroyed.
//!
//! [`FrameChanges`] uses raw slot indices (`u32`); map them back to handles
//! with [`PanelStore::id_at`].

use alloc::vec::Vec;

use kurbo::Affine;

use super::flags::PanelFlags;
use super::id::INVALID;
use super::store::PanelStore;
use crate::dirty;

/// The set of changes produced by a single [`Compositor::tick`].
///
/// [`Compositor::tick`]: crate::Compositor::tick
#[derive(Clone, Debug, Default)]
pub struct FrameChanges {
    /// Panels whose world transform was recomputed.
    pub transforms: Vec<u32>,
    /// Panels whose layout ran.
    pub layouts: Vec<u32>,
    /// Whether the tree topology changed.
    pub topology_changed: bool,
    /// Number of transform/layout passes before the tree settled.
    pub passes: u32,
}

impl FrameChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.transforms.clear();
        self.layouts.clear();
        self.topology_changed = false;
        self.passes = 0;
    }
}

impl PanelStore {
    /// Recomputes every transform-dirty panel and returns their indices in
    /// parent-before-child order.
    pub(crate) fn recompute_transforms(&mut self) -> Vec<u32> {
        let affected: Vec<u32> = self
            .dirty
            .drain(dirty::TRANSFORM)
            .affected()
            .deterministic()
            .run()
            .collect();

        let mut ordered: Vec<(usize, u32)> = affected
            .into_iter()
            .filter(|&idx| self.is_live_index(idx))
            .map(|idx| (self.depth(idx), idx))
            .collect();
        // Stable: equal depths keep the deterministic drain order.
        ordered.sort_by_key(|&(depth, _)| depth);

        let mut out = Vec::with_capacity(ordered.len());
        for (_, idx) in ordered {
            let i = idx as usize;
            if self.flags[i].contains(PanelFlags::TRANSFORM_DIRTY) {
                self.local_transform[i] = self.compose_local(idx);
                self.flags[i].remove(PanelFlags::TRANSFORM_DIRTY);
            }
            let parent = self.parent[i];
            let parent_world = if parent != INVALID {
                self.world_transform[parent as usize]
            } else {
                Affine::IDENTITY
            };
            self.world_transform[i] = parent_world * self.local_transform[i];
            self.recompute_geometry(idx);
            out.push(idx);
        }
        out
    }

    /// Drains the panels whose layout must run this pass.
    ///
    /// `transformed` is the output of the preceding
    /// [`recompute_transforms`](Self::recompute_transforms); panels in it
    /// that own a layout are included because their size may have changed.
    pub(crate) fn drain_layouts(&mut self, transformed: &[u32]) -> Vec<u32> {
        let mut pending: Vec<u32> = self
            .dirty
            .drain(dirty::LAYOUT)
            .deterministic()
            .run()
            .filter(|&idx| self.is_live_index(idx))
            .collect();
        for &idx in transformed {
            if self.layout[idx as usize].is_some() && !pending.contains(&idx) {
                pending.push(idx);
            }
        }
        pending.sort_by_key(|&idx| self.depth(idx));
        pending
    }

    /// Drains the topology channel, returning whether anything changed.
    pub(crate) fn drain_topology(&mut self) -> bool {
        self.dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .count()
            > 0
    }

    /// Returns the number of ancestors of the panel at `idx`.
    pub(crate) fn depth(&self, idx: u32) -> usize {
        let mut depth = 0;
        let mut p = self.parent[idx as usize];
        while p != INVALID {
            depth += 1;
            p = self.parent[p as usize];
        }
        depth
    }

    fn is_live_index(&self, idx: u32) -> bool {
        idx < self.len && self.alive[idx as usize]
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};

    use super::*;

    #[test]
    fn world_transform_composes_parent_first() {
        let mut store = PanelStore::new();
        let root = store.create_panel();
        let child = store.create_panel();
        let grandchild = store.create_panel();
        store.link(root, child);
        store.link(child, grandchild);
        store.set_origin(child, Point::new(10.0, 20.0));
        store.set_origin(grandchild, Point::new(1.0, 2.0));

        let changed = store.recompute_transforms();
        assert_eq!(changed.len(), 3);
        let pos = |idx: u32| changed.iter().position(|&i| i == idx);
        assert!(pos(root.idx) < pos(child.idx));
        assert!(pos(child.idx) < pos(grandchild.idx));

        let world = store.world_transform(grandchild);
        assert_eq!(world * Point::ZERO, Point::new(11.0, 22.0));
        assert!(!store.has_flags(grandchild, PanelFlags::TRANSFORM_DIRTY));
    }

    #[test]
    fn parent_move_propagates_to_children() {
        let mut store = PanelStore::new();
        let root = store.create_panel();
        let child = store.create_panel();
        store.link(root, child);
        store.set_size(child, Size::new(10.0, 10.0));
        let _ = store.recompute_transforms();

        store.set_origin(root, Point::new(5.0, 5.0));
        let changed = store.recompute_transforms();
        assert!(changed.contains(&child.idx));
        assert_eq!(store.geometry(child)[3], Point::new(5.0, 5.0));
        assert_eq!(store.geometry(child)[1], Point::new(15.0, 15.0));
    }

    #[test]
    fn clean_store_recomputes_nothing() {
        let mut store = PanelStore::new();
        let root = store.create_panel();
        let _ = store.recompute_transforms();
        let _ = store.drain_topology();
        assert!(store.recompute_transforms().is_empty());
        assert!(!store.drain_topology());
        store.set_origin(root, Point::ZERO);
        assert!(store.recompute_transforms().is_empty());
    }

    #[test]
    fn link_marks_parent_for_layout_and_topology() {
        let mut store = PanelStore::new();
        let root = store.create_panel();
        let _ = store.drain_layouts(&[]);
        let _ = store.drain_topology();

        let child = store.create_panel();
        store.link(root, child);
        assert!(store.drain_layouts(&[]).contains(&root.idx));
        assert!(store.drain_topology());
    }

    #[test]
    fn depth_counts_ancestors() {
        let mut store = PanelStore::new();
        let root = store.create_panel();
        let child = store.create_panel();
        store.link(root, child);
        assert_eq!(store.depth(root.idx), 0);
        assert_eq!(store.depth(child.idx), 1);
    }
}
