// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays panel storage with allocation, topology, and property management.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Affine, Point, Rect, Size, Vec2};
use lamina_render::{Color, TextureHandle};
use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use super::flags::PanelFlags;
use super::id::{INVALID, PanelId};
use super::traverse::{Ancestors, Children};
use crate::dirty;
use crate::geometry::{panel_quad, quad_bounds, rect_contains_closed};
use crate::layout::Layout;
use crate::transform::local_transform;
use crate::widget::Widget;

/// Background color given to new panels.
pub const DEFAULT_BACKGROUND: Color = Color::rgb(64, 64, 64);

/// Foreground color given to new panels.
pub const DEFAULT_FOREGROUND: Color = Color::WHITE;

/// Struct-of-arrays storage for all panels.
///
/// Panels are addressed by [`PanelId`] handles. Internally, each panel
/// occupies a slot in parallel arrays. Destroyed panels are recycled via a
/// free list, and generation counters prevent stale handle access: every
/// accessor panics with `stale PanelId` when handed a handle whose panel is
/// gone.
///
/// Children are kept in a doubly linked sibling list in insertion order.
/// Paint and pick order is derived on demand from each child's `z_depth`
/// (see [`zsorted`](Self::zsorted)), so there is exactly one child list to
/// keep consistent.
pub struct PanelStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Local properties (set by callers) --
    pub(crate) origin: Vec<Point>,
    pub(crate) size: Vec<Size>,
    pub(crate) maximum_size: Vec<Size>,
    pub(crate) rotation: Vec<f64>,
    pub(crate) scale: Vec<Vec2>,
    pub(crate) z_depth: Vec<u32>,
    pub(crate) flags: Vec<PanelFlags>,
    pub(crate) background_color: Vec<Color>,
    pub(crate) foreground_color: Vec<Color>,
    pub(crate) background: Vec<TextureHandle>,
    pub(crate) capture_rect: Vec<Option<Rect>>,
    pub(crate) name: Vec<Option<String>>,

    // -- Computed properties (written during tick) --
    pub(crate) local_transform: Vec<Affine>,
    pub(crate) world_transform: Vec<Affine>,
    pub(crate) geometry: Vec<[Point; 4]>,

    // -- Behaviour --
    pub(crate) widget: Vec<Option<Box<dyn Widget>>>,
    pub(crate) layout: Vec<Option<Box<dyn Layout>>>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) alive: Vec<bool>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,
}

impl fmt::Debug for PanelStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelStore")
            .field("len", &self.len)
            .field("free", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl Default for PanelStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelStore {
    /// Creates an empty panel store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty panel store with room for `capacity` panels.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            parent: Vec::with_capacity(capacity),
            first_child: Vec::with_capacity(capacity),
            next_sibling: Vec::with_capacity(capacity),
            prev_sibling: Vec::with_capacity(capacity),
            origin: Vec::with_capacity(capacity),
            size: Vec::with_capacity(capacity),
            maximum_size: Vec::with_capacity(capacity),
            rotation: Vec::with_capacity(capacity),
            scale: Vec::with_capacity(capacity),
            z_depth: Vec::with_capacity(capacity),
            flags: Vec::with_capacity(capacity),
            background_color: Vec::with_capacity(capacity),
            foreground_color: Vec::with_capacity(capacity),
            background: Vec::with_capacity(capacity),
            capture_rect: Vec::with_capacity(capacity),
            name: Vec::with_capacity(capacity),
            local_transform: Vec::with_capacity(capacity),
            world_transform: Vec::with_capacity(capacity),
            geometry: Vec::with_capacity(capacity),
            widget: Vec::with_capacity(capacity),
            layout: Vec::with_capacity(capacity),
            generation: Vec::with_capacity(capacity),
            alive: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        }
    }

    // -- Allocation API --

    /// Creates a new, parentless panel and returns its handle.
    ///
    /// The panel starts visible and cursor-enabled, at the origin, with zero
    /// size, no rotation, unit scale, and the default colors.
    pub(crate) fn create_panel(&mut self) -> PanelId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot; its generation was bumped on destroy.
            let i = idx as usize;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.origin[i] = Point::ZERO;
            self.size[i] = Size::ZERO;
            self.maximum_size[i] = Size::ZERO;
            self.rotation[i] = 0.0;
            self.scale[i] = Vec2::new(1.0, 1.0);
            self.z_depth[i] = 0;
            self.flags[i] = new_panel_flags();
            self.background_color[i] = DEFAULT_BACKGROUND;
            self.foreground_color[i] = DEFAULT_FOREGROUND;
            self.background[i] = TextureHandle::INVALID;
            self.capture_rect[i] = None;
            self.name[i] = None;
            self.local_transform[i] = Affine::IDENTITY;
            self.world_transform[i] = Affine::IDENTITY;
            self.geometry[i] = [Point::ZERO; 4];
            self.widget[i] = None;
            self.layout[i] = None;
            self.alive[i] = true;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.origin.push(Point::ZERO);
            self.size.push(Size::ZERO);
            self.maximum_size.push(Size::ZERO);
            self.rotation.push(0.0);
            self.scale.push(Vec2::new(1.0, 1.0));
            self.z_depth.push(0);
            self.flags.push(new_panel_flags());
            self.background_color.push(DEFAULT_BACKGROUND);
            self.foreground_color.push(DEFAULT_FOREGROUND);
            self.background.push(TextureHandle::INVALID);
            self.capture_rect.push(None);
            self.name.push(None);
            self.local_transform.push(Affine::IDENTITY);
            self.world_transform.push(Affine::IDENTITY);
            self.geometry.push([Point::ZERO; 4]);
            self.widget.push(None);
            self.layout.push(None);
            self.generation.push(0);
            self.alive.push(true);
            idx
        };

        self.dirty.mark_with(idx, dirty::TRANSFORM, &EagerPolicy);
        self.dirty.mark(idx, dirty::TOPOLOGY);

        PanelId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a childless panel, freeing its slot for reuse.
    ///
    /// Returns the panel's widget and layout so the caller controls when
    /// they are dropped.
    ///
    /// # Panics
    ///
    /// Panics if the panel has children or if the handle is stale.
    pub(crate) fn destroy_panel(
        &mut self,
        id: PanelId,
    ) -> (Option<Box<dyn Widget>>, Option<Box<dyn Layout>>) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy panel with children"
        );

        if self.parent[idx as usize] != INVALID {
            self.unlink(id);
        }

        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.alive[idx as usize] = false;
        self.free_list.push(idx);

        let widget = self.widget[idx as usize].take();
        let layout = self.layout[idx as usize].take();
        (widget, layout)
    }

    /// Returns whether the given handle refers to a live panel.
    #[must_use]
    pub fn is_alive(&self, id: PanelId) -> bool {
        id.idx < self.len
            && self.alive[id.idx as usize]
            && self.generation[id.idx as usize] == id.generation
    }

    /// Returns the number of live panels.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    /// Returns the handle of the live panel at raw slot `idx`, if any.
    ///
    /// Slot indices appear in [`FrameChanges`](super::FrameChanges).
    #[must_use]
    pub fn id_at(&self, idx: u32) -> Option<PanelId> {
        (idx < self.len && self.alive[idx as usize]).then(|| self.id_at_unchecked(idx))
    }

    pub(crate) fn id_at_unchecked(&self, idx: u32) -> PanelId {
        PanelId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    // -- Topology API --

    /// Appends `child` as the last child of `parent`.
    ///
    /// Marks `child`'s subtree for transform recomputation under the new
    /// ancestry and `parent` for layout.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if `child` already has a parent.
    pub(crate) fn link(&mut self, parent: PanelId, child: PanelId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );

        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }

        // Child depends on parent for TRANSFORM.
        let _ = self.dirty.add_dependency(c, p, dirty::TRANSFORM);

        self.dirty.mark_with(c, dirty::TRANSFORM, &EagerPolicy);
        self.mark_layout(p);
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Removes `child` from its current parent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the panel has no parent.
    pub(crate) fn unlink(&mut self, child: PanelId) {
        self.validate(child);
        let c = child.idx;
        let p = self.parent[c as usize];
        assert!(p != INVALID, "panel has no parent");

        let prev = self.prev_sibling[c as usize];
        let next = self.next_sibling[c as usize];
        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            self.first_child[p as usize] = next;
        }
        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }
        self.parent[c as usize] = INVALID;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        self.dirty.remove_dependency(c, p, dirty::TRANSFORM);

        self.dirty.mark_with(c, dirty::TRANSFORM, &EagerPolicy);
        self.mark_layout(p);
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Returns the parent of a panel, if any.
    #[must_use]
    pub fn parent(&self, id: PanelId) -> Option<PanelId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.id_at_unchecked(p))
    }

    /// Returns an iterator over the direct children of a panel, in insertion
    /// order.
    #[must_use]
    pub fn children(&self, id: PanelId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns the number of direct children of a panel.
    #[must_use]
    pub fn child_count(&self, id: PanelId) -> usize {
        self.children(id).count()
    }

    /// Returns the `index`-th child of a panel in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn child_at(&self, id: PanelId, index: usize) -> PanelId {
        let count = self.child_count(id);
        match self.children(id).nth(index) {
            Some(child) => child,
            None => panic!("child index {index} out of range (child count {count})"),
        }
    }

    /// Returns an iterator over the ancestors of a panel, nearest first.
    #[must_use]
    pub fn ancestors(&self, id: PanelId) -> Ancestors<'_> {
        self.validate(id);
        Ancestors::new(self, self.parent[id.idx as usize])
    }

    /// Returns whether `ancestor` is a strict ancestor of `id`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: PanelId, id: PanelId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Returns whether `ancestor` is `id` or one of its ancestors.
    #[must_use]
    pub fn is_ancestor_or_self(&self, ancestor: PanelId, id: PanelId) -> bool {
        ancestor == id || self.is_ancestor(ancestor, id)
    }

    // -- Z-order --

    /// Returns the children of `id` in z-order, topmost first.
    ///
    /// Children flagged [`ALWAYS_ON_TOP`](PanelFlags::ALWAYS_ON_TOP) come
    /// before the rest; within each group, lower `z_depth` is nearer the
    /// front and ties keep insertion order. Hit testing walks this list
    /// front to back and painting walks it back to front.
    #[must_use]
    pub fn zsorted(&self, id: PanelId) -> Vec<PanelId> {
        let mut kids: Vec<PanelId> = self.children(id).collect();
        kids.sort_by_key(|k| self.sort_key(k.idx));
        kids
    }

    /// Moves `panel` to the front of its siblings.
    ///
    /// `panel` gets `z_depth` 0 and every other child of `parent` gets a
    /// strictly increasing depth following the current z-order, so their
    /// relative order is preserved.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale or `panel` is not a child of
    /// `parent`.
    pub fn zsort_children(&mut self, parent: PanelId, panel: PanelId) {
        self.validate(panel);
        assert!(
            self.parent(panel) == Some(parent),
            "panel is not a child of the given parent"
        );
        let order = self.zsorted(parent);
        let mut depth = 1;
        for child in order {
            if child == panel {
                self.z_depth[child.idx as usize] = 0;
            } else {
                self.z_depth[child.idx as usize] = depth;
                depth += 1;
            }
        }
    }

    /// Returns the z-depth of a panel among its siblings (0 is frontmost).
    #[must_use]
    pub fn z_depth(&self, id: PanelId) -> u32 {
        self.validate(id);
        self.z_depth[id.idx as usize]
    }

    fn sort_key(&self, idx: u32) -> (bool, u32) {
        let i = idx as usize;
        (
            !self.flags[i].contains(PanelFlags::ALWAYS_ON_TOP),
            self.z_depth[i],
        )
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the origin of a panel in its parent's space.
    #[must_use]
    pub fn origin(&self, id: PanelId) -> Point {
        self.validate(id);
        self.origin[id.idx as usize]
    }

    /// Returns the size of a panel.
    #[must_use]
    pub fn size(&self, id: PanelId) -> Size {
        self.validate(id);
        self.size[id.idx as usize]
    }

    /// Returns the panel's rectangle in its parent's space.
    #[must_use]
    pub fn bounds(&self, id: PanelId) -> Rect {
        Rect::from_origin_size(self.origin(id), self.size(id))
    }

    /// Returns the maximum size of a panel (zero components are unbounded).
    #[must_use]
    pub fn maximum_size(&self, id: PanelId) -> Size {
        self.validate(id);
        self.maximum_size[id.idx as usize]
    }

    /// Returns the rotation of a panel in radians.
    #[must_use]
    pub fn rotation(&self, id: PanelId) -> f64 {
        self.validate(id);
        self.rotation[id.idx as usize]
    }

    /// Returns the scale of a panel.
    #[must_use]
    pub fn scale(&self, id: PanelId) -> Vec2 {
        self.validate(id);
        self.scale[id.idx as usize]
    }

    /// Returns the flags of a panel.
    #[must_use]
    pub fn flags(&self, id: PanelId) -> PanelFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Returns whether a panel has all of `flags`.
    #[must_use]
    pub fn has_flags(&self, id: PanelId, flags: PanelFlags) -> bool {
        self.flags(id).contains(flags)
    }

    /// Returns whether a panel is visible.
    #[must_use]
    pub fn is_visible(&self, id: PanelId) -> bool {
        self.has_flags(id, PanelFlags::VISIBLE)
    }

    /// Returns the background color of a panel.
    #[must_use]
    pub fn background_color(&self, id: PanelId) -> Color {
        self.validate(id);
        self.background_color[id.idx as usize]
    }

    /// Returns the foreground color of a panel.
    #[must_use]
    pub fn foreground_color(&self, id: PanelId) -> Color {
        self.validate(id);
        self.foreground_color[id.idx as usize]
    }

    /// Returns the background texture of a panel.
    #[must_use]
    pub fn background(&self, id: PanelId) -> TextureHandle {
        self.validate(id);
        self.background[id.idx as usize]
    }

    /// Returns the capture rect of a panel, in local space.
    ///
    /// `None` means the whole panel.
    #[must_use]
    pub fn capture_rect(&self, id: PanelId) -> Option<Rect> {
        self.validate(id);
        self.capture_rect[id.idx as usize]
    }

    /// Returns the debug name of a panel.
    #[must_use]
    pub fn name(&self, id: PanelId) -> Option<&str> {
        self.validate(id);
        self.name[id.idx as usize].as_deref()
    }

    /// Returns the cached local transform of a panel.
    ///
    /// Only valid after [`Compositor::tick`](crate::Compositor::tick).
    #[must_use]
    pub fn local_transform(&self, id: PanelId) -> Affine {
        self.validate(id);
        self.local_transform[id.idx as usize]
    }

    /// Returns the cached world (compositor-space) transform of a panel.
    ///
    /// Only valid after [`Compositor::tick`](crate::Compositor::tick).
    #[must_use]
    pub fn world_transform(&self, id: PanelId) -> Affine {
        self.validate(id);
        self.world_transform[id.idx as usize]
    }

    /// Returns the cached quad of a panel in compositor space.
    ///
    /// Corner order is bottom-left, bottom-right, top-right, top-left. Only
    /// valid after [`Compositor::tick`](crate::Compositor::tick).
    #[must_use]
    pub fn geometry(&self, id: PanelId) -> [Point; 4] {
        self.validate(id);
        self.geometry[id.idx as usize]
    }

    /// Returns the axis-aligned compositor-space bounds of the cached
    /// geometry.
    #[must_use]
    pub fn screen_bounds(&self, id: PanelId) -> Rect {
        quad_bounds(&self.geometry(id))
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the origin of a panel in its parent's space.
    pub fn set_origin(&mut self, id: PanelId, origin: Point) {
        self.validate(id);
        if self.origin[id.idx as usize] == origin {
            return;
        }
        self.origin[id.idx as usize] = origin;
        self.mark_transform(id.idx);
    }

    /// Sets the size of a panel.
    ///
    /// Negative components are clamped to zero, and non-zero components of
    /// the maximum size clamp from above. Marks the panel for layout.
    pub fn set_size(&mut self, id: PanelId, size: Size) {
        self.validate(id);
        let size = clamp_size(size, self.maximum_size[id.idx as usize]);
        if self.size[id.idx as usize] == size {
            return;
        }
        self.size[id.idx as usize] = size;
        self.mark_transform(id.idx);
        self.mark_layout(id.idx);
    }

    /// Sets origin and size from a rectangle in the parent's space.
    pub fn set_bounds(&mut self, id: PanelId, bounds: Rect) {
        self.set_origin(id, bounds.origin());
        self.set_size(id, bounds.size());
    }

    /// Sets the maximum size of a panel and re-clamps its current size.
    pub fn set_maximum_size(&mut self, id: PanelId, maximum: Size) {
        self.validate(id);
        self.maximum_size[id.idx as usize] = maximum;
        let size = self.size[id.idx as usize];
        self.set_size(id, size);
    }

    /// Sets the rotation of a panel in radians, around its center.
    pub fn set_rotation(&mut self, id: PanelId, radians: f64) {
        self.validate(id);
        if self.rotation[id.idx as usize] == radians {
            return;
        }
        self.rotation[id.idx as usize] = radians;
        self.mark_transform(id.idx);
    }

    /// Sets the scale of a panel, around its center.
    pub fn set_scale(&mut self, id: PanelId, scale: Vec2) {
        self.validate(id);
        if self.scale[id.idx as usize] == scale {
            return;
        }
        self.scale[id.idx as usize] = scale;
        self.mark_transform(id.idx);
    }

    /// Replaces the caller-controlled flags of a panel.
    ///
    /// The store-maintained bits (`TRANSFORM_DIRTY`, `NEEDS_LAYOUT`) are
    /// preserved. Changing visibility marks the parent for layout.
    pub fn set_flags(&mut self, id: PanelId, flags: PanelFlags) {
        self.validate(id);
        let i = id.idx as usize;
        let maintained = PanelFlags::TRANSFORM_DIRTY | PanelFlags::NEEDS_LAYOUT;
        let old = self.flags[i];
        self.flags[i] = (flags - maintained) | (old & maintained);
        if old.contains(PanelFlags::VISIBLE) != flags.contains(PanelFlags::VISIBLE) {
            let p = self.parent[i];
            if p != INVALID {
                self.mark_layout(p);
            }
        }
    }

    /// Sets `flags` on a panel, leaving other bits unchanged.
    pub fn add_flags(&mut self, id: PanelId, flags: PanelFlags) {
        let current = self.flags(id);
        self.set_flags(id, current | flags);
    }

    /// Clears `flags` on a panel, leaving other bits unchanged.
    pub fn remove_flags(&mut self, id: PanelId, flags: PanelFlags) {
        let current = self.flags(id);
        self.set_flags(id, current - flags);
    }

    /// Shows or hides a panel and its subtree.
    pub fn set_visible(&mut self, id: PanelId, visible: bool) {
        let mut flags = self.flags(id);
        flags.set(PanelFlags::VISIBLE, visible);
        self.set_flags(id, flags);
    }

    /// Sets the background color of a panel.
    pub fn set_background_color(&mut self, id: PanelId, color: Color) {
        self.validate(id);
        self.background_color[id.idx as usize] = color;
    }

    /// Sets the foreground color of a panel.
    pub fn set_foreground_color(&mut self, id: PanelId, color: Color) {
        self.validate(id);
        self.foreground_color[id.idx as usize] = color;
    }

    /// Sets the background texture of a panel.
    pub fn set_background(&mut self, id: PanelId, texture: TextureHandle) {
        self.validate(id);
        self.background[id.idx as usize] = texture;
    }

    /// Restricts drag initiation to `rect` in local space (`None` for the
    /// whole panel).
    pub fn set_capture_rect(&mut self, id: PanelId, rect: Option<Rect>) {
        self.validate(id);
        self.capture_rect[id.idx as usize] = rect;
    }

    /// Sets the debug name of a panel.
    pub fn set_name(&mut self, id: PanelId, name: impl Into<String>) {
        self.validate(id);
        self.name[id.idx as usize] = Some(name.into());
    }

    /// Forces the panel's layout to run on the next tick.
    pub fn invalidate_layout(&mut self, id: PanelId) {
        self.validate(id);
        self.mark_layout(id.idx);
    }

    // -- Behaviour slots --

    /// Returns the panel's widget, unless it is currently lent out.
    pub(crate) fn widget_ref(&self, id: PanelId) -> Option<&dyn Widget> {
        self.validate(id);
        self.widget[id.idx as usize].as_deref()
    }

    /// Returns whether the panel has a layout installed.
    #[must_use]
    pub fn has_layout(&self, id: PanelId) -> bool {
        self.validate(id);
        self.layout[id.idx as usize].is_some()
    }

    // -- Coordinate spaces --

    /// Returns the current transform from the panel's local space to
    /// compositor space.
    ///
    /// Unlike [`world_transform`](Self::world_transform) this is computed
    /// from the current properties, so it is correct between ticks.
    #[must_use]
    pub fn local_to_compositor(&self, id: PanelId) -> Affine {
        self.validate(id);
        let mut xf = self.compose_local(id.idx);
        let mut p = self.parent[id.idx as usize];
        while p != INVALID {
            xf = self.compose_local(p) * xf;
            p = self.parent[p as usize];
        }
        xf
    }

    /// Maps a compositor-space point into the panel's local space.
    #[must_use]
    pub fn compositor_to_local(&self, id: PanelId, point: Point) -> Point {
        self.local_to_compositor(id).inverse() * point
    }

    /// Returns whether `local` lies inside the panel's unrotated local box
    /// `[0, width] x [0, height]`, edges included.
    #[must_use]
    pub fn hit_test_local(&self, id: PanelId, local: Point) -> bool {
        rect_contains_closed(Rect::from_origin_size(Point::ZERO, self.size(id)), local)
    }

    /// Returns whether `local` lies inside the panel's capture rect.
    #[must_use]
    pub fn point_in_capture_rect(&self, id: PanelId, local: Point) -> bool {
        match self.capture_rect(id) {
            Some(rect) => rect_contains_closed(rect, local),
            None => self.hit_test_local(id, local),
        }
    }

    /// Returns the union of the visible children's bounds in the panel's
    /// local space, or `None` without visible children.
    #[must_use]
    pub fn content_bounds(&self, id: PanelId) -> Option<Rect> {
        self.children(id)
            .filter(|&c| self.is_visible(c))
            .map(|c| self.bounds(c))
            .reduce(|a, b| a.union(b))
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: PanelId) {
        assert!(
            self.is_alive(id),
            "stale PanelId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    pub(crate) fn compose_local(&self, idx: u32) -> Affine {
        let i = idx as usize;
        local_transform(self.origin[i], self.size[i], self.rotation[i], self.scale[i])
    }

    pub(crate) fn recompute_geometry(&mut self, idx: u32) {
        let i = idx as usize;
        self.geometry[i] = panel_quad(self.world_transform[i], self.size[i]);
    }

    fn mark_transform(&mut self, idx: u32) {
        self.flags[idx as usize].insert(PanelFlags::TRANSFORM_DIRTY);
        self.dirty.mark_with(idx, dirty::TRANSFORM, &EagerPolicy);
    }

    fn mark_layout(&mut self, idx: u32) {
        self.flags[idx as usize].insert(PanelFlags::NEEDS_LAYOUT);
        self.dirty.mark(idx, dirty::LAYOUT);
    }
}

fn new_panel_flags() -> PanelFlags {
    PanelFlags::default() | PanelFlags::TRANSFORM_DIRTY | PanelFlags::NEEDS_LAYOUT
}

fn clamp_size(size: Size, maximum: Size) -> Size {
    let mut width = size.width.max(0.0);
    let mut height = size.height.max(0.0);
    if maximum.width > 0.0 {
        width = width.min(maximum.width);
    }
    if maximum.height > 0.0 {
        height = height.min(maximum.height);
    }
    Size::new(width, height)
}
