// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The compositor: root of the panel tree, input router, and frame driver.
//!
//! A [`Compositor`] owns every panel (through its [`PanelStore`]), the
//! interaction state (`hot`, `focus`, `capture`, `drop_target`), the
//! collaborators (renderer, resource cache, listener, trace sink), and the
//! per-frame [`CommandList`].
//!
//! The interaction state only ever holds generational handles, and every
//! operation that detaches or destroys a subtree clears any of them that
//! point into it, so none of them can outlive its panel.

mod dispatch;
mod frame;
mod hit_test;
mod input;
mod queue;

#[cfg(test)]
pub(crate) mod test_util;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use kurbo::{Point, Size};
use lamina_render::{Color, CommandList, ResourceCache};

use crate::event::{CursorButton, EventArgs, EventKind, Listener, Modifiers};
use crate::layout::Layout;
use crate::panel::{FrameChanges, PanelId, PanelStore};
use crate::renderer::Renderer;
use crate::trace::{TraceSink, Tracer};
use crate::widget::Widget;

/// Construction-time tuning knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositorConfig {
    /// Maximum number of application events queued per frame. Events queued
    /// beyond this are dropped with a warning.
    pub event_queue_capacity: usize,
    /// Maximum number of transform/layout passes per tick.
    pub max_layout_passes: u32,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            event_queue_capacity: 16,
            max_layout_passes: 8,
        }
    }
}

/// A rejected reparenting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The new parent is the child itself or one of its descendants.
    #[error("adding {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// The requested parent.
        parent: PanelId,
        /// The panel being moved.
        child: PanelId,
    },
    /// The root panel cannot be given a parent.
    #[error("the root panel cannot be reparented")]
    Root,
    /// One of the handles refers to a destroyed panel.
    #[error("stale panel handle {0:?}")]
    Stale(PanelId),
}

/// Root of the panel tree.
pub struct Compositor {
    panels: PanelStore,
    root: PanelId,
    config: CompositorConfig,

    // -- Interaction state --
    focus: Option<PanelId>,
    hot: Option<PanelId>,
    capture: Option<PanelId>,
    capture_button: CursorButton,
    drop_target: Option<PanelId>,
    last_cursor: Point,
    key_modifiers: Modifiers,

    // -- Collaborators --
    renderer: Option<Box<dyn Renderer>>,
    resources: Option<Box<dyn ResourceCache>>,
    listener: Option<Box<dyn Listener>>,
    trace: Option<Box<dyn TraceSink>>,

    // -- Per-frame state --
    command_list: CommandList,
    queue: Vec<EventArgs>,
    frame_index: u64,
    time: f64,
    last_changes: FrameChanges,
}

impl fmt::Debug for Compositor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compositor")
            .field("root", &self.root)
            .field("panels", &self.panels.panel_count())
            .field("hot", &self.hot)
            .field("focus", &self.focus)
            .field("capture", &self.capture)
            .field("drop_target", &self.drop_target)
            .field("frame_index", &self.frame_index)
            .finish_non_exhaustive()
    }
}

impl Compositor {
    /// Creates a compositor covering a `width` x `height` surface.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_capacity(width, height, 0)
    }

    /// Creates a compositor with arena and vertex storage reserved for
    /// `panels` panels.
    #[must_use]
    pub fn with_capacity(width: f64, height: f64, panels: usize) -> Self {
        let mut store = PanelStore::with_capacity(panels.max(1));
        let root = store.create_panel();
        store.set_size(root, Size::new(width, height));
        store.set_background_color(root, Color::TRANSPARENT);
        store.set_name(root, "compositor");
        Self {
            panels: store,
            root,
            config: CompositorConfig::default(),
            focus: None,
            hot: None,
            capture: None,
            capture_button: CursorButton::None,
            drop_target: None,
            last_cursor: Point::ZERO,
            key_modifiers: Modifiers::empty(),
            renderer: None,
            resources: None,
            listener: None,
            trace: None,
            command_list: CommandList::with_capacity(panels * 12),
            queue: Vec::new(),
            frame_index: 0,
            time: 0.0,
            last_changes: FrameChanges::default(),
        }
    }

    /// Replaces the configuration, returning `self` for chaining.
    #[must_use]
    pub fn with_config(mut self, config: CompositorConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    /// Resizes the compositor surface.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.panels.set_size(self.root, Size::new(width, height));
    }

    // -- Accessors --

    /// Returns the root panel (the compositor itself).
    #[must_use]
    pub fn root(&self) -> PanelId {
        self.root
    }

    /// Returns the panel arena.
    #[must_use]
    pub fn panels(&self) -> &PanelStore {
        &self.panels
    }

    /// Returns the panel arena for property changes.
    pub fn panels_mut(&mut self) -> &mut PanelStore {
        &mut self.panels
    }

    /// Returns the panel under the cursor.
    #[must_use]
    pub fn hot(&self) -> Option<PanelId> {
        self.hot
    }

    /// Returns the panel with keyboard focus.
    #[must_use]
    pub fn focus(&self) -> Option<PanelId> {
        self.focus
    }

    /// Returns the panel holding drag capture.
    #[must_use]
    pub fn capture(&self) -> Option<PanelId> {
        self.capture
    }

    /// Returns the button that started the current capture.
    #[must_use]
    pub fn capture_button(&self) -> CursorButton {
        self.capture_button
    }

    /// Returns the drop target under the current drag.
    #[must_use]
    pub fn drop_target(&self) -> Option<PanelId> {
        self.drop_target
    }

    /// Returns the most recent cursor position in compositor space.
    #[must_use]
    pub fn last_cursor(&self) -> Point {
        self.last_cursor
    }

    /// Returns the modifiers of the most recent key event.
    #[must_use]
    pub fn key_modifiers(&self) -> Modifiers {
        self.key_modifiers
    }

    /// Returns the number of ticks so far.
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Returns the accumulated tick time in seconds.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Returns the command list built by the most recent draw.
    #[must_use]
    pub fn command_list(&self) -> &CommandList {
        &self.command_list
    }

    /// Returns what the most recent tick recomputed.
    #[must_use]
    pub fn last_changes(&self) -> &FrameChanges {
        &self.last_changes
    }

    // -- Collaborators --

    /// Installs a renderer and starts it up, shutting down and returning the
    /// previous one.
    pub fn set_renderer(&mut self, renderer: Box<dyn Renderer>) -> Option<Box<dyn Renderer>> {
        let old = self.take_renderer();
        let mut renderer = renderer;
        renderer.startup(self);
        self.renderer = Some(renderer);
        old
    }

    /// Shuts down and removes the renderer.
    pub fn take_renderer(&mut self) -> Option<Box<dyn Renderer>> {
        let mut renderer = self.renderer.take()?;
        renderer.shutdown(self);
        Some(renderer)
    }

    /// Returns the renderer, if one is installed and not mid-draw.
    pub fn renderer(&mut self) -> Option<&mut dyn Renderer> {
        self.renderer.as_deref_mut().map(|r| r as &mut dyn Renderer)
    }

    /// Installs the resource cache used by widgets to load fonts and
    /// textures.
    pub fn set_resource_cache(&mut self, resources: Box<dyn ResourceCache>) {
        self.resources = Some(resources);
    }

    /// Returns the resource cache, if installed.
    pub fn resources(&mut self) -> Option<&mut dyn ResourceCache> {
        self.resources
            .as_deref_mut()
            .map(|r| r as &mut dyn ResourceCache)
    }

    /// Installs the application listener.
    pub fn set_listener(&mut self, listener: Box<dyn Listener>) {
        self.listener = Some(listener);
    }

    /// Installs a trace sink, returning the previous one.
    ///
    /// Events are only emitted when the `trace` feature is enabled.
    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) -> Option<Box<dyn TraceSink>> {
        self.trace.replace(sink)
    }

    /// Removes the trace sink.
    pub fn take_trace_sink(&mut self) -> Option<Box<dyn TraceSink>> {
        self.trace.take()
    }

    pub(crate) fn tracer(&mut self) -> Tracer<'_> {
        match self.trace.as_deref_mut() {
            Some(sink) => Tracer::new(sink),
            None => Tracer::none(),
        }
    }

    // -- Tree operations --

    /// Creates a plain panel as the topmost child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is stale.
    pub fn create_panel(&mut self, parent: PanelId) -> PanelId {
        self.panels.validate(parent);
        let id = self.panels.create_panel();
        self.panels.link(parent, id);
        self.panels.zsort_children(parent, id);
        id
    }

    /// Creates a panel driven by `widget` as the topmost child of `parent`.
    pub fn create_widget_panel(&mut self, parent: PanelId, widget: impl Widget) -> PanelId {
        let id = self.create_panel(parent);
        self.panels.widget[id.idx as usize] = Some(Box::new(widget));
        id
    }

    /// Replaces the panel's widget, returning the previous one.
    pub fn set_widget(&mut self, id: PanelId, widget: Box<dyn Widget>) -> Option<Box<dyn Widget>> {
        self.panels.validate(id);
        self.panels.widget[id.idx as usize].replace(widget)
    }

    /// Installs the panel's layout and marks it for layout.
    ///
    /// # Panics
    ///
    /// Panics if the panel already has a layout.
    pub fn set_layout(&mut self, id: PanelId, layout: Box<dyn Layout>) {
        assert!(!self.panels.has_layout(id), "panel already has a layout");
        self.panels.layout[id.idx as usize] = Some(layout);
        self.panels.invalidate_layout(id);
    }

    /// Removes and returns the panel's layout.
    pub fn remove_layout(&mut self, id: PanelId) -> Option<Box<dyn Layout>> {
        self.panels.validate(id);
        self.panels.layout[id.idx as usize].take()
    }

    /// Moves `child` (with its subtree) to the end of `parent`'s children
    /// and raises it to the front of its new siblings.
    ///
    /// # Errors
    ///
    /// Fails without changing anything if either handle is stale, if `child`
    /// is the root, or if `parent` lies inside `child`'s subtree.
    pub fn add_child(&mut self, parent: PanelId, child: PanelId) -> Result<(), TreeError> {
        if !self.panels.is_alive(parent) {
            return Err(TreeError::Stale(parent));
        }
        if !self.panels.is_alive(child) {
            return Err(TreeError::Stale(child));
        }
        if child == self.root {
            return Err(TreeError::Root);
        }
        if self.panels.is_ancestor_or_self(child, parent) {
            log::warn!("rejected add_child: {child:?} is an ancestor of {parent:?}");
            return Err(TreeError::Cycle { parent, child });
        }
        if self.panels.parent(child).is_some() {
            self.panels.unlink(child);
        }
        self.panels.link(parent, child);
        self.panels.zsort_children(parent, child);
        Ok(())
    }

    /// Detaches `child` from its parent, keeping it alive as an orphan.
    ///
    /// Orphans are neither rendered nor hit-tested until re-added with
    /// [`add_child`](Self::add_child). Interaction state pointing into the
    /// subtree is cleared.
    pub fn remove_child(&mut self, child: PanelId) {
        self.panels.validate(child);
        if self.panels.parent(child).is_none() {
            return;
        }
        self.forget_subtree(child);
        self.panels.unlink(child);
    }

    /// Destroys a panel and its whole subtree.
    ///
    /// Widgets and layouts in the subtree are dropped, and interaction state
    /// pointing into it is cleared.
    ///
    /// # Panics
    ///
    /// Panics if `id` is the root or stale.
    pub fn destroy_panel(&mut self, id: PanelId) {
        assert!(id != self.root, "cannot destroy the root panel");
        self.panels.validate(id);
        self.forget_subtree(id);

        let mut post_order = Vec::new();
        collect_post_order(&self.panels, id, &mut post_order);
        for panel in post_order {
            let (widget, layout) = self.panels.destroy_panel(panel);
            drop(widget);
            drop(layout);
        }
    }

    /// Destroys every child of `id`.
    pub fn clear_children(&mut self, id: PanelId) {
        let children: Vec<PanelId> = self.panels.children(id).collect();
        for child in children {
            self.destroy_panel(child);
        }
    }

    /// Clears `hot`, `focus`, `capture`, and `drop_target` if they point
    /// into `id`'s subtree.
    ///
    /// Losing the capture ends the drag: a drop target outside the subtree
    /// receives `CursorDropExit` and is cleared.
    fn forget_subtree(&mut self, id: PanelId) {
        let panels = &self.panels;
        let inside =
            |slot: Option<PanelId>| slot.is_some_and(|p| panels.is_alive(p) && panels.is_ancestor_or_self(id, p));
        let (hot, focus, drop_target, capture) = (
            inside(self.hot),
            inside(self.focus),
            inside(self.drop_target),
            inside(self.capture),
        );
        if hot {
            self.hot = None;
        }
        if focus {
            self.focus = None;
        }
        if drop_target {
            self.set_drop_target(None);
        }
        if capture {
            let button = self.capture_button;
            self.release_capture();
            if let Some(target) = self.drop_target.filter(|&p| self.panels.is_alive(p)) {
                let mut args = self.event_args(EventKind::CursorDropExit);
                args.cursor_button = button;
                let _ = self.dispatch(target, &mut args);
            }
            self.set_drop_target(None);
        }
    }

    // -- Typed widget access --

    /// Lends the panel's widget, downcast to `W`, to `f` together with the
    /// compositor.
    ///
    /// Returns `None` if the panel has no widget of type `W` (or its widget
    /// is already lent out).
    pub fn with_widget<W, R>(&mut self, id: PanelId, f: impl FnOnce(&mut W, &mut Self) -> R) -> Option<R>
    where
        W: Widget,
    {
        self.panels.validate(id);
        let mut widget = self.panels.widget[id.idx as usize].take()?;
        let result = (&mut *widget as &mut dyn Any)
            .downcast_mut::<W>()
            .map(|w| f(w, self));
        self.restore_widget(id, widget);
        result
    }

    /// Returns the panel's widget downcast to `W`.
    #[must_use]
    pub fn widget<W: Widget>(&self, id: PanelId) -> Option<&W> {
        let widget = self.panels.widget_ref(id)?;
        (widget as &dyn Any).downcast_ref::<W>()
    }

    /// Returns the panel's widget downcast to `W`, mutably.
    ///
    /// Returns `None` while the widget is running one of its own hooks.
    pub fn widget_mut<W: Widget>(&mut self, id: PanelId) -> Option<&mut W> {
        self.panels.validate(id);
        let widget = self.panels.widget[id.idx as usize].as_deref_mut()?;
        (widget as &mut dyn Any).downcast_mut::<W>()
    }

    /// Puts a lent widget back, unless the panel died or received a new
    /// widget in the meantime.
    pub(crate) fn restore_widget(&mut self, id: PanelId, widget: Box<dyn Widget>) {
        if self.panels.is_alive(id) {
            let slot = &mut self.panels.widget[id.idx as usize];
            if slot.is_none() {
                *slot = Some(widget);
            }
        }
    }

    /// Puts a lent layout back, unless the panel died or received a new
    /// layout in the meantime.
    pub(crate) fn restore_layout(&mut self, id: PanelId, layout: Box<dyn Layout>) {
        if self.panels.is_alive(id) {
            let slot = &mut self.panels.layout[id.idx as usize];
            if slot.is_none() {
                *slot = Some(layout);
            }
        }
    }
}

impl Drop for Compositor {
    fn drop(&mut self) {
        if let Some(mut renderer) = self.renderer.take() {
            renderer.shutdown(self);
        }
    }
}

fn collect_post_order(panels: &PanelStore, id: PanelId, out: &mut Vec<PanelId>) {
    for child in panels.children(id) {
        collect_post_order(panels, child, out);
    }
    out.push(id);
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Point;

    use super::*;
    use crate::panel::PanelFlags;

    #[test]
    fn new_compositor_has_sized_root() {
        let compositor = Compositor::new(640.0, 480.0);
        let root = compositor.root();
        assert_eq!(compositor.panels().size(root), Size::new(640.0, 480.0));
        assert_eq!(compositor.panels().parent(root), None);
        assert_eq!(compositor.hot(), None);
    }

    #[test]
    fn new_child_is_topmost() {
        let mut compositor = Compositor::new(100.0, 100.0);
        let root = compositor.root();
        let a = compositor.create_panel(root);
        let b = compositor.create_panel(root);
        let c = compositor.create_panel(root);
        assert_eq!(compositor.panels().zsorted(root), vec![c, b, a]);
        assert_eq!(compositor.panels().z_depth(c), 0);
        assert!(compositor.panels().z_depth(b) < compositor.panels().z_depth(a));
        assert_eq!(compositor.panels().children(root).collect::<Vec<_>>(), vec![a, b, c]);
    }

    #[test]
    fn add_child_reparents_and_raises() {
        let mut compositor = Compositor::new(100.0, 100.0);
        let root = compositor.root();
        let a = compositor.create_panel(root);
        let b = compositor.create_panel(root);
        let leaf = compositor.create_panel(a);
        assert_eq!(compositor.add_child(b, leaf), Ok(()));
        assert_eq!(compositor.panels().parent(leaf), Some(b));
        assert_eq!(compositor.panels().child_count(a), 0);

        assert_eq!(compositor.add_child(root, a), Ok(()));
        assert_eq!(compositor.panels().zsorted(root)[0], a);
    }

    #[test]
    fn add_child_rejects_cycles_and_root() {
        let mut compositor = Compositor::new(100.0, 100.0);
        let root = compositor.root();
        let a = compositor.create_panel(root);
        let b = compositor.create_panel(a);
        assert_eq!(
            compositor.add_child(b, a),
            Err(TreeError::Cycle { parent: b, child: a })
        );
        assert_eq!(
            compositor.add_child(a, a),
            Err(TreeError::Cycle { parent: a, child: a })
        );
        assert_eq!(compositor.add_child(a, root), Err(TreeError::Root));
        assert_eq!(compositor.panels().parent(a), Some(root));
        assert_eq!(compositor.panels().parent(b), Some(a));
    }

    #[test]
    fn add_child_reports_stale_handles() {
        let mut compositor = Compositor::new(100.0, 100.0);
        let root = compositor.root();
        let a = compositor.create_panel(root);
        compositor.destroy_panel(a);
        assert_eq!(compositor.add_child(root, a), Err(TreeError::Stale(a)));
    }

    #[test]
    fn destroy_removes_whole_subtree() {
        let mut compositor = Compositor::new(100.0, 100.0);
        let root = compositor.root();
        let a = compositor.create_panel(root);
        let b = compositor.create_panel(a);
        let c = compositor.create_panel(b);
        compositor.destroy_panel(a);
        for id in [a, b, c] {
            assert!(!compositor.panels().is_alive(id));
        }
        assert_eq!(compositor.panels().panel_count(), 1);
    }

    #[test]
    fn destroy_clears_interaction_state() {
        let mut compositor = Compositor::new(100.0, 100.0);
        let root = compositor.root();
        let window = compositor.create_panel(root);
        let inner = compositor.create_panel(window);
        compositor.panels_mut().set_size(window, Size::new(50.0, 50.0));
        compositor.panels_mut().set_size(inner, Size::new(20.0, 20.0));
        compositor.panels_mut().add_flags(inner, PanelFlags::CAN_MOVE);
        let _ = compositor.tick(0.0);

        compositor.cursor_move_absolute(5.0, 5.0);
        compositor.cursor_button(CursorButton::Left, true);
        assert_eq!(compositor.hot(), Some(inner));
        assert_eq!(compositor.focus(), Some(inner));
        assert_eq!(compositor.capture(), Some(inner));

        compositor.destroy_panel(window);
        assert_eq!(compositor.hot(), None);
        assert_eq!(compositor.focus(), None);
        assert_eq!(compositor.capture(), None);
        assert_eq!(compositor.capture_button(), CursorButton::None);

        // Input keeps working after the subtree is gone.
        compositor.cursor_move_absolute(6.0, 6.0);
        assert_eq!(compositor.hot(), Some(root));
    }

    #[test]
    fn destroying_dragged_panel_leaves_drop_target() {
        use crate::compositor::test_util::{Log, Recorder};
        use kurbo::Rect;

        let log = Log::default();
        let mut compositor = Compositor::new(200.0, 100.0);
        let root = compositor.root();
        let dock = compositor.create_widget_panel(root, Recorder::new("dock", &log));
        let item = compositor.create_widget_panel(root, Recorder::new("item", &log));
        let panels = compositor.panels_mut();
        panels.set_bounds(dock, Rect::new(100.0, 0.0, 200.0, 100.0));
        panels.set_bounds(item, Rect::new(0.0, 0.0, 20.0, 20.0));
        panels.add_flags(dock, PanelFlags::CAN_DROP);
        panels.add_flags(item, PanelFlags::CAN_MOVE);
        let _ = compositor.tick(0.0);

        compositor.cursor_move_absolute(10.0, 10.0);
        compositor.cursor_button(CursorButton::Left, true);
        compositor.cursor_move_absolute(150.0, 10.0);
        assert_eq!(compositor.drop_target(), Some(dock));
        log.clear();

        compositor.destroy_panel(item);
        assert_eq!(compositor.capture(), None);
        assert_eq!(compositor.drop_target(), None);
        assert_eq!(log.kinds("dock"), vec![EventKind::CursorDropExit]);

        // A later drag enters the dock afresh.
        let item = compositor.create_widget_panel(root, Recorder::new("item", &log));
        compositor.panels_mut().set_bounds(item, Rect::new(0.0, 0.0, 20.0, 20.0));
        compositor.panels_mut().add_flags(item, PanelFlags::CAN_MOVE);
        let _ = compositor.tick(0.0);
        compositor.cursor_button(CursorButton::Left, false);
        compositor.cursor_move_absolute(10.0, 10.0);
        compositor.cursor_button(CursorButton::Left, true);
        assert_eq!(compositor.capture(), Some(item));
        log.clear();
        compositor.cursor_move_absolute(150.0, 20.0);
        assert_eq!(log.kinds("dock"), vec![EventKind::CursorDropEnter]);
    }

    #[test]
    fn remove_child_keeps_orphan_alive_but_unreachable() {
        let mut compositor = Compositor::new(100.0, 100.0);
        let root = compositor.root();
        let a = compositor.create_panel(root);
        compositor.panels_mut().set_size(a, Size::new(100.0, 100.0));
        let _ = compositor.tick(0.0);
        compositor.cursor_move_absolute(10.0, 10.0);
        assert_eq!(compositor.hot(), Some(a));

        compositor.remove_child(a);
        assert!(compositor.panels().is_alive(a));
        assert_eq!(compositor.hot(), None);
        assert_eq!(compositor.find_panel_at_location(Point::new(10.0, 10.0), None), root);
    }

    #[test]
    fn clear_children_destroys_every_child() {
        let mut compositor = Compositor::new(100.0, 100.0);
        let root = compositor.root();
        let a = compositor.create_panel(root);
        let _ = compositor.create_panel(a);
        let _ = compositor.create_panel(a);
        compositor.clear_children(a);
        assert_eq!(compositor.panels().child_count(a), 0);
        assert_eq!(compositor.panels().panel_count(), 2);
    }

    #[test]
    fn typed_widget_access() {
        use crate::compositor::test_util::Counter;

        let mut compositor = Compositor::new(100.0, 100.0);
        let root = compositor.root();
        let id = compositor.create_widget_panel(root, Counter::default());
        assert!(compositor.widget::<Counter>(id).is_some());
        if let Some(counter) = compositor.widget_mut::<Counter>(id) {
            counter.count = 3;
        }
        let seen = compositor.with_widget(id, |w: &mut Counter, c| {
            w.count += 1;
            c.root()
        });
        assert_eq!(seen, Some(root));
        assert_eq!(compositor.widget::<Counter>(id).map(|c| c.count), Some(4));
        assert!(compositor.with_widget(root, |_: &mut Counter, _| ()).is_none());
    }

    #[test]
    #[should_panic(expected = "cannot destroy the root panel")]
    fn destroying_root_panics() {
        let mut compositor = Compositor::new(100.0, 100.0);
        let root = compositor.root();
        compositor.destroy_panel(root);
    }

    #[test]
    #[should_panic(expected = "panel already has a layout")]
    fn second_layout_panics() {
        let mut compositor = Compositor::new(100.0, 100.0);
        let root = compositor.root();
        compositor.set_layout(root, Box::new(crate::layout::BoxLayout::vertical()));
        compositor.set_layout(root, Box::new(crate::layout::BoxLayout::vertical()));
    }
}
