// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widget contract and the base panel behaviours.
//!
//! A panel with no widget behaves as a plain panel: it paints its
//! background, paints its children back to front, and moves when dragged.
//! Concrete controls implement [`Widget`] and override the hooks they need.
//! The free functions [`render_panel`], [`render_children`], and
//! [`handle_panel_event`] are the base behaviours, so an overriding widget
//! can still run them around its own work.

use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use kurbo::Point;
use lamina_render::{Color, CommandList};

use crate::compositor::Compositor;
use crate::event::{EventArgs, EventKind};
use crate::panel::{PanelFlags, PanelId};
use crate::renderer::Renderer;

/// Behaviour attached to a panel.
///
/// Every method has a default that reproduces the plain panel, and every
/// method receives the panel's own handle so the widget can read and write
/// its geometry through the compositor.
///
/// While one of the `&mut self` hooks runs, the widget is lent out of the
/// arena: [`Compositor::widget_mut`] returns `None` for its panel until the
/// hook returns.
pub trait Widget: Any {
    /// Advances per-frame state. Called once per tick before layout.
    fn update(&mut self, compositor: &mut Compositor, id: PanelId, dt: f64) {
        _ = (compositor, id, dt);
    }

    /// Appends this panel, and usually its children, to `list`.
    fn render(
        &self,
        compositor: &Compositor,
        id: PanelId,
        renderer: &mut dyn Renderer,
        list: &mut CommandList,
    ) {
        render_panel(compositor, id, list);
        render_children(compositor, id, renderer, list);
    }

    /// Handles an event on its way to the target. Set `args.handled` to stop
    /// propagation.
    fn handle_event(&mut self, compositor: &mut Compositor, id: PanelId, args: &mut EventArgs) {
        handle_panel_event(compositor, id, args);
    }

    /// Returns whether a local-space point hits this panel.
    fn hit_test_local(&self, compositor: &Compositor, id: PanelId, local: Point) -> bool {
        compositor.panels().hit_test_local(id, local)
    }

    /// Returns whether a press at `local` may start a drag capture.
    fn point_in_capture_rect(&self, compositor: &Compositor, id: PanelId, local: Point) -> bool {
        compositor.panels().point_in_capture_rect(id, local)
    }

    /// Whether a press raises this panel among its siblings.
    fn can_send_to_front(&self) -> bool {
        false
    }
}

/// Paints the panel's background quad and, if set, its background texture.
pub fn render_panel(compositor: &Compositor, id: PanelId, list: &mut CommandList) {
    let panels = compositor.panels();
    let quad = panels.geometry(id);
    let color = panels.background_color(id);
    if color.a != 0 {
        list.add_rectangle(&quad, lamina_render::TextureHandle::INVALID, color);
    }
    let texture = panels.background(id);
    if texture.is_valid() {
        list.add_rectangle(&quad, texture, Color::WHITE);
    }
}

/// Paints the visible children of `id` back to front.
pub fn render_children(
    compositor: &Compositor,
    id: PanelId,
    renderer: &mut dyn Renderer,
    list: &mut CommandList,
) {
    let panels = compositor.panels();
    for child in panels.zsorted(id).into_iter().rev() {
        if panels.is_visible(child) {
            render_subtree(compositor, child, renderer, list);
        }
    }
}

/// Paints `id` through its widget, or as a plain panel without one.
pub fn render_subtree(
    compositor: &Compositor,
    id: PanelId,
    renderer: &mut dyn Renderer,
    list: &mut CommandList,
) {
    match compositor.panels().widget_ref(id) {
        Some(widget) => widget.render(compositor, id, renderer, list),
        None => {
            render_panel(compositor, id, list);
            render_children(compositor, id, renderer, list);
        }
    }
}

/// The plain panel's event handling: a captured, movable, non-root panel
/// follows drags.
pub fn handle_panel_event(compositor: &mut Compositor, id: PanelId, args: &mut EventArgs) {
    if args.kind != EventKind::CursorDrag || args.capture != Some(id) {
        return;
    }
    let panels = compositor.panels_mut();
    if panels.parent(id).is_none() || !panels.has_flags(id, PanelFlags::CAN_MOVE) {
        return;
    }
    let origin = panels.origin(id) + args.delta;
    panels.set_origin(id, origin);
    args.handled = true;
}

/// A single-subscriber callback slot.
///
/// Widgets expose delegates (`on_click`, `on_value_changed`, ...) that the
/// application connects to. The callback receives the compositor and the
/// panel that fired it.
pub struct Delegate<T> {
    callback: Option<Box<dyn FnMut(&mut Compositor, PanelId, T)>>,
}

impl<T> Default for Delegate<T> {
    fn default() -> Self {
        Self { callback: None }
    }
}

impl<T> fmt::Debug for Delegate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegate")
            .field("connected", &self.is_connected())
            .finish()
    }
}

impl<T> Delegate<T> {
    /// Creates a disconnected delegate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects `callback`, replacing any previous one.
    pub fn connect<F>(&mut self, callback: F)
    where
        F: FnMut(&mut Compositor, PanelId, T) + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    /// Removes the callback.
    pub fn disconnect(&mut self) {
        self.callback = None;
    }

    /// Returns whether a callback is connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.callback.is_some()
    }

    /// Calls the callback, if connected.
    pub fn invoke(&mut self, compositor: &mut Compositor, id: PanelId, value: T) {
        if let Some(callback) = &mut self.callback {
            callback(compositor, id, value);
        }
    }
}
