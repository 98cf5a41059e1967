// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal value slider.

use alloc::boxed::Box;

use kurbo::{Point, Rect, Size};
use lamina_core::renderer::Renderer;
use lamina_core::widget::{render_children, render_panel};
use lamina_core::{Compositor, Delegate, EventArgs, EventKind, PanelFlags, PanelId, Widget};
use lamina_render::{Color, CommandList};

use crate::to_compositor;

/// Horizontal inset of the travel range on each side.
const MARGIN: f64 = 4.0;
const HANDLE_COLOR: Color = Color::rgb(120, 120, 120);
const HANDLE_HOVER_COLOR: Color = Color::rgb(170, 170, 170);
const RAIL_COLOR: Color = Color::rgb(24, 24, 24);

/// A horizontal value picker over `0.0..=1.0`.
///
/// The handle is 5% of the slider's width and 60% of its height. Pressing
/// anywhere on the slider jumps the handle's centre to the cursor; dragging
/// follows it.
#[derive(Debug)]
pub struct Slider {
    handle: PanelId,
    value: f64,
    /// Fired with the new value whenever it changes.
    pub on_value_changed: Delegate<f64>,
}

impl Slider {
    /// Creates a slider panel with its handle under `parent`.
    pub fn create(compositor: &mut Compositor, parent: PanelId) -> PanelId {
        let id = compositor.create_panel(parent);
        let handle = compositor.create_panel(id);
        let panels = compositor.panels_mut();
        panels.add_flags(id, PanelFlags::CAN_MOVE);
        panels.remove_flags(handle, PanelFlags::CURSOR_ENABLED);
        panels.set_background_color(handle, HANDLE_COLOR);
        panels.set_name(handle, "slider handle");
        let _ = compositor.set_widget(
            id,
            Box::new(Self {
                handle,
                value: 0.0,
                on_value_changed: Delegate::new(),
            }),
        );
        id
    }

    /// Returns the handle panel.
    #[must_use]
    pub fn handle(&self) -> PanelId {
        self.handle
    }

    /// Returns the value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Sets the value, clamped to `0.0..=1.0`. The handle moves at the next
    /// update.
    pub fn set_value(&mut self, compositor: &mut Compositor, id: PanelId, value: f64) {
        let value = value.clamp(0.0, 1.0);
        if value != self.value {
            self.value = value;
            self.on_value_changed.invoke(compositor, id, value);
        }
    }

    fn handle_width(size: Size) -> f64 {
        size.width * 0.05
    }

    fn usable(size: Size) -> f64 {
        (size.width - 2.0 * MARGIN - Self::handle_width(size)).max(0.0)
    }

    fn pick(&mut self, compositor: &mut Compositor, id: PanelId, local: Point) {
        let size = compositor.panels().size(id);
        let usable = Self::usable(size);
        if usable <= 0.0 {
            return;
        }
        let x = local.x - Self::handle_width(size) * 0.5 - MARGIN;
        self.set_value(compositor, id, x / usable);
    }
}

impl Widget for Slider {
    fn update(&mut self, compositor: &mut Compositor, id: PanelId, _: f64) {
        let size = compositor.panels().size(id);
        let handle = Size::new(Self::handle_width(size), size.height * 0.6);
        let x = MARGIN + Self::usable(size) * self.value;
        let y = (size.height - handle.height) * 0.5;
        compositor
            .panels_mut()
            .set_bounds(self.handle, Rect::from_origin_size((x, y), handle));
    }

    fn render(
        &self,
        compositor: &Compositor,
        id: PanelId,
        renderer: &mut dyn Renderer,
        list: &mut CommandList,
    ) {
        render_panel(compositor, id, list);
        let size = compositor.panels().size(id);
        let y = size.height * 0.5;
        list.add_line(
            to_compositor(compositor, id, Point::new(MARGIN, y)),
            to_compositor(compositor, id, Point::new(size.width - MARGIN, y)),
            RAIL_COLOR,
            2.0,
        );
        render_children(compositor, id, renderer, list);
    }

    fn handle_event(&mut self, compositor: &mut Compositor, id: PanelId, args: &mut EventArgs) {
        if args.sender != Some(id) {
            return;
        }
        match args.kind {
            EventKind::CursorButtonPressed => self.pick(compositor, id, args.local),
            EventKind::CursorDrag => {
                self.pick(compositor, id, args.local);
                args.handled = true;
            }
            EventKind::CursorMove => {
                let over = compositor.panels().bounds(self.handle).contains(args.local);
                let color = if over { HANDLE_HOVER_COLOR } else { HANDLE_COLOR };
                compositor.panels_mut().set_background_color(self.handle, color);
            }
            EventKind::CursorExit => {
                compositor
                    .panels_mut()
                    .set_background_color(self.handle, HANDLE_COLOR);
            }
            _ => {}
        }
    }
}
