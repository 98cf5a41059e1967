// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clickable text button.

use alloc::string::String;

use kurbo::Point;
use lamina_core::renderer::Renderer;
use lamina_core::widget::render_children;
use lamina_core::{Compositor, CursorButton, Delegate, EventArgs, EventKind, PanelId, Widget};
use lamina_render::{Color, CommandList, TextureHandle};

use crate::Label;

/// Background while the cursor is over the button.
const DEFAULT_HOVER: Color = Color::rgb(96, 96, 96);

/// A centred text label that fires on a left click.
///
/// A click is a left press followed by a left release while the button is
/// still hot. On a click the button queues a [`EventKind::Click`] event for
/// the application listener and then invokes [`on_click`](Self::on_click).
#[derive(Debug)]
pub struct Button {
    label: Label,
    hover_color: Color,
    text_origin: Point,
    /// Fired after the `Click` event is queued.
    pub on_click: Delegate<()>,
}

impl Button {
    /// Creates a button captioned `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            label: Label::new(text),
            hover_color: DEFAULT_HOVER,
            text_origin: Point::ZERO,
            on_click: Delegate::new(),
        }
    }

    /// Creates a button panel under `parent`.
    pub fn create(compositor: &mut Compositor, parent: PanelId, text: impl Into<String>) -> PanelId {
        compositor.create_widget_panel(parent, Self::new(text))
    }

    /// Returns the caption.
    #[must_use]
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Returns the caption, mutably.
    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    /// Sets the background used while hot.
    pub fn set_hover_color(&mut self, color: Color) {
        self.hover_color = color;
    }
}

impl Widget for Button {
    fn update(&mut self, compositor: &mut Compositor, id: PanelId, _: f64) {
        self.label.measure(compositor);
        let free = compositor.panels().size(id) - self.label.text_size();
        self.text_origin = Point::new(free.width * 0.5, free.height * 0.5);
    }

    fn render(
        &self,
        compositor: &Compositor,
        id: PanelId,
        renderer: &mut dyn Renderer,
        list: &mut CommandList,
    ) {
        let panels = compositor.panels();
        let background = if compositor.hot() == Some(id) {
            self.hover_color
        } else {
            panels.background_color(id)
        };
        let quad = panels.geometry(id);
        list.add_rectangle(&quad, TextureHandle::INVALID, background);
        list.push_clip_rect(panels.screen_bounds(id));
        let color = panels.foreground_color(id);
        self.label
            .render_text(compositor, id, renderer, list, self.text_origin, color);
        list.pop_clip_rect();
        render_children(compositor, id, renderer, list);
    }

    fn handle_event(&mut self, compositor: &mut Compositor, id: PanelId, args: &mut EventArgs) {
        if args.sender != Some(id) || args.cursor_button != CursorButton::Left {
            return;
        }
        match args.kind {
            EventKind::CursorButtonPressed => {
                compositor.set_focus(Some(id));
                args.handled = true;
            }
            EventKind::CursorButtonReleased if compositor.hot() == Some(id) => {
                let mut click = *args;
                click.kind = EventKind::Click;
                click.handled = false;
                let _ = compositor.queue_event(click);
                self.on_click.invoke(compositor, id, ());
                args.handled = true;
            }
            _ => {}
        }
    }
}
