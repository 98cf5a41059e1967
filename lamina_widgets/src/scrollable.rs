// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text panel that scrolls its content with a vertical scrollbar.

use alloc::boxed::Box;
use alloc::string::String;

use kurbo::{Rect, Size, Vec2};
use lamina_core::layout::Direction;
use lamina_core::renderer::Renderer;
use lamina_core::{Compositor, EventArgs, EventKind, PanelId, Widget};
use lamina_render::CommandList;

use crate::{Label, Scrollbar};

/// Width of the vertical scrollbar along the right edge.
pub const SCROLL_BAR_WIDTH: f64 = 12.0;

/// A label whose text scrolls vertically when it overflows the panel.
///
/// The scrollbar appears only while the text is taller than the panel, with
/// a thumb proportional to the visible fraction. The wheel scrolls by one
/// line per notch.
#[derive(Debug)]
pub struct ScrollablePanel {
    label: Label,
    bar: PanelId,
    scroll_offset: f64,
}

impl ScrollablePanel {
    /// Creates a scrollable text panel, with its scrollbar, under `parent`.
    pub fn create(compositor: &mut Compositor, parent: PanelId, text: impl Into<String>) -> PanelId {
        let id = compositor.create_panel(parent);
        let bar = Scrollbar::create(compositor, id, Direction::Vertical);
        compositor.panels_mut().set_visible(bar, false);
        let _ = compositor.set_widget(
            id,
            Box::new(Self {
                label: Label::new(text),
                bar,
                scroll_offset: 0.0,
            }),
        );
        id
    }

    /// Returns the text.
    #[must_use]
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Returns the text, mutably.
    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    /// Returns the scrollbar panel.
    #[must_use]
    pub fn scrollbar(&self) -> PanelId {
        self.bar
    }

    /// Returns how far the text is scrolled, in pixels.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Scrolls to the last line. Takes effect at the next update.
    pub fn scroll_to_bottom(&mut self, compositor: &mut Compositor) {
        let bar = self.bar;
        compositor.with_widget(bar, |s: &mut Scrollbar, c| s.set_scroll_value(c, bar, 1.0));
    }

    fn overflow(&self, compositor: &Compositor, id: PanelId) -> f64 {
        self.label.text_size().height - compositor.panels().size(id).height
    }
}

impl Widget for ScrollablePanel {
    fn update(&mut self, compositor: &mut Compositor, id: PanelId, _: f64) {
        self.label.measure(compositor);
        let size = compositor.panels().size(id);
        let content = self.label.text_size().height;
        let overflow = self.overflow(compositor, id);
        let bar = self.bar;

        if overflow <= 0.0 {
            compositor.panels_mut().set_visible(bar, false);
            self.scroll_offset = 0.0;
            return;
        }
        compositor.panels_mut().set_bounds(
            bar,
            Rect::new(size.width - SCROLL_BAR_WIDTH, 0.0, size.width, size.height),
        );
        let thumb = Size::new(SCROLL_BAR_WIDTH, size.height * size.height / content);
        let value = compositor.with_widget(bar, |s: &mut Scrollbar, c| {
            s.set_button_size(c, bar, thumb);
            s.scroll_value()
        });
        compositor.panels_mut().set_visible(bar, true);
        self.scroll_offset = value.unwrap_or(0.0) * overflow;
    }

    fn render(
        &self,
        compositor: &Compositor,
        id: PanelId,
        renderer: &mut dyn Renderer,
        list: &mut CommandList,
    ) {
        self.label
            .render_scrolled(compositor, id, renderer, list, Vec2::new(0.0, self.scroll_offset));
    }

    fn handle_event(&mut self, compositor: &mut Compositor, id: PanelId, args: &mut EventArgs) {
        if args.sender != Some(id) || args.kind != EventKind::CursorScroll {
            return;
        }
        let overflow = self.overflow(compositor, id);
        if overflow <= 0.0 {
            return;
        }
        let offset = self.scroll_offset - f64::from(args.wheel) * self.label.line_height();
        let offset = offset.clamp(0.0, overflow);
        self.scroll_offset = offset;
        let bar = self.bar;
        compositor.with_widget(bar, |s: &mut Scrollbar, c| {
            s.set_scroll_value(c, bar, offset / overflow);
        });
        args.handled = true;
    }
}
