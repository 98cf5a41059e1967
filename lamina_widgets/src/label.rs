// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static multi-line text.

use alloc::string::String;

use kurbo::{Point, Rect, Size, Vec2};
use lamina_core::renderer::Renderer;
use lamina_core::widget::{render_children, render_panel};
use lamina_core::{Compositor, PanelId, Widget};
use lamina_render::{Color, CommandList, FontHandle, TextureHandle};

use crate::to_compositor;

/// Lines of text drawn over the panel background.
///
/// Text is split on `'\n'` and each line is submitted as its own font
/// command, clipped to the panel. The text size is re-measured on every
/// update through the installed renderer.
#[derive(Debug, Default)]
pub struct Label {
    text: String,
    font: Font,
    text_size: Size,
}

/// A loaded font with its atlas texture and line height.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Font {
    pub(crate) handle: FontHandle,
    pub(crate) texture: TextureHandle,
    pub(crate) line_height: f64,
}

impl Font {
    /// Loads `filename` at `pixel_size` through the compositor's resource
    /// cache, or returns `None`.
    pub(crate) fn load(compositor: &mut Compositor, filename: &str, pixel_size: u16) -> Option<Self> {
        let Some(resources) = compositor.resources() else {
            log::debug!("loading {filename} without a resource cache");
            return None;
        };
        let handle = resources.create_font(filename, pixel_size);
        if !handle.is_valid() {
            log::debug!("font {filename} at {pixel_size}px failed to load");
            return None;
        }
        let texture = resources.texture_for_font(handle);
        let line_height = compositor
            .renderer()
            .map_or(f64::from(pixel_size), |r| r.font_metrics(handle).line_height);
        Some(Self {
            handle,
            texture,
            line_height,
        })
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.handle.is_valid()
    }

    /// Appends `text` as one font command with its top-left at `at`, in
    /// compositor space.
    pub(crate) fn draw(
        &self,
        renderer: &mut dyn Renderer,
        list: &mut CommandList,
        at: Point,
        text: &str,
        color: Color,
    ) {
        let width = renderer.font_measure_string(self.handle, text).width();
        let bounds = Rect::from_origin_size(at, Size::new(width, self.line_height));
        list.add_font(renderer, self.handle, text, bounds, self.texture, color);
    }
}

impl Label {
    /// Creates a label showing `text`. Call [`set_font`](Self::set_font)
    /// before it can draw anything.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Creates a label panel under `parent`.
    pub fn create(compositor: &mut Compositor, parent: PanelId, text: impl Into<String>) -> PanelId {
        compositor.create_widget_panel(parent, Self::new(text))
    }

    /// Returns the text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Appends to the text.
    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Returns the font handle.
    #[must_use]
    pub fn font(&self) -> FontHandle {
        self.font.handle
    }

    /// Loads `filename` at `pixel_size` through the compositor's resource
    /// cache.
    ///
    /// Returns whether the font loaded. On failure the previous font stays;
    /// a label that never loaded one draws only its background.
    pub fn set_font(&mut self, compositor: &mut Compositor, filename: &str, pixel_size: u16) -> bool {
        match Font::load(compositor, filename, pixel_size) {
            Some(font) => {
                self.font = font;
                true
            }
            None => false,
        }
    }

    /// Returns the distance between lines.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.font.line_height
    }

    /// Returns the size of the text as of the last update.
    #[must_use]
    pub fn text_size(&self) -> Size {
        self.text_size
    }

    /// Re-measures the text through the installed renderer.
    pub fn measure(&mut self, compositor: &mut Compositor) {
        if !self.font.is_valid() {
            self.text_size = Size::ZERO;
            return;
        }
        let Some(renderer) = compositor.renderer() else {
            return;
        };
        let mut width: f64 = 0.0;
        let mut lines = 0_u32;
        for line in self.text.split('\n') {
            width = width.max(renderer.font_measure_string(self.font.handle, line).width());
            lines += 1;
        }
        self.text_size = Size::new(width, f64::from(lines) * self.font.line_height);
    }

    /// Appends one font command per line, starting at `origin` in the
    /// panel's local space.
    pub fn render_text(
        &self,
        compositor: &Compositor,
        id: PanelId,
        renderer: &mut dyn Renderer,
        list: &mut CommandList,
        origin: Point,
        color: Color,
    ) {
        if !self.font.is_valid() {
            return;
        }
        let mut pen = origin;
        for line in self.text.split('\n') {
            if !line.is_empty() {
                let at = to_compositor(compositor, id, pen);
                self.font.draw(renderer, list, at, line, color);
            }
            pen += Vec2::new(0.0, self.font.line_height);
        }
    }

    /// Draws background, clipped text offset by `scroll`, and children.
    pub(crate) fn render_scrolled(
        &self,
        compositor: &Compositor,
        id: PanelId,
        renderer: &mut dyn Renderer,
        list: &mut CommandList,
        scroll: Vec2,
    ) {
        render_panel(compositor, id, list);
        list.push_clip_rect(compositor.panels().screen_bounds(id));
        let color = compositor.panels().foreground_color(id);
        self.render_text(compositor, id, renderer, list, Point::ZERO - scroll, color);
        list.pop_clip_rect();
        render_children(compositor, id, renderer, list);
    }
}

impl Widget for Label {
    fn update(&mut self, compositor: &mut Compositor, _: PanelId, _: f64) {
        self.measure(compositor);
    }

    fn render(
        &self,
        compositor: &Compositor,
        id: PanelId,
        renderer: &mut dyn Renderer,
        list: &mut CommandList,
    ) {
        self.render_scrolled(compositor, id, renderer, list, Vec2::ZERO);
    }
}
