// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-channel line graph over a fixed window of samples.

use alloc::boxed::Box;
use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use kurbo::Point;
use lamina_core::renderer::Renderer;
use lamina_core::widget::render_panel;
use lamina_core::{Compositor, PanelFlags, PanelId, Widget};
use lamina_render::{Color, CommandList};

use crate::label::Font;
use crate::to_compositor;

/// Inset of the value labels from the left edge.
const TEXT_MARGIN: f64 = 2.0;

#[derive(Clone, Debug)]
struct Channel {
    values: Vec<f64>,
    next: usize,
    len: usize,
    color: Color,
}

impl Channel {
    fn new(samples: usize) -> Self {
        Self {
            values: vec![0.0; samples],
            next: 0,
            len: 0,
            color: Color::WHITE,
        }
    }

    fn push(&mut self, value: f64) {
        let capacity = self.values.len();
        if capacity == 0 {
            return;
        }
        self.values[self.next] = value;
        self.next = (self.next + 1) % capacity;
        self.len = (self.len + 1).min(capacity);
    }

    /// Recorded values, oldest first.
    fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let capacity = self.values.len();
        let start = (self.next + capacity - self.len) % capacity.max(1);
        (0..self.len).map(move |i| self.values[(start + i) % capacity])
    }
}

/// Rolling line plots, one per channel.
///
/// Each channel keeps the last `samples` recorded values in a ring buffer.
/// The plot scrolls as values are recorded, not with time: the oldest
/// sample sits on the left edge and each newer sample is one
/// `width / samples` step to the right.
#[derive(Debug)]
pub struct Graph {
    samples: usize,
    channels: Vec<Channel>,
    range: (f64, f64),
    baseline: Option<(f64, Color)>,
    font: Font,
}

impl Graph {
    /// Creates a graph with no channels.
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: 0,
            channels: Vec::new(),
            range: (0.0, 1.0),
            baseline: None,
            font: Font::default(),
        }
    }

    /// Creates a movable graph panel under `parent`.
    pub fn create(compositor: &mut Compositor, parent: PanelId) -> PanelId {
        let id = compositor.create_panel(parent);
        let panels = compositor.panels_mut();
        panels.add_flags(id, PanelFlags::CAN_MOVE);
        panels.set_background_color(id, Color::BLACK);
        let _ = compositor.set_widget(id, Box::new(Self::new()));
        id
    }

    /// Discards all data and allocates `channels` ring buffers of `samples`
    /// values each.
    pub fn configure_channels(&mut self, samples: usize, channels: usize) {
        self.samples = samples;
        self.channels = vec![Channel::new(samples); channels];
    }

    /// Returns the number of channels.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Sets the line color of `channel`. Out-of-range channels are ignored.
    pub fn configure_channel(&mut self, channel: usize, color: Color) {
        if let Some(c) = self.channels.get_mut(channel) {
            c.color = color;
        }
    }

    /// Returns the line color of `channel`.
    #[must_use]
    pub fn channel_color(&self, channel: usize) -> Option<Color> {
        self.channels.get(channel).map(|c| c.color)
    }

    /// Appends a value to `channel`, overwriting its oldest value once the
    /// buffer is full. Out-of-range channels are ignored.
    pub fn record_value(&mut self, channel: usize, value: f64) {
        match self.channels.get_mut(channel) {
            Some(c) => c.push(value),
            None => log::trace!("record_value on missing channel {channel}"),
        }
    }

    /// Returns the recorded values of `channel`, oldest first.
    #[must_use]
    pub fn samples(&self, channel: usize) -> Vec<f64> {
        self.channels
            .get(channel)
            .map(|c| c.iter().collect())
            .unwrap_or_default()
    }

    /// Sets the values mapped to the bottom and top edges.
    pub fn set_range(&mut self, min: f64, max: f64) {
        self.range = (min, max);
    }

    /// Returns the plotted value range.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Draws a labelled horizontal line at `value`.
    pub fn set_baseline(&mut self, value: f64, color: Color) {
        self.baseline = Some((value, color));
    }

    /// Removes the baseline.
    pub fn disable_baseline(&mut self) {
        self.baseline = None;
    }

    /// Loads the font used for the range and baseline labels.
    pub fn set_font(&mut self, compositor: &mut Compositor, filename: &str, pixel_size: u16) -> bool {
        match Font::load(compositor, filename, pixel_size) {
            Some(font) => {
                self.font = font;
                true
            }
            None => false,
        }
    }

    /// Maps a value to a local y coordinate, or `None` for an empty range.
    fn value_y(&self, value: f64, height: f64) -> Option<f64> {
        let (min, max) = self.range;
        let span = max - min;
        (span > 0.0).then(|| height - (value - min) / span * height)
    }

    fn draw_value(
        &self,
        compositor: &Compositor,
        id: PanelId,
        renderer: &mut dyn Renderer,
        list: &mut CommandList,
        value: f64,
        local: Point,
    ) {
        if !self.font.is_valid() {
            return;
        }
        let color = compositor.panels().foreground_color(id);
        let text = format!("{value:.2}");
        self.font
            .draw(renderer, list, to_compositor(compositor, id, local), &text, color);
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Graph {
    fn render(
        &self,
        compositor: &Compositor,
        id: PanelId,
        renderer: &mut dyn Renderer,
        list: &mut CommandList,
    ) {
        render_panel(compositor, id, list);
        let size = compositor.panels().size(id);
        let line_height = self.font.line_height;

        if let Some((value, color)) = self.baseline
            && let Some(y) = self.value_y(value, size.height)
        {
            list.add_line(
                to_compositor(compositor, id, Point::new(0.0, y)),
                to_compositor(compositor, id, Point::new(size.width, y)),
                color,
                1.0,
            );
            let at = Point::new(TEXT_MARGIN, y - line_height);
            self.draw_value(compositor, id, renderer, list, value, at);
        }

        if self.samples > 0 {
            #[expect(
                clippy::cast_precision_loss,
                reason = "sample counts are far below 2^52"
            )]
            let dx = size.width / self.samples as f64;
            let mut points = Vec::with_capacity(self.samples);
            for channel in &self.channels {
                points.clear();
                let mut x = 0.0;
                for value in channel.iter() {
                    if let Some(y) = self.value_y(value, size.height) {
                        points.push(to_compositor(compositor, id, Point::new(x, y)));
                    }
                    x += dx;
                }
                list.add_lines(&points, channel.color, 1.0);
            }
        }

        let (min, max) = self.range;
        self.draw_value(compositor, id, renderer, list, max, Point::new(TEXT_MARGIN, 2.0));
        let bottom = Point::new(TEXT_MARGIN, size.height - line_height - 4.0);
        self.draw_value(compositor, id, renderer, list, min, bottom);
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;
    use lamina_harness::headless_compositor;
    use lamina_render::DrawType;

    use super::*;

    #[test]
    fn ring_keeps_the_newest_samples() {
        let mut graph = Graph::new();
        graph.configure_channels(3, 2);
        for v in 1..=5 {
            graph.record_value(0, f64::from(v));
        }
        graph.record_value(1, 9.0);
        graph.record_value(2, 1.0);
        assert_eq!(graph.samples(0), [3.0, 4.0, 5.0]);
        assert_eq!(graph.samples(1), [9.0]);
        assert!(graph.samples(2).is_empty());
    }

    #[test]
    fn channel_colors() {
        let mut graph = Graph::new();
        graph.configure_channels(4, 1);
        graph.configure_channel(0, Color::rgb(255, 0, 0));
        graph.configure_channel(5, Color::BLACK);
        assert_eq!(graph.channel_color(0), Some(Color::rgb(255, 0, 0)));
        assert_eq!(graph.channel_color(5), None);
    }

    #[test]
    fn renders_background_baseline_plots_and_labels() {
        let (mut compositor, log) = headless_compositor(200.0, 200.0);
        let root = compositor.root();
        let id = Graph::create(&mut compositor, root);
        compositor
            .panels_mut()
            .set_bounds(id, Rect::new(0.0, 0.0, 100.0, 50.0));
        compositor.with_widget(id, |g: &mut Graph, c| {
            assert!(g.set_font(c, "fonts/mono.ttf", 16));
            g.configure_channels(10, 2);
            g.set_range(-1.0, 1.0);
            g.set_baseline(0.0, Color::rgb(0, 255, 0));
            for v in [0.0, 0.5, -0.5] {
                g.record_value(0, v);
                g.record_value(1, -v);
            }
        });
        compositor.draw();

        let frame = log.last_frame().expect("a frame was submitted");
        let kinds: Vec<DrawType> = frame.commands().iter().map(|c| c.draw_type).collect();
        assert_eq!(
            kinds,
            [
                DrawType::Generic, // background
                DrawType::Generic, // baseline
                DrawType::Font,    // "0.00"
                DrawType::Generic, // channel 0
                DrawType::Generic, // channel 1
                DrawType::Font,    // "1.00"
                DrawType::Font,    // "-1.00"
            ]
        );
        // Two segments of six vertices each.
        assert_eq!(frame.commands()[3].vertex_count, 12);
    }

    #[test]
    fn empty_range_draws_no_plot() {
        let (mut compositor, log) = headless_compositor(200.0, 200.0);
        let root = compositor.root();
        let id = Graph::create(&mut compositor, root);
        compositor.panels_mut().set_size(id, kurbo::Size::new(100.0, 50.0));
        compositor.with_widget(id, |g: &mut Graph, _| {
            g.configure_channels(4, 1);
            g.set_range(1.0, 1.0);
            g.record_value(0, 1.0);
            g.record_value(0, 2.0);
        });
        compositor.draw();
        assert_eq!(log.last_frame().map(|f| f.commands().len()), Some(1));
    }
}
