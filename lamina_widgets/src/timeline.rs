// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame timeline with a draggable scrubber.

use alloc::boxed::Box;

use kurbo::{Point, Rect, Size, Vec2};
use lamina_core::renderer::Renderer;
use lamina_core::widget::render_children;
use lamina_core::{Compositor, Delegate, EventArgs, EventKind, PanelFlags, PanelId, Widget};
use lamina_render::{Color, CommandList, TextureHandle};

use crate::local_quad;

const BACKGROUND: Color = Color::rgb(64, 64, 64);
const FRAME_COLOR: Color = Color::rgb(96, 96, 96);
const SCRUBBER_HIGHLIGHT: Color = Color::rgba(255, 128, 0, 32);
const SCRUBBER_OUTLINE: Color = Color::rgba(255, 128, 0, 192);

/// The highlighted frame of a [`Timeline`].
///
/// Only a press that actually hits the scrubber can start a capture on it.
/// Drags are consumed by the owning timeline, so the scrubber never moves
/// itself.
#[derive(Debug, Default)]
pub struct TimelineScrubber;

impl Widget for TimelineScrubber {
    fn render(
        &self,
        compositor: &Compositor,
        id: PanelId,
        _: &mut dyn Renderer,
        list: &mut CommandList,
    ) {
        let quad = compositor.panels().geometry(id);
        list.add_rectangle(&quad, TextureHandle::INVALID, SCRUBBER_HIGHLIGHT);
        for i in 0..4 {
            list.add_line(quad[i], quad[(i + 1) % 4], SCRUBBER_OUTLINE, 1.0);
        }
    }

    fn handle_event(&mut self, _: &mut Compositor, _: PanelId, _: &mut EventArgs) {}

    fn point_in_capture_rect(&self, compositor: &Compositor, id: PanelId, local: Point) -> bool {
        self.hit_test_local(compositor, id, local)
    }
}

/// A horizontal frame ruler with a scrubber marking the current frame.
///
/// Pressing anywhere on the timeline captures the cursor to the scrubber
/// and snaps it to the frame under the cursor; dragging keeps snapping.
#[derive(Debug)]
pub struct Timeline {
    scrubber: PanelId,
    lower: i32,
    upper: i32,
    total_frames: usize,
    current_frame: usize,
    frame_width: f64,
    /// Fired with the new frame index whenever the scrubber changes frame.
    pub on_scrubber_changed: Delegate<usize>,
}

impl Timeline {
    /// Creates a timeline panel with its scrubber under `parent`.
    pub fn create(compositor: &mut Compositor, parent: PanelId) -> PanelId {
        let id = compositor.create_panel(parent);
        let scrubber = compositor.create_widget_panel(id, TimelineScrubber);
        let panels = compositor.panels_mut();
        panels.set_name(id, "Timeline");
        panels.set_name(scrubber, "TimelineScrubber");
        panels.add_flags(scrubber, PanelFlags::CAN_MOVE);
        let _ = compositor.set_widget(
            id,
            Box::new(Self {
                scrubber,
                lower: 0,
                upper: 1,
                total_frames: 1,
                current_frame: 0,
                frame_width: 0.0,
                on_scrubber_changed: Delegate::new(),
            }),
        );
        id
    }

    /// Returns the scrubber panel.
    #[must_use]
    pub fn scrubber(&self) -> PanelId {
        self.scrubber
    }

    /// Sets the frame range to `lower..upper`.
    ///
    /// # Panics
    ///
    /// Panics if `upper` is not greater than `lower`.
    pub fn set_frame_range(&mut self, lower: i32, upper: i32) {
        assert!(upper > lower, "empty frame range {lower}..{upper}");
        self.lower = lower;
        self.upper = upper;
        self.total_frames = upper.abs_diff(lower) as usize;
        self.frame_width = 0.0;
    }

    /// Returns the frame range.
    #[must_use]
    pub fn frame_range(&self) -> (i32, i32) {
        (self.lower, self.upper)
    }

    /// Moves the scrubber to `frame`, relative to the lower limit. Takes
    /// effect at the next update.
    pub fn set_frame(&mut self, frame: usize) {
        self.current_frame = frame.min(self.total_frames - 1);
    }

    /// Returns the current frame, relative to the lower limit.
    #[must_use]
    pub fn frame(&self) -> usize {
        self.current_frame
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "snapping to a frame truncates toward zero and negatives clamp to frame 0"
    )]
    fn frame_at(&self, x: f64) -> usize {
        let frame = ((x.trunc() - 1.0) / self.frame_width).trunc();
        if frame <= 0.0 {
            0
        } else {
            (frame as usize).min(self.total_frames - 1)
        }
    }
}

impl Widget for Timeline {
    fn update(&mut self, compositor: &mut Compositor, id: PanelId, _: f64) {
        let size = compositor.panels().size(id);
        #[expect(
            clippy::cast_precision_loss,
            reason = "frame counts are far below 2^52"
        )]
        let total = self.total_frames as f64;
        self.frame_width = size.width / total;
        #[expect(clippy::cast_precision_loss, reason = "as above")]
        let x = self.current_frame as f64 * self.frame_width;
        compositor.panels_mut().set_bounds(
            self.scrubber,
            Rect::from_origin_size((x, 0.0), Size::new(self.frame_width, size.height)),
        );
    }

    fn render(
        &self,
        compositor: &Compositor,
        id: PanelId,
        renderer: &mut dyn Renderer,
        list: &mut CommandList,
    ) {
        let panels = compositor.panels();
        let quad = panels.geometry(id);
        list.add_rectangle(&quad, TextureHandle::INVALID, BACKGROUND);
        list.add_line(quad[3], quad[2], Color::BLACK, 1.0);

        let size = panels.size(id);
        let block_size = Size::new(self.frame_width - 4.0, size.height - 2.0);
        let mut block = Rect::from_origin_size((2.0, 1.0), block_size);
        for _ in 0..self.total_frames {
            if block.x1 >= size.width || block.width() <= 0.0 {
                break;
            }
            let quad = local_quad(compositor, id, block);
            list.add_rectangle(&quad, TextureHandle::INVALID, FRAME_COLOR);
            block = block + Vec2::new(self.frame_width, 0.0);
        }

        render_children(compositor, id, renderer, list);
    }

    fn handle_event(&mut self, compositor: &mut Compositor, id: PanelId, args: &mut EventArgs) {
        if args.sender != Some(id) {
            return;
        }
        if !matches!(args.kind, EventKind::CursorButtonPressed | EventKind::CursorDrag) {
            return;
        }
        if args.kind == EventKind::CursorButtonPressed {
            compositor.set_capture(self.scrubber, args.cursor_button);
        }
        if self.frame_width > 0.0 {
            let frame = self.frame_at(args.local.x);
            if frame != self.current_frame {
                self.current_frame = frame;
                self.on_scrubber_changed.invoke(compositor, id, frame);
            }
        }
        args.handled = true;
    }

    fn point_in_capture_rect(&self, _: &Compositor, _: PanelId, _: Point) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use lamina_core::CursorButton;
    use lamina_harness::{InputDriver, headless_compositor};

    use super::*;

    fn timeline() -> (Compositor, PanelId, PanelId) {
        let (mut compositor, _) = headless_compositor(200.0, 100.0);
        let root = compositor.root();
        let id = Timeline::create(&mut compositor, root);
        compositor
            .panels_mut()
            .set_bounds(id, Rect::new(0.0, 50.0, 100.0, 70.0));
        let scrubber = compositor.with_widget(id, |t: &mut Timeline, _| {
            t.set_frame_range(0, 10);
            t.scrubber()
        });
        let _ = compositor.tick(0.0);
        (compositor, id, scrubber.expect("timeline widget is installed"))
    }

    fn frame(compositor: &Compositor, id: PanelId) -> Option<usize> {
        compositor.widget::<Timeline>(id).map(Timeline::frame)
    }

    #[test]
    fn press_captures_scrubber_and_snaps() {
        let (mut compositor, id, scrubber) = timeline();
        let frames = Rc::new(RefCell::new(Vec::new()));
        let sink = frames.clone();
        compositor.with_widget(id, |t: &mut Timeline, _| {
            t.on_scrubber_changed.connect(move |_, _, f| sink.borrow_mut().push(f));
        });

        InputDriver::new(&mut compositor)
            .move_to(Point::new(35.0, 60.0))
            .press(CursorButton::Left);
        assert_eq!(compositor.capture(), Some(scrubber));
        assert_eq!(frame(&compositor, id), Some(3));

        InputDriver::new(&mut compositor).move_to(Point::new(95.0, 60.0));
        assert_eq!(frame(&compositor, id), Some(9));
        InputDriver::new(&mut compositor)
            .move_to(Point::new(300.0, 60.0))
            .move_to(Point::new(-50.0, 60.0))
            .release(CursorButton::Left);
        assert_eq!(frame(&compositor, id), Some(0));
        assert_eq!(*frames.borrow(), [3, 9, 0]);
        assert_eq!(compositor.capture(), None);
        // The scrubber snapped instead of following the cursor.
        let _ = compositor.tick(0.0);
        assert_eq!(compositor.panels().origin(scrubber), Point::ZERO);
    }

    #[test]
    fn update_sizes_scrubber_to_one_frame() {
        let (mut compositor, id, scrubber) = timeline();
        compositor.with_widget(id, |t: &mut Timeline, _| t.set_frame(4));
        let _ = compositor.tick(0.0);
        assert_eq!(
            compositor.panels().bounds(scrubber),
            Rect::new(40.0, 0.0, 50.0, 20.0)
        );
    }

    #[test]
    fn set_frame_clamps_to_range() {
        let (mut compositor, id, _) = timeline();
        compositor.with_widget(id, |t: &mut Timeline, _| t.set_frame(42));
        assert_eq!(frame(&compositor, id), Some(9));
    }

    #[test]
    #[should_panic(expected = "empty frame range")]
    fn inverted_range_panics() {
        let (mut compositor, id, _) = timeline();
        compositor.with_widget(id, |t: &mut Timeline, _| t.set_frame_range(5, 5));
    }
}
