// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrollbar with a draggable thumb.

use alloc::boxed::Box;

use kurbo::{Point, Rect, Size};
use lamina_core::geometry::rect_contains_closed;
use lamina_core::layout::Direction;
use lamina_core::{Compositor, Delegate, EventArgs, EventKind, PanelFlags, PanelId, Widget};
use lamina_render::Color;

const TRACK_COLOR: Color = Color::rgb(40, 40, 40);
const THUMB_COLOR: Color = Color::rgb(110, 110, 110);
const THUMB_HOVER_COLOR: Color = Color::rgb(150, 150, 150);

/// A track with a draggable thumb.
///
/// The value runs from 0 (thumb at the start of the track) to 1 (thumb at
/// the end). The thumb stays hidden until
/// [`set_button_size`](Self::set_button_size) gives it a size.
///
/// The host panel is movable so that a press starts a capture and later
/// moves arrive as drags, but the scrollbar consumes those drags itself and
/// never moves.
#[derive(Debug)]
pub struct Scrollbar {
    direction: Direction,
    thumb: PanelId,
    initial_click: f64,
    dragging: bool,
    value: f64,
    /// Fired with the new value whenever it changes.
    pub on_scroll_value_changed: Delegate<f64>,
}

impl Scrollbar {
    /// Creates a scrollbar panel with its thumb under `parent`.
    pub fn create(compositor: &mut Compositor, parent: PanelId, direction: Direction) -> PanelId {
        let id = compositor.create_panel(parent);
        let thumb = compositor.create_panel(id);
        let panels = compositor.panels_mut();
        panels.add_flags(id, PanelFlags::CAN_MOVE);
        panels.set_background_color(id, TRACK_COLOR);
        panels.remove_flags(thumb, PanelFlags::CURSOR_ENABLED);
        panels.set_visible(thumb, false);
        panels.set_background_color(thumb, THUMB_COLOR);
        panels.set_name(thumb, "scrollbar thumb");
        let _ = compositor.set_widget(
            id,
            Box::new(Self {
                direction,
                thumb,
                initial_click: 0.0,
                dragging: false,
                value: 0.0,
                on_scroll_value_changed: Delegate::new(),
            }),
        );
        id
    }

    /// Returns the thumb panel.
    #[must_use]
    pub fn thumb(&self) -> PanelId {
        self.thumb
    }

    /// Returns the scroll position in `0.0..=1.0`.
    #[must_use]
    pub fn scroll_value(&self) -> f64 {
        self.value
    }

    /// Returns whether the thumb is being dragged.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Sizes the thumb and shows it.
    pub fn set_button_size(&mut self, compositor: &mut Compositor, id: PanelId, size: Size) {
        let panels = compositor.panels_mut();
        panels.set_size(self.thumb, size);
        panels.set_visible(self.thumb, true);
        self.place_thumb(compositor, id);
    }

    /// Moves the thumb to `value`, clamped to `0.0..=1.0`.
    pub fn set_scroll_value(&mut self, compositor: &mut Compositor, id: PanelId, value: f64) {
        let value = value.clamp(0.0, 1.0);
        let changed = value != self.value;
        self.value = value;
        self.place_thumb(compositor, id);
        if changed {
            self.on_scroll_value_changed.invoke(compositor, id, value);
        }
    }

    fn along(&self, point: Point) -> f64 {
        match self.direction {
            Direction::Horizontal => point.x,
            Direction::Vertical => point.y,
        }
    }

    fn extent(&self, size: Size) -> f64 {
        match self.direction {
            Direction::Horizontal => size.width,
            Direction::Vertical => size.height,
        }
    }

    /// Distance the thumb can travel.
    fn travel(&self, compositor: &Compositor, id: PanelId) -> f64 {
        let panels = compositor.panels();
        (self.extent(panels.size(id)) - self.extent(panels.size(self.thumb))).max(0.0)
    }

    fn place_thumb(&self, compositor: &mut Compositor, id: PanelId) {
        let offset = self.value * self.travel(compositor, id);
        let origin = match self.direction {
            Direction::Horizontal => Point::new(offset, 0.0),
            Direction::Vertical => Point::new(0.0, offset),
        };
        compositor.panels_mut().set_origin(self.thumb, origin);
    }

    fn thumb_rect(&self, compositor: &Compositor) -> Option<Rect> {
        let panels = compositor.panels();
        panels.is_visible(self.thumb).then(|| panels.bounds(self.thumb))
    }
}

impl Widget for Scrollbar {
    fn update(&mut self, compositor: &mut Compositor, id: PanelId, _: f64) {
        self.place_thumb(compositor, id);
    }

    fn handle_event(&mut self, compositor: &mut Compositor, id: PanelId, args: &mut EventArgs) {
        if args.sender != Some(id) {
            return;
        }
        let on_thumb = self
            .thumb_rect(compositor)
            .is_some_and(|r| rect_contains_closed(r, args.local));
        match args.kind {
            EventKind::CursorButtonPressed if on_thumb => {
                let thumb_origin = compositor.panels().origin(self.thumb);
                self.initial_click = self.along(args.local) - self.along(thumb_origin);
                self.dragging = true;
                args.handled = true;
            }
            EventKind::CursorDrag => {
                if self.dragging {
                    let travel = self.travel(compositor, id);
                    if travel > 0.0 {
                        let offset = (self.along(args.local) - self.initial_click).clamp(0.0, travel);
                        self.set_scroll_value(compositor, id, offset / travel);
                    }
                }
                args.handled = true;
            }
            EventKind::CursorButtonReleased => self.dragging = false,
            EventKind::CursorMove => {
                let color = if on_thumb { THUMB_HOVER_COLOR } else { THUMB_COLOR };
                compositor.panels_mut().set_background_color(self.thumb, color);
            }
            EventKind::CursorExit => {
                compositor
                    .panels_mut()
                    .set_background_color(self.thumb, THUMB_COLOR);
            }
            _ => {}
        }
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

    fn vertical_bar(compositor: &mut Compositor) -> PanelId {
        let root = compositor.root();
        let id = Scrollbar::create(compositor, root, Direction::Vertical);
        compositor
            .panels_mut()
            .set_bounds(id, Rect::new(50.0, 0.0, 60.0, 100.0));
        compositor.with_widget(id, |bar: &mut Scrollbar, c| {
            bar.set_button_size(c, id, Size::new(10.0, 20.0));
        });
        id
    }

    fn value(compositor: &Compositor, id: PanelId) -> Option<f64> {
        compositor.widget::<Scrollbar>(id).map(Scrollbar::scroll_value)
    }

    #[test]
    fn thumb_starts_hidden() {
        let (mut compositor, _) = headless_compositor(100.0, 100.0);
        let root = compositor.root();
        let id = Scrollbar::create(&mut compositor, root, Direction::Horizontal);
        let thumb = compositor.widget::<Scrollbar>(id).map(Scrollbar::thumb);
        let thumb = thumb.expect("scrollbar widget is installed");
        assert!(!compositor.panels().is_visible(thumb));
        assert!(!compositor.panels().has_flags(thumb, PanelFlags::CURSOR_ENABLED));
    }

    #[test]
    fn dragging_the_thumb_sets_the_value() {
        let (mut compositor, _) = headless_compositor(100.0, 100.0);
        let id = vertical_bar(&mut compositor);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        compositor.with_widget(id, |bar: &mut Scrollbar, _| {
            bar.on_scroll_value_changed
                .connect(move |_, _, v| sink.borrow_mut().push(v));
        });

        InputDriver::new(&mut compositor)
            .move_to(Point::new(55.0, 5.0))
            .press(CursorButton::Left)
            .move_to(Point::new(55.0, 45.0));
        assert_eq!(value(&compositor, id), Some(0.5));
        assert_eq!(compositor.panels().origin(id), Point::new(50.0, 0.0));

        InputDriver::new(&mut compositor)
            .move_to(Point::new(55.0, 200.0))
            .release(CursorButton::Left);
        assert_eq!(value(&compositor, id), Some(1.0));
        assert_eq!(*seen.borrow(), [0.5, 1.0]);
        assert_eq!(compositor.capture(), None);
    }

    #[test]
    fn press_on_thumb_edge_starts_drag() {
        let (mut compositor, _) = headless_compositor(100.0, 100.0);
        let id = vertical_bar(&mut compositor);
        InputDriver::new(&mut compositor)
            .move_to(Point::new(55.0, 20.0))
            .press(CursorButton::Left)
            .move_to(Point::new(55.0, 60.0));
        assert_eq!(
            compositor.widget::<Scrollbar>(id).map(Scrollbar::is_dragging),
            Some(true)
        );
        assert_eq!(value(&compositor, id), Some(0.5));
    }

    #[test]
    fn press_on_track_does_not_drag() {
        let (mut compositor, _) = headless_compositor(100.0, 100.0);
        let id = vertical_bar(&mut compositor);
        InputDriver::new(&mut compositor)
            .move_to(Point::new(55.0, 60.0))
            .press(CursorButton::Left)
            .move_to(Point::new(55.0, 90.0));
        assert_eq!(value(&compositor, id), Some(0.0));
        assert_eq!(compositor.panels().origin(id), Point::new(50.0, 0.0));
    }

    #[test]
    fn set_value_clamps_and_moves_thumb() {
        let (mut compositor, _) = headless_compositor(100.0, 100.0);
        let id = vertical_bar(&mut compositor);
        let thumb = compositor.with_widget(id, |bar: &mut Scrollbar, c| {
            bar.set_scroll_value(c, id, 3.0);
            bar.thumb()
        });
        let thumb = thumb.expect("scrollbar widget is installed");
        assert_eq!(value(&compositor, id), Some(1.0));
        assert_eq!(compositor.panels().origin(thumb), Point::new(0.0, 80.0));
    }
}
