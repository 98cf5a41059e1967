// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use lamina_core::{Compositor, CursorButton, Modifiers};

/// Scripted input for a [`Compositor`].
///
/// Each step forwards to the compositor's raw input entry points exactly as
/// a platform layer would, one call per simulated OS event.
#[derive(Debug)]
pub struct InputDriver<'a> {
    compositor: &'a mut Compositor,
    modifiers: Modifiers,
}

impl<'a> InputDriver<'a> {
    /// Creates a driver for `compositor`.
    pub fn new(compositor: &'a mut Compositor) -> Self {
        Self {
            compositor,
            modifiers: Modifiers::empty(),
        }
    }

    /// Returns the driven compositor.
    pub fn compositor(&mut self) -> &mut Compositor {
        self.compositor
    }

    /// Sets the modifiers sent with subsequent key events.
    pub fn hold(&mut self, modifiers: Modifiers) -> &mut Self {
        self.modifiers = modifiers;
        self
    }

    /// Moves the cursor to `point`.
    pub fn move_to(&mut self, point: Point) -> &mut Self {
        self.compositor.cursor_move_absolute(point.x, point.y);
        self
    }

    /// Moves the cursor from its current position to `point` in `steps`
    /// equal increments.
    pub fn move_in_steps(&mut self, point: Point, steps: u32) -> &mut Self {
        let start = self.compositor.last_cursor();
        let steps = steps.max(1);
        for i in 1..=steps {
            let t = f64::from(i) / f64::from(steps);
            self.move_to(start.lerp(point, t));
        }
        self
    }

    /// Presses `button` at the current position.
    pub fn press(&mut self, button: CursorButton) -> &mut Self {
        self.compositor.cursor_button(button, true);
        self
    }

    /// Releases `button` at the current position.
    pub fn release(&mut self, button: CursorButton) -> &mut Self {
        self.compositor.cursor_button(button, false);
        self
    }

    /// Moves to `point`, then presses and releases the left button.
    pub fn click(&mut self, point: Point) -> &mut Self {
        self.move_to(point)
            .press(CursorButton::Left)
            .release(CursorButton::Left)
    }

    /// Presses the left button at `from`, moves to `to`, and releases.
    pub fn drag(&mut self, from: Point, to: Point) -> &mut Self {
        self.move_to(from)
            .press(CursorButton::Left)
            .move_to(to)
            .release(CursorButton::Left)
    }

    /// Turns the scroll wheel.
    pub fn scroll(&mut self, direction: i16) -> &mut Self {
        self.compositor.cursor_scroll(direction);
        self
    }

    /// Sends a key press and release for each character of `text`.
    pub fn type_text(&mut self, text: &str) -> &mut Self {
        for c in text.chars() {
            let code = u32::from(c);
            self.compositor.key_event(code, true, code, self.modifiers);
            self.compositor.key_event(code, false, code, self.modifiers);
        }
        self
    }

    /// Advances the compositor by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> &mut Self {
        let _ = self.compositor.tick(dt);
        self
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;
    use lamina_core::PanelFlags;

    use super::*;

    #[test]
    fn drag_moves_a_movable_panel() {
        let mut compositor = Compositor::new(100.0, 100.0);
        let root = compositor.root();
        let window = compositor.create_panel(root);
        let panels = compositor.panels_mut();
        panels.set_bounds(window, Rect::new(10.0, 10.0, 30.0, 30.0));
        panels.add_flags(window, PanelFlags::CAN_MOVE);

        InputDriver::new(&mut compositor)
            .tick(0.0)
            .drag(Point::new(15.0, 15.0), Point::new(45.0, 25.0));
        assert_eq!(compositor.panels().origin(window), Point::new(40.0, 20.0));
        assert_eq!(compositor.capture(), None);
    }

    #[test]
    fn stepped_moves_end_at_the_target() {
        let mut compositor = Compositor::new(100.0, 100.0);
        let mut input = InputDriver::new(&mut compositor);
        input.move_to(Point::new(10.0, 10.0));
        input.move_in_steps(Point::new(50.0, 30.0), 4);
        assert_eq!(input.compositor().last_cursor(), Point::new(50.0, 30.0));
    }

    #[test]
    fn typing_targets_focus() {
        let mut compositor = Compositor::new(100.0, 100.0);
        let mut input = InputDriver::new(&mut compositor);
        input.hold(Modifiers::SHIFT).type_text("hi");
        assert_eq!(compositor.key_modifiers(), Modifiers::SHIFT);
    }
}
