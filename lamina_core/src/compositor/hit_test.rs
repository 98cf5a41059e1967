// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picking: which panel is under a compositor-space point.
//!
//! Every level is searched in z-order, front to back, which is the reverse
//! of the painting order, so the panel found is always the one drawn last
//! among those containing the point.

use kurbo::Point;

use crate::panel::{PanelFlags, PanelId};

use super::Compositor;

impl Compositor {
    /// Returns the deepest, topmost panel containing `point`, or the root if
    /// no other panel does.
    ///
    /// `ignore` excludes one panel and its subtree (a dragged panel must not
    /// find itself).
    #[must_use]
    pub fn find_panel_at_location(&self, point: Point, ignore: Option<PanelId>) -> PanelId {
        self.find_deepest_panel_at_location(self.root, point, ignore)
            .unwrap_or(self.root)
    }

    /// Returns the deepest, topmost descendant of `panel` containing
    /// `point`.
    #[must_use]
    pub fn find_deepest_panel_at_location(
        &self,
        panel: PanelId,
        point: Point,
        ignore: Option<PanelId>,
    ) -> Option<PanelId> {
        self.panels
            .zsorted(panel)
            .into_iter()
            .filter(|&child| Some(child) != ignore)
            .find(|&child| self.hit_test_panel(child, point))
            .map(|child| {
                self.find_deepest_panel_at_location(child, point, ignore)
                    .unwrap_or(child)
            })
    }

    /// Returns whether `point` hits `panel` itself: it must be visible and
    /// cursor-enabled, and its widget's local hit test must accept the
    /// point.
    #[must_use]
    pub fn hit_test_panel(&self, panel: PanelId, point: Point) -> bool {
        let panels = &self.panels;
        if !panels.has_flags(panel, PanelFlags::VISIBLE | PanelFlags::CURSOR_ENABLED) {
            return false;
        }
        let local = panels.compositor_to_local(panel, point);
        match panels.widget_ref(panel) {
            Some(widget) => widget.hit_test_local(self, panel, local),
            None => panels.hit_test_local(panel, local),
        }
    }

    /// Returns whether a press at `local` inside `panel` may start a drag.
    pub(crate) fn panel_point_in_capture_rect(&self, panel: PanelId, local: Point) -> bool {
        match self.panels.widget_ref(panel) {
            Some(widget) => widget.point_in_capture_rect(self, panel, local),
            None => self.panels.point_in_capture_rect(panel, local),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec::Vec;

    use kurbo::{Rect, Size};

    use super::*;
    use crate::compositor::test_util::CountingRenderer;
    use crate::widget::Widget;

    fn overlapping() -> (Compositor, PanelId, PanelId) {
        let mut compositor = Compositor::new(100.0, 100.0);
        let root = compositor.root();
        let a = compositor.create_panel(root);
        let b = compositor.create_panel(root);
        compositor.panels_mut().set_bounds(a, Rect::new(0.0, 0.0, 60.0, 60.0));
        compositor.panels_mut().set_bounds(b, Rect::new(40.0, 40.0, 100.0, 100.0));
        (compositor, a, b)
    }

    #[test]
    fn topmost_sibling_wins_overlap() {
        let (mut compositor, a, b) = overlapping();
        let overlap = Point::new(50.0, 50.0);
        assert_eq!(compositor.find_panel_at_location(overlap, None), b);
        compositor.send_to_front(a);
        assert_eq!(compositor.find_panel_at_location(overlap, None), a);
        assert_eq!(compositor.find_panel_at_location(overlap, Some(a)), b);
    }

    #[test]
    fn edges_are_inside() {
        let (compositor, a, _) = overlapping();
        assert_eq!(compositor.find_panel_at_location(Point::new(0.0, 0.0), None), a);
        assert_eq!(compositor.find_panel_at_location(Point::new(39.0, 60.0), None), a);
    }

    #[test]
    fn misses_fall_back_to_root() {
        let (compositor, _, _) = overlapping();
        let root = compositor.root();
        assert_eq!(compositor.find_panel_at_location(Point::new(90.0, 10.0), None), root);
    }

    #[test]
    fn hidden_and_disabled_panels_are_skipped() {
        let (mut compositor, a, b) = overlapping();
        let overlap = Point::new(50.0, 50.0);
        compositor.panels_mut().set_visible(b, false);
        assert_eq!(compositor.find_panel_at_location(overlap, None), a);
        compositor.panels_mut().remove_flags(a, PanelFlags::CURSOR_ENABLED);
        assert_eq!(compositor.find_panel_at_location(overlap, None), compositor.root());
    }

    #[test]
    fn descends_into_children_in_z_order() {
        let (mut compositor, a, _) = overlapping();
        let low = compositor.create_panel(a);
        let high = compositor.create_panel(a);
        compositor.panels_mut().set_bounds(low, Rect::new(0.0, 0.0, 20.0, 20.0));
        compositor.panels_mut().set_bounds(high, Rect::new(10.0, 10.0, 30.0, 30.0));
        let point = Point::new(15.0, 15.0);
        assert_eq!(compositor.find_panel_at_location(point, None), high);
        compositor.bring_to_front(low);
        assert_eq!(compositor.find_panel_at_location(point, None), low);
    }

    #[test]
    fn rotation_is_honoured_through_inverse_transform() {
        let mut compositor = Compositor::new(100.0, 100.0);
        let root = compositor.root();
        let bar = compositor.create_panel(root);
        compositor.panels_mut().set_bounds(bar, Rect::new(40.0, 0.0, 60.0, 100.0));
        assert_eq!(compositor.find_panel_at_location(Point::new(10.0, 50.0), None), root);
        compositor
            .panels_mut()
            .set_rotation(bar, core::f64::consts::FRAC_PI_2);
        assert_eq!(compositor.find_panel_at_location(Point::new(10.0, 50.0), None), bar);
        assert_eq!(compositor.find_panel_at_location(Point::new(50.0, 10.0), None), root);
    }

    #[test]
    fn widget_hit_test_overrides_bounds() {
        struct Circle;
        impl Widget for Circle {
            fn hit_test_local(&self, compositor: &Compositor, id: PanelId, local: Point) -> bool {
                let size = compositor.panels().size(id);
                let center = Point::new(size.width / 2.0, size.height / 2.0);
                (local - center).hypot() <= size.width / 2.0
            }
        }

        let mut compositor = Compositor::new(100.0, 100.0);
        let root = compositor.root();
        let circle = compositor.create_widget_panel(root, Circle);
        compositor.panels_mut().set_size(circle, Size::new(20.0, 20.0));
        assert_eq!(compositor.find_panel_at_location(Point::new(10.0, 10.0), None), circle);
        assert_eq!(compositor.find_panel_at_location(Point::new(1.0, 1.0), None), root);
    }

    /// Among all panels containing a point, picking returns the one painted
    /// last.
    #[test]
    fn picking_agrees_with_painting() {
        let mut compositor = Compositor::new(100.0, 100.0);
        let root = compositor.root();
        let mut panels = Vec::new();
        for i in 0..5_u32 {
            let id = compositor.create_panel(root);
            let offset = f64::from(i) * 10.0;
            compositor
                .panels_mut()
                .set_bounds(id, Rect::new(offset, offset, offset + 50.0, offset + 50.0));
            compositor
                .panels_mut()
                .set_background_color(id, lamina_render::Color::rgb(0, 0, u8::try_from(i).unwrap_or(0) + 1));
            panels.push(id);
        }
        compositor.send_to_front(panels[1]);
        let _ = compositor.set_renderer(Box::new(CountingRenderer::default()));
        let _ = compositor.tick(0.0);
        compositor.draw();

        let point = Point::new(45.0, 45.0);
        let picked = compositor.find_panel_at_location(point, None);
        // The last quad containing the point carries the picked panel's color.
        let list = compositor.command_list();
        let last_color = list
            .commands()
            .iter()
            .rev()
            .find(|cmd| {
                let quad = list.command_vertices(cmd);
                let xs = quad.iter().map(|v| f64::from(v.position[0]));
                let ys = quad.iter().map(|v| f64::from(v.position[1]));
                let (x0, x1) = xs.fold((f64::MAX, f64::MIN), |(lo, hi), x| (lo.min(x), hi.max(x)));
                let (y0, y1) = ys.fold((f64::MAX, f64::MIN), |(lo, hi), y| (lo.min(y), hi.max(y)));
                (x0..=x1).contains(&point.x) && (y0..=y1).contains(&point.y)
            })
            .map(|cmd| list.command_vertices(cmd)[0].color);
        assert_eq!(last_color, Some(compositor.panels().background_color(picked).to_array()));
        assert_eq!(picked, panels[1]);
    }
}
