// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometric helpers on top of `kurbo`.
//!
//! Panels use kurbo's [`Point`], [`Size`], [`Rect`], and [`Affine`]
//! directly. The helpers here add the few conventions the panel tree needs:
//! closed-interval containment and the corner order of a panel quad.

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Returns whether `point` lies inside `rect`, treating all four edges as
/// inside.
///
/// Unlike [`Rect::contains`], which is half-open, a point on the right or
/// bottom edge counts.
#[inline]
#[must_use]
pub fn rect_contains_closed(rect: Rect, point: Point) -> bool {
    let rect = rect.abs();
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Returns the corners of a `size` rectangle mapped through `transform`.
///
/// Corner order is bottom-left, bottom-right, top-right, top-left in local
/// space (with +y pointing down), which is the winding
/// [`CommandList::primitive_quad`](lamina_render::CommandList::primitive_quad)
/// expects.
#[must_use]
pub fn panel_quad(transform: Affine, size: Size) -> [Point; 4] {
    [
        transform * Point::new(0.0, size.height),
        transform * Point::new(size.width, size.height),
        transform * Point::new(size.width, 0.0),
        transform * Point::ZERO,
    ]
}

/// Returns the axis-aligned bounding box of a quad.
#[must_use]
pub fn quad_bounds(quad: &[Point; 4]) -> Rect {
    let mut bounds = Rect::from_points(quad[0], quad[1]);
    bounds = bounds.union_pt(quad[2]);
    bounds.union_pt(quad[3])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_containment_includes_far_edges() {
        let r = Rect::new(10.0, 10.0, 30.0, 30.0);
        assert!(rect_contains_closed(r, Point::new(10.0, 10.0)));
        assert!(rect_contains_closed(r, Point::new(30.0, 30.0)));
        assert!(!r.contains(Point::new(30.0, 30.0)), "kurbo is half-open");
        assert!(!rect_contains_closed(r, Point::new(30.1, 20.0)));
        assert!(!rect_contains_closed(r, Point::new(5.0, 20.0)));
    }

    #[test]
    fn quad_corners_follow_winding_order() {
        let q = panel_quad(Affine::translate((10.0, 20.0)), Size::new(4.0, 2.0));
        assert_eq!(q[0], Point::new(10.0, 22.0));
        assert_eq!(q[1], Point::new(14.0, 22.0));
        assert_eq!(q[2], Point::new(14.0, 20.0));
        assert_eq!(q[3], Point::new(10.0, 20.0));
        assert_eq!(quad_bounds(&q), Rect::new(10.0, 20.0, 14.0, 22.0));
    }
}
