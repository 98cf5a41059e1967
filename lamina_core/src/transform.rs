// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel transform composition.
//!
//! A panel's local transform places it inside its parent:
//!
//! ```text
//! local = translate(origin) * translate(center) * rotate(rotation)
//!       * scale(scale) * translate(-center)
//! world = parent_world * local
//! ```
//!
//! `center` is the midpoint of the panel's size, so rotation and scale pivot
//! around the middle of the panel rather than its top-left corner. kurbo
//! applies the rightmost factor first, so a point is pivoted, scaled,
//! rotated, un-pivoted, offset, and finally carried into the parent's space.

use kurbo::{Affine, Point, Size, Vec2};

/// Builds the local transform of a panel from its properties.
#[must_use]
pub fn local_transform(origin: Point, size: Size, rotation: f64, scale: Vec2) -> Affine {
    let center = Vec2::new(size.width * 0.5, size.height * 0.5);
    let mut xf = Affine::translate(-center);
    if scale != Vec2::new(1.0, 1.0) {
        xf = xf.then_scale_non_uniform(scale.x, scale.y);
    }
    if rotation != 0.0 {
        xf = xf.then_rotate(rotation);
    }
    xf.then_translate(center + origin.to_vec2())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_affine_eq(a: Affine, b: Affine) {
        let eps = 1e-9;
        for (x, y) in a.as_coeffs().iter().zip(b.as_coeffs().iter()) {
            assert!((x - y).abs() < eps, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn identity_properties_give_a_translation() {
        let xf = local_transform(Point::new(10.0, 5.0), Size::new(20.0, 20.0), 0.0, Vec2::new(1.0, 1.0));
        assert_affine_eq(xf, Affine::translate((10.0, 5.0)));
    }

    #[test]
    fn composition_matches_the_factored_form() {
        let origin = Point::new(7.0, -3.0);
        let size = Size::new(40.0, 10.0);
        let rotation = 0.3;
        let scale = Vec2::new(2.0, 0.5);
        let center = Vec2::new(20.0, 5.0);
        let expected = Affine::translate(origin.to_vec2())
            * Affine::translate(center)
            * Affine::rotate(rotation)
            * Affine::scale_non_uniform(scale.x, scale.y)
            * Affine::translate(-center);
        assert_affine_eq(local_transform(origin, size, rotation, scale), expected);
    }

    #[test]
    fn rotation_pivots_around_the_center() {
        let size = Size::new(10.0, 10.0);
        let xf = local_transform(Point::ZERO, size, core::f64::consts::PI, Vec2::new(1.0, 1.0));
        let mapped = xf * Point::new(5.0, 5.0);
        assert!((mapped.x - 5.0).abs() < 1e-9 && (mapped.y - 5.0).abs() < 1e-9);
        let corner = xf * Point::ZERO;
        assert!((corner.x - 10.0).abs() < 1e-9 && (corner.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn inverse_round_trips() {
        let xf = local_transform(Point::new(3.0, 4.0), Size::new(8.0, 6.0), 1.1, Vec2::new(1.5, 0.75));
        let p = Point::new(2.5, -9.0);
        let back = xf.inverse() * (xf * p);
        assert!((back.x - p.x).abs() < 1e-9 && (back.y - p.y).abs() < 1e-9);
    }
}
