// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The zoom/pan transform applied to series marks.

use kurbo::{Affine, Point, Vec2};

/// A translate + uniform scale transform: `screen = scene * k + (x, y)`.
///
/// Zoom and pan only ever change this transform; scales and projections stay as built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    /// Horizontal translation in screen pixels.
    pub x: f64,
    /// Vertical translation in screen pixels.
    pub y: f64,
    /// Uniform scale factor.
    pub k: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        k: 1.0,
    };

    /// Returns `true` if this transform leaves coordinates unchanged.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Returns the transform as an affine map from scene to screen coordinates.
    pub fn to_affine(&self) -> Affine {
        Affine::translate((self.x, self.y)) * Affine::scale(self.k)
    }

    /// Maps a screen point back into scene coordinates.
    pub fn screen_to_scene(&self, p: Point) -> Point {
        Point::new((p.x - self.x) / self.k, (p.y - self.y) / self.k)
    }

    /// Maps a scene point into screen coordinates.
    pub fn scene_to_screen(&self, p: Point) -> Point {
        Point::new(p.x * self.k + self.x, p.y * self.k + self.y)
    }

    /// Moves the view by a screen-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Multiplies the scale by `factor`, keeping the scene point under `center` fixed.
    ///
    /// The resulting scale is clamped to `extent`; a zoom that hits the clamp again is a no-op.
    /// Non-finite or non-positive factors are ignored.
    pub fn zoom_at(&mut self, center: Point, factor: f64, extent: (f64, f64)) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let k = (self.k * factor).clamp(extent.0, extent.1);
        if k == self.k {
            return;
        }
        let anchor = self.screen_to_scene(center);
        self.k = k;
        self.x = center.x - anchor.x * self.k;
        self.y = center.y - anchor.y * self.k;
    }
}

/// Converts a wheel delta into a zoom factor; positive deltas zoom out.
pub(crate) fn wheel_zoom_factor(delta: f64, sensitivity: f64) -> f64 {
    (-delta * sensitivity).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_keeps_the_pointer_fixed() {
        let mut t = ViewTransform::default();
        let pointer = Point::new(200.0, 120.0);
        let before = t.screen_to_scene(pointer);
        t.zoom_at(pointer, 2.0, (0.5, 8.0));
        assert_eq!(t.k, 2.0);
        let after = t.screen_to_scene(pointer);
        assert!((before - after).hypot() < 1e-9);
    }

    #[test]
    fn zoom_is_clamped_to_the_extent() {
        let mut t = ViewTransform::default();
        for _ in 0..10 {
            t.zoom_at(Point::ZERO, 3.0, (0.5, 8.0));
        }
        assert_eq!(t.k, 8.0);
        t.zoom_at(Point::ZERO, 1e-6, (0.5, 8.0));
        assert_eq!(t.k, 0.5);
        t.zoom_at(Point::ZERO, f64::NAN, (0.5, 8.0));
        assert_eq!(t.k, 0.5);
    }

    #[test]
    fn affine_matches_the_point_mapping() {
        let mut t = ViewTransform::default();
        t.pan(Vec2::new(15.0, -4.0));
        t.zoom_at(Point::new(50.0, 50.0), 1.5, (0.1, 10.0));
        let p = Point::new(33.0, 71.0);
        assert!((t.to_affine() * p - t.scene_to_screen(p)).hypot() < 1e-9);
        assert!((t.screen_to_scene(t.scene_to_screen(p)) - p).hypot() < 1e-9);
    }

    #[test]
    fn wheel_direction() {
        assert!(wheel_zoom_factor(-100.0, 0.002) > 1.0);
        assert!(wheel_zoom_factor(100.0, 0.002) < 1.0);
        assert_eq!(wheel_zoom_factor(0.0, 0.002), 1.0);
    }
}
