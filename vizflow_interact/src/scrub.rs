// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Manual time scrubbing over a screen region.

use kurbo::{Point, Rect};
use vizflow_charts::{ScaleError, ScaleLinear, ScaleLinearSpec};

/// A screen region whose horizontal axis maps onto a time extent.
///
/// The extent maps onto `[rect.x0 + inset, rect.x1 - inset]` through a clamped linear scale, so
/// pointer positions inside the inset (or outside the region) pin to the extent's ends.
#[derive(Clone, Debug)]
pub struct ScrubRegion {
    rect: Rect,
    inset: f64,
    scale: ScaleLinear,
}

impl ScrubRegion {
    /// Default horizontal inset in pixels.
    pub const DEFAULT_INSET: f64 = 10.0;

    /// Creates a scrub region over `rect` for `extent`.
    pub fn new(rect: Rect, extent: (f64, f64), inset: f64) -> Result<Self, ScaleError> {
        let scale = ScaleLinearSpec::new(extent)
            .with_clamp(true)
            .instantiate((rect.x0 + inset, rect.x1 - inset))?;
        Ok(Self { rect, inset, scale })
    }

    /// Returns the region in screen coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Returns the horizontal inset.
    pub fn inset(&self) -> f64 {
        self.inset
    }

    /// Returns the time extent.
    pub fn extent(&self) -> (f64, f64) {
        (self.scale.domain_min(), self.scale.domain_max())
    }

    /// Returns `true` if `pt` lies inside the region.
    pub fn contains(&self, pt: Point) -> bool {
        self.rect.contains(pt)
    }

    /// Maps a pointer x coordinate to a time inside the extent.
    pub fn time_at(&self, x: f64) -> f64 {
        self.scale.invert(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> ScrubRegion {
        ScrubRegion::new(Rect::new(500.0, 400.0, 740.0, 480.0), (1990.0, 2012.0), 10.0).unwrap()
    }

    #[test]
    fn maps_inset_range_onto_extent() {
        let r = region();
        assert!((r.time_at(510.0) - 1990.0).abs() < 1e-9);
        assert!((r.time_at(730.0) - 2012.0).abs() < 1e-9);
        assert!((r.time_at(620.0) - 2001.0).abs() < 1e-9);
    }

    #[test]
    fn clamps_outside_the_inset() {
        let r = region();
        assert_eq!(r.time_at(501.0), 1990.0);
        assert_eq!(r.time_at(10_000.0), 2012.0);
        assert!(r.contains(Point::new(501.0, 450.0)));
        assert!(!r.contains(Point::new(499.0, 450.0)));
    }

    #[test]
    fn rejects_an_invalid_extent() {
        let r = ScrubRegion::new(Rect::new(0.0, 0.0, 100.0, 20.0), (f64::NAN, 1.0), 10.0);
        assert!(r.is_err());
    }
}
