// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geographic projections and path generation.
//!
//! Coordinates are `(longitude, latitude)` in degrees. Projections are pure values; the path
//! generator emits every input vertex (no resampling or simplification), so boundaries render
//! exactly as supplied.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Vec2};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// A closed ring of `(longitude, latitude)` vertices. The closing vertex may be omitted.
pub type Ring = Vec<(f64, f64)>;

/// Polygon geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum GeoGeometry {
    /// One polygon: an outer ring followed by any holes.
    Polygon(Vec<Ring>),
    /// Several polygons.
    MultiPolygon(Vec<Vec<Ring>>),
}

impl GeoGeometry {
    /// Iterates over every ring of every polygon.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> + '_ {
        let polys: &[Vec<Ring>] = match self {
            Self::Polygon(rings) => core::slice::from_ref(rings),
            Self::MultiPolygon(polys) => polys,
        };
        polys.iter().flatten()
    }

    /// Returns the total number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.rings().map(Vec::len).sum()
    }
}

/// A geographic boundary with a string identifier (for example an ISO country code).
#[derive(Clone, Debug, PartialEq)]
pub struct GeoFeature {
    /// Feature id, matched against relation endpoints.
    pub id: String,
    /// Boundary geometry.
    pub geometry: GeoGeometry,
}

impl GeoFeature {
    /// Creates a feature.
    pub fn new(id: impl Into<String>, geometry: GeoGeometry) -> Self {
        Self {
            id: id.into(),
            geometry,
        }
    }

    /// Returns the stable key of this feature's id.
    pub fn key(&self) -> u64 {
        vizflow_core::stable_key(&self.id)
    }
}

/// The projection formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectionKind {
    /// Spherical Mercator. Latitude is clamped so the projected y stays within half a scale unit
    /// of the translation.
    Mercator,
    /// Plate carrée.
    Equirectangular,
}

/// A projection from `(longitude, latitude)` to scene coordinates.
///
/// Both formulas map longitude `-180..180` to `-scale/2..scale/2` before translation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoProjection {
    /// Projection formula.
    pub kind: ProjectionKind,
    /// Reference scale in scene units per full turn of longitude.
    pub scale: f64,
    /// Scene position of `(0, 0)`.
    pub translate: (f64, f64),
}

impl GeoProjection {
    /// A Mercator projection.
    pub fn mercator(scale: f64, translate: (f64, f64)) -> Self {
        Self {
            kind: ProjectionKind::Mercator,
            scale,
            translate,
        }
    }

    /// An equirectangular projection.
    pub fn equirectangular(scale: f64, translate: (f64, f64)) -> Self {
        Self {
            kind: ProjectionKind::Equirectangular,
            scale,
            translate,
        }
    }

    /// Projects one coordinate.
    pub fn project(&self, lon: f64, lat: f64) -> Point {
        let x = lon / 360.0;
        let y = match self.kind {
            ProjectionKind::Mercator => {
                let phi = lat.to_radians();
                let y = -(core::f64::consts::FRAC_PI_4 + phi / 2.0).tan().ln()
                    / core::f64::consts::TAU;
                if y.is_nan() { 0.0 } else { y.clamp(-0.5, 0.5) }
            }
            ProjectionKind::Equirectangular => -lat / 360.0,
        };
        Point::new(
            self.scale * x + self.translate.0,
            self.scale * y + self.translate.1,
        )
    }

    /// Renders polygon geometry as a closed path, one subpath per ring.
    pub fn path(&self, geometry: &GeoGeometry) -> BezPath {
        let mut path = BezPath::new();
        for ring in geometry.rings() {
            if self.trace(&mut path, ring) {
                path.close_path();
            }
        }
        path
    }

    /// Renders a line string as an open path.
    pub fn line(&self, coords: &[(f64, f64)]) -> BezPath {
        let mut path = BezPath::new();
        self.trace(&mut path, coords);
        path
    }

    fn trace(&self, path: &mut BezPath, coords: &[(f64, f64)]) -> bool {
        let mut points = coords.iter().map(|&(lon, lat)| self.project(lon, lat));
        let Some(first) = points.next() else {
            return false;
        };
        path.move_to(first);
        for p in points {
            path.line_to(p);
        }
        true
    }

    /// Returns the projected area-weighted centroid of a geometry.
    ///
    /// Degenerate (zero-area) geometry falls back to the mean of its projected vertices.
    /// Returns `None` for geometry without vertices.
    pub fn centroid(&self, geometry: &GeoGeometry) -> Option<Point> {
        let mut area = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        let mut sum = Vec2::ZERO;
        let mut n = 0_usize;
        for ring in geometry.rings() {
            let pts: Vec<Point> = ring.iter().map(|&(lo, la)| self.project(lo, la)).collect();
            for (i, a) in pts.iter().enumerate() {
                let b = pts[(i + 1) % pts.len()];
                let cross = a.x * b.y - b.x * a.y;
                area += cross;
                cx += (a.x + b.x) * cross;
                cy += (a.y + b.y) * cross;
                sum += a.to_vec2();
                n += 1;
            }
        }
        if n == 0 {
            return None;
        }
        if area.abs() > 1e-12 {
            Some(Point::new(cx / (3.0 * area), cy / (3.0 * area)))
        } else {
            Some((sum / n as f64).to_point())
        }
    }
}

/// Samples the great circle between two coordinates.
///
/// The result starts at `source`, ends at `target`, and has interior points every
/// `precision_deg` degrees of arc. Coincident endpoints yield just the two endpoints.
pub fn great_arc(source: (f64, f64), target: (f64, f64), precision_deg: f64) -> Vec<(f64, f64)> {
    let (x0, y0) = (source.0.to_radians(), source.1.to_radians());
    let (x1, y1) = (target.0.to_radians(), target.1.to_radians());
    let (cy0, sy0) = (y0.cos(), y0.sin());
    let (cy1, sy1) = (y1.cos(), y1.sin());
    let (cx0, sx0) = (x0.cos(), x0.sin());
    let (cx1, sx1) = (x1.cos(), x1.sin());

    let cos_d = (sy0 * sy1 + cy0 * cy1 * (x1 - x0).cos()).clamp(-1.0, 1.0);
    let d = cos_d.acos();
    let k = d.sin();

    let mut out = alloc::vec![source];
    let precision = precision_deg.to_radians();
    if k.abs() > 1e-12 && precision > 0.0 {
        let step = precision / d;
        let mut t = step;
        while t < 1.0 {
            let a = (d - t * d).sin() / k;
            let b = (t * d).sin() / k;
            let x = a * cy0 * cx0 + b * cy1 * cx1;
            let y = a * cy0 * sx0 + b * cy1 * sx1;
            let z = a * sy0 + b * sy1;
            let lon = y.atan2(x).to_degrees();
            let lat = z.atan2((x * x + y * y).sqrt()).to_degrees();
            out.push((lon, lat));
            t += step;
        }
    }
    out.push(target);
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use kurbo::PathEl;

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn mercator_origin_and_clamp() {
        let p = GeoProjection::mercator(960.0, (480.0, 300.0));
        let o = p.project(0.0, 0.0);
        assert!(close(o.x, 480.0) && close(o.y, 300.0));
        let e = p.project(180.0, 0.0);
        assert!(close(e.x, 960.0));
        let n = p.project(0.0, 89.999);
        assert!(close(n.y, 300.0 - 480.0));
        let s = p.project(0.0, -90.0);
        assert!(close(s.y, 300.0 + 480.0));
        assert!(p.project(0.0, 45.0).y < 300.0);
    }

    #[test]
    fn equirectangular_is_linear() {
        let p = GeoProjection::equirectangular(360.0, (0.0, 0.0));
        let q = p.project(-90.0, 45.0);
        assert!(close(q.x, -90.0) && close(q.y, -45.0));
    }

    #[test]
    fn path_is_lossless() {
        let ring: Ring = vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (5.0, 12.0), (0.0, 10.0)];
        let geom = GeoGeometry::MultiPolygon(vec![vec![ring.clone()], vec![ring]]);
        let path = GeoProjection::mercator(500.0, (0.0, 0.0)).path(&geom);
        let els = path.elements();
        let moves = els.iter().filter(|e| matches!(e, PathEl::MoveTo(_))).count();
        let lines = els.iter().filter(|e| matches!(e, PathEl::LineTo(_))).count();
        let closes = els.iter().filter(|e| matches!(e, PathEl::ClosePath)).count();
        assert_eq!(moves + lines, geom.vertex_count());
        assert_eq!((moves, closes), (2, 2));
    }

    #[test]
    fn great_arc_endpoints_and_density() {
        let arc = great_arc((0.0, 0.0), (90.0, 0.0), 1.0);
        assert_eq!(arc.first(), Some(&(0.0, 0.0)));
        assert_eq!(arc.last(), Some(&(90.0, 0.0)));
        assert!((91..=92).contains(&arc.len()));
        for &(lon, lat) in &arc {
            assert!(close(lat, 0.0));
            assert!((0.0..=90.0 + 1e-9).contains(&lon));
        }
        assert_eq!(great_arc((3.0, 4.0), (3.0, 4.0), 1.0).len(), 2);
    }

    #[test]
    fn great_arc_bends_poleward() {
        let arc = great_arc((-74.0, 40.7), (2.35, 48.85), 1.0);
        let max_lat = arc.iter().map(|p| p.1).fold(f64::MIN, f64::max);
        assert!(max_lat > 48.85);
    }

    #[test]
    fn centroid_of_square() {
        let ring: Ring = vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        let p = GeoProjection::equirectangular(360.0, (0.0, 0.0));
        let c = p.centroid(&GeoGeometry::Polygon(vec![ring])).unwrap();
        assert!(close(c.x, 5.0) && close(c.y, -5.0));
        assert_eq!(p.centroid(&GeoGeometry::Polygon(vec![])), None);
    }
}
