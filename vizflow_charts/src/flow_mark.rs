// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flow map generation: projected boundaries plus great-arc links.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;
use peniko::{Brush, Color};
use vizflow_core::{LayerId, Mark, MarkId};
use vizflow_transforms::Relation;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::error::FlowError;
use crate::geo::{GeoFeature, GeoProjection, great_arc};
use crate::ordinal::ScaleOrdinal;

/// Known `(longitude, latitude)` coordinates of relation endpoints, by entity id.
#[derive(Clone, Debug, Default)]
pub struct Endpoints {
    coords: HashMap<String, (f64, f64)>,
}

impl Endpoints {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the coordinates of `id`, replacing earlier ones.
    pub fn insert(&mut self, id: impl Into<String>, lon: f64, lat: f64) {
        self.coords.insert(id.into(), (lon, lat));
    }

    /// Builder-style [`Self::insert`].
    pub fn with(mut self, id: impl Into<String>, lon: f64, lat: f64) -> Self {
        self.insert(id, lon, lat);
        self
    }

    /// Returns the coordinates of `id`.
    pub fn get(&self, id: &str) -> Option<(f64, f64)> {
        self.coords.get(id).copied()
    }

    /// Resolves both ends of a relation.
    pub fn resolve(&self, relation: &Relation) -> Result<((f64, f64), (f64, f64)), FlowError> {
        let missing = |id: &str| FlowError::MissingRelationEndpoint {
            source_id: relation.source.clone(),
            target_id: relation.target.clone(),
            missing: id.to_string(),
        };
        let s = self.get(&relation.source).ok_or_else(|| missing(&relation.source))?;
        let t = self.get(&relation.target).ok_or_else(|| missing(&relation.target))?;
        Ok((s, t))
    }
}

/// Output of link generation.
#[derive(Clone, Debug, Default)]
pub struct FlowMarks {
    /// Generated marks.
    pub marks: Vec<Mark>,
    /// Relations dropped from this frame because an endpoint has no coordinates.
    pub dropped: Vec<FlowError>,
}

/// A flow map: one path per boundary feature and one great-arc path per relation.
#[derive(Clone, Debug)]
pub struct FlowMapSpec {
    /// Id layer for boundary paths.
    pub feature_layer: LayerId,
    /// Id layer for links.
    pub link_layer: LayerId,
    /// Projection shared by boundaries and links.
    pub projection: GeoProjection,
    /// Per-feature fill colors, keyed by feature id. `None` fills every feature with
    /// `feature_fill`.
    pub color: Option<ScaleOrdinal>,
    /// Uniform boundary fill.
    pub feature_fill: Brush,
    /// Boundary outline.
    pub feature_stroke: Brush,
    /// Fill of the highlighted feature.
    pub highlight_fill: Brush,
    /// Link paint.
    pub link_stroke: Brush,
    /// Link width is `sqrt(magnitude) / link_divisor`.
    pub link_divisor: f64,
    /// Great-arc sampling step in degrees.
    pub precision: f64,
}

impl FlowMapSpec {
    /// Creates a flow map spec with gray boundaries, a pale green highlight, and 1° arcs.
    pub fn new(feature_layer: LayerId, link_layer: LayerId, projection: GeoProjection) -> Self {
        Self {
            feature_layer,
            link_layer,
            projection,
            color: None,
            feature_fill: Brush::Solid(Color::from_rgb8(0xcc, 0xcc, 0xcc)),
            feature_stroke: Brush::Solid(Color::WHITE),
            highlight_fill: Brush::Solid(Color::from_rgb8(0xd0, 0xff, 0xd0)),
            link_stroke: Brush::Solid(Color::from_rgba8(0xb2, 0x18, 0x2b, 0xb0)),
            link_divisor: 10_000.0,
            precision: 1.0,
        }
    }

    /// Colors features by id through `color`.
    pub fn with_color(mut self, color: ScaleOrdinal) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the highlight fill.
    pub fn with_highlight_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.highlight_fill = fill.into();
        self
    }

    /// Sets the link paint and width divisor.
    pub fn with_links(mut self, stroke: impl Into<Brush>, divisor: f64) -> Self {
        self.link_stroke = stroke.into();
        self.link_divisor = divisor;
        self
    }

    /// Returns the boundary mark id for a feature id.
    pub fn feature_id(&self, id: &str) -> MarkId {
        MarkId::for_key(self.feature_layer, vizflow_core::stable_key(id))
    }

    /// Returns the link mark id for a relation.
    pub fn link_id(&self, relation: &Relation) -> MarkId {
        MarkId::for_key(self.link_layer, relation.key())
    }

    /// Returns the stroke width of a link.
    pub fn link_width(&self, magnitude: f64) -> f64 {
        magnitude.max(0.0).sqrt() / self.link_divisor
    }

    /// Generates one path per feature, bound to the feature key for hit testing.
    ///
    /// The feature whose id equals `highlight` is filled with `highlight_fill`.
    pub fn feature_marks(&self, features: &[GeoFeature], highlight: Option<&str>) -> Vec<Mark> {
        features
            .iter()
            .map(|f| {
                let fill = if highlight == Some(f.id.as_str()) {
                    self.highlight_fill.clone()
                } else if let Some(color) = &self.color {
                    Brush::Solid(color.map(&f.id))
                } else {
                    self.feature_fill.clone()
                };
                Mark::builder(self.feature_id(&f.id))
                    .z_index(crate::z_order::GEO_FEATURES)
                    .datum(f.key())
                    .path(self.projection.path(&f.geometry))
                    .fill(fill)
                    .stroke(self.feature_stroke.clone(), 0.5)
                    .build()
            })
            .collect()
    }

    /// Generates one great-arc path per relation that `keep` accepts.
    ///
    /// Relations with an unresolved endpoint are dropped and reported; the rest are unaffected.
    pub fn link_marks(
        &self,
        relations: &[Relation],
        endpoints: &Endpoints,
        keep: impl Fn(&Relation) -> bool,
    ) -> FlowMarks {
        let mut out = FlowMarks::default();
        for r in relations.iter().filter(|r| keep(*r)) {
            match endpoints.resolve(r) {
                Ok((s, t)) => {
                    let arc = great_arc(s, t, self.precision);
                    out.marks.push(
                        Mark::builder(self.link_id(r))
                            .z_index(crate::z_order::SERIES_STROKE)
                            .path(self.projection.line(&arc))
                            .fill(Color::TRANSPARENT)
                            .stroke(self.link_stroke.clone(), self.link_width(r.magnitude))
                            .build(),
                    );
                }
                Err(e) => out.dropped.push(e),
            }
        }
        out
    }

    /// Generates the full map for a hover state: every boundary, plus the links touching the
    /// hovered feature (as source or target). Without a hovered feature no links are drawn.
    pub fn marks(
        &self,
        features: &[GeoFeature],
        relations: &[Relation],
        endpoints: &Endpoints,
        hovered: Option<&str>,
    ) -> FlowMarks {
        let mut out = match hovered {
            Some(id) => self.link_marks(relations, endpoints, |r| r.touches(id)),
            None => FlowMarks::default(),
        };
        let mut marks = self.feature_marks(features, hovered);
        marks.append(&mut out.marks);
        out.marks = marks;
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use vizflow_core::MarkPayload;

    use super::*;
    use crate::geo::GeoGeometry;

    fn square(id: &str, lon: f64, lat: f64) -> GeoFeature {
        GeoFeature::new(
            id,
            GeoGeometry::Polygon(vec![vec![
                (lon, lat),
                (lon + 1.0, lat),
                (lon + 1.0, lat + 1.0),
                (lon, lat + 1.0),
            ]]),
        )
    }

    fn spec() -> FlowMapSpec {
        FlowMapSpec::new(
            LayerId(30),
            LayerId(31),
            GeoProjection::mercator(960.0, (480.0, 320.0)),
        )
    }

    fn endpoints() -> Endpoints {
        Endpoints::new()
            .with("DEU", 10.0, 51.0)
            .with("FRA", 2.0, 46.0)
            .with("USA", -98.0, 39.0)
    }

    #[test]
    fn missing_endpoints_are_dropped_and_reported() {
        let relations = vec![
            Relation::new("DEU", "FRA", 4e8),
            Relation::new("DEU", "XXK", 1e6),
            Relation::new("USA", "FRA", 1e8),
        ];
        let out = spec().link_marks(&relations, &endpoints(), |_| true);
        assert_eq!(out.marks.len(), 2);
        assert_eq!(
            out.dropped,
            vec![FlowError::MissingRelationEndpoint {
                source_id: "DEU".into(),
                target_id: "XXK".into(),
                missing: "XXK".into(),
            }]
        );
    }

    #[test]
    fn link_width_is_sqrt_over_divisor() {
        let s = spec();
        assert_eq!(s.link_width(4e8), 2.0);
        let out = s.link_marks(&[Relation::new("DEU", "FRA", 4e8)], &endpoints(), |_| true);
        let MarkPayload::Path(p) = &out.marks[0].payload else {
            panic!("expected path");
        };
        assert_eq!(p.stroke_width, 2.0);
        assert_eq!(out.marks[0].datum, None);
    }

    #[test]
    fn hover_shows_only_touching_links_and_highlights() {
        let s = spec();
        let features = vec![square("DEU", 10.0, 51.0), square("FRA", 2.0, 46.0)];
        let relations = vec![
            Relation::new("DEU", "FRA", 1e6),
            Relation::new("USA", "DEU", 1e6),
            Relation::new("USA", "FRA", 1e6),
        ];
        let idle = s.marks(&features, &relations, &endpoints(), None);
        assert_eq!(idle.marks.len(), 2);

        let hovered = s.marks(&features, &relations, &endpoints(), Some("DEU"));
        assert_eq!(hovered.marks.len(), 4);
        let MarkPayload::Path(deu) = &hovered.marks[0].payload else {
            panic!("expected path");
        };
        assert_eq!(deu.fill, s.highlight_fill);
        let MarkPayload::Path(fra) = &hovered.marks[1].payload else {
            panic!("expected path");
        };
        assert_eq!(fra.fill, s.feature_fill);
    }
}
