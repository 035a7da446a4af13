// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The flow map: country boundaries with links drawn for the hovered country.

use std::collections::HashMap;

use kurbo::{Rect, Size};
use peniko::{Brush, Color};
use tracing::debug;
use vizflow_charts::{BACKGROUND, Endpoints, FlowMapSpec, GeoFeature, GeoProjection};
use vizflow_core::{LayerId, Mark, MarkId};
use vizflow_transforms::Relation;

use crate::error::InteractError;
use crate::state::InteractionState;
use crate::view::{View, ViewFrame};

const BACKDROP: LayerId = LayerId(20);
const FEATURES: LayerId = LayerId(21);
const LINKS: LayerId = LayerId(22);

/// A Mercator map whose hovered feature is highlighted and linked to its partners.
///
/// The whole map, background included, zooms and pans as one group.
#[derive(Clone, Debug)]
pub struct FlowMapView {
    spec: FlowMapSpec,
    size: Size,
    background: Brush,
    features: Vec<GeoFeature>,
    relations: Vec<Relation>,
    endpoints: Endpoints,
    ids: HashMap<u64, String>,
}

impl FlowMapView {
    /// Creates a map `width` wide and `0.6 * width` tall.
    ///
    /// The projection is Mercator with scale `width`, centered at `(width / 2, height / 1.8)`.
    pub fn new(
        width: f64,
        features: Vec<GeoFeature>,
        relations: Vec<Relation>,
        endpoints: Endpoints,
    ) -> Self {
        let size = Size::new(width, width * 0.6);
        let projection = GeoProjection::mercator(width, (size.width / 2.0, size.height / 1.8));
        let ids = features.iter().map(|f| (f.key(), f.id.clone())).collect();
        Self {
            spec: FlowMapSpec::new(FEATURES, LINKS, projection),
            size,
            background: Brush::Solid(Color::WHITE),
            features,
            relations,
            endpoints,
            ids,
        }
    }

    /// Replaces the underlying mark generator, e.g. to restyle links.
    pub fn with_spec(mut self, spec: FlowMapSpec) -> Self {
        self.spec = spec;
        self
    }

    /// Sets the background fill.
    pub fn with_background(mut self, background: impl Into<Brush>) -> Self {
        self.background = background.into();
        self
    }

    /// Returns the map size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the mark generator.
    pub fn spec(&self) -> &FlowMapSpec {
        &self.spec
    }

    /// Returns the feature id for a hit-test key.
    pub fn feature_id(&self, key: u64) -> Option<&str> {
        self.ids.get(&key).map(String::as_str)
    }

    /// Returns the endpoint table for updates.
    pub fn endpoints_mut(&mut self) -> &mut Endpoints {
        &mut self.endpoints
    }

    /// Replaces the relations.
    pub fn set_relations(&mut self, relations: Vec<Relation>) {
        self.relations = relations;
    }
}

impl View for FlowMapView {
    fn name(&self) -> &str {
        "flow_map"
    }

    fn zoomable(&self) -> bool {
        true
    }

    fn render(&self, state: &InteractionState) -> Result<ViewFrame, InteractError> {
        let hovered = state.hover().and_then(|k| self.feature_id(k));
        let out = self
            .spec
            .marks(&self.features, &self.relations, &self.endpoints, hovered);
        for e in &out.dropped {
            debug!(error = %e, "link dropped");
        }

        let mut marks = Vec::with_capacity(out.marks.len() + 1);
        marks.push(
            Mark::builder(MarkId::for_key(BACKDROP, 0))
                .z_index(BACKGROUND)
                .rect(Rect::from_origin_size((0.0, 0.0), self.size))
                .fill(self.background.clone())
                .build(),
        );
        marks.extend(out.marks);
        Ok(ViewFrame {
            marks,
            overlay: Vec::new(),
            excluded: out.dropped.len(),
        })
    }
}
