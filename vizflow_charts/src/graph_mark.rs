// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node-link graph generation.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{BezPath, Point, Rect, Size};
use peniko::{Brush, Color};
use vizflow_core::{LayerId, Mark, MarkId, TextAnchor};
use vizflow_transforms::{Edge, Graph};

use crate::ordinal::ScaleOrdinal;
use crate::scale::{ScaleLinear, infer_domain_f64};
use crate::text_mark::TextMarkSpec;

/// A node-link graph drawn from precomputed layout positions.
///
/// Layout positions are fitted into the container (uniform scale, centered). Node sizes map
/// linearly into `node_size` and edge weights into `edge_width`; when every node (or edge) has
/// the same value the midpoint of the range is used.
#[derive(Clone, Debug)]
pub struct GraphMarkSpec {
    /// Id layer for nodes. Edges use the next layer, labels the one after.
    pub layer: LayerId,
    /// Container size.
    pub size: Size,
    /// Inset from the container edges.
    pub padding: f64,
    /// Node radius range.
    pub node_size: (f64, f64),
    /// Edge width range.
    pub edge_width: (f64, f64),
    /// Node colors by category.
    pub color: ScaleOrdinal,
    /// Draw edges as quadratic curves instead of straight lines.
    pub curved: bool,
    /// Nodes at least this large (after scaling) get a label. `None` disables labels.
    pub label_threshold: Option<f64>,
    /// Label fill.
    pub label_fill: Brush,
}

impl GraphMarkSpec {
    /// Creates a graph spec with node radii in `[1, 40]`, edge widths in `[0, 2]` and curved
    /// edges.
    pub fn new(layer: LayerId, size: Size) -> Self {
        Self {
            layer,
            size,
            padding: 20.0,
            node_size: (1.0, 40.0),
            edge_width: (0.0, 2.0),
            color: ScaleOrdinal::category20(),
            curved: true,
            label_threshold: Some(2.0),
            label_fill: Brush::Solid(Color::BLACK),
        }
    }

    /// Sets the node radius range.
    pub fn with_node_size(mut self, min: f64, max: f64) -> Self {
        self.node_size = (min, max);
        self
    }

    /// Sets the edge width range.
    pub fn with_edge_width(mut self, min: f64, max: f64) -> Self {
        self.edge_width = (min, max);
        self
    }

    /// Chooses curved or straight edges.
    pub fn with_curved(mut self, curved: bool) -> Self {
        self.curved = curved;
        self
    }

    /// Sets the label threshold.
    pub fn with_label_threshold(mut self, threshold: Option<f64>) -> Self {
        self.label_threshold = threshold;
        self
    }

    /// Returns the node mark id for a node key.
    pub fn node_id(&self, key: u64) -> MarkId {
        MarkId::for_key(self.layer, key)
    }

    fn sub_layer(&self, n: u32) -> LayerId {
        LayerId(self.layer.0.wrapping_add(n))
    }

    /// Returns the scene position of every node, by node key.
    pub fn layout(&self, graph: &Graph) -> HashMap<u64, Point> {
        let xs = infer_domain_f64(graph.nodes().iter().map(|n| n.position.0));
        let ys = infer_domain_f64(graph.nodes().iter().map(|n| n.position.1));
        let (Some((x0, x1)), Some((y0, y1))) = (xs, ys) else {
            return HashMap::new();
        };
        let avail = Rect::new(
            self.padding,
            self.padding,
            self.size.width - self.padding,
            self.size.height - self.padding,
        );
        let ratio = {
            let rx = if x1 > x0 { avail.width() / (x1 - x0) } else { f64::INFINITY };
            let ry = if y1 > y0 { avail.height() / (y1 - y0) } else { f64::INFINITY };
            let r = rx.min(ry);
            if r.is_finite() { r } else { 1.0 }
        };
        let mid = Point::new((x0 + x1) / 2.0, (y0 + y1) / 2.0);
        let center = avail.center();
        graph
            .nodes()
            .iter()
            .filter(|n| n.position.0.is_finite() && n.position.1.is_finite())
            .map(|n| {
                let p = Point::new(
                    center.x + (n.position.0 - mid.x) * ratio,
                    center.y + (n.position.1 - mid.y) * ratio,
                );
                (n.key(), p)
            })
            .collect()
    }

    fn edge_path(&self, a: Point, b: Point) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(a);
        if self.curved {
            let ctrl = Point::new(
                (a.x + b.x) / 2.0 + (b.y - a.y) / 4.0,
                (a.y + b.y) / 2.0 + (a.x - b.x) / 4.0,
            );
            path.quad_to(ctrl, b);
        } else {
            path.line_to(b);
        }
        path
    }

    /// Generates edges (beneath), then nodes, then labels.
    ///
    /// Nodes are bound to their keys for hit testing. Edges whose endpoints are not in the
    /// graph are skipped.
    pub fn marks(&self, graph: &Graph) -> Vec<Mark> {
        let positions = self.layout(graph);
        let node_scale = range_mapper(graph.nodes().iter().map(|n| n.size), self.node_size);
        let edge_scale = range_mapper(graph.edges().iter().map(|e| e.weight), self.edge_width);

        let mut marks = Vec::with_capacity(graph.nodes().len() * 2 + graph.edges().len());
        let edge_layer = self.sub_layer(1);
        for e in graph.edges() {
            let Some((a, b, color)) = self.endpoints(graph, &positions, e) else {
                continue;
            };
            marks.push(
                Mark::builder(MarkId::for_key(edge_layer, e.key()))
                    .z_index(crate::z_order::SERIES_STROKE)
                    .path(self.edge_path(a, b))
                    .fill(Color::TRANSPARENT)
                    .stroke(color, edge_scale(e.weight))
                    .build(),
            );
        }

        let label_layer = self.sub_layer(2);
        for n in graph.nodes() {
            let key = n.key();
            let Some(&p) = positions.get(&key) else {
                continue;
            };
            let r = node_scale(n.size);
            marks.push(
                Mark::builder(self.node_id(key))
                    .z_index(crate::z_order::SERIES_POINTS)
                    .datum(key)
                    .circle(p, r)
                    .fill(self.color.map(&n.category))
                    .build(),
            );
            if self.label_threshold.is_some_and(|t| r >= t) {
                marks.push(
                    TextMarkSpec::new(
                        MarkId::for_key(label_layer, key),
                        Point::new(p.x + r + 3.0, p.y),
                        n.label.clone(),
                    )
                    .with_anchor(TextAnchor::Start)
                    .with_fill(self.label_fill.clone())
                    .mark(),
                );
            }
        }
        marks
    }

    fn endpoints(
        &self,
        graph: &Graph,
        positions: &HashMap<u64, Point>,
        edge: &Edge,
    ) -> Option<(Point, Point, Color)> {
        let s = graph.node(&edge.source)?;
        let t = graph.node(&edge.target)?;
        let a = *positions.get(&s.key())?;
        let b = *positions.get(&t.key())?;
        Some((a, b, self.color.map(&s.category)))
    }
}

fn range_mapper(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> impl Fn(f64) -> f64 {
    let scale = infer_domain_f64(values).and_then(|d| ScaleLinear::new(d, range).ok());
    let mid = (range.0 + range.1) / 2.0;
    move |v| match scale {
        Some(s) if v.is_finite() => s.map(v),
        _ => mid,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use vizflow_core::MarkPayload;
    use vizflow_transforms::Node;

    use super::*;

    fn graph() -> Graph {
        Graph::new(
            vec![
                Node::new("messi", "Messi", (0.0, 0.0)).with_size(100.0),
                Node::new("xavi", "Xavi", (10.0, 5.0)).with_size(10.0),
                Node::new("iniesta", "Iniesta", (-10.0, -5.0)).with_size(55.0),
            ],
            vec![
                Edge::new("xavi", "messi", 5.0),
                Edge::new("iniesta", "messi", 1.0),
                Edge::new("iniesta", "nobody", 3.0),
            ],
        )
    }

    #[test]
    fn layout_fits_the_container() {
        let spec = GraphMarkSpec::new(LayerId(40), Size::new(400.0, 300.0));
        let pos = spec.layout(&graph());
        assert_eq!(pos.len(), 3);
        for p in pos.values() {
            assert!((20.0..=380.0).contains(&p.x) && (20.0..=280.0).contains(&p.y));
        }
        let messi = pos[&vizflow_core::stable_key("messi")];
        assert!((messi.x - 200.0).abs() < 1e-9 && (messi.y - 150.0).abs() < 1e-9);
    }

    #[test]
    fn sizes_and_widths_span_their_ranges() {
        let spec = GraphMarkSpec::new(LayerId(40), Size::new(400.0, 300.0))
            .with_label_threshold(None);
        let marks = spec.marks(&graph());
        let edges: std::vec::Vec<f64> = marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Path(p) => Some(p.stroke_width),
                _ => None,
            })
            .collect();
        assert_eq!(edges, vec![2.0, 0.0]);
        let radii: std::vec::Vec<f64> = marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Circle(c) => Some(c.circle.radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii.len(), 3);
        assert!((radii[0] - 40.0).abs() < 1e-9);
        assert!((radii[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn edges_paint_beneath_nodes_and_nodes_are_hittable() {
        let spec = GraphMarkSpec::new(LayerId(40), Size::new(400.0, 300.0));
        let marks = spec.marks(&graph());
        let first_node = marks.iter().position(|m| m.datum.is_some()).unwrap();
        assert!(marks[..first_node].iter().all(|m| m.z_index < marks[first_node].z_index));
        let messi = vizflow_core::stable_key("messi");
        assert!(marks.iter().any(|m| m.id == spec.node_id(messi) && m.datum == Some(messi)));
    }
}
