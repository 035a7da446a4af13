// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node-link graphs with precomputed layout positions.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

/// A graph node.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Node {
    /// Stable identifier.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Layout position in layout units.
    pub position: (f64, f64),
    /// Size in data units (scaled to a radius when rendered).
    pub size: f64,
    /// Category used for color.
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: String,
    /// Free-form string properties.
    #[cfg_attr(feature = "serde", serde(default))]
    pub properties: BTreeMap<String, String>,
}

impl Node {
    /// Creates a node.
    pub fn new(id: impl Into<String>, label: impl Into<String>, position: (f64, f64)) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            position,
            size: 1.0,
            ..Self::default()
        }
    }

    /// Sets the size.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Adds a string property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Returns the stable key derived from the id.
    pub fn key(&self) -> u64 {
        vizflow_core::stable_key(&self.id)
    }
}

/// A directed, weighted edge between two nodes (by id).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Edge {
    /// Source node id.
    pub source: String,
    /// Target node id.
    pub target: String,
    /// Edge weight.
    pub weight: f64,
}

impl Edge {
    /// Creates an edge.
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }

    /// Returns a stable key for the `(source, target)` pair.
    pub fn key(&self) -> u64 {
        crate::relation::pair_key(&self.source, &self.target)
    }
}

/// An immutable node-link graph.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index: HashMap<u64, usize>,
}

impl Graph {
    /// Creates a graph. Later nodes with a duplicate id shadow earlier ones in lookups.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let index = nodes.iter().enumerate().map(|(i, n)| (n.key(), i)).collect();
        Self {
            nodes,
            edges,
            index,
        }
    }

    /// Returns the nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Looks up a node by stable key.
    pub fn node_by_key(&self, key: u64) -> Option<&Node> {
        self.index.get(&key).map(|&i| &self.nodes[i])
    }

    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_by_key(vizflow_core::stable_key(id))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn lookup_by_id_and_key() {
        let g = Graph::new(
            vec![
                Node::new("messi", "Messi", (0.0, 0.0)),
                Node::new("xavi", "Xavi", (1.0, 0.0)),
            ],
            vec![Edge::new("xavi", "messi", 1.0)],
        );
        assert_eq!(g.node("xavi").map(|n| n.label.as_str()), Some("Xavi"));
        let key = g.nodes()[0].key();
        assert_eq!(g.node_by_key(key).map(|n| n.id.as_str()), Some("messi"));
        assert!(g.node("pele").is_none());
    }
}
