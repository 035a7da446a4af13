// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A node-link graph with ranked-list popups.

use kurbo::Size;
use vizflow_charts::GraphMarkSpec;
use vizflow_core::LayerId;
use vizflow_transforms::Graph;

use crate::error::InteractError;
use crate::popup::ranked_list;
use crate::state::InteractionState;
use crate::view::{View, ViewFrame};

/// A pre-laid-out graph fitted to its box. Hovering a node lists its `|`-delimited ranking
/// property; nodes without the property have no popup.
#[derive(Clone, Debug)]
pub struct GraphView {
    spec: GraphMarkSpec,
    graph: Graph,
    property: String,
    header: String,
}

impl GraphView {
    /// Default ranking property.
    pub const DEFAULT_PROPERTY: &'static str = "votes";

    /// Creates a graph view of `size`.
    pub fn new(size: Size, graph: Graph) -> Self {
        Self {
            spec: GraphMarkSpec::new(LayerId(60), size),
            graph,
            property: Self::DEFAULT_PROPERTY.to_owned(),
            header: "Votes given to:".to_owned(),
        }
    }

    /// Sets the ranking property and the popup header line.
    pub fn with_ranking(mut self, property: impl Into<String>, header: impl Into<String>) -> Self {
        self.property = property.into();
        self.header = header.into();
        self
    }

    /// Returns the graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Returns the mark generator.
    pub fn spec(&self) -> &GraphMarkSpec {
        &self.spec
    }
}

impl View for GraphView {
    fn name(&self) -> &str {
        "graph"
    }

    fn zoomable(&self) -> bool {
        true
    }

    fn render(&self, _state: &InteractionState) -> Result<ViewFrame, InteractError> {
        Ok(ViewFrame {
            marks: self.spec.marks(&self.graph),
            ..ViewFrame::default()
        })
    }

    fn popup(&self, target: u64, _state: &InteractionState) -> Option<Vec<String>> {
        let node = self.graph.node_by_key(target)?;
        let raw = node.properties.get(&self.property)?;
        Some(ranked_list(&self.header, raw, '|'))
    }
}
