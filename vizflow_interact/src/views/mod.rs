// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ready-made views.
//!
//! Each view derives every range from a container width, the way the charts size themselves
//! to their page column.

mod bar;
mod bubble;
mod flow_map;
mod graph;
mod scatter;

pub use bar::BarView;
pub use bubble::BubbleView;
pub use flow_map::FlowMapView;
pub use graph::GraphView;
pub use scatter::ScatterView;
