// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales and mark generators for vizflow.
//!
//! This crate is the layer between resolved data and `vizflow_core` marks:
//! - **Scales** map data values into scene coordinates: linear, log, and square-root
//!   ([`ScaleContinuous`]), categorical colors ([`ScaleOrdinal`]), and geographic projections
//!   ([`GeoProjection`]).
//! - **Mark generators** (`*Spec` types) turn a [`vizflow_transforms::Frame`] or a list of data
//!   into stable-identity marks suitable for incremental diffing with
//!   [`vizflow_core::Scene::tick`].
//! - **Guides**: axes ([`AxisSpec`]) and the scrubbable time label ([`TimeLabelSpec`]).
//!
//! Generators never fail as a whole because one datum is bad. Per-element failures are either
//! filtered out or reported next to the marks ([`BubbleMarks::skipped`],
//! [`FlowMarks::dropped`]); configuration errors surface when scales are built.
//!
//! Text shaping and layout are out of scope; text marks store unshaped strings and a
//! [`TextMeasurer`] estimates their bounds.

#![no_std]

extern crate alloc;

mod axis;
mod bar_mark;
mod bubble_mark;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod flow_mark;
mod format;
mod geo;
mod graph_mark;
mod measure;
mod ordinal;
#[cfg(test)]
mod pipeline_tests;
mod point_mark;
mod popup_mark;
mod scale;
mod text_mark;
mod z_order;

pub use axis::{AxisOrient, AxisSpec, AxisStyle, StrokeStyle};
pub use bar_mark::{BarDatum, BarMarkSpec};
pub use bubble_mark::{BubbleMarkSpec, BubbleMarks, SkippedBubble};
pub use error::{ChartError, FlowError, ScaleError, ScaleKind};
pub use flow_mark::{Endpoints, FlowMapSpec, FlowMarks};
pub use format::{format_dollar, format_grouped, format_percent, format_step};
pub use geo::{GeoFeature, GeoGeometry, GeoProjection, ProjectionKind, Ring, great_arc};
pub use graph_mark::GraphMarkSpec;
pub use measure::{HeuristicTextMeasurer, TextMeasurer, text_bounds};
pub use ordinal::{CATEGORY10, CATEGORY20, ScaleOrdinal};
pub use point_mark::{PointMarkSpec, ScatterDatum};
pub use popup_mark::PopupSpec;
pub use scale::{
    Scale, ScaleBand, ScaleContinuous, ScaleLinear, ScaleLinearSpec, ScaleLog, ScaleLogSpec,
    ScaleSpec, ScaleSqrt, ScaleSqrtSpec, infer_domain, infer_domain_f64,
};
pub use text_mark::{TextMarkSpec, TimeLabelSpec};
pub use z_order::*;
