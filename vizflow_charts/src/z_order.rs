// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for chart-generated marks.
//!
//! `vizflow_core` scenes paint by `(z_index, submission order, MarkId)`. Marks within one layer
//! share a z-index, so the order in which a generator emits them is the order they are drawn.

/// Background fills.
pub const BACKGROUND: i32 = -100;
/// Geographic boundaries.
pub const GEO_FEATURES: i32 = -50;

/// Axis domain lines and tick marks.
pub const AXIS_RULES: i32 = -30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = -25;
/// Axis titles.
pub const AXIS_TITLES: i32 = -20;
/// The time label. It sits behind the series like a watermark; its scrub region is handled
/// outside hit testing.
pub const TIME_LABEL: i32 = -10;

/// Filled series marks (bars).
pub const SERIES_FILL: i32 = 0;
/// Stroked series marks (flow links, graph edges).
pub const SERIES_STROKE: i32 = 10;
/// Point series marks (bubbles, scatter circles, graph nodes).
pub const SERIES_POINTS: i32 = 20;

/// Per-datum labels.
pub const LABELS: i32 = 40;

/// Popup background.
pub const POPUP: i32 = 90;
/// Popup text lines.
pub const POPUP_TEXT: i32 = 91;
