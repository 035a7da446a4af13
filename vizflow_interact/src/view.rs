// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interface between the controller and a concrete chart.

use kurbo::Rect;
use vizflow_core::Mark;

use crate::error::InteractError;
use crate::state::InteractionState;

/// Marks produced by a view for one frame.
#[derive(Clone, Debug, Default)]
pub struct ViewFrame {
    /// Series marks, in scene coordinates. The controller applies the zoom/pan transform.
    pub marks: Vec<Mark>,
    /// Marks drawn in screen coordinates regardless of zoom/pan (time label, fixed guides).
    pub overlay: Vec<Mark>,
    /// Number of elements excluded because a value could not be mapped or resolved.
    pub excluded: usize,
}

/// A chart the [`crate::InteractionController`] can drive.
///
/// Views are pure with respect to interaction: they read [`InteractionState`] and produce marks,
/// and never hold interaction state of their own.
pub trait View {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// The time extent to animate over, or `None` for static views.
    fn time_extent(&self) -> Option<(f64, f64)> {
        None
    }

    /// Snaps a driven time to a displayable step. Defaults to the nearest whole unit.
    fn snap_time(&self, t: f64) -> f64 {
        t.round()
    }

    /// The screen box that scrubs time when the pointer moves over it.
    ///
    /// Only consulted for views with a time extent.
    fn scrub_bounds(&self) -> Option<Rect> {
        None
    }

    /// Whether wheel and drag gestures zoom and pan this view.
    fn zoomable(&self) -> bool {
        false
    }

    /// Produces the marks for the current state.
    fn render(&self, state: &InteractionState) -> Result<ViewFrame, InteractError>;

    /// Popup lines for a hovered datum, or `None` when the element has no popup.
    fn popup(&self, target: u64, state: &InteractionState) -> Option<Vec<String>> {
        let _ = (target, state);
        None
    }
}
