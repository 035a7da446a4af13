// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A static labelled scatterplot.

use vizflow_charts::{AxisSpec, PointMarkSpec, ScatterDatum, format_dollar, format_grouped};
use vizflow_core::LayerId;

use crate::error::InteractError;
use crate::state::InteractionState;
use crate::view::{View, ViewFrame};

const POINTS: LayerId = LayerId(50);
const X_AXIS: LayerId = LayerId(52);
const Y_AXIS: LayerId = LayerId(53);

/// Constant-radius points with a short label each; the popup spells out both values.
///
/// A dollar-formatted bottom axis and a plain left axis, five ticks each, frame the plot.
#[derive(Clone, Debug)]
pub struct ScatterView {
    spec: PointMarkSpec,
    data: Vec<ScatterDatum>,
}

impl ScatterView {
    /// Creates a scatterplot `width` wide.
    pub fn new(width: f64, data: Vec<ScatterDatum>) -> Self {
        Self {
            spec: PointMarkSpec::new(POINTS, width),
            data,
        }
    }

    /// Returns the mark generator.
    pub fn spec(&self) -> &PointMarkSpec {
        &self.spec
    }

    /// Returns the data.
    pub fn data(&self) -> &[ScatterDatum] {
        &self.data
    }
}

impl View for ScatterView {
    fn name(&self) -> &str {
        "scatter"
    }

    fn render(&self, _state: &InteractionState) -> Result<ViewFrame, InteractError> {
        let (xs, ys) = self.spec.scales(&self.data)?;
        let plot = self.spec.plot();
        let mut overlay = AxisSpec::bottom(X_AXIS, xs)
            .with_tick_count(5)
            .with_tick_formatter(format_dollar)
            .marks(plot);
        overlay.extend(AxisSpec::left(Y_AXIS, ys).with_tick_count(5).marks(plot));
        Ok(ViewFrame {
            marks: self.spec.marks(&self.data)?,
            overlay,
            ..ViewFrame::default()
        })
    }

    fn popup(&self, target: u64, _state: &InteractionState) -> Option<Vec<String>> {
        let d = self.data.iter().find(|d| d.key() == target)?;
        Some(vec![format!(
            "{}: {}, {}",
            d.title,
            format_dollar(d.x),
            format_grouped(d.y, 0)
        )])
    }
}
