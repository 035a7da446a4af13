// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The animated bubble chart.

use kurbo::{Insets, Point, Rect, Size};
use tracing::debug;
use vizflow_charts::{
    AxisSpec, BubbleMarkSpec, HeuristicTextMeasurer, ScaleContinuous, ScaleLinear, ScaleLog,
    ScaleSqrt, TimeLabelSpec, format_grouped,
};
use vizflow_core::{LayerId, MarkId};
use vizflow_transforms::{AttrId, Dataset, frame_for};

use crate::error::InteractError;
use crate::state::InteractionState;
use crate::view::{View, ViewFrame};

const BUBBLES: LayerId = LayerId(1);
const TIME_LABEL: LayerId = LayerId(2);
const X_AXIS: LayerId = LayerId(3);
const Y_AXIS: LayerId = LayerId(4);

/// Bubbles positioned by two attributes and sized by a third, swept over time.
///
/// The x scale is logarithmic over `[100, 2e5]`, y is linear over `[0, 100]` and radius is a
/// square-root scale from `[0, 1.5e9]` onto `[1, 40]`. The large time label in the bottom-right
/// corner doubles as the scrub region.
#[derive(Clone, Debug)]
pub struct BubbleView {
    dataset: Dataset,
    extent: (f64, f64),
    plot: Rect,
    size: Size,
    bubbles: BubbleMarkSpec,
    label: TimeLabelSpec,
    x_axis: AxisSpec,
    y_axis: AxisSpec,
    measurer: HeuristicTextMeasurer,
}

impl BubbleView {
    /// Plot margins: left, top, right, bottom.
    pub const MARGIN: Insets = Insets::new(39.5, 19.5, 19.5, 39.5);

    /// Default sweep.
    pub const DEFAULT_EXTENT: (f64, f64) = (1990.0, 2012.0);

    /// Creates a bubble chart for a container `width` wide; the plot height is its width / 1.6.
    ///
    /// `attrs` names the x, y, and radius attributes, which must be tracked by `dataset`.
    pub fn new(
        dataset: Dataset,
        attrs: (&str, &str, &str),
        width: f64,
    ) -> Result<Self, InteractError> {
        let resolve = |name: &str| {
            dataset
                .attr(name)
                .ok_or_else(|| InteractError::UnknownAttribute(name.to_owned()))
        };
        let ids: (AttrId, AttrId, AttrId) =
            (resolve(attrs.0)?, resolve(attrs.1)?, resolve(attrs.2)?);

        let m = Self::MARGIN;
        let w = (width - m.x0 - m.x1).max(1.0);
        let h = w / 1.6;
        let plot = Rect::new(m.x0, m.y0, m.x0 + w, m.y0 + h);

        let x = ScaleContinuous::Log(ScaleLog::new((100.0, 2e5), (plot.x0, plot.x1))?);
        let y = ScaleContinuous::Linear(ScaleLinear::new((0.0, 100.0), (plot.y1, plot.y0))?);
        let r = ScaleContinuous::Sqrt(ScaleSqrt::new((0.0, 1.5e9), (1.0, 40.0))?);

        let label = TimeLabelSpec::new(
            MarkId::for_key(TIME_LABEL, 0),
            Point::new(plot.x1, plot.y1 - 24.0),
            (196.0 * w / 960.0).max(24.0),
        );
        Ok(Self {
            dataset,
            extent: Self::DEFAULT_EXTENT,
            plot,
            size: Size::new(w + m.x0 + m.x1, h + m.y0 + m.y1),
            bubbles: BubbleMarkSpec::new(BUBBLES, ids, x, y, r),
            label,
            x_axis: AxisSpec::bottom(X_AXIS, x)
                .with_tick_formatter(|v| format_grouped(v, 0))
                .with_title("GDP per capita (current US$)"),
            y_axis: AxisSpec::left(Y_AXIS, y).with_title("Internet users by 100 people"),
            measurer: HeuristicTextMeasurer,
        })
    }

    /// Sets the swept time extent.
    ///
    /// Fails with [`InteractError::EmptyTimeExtent`] when either end is non-finite or the
    /// extent runs backwards.
    pub fn with_extent(mut self, min: f64, max: f64) -> Result<Self, InteractError> {
        if !(min.is_finite() && max.is_finite()) || min > max {
            return Err(InteractError::EmptyTimeExtent { min, max });
        }
        self.extent = (min, max);
        Ok(self)
    }

    /// Shows only entities of `category`, or all of them.
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.bubbles = self.bubbles.with_category(category);
        self
    }

    /// Returns the dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Returns the bubble generator.
    pub fn bubbles(&self) -> &BubbleMarkSpec {
        &self.bubbles
    }

    /// Returns the plot area.
    pub fn plot(&self) -> Rect {
        self.plot
    }

    /// Returns the full chart size including margins.
    pub fn size(&self) -> Size {
        self.size
    }
}

impl View for BubbleView {
    fn name(&self) -> &str {
        "bubble"
    }

    fn time_extent(&self) -> Option<(f64, f64)> {
        Some(self.extent)
    }

    fn scrub_bounds(&self) -> Option<Rect> {
        Some(self.label.bounds(&self.measurer, self.extent))
    }

    fn render(&self, state: &InteractionState) -> Result<ViewFrame, InteractError> {
        let t = state.time().unwrap_or(self.extent.0);
        let out = self.bubbles.marks(&frame_for(&self.dataset, t))?;
        for s in &out.skipped {
            debug!(entity = %s.name, time = t, error = %s.error, "bubble skipped");
        }

        let mut overlay = self.x_axis.marks(self.plot);
        overlay.extend(self.y_axis.marks(self.plot));
        overlay.push(self.label.mark(t, state.is_scrubbing()));
        Ok(ViewFrame {
            marks: out.marks,
            overlay,
            excluded: out.skipped.len(),
        })
    }

    fn popup(&self, target: u64, _state: &InteractionState) -> Option<Vec<String>> {
        self.dataset
            .entity_by_key(target)
            .map(|e| vec![e.name.clone()])
    }
}
