// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! An [`AxisSpec`] pairs a continuous scale with an `orient`, and generates a domain line, tick
//! marks, tick labels, and an optional title for a plot rectangle. Axes are static guides: their
//! ids depend only on the layer and tick index, so re-rendering an unchanged axis produces no
//! diffs.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect};
use peniko::{Brush, Color};
use vizflow_core::{LayerId, Mark, MarkId, TextAnchor, TextBaseline};

use crate::format::format_grouped;
use crate::scale::ScaleContinuous;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// A paint + width pair for stroked paths (domain lines, ticks).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(Color::BLACK, 1.0)
    }
}

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the domain line and tick marks.
    pub rule: StrokeStyle,
    /// Fill for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
    /// Fill for the title.
    pub title_fill: Brush,
    /// Font size for the title.
    pub title_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            rule: rule.clone(),
            label_fill: rule.brush.clone(),
            label_font_size: 10.0,
            title_fill: rule.brush,
            title_font_size: 11.0,
        }
    }
}

/// Where an axis sits relative to the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// Horizontal axis along the bottom edge.
    Bottom,
    /// Vertical axis along the left edge.
    Left,
}

/// An axis specification.
#[derive(Clone)]
pub struct AxisSpec {
    /// Id layer for the axis marks.
    pub layer: LayerId,
    /// The scale the axis describes. Its range must be in plot coordinates.
    pub scale: ScaleContinuous,
    /// Axis placement.
    pub orient: AxisOrient,
    /// Approximate number of ticks for linear scales.
    pub tick_count: usize,
    /// Tick length, pointing away from the plot.
    pub tick_size: f64,
    /// Gap between the tick end and its label.
    pub tick_padding: f64,
    /// Styling.
    pub style: AxisStyle,
    /// Optional title, drawn inside the plot at the axis's far end.
    pub title: Option<String>,
    /// Optional tick label formatter. Defaults to grouped integers (`1,000`).
    pub tick_formatter: Option<Arc<dyn Fn(f64) -> String>>,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("layer", &self.layer)
            .field("scale", &self.scale)
            .field("orient", &self.orient)
            .field("tick_count", &self.tick_count)
            .field("tick_size", &self.tick_size)
            .field("tick_padding", &self.tick_padding)
            .field("style", &self.style)
            .field("title", &self.title)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .finish()
    }
}

impl AxisSpec {
    /// Creates an axis with 10 ticks of size 6 and 3px label padding.
    pub fn new(layer: LayerId, scale: ScaleContinuous, orient: AxisOrient) -> Self {
        Self {
            layer,
            scale,
            orient,
            tick_count: 10,
            tick_size: 6.0,
            tick_padding: 3.0,
            style: AxisStyle::default(),
            title: None,
            tick_formatter: None,
        }
    }

    /// Convenience constructor for a bottom axis.
    pub fn bottom(layer: LayerId, scale: ScaleContinuous) -> Self {
        Self::new(layer, scale, AxisOrient::Bottom)
    }

    /// Convenience constructor for a left axis.
    pub fn left(layer: LayerId, scale: ScaleContinuous) -> Self {
        Self::new(layer, scale, AxisOrient::Left)
    }

    /// Sets the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets the styling.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the tick label formatter.
    pub fn with_tick_formatter(mut self, f: impl Fn(f64) -> String + 'static) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    fn format_tick(&self, v: f64) -> String {
        match &self.tick_formatter {
            Some(f) => f(v),
            None => format_grouped(v, 0),
        }
    }

    /// Returns the mark id of the `i`-th tick line.
    pub fn tick_id(&self, i: usize) -> MarkId {
        MarkId::for_key(self.layer, 1 + i as u64)
    }

    /// Generates the axis marks for `plot`.
    pub fn marks(&self, plot: Rect) -> Vec<Mark> {
        let ticks = self.scale.ticks(self.tick_count);
        let mut out = Vec::with_capacity(2 * ticks.len() + 2);

        let (d0, d1) = match self.orient {
            AxisOrient::Bottom => (Point::new(plot.x0, plot.y1), Point::new(plot.x1, plot.y1)),
            AxisOrient::Left => (Point::new(plot.x0, plot.y0), Point::new(plot.x0, plot.y1)),
        };
        out.push(self.rule(MarkId::for_key(self.layer, 0), d0, d1));

        let reach = self.tick_size + self.tick_padding;
        for (i, v) in ticks.into_iter().enumerate() {
            let p = self.scale.map(v);
            let (a, b, label, anchor, baseline) = match self.orient {
                AxisOrient::Bottom => (
                    Point::new(p, plot.y1),
                    Point::new(p, plot.y1 + self.tick_size),
                    Point::new(p, plot.y1 + reach),
                    TextAnchor::Middle,
                    TextBaseline::Hanging,
                ),
                AxisOrient::Left => (
                    Point::new(plot.x0, p),
                    Point::new(plot.x0 - self.tick_size, p),
                    Point::new(plot.x0 - reach, p),
                    TextAnchor::End,
                    TextBaseline::Middle,
                ),
            };
            out.push(self.rule(self.tick_id(i), a, b));
            out.push(
                TextMarkSpec::new(
                    MarkId::for_key(self.layer, 1000 + i as u64),
                    label,
                    self.format_tick(v),
                )
                .with_font_size(self.style.label_font_size)
                .with_fill(self.style.label_fill.clone())
                .with_anchor(anchor)
                .with_baseline(baseline)
                .with_z_index(z_order::AXIS_LABELS)
                .mark(),
            );
        }

        if let Some(title) = &self.title {
            let spec = match self.orient {
                AxisOrient::Bottom => TextMarkSpec::new(
                    self.title_id(),
                    Point::new(plot.x1, plot.y1 - 6.0),
                    title.clone(),
                )
                .with_baseline(TextBaseline::Alphabetic),
                AxisOrient::Left => TextMarkSpec::new(
                    self.title_id(),
                    Point::new(plot.x0 + 6.0, plot.y0),
                    title.clone(),
                )
                .with_baseline(TextBaseline::Hanging)
                .with_angle(-90.0),
            };
            out.push(
                spec.with_anchor(TextAnchor::End)
                    .with_font_size(self.style.title_font_size)
                    .with_fill(self.style.title_fill.clone())
                    .with_z_index(z_order::AXIS_TITLES)
                    .mark(),
            );
        }
        out
    }

    fn title_id(&self) -> MarkId {
        MarkId::for_key(self.layer, 9000)
    }

    fn rule(&self, id: MarkId, a: Point, b: Point) -> Mark {
        let mut path = BezPath::new();
        path.move_to(a);
        path.line_to(b);
        Mark::builder(id)
            .z_index(z_order::AXIS_RULES)
            .path(path)
            .fill(Color::TRANSPARENT)
            .stroke(self.style.rule.brush.clone(), self.style.rule.stroke_width)
            .build()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use vizflow_core::MarkPayload;

    use super::*;
    use crate::scale::{ScaleLinear, ScaleLog};

    fn texts(marks: &[Mark]) -> std::vec::Vec<(Point, String)> {
        marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some((t.pos, t.text.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn bottom_log_axis_labels_decades() {
        let plot = Rect::new(0.0, 0.0, 900.0, 560.0);
        let x = ScaleContinuous::Log(ScaleLog::new((100.0, 2e5), (0.0, 900.0)).unwrap());
        let marks = AxisSpec::bottom(LayerId(70), x).marks(plot);
        let labels = texts(&marks);
        let names: std::vec::Vec<&str> = labels.iter().map(|(_, s)| s.as_str()).collect();
        assert_eq!(names, ["100", "1,000", "10,000", "100,000"]);
        assert!(labels.iter().all(|(p, _)| (p.y - 569.0).abs() < 1e-9));
        assert!(labels[0].0.x.abs() < 1e-9);
    }

    #[test]
    fn left_axis_with_title() {
        let plot = Rect::new(0.0, 0.0, 900.0, 500.0);
        let y = ScaleContinuous::Linear(ScaleLinear::new((0.0, 100.0), (500.0, 0.0)).unwrap());
        let marks = AxisSpec::left(LayerId(71), y)
            .with_title("Internet users by 100 people")
            .marks(plot);
        // Domain, 11 ticks with labels, and the title.
        assert_eq!(marks.len(), 1 + 22 + 1);
        let title = marks.last().unwrap();
        let MarkPayload::Text(t) = &title.payload else {
            panic!("expected text");
        };
        assert_eq!(t.angle, -90.0);
        assert!(marks.iter().all(|m| m.datum.is_none()));
    }

    #[test]
    fn ids_are_stable_across_calls() {
        let plot = Rect::new(0.0, 0.0, 100.0, 100.0);
        let y = ScaleContinuous::Linear(ScaleLinear::new((0.0, 1.0), (100.0, 0.0)).unwrap());
        let spec = AxisSpec::left(LayerId(3), y).with_tick_formatter(|v| alloc::format!("{v:.1}"));
        let a: std::vec::Vec<MarkId> = spec.marks(plot).iter().map(|m| m.id).collect();
        let b: std::vec::Vec<MarkId> = spec.marks(plot).iter().map(|m| m.id).collect();
        assert_eq!(a, b);
        assert_eq!(a[1], spec.tick_id(0));
    }
}
