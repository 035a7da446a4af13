// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Labelled scatterplot point generation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::{Brush, Color};
use vizflow_core::{LayerId, Mark, MarkId, TextAnchor};

use crate::error::ScaleError;
use crate::scale::{ScaleContinuous, ScaleLinearSpec, infer_domain_f64};
use crate::text_mark::TextMarkSpec;

/// One scatterplot point.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterDatum {
    /// Stable identifier.
    pub id: String,
    /// X value.
    pub x: f64,
    /// Y value.
    pub y: f64,
    /// Short label drawn on the point.
    pub label: String,
    /// Long title (tooltip content).
    pub title: String,
}

impl ScatterDatum {
    /// Creates a datum whose id and title are its label.
    ///
    /// Ids must be unique within one chart: data sharing an id share a [`MarkId`], and the
    /// later one replaces the earlier in the scene. Use [`ScatterDatum::with_id`] for repeated
    /// labels.
    pub fn new(label: impl Into<String>, x: f64, y: f64) -> Self {
        let label = label.into();
        Self {
            id: label.clone(),
            x,
            y,
            title: label.clone(),
            label,
        }
    }

    /// Sets the stable identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Returns the stable key of the datum's id.
    pub fn key(&self) -> u64 {
        vizflow_core::stable_key(&self.id)
    }
}

/// A labelled scatterplot with constant-radius circles.
///
/// Scales run from zero to the largest value on each axis ("niced"), with the y range inverted
/// so larger values sit higher. Points occupy `layer`, labels the following layer.
#[derive(Clone, Debug)]
pub struct PointMarkSpec {
    /// Point layer; labels use the next layer.
    pub layer: LayerId,
    /// Plot width.
    pub width: f64,
    /// Plot height.
    pub height: f64,
    /// Inset from the plot edges.
    pub padding: f64,
    /// Circle radius.
    pub radius: f64,
    /// Circle fill.
    pub fill: Brush,
    /// Label fill.
    pub text_fill: Brush,
    /// Label font size.
    pub font_size: f64,
    /// Label offset below the circle center.
    pub label_dy: f64,
}

impl PointMarkSpec {
    /// Creates a scatterplot of `width` with height `width / 2`, 25px padding and 12px points.
    pub fn new(layer: LayerId, width: f64) -> Self {
        Self {
            layer,
            width,
            height: width / 2.0,
            padding: 25.0,
            radius: 12.0,
            fill: Brush::Solid(Color::from_rgb8(0x46, 0x82, 0xb4)),
            text_fill: Brush::Solid(Color::WHITE),
            font_size: 9.0,
            label_dy: 3.0,
        }
    }

    /// Sets the circle radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the circle fill.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Returns the point mark id for a datum key.
    pub fn point_id(&self, key: u64) -> MarkId {
        MarkId::for_key(self.layer, key)
    }

    /// Returns the plot area the scales map into; the axes run along its bottom and left edges.
    pub fn plot(&self) -> Rect {
        Rect::new(
            self.padding,
            self.padding,
            self.width - 2.0 * self.padding,
            self.height - self.padding,
        )
    }

    /// Builds the `(x, y)` scales for `data`.
    ///
    /// An axis without a positive finite maximum (no data, or all zeros) falls back to the
    /// domain `[0, 1]`, so zeros sit on the axis origin.
    pub fn scales(
        &self,
        data: &[ScatterDatum],
    ) -> Result<(ScaleContinuous, ScaleContinuous), ScaleError> {
        let plot = self.plot();
        let x = ScaleLinearSpec::new((0.0, positive_max(data.iter().map(|d| d.x))))
            .with_nice(true)
            .instantiate((plot.x0, plot.x1))?;
        let y = ScaleLinearSpec::new((0.0, positive_max(data.iter().map(|d| d.y))))
            .with_nice(true)
            .instantiate((plot.y1, plot.y0))?;
        Ok((ScaleContinuous::Linear(x), ScaleContinuous::Linear(y)))
    }

    /// Generates one circle and one centered label per datum.
    ///
    /// Data with non-finite coordinates is skipped.
    pub fn marks(&self, data: &[ScatterDatum]) -> Result<Vec<Mark>, ScaleError> {
        let (xs, ys) = self.scales(data)?;
        let label_layer = LayerId(self.layer.0.wrapping_add(1));
        let mut marks = Vec::with_capacity(data.len() * 2);
        for d in data.iter().filter(|d| d.x.is_finite() && d.y.is_finite()) {
            let key = d.key();
            let center = Point::new(xs.map(d.x), ys.map(d.y));
            marks.push(
                Mark::builder(self.point_id(key))
                    .z_index(crate::z_order::SERIES_POINTS)
                    .datum(key)
                    .circle(center, self.radius)
                    .fill(self.fill.clone())
                    .build(),
            );
            marks.push(
                TextMarkSpec::new(
                    MarkId::for_key(label_layer, key),
                    Point::new(center.x, center.y + self.label_dy),
                    d.label.clone(),
                )
                .with_anchor(TextAnchor::Middle)
                .with_font_size(self.font_size)
                .with_fill(self.text_fill.clone())
                .mark(),
            );
        }
        Ok(marks)
    }
}

fn positive_max(values: impl Iterator<Item = f64>) -> f64 {
    infer_domain_f64(values)
        .map(|(_, max)| max)
        .filter(|max| *max > 0.0)
        .unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use vizflow_core::MarkPayload;

    use super::*;

    #[test]
    fn larger_y_sits_higher() {
        let spec = PointMarkSpec::new(LayerId(20), 400.0);
        let data = vec![
            ScatterDatum::new("lo", 10.0, 1.0),
            ScatterDatum::new("hi", 10.0, 9.0),
        ];
        let marks = spec.marks(&data).unwrap();
        assert_eq!(marks.len(), 4);
        let cy = |m: &Mark| match &m.payload {
            MarkPayload::Circle(c) => c.circle.center.y,
            _ => panic!("expected circle"),
        };
        assert!(cy(&marks[2]) < cy(&marks[0]));
        let MarkPayload::Text(t) = &marks[1].payload else {
            panic!("expected label");
        };
        assert_eq!(t.anchor, TextAnchor::Middle);
        assert!((t.pos.y - (cy(&marks[0]) + 3.0)).abs() < 1e-9);
    }

    #[test]
    fn origin_maps_to_padding_corner() {
        let spec = PointMarkSpec::new(LayerId(20), 400.0);
        let (xs, ys) = spec
            .scales(&[ScatterDatum::new("a", 87.0, 43.0)])
            .unwrap();
        assert_eq!(xs.map(0.0), 25.0);
        assert_eq!(ys.map(0.0), 175.0);
        assert_eq!(xs.domain(), (0.0, 90.0));
        assert_eq!(ys.domain(), (0.0, 45.0));
    }

    #[test]
    fn empty_data_draws_nothing() {
        let spec = PointMarkSpec::new(LayerId(20), 400.0);
        assert!(spec.marks(&[]).unwrap().is_empty());
        let (xs, ys) = spec.scales(&[]).unwrap();
        for domain in [xs.domain(), ys.domain()] {
            assert_eq!(domain.0, 0.0);
            assert!((domain.1 - 1.0).abs() < 1e-9, "domain {domain:?}");
        }
    }

    #[test]
    fn all_zero_data_sits_on_the_origin() {
        let spec = PointMarkSpec::new(LayerId(20), 400.0);
        let marks = spec.marks(&[ScatterDatum::new("Z", 0.0, 0.0)]).unwrap();
        assert_eq!(marks.len(), 2);
        let MarkPayload::Circle(c) = &marks[0].payload else {
            panic!("expected circle");
        };
        assert_eq!(c.circle.center, Point::new(25.0, 175.0));
    }

    #[test]
    fn repeated_labels_need_distinct_ids() {
        let spec = PointMarkSpec::new(LayerId(20), 400.0);
        let same = [ScatterDatum::new("X", 1.0, 1.0), ScatterDatum::new("X", 2.0, 2.0)];
        assert_eq!(spec.marks(&same).unwrap()[0].id, spec.marks(&same).unwrap()[2].id);

        let distinct = [
            ScatterDatum::new("X", 1.0, 1.0).with_id("x-1"),
            ScatterDatum::new("X", 2.0, 2.0).with_id("x-2"),
        ];
        let marks = spec.marks(&distinct).unwrap();
        assert_ne!(marks[0].id, marks[2].id);
        let MarkPayload::Text(t) = &marks[3].payload else {
            panic!("expected label");
        };
        assert_eq!(t.text, "X");
    }
}
