// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal bar list generation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::{Brush, Color};
use vizflow_core::{LayerId, Mark, MarkId, TextAnchor, TextBaseline};

use crate::scale::{ScaleLinear, infer_domain_f64};
use crate::text_mark::TextMarkSpec;

/// One labelled bar.
#[derive(Clone, Debug, PartialEq)]
pub struct BarDatum {
    /// Stable identifier.
    pub id: String,
    /// Left label.
    pub label: String,
    /// Bar value. `NaN` draws a zero-width bar.
    pub value: f64,
    /// Preformatted value shown at the right edge.
    pub formatted: String,
    /// Long title (tooltip content).
    pub title: String,
}

impl BarDatum {
    /// Creates a datum whose id and title are its label.
    ///
    /// Ids must be unique within one list: rows sharing an id share their [`MarkId`]s, and the
    /// later row replaces the earlier in the scene. Use [`BarDatum::with_id`] for repeated
    /// labels.
    pub fn new(label: impl Into<String>, value: f64, formatted: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: label.clone(),
            title: label.clone(),
            label,
            value,
            formatted: formatted.into(),
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

/// A ranked list of horizontal bars with a label column and a value column.
///
/// The spec occupies three consecutive layers starting at `layer`: bars, labels, and values.
#[derive(Clone, Debug)]
pub struct BarMarkSpec {
    /// First id layer.
    pub layer: LayerId,
    /// Total width in scene units.
    pub width: f64,
    /// Row pitch.
    pub row_height: f64,
    /// Bar thickness.
    pub bar_height: f64,
    /// Width reserved for labels; bars span `width - label_column`.
    pub label_column: f64,
    /// Left edge of the bars.
    pub bar_x: f64,
    /// Distance from the end of the bar span to the right edge of the value column.
    pub value_offset: f64,
    /// Bar fill.
    pub fill: Brush,
    /// Label fill.
    pub text_fill: Brush,
    /// Label font size.
    pub font_size: f64,
}

impl BarMarkSpec {
    /// Creates a bar list with 17px rows, 16px bars, and a 110px label column.
    pub fn new(layer: LayerId, width: f64) -> Self {
        Self {
            layer,
            width,
            row_height: 17.0,
            bar_height: 16.0,
            label_column: 110.0,
            bar_x: 30.0,
            value_offset: 90.0,
            fill: Brush::Solid(Color::from_rgb8(0x46, 0x82, 0xb4)),
            text_fill: Brush::Solid(Color::BLACK),
            font_size: 11.0,
        }
    }

    /// Sets the bar fill.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the row pitch and bar thickness.
    pub fn with_rows(mut self, row_height: f64, bar_height: f64) -> Self {
        self.row_height = row_height;
        self.bar_height = bar_height;
        self
    }

    /// Returns the total height for `rows` rows.
    pub fn height(&self, rows: usize) -> f64 {
        self.row_height * rows as f64 + self.bar_height
    }

    /// Returns the bar mark id for a datum key.
    pub fn bar_id(&self, key: u64) -> MarkId {
        MarkId::for_key(self.layer, key)
    }

    fn sub_layer(&self, n: u32) -> LayerId {
        LayerId(self.layer.0.wrapping_add(n))
    }

    /// Generates bar, label, and value marks, one row per datum in input order.
    ///
    /// Bar widths scale linearly from zero to the largest finite value across the bar span.
    pub fn marks(&self, data: &[BarDatum]) -> Vec<Mark> {
        let span = (self.width - self.label_column).max(0.0);
        let scale = infer_domain_f64(data.iter().map(|d| d.value))
            .and_then(|(_, max)| ScaleLinear::new((0.0, max), (0.0, span)).ok());

        let mut marks = Vec::with_capacity(data.len() * 3);
        for (i, d) in data.iter().enumerate() {
            let key = d.key();
            let y = i as f64 * self.row_height;
            let w = match scale {
                Some(s) if !d.value.is_nan() => s.map(d.value).max(0.0),
                _ => 0.0,
            };
            marks.push(
                Mark::builder(self.bar_id(key))
                    .z_index(crate::z_order::SERIES_FILL)
                    .datum(key)
                    .rect(Rect::new(self.bar_x, y, self.bar_x + w, y + self.bar_height))
                    .fill(self.fill.clone())
                    .build(),
            );
            let text_y = y + self.bar_height - 4.0;
            marks.push(
                TextMarkSpec::new(
                    MarkId::for_key(self.sub_layer(1), key),
                    Point::new(0.0, text_y),
                    d.label.clone(),
                )
                .with_font_size(self.font_size)
                .with_baseline(TextBaseline::Alphabetic)
                .with_fill(self.text_fill.clone())
                .mark(),
            );
            marks.push(
                TextMarkSpec::new(
                    MarkId::for_key(self.sub_layer(2), key),
                    Point::new(span + self.value_offset, text_y),
                    d.formatted.clone(),
                )
                .with_font_size(self.font_size)
                .with_anchor(TextAnchor::End)
                .with_baseline(TextBaseline::Alphabetic)
                .with_fill(self.text_fill.clone())
                .mark(),
            );
        }
        marks
    }
}
