// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popup (tooltip) generation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::{Brush, Color};
use vizflow_core::{LayerId, Mark, MarkId, TextBaseline};

use crate::measure::TextMeasurer;
use crate::text_mark::TextMarkSpec;

/// A boxed multi-line popup.
///
/// Ids depend only on the layer and line index, so there is exactly one popup per layer:
/// showing new content updates the existing marks in place and drops surplus lines.
/// Popup marks carry no datum and never take part in hit testing.
#[derive(Clone, Debug)]
pub struct PopupSpec {
    /// Id layer.
    pub layer: LayerId,
    /// Inner padding.
    pub padding: f64,
    /// Font size.
    pub font_size: f64,
    /// Line pitch.
    pub line_height: f64,
    /// Background fill.
    pub background: Brush,
    /// Outline paint.
    pub border: Brush,
    /// Text fill.
    pub text_fill: Brush,
}

impl PopupSpec {
    /// Creates a popup with 5px padding, 12px text and a translucent white background.
    pub fn new(layer: LayerId) -> Self {
        Self {
            layer,
            padding: 5.0,
            font_size: 12.0,
            line_height: 15.0,
            background: Brush::Solid(Color::from_rgba8(0xff, 0xff, 0xff, 0xb3)),
            border: Brush::Solid(Color::from_rgb8(0x66, 0x66, 0x66)),
            text_fill: Brush::Solid(Color::BLACK),
        }
    }

    /// Sets the font size and line pitch.
    pub fn with_font(mut self, font_size: f64, line_height: f64) -> Self {
        self.font_size = font_size;
        self.line_height = line_height;
        self
    }

    /// Returns the id of the popup background.
    pub fn background_id(&self) -> MarkId {
        MarkId::for_key(self.layer, 0)
    }

    /// Returns the box a popup with `lines` occupies when its top-left corner is at `anchor`.
    pub fn bounds(&self, measurer: &dyn TextMeasurer, anchor: Point, lines: &[String]) -> Rect {
        let w = lines
            .iter()
            .map(|l| measurer.measure(l, self.font_size).0)
            .fold(0.0, f64::max);
        let h = self.line_height * lines.len() as f64;
        Rect::new(
            anchor.x,
            anchor.y,
            anchor.x + w + 2.0 * self.padding,
            anchor.y + h + 2.0 * self.padding,
        )
    }

    /// Generates the background and one text mark per line.
    pub fn marks(&self, measurer: &dyn TextMeasurer, anchor: Point, lines: &[String]) -> Vec<Mark> {
        let bg = self.bounds(measurer, anchor, lines);
        let mut marks = Vec::with_capacity(lines.len() + 1);
        marks.push(
            Mark::builder(self.background_id())
                .z_index(crate::z_order::POPUP)
                .rect(bg)
                .fill(self.background.clone())
                .stroke(self.border.clone(), 0.5)
                .build(),
        );
        for (i, line) in lines.iter().enumerate() {
            let y = bg.y0 + self.padding + self.line_height * i as f64;
            marks.push(
                TextMarkSpec::new(
                    MarkId::for_key(self.layer, i as u64 + 1),
                    Point::new(bg.x0 + self.padding, y),
                    line.clone(),
                )
                .with_font_size(self.font_size)
                .with_baseline(TextBaseline::Hanging)
                .with_fill(self.text_fill.clone())
                .with_z_index(crate::z_order::POPUP_TEXT)
                .mark(),
            );
        }
        marks
    }
}
