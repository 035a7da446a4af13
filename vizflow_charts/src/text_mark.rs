// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text mark generation.

extern crate alloc;

use alloc::string::String;

use kurbo::{Point, Rect};
use peniko::{Brush, Color};
use vizflow_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::format::format_step;
use crate::measure::{TextMeasurer, text_bounds};

/// A text mark spec.
#[derive(Clone, Debug)]
pub struct TextMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content (unshaped).
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Text rotation angle in degrees.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
    /// Rendering order hint (`vizflow_core::Mark::z_index`).
    pub z_index: i32,
}

impl TextMarkSpec {
    /// Creates a new text mark spec with default styling.
    pub fn new(id: MarkId, pos: Point, text: impl Into<String>) -> Self {
        Self {
            id,
            pos,
            text: text.into(),
            font_size: 12.0,
            angle: 0.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Middle,
            fill: Brush::Solid(Color::BLACK),
            z_index: crate::z_order::LABELS,
        }
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the text anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the text baseline.
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the text rotation angle (degrees).
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Returns the estimated bounds of the unrotated text.
    pub fn bounds(&self, measurer: &dyn TextMeasurer) -> Rect {
        text_bounds(
            measurer,
            self.pos,
            &self.text,
            self.font_size,
            self.anchor,
            self.baseline,
        )
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        Mark::builder(self.id)
            .z_index(self.z_index)
            .text(self.pos, self.text.clone())
            .font_size(self.font_size)
            .fill(self.fill.clone())
            .text_anchor(self.anchor)
            .text_baseline(self.baseline)
            .angle(self.angle)
            .build()
    }
}

/// The large time label drawn in a chart corner.
///
/// Its measured box doubles as the scrub region, so the box is computed for the widest label
/// the time extent can produce and does not change as the displayed time does.
#[derive(Clone, Debug)]
pub struct TimeLabelSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Anchor position (the label is end-anchored on its alphabetic baseline).
    pub pos: Point,
    /// Font size.
    pub font_size: f64,
    /// Fill while idle.
    pub fill: Brush,
    /// Fill while the pointer scrubs the label.
    pub active_fill: Brush,
}

impl TimeLabelSpec {
    /// Creates a time label with light gray idle and dark gray active fills.
    pub fn new(id: MarkId, pos: Point, font_size: f64) -> Self {
        Self {
            id,
            pos,
            font_size,
            fill: Brush::Solid(Color::from_rgb8(0xdd, 0xdd, 0xdd)),
            active_fill: Brush::Solid(Color::from_rgb8(0xaa, 0xaa, 0xaa)),
        }
    }

    /// Sets the idle and active fills.
    pub fn with_fills(mut self, fill: impl Into<Brush>, active_fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self.active_fill = active_fill.into();
        self
    }

    fn text(&self, time: f64, active: bool) -> TextMarkSpec {
        TextMarkSpec::new(self.id, self.pos, format_step(time))
            .with_font_size(self.font_size)
            .with_anchor(TextAnchor::End)
            .with_baseline(TextBaseline::Alphabetic)
            .with_fill(if active {
                self.active_fill.clone()
            } else {
                self.fill.clone()
            })
            .with_z_index(crate::z_order::TIME_LABEL)
    }

    /// Generates the label for `time`, rounded to a whole step.
    pub fn mark(&self, time: f64, active: bool) -> Mark {
        self.text(time, active).mark()
    }

    /// Returns the label's box for a time extent, used as the scrub region.
    pub fn bounds(&self, measurer: &dyn TextMeasurer, extent: (f64, f64)) -> Rect {
        let a = self.text(extent.0, false).bounds(measurer);
        let b = self.text(extent.1, false).bounds(measurer);
        a.union(b)
    }
}
