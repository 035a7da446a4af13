// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks.
//!
//! Shaping stays downstream of mark generation, but a few layouts need rough text bounds up
//! front: the time label's scrub region and popup backgrounds.

use kurbo::{Point, Rect};
use vizflow_core::{TextAnchor, TextBaseline};

/// A minimal text measurement interface.
///
/// Callers can plug in a real text measurement backend (e.g. based on shaping), or use
/// [`HeuristicTextMeasurer`].
pub trait TextMeasurer {
    /// Returns `(width, height)` in the same coordinate system as the marks.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

/// A tiny heuristic text measurer suitable for demos and early layout.
///
/// It assumes an average glyph width of ~0.6em and height of 1em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let width = 0.6 * font_size * text.chars().count() as f64;
        (width, font_size)
    }
}

/// Returns the bounding box of a text run anchored at `pos`.
pub fn text_bounds(
    measurer: &dyn TextMeasurer,
    pos: Point,
    text: &str,
    font_size: f64,
    anchor: TextAnchor,
    baseline: TextBaseline,
) -> Rect {
    let (w, h) = measurer.measure(text, font_size);
    let x0 = match anchor {
        TextAnchor::Start => pos.x,
        TextAnchor::Middle => pos.x - w / 2.0,
        TextAnchor::End => pos.x - w,
    };
    let y0 = match baseline {
        TextBaseline::Hanging => pos.y,
        TextBaseline::Middle => pos.y - h / 2.0,
        TextBaseline::Alphabetic | TextBaseline::Ideographic => pos.y - 0.8 * h,
    };
    Rect::new(x0, y0, x0 + w, y0 + h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_anchored_box_ends_at_anchor() {
        let r = text_bounds(
            &HeuristicTextMeasurer,
            Point::new(400.0, 200.0),
            "2012",
            100.0,
            TextAnchor::End,
            TextBaseline::Alphabetic,
        );
        assert!((r.x1 - 400.0).abs() < 1e-9);
        assert!((r.width() - 240.0).abs() < 1e-9);
        assert!((r.y1 - 220.0).abs() < 1e-9);
    }
}
