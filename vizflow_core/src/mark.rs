// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marks: the drawable primitives held by a [`crate::Scene`].

extern crate alloc;

use alloc::string::String;

use kurbo::{Affine, BezPath, Circle, Point, Rect, Shape, Vec2};
use peniko::{Brush, Color};

use crate::MarkId;

/// The primitive kind of a mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// An axis-aligned rectangle.
    Rect,
    /// A circle.
    Circle,
    /// An arbitrary path (polygons, arcs, lines).
    Path,
    /// Unshaped text.
    Text,
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor position.
    #[default]
    Start,
    /// Text is centered on the anchor position.
    Middle,
    /// Text ends at the anchor position.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The anchor y is the middle of the em box.
    #[default]
    Middle,
    /// The anchor y is the alphabetic baseline.
    Alphabetic,
    /// The anchor y is the hanging baseline.
    Hanging,
    /// The anchor y is the ideographic baseline.
    Ideographic,
}

/// Rectangle payload.
#[derive(Clone, Debug, PartialEq)]
pub struct RectPayload {
    /// Geometry in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables the stroke.
    pub stroke_width: f64,
}

/// Circle payload.
#[derive(Clone, Debug, PartialEq)]
pub struct CirclePayload {
    /// Geometry in scene coordinates.
    pub circle: Circle,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables the stroke.
    pub stroke_width: f64,
}

/// Path payload.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPayload {
    /// Geometry in scene coordinates.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables the stroke.
    pub stroke_width: f64,
}

/// Text payload.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPayload {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content (unshaped).
    pub text: String,
    /// Font size in scene units.
    pub font_size: f64,
    /// Rotation in degrees around `pos`.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// The geometry and paint of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// See [`RectPayload`].
    Rect(RectPayload),
    /// See [`CirclePayload`].
    Circle(CirclePayload),
    /// See [`PathPayload`].
    Path(PathPayload),
    /// See [`TextPayload`].
    Text(TextPayload),
}

impl MarkPayload {
    /// Returns the kind of this payload.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Rect(_) => MarkKind::Rect,
            Self::Circle(_) => MarkKind::Circle,
            Self::Path(_) => MarkKind::Path,
            Self::Text(_) => MarkKind::Text,
        }
    }

    /// Returns geometric bounds, or `None` for text (which needs a shaper to measure).
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            Self::Circle(c) => Some(c.circle.bounding_box()),
            Self::Path(p) => Some(p.path.bounding_box()),
            Self::Text(_) => None,
        }
    }

    /// Returns `true` if `pt` lies inside the painted area.
    ///
    /// Paths are tested with the non-zero winding rule; open polylines never contain points.
    /// Text is never hit.
    pub fn contains(&self, pt: Point) -> bool {
        match self {
            Self::Rect(r) => r.rect.contains(pt),
            Self::Circle(c) => c.circle.contains(pt),
            Self::Path(p) => p.path.contains(pt),
            Self::Text(_) => false,
        }
    }

    /// Returns the screen anchor of this payload: the center for shapes, `pos` for text.
    pub fn anchor(&self) -> Point {
        match self {
            Self::Rect(r) => r.rect.center(),
            Self::Circle(c) => c.circle.center,
            Self::Path(p) => p.path.bounding_box().center(),
            Self::Text(t) => t.pos,
        }
    }

    /// Returns a copy transformed by `affine`.
    ///
    /// Only translate + uniform scale is expected here. Lengths (radii, stroke widths, font
    /// sizes) are scaled by the length of the transformed x unit vector.
    pub fn transformed(&self, affine: Affine) -> Self {
        let c = affine.as_coeffs();
        let k = Vec2::new(c[0], c[1]).hypot();
        match self {
            Self::Rect(r) => Self::Rect(RectPayload {
                rect: affine.transform_rect_bbox(r.rect),
                stroke_width: r.stroke_width * k,
                ..r.clone()
            }),
            Self::Circle(ci) => Self::Circle(CirclePayload {
                circle: Circle::new(affine * ci.circle.center, ci.circle.radius * k),
                stroke_width: ci.stroke_width * k,
                ..ci.clone()
            }),
            Self::Path(p) => {
                let mut path = p.path.clone();
                path.apply_affine(affine);
                Self::Path(PathPayload {
                    path,
                    stroke_width: p.stroke_width * k,
                    ..p.clone()
                })
            }
            Self::Text(t) => Self::Text(TextPayload {
                pos: affine * t.pos,
                font_size: t.font_size * k,
                ..t.clone()
            }),
        }
    }
}

/// A drawable element with a stable identity.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity used for diffing.
    pub id: MarkId,
    /// Coarse paint layer; lower values are painted first.
    pub z_index: i32,
    /// Stable key of the datum this mark is bound to, if any.
    ///
    /// Only marks with a datum take part in hit testing.
    pub datum: Option<u64>,
    /// Geometry and paint.
    pub payload: MarkPayload,
}

impl Mark {
    /// Starts building a mark. The payload defaults to an empty rectangle.
    pub fn builder(id: MarkId) -> MarkBuilder {
        MarkBuilder {
            id,
            z_index: 0,
            datum: None,
            payload: MarkPayload::Rect(RectPayload {
                rect: Rect::ZERO,
                fill: Brush::default(),
                stroke: Brush::Solid(Color::TRANSPARENT),
                stroke_width: 0.0,
            }),
        }
    }

    /// Returns the kind of this mark.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }

    /// Returns this mark with its payload transformed by `affine`.
    pub fn transformed(mut self, affine: Affine) -> Self {
        self.payload = self.payload.transformed(affine);
        self
    }
}

/// Builder for [`Mark`].
#[derive(Clone, Debug)]
pub struct MarkBuilder {
    id: MarkId,
    z_index: i32,
    datum: Option<u64>,
    payload: MarkPayload,
}

impl MarkBuilder {
    /// Sets the z-index.
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Binds the mark to a datum key.
    pub fn datum(mut self, key: u64) -> Self {
        self.datum = Some(key);
        self
    }

    /// Makes this a rectangle mark.
    pub fn rect(mut self, rect: Rect) -> Self {
        let (fill, stroke, stroke_width) = self.paints();
        self.payload = MarkPayload::Rect(RectPayload {
            rect,
            fill,
            stroke,
            stroke_width,
        });
        self
    }

    /// Makes this a circle mark.
    pub fn circle(mut self, center: impl Into<Point>, radius: f64) -> Self {
        let (fill, stroke, stroke_width) = self.paints();
        self.payload = MarkPayload::Circle(CirclePayload {
            circle: Circle::new(center, radius),
            fill,
            stroke,
            stroke_width,
        });
        self
    }

    /// Makes this a path mark.
    pub fn path(mut self, path: BezPath) -> Self {
        let (fill, stroke, stroke_width) = self.paints();
        self.payload = MarkPayload::Path(PathPayload {
            path,
            fill,
            stroke,
            stroke_width,
        });
        self
    }

    /// Makes this a text mark with a 12px font, start anchor, and middle baseline.
    pub fn text(mut self, pos: impl Into<Point>, text: impl Into<String>) -> Self {
        let (fill, _, _) = self.paints();
        self.payload = MarkPayload::Text(TextPayload {
            pos: pos.into(),
            text: text.into(),
            font_size: 12.0,
            angle: 0.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Middle,
            fill,
        });
        self
    }

    /// Sets the fill paint.
    pub fn fill(mut self, fill: impl Into<Brush>) -> Self {
        let fill = fill.into();
        match &mut self.payload {
            MarkPayload::Rect(r) => r.fill = fill,
            MarkPayload::Circle(c) => c.fill = fill,
            MarkPayload::Path(p) => p.fill = fill,
            MarkPayload::Text(t) => t.fill = fill,
        }
        self
    }

    /// Sets the stroke paint and width. Ignored for text.
    pub fn stroke(mut self, stroke: impl Into<Brush>, width: f64) -> Self {
        let stroke = stroke.into();
        match &mut self.payload {
            MarkPayload::Rect(r) => {
                r.stroke = stroke;
                r.stroke_width = width;
            }
            MarkPayload::Circle(c) => {
                c.stroke = stroke;
                c.stroke_width = width;
            }
            MarkPayload::Path(p) => {
                p.stroke = stroke;
                p.stroke_width = width;
            }
            MarkPayload::Text(_) => {}
        }
        self
    }

    /// Sets the font size. Ignored for non-text marks.
    pub fn font_size(mut self, font_size: f64) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.font_size = font_size;
        }
        self
    }

    /// Sets the text anchor. Ignored for non-text marks.
    pub fn text_anchor(mut self, anchor: TextAnchor) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.anchor = anchor;
        }
        self
    }

    /// Sets the text baseline. Ignored for non-text marks.
    pub fn text_baseline(mut self, baseline: TextBaseline) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.baseline = baseline;
        }
        self
    }

    /// Sets the text rotation in degrees. Ignored for non-text marks.
    pub fn angle(mut self, angle: f64) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.angle = angle;
        }
        self
    }

    /// Finishes the mark.
    pub fn build(self) -> Mark {
        Mark {
            id: self.id,
            z_index: self.z_index,
            datum: self.datum,
            payload: self.payload,
        }
    }

    // Paints carried over when the payload kind changes.
    fn paints(&self) -> (Brush, Brush, f64) {
        match &self.payload {
            MarkPayload::Rect(r) => (r.fill.clone(), r.stroke.clone(), r.stroke_width),
            MarkPayload::Circle(c) => (c.fill.clone(), c.stroke.clone(), c.stroke_width),
            MarkPayload::Path(p) => (p.fill.clone(), p.stroke.clone(), p.stroke_width),
            MarkPayload::Text(t) => (t.fill.clone(), Brush::Solid(Color::TRANSPARENT), 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn builder_keeps_paint_when_switching_kind() {
        let m = Mark::builder(MarkId(1))
            .fill(css::TOMATO)
            .circle((10.0, 10.0), 5.0)
            .build();
        let MarkPayload::Circle(c) = &m.payload else {
            panic!("expected circle payload");
        };
        assert_eq!(c.fill, css::TOMATO.into());
        assert_eq!(m.kind(), MarkKind::Circle);
    }

    #[test]
    fn transform_scales_radius_and_moves_center() {
        let m = Mark::builder(MarkId(1)).circle((10.0, 0.0), 5.0).build();
        let t = Affine::translate((100.0, 50.0)) * Affine::scale(2.0);
        let MarkPayload::Circle(c) = m.transformed(t).payload else {
            panic!("expected circle payload");
        };
        assert!((c.circle.center.x - 120.0).abs() < 1e-9);
        assert!((c.circle.center.y - 50.0).abs() < 1e-9);
        assert!((c.circle.radius - 10.0).abs() < 1e-9);
    }

    #[test]
    fn text_is_never_hit() {
        let m = Mark::builder(MarkId(1)).text((0.0, 0.0), "1990").build();
        assert!(!m.payload.contains(Point::new(0.0, 0.0)));
        assert_eq!(m.payload.bounds(), None);
    }
}
