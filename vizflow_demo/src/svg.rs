// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A diff-driven SVG surface.
//!
//! The surface only ever sees [`MarkDiff`]s, the way a real renderer would, so its output
//! doubles as a check that the diffs reproduce the controller's scene.

use std::collections::HashMap;
use std::fmt::Write as _;

use kurbo::Rect;
use peniko::Brush;
use vizflow_core::{MarkDiff, MarkId, MarkPayload, TextAnchor, TextBaseline};

#[derive(Debug)]
struct Painted {
    z_index: i32,
    order: u32,
    payload: MarkPayload,
}

#[derive(Debug, Default)]
pub(crate) struct SvgSurface {
    marks: HashMap<MarkId, Painted>,
    view_box: Option<Rect>,
}

impl SvgSurface {
    pub(crate) fn new(view_box: Rect) -> Self {
        Self {
            marks: HashMap::new(),
            view_box: Some(view_box),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.marks.len()
    }

    pub(crate) fn apply(&mut self, diffs: &[MarkDiff]) {
        for diff in diffs {
            match diff {
                MarkDiff::Enter {
                    id,
                    z_index,
                    order,
                    new,
                    ..
                } => {
                    self.marks.insert(
                        *id,
                        Painted {
                            z_index: *z_index,
                            order: *order,
                            payload: (**new).clone(),
                        },
                    );
                }
                MarkDiff::Update {
                    id,
                    new_z_index,
                    new_order,
                    new,
                    ..
                } => {
                    self.marks.insert(
                        *id,
                        Painted {
                            z_index: *new_z_index,
                            order: *new_order,
                            payload: (**new).clone(),
                        },
                    );
                }
                MarkDiff::Exit { id, .. } => {
                    self.marks.remove(id);
                }
            }
        }
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = self
            .view_box
            .or_else(|| self.content_bounds())
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}" overflow="visible">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        );

        let mut painted: Vec<(&MarkId, &Painted)> = self.marks.iter().collect();
        painted.sort_by_key(|(id, p)| (p.z_index, p.order, id.0));

        for (_, p) in painted {
            match &p.payload {
                MarkPayload::Rect(r) => {
                    let _ = write!(
                        out,
                        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                        r.rect.x0,
                        r.rect.y0,
                        r.rect.width(),
                        r.rect.height(),
                    );
                    write_paint_attr(&mut out, "fill", &r.fill);
                    write_stroke(&mut out, &r.stroke, r.stroke_width);
                    out.push_str("/>\n");
                }
                MarkPayload::Circle(c) => {
                    let _ = write!(
                        out,
                        r#"<circle cx="{}" cy="{}" r="{}""#,
                        c.circle.center.x, c.circle.center.y, c.circle.radius,
                    );
                    write_paint_attr(&mut out, "fill", &c.fill);
                    write_stroke(&mut out, &c.stroke, c.stroke_width);
                    out.push_str("/>\n");
                }
                MarkPayload::Text(t) => {
                    let baseline = match t.baseline {
                        TextBaseline::Middle => "middle",
                        TextBaseline::Alphabetic => "alphabetic",
                        TextBaseline::Hanging => "hanging",
                        TextBaseline::Ideographic => "ideographic",
                    };
                    let _ = write!(
                        out,
                        r#"<text x="{}" y="{}" font-size="{}" font-family="sans-serif" dominant-baseline="{}""#,
                        t.pos.x, t.pos.y, t.font_size, baseline
                    );
                    if t.angle != 0.0 {
                        let _ = write!(
                            out,
                            r#" transform="rotate({} {} {})""#,
                            t.angle, t.pos.x, t.pos.y
                        );
                    }
                    out.push_str(match t.anchor {
                        TextAnchor::Start => r#" text-anchor="start""#,
                        TextAnchor::Middle => r#" text-anchor="middle""#,
                        TextAnchor::End => r#" text-anchor="end""#,
                    });
                    write_paint_attr(&mut out, "fill", &t.fill);
                    out.push('>');
                    out.push_str(&escape_xml(&t.text));
                    out.push_str("</text>\n");
                }
                MarkPayload::Path(path) => {
                    let _ = write!(out, r#"<path d="{}""#, path.path.to_svg());
                    write_paint_attr(&mut out, "fill", &path.fill);
                    write_stroke(&mut out, &path.stroke, path.stroke_width);
                    out.push_str("/>\n");
                }
            }
        }

        out.push_str("</svg>\n");
        out
    }

    fn content_bounds(&self) -> Option<Rect> {
        self.marks
            .values()
            .filter_map(|p| p.payload.bounds())
            .reduce(|a, b| a.union(b))
            .map(|r| r.inflate(10.0, 10.0))
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn write_stroke(out: &mut String, brush: &Brush, width: f64) {
    if width > 0.0 {
        write_paint_attr(out, "stroke", brush);
        let _ = write!(out, r#" stroke-width="{width}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use kurbo::Point;
    use peniko::Color;
    use vizflow_core::{LayerId, Mark, Scene};

    use super::*;

    #[test]
    fn surface_follows_diffs() {
        let mut scene = Scene::new();
        let mut surface = SvgSurface::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let id = MarkId::for_key(LayerId(1), 7);
        let dot = |x: f64| {
            Mark::builder(id)
                .circle(Point::new(x, 10.0), 4.0)
                .fill(Color::BLACK)
                .build()
        };
        surface.apply(&scene.tick([dot(10.0)]));
        surface.apply(&scene.tick([dot(20.0)]));
        let svg = surface.to_svg_string();
        assert!(svg.contains(r#"<circle cx="20" cy="10" r="4""#));
        assert_eq!(surface.len(), 1);

        surface.apply(&scene.clear());
        assert_eq!(surface.len(), 0);
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
