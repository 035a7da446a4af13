// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bubble mark generation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::{Brush, Color};
use vizflow_core::{LayerId, Mark, MarkId};
use vizflow_transforms::{
    AttrId, CompareOp, ExecutionError, Frame, Predicate, Program, SortOrder, Transform,
};

use crate::error::ScaleError;
use crate::ordinal::ScaleOrdinal;
use crate::scale::ScaleContinuous;

/// A bubble (x, y, radius, color) mark derived from a frame.
///
/// This generates one [`vizflow_core::MarkKind::Circle`] mark per visible row. A row is visible
/// when x, y and radius are present, x and y are non-negative, the radius is positive, and the
/// row matches the optional category filter.
///
/// Marks are emitted largest radius first, so smaller bubbles paint on top of larger ones.
#[derive(Clone, Debug)]
pub struct BubbleMarkSpec {
    /// Id namespace for the generated marks.
    pub layer: LayerId,
    /// Attribute for x values.
    pub x: AttrId,
    /// Attribute for y values.
    pub y: AttrId,
    /// Attribute for radius values.
    pub radius: AttrId,
    /// X scale mapping data x into scene x.
    pub x_scale: ScaleContinuous,
    /// Y scale mapping data y into scene y.
    pub y_scale: ScaleContinuous,
    /// Radius scale mapping data radius into scene units.
    pub radius_scale: ScaleContinuous,
    /// Category colors.
    pub color: ScaleOrdinal,
    /// Only rows of this category are shown, if set.
    pub category: Option<String>,
    /// Outline paint.
    pub stroke: Brush,
    /// Outline width.
    pub stroke_width: f64,
    /// Rendering order hint (`vizflow_core::Mark::z_index`).
    pub z_index: i32,
}

/// A row that passed filtering but could not be mapped.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedBubble {
    /// Stable key of the row's entity.
    pub key: u64,
    /// Entity display name.
    pub name: String,
    /// The scale failure.
    pub error: ScaleError,
}

/// Output of [`BubbleMarkSpec::marks`].
#[derive(Clone, Debug, Default)]
pub struct BubbleMarks {
    /// Marks in paint order (descending radius).
    pub marks: Vec<Mark>,
    /// Rows excluded because a scale rejected one of their values.
    pub skipped: Vec<SkippedBubble>,
}

impl BubbleMarkSpec {
    /// Creates a bubble spec with the category10 palette, no category filter and a thin black
    /// outline.
    pub fn new(
        layer: LayerId,
        (x, y, radius): (AttrId, AttrId, AttrId),
        x_scale: ScaleContinuous,
        y_scale: ScaleContinuous,
        radius_scale: ScaleContinuous,
    ) -> Self {
        Self {
            layer,
            x,
            y,
            radius,
            x_scale,
            y_scale,
            radius_scale,
            color: ScaleOrdinal::category10(),
            category: None,
            stroke: Brush::Solid(Color::BLACK),
            stroke_width: 0.5,
            z_index: crate::z_order::SERIES_POINTS,
        }
    }

    /// Sets the category color scale.
    pub fn with_color(mut self, color: ScaleOrdinal) -> Self {
        self.color = color;
        self
    }

    /// Sets or clears the category filter.
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    /// Sets the outline.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = width;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Returns the mark id for an entity key.
    pub fn mark_id(&self, key: u64) -> MarkId {
        MarkId::for_key(self.layer, key)
    }

    /// Returns the filter-and-order program applied before mapping.
    pub fn program(&self) -> Program {
        let mut program = Program::new()
            .with(Transform::RequirePresent {
                attrs: alloc::vec![self.x, self.y, self.radius],
            })
            .with(Transform::Filter {
                predicate: Predicate::new(self.x, CompareOp::Ge, 0.0),
            })
            .with(Transform::Filter {
                predicate: Predicate::new(self.y, CompareOp::Ge, 0.0),
            })
            .with(Transform::Filter {
                predicate: Predicate::new(self.radius, CompareOp::Gt, 0.0),
            });
        if let Some(category) = &self.category {
            program.push(Transform::Category {
                category: category.clone(),
            });
        }
        program.with(Transform::Sort {
            by: self.radius,
            order: SortOrder::Desc,
        })
    }

    /// Generates marks for one frame.
    ///
    /// Each mark is bound to its entity key (`Mark::datum`) and gets an id derived from
    /// `(layer, key)`, so it stays stable across frames. A scale failure on one row only
    /// excludes that row.
    pub fn marks(&self, frame: &Frame) -> Result<BubbleMarks, ExecutionError> {
        let visible = self.program().execute(frame.clone())?;
        let mut out = BubbleMarks::default();
        for row in &visible.rows {
            let mapped = (|| {
                let x = self.x_scale.try_map(row.value(self.x).unwrap_or(f64::NAN))?;
                let y = self.y_scale.try_map(row.value(self.y).unwrap_or(f64::NAN))?;
                let r = self
                    .radius_scale
                    .try_map(row.value(self.radius).unwrap_or(f64::NAN))?;
                Ok::<_, ScaleError>((x, y, r))
            })();
            match mapped {
                Ok((x, y, r)) => out.marks.push(
                    Mark::builder(self.mark_id(row.key))
                        .z_index(self.z_index)
                        .datum(row.key)
                        .circle((x, y), r.max(0.0))
                        .fill(self.color.map(&row.category))
                        .stroke(self.stroke.clone(), self.stroke_width)
                        .build(),
                ),
                Err(error) => out.skipped.push(SkippedBubble {
                    key: row.key,
                    name: row.name.clone(),
                    error,
                }),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use vizflow_core::MarkPayload;
    use vizflow_transforms::{Dataset, Entity, TimeSeries, frame_for};

    use super::*;
    use crate::error::ScaleKind;
    use crate::scale::{ScaleLinear, ScaleLog, ScaleSqrt};

    fn nation(name: &str, region: &str, x: f64, y: f64, r: f64) -> Entity {
        let s = |v| TimeSeries::from_pairs([(2000.0, Some(v))]).unwrap();
        Entity::new(name, region)
            .with_series("x", s(x))
            .with_series("y", s(y))
            .with_series("r", s(r))
    }

    fn spec() -> BubbleMarkSpec {
        BubbleMarkSpec::new(
            LayerId(1),
            (AttrId(0), AttrId(1), AttrId(2)),
            ScaleContinuous::Log(ScaleLog::new((100.0, 2e5), (0.0, 800.0)).unwrap()),
            ScaleContinuous::Linear(ScaleLinear::new((0.0, 100.0), (500.0, 0.0)).unwrap()),
            ScaleContinuous::Sqrt(ScaleSqrt::new((0.0, 1.5e9), (1.0, 40.0)).unwrap()),
        )
    }

    fn radius(m: &Mark) -> f64 {
        match &m.payload {
            MarkPayload::Circle(c) => c.circle.radius,
            _ => panic!("expected circle"),
        }
    }

    #[test]
    fn log_domain_failures_skip_only_the_offending_row() {
        let ds = Dataset::new(
            vec![
                nation("A", "Europe", 1000.0, 50.0, 1e6),
                nation("Zero", "Europe", 0.0, 50.0, 1e6),
                nation("B", "Asia", 2000.0, 20.0, 4e6),
            ],
            ["x", "y", "r"],
        );
        let out = spec().marks(&frame_for(&ds, 2000.0)).unwrap();
        assert_eq!(out.marks.len(), 2);
        assert_eq!(out.skipped.len(), 1);
        assert_eq!(out.skipped[0].name, "Zero");
        assert!(matches!(
            out.skipped[0].error,
            ScaleError::Domain {
                kind: ScaleKind::Log,
                ..
            }
        ));
    }

    #[test]
    fn negative_and_zero_radius_rows_are_filtered() {
        let ds = Dataset::new(
            vec![
                nation("A", "Europe", 1000.0, 50.0, 0.0),
                nation("B", "Europe", 1000.0, -1.0, 10.0),
                nation("C", "Europe", 1000.0, 1.0, 10.0),
            ],
            ["x", "y", "r"],
        );
        let out = spec().marks(&frame_for(&ds, 2000.0)).unwrap();
        assert_eq!(out.marks.len(), 1);
        assert!(out.skipped.is_empty());
    }

    #[test]
    fn category_filter_and_colors() {
        let ds = Dataset::new(
            vec![
                nation("A", "Europe", 1000.0, 50.0, 1e6),
                nation("B", "Asia", 1000.0, 50.0, 1e6),
            ],
            ["x", "y", "r"],
        );
        let s = spec()
            .with_color(ScaleOrdinal::category10().with_domain(["Asia", "Europe"]))
            .with_category(Some("Asia".into()));
        let out = s.marks(&frame_for(&ds, 2000.0)).unwrap();
        assert_eq!(out.marks.len(), 1);
        let key = vizflow_core::stable_key("B");
        assert_eq!(out.marks[0].datum, Some(key));
        assert_eq!(out.marks[0].id, s.mark_id(key));
        let MarkPayload::Circle(c) = &out.marks[0].payload else {
            panic!("expected circle");
        };
        assert_eq!(c.fill, Brush::Solid(crate::ordinal::CATEGORY10[0]));
    }

    #[test]
    fn larger_bubbles_come_first() {
        let ds = Dataset::new(
            vec![
                nation("s", "x", 500.0, 10.0, 1e5),
                nation("l", "x", 500.0, 10.0, 9e8),
                nation("m", "x", 500.0, 10.0, 4e7),
            ],
            ["x", "y", "r"],
        );
        let out = spec().marks(&frame_for(&ds, 2000.0)).unwrap();
        let radii: std::vec::Vec<f64> = out.marks.iter().map(radius).collect();
        assert!(radii.windows(2).all(|w| w[0] >= w[1]), "{radii:?}");
    }
}
