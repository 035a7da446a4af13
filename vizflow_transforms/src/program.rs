// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform programs and their executor.

extern crate alloc;

use alloc::vec::Vec;

use core::cmp::Ordering;

use crate::dataset::AttrId;
use crate::frame::Frame;
use crate::transform::{SortOrder, Transform};

/// Errors returned when executing a [`Program`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// A transform references an attribute the frame does not carry.
    #[error("transform {index} reads unknown attribute {attr:?}")]
    UnknownAttr {
        /// Index of the transform in the program.
        index: usize,
        /// The missing attribute.
        attr: AttrId,
    },
}

/// An ordered list of [`Transform`]s applied to a [`Frame`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    transforms: Vec<Transform>,
}

impl Program {
    /// Creates an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transform.
    pub fn push(&mut self, transform: Transform) {
        self.transforms.push(transform);
    }

    /// Appends a transform, builder style.
    pub fn with(mut self, transform: Transform) -> Self {
        self.push(transform);
        self
    }

    /// Returns the transforms in execution order.
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    /// Checks that every attribute read by the program exists in `frame`.
    pub fn validate(&self, frame: &Frame) -> Result<(), ExecutionError> {
        for (index, t) in self.transforms.iter().enumerate() {
            if let Some(attr) = t.reads().find(|a| a.0 >= frame.attrs.len()) {
                return Err(ExecutionError::UnknownAttr { index, attr });
            }
        }
        Ok(())
    }

    /// Runs the program, returning the transformed frame.
    ///
    /// Row keys are preserved, so marks generated from the output keep their identity.
    pub fn execute(&self, mut frame: Frame) -> Result<Frame, ExecutionError> {
        self.validate(&frame)?;
        for t in &self.transforms {
            match t {
                Transform::RequirePresent { attrs } => frame
                    .rows
                    .retain(|row| attrs.iter().all(|a| row.value(*a).is_some())),
                Transform::Filter { predicate } => frame
                    .rows
                    .retain(|row| predicate.eval(row.value(predicate.attr))),
                Transform::Category { category } => {
                    frame.rows.retain(|row| row.category == *category);
                }
                Transform::Sort { by, order } => {
                    let by = *by;
                    let order = *order;
                    frame
                        .rows
                        .sort_by(|a, b| compare(a.value(by), b.value(by), order));
                }
            }
        }
        Ok(frame)
    }
}

fn compare(a: Option<f64>, b: Option<f64>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let o = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            match order {
                SortOrder::Asc => o,
                SortOrder::Desc => o.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec;

    use super::*;
    use crate::{CompareOp, Dataset, Entity, Predicate, TimeSeries, frame_for};

    fn entity(name: &str, cat: &str, r: Option<f64>) -> Entity {
        Entity::new(name, cat).with_series("r", TimeSeries::from_pairs([(2000.0, r)]).unwrap())
    }

    fn frame() -> Frame {
        let ds = Dataset::new(
            vec![
                entity("small", "a", Some(1.0)),
                entity("none", "a", None),
                entity("big", "b", Some(9.0)),
                entity("mid", "b", Some(4.0)),
            ],
            ["r"],
        );
        frame_for(&ds, 2000.0)
    }

    fn names(f: &Frame) -> Vec<&str> {
        f.rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn sort_desc_puts_largest_first_and_absent_last() {
        let p = Program::new().with(Transform::Sort {
            by: AttrId(0),
            order: SortOrder::Desc,
        });
        let out = p.execute(frame()).unwrap();
        assert_eq!(names(&out), vec!["big", "mid", "small", "none"]);
    }

    #[test]
    fn filters_compose() {
        let p = Program::new()
            .with(Transform::RequirePresent {
                attrs: vec![AttrId(0)],
            })
            .with(Transform::Filter {
                predicate: Predicate::new(AttrId(0), CompareOp::Gt, 2.0),
            })
            .with(Transform::Category {
                category: "b".to_string(),
            });
        let out = p.execute(frame()).unwrap();
        assert_eq!(names(&out), vec!["big", "mid"]);
    }

    #[test]
    fn absent_values_fail_predicates() {
        let p = Program::new().with(Transform::Filter {
            predicate: Predicate::new(AttrId(0), CompareOp::Ne, 1.0),
        });
        let out = p.execute(frame()).unwrap();
        assert_eq!(names(&out), vec!["big", "mid"]);
    }

    #[test]
    fn unknown_attributes_are_rejected() {
        let p = Program::new().with(Transform::Sort {
            by: AttrId(3),
            order: SortOrder::Asc,
        });
        assert_eq!(
            p.execute(frame()).unwrap_err(),
            ExecutionError::UnknownAttr {
                index: 0,
                attr: AttrId(3)
            }
        );
    }

    #[test]
    fn keys_survive_execution() {
        let f = frame();
        let key_big = f.rows[2].key;
        let p = Program::new().with(Transform::Sort {
            by: AttrId(0),
            order: SortOrder::Desc,
        });
        let out = p.execute(f).unwrap();
        assert_eq!(out.rows[0].key, key_big);
    }
}
