// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame transform IR types.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::dataset::AttrId;

/// Sorting order for [`Transform::Sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

/// Comparison operators for numeric predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `==` (exact float equality)
    Eq,
    /// `!=` (exact float inequality)
    Ne,
}

/// A row predicate used by [`Transform::Filter`].
///
/// Absent values never satisfy a predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Attribute to read.
    pub attr: AttrId,
    /// Comparison operator.
    pub op: CompareOp,
    /// Right-hand constant.
    pub value: f64,
}

impl Predicate {
    /// Creates a predicate.
    pub fn new(attr: AttrId, op: CompareOp, value: f64) -> Self {
        Self { attr, op, value }
    }

    /// Evaluate the predicate for a resolved value.
    pub fn eval(&self, v: Option<f64>) -> bool {
        let Some(v) = v else {
            return false;
        };
        match self.op {
            CompareOp::Lt => v < self.value,
            CompareOp::Le => v <= self.value,
            CompareOp::Gt => v > self.value,
            CompareOp::Ge => v >= self.value,
            CompareOp::Eq => v == self.value,
            CompareOp::Ne => v != self.value,
        }
    }
}

/// A frame-to-frame transform.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// Keep only rows where every listed attribute is present.
    RequirePresent {
        /// Attributes that must be present.
        attrs: Vec<AttrId>,
    },
    /// Keep only rows that satisfy a predicate.
    Filter {
        /// Predicate to apply per row.
        predicate: Predicate,
    },
    /// Keep only rows of one category.
    Category {
        /// Category to keep.
        category: String,
    },
    /// Reorder rows by a numeric attribute.
    ///
    /// The sort is stable. Rows with an absent key keep their relative order after all rows
    /// with a present key.
    Sort {
        /// Attribute used as the sort key.
        by: AttrId,
        /// Sort order.
        order: SortOrder,
    },
}

impl Transform {
    /// Returns the attributes this transform reads.
    pub fn reads(&self) -> impl Iterator<Item = AttrId> + '_ {
        let (slice, single): (&[AttrId], Option<AttrId>) = match self {
            Self::RequirePresent { attrs } => (attrs.as_slice(), None),
            Self::Filter { predicate } => (&[][..], Some(predicate.attr)),
            Self::Category { .. } => (&[][..], None),
            Self::Sort { by, .. } => (&[][..], Some(*by)),
        };
        slice.iter().copied().chain(single)
    }
}
