// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Instantaneous views of a dataset.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::dataset::{AttrId, Dataset};

/// One entity with its tracked attributes resolved at a single time.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRow {
    /// Stable key of the entity (see [`crate::Entity::key`]).
    pub key: u64,
    /// Index of the entity in [`Dataset::entities`].
    pub entity: usize,
    /// Display name.
    pub name: String,
    /// Category.
    pub category: String,
    /// Resolved values, aligned with [`Frame::attrs`]. `None` is absent.
    pub values: SmallVec<[Option<f64>; 4]>,
}

impl FrameRow {
    /// Returns the resolved value of `attr`.
    pub fn value(&self, attr: AttrId) -> Option<f64> {
        self.values.get(attr.0).copied().flatten()
    }
}

/// A dataset resolved at one instant.
///
/// Frames are derived, short-lived, and cheap to rebuild; they never feed back into the
/// dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// The time this frame was resolved at.
    pub time: f64,
    /// Attribute names, aligned with [`FrameRow::values`].
    pub attrs: Vec<String>,
    /// Rows, in dataset order unless a transform reordered them.
    pub rows: Vec<FrameRow>,
}

impl Frame {
    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Looks up an attribute by name.
    pub fn attr(&self, name: &str) -> Option<AttrId> {
        self.attrs.iter().position(|a| a == name).map(AttrId)
    }

    /// Returns a value for `(row, attr)` if both exist and the value is present.
    pub fn f64(&self, row: usize, attr: AttrId) -> Option<f64> {
        self.rows.get(row)?.value(attr)
    }

    /// Returns the row keys in row order.
    pub fn row_keys(&self) -> Vec<u64> {
        self.rows.iter().map(|r| r.key).collect()
    }
}

/// Resolves every tracked attribute of every entity at time `t`.
///
/// Each value is the series' exact sample at `t` (see
/// [`TimeSeries::value_at`](crate::TimeSeries::value_at)); attributes without a series are
/// absent. The function is pure, so `t` may move backwards between calls.
pub fn frame_for(dataset: &Dataset, t: f64) -> Frame {
    let attrs = dataset.tracked();
    let rows = dataset
        .entities()
        .iter()
        .enumerate()
        .map(|(index, e)| FrameRow {
            key: e.key(),
            entity: index,
            name: e.name.clone(),
            category: e.category.clone(),
            values: attrs
                .iter()
                .map(|a| e.series(a).and_then(|s| s.value_at(t)))
                .collect(),
        })
        .collect();
    Frame {
        time: t,
        attrs: attrs.to_vec(),
        rows,
    }
}
