// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Datasets and per-time frames for vizflow.
//!
//! This crate provides:
//! - the input data model: [`Entity`]s carrying sparse [`TimeSeries`], [`Relation`]s, and
//!   node-link [`Graph`]s,
//! - the interpolation step [`frame_for`], which resolves a dataset at one instant, and
//! - a small transform IR ([`Transform`], [`Program`]) for filtering and ordering frames.
//!
//! Interpolation is deliberately exact: a value exists at time `t` only if the source
//! reported one at `t`. Sparse datasets therefore show entities appearing and disappearing in
//! the years they actually have data.
//!
//! Frames keep each entity's stable key, so marks generated from transformed frames keep their
//! identity across time steps.

#![no_std]

extern crate alloc;

mod dataset;
mod frame;
mod graph;
mod program;
mod relation;
mod series;
mod transform;

pub use dataset::{AttrId, Dataset, Entity};
pub use frame::{Frame, FrameRow, frame_for};
pub use graph::{Edge, Graph, Node};
pub use program::{ExecutionError, Program};
pub use relation::{Relation, pair_key};
pub use series::{Sample, SeriesError, TimeSeries, value_at};
pub use transform::{CompareOp, Predicate, SortOrder, Transform};
