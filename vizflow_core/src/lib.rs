// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal retained scene for vizflow.
//!
//! Chart code produces a fresh list of [`Mark`]s for every frame. A [`Scene`] keeps the marks
//! that are currently on screen, keyed by a stable [`MarkId`], and turns each new frame into a
//! list of [`MarkDiff`]s:
//! - **Enter** for ids that were not on screen,
//! - **Update** for ids whose payload, z-index, or paint order changed,
//! - **Exit** for ids that disappeared.
//!
//! Because ids are derived from entity identifiers (see [`MarkId::for_key`]), a renderer can
//! move or resize an existing element instead of replacing it, which is what makes smooth
//! transitions possible.

#![no_std]

extern crate alloc;

mod id;
mod mark;
mod scene;

pub use id::{LayerId, MarkId, stable_key};
pub use mark::{
    CirclePayload, Mark, MarkBuilder, MarkKind, MarkPayload, PathPayload, RectPayload,
    TextAnchor, TextBaseline, TextPayload,
};
pub use scene::{Hit, MarkDiff, Scene};
