// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction layer for vizflow.
//!
//! An [`InteractionController`] owns one [`View`], the retained [`vizflow_core::Scene`] it
//! renders into, and the [`InteractionState`] that views read while producing marks. Hosts
//! feed it three kinds of input and apply the returned [`vizflow_core::MarkDiff`]s to their
//! surface:
//! - [`InteractionController::activate`] once the view is shown,
//! - [`InteractionController::tick`] with the wall-clock time elapsed since the last tick,
//! - [`InteractionController::handle`] for pointer input ([`PointerEvent`]).
//!
//! Every entry point runs the whole pipeline synchronously (state → frame → marks → scene), so
//! the scene is never observed half-updated.
//!
//! Ready-made views for the bubble chart, flow map, bar chart, scatterplot and node-link graph
//! live in [`views`].

mod animation;
mod controller;
mod error;
mod popup;
mod scrub;
mod state;
mod transform;
mod view;
pub mod views;

pub use animation::{AnimationDriver, AnimationStep};
pub use controller::{ControllerConfig, InteractionController, PointerEvent};
pub use error::InteractError;
pub use popup::{Popup, ranked_list};
pub use scrub::ScrubRegion;
pub use state::{InteractionState, Phase};
pub use transform::ViewTransform;
pub use view::{View, ViewFrame};
