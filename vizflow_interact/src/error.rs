// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for the interaction layer.

use vizflow_charts::{ChartError, ScaleError};
use vizflow_transforms::ExecutionError;

/// Errors returned while configuring or driving an [`crate::InteractionController`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InteractError {
    /// A time extent is non-finite or runs backwards.
    #[error("empty time extent ({min}, {max})")]
    EmptyTimeExtent {
        /// Start of the extent.
        min: f64,
        /// End of the extent.
        max: f64,
    },
    /// The animation duration is zero.
    #[error("animation duration must be positive")]
    NonPositiveDuration,
    /// The zoom extent is not a finite positive interval.
    #[error("invalid zoom extent ({min}, {max})")]
    InvalidZoomExtent {
        /// Smallest allowed scale factor.
        min: f64,
        /// Largest allowed scale factor.
        max: f64,
    },
    /// A view referenced an attribute the dataset does not track.
    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),
    /// A scale could not be built or evaluated.
    #[error(transparent)]
    Scale(#[from] ScaleError),
    /// A frame program failed.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl From<ChartError> for InteractError {
    fn from(err: ChartError) -> Self {
        match err {
            ChartError::Scale(e) => Self::Scale(e),
            ChartError::Execution(e) => Self::Execution(e),
        }
    }
}
