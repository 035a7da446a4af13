// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for scales and chart generation.

extern crate alloc;

use alloc::string::String;

use vizflow_transforms::ExecutionError;

/// The kind of a scale, used in error reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScaleKind {
    /// Linear scale.
    Linear,
    /// Natural-log scale.
    Log,
    /// Square-root scale.
    Sqrt,
    /// Categorical palette scale.
    Ordinal,
    /// Geographic projection.
    Geo,
}

impl core::fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Linear => "linear",
            Self::Log => "log",
            Self::Sqrt => "sqrt",
            Self::Ordinal => "ordinal",
            Self::Geo => "geo",
        })
    }
}

/// Errors returned by scale construction and evaluation.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ScaleError {
    /// The input cannot be mapped (for example a non-positive value into a log scale).
    #[error("{value} is outside the valid input of a {kind} scale")]
    Domain {
        /// Scale kind.
        kind: ScaleKind,
        /// Offending input.
        value: f64,
    },
    /// The operation does not exist for this kind of scale.
    #[error("{op} is not supported by {kind} scales")]
    UnsupportedOperation {
        /// Scale kind.
        kind: ScaleKind,
        /// Operation name.
        op: &'static str,
    },
    /// The configured domain is unusable (non-finite, empty, or invalid for the kind).
    #[error("invalid domain ({lo}, {hi}) for a {kind} scale")]
    InvalidDomain {
        /// Scale kind.
        kind: ScaleKind,
        /// Domain lower bound as configured.
        lo: f64,
        /// Domain upper bound as configured.
        hi: f64,
    },
    /// The configured range is unusable (non-finite bounds or an empty palette).
    #[error("invalid range for a {kind} scale")]
    InvalidRange {
        /// Scale kind.
        kind: ScaleKind,
    },
}

/// Errors returned while resolving flow-map relations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// An endpoint of a relation has no known coordinates.
    #[error("relation {source_id} -> {target_id} has no coordinates for {missing}")]
    MissingRelationEndpoint {
        /// Relation source id.
        source_id: String,
        /// Relation target id.
        target_id: String,
        /// The endpoint that could not be resolved.
        missing: String,
    },
}

/// Errors returned by chart-level mark generation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ChartError {
    /// A scale could not be built.
    #[error(transparent)]
    Scale(#[from] ScaleError),
    /// A frame transform referenced an unknown attribute.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}
