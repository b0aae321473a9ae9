// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for hull construction

use std::fmt;
use thiserror::Error;

/// Which geometric degeneracy stopped the initial simplex
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DegenerateKind {
    /// Every axis extent is within tolerance
    Coincident,
    /// No point lies off the line through the two most separated points
    Colinear,
    /// No point lies off the plane through the first three simplex points
    Coplanar,
}

impl fmt::Display for DegenerateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coincident => write!(f, "coincident"),
            Self::Colinear => write!(f, "colinear"),
            Self::Coplanar => write!(f, "coplanar"),
        }
    }
}

/// Errors that can occur while building a hull
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HullError {
    #[error("at least {required} input points are required, got {found}")]
    InsufficientPoints { required: usize, found: usize },

    #[error("coordinate array too small: {found} values for {expected} expected")]
    CoordinateArrayTooSmall { expected: usize, found: usize },

    #[error("point {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    /// Explicit tolerances must be finite and non-negative
    #[error("invalid distance tolerance {value}")]
    InvalidTolerance { value: f64 },

    /// The measured extent/distance never exceeded the threshold
    #[error(
        "input points appear to be {kind}: largest measured distance {measured:e} <= {threshold:e}"
    )]
    Degenerate {
        kind: DegenerateKind,
        measured: f64,
        threshold: f64,
    },
}

impl HullError {
    /// The degeneracy kind, if this is a degenerate-input error
    pub fn degenerate_kind(&self) -> Option<DegenerateKind> {
        match self {
            Self::Degenerate { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HullError>;
