// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding extents of a point cloud and the distance tolerance derived from them

use super::Point;
use crate::utils::DOUBLE_PREC;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Axis-aligned extents plus the points that realize them
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Extents {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
    /// Index of the first point reaching the minimum on each axis
    pub min_points: [usize; 3],
    /// Index of the first point reaching the maximum on each axis
    pub max_points: [usize; 3],
}

impl Extents {
    /// Single linear scan over `points`; `None` when there are no points
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut extents = Self {
            min: first.position,
            max: first.position,
            min_points: [0; 3],
            max_points: [0; 3],
        };

        for (i, point) in points.iter().enumerate().skip(1) {
            for axis in 0..3 {
                let c = point.position[axis];
                if c > extents.max[axis] {
                    extents.max[axis] = c;
                    extents.max_points[axis] = i;
                } else if c < extents.min[axis] {
                    extents.min[axis] = c;
                    extents.min_points[axis] = i;
                }
            }
        }

        Some(extents)
    }

    pub fn empty() -> Self {
        Self {
            min: Point3::origin(),
            max: Point3::origin(),
            min_points: [0; 3],
            max_points: [0; 3],
        }
    }

    /// Range covered on `axis`
    pub fn range(&self, axis: usize) -> f64 {
        self.max[axis] - self.min[axis]
    }

    /// Largest axis range
    pub fn characteristic_length(&self) -> f64 {
        self.range(0).max(self.range(1)).max(self.range(2))
    }

    /// Axis with the largest range and that range; ties go to the lower axis
    pub fn widest_axis(&self) -> (usize, f64) {
        let mut best = (0, 0.0);
        for axis in 0..3 {
            let range = self.range(axis);
            if range > best.1 {
                best = (axis, range);
            }
        }
        best
    }

    /// Round-off driven tolerance: 3ε times the summed per-axis magnitude
    pub fn automatic_tolerance(&self) -> f64 {
        let magnitude: f64 = (0..3)
            .map(|axis| self.max[axis].abs().max(self.min[axis].abs()))
            .sum();
        3.0 * DOUBLE_PREC * magnitude
    }
}
