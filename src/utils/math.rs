// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::{Point3, Vector3};

/// Unit round-off of an IEEE-754 double
pub const DOUBLE_PREC: f64 = 2.2204460492503131e-16;

/// Normalize `v` in place.
///
/// Vectors already within `2 * DOUBLE_PREC` of unit length are left alone.
/// Callers must never pass a zero vector.
pub fn normalize(v: &mut Vector3<f64>) {
    let len_sqr = v.norm_squared();
    let err = len_sqr - 1.0;
    if err > 2.0 * DOUBLE_PREC || err < -2.0 * DOUBLE_PREC {
        *v /= len_sqr.sqrt();
    }
}

/// Normal of the triangle (p0, p1, p2), unnormalized; its length is twice the triangle area
pub fn triangle_cross(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> Vector3<f64> {
    (p1 - p0).cross(&(p2 - p0))
}
