// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Input points: a double-precision position plus an opaque payload

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Per-point attributes carried through the hull untouched.
///
/// Geometric code never reads these fields; they are copied from the input
/// point to the matching hull vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub color: [u8; 3],
    pub intensity: f32,
    pub classification: u8,
}

impl Payload {
    pub fn new(color: [u8; 3], intensity: f32, classification: u8) -> Self {
        Self {
            color,
            intensity,
            classification,
        }
    }

    pub fn with_color(color: [u8; 3]) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }
}

/// Point with position and payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub position: Point3<f64>,
    pub payload: Payload,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            payload: Payload::default(),
        }
    }

    pub fn with_payload(position: Point3<f64>, payload: Payload) -> Self {
        Self { position, payload }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }

    /// Coordinate along `axis` (0 = x, 1 = y, 2 = z)
    pub fn coord(&self, axis: usize) -> f64 {
        self.position[axis]
    }

    /// Overwrite the position, keeping the payload
    pub fn set(&mut self, x: f64, y: f64, z: f64) {
        self.position = Point3::new(x, y, z);
    }

    pub fn set_payload(&mut self, payload: Payload) {
        self.payload = payload;
    }

    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|c| c.is_finite())
    }

    pub fn distance(&self, other: &Point) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }

    pub fn distance_squared(&self, other: &Point) -> f64 {
        nalgebra::distance_squared(&self.position, &other.position)
    }

    /// Vector from `other` to `self`
    pub fn sub(&self, other: &Point) -> Vector3<f64> {
        self.position - other.position
    }
}

impl From<Point3<f64>> for Point {
    fn from(position: Point3<f64>) -> Self {
        Self {
            position,
            payload: Payload::default(),
        }
    }
}

impl From<[f64; 3]> for Point {
    fn from(c: [f64; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}
