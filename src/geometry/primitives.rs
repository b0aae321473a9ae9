// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Point cloud generators for tests, benchmarks and the CLI

use super::Point;
use nalgebra::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Generated point clouds
#[derive(Debug, Clone, Copy)]
pub enum PointCloud {
    /// The eight corners of an axis-aligned box
    CubeCorners { size: Vector3<f64>, center: bool },
    /// `n × n × n` grid points with the given spacing, starting at the origin
    Lattice { n: usize, spacing: f64 },
    /// Two rings of `segments` points at z = 0 and z = height
    Cylinder { h: f64, r: f64, segments: u32 },
    /// Uniform samples inside the cube [-half_extent, half_extent]³
    RandomCube { count: usize, half_extent: f64, seed: u64 },
    /// Uniform samples on the sphere surface of the given radius
    RandomSphere { count: usize, radius: f64, seed: u64 },
}

impl PointCloud {
    pub fn cube_corners(size: Vector3<f64>, center: bool) -> Self {
        Self::CubeCorners { size, center }
    }

    pub fn lattice(n: usize, spacing: f64) -> Self {
        Self::Lattice { n, spacing }
    }

    pub fn cylinder(h: f64, r: f64, segments: u32) -> Self {
        let segments = if segments > 0 { segments } else { 32 };
        Self::Cylinder { h, r, segments }
    }

    pub fn random_cube(count: usize, half_extent: f64, seed: u64) -> Self {
        Self::RandomCube {
            count,
            half_extent,
            seed,
        }
    }

    pub fn random_sphere(count: usize, radius: f64, seed: u64) -> Self {
        Self::RandomSphere {
            count,
            radius,
            seed,
        }
    }

    pub fn to_points(&self) -> Vec<Point> {
        match *self {
            Self::CubeCorners { size, center } => cube_corners(size, center),
            Self::Lattice { n, spacing } => lattice(n, spacing),
            Self::Cylinder { h, r, segments } => cylinder_rings(h, r, segments),
            Self::RandomCube {
                count,
                half_extent,
                seed,
            } => random_cube_points(count, half_extent, seed),
            Self::RandomSphere {
                count,
                radius,
                seed,
            } => random_sphere_points(count, radius, seed),
        }
    }
}

fn cube_corners(size: Vector3<f64>, center: bool) -> Vec<Point> {
    let (min, max) = if center {
        (-size / 2.0, size / 2.0)
    } else {
        (Vector3::zeros(), size)
    };

    let mut points = Vec::with_capacity(8);
    for &z in &[min.z, max.z] {
        for &y in &[min.y, max.y] {
            for &x in &[min.x, max.x] {
                points.push(Point::new(x, y, z));
            }
        }
    }
    points
}

fn lattice(n: usize, spacing: f64) -> Vec<Point> {
    let mut points = Vec::with_capacity(n * n * n);
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                points.push(Point::new(
                    i as f64 * spacing,
                    j as f64 * spacing,
                    k as f64 * spacing,
                ));
            }
        }
    }
    points
}

fn cylinder_rings(height: f64, radius: f64, segments: u32) -> Vec<Point> {
    let mut points = Vec::with_capacity(2 * segments as usize);
    for &z in &[0.0, height] {
        for i in 0..segments {
            let angle = 2.0 * PI * i as f64 / segments as f64;
            points.push(Point::new(radius * angle.cos(), radius * angle.sin(), z));
        }
    }
    points
}

/// `count` uniform samples inside [-half_extent, half_extent]³
pub fn random_cube_points(count: usize, half_extent: f64, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Point::new(
                rng.gen_range(-half_extent..=half_extent),
                rng.gen_range(-half_extent..=half_extent),
                rng.gen_range(-half_extent..=half_extent),
            )
        })
        .collect()
}

/// `count` samples spread uniformly over a sphere centered at the origin
pub fn random_sphere_points(count: usize, radius: f64, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(count);
    while points.len() < count {
        let v = Vector3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        let len = v.norm();
        // rejection sampling keeps the directions uniform
        if len > 1e-6 && len <= 1.0 {
            points.push(Point::from(Point3::from(v * (radius / len))));
        }
    }
    points
}
