// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyhull
//!
//! Robust incremental 3D convex hulls. Builds a half-edge mesh of planar,
//! convex, outward-facing faces over a point cloud, merging coplanar
//! triangles into polygons within a scale-derived distance tolerance.

pub mod analytics;
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod hull;
pub mod io;
pub mod utils;

pub use analytics::{analyze, HullStats};
pub use batch::{build_many, BatchOutcome};
pub use config::HullConfig;
pub use error::{DegenerateKind, HullError};
pub use geometry::{random_cube_points, random_sphere_points, Extents, Payload, Point, PointCloud};
pub use hull::{convex_hull, convex_hull_with, FaceIndexing, IndexBase, QuickHull, Winding};
pub use io::{export_obj, read_points};
