// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - points, extents and the half-edge hull mesh

mod bbox;
mod halfedge;
mod lists;
mod merge;
mod point;
mod primitives;

pub use bbox::Extents;
pub use halfedge::{
    Face, FaceEdges, FaceId, FaceMark, HalfEdge, HalfEdgeId, HalfEdgeMesh, Vertex, VertexId,
};
pub use lists::{FaceList, VertexList};
pub use point::{Payload, Point};
pub use primitives::{random_cube_points, random_sphere_points, PointCloud};
