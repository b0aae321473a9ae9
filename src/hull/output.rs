// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Read-only views of a built hull: vertices, face index lists and a
//! Wavefront-style text dump

use super::QuickHull;
use crate::geometry::{FaceId, HalfEdgeId, Point};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Order in which face vertices are listed, seen from outside the hull
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winding {
    #[default]
    CounterClockwise,
    Clockwise,
}

/// First value used when numbering vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexBase {
    Zero,
    One,
}

/// Formatting flags for face index output.
///
/// `base: None` picks the default of the consumer: zero-based for
/// [`QuickHull::faces`], one-based for [`QuickHull::write_obj`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceIndexing {
    pub winding: Winding,
    pub base: Option<IndexBase>,
    /// Emit input point indices instead of hull-local vertex indices
    pub point_relative: bool,
}

impl FaceIndexing {
    pub fn clockwise(mut self) -> Self {
        self.winding = Winding::Clockwise;
        self
    }

    pub fn zero_based(mut self) -> Self {
        self.base = Some(IndexBase::Zero);
        self
    }

    pub fn one_based(mut self) -> Self {
        self.base = Some(IndexBase::One);
        self
    }

    pub fn point_relative(mut self) -> Self {
        self.point_relative = true;
        self
    }

    fn offset(&self, default: IndexBase) -> usize {
        match self.base.unwrap_or(default) {
            IndexBase::Zero => 0,
            IndexBase::One => 1,
        }
    }
}

impl QuickHull {
    /// Hull vertices in hull-local order, payload included
    pub fn vertices(&self) -> Vec<Point> {
        self.vertex_point_indices
            .iter()
            .map(|&i| self.mesh.vertices[i].point)
            .collect()
    }

    /// Hull vertex coordinates flattened as `x, y, z` triples
    pub fn vertex_coords(&self) -> Vec<f64> {
        self.vertex_point_indices
            .iter()
            .flat_map(|&i| {
                let p = self.mesh.vertices[i].point.position;
                [p.x, p.y, p.z]
            })
            .collect()
    }

    /// Input point index of each hull vertex
    pub fn vertex_point_indices(&self) -> &[usize] {
        &self.vertex_point_indices
    }

    /// Vertex index lists of every face
    pub fn faces(&self, indexing: FaceIndexing) -> Vec<Vec<usize>> {
        let offset = indexing.offset(IndexBase::Zero);
        self.faces
            .iter()
            .map(|&f| self.face_indices(f, &indexing, offset))
            .collect()
    }

    fn face_indices(&self, f: FaceId, indexing: &FaceIndexing, offset: usize) -> Vec<usize> {
        let he0 = self.mesh.face(f).he0;
        let step = |he: HalfEdgeId| match indexing.winding {
            Winding::CounterClockwise => self.mesh.next(he),
            Winding::Clockwise => self.mesh.prev(he),
        };

        let mut indices = Vec::with_capacity(self.mesh.face(f).num_vertices);
        let mut he = he0;
        loop {
            let mut idx = self.mesh.vertex(self.mesh.head(he)).index;
            if indexing.point_relative {
                idx = self.vertex_point_indices[idx];
            }
            indices.push(idx + offset);
            he = step(he);
            if he == he0 {
                break;
            }
        }
        indices
    }

    /// Write `v x y z` lines for the hull vertices followed by `f i j k ...`
    /// lines for the faces
    pub fn write_obj<W: Write>(&self, out: &mut W, indexing: FaceIndexing) -> io::Result<()> {
        for p in self.vertices() {
            writeln!(out, "v {} {} {}", p.x(), p.y(), p.z())?;
        }

        let offset = indexing.offset(IndexBase::One);
        for &f in &self.faces {
            let indices = self.face_indices(f, &indexing, offset);
            let line: Vec<String> = indices.iter().map(|i| i.to_string()).collect();
            writeln!(out, "f {}", line.join(" "))?;
        }
        Ok(())
    }
}
