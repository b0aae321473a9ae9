// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Hull analytics and statistics

use crate::hull::{FaceIndexing, QuickHull};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Hull statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HullStats {
    /// Number of hull vertices
    pub vertex_count: usize,
    /// Number of hull faces (polygons, or triangles after triangulation)
    pub face_count: usize,
    /// Number of undirected edges
    pub edge_count: usize,
    /// V - E + F; 2 for every closed convex polyhedron
    pub euler_characteristic: i64,
    /// Total surface area in square units
    pub surface_area: f64,
    /// Enclosed volume in cubic units
    pub volume: f64,
    /// Mean of the hull vertices [x, y, z]
    pub centroid: [f64; 3],
    /// Vertex count of the largest face
    pub max_face_vertices: usize,
}

impl HullStats {
    /// Create empty stats
    pub fn empty() -> Self {
        Self {
            vertex_count: 0,
            face_count: 0,
            edge_count: 0,
            euler_characteristic: 0,
            surface_area: 0.0,
            volume: 0.0,
            centroid: [0.0, 0.0, 0.0],
            max_face_vertices: 0,
        }
    }

    /// Pretty print statistics
    pub fn print(&self) {
        println!("╔══════════════════════════════════════════════════════════╗");
        println!("║              HULL ANALYTICS                              ║");
        println!("╠══════════════════════════════════════════════════════════╣");
        println!("║ Volume:          {:>14.6}                          ║", self.volume);
        println!("║ Surface Area:    {:>14.6}                          ║", self.surface_area);
        println!(
            "║ Centroid:        ({:>8.3}, {:>8.3}, {:>8.3})         ║",
            self.centroid[0], self.centroid[1], self.centroid[2]
        );
        println!("║                                                          ║");
        println!("║ Vertices:        {:>10}                              ║", self.vertex_count);
        println!("║ Edges:           {:>10}                              ║", self.edge_count);
        println!("║ Faces:           {:>10}                              ║", self.face_count);
        println!("║ Largest face:    {:>10}                              ║", self.max_face_vertices);
        println!("║ Euler (V-E+F):   {:>10}                              ║", self.euler_characteristic);
        println!("╚══════════════════════════════════════════════════════════╝");
    }
}

/// Analyze a built hull and compute statistics
pub fn analyze(hull: &QuickHull) -> HullStats {
    let vertices: Vec<Point3<f64>> = hull.vertices().iter().map(|p| p.position).collect();
    let faces = hull.faces(FaceIndexing::default());

    if vertices.is_empty() || faces.is_empty() {
        return HullStats::empty();
    }

    let half_edges: usize = faces.iter().map(Vec::len).sum();
    let edge_count = half_edges / 2;
    let euler_characteristic = vertices.len() as i64 - edge_count as i64 + faces.len() as i64;

    HullStats {
        vertex_count: vertices.len(),
        face_count: faces.len(),
        edge_count,
        euler_characteristic,
        surface_area: calculate_surface_area(&vertices, &faces),
        volume: calculate_volume(&vertices, &faces),
        centroid: calculate_centroid(&vertices),
        max_face_vertices: faces.iter().map(Vec::len).max().unwrap_or(0),
    }
}

/// Twice the vector area of a planar polygon, fanned from its first vertex
fn polygon_cross(vertices: &[Point3<f64>], face: &[usize]) -> Vector3<f64> {
    let p0 = vertices[face[0]];
    face.windows(2)
        .skip(1)
        .map(|w| (vertices[w[0]] - p0).cross(&(vertices[w[1]] - p0)))
        .sum()
}

fn calculate_surface_area(vertices: &[Point3<f64>], faces: &[Vec<usize>]) -> f64 {
    faces
        .iter()
        .map(|face| polygon_cross(vertices, face).norm() / 2.0)
        .sum()
}

/// Divergence theorem over the face fans; positive for outward faces
fn calculate_volume(vertices: &[Point3<f64>], faces: &[Vec<usize>]) -> f64 {
    let mut volume = 0.0;
    for face in faces {
        let v0 = vertices[face[0]].coords;
        for w in face.windows(2).skip(1) {
            let v1 = vertices[w[0]].coords;
            let v2 = vertices[w[1]].coords;
            volume += v0.dot(&v1.cross(&v2)) / 6.0;
        }
    }
    volume
}

fn calculate_centroid(vertices: &[Point3<f64>]) -> [f64; 3] {
    let sum: Vector3<f64> = vertices.iter().map(|p| p.coords).sum();
    let c = sum / vertices.len() as f64;
    [c.x, c.y, c.z]
}
