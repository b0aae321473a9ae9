// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Initial tetrahedron and the degeneracy tests that guard it

use super::QuickHull;
use crate::error::{DegenerateKind, HullError, Result};
use crate::geometry::{Extents, FaceId, VertexId};
use crate::utils::normalize;
use nalgebra::Vector3;
use tracing::debug;

impl QuickHull {
    /// Pick four well-spread points, build the tetrahedron over them and
    /// assign every remaining point to the face it lies farthest above
    pub(super) fn create_initial_simplex(&mut self) -> Result<()> {
        let extents = self.extents.unwrap_or_else(Extents::empty);
        let tol = self.tolerance;

        let (imax, max_range) = extents.widest_axis();
        if max_range <= tol {
            return Err(HullError::Degenerate {
                kind: DegenerateKind::Coincident,
                measured: max_range,
                threshold: tol,
            });
        }

        let mut vtx = [
            VertexId(extents.max_points[imax]),
            VertexId(extents.min_points[imax]),
            VertexId(0),
            VertexId(0),
        ];

        // third point: farthest from the line v0-v1
        let p0 = *self.mesh.position(vtx[0]);
        let mut u01 = self.mesh.position(vtx[1]) - p0;
        normalize(&mut u01);

        let mut max_sqr = 0.0;
        let mut nrml = Vector3::zeros();
        for i in 0..self.num_points {
            let v = VertexId(i);
            if v == vtx[0] || v == vtx[1] {
                continue;
            }
            let xprod = u01.cross(&(self.mesh.position(v) - p0));
            let len_sqr = xprod.norm_squared();
            if len_sqr > max_sqr {
                max_sqr = len_sqr;
                vtx[2] = v;
                nrml = xprod;
            }
        }
        if max_sqr.sqrt() <= 100.0 * tol {
            return Err(HullError::Degenerate {
                kind: DegenerateKind::Colinear,
                measured: max_sqr.sqrt(),
                threshold: 100.0 * tol,
            });
        }
        normalize(&mut nrml);

        // fourth point: farthest from the plane through v0, v1, v2
        let d0 = nrml.dot(&self.mesh.position(vtx[2]).coords);
        let mut max_dist = 0.0;
        for i in 0..self.num_points {
            let v = VertexId(i);
            if vtx[..3].contains(&v) {
                continue;
            }
            let dist = (nrml.dot(&self.mesh.position(v).coords) - d0).abs();
            if dist > max_dist {
                max_dist = dist;
                vtx[3] = v;
            }
        }
        if max_dist <= 100.0 * tol {
            return Err(HullError::Degenerate {
                kind: DegenerateKind::Coplanar,
                measured: max_dist,
                threshold: 100.0 * tol,
            });
        }

        debug!(
            v0 = vtx[0].0,
            v1 = vtx[1].0,
            v2 = vtx[2].0,
            v3 = vtx[3].0,
            "initial simplex"
        );

        let below = nrml.dot(&self.mesh.position(vtx[3]).coords) - d0 < 0.0;
        let tris = self.stitch_tetrahedron(vtx, below);
        self.faces.extend_from_slice(&tris);

        for i in 0..self.num_points {
            let v = VertexId(i);
            if vtx.contains(&v) {
                continue;
            }

            let mut max_dist = tol;
            let mut max_face = None;
            for &f in &tris {
                let dist = self.mesh.distance_to_plane(f, self.mesh.position(v));
                if dist > max_dist {
                    max_dist = dist;
                    max_face = Some(f);
                }
            }
            if let Some(f) = max_face {
                self.add_point_to_face(v, f);
            }
        }
        Ok(())
    }

    /// Create the four outward-facing triangles over `vtx` and pair their
    /// edges. `below` tells whether `vtx[3]` lies on the negative side of
    /// the plane normal found for the first three points.
    fn stitch_tetrahedron(&mut self, vtx: [VertexId; 4], below: bool) -> [FaceId; 4] {
        let [v0, v1, v2, v3] = vtx;
        let mesh = &mut self.mesh;

        if below {
            let tris = [
                mesh.create_triangle(v0, v1, v2, 0.0),
                mesh.create_triangle(v3, v1, v0, 0.0),
                mesh.create_triangle(v3, v2, v1, 0.0),
                mesh.create_triangle(v3, v0, v2, 0.0),
            ];
            for i in 0..3 {
                let k = (i + 1) % 3;
                let side = mesh.edge(tris[i + 1], 1);
                let next_side = mesh.edge(tris[k + 1], 0);
                mesh.set_opposite(side, next_side);
                let base = mesh.edge(tris[i + 1], 2);
                let bottom = mesh.edge(tris[0], k as isize);
                mesh.set_opposite(base, bottom);
            }
            tris
        } else {
            let tris = [
                mesh.create_triangle(v0, v2, v1, 0.0),
                mesh.create_triangle(v3, v0, v1, 0.0),
                mesh.create_triangle(v3, v1, v2, 0.0),
                mesh.create_triangle(v3, v2, v0, 0.0),
            ];
            for i in 0..3 {
                let k = (i + 1) % 3;
                let side = mesh.edge(tris[i + 1], 0);
                let next_side = mesh.edge(tris[k + 1], 1);
                mesh.set_opposite(side, next_side);
                let base = mesh.edge(tris[i + 1], 2);
                let bottom = mesh.edge(tris[0], ((3 - i) % 3) as isize);
                mesh.set_opposite(base, bottom);
            }
            tris
        }
    }
}
