// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Validity checking of a built hull

use super::QuickHull;
use crate::geometry::FaceId;
use std::io::Write;
use tracing::warn;

impl QuickHull {
    /// Check the hull with the tolerance of its build, without diagnostics
    pub fn check(&self) -> bool {
        self.check_with_tolerance(self.tolerance, None)
    }

    /// Check convexity and containment against `tol`.
    ///
    /// Every face loop must be consistent, every edge convex within `tol`,
    /// no two consecutive edges may border the same face, and no input point
    /// may lie more than `10 × tol` above any face. Stops at the first
    /// violation, reporting it through `tracing` and, if given, `out`.
    pub fn check_with_tolerance(&self, tol: f64, mut out: Option<&mut dyn Write>) -> bool {
        let mut report = |msg: String| {
            warn!("{}", msg);
            if let Some(out) = out.as_mut() {
                // the verdict stands even if the sink fails
                let _ = writeln!(out, "{}", msg);
            }
        };

        if let Err(msg) = self.check_faces(tol) {
            report(msg);
            return false;
        }

        let point_tol = 10.0 * tol;
        for i in 0..self.num_points {
            let pnt = &self.mesh.vertices[i].point.position;
            for &f in &self.faces {
                if !self.mesh.face(f).is_visible() {
                    continue;
                }
                let dist = self.mesh.distance_to_plane(f, pnt);
                if dist > point_tol {
                    report(format!(
                        "point {} {} above face {}",
                        i,
                        dist,
                        self.mesh.face_vertex_string(f)
                    ));
                    return false;
                }
            }
        }
        true
    }

    fn check_faces(&self, tol: f64) -> Result<(), String> {
        for &f in &self.faces {
            if self.mesh.face(f).is_visible() {
                self.check_face_convexity(f, tol)?;
            }
        }
        Ok(())
    }

    fn check_face_convexity(&self, f: FaceId, tol: f64) -> Result<(), String> {
        self.mesh.check_face_consistency(f)?;

        for he in self.mesh.face_edges(f) {
            let opp = self.mesh.opposite(he);
            let dist = self.mesh.opp_face_distance(he);
            if dist > tol {
                return Err(format!(
                    "edge {} non-convex by {}",
                    self.mesh.edge_vertex_string(he),
                    dist
                ));
            }
            let dist = self.mesh.opp_face_distance(opp);
            if dist > tol {
                return Err(format!(
                    "opposite edge {} non-convex by {}",
                    self.mesh.edge_vertex_string(opp),
                    dist
                ));
            }
            if self.mesh.opposite_face(self.mesh.next(he)) == self.mesh.opposite_face(he) {
                return Err(format!(
                    "redundant vertex {} in face {}",
                    self.mesh.head(he).0,
                    self.mesh.face_vertex_string(f)
                ));
            }
        }
        Ok(())
    }
}
