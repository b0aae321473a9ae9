// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Incremental 3D convex hull engine.
//!
//! Builds the hull QuickHull style: an initial tetrahedron, then repeated
//! insertion of the farthest outside point. Each insertion deletes the faces
//! the point can see, fans new triangles from the point to the horizon, and
//! merges faces back together until every edge is convex within tolerance.
//!
//! A `QuickHull` owns all of its state. Builds on separate instances are
//! fully independent and may run on separate threads.

mod check;
mod output;
mod simplex;

pub use output::{FaceIndexing, IndexBase, Winding};

use crate::config::HullConfig;
use crate::error::{HullError, Result};
use crate::geometry::{
    Extents, FaceId, FaceList, FaceMark, HalfEdgeId, HalfEdgeMesh, Point, VertexId, VertexList,
};
use crate::utils::DOUBLE_PREC;
use nalgebra::Point3;
use tracing::{debug, trace};

/// Vertex index value used to flag hull vertices while reindexing
const HULL_MARK: usize = 0;
/// Vertex index value for points not on the hull after reindexing
const UNMARKED: usize = usize::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeKind {
    /// Merge when non-convex with respect to the larger of the two faces
    NonConvexWrtLargerFace,
    /// Merge whenever either face sees the other's centroid
    NonConvex,
}

/// One pending face of the horizon walk
struct HorizonFrame {
    edge: HalfEdgeId,
    stop: HalfEdgeId,
    started: bool,
}

/// Convex hull of a point set, plus the engine state that builds it
#[derive(Debug, Clone, Default)]
pub struct QuickHull {
    explicit_tolerance: Option<f64>,
    tolerance: f64,
    char_length: f64,
    extents: Option<Extents>,
    mesh: HalfEdgeMesh,
    num_points: usize,
    /// Faces created so far; pruned to live faces after every insertion
    faces: Vec<FaceId>,
    horizon: Vec<HalfEdgeId>,
    new_faces: FaceList,
    claimed: VertexList,
    unclaimed: VertexList,
    vertex_point_indices: Vec<usize>,
    num_vertices: usize,
}

impl QuickHull {
    /// Create an engine with automatic tolerance
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine using the tolerance setting of `config`
    pub fn with_config(config: &HullConfig) -> Self {
        Self {
            explicit_tolerance: config.tolerance,
            ..Self::default()
        }
    }

    /// Build the hull of `points` and return the engine holding it
    pub fn from_points(points: &[Point]) -> Result<Self> {
        let mut hull = Self::new();
        hull.build(points)?;
        Ok(hull)
    }

    /// Override the distance tolerance; `None` restores the automatic value.
    ///
    /// A negative or non-finite value makes the next build fail with
    /// [`HullError::InvalidTolerance`].
    pub fn set_explicit_tolerance(&mut self, tolerance: Option<f64>) {
        self.explicit_tolerance = tolerance;
    }

    pub fn explicit_tolerance(&self) -> Option<f64> {
        self.explicit_tolerance
    }

    /// Tolerance used by the most recent build
    pub fn distance_tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Extents of the most recent build's input
    pub fn extents(&self) -> Option<&Extents> {
        self.extents.as_ref()
    }

    /// Number of points given to the most recent build
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Build from a flat `x, y, z` array holding at least `num_points` points
    pub fn build_from_coords(&mut self, coords: &[f64], num_points: usize) -> Result<()> {
        self.clear_output();
        if num_points < 4 {
            return Err(HullError::InsufficientPoints {
                required: 4,
                found: num_points,
            });
        }
        if coords.len() / 3 < num_points {
            return Err(HullError::CoordinateArrayTooSmall {
                expected: 3 * num_points,
                found: coords.len(),
            });
        }

        let points: Vec<Point> = coords
            .chunks_exact(3)
            .take(num_points)
            .map(|c| Point::new(c[0], c[1], c[2]))
            .collect();
        self.build(&points)
    }

    /// Build from bare positions
    pub fn build_from_positions(&mut self, positions: &[Point3<f64>]) -> Result<()> {
        let points: Vec<Point> = positions.iter().map(|&p| Point::from(p)).collect();
        self.build(&points)
    }

    /// Build the convex hull of `points`.
    ///
    /// On failure the engine holds no hull: vertex and face counts are zero.
    pub fn build(&mut self, points: &[Point]) -> Result<()> {
        self.clear_output();
        if let Some(value) = self.explicit_tolerance.filter(|t| !t.is_finite() || *t < 0.0) {
            return Err(HullError::InvalidTolerance { value });
        }
        if points.len() < 4 {
            return Err(HullError::InsufficientPoints {
                required: 4,
                found: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(HullError::NonFiniteCoordinate { index });
        }

        self.mesh.reset(points);
        self.num_points = points.len();

        let result = self.build_hull(points);
        if result.is_err() {
            self.clear_output();
        }
        result
    }

    fn clear_output(&mut self) {
        self.faces.clear();
        self.horizon.clear();
        self.new_faces.clear();
        self.claimed.clear();
        self.unclaimed.clear();
        self.vertex_point_indices.clear();
        self.num_vertices = 0;
        self.extents = None;
    }

    fn build_hull(&mut self, points: &[Point]) -> Result<()> {
        self.compute_max_and_min(points);
        self.create_initial_simplex()?;

        let mut iterations = 0usize;
        while let Some(eye) = self.next_point_to_add() {
            self.add_point_to_hull(eye);
            iterations += 1;
        }
        self.reindex_faces_and_vertices();

        debug!(
            points = self.num_points,
            tolerance = self.tolerance,
            iterations,
            vertices = self.num_vertices,
            faces = self.faces.len(),
            "hull built"
        );
        Ok(())
    }

    fn compute_max_and_min(&mut self, points: &[Point]) {
        let extents = Extents::from_points(points).unwrap_or_else(Extents::empty);
        self.char_length = extents.characteristic_length();
        self.tolerance = self
            .explicit_tolerance
            .unwrap_or_else(|| extents.automatic_tolerance());
        self.extents = Some(extents);
    }

    fn add_point_to_face(&mut self, v: VertexId, f: FaceId) {
        self.mesh.vertices[v.0].face = Some(f);
        match self.mesh.faces[f.0].outside {
            Some(first) => self.claimed.insert_before(&mut self.mesh.vertices, v, first),
            None => self.claimed.add(&mut self.mesh.vertices, v),
        }
        self.mesh.faces[f.0].outside = Some(v);
    }

    fn remove_point_from_face(&mut self, v: VertexId, f: FaceId) {
        if self.mesh.faces[f.0].outside == Some(v) {
            let successor = self.mesh.vertices[v.0]
                .next
                .filter(|n| self.mesh.vertices[n.0].face == Some(f));
            self.mesh.faces[f.0].outside = successor;
        }
        self.claimed.delete(&mut self.mesh.vertices, v);
    }

    /// Detach the whole outside run of `f` from the claimed list
    fn remove_all_points_from_face(&mut self, f: FaceId) -> Option<VertexId> {
        let first = self.mesh.faces[f.0].outside?;
        let mut last = first;
        while let Some(n) = self.mesh.vertices[last.0].next {
            if self.mesh.vertices[n.0].face != Some(f) {
                break;
            }
            last = n;
        }
        self.claimed.delete_range(&mut self.mesh.vertices, first, last);
        self.mesh.vertices[last.0].next = None;
        self.mesh.faces[f.0].outside = None;
        Some(first)
    }

    /// Release the points claimed by `f`, handing them to `absorbing` when
    /// they lie outside it and to the unclaimed pool otherwise
    fn delete_face_points(&mut self, f: FaceId, absorbing: Option<FaceId>) {
        let Some(first) = self.remove_all_points_from_face(f) else {
            return;
        };

        match absorbing {
            None => self.unclaimed.add_all(&mut self.mesh.vertices, first),
            Some(absorbing) => {
                let mut cursor = Some(first);
                while let Some(v) = cursor {
                    cursor = self.mesh.vertices[v.0].next;
                    let dist = self.mesh.distance_to_plane(absorbing, self.mesh.position(v));
                    if dist > self.tolerance {
                        self.add_point_to_face(v, absorbing);
                    } else {
                        self.unclaimed.add(&mut self.mesh.vertices, v);
                    }
                }
            }
        }
    }

    /// Farthest point above the face owning the head of the claimed list
    fn next_point_to_add(&self) -> Option<VertexId> {
        let first = self.claimed.first()?;
        let eye_face = self.mesh.vertices[first.0].face?;
        let face = self.mesh.face(eye_face);

        let mut eye = None;
        let mut max_dist = 0.0;
        let mut cursor = face.outside;
        while let Some(v) = cursor {
            if self.mesh.vertices[v.0].face != Some(eye_face) {
                break;
            }
            let dist = face.distance_to_plane(self.mesh.position(v));
            if dist > max_dist {
                max_dist = dist;
                eye = Some(v);
            }
            cursor = self.mesh.vertices[v.0].next;
        }
        eye
    }

    fn add_point_to_hull(&mut self, eye: VertexId) {
        self.horizon.clear();
        self.unclaimed.clear();

        let Some(eye_face) = self.mesh.vertices[eye.0].face else {
            return;
        };
        self.remove_point_from_face(eye, eye_face);
        let eye_point = *self.mesh.position(eye);
        self.calculate_horizon(&eye_point, eye_face);
        self.add_new_faces(eye);

        let mut merges = 0usize;
        // first pass: merge faces that are non-convex as judged by the larger face
        let mut cursor = self.new_faces.first();
        while let Some(f) = cursor {
            if self.mesh.face(f).mark == FaceMark::Visible {
                while self.do_adjacent_merge(f, MergeKind::NonConvexWrtLargerFace) {
                    merges += 1;
                }
            }
            cursor = self.mesh.face(f).next;
        }

        // second pass: force merges on faces flagged as non-convex
        let mut cursor = self.new_faces.first();
        while let Some(f) = cursor {
            if self.mesh.face(f).mark == FaceMark::NonConvex {
                self.mesh.face_mut(f).mark = FaceMark::Visible;
                while self.do_adjacent_merge(f, MergeKind::NonConvex) {
                    merges += 1;
                }
            }
            cursor = self.mesh.face(f).next;
        }

        self.resolve_unclaimed_points();
        trace!(
            eye = eye.0,
            horizon = self.horizon.len(),
            merges,
            "point added to hull"
        );
        self.recycle_deleted();
    }

    /// Delete every face visible from `eye_point`, starting at `start`, and
    /// record the boundary loop of the deleted region in `self.horizon`.
    ///
    /// Depth-first over faces with an explicit stack; each frame walks the
    /// loop of one deleted face, skipping the edge it was entered through.
    fn calculate_horizon(&mut self, eye_point: &Point3<f64>, start: FaceId) {
        self.delete_visible_face(start);
        let he0 = self.mesh.face(start).he0;
        let mut stack = vec![HorizonFrame {
            edge: he0,
            stop: he0,
            started: false,
        }];

        while let Some(frame) = stack.last_mut() {
            if frame.started && frame.edge == frame.stop {
                stack.pop();
                continue;
            }
            frame.started = true;
            let edge = frame.edge;
            frame.edge = self.mesh.next(edge);

            let opp = self.mesh.opposite(edge);
            let opp_face = self.mesh.face_of(opp);
            if self.mesh.face(opp_face).mark != FaceMark::Visible {
                continue;
            }
            if self.mesh.distance_to_plane(opp_face, eye_point) > self.tolerance {
                self.delete_visible_face(opp_face);
                stack.push(HorizonFrame {
                    edge: self.mesh.next(opp),
                    stop: opp,
                    started: false,
                });
            } else {
                self.horizon.push(edge);
            }
        }
    }

    fn delete_visible_face(&mut self, f: FaceId) {
        self.delete_face_points(f, None);
        self.mesh.face_mut(f).mark = FaceMark::Deleted;
        self.mesh.retire_face_loop(f);
    }

    /// Triangle (eye, tail, head) over horizon edge `he`; returns the
    /// half-edge running from the horizon edge's head to the eye
    fn add_adjoining_face(&mut self, eye: VertexId, he: HalfEdgeId) -> HalfEdgeId {
        let face = self
            .mesh
            .create_triangle(eye, self.mesh.tail(he), self.mesh.head(he), 0.0);
        self.faces.push(face);
        let base = self.mesh.edge(face, -1);
        let outer = self.mesh.opposite(he);
        self.mesh.set_opposite(base, outer);
        self.mesh.face(face).he0
    }

    fn add_new_faces(&mut self, eye: VertexId) {
        self.new_faces.clear();

        let mut side_prev: Option<HalfEdgeId> = None;
        let mut side_begin: Option<HalfEdgeId> = None;
        for i in 0..self.horizon.len() {
            let side = self.add_adjoining_face(eye, self.horizon[i]);
            match side_prev {
                Some(prev) => {
                    let spoke = self.mesh.next(side);
                    self.mesh.set_opposite(spoke, prev);
                }
                None => side_begin = Some(side),
            }
            let face = self.mesh.face_of(side);
            self.new_faces.add(&mut self.mesh.faces, face);
            side_prev = Some(side);
        }

        if let (Some(begin), Some(last)) = (side_begin, side_prev) {
            let spoke = self.mesh.next(begin);
            self.mesh.set_opposite(spoke, last);
        }
    }

    /// Try one merge of `face` with a neighbor; returns whether one happened
    fn do_adjacent_merge(&mut self, face: FaceId, kind: MergeKind) -> bool {
        let tol = self.tolerance;
        let he0 = self.mesh.face(face).he0;
        let mut hedge = he0;
        let mut convex = true;

        loop {
            let opp_face = self.mesh.opposite_face(hedge);
            let merge = match kind {
                MergeKind::NonConvex => {
                    self.mesh.opp_face_distance(hedge) > -tol
                        || self.mesh.opp_face_distance(self.mesh.opposite(hedge)) > -tol
                }
                MergeKind::NonConvexWrtLargerFace => {
                    let (toward_larger, toward_smaller) =
                        if self.mesh.face(face).area > self.mesh.face(opp_face).area {
                            (hedge, self.mesh.opposite(hedge))
                        } else {
                            (self.mesh.opposite(hedge), hedge)
                        };
                    if self.mesh.opp_face_distance(toward_larger) > -tol {
                        true
                    } else {
                        if self.mesh.opp_face_distance(toward_smaller) > -tol {
                            convex = false;
                        }
                        false
                    }
                }
            };

            if merge {
                let discarded = self.mesh.merge_adjacent_face(face, hedge);
                for d in discarded {
                    self.delete_face_points(d, Some(face));
                }
                return true;
            }

            hedge = self.mesh.next(hedge);
            if hedge == he0 {
                break;
            }
        }

        if !convex {
            self.mesh.face_mut(face).mark = FaceMark::NonConvex;
        }
        false
    }

    /// Hand every orphaned point to the new face it lies farthest above,
    /// dropping it as interior when it is above none
    fn resolve_unclaimed_points(&mut self) {
        let mut cursor = self.unclaimed.first();
        while let Some(v) = cursor {
            cursor = self.mesh.vertices[v.0].next;

            let mut max_dist = self.tolerance;
            let mut max_face = None;
            let mut face_cursor = self.new_faces.first();
            while let Some(f) = face_cursor {
                let face = self.mesh.face(f);
                if face.mark == FaceMark::Visible {
                    let dist = face.distance_to_plane(self.mesh.position(v));
                    if dist > max_dist {
                        max_dist = dist;
                        max_face = Some(f);
                    }
                    if max_dist > 1000.0 * self.tolerance {
                        break;
                    }
                }
                face_cursor = face.next;
            }

            match max_face {
                Some(f) => self.add_point_to_face(v, f),
                None => self.mesh.vertices[v.0].face = None,
            }
        }
        self.unclaimed.clear();
    }

    /// Drop deleted faces from the face list and recycle their slots
    fn recycle_deleted(&mut self) {
        let mesh = &mut self.mesh;
        self.faces.retain(|&f| {
            if mesh.face(f).mark == FaceMark::Deleted {
                mesh.free_face(f);
                false
            } else {
                true
            }
        });
        mesh.reclaim();
    }

    fn reindex_faces_and_vertices(&mut self) {
        for v in &mut self.mesh.vertices[..self.num_points] {
            v.index = UNMARKED;
        }
        self.recycle_deleted();

        for i in 0..self.faces.len() {
            let f = self.faces[i];
            let heads: Vec<VertexId> = self
                .mesh
                .face_edges(f)
                .map(|he| self.mesh.head(he))
                .collect();
            for v in heads {
                self.mesh.vertices[v.0].index = HULL_MARK;
            }
        }

        self.num_vertices = 0;
        self.vertex_point_indices.clear();
        for i in 0..self.num_points {
            let vertex = &mut self.mesh.vertices[i];
            if vertex.index == HULL_MARK {
                self.vertex_point_indices.push(i);
                vertex.index = self.num_vertices;
                self.num_vertices += 1;
            }
        }
    }

    /// Split every non-triangular face into a fan of triangles.
    ///
    /// Splits that would cut off a sliver thinner than
    /// `1000 × characteristic length × ε` are skipped.
    pub fn triangulate(&mut self) {
        let min_area = 1000.0 * self.char_length * DOUBLE_PREC;
        let mut new_faces = FaceList::new();
        for i in 0..self.faces.len() {
            let f = self.faces[i];
            if self.mesh.face(f).mark == FaceMark::Visible {
                self.mesh.triangulate_face(f, min_area, &mut new_faces);
            }
        }
        let created: Vec<FaceId> = new_faces.iter(&self.mesh.faces).collect();
        self.faces.extend(created);
    }

    /// Number of hull vertices
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Number of hull faces
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Read-only access to the underlying mesh
    pub fn mesh(&self) -> &HalfEdgeMesh {
        &self.mesh
    }

    /// Ids of the hull faces
    pub fn face_ids(&self) -> &[FaceId] {
        &self.faces
    }
}

/// Build the hull of `points` with automatic tolerance
pub fn convex_hull(points: &[Point]) -> Result<QuickHull> {
    QuickHull::from_points(points)
}

/// Build the hull of `points`, applying the tolerance and triangulation
/// settings of `config`
pub fn convex_hull_with(points: &[Point], config: &HullConfig) -> Result<QuickHull> {
    let mut hull = QuickHull::with_config(config);
    hull.build(points)?;
    if config.triangulate {
        hull.triangulate();
    }
    Ok(hull)
}
