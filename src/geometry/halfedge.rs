// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Half-edge mesh representation for the evolving hull.
//!
//! Vertices, half-edges and faces live in arenas and refer to each other by
//! index. Faces and half-edges removed during hull growth are retired and
//! their slots recycled through free-lists, so a stale id is a logic error
//! caught by the validity checker rather than a dangling pointer.

use super::Point;
use crate::utils::math::{normalize, triangle_cross};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Index of a vertex; equal to the input index of its point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

/// Index of a half-edge slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfEdgeId(pub usize);

/// Index of a face slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub usize);

/// Face state during hull growth.
///
/// `Visible` faces are part of the hull. `NonConvex` marks a face that
/// needs a forced merge in the second merge pass and returns to `Visible`
/// afterwards. `Deleted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FaceMark {
    #[default]
    Visible,
    NonConvex,
    Deleted,
}

/// Vertex wrapping one input point
#[derive(Debug, Clone)]
pub struct Vertex {
    /// Input point with its payload
    pub point: Point,
    /// Input index before the build, hull-local index after reindexing,
    /// a scratch mark in between
    pub index: usize,
    /// Links in the claimed or unclaimed list
    pub(crate) prev: Option<VertexId>,
    pub(crate) next: Option<VertexId>,
    /// Face whose outside set currently claims this vertex
    pub(crate) face: Option<FaceId>,
}

impl Vertex {
    pub fn new(point: Point, index: usize) -> Self {
        Self {
            point,
            index,
            prev: None,
            next: None,
            face: None,
        }
    }

    pub fn position(&self) -> &Point3<f64> {
        &self.point.position
    }
}

/// Directed edge ending at `head`; the tail is the head of `prev`
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge {
    /// Vertex this half-edge points to
    pub head: VertexId,
    /// Face to the left of this half-edge
    pub face: FaceId,
    /// Next half-edge in the same face
    pub next: HalfEdgeId,
    /// Previous half-edge in the same face
    pub prev: HalfEdgeId,
    /// Twin on the neighboring face; refers to itself until stitched
    pub opposite: HalfEdgeId,
    live: bool,
}

/// Planar convex polygon bounded by a loop of half-edges
#[derive(Debug, Clone)]
pub struct Face {
    /// Entry half-edge of the boundary loop
    pub he0: HalfEdgeId,
    /// Unit outward normal
    pub normal: Vector3<f64>,
    /// Average of the loop vertices
    pub centroid: Point3<f64>,
    /// `normal · centroid`, the plane's distance from the origin
    pub plane_offset: f64,
    /// Length of the summed fan cross products, i.e. twice the polygon area
    pub area: f64,
    /// Number of half-edges in the loop
    pub num_vertices: usize,
    /// Lifecycle state during construction
    pub mark: FaceMark,
    /// First vertex of this face's run in the claimed list
    pub(crate) outside: Option<VertexId>,
    /// Link used while the face sits in a `FaceList`
    pub(crate) next: Option<FaceId>,
}

impl Face {
    fn fresh() -> Self {
        Self {
            he0: HalfEdgeId(0),
            normal: Vector3::zeros(),
            centroid: Point3::origin(),
            plane_offset: 0.0,
            area: 0.0,
            num_vertices: 0,
            mark: FaceMark::Visible,
            outside: None,
            next: None,
        }
    }

    /// Signed distance from `p` to the face plane, positive outside
    pub fn distance_to_plane(&self, p: &Point3<f64>) -> f64 {
        self.normal.dot(&p.coords) - self.plane_offset
    }

    pub fn is_visible(&self) -> bool {
        self.mark == FaceMark::Visible
    }
}

/// Arena-backed half-edge mesh
#[derive(Debug, Clone, Default)]
pub struct HalfEdgeMesh {
    /// One vertex per input point; grows across builds
    pub(crate) vertices: Vec<Vertex>,
    /// Half-edge slots, live or retired
    pub(crate) half_edges: Vec<HalfEdge>,
    /// Face slots in any state
    pub(crate) faces: Vec<Face>,
    /// Deleted face slots ready for reuse
    free_faces: Vec<FaceId>,
    /// Half-edge slots ready for reuse
    free_half_edges: Vec<HalfEdgeId>,
    /// Retired this insertion; reusable after `reclaim`
    retired_half_edges: Vec<HalfEdgeId>,
}

impl HalfEdgeMesh {
    /// Create an empty half-edge mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `points` as vertices 0..n, discarding all faces and half-edges.
    ///
    /// The vertex buffer only ever grows; slots past `points.len()` are kept
    /// for reuse by a later, larger build.
    pub fn reset(&mut self, points: &[Point]) {
        self.half_edges.clear();
        self.faces.clear();
        self.free_faces.clear();
        self.free_half_edges.clear();
        self.retired_half_edges.clear();

        for (i, point) in points.iter().enumerate() {
            if let Some(vertex) = self.vertices.get_mut(i) {
                *vertex = Vertex::new(*point, i);
            } else {
                self.vertices.push(Vertex::new(*point, i));
            }
        }
    }

    /// Capacity of the vertex buffer
    pub fn vertex_capacity(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex(&self, v: VertexId) -> &Vertex {
        &self.vertices[v.0]
    }

    pub fn half_edge(&self, he: HalfEdgeId) -> &HalfEdge {
        &self.half_edges[he.0]
    }

    pub fn face(&self, f: FaceId) -> &Face {
        &self.faces[f.0]
    }

    pub(crate) fn face_mut(&mut self, f: FaceId) -> &mut Face {
        &mut self.faces[f.0]
    }

    pub fn position(&self, v: VertexId) -> &Point3<f64> {
        &self.vertices[v.0].point.position
    }

    pub fn head(&self, he: HalfEdgeId) -> VertexId {
        self.half_edges[he.0].head
    }

    pub fn tail(&self, he: HalfEdgeId) -> VertexId {
        self.head(self.prev(he))
    }

    pub fn next(&self, he: HalfEdgeId) -> HalfEdgeId {
        self.half_edges[he.0].next
    }

    pub fn prev(&self, he: HalfEdgeId) -> HalfEdgeId {
        self.half_edges[he.0].prev
    }

    pub fn opposite(&self, he: HalfEdgeId) -> HalfEdgeId {
        self.half_edges[he.0].opposite
    }

    pub fn face_of(&self, he: HalfEdgeId) -> FaceId {
        self.half_edges[he.0].face
    }

    pub fn opposite_face(&self, he: HalfEdgeId) -> FaceId {
        self.face_of(self.opposite(he))
    }

    pub fn is_live(&self, he: HalfEdgeId) -> bool {
        self.half_edges[he.0].live
    }

    /// Squared length of a half-edge
    pub fn length_squared(&self, he: HalfEdgeId) -> f64 {
        nalgebra::distance_squared(self.position(self.tail(he)), self.position(self.head(he)))
    }

    pub fn set_opposite(&mut self, a: HalfEdgeId, b: HalfEdgeId) {
        self.half_edges[a.0].opposite = b;
        self.half_edges[b.0].opposite = a;
    }

    pub(crate) fn link(&mut self, from: HalfEdgeId, to: HalfEdgeId) {
        self.half_edges[from.0].next = to;
        self.half_edges[to.0].prev = from;
    }

    /// Half-edge `i` steps from `he0` (negative walks backwards)
    pub fn edge(&self, f: FaceId, i: isize) -> HalfEdgeId {
        let mut he = self.faces[f.0].he0;
        if i >= 0 {
            for _ in 0..i {
                he = self.next(he);
            }
        } else {
            for _ in 0..(-i) {
                he = self.prev(he);
            }
        }
        he
    }

    /// Half-edges of face `f` in loop order starting at `he0`
    pub fn face_edges(&self, f: FaceId) -> FaceEdges<'_> {
        let he0 = self.faces[f.0].he0;
        FaceEdges {
            mesh: self,
            start: he0,
            current: Some(he0),
        }
    }

    pub(crate) fn alloc_face(&mut self) -> FaceId {
        if let Some(f) = self.free_faces.pop() {
            self.faces[f.0] = Face::fresh();
            f
        } else {
            self.faces.push(Face::fresh());
            FaceId(self.faces.len() - 1)
        }
    }

    pub(crate) fn alloc_half_edge(&mut self, head: VertexId, face: FaceId) -> HalfEdgeId {
        let id = self
            .free_half_edges
            .pop()
            .unwrap_or(HalfEdgeId(self.half_edges.len()));
        let he = HalfEdge {
            head,
            face,
            next: id,
            prev: id,
            opposite: id,
            live: true,
        };
        if id.0 == self.half_edges.len() {
            self.half_edges.push(he);
        } else {
            self.half_edges[id.0] = he;
        }
        id
    }

    /// Mark a half-edge as garbage; its slot is recycled on the next `reclaim`
    pub(crate) fn retire_half_edge(&mut self, he: HalfEdgeId) {
        let edge = &mut self.half_edges[he.0];
        if edge.live {
            edge.live = false;
            self.retired_half_edges.push(he);
        }
    }

    /// Retire every half-edge in the loop of `f`
    pub(crate) fn retire_face_loop(&mut self, f: FaceId) {
        let edges: Vec<HalfEdgeId> = self.face_edges(f).collect();
        for he in edges {
            self.retire_half_edge(he);
        }
    }

    /// Return a deleted face slot to the free-list
    pub(crate) fn free_face(&mut self, f: FaceId) {
        self.free_faces.push(f);
    }

    /// Make retired half-edge slots available for allocation
    pub(crate) fn reclaim(&mut self) {
        self.free_half_edges.append(&mut self.retired_half_edges);
    }

    /// Create the triangle (v0, v1, v2); `he0` ends at `v0`
    pub fn create_triangle(
        &mut self,
        v0: VertexId,
        v1: VertexId,
        v2: VertexId,
        min_area: f64,
    ) -> FaceId {
        let face = self.alloc_face();
        let he0 = self.alloc_half_edge(v0, face);
        let he1 = self.alloc_half_edge(v1, face);
        let he2 = self.alloc_half_edge(v2, face);

        self.link(he0, he1);
        self.link(he1, he2);
        self.link(he2, he0);

        self.faces[face.0].he0 = he0;
        self.compute_normal_and_centroid_with(face, min_area);
        face
    }

    /// Recompute normal, area, vertex count, centroid and plane offset
    pub fn compute_normal_and_centroid(&mut self, f: FaceId) {
        self.compute_normal(f);
        self.compute_centroid(f);
    }

    /// As `compute_normal_and_centroid`, but slivers below `min_area` get a
    /// normal made orthogonal to their longest edge
    pub fn compute_normal_and_centroid_with(&mut self, f: FaceId, min_area: f64) {
        self.compute_normal(f);
        if self.faces[f.0].area < min_area {
            self.stabilize_normal(f);
        }
        self.compute_centroid(f);
    }

    fn compute_normal(&mut self, f: FaceId) {
        let he0 = self.faces[f.0].he0;
        let mut he2 = self.next(self.next(he0));
        let p0 = *self.position(self.head(he0));
        let mut d2 = self.position(self.head(self.next(he0))) - p0;
        let mut normal = Vector3::zeros();
        let mut num_vertices = 2;

        while he2 != he0 {
            let d1 = d2;
            d2 = self.position(self.head(he2)) - p0;
            normal += d1.cross(&d2);
            he2 = self.next(he2);
            num_vertices += 1;
        }

        let area = normal.norm();
        if area > 0.0 {
            normal /= area;
        }

        let face = &mut self.faces[f.0];
        face.normal = normal;
        face.area = area;
        face.num_vertices = num_vertices;
    }

    fn stabilize_normal(&mut self, f: FaceId) {
        let mut longest = self.faces[f.0].he0;
        let mut len_sqr_max = 0.0;
        for he in self.face_edges(f) {
            let len_sqr = self.length_squared(he);
            if len_sqr > len_sqr_max {
                longest = he;
                len_sqr_max = len_sqr;
            }
        }
        if len_sqr_max == 0.0 {
            return;
        }

        let edge = self.position(self.head(longest)) - self.position(self.tail(longest));
        let u = edge / len_sqr_max.sqrt();
        let face = &mut self.faces[f.0];
        let along = face.normal.dot(&u);
        face.normal -= u * along;
        if face.normal.norm_squared() > 0.0 {
            normalize(&mut face.normal);
        }
    }

    fn compute_centroid(&mut self, f: FaceId) {
        let mut sum = Vector3::zeros();
        let mut count = 0usize;
        for he in self.face_edges(f) {
            sum += self.position(self.head(he)).coords;
            count += 1;
        }
        let face = &mut self.faces[f.0];
        face.centroid = Point3::from(sum / count as f64);
        face.plane_offset = face.normal.dot(&face.centroid.coords);
    }

    /// Distance from the plane of `f` to point `p`
    pub fn distance_to_plane(&self, f: FaceId, p: &Point3<f64>) -> f64 {
        self.faces[f.0].distance_to_plane(p)
    }

    /// Distance from the plane of `he`'s face to the centroid of its opposite face
    pub fn opp_face_distance(&self, he: HalfEdgeId) -> f64 {
        let centroid = self.faces[self.opposite_face(he).0].centroid;
        self.distance_to_plane(self.face_of(he), &centroid)
    }

    /// Twice the area of the triangle spanned by three vertices
    pub fn triangle_area(&self, a: VertexId, b: VertexId, c: VertexId) -> f64 {
        triangle_cross(self.position(a), self.position(b), self.position(c)).norm()
    }

    /// Head vertex indices of a face's loop, for diagnostics
    pub fn face_vertex_string(&self, f: FaceId) -> String {
        self.face_edges(f)
            .map(|he| self.vertices[self.head(he).0].index.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// "tail-head" vertex indices of a half-edge, for diagnostics
    pub fn edge_vertex_string(&self, he: HalfEdgeId) -> String {
        format!(
            "{}-{}",
            self.vertices[self.tail(he).0].index,
            self.vertices[self.head(he).0].index
        )
    }

    /// Structural check of one face loop.
    ///
    /// Every loop edge must belong to `f`, be live, have a symmetric opposite
    /// on a live face, and agree with that opposite on its endpoints.
    pub fn check_face_consistency(&self, f: FaceId) -> Result<(), String> {
        let face = &self.faces[f.0];
        let mut count = 0;
        for he in self.face_edges(f) {
            count += 1;
            let edge = &self.half_edges[he.0];
            if !edge.live {
                return Err(format!(
                    "face {} references retired half-edge {}",
                    self.face_vertex_string(f),
                    he.0
                ));
            }
            if edge.face != f {
                return Err(format!(
                    "half-edge {} in face {} belongs to another face",
                    self.edge_vertex_string(he),
                    self.face_vertex_string(f)
                ));
            }
            let opp = edge.opposite;
            if opp == he {
                return Err(format!(
                    "unreflected half-edge {}",
                    self.edge_vertex_string(he)
                ));
            }
            if self.opposite(opp) != he {
                return Err(format!(
                    "opposite half-edge {} does not point back to {}",
                    self.edge_vertex_string(opp),
                    self.edge_vertex_string(he)
                ));
            }
            if self.head(opp) != self.tail(he) || self.head(he) != self.tail(opp) {
                return Err(format!(
                    "half-edge {} reflected by {}",
                    self.edge_vertex_string(he),
                    self.edge_vertex_string(opp)
                ));
            }
            let opp_face = &self.faces[self.face_of(opp).0];
            if opp_face.mark == FaceMark::Deleted {
                return Err(format!(
                    "opposite face {} of face {} is deleted",
                    self.face_vertex_string(self.face_of(opp)),
                    self.face_vertex_string(f)
                ));
            }
        }
        if count < 3 {
            return Err(format!("degenerate face: only {} vertices", count));
        }
        if count != face.num_vertices {
            return Err(format!(
                "face {} has {} vertices but counted {}",
                self.face_vertex_string(f),
                face.num_vertices,
                count
            ));
        }
        Ok(())
    }
}

/// Iterator over the half-edges of one face loop
pub struct FaceEdges<'a> {
    mesh: &'a HalfEdgeMesh,
    start: HalfEdgeId,
    current: Option<HalfEdgeId>,
}

impl<'a> Iterator for FaceEdges<'a> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<HalfEdgeId> {
        let he = self.current?;
        let next = self.mesh.next(he);
        self.current = if next == self.start { None } else { Some(next) };
        Some(he)
    }
}
