// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Face surgery on the half-edge mesh: merging adjacent faces and fan
//! triangulation

use super::halfedge::{FaceId, FaceMark, HalfEdgeId, HalfEdgeMesh};
use super::lists::FaceList;

impl HalfEdgeMesh {
    /// Absorb the face across `hedge_adj` into `face`.
    ///
    /// The shared run of edges is removed and the neighbor's remaining
    /// edges are spliced into `face`. If splicing leaves a vertex with both
    /// incident edges facing the same triangle, that triangle collapses too.
    /// Returns every face discarded (one to three); all are marked
    /// `Deleted` and their claimed points must be redistributed by the caller.
    pub fn merge_adjacent_face(&mut self, face: FaceId, hedge_adj: HalfEdgeId) -> Vec<FaceId> {
        let opp_face = self.opposite_face(hedge_adj);
        let mut discarded = vec![opp_face];
        self.face_mut(opp_face).mark = FaceMark::Deleted;

        let hedge_opp = self.opposite(hedge_adj);
        let mut hedge_adj_prev = self.prev(hedge_adj);
        let mut hedge_adj_next = self.next(hedge_adj);
        let mut hedge_opp_prev = self.prev(hedge_opp);
        let mut hedge_opp_next = self.next(hedge_opp);

        // widen to the full run of edges shared with opp_face
        while self.opposite_face(hedge_adj_prev) == opp_face {
            hedge_adj_prev = self.prev(hedge_adj_prev);
            hedge_opp_next = self.next(hedge_opp_next);
        }
        while self.opposite_face(hedge_adj_next) == opp_face {
            hedge_opp_prev = self.prev(hedge_opp_prev);
            hedge_adj_next = self.next(hedge_adj_next);
        }

        self.retire_run(self.next(hedge_adj_prev), hedge_adj_next);
        self.retire_run(self.next(hedge_opp_prev), hedge_opp_next);

        let stop = self.next(hedge_opp_prev);
        let mut he = hedge_opp_next;
        while he != stop {
            self.half_edges[he.0].face = face;
            he = self.next(he);
        }

        if !self.is_live(self.face(face).he0) {
            self.face_mut(face).he0 = hedge_adj_next;
        }

        // head side, then tail side
        if let Some(d) = self.connect_half_edges(face, hedge_opp_prev, hedge_adj_next) {
            discarded.push(d);
        }
        if let Some(d) = self.connect_half_edges(face, hedge_adj_prev, hedge_opp_next) {
            discarded.push(d);
        }

        self.compute_normal_and_centroid(face);
        discarded
    }

    fn retire_run(&mut self, from: HalfEdgeId, until: HalfEdgeId) {
        let mut he = from;
        while he != until {
            let next = self.next(he);
            self.retire_half_edge(he);
            he = next;
        }
    }

    /// Join `hedge_prev -> hedge` inside `face`, removing the vertex between
    /// them when both edges border the same neighbor
    fn connect_half_edges(
        &mut self,
        face: FaceId,
        hedge_prev: HalfEdgeId,
        hedge: HalfEdgeId,
    ) -> Option<FaceId> {
        let opp_face = self.opposite_face(hedge);
        if self.opposite_face(hedge_prev) != opp_face {
            self.link(hedge_prev, hedge);
            return None;
        }

        if self.face(face).he0 == hedge_prev {
            self.face_mut(face).he0 = hedge;
        }

        let old_opp = self.opposite(hedge);
        let mut discarded = None;
        let hedge_opp = if self.face(opp_face).num_vertices == 3 {
            // the neighbor collapses to nothing
            let before = self.prev(old_opp);
            let after = self.next(old_opp);
            let hedge_opp = self.opposite(before);
            self.retire_half_edge(old_opp);
            self.retire_half_edge(before);
            self.retire_half_edge(after);
            self.face_mut(opp_face).mark = FaceMark::Deleted;
            discarded = Some(opp_face);
            hedge_opp
        } else {
            let hedge_opp = self.next(old_opp);
            if self.face(opp_face).he0 == old_opp {
                self.face_mut(opp_face).he0 = hedge_opp;
            }
            let before = self.prev(old_opp);
            self.link(before, hedge_opp);
            self.retire_half_edge(old_opp);
            hedge_opp
        };

        let before = self.prev(hedge_prev);
        self.link(before, hedge);
        self.set_opposite(hedge, hedge_opp);
        self.retire_half_edge(hedge_prev);

        if discarded.is_none() {
            self.compute_normal_and_centroid(opp_face);
        }
        discarded
    }

    /// Fan-triangulate `face` around the head of its `he0`.
    ///
    /// Ears are cut from the front of the fan; an ear thinner than
    /// `min_area` is not split off, the back ear is tried instead, and the
    /// face stops splitting when both would be slivers. New triangles are
    /// appended to `new_faces`; `face` keeps the last remaining piece.
    pub fn triangulate_face(&mut self, face: FaceId, min_area: f64, new_faces: &mut FaceList) {
        if self.face(face).num_vertices < 4 {
            return;
        }

        let pivot = self.head(self.face(face).he0);
        let mut remaining = self.face(face).num_vertices;

        while remaining > 3 {
            let into = self.face(face).he0;
            let a = self.next(into);
            let b = self.next(a);
            let front = self.triangle_area(pivot, self.head(a), self.head(b));
            let tri = if front >= min_area {
                self.cut_front_ear(face, a, b)
            } else {
                let e = self.prev(into);
                let back = self.triangle_area(pivot, self.tail(e), self.head(e));
                if back < min_area {
                    break;
                }
                self.cut_back_ear(face, e, into)
            };
            self.compute_normal_and_centroid_with(tri, min_area);
            new_faces.add(&mut self.faces, tri);
            remaining -= 1;
        }

        self.compute_normal_and_centroid_with(face, min_area);
    }

    /// Split off (pivot, head a, head b) where `a` leaves the pivot
    fn cut_front_ear(&mut self, face: FaceId, a: HalfEdgeId, b: HalfEdgeId) -> FaceId {
        let into = self.prev(a);
        let pivot = self.head(into);
        let after = self.next(b);
        let far = self.head(b);

        let tri = self.alloc_face();
        let closing = self.alloc_half_edge(pivot, tri);
        let diagonal = self.alloc_half_edge(far, face);

        self.half_edges[a.0].face = tri;
        self.half_edges[b.0].face = tri;
        self.link(b, closing);
        self.link(closing, a);
        self.face_mut(tri).he0 = closing;

        self.link(into, diagonal);
        self.link(diagonal, after);
        self.set_opposite(closing, diagonal);
        tri
    }

    /// Split off (pivot, tail e, head e) where `into` enters the pivot
    fn cut_back_ear(&mut self, face: FaceId, e: HalfEdgeId, into: HalfEdgeId) -> FaceId {
        let near = self.tail(e);
        let pivot = self.head(into);
        let before = self.prev(e);
        let after = self.next(into);

        let tri = self.alloc_face();
        let opening = self.alloc_half_edge(near, tri);
        let diagonal = self.alloc_half_edge(pivot, face);

        self.half_edges[e.0].face = tri;
        self.half_edges[into.0].face = tri;
        self.link(into, opening);
        self.link(opening, e);
        self.face_mut(tri).he0 = into;

        self.link(before, diagonal);
        self.link(diagonal, after);
        self.face_mut(face).he0 = diagonal;
        self.set_opposite(opening, diagonal);
        tri
    }
}
