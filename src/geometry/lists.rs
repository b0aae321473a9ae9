// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Intrusive sequences threaded through the mesh arenas.
//!
//! The links live in the `Vertex` and `Face` records themselves, so a list
//! only stores its ends and every operation takes the arena it threads.

use super::halfedge::{Face, FaceId, Vertex, VertexId};

/// Doubly linked list of vertices
#[derive(Debug, Clone, Copy, Default)]
pub struct VertexList {
    head: Option<VertexId>,
    tail: Option<VertexId>,
}

impl VertexList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all members; their links are left stale
    pub fn clear(&mut self) {
        self.head = None;
        self.tail = None;
    }

    pub fn first(&self) -> Option<VertexId> {
        self.head
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Append a single vertex
    pub fn add(&mut self, vertices: &mut [Vertex], v: VertexId) {
        match self.tail {
            Some(t) => vertices[t.0].next = Some(v),
            None => self.head = Some(v),
        }
        vertices[v.0].prev = self.tail;
        vertices[v.0].next = None;
        self.tail = Some(v);
    }

    /// Append a chain of vertices already linked through `next`
    pub fn add_all(&mut self, vertices: &mut [Vertex], first: VertexId) {
        match self.tail {
            Some(t) => vertices[t.0].next = Some(first),
            None => self.head = Some(first),
        }
        vertices[first.0].prev = self.tail;

        let mut last = first;
        while let Some(n) = vertices[last.0].next {
            last = n;
        }
        self.tail = Some(last);
    }

    /// Insert `v` immediately before `before`, which must be a member
    pub fn insert_before(&mut self, vertices: &mut [Vertex], v: VertexId, before: VertexId) {
        let prev = vertices[before.0].prev;
        vertices[v.0].prev = prev;
        match prev {
            Some(p) => vertices[p.0].next = Some(v),
            None => self.head = Some(v),
        }
        vertices[v.0].next = Some(before);
        vertices[before.0].prev = Some(v);
    }

    /// Unlink a single member
    pub fn delete(&mut self, vertices: &mut [Vertex], v: VertexId) {
        self.delete_range(vertices, v, v);
    }

    /// Unlink the consecutive run `first..=last`.
    ///
    /// `last.next` is left untouched so the run can still be walked up to
    /// its former successor.
    pub fn delete_range(&mut self, vertices: &mut [Vertex], first: VertexId, last: VertexId) {
        let before = vertices[first.0].prev;
        let after = vertices[last.0].next;
        match before {
            Some(p) => vertices[p.0].next = after,
            None => self.head = after,
        }
        match after {
            Some(n) => vertices[n.0].prev = before,
            None => self.tail = before,
        }
    }

    /// Walk the members in order
    pub fn iter<'a>(&self, vertices: &'a [Vertex]) -> impl Iterator<Item = VertexId> + 'a {
        std::iter::successors(self.head, move |v| vertices[v.0].next)
    }
}

/// Singly linked list of faces
#[derive(Debug, Clone, Copy, Default)]
pub struct FaceList {
    head: Option<FaceId>,
    tail: Option<FaceId>,
}

impl FaceList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.head = None;
        self.tail = None;
    }

    pub fn first(&self) -> Option<FaceId> {
        self.head
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn add(&mut self, faces: &mut [Face], f: FaceId) {
        match self.tail {
            Some(t) => faces[t.0].next = Some(f),
            None => self.head = Some(f),
        }
        faces[f.0].next = None;
        self.tail = Some(f);
    }

    pub fn iter<'a>(&self, faces: &'a [Face]) -> impl Iterator<Item = FaceId> + 'a {
        std::iter::successors(self.head, move |f| faces[f.0].next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{HalfEdgeMesh, Point};

    fn vertices(n: usize) -> Vec<Vertex> {
        (0..n).map(|i| Vertex::new(Point::new(i as f64, 0.0, 0.0), i)).collect()
    }

    fn members(list: &VertexList, verts: &[Vertex]) -> Vec<usize> {
        list.iter(verts).map(|v| v.0).collect()
    }

    #[test]
    fn test_add_and_delete() {
        let mut verts = vertices(4);
        let mut list = VertexList::new();
        for i in 0..4 {
            list.add(&mut verts, VertexId(i));
        }
        assert_eq!(members(&list, &verts), vec![0, 1, 2, 3]);

        list.delete(&mut verts, VertexId(0));
        list.delete(&mut verts, VertexId(3));
        assert_eq!(members(&list, &verts), vec![1, 2]);

        list.delete(&mut verts, VertexId(1));
        list.delete(&mut verts, VertexId(2));
        assert!(list.is_empty());
    }

    #[test]
    fn test_insert_before_head() {
        let mut verts = vertices(3);
        let mut list = VertexList::new();
        list.add(&mut verts, VertexId(1));
        list.insert_before(&mut verts, VertexId(0), VertexId(1));
        list.add(&mut verts, VertexId(2));
        assert_eq!(members(&list, &verts), vec![0, 1, 2]);
        assert_eq!(list.first(), Some(VertexId(0)));
    }

    #[test]
    fn test_delete_range_keeps_run_walkable() {
        let mut verts = vertices(5);
        let mut list = VertexList::new();
        for i in 0..5 {
            list.add(&mut verts, VertexId(i));
        }
        list.delete_range(&mut verts, VertexId(1), VertexId(3));
        assert_eq!(members(&list, &verts), vec![0, 4]);

        verts[3].next = None;
        let mut other = VertexList::new();
        other.add_all(&mut verts, VertexId(1));
        assert_eq!(members(&other, &verts), vec![1, 2, 3]);

        other.add(&mut verts, VertexId(4));
        assert_eq!(members(&other, &verts), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_face_list_order() {
        let points: Vec<Point> = (0..3)
            .map(|i| Point::new(i as f64, (i * i) as f64, 0.0))
            .collect();
        let mut mesh = HalfEdgeMesh::new();
        mesh.reset(&points);
        let a = mesh.create_triangle(VertexId(0), VertexId(1), VertexId(2), 0.0);
        let b = mesh.create_triangle(VertexId(2), VertexId(1), VertexId(0), 0.0);

        let mut list = FaceList::new();
        list.add(&mut mesh.faces, b);
        list.add(&mut mesh.faces, a);
        let order: Vec<FaceId> = list.iter(&mesh.faces).collect();
        assert_eq!(order, vec![b, a]);
    }
}
