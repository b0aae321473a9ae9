// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Structural and geometric invariants over randomized clouds

use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use polyhull::geometry::FaceMark;
use polyhull::{analyze, convex_hull, FaceIndexing, Payload, Point, PointCloud, QuickHull};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Opposites are symmetric, reversed, and every face is live
fn assert_mesh_closed(hull: &QuickHull) {
    let mesh = hull.mesh();
    for &f in hull.face_ids() {
        assert_eq!(mesh.face(f).mark, FaceMark::Visible);
        for he in mesh.face_edges(f) {
            let opp = mesh.opposite(he);
            assert_ne!(opp, he);
            assert_eq!(mesh.opposite(opp), he);
            assert_eq!(mesh.head(he), mesh.tail(opp));
            assert_eq!(mesh.tail(he), mesh.head(opp));
            assert_eq!(mesh.face(mesh.face_of(opp)).mark, FaceMark::Visible);
        }
    }
}

/// No input point lies beyond any face by more than 10 × tolerance
fn assert_contains_all(hull: &QuickHull, points: &[Point]) {
    let limit = 10.0 * hull.distance_tolerance();
    for &f in hull.face_ids() {
        for p in points {
            assert!(hull.mesh().distance_to_plane(f, &p.position) <= limit);
        }
    }
}

fn assert_euler(hull: &QuickHull) {
    let faces = hull.faces(FaceIndexing::default());
    let edges: usize = faces.iter().map(Vec::len).sum::<usize>() / 2;
    let euler = hull.num_vertices() as i64 - edges as i64 + faces.len() as i64;
    assert_eq!(euler, 2);
}

#[test]
fn test_random_cubes_across_seeds() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = rng.gen_range(4..2_000);
        let points = PointCloud::random_cube(n, 10.0, seed).to_points();
        let hull = convex_hull(&points).unwrap();

        assert!(hull.check(), "seed {}", seed);
        assert_mesh_closed(&hull);
        assert_contains_all(&hull, &points);
        assert_euler(&hull);
    }
}

#[test]
fn test_integer_grid_clouds() {
    // small integer grids are full of duplicates and coplanar runs, which
    // drive merges that collapse neighbors and drop redundant vertices
    let mut built = 0;
    for seed in 0..300 {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = rng.gen_range(8..120);
        let points: Vec<Point> = (0..n)
            .map(|_| {
                Point::new(
                    rng.gen_range(-3..=3) as f64,
                    rng.gen_range(-3..=3) as f64,
                    rng.gen_range(-3..=3) as f64,
                )
            })
            .collect();

        let mut hull = match convex_hull(&points) {
            Ok(hull) => hull,
            Err(err) if err.degenerate_kind().is_some() => continue,
            Err(err) => panic!("seed {}: {}", seed, err),
        };
        built += 1;

        assert!(hull.check(), "seed {}", seed);
        assert_mesh_closed(&hull);
        assert_contains_all(&hull, &points);
        assert_euler(&hull);

        hull.triangulate();
        assert!(hull.check(), "seed {} triangulated", seed);
        assert_mesh_closed(&hull);
        assert_euler(&hull);
    }
    assert!(built > 200);
}

#[test]
fn test_sphere_points_are_all_extreme() {
    let points = PointCloud::random_sphere(500, 3.0, 8).to_points();
    let mut hull = convex_hull(&points).unwrap();

    assert!(hull.check());
    assert!(hull.num_vertices() > 450);
    hull.triangulate();
    assert!(hull.check());
    assert_mesh_closed(&hull);
    assert_euler(&hull);
}

#[test]
fn test_lattice_with_coplanar_points() {
    let points = PointCloud::lattice(6, 0.5).to_points();
    let mut hull = convex_hull(&points).unwrap();

    assert!(hull.check());
    assert_mesh_closed(&hull);
    assert_contains_all(&hull, &points);
    assert_euler(&hull);

    let stats = analyze(&hull);
    assert_relative_eq!(stats.volume, 2.5f64.powi(3), max_relative = 1e-9);
    assert_relative_eq!(stats.surface_area, 6.0 * 2.5 * 2.5, max_relative = 1e-9);

    hull.triangulate();
    assert!(hull.check());
    assert_euler(&hull);
}

#[test]
fn test_cylinder_caps_merge_into_polygons() {
    let segments = 24;
    let points = PointCloud::cylinder(2.0, 1.0, segments).to_points();
    let hull = convex_hull(&points).unwrap();

    assert!(hull.check());
    assert_eq!(hull.num_vertices(), 2 * segments as usize);
    assert_eq!(hull.num_faces(), segments as usize + 2);
    assert_eq!(analyze(&hull).max_face_vertices, segments as usize);
}

#[test]
fn test_far_octahedron_tips() {
    // a wide octahedron swallows the sphere once its tips join the hull
    let mut points = PointCloud::random_sphere(3_000, 1.0, 4).to_points();
    for axis in 0..3 {
        for sign in [-1.0, 1.0] {
            let mut v = Vector3::zeros();
            v[axis] = 1e3 * sign;
            points.push(Point::from(Point3::from(v)));
        }
    }
    let hull = convex_hull(&points).unwrap();

    assert!(hull.check());
    assert_eq!(hull.num_vertices(), 6);
    assert_eq!(hull.num_faces(), 8);
}

#[test]
fn test_rebuild_with_smaller_input() {
    let mut hull = QuickHull::new();
    let large = PointCloud::random_cube(5_000, 1.0, 1).to_points();
    let small = PointCloud::random_sphere(50, 1.0, 2).to_points();

    hull.build(&large).unwrap();
    let capacity = hull.mesh().vertex_capacity();
    hull.build(&small).unwrap();

    assert_eq!(hull.num_points(), 50);
    assert_eq!(hull.mesh().vertex_capacity(), capacity);
    assert!(hull.check());
    assert!(hull.vertex_point_indices().iter().all(|&i| i < 50));
}

#[test]
fn test_explicit_tolerance_is_used() {
    let points = PointCloud::random_cube(1_000, 1.0, 77).to_points();
    let mut hull = QuickHull::new();
    hull.set_explicit_tolerance(Some(1e-3));
    hull.build(&points).unwrap();

    assert_eq!(hull.explicit_tolerance(), Some(1e-3));
    assert_eq!(hull.distance_tolerance(), 1e-3);
    assert!(hull.check());
    assert_contains_all(&hull, &points);
    assert_euler(&hull);
}

#[test]
fn test_payload_follows_vertices() {
    let mut points = PointCloud::random_sphere(200, 1.0, 12).to_points();
    for (i, p) in points.iter_mut().enumerate() {
        p.set_payload(Payload::new([i as u8, 0, 0], i as f32, (i % 7) as u8));
    }
    let hull = convex_hull(&points).unwrap();

    for (vertex, &index) in hull.vertices().iter().zip(hull.vertex_point_indices()) {
        assert_eq!(vertex.payload, points[index].payload);
        assert_eq!(vertex.position, points[index].position);
    }
}

#[test]
fn test_clockwise_reverses_faces() {
    let points = PointCloud::random_cube(300, 1.0, 5).to_points();
    let hull = convex_hull(&points).unwrap();

    let ccw = hull.faces(FaceIndexing::default());
    let cw = hull.faces(FaceIndexing::default().clockwise());
    for (a, b) in ccw.iter().zip(&cw) {
        let mut reversed = a[1..].to_vec();
        reversed.reverse();
        assert_eq!(b[0], a[0]);
        assert_eq!(&b[1..], reversed.as_slice());
    }
}
