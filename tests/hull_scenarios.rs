// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end hull scenarios on small, known point sets

use approx::assert_abs_diff_eq;
use nalgebra::Vector3;
use polyhull::{
    analyze, convex_hull, convex_hull_with, random_cube_points, DegenerateKind, FaceIndexing,
    HullConfig, HullError, Point, PointCloud, QuickHull,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn unit_cube() -> Vec<Point> {
    PointCloud::cube_corners(Vector3::new(1.0, 1.0, 1.0), false).to_points()
}

/// Smallest |distance| from `p` to any face plane
fn boundary_distance(hull: &QuickHull, p: &Point) -> f64 {
    hull.face_ids()
        .iter()
        .map(|&f| hull.mesh().distance_to_plane(f, &p.position).abs())
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn test_unit_cube() {
    init_tracing();
    let points = unit_cube();
    let mut hull = convex_hull(&points).unwrap();

    assert_eq!(hull.num_vertices(), 8);
    assert_eq!(hull.num_faces(), 6);
    for face in hull.faces(FaceIndexing::default()) {
        assert_eq!(face.len(), 4);
    }
    for p in &points {
        assert_abs_diff_eq!(boundary_distance(&hull, p), 0.0, epsilon = 1e-12);
    }
    assert!(hull.check());

    hull.triangulate();
    assert_eq!(hull.num_faces(), 12);
    assert_eq!(hull.num_vertices(), 8);
    assert!(hull.faces(FaceIndexing::default()).iter().all(|f| f.len() == 3));
    assert!(hull.check());
}

#[test]
fn test_tetrahedron() {
    init_tracing();
    let points = vec![
        Point::new(1.0, 1.0, 1.0),
        Point::new(-1.0, -1.0, 1.0),
        Point::new(-1.0, 1.0, -1.0),
        Point::new(1.0, -1.0, -1.0),
    ];
    let hull = convex_hull(&points).unwrap();

    assert_eq!(hull.num_vertices(), 4);
    assert_eq!(hull.num_faces(), 4);
    assert!(hull.faces(FaceIndexing::default()).iter().all(|f| f.len() == 3));
    for p in &points {
        assert_abs_diff_eq!(boundary_distance(&hull, p), 0.0, epsilon = 1e-12);
    }
    assert!(hull.check());
}

#[test]
fn test_interior_point_is_not_a_vertex() {
    init_tracing();
    let mut points = unit_cube();
    points.push(Point::new(0.5, 0.5, 0.5));
    points.push(Point::new(0.25, 0.75, 0.5));
    let hull = convex_hull(&points).unwrap();

    assert_eq!(hull.num_vertices(), 8);
    assert!(!hull.vertex_point_indices().contains(&8));
    assert!(!hull.vertex_point_indices().contains(&9));
    for face in hull.faces(FaceIndexing::default().point_relative()) {
        assert!(face.iter().all(|&i| i < 8));
    }
}

#[test]
fn test_coplanar_points_fail() {
    init_tracing();
    let points: Vec<Point> = (0..20)
        .map(|i| {
            let t = i as f64;
            Point::new(t.cos(), t.sin(), 2.0 * t.cos() - t.sin())
        })
        .collect();

    let mut hull = QuickHull::new();
    let err = hull.build(&points).unwrap_err();
    assert!(matches!(
        err,
        HullError::Degenerate {
            kind: DegenerateKind::Coplanar,
            ..
        }
    ));
    assert_eq!(hull.num_vertices(), 0);
    assert_eq!(hull.num_faces(), 0);
    assert!(hull.faces(FaceIndexing::default()).is_empty());
}

#[test]
fn test_coincident_and_colinear_points_fail() {
    let same = vec![Point::new(3.0, -1.0, 2.0); 6];
    let err = convex_hull(&same).unwrap_err();
    assert_eq!(err.degenerate_kind(), Some(DegenerateKind::Coincident));

    let line: Vec<Point> = (0..6).map(|i| Point::new(1.0, i as f64, -(i as f64))).collect();
    let err = convex_hull(&line).unwrap_err();
    assert_eq!(err.degenerate_kind(), Some(DegenerateKind::Colinear));
}

#[test]
fn test_large_random_cloud() {
    init_tracing();
    let points = random_cube_points(10_000, 1.0, 2024);
    let hull = convex_hull(&points).unwrap();

    assert!(hull.check());
    assert!(hull.num_vertices() >= 4);
    assert!(hull.num_vertices() < points.len() / 10);
    assert_eq!(analyze(&hull).euler_characteristic, 2);
}

#[test]
fn test_check_is_idempotent() {
    let points = random_cube_points(2_000, 5.0, 99);
    let hull = convex_hull(&points).unwrap();

    let mut first = Vec::<u8>::new();
    let mut second = Vec::<u8>::new();
    let tol = hull.distance_tolerance();
    let a = hull.check_with_tolerance(tol, Some(&mut first as &mut dyn std::io::Write));
    let b = hull.check_with_tolerance(tol, Some(&mut second as &mut dyn std::io::Write));
    assert_eq!(a, b);
    assert_eq!(first, second);
    assert!(a);
}

#[test]
fn test_config_triangulates() {
    let config = HullConfig {
        triangulate: true,
        ..HullConfig::default()
    };
    let hull = convex_hull_with(&unit_cube(), &config).unwrap();
    assert_eq!(hull.num_faces(), 12);
}

#[test]
fn test_flat_coordinates() {
    let coords = [
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, //
        0.0, 0.0, 1.0, //
        0.1, 0.1, 0.1, //
        9.0, 9.0, 9.0,
    ];

    let mut hull = QuickHull::new();
    hull.build_from_coords(&coords, 5).unwrap();
    assert_eq!(hull.num_points(), 5);
    assert_eq!(hull.num_vertices(), 4);
    assert_eq!(hull.vertex_coords().len(), 12);

    let err = hull.build_from_coords(&coords, 7).unwrap_err();
    assert_eq!(err, HullError::CoordinateArrayTooSmall { expected: 21, found: 18 });
    assert_eq!(hull.num_vertices(), 0);

    let err = hull.build_from_coords(&coords, 3).unwrap_err();
    assert_eq!(err, HullError::InsufficientPoints { required: 4, found: 3 });
}
