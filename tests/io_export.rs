// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! File surfaces: point files in, OBJ and JSON out

use anyhow::Result;
use polyhull::io::{export_obj, export_stats_json, read_points};
use polyhull::{analyze, convex_hull_with, FaceIndexing, HullConfig, QuickHull};
use std::io::Write;
use tempfile::NamedTempFile;

const OCTAHEDRON: &str = "\
# octahedron with a colored tip and an interior point
 1  0  0
-1  0  0
 0  1  0
 0 -1  0
 0  0  1  200 10 10  0.5 3
 0  0 -1
 0.1, 0.1, 0.1
";

fn octahedron_file() -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    write!(file, "{}", OCTAHEDRON)?;
    Ok(file)
}

/// Parse `v` and `f` records of an OBJ text
fn parse_obj(text: &str) -> (Vec<[f64; 3]>, Vec<Vec<usize>>) {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    for line in text.lines() {
        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("v") => {
                let c: Vec<f64> = fields.map(|t| t.parse().unwrap()).collect();
                vertices.push([c[0], c[1], c[2]]);
            }
            Some("f") => faces.push(fields.map(|t| t.parse().unwrap()).collect()),
            _ => {}
        }
    }
    (vertices, faces)
}

#[test]
fn test_point_file_to_obj() -> Result<()> {
    let input = octahedron_file()?;
    let points = read_points(input.path())?;
    assert_eq!(points.len(), 7);
    assert_eq!(points[4].payload.color, [200, 10, 10]);

    let hull = QuickHull::from_points(&points)?;
    assert_eq!(hull.num_vertices(), 6);
    assert_eq!(hull.num_faces(), 8);

    let dir = tempfile::tempdir()?;
    let obj = dir.path().join("octahedron.obj");
    export_obj(&hull, &obj, FaceIndexing::default())?;

    let (vertices, faces) = parse_obj(&std::fs::read_to_string(&obj)?);
    assert_eq!(vertices.len(), 6);
    assert_eq!(faces.len(), 8);
    for face in &faces {
        assert_eq!(face.len(), 3);
        assert!(face.iter().all(|&i| (1..=6).contains(&i)));
    }
    Ok(())
}

#[test]
fn test_obj_index_flags() -> Result<()> {
    let input = octahedron_file()?;
    let points = read_points(input.path())?;
    let hull = QuickHull::from_points(&points)?;
    let dir = tempfile::tempdir()?;

    let zero = dir.path().join("zero.obj");
    export_obj(&hull, &zero, FaceIndexing::default().zero_based())?;
    let (_, faces) = parse_obj(&std::fs::read_to_string(&zero)?);
    assert!(faces.iter().flatten().any(|&i| i == 0));
    assert!(faces.iter().flatten().all(|&i| i < 6));

    let relative = dir.path().join("relative.obj");
    export_obj(&hull, &relative, FaceIndexing::default().point_relative().zero_based())?;
    let (_, faces) = parse_obj(&std::fs::read_to_string(&relative)?);
    // the interior point (input index 6) never shows up
    assert!(faces.iter().flatten().all(|&i| i < 6));
    Ok(())
}

#[test]
fn test_config_drives_build_and_export() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("polyhull.toml");
    std::fs::write(
        &config_path,
        "triangulate = true\ncheck = true\n\n[indexing]\nwinding = \"clockwise\"\nbase = \"zero\"\n",
    )?;
    let config = HullConfig::from_file(&config_path)?;

    let input = octahedron_file()?;
    let points = read_points(input.path())?;
    let hull = convex_hull_with(&points, &config)?;
    assert!(hull.check());

    let obj = dir.path().join("hull.obj");
    export_obj(&hull, &obj, config.indexing)?;
    let (_, faces) = parse_obj(&std::fs::read_to_string(&obj)?);
    assert_eq!(faces, hull.faces(FaceIndexing::default().clockwise()));
    Ok(())
}

#[test]
fn test_stats_json() -> Result<()> {
    let input = octahedron_file()?;
    let hull = QuickHull::from_points(&read_points(input.path())?)?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("stats.json");
    export_stats_json(&analyze(&hull), &path)?;

    let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(value["vertex_count"], 6);
    assert_eq!(value["face_count"], 8);
    assert_eq!(value["edge_count"], 12);
    let volume = value["volume"].as_f64().unwrap_or_default();
    assert!((volume - 4.0 / 3.0).abs() < 1e-12);
    Ok(())
}

#[test]
fn test_malformed_point_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "0 0 0")?;
    writeln!(file, "1 0 zero")?;

    let err = read_points(file.path()).unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("line 2"), "{}", msg);
    Ok(())
}
