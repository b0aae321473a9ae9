// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Point cloud text reader.
//!
//! One point per line: `x y z [r g b [intensity [classification]]]`,
//! separated by whitespace or commas. Blank lines and `#` comments are
//! skipped.

use crate::geometry::{Payload, Point};
use anyhow::{anyhow, bail, Context, Result};
use nalgebra::Point3;
use std::fs;
use std::path::Path;

/// Read a point cloud file
pub fn read_points(path: impl AsRef<Path>) -> Result<Vec<Point>> {
    let source = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read point file: {:?}", path.as_ref()))?;

    parse_points(&source)
        .with_context(|| format!("Failed to parse point file: {:?}", path.as_ref()))
}

/// Parse point cloud text
pub fn parse_points(source: &str) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    for (n, raw) in source.lines().enumerate() {
        let line = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        let fields: Vec<&str> = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|f| !f.is_empty())
            .collect();
        if fields.is_empty() {
            continue;
        }
        let point = parse_fields(&fields)
            .with_context(|| format!("line {}: {:?}", n + 1, raw.trim()))?;
        points.push(point);
    }
    Ok(points)
}

fn parse_fields(fields: &[&str]) -> Result<Point> {
    match fields.len() {
        3 | 6 | 7 | 8 => {}
        n => bail!("expected 3, 6, 7 or 8 fields, found {}", n),
    }

    let mut coords = [0.0; 3];
    for (c, field) in coords.iter_mut().zip(fields) {
        *c = field
            .parse()
            .map_err(|_| anyhow!("invalid coordinate {:?}", field))?;
    }

    let mut payload = Payload::default();
    if fields.len() >= 6 {
        for (c, field) in payload.color.iter_mut().zip(&fields[3..6]) {
            *c = field
                .parse()
                .map_err(|_| anyhow!("invalid color channel {:?}", field))?;
        }
    }
    if let Some(field) = fields.get(6) {
        payload.intensity = field
            .parse()
            .map_err(|_| anyhow!("invalid intensity {:?}", field))?;
    }
    if let Some(field) = fields.get(7) {
        payload.classification = field
            .parse()
            .map_err(|_| anyhow!("invalid classification {:?}", field))?;
    }

    Ok(Point::with_payload(Point3::from(coords), payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_mixed_lines() {
        let source =
            "# scan header\n\n1 2 3\n4.5, -1, 0 255 128 0\n0 0 1 10 20 30 0.75 2 # tagged\n";
        let points = parse_points(source).unwrap();

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(points[0].payload, Payload::default());
        assert_eq!(points[1].payload.color, [255, 128, 0]);
        assert_eq!(points[2].payload, Payload::new([10, 20, 30], 0.75, 2));
    }

    #[test]
    fn test_errors_name_the_line() {
        let err = parse_points("0 0 0\n1 x 0\n").unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("line 2"), "{}", msg);
        assert!(msg.contains("invalid coordinate"), "{}", msg);

        let err = parse_points("1 2\n").unwrap_err();
        assert!(format!("{:#}", err).contains("expected 3, 6, 7 or 8 fields"));

        let err = parse_points("1 2 3 300 0 0\n").unwrap_err();
        assert!(format!("{:#}", err).contains("invalid color channel"));
    }

    #[test]
    fn test_read_points_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "0 0 0")?;
        writeln!(file, "1 0 0")?;
        writeln!(file, "0 1 0")?;
        writeln!(file, "0 0 1")?;

        let points = read_points(file.path())?;
        assert_eq!(points.len(), 4);
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        assert!(read_points("/nonexistent/cloud.xyz").is_err());
    }
}
