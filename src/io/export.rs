// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Hull exporters: Wavefront OBJ and JSON statistics

use crate::analytics::HullStats;
use crate::hull::{FaceIndexing, QuickHull};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Export hull to a Wavefront OBJ file
pub fn export_obj(hull: &QuickHull, path: impl AsRef<Path>, indexing: FaceIndexing) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create OBJ file: {:?}", path))?;
    let mut writer = BufWriter::new(file);
    hull.write_obj(&mut writer, indexing)
        .with_context(|| format!("Failed to write OBJ file: {:?}", path))?;
    writer.flush()?;
    Ok(())
}

/// Export hull statistics as pretty JSON
pub fn export_stats_json(stats: &HullStats, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(stats).context("Failed to serialize hull statistics")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write stats file: {:?}", path))?;
    Ok(())
}
