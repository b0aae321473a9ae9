// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - point cloud reading and hull export

mod export;
mod points;

pub use export::{export_obj, export_stats_json};
pub use points::{parse_points, read_points};
