// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parallel hull builds using rayon.
//!
//! Every input gets its own engine; nothing is shared between builds.

use crate::config::HullConfig;
use crate::error::Result;
use crate::geometry::Point;
use crate::hull::{convex_hull_with, QuickHull};
use rayon::prelude::*;
use std::time::{Duration, Instant};
use tracing::debug;

/// Result of one build in a batch
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub hull: QuickHull,
    /// Checker verdict when `HullConfig::check` is set
    pub valid: Option<bool>,
    pub elapsed: Duration,
}

/// Build one hull per point set in parallel, preserving input order
pub fn build_many(sets: &[Vec<Point>], config: &HullConfig) -> Vec<Result<BatchOutcome>> {
    match config.parallelism {
        Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(|| build_all(sets, config)),
            Err(err) => {
                debug!(%err, "falling back to the global thread pool");
                build_all(sets, config)
            }
        },
        None => build_all(sets, config),
    }
}

fn build_all(sets: &[Vec<Point>], config: &HullConfig) -> Vec<Result<BatchOutcome>> {
    sets.par_iter().map(|points| build_one(points, config)).collect()
}

fn build_one(points: &[Point], config: &HullConfig) -> Result<BatchOutcome> {
    let start = Instant::now();
    let hull = convex_hull_with(points, config)?;
    let valid = config.check.then(|| hull.check());
    Ok(BatchOutcome {
        hull,
        valid,
        elapsed: start.elapsed(),
    })
}
