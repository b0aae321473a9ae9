// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Hull configuration system

use crate::hull::FaceIndexing;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up by [`HullConfig::load`]
pub const CONFIG_FILE: &str = "polyhull.toml";

/// Hull configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HullConfig {
    /// Explicit distance tolerance; automatic when unset
    pub tolerance: Option<f64>,
    /// Split faces into triangles after building
    pub triangulate: bool,
    /// Run the validity checker after building
    pub check: bool,
    /// Maximum parallel workers for batch builds
    pub parallelism: Option<usize>,
    /// Verbose output
    pub verbose: bool,
    /// Default formatting of face index output
    pub indexing: FaceIndexing,
}

impl HullConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: HullConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        if let Some(tolerance) = config.tolerance {
            check_tolerance(tolerance)
                .with_context(|| format!("Invalid config file: {:?}", path.as_ref()))?;
        }
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `POLYHULL_*` overrides read through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(tolerance) = lookup("POLYHULL_TOLERANCE") {
            let tolerance: f64 = tolerance
                .parse()
                .with_context(|| format!("Invalid POLYHULL_TOLERANCE: {:?}", tolerance))?;
            check_tolerance(tolerance).context("Invalid POLYHULL_TOLERANCE")?;
            self.tolerance = Some(tolerance);
        }

        if let Some(triangulate) = lookup("POLYHULL_TRIANGULATE") {
            self.triangulate = triangulate.parse().unwrap_or(false);
        }

        if let Some(parallelism) = lookup("POLYHULL_PARALLELISM") {
            self.parallelism = parallelism.parse().ok();
        }

        if let Some(verbose) = lookup("POLYHULL_VERBOSE") {
            self.verbose = verbose.parse().unwrap_or(false);
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}

fn check_tolerance(tolerance: f64) -> Result<()> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        bail!("tolerance must be finite and non-negative, got {}", tolerance);
    }
    Ok(())
}
