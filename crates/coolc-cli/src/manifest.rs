// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Project manifest parsing.
//!
//! An optional `coolc.toml` next to the program file names the package and
//! tunes the analysis:
//!
//! ```toml
//! [package]
//! name = "shapes"
//!
//! [analysis]
//! entry-class = "Program"
//! ```
//!
//! The `--entry-class` flag (or `COOLC_ENTRY_CLASS`) overrides the manifest.

use camino::Utf8Path;
use coolc_core::semantic_analysis::GraphConfig;
use miette::{Context, IntoDiagnostic, Result};
use serde::Deserialize;
use std::fs;
use tracing::debug;

/// File name looked up next to the program file.
pub const MANIFEST_FILE: &str = "coolc.toml";

/// The top-level manifest structure parsed from `coolc.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Manifest {
    /// The `[package]` section, if present.
    #[serde(default)]
    pub package: Option<PackageManifest>,
    /// The `[analysis]` section.
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

/// Package metadata.
#[derive(Debug, Deserialize)]
pub struct PackageManifest {
    /// Package name, used in report headings.
    pub name: String,
}

/// Settings that feed [`GraphConfig`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AnalysisSettings {
    /// Name of the program entry class.
    #[serde(default)]
    pub entry_class: Option<String>,
}

impl Manifest {
    /// Builds the engine configuration, letting `entry_class` (from the
    /// command line) win over the manifest.
    pub fn graph_config(&self, entry_class: Option<&str>) -> GraphConfig {
        let mut config = GraphConfig::default();
        if let Some(name) = entry_class.or(self.analysis.entry_class.as_deref()) {
            config.entry_class = name.into();
        }
        config
    }

    /// Package name, if one was declared.
    pub fn package_name(&self) -> Option<&str> {
        self.package.as_ref().map(|package| package.name.as_str())
    }
}

/// Parse a `coolc.toml` manifest file.
///
/// Returns an error if the file cannot be read or contains invalid TOML.
pub fn parse_manifest(path: &Utf8Path) -> Result<Manifest> {
    let content = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read manifest '{path}'"))?;

    toml::from_str(&content)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to parse manifest '{path}'"))
}

/// Look for `coolc.toml` in the given directory and parse it if found.
///
/// Returns `None` if no manifest file exists. Returns an error if the file
/// exists but is malformed.
pub fn find_manifest(project_root: &Utf8Path) -> Result<Option<Manifest>> {
    let manifest_path = project_root.join(MANIFEST_FILE);
    if manifest_path
        .try_exists()
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to stat manifest '{manifest_path}'"))?
    {
        debug!(path = %manifest_path, "loading manifest");
        parse_manifest(&manifest_path).map(Some)
    } else {
        Ok(None)
    }
}
