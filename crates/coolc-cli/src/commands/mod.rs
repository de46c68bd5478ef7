// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! CLI command implementations.
//!
//! Every command starts from a [`Session`]: the program file, its optional
//! manifest, and the analysed class graph.

use crate::manifest::{Manifest, find_manifest};
use crate::program::{Program, load_program};
use camino::Utf8Path;
use coolc_core::semantic_analysis::{Analysis, ClassGraph};
use miette::Result;
use tracing::info;

pub mod check;
pub mod hierarchy;
pub mod layout;
pub mod query;

/// A program loaded and analysed.
#[derive(Debug)]
pub struct Session {
    pub program: Program,
    pub manifest: Manifest,
    pub analysis: Analysis,
}

impl Session {
    /// Loads `path`, reads the manifest beside it, and builds the class graph.
    ///
    /// `entry_class` overrides the manifest's entry class.
    pub fn open(path: &str, entry_class: Option<&str>) -> Result<Self> {
        let program = load_program(Utf8Path::new(path))?;
        let manifest = find_manifest(program.project_root())?.unwrap_or_default();
        let config = manifest.graph_config(entry_class);
        let analysis = ClassGraph::build(program.classes.iter().cloned(), config);
        info!(
            program = %program.path,
            classes = analysis.graph().len(),
            errors = analysis.errors().len(),
            "analysis finished"
        );
        Ok(Self {
            program,
            manifest,
            analysis,
        })
    }

    /// The frozen class graph.
    pub fn graph(&self) -> &ClassGraph {
        self.analysis.graph()
    }

    /// Heading used in reports: the package name, else the program path.
    pub fn title(&self) -> &str {
        self.manifest
            .package_name()
            .unwrap_or(self.program.path.as_str())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::write_program;
    use super::*;

    #[test]
    fn test_open_applies_manifest_entry_class() {
        let (_temp, path) = write_program(
            r#"[{"name": {"name": "Program"}}]"#,
            Some("[package]\nname = \"demo\"\n\n[analysis]\nentry-class = \"Program\"\n"),
        );

        let session = Session::open(path.as_str(), None).unwrap();
        assert!(!session.analysis.has_errors());
        assert_eq!(session.title(), "demo");
    }

    #[test]
    fn test_open_flag_overrides_manifest() {
        let (_temp, path) = write_program(
            r#"[{"name": {"name": "Program"}}]"#,
            Some("[analysis]\nentry-class = \"Program\"\n"),
        );

        let session = Session::open(path.as_str(), Some("Start")).unwrap();
        assert!(session.analysis.has_errors());
        assert_eq!(session.graph().config().entry_class, "Start");
        assert_eq!(session.title(), path.as_str());
    }

    #[test]
    fn test_open_missing_program_file() {
        assert!(Session::open("/nonexistent/program.json", None).is_err());
    }
}
