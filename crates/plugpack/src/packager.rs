//! Packaging pipeline: assemble the staging directory, then archive it.

use crate::archive::create_archive;
use crate::assemble::{OutputSpec, assemble};
use crate::materialize::CopyStats;
use crate::{PackResult, PluginManifest, ProcessedManifest};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Runs the full packaging pipeline for one project.
///
/// Holds the project root that every manifest-relative source path is
/// resolved against. One `Packager` may run any number of builds; each build
/// targets its own staging directory and archive path, and two concurrent
/// builds on the same paths are last-writer-wins.
#[derive(Debug)]
pub struct Packager {
    root: PathBuf,
}

/// Result of a completed packaging run.
#[derive(Debug)]
pub struct PackReport {
    /// The manifest document written into the staging directory.
    pub manifest: ProcessedManifest,

    /// Copy totals; `failed > 0` means the artifact is materially
    /// incomplete even though the run completed.
    pub stats: CopyStats,

    /// Size of the finished archive in bytes.
    pub archive_bytes: u64,
}

impl Packager {
    /// Create a packager rooted at the project directory.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Project root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Assemble the staging directory, then compress it into the archive.
    ///
    /// Per-item copy failures are tolerated and surfaced through the
    /// report's stats; staging and archive failures abort the run.
    pub fn package(
        &self,
        spec: &OutputSpec,
        manifest: &PluginManifest,
        manifest_file_name: &str,
    ) -> PackResult<PackReport> {
        let report = assemble(&self.root, spec, manifest, manifest_file_name)?;
        let archive_bytes = create_archive(&spec.staging_dir, &spec.archive_path)?;

        tracing::info!(
            "created {} ({archive_bytes} bytes)",
            spec.archive_path.display()
        );

        Ok(PackReport {
            manifest: report.manifest,
            stats: report.stats,
            archive_bytes,
        })
    }

    /// Delete the staging directory and everything beneath it.
    ///
    /// An absent directory is not an error.
    pub fn clean(&self, staging_dir: &Path) -> PackResult<()> {
        match fs::remove_dir_all(staging_dir) {
            Ok(()) => {
                tracing::info!("cleaned {}", staging_dir.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
