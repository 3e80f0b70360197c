//! Output assembly: materializing manifest-declared assets into the staging
//! directory.

use crate::manifest::base_name;
use crate::materialize::{CopyStats, copy_if_exists, copy_path, ensure_dir};
use crate::{PackError, PackResult, PluginManifest, ProcessedManifest};
use std::fs;
use std::path::{Path, PathBuf};

/// Where a build's outputs land.
#[derive(Debug, Clone)]
pub struct OutputSpec {
    /// Staging directory; created idempotently before any write.
    pub staging_dir: PathBuf,

    /// Final archive file path. Prior contents are overwritten, not merged.
    pub archive_path: PathBuf,
}

/// Result of an assembly pass: the manifest actually written, plus the copy
/// totals a caller can use to tell a complete artifact from an incomplete
/// one.
#[derive(Debug)]
pub struct AssembleReport {
    pub manifest: ProcessedManifest,
    pub stats: CopyStats,
}

/// Materialize every manifest-declared asset into the staging directory and
/// write the processed manifest document there under `manifest_file_name`.
///
/// Source paths are resolved against `root`. Assets are staged in a fixed
/// order: the manifest document, then readme/changelog/icon (each optional),
/// then the `files` entries in declaration order. Duplicate destinations
/// silently overwrite earlier writes — last declared wins — so intentional
/// overrides remain possible.
///
/// Individual copy failures are logged and tolerated (see
/// [`crate::materialize`]); failing to create the staging directory or write
/// the manifest file is fatal and propagates as [`PackError::Staging`].
pub fn assemble(
    root: &Path,
    spec: &OutputSpec,
    manifest: &PluginManifest,
    manifest_file_name: &str,
) -> PackResult<AssembleReport> {
    ensure_dir(&spec.staging_dir).map_err(|e| PackError::Staging {
        path: spec.staging_dir.clone(),
        source: e,
    })?;

    let processed = manifest.process();

    let manifest_path = spec.staging_dir.join(manifest_file_name);
    let json = processed.to_json()?;
    fs::write(&manifest_path, json).map_err(|e| PackError::Staging {
        path: manifest_path.clone(),
        source: e,
    })?;
    tracing::info!("wrote processed manifest to {}", manifest_path.display());

    let mut stats = CopyStats::default();

    for asset in [&manifest.readme, &manifest.changelog, &manifest.icon]
        .into_iter()
        .flatten()
    {
        let outcome = copy_if_exists(&root.join(asset), &spec.staging_dir.join(base_name(asset)));
        stats.record(&outcome);
    }

    for entry in &manifest.files {
        let dest = spec.staging_dir.join(entry.destination());

        // Destination parents must exist before anything is written beneath
        // them; a dest like "img/icon.png" may name directories not yet
        // present in staging.
        if let Some(parent) = dest.parent() {
            ensure_dir(parent).map_err(|e| PackError::Staging {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        copy_path(&root.join(entry.source()), &dest, &mut stats);
    }

    stats.summarize();

    Ok(AssembleReport {
        manifest: processed,
        stats,
    })
}
