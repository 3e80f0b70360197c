//! Pack command implementation.
//!
//! Loads the build config and plugin manifest, stages every declared asset,
//! and creates the archive.

use crate::config::BuildConfig;
use anyhow::{Context, Result};
use plugpack::{Packager, PluginManifest};
use std::path::PathBuf;

/// Run the pack command.
pub fn run(config_path: Option<String>, root: Option<String>) -> Result<()> {
    let root = PathBuf::from(root.unwrap_or_else(|| ".".to_string()));
    let config_path = config_path.unwrap_or_else(|| "plugpack.toml".to_string());

    let config = BuildConfig::from_file(root.join(&config_path))?;
    config.validate()?;

    let manifest_path = root.join(&config.manifest);
    let manifest = PluginManifest::from_file(&manifest_path)
        .with_context(|| format!("Failed to load manifest: {}", manifest_path.display()))?;
    manifest
        .validate()
        .with_context(|| format!("Invalid manifest: {}", manifest_path.display()))?;

    println!("Packaging plugin: {}", manifest.id);

    let spec = config.output_spec(&root, &manifest);
    let manifest_file_name = config.manifest_file_name()?;

    let report = Packager::new(&root)
        .package(&spec, &manifest, &manifest_file_name)
        .with_context(|| format!("Failed to package into {}", spec.staging_dir.display()))?;

    println!(
        "  Staged {} files ({} missing, {} failed)",
        report.stats.copied, report.stats.missing, report.stats.failed
    );
    if report.stats.failed > 0 {
        println!("  Warning: some entries could not be copied; the artifact is incomplete");
    }
    println!(
        "Archive created: {} ({} bytes)",
        spec.archive_path.display(),
        report.archive_bytes
    );

    Ok(())
}
