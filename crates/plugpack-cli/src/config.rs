//! Build configuration parsing and validation

use anyhow::{Context, Result};
use plugpack::{ARCHIVE_EXTENSION, OutputSpec, PluginManifest};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// plugpack.toml build configuration
///
/// ```toml
/// manifest = "plugin.json"
///
/// [output]
/// directory = "dist"
/// archive = "my-plugin.zip"    # optional, defaults to "<manifest id>.zip"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Plugin manifest path, relative to the project root.
    pub manifest: String,

    pub output: OutputSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    /// Staging directory, relative to the project root.
    pub directory: String,

    /// Archive path, relative to the project root.
    #[serde(default)]
    pub archive: Option<String>,
}

impl BuildConfig {
    /// Load configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.manifest.is_empty() {
            anyhow::bail!("manifest path cannot be empty");
        }

        if self.output.directory.is_empty() {
            anyhow::bail!("output.directory cannot be empty");
        }

        if let Some(archive) = &self.output.archive
            && archive.is_empty()
        {
            anyhow::bail!("output.archive cannot be empty when present");
        }

        Ok(())
    }

    /// Resolve the output paths against the project root.
    ///
    /// When no archive path is configured, it defaults to the manifest id
    /// plus the archive extension.
    pub fn output_spec(&self, root: &Path, manifest: &PluginManifest) -> OutputSpec {
        let archive = self
            .output
            .archive
            .clone()
            .unwrap_or_else(|| format!("{}.{ARCHIVE_EXTENSION}", manifest.id));

        OutputSpec {
            staging_dir: root.join(&self.output.directory),
            archive_path: root.join(archive),
        }
    }

    /// Base name the processed manifest is written under in staging.
    pub fn manifest_file_name(&self) -> Result<String> {
        Path::new(&self.manifest)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .with_context(|| format!("Invalid manifest path: {}", self.manifest))
    }
}
