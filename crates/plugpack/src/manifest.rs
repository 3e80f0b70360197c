//! Plugin manifest model and normalization.
//!
//! The manifest is the plugin's own descriptor: an identifier, optional
//! documentation assets, and the list of files to stage into the artifact.
//! Unknown fields are carried through untouched so the processed document
//! written into the artifact keeps everything the plugin author declared.

use crate::{PackError, PackResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Plugin manifest as declared by the project.
///
/// Read-only to the packaging engine except for `files`, which is normalized
/// into destination-relative strings when the manifest is processed (see
/// [`PluginManifest::process`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Plugin identifier (e.g., "my-plugin").
    pub id: String,

    /// Path to the readme, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,

    /// Path to the changelog, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,

    /// Path to the icon, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Files to stage into the artifact, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileEntry>,

    /// Every other manifest field, preserved verbatim in the processed
    /// document.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A single `files` entry: either a bare source path, or a source path with
/// an explicit destination inside the staging directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileEntry {
    /// Bare source path; staged at its basename.
    Path(String),

    /// Source path with optional destination remapping.
    Mapped {
        path: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        dest: Option<String>,
    },
}

/// Manifest with `files` collapsed to destination-relative path strings.
///
/// This is the document serialized into the staging directory: consumers of
/// the packaged plugin only need final relative paths, not build-time source
/// locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedManifest {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FileEntry {
    /// Source path of this entry, relative to the project root.
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            FileEntry::Path(path) => path,
            FileEntry::Mapped { path, .. } => path,
        }
    }

    /// Destination of this entry, relative to the staging directory.
    ///
    /// An absent `dest` defaults to the basename of the source path.
    #[must_use]
    pub fn destination(&self) -> String {
        match self {
            FileEntry::Path(path) => base_name(path),
            FileEntry::Mapped { path, dest } => {
                dest.clone().unwrap_or_else(|| base_name(path))
            }
        }
    }
}

impl PluginManifest {
    /// Load a manifest from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> PackResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> PackResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Collapse `files` to destination-relative strings.
    ///
    /// Every other field is carried over unchanged.
    #[must_use]
    pub fn process(&self) -> ProcessedManifest {
        ProcessedManifest {
            id: self.id.clone(),
            readme: self.readme.clone(),
            changelog: self.changelog.clone(),
            icon: self.icon.clone(),
            files: self.files.iter().map(FileEntry::destination).collect(),
            extra: self.extra.clone(),
        }
    }

    /// Validate the manifest.
    pub fn validate(&self) -> PackResult<()> {
        if self.id.is_empty() {
            return Err(PackError::InvalidManifest("id is required".to_string()));
        }

        for (index, entry) in self.files.iter().enumerate() {
            if entry.source().is_empty() {
                return Err(PackError::InvalidManifest(format!(
                    "files[{index}]: source path is required"
                )));
            }

            if let FileEntry::Mapped {
                dest: Some(dest), ..
            } = entry
                && dest.is_empty()
            {
                return Err(PackError::InvalidManifest(format!(
                    "files[{index}]: dest must not be empty when present"
                )));
            }
        }

        Ok(())
    }
}

impl ProcessedManifest {
    /// Serialize to JSON.
    pub fn to_json(&self) -> PackResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Last component of a path string, as a string.
pub(crate) fn base_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use test_case::test_case;

    #[test_case("a.txt", "a.txt")]
    #[test_case("dist/main.js", "main.js")]
    #[test_case("assets/img/icon.png", "icon.png")]
    fn FileEntry___bare_path___destination_is_basename(path: &str, expected: &str) {
        let entry = FileEntry::Path(path.to_string());

        assert_eq!(entry.destination(), expected);
        assert_eq!(entry.source(), path);
    }

    #[test_case("assets/icon.png", None, "icon.png")]
    #[test_case("assets/icon.png", Some("img/icon.png"), "img/icon.png")]
    #[test_case("dist/main.js", Some("lib/nested/main.js"), "lib/nested/main.js")]
    fn FileEntry___mapped___destination_resolves(path: &str, dest: Option<&str>, expected: &str) {
        let entry = FileEntry::Mapped {
            path: path.to_string(),
            dest: dest.map(String::from),
        };

        assert_eq!(entry.destination(), expected);
    }

    #[test]
    fn PluginManifest___from_json___parses_bare_and_mapped_entries() {
        let manifest = PluginManifest::from_json(
            r#"{
                "id": "x",
                "files": ["a.txt", { "path": "assets/icon.png", "dest": "img/icon.png" }]
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.id, "x");
        assert_eq!(manifest.files.len(), 2);
        assert!(matches!(&manifest.files[0], FileEntry::Path(p) if p == "a.txt"));
        assert!(matches!(
            &manifest.files[1],
            FileEntry::Mapped { dest: Some(d), .. } if d == "img/icon.png"
        ));
    }

    #[test]
    fn PluginManifest___from_json___invalid___returns_error() {
        let result = PluginManifest::from_json("{ invalid json }");

        assert!(result.is_err());
    }

    #[test]
    fn PluginManifest___from_file___nonexistent___returns_error() {
        let result = PluginManifest::from_file("/nonexistent/plugin.json");

        assert!(matches!(result, Err(PackError::Io(_))));
    }

    #[test]
    fn process___collapses_entries_to_destinations() {
        let manifest = PluginManifest::from_json(
            r#"{
                "id": "x",
                "files": [
                    "a.txt",
                    "dist/main.js",
                    { "path": "assets/icon.png", "dest": "img/icon.png" },
                    { "path": "assets/logo.png" }
                ]
            }"#,
        )
        .unwrap();

        let processed = manifest.process();

        assert_eq!(
            processed.files,
            vec!["a.txt", "main.js", "img/icon.png", "logo.png"]
        );
    }

    #[test]
    fn process___preserves_unknown_fields() {
        let manifest = PluginManifest::from_json(
            r#"{
                "id": "x",
                "name": "Example",
                "version": "1.2.0",
                "author": { "name": "someone" },
                "files": ["a.txt"]
            }"#,
        )
        .unwrap();

        let json = manifest.process().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], "Example");
        assert_eq!(value["version"], "1.2.0");
        assert_eq!(value["author"]["name"], "someone");
        assert_eq!(value["files"][0], "a.txt");
    }

    #[test]
    fn process___keeps_optional_assets() {
        let manifest = PluginManifest::from_json(
            r#"{ "id": "x", "readme": "readme.md", "icon": "icon.png" }"#,
        )
        .unwrap();

        let processed = manifest.process();

        assert_eq!(processed.readme.as_deref(), Some("readme.md"));
        assert_eq!(processed.changelog, None);
        assert_eq!(processed.icon.as_deref(), Some("icon.png"));
    }

    #[test]
    fn validate___rejects_empty_id() {
        let manifest = PluginManifest::from_json(r#"{ "id": "" }"#).unwrap();
        let result = manifest.validate();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("id"));
    }

    #[test]
    fn validate___rejects_empty_entry_path() {
        let manifest = PluginManifest::from_json(r#"{ "id": "x", "files": [""] }"#).unwrap();
        let result = manifest.validate();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("files[0]"));
    }

    #[test]
    fn validate___rejects_empty_dest() {
        let manifest = PluginManifest::from_json(
            r#"{ "id": "x", "files": [{ "path": "a.txt", "dest": "" }] }"#,
        )
        .unwrap();

        assert!(manifest.validate().is_err());
    }

    #[test]
    fn validate___accepts_valid_manifest() {
        let manifest = PluginManifest::from_json(
            r#"{ "id": "x", "files": ["a.txt", { "path": "b.txt", "dest": "c/b.txt" }] }"#,
        )
        .unwrap();

        assert!(manifest.validate().is_ok());
    }
}
