//! Packaging engine for plugin distribution artifacts
//!
//! This crate assembles a distributable plugin artifact from a project's
//! declared asset list: a staging directory of processed files plus a
//! compressed ZIP archive of that directory.
//!
//! # Artifact Structure
//!
//! ```text
//! dist/                          # staging directory
//! ├── plugin.json                # processed manifest
//! ├── readme.md                  # optional assets, when declared and present
//! ├── icon.png
//! ├── main.js                    # bare file entries, staged at their basename
//! └── img/
//!     └── icon.png               # mapped entries, staged at their declared dest
//! my-plugin.zip                  # archive of the staging directory's contents
//! ```
//!
//! # Example
//!
//! ```no_run
//! use plugpack::{OutputSpec, Packager, PluginManifest};
//!
//! let manifest = PluginManifest::from_file("plugin.json")?;
//! let spec = OutputSpec {
//!     staging_dir: "dist".into(),
//!     archive_path: "my-plugin.zip".into(),
//! };
//!
//! let report = Packager::new(".").package(&spec, &manifest, "plugin.json")?;
//! println!("{} bytes", report.archive_bytes);
//! # Ok::<(), plugpack::PackError>(())
//! ```
//!
//! Individual asset copies are failure-isolated: a missing optional asset or
//! an unreadable entry is logged and counted, never fatal. Only staging-level
//! and archive-level failures abort the pipeline.

mod error;
mod manifest;
mod packager;

pub mod archive;
pub mod assemble;
pub mod materialize;

pub use archive::create_archive;
pub use assemble::{AssembleReport, OutputSpec, assemble};
pub use error::PackError;
pub use manifest::{FileEntry, PluginManifest, ProcessedManifest};
pub use materialize::{CopyOutcome, CopyStats, copy_if_exists, copy_path, ensure_dir};
pub use packager::{PackReport, Packager};

/// Result type for packaging operations.
pub type PackResult<T> = Result<T, PackError>;

/// Default manifest file name within the staging directory.
pub const MANIFEST_FILE: &str = "plugin.json";

/// Archive file extension.
pub const ARCHIVE_EXTENSION: &str = "zip";
