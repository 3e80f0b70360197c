//! Path materialization: copying declared assets into the staging tree.
//!
//! Every operation here is failure-isolated. A missing source or an
//! unreadable entry produces a [`CopyOutcome`], a log line, and a counter
//! bump in [`CopyStats`] — never an `Err`. Callers decide whether an
//! incomplete artifact is acceptable by inspecting the stats.

use std::fs;
use std::io;
use std::path::Path;

/// Per-file success log lines emitted before switching to a summary count.
const MAX_LOGGED_COPIES: u64 = 20;

/// Result of one copy attempt.
#[derive(Debug)]
pub enum CopyOutcome {
    /// Source existed and was copied (for directories: the tree was
    /// mirrored, possibly with per-entry failures counted separately).
    Copied,

    /// Source did not exist. Expected for optional assets; non-fatal.
    NotFound,

    /// Genuine I/O failure (permissions, disk). Non-fatal, but the artifact
    /// is materially incomplete.
    Failed(io::Error),
}

/// Running totals for a single assembly pass.
///
/// One accumulator is threaded through the whole copy phase, including the
/// directory recursion, so verbose logging stays bounded for large trees.
#[derive(Debug, Default)]
pub struct CopyStats {
    /// Files copied successfully.
    pub copied: u64,
    /// Top-level sources that did not exist.
    pub missing: u64,
    /// Entries that failed with a genuine I/O error.
    pub failed: u64,

    logged: u64,
}

impl CopyStats {
    /// Tally one outcome.
    pub fn record(&mut self, outcome: &CopyOutcome) {
        match outcome {
            CopyOutcome::Copied => self.copied += 1,
            CopyOutcome::NotFound => self.missing += 1,
            CopyOutcome::Failed(_) => self.failed += 1,
        }
    }

    /// True when every attempted copy succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing == 0 && self.failed == 0
    }

    /// Copies that succeeded after the verbose-log cap was reached.
    #[must_use]
    pub fn suppressed(&self) -> u64 {
        self.copied.saturating_sub(self.logged)
    }

    /// Emit the deferred "and N more" line, if any copies went unlogged.
    pub fn summarize(&self) {
        let remaining = self.suppressed();
        if remaining > 0 {
            tracing::info!("... and {remaining} more files");
        }
    }

    fn log_copied(&mut self, src: &Path) {
        if self.logged < MAX_LOGGED_COPIES {
            tracing::info!("copied {}", src.display());
            self.logged += 1;
        }
    }
}

/// Create `path` and all missing ancestors. No-op if it already exists.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Copy a single file, tolerating a missing source.
///
/// The destination's parent directory is created on demand. A missing source
/// is an expected condition (optional assets like a changelog are frequently
/// absent) and never creates the destination.
pub fn copy_if_exists(src: &Path, dest: &Path) -> CopyOutcome {
    if !src.exists() {
        tracing::warn!("file not found: {}", src.display());
        return CopyOutcome::NotFound;
    }

    match copy_file(src, dest) {
        Ok(()) => {
            tracing::info!("copied {}", src.display());
            CopyOutcome::Copied
        }
        Err(e) => {
            tracing::error!("failed to copy {}: {e}", src.display());
            CopyOutcome::Failed(e)
        }
    }
}

/// Copy a file or mirror a directory tree from `src` to `dest`.
///
/// Files are copied with parent-directory creation. Directories are mirrored
/// recursively, each subdirectory created before the files within it; every
/// entry is attempted independently, so one failing file does not abort its
/// siblings. Symbolic links to regular files follow OS copy semantics;
/// other special files are skipped.
///
/// All per-file results land in `stats`. The return value reflects only the
/// top-level source: `NotFound` when it is absent, `Failed` when it cannot
/// be read at all.
pub fn copy_path(src: &Path, dest: &Path, stats: &mut CopyStats) -> CopyOutcome {
    let metadata = match fs::metadata(src) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!("path not found: {}", src.display());
            stats.missing += 1;
            return CopyOutcome::NotFound;
        }
        Err(e) => {
            tracing::error!("failed to read {}: {e}", src.display());
            stats.failed += 1;
            return CopyOutcome::Failed(e);
        }
    };

    if metadata.is_file() {
        match copy_file(src, dest) {
            Ok(()) => {
                stats.copied += 1;
                stats.log_copied(src);
                CopyOutcome::Copied
            }
            Err(e) => {
                tracing::error!("failed to copy {}: {e}", src.display());
                stats.failed += 1;
                CopyOutcome::Failed(e)
            }
        }
    } else if metadata.is_dir() {
        copy_dir(src, dest, stats)
    } else {
        tracing::debug!("skipping special file: {}", src.display());
        CopyOutcome::Copied
    }
}

fn copy_file(src: &Path, dest: &Path) -> io::Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dest)?;
    Ok(())
}

fn copy_dir(src_dir: &Path, dest_dir: &Path, stats: &mut CopyStats) -> CopyOutcome {
    // The destination directory must exist before anything beneath it is
    // written.
    if let Err(e) = fs::create_dir_all(dest_dir) {
        tracing::error!("failed to create {}: {e}", dest_dir.display());
        stats.failed += 1;
        return CopyOutcome::Failed(e);
    }

    let entries = match fs::read_dir(src_dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("failed to read directory {}: {e}", src_dir.display());
            stats.failed += 1;
            return CopyOutcome::Failed(e);
        }
    };

    tracing::debug!("copying directory {}", src_dir.display());

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::error!("failed to read entry in {}: {e}", src_dir.display());
                stats.failed += 1;
                continue;
            }
        };

        let src_path = entry.path();
        let dest_path = dest_dir.join(entry.file_name());

        match entry.file_type() {
            Ok(file_type) if file_type.is_dir() => {
                copy_dir(&src_path, &dest_path, stats);
            }
            Ok(file_type) if file_type.is_file() => match fs::copy(&src_path, &dest_path) {
                Ok(_) => {
                    stats.copied += 1;
                    stats.log_copied(&src_path);
                }
                Err(e) => {
                    tracing::error!("failed to copy {}: {e}", src_path.display());
                    stats.failed += 1;
                }
            },
            Ok(_) => {
                tracing::debug!("skipping special file: {}", src_path.display());
            }
            Err(e) => {
                tracing::error!("failed to stat {}: {e}", src_path.display());
                stats.failed += 1;
            }
        }
    }

    CopyOutcome::Copied
}
