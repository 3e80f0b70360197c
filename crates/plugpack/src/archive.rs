//! Archive creation: compressing the finished staging directory.

use crate::PackResult;
use std::fs::File;
use std::io;
use std::path::Path;
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Compress the staging directory's full contents into a ZIP archive at
/// `archive_path`, returning the archive's size in bytes.
///
/// Entry paths are relative to the staging root — the staging directory
/// itself is not part of any entry's prefix. Entries are added in sorted
/// order, so the same input tree produces the same entry sequence.
///
/// Creation is all-or-nothing: any writer or stream error fails the whole
/// operation, and a partially written file at `archive_path` must be treated
/// as invalid. Completion has two phases — the archive writer is finalized
/// first, then the underlying file is flushed to disk — because finalization
/// alone does not guarantee the bytes have reached the file.
pub fn create_archive(staging_dir: &Path, archive_path: &Path) -> PackResult<u64> {
    if let Some(parent) = archive_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(archive_path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .compression_level(Some(9));

    for entry in WalkDir::new(staging_dir)
        .min_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(io::Error::from)?;
        let Ok(relative) = entry.path().strip_prefix(staging_dir) else {
            continue;
        };
        let name = relative.to_string_lossy().replace('\\', "/");

        if entry.file_type().is_dir() {
            zip.add_directory(name, options)?;
        } else if entry.file_type().is_file() {
            zip.start_file(name, options)?;
            let mut source = File::open(entry.path())?;
            io::copy(&mut source, &mut zip)?;
        }
    }

    let file = zip.finish()?;
    file.sync_all()?;

    Ok(file.metadata()?.len())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::fs;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn populate_staging(temp_dir: &TempDir) -> std::path::PathBuf {
        let staging = temp_dir.path().join("dist");
        fs::create_dir_all(staging.join("img")).unwrap();
        fs::write(staging.join("plugin.json"), br#"{"id":"x"}"#).unwrap();
        fs::write(staging.join("a.txt"), b"alpha").unwrap();
        fs::write(staging.join("img").join("icon.png"), b"png bytes").unwrap();
        staging
    }

    #[test]
    fn create_archive___roundtrip___preserves_names_and_contents() {
        let temp_dir = TempDir::new().unwrap();
        let staging = populate_staging(&temp_dir);
        let archive_path = temp_dir.path().join("plugin.zip");

        create_archive(&staging, &archive_path).unwrap();

        let mut archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();

        for (name, expected) in [
            ("plugin.json", br#"{"id":"x"}"#.as_slice()),
            ("a.txt", b"alpha".as_slice()),
            ("img/icon.png", b"png bytes".as_slice()),
        ] {
            let mut entry = archive.by_name(name).unwrap();
            let mut contents = Vec::new();
            entry.read_to_end(&mut contents).unwrap();
            assert_eq!(contents, expected, "mismatch for {name}");
        }
    }

    #[test]
    fn create_archive___entries_are_root_relative() {
        let temp_dir = TempDir::new().unwrap();
        let staging = populate_staging(&temp_dir);
        let archive_path = temp_dir.path().join("plugin.zip");

        create_archive(&staging, &archive_path).unwrap();

        let archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        let names: Vec<&str> = archive.file_names().collect();

        assert!(names.iter().all(|n| !n.starts_with("dist")));
        assert!(names.contains(&"a.txt"));
        assert!(names.contains(&"img/icon.png"));
    }

    #[test]
    fn create_archive___reports_final_file_size() {
        let temp_dir = TempDir::new().unwrap();
        let staging = populate_staging(&temp_dir);
        let archive_path = temp_dir.path().join("plugin.zip");

        let bytes = create_archive(&staging, &archive_path).unwrap();

        assert!(bytes > 0);
        assert_eq!(bytes, fs::metadata(&archive_path).unwrap().len());
    }

    #[test]
    fn create_archive___empty_directories_are_preserved() {
        let temp_dir = TempDir::new().unwrap();
        let staging = temp_dir.path().join("dist");
        fs::create_dir_all(staging.join("empty")).unwrap();
        let archive_path = temp_dir.path().join("plugin.zip");

        create_archive(&staging, &archive_path).unwrap();

        let archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        let names: Vec<&str> = archive.file_names().collect();

        assert!(names.iter().any(|n| n.trim_end_matches('/') == "empty"));
    }

    #[test]
    fn create_archive___missing_staging_directory___returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let archive_path = temp_dir.path().join("plugin.zip");

        let result = create_archive(&temp_dir.path().join("nope"), &archive_path);

        assert!(result.is_err());
    }

    #[test]
    fn create_archive___creates_archive_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let staging = populate_staging(&temp_dir);
        let archive_path = temp_dir.path().join("out").join("nested").join("plugin.zip");

        create_archive(&staging, &archive_path).unwrap();

        assert!(archive_path.exists());
    }

    #[test]
    fn create_archive___overwrites_existing_archive() {
        let temp_dir = TempDir::new().unwrap();
        let staging = populate_staging(&temp_dir);
        let archive_path = temp_dir.path().join("plugin.zip");
        fs::write(&archive_path, b"stale bytes that are not a zip").unwrap();

        create_archive(&staging, &archive_path).unwrap();

        // Readable as a fresh archive, not a merge of old and new.
        let archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        assert_eq!(archive.len(), 4); // 3 files + 1 directory entry
    }
}
