//! Zip packaging for extracted frames.
//!
//! Walks the frames directory recursively and writes a single
//! deflate-compressed archive. Entry names are relative to the frames
//! directory, so unpacking reproduces its layout. The archive is written
//! outside the walked directory; re-running replaces the previous archive.

use std::fs::File;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Error type for archive packaging.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("frames directory not found: {0}")]
    MissingFramesDir(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Package every file under `frames_dir` into a zip at `archive_path`.
///
/// Returns the archive path on success. Fails with
/// [`ArchiveError::MissingFramesDir`] when the frames directory does not
/// exist. Synchronous; callers on an async runtime should run it via
/// `spawn_blocking`.
pub fn build_archive(frames_dir: &Path, archive_path: &Path) -> Result<PathBuf, ArchiveError> {
    if !frames_dir.is_dir() {
        return Err(ArchiveError::MissingFramesDir(frames_dir.to_path_buf()));
    }

    let file = File::create(archive_path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = 0usize;
    for entry in WalkDir::new(frames_dir) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry
            .path()
            .strip_prefix(frames_dir)
            .expect("walked path is under frames_dir")
            .to_string_lossy()
            .to_string();

        zip.start_file(name, options)?;
        let mut source = File::open(entry.path())?;
        std::io::copy(&mut source, &mut zip)?;
        entries += 1;
    }

    zip.finish()?;

    tracing::info!(
        archive = %archive_path.display(),
        entries,
        "Frame archive written"
    );
    Ok(archive_path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn archive_entry_names(path: &Path) -> Vec<String> {
        let file = File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_missing_frames_dir_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let frames_dir = tmp.path().join("frames");
        let archive_path = tmp.path().join("frames.zip");

        let err = build_archive(&frames_dir, &archive_path).unwrap_err();
        assert!(matches!(err, ArchiveError::MissingFramesDir(_)));
        assert!(!archive_path.exists());
    }

    #[test]
    fn test_entry_names_are_relative_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let frames_dir = tmp.path().join("frames");
        fs::create_dir_all(frames_dir.join("sub")).unwrap();
        fs::write(frames_dir.join("frame_0.jpg"), b"a").unwrap();
        fs::write(frames_dir.join("frame_10.jpg"), b"b").unwrap();
        fs::write(frames_dir.join("sub/frame_20.jpg"), b"c").unwrap();

        let archive_path = tmp.path().join("frames.zip");
        let written = build_archive(&frames_dir, &archive_path).unwrap();
        assert_eq!(written, archive_path);

        assert_eq!(
            archive_entry_names(&archive_path),
            vec!["frame_0.jpg", "frame_10.jpg", "sub/frame_20.jpg"]
        );
    }

    #[test]
    fn test_rebuild_replaces_previous_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let frames_dir = tmp.path().join("frames");
        fs::create_dir_all(&frames_dir).unwrap();
        fs::write(frames_dir.join("frame_0.jpg"), b"a").unwrap();

        let archive_path = tmp.path().join("frames.zip");
        build_archive(&frames_dir, &archive_path).unwrap();

        fs::write(frames_dir.join("frame_10.jpg"), b"b").unwrap();
        build_archive(&frames_dir, &archive_path).unwrap();

        assert_eq!(
            archive_entry_names(&archive_path),
            vec!["frame_0.jpg", "frame_10.jpg"]
        );
    }

    #[test]
    fn test_empty_frames_dir_builds_empty_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let frames_dir = tmp.path().join("frames");
        fs::create_dir_all(&frames_dir).unwrap();

        let archive_path = tmp.path().join("frames.zip");
        build_archive(&frames_dir, &archive_path).unwrap();

        assert!(archive_entry_names(&archive_path).is_empty());
    }
}
