//! Filesystem layout for uploads and derived artifacts.
//!
//! Everything the service writes lives under a single storage root:
//!
//! ```text
//! <root>/<uploaded video filename>
//! <root>/frames/frame_<n>.jpg
//! <root>/frames.zip
//! ```
//!
//! The frames directory and the archive are shared across runs; callers are
//! responsible for serializing access to them.

use std::path::{Path, PathBuf};

/// Directory under the storage root holding extracted frames.
pub const FRAMES_DIR_NAME: &str = "frames";

/// Archive filename, written to the storage root (not into the frames
/// directory, so the archive never includes itself).
pub const ARCHIVE_FILE_NAME: &str = "frames.zip";

/// Path construction for the service's storage root.
#[derive(Debug, Clone)]
pub struct StorageLayout {
    root: PathBuf,
}

impl StorageLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Destination path for an uploaded video. Only the final path component
    /// of `file_name` is used, so a crafted filename cannot escape the root.
    pub fn video_path(&self, file_name: &str) -> PathBuf {
        self.root.join(sanitize_file_name(file_name))
    }

    pub fn frames_dir(&self) -> PathBuf {
        self.root.join(FRAMES_DIR_NAME)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.root.join(ARCHIVE_FILE_NAME)
    }
}

/// Reduce an uploaded filename to a safe basename.
fn sanitize_file_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .unwrap_or("upload.mp4")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_path_plain_name() {
        let layout = StorageLayout::new("/data");
        assert_eq!(
            layout.video_path("clip.mp4"),
            PathBuf::from("/data/clip.mp4")
        );
    }

    #[test]
    fn test_video_path_strips_directories() {
        let layout = StorageLayout::new("/data");
        assert_eq!(
            layout.video_path("../../etc/passwd"),
            PathBuf::from("/data/passwd")
        );
    }

    #[test]
    fn test_video_path_empty_name_falls_back() {
        let layout = StorageLayout::new("/data");
        assert_eq!(
            layout.video_path(""),
            PathBuf::from("/data/upload.mp4")
        );
    }

    #[test]
    fn test_frames_dir_and_archive_are_siblings() {
        let layout = StorageLayout::new("/data");
        assert_eq!(layout.frames_dir(), PathBuf::from("/data/frames"));
        assert_eq!(layout.archive_path(), PathBuf::from("/data/frames.zip"));
        assert!(!layout.archive_path().starts_with(layout.frames_dir()));
    }
}
