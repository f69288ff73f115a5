use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ApiError;

/// The on-disk home of design artifacts. Uploads land here through the
/// upload service; this backend resolves, checks, and unlinks them.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the uploads directory if it does not exist yet.
    pub fn ensure_root(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reject anything that could escape the uploads directory. Artifacts
    /// are flat files, so a bare filename is all that is ever valid.
    pub fn validate_filename(filename: &str) -> Result<(), ApiError> {
        if filename.is_empty() {
            return Err(ApiError::validation("Filename must not be empty"));
        }
        if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
            return Err(ApiError::validation(format!(
                "Invalid filename: {filename}"
            )));
        }
        Ok(())
    }

    pub fn resolve(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.resolve(filename).is_file()
    }

    /// The URL path the frontend loads the artifact from.
    pub fn public_path(&self, filename: &str) -> String {
        format!("/uploads/{filename}")
    }

    /// Best-effort unlink. A missing file is fine (the row was already an
    /// orphan); other failures are logged and swallowed so a row delete
    /// never fails on filesystem state.
    pub fn remove(&self, filename: &str) {
        match fs::remove_file(self.resolve(filename)) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(filename, error = %e, "failed to unlink design artifact");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_filenames_are_accepted() {
        assert!(UploadStore::validate_filename("design-front.png").is_ok());
    }

    #[test]
    fn path_escapes_are_rejected() {
        for name in ["", "../etc/passwd", "a/b.png", "a\\b.png", "..", "x..y"] {
            assert!(UploadStore::validate_filename(name).is_err(), "{name}");
        }
    }

    #[test]
    fn public_path_points_at_the_uploads_mount() {
        let store = UploadStore::new("./uploads");
        assert_eq!(store.public_path("tee.png"), "/uploads/tee.png");
    }
}
