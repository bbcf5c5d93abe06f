//! Temporary files holding decoded binary uploads.

use super::processor::ProcessorError;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempPath;
use tracing::{debug, warn};

/// Owns the temporary files created while parsing one request.
///
/// Files live until [`UploadRegistry::cleanup`] is called or the registry is dropped,
/// whichever comes first, so they are removed on failure paths as well.
#[derive(Debug)]
pub struct UploadRegistry {
    dir: PathBuf,
    prefix: String,
    files: Mutex<Vec<TempPath>>,
}

impl UploadRegistry {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, prefix: &str) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.to_string(),
            files: Mutex::new(Vec::new()),
        }
    }

    /// Write `bytes` to a new file `<dir>/<prefix>XXXXXX` and return its path.
    pub fn store(&self, bytes: &[u8]) -> Result<PathBuf, ProcessorError> {
        let mut file = tempfile::Builder::new()
            .prefix(&self.prefix)
            .rand_bytes(6)
            .tempfile_in(&self.dir)
            .map_err(|e| ProcessorError::Upload(format!("{}: {e}", self.dir.display())))?;
        file.write_all(bytes)
            .map_err(|e| ProcessorError::Upload(e.to_string()))?;
        let temp_path = file.into_temp_path();
        let path = temp_path.to_path_buf();
        debug!(path = %path.display(), size = bytes.len(), "Stored upload");
        self.lock().push(temp_path);
        Ok(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Delete every tracked file; returns how many were removed.
    pub fn cleanup(&self) -> usize {
        let files: Vec<TempPath> = self.lock().drain(..).collect();
        let mut removed = 0;
        for file in files {
            let path = file.to_path_buf();
            match file.close() {
                Ok(()) => removed += 1,
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove upload"),
            }
        }
        removed
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<TempPath>> {
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_cleanup() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = UploadRegistry::new(dir.path(), "restv_upload_");
        let path = uploads.store(b"hello").unwrap();
        assert!(path.exists());
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("restv_upload_"));
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
        assert_eq!(uploads.len(), 1);

        assert_eq!(uploads.cleanup(), 1);
        assert!(!path.exists());
        assert!(uploads.is_empty());
    }

    #[test]
    fn test_drop_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = {
            let uploads = UploadRegistry::new(dir.path(), "x_");
            uploads.store(b"data").unwrap()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = UploadRegistry::new(dir.path().join("missing"), "x_");
        assert!(matches!(uploads.store(b"data"), Err(ProcessorError::Upload(_))));
    }
}
