//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use tachi_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{TachiError, TachiResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> TachiResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> TachiResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn remove_file(&self, path: &Path) -> TachiResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> TachiError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_and_removes_files() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let nested = dir.path().join(".github/workflows");
        let file = nested.join("pr-deploy.yaml");

        fs.create_dir_all(&nested).unwrap();
        fs.write_file(&file, "name: PR").unwrap();
        assert!(fs.exists(&file));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "name: PR");

        fs.remove_file(&file).unwrap();
        assert!(!fs.exists(&file));
    }

    #[test]
    fn write_without_parent_is_filesystem_error() {
        let dir = TempDir::new().unwrap();
        let err = LocalFilesystem
            .write_file(&dir.path().join("missing/SETUP.md"), "x")
            .unwrap_err();

        assert!(matches!(
            err,
            TachiError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
