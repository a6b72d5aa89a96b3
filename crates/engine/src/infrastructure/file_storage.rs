//! File storage adapter over `std::fs`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::infrastructure::ports::FileStoragePort;

/// Local filesystem implementation.
#[derive(Debug, Clone, Default)]
pub struct LocalFileStorage;

impl LocalFileStorage {
    pub fn new() -> Self {
        Self
    }
}

impl FileStoragePort for LocalFileStorage {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn write_str(&self, path: &Path, data: &str) -> io::Result<()> {
        fs::write(path, data)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_dirs(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                dirs.push(entry.path());
            }
        }
        Ok(dirs)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_reads_and_lists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = LocalFileStorage::new();
        let nested = dir.path().join("characters").join("Aria");

        storage.create_dir_all(&nested).unwrap();
        storage.write_str(&nested.join("slots.csv"), "0,0,0,0,0,0,0,0,0\n").unwrap();
        std::fs::write(dir.path().join("characters").join("stray.txt"), "").unwrap();

        assert!(storage.exists(&nested.join("slots.csv")));
        assert_eq!(
            storage.read_to_string(&nested.join("slots.csv")).unwrap(),
            "0,0,0,0,0,0,0,0,0\n"
        );
        let dirs = storage.list_dirs(&dir.path().join("characters")).unwrap();
        assert_eq!(dirs, vec![nested.clone()]);

        storage.remove_dir_all(&nested).unwrap();
        assert!(!storage.exists(&nested));
    }
}
