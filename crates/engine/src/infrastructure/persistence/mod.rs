//! File-backed repositories, one per file in a character folder.
//!
//! Every save rewrites its file whole from the in-memory value, so the last
//! save always reflects the latest state.

mod character_repo;
mod inventory_repo;
mod notes_repo;
mod slot_repo;
mod spell_repo;

pub use character_repo::CharacterRepo;
pub use inventory_repo::InventoryRepo;
pub use notes_repo::NotesRepo;
pub use slot_repo::SlotRepo;
pub use spell_repo::SpellRepo;

use std::path::Path;
use std::sync::Arc;

use charsheet_domain::CharacterName;

use super::config::DataPaths;
use super::error::StoreError;
use super::ports::FileStoragePort;

/// Storage handle plus layout, shared by all repositories.
#[derive(Clone)]
pub(crate) struct CharacterFiles {
    storage: Arc<dyn FileStoragePort>,
    paths: DataPaths,
}

impl CharacterFiles {
    pub(crate) fn new(storage: Arc<dyn FileStoragePort>, paths: DataPaths) -> Self {
        Self { storage, paths }
    }

    pub(crate) fn paths(&self) -> &DataPaths {
        &self.paths
    }

    pub(crate) fn storage(&self) -> &dyn FileStoragePort {
        self.storage.as_ref()
    }

    /// Fails with `NotFound` unless the character's record file exists.
    pub(crate) fn ensure_character(&self, name: &CharacterName) -> Result<(), StoreError> {
        if self.storage.exists(&self.paths.record_file(name)) {
            Ok(())
        } else {
            Err(StoreError::not_found("Character", name.as_str()))
        }
    }

    /// Reads a file that may legitimately be absent.
    pub(crate) fn read_optional(&self, path: &Path) -> Result<Option<String>, StoreError> {
        if !self.storage.exists(path) {
            return Ok(None);
        }
        self.storage
            .read_to_string(path)
            .map(Some)
            .map_err(|e| StoreError::io(path, e))
    }

    pub(crate) fn write(&self, path: &Path, content: &str) -> Result<(), StoreError> {
        self.storage
            .write_str(path, content)
            .map_err(|e| StoreError::io(path, e))
    }

    pub(crate) fn create_dir(&self, path: &Path) -> Result<(), StoreError> {
        self.storage
            .create_dir_all(path)
            .map_err(|e| StoreError::io(path, e))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::infrastructure::file_storage::LocalFileStorage;
    use tempfile::TempDir;

    /// A temp data root with local storage.
    pub(crate) fn temp_files() -> (TempDir, CharacterFiles) {
        let dir = tempfile::tempdir().expect("tempdir");
        let files = CharacterFiles::new(Arc::new(LocalFileStorage::new()), DataPaths::new(dir.path()));
        (dir, files)
    }

    pub(crate) const ARIA_CSV: &str = "Aria,Wizard,,High Elf,3:900,18:20\n\
        8,14,14,16,12,10\n\
        Arcana,History\n\
        Magic Missile:kp,Shield:k\n\
        \n\
        Common,Elvish\n\
        Daggers,Quarterstaffs\n\
        \n\
        0,15,3,7\n";

    pub(crate) fn write_aria(files: &CharacterFiles) -> CharacterName {
        let name = CharacterName::new("Aria").unwrap();
        files.create_dir(&files.paths().character_dir(&name)).unwrap();
        files.write(&files.paths().record_file(&name), ARIA_CSV).unwrap();
        name
    }
}
