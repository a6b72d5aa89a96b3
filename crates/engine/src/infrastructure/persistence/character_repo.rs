//! `character.csv` persistence and the character roster.

use std::path::PathBuf;
use std::sync::Arc;

use charsheet_domain::{decode_character, encode_character, CharacterName, CharacterRecord};

use super::CharacterFiles;
use crate::infrastructure::config::DataPaths;
use crate::infrastructure::error::StoreError;
use crate::infrastructure::ports::FileStoragePort;

/// Loads and saves character records, and manages the character folders.
#[derive(Clone)]
pub struct CharacterRepo {
    files: CharacterFiles,
}

impl CharacterRepo {
    pub fn new(storage: Arc<dyn FileStoragePort>, paths: DataPaths) -> Self {
        Self {
            files: CharacterFiles::new(storage, paths),
        }
    }

    pub(crate) fn from_files(files: CharacterFiles) -> Self {
        Self { files }
    }

    /// Names of all folders holding a `character.csv`, sorted.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let dir = self.files.paths().characters_dir();
        if !self.files.storage().exists(&dir) {
            return Ok(Vec::new());
        }
        let folders = self
            .files
            .storage()
            .list_dirs(&dir)
            .map_err(|e| StoreError::io(&dir, e))?;

        let mut names: Vec<String> = folders
            .iter()
            .filter(|folder| self.files.storage().exists(&folder.join("character.csv")))
            .filter_map(|folder| folder.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        names.sort();
        Ok(names)
    }

    pub fn exists(&self, name: &CharacterName) -> bool {
        self.files.ensure_character(name).is_ok()
    }

    /// Loads a character record.
    ///
    /// # Errors
    ///
    /// `NotFound` when the folder or its `character.csv` is missing, `Parse`
    /// when the file is malformed.
    pub fn load(&self, name: &CharacterName) -> Result<CharacterRecord, StoreError> {
        let path = self.files.paths().record_file(name);
        let content = self
            .files
            .read_optional(&path)?
            .ok_or_else(|| StoreError::not_found("Character", name.as_str()))?;
        let record = decode_character(&content)?;
        if record.name != *name {
            tracing::warn!(
                folder = %name,
                record = %record.name,
                "Character folder and record name differ"
            );
        }
        tracing::debug!(character = %name, path = %path.display(), "Loaded character record");
        Ok(record)
    }

    /// Writes the record, creating the character folder if needed. The record
    /// is encoded before anything touches disk, so a validation failure
    /// leaves the previous file intact.
    pub fn save(&self, record: &CharacterRecord) -> Result<(), StoreError> {
        let content = encode_character(record)?;
        self.files
            .create_dir(&self.files.paths().character_dir(&record.name))?;
        let path = self.files.paths().record_file(&record.name);
        self.files.write(&path, &content)?;
        tracing::debug!(character = %record.name, path = %path.display(), "Saved character record");
        Ok(())
    }

    /// Removes the whole character folder.
    pub fn delete(&self, name: &CharacterName) -> Result<(), StoreError> {
        let dir = self.files.paths().character_dir(name);
        if !self.files.storage().exists(&dir) {
            return Err(StoreError::not_found("Character", name.as_str()));
        }
        self.files
            .storage()
            .remove_dir_all(&dir)
            .map_err(|e| StoreError::io(&dir, e))
    }

    /// First existing portrait image, if any.
    pub fn portrait_path(&self, name: &CharacterName) -> Option<PathBuf> {
        self.files
            .paths()
            .portrait_candidates(name)
            .find(|path| self.files.storage().exists(path))
    }
}
