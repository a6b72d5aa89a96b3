//! `notes.json` and the legacy `notes.txt` scratch pad.

use charsheet_domain::{CharacterName, NotesDocument};

use super::CharacterFiles;
use crate::infrastructure::error::StoreError;

#[derive(Clone)]
pub struct NotesRepo {
    files: CharacterFiles,
}

impl NotesRepo {
    pub(crate) fn from_files(files: CharacterFiles) -> Self {
        Self { files }
    }

    /// Loads the notes store; a missing file is an empty store.
    pub fn load(&self, name: &CharacterName) -> Result<NotesDocument, StoreError> {
        self.files.ensure_character(name)?;
        let path = self.files.paths().notes_file(name);
        let document = match self.files.read_optional(&path)? {
            Some(content) if content.trim().is_empty() => NotesDocument::default(),
            Some(content) => serde_json::from_str(&content)?,
            None => NotesDocument::default(),
        };
        tracing::debug!(
            character = %name,
            path = %path.display(),
            sections = document.notes.len(),
            "Loaded notes"
        );
        Ok(document)
    }

    pub fn save(&self, name: &CharacterName, document: &NotesDocument) -> Result<(), StoreError> {
        self.files.ensure_character(name)?;
        let content = serde_json::to_string_pretty(document)?;
        let path = self.files.paths().notes_file(name);
        self.files.write(&path, &content)?;
        tracing::debug!(character = %name, path = %path.display(), "Saved notes");
        Ok(())
    }

    /// Contents of `notes.txt`, empty when absent.
    pub fn read_scratch(&self, name: &CharacterName) -> Result<String, StoreError> {
        self.files.ensure_character(name)?;
        Ok(self
            .files
            .read_optional(&self.files.paths().scratch_file(name))?
            .unwrap_or_default())
    }

    pub fn write_scratch(&self, name: &CharacterName, text: &str) -> Result<(), StoreError> {
        self.files.ensure_character(name)?;
        self.files.write(&self.files.paths().scratch_file(name), text)
    }
}
