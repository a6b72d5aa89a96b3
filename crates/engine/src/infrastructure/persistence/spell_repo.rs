//! `spells.csv` persistence.

use charsheet_domain::{decode_spells, encode_spells, CharacterName, SpellBook};

use super::CharacterFiles;
use crate::infrastructure::error::StoreError;

#[derive(Clone)]
pub struct SpellRepo {
    files: CharacterFiles,
}

impl SpellRepo {
    pub(crate) fn from_files(files: CharacterFiles) -> Self {
        Self { files }
    }

    /// Loads the spell book; a missing file is an empty book.
    pub fn load(&self, name: &CharacterName) -> Result<SpellBook, StoreError> {
        self.files.ensure_character(name)?;
        let path = self.files.paths().spells_file(name);
        let book = match self.files.read_optional(&path)? {
            Some(content) => decode_spells(&content)?,
            None => SpellBook::new(),
        };
        tracing::debug!(
            character = %name,
            path = %path.display(),
            spells = book.spells().len(),
            "Loaded spell book"
        );
        Ok(book)
    }

    pub fn save(&self, name: &CharacterName, book: &SpellBook) -> Result<(), StoreError> {
        self.files.ensure_character(name)?;
        let content = encode_spells(book)?;
        let path = self.files.paths().spells_file(name);
        self.files.write(&path, &content)?;
        tracing::debug!(character = %name, path = %path.display(), "Saved spell book");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::test_support::{temp_files, write_aria};
    use charsheet_domain::{SpellComponents, SpellRecord};

    fn fireball() -> SpellRecord {
        SpellRecord {
            name: "Fireball".to_string(),
            book: "PHB".to_string(),
            page: 241,
            level: 3,
            school: "Evocation".to_string(),
            casting_time: "1 action".to_string(),
            range: 150,
            components: SpellComponents::new(true, true, true),
            duration: "Instantaneous".to_string(),
            concentration: false,
            ritual: false,
            prepared: false,
            description: "A bright streak flashes, then blossoms.\nEach creature makes a Dex save."
                .to_string(),
        }
    }

    #[test]
    fn save_then_load_keeps_multiline_descriptions() {
        let (_dir, files) = temp_files();
        let name = write_aria(&files);
        let repo = SpellRepo::from_files(files);

        let mut book = SpellBook::new();
        book.learn(fireball()).unwrap();
        repo.save(&name, &book).unwrap();

        assert_eq!(repo.load(&name).unwrap(), book);
    }

    #[test]
    fn missing_file_is_empty_book() {
        let (_dir, files) = temp_files();
        let name = write_aria(&files);
        assert!(SpellRepo::from_files(files).load(&name).unwrap().spells().is_empty());
    }
}
