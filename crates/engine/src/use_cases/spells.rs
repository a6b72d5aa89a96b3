//! Spell book use cases. Known and prepared membership is mirrored into the
//! record's spell line.

use std::sync::Arc;

use charsheet_domain::{
    encode_character, encode_spells, CharacterName, CharacterRecord, SpellBook, SpellRecord,
};

use crate::infrastructure::error::StoreError;
use crate::infrastructure::persistence::{CharacterRepo, SpellRepo};

pub struct SpellOps {
    characters: Arc<CharacterRepo>,
    spells: Arc<SpellRepo>,
}

impl SpellOps {
    pub fn new(characters: Arc<CharacterRepo>, spells: Arc<SpellRepo>) -> Self {
        Self { characters, spells }
    }

    pub fn list(&self, name: &str) -> Result<SpellBook, StoreError> {
        self.spells.load(&CharacterName::new(name)?)
    }

    /// Adds or replaces a spell and marks it known on the record.
    pub fn learn(&self, name: &str, spell: SpellRecord) -> Result<(), StoreError> {
        let name = CharacterName::new(name)?;
        let mut record = self.characters.load(&name)?;
        let mut book = self.spells.load(&name)?;

        record.known_spells.insert(spell.name.clone());
        if spell.prepared {
            record.prepared_spells.insert(spell.name.clone());
        } else {
            record.prepared_spells.remove(&spell.name);
        }
        tracing::debug!(character = %name, spell = %spell.name, "Learning spell");
        book.learn(spell)?;
        self.save_both(&name, &book, &record)
    }

    /// Removes a spell from the book and the record; false if it was unknown.
    pub fn forget(&self, name: &str, spell: &str) -> Result<bool, StoreError> {
        let name = CharacterName::new(name)?;
        let mut book = self.spells.load(&name)?;
        if !book.forget(spell) {
            return Ok(false);
        }
        let mut record = self.characters.load(&name)?;
        record.forget_spell(spell);
        self.save_both(&name, &book, &record)?;
        Ok(true)
    }

    /// Flips the prepared flag and returns the new value.
    pub fn toggle_prepared(&self, name: &str, spell: &str) -> Result<bool, StoreError> {
        let name = CharacterName::new(name)?;
        let mut book = self.spells.load(&name)?;
        let prepared = book.toggle_prepared(spell)?;

        let mut record = self.characters.load(&name)?;
        if prepared {
            record.prepared_spells.insert(spell.to_string());
        } else {
            record.prepared_spells.remove(spell);
        }
        self.save_both(&name, &book, &record)?;
        Ok(prepared)
    }

    /// Encodes the book and the record before writing either file.
    fn save_both(
        &self,
        name: &CharacterName,
        book: &SpellBook,
        record: &CharacterRecord,
    ) -> Result<(), StoreError> {
        encode_spells(book)?;
        encode_character(record)?;
        self.spells.save(name, book)?;
        self.characters.save(record)
    }
}
