//! Notes use cases. Each call loads `notes.json`, applies one change, and
//! writes it back; nothing is cached between calls.

use std::sync::Arc;

use charsheet_domain::CharacterName;

use crate::infrastructure::error::StoreError;
use crate::infrastructure::persistence::NotesRepo;
use crate::infrastructure::ports::ClockPort;

pub struct NotesOps {
    notes: Arc<NotesRepo>,
    clock: Arc<dyn ClockPort>,
}

impl NotesOps {
    pub fn new(notes: Arc<NotesRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { notes, clock }
    }

    /// Section names in stored order.
    pub fn list(&self, name: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.notes.load(&CharacterName::new(name)?)?.sections())
    }

    pub fn get(&self, name: &str, section: &str) -> Result<String, StoreError> {
        let document = self.notes.load(&CharacterName::new(name)?)?;
        Ok(document.text(section)?.to_string())
    }

    /// Overwrites a section in place, or appends it, stamped with the clock.
    pub fn upsert(&self, name: &str, section: &str, text: &str) -> Result<(), StoreError> {
        let name = CharacterName::new(name)?;
        let mut document = self.notes.load(&name)?;
        document.upsert(section, text, self.clock.now())?;
        self.notes.save(&name, &document)
    }

    /// Removes a section; a missing section is a no-op.
    pub fn delete(&self, name: &str, section: &str) -> Result<(), StoreError> {
        let name = CharacterName::new(name)?;
        let mut document = self.notes.load(&name)?;
        if document.delete(section) {
            self.notes.save(&name, &document)?;
        }
        Ok(())
    }

    pub fn read_scratch(&self, name: &str) -> Result<String, StoreError> {
        self.notes.read_scratch(&CharacterName::new(name)?)
    }

    pub fn write_scratch(&self, name: &str, text: &str) -> Result<(), StoreError> {
        self.notes.write_scratch(&CharacterName::new(name)?, text)
    }
}
