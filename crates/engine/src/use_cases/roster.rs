//! Character roster: listing, creating, loading, and deleting characters.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use charsheet_domain::{
    CharacterDraft, CharacterName, CharacterRecord, Dnd5eSystem, Inventory, NotesDocument,
    ReferenceData, SpellBook, SpellSlotState,
};

use crate::infrastructure::error::StoreError;
use crate::infrastructure::persistence::{
    CharacterRepo, InventoryRepo, NotesRepo, SlotRepo, SpellRepo,
};

/// Everything the sheet screen shows for one character.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterSheet {
    pub record: CharacterRecord,
    pub inventory: Inventory,
    pub spells: SpellBook,
    pub slots: SpellSlotState,
    pub notes: NotesDocument,
    pub portrait: Option<PathBuf>,
}

pub struct Roster {
    characters: Arc<CharacterRepo>,
    inventory: Arc<InventoryRepo>,
    spells: Arc<SpellRepo>,
    slots: Arc<SlotRepo>,
    notes: Arc<NotesRepo>,
    reference: Arc<ReferenceData>,
}

impl Roster {
    pub fn new(
        characters: Arc<CharacterRepo>,
        inventory: Arc<InventoryRepo>,
        spells: Arc<SpellRepo>,
        slots: Arc<SlotRepo>,
        notes: Arc<NotesRepo>,
        reference: Arc<ReferenceData>,
    ) -> Self {
        Self {
            characters,
            inventory,
            spells,
            slots,
            notes,
            reference,
        }
    }

    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        self.characters.list()
    }

    /// Builds a level 1 character from the draft and writes its folder.
    ///
    /// # Errors
    ///
    /// `Validation` when the name is taken, the class or race is unknown, or
    /// a base score is outside 3..=18. Nothing is written in that case.
    pub fn create(&self, draft: &CharacterDraft) -> Result<CharacterRecord, StoreError> {
        let name = CharacterName::new(draft.name.as_str())?;
        if self.characters.exists(&name) {
            return Err(StoreError::Validation(format!(
                "A character named '{name}' already exists"
            )));
        }
        let created = draft.build(&self.reference, &Dnd5eSystem::new())?;
        let record = created.record;

        self.characters.save(&record)?;
        self.inventory.save(&name, &created.inventory)?;
        self.spells.save(&name, &SpellBook::new())?;
        let totals = self.reference.slot_totals(&record.class, record.level());
        self.slots.save(&name, &SpellSlotState::new(totals))?;
        self.notes.save(&name, &NotesDocument::default())?;

        tracing::info!(
            character = %name,
            class = %record.class,
            race = %record.race,
            "Created character"
        );
        Ok(record)
    }

    pub fn delete(&self, name: &str) -> Result<(), StoreError> {
        let name = CharacterName::new(name)?;
        self.characters.delete(&name)?;
        tracing::info!(character = %name, "Deleted character");
        Ok(())
    }

    /// Loads every file of a character. Slot totals come from the reference
    /// table for the record's class and level.
    pub fn load(&self, name: &str) -> Result<CharacterSheet, StoreError> {
        let name = CharacterName::new(name)?;
        let record = self.characters.load(&name)?;
        let totals = self.reference.slot_totals(&record.class, record.level());
        Ok(CharacterSheet {
            inventory: self.inventory.load(&name)?,
            spells: self.spells.load(&name)?,
            slots: self.slots.load(&name, totals)?,
            notes: self.notes.load(&name)?,
            portrait: self.characters.portrait_path(&name),
            record,
        })
    }

    /// Saves edits made on the sheet.
    pub fn save_record(&self, record: &CharacterRecord) -> Result<(), StoreError> {
        self.characters.save(record)
    }
}

#[cfg(test)]
mod tests {
    use crate::infrastructure::error::StoreError;
    use crate::test_fixtures::{wizard_draft, TestApp};
    use charsheet_domain::Skill;

    #[test]
    fn create_writes_every_file() {
        let app = TestApp::new();
        let roster = &app.app.use_cases.roster;

        let record = roster.create(&wizard_draft("Aria")).unwrap();
        assert_eq!(record.race, "High Elf");
        assert_eq!(record.max_hit_points(), 8);

        let folder = app.dir.path().join("characters").join("Aria");
        for file in ["character.csv", "inventory.csv", "spells.csv", "slots.csv", "notes.json"] {
            assert!(folder.join(file).exists(), "missing {file}");
        }

        let sheet = roster.load("Aria").unwrap();
        assert_eq!(sheet.record, record);
        assert_eq!(sheet.inventory.get("Quarterstaff").unwrap().quantity, 1);
        assert_eq!(sheet.slots.total(1), 2);
        assert!(sheet.spells.spells().is_empty());
        assert!(sheet.notes.notes.is_empty());
        assert!(sheet.portrait.is_none());
        assert!(sheet.record.is_proficient(Skill::Arcana));
    }

    #[test]
    fn create_rejects_duplicate_name() {
        let app = TestApp::new();
        let roster = &app.app.use_cases.roster;
        roster.create(&wizard_draft("Aria")).unwrap();

        let err = roster.create(&wizard_draft("Aria")).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn create_rejects_invalid_draft_without_writing() {
        let app = TestApp::new();
        let roster = &app.app.use_cases.roster;

        let mut draft = wizard_draft("Aria");
        draft.abilities[2] = 2;
        assert!(matches!(roster.create(&draft), Err(StoreError::Validation(_))));

        let mut draft = wizard_draft("../escape");
        draft.abilities = [10; 6];
        assert!(matches!(roster.create(&draft), Err(StoreError::Validation(_))));

        assert!(roster.list().unwrap().is_empty());
    }

    #[test]
    fn list_and_delete() {
        let app = TestApp::new();
        let roster = &app.app.use_cases.roster;
        roster.create(&wizard_draft("Bram")).unwrap();
        roster.create(&wizard_draft("Aria")).unwrap();
        assert_eq!(roster.list().unwrap(), vec!["Aria", "Bram"]);

        roster.delete("Aria").unwrap();
        assert_eq!(roster.list().unwrap(), vec!["Bram"]);
        assert!(roster.load("Aria").unwrap_err().is_not_found());
    }
}
