//! Spell slot use cases.

use std::sync::Arc;

use charsheet_domain::{CharacterName, ReferenceData, SpellSlotState};

use crate::infrastructure::error::StoreError;
use crate::infrastructure::persistence::{CharacterRepo, SlotRepo};

pub struct SlotOps {
    characters: Arc<CharacterRepo>,
    slots: Arc<SlotRepo>,
    reference: Arc<ReferenceData>,
}

impl SlotOps {
    pub fn new(
        characters: Arc<CharacterRepo>,
        slots: Arc<SlotRepo>,
        reference: Arc<ReferenceData>,
    ) -> Self {
        Self {
            characters,
            slots,
            reference,
        }
    }

    /// Current slots, with totals for the record's class and level.
    pub fn state(&self, name: &str) -> Result<SpellSlotState, StoreError> {
        let name = CharacterName::new(name)?;
        self.load(&name)
    }

    fn load(&self, name: &CharacterName) -> Result<SpellSlotState, StoreError> {
        let record = self.characters.load(name)?;
        let totals = self.reference.slot_totals(&record.class, record.level());
        self.slots.load(name, totals)
    }

    /// Spends a slot of `spell_level`. At the cap, or for a level outside
    /// 1..=9, nothing changes and nothing is written.
    pub fn cast(&self, name: &str, spell_level: u8) -> Result<(SpellSlotState, bool), StoreError> {
        let name = CharacterName::new(name)?;
        let mut state = self.load(&name)?;
        let spent = state.cast(spell_level);
        if spent {
            self.slots.save(&name, &state)?;
        } else {
            tracing::debug!(character = %name, spell_level, "No slot available to cast");
        }
        Ok((state, spent))
    }

    /// Gives back one used slot of `spell_level`.
    pub fn restore(&self, name: &str, spell_level: u8) -> Result<(SpellSlotState, bool), StoreError> {
        let name = CharacterName::new(name)?;
        let mut state = self.load(&name)?;
        let restored = state.restore(spell_level);
        if restored {
            self.slots.save(&name, &state)?;
        }
        Ok((state, restored))
    }

    pub fn long_rest(&self, name: &str) -> Result<SpellSlotState, StoreError> {
        let name = CharacterName::new(name)?;
        let mut state = self.load(&name)?;
        state.long_rest();
        self.slots.save(&name, &state)?;
        tracing::info!(character = %name, "Long rest, spell slots restored");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_fixtures::{wizard_draft, TestApp};

    fn aria() -> TestApp {
        let app = TestApp::new();
        app.app.use_cases.roster.create(&wizard_draft("Aria")).unwrap();
        app
    }

    #[test]
    fn cast_until_capped() {
        let app = aria();
        let slots = &app.app.use_cases.slots;

        assert!(slots.cast("Aria", 1).unwrap().1);
        assert!(slots.cast("Aria", 1).unwrap().1);
        let (state, spent) = slots.cast("Aria", 1).unwrap();
        assert!(!spent);
        assert_eq!(state.used(1), 2);
        assert_eq!(slots.state("Aria").unwrap().remaining(1), 0);
    }

    #[test]
    fn cast_without_slots_is_a_no_op() {
        let app = aria();
        let slots = &app.app.use_cases.slots;
        assert!(!slots.cast("Aria", 2).unwrap().1);
        assert!(!slots.cast("Aria", 0).unwrap().1);
        assert!(!slots.cast("Aria", 10).unwrap().1);
        assert_eq!(slots.state("Aria").unwrap().used_counts(), [0; 9]);
    }

    #[test]
    fn restore_and_long_rest() {
        let app = aria();
        let slots = &app.app.use_cases.slots;
        slots.cast("Aria", 1).unwrap();
        slots.cast("Aria", 1).unwrap();

        let (state, restored) = slots.restore("Aria", 1).unwrap();
        assert!(restored);
        assert_eq!(state.used(1), 1);

        assert_eq!(slots.long_rest("Aria").unwrap().used_counts(), [0; 9]);
        assert_eq!(slots.state("Aria").unwrap().used(1), 0);
    }

    #[test]
    fn totals_follow_level() {
        let app = aria();
        app.app.use_cases.sheet.add_experience("Aria", 900).unwrap();
        let state = app.app.use_cases.slots.state("Aria").unwrap();
        assert_eq!(state.total(1), 4);
        assert_eq!(state.total(2), 2);
    }
}
