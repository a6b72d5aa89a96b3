//! `slots.csv` persistence.

use charsheet_domain::{decode_slots, encode_slots, CharacterName, SlotTotals, SpellSlotState};

use super::CharacterFiles;
use crate::infrastructure::error::StoreError;

#[derive(Clone)]
pub struct SlotRepo {
    files: CharacterFiles,
}

impl SlotRepo {
    pub(crate) fn from_files(files: CharacterFiles) -> Self {
        Self { files }
    }

    /// Loads used counts against `totals`. Counts above a total are clamped
    /// and logged; a missing file means nothing has been spent.
    pub fn load(&self, name: &CharacterName, totals: SlotTotals) -> Result<SpellSlotState, StoreError> {
        self.files.ensure_character(name)?;
        let path = self.files.paths().slots_file(name);
        let used = match self.files.read_optional(&path)? {
            Some(content) => decode_slots(&content)?,
            None => [0; charsheet_domain::SLOT_LEVELS],
        };
        let (state, clamped) = SpellSlotState::with_used(totals, used);
        if clamped {
            tracing::warn!(
                character = %name,
                stored = ?used,
                totals = ?totals,
                "Used spell slots exceed totals, clamping"
            );
        }
        tracing::debug!(character = %name, path = %path.display(), "Loaded spell slots");
        Ok(state)
    }

    pub fn save(&self, name: &CharacterName, state: &SpellSlotState) -> Result<(), StoreError> {
        self.files.ensure_character(name)?;
        let path = self.files.paths().slots_file(name);
        self.files.write(&path, &encode_slots(&state.used_counts()))?;
        tracing::debug!(character = %name, path = %path.display(), "Saved spell slots");
        Ok(())
    }
}
