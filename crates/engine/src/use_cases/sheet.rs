//! Sheet operations: derived stats, vitals, experience, and coins.

use std::sync::Arc;

use serde::Serialize;

use charsheet_domain::{
    compute_derived, CalculationEngine, CharacterName, CharacterRecord, Coins, DerivedStats,
    Dnd5eSystem, ReferenceData,
};

use crate::infrastructure::error::StoreError;
use crate::infrastructure::persistence::CharacterRepo;

/// Result of adding experience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperienceGain {
    pub record: CharacterRecord,
    pub previous_level: u8,
}

impl ExperienceGain {
    pub fn leveled_up(&self) -> bool {
        self.record.level() > self.previous_level
    }
}

pub struct SheetOps {
    characters: Arc<CharacterRepo>,
    reference: Arc<ReferenceData>,
    engine: Dnd5eSystem,
}

impl SheetOps {
    pub fn new(characters: Arc<CharacterRepo>, reference: Arc<ReferenceData>) -> Self {
        Self {
            characters,
            reference,
            engine: Dnd5eSystem::new(),
        }
    }

    fn load(&self, name: &str) -> Result<CharacterRecord, StoreError> {
        self.characters.load(&CharacterName::new(name)?)
    }

    /// Derived stats for display. Proficient saves come from the class row.
    pub fn derived(&self, name: &str) -> Result<(CharacterRecord, DerivedStats), StoreError> {
        let record = self.load(name)?;
        let stats = self.derive(&record);
        Ok((record, stats))
    }

    pub fn derive(&self, record: &CharacterRecord) -> DerivedStats {
        let saves = self.reference.saving_throws(&record.class);
        if saves.is_empty() {
            tracing::debug!(class = %record.class, "No saving throw proficiencies for class");
        }
        compute_derived(&self.engine, record, saves)
    }

    /// Applies damage; hit points floor at 0.
    pub fn damage(&self, name: &str, amount: u32) -> Result<CharacterRecord, StoreError> {
        let mut record = self.load(name)?;
        record.damage(amount);
        self.characters.save(&record)?;
        Ok(record)
    }

    /// Heals; hit points cap at the maximum.
    pub fn heal(&self, name: &str, amount: u32) -> Result<CharacterRecord, StoreError> {
        let mut record = self.load(name)?;
        record.heal(amount);
        self.characters.save(&record)?;
        Ok(record)
    }

    /// Adds experience and raises the level when a threshold is crossed.
    /// The level never drops here.
    pub fn add_experience(&self, name: &str, amount: u32) -> Result<ExperienceGain, StoreError> {
        let mut record = self.load(name)?;
        let previous_level = record.level();
        let experience = record.experience().saturating_add(amount);
        record.set_experience(experience);

        let reached = self.engine.level_for_xp(experience);
        if reached > previous_level {
            record.set_level(reached)?;
            tracing::info!(
                character = %record.name,
                from = previous_level,
                to = reached,
                "Character leveled up"
            );
        }
        self.characters.save(&record)?;
        Ok(ExperienceGain {
            record,
            previous_level,
        })
    }

    pub fn add_coins(&self, name: &str, coins: Coins) -> Result<CharacterRecord, StoreError> {
        let mut record = self.load(name)?;
        record.coins.add(coins);
        self.characters.save(&record)?;
        Ok(record)
    }

    /// Pays `cost`, breaking larger coins when needed.
    ///
    /// # Errors
    ///
    /// `PolicyViolation` when the purse is worth less than the cost; the
    /// record is not written in that case.
    pub fn spend_coins(&self, name: &str, cost: Coins) -> Result<CharacterRecord, StoreError> {
        let mut record = self.load(name)?;
        record.coins.spend(cost)?;
        self.characters.save(&record)?;
        Ok(record)
    }
}
