//! Character creation - turning the wizard's choices into a level 1 record.

use serde::{Deserialize, Serialize};

use crate::entities::{CharacterRecord, Inventory};
use crate::error::DomainError;
use crate::game_systems::CalculationEngine;
use crate::reference::ReferenceData;
use crate::value_objects::{Ability, AbilityScores, CharacterName, Skill};

/// Choices collected by the creation wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDraft {
    pub name: String,
    pub class: String,
    pub subclass: String,
    /// Race or subrace name as listed in `Races.tsv`; may be empty
    pub race: String,
    /// Base scores before racial bonuses, Str..Cha
    pub abilities: [i32; 6],
    pub proficiencies: Vec<Skill>,
    /// Languages chosen on top of the race's
    pub extra_languages: Vec<String>,
}

/// A freshly built character and its starting inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCharacter {
    pub record: CharacterRecord,
    pub inventory: Inventory,
}

impl CharacterDraft {
    /// Validates the draft against the reference tables and builds the
    /// level 1 character.
    ///
    /// Racial bonuses are applied after the 3..=18 creation check. Hit points
    /// start at the class hit die plus the Constitution modifier, never below 1.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for an invalid name, an unknown class
    /// or race, or scores outside the creation range.
    pub fn build<E: CalculationEngine>(
        &self,
        reference: &ReferenceData,
        engine: &E,
    ) -> Result<NewCharacter, DomainError> {
        let name = CharacterName::new(self.name.as_str())?;
        let class = reference
            .class(&self.class)
            .ok_or_else(|| DomainError::validation(format!("Unknown class '{}'", self.class)))?;
        let mut abilities = AbilityScores::for_creation(self.abilities)?;

        let mut record = CharacterRecord::new(name, class.name.clone());
        record.subclass = self.subclass.trim().to_string();

        if !self.race.trim().is_empty() {
            let race = reference
                .race(self.race.trim())
                .ok_or_else(|| DomainError::validation(format!("Unknown race '{}'", self.race)))?;
            for (ability, bonus) in &race.ability_bonuses {
                abilities.raise(*ability, *bonus);
            }
            record.race = race.display_name().to_string();
            record.languages.extend(race.languages.iter().cloned());
        }
        record.abilities = abilities;
        record.languages.extend(
            self.extra_languages
                .iter()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty()),
        );
        record.proficiencies.extend(self.proficiencies.iter().copied());
        record
            .equipment_proficiencies
            .extend(class.equipment_proficiencies.iter().cloned());

        let con = engine.ability_modifier(abilities.get(Ability::Constitution));
        let hit_points = (i32::from(class.hit_die) + con).max(1).unsigned_abs();
        record.set_hit_points(hit_points, hit_points)?;

        let mut inventory = Inventory::new();
        for (item, quantity) in &class.starting_equipment {
            inventory.add_item(item, *quantity)?;
        }

        Ok(NewCharacter { record, inventory })
    }
}
