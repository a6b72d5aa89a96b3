//! CharacterRecord - everything stored in a character's `character.csv`
//!
//! # Invariants
//!
//! - `level` is in 1..=20
//! - `current_hit_points <= max_hit_points`
//! - `attuned_items` never grows past [`MAX_ATTUNED_ITEMS`] through
//!   [`CharacterRecord::attune`]; a file that already lists more is loaded
//!   as-is

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::DomainError;
use crate::value_objects::{AbilityScores, CharacterName, Coins, Skill};

/// Highest character level.
pub const MAX_LEVEL: u8 = 20;

/// Attunement slots available to one character.
pub const MAX_ATTUNED_ITEMS: usize = 3;

/// A player character as persisted in its folder.
///
/// Identity, abilities, lists, and coins are plain public data. Level and hit
/// points carry invariants and are only reachable through checked setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordFields")]
pub struct CharacterRecord {
    pub name: CharacterName,
    pub class: String,
    /// Empty until the class grants a subclass
    pub subclass: String,
    pub race: String,
    pub abilities: AbilityScores,
    level: u8,
    experience: u32,
    current_hit_points: u32,
    max_hit_points: u32,
    /// Skill proficiencies from the fixed vocabulary
    pub proficiencies: BTreeSet<Skill>,
    pub prepared_spells: BTreeSet<String>,
    pub known_spells: BTreeSet<String>,
    pub feats: BTreeSet<String>,
    pub languages: BTreeSet<String>,
    pub equipment_proficiencies: BTreeSet<String>,
    attuned_items: Vec<String>,
    pub coins: Coins,
}

/// Serialized shape of [`CharacterRecord`]. Deserializing goes through the
/// checked setters.
#[derive(Deserialize)]
struct RecordFields {
    name: CharacterName,
    class: String,
    subclass: String,
    race: String,
    abilities: AbilityScores,
    level: u8,
    experience: u32,
    current_hit_points: u32,
    max_hit_points: u32,
    proficiencies: BTreeSet<Skill>,
    prepared_spells: BTreeSet<String>,
    known_spells: BTreeSet<String>,
    feats: BTreeSet<String>,
    languages: BTreeSet<String>,
    equipment_proficiencies: BTreeSet<String>,
    attuned_items: Vec<String>,
    coins: Coins,
}

impl TryFrom<RecordFields> for CharacterRecord {
    type Error = DomainError;

    fn try_from(fields: RecordFields) -> Result<Self, Self::Error> {
        let mut record = CharacterRecord::new(fields.name, fields.class);
        record.set_level(fields.level)?;
        record.set_hit_points(fields.current_hit_points, fields.max_hit_points)?;
        record.set_experience(fields.experience);
        record.restore_attuned_items(fields.attuned_items);
        record.subclass = fields.subclass;
        record.race = fields.race;
        record.abilities = fields.abilities;
        record.proficiencies = fields.proficiencies;
        record.prepared_spells = fields.prepared_spells;
        record.known_spells = fields.known_spells;
        record.feats = fields.feats;
        record.languages = fields.languages;
        record.equipment_proficiencies = fields.equipment_proficiencies;
        record.coins = fields.coins;
        Ok(record)
    }
}

impl CharacterRecord {
    /// A level 1 character with default scores and empty lists.
    pub fn new(name: CharacterName, class: impl Into<String>) -> Self {
        Self {
            name,
            class: class.into(),
            subclass: String::new(),
            race: String::new(),
            abilities: AbilityScores::default(),
            level: 1,
            experience: 0,
            current_hit_points: 0,
            max_hit_points: 0,
            proficiencies: BTreeSet::new(),
            prepared_spells: BTreeSet::new(),
            known_spells: BTreeSet::new(),
            feats: BTreeSet::new(),
            languages: BTreeSet::new(),
            equipment_proficiencies: BTreeSet::new(),
            attuned_items: Vec::new(),
            coins: Coins::default(),
        }
    }

    // ── Progression ──────────────────────────────────────────────────────

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless `level` is in 1..=20.
    pub fn set_level(&mut self, level: u8) -> Result<(), DomainError> {
        if !(1..=MAX_LEVEL).contains(&level) {
            return Err(DomainError::validation(format!(
                "level {level} must be between 1 and {MAX_LEVEL}"
            )));
        }
        self.level = level;
        Ok(())
    }

    pub fn set_experience(&mut self, experience: u32) {
        self.experience = experience;
    }

    // ── Vitals ───────────────────────────────────────────────────────────

    pub fn current_hit_points(&self) -> u32 {
        self.current_hit_points
    }

    pub fn max_hit_points(&self) -> u32 {
        self.max_hit_points
    }

    /// # Errors
    ///
    /// Returns `DomainError::Validation` when `current > max`.
    pub fn set_hit_points(&mut self, current: u32, max: u32) -> Result<(), DomainError> {
        if current > max {
            return Err(DomainError::validation(format!(
                "current hit points {current} exceed maximum {max}"
            )));
        }
        self.current_hit_points = current;
        self.max_hit_points = max;
        Ok(())
    }

    /// Changes the maximum, pulling current hit points down if needed.
    pub fn set_max_hit_points(&mut self, max: u32) {
        self.max_hit_points = max;
        self.current_hit_points = self.current_hit_points.min(max);
    }

    /// Takes damage; hit points stop at 0.
    pub fn damage(&mut self, amount: u32) {
        self.current_hit_points = self.current_hit_points.saturating_sub(amount);
    }

    /// Heals; hit points stop at the maximum.
    pub fn heal(&mut self, amount: u32) {
        self.current_hit_points = self
            .current_hit_points
            .saturating_add(amount)
            .min(self.max_hit_points);
    }

    // ── Attunement ───────────────────────────────────────────────────────

    pub fn attuned_items(&self) -> &[String] {
        &self.attuned_items
    }

    /// Replaces the attuned list without the cap check (used when loading).
    pub fn restore_attuned_items(&mut self, items: Vec<String>) {
        self.attuned_items = items;
    }

    /// Marks an item attuned. Attuning an item twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PolicyViolation` when three items are already
    /// attuned.
    pub fn attune(&mut self, item: &str) -> Result<(), DomainError> {
        if self.attuned_items.iter().any(|i| i == item) {
            return Ok(());
        }
        if self.attuned_items.len() >= MAX_ATTUNED_ITEMS {
            return Err(DomainError::policy(format!(
                "cannot attune '{item}': already attuned to {MAX_ATTUNED_ITEMS} items"
            )));
        }
        self.attuned_items.push(item.to_string());
        Ok(())
    }

    /// Removes an item from the attuned list; returns whether it was there.
    pub fn unattune(&mut self, item: &str) -> bool {
        let before = self.attuned_items.len();
        self.attuned_items.retain(|i| i != item);
        before != self.attuned_items.len()
    }

    // ── Spells ───────────────────────────────────────────────────────────

    /// Drops a spell from both the known and prepared sets.
    pub fn forget_spell(&mut self, spell: &str) {
        self.known_spells.remove(spell);
        self.prepared_spells.remove(spell);
    }

    pub fn is_proficient(&self, skill: Skill) -> bool {
        self.proficiencies.contains(&skill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CharacterRecord {
        CharacterRecord::new(CharacterName::new("Aria").unwrap(), "Wizard")
    }

    #[test]
    fn test_new_record_defaults() {
        let r = record();
        assert_eq!(r.level(), 1);
        assert_eq!(r.experience(), 0);
        assert!(r.proficiencies.is_empty());
        assert!(r.attuned_items().is_empty());
    }

    #[test]
    fn test_level_bounds() {
        let mut r = record();
        assert!(r.set_level(0).is_err());
        assert!(r.set_level(21).is_err());
        r.set_level(20).unwrap();
        assert_eq!(r.level(), 20);
    }

    #[test]
    fn test_hit_points_invariant() {
        let mut r = record();
        assert!(r.set_hit_points(12, 10).is_err());
        r.set_hit_points(0, 10).unwrap();
        r.heal(25);
        assert_eq!(r.current_hit_points(), 10);
        r.damage(40);
        assert_eq!(r.current_hit_points(), 0);
    }

    #[test]
    fn test_lowering_max_clamps_current() {
        let mut r = record();
        r.set_hit_points(10, 10).unwrap();
        r.set_max_hit_points(6);
        assert_eq!(r.current_hit_points(), 6);
    }

    #[test]
    fn test_fourth_attunement_rejected() {
        let mut r = record();
        r.attune("Ring").unwrap();
        r.attune("Cloak").unwrap();
        r.attune("Staff").unwrap();
        r.attune("Ring").unwrap();
        let err = r.attune("Amulet").unwrap_err();
        assert!(matches!(err, DomainError::PolicyViolation(_)));
        assert_eq!(r.attuned_items(), ["Ring", "Cloak", "Staff"]);
    }

    #[test]
    fn test_unattune() {
        let mut r = record();
        r.attune("Ring").unwrap();
        assert!(r.unattune("Ring"));
        assert!(!r.unattune("Ring"));
    }

    #[test]
    fn test_forget_spell_clears_both_sets() {
        let mut r = record();
        r.known_spells.insert("Shield".into());
        r.prepared_spells.insert("Shield".into());
        r.forget_spell("Shield");
        assert!(r.known_spells.is_empty());
        assert!(r.prepared_spells.is_empty());
    }

    #[test]
    fn test_deserialize_rechecks_invariants() {
        let mut r = record();
        r.set_hit_points(5, 8).unwrap();
        let json = serde_json::to_value(&r).unwrap();
        let back: CharacterRecord = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(back, r);

        let mut over_max = json.clone();
        over_max["current_hit_points"] = 12.into();
        assert!(serde_json::from_value::<CharacterRecord>(over_max).is_err());

        let mut bad_level = json;
        bad_level["level"] = 0.into();
        assert!(serde_json::from_value::<CharacterRecord>(bad_level).is_err());
    }
}
