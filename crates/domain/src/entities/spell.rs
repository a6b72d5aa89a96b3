//! Spell entity and the per-character spell book.
//!
//! A [`SpellRecord`] is one line of `spells.csv`. The [`SpellBook`] keeps
//! them in file order and mirrors what the character record tracks as its
//! known/prepared sets.

use serde::{Deserialize, Serialize};

use crate::common::ensure_plain_field;
use crate::error::DomainError;

/// Highest spell level (cantrips are level 0).
pub const MAX_SPELL_LEVEL: u8 = 9;

/// A spell a character knows, with the reference details shown on the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellRecord {
    pub name: String,
    /// Source book (e.g., "PHB")
    pub book: String,
    pub page: u32,
    /// 0 for cantrips, otherwise 1..=9
    pub level: u8,
    pub school: String,
    pub casting_time: String,
    /// Range in feet; 0 for self/touch
    pub range: i32,
    pub components: SpellComponents,
    pub duration: String,
    pub concentration: bool,
    pub ritual: bool,
    pub prepared: bool,
    /// Full text; may span several lines
    pub description: String,
}

impl SpellRecord {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the level is above 9, or when
    /// the name cannot be stored on the record's spell line.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.level > MAX_SPELL_LEVEL {
            return Err(DomainError::validation(format!(
                "spell '{}' has level {}, expected 0..={MAX_SPELL_LEVEL}",
                self.name, self.level
            )));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Spell name cannot be empty"));
        }
        ensure_plain_field("Spell name", &self.name)
    }
}

/// Verbal, somatic, and material components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellComponents {
    pub verbal: bool,
    pub somatic: bool,
    pub material: bool,
}

impl SpellComponents {
    pub fn new(verbal: bool, somatic: bool, material: bool) -> Self {
        Self {
            verbal,
            somatic,
            material,
        }
    }

    /// Reads the `v`/`s`/`m` marker column. Letters are case-insensitive and
    /// order does not matter.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Parse` for any other character.
    pub fn parse_markers(markers: &str) -> Result<Self, DomainError> {
        let mut components = Self::default();
        for c in markers.trim().chars() {
            match c.to_ascii_lowercase() {
                'v' => components.verbal = true,
                's' => components.somatic = true,
                'm' => components.material = true,
                other => {
                    return Err(DomainError::parse(format!(
                        "unknown spell component marker '{other}'"
                    )))
                }
            }
        }
        Ok(components)
    }

    /// Writes the marker column, always in `vsm` order.
    pub fn markers(&self) -> String {
        let mut out = String::with_capacity(3);
        if self.verbal {
            out.push('v');
        }
        if self.somatic {
            out.push('s');
        }
        if self.material {
            out.push('m');
        }
        out
    }
}

/// Every spell recorded for a character, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellBook {
    spells: Vec<SpellRecord>,
}

impl SpellBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_spells(spells: Vec<SpellRecord>) -> Self {
        Self { spells }
    }

    pub fn spells(&self) -> &[SpellRecord] {
        &self.spells
    }

    pub fn get(&self, name: &str) -> Option<&SpellRecord> {
        self.spells.iter().find(|s| s.name == name)
    }

    /// Adds a spell, replacing an existing entry with the same name in place.
    pub fn learn(&mut self, spell: SpellRecord) -> Result<(), DomainError> {
        spell.validate()?;
        match self.spells.iter_mut().find(|s| s.name == spell.name) {
            Some(existing) => *existing = spell,
            None => self.spells.push(spell),
        }
        Ok(())
    }

    /// Removes a spell; returns whether it was present.
    pub fn forget(&mut self, name: &str) -> bool {
        let before = self.spells.len();
        self.spells.retain(|s| s.name != name);
        before != self.spells.len()
    }

    /// Flips the prepared flag and returns the new value.
    pub fn toggle_prepared(&mut self, name: &str) -> Result<bool, DomainError> {
        let spell = self
            .spells
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| DomainError::not_found("Spell", name))?;
        spell.prepared = !spell.prepared;
        Ok(spell.prepared)
    }

    pub fn by_level(&self, level: u8) -> impl Iterator<Item = &SpellRecord> {
        self.spells.iter().filter(move |s| s.level == level)
    }

    pub fn prepared(&self) -> impl Iterator<Item = &SpellRecord> {
        self.spells.iter().filter(|s| s.prepared)
    }
}
