//! D&D 5th Edition rules for the derived values shown on the sheet.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::traits::CalculationEngine;
use crate::entities::{CharacterRecord, MAX_LEVEL};
use crate::value_objects::{Ability, Skill};

/// XP thresholds for each level in D&D 5e.
/// Index `l - 1` is the floor of level `l`; index 20 caps the level 20 bar.
const XP_THRESHOLDS: [u32; 21] = [
    0,      // Level 1
    300,    // Level 2
    900,    // Level 3
    2700,   // Level 4
    6500,   // Level 5
    14000,  // Level 6
    23000,  // Level 7
    34000,  // Level 8
    48000,  // Level 9
    64000,  // Level 10
    85000,  // Level 11
    100000, // Level 12
    120000, // Level 13
    140000, // Level 14
    165000, // Level 15
    195000, // Level 16
    225000, // Level 17
    265000, // Level 18
    305000, // Level 19
    355000, // Level 20
    405000, // End of the level 20 bar
];

/// Base armor class before Dexterity.
const BASE_AC: i32 = 10;

/// Base of a passive check.
const PASSIVE_BASE: i32 = 10;

/// Base of a spell save DC.
const SPELL_DC_BASE: i32 = 8;

/// D&D 5th Edition game system.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dnd5eSystem;

impl Dnd5eSystem {
    pub fn new() -> Self {
        Self
    }
}

impl CalculationEngine for Dnd5eSystem {
    fn ability_modifier(&self, score: i32) -> i32 {
        // floor((score - 10) / 2); plain `/` would round -1.5 up to -1
        score.saturating_sub(10).div_euclid(2)
    }

    fn proficiency_bonus(&self, level: u8) -> i32 {
        let level = level.clamp(1, MAX_LEVEL);
        (i32::from(level) - 1) / 4 + 2
    }

    fn unarmored_ac(&self, dex_modifier: i32) -> i32 {
        BASE_AC.saturating_add(dex_modifier)
    }

    fn xp_for_level(&self, level: u8) -> u32 {
        let level = level.clamp(1, MAX_LEVEL);
        XP_THRESHOLDS[usize::from(level) - 1]
    }

    fn level_for_xp(&self, xp: u32) -> u8 {
        let reached = XP_THRESHOLDS[..usize::from(MAX_LEVEL)]
            .iter()
            .take_while(|&&threshold| xp >= threshold)
            .count();
        // at least level 1 since the first threshold is 0
        reached as u8
    }
}

/// Lower and upper XP of the current level, used to size a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceBounds {
    pub floor: u32,
    pub ceiling: u32,
}

impl ExperienceBounds {
    pub fn for_level(level: u8) -> Self {
        let level = usize::from(level.clamp(1, MAX_LEVEL));
        Self {
            floor: XP_THRESHOLDS[level - 1],
            ceiling: XP_THRESHOLDS[level],
        }
    }

    /// Whether `experience` is at least the floor of the level.
    ///
    /// Loading never enforces this; the sheet can flag it.
    pub fn is_consistent(&self, experience: u32) -> bool {
        experience >= self.floor
    }
}

/// Everything the sheet shows that is computed rather than stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStats {
    /// Modifiers in Str, Dex, Con, Int, Wis, Cha order
    pub ability_modifiers: [i32; 6],
    pub proficiency_bonus: i32,
    /// Save bonuses in ability order
    pub saving_throws: [i32; 6],
    pub skills: BTreeMap<Skill, i32>,
    pub initiative: i32,
    pub armor_class: i32,
    pub passive_perception: i32,
    pub experience_bounds: ExperienceBounds,
}

impl DerivedStats {
    pub fn modifier(&self, ability: Ability) -> i32 {
        self.ability_modifiers[ability.index()]
    }

    pub fn saving_throw(&self, ability: Ability) -> i32 {
        self.saving_throws[ability.index()]
    }

    pub fn skill(&self, skill: Skill) -> i32 {
        self.skills.get(&skill).copied().unwrap_or(0)
    }

    /// DC of spells cast with `ability`: 8 + proficiency + modifier.
    pub fn spell_save_dc(&self, ability: Ability) -> i32 {
        SPELL_DC_BASE
            .saturating_add(self.proficiency_bonus)
            .saturating_add(self.modifier(ability))
    }

    /// Attack bonus of spells cast with `ability`.
    pub fn spell_attack_bonus(&self, ability: Ability) -> i32 {
        self.proficiency_bonus.saturating_add(self.modifier(ability))
    }
}

/// Computes the derived values of a record.
///
/// `proficient_saves` comes from the character's class; an unknown class
/// simply has none.
pub fn compute_derived<E: CalculationEngine>(
    engine: &E,
    record: &CharacterRecord,
    proficient_saves: &[Ability],
) -> DerivedStats {
    let mut ability_modifiers = [0; 6];
    for (ability, score) in record.abilities.iter() {
        ability_modifiers[ability.index()] = engine.ability_modifier(score);
    }
    let proficiency_bonus = engine.proficiency_bonus(record.level());

    // Scores are not range-checked after creation, so the sums saturate.
    let mut saving_throws = ability_modifiers;
    for ability in proficient_saves {
        let save = &mut saving_throws[ability.index()];
        *save = save.saturating_add(proficiency_bonus);
    }

    let skills: BTreeMap<Skill, i32> = Skill::ALL
        .iter()
        .map(|&skill| {
            let bonus = if record.is_proficient(skill) {
                proficiency_bonus
            } else {
                0
            };
            (skill, ability_modifiers[skill.ability().index()].saturating_add(bonus))
        })
        .collect();

    let dex = ability_modifiers[Ability::Dexterity.index()];
    let passive_perception =
        PASSIVE_BASE.saturating_add(skills.get(&Skill::Perception).copied().unwrap_or(0));

    DerivedStats {
        ability_modifiers,
        proficiency_bonus,
        saving_throws,
        skills,
        initiative: dex,
        armor_class: engine.unarmored_ac(dex),
        passive_perception,
        experience_bounds: ExperienceBounds::for_level(record.level()),
    }
}
