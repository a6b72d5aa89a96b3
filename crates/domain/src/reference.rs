//! Read-only reference tables authored outside this application.
//!
//! The engine reads the three files under `databases/` once and hands the
//! resulting [`ReferenceData`] to whatever needs it; nothing here is global.
//!
//! | file | layout |
//! |------|--------|
//! | `SpellSlots.csv` | `class,level,s1..s9` |
//! | `ClassInventory.tsv` | `Class  HitDie  SavingThrows  SkillChoices  EquipmentProficiencies  StartingEquipment` |
//! | `Races.tsv` | `Race  Subrace  AbilityBonuses  Speed  Languages` |
//!
//! List cells inside the TSV files are comma-separated.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::common::{split_list, COMPOUND_SEPARATOR};
use crate::entities::{SlotTotals, SLOT_LEVELS};
use crate::error::DomainError;
use crate::value_objects::{Ability, Skill};

pub const SPELL_SLOTS_FILE: &str = "SpellSlots.csv";
pub const CLASS_FILE: &str = "ClassInventory.tsv";
pub const RACE_FILE: &str = "Races.tsv";

fn row_error(file: &str, line: usize, msg: impl std::fmt::Display) -> DomainError {
    DomainError::parse(format!("{file} line {line}: {msg}"))
}

// ============================================================================
// Spell slots
// ============================================================================

/// Slot totals keyed by (class, level).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpellSlotTable {
    rows: HashMap<(String, u8), SlotTotals>,
}

impl SpellSlotTable {
    /// Parses `SpellSlots.csv`. Rows whose level column is not a number
    /// (such as a header) are skipped.
    pub fn parse(content: &str) -> Result<Self, DomainError> {
        let mut rows = HashMap::new();
        for (i, line) in content.lines().enumerate() {
            let line_no = i + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let cols: Vec<&str> = line.split(',').map(str::trim).collect();
            let Some(level) = cols.get(1).and_then(|l| l.parse::<u8>().ok()) else {
                continue;
            };
            if cols.len() != 2 + SLOT_LEVELS {
                return Err(row_error(
                    SPELL_SLOTS_FILE,
                    line_no,
                    format!("expected {} columns, found {}", 2 + SLOT_LEVELS, cols.len()),
                ));
            }
            let mut totals = [0u8; SLOT_LEVELS];
            for (slot, raw) in totals.iter_mut().zip(&cols[2..]) {
                *slot = raw
                    .parse()
                    .map_err(|_| row_error(SPELL_SLOTS_FILE, line_no, format!("bad slot count '{raw}'")))?;
            }
            rows.insert((cols[0].to_ascii_lowercase(), level), totals);
        }
        Ok(Self { rows })
    }

    pub fn insert(&mut self, class: &str, level: u8, totals: SlotTotals) {
        self.rows.insert((class.to_ascii_lowercase(), level), totals);
    }

    /// Exact-match lookup; classes without an entry have no slots.
    pub fn totals(&self, class: &str, level: u8) -> SlotTotals {
        self.rows
            .get(&(class.to_ascii_lowercase(), level))
            .copied()
            .unwrap_or([0; SLOT_LEVELS])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ============================================================================
// Classes
// ============================================================================

/// One row of `ClassInventory.tsv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub name: String,
    pub hit_die: u8,
    pub saving_throws: Vec<Ability>,
    /// Skills the class may pick proficiencies from
    pub skill_choices: Vec<Skill>,
    pub equipment_proficiencies: Vec<String>,
    /// Starting items with quantities (`Dagger:2` in the file, bare name = 1)
    pub starting_equipment: Vec<(String, u32)>,
}

fn parse_class_row(line_no: usize, cols: &[&str]) -> Result<ClassInfo, DomainError> {
    let cell = |i: usize| cols.get(i).copied().unwrap_or("");
    let name = cell(0).trim();
    if name.is_empty() {
        return Err(row_error(CLASS_FILE, line_no, "missing class name"));
    }
    let hit_die = cell(1)
        .trim()
        .trim_start_matches(['d', 'D'])
        .parse::<u8>()
        .map_err(|_| row_error(CLASS_FILE, line_no, format!("bad hit die '{}'", cell(1))))?;
    let saving_throws = split_list(cell(2))
        .map(|a| a.parse::<Ability>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| row_error(CLASS_FILE, line_no, e))?;
    let skill_choices = split_list(cell(3))
        .map(|s| s.parse::<Skill>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| row_error(CLASS_FILE, line_no, e))?;
    let equipment_proficiencies = split_list(cell(4)).map(|s| s.trim().to_string()).collect();
    let starting_equipment = split_list(cell(5))
        .map(|entry| match entry.split_once(COMPOUND_SEPARATOR) {
            Some((item, qty)) => qty
                .trim()
                .parse::<u32>()
                .map(|q| (item.trim().to_string(), q))
                .map_err(|_| row_error(CLASS_FILE, line_no, format!("bad quantity in '{entry}'"))),
            None => Ok((entry.trim().to_string(), 1)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ClassInfo {
        name: name.to_string(),
        hit_die,
        saving_throws,
        skill_choices,
        equipment_proficiencies,
        starting_equipment,
    })
}

/// Parses `ClassInventory.tsv`; the first line is a header.
pub fn parse_class_table(content: &str) -> Result<Vec<ClassInfo>, DomainError> {
    content
        .lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let cols: Vec<&str> = line.split('\t').collect();
            parse_class_row(i + 1, &cols)
        })
        .collect()
}

// ============================================================================
// Races
// ============================================================================

/// One row of `Races.tsv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceInfo {
    pub race: String,
    /// Empty for races without subraces
    pub subrace: String,
    pub ability_bonuses: Vec<(Ability, i32)>,
    pub speed: u32,
    pub languages: Vec<String>,
}

impl RaceInfo {
    /// Name stored in the character record: the subrace when there is one.
    pub fn display_name(&self) -> &str {
        if self.subrace.is_empty() {
            &self.race
        } else {
            &self.subrace
        }
    }
}

fn parse_race_row(line_no: usize, cols: &[&str]) -> Result<RaceInfo, DomainError> {
    let cell = |i: usize| cols.get(i).copied().unwrap_or("").trim();
    let race = cell(0);
    if race.is_empty() {
        return Err(row_error(RACE_FILE, line_no, "missing race name"));
    }
    let ability_bonuses = split_list(cell(2))
        .map(|entry| {
            let (ability, bonus) = entry.split_once(COMPOUND_SEPARATOR).ok_or_else(|| {
                row_error(RACE_FILE, line_no, format!("bonus '{entry}' is not ABILITY:N"))
            })?;
            let ability = ability
                .parse::<Ability>()
                .map_err(|e| row_error(RACE_FILE, line_no, e))?;
            let bonus = bonus
                .trim()
                .parse::<i32>()
                .map_err(|_| row_error(RACE_FILE, line_no, format!("bad bonus in '{entry}'")))?;
            Ok((ability, bonus))
        })
        .collect::<Result<Vec<_>, DomainError>>()?;
    let speed = match cell(3) {
        "" => 30,
        raw => raw
            .parse()
            .map_err(|_| row_error(RACE_FILE, line_no, format!("bad speed '{raw}'")))?,
    };
    Ok(RaceInfo {
        race: race.to_string(),
        subrace: cell(1).to_string(),
        ability_bonuses,
        speed,
        languages: split_list(cell(4)).map(|l| l.trim().to_string()).collect(),
    })
}

/// Parses `Races.tsv`; the first line is a header.
pub fn parse_race_table(content: &str) -> Result<Vec<RaceInfo>, DomainError> {
    content
        .lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let cols: Vec<&str> = line.split('\t').collect();
            parse_race_row(i + 1, &cols)
        })
        .collect()
}

// ============================================================================
// Aggregate
// ============================================================================

/// All reference tables, loaded once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    classes: HashMap<String, ClassInfo>,
    races: Vec<RaceInfo>,
    spell_slots: SpellSlotTable,
}

impl ReferenceData {
    pub fn new(classes: Vec<ClassInfo>, races: Vec<RaceInfo>, spell_slots: SpellSlotTable) -> Self {
        Self {
            classes: classes
                .into_iter()
                .map(|c| (c.name.to_ascii_lowercase(), c))
                .collect(),
            races,
            spell_slots,
        }
    }

    /// Case-insensitive class lookup.
    pub fn class(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(&name.to_ascii_lowercase())
    }

    /// Class names, sorted.
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.classes.values().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Proficient saving throws of a class; none for an unknown class.
    pub fn saving_throws(&self, class: &str) -> &[Ability] {
        self.class(class)
            .map(|c| c.saving_throws.as_slice())
            .unwrap_or(&[])
    }

    /// Finds a race row by subrace name, or by race name for rows without a
    /// subrace. Matching is case-insensitive.
    pub fn race(&self, name: &str) -> Option<&RaceInfo> {
        self.races
            .iter()
            .find(|r| !r.subrace.is_empty() && r.subrace.eq_ignore_ascii_case(name))
            .or_else(|| {
                self.races
                    .iter()
                    .find(|r| r.subrace.is_empty() && r.race.eq_ignore_ascii_case(name))
            })
    }

    pub fn races(&self) -> &[RaceInfo] {
        &self.races
    }

    pub fn slot_totals(&self, class: &str, level: u8) -> SlotTotals {
        self.spell_slots.totals(class, level)
    }
}
