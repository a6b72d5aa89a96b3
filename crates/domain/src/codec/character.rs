//! `character.csv` codec.
//!
//! The record is exactly nine lines in a fixed order:
//!
//! ```text
//! 1  name,class,subclass,race,level:experience,currentHp:maxHp
//! 2  str,dex,con,int,wis,cha
//! 3  skill proficiencies
//! 4  spells as Name[:flags], flags from {k = known, p = prepared}
//! 5  feats
//! 6  languages
//! 7  equipment proficiencies
//! 8  attuned items
//! 9  platinum,gold,silver,copper
//! ```
//!
//! Lines 1 and 2 are required. The list lines (3-9) decode to empty values
//! when missing or blank, so older files with fewer lines still load.

use std::collections::BTreeSet;

use crate::common::{ensure_plain_field, join_list, split_list, COMPOUND_SEPARATOR, FIELD_SEPARATOR};
use crate::entities::CharacterRecord;
use crate::error::DomainError;
use crate::value_objects::{AbilityScores, CharacterName, Coins, Skill};

/// Marks a spell as known in the spell line.
const KNOWN_FLAG: char = 'k';
/// Marks a spell as prepared in the spell line.
const PREPARED_FLAG: char = 'p';

/// Lines of the record, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordLine {
    Identity,
    Abilities,
    Proficiencies,
    Spells,
    Feats,
    Languages,
    EquipmentProficiencies,
    AttunedItems,
    Coins,
}

impl RecordLine {
    const COUNT: usize = 9;

    fn index(self) -> usize {
        self as usize
    }

    /// 1-based line number for diagnostics.
    fn number(self) -> usize {
        self.index() + 1
    }

    fn error(self, msg: impl std::fmt::Display) -> DomainError {
        DomainError::parse(format!("character.csv line {}: {msg}", self.number()))
    }
}

/// The raw lines of a record, addressed by field rather than position.
struct RecordLines<'a> {
    lines: Vec<&'a str>,
}

impl<'a> RecordLines<'a> {
    fn split(content: &'a str) -> Result<Self, DomainError> {
        let mut lines: Vec<&str> = content.lines().collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        if lines.len() > RecordLine::COUNT {
            return Err(DomainError::parse(format!(
                "character.csv has {} lines, expected {}",
                lines.len(),
                RecordLine::COUNT
            )));
        }
        Ok(Self { lines })
    }

    /// The line's content, or "" when the file stops early.
    fn get(&self, line: RecordLine) -> &'a str {
        self.lines.get(line.index()).copied().unwrap_or("")
    }
}

/// Parses `a:b` into two integers; anything else is a parse error.
fn parse_compound(line: RecordLine, label: &str, field: &str) -> Result<(u32, u32), DomainError> {
    let parts: Vec<&str> = field.split(COMPOUND_SEPARATOR).collect();
    let [first, second] = parts.as_slice() else {
        return Err(line.error(format!(
            "{label} '{field}' must have exactly two ':'-separated parts"
        )));
    };
    let parse = |raw: &str| {
        raw.trim()
            .parse::<u32>()
            .map_err(|_| line.error(format!("{label} '{field}' is not numeric")))
    };
    Ok((parse(*first)?, parse(*second)?))
}

fn decode_identity(lines: &RecordLines<'_>) -> Result<CharacterRecord, DomainError> {
    let line = RecordLine::Identity;
    let raw = lines.get(line);
    if raw.trim().is_empty() {
        return Err(line.error("missing identity line"));
    }
    let fields: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
    let [name, class, subclass, race, progress, vitals] = fields.as_slice() else {
        return Err(line.error(format!(
            "expected 6 fields (name,class,subclass,race,level:experience,hp:maxHp), found {}",
            fields.len()
        )));
    };

    let name = CharacterName::new(*name).map_err(|e| line.error(e))?;
    let mut record = CharacterRecord::new(name, *class);
    record.subclass = subclass.to_string();
    record.race = race.to_string();

    let (level, experience) = parse_compound(line, "level:experience", progress)?;
    let level = u8::try_from(level).map_err(|_| line.error(format!("level {level} out of range")))?;
    record.set_level(level).map_err(|e| line.error(e))?;
    record.set_experience(experience);

    let (current, max) = parse_compound(line, "hp:maxHp", vitals)?;
    record.set_hit_points(current, max).map_err(|e| line.error(e))?;
    Ok(record)
}

fn decode_abilities(lines: &RecordLines<'_>) -> Result<AbilityScores, DomainError> {
    let line = RecordLine::Abilities;
    let fields: Vec<&str> = lines.get(line).split(FIELD_SEPARATOR).collect();
    if fields.len() != 6 {
        return Err(line.error(format!("expected 6 ability scores, found {}", fields.len())));
    }
    let mut scores = [0i32; 6];
    for (score, raw) in scores.iter_mut().zip(&fields) {
        *score = raw
            .trim()
            .parse()
            .map_err(|_| line.error(format!("ability score '{raw}' is not numeric")))?;
    }
    Ok(AbilityScores::new(scores))
}

fn decode_spells(
    lines: &RecordLines<'_>,
    record: &mut CharacterRecord,
) -> Result<(), DomainError> {
    let line = RecordLine::Spells;
    for entry in split_list(lines.get(line)) {
        let (name, flags) = entry.split_once(COMPOUND_SEPARATOR).unwrap_or((entry, ""));
        if name.is_empty() {
            return Err(line.error(format!("spell entry '{entry}' has no name")));
        }
        let mut known = flags.is_empty();
        let mut prepared = false;
        for flag in flags.chars() {
            match flag {
                KNOWN_FLAG => known = true,
                PREPARED_FLAG => prepared = true,
                other => return Err(line.error(format!("unknown spell flag '{other}' in '{entry}'"))),
            }
        }
        if known {
            record.known_spells.insert(name.to_string());
        }
        if prepared {
            record.prepared_spells.insert(name.to_string());
        }
    }
    Ok(())
}

fn decode_coins(lines: &RecordLines<'_>) -> Result<Coins, DomainError> {
    let line = RecordLine::Coins;
    let raw = lines.get(line);
    if raw.trim().is_empty() {
        return Ok(Coins::default());
    }
    let fields: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
    if fields.len() > 4 {
        return Err(line.error(format!("expected at most 4 coin values, found {}", fields.len())));
    }
    let mut values = [0u32; 4];
    for (value, field) in values.iter_mut().zip(&fields) {
        if field.trim().is_empty() {
            continue;
        }
        *value = field
            .trim()
            .parse()
            .map_err(|_| line.error(format!("coin value '{field}' is not a non-negative number")))?;
    }
    Ok(Coins::from_array(values))
}

fn string_set(raw: &str) -> BTreeSet<String> {
    split_list(raw).map(str::to_string).collect()
}

/// Decodes a `character.csv` file.
///
/// # Errors
///
/// Returns `DomainError::Parse` naming the offending line when a required
/// line or compound field is malformed. Nothing panics on short input.
pub fn decode_character(content: &str) -> Result<CharacterRecord, DomainError> {
    let lines = RecordLines::split(content)?;

    let mut record = decode_identity(&lines)?;
    record.abilities = decode_abilities(&lines)?;

    let proficiencies = RecordLine::Proficiencies;
    record.proficiencies = split_list(lines.get(proficiencies))
        .map(|s| s.parse::<Skill>().map_err(|e| proficiencies.error(e)))
        .collect::<Result<_, _>>()?;

    decode_spells(&lines, &mut record)?;
    record.feats = string_set(lines.get(RecordLine::Feats));
    record.languages = string_set(lines.get(RecordLine::Languages));
    record.equipment_proficiencies = string_set(lines.get(RecordLine::EquipmentProficiencies));
    record.restore_attuned_items(
        split_list(lines.get(RecordLine::AttunedItems))
            .map(str::to_string)
            .collect(),
    );
    record.coins = decode_coins(&lines)?;
    Ok(record)
}

fn ensure_plain_all<'a>(
    label: &str,
    values: impl IntoIterator<Item = &'a String>,
) -> Result<(), DomainError> {
    for value in values {
        if value.is_empty() {
            return Err(DomainError::validation(format!("{label} cannot be empty")));
        }
        ensure_plain_field(label, value)?;
    }
    Ok(())
}

fn encode_spell_line(record: &CharacterRecord) -> String {
    let names: BTreeSet<&String> = record
        .known_spells
        .iter()
        .chain(record.prepared_spells.iter())
        .collect();
    join_list(names.into_iter().map(|name| {
        let known = record.known_spells.contains(name);
        let prepared = record.prepared_spells.contains(name);
        match (known, prepared) {
            (true, true) => format!("{name}{COMPOUND_SEPARATOR}{KNOWN_FLAG}{PREPARED_FLAG}"),
            (false, true) => format!("{name}{COMPOUND_SEPARATOR}{PREPARED_FLAG}"),
            _ => name.clone(),
        }
    }))
}

/// Encodes a record as the nine-line `character.csv` content.
///
/// # Errors
///
/// Returns `DomainError::Validation` when a text field contains `,`, `:` or a
/// line break, or a list entry is empty; such values could not be read back.
pub fn encode_character(record: &CharacterRecord) -> Result<String, DomainError> {
    ensure_plain_field("Class", &record.class)?;
    ensure_plain_field("Subclass", &record.subclass)?;
    ensure_plain_field("Race", &record.race)?;
    ensure_plain_all("Spell", record.known_spells.iter().chain(&record.prepared_spells))?;
    ensure_plain_all("Feat", &record.feats)?;
    ensure_plain_all("Language", &record.languages)?;
    ensure_plain_all("Equipment proficiency", &record.equipment_proficiencies)?;
    ensure_plain_all("Attuned item", record.attuned_items())?;

    let identity = join_list([
        record.name.as_str().to_string(),
        record.class.clone(),
        record.subclass.clone(),
        record.race.clone(),
        format!("{}{COMPOUND_SEPARATOR}{}", record.level(), record.experience()),
        format!(
            "{}{COMPOUND_SEPARATOR}{}",
            record.current_hit_points(),
            record.max_hit_points()
        ),
    ]);

    let lines = [
        identity,
        join_list(record.abilities.as_array().iter().map(i32::to_string)),
        join_list(record.proficiencies.iter().map(Skill::name)),
        encode_spell_line(record),
        join_list(&record.feats),
        join_list(&record.languages),
        join_list(&record.equipment_proficiencies),
        join_list(record.attuned_items()),
        join_list(record.coins.as_array().iter().map(u32::to_string)),
    ];

    let mut out = String::new();
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARIA: &str = "Aria,Wizard,School of Evocation,High Elf,5:6500,27:32\n\
                        16,14,13,12,10,8\n\
                        Arcana,History\n\
                        Fire Bolt,Magic Missile:kp,Shield:p\n\
                        War Caster\n\
                        Common,Elvish\n\
                        Daggers,Quarterstaffs\n\
                        Ring of Protection\n\
                        0,15,4,20\n";

    fn full_record() -> CharacterRecord {
        decode_character(ARIA).unwrap()
    }

    #[test]
    fn decodes_every_line() {
        let r = full_record();
        assert_eq!(r.name.as_str(), "Aria");
        assert_eq!(r.class, "Wizard");
        assert_eq!(r.subclass, "School of Evocation");
        assert_eq!(r.race, "High Elf");
        assert_eq!((r.level(), r.experience()), (5, 6500));
        assert_eq!((r.current_hit_points(), r.max_hit_points()), (27, 32));
        assert_eq!(r.abilities.as_array(), [16, 14, 13, 12, 10, 8]);
        assert!(r.is_proficient(Skill::Arcana));
        assert!(r.known_spells.contains("Fire Bolt"));
        assert!(r.known_spells.contains("Magic Missile"));
        assert!(!r.known_spells.contains("Shield"));
        assert!(r.prepared_spells.contains("Magic Missile"));
        assert!(r.prepared_spells.contains("Shield"));
        assert_eq!(r.attuned_items(), ["Ring of Protection"]);
        assert_eq!(r.coins, Coins::new(0, 15, 4, 20));
    }

    #[test]
    fn round_trip_is_exact() {
        let encoded = encode_character(&full_record()).unwrap();
        assert_eq!(encoded, ARIA);
        assert_eq!(decode_character(&encoded).unwrap(), full_record());
    }

    #[test]
    fn round_trip_with_empty_lists() {
        let mut r = CharacterRecord::new(CharacterName::new("Bram").unwrap(), "Fighter");
        r.set_hit_points(12, 12).unwrap();
        let encoded = encode_character(&r).unwrap();
        assert_eq!(encoded.lines().count(), 9);
        assert_eq!(decode_character(&encoded).unwrap(), r);
    }

    #[test]
    fn no_trailing_commas() {
        let encoded = encode_character(&full_record()).unwrap();
        assert!(encoded.lines().all(|l| !l.ends_with(',')));
    }

    #[test]
    fn short_file_defaults_list_lines() {
        let r = decode_character("Bram,Fighter,,Human,1:0,12:12\n15,12,14,8,10,10\n").unwrap();
        assert!(r.proficiencies.is_empty());
        assert!(r.feats.is_empty());
        assert_eq!(r.coins, Coins::default());
    }

    #[test]
    fn short_coin_line_defaults_missing_values() {
        let content = ARIA.replace("0,15,4,20", "1,2");
        assert_eq!(decode_character(&content).unwrap().coins, Coins::new(1, 2, 0, 0));
    }

    #[test]
    fn malformed_compound_field_is_parse_error() {
        for bad in ["5", "5:6500:1", "five:6500", ""] {
            let content = ARIA.replace("5:6500", bad);
            let err = decode_character(&content).unwrap_err();
            assert!(err.is_parse(), "{bad}: {err}");
            assert!(err.to_string().contains("line 1"));
        }
        let err = decode_character(&ARIA.replace("27:32", "27")).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn current_above_max_is_parse_error() {
        let err = decode_character(&ARIA.replace("27:32", "40:32")).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn missing_abilities_is_parse_error() {
        let err = decode_character("Bram,Fighter,,Human,1:0,12:12\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn empty_file_is_parse_error() {
        assert!(decode_character("").unwrap_err().is_parse());
    }

    #[test]
    fn unknown_skill_is_parse_error() {
        let err = decode_character(&ARIA.replace("Arcana,History", "Arcana,Juggling")).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn out_of_range_scores_decode_and_derive() {
        use crate::game_systems::{compute_derived, Dnd5eSystem};
        use crate::value_objects::Ability;

        let content = ARIA.replace("16,14,13,12,10,8", "-2147483648,14,13,12,10,2147483647");
        let record = decode_character(&content).unwrap();
        let derived = compute_derived(&Dnd5eSystem::new(), &record, &[Ability::Strength]);
        assert_eq!(derived.modifier(Ability::Strength), i32::MIN / 2);
        assert_eq!(derived.saving_throw(Ability::Strength), i32::MIN / 2 + 3);
    }

    #[test]
    fn too_many_lines_is_parse_error() {
        let content = format!("{ARIA}extra\n");
        assert!(decode_character(&content).unwrap_err().is_parse());
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let content = ARIA.replace('\n', "\r\n");
        assert_eq!(decode_character(&content).unwrap(), full_record());
    }

    #[test]
    fn encode_rejects_separators_in_text() {
        let mut r = full_record();
        r.feats.insert("Alert, Lucky".to_string());
        assert!(matches!(encode_character(&r), Err(DomainError::Validation(_))));

        let mut r = full_record();
        r.race = "Elf:High".to_string();
        assert!(encode_character(&r).is_err());
    }
}
