//! `spells.csv` codec.
//!
//! Twelve comma fields per line:
//!
//! ```text
//! name,book:page,level,school,castingTime,range,components,duration,concentration,ritual,prepared,description
//! ```
//!
//! The description is last and may contain commas. Line breaks in it are
//! written as the two characters `\n` (and a literal backslash as `\\`) so
//! each spell stays on one line.

use crate::common::{ensure_plain_field, flag, parse_flag, COMPOUND_SEPARATOR, FIELD_SEPARATOR};
use crate::entities::{SpellBook, SpellComponents, SpellRecord, MAX_SPELL_LEVEL};
use crate::error::DomainError;

const FIELD_COUNT: usize = 12;

fn line_error(line_no: usize, msg: impl std::fmt::Display) -> DomainError {
    DomainError::parse(format!("spells.csv line {line_no}: {msg}"))
}

/// Replaces line breaks with the `\n` marker.
fn escape_description(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

/// Restores line breaks from the `\n` marker. Unknown escapes are kept as-is.
fn unescape_description(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn decode_spell(line_no: usize, line: &str) -> Result<SpellRecord, DomainError> {
    let cols: Vec<&str> = line.splitn(FIELD_COUNT, FIELD_SEPARATOR).collect();
    let [name, source, level, school, casting_time, range, components, duration, concentration, ritual, prepared, description] =
        cols.as_slice()
    else {
        return Err(line_error(
            line_no,
            format!("expected {FIELD_COUNT} fields, found {}", cols.len()),
        ));
    };

    if name.is_empty() {
        return Err(line_error(line_no, "missing spell name"));
    }
    let (book, page) = source
        .split_once(COMPOUND_SEPARATOR)
        .ok_or_else(|| line_error(line_no, format!("source '{source}' must be book:page")))?;
    let page = page
        .trim()
        .parse::<u32>()
        .map_err(|_| line_error(line_no, format!("page '{page}' is not numeric")))?;
    let level = level
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|l| *l <= MAX_SPELL_LEVEL)
        .ok_or_else(|| line_error(line_no, format!("level '{level}' must be 0..={MAX_SPELL_LEVEL}")))?;
    let range = range
        .trim()
        .parse::<i32>()
        .map_err(|_| line_error(line_no, format!("range '{range}' is not numeric")))?;
    let components =
        SpellComponents::parse_markers(components).map_err(|e| line_error(line_no, e))?;
    let read_flag = |label: &str, raw: &str| {
        parse_flag(raw).ok_or_else(|| line_error(line_no, format!("{label} flag '{raw}' is not 0 or 1")))
    };

    Ok(SpellRecord {
        name: name.to_string(),
        book: book.to_string(),
        page,
        level,
        school: school.to_string(),
        casting_time: casting_time.to_string(),
        range,
        components,
        duration: duration.to_string(),
        concentration: read_flag("concentration", *concentration)?,
        ritual: read_flag("ritual", *ritual)?,
        prepared: read_flag("prepared", *prepared)?,
        description: unescape_description(description),
    })
}

/// Decodes the spell file. Blank lines are skipped.
pub fn decode_spells(content: &str) -> Result<SpellBook, DomainError> {
    let spells = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| decode_spell(i + 1, line))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SpellBook::from_spells(spells))
}

fn ensure_single_field(label: &str, value: &str) -> Result<(), DomainError> {
    if value.contains([FIELD_SEPARATOR, '\n', '\r']) {
        return Err(DomainError::validation(format!(
            "{label} '{value}' cannot contain ',' or line breaks"
        )));
    }
    Ok(())
}

/// Encodes one spell line (without the newline).
pub fn encode_spell(spell: &SpellRecord) -> Result<String, DomainError> {
    spell.validate()?;
    ensure_plain_field("Book", &spell.book)?;
    ensure_single_field("School", &spell.school)?;
    ensure_single_field("Casting time", &spell.casting_time)?;
    ensure_single_field("Duration", &spell.duration)?;

    let fields = [
        spell.name.clone(),
        format!("{}{COMPOUND_SEPARATOR}{}", spell.book, spell.page),
        spell.level.to_string(),
        spell.school.clone(),
        spell.casting_time.clone(),
        spell.range.to_string(),
        spell.components.markers(),
        spell.duration.clone(),
        flag(spell.concentration).to_string(),
        flag(spell.ritual).to_string(),
        flag(spell.prepared).to_string(),
        escape_description(&spell.description),
    ];
    Ok(fields.join(","))
}

/// Encodes the whole spell book, one newline-terminated line per spell.
pub fn encode_spells(book: &SpellBook) -> Result<String, DomainError> {
    let mut out = String::new();
    for spell in book.spells() {
        out.push_str(&encode_spell(spell)?);
        out.push('\n');
    }
    Ok(out)
}
