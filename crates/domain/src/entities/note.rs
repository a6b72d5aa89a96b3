//! Notes - free-form text kept per named section.
//!
//! Serialized as `{"notes":[{"section":..,"notes":..,"lastUpdated":..}]}`.
//! Section names are unique; array order is the display order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::common::parse_datetime;
use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSection {
    pub section: String,
    pub notes: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub last_updated: DateTime<Utc>,
}

/// Accepts RFC 3339 and the legacy `YYYY-MM-DD HH:MM:SS` stamps.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_datetime(&raw).map_err(serde::de::Error::custom)
}

/// The whole notes store of one character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesDocument {
    #[serde(default)]
    pub notes: Vec<NoteSection>,
}

impl NotesDocument {
    /// Section names in display order.
    pub fn sections(&self) -> Vec<String> {
        self.notes.iter().map(|n| n.section.clone()).collect()
    }

    pub fn find(&self, section: &str) -> Option<&NoteSection> {
        self.notes.iter().find(|n| n.section == section)
    }

    /// Text of a section.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` for an unknown section.
    pub fn text(&self, section: &str) -> Result<&str, DomainError> {
        self.find(section)
            .map(|n| n.notes.as_str())
            .ok_or_else(|| DomainError::not_found("Note section", section))
    }

    /// Overwrites an existing section in place, or appends a new one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for a blank section name.
    pub fn upsert(
        &mut self,
        section: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if section.trim().is_empty() {
            return Err(DomainError::validation("Note section name cannot be empty"));
        }
        match self.notes.iter_mut().find(|n| n.section == section) {
            Some(existing) => {
                existing.notes = text.to_string();
                existing.last_updated = now;
            }
            None => self.notes.push(NoteSection {
                section: section.to_string(),
                notes: text.to_string(),
                last_updated: now,
            }),
        }
        Ok(())
    }

    /// Removes a section; returns whether it existed.
    pub fn delete(&mut self, section: &str) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.section != section);
        before != self.notes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_upsert_overwrites_in_place() {
        let mut doc = NotesDocument::default();
        doc.upsert("Backstory", "X", at(9)).unwrap();
        doc.upsert("Allies", "Guild", at(9)).unwrap();
        doc.upsert("Backstory", "Y", at(10)).unwrap();

        assert_eq!(doc.text("Backstory").unwrap(), "Y");
        assert_eq!(doc.sections(), vec!["Backstory", "Allies"]);
        assert_eq!(doc.find("Backstory").unwrap().last_updated, at(10));
    }

    #[test]
    fn test_blank_section_rejected() {
        let mut doc = NotesDocument::default();
        assert!(doc.upsert("  ", "text", at(9)).is_err());
    }

    #[test]
    fn test_delete() {
        let mut doc = NotesDocument::default();
        doc.upsert("Backstory", "X", at(9)).unwrap();
        assert!(doc.delete("Backstory"));
        assert!(!doc.delete("Backstory"));
        assert!(matches!(
            doc.text("Backstory"),
            Err(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn test_json_shape() {
        let mut doc = NotesDocument::default();
        doc.upsert("Backstory", "Born in Waterdeep", at(10)).unwrap();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["notes"][0]["section"], "Backstory");
        assert_eq!(json["notes"][0]["notes"], "Born in Waterdeep");
        assert_eq!(json["notes"][0]["lastUpdated"], "2024-01-15T10:00:00Z");
    }

    #[test]
    fn test_reads_legacy_timestamps() {
        let json = r#"{"notes":[{"section":"Quest","notes":"Find the orb","lastUpdated":"2024-01-15 10:00:00.000000"}]}"#;
        let doc: NotesDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.find("Quest").unwrap().last_updated, at(10));
    }

    #[test]
    fn test_missing_notes_key_is_empty() {
        let doc: NotesDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.notes.is_empty());
    }
}
