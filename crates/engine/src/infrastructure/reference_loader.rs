//! Loads the read-only reference tables from `databases/`.

use std::path::Path;

use charsheet_domain::{
    parse_class_table, parse_race_table, ReferenceData, SpellSlotTable, CLASS_FILE, RACE_FILE,
    SPELL_SLOTS_FILE,
};

use super::config::DataPaths;
use super::error::StoreError;
use super::ports::FileStoragePort;

/// Reads a reference file, or `None` when it is missing.
fn read_table(storage: &dyn FileStoragePort, path: &Path) -> Result<Option<String>, StoreError> {
    if !storage.exists(path) {
        tracing::warn!(path = %path.display(), "Reference table missing, using an empty table");
        return Ok(None);
    }
    storage
        .read_to_string(path)
        .map(Some)
        .map_err(|e| StoreError::io(path, e))
}

/// Loads all three tables once. A missing file yields an empty table; a
/// malformed row fails the whole load.
pub fn load_reference_data(
    storage: &dyn FileStoragePort,
    paths: &DataPaths,
) -> Result<ReferenceData, StoreError> {
    let classes = match read_table(storage, &paths.reference_file(CLASS_FILE))? {
        Some(content) => parse_class_table(&content)?,
        None => Vec::new(),
    };
    let races = match read_table(storage, &paths.reference_file(RACE_FILE))? {
        Some(content) => parse_race_table(&content)?,
        None => Vec::new(),
    };
    let spell_slots = match read_table(storage, &paths.reference_file(SPELL_SLOTS_FILE))? {
        Some(content) => SpellSlotTable::parse(&content)?,
        None => SpellSlotTable::default(),
    };

    tracing::debug!(
        classes = classes.len(),
        races = races.len(),
        slot_rows = spell_slots.len(),
        "Loaded reference data"
    );
    Ok(ReferenceData::new(classes, races, spell_slots))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::file_storage::LocalFileStorage;
    use crate::infrastructure::ports::MockFileStoragePort;

    #[test]
    fn loads_tables_and_tolerates_missing_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = DataPaths::new(dir.path());
        std::fs::create_dir_all(paths.databases_dir()).unwrap();
        std::fs::write(
            paths.reference_file(SPELL_SLOTS_FILE),
            "class,level,1,2,3,4,5,6,7,8,9\nWizard,3,4,2,0,0,0,0,0,0,0\n",
        )
        .unwrap();

        let data = load_reference_data(&LocalFileStorage::new(), &paths).unwrap();
        assert_eq!(data.slot_totals("wizard", 3), [4, 2, 0, 0, 0, 0, 0, 0, 0]);
        assert!(data.class("Wizard").is_none());
        assert!(data.races().is_empty());
    }

    #[test]
    fn malformed_row_is_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = DataPaths::new(dir.path());
        std::fs::create_dir_all(paths.databases_dir()).unwrap();
        std::fs::write(
            paths.reference_file(CLASS_FILE),
            "Class\tHitDie\tSavingThrows\tSkillChoices\tEquipmentProficiencies\tStartingEquipment\nWizard\td6\tINT,LUCK\t\t\t\n",
        )
        .unwrap();

        let err = load_reference_data(&LocalFileStorage::new(), &paths).unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
        assert!(err.to_string().contains(CLASS_FILE));
    }

    #[test]
    fn unreadable_file_is_io_error() {
        let mut storage = MockFileStoragePort::new();
        storage.expect_exists().returning(|_| true);
        storage
            .expect_read_to_string()
            .returning(|_| Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")));

        let err = load_reference_data(&storage, &DataPaths::new("data")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
