//! Shared fixtures for use case tests: a temp data root with a small set of
//! reference tables and a fixed clock.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use charsheet_domain::{
    parse_class_table, parse_race_table, CharacterDraft, ReferenceData, Skill, SpellComponents,
    SpellRecord, SpellSlotTable,
};
use tempfile::TempDir;

use crate::app::App;
use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::config::DataPaths;
use crate::infrastructure::file_storage::LocalFileStorage;

const CLASSES: &str = "Class\tHitDie\tSavingThrows\tSkillChoices\tEquipmentProficiencies\tStartingEquipment\n\
Wizard\td6\tINT,WIS\tArcana,History,Insight,Investigation\tDaggers,Quarterstaffs\tQuarterstaff,Dagger:2,Spellbook\n\
Fighter\td10\tSTR,CON\tAthletics,Perception\tAll armor,Shields\tLongsword,Shield\n";

const RACES: &str = "Race\tSubrace\tAbilityBonuses\tSpeed\tLanguages\n\
Elf\tHigh Elf\tDEX:2,INT:1\t30\tCommon,Elvish\n\
Human\t\tSTR:1,DEX:1,CON:1,INT:1,WIS:1,CHA:1\t30\tCommon\n";

const SLOTS: &str = "class,level,1,2,3,4,5,6,7,8,9\n\
Wizard,1,2,0,0,0,0,0,0,0,0\n\
Wizard,2,3,0,0,0,0,0,0,0,0\n\
Wizard,3,4,2,0,0,0,0,0,0,0\n";

pub(crate) fn reference_data() -> ReferenceData {
    ReferenceData::new(
        parse_class_table(CLASSES).expect("classes"),
        parse_race_table(RACES).expect("races"),
        SpellSlotTable::parse(SLOTS).expect("slots"),
    )
}

/// An app over a temp directory. The directory lives as long as the value.
pub(crate) struct TestApp {
    pub dir: TempDir,
    pub app: App,
    pub now: DateTime<Utc>,
}

impl TestApp {
    pub(crate) fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let now = Utc
            .with_ymd_and_hms(2024, 1, 15, 10, 30, 0)
            .single()
            .expect("valid timestamp");
        let app = App::with_reference(
            Arc::new(LocalFileStorage::new()),
            Arc::new(FixedClock(now)),
            DataPaths::new(dir.path()),
            reference_data(),
        );
        Self { dir, app, now }
    }
}

/// A High Elf wizard: 8 HP, Int 16 after racial bonuses.
pub(crate) fn wizard_draft(name: &str) -> CharacterDraft {
    CharacterDraft {
        name: name.to_string(),
        class: "Wizard".to_string(),
        subclass: String::new(),
        race: "High Elf".to_string(),
        abilities: [8, 12, 14, 15, 12, 10],
        proficiencies: vec![Skill::Arcana, Skill::History],
        extra_languages: vec!["Draconic".to_string()],
    }
}

pub(crate) fn magic_missile() -> SpellRecord {
    SpellRecord {
        name: "Magic Missile".to_string(),
        book: "PHB".to_string(),
        page: 257,
        level: 1,
        school: "Evocation".to_string(),
        casting_time: "1 action".to_string(),
        range: 120,
        components: SpellComponents::new(true, true, false),
        duration: "Instantaneous".to_string(),
        concentration: false,
        ritual: false,
        prepared: true,
        description: "You create three glowing darts of magical force.".to_string(),
    }
}
