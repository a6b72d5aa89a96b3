//! Character sheet domain: records, file codecs, and 5e rule arithmetic.
//!
//! Nothing in this crate touches the filesystem. The engine crate reads the
//! files and hands their contents to the `decode_*` functions here.

pub mod codec;
pub mod common;
pub mod creation;
pub mod entities;
pub mod error;
pub mod game_systems;
pub mod reference;
pub mod value_objects;

pub use codec::{
    decode_character, decode_inventory, decode_slots, decode_spells, encode_character,
    encode_inventory, encode_item, encode_slots, encode_spell, encode_spells,
};

pub use creation::{CharacterDraft, NewCharacter};

pub use entities::{
    CharacterRecord, EquipChange, Inventory, InventoryItem, NoteSection, NotesDocument,
    SlotTotals, SpellBook, SpellComponents, SpellRecord, SpellSlotState, MAX_ATTUNED_ITEMS,
    MAX_LEVEL, MAX_SPELL_LEVEL, SLOT_LEVELS,
};

pub use error::DomainError;

pub use game_systems::{
    compute_derived, CalculationEngine, DerivedStats, Dnd5eSystem, ExperienceBounds,
};

pub use reference::{
    parse_class_table, parse_race_table, ClassInfo, RaceInfo, ReferenceData, SpellSlotTable,
    CLASS_FILE, RACE_FILE, SPELL_SLOTS_FILE,
};

pub use value_objects::{Ability, AbilityScores, CharacterName, Coins, Skill};
