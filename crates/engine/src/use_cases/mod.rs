//! Use cases - User story orchestration.
//!
//! Each module covers one area of the sheet. Use cases take the character
//! name as the UI passes it, load what they need, and write back in full.

pub mod inventory;
pub mod notes;
pub mod roster;
pub mod sheet;
pub mod slots;
pub mod spells;

pub use inventory::InventoryOps;
pub use notes::NotesOps;
pub use roster::{CharacterSheet, Roster};
pub use sheet::{ExperienceGain, SheetOps};
pub use slots::SlotOps;
pub use spells::SpellOps;
