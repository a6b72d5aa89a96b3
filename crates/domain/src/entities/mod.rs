//! Entities stored in a character folder.

mod character;
mod inventory;
mod note;
mod spell;
mod spell_slots;

pub use character::{CharacterRecord, MAX_ATTUNED_ITEMS, MAX_LEVEL};
pub use inventory::{EquipChange, Inventory, InventoryItem};
pub use note::{NoteSection, NotesDocument};
pub use spell::{SpellBook, SpellComponents, SpellRecord, MAX_SPELL_LEVEL};
pub use spell_slots::{SlotTotals, SpellSlotState, SLOT_LEVELS};

#[cfg(test)]
pub(crate) use spell::tests::magic_missile;
