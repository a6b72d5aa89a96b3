//! Line-oriented codecs for the files in a character folder.
//!
//! Fields are separated by `,` and compound sub-fields by `:`. Every decoder
//! returns a typed `DomainError::Parse` on malformed input instead of
//! indexing past the end of a split.

mod character;
mod inventory;
mod slots;
mod spell;

pub use character::{decode_character, encode_character};
pub use inventory::{decode_inventory, encode_inventory, encode_item};
pub use slots::{decode_slots, encode_slots};
pub use spell::{decode_spells, encode_spell, encode_spells};
