//! Inventory use cases.
//!
//! Every change is written to `inventory.csv`, and the record's attuned list
//! is rewritten from the inventory so the two files agree.

use std::sync::Arc;

use charsheet_domain::{
    encode_character, encode_inventory, CharacterName, DomainError, EquipChange, Inventory,
    InventoryItem,
};

use crate::infrastructure::error::StoreError;
use crate::infrastructure::persistence::{CharacterRepo, InventoryRepo};

pub struct InventoryOps {
    characters: Arc<CharacterRepo>,
    inventory: Arc<InventoryRepo>,
}

impl InventoryOps {
    pub fn new(characters: Arc<CharacterRepo>, inventory: Arc<InventoryRepo>) -> Self {
        Self {
            characters,
            inventory,
        }
    }

    pub fn list(&self, name: &str) -> Result<Inventory, StoreError> {
        self.inventory.load(&CharacterName::new(name)?)
    }

    pub fn add_item(&self, name: &str, item: &str, quantity: u32) -> Result<Inventory, StoreError> {
        self.update(name, |inventory| inventory.add_item(item, quantity))
            .map(|(inventory, ())| inventory)
    }

    /// Removes `quantity`; returns the depleted stack, if the item is gone.
    pub fn remove_item(
        &self,
        name: &str,
        item: &str,
        quantity: u32,
    ) -> Result<Option<InventoryItem>, StoreError> {
        self.update(name, |inventory| inventory.remove_item(item, quantity))
            .map(|(_, removed)| removed)
    }

    /// Equip toggle. Unequipping an attuned item also ends the attunement.
    pub fn toggle_equipped(&self, name: &str, item: &str) -> Result<EquipChange, StoreError> {
        let (_, change) = self.update(name, |inventory| inventory.equip_item(item))?;
        if change == EquipChange::UnequippedAndUnattuned {
            tracing::info!(character = name, item, "Unequipped item lost its attunement");
        }
        Ok(change)
    }

    /// Sets the equipped flag; refuses to unequip an attuned item.
    pub fn set_equipped(&self, name: &str, item: &str, equipped: bool) -> Result<(), StoreError> {
        self.update(name, |inventory| inventory.set_equipped(item, equipped))
            .map(|_| ())
    }

    /// Attunes an equipped item; a fourth attunement is refused.
    pub fn attune(&self, name: &str, item: &str) -> Result<(), StoreError> {
        self.update(name, |inventory| inventory.attune_item(item))
            .map(|_| ())
    }

    pub fn unattune(&self, name: &str, item: &str) -> Result<(), StoreError> {
        self.update(name, |inventory| inventory.unattune_item(item))
            .map(|_| ())
    }

    /// Loads, applies `change`, and on success saves the inventory and the
    /// record's attuned list. Both files are encoded before either is
    /// written, so a failed change or a rejected name writes nothing.
    fn update<T>(
        &self,
        name: &str,
        change: impl FnOnce(&mut Inventory) -> Result<T, DomainError>,
    ) -> Result<(Inventory, T), StoreError> {
        let name = CharacterName::new(name)?;
        let mut inventory = self.inventory.load(&name)?;
        let mut record = self.characters.load(&name)?;
        let outcome = change(&mut inventory)?;

        let attuned = inventory.attuned_names();
        let record_changed = record.attuned_items() != attuned.as_slice();
        if record_changed {
            record.restore_attuned_items(attuned);
            encode_character(&record)?;
        }
        encode_inventory(&inventory)?;

        self.inventory.save(&name, &inventory)?;
        if record_changed {
            self.characters.save(&record)?;
        }
        Ok((inventory, outcome))
    }
}
