//! Inventory - the items a character carries
//!
//! Each line of `inventory.csv` is one [`InventoryItem`]. The [`Inventory`]
//! aggregate owns the equip/attune rules so an inconsistent state is refused
//! before anything is written:
//!
//! - an attuned item is always equipped
//! - at most [`MAX_ATTUNED_ITEMS`] items are attuned at once

use serde::{Deserialize, Serialize};

use super::character::MAX_ATTUNED_ITEMS;
use crate::error::DomainError;

/// One stack of items in the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    /// How many of this item the character has (at least 1)
    pub quantity: u32,
    /// Whether the item is currently equipped/held
    pub equipped: bool,
    /// Whether the character is attuned to the item; implies `equipped`
    pub attuned: bool,
}

impl InventoryItem {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
            equipped: false,
            attuned: false,
        }
    }
}

/// What an equip toggle did, so callers can sync the character record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipChange {
    Equipped,
    Unequipped,
    /// The item was attuned; unequipping also ended the attunement
    UnequippedAndUnattuned,
}

/// All items carried by one character, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps decoded items. Load does not re-check the rules; every mutation
    /// below does.
    pub fn from_items(items: Vec<InventoryItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn get(&self, name: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|i| i.name == name)
    }

    pub fn attuned_count(&self) -> usize {
        self.items.iter().filter(|i| i.attuned).count()
    }

    pub fn attuned_names(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|i| i.attuned)
            .map(|i| i.name.clone())
            .collect()
    }

    fn find_mut(&mut self, name: &str) -> Result<&mut InventoryItem, DomainError> {
        self.items
            .iter_mut()
            .find(|i| i.name == name)
            .ok_or_else(|| DomainError::not_found("Inventory item", name))
    }

    /// Adds `quantity` of an item, merging into an existing stack by name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for an empty name or zero quantity.
    pub fn add_item(&mut self, name: &str, quantity: u32) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("Item name cannot be empty"));
        }
        if quantity == 0 {
            return Err(DomainError::validation("Item quantity must be at least 1"));
        }
        match self.items.iter_mut().find(|i| i.name == name) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
            None => self.items.push(InventoryItem::new(name, quantity)),
        }
        Ok(())
    }

    /// Removes `quantity` of an item; the stack disappears when depleted.
    ///
    /// Returns the removed stack when it was depleted so callers can drop a
    /// matching attunement.
    pub fn remove_item(
        &mut self,
        name: &str,
        quantity: u32,
    ) -> Result<Option<InventoryItem>, DomainError> {
        let item = self.find_mut(name)?;
        if quantity < item.quantity {
            item.quantity -= quantity;
            return Ok(None);
        }
        let index = self
            .items
            .iter()
            .position(|i| i.name == name)
            .ok_or_else(|| DomainError::not_found("Inventory item", name))?;
        Ok(Some(self.items.remove(index)))
    }

    /// Equip toggle as driven by the sheet's equip button.
    ///
    /// An unequipped item becomes equipped. An equipped item becomes
    /// unequipped, and if it was attuned the attunement ends in the same
    /// step.
    pub fn equip_item(&mut self, name: &str) -> Result<EquipChange, DomainError> {
        let item = self.find_mut(name)?;
        if !item.equipped {
            item.equipped = true;
            return Ok(EquipChange::Equipped);
        }
        item.equipped = false;
        if item.attuned {
            item.attuned = false;
            Ok(EquipChange::UnequippedAndUnattuned)
        } else {
            Ok(EquipChange::Unequipped)
        }
    }

    /// Sets the equipped flag directly.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PolicyViolation` when unequipping an attuned
    /// item; end the attunement first or use [`Inventory::equip_item`].
    pub fn set_equipped(&mut self, name: &str, equipped: bool) -> Result<(), DomainError> {
        let item = self.find_mut(name)?;
        if !equipped && item.attuned {
            return Err(DomainError::policy(format!(
                "cannot unequip '{name}' while attuned"
            )));
        }
        item.equipped = equipped;
        Ok(())
    }

    /// Attunes an equipped item. Attuning an already attuned item is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PolicyViolation` when the item is not equipped
    /// or three items are already attuned; no item changes in either case.
    pub fn attune_item(&mut self, name: &str) -> Result<(), DomainError> {
        let attuned = self.attuned_count();
        let item = self.find_mut(name)?;
        if item.attuned {
            return Ok(());
        }
        if !item.equipped {
            return Err(DomainError::policy(format!(
                "cannot attune '{name}': equip it first"
            )));
        }
        if attuned >= MAX_ATTUNED_ITEMS {
            return Err(DomainError::policy(format!(
                "cannot attune '{name}': already attuned to {MAX_ATTUNED_ITEMS} items"
            )));
        }
        item.attuned = true;
        Ok(())
    }

    /// Ends an attunement; the item stays equipped.
    pub fn unattune_item(&mut self, name: &str) -> Result<(), DomainError> {
        self.find_mut(name)?.attuned = false;
        Ok(())
    }
}
