//! `inventory.csv` persistence.

use charsheet_domain::{decode_inventory, encode_inventory, CharacterName, Inventory};

use super::CharacterFiles;
use crate::infrastructure::error::StoreError;

#[derive(Clone)]
pub struct InventoryRepo {
    files: CharacterFiles,
}

impl InventoryRepo {
    pub(crate) fn from_files(files: CharacterFiles) -> Self {
        Self { files }
    }

    /// Loads the inventory; a missing file is an empty inventory.
    pub fn load(&self, name: &CharacterName) -> Result<Inventory, StoreError> {
        self.files.ensure_character(name)?;
        let path = self.files.paths().inventory_file(name);
        let inventory = match self.files.read_optional(&path)? {
            Some(content) => decode_inventory(&content)?,
            None => Inventory::new(),
        };
        tracing::debug!(
            character = %name,
            path = %path.display(),
            items = inventory.items().len(),
            "Loaded inventory"
        );
        Ok(inventory)
    }

    pub fn save(&self, name: &CharacterName, inventory: &Inventory) -> Result<(), StoreError> {
        self.files.ensure_character(name)?;
        let content = encode_inventory(inventory)?;
        let path = self.files.paths().inventory_file(name);
        self.files.write(&path, &content)?;
        tracing::debug!(character = %name, path = %path.display(), "Saved inventory");
        Ok(())
    }
}
