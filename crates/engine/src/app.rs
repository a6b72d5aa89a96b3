//! Application state and composition.

use std::sync::Arc;

use charsheet_domain::ReferenceData;

use crate::infrastructure::{
    config::DataPaths,
    error::StoreError,
    persistence::{CharacterFiles, CharacterRepo, InventoryRepo, NotesRepo, SlotRepo, SpellRepo},
    ports::{ClockPort, FileStoragePort},
    reference_loader::load_reference_data,
};
use crate::use_cases::{InventoryOps, NotesOps, Roster, SheetOps, SlotOps, SpellOps};

/// Main application state.
///
/// Holds the repositories, the shared reference tables, and the use cases
/// built on top of them.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub reference: Arc<ReferenceData>,
}

/// Container for all repositories.
pub struct Repositories {
    pub character: Arc<CharacterRepo>,
    pub inventory: Arc<InventoryRepo>,
    pub spells: Arc<SpellRepo>,
    pub slots: Arc<SlotRepo>,
    pub notes: Arc<NotesRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub roster: Arc<Roster>,
    pub sheet: Arc<SheetOps>,
    pub inventory: Arc<InventoryOps>,
    pub spells: Arc<SpellOps>,
    pub slots: Arc<SlotOps>,
    pub notes: Arc<NotesOps>,
}

impl App {
    /// Loads the reference tables from `databases/` and wires everything.
    pub fn new(
        storage: Arc<dyn FileStoragePort>,
        clock: Arc<dyn ClockPort>,
        paths: DataPaths,
    ) -> Result<Self, StoreError> {
        let reference = load_reference_data(storage.as_ref(), &paths)?;
        Ok(Self::with_reference(storage, clock, paths, reference))
    }

    /// Wires the app around reference tables that are already loaded.
    pub fn with_reference(
        storage: Arc<dyn FileStoragePort>,
        clock: Arc<dyn ClockPort>,
        paths: DataPaths,
        reference: ReferenceData,
    ) -> Self {
        let files = CharacterFiles::new(storage, paths);
        let reference = Arc::new(reference);

        let repositories = Repositories {
            character: Arc::new(CharacterRepo::from_files(files.clone())),
            inventory: Arc::new(InventoryRepo::from_files(files.clone())),
            spells: Arc::new(SpellRepo::from_files(files.clone())),
            slots: Arc::new(SlotRepo::from_files(files.clone())),
            notes: Arc::new(NotesRepo::from_files(files)),
        };

        let use_cases = UseCases {
            roster: Arc::new(Roster::new(
                repositories.character.clone(),
                repositories.inventory.clone(),
                repositories.spells.clone(),
                repositories.slots.clone(),
                repositories.notes.clone(),
                reference.clone(),
            )),
            sheet: Arc::new(SheetOps::new(
                repositories.character.clone(),
                reference.clone(),
            )),
            inventory: Arc::new(InventoryOps::new(
                repositories.character.clone(),
                repositories.inventory.clone(),
            )),
            spells: Arc::new(SpellOps::new(
                repositories.character.clone(),
                repositories.spells.clone(),
            )),
            slots: Arc::new(SlotOps::new(
                repositories.character.clone(),
                repositories.slots.clone(),
                reference.clone(),
            )),
            notes: Arc::new(NotesOps::new(repositories.notes.clone(), clock)),
        };

        Self {
            repositories,
            use_cases,
            reference,
        }
    }
}
