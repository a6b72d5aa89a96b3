//! Game system implementations.
//!
//! Rules are expressed through [`CalculationEngine`]; D&D 5th Edition
//! (`dnd5e`) is the system character files are written for.

mod dnd5e;
mod traits;

pub use dnd5e::{compute_derived, DerivedStats, Dnd5eSystem, ExperienceBounds};
pub use traits::CalculationEngine;
