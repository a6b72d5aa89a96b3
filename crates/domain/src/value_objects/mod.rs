//! Value objects - small validated types with no identity of their own.

mod ability;
mod coins;
mod names;
mod skill;

pub use ability::{Ability, AbilityScores, MAX_CREATION_SCORE, MIN_CREATION_SCORE};
pub use coins::Coins;
pub use names::CharacterName;
pub use skill::Skill;
