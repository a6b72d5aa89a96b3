//! The six ability scores.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Lowest score allowed when a character is created.
pub const MIN_CREATION_SCORE: i32 = 3;

/// Highest score allowed when a character is created.
pub const MAX_CREATION_SCORE: i32 = 18;

/// One of the six abilities, in sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// All abilities in the order they are stored on disk.
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    /// Position of this ability in [`Ability::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for Ability {
    type Err = DomainError;

    /// Accepts the 3-letter abbreviation or the full name, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "str" | "strength" => Ok(Self::Strength),
            "dex" | "dexterity" => Ok(Self::Dexterity),
            "con" | "constitution" => Ok(Self::Constitution),
            "int" | "intelligence" => Ok(Self::Intelligence),
            "wis" | "wisdom" => Ok(Self::Wisdom),
            "cha" | "charisma" => Ok(Self::Charisma),
            other => Err(DomainError::parse(format!("Unknown ability: {other}"))),
        }
    }
}

/// Ability scores in Str, Dex, Con, Int, Wis, Cha order.
///
/// Scores are unbounded once a character exists (feats and items raise them);
/// [`AbilityScores::for_creation`] applies the 3..=18 creation range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores([i32; 6]);

impl AbilityScores {
    pub fn new(scores: [i32; 6]) -> Self {
        Self(scores)
    }

    /// Scores rolled or bought during character creation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if any score is outside 3..=18.
    pub fn for_creation(scores: [i32; 6]) -> Result<Self, DomainError> {
        for (ability, score) in Ability::ALL.iter().zip(scores) {
            if !(MIN_CREATION_SCORE..=MAX_CREATION_SCORE).contains(&score) {
                return Err(DomainError::validation(format!(
                    "{ability} score {score} must be between {MIN_CREATION_SCORE} and {MAX_CREATION_SCORE} at creation"
                )));
            }
        }
        Ok(Self(scores))
    }

    pub fn get(&self, ability: Ability) -> i32 {
        self.0[ability.index()]
    }

    pub fn set(&mut self, ability: Ability, score: i32) {
        self.0[ability.index()] = score;
    }

    /// Adds a (possibly negative) bonus to one score, saturating at the
    /// `i32` bounds.
    pub fn raise(&mut self, ability: Ability, bonus: i32) {
        let score = &mut self.0[ability.index()];
        *score = score.saturating_add(bonus);
    }

    pub fn as_array(&self) -> [i32; 6] {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ability, i32)> + '_ {
        Ability::ALL.iter().copied().zip(self.0.iter().copied())
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self([10; 6])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ability_order_matches_storage() {
        let scores = AbilityScores::new([16, 14, 13, 12, 10, 8]);
        assert_eq!(scores.get(Ability::Strength), 16);
        assert_eq!(scores.get(Ability::Dexterity), 14);
        assert_eq!(scores.get(Ability::Charisma), 8);
    }

    #[test]
    fn test_creation_range() {
        assert!(AbilityScores::for_creation([3, 18, 10, 10, 10, 10]).is_ok());
        let err = AbilityScores::for_creation([2, 10, 10, 10, 10, 10]).unwrap_err();
        assert!(err.to_string().contains("STR"));
        assert!(AbilityScores::for_creation([10, 10, 10, 10, 10, 19]).is_err());
    }

    #[test]
    fn test_scores_unbounded_after_creation() {
        let mut scores = AbilityScores::for_creation([18, 10, 10, 10, 10, 10]).unwrap();
        scores.raise(Ability::Strength, 2);
        assert_eq!(scores.get(Ability::Strength), 20);
    }

    #[test]
    fn test_parse_ability() {
        assert_eq!("DEX".parse::<Ability>().unwrap(), Ability::Dexterity);
        assert_eq!("wisdom".parse::<Ability>().unwrap(), Ability::Wisdom);
        assert!("luck".parse::<Ability>().is_err());
    }

    #[test]
    fn test_raise_saturates() {
        let mut scores = AbilityScores::new([i32::MAX, 10, 10, 10, 10, i32::MIN]);
        scores.raise(Ability::Strength, 2);
        scores.raise(Ability::Charisma, -1);
        scores.raise(Ability::Dexterity, 2);
        assert_eq!(scores.get(Ability::Strength), i32::MAX);
        assert_eq!(scores.get(Ability::Charisma), i32::MIN);
        assert_eq!(scores.get(Ability::Dexterity), 12);
    }
}
