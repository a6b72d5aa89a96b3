//! Coin purse value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Copper value of one coin of each denomination, highest first.
const PLATINUM_IN_COPPER: u64 = 1000;
const GOLD_IN_COPPER: u64 = 100;
const SILVER_IN_COPPER: u64 = 10;

/// Platinum, gold, silver, and copper held by a character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coins {
    pub platinum: u32,
    pub gold: u32,
    pub silver: u32,
    pub copper: u32,
}

impl Coins {
    pub fn new(platinum: u32, gold: u32, silver: u32, copper: u32) -> Self {
        Self {
            platinum,
            gold,
            silver,
            copper,
        }
    }

    /// Coins in on-disk order: platinum, gold, silver, copper.
    pub fn as_array(&self) -> [u32; 4] {
        [self.platinum, self.gold, self.silver, self.copper]
    }

    pub fn from_array(values: [u32; 4]) -> Self {
        Self::new(values[0], values[1], values[2], values[3])
    }

    /// Total value expressed in copper pieces.
    pub fn total_copper(&self) -> u64 {
        u64::from(self.platinum) * PLATINUM_IN_COPPER
            + u64::from(self.gold) * GOLD_IN_COPPER
            + u64::from(self.silver) * SILVER_IN_COPPER
            + u64::from(self.copper)
    }

    pub fn add(&mut self, other: Coins) {
        self.platinum = self.platinum.saturating_add(other.platinum);
        self.gold = self.gold.saturating_add(other.gold);
        self.silver = self.silver.saturating_add(other.silver);
        self.copper = self.copper.saturating_add(other.copper);
    }

    /// Pays `cost`, breaking larger coins into change when a denomination
    /// runs short.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PolicyViolation` and leaves the purse unchanged
    /// when the purse is worth less than the cost.
    pub fn spend(&mut self, cost: Coins) -> Result<(), DomainError> {
        if cost.total_copper() > self.total_copper() {
            return Err(DomainError::policy(format!(
                "cannot spend {cost}: purse only holds {self}"
            )));
        }

        // Lowest denomination first: (held, cost, value in copper).
        let mut held = [self.copper, self.silver, self.gold, self.platinum];
        let wanted = [cost.copper, cost.silver, cost.gold, cost.platinum];
        let values = [1, SILVER_IN_COPPER, GOLD_IN_COPPER, PLATINUM_IN_COPPER];

        let mut owed: u64 = 0;
        for i in 0..4 {
            let paid = held[i].min(wanted[i]);
            held[i] -= paid;
            owed += u64::from(wanted[i] - paid) * values[i];
        }

        for i in 0..4 {
            if owed == 0 {
                break;
            }
            let needed = owed.div_ceil(values[i]);
            let taken = needed.min(u64::from(held[i]));
            // taken <= held[i], which is a u32
            held[i] -= taken as u32;
            let value = taken * values[i];
            if value >= owed {
                let mut change = value - owed;
                owed = 0;
                for j in (0..i).rev() {
                    let coins = change / values[j];
                    held[j] = held[j].saturating_add(coins as u32);
                    change -= coins * values[j];
                }
            } else {
                owed -= value;
            }
        }

        *self = Coins::new(held[3], held[2], held[1], held[0]);
        Ok(())
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}pp {}gp {}sp {}cp",
            self.platinum, self.gold, self.silver, self.copper
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_copper() {
        assert_eq!(Coins::new(1, 2, 3, 4).total_copper(), 1234);
    }

    #[test]
    fn test_spend_exact_denominations() {
        let mut purse = Coins::new(0, 10, 5, 0);
        purse.spend(Coins::new(0, 3, 2, 0)).unwrap();
        assert_eq!(purse, Coins::new(0, 7, 3, 0));
    }

    #[test]
    fn test_spend_makes_change() {
        let mut purse = Coins::new(0, 1, 0, 0);
        purse.spend(Coins::new(0, 0, 0, 3)).unwrap();
        assert_eq!(purse, Coins::new(0, 0, 9, 7));
        assert_eq!(purse.total_copper(), 97);
    }

    #[test]
    fn test_spend_breaks_platinum() {
        let mut purse = Coins::new(1, 0, 0, 5);
        purse.spend(Coins::new(0, 2, 0, 0)).unwrap();
        assert_eq!(purse.total_copper(), 805);
        assert_eq!(purse, Coins::new(0, 8, 0, 5));
    }

    #[test]
    fn test_spend_insufficient_leaves_purse_unchanged() {
        let mut purse = Coins::new(0, 1, 0, 0);
        let err = purse.spend(Coins::new(0, 2, 0, 0)).unwrap_err();
        assert!(matches!(err, DomainError::PolicyViolation(_)));
        assert_eq!(purse, Coins::new(0, 1, 0, 0));
    }

    #[test]
    fn test_add() {
        let mut purse = Coins::new(1, 1, 1, 1);
        purse.add(Coins::new(0, 4, 0, 9));
        assert_eq!(purse, Coins::new(1, 5, 1, 10));
    }
}
