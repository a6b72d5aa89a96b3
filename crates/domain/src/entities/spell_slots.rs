//! Spell slot bookkeeping.
//!
//! Totals come from the class/level reference table; only the used counts
//! are persisted. `used[n] <= total[n]` holds after every operation.

use serde::{Deserialize, Serialize};

use super::spell::MAX_SPELL_LEVEL;

/// Number of slot tiers (spell levels 1..=9).
pub const SLOT_LEVELS: usize = MAX_SPELL_LEVEL as usize;

/// Slot totals for spell levels 1..=9, index 0 being level 1.
pub type SlotTotals = [u8; SLOT_LEVELS];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SlotCounts")]
pub struct SpellSlotState {
    used: SlotTotals,
    total: SlotTotals,
}

/// Serialized shape; deserializing clamps through [`SpellSlotState::with_used`].
#[derive(Deserialize)]
struct SlotCounts {
    used: SlotTotals,
    total: SlotTotals,
}

impl From<SlotCounts> for SpellSlotState {
    fn from(counts: SlotCounts) -> Self {
        Self::with_used(counts.total, counts.used).0
    }
}

/// Maps a spell level to an array index, rejecting cantrips and levels > 9.
fn slot_index(spell_level: u8) -> Option<usize> {
    match spell_level {
        1..=MAX_SPELL_LEVEL => Some(usize::from(spell_level) - 1),
        _ => None,
    }
}

impl SpellSlotState {
    /// Fresh state with nothing spent.
    pub fn new(total: SlotTotals) -> Self {
        Self {
            used: [0; SLOT_LEVELS],
            total,
        }
    }

    /// Rebuilds state from persisted used counts.
    ///
    /// Counts above the total (e.g. after the class table changed) are
    /// clamped; the second value reports whether any clamping happened.
    pub fn with_used(total: SlotTotals, used: SlotTotals) -> (Self, bool) {
        let mut clamped = false;
        let mut bounded = used;
        for (u, t) in bounded.iter_mut().zip(total) {
            if *u > t {
                *u = t;
                clamped = true;
            }
        }
        (
            Self {
                used: bounded,
                total,
            },
            clamped,
        )
    }

    pub fn used_counts(&self) -> SlotTotals {
        self.used
    }

    pub fn totals(&self) -> SlotTotals {
        self.total
    }

    pub fn used(&self, spell_level: u8) -> u8 {
        slot_index(spell_level).map_or(0, |i| self.used[i])
    }

    pub fn total(&self, spell_level: u8) -> u8 {
        slot_index(spell_level).map_or(0, |i| self.total[i])
    }

    pub fn remaining(&self, spell_level: u8) -> u8 {
        self.total(spell_level).saturating_sub(self.used(spell_level))
    }

    /// Spends one slot of `spell_level`.
    ///
    /// Returns `false` and changes nothing when no slot is left or the level
    /// is not 1..=9. Casting never borrows from a higher tier.
    pub fn cast(&mut self, spell_level: u8) -> bool {
        let Some(i) = slot_index(spell_level) else {
            return false;
        };
        if self.used[i] >= self.total[i] {
            return false;
        }
        self.used[i] += 1;
        true
    }

    /// Gives back one spent slot (undo of a mistaken cast).
    pub fn restore(&mut self, spell_level: u8) -> bool {
        let Some(i) = slot_index(spell_level) else {
            return false;
        };
        if self.used[i] == 0 {
            return false;
        }
        self.used[i] -= 1;
        true
    }

    /// Recovers every slot.
    pub fn long_rest(&mut self) {
        self.used = [0; SLOT_LEVELS];
    }
}
