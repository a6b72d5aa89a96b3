//! Core calculation trait for game systems.

/// Rule arithmetic the sheet derives its numbers from.
///
/// Kept as a trait so the derived-stat computation does not hard-code a
/// single rules edition.
pub trait CalculationEngine {
    /// Modifier for an ability score.
    fn ability_modifier(&self, score: i32) -> i32;

    /// Proficiency bonus at a character level.
    fn proficiency_bonus(&self, level: u8) -> i32;

    /// Armor class with no armor equipped.
    fn unarmored_ac(&self, dex_modifier: i32) -> i32;

    /// Experience needed to reach `level`.
    fn xp_for_level(&self, level: u8) -> u32;

    /// Level reached with `xp` experience.
    fn level_for_xp(&self, xp: u32) -> u8;
}
