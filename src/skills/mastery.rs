//! # Mastery Module
//!
//! Per-skill proficiency bonuses: effective range and AoE size grow once a
//! unit's mastery level for the skill crosses a configured threshold, and
//! damage can scale with the mastery level itself.

use crate::skills::{RangeSpec, SkillTargeting, StatusEffect};
use serde::{Deserialize, Serialize};

/// A range or area increase unlocked at a mastery level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryBonus {
    /// Mastery level at which the bonus applies
    pub required_level: u32,
    /// Tiles added once unlocked
    pub increase: u32,
}

impl MasteryBonus {
    /// The bonus tiles granted at the given mastery level.
    pub fn granted(&self, mastery_level: u32) -> u32 {
        if mastery_level >= self.required_level {
            self.increase
        } else {
            0
        }
    }
}

/// Per-mastery-level damage additions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MasteryDamage {
    /// Flat damage added per mastery level
    #[serde(default)]
    pub flat: f64,
    /// Percentage of base damage added per mastery level
    #[serde(default)]
    pub percent: f64,
}

/// Effective skill range for a user at the given mastery level.
///
/// Weapon-ranged skills substitute the equipped weapon's range and add the
/// additive bonuses carried by the user's statuses; fixed-range skills add
/// the mastery increase once unlocked.
pub fn effective_range(
    skill: &SkillTargeting,
    mastery_level: u32,
    weapon_range: Option<u32>,
    statuses: &[StatusEffect],
) -> u32 {
    match skill.range {
        RangeSpec::Fixed(base) => {
            let bonus = skill
                .range_mastery
                .map(|m| m.granted(mastery_level))
                .unwrap_or(0);
            base + bonus
        }
        RangeSpec::Weapon => {
            let base = weapon_range.unwrap_or(1) as i32;
            let bonus: i32 = statuses.iter().map(|s| s.weapon_range_bonus).sum();
            (base + bonus).max(0) as u32
        }
    }
}

/// Effective AoE size for a user at the given mastery level.
pub fn effective_area(skill: &SkillTargeting, mastery_level: u32) -> u32 {
    let bonus = skill
        .area_mastery
        .map(|m| m.granted(mastery_level))
        .unwrap_or(0);
    skill.area + bonus
}

/// Base damage plus the skill's mastery additions at the given level.
pub fn mastery_damage(base: f64, mastery_level: u32, spec: &MasteryDamage) -> f64 {
    if mastery_level == 0 {
        return base;
    }
    let level = mastery_level as f64;
    base + spec.flat * level + base * (spec.percent / 100.0) * level
}
