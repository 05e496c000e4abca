//! # Combat Modifiers Module
//!
//! Positional combat math layered on top of targeting: classifying which
//! arc an attack comes from, turning that arc into hit, evasion, and damage
//! multipliers, and detecting terrain cover between attacker and defender.

pub mod cover;
pub mod direction;

pub use cover::{cover_bonus, detect_cover, CoverBonus, CoverStrength};
pub use direction::{
    classify_attack_direction, evasion_after_hit_check, AttackDirection, DirectionAssessment,
    DirectionContribution, DirectionFactors, DirectionModifierConfig,
};
