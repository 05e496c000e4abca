//! # Skirmish Targeting Engine
//!
//! Area-of-effect targeting for grid-based tactical combat.
//!
//! ## Architecture Overview
//!
//! Skirmish is an in-process library consumed by a surrounding turn engine.
//! The core pipeline runs in four stages:
//!
//! - **Shape evaluation**: pure integer predicates deciding which offsets
//!   belong to a named AoE shape, rotated by the acting unit's facing
//! - **Line of sight**: a wrap-aware Bresenham tracer filtered by terrain
//!   permeability and blocking occupant categories
//! - **Area construction**: an immutable snapshot of visible and blocked
//!   tiles, built once per aim and discarded on re-aim or cancel
//! - **Target selection**: an ordered, optionally limited FIFO queue of
//!   units inside the visible area, drained one target at a time
//!
//! Alongside the pipeline sits an independent directional-modifier module
//! (attack direction classification and cover detection) that feeds the
//! host engine's hit, evasion, and damage math.
//!
//! ## Integration
//!
//! All configuration is typed and validated at data-load time. The host
//! engine talks to the library through plain function calls against a
//! [`BattleMap`] snapshot; nothing here blocks, spawns, or retains state
//! across turns beyond the single active [`AreaSnapshot`].

pub mod aoe;
pub mod grid;
pub mod map;
pub mod modifiers;
pub mod skills;

pub use aoe::{
    build_area, has_line_of_sight, position_in_active_area, select_targets, units_in_shape,
    ActionSequencer, AreaShape, AreaSnapshot, BlockingRule, CombatResolver, DrainOutcome, LosRule,
    LosTable, NoExtension, QueuedTarget, ShapeExtension, ShapeSpec, TargetQueue,
};
pub use grid::{Direction, GridBounds, Position};
pub use map::{BattleMap, Occupant, OccupantCategory, Side, UnitId};
pub use modifiers::{
    classify_attack_direction, cover_bonus, detect_cover, evasion_after_hit_check,
    AttackDirection, CoverBonus, CoverStrength, DirectionAssessment, DirectionContribution,
    DirectionFactors, DirectionModifierConfig,
};
pub use skills::{
    effective_area, effective_range, mastery_damage, MasteryBonus, MasteryDamage, RangeSpec,
    SelectionOrder, SideFilter, SkillId, SkillTargeting, StatusEffect, TerrainThreshold,
};

/// Core error type for the skirmish targeting engine.
#[derive(thiserror::Error, Debug)]
pub enum SkirmishError {
    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Skill or map configuration is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Engine state is inconsistent with the requested operation
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the skirmish codebase.
pub type SkirmishResult<T> = Result<T, SkirmishError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine configuration constants.
pub mod config {
    /// Terrain tags above this value block line of sight unless a skill
    /// overrides the threshold
    pub const DEFAULT_TERRAIN_THRESHOLD: i32 = 0;

    /// Minimum normalized dot product for a cover tile to count as standing
    /// between attacker and defender (roughly a 45 degree tolerance)
    pub const COVER_ALIGNMENT_THRESHOLD: f64 = 0.7;

    /// Default hit multiplier for attacks from the side
    pub const DEFAULT_SIDE_HIT: f64 = 1.2;
    /// Default evasion multiplier against attacks from the side
    pub const DEFAULT_SIDE_EVASION: f64 = 0.8;
    /// Default damage multiplier for attacks from the side
    pub const DEFAULT_SIDE_DAMAGE: f64 = 1.2;

    /// Default hit multiplier for attacks from behind
    pub const DEFAULT_BACK_HIT: f64 = 1.4;
    /// Default evasion multiplier against attacks from behind
    pub const DEFAULT_BACK_EVASION: f64 = 0.6;
    /// Default damage multiplier for attacks from behind
    pub const DEFAULT_BACK_DAMAGE: f64 = 1.4;
}
