//! # Skills Module
//!
//! Typed targeting configuration for skills and items.
//!
//! The host engine's raw skill data (note tags, metadata strings) is
//! resolved into a [`SkillTargeting`] struct once at data-load time and
//! validated eagerly, so malformed configuration is caught before gameplay
//! rather than silently defaulting mid-battle.

pub mod mastery;

pub use mastery::{effective_area, effective_range, mastery_damage, MasteryBonus, MasteryDamage};

use crate::aoe::{AreaShape, BlockingRule, LosRule, NoExtension, ShapeExtension, ShapeSpec};
use crate::grid::Direction;
use crate::map::Side;
use crate::modifiers::DirectionContribution;
use crate::{SkirmishError, SkirmishResult};
use serde::{Deserialize, Serialize};

/// Identifier for a skill or item in the host engine's database.
pub type SkillId = u32;

/// How a skill's base range is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeSpec {
    /// A fixed tile range
    Fixed(u32),
    /// Range comes from the unit's equipped weapon, plus any additive
    /// bonuses from statuses or armor
    Weapon,
}

impl Default for RangeSpec {
    fn default() -> Self {
        RangeSpec::Fixed(1)
    }
}

/// Terrain permeability threshold for line of sight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainThreshold {
    /// Terrain tags above this value block sight
    Tag(i32),
    /// Use the acting unit's own mobility tag as the threshold
    UnitMobility,
}

impl Default for TerrainThreshold {
    fn default() -> Self {
        TerrainThreshold::Tag(crate::config::DEFAULT_TERRAIN_THRESHOLD)
    }
}

/// Order in which targets inside the area are queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOrder {
    /// Nearest to the area origin first (the default)
    #[default]
    Near,
    /// Furthest from the area origin first
    Far,
    /// Uniform random shuffle, fresh entropy every selection
    Random,
}

/// Which sides of the battle a skill may target, relative to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideFilter {
    pub friends: bool,
    pub opponents: bool,
}

impl SideFilter {
    /// Targets opponents only (the usual attack skill).
    pub fn opponents() -> Self {
        Self {
            friends: false,
            opponents: true,
        }
    }

    /// Targets friends only (heals, buffs).
    pub fn friends() -> Self {
        Self {
            friends: true,
            opponents: false,
        }
    }

    /// Targets every unit in the area.
    pub fn both() -> Self {
        Self {
            friends: true,
            opponents: true,
        }
    }

    /// Whether a unit on `target_side` is a legal target for a user on
    /// `acting_side`.
    pub fn permits(&self, acting_side: Side, target_side: Side) -> bool {
        if target_side == acting_side {
            self.friends
        } else {
            self.opponents
        }
    }
}

impl Default for SideFilter {
    fn default() -> Self {
        Self::opponents()
    }
}

/// Which occupant categories an AoE's line of sight passes through.
///
/// Anything not passed through blocks sight. Friends pass by default;
/// obstacles, opponents, and scripted entities block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassThrough {
    pub obstacles: bool,
    pub friends: bool,
    pub opponents: bool,
    pub scripted: bool,
}

impl Default for PassThrough {
    fn default() -> Self {
        Self {
            obstacles: false,
            friends: true,
            opponents: false,
            scripted: false,
        }
    }
}

/// Complete targeting configuration for one skill or item.
///
/// # Examples
///
/// ```
/// use skirmish::SkillTargeting;
///
/// let json = r#"{ "name": "Fireball", "area": 2, "order": "near" }"#;
/// let skill = SkillTargeting::from_json(json).unwrap();
/// assert_eq!(skill.area, 2);
/// assert_eq!(skill.min_area, 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillTargeting {
    pub name: String,
    #[serde(default)]
    pub range: RangeSpec,
    /// AoE size; 0 means a single-tile effect
    #[serde(default)]
    pub area: u32,
    /// Minimum AoE size, creating a hole around the origin
    #[serde(default)]
    pub min_area: u32,
    #[serde(default)]
    pub shape: AreaShape,
    /// Maximum number of targets; 0 means unlimited
    #[serde(default)]
    pub target_limit: u32,
    #[serde(default)]
    pub order: SelectionOrder,
    /// Whether the AoE is filtered through line of sight at all
    #[serde(default)]
    pub line_of_sight: bool,
    #[serde(default)]
    pub terrain_threshold: TerrainThreshold,
    #[serde(default)]
    pub pass_through: PassThrough,
    #[serde(default)]
    pub targets: SideFilter,
    /// Whether the skill may be aimed at an empty tile
    #[serde(default)]
    pub cell_target: bool,
    /// Forces attack-direction classification to front
    #[serde(default)]
    pub ignores_direction: bool,
    /// Additive side/back modifier contributions from this skill
    #[serde(default)]
    pub direction_bonus: Option<DirectionContribution>,
    /// Range increase once the user's mastery reaches a threshold
    #[serde(default)]
    pub range_mastery: Option<MasteryBonus>,
    /// AoE size increase once the user's mastery reaches a threshold
    #[serde(default)]
    pub area_mastery: Option<MasteryBonus>,
    /// Per-mastery-level damage additions
    #[serde(default)]
    pub mastery_damage: Option<MasteryDamage>,
}

impl SkillTargeting {
    /// Creates a minimal single-target configuration with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            range: RangeSpec::default(),
            area: 0,
            min_area: 0,
            shape: AreaShape::default(),
            target_limit: 0,
            order: SelectionOrder::default(),
            line_of_sight: false,
            terrain_threshold: TerrainThreshold::default(),
            pass_through: PassThrough::default(),
            targets: SideFilter::default(),
            cell_target: false,
            ignores_direction: false,
            direction_bonus: None,
            range_mastery: None,
            area_mastery: None,
            mastery_damage: None,
        }
    }

    /// Validates the configuration, failing on combinations the geometry
    /// cannot represent. Custom shape names are rejected unless the given
    /// extension recognizes them.
    pub fn validate_with(&self, extension: &dyn ShapeExtension) -> SkirmishResult<()> {
        if self.min_area > self.area {
            return Err(SkirmishError::InvalidConfiguration(format!(
                "skill '{}': min_area {} exceeds area {}",
                self.name, self.min_area, self.area
            )));
        }
        if let AreaShape::Custom(name) = &self.shape {
            if !extension.recognizes(name) {
                return Err(SkirmishError::InvalidConfiguration(format!(
                    "skill '{}': unknown shape '{}'",
                    self.name, name
                )));
            }
        }
        if !self.targets.friends && !self.targets.opponents {
            return Err(SkirmishError::InvalidConfiguration(format!(
                "skill '{}': targets neither friends nor opponents",
                self.name
            )));
        }
        Ok(())
    }

    /// Validates against the default (empty) shape extension.
    pub fn validate(&self) -> SkirmishResult<()> {
        self.validate_with(&NoExtension)
    }

    /// Builds the shape spec for an aim with the given facing, applying the
    /// user's area mastery.
    pub fn shape_spec(&self, facing: Direction, mastery_level: u32) -> ShapeSpec {
        ShapeSpec {
            size: effective_area(self, mastery_level),
            min_size: self.min_area,
            shape: self.shape.clone(),
            facing,
        }
    }

    /// Resolves the line-of-sight rule for a user on `acting_side` whose
    /// mobility terrain tag is `unit_mobility_tag`.
    pub fn los_rule(&self, acting_side: Side, unit_mobility_tag: i32) -> LosRule {
        let terrain_threshold = match self.terrain_threshold {
            TerrainThreshold::Tag(tag) => tag,
            TerrainThreshold::UnitMobility => unit_mobility_tag,
        };
        LosRule {
            enabled: self.line_of_sight,
            terrain_threshold,
            blocking: BlockingRule {
                obstacles: !self.pass_through.obstacles,
                friends: !self.pass_through.friends,
                opponents: !self.pass_through.opponents,
                scripted: !self.pass_through.scripted,
            },
            acting_side,
        }
    }

    /// Serializes the configuration to JSON.
    pub fn to_json(&self) -> SkirmishResult<String> {
        serde_json::to_string_pretty(self).map_err(SkirmishError::from)
    }

    /// Loads and validates a configuration from JSON.
    pub fn from_json(json: &str) -> SkirmishResult<Self> {
        let skill: Self = serde_json::from_str(json)?;
        skill.validate()?;
        Ok(skill)
    }
}

/// An active status effect on a unit, reduced to the metadata the targeting
/// and modifier math consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusEffect {
    pub name: String,
    /// Additive side/back modifier contributions while this status is active
    #[serde(default)]
    pub direction_bonus: Option<DirectionContribution>,
    /// Additive weapon-range bonus while this status is active
    #[serde(default)]
    pub weapon_range_bonus: i32,
}
