//! # Attack Direction
//!
//! Classifies an attack as frontal, flanking, or from behind by comparing
//! the attacker's reoriented facing against the defender's, and converts
//! the classification into hit, evasion, and damage multipliers.

use crate::config;
use crate::grid::{Direction, Position};
use crate::map::Side;
use serde::{Deserialize, Serialize};

/// The arc an attack arrives from, relative to the defender's facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackDirection {
    /// Attacker and defender face each other
    Front,
    /// The attack comes in perpendicular to the defender's facing
    Side,
    /// Attacker faces the same way as the defender
    Back,
}

/// The resolved classification for one attack, with the facings it was
/// derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionAssessment {
    pub direction: AttackDirection,
    pub attacker_facing: Direction,
    pub defender_facing: Direction,
}

impl DirectionAssessment {
    /// The facing the defender snaps to after the attack, turned toward
    /// the attacker.
    pub fn defender_turn(&self) -> Direction {
        self.attacker_facing.opposite()
    }

    /// The direction the multiplier tables should grade this attack at.
    ///
    /// Attacks within one side (heals, buffs, friendly fire) never take a
    /// directional modifier, so they grade as frontal regardless of the
    /// geometry. Cross-side attacks keep the classified direction.
    pub fn modifier_direction(&self, attacker_side: Side, defender_side: Side) -> AttackDirection {
        if attacker_side == defender_side {
            AttackDirection::Front
        } else {
            self.direction
        }
    }
}

/// Classifies an attack from `attacker` against a defender standing at
/// `defender` and facing `defender_facing`.
///
/// The attacker's facing is reoriented toward the defender along the
/// dominant displacement axis. On an exact diagonal the defender's own
/// facing axis breaks the tie: a defender facing vertically is approached
/// vertically, a defender facing horizontally is approached horizontally.
/// Matching facings mean the attack comes from behind; opposed facings
/// mean head on; anything else is a flank.
///
/// `ignores_direction` (set by skills whose effect has no spatial arc)
/// forces a frontal classification while still reporting the reoriented
/// facings. Attacks from the defender's own tile classify as side.
pub fn classify_attack_direction(
    attacker: Position,
    defender: Position,
    defender_facing: Direction,
    ignores_direction: bool,
) -> DirectionAssessment {
    let dx = attacker.x - defender.x;
    let dy = attacker.y - defender.y;

    if dx == 0 && dy == 0 {
        return DirectionAssessment {
            direction: AttackDirection::Side,
            attacker_facing: defender_facing,
            defender_facing,
        };
    }

    let vertical = if dy < 0 {
        Direction::South
    } else {
        Direction::North
    };
    let horizontal = if dx < 0 {
        Direction::East
    } else {
        Direction::West
    };

    let attacker_facing = if dx.abs() > dy.abs() {
        horizontal
    } else if dy.abs() > dx.abs() {
        vertical
    } else if defender_facing.is_vertical() {
        vertical
    } else {
        horizontal
    };

    let direction = if ignores_direction {
        AttackDirection::Front
    } else if attacker_facing == defender_facing {
        AttackDirection::Back
    } else if attacker_facing == defender_facing.opposite() {
        AttackDirection::Front
    } else {
        AttackDirection::Side
    };

    DirectionAssessment {
        direction,
        attacker_facing,
        defender_facing,
    }
}

/// Base multipliers for one attack arc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionFactors {
    pub hit: f64,
    pub evasion: f64,
    pub damage: f64,
}

/// Base side and back multipliers; frontal attacks are always neutral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionModifierConfig {
    #[serde(default = "default_side_factors")]
    pub side: DirectionFactors,
    #[serde(default = "default_back_factors")]
    pub back: DirectionFactors,
}

fn default_side_factors() -> DirectionFactors {
    DirectionFactors {
        hit: config::DEFAULT_SIDE_HIT,
        evasion: config::DEFAULT_SIDE_EVASION,
        damage: config::DEFAULT_SIDE_DAMAGE,
    }
}

fn default_back_factors() -> DirectionFactors {
    DirectionFactors {
        hit: config::DEFAULT_BACK_HIT,
        evasion: config::DEFAULT_BACK_EVASION,
        damage: config::DEFAULT_BACK_DAMAGE,
    }
}

impl Default for DirectionModifierConfig {
    fn default() -> Self {
        Self {
            side: default_side_factors(),
            back: default_back_factors(),
        }
    }
}

/// Additive contributions to the side and back multipliers, carried by the
/// attacker's skill and active statuses.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DirectionContribution {
    #[serde(default)]
    pub side_hit: f64,
    #[serde(default)]
    pub side_damage: f64,
    #[serde(default)]
    pub back_hit: f64,
    #[serde(default)]
    pub back_damage: f64,
}

impl DirectionModifierConfig {
    /// The hit-rate multiplier for an attack from `direction`, with every
    /// additive skill and status contribution folded in.
    pub fn hit_multiplier(
        &self,
        direction: AttackDirection,
        contributions: &[DirectionContribution],
    ) -> f64 {
        match direction {
            AttackDirection::Front => 1.0,
            AttackDirection::Side => {
                self.side.hit + contributions.iter().map(|c| c.side_hit).sum::<f64>()
            }
            AttackDirection::Back => {
                self.back.hit + contributions.iter().map(|c| c.back_hit).sum::<f64>()
            }
        }
    }

    /// The damage multiplier for an attack from `direction`.
    pub fn damage_multiplier(
        &self,
        direction: AttackDirection,
        contributions: &[DirectionContribution],
    ) -> f64 {
        match direction {
            AttackDirection::Front => 1.0,
            AttackDirection::Side => {
                self.side.damage + contributions.iter().map(|c| c.side_damage).sum::<f64>()
            }
            AttackDirection::Back => {
                self.back.damage + contributions.iter().map(|c| c.back_damage).sum::<f64>()
            }
        }
    }

    /// The defender's evasion multiplier against an attack from
    /// `direction`. Contributions never touch evasion.
    pub fn evasion_multiplier(&self, direction: AttackDirection) -> f64 {
        match direction {
            AttackDirection::Front => 1.0,
            AttackDirection::Side => self.side.evasion,
            AttackDirection::Back => self.back.evasion,
        }
    }
}

/// Evasion after the guaranteed-hit check: a modified hit rate at or above
/// certainty zeroes the defender's evasion entirely.
pub fn evasion_after_hit_check(evasion: f64, hit_rate: f64) -> f64 {
    if hit_rate >= 1.0 {
        0.0
    } else {
        evasion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assess(
        attacker: (i32, i32),
        defender: (i32, i32),
        facing: Direction,
    ) -> DirectionAssessment {
        classify_attack_direction(
            Position::new(attacker.0, attacker.1),
            Position::new(defender.0, defender.1),
            facing,
            false,
        )
    }

    #[test]
    fn test_head_on_attack_is_front() {
        // attacker below a south-facing defender, attacking upward
        let a = assess((5, 8), (5, 5), Direction::South);
        assert_eq!(a.direction, AttackDirection::Front);
        assert_eq!(a.attacker_facing, Direction::North);
        assert_eq!(a.defender_turn(), Direction::South);
    }

    #[test]
    fn test_attack_from_behind_is_back() {
        // attacker above a south-facing defender
        let a = assess((5, 2), (5, 5), Direction::South);
        assert_eq!(a.direction, AttackDirection::Back);
        assert_eq!(a.attacker_facing, Direction::South);
        assert_eq!(a.defender_turn(), Direction::North);
    }

    #[test]
    fn test_perpendicular_attack_is_side() {
        let a = assess((2, 5), (5, 5), Direction::South);
        assert_eq!(a.direction, AttackDirection::Side);
        assert_eq!(a.attacker_facing, Direction::East);
    }

    #[test]
    fn test_dominant_axis_wins() {
        // dx = 3, dy = -1: horizontal dominates despite the vertical offset
        let a = assess((8, 4), (5, 5), Direction::West);
        assert_eq!(a.attacker_facing, Direction::West);
        assert_eq!(a.direction, AttackDirection::Back);
    }

    #[test]
    fn test_diagonal_tie_follows_defender_axis() {
        // exact diagonal from the north-east
        let vertical = assess((8, 2), (5, 5), Direction::South);
        assert_eq!(vertical.attacker_facing, Direction::South);
        assert_eq!(vertical.direction, AttackDirection::Back);

        let horizontal = assess((8, 2), (5, 5), Direction::East);
        assert_eq!(horizontal.attacker_facing, Direction::West);
        assert_eq!(horizontal.direction, AttackDirection::Front);
    }

    #[test]
    fn test_ignores_direction_forces_front() {
        let a = classify_attack_direction(
            Position::new(5, 2),
            Position::new(5, 5),
            Direction::South,
            true,
        );
        assert_eq!(a.direction, AttackDirection::Front);
        // the reoriented facing still drives the defender's turn
        assert_eq!(a.attacker_facing, Direction::South);
    }

    #[test]
    fn test_same_tile_classifies_as_side() {
        let a = assess((5, 5), (5, 5), Direction::North);
        assert_eq!(a.direction, AttackDirection::Side);
    }

    #[test]
    fn test_default_multipliers() {
        let config = DirectionModifierConfig::default();
        assert_eq!(config.hit_multiplier(AttackDirection::Front, &[]), 1.0);
        assert_eq!(config.hit_multiplier(AttackDirection::Side, &[]), 1.2);
        assert_eq!(config.hit_multiplier(AttackDirection::Back, &[]), 1.4);
        assert_eq!(config.damage_multiplier(AttackDirection::Back, &[]), 1.4);
        assert_eq!(config.evasion_multiplier(AttackDirection::Side), 0.8);
        assert_eq!(config.evasion_multiplier(AttackDirection::Back), 0.6);
    }

    #[test]
    fn test_contributions_are_additive() {
        let config = DirectionModifierConfig::default();
        let skill = DirectionContribution {
            back_damage: 0.3,
            ..DirectionContribution::default()
        };
        let status = DirectionContribution {
            back_damage: 0.1,
            back_hit: 0.2,
            ..DirectionContribution::default()
        };
        let stack = [skill, status];
        assert_eq!(
            config.damage_multiplier(AttackDirection::Back, &stack),
            1.4 + 0.3 + 0.1
        );
        assert_eq!(config.hit_multiplier(AttackDirection::Back, &stack), 1.4 + 0.2);
        // frontal attacks ignore every contribution
        assert_eq!(config.damage_multiplier(AttackDirection::Front, &stack), 1.0);
    }

    #[test]
    fn test_same_side_attacks_grade_as_frontal() {
        // geometrically a backstab
        let a = assess((5, 2), (5, 5), Direction::South);
        assert_eq!(a.direction, AttackDirection::Back);
        assert_eq!(
            a.modifier_direction(Side::Ally, Side::Ally),
            AttackDirection::Front
        );
        assert_eq!(
            a.modifier_direction(Side::Ally, Side::Enemy),
            AttackDirection::Back
        );

        let config = DirectionModifierConfig::default();
        let graded = a.modifier_direction(Side::Enemy, Side::Enemy);
        assert_eq!(config.damage_multiplier(graded, &[]), 1.0);
        assert_eq!(config.evasion_multiplier(graded), 1.0);
    }

    #[test]
    fn test_certain_hit_zeroes_evasion() {
        assert_eq!(evasion_after_hit_check(0.3, 1.0), 0.0);
        assert_eq!(evasion_after_hit_check(0.3, 1.2), 0.0);
        assert_eq!(evasion_after_hit_check(0.3, 0.95), 0.3);
    }
}
