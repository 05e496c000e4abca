//! # Cover Detection
//!
//! Terrain cover between an attacker and a defender. A cover tile adjacent
//! to the defender shields it when the tile sits along the attack vector:
//! the normalized attack direction and the normalized tile-to-defender
//! direction must agree beyond the alignment threshold.

use crate::config::COVER_ALIGNMENT_THRESHOLD;
use crate::grid::Position;
use crate::map::BattleMap;
use serde::{Deserialize, Serialize};

/// How much protection a cover tile grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverStrength {
    Light,
    Medium,
    Heavy,
}

/// Multipliers applied while a defender is in cover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverBonus {
    /// Scales damage taken by the defender
    pub damage_mult: f64,
    /// Scales the defender's evasion
    pub evasion_mult: f64,
    /// Scales the attacker's hit rate
    pub attacker_hit_mult: f64,
}

impl CoverBonus {
    /// No cover: every multiplier is 1.
    pub const NEUTRAL: CoverBonus = CoverBonus {
        damage_mult: 1.0,
        evasion_mult: 1.0,
        attacker_hit_mult: 1.0,
    };
}

impl CoverStrength {
    /// The multipliers this strength of cover grants.
    pub fn bonus(self) -> CoverBonus {
        match self {
            CoverStrength::Light => CoverBonus {
                damage_mult: 0.90,
                evasion_mult: 1.05,
                attacker_hit_mult: 0.90,
            },
            CoverStrength::Medium => CoverBonus {
                damage_mult: 0.85,
                evasion_mult: 1.07,
                attacker_hit_mult: 0.85,
            },
            CoverStrength::Heavy => CoverBonus {
                damage_mult: 0.80,
                evasion_mult: 1.10,
                attacker_hit_mult: 0.80,
            },
        }
    }
}

fn normalized_delta(map: &BattleMap, from: Position, to: Position) -> Option<(f64, f64)> {
    let (dx, dy) = map.bounds().wrap_delta(to.x - from.x, to.y - from.y);
    let magnitude = ((dx * dx + dy * dy) as f64).sqrt();
    if magnitude == 0.0 {
        return None;
    }
    Some((dx as f64 / magnitude, dy as f64 / magnitude))
}

/// Finds the cover tile shielding `defender` from `attacker`, if any.
///
/// Scans the eight tiles around the defender in a fixed order and keeps
/// the one whose direction to the defender aligns best with the attack
/// vector. Alignment must exceed the configured threshold, which admits
/// straight-on cover and rejects tiles perpendicular to the attack. Ties
/// keep the first tile in scan order.
pub fn detect_cover(
    map: &BattleMap,
    attacker: Position,
    defender: Position,
) -> Option<(Position, CoverStrength)> {
    let attack = normalized_delta(map, attacker, defender)?;

    let mut best: Option<(Position, CoverStrength)> = None;
    let mut best_dot = COVER_ALIGNMENT_THRESHOLD;
    for tile in defender.adjacent_positions() {
        let tile = map.bounds().wrap_position(tile);
        let strength = match map.cover_at(tile) {
            Some(s) => s,
            None => continue,
        };
        let toward = match normalized_delta(map, tile, defender) {
            Some(v) => v,
            None => continue,
        };
        let dot = attack.0 * toward.0 + attack.1 * toward.1;
        if dot > best_dot {
            best_dot = dot;
            best = Some((tile, strength));
        }
    }
    best
}

/// The cover multipliers for one attack, neutral when nothing shields the
/// defender.
pub fn cover_bonus(map: &BattleMap, attacker: Position, defender: Position) -> CoverBonus {
    detect_cover(map, attacker, defender)
        .map(|(_, strength)| strength.bonus())
        .unwrap_or(CoverBonus::NEUTRAL)
}
