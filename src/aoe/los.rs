//! # Line of Sight
//!
//! Discrete sight tracing between tiles. A trace walks the Bresenham line
//! from source to destination, wrapping across looping map edges along the
//! shorter arc, and fails as soon as an intermediate tile blocks sight,
//! whether by terrain above the permeability threshold or by an occupant
//! whose category the active rule marks as blocking.
//!
//! Source and destination tiles are never tested; only the tiles strictly
//! between them can block.

use crate::grid::Position;
use crate::map::{BattleMap, OccupantCategory, Side, UnitId};
use std::collections::HashMap;

/// Which occupant categories block sight for one trace session.
///
/// Unit blocking is relative to the acting side: `friends` blocks units on
/// the actor's own side, `opponents` blocks the other side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockingRule {
    pub obstacles: bool,
    pub friends: bool,
    pub opponents: bool,
    pub scripted: bool,
}

impl BlockingRule {
    /// A rule through which nothing blocks.
    pub fn none() -> Self {
        Self {
            obstacles: false,
            friends: false,
            opponents: false,
            scripted: false,
        }
    }

    /// Whether an occupant of `category` blocks sight for an actor on
    /// `acting_side`.
    pub fn blocks(&self, category: OccupantCategory, acting_side: Side) -> bool {
        match category {
            OccupantCategory::Obstacle => self.obstacles,
            OccupantCategory::Scripted => self.scripted,
            OccupantCategory::Unit(side) => {
                if side == acting_side {
                    self.friends
                } else {
                    self.opponents
                }
            }
        }
    }
}

/// The resolved line-of-sight rule for one aim: whether LoS applies at all,
/// the terrain threshold, and the blocking categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LosRule {
    pub enabled: bool,
    pub terrain_threshold: i32,
    pub blocking: BlockingRule,
    pub acting_side: Side,
}

impl LosRule {
    /// Checks sight from `from` to `to` under this rule. Disabled rules
    /// always see.
    pub fn check(&self, map: &BattleMap, table: &LosTable, from: Position, to: Position) -> bool {
        if !self.enabled {
            return true;
        }
        has_line_of_sight(
            map,
            table,
            from,
            to,
            self.terrain_threshold,
            &self.blocking,
            self.acting_side,
        )
    }
}

/// Occupant categories indexed by tile, rebuilt once per tracing session.
///
/// The acting unit never blocks its own sight, erased occupants are
/// excluded, and intangible obstacles are skipped.
#[derive(Debug, Clone, Default)]
pub struct LosTable {
    table: HashMap<Position, OccupantCategory>,
}

impl LosTable {
    /// Scans the map's occupants into a category table, excluding `acting`.
    pub fn build(map: &BattleMap, acting: Option<UnitId>) -> Self {
        let mut table = HashMap::new();
        for occupant in map.live_occupants() {
            if Some(occupant.id) == acting {
                continue;
            }
            if occupant.category == OccupantCategory::Obstacle && !occupant.tangible {
                continue;
            }
            table.insert(occupant.position, occupant.category);
        }
        Self { table }
    }

    /// The category standing on a tile, if any.
    pub fn category_at(&self, pos: Position) -> Option<OccupantCategory> {
        self.table.get(&pos).copied()
    }
}

/// Traces sight from `from` to `to` and reports whether the path is clear.
///
/// Walks the integer Bresenham line between the tiles, stepping across a
/// looping axis when the wrapped span is shorter than the direct one. Each
/// tile strictly between source and destination blocks when its terrain tag
/// exceeds `terrain_threshold` (clamped to at least 0) or when the occupant
/// table marks it with a category the rule blocks.
///
/// A degenerate trace (`from == to`) is trivially clear.
pub fn has_line_of_sight(
    map: &BattleMap,
    table: &LosTable,
    from: Position,
    to: Position,
    terrain_threshold: i32,
    blocking: &BlockingRule,
    acting_side: Side,
) -> bool {
    let threshold = terrain_threshold.max(0);
    let bounds = map.bounds();
    let width = bounds.width as i32;
    let height = bounds.height as i32;

    let mut dx = (to.x - from.x).abs();
    let mut dy = (to.y - from.y).abs();
    let mut sx = if from.x < to.x { 1 } else { -1 };
    let mut sy = if from.y < to.y { 1 } else { -1 };

    // step across the seam when the wrapped arc is shorter
    if bounds.loop_horizontal && dx > width / 2 {
        dx = width - dx;
        sx = -sx;
    }
    if bounds.loop_vertical && dy > height / 2 {
        dy = height - dy;
        sy = -sy;
    }

    let mut x = from.x;
    let mut y = from.y;
    let mut err = dx - dy;

    while x != to.x || y != to.y {
        let err2 = err * 2;
        if err2 > -dy {
            err -= dy;
            x += sx;
            if bounds.loop_horizontal {
                x = x.rem_euclid(width);
            }
        }
        if err2 < dx {
            err += dx;
            y += sy;
            if bounds.loop_vertical {
                y = y.rem_euclid(height);
            }
        }

        // destination itself is never tested
        if x == to.x && y == to.y {
            break;
        }

        let tile = Position::new(x, y);
        if map.terrain_tag(tile) > threshold {
            return false;
        }
        if let Some(category) = table.category_at(tile) {
            if blocking.blocks(category, acting_side) {
                return false;
            }
        }
    }

    true
}
