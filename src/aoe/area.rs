//! # Area Construction
//!
//! Builds the immutable [`AreaSnapshot`] for one aim: every offset within
//! the shape, classified as visible or blocked by line of sight. The
//! snapshot is replaced wholesale when the cursor moves and discarded when
//! targeting is cancelled or completes; exactly one snapshot is active per
//! acting unit.

use crate::aoe::los::{LosRule, LosTable};
use crate::aoe::shape::{NoExtension, ShapeExtension, ShapeSpec};
use crate::grid::Position;
use crate::map::{BattleMap, Occupant, Side, UnitId};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Immutable result of one area build.
///
/// `visible` and `blocked` are disjoint: a tile accepted by the shape lands
/// in exactly one of them depending on line of sight from the origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaSnapshot {
    pub origin: Position,
    pub spec: ShapeSpec,
    visible: HashSet<Position>,
    blocked: HashSet<Position>,
}

impl AreaSnapshot {
    /// Tiles the effect can reach.
    pub fn visible_tiles(&self) -> &HashSet<Position> {
        &self.visible
    }

    /// Tiles inside the shape but cut off by line of sight.
    pub fn blocked_tiles(&self) -> &HashSet<Position> {
        &self.blocked
    }

    /// Whether a tile is inside the visible portion of the area.
    pub fn is_visible(&self, pos: Position) -> bool {
        self.visible.contains(&pos)
    }

    /// Whether a tile is inside the shape but blocked.
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.blocked.contains(&pos)
    }

    /// Whether the visible area is empty.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

/// Whether a position counts as inside the currently active area.
///
/// Fails closed: with no active snapshot (targeting UI querying before any
/// aim) the answer is `false`, never an error. Blocked tiles do not count.
pub fn position_in_active_area(active: Option<&AreaSnapshot>, pos: Position) -> bool {
    match active {
        Some(snapshot) => snapshot.is_visible(pos) && !snapshot.is_blocked(pos),
        None => false,
    }
}

/// Builds the area snapshot for one aim, resolving custom shapes through
/// `extension`.
///
/// The occupant table is rebuilt once per call and line-of-sight results
/// are memoized per destination tile, so re-aiming never reuses stale
/// occupant state while a single build never traces the same tile twice.
pub fn build_area_with(
    map: &BattleMap,
    acting: Option<UnitId>,
    origin: Position,
    spec: &ShapeSpec,
    rule: &LosRule,
    extension: &dyn ShapeExtension,
) -> AreaSnapshot {
    let table = LosTable::build(map, acting);
    let bounds = map.bounds();
    let size = spec.size as i32;

    let mut visible = HashSet::new();
    let mut blocked = HashSet::new();
    let mut memo: HashMap<Position, bool> = HashMap::new();

    for dx in -size..=size {
        for dy in -size..=size {
            if !spec
                .shape
                .accepts_with(extension, dx, dy, spec.size, spec.min_size, spec.facing)
            {
                continue;
            }
            let target = bounds.wrap_position(Position::new(origin.x + dx, origin.y + dy));
            let has_los = *memo
                .entry(target)
                .or_insert_with(|| rule.check(map, &table, origin, target));
            if has_los {
                visible.insert(target);
            } else {
                blocked.insert(target);
            }
        }
    }

    debug!(
        "built area at ({}, {}): {} visible, {} blocked",
        origin.x,
        origin.y,
        visible.len(),
        blocked.len()
    );

    AreaSnapshot {
        origin,
        spec: spec.clone(),
        visible,
        blocked,
    }
}

/// Builds the area snapshot with no shape extension.
pub fn build_area(
    map: &BattleMap,
    acting: Option<UnitId>,
    origin: Position,
    spec: &ShapeSpec,
    rule: &LosRule,
) -> AreaSnapshot {
    build_area_with(map, acting, origin, spec, rule, &NoExtension)
}

/// Live units whose position falls inside a shape centered on `origin`,
/// optionally restricted to one side.
///
/// This is the proximity query for "is anyone near this unit": a size of 0
/// is a one-square effect and by policy does not count as an area, so it
/// always returns nothing.
pub fn units_in_shape<'a>(
    map: &'a BattleMap,
    origin: Position,
    spec: &ShapeSpec,
    side: Option<Side>,
) -> Vec<&'a Occupant> {
    if spec.size == 0 {
        return Vec::new();
    }
    let bounds = map.bounds();
    map.live_occupants()
        .filter(|o| o.side().is_some())
        .filter(|o| side.is_none() || o.side() == side)
        .filter(|o| {
            let (dx, dy) = bounds.wrap_delta(o.position.x - origin.x, o.position.y - origin.y);
            spec.shape
                .accepts(dx, dy, spec.size, spec.min_size, spec.facing)
        })
        .collect()
}
