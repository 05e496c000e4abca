//! # Target Selection
//!
//! Collects the live units standing in the visible portion of an area,
//! orders them per the skill's selection order, applies the target limit,
//! and freezes the result into a FIFO [`TargetQueue`] that the sequencer
//! drains one entry at a time.

use crate::aoe::area::AreaSnapshot;
use crate::grid::Position;
use crate::map::{BattleMap, Side, UnitId};
use crate::skills::{SelectionOrder, SkillId, SkillTargeting};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One queued target, captured with the position it stood on at selection
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedTarget {
    pub target: UnitId,
    pub position: Position,
}

/// FIFO queue of selected targets for one skill use.
///
/// The ordering fixed at selection time is final: units moving or dying
/// afterwards never reorder the queue, they are skipped at resolution time.
/// Once drained or flushed the queue stays empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetQueue {
    skill: SkillId,
    entries: VecDeque<QueuedTarget>,
    drained: bool,
}

impl TargetQueue {
    /// An empty, already-drained queue for the given skill.
    pub fn empty(skill: SkillId) -> Self {
        Self {
            skill,
            entries: VecDeque::new(),
            drained: true,
        }
    }

    fn from_entries(skill: SkillId, entries: Vec<QueuedTarget>) -> Self {
        let drained = entries.is_empty();
        Self {
            skill,
            entries: entries.into(),
            drained,
        }
    }

    /// The skill this queue was built for.
    pub fn skill(&self) -> SkillId {
        self.skill
    }

    /// Removes and returns the next target in line.
    pub fn pop_front(&mut self) -> Option<QueuedTarget> {
        let entry = self.entries.pop_front();
        if self.entries.is_empty() {
            self.drained = true;
        }
        entry
    }

    /// Discards every remaining entry, returning how many were dropped.
    pub fn flush(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        self.drained = true;
        dropped
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the queue has been fully consumed or flushed.
    pub fn is_drained(&self) -> bool {
        self.drained
    }

    /// Remaining entries in drain order, without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &QueuedTarget> {
        self.entries.iter()
    }
}

/// Selects the targets inside the active area and freezes them into a
/// queue.
///
/// Only live units standing on visible tiles are considered; blocked tiles
/// contribute nothing. Near and far orders sort by wrap-aware Manhattan
/// distance to the area origin, random shuffles with fresh entropy from
/// `rng`. A target limit of 0 keeps everyone.
pub fn select_targets<R: Rng + ?Sized>(
    map: &BattleMap,
    snapshot: Option<&AreaSnapshot>,
    skill: &SkillTargeting,
    skill_id: SkillId,
    acting_side: Side,
    rng: &mut R,
) -> TargetQueue {
    let snapshot = match snapshot {
        Some(s) => s,
        None => return TargetQueue::empty(skill_id),
    };
    let bounds = map.bounds();
    let origin = snapshot.origin;

    let mut candidates: Vec<QueuedTarget> = map
        .live_occupants()
        .filter(|o| snapshot.is_visible(o.position))
        .filter(|o| match o.side() {
            Some(side) => skill.targets.permits(acting_side, side),
            None => false,
        })
        .map(|o| QueuedTarget {
            target: o.id,
            position: o.position,
        })
        .collect();

    match skill.order {
        // ties break on unit id so selection never depends on map
        // iteration order
        SelectionOrder::Near => {
            candidates.sort_by_key(|c| (bounds.distance(origin, c.position), c.target));
        }
        SelectionOrder::Far => {
            candidates
                .sort_by_key(|c| (std::cmp::Reverse(bounds.distance(origin, c.position)), c.target));
        }
        SelectionOrder::Random => {
            candidates.shuffle(rng);
        }
    }

    if skill.target_limit > 0 {
        candidates.truncate(skill.target_limit as usize);
    }

    debug!(
        "selected {} target(s) for skill {} at ({}, {})",
        candidates.len(),
        skill_id,
        origin.x,
        origin.y
    );

    TargetQueue::from_entries(skill_id, candidates)
}
