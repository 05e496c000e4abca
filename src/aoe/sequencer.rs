//! # Action Sequencing
//!
//! Drains a [`TargetQueue`] one entry at a time, replaying the skill
//! against each queued target through a [`CombatResolver`]. The skill's
//! cost is charged exactly once per queue, immediately before the first
//! entry that actually resolves; a drain that resolves nothing charges
//! nothing.

use crate::aoe::selection::{QueuedTarget, TargetQueue};
use crate::map::UnitId;
use crate::skills::SkillId;
use crate::{SkirmishError, SkirmishResult};
use log::debug;

/// Host-side combat hooks the sequencer drives.
///
/// The sequencer owns the queue discipline and the cost invariant; the
/// resolver owns everything the host engine knows, from resource pools to
/// damage formulas.
pub trait CombatResolver {
    /// Charges the skill's cost to the actor. Called at most once per
    /// queue drain, immediately before the first target that resolves, so
    /// any other once-per-action accounting (repeat bonuses, usage
    /// counters) belongs here too.
    fn charge_cost(&mut self, actor: UnitId, skill: SkillId);

    /// Applies the skill's effect to one queued target.
    fn resolve(&mut self, actor: UnitId, target: &QueuedTarget, skill: SkillId);

    /// Whether the actor is still able to continue the sequence.
    fn can_act(&self, actor: UnitId) -> bool;

    /// Whether a queued target is still a valid recipient.
    fn target_live(&self, target: UnitId) -> bool;
}

/// Tally of one completed queue drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrainOutcome {
    /// Targets the skill actually hit
    pub resolved: usize,
    /// Targets skipped because they were no longer valid
    pub skipped: usize,
    /// Targets discarded when the actor could no longer act
    pub flushed: usize,
}

/// Drives one skill use through its target queue.
#[derive(Debug)]
pub struct ActionSequencer {
    actor: UnitId,
    queue: TargetQueue,
    cost_paid: bool,
    outcome: DrainOutcome,
}

impl ActionSequencer {
    /// Wraps a freshly selected queue for the given actor.
    pub fn new(actor: UnitId, queue: TargetQueue) -> Self {
        Self {
            actor,
            queue,
            cost_paid: false,
            outcome: DrainOutcome::default(),
        }
    }

    /// Whether the cost has been charged yet.
    pub fn has_started(&self) -> bool {
        self.cost_paid
    }

    /// Targets still waiting in the queue.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Advances the sequence by one step. Returns `true` while more steps
    /// remain.
    ///
    /// Dead or otherwise invalid targets are skipped without charging the
    /// cost. If the actor can no longer act, the rest of the queue is
    /// flushed and the sequence ends.
    pub fn advance<R: CombatResolver + ?Sized>(&mut self, resolver: &mut R) -> bool {
        if self.queue.is_empty() {
            return false;
        }
        if !resolver.can_act(self.actor) {
            self.outcome.flushed += self.queue.flush();
            debug!(
                "actor {} can no longer act, flushed {} target(s)",
                self.actor, self.outcome.flushed
            );
            return false;
        }
        let entry = match self.queue.pop_front() {
            Some(entry) => entry,
            None => return false,
        };
        if !resolver.target_live(entry.target) {
            self.outcome.skipped += 1;
            return !self.queue.is_empty();
        }
        if !self.cost_paid {
            resolver.charge_cost(self.actor, self.queue.skill());
            self.cost_paid = true;
        }
        resolver.resolve(self.actor, &entry, self.queue.skill());
        self.outcome.resolved += 1;
        !self.queue.is_empty()
    }

    /// Drains the whole queue and reports the tally.
    pub fn run<R: CombatResolver + ?Sized>(mut self, resolver: &mut R) -> DrainOutcome {
        while self.advance(resolver) {}
        self.outcome
    }

    /// Abandons the sequence before anything resolves.
    ///
    /// Cancelling is only legal while the cost is unpaid; once a target has
    /// resolved the skill use is committed.
    pub fn cancel(mut self) -> SkirmishResult<()> {
        if self.cost_paid {
            return Err(SkirmishError::InvalidState(
                "cannot cancel a sequence whose cost is already paid".to_string(),
            ));
        }
        self.queue.flush();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aoe::area::build_area;
    use crate::aoe::los::{BlockingRule, LosRule};
    use crate::aoe::selection::select_targets;
    use crate::aoe::shape::{AreaShape, ShapeSpec};
    use crate::grid::{Direction, GridBounds, Position};
    use crate::map::{new_unit_id, BattleMap, Occupant, Side};
    use crate::skills::SkillTargeting;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    /// Test resolver that records every hook call.
    struct Recorder {
        cost_charges: usize,
        resolved: Vec<UnitId>,
        dead: HashSet<UnitId>,
        acting_allowed: bool,
        collapse_after: Option<usize>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                cost_charges: 0,
                resolved: Vec::new(),
                dead: HashSet::new(),
                acting_allowed: true,
                collapse_after: None,
            }
        }
    }

    impl CombatResolver for Recorder {
        fn charge_cost(&mut self, _actor: UnitId, _skill: SkillId) {
            self.cost_charges += 1;
        }

        fn resolve(&mut self, _actor: UnitId, target: &QueuedTarget, _skill: SkillId) {
            self.resolved.push(target.target);
            if let Some(limit) = self.collapse_after {
                if self.resolved.len() >= limit {
                    self.acting_allowed = false;
                }
            }
        }

        fn can_act(&self, _actor: UnitId) -> bool {
            self.acting_allowed
        }

        fn target_live(&self, target: UnitId) -> bool {
            !self.dead.contains(&target)
        }
    }

    fn queue_of(count: usize) -> (Vec<UnitId>, TargetQueue) {
        let mut map = BattleMap::new(GridBounds::new(20, 20));
        let origin = Position::new(10, 10);
        let ids: Vec<UnitId> = (0..count)
            .map(|i| {
                map.add_occupant(Occupant::unit(
                    Position::new(10, 11 + i as i32),
                    Side::Enemy,
                ))
            })
            .collect();
        let spec = ShapeSpec {
            size: 6,
            min_size: 0,
            shape: AreaShape::Circle,
            facing: Direction::South,
        };
        let rule = LosRule {
            enabled: false,
            terrain_threshold: 0,
            blocking: BlockingRule::none(),
            acting_side: Side::Ally,
        };
        let snapshot = build_area(&map, None, origin, &spec, &rule);
        let skill = SkillTargeting::new("Wave");
        let mut rng = StdRng::seed_from_u64(0);
        let queue = select_targets(&map, Some(&snapshot), &skill, 1, Side::Ally, &mut rng);
        (ids, queue)
    }

    #[test]
    fn test_cost_charged_exactly_once_over_full_drain() {
        let (ids, queue) = queue_of(3);
        let mut resolver = Recorder::new();
        let outcome = ActionSequencer::new(new_unit_id(), queue).run(&mut resolver);
        assert_eq!(resolver.cost_charges, 1);
        assert_eq!(outcome.resolved, 3);
        assert_eq!(resolver.resolved, ids);
    }

    #[test]
    fn test_dead_targets_skipped_without_cost() {
        let (ids, queue) = queue_of(3);
        let mut resolver = Recorder::new();
        resolver.dead.insert(ids[0]);
        let outcome = ActionSequencer::new(new_unit_id(), queue).run(&mut resolver);
        assert_eq!(resolver.cost_charges, 1);
        assert_eq!(outcome.resolved, 2);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(resolver.resolved, vec![ids[1], ids[2]]);
    }

    #[test]
    fn test_all_dead_drain_charges_nothing() {
        let (ids, queue) = queue_of(2);
        let mut resolver = Recorder::new();
        resolver.dead.extend(ids);
        let outcome = ActionSequencer::new(new_unit_id(), queue).run(&mut resolver);
        assert_eq!(resolver.cost_charges, 0);
        assert_eq!(outcome.resolved, 0);
        assert_eq!(outcome.skipped, 2);
    }

    #[test]
    fn test_empty_queue_charges_nothing() {
        let mut resolver = Recorder::new();
        let outcome =
            ActionSequencer::new(new_unit_id(), TargetQueue::empty(1)).run(&mut resolver);
        assert_eq!(resolver.cost_charges, 0);
        assert_eq!(outcome, DrainOutcome::default());
    }

    #[test]
    fn test_incapacitated_actor_flushes_remainder() {
        let (ids, queue) = queue_of(4);
        let mut resolver = Recorder::new();
        resolver.collapse_after = Some(2);
        let outcome = ActionSequencer::new(new_unit_id(), queue).run(&mut resolver);
        assert_eq!(outcome.resolved, 2);
        assert_eq!(outcome.flushed, 2);
        assert_eq!(resolver.resolved, vec![ids[0], ids[1]]);
        assert_eq!(resolver.cost_charges, 1);
    }

    #[test]
    fn test_cancel_before_cost_is_legal() {
        let (_, queue) = queue_of(2);
        let sequencer = ActionSequencer::new(new_unit_id(), queue);
        assert!(sequencer.cancel().is_ok());
    }

    #[test]
    fn test_cancel_after_cost_is_an_error() {
        let (_, queue) = queue_of(2);
        let mut resolver = Recorder::new();
        let mut sequencer = ActionSequencer::new(new_unit_id(), queue);
        assert!(sequencer.advance(&mut resolver));
        assert!(sequencer.has_started());
        assert!(matches!(
            sequencer.cancel(),
            Err(SkirmishError::InvalidState(_))
        ));
    }

    #[test]
    fn test_stepwise_advance_matches_run() {
        let (ids, queue) = queue_of(3);
        let mut resolver = Recorder::new();
        let mut sequencer = ActionSequencer::new(new_unit_id(), queue);
        assert_eq!(sequencer.remaining(), 3);
        assert!(sequencer.advance(&mut resolver));
        assert!(sequencer.advance(&mut resolver));
        assert!(!sequencer.advance(&mut resolver));
        assert_eq!(resolver.resolved, ids);
    }
}
