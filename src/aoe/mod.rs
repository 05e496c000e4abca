//! # Area of Effect Module
//!
//! The targeting pipeline: shape predicates decide which offsets belong to
//! an area, line-of-sight tracing filters them, the area builder freezes
//! the result into a snapshot, target selection orders the units inside it
//! into a queue, and the sequencer drains that queue against the host's
//! combat hooks.

pub mod area;
pub mod los;
pub mod selection;
pub mod sequencer;
pub mod shape;

pub use area::{build_area, build_area_with, position_in_active_area, units_in_shape, AreaSnapshot};
pub use los::{has_line_of_sight, BlockingRule, LosRule, LosTable};
pub use selection::{select_targets, QueuedTarget, TargetQueue};
pub use sequencer::{ActionSequencer, CombatResolver, DrainOutcome};
pub use shape::{AreaShape, NoExtension, ShapeExtension, ShapeSpec};
