//! # Map Module
//!
//! The battle map snapshot the targeting engine reads: terrain permeability
//! tags, cover regions, and the occupants currently on the field.
//!
//! The map is a plain value the host turn engine assembles each turn (or
//! keeps in sync incrementally). The targeting pipeline never mutates it;
//! everything here is a read-only collaborator from the engine's point of
//! view, with setters provided for the host and for tests.

use crate::grid::{Direction, GridBounds, Position};
use crate::modifiers::CoverStrength;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for map occupants.
pub type UnitId = Uuid;

/// Creates a new unique unit ID.
pub fn new_unit_id() -> UnitId {
    Uuid::new_v4()
}

/// Which team a unit fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Ally,
    Enemy,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Side {
        match self {
            Side::Ally => Side::Enemy,
            Side::Enemy => Side::Ally,
        }
    }
}

/// Classification of a map occupant for line-of-sight and targeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OccupantCategory {
    /// A combat unit fighting for a side
    Unit(Side),
    /// A generic obstacle (crate, boulder, destructible barrier)
    Obstacle,
    /// A scripted map entity (door, switch, trigger)
    Scripted,
}

impl OccupantCategory {
    /// The side this occupant fights for, if it is a unit.
    pub fn side(self) -> Option<Side> {
        match self {
            OccupantCategory::Unit(side) => Some(side),
            _ => None,
        }
    }
}

/// An entity standing on the battle map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Occupant {
    pub id: UnitId,
    pub position: Position,
    pub category: OccupantCategory,
    /// Facing used for attack-direction classification
    pub facing: Direction,
    /// Erased or defeated occupants stay in the table but are ignored
    /// by line of sight and targeting
    pub live: bool,
    /// Obstacles with no physical presence (pure markers) never block sight
    pub tangible: bool,
}

impl Occupant {
    /// Creates a live, tangible occupant.
    pub fn new(position: Position, category: OccupantCategory) -> Self {
        Self {
            id: new_unit_id(),
            position,
            category,
            facing: Direction::South,
            live: true,
            tangible: true,
        }
    }

    /// Creates a unit occupant fighting for the given side.
    pub fn unit(position: Position, side: Side) -> Self {
        Self::new(position, OccupantCategory::Unit(side))
    }

    /// Sets the facing, builder style.
    pub fn facing(mut self, facing: Direction) -> Self {
        self.facing = facing;
        self
    }

    /// Marks the occupant as an intangible marker, builder style.
    pub fn intangible(mut self) -> Self {
        self.tangible = false;
        self
    }

    /// The side this occupant fights for, if it is a unit.
    pub fn side(&self) -> Option<Side> {
        self.category.side()
    }
}

/// Snapshot of the battle map consumed by the targeting pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleMap {
    bounds: GridBounds,
    /// Sparse terrain permeability tags; untagged tiles read as 0
    terrain_tags: HashMap<Position, i32>,
    /// Tiles that grant cover and refuse movement endpoints
    cover: HashMap<Position, CoverStrength>,
    occupants: HashMap<UnitId, Occupant>,
}

impl BattleMap {
    /// Creates an empty map with the given bounds.
    pub fn new(bounds: GridBounds) -> Self {
        Self {
            bounds,
            terrain_tags: HashMap::new(),
            cover: HashMap::new(),
            occupants: HashMap::new(),
        }
    }

    /// The grid bounds of this map.
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Terrain permeability tag at a position. Untagged or out-of-bounds
    /// tiles read as 0 (fully permeable).
    pub fn terrain_tag(&self, pos: Position) -> i32 {
        self.terrain_tags.get(&pos).copied().unwrap_or(0)
    }

    /// Sets the terrain permeability tag for a tile.
    pub fn set_terrain_tag(&mut self, pos: Position, tag: i32) {
        self.terrain_tags.insert(pos, tag);
    }

    /// The cover strength of a tile, if it is a cover tile.
    pub fn cover_at(&self, pos: Position) -> Option<CoverStrength> {
        self.cover.get(&pos).copied()
    }

    /// Marks a tile as granting cover.
    pub fn set_cover(&mut self, pos: Position, strength: CoverStrength) {
        self.cover.insert(pos, strength);
    }

    /// Whether a unit may end its movement on this tile. Cover tiles and
    /// positions outside the grid are never valid destinations.
    pub fn is_valid_destination(&self, pos: Position) -> bool {
        self.bounds.contains(pos) && self.cover_at(pos).is_none()
    }

    /// Adds an occupant and returns its ID. The position is wrapped onto
    /// looping axes, same as [`move_occupant`](Self::move_occupant).
    pub fn add_occupant(&mut self, mut occupant: Occupant) -> UnitId {
        occupant.position = self.bounds.wrap_position(occupant.position);
        let id = occupant.id;
        self.occupants.insert(id, occupant);
        id
    }

    /// Looks up an occupant by ID.
    pub fn occupant(&self, id: UnitId) -> Option<&Occupant> {
        self.occupants.get(&id)
    }

    /// Iterates over every occupant, live or not.
    pub fn occupants(&self) -> impl Iterator<Item = &Occupant> {
        self.occupants.values()
    }

    /// Iterates over live occupants only.
    pub fn live_occupants(&self) -> impl Iterator<Item = &Occupant> {
        self.occupants.values().filter(|o| o.live)
    }

    /// First live occupant standing on a tile, if any.
    pub fn occupant_at(&self, pos: Position) -> Option<&Occupant> {
        self.occupants.values().find(|o| o.live && o.position == pos)
    }

    /// Marks an occupant as erased; it no longer blocks sight or qualifies
    /// as a target. Unknown IDs are ignored.
    pub fn erase_occupant(&mut self, id: UnitId) {
        if let Some(occupant) = self.occupants.get_mut(&id) {
            occupant.live = false;
        }
    }

    /// Moves an occupant, wrapping the position onto looping axes.
    pub fn move_occupant(&mut self, id: UnitId, to: Position) {
        let to = self.bounds.wrap_position(to);
        if let Some(occupant) = self.occupants.get_mut(&id) {
            occupant.position = to;
        }
    }

    /// Turns an occupant to a new facing.
    pub fn turn_occupant(&mut self, id: UnitId, facing: Direction) {
        if let Some(occupant) = self.occupants.get_mut(&id) {
            occupant.facing = facing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_tags_default_to_zero() {
        let mut map = BattleMap::new(GridBounds::new(10, 10));
        assert_eq!(map.terrain_tag(Position::new(3, 3)), 0);
        map.set_terrain_tag(Position::new(3, 3), 4);
        assert_eq!(map.terrain_tag(Position::new(3, 3)), 4);
    }

    #[test]
    fn test_cover_tiles_refuse_destinations() {
        let mut map = BattleMap::new(GridBounds::new(10, 10));
        let pos = Position::new(4, 4);
        assert!(map.is_valid_destination(pos));
        map.set_cover(pos, CoverStrength::Light);
        assert!(!map.is_valid_destination(pos));
        assert!(!map.is_valid_destination(Position::new(-1, 0)));
    }

    #[test]
    fn test_erased_occupants_are_skipped() {
        let mut map = BattleMap::new(GridBounds::new(10, 10));
        let pos = Position::new(2, 2);
        let id = map.add_occupant(Occupant::unit(pos, Side::Enemy));
        assert!(map.occupant_at(pos).is_some());
        map.erase_occupant(id);
        assert!(map.occupant_at(pos).is_none());
        assert_eq!(map.live_occupants().count(), 0);
        assert_eq!(map.occupants().count(), 1);
    }

    #[test]
    fn test_add_wraps_on_looping_maps() {
        let mut map = BattleMap::new(GridBounds::looping(10, 10));
        let id = map.add_occupant(Occupant::unit(Position::new(-1, 12), Side::Enemy));
        assert_eq!(map.occupant(id).unwrap().position, Position::new(9, 2));
    }

    #[test]
    fn test_move_wraps_on_looping_maps() {
        let mut map = BattleMap::new(GridBounds::looping(10, 10));
        let id = map.add_occupant(Occupant::unit(Position::new(0, 0), Side::Ally));
        map.move_occupant(id, Position::new(-1, 3));
        assert_eq!(map.occupant(id).unwrap().position, Position::new(9, 3));
    }
}
