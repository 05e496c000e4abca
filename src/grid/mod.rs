//! # Grid Module
//!
//! Coordinate math for the battle grid: positions, the four cardinal
//! facings, and grid bounds with optional wrap-around on either axis.
//!
//! All distances are Manhattan unless a shape explicitly interprets the
//! offsets differently. Wrap-aware helpers always measure along the
//! shorter arc of a looping axis.

use serde::{Deserialize, Serialize};

/// Represents a 2D coordinate on the battle grid.
///
/// # Examples
///
/// ```
/// use skirmish::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// assert_eq!(pos.manhattan_distance(Position::new(13, 9)), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Calculates the Manhattan distance to another position, ignoring any
    /// grid wrap-around. Use [`GridBounds::distance`] on looping maps.
    pub fn manhattan_distance(self, other: Position) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }

    /// Returns all 8 adjacent positions, in fixed scan order: the top row
    /// left to right, then the middle flanks, then the bottom row.
    ///
    /// Cover detection depends on this order for deterministic tie-breaks.
    pub fn adjacent_positions(self) -> Vec<Position> {
        vec![
            Position::new(self.x - 1, self.y - 1),
            Position::new(self.x, self.y - 1),
            Position::new(self.x + 1, self.y - 1),
            Position::new(self.x - 1, self.y),
            Position::new(self.x + 1, self.y),
            Position::new(self.x - 1, self.y + 1),
            Position::new(self.x, self.y + 1),
            Position::new(self.x + 1, self.y + 1),
        ]
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// The four cardinal facings used for AoE rotation and attack-direction
/// classification. The grid's y axis grows downward, so `North` is `(0, -1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a facing to its unit delta `(dx, dy)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skirmish::Direction;
    ///
    /// assert_eq!(Direction::North.delta(), (0, -1));
    /// assert_eq!(Direction::East.delta(), (1, 0));
    /// ```
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// Returns the opposite facing.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Whether this facing points along the vertical axis.
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }

    /// Returns all four facings.
    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }
}

/// Dimensions of the battle grid, with optional wrap-around per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    pub width: u32,
    pub height: u32,
    pub loop_horizontal: bool,
    pub loop_vertical: bool,
}

impl GridBounds {
    /// Creates non-looping bounds of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            loop_horizontal: false,
            loop_vertical: false,
        }
    }

    /// Creates bounds that wrap on both axes.
    pub fn looping(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            loop_horizontal: true,
            loop_vertical: true,
        }
    }

    /// Whether a position lies inside the grid rectangle.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }

    /// Normalizes a position onto the grid, wrapping looping axes modulo
    /// the grid size. Non-looping axes pass through unchanged.
    pub fn wrap_position(&self, pos: Position) -> Position {
        let mut x = pos.x;
        let mut y = pos.y;
        if self.loop_horizontal {
            x = x.rem_euclid(self.width as i32);
        }
        if self.loop_vertical {
            y = y.rem_euclid(self.height as i32);
        }
        Position::new(x, y)
    }

    /// Reduces an offset to its shortest representation, folding each
    /// looping axis across the seam when the direct span exceeds half the
    /// grid size.
    pub fn wrap_delta(&self, dx: i32, dy: i32) -> (i32, i32) {
        let mut dx = dx;
        let mut dy = dy;
        if self.loop_horizontal {
            let w = self.width as i32;
            if dx > w / 2 {
                dx -= w;
            }
            if dx < -w / 2 {
                dx += w;
            }
        }
        if self.loop_vertical {
            let h = self.height as i32;
            if dy > h / 2 {
                dy -= h;
            }
            if dy < -h / 2 {
                dy += h;
            }
        }
        (dx, dy)
    }

    /// Manhattan distance between two positions, measured along the shorter
    /// arc on looping axes. Spans wider than the grid reduce modulo the
    /// grid size first, so un-normalized positions never underflow.
    pub fn distance(&self, from: Position, to: Position) -> u32 {
        let mut dx = (from.x - to.x).unsigned_abs();
        let mut dy = (from.y - to.y).unsigned_abs();
        if self.loop_horizontal && self.width > 0 {
            dx %= self.width;
            dx = dx.min(self.width - dx);
        }
        if self.loop_vertical && self.height > 0 {
            dy %= self.height;
            dy = dy.min(self.height - dy);
        }
        dx + dy
    }

    /// Derives the facing from one position toward another.
    ///
    /// The dominant axis wins; on an exact diagonal tie the vertical axis
    /// is preferred. Returns `None` when both positions coincide.
    pub fn facing_toward(&self, from: Position, to: Position) -> Option<Direction> {
        let (dx, dy) = self.wrap_delta(from.x - to.x, from.y - to.y);
        if dx.abs() > dy.abs() {
            Some(if dx > 0 {
                Direction::West
            } else {
                Direction::East
            })
        } else if dy != 0 {
            Some(if dy > 0 {
                Direction::North
            } else {
                Direction::South
            })
        } else {
            None
        }
    }
}
