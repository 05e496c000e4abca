//! # Shape Evaluation
//!
//! Pure integer predicates deciding whether a relative offset belongs to a
//! named AoE shape. Directional shapes are evaluated in the facing's
//! rotated frame: `forward` points where the facing points, `sideways` is
//! perpendicular to it.
//!
//! Every predicate is total over all integer inputs; offsets outside the
//! `[-size, size]` drawing boundary are rejected before any shape logic
//! runs.

use crate::grid::Direction;
use serde::{Deserialize, Serialize};

/// The shape of an area of effect.
///
/// Sizes describe the maximum distance from the origin; a non-zero
/// `min_size` carves a hole around it. Unrecognized shape names parse into
/// [`AreaShape::Custom`] and resolve through a [`ShapeExtension`].
///
/// # Examples
///
/// ```
/// use skirmish::{AreaShape, Direction};
///
/// let circle = AreaShape::Circle;
/// assert!(circle.accepts(1, 1, 2, 0, Direction::South));
/// assert!(!circle.accepts(2, 1, 2, 0, Direction::South));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AreaShape {
    /// Manhattan diamond around the origin
    Circle,
    /// Chebyshev square around the origin
    Square,
    /// Straight line extending forward
    Line,
    /// 90 degree cone extending forward
    Cone,
    /// V opening forward from the origin
    Split,
    /// V folding back behind the origin
    Arc,
    /// Line extending to both sides
    Side,
    /// Side arm plus a forward tail
    Tee,
    /// Cross along both axes
    Plus,
    /// X along both diagonals
    Cross,
    /// Union of plus and cross
    Star,
    /// Every other tile of the square
    Checker,
    /// A shape this crate does not know; resolved via [`ShapeExtension`]
    Custom(String),
}

impl Default for AreaShape {
    fn default() -> Self {
        AreaShape::Circle
    }
}

impl From<String> for AreaShape {
    fn from(name: String) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "" | "circle" => AreaShape::Circle,
            "square" => AreaShape::Square,
            "line" => AreaShape::Line,
            "cone" => AreaShape::Cone,
            "split" => AreaShape::Split,
            "arc" => AreaShape::Arc,
            "side" => AreaShape::Side,
            "tee" => AreaShape::Tee,
            "plus" => AreaShape::Plus,
            "cross" => AreaShape::Cross,
            "star" => AreaShape::Star,
            "checker" => AreaShape::Checker,
            _ => AreaShape::Custom(name),
        }
    }
}

impl From<AreaShape> for String {
    fn from(shape: AreaShape) -> Self {
        match shape {
            AreaShape::Circle => "circle".to_string(),
            AreaShape::Square => "square".to_string(),
            AreaShape::Line => "line".to_string(),
            AreaShape::Cone => "cone".to_string(),
            AreaShape::Split => "split".to_string(),
            AreaShape::Arc => "arc".to_string(),
            AreaShape::Side => "side".to_string(),
            AreaShape::Tee => "tee".to_string(),
            AreaShape::Plus => "plus".to_string(),
            AreaShape::Cross => "cross".to_string(),
            AreaShape::Star => "star".to_string(),
            AreaShape::Checker => "checker".to_string(),
            AreaShape::Custom(name) => name,
        }
    }
}

/// Extension point for shapes defined outside this crate.
///
/// The default implementation recognizes nothing and rejects every offset,
/// so unknown shape names fail closed to an empty area.
pub trait ShapeExtension {
    /// Whether this extension can evaluate the named shape.
    fn recognizes(&self, _name: &str) -> bool {
        false
    }

    /// Evaluates the named shape at the given offset. `forward` and
    /// `sideways` are the offset rotated into the facing's frame, widened
    /// so implementations never have to worry about overflow.
    #[allow(clippy::too_many_arguments)]
    fn accepts(
        &self,
        _name: &str,
        _dx: i32,
        _dy: i32,
        _forward: i64,
        _sideways: i64,
        _size: u32,
        _min_size: u32,
    ) -> bool {
        false
    }
}

/// The empty shape extension.
pub struct NoExtension;

impl ShapeExtension for NoExtension {}

/// One fully specified area: sizes, shape, and the facing that rotates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeSpec {
    pub size: u32,
    pub min_size: u32,
    pub shape: AreaShape,
    pub facing: Direction,
}

impl AreaShape {
    /// Whether the offset `(dx, dy)` from the area origin belongs to this
    /// shape, with custom shapes resolved through `extension`.
    pub fn accepts_with(
        &self,
        extension: &dyn ShapeExtension,
        dx: i32,
        dy: i32,
        size: u32,
        min_size: u32,
        facing: Direction,
    ) -> bool {
        // outside the drawing boundary, doesn't count
        if dx.unsigned_abs() > size || dy.unsigned_abs() > size {
            return false;
        }

        // widened so no arithmetic below can overflow at the i32 extremes
        let (wx, wy) = (i64::from(dx), i64::from(dy));
        let size = i64::from(size);
        let min = i64::from(min_size);

        let (fx, fy) = facing.delta();
        let forward = wx * i64::from(fx) + wy * i64::from(fy);
        let sideways = wx * i64::from(fy) - wy * i64::from(fx);

        match self {
            AreaShape::Circle => {
                let dist = wx.abs() + wy.abs();
                dist >= min && dist <= size
            }
            AreaShape::Square => !(wx.abs() < min && wy.abs() < min),
            AreaShape::Line => sideways == 0 && forward >= min && forward <= size,
            AreaShape::Cone => {
                forward >= min && forward <= size && sideways.abs() <= forward.abs()
            }
            AreaShape::Split => {
                forward >= min && forward <= size && sideways.abs() == forward.abs()
            }
            AreaShape::Arc => {
                forward >= -size && forward <= -min && sideways.abs() == forward.abs()
            }
            AreaShape::Side => forward == 0 && sideways.abs() >= min && sideways.abs() <= size,
            AreaShape::Tee => {
                forward >= 0 && (wx == 0 || wy == 0) && !(wx.abs() < min && wy.abs() < min)
            }
            AreaShape::Plus => (wx == 0 || wy == 0) && !(wx.abs() < min && wy.abs() < min),
            AreaShape::Cross => wx.abs() == wy.abs() && wx.abs() >= min && wx.abs() <= size,
            AreaShape::Star => {
                (wx.abs() == wy.abs() || wx == 0 || wy == 0)
                    && !(wx.abs() < min && wy.abs() < min)
            }
            AreaShape::Checker => (wx + wy) % 2 == 0 && !(wx.abs() < min && wy.abs() < min),
            AreaShape::Custom(name) => {
                extension.accepts(name, dx, dy, forward, sideways, size as u32, min_size)
            }
        }
    }

    /// Whether the offset belongs to this shape, with no shape extension
    /// (custom shapes reject everything).
    pub fn accepts(&self, dx: i32, dy: i32, size: u32, min_size: u32, facing: Direction) -> bool {
        self.accepts_with(&NoExtension, dx, dy, size, min_size, facing)
    }
}
