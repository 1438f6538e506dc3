/// Grid coordinates and displacement arithmetic.
///
/// `x` indexes columns, `y` indexes rows, origin at the top-left.
/// Signed so that a displacement (`delta`) and a position share one type.

use std::ops::{Add, Sub};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const ZERO: Coordinate = Coordinate { x: 0, y: 0 };
    pub const UP: Coordinate = Coordinate { x: 0, y: -1 };
    pub const DOWN: Coordinate = Coordinate { x: 0, y: 1 };
    pub const LEFT: Coordinate = Coordinate { x: -1, y: 0 };
    pub const RIGHT: Coordinate = Coordinate { x: 1, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Coordinate { x, y }
    }

    /// Component-wise absolute value, saturating at `i32::MAX`.
    pub fn abs(self) -> Self {
        Coordinate { x: self.x.saturating_abs(), y: self.y.saturating_abs() }
    }

    /// `self + rhs`, or `None` if either component overflows.
    pub fn checked_add(self, rhs: Coordinate) -> Option<Self> {
        Some(Coordinate { x: self.x.checked_add(rhs.x)?, y: self.y.checked_add(rhs.y)? })
    }

    /// `self - rhs` clamped to the `i32` range. Signs are always kept.
    pub fn saturating_sub(self, rhs: Coordinate) -> Self {
        Coordinate { x: self.x.saturating_sub(rhs.x), y: self.y.saturating_sub(rhs.y) }
    }

    /// Component-wise sign (-1, 0 or 1).
    pub fn signum(self) -> Self {
        Coordinate { x: self.x.signum(), y: self.y.signum() }
    }

    pub fn scaled(self, n: i32) -> Self {
        Coordinate { x: self.x * n, y: self.y * n }
    }

    /// Row and column indices, if both are non-negative.
    pub fn to_index(self) -> Option<(usize, usize)> {
        let row = usize::try_from(self.y).ok()?;
        let col = usize::try_from(self.x).ok()?;
        Some((row, col))
    }
}

impl Add for Coordinate {
    type Output = Coordinate;

    fn add(self, rhs: Coordinate) -> Coordinate {
        Coordinate { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Coordinate {
    type Output = Coordinate;

    fn sub(self, rhs: Coordinate) -> Coordinate {
        Coordinate { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
