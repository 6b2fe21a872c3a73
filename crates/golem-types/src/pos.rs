//! Voxel coordinates and cardinal directions.
//!
//! World positions are integer cell coordinates on the block grid. The
//! vertical axis is `y`; `north` is negative `z`, `east` is positive `x`.
//! All coordinate arithmetic saturates at the numeric bounds rather than
//! wrapping, so cursor math near the world edge degrades instead of
//! panicking.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// BlockPos
// ---------------------------------------------------------------------------

/// An integer cell coordinate on the world's block grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BlockPos {
    /// East-west axis (east is positive).
    pub x: i64,
    /// Vertical axis (up is positive).
    pub y: i64,
    /// North-south axis (south is positive).
    pub z: i64,
}

impl BlockPos {
    /// Create a position from its three components.
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Return this position displaced by the given deltas, saturating at
    /// the coordinate bounds.
    pub const fn offset(self, dx: i64, dy: i64, dz: i64) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            z: self.z.saturating_add(dz),
        }
    }

    /// The cell directly above this one.
    pub const fn up(self) -> Self {
        self.offset(0, 1, 0)
    }

    /// The cell directly below this one.
    pub const fn down(self) -> Self {
        self.offset(0, -1, 0)
    }

    /// The adjacent cell one step in `direction`.
    pub const fn step(self, direction: Direction) -> Self {
        self.step_n(direction, 1)
    }

    /// The cell `n` steps away in `direction`.
    pub const fn step_n(self, direction: Direction, n: i64) -> Self {
        let (dx, dz) = direction.unit();
        self.offset(dx.saturating_mul(n), 0, dz.saturating_mul(n))
    }

    /// The four horizontally adjacent cells, in fixed scan order:
    /// east, west, south, north.
    pub const fn horizontal_neighbors(self) -> [Self; 4] {
        [
            self.offset(1, 0, 0),
            self.offset(-1, 0, 0),
            self.offset(0, 0, 1),
            self.offset(0, 0, -1),
        ]
    }

    /// Chebyshev (chessboard) distance to `other`: the number of steps a
    /// king would need, used for bounded-radius scans.
    pub const fn chebyshev_distance(self, other: Self) -> i64 {
        let dx = self.x.saturating_sub(other.x).abs();
        let dy = self.y.saturating_sub(other.y).abs();
        let dz = self.z.saturating_sub(other.z).abs();
        let mut max = dx;
        if dy > max {
            max = dy;
        }
        if dz > max {
            max = dz;
        }
        max
    }

    /// Squared Euclidean distance to `other`, saturating on overflow.
    /// Used only for nearest-of comparisons, never for exact geometry.
    pub const fn distance_sq(self, other: Self) -> i64 {
        let dx = self.x.saturating_sub(other.x);
        let dy = self.y.saturating_sub(other.y);
        let dz = self.z.saturating_sub(other.z);
        dx.saturating_mul(dx)
            .saturating_add(dy.saturating_mul(dy))
            .saturating_add(dz.saturating_mul(dz))
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// A horizontal cardinal direction on the block grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Negative `z`.
    North,
    /// Positive `x`.
    East,
    /// Positive `z`.
    South,
    /// Negative `x`.
    West,
}

impl Direction {
    /// Unit step vector `(dx, dz)` for one cell of travel.
    pub const fn unit(self) -> (i64, i64) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// The direction 90 degrees clockwise (N -> E -> S -> W -> N).
    pub const fn clockwise(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// The direction to the left of travel (90 degrees counter-clockwise).
    pub const fn left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// The direction to the right of travel (90 degrees clockwise).
    pub const fn right(self) -> Self {
        self.clockwise()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
