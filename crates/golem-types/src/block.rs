//! Block snapshots and passability.
//!
//! A [`BlockInfo`] is a momentary copy of one cell's state as reported by
//! the world layer. Behaviors never hold these across a suspension point;
//! they re-query after every world mutation.

use serde::{Deserialize, Serialize};

use crate::pos::BlockPos;

/// Block names the tunnel excavator skips: nothing to break.
pub const AIR_BLOCKS: [&str; 2] = ["air", "cave_air"];

/// The indestructible boundary block at the world floor.
pub const UNBREAKABLE_BLOCK: &str = "bedrock";

// ---------------------------------------------------------------------------
// BlockFace
// ---------------------------------------------------------------------------

/// The face of a support block a new block is placed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockFace {
    /// Place on top of the support (offset `(0, 1, 0)`).
    Top,
    /// Place under the support (offset `(0, -1, 0)`).
    Bottom,
    /// Place against the north face (offset `(0, 0, -1)`).
    North,
    /// Place against the south face (offset `(0, 0, 1)`).
    South,
    /// Place against the east face (offset `(1, 0, 0)`).
    East,
    /// Place against the west face (offset `(-1, 0, 0)`).
    West,
}

impl BlockFace {
    /// Offset from the support cell to the cell the new block occupies.
    pub const fn offset(self) -> (i64, i64, i64) {
        match self {
            Self::Top => (0, 1, 0),
            Self::Bottom => (0, -1, 0),
            Self::North => (0, 0, -1),
            Self::South => (0, 0, 1),
            Self::East => (1, 0, 0),
            Self::West => (-1, 0, 0),
        }
    }
}

// ---------------------------------------------------------------------------
// BoundingVolume
// ---------------------------------------------------------------------------

/// Collision shape of a block, as far as movement planning cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundingVolume {
    /// The cell can be walked through (air, crops, torches).
    Empty,
    /// The cell is occupied by a solid obstacle.
    Solid,
}

// ---------------------------------------------------------------------------
// BlockInfo
// ---------------------------------------------------------------------------

/// Snapshot of a single world cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    /// Block type name, e.g. `"wheat"` or `"deepslate_iron_ore"`.
    pub name: String,
    /// The cell this snapshot describes.
    pub position: BlockPos,
    /// Growth stage for crop-like blocks, `None` for everything else.
    pub growth_stage: Option<u8>,
    /// Collision shape of the cell.
    pub bounding: BoundingVolume,
}

impl BlockInfo {
    /// Whether an agent can stand in or walk through this cell.
    pub const fn is_passable(&self) -> bool {
        matches!(self.bounding, BoundingVolume::Empty)
    }

    /// Whether this cell holds nothing worth breaking.
    pub fn is_air(&self) -> bool {
        AIR_BLOCKS.contains(&self.name.as_str())
    }

    /// Whether this cell can never be broken.
    pub fn is_unbreakable(&self) -> bool {
        self.name == UNBREAKABLE_BLOCK
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn block(name: &str, bounding: BoundingVolume) -> BlockInfo {
        BlockInfo {
            name: name.to_owned(),
            position: BlockPos::new(0, 0, 0),
            growth_stage: None,
            bounding,
        }
    }

    #[test]
    fn passability_follows_bounding_volume() {
        assert!(block("air", BoundingVolume::Empty).is_passable());
        assert!(!block("stone", BoundingVolume::Solid).is_passable());
    }

    #[test]
    fn both_air_variants_are_air() {
        assert!(block("air", BoundingVolume::Empty).is_air());
        assert!(block("cave_air", BoundingVolume::Empty).is_air());
        assert!(!block("stone", BoundingVolume::Solid).is_air());
    }

    #[test]
    fn bedrock_is_unbreakable() {
        assert!(block("bedrock", BoundingVolume::Solid).is_unbreakable());
        assert!(!block("deepslate", BoundingVolume::Solid).is_unbreakable());
    }
}
