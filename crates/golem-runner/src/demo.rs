//! The built-in demo world.
//!
//! A small self-contained map for exercising every behavior without a
//! live server connection:
//!
//! - a wheat field and a carrot row south of spawn, planted over farmland
//! - two chests east of spawn, each with clear standing room to its west
//! - a stone shelf to the north, seeded with ore, for branch mining
//! - a companion player to follow
//!
//! The surface sits at y = 64, farmland one cell below. Crop growth
//! stages and the ore scatter in the shelf are randomized for variety,
//! but a fixed set of cells is always mature and a fixed set of ore
//! cells always sits on the first northbound branch, so the first farm
//! pass and the first mining branch are guaranteed to find work.

use golem_types::{BlockPos, Durability, Vitals};
use golem_world::SimWorld;
use rand::Rng;

/// Wheat cells that always start mature.
const MATURE_WHEAT: [BlockPos; 4] = [
    BlockPos::new(0, 64, 3),
    BlockPos::new(1, 64, 3),
    BlockPos::new(-1, 64, 4),
    BlockPos::new(2, 64, 4),
];

/// Carrot cells that always start mature.
const MATURE_CARROTS: [BlockPos; 2] = [BlockPos::new(0, 64, 6), BlockPos::new(1, 64, 6)];

/// Chest locations.
const CHESTS: [BlockPos; 2] = [BlockPos::new(6, 64, 0), BlockPos::new(6, 64, 4)];

/// Ore cells lying inside the first northbound branch's cross-section.
const SEEDED_ORES: [(&str, BlockPos); 3] = [
    ("coal_ore", BlockPos::new(0, 64, -6)),
    ("coal_ore", BlockPos::new(-1, 65, -9)),
    ("iron_ore", BlockPos::new(1, 64, -13)),
];

/// Build the demo world around an agent named `agent_name`.
///
/// The agent spawns at the origin of the surface plane, holding a worn
/// pickaxe and carrying enough seed stock to keep the farm cycle
/// replanting from the first harvest.
pub fn create_demo_world(agent_name: &str) -> SimWorld {
    let mut rng = rand::rng();

    let mut builder = SimWorld::builder()
        .agent_name(agent_name)
        .agent_at(BlockPos::new(0, 64, 0))
        .vitals(Vitals::full())
        .carrying("wheat_seeds", 12)
        .carrying("carrot", 6)
        .holding("iron_pickaxe", 1, Some(Durability { used: 63, max: 250 }))
        .drops(
            "wheat",
            vec![("wheat".to_owned(), 1), ("wheat_seeds".to_owned(), 2)],
        )
        .drops("carrots", vec![("carrot".to_owned(), 2)])
        .drops("coal_ore", vec![("coal".to_owned(), 1)])
        .drops("iron_ore", vec![("raw_iron".to_owned(), 1)])
        .drops("stone", vec![("cobblestone".to_owned(), 1)])
        .plants("wheat_seeds", "wheat")
        .plants("carrot", "carrots");

    // Wheat field: two rows over farmland.
    for x in -4..=3_i64 {
        for z in 3..=4_i64 {
            let cell = BlockPos::new(x, 64, z);
            builder = builder.block("farmland", cell.down());
            if MATURE_WHEAT.contains(&cell) {
                builder = builder.crop("wheat", cell, 7);
            } else {
                builder = builder.crop("wheat", cell, rng.random_range(0..7));
            }
        }
    }

    // Carrot row.
    for x in -1..=2_i64 {
        let cell = BlockPos::new(x, 64, 6);
        builder = builder.block("farmland", cell.down());
        if MATURE_CARROTS.contains(&cell) {
            builder = builder.crop("carrots", cell, 7);
        } else {
            builder = builder.crop("carrots", cell, rng.random_range(0..7));
        }
    }

    // Stone shelf north of spawn with a light ore scatter.
    for x in -3..=3_i64 {
        for z in -24..=-4_i64 {
            for y in 64..=66_i64 {
                let roll = rng.random_range(0_u32..100);
                let name = if roll < 4 {
                    "coal_ore"
                } else if roll < 6 {
                    "iron_ore"
                } else {
                    "stone"
                };
                builder = builder.block(name, BlockPos::new(x, y, z));
            }
        }
    }

    // Guaranteed finds on the first branch, placed over the scatter.
    for (name, cell) in SEEDED_ORES {
        builder = builder.block(name, cell);
    }

    // Chests with standing room, and someone to follow.
    for chest in CHESTS {
        builder = builder
            .chest(chest)
            .passable_block("air", chest.offset(-1, 0, 0));
    }
    builder = builder.player("steve", BlockPos::new(4, 64, -3));

    builder.build()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
