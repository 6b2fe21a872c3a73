//! Ore block-name catalog.
//!
//! Branch-mining counts and reports ore blocks by name. The catalog covers
//! each base ore plus its deepslate variant, since tunnels below the stone
//! transition encounter the deepslate forms of the same seams.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Base ore names; each also exists as a `deepslate_` variant.
const BASE_ORES: [&str; 8] = [
    "coal_ore",
    "copper_ore",
    "iron_ore",
    "gold_ore",
    "redstone_ore",
    "lapis_ore",
    "diamond_ore",
    "emerald_ore",
];

/// Immutable set of block names treated as ore.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OreCatalog {
    names: BTreeSet<String>,
}

impl OreCatalog {
    /// The standard catalog: eight base ores and their deepslate variants.
    pub fn standard() -> Self {
        let mut names = BTreeSet::new();
        for base in BASE_ORES {
            names.insert(base.to_owned());
            names.insert(format!("deepslate_{base}"));
        }
        Self { names }
    }

    /// Whether `block_name` counts as ore.
    pub fn is_ore(&self, block_name: &str) -> bool {
        self.names.contains(block_name)
    }

    /// Iterate over all catalog names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of names in the catalog.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_covers_both_variants() {
        let catalog = OreCatalog::standard();
        assert_eq!(catalog.len(), 16);
        assert!(catalog.is_ore("iron_ore"));
        assert!(catalog.is_ore("deepslate_iron_ore"));
        assert!(catalog.is_ore("diamond_ore"));
        assert!(catalog.is_ore("deepslate_diamond_ore"));
    }

    #[test]
    fn non_ore_blocks_are_rejected() {
        let catalog = OreCatalog::standard();
        assert!(!catalog.is_ore("stone"));
        assert!(!catalog.is_ore("deepslate"));
        assert!(!catalog.is_ore("iron_block"));
    }
}
