//! Crop species registry: maturity thresholds, seed items, product items.
//!
//! Farming decisions key off the block name of a crop. Each species grows
//! through numbered stages; a crop is harvestable exactly when its growth
//! stage reaches the species' mature stage. Some species (wheat-like) have
//! distinct seed and product items, others (carrot-like) replant their own
//! product.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::block::BlockInfo;

// ---------------------------------------------------------------------------
// CropSpec
// ---------------------------------------------------------------------------

/// Growth and yield parameters for one crop species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropSpec {
    /// Growth stage at which the crop is harvestable.
    pub mature_stage: u8,
    /// Item equipped and placed to replant the crop.
    pub seed_item: String,
    /// Item dropped when the mature crop is broken.
    pub product_item: String,
}

impl CropSpec {
    /// Whether the seed and the product are the same item, in which case
    /// surplus management keeps one pool instead of two.
    pub fn seed_is_product(&self) -> bool {
        self.seed_item == self.product_item
    }
}

// ---------------------------------------------------------------------------
// CropRegistry
// ---------------------------------------------------------------------------

/// Immutable mapping from crop block name to its [`CropSpec`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegistry {
    crops: BTreeMap<String, CropSpec>,
}

impl CropRegistry {
    /// The standard four-species registry.
    pub fn standard() -> Self {
        let mut crops = BTreeMap::new();
        crops.insert(
            "wheat".to_owned(),
            CropSpec {
                mature_stage: 7,
                seed_item: "wheat_seeds".to_owned(),
                product_item: "wheat".to_owned(),
            },
        );
        crops.insert(
            "carrots".to_owned(),
            CropSpec {
                mature_stage: 7,
                seed_item: "carrot".to_owned(),
                product_item: "carrot".to_owned(),
            },
        );
        crops.insert(
            "potatoes".to_owned(),
            CropSpec {
                mature_stage: 7,
                seed_item: "potato".to_owned(),
                product_item: "potato".to_owned(),
            },
        );
        crops.insert(
            "beetroots".to_owned(),
            CropSpec {
                mature_stage: 3,
                seed_item: "beetroot_seeds".to_owned(),
                product_item: "beetroot".to_owned(),
            },
        );
        Self { crops }
    }

    /// Look up the [`CropSpec`] for a crop block name.
    pub fn get(&self, block_name: &str) -> Option<&CropSpec> {
        self.crops.get(block_name)
    }

    /// Whether `block` is a known crop at its mature growth stage.
    pub fn is_mature(&self, block: &BlockInfo) -> bool {
        self.crops.get(&block.name).is_some_and(|spec| {
            block.growth_stage == Some(spec.mature_stage)
        })
    }

    /// Number of registered species.
    pub fn len(&self) -> usize {
        self.crops.len()
    }

    /// Whether the registry holds no species.
    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::block::BoundingVolume;
    use crate::pos::BlockPos;

    use super::*;

    fn crop_block(name: &str, stage: u8) -> BlockInfo {
        BlockInfo {
            name: name.to_owned(),
            position: BlockPos::new(0, 64, 0),
            growth_stage: Some(stage),
            bounding: BoundingVolume::Empty,
        }
    }

    #[test]
    fn standard_registry_has_four_species() {
        let reg = CropRegistry::standard();
        assert_eq!(reg.len(), 4);
        assert!(reg.get("wheat").is_some());
        assert!(reg.get("carrots").is_some());
        assert!(reg.get("potatoes").is_some());
        assert!(reg.get("beetroots").is_some());
        assert!(reg.get("melon").is_none());
    }

    #[test]
    fn wheat_has_distinct_seed_and_product() {
        let reg = CropRegistry::standard();
        let wheat = reg.get("wheat").unwrap();
        assert_eq!(wheat.seed_item, "wheat_seeds");
        assert_eq!(wheat.product_item, "wheat");
        assert!(!wheat.seed_is_product());
    }

    #[test]
    fn carrots_replant_their_product() {
        let reg = CropRegistry::standard();
        let carrots = reg.get("carrots").unwrap();
        assert!(carrots.seed_is_product());
    }

    #[test]
    fn maturity_requires_exact_stage() {
        let reg = CropRegistry::standard();
        assert!(reg.is_mature(&crop_block("wheat", 7)));
        assert!(!reg.is_mature(&crop_block("wheat", 6)));
        assert!(reg.is_mature(&crop_block("beetroots", 3)));
        assert!(!reg.is_mature(&crop_block("beetroots", 7)));
    }

    #[test]
    fn unknown_blocks_are_never_mature() {
        let reg = CropRegistry::standard();
        assert!(!reg.is_mature(&crop_block("stone", 7)));
    }

    #[test]
    fn blocks_without_stage_are_never_mature() {
        let reg = CropRegistry::standard();
        let mut block = crop_block("wheat", 7);
        block.growth_stage = None;
        assert!(!reg.is_mature(&block));
    }
}
