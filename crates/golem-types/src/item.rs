//! Inventory stacks and tool durability.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Durability
// ---------------------------------------------------------------------------

/// Wear state of a damageable tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durability {
    /// Durability points already consumed.
    pub used: u32,
    /// Total durability points when new.
    pub max: u32,
}

impl Durability {
    /// Durability points left before the tool breaks.
    pub const fn remaining(&self) -> u32 {
        self.max.saturating_sub(self.used)
    }
}

// ---------------------------------------------------------------------------
// ItemStack
// ---------------------------------------------------------------------------

/// A stack of identical items in the agent's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item type name, e.g. `"wheat_seeds"` or `"iron_pickaxe"`.
    pub name: String,
    /// Number of items in the stack.
    pub count: u32,
    /// Wear state, present only for tools that report it.
    pub durability: Option<Durability>,
}

impl ItemStack {
    /// Create a plain stack with no durability data.
    pub const fn new(name: String, count: u32) -> Self {
        Self {
            name,
            count,
            durability: None,
        }
    }

    /// Whether this item is a pickaxe-class tool.
    pub fn is_pickaxe(&self) -> bool {
        self.name.ends_with("_pickaxe")
    }
}

/// Sum the carried count of one item type across `stacks`.
pub fn count_of(stacks: &[ItemStack], name: &str) -> u64 {
    stacks
        .iter()
        .filter(|stack| stack.name == name)
        .fold(0_u64, |total, stack| {
            total.saturating_add(u64::from(stack.count))
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_subtracts_used_from_max() {
        let d = Durability { used: 245, max: 250 };
        assert_eq!(d.remaining(), 5);
    }

    #[test]
    fn remaining_saturates_when_overworn() {
        let d = Durability { used: 300, max: 250 };
        assert_eq!(d.remaining(), 0);
    }

    #[test]
    fn pickaxe_detection_by_suffix() {
        assert!(ItemStack::new("iron_pickaxe".to_owned(), 1).is_pickaxe());
        assert!(ItemStack::new("diamond_pickaxe".to_owned(), 1).is_pickaxe());
        assert!(!ItemStack::new("iron_axe".to_owned(), 1).is_pickaxe());
        assert!(!ItemStack::new("wheat".to_owned(), 12).is_pickaxe());
    }

    #[test]
    fn count_of_sums_across_split_stacks() {
        let stacks = vec![
            ItemStack::new("wheat".to_owned(), 64),
            ItemStack::new("wheat_seeds".to_owned(), 10),
            ItemStack::new("wheat".to_owned(), 16),
        ];
        assert_eq!(count_of(&stacks, "wheat"), 80);
        assert_eq!(count_of(&stacks, "wheat_seeds"), 10);
        assert_eq!(count_of(&stacks, "carrot"), 0);
    }
}
