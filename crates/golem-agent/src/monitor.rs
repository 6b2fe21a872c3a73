//! Deposit-threshold decisions over inventory and vitals snapshots.
//!
//! Pure functions: no I/O, no world access. The branch-mine loop calls
//! [`needs_deposit`] once per cycle, before excavating, and interrupts
//! itself for a deposit run when any trip condition holds.

use std::fmt;

use golem_types::{ItemStack, OreCatalog, Vitals};

use crate::config::MineConfig;

// ---------------------------------------------------------------------------
// DepositReason
// ---------------------------------------------------------------------------

/// Why a deposit run was triggered, in priority order.
///
/// The order matters only for the reason reported to operators; any true
/// condition interrupts mining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepositReason {
    /// Carried ore reached the cap.
    OreCap,
    /// Health dropped to the floor.
    CriticalHealth,
    /// The held pickaxe is nearly worn out.
    ToolNearFailure,
}

impl fmt::Display for DepositReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::OreCap => "ore cap",
            Self::CriticalHealth => "critical health",
            Self::ToolNearFailure => "tool near-failure",
        };
        write!(f, "{reason}")
    }
}

// ---------------------------------------------------------------------------
// Threshold checks
// ---------------------------------------------------------------------------

/// Total carried ore items across all stacks.
pub fn carried_ore(ores: &OreCatalog, inventory: &[ItemStack]) -> u64 {
    inventory
        .iter()
        .filter(|stack| ores.is_ore(&stack.name))
        .fold(0_u64, |total, stack| {
            total.saturating_add(u64::from(stack.count))
        })
}

/// Evaluate the three deposit trip conditions in priority order and
/// return the first matched reason, or `None` when mining may continue.
///
/// The tool-wear condition is skipped when the held pickaxe reports no
/// durability data: the check fails open and mining continues.
pub fn needs_deposit(
    config: &MineConfig,
    ores: &OreCatalog,
    inventory: &[ItemStack],
    vitals: Vitals,
    held: Option<&ItemStack>,
) -> Option<DepositReason> {
    if carried_ore(ores, inventory) >= config.ore_cap {
        return Some(DepositReason::OreCap);
    }
    if vitals.health <= config.health_floor {
        return Some(DepositReason::CriticalHealth);
    }
    if let Some(tool) = held {
        if tool.is_pickaxe() {
            if let Some(durability) = tool.durability {
                if durability.remaining() <= config.durability_floor {
                    return Some(DepositReason::ToolNearFailure);
                }
            }
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use golem_types::Durability;

    use super::*;

    fn ores() -> OreCatalog {
        OreCatalog::standard()
    }

    fn config() -> MineConfig {
        MineConfig::default()
    }

    fn stack(name: &str, count: u32) -> ItemStack {
        ItemStack::new(name.to_owned(), count)
    }

    fn pickaxe(remaining: u32) -> ItemStack {
        ItemStack {
            name: "iron_pickaxe".to_owned(),
            count: 1,
            durability: Some(Durability {
                used: 250_u32.saturating_sub(remaining),
                max: 250,
            }),
        }
    }

    fn healthy() -> Vitals {
        Vitals::full()
    }

    #[test]
    fn counts_ore_across_stacks_and_variants() {
        let inventory = vec![
            stack("coal_ore", 30),
            stack("deepslate_iron_ore", 20),
            stack("cobblestone", 200),
        ];
        assert_eq!(carried_ore(&ores(), &inventory), 50);
    }

    #[test]
    fn full_ore_load_trips_the_cap() {
        let inventory = vec![stack("coal_ore", 64)];
        let reason = needs_deposit(&config(), &ores(), &inventory, healthy(), None);
        assert_eq!(reason, Some(DepositReason::OreCap));
    }

    #[test]
    fn low_health_trips_after_the_ore_check() {
        let mut vitals = healthy();
        vitals.health = 10.0;
        let reason = needs_deposit(&config(), &ores(), &[], vitals, None);
        assert_eq!(reason, Some(DepositReason::CriticalHealth));
    }

    #[test]
    fn ore_cap_outranks_health_in_the_reported_reason() {
        let inventory = vec![stack("diamond_ore", 64)];
        let mut vitals = healthy();
        vitals.health = 5.0;
        let reason = needs_deposit(&config(), &ores(), &inventory, vitals, None);
        assert_eq!(reason, Some(DepositReason::OreCap));
    }

    #[test]
    fn worn_pickaxe_trips_tool_near_failure() {
        let tool = pickaxe(5);
        let reason = needs_deposit(&config(), &ores(), &[], healthy(), Some(&tool));
        assert_eq!(reason, Some(DepositReason::ToolNearFailure));
    }

    #[test]
    fn fresh_pickaxe_does_not_trip() {
        let tool = pickaxe(200);
        let reason = needs_deposit(&config(), &ores(), &[], healthy(), Some(&tool));
        assert_eq!(reason, None);
    }

    #[test]
    fn pickaxe_without_durability_data_fails_open() {
        let tool = stack("iron_pickaxe", 1);
        assert!(tool.durability.is_none());
        let reason = needs_deposit(&config(), &ores(), &[], healthy(), Some(&tool));
        assert_eq!(reason, None);
    }

    #[test]
    fn non_pickaxe_tools_are_ignored() {
        let tool = ItemStack {
            name: "iron_shovel".to_owned(),
            count: 1,
            durability: Some(Durability { used: 249, max: 250 }),
        };
        let reason = needs_deposit(&config(), &ores(), &[], healthy(), Some(&tool));
        assert_eq!(reason, None);
    }

    #[test]
    fn all_clear_returns_none() {
        let inventory = vec![stack("coal_ore", 10), stack("wheat", 40)];
        let reason = needs_deposit(&config(), &ores(), &inventory, healthy(), None);
        assert_eq!(reason, None);
    }

    #[test]
    fn boundary_values_trip_inclusively() {
        // Exactly at the cap.
        let inventory = vec![stack("iron_ore", 64)];
        assert_eq!(
            needs_deposit(&config(), &ores(), &inventory, healthy(), None),
            Some(DepositReason::OreCap)
        );
        // Exactly at the health floor.
        let mut vitals = healthy();
        vitals.health = 12.0;
        assert_eq!(
            needs_deposit(&config(), &ores(), &[], vitals, None),
            Some(DepositReason::CriticalHealth)
        );
        // Exactly at the durability floor.
        let tool = pickaxe(10);
        assert_eq!(
            needs_deposit(&config(), &ores(), &[], healthy(), Some(&tool)),
            Some(DepositReason::ToolNearFailure)
        );
    }
}
