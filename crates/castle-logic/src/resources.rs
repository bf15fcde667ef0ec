//! Resource ledger: stockpiles of food, wood, stone and iron.
//!
//! Every player action is priced as a [`ResourceAmounts`] bundle. The ledger
//! checks the whole bundle before touching any quantity, so a failed payment
//! never leaves a partial debit behind.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Shortage, Shortfall};

// ============================================================================
// RESOURCE KINDS
// ============================================================================

/// One of the four stockpiled resources.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ResourceKind {
    Food = 0,
    Wood = 1,
    Stone = 2,
    Iron = 3,
}

impl ResourceKind {
    pub const COUNT: usize = 4;

    pub fn all() -> &'static [ResourceKind] {
        &[
            ResourceKind::Food,
            ResourceKind::Wood,
            ResourceKind::Stone,
            ResourceKind::Iron,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Wood => "wood",
            Self::Stone => "stone",
            Self::Iron => "iron",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// RESOURCE BUNDLES
// ============================================================================

/// A quantity of each resource kind. Used for prices, production and grants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceAmounts {
    pub food: u64,
    pub wood: u64,
    pub stone: u64,
    pub iron: u64,
}

impl ResourceAmounts {
    pub const ZERO: ResourceAmounts = ResourceAmounts::new(0, 0, 0, 0);

    pub const fn new(food: u64, wood: u64, stone: u64, iron: u64) -> Self {
        Self {
            food,
            wood,
            stone,
            iron,
        }
    }

    /// Same amount of every kind.
    pub const fn uniform(amount: u64) -> Self {
        Self::new(amount, amount, amount, amount)
    }

    pub fn get(&self, kind: ResourceKind) -> u64 {
        match kind {
            ResourceKind::Food => self.food,
            ResourceKind::Wood => self.wood,
            ResourceKind::Stone => self.stone,
            ResourceKind::Iron => self.iron,
        }
    }

    pub fn get_mut(&mut self, kind: ResourceKind) -> &mut u64 {
        match kind {
            ResourceKind::Food => &mut self.food,
            ResourceKind::Wood => &mut self.wood,
            ResourceKind::Stone => &mut self.stone,
            ResourceKind::Iron => &mut self.iron,
        }
    }

    /// Kinds with a non-zero amount, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u64)> + '_ {
        ResourceKind::all()
            .iter()
            .map(move |&kind| (kind, self.get(kind)))
            .filter(|&(_, amount)| amount > 0)
    }

    pub fn is_zero(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl fmt::Display for ResourceAmounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("nothing");
        }
        let parts: Vec<String> = self
            .iter()
            .map(|(kind, amount)| format!("{} {}", amount, kind))
            .collect();
        f.write_str(&parts.join(" + "))
    }
}

// ============================================================================
// LEDGER
// ============================================================================

/// Current stockpile. Quantities are unsigned, so they can never go negative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    quantities: [u64; ResourceKind::COUNT],
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_amounts(amounts: &ResourceAmounts) -> Self {
        let mut ledger = Self::new();
        ledger.credit_all(amounts);
        ledger
    }

    pub fn quantity(&self, kind: ResourceKind) -> u64 {
        self.quantities[kind.index()]
    }

    pub fn amounts(&self) -> ResourceAmounts {
        ResourceAmounts::new(
            self.quantity(ResourceKind::Food),
            self.quantity(ResourceKind::Wood),
            self.quantity(ResourceKind::Stone),
            self.quantity(ResourceKind::Iron),
        )
    }

    pub fn credit(&mut self, kind: ResourceKind, amount: u64) {
        let slot = &mut self.quantities[kind.index()];
        *slot = slot.saturating_add(amount);
    }

    pub fn credit_all(&mut self, amounts: &ResourceAmounts) {
        for (kind, amount) in amounts.iter() {
            self.credit(kind, amount);
        }
    }

    pub fn debit(&mut self, kind: ResourceKind, amount: u64) -> Result<(), Shortage> {
        let available = self.quantity(kind);
        if available < amount {
            return Err(Shortage::new(vec![Shortfall {
                kind,
                required: amount,
                available,
            }]));
        }
        self.quantities[kind.index()] = available - amount;
        Ok(())
    }

    pub fn can_afford(&self, costs: &ResourceAmounts) -> bool {
        costs
            .iter()
            .all(|(kind, amount)| self.quantity(kind) >= amount)
    }

    /// Every kind the ledger cannot cover, in canonical order.
    pub fn shortfalls(&self, costs: &ResourceAmounts) -> Vec<Shortfall> {
        costs
            .iter()
            .filter_map(|(kind, required)| {
                let available = self.quantity(kind);
                (available < required).then_some(Shortfall {
                    kind,
                    required,
                    available,
                })
            })
            .collect()
    }

    /// Check the full bundle, then subtract it. On error nothing is deducted.
    pub fn apply_cost(&mut self, costs: &ResourceAmounts) -> Result<(), Shortage> {
        let missing = self.shortfalls(costs);
        if !missing.is_empty() {
            return Err(Shortage::new(missing));
        }
        for (kind, amount) in costs.iter() {
            self.quantities[kind.index()] -= amount;
        }
        Ok(())
    }
}
