//! Population: hired workers and the housing capacity that limits them.
//!
//! Capacity is never stored. It is derived from the building and society
//! registries every time it is asked for, so it always reflects the latest
//! construction:
//!
//! - producers: `buildings × 10 + (society ? 10 : 0)`
//! - builders:  `worker houses × 5 + (construction society ? 5 : 0)`
//!
//! Raising capacity never hires anyone; it only lifts the ceiling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::buildings::{BuildingKind, BuildingRegistry};
use crate::constants::{capacity, prices, PRODUCTION_PER_WORKER};
use crate::error::HireError;
use crate::industry::{IndustryKind, IndustryRegistry};
use crate::resources::{ResourceAmounts, ResourceKind, ResourceLedger};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum WorkerKind {
    Farmer = 0,
    Lumberjack = 1,
    Quarryman = 2,
    Miner = 3,
    Builder = 4,
}

impl WorkerKind {
    pub const COUNT: usize = 5;

    pub fn all() -> &'static [WorkerKind] {
        &[
            WorkerKind::Farmer,
            WorkerKind::Lumberjack,
            WorkerKind::Quarryman,
            WorkerKind::Miner,
            WorkerKind::Builder,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Farmer => "farmer",
            Self::Lumberjack => "lumberjack",
            Self::Quarryman => "quarryman",
            Self::Miner => "miner",
            Self::Builder => "builder",
        }
    }

    pub fn hire_cost(&self) -> ResourceAmounts {
        match self {
            Self::Farmer => prices::HIRE_FARMER,
            Self::Lumberjack => prices::HIRE_LUMBERJACK,
            Self::Quarryman => prices::HIRE_QUARRYMAN,
            Self::Miner => prices::HIRE_MINER,
            Self::Builder => prices::HIRE_BUILDER,
        }
    }

    /// Resource this worker yields each tick. Builders yield construction
    /// progress instead.
    pub fn produces(&self) -> Option<ResourceKind> {
        match self {
            Self::Farmer => Some(ResourceKind::Food),
            Self::Lumberjack => Some(ResourceKind::Wood),
            Self::Quarryman => Some(ResourceKind::Stone),
            Self::Miner => Some(ResourceKind::Iron),
            Self::Builder => None,
        }
    }

    pub fn housing(&self) -> BuildingKind {
        match self {
            Self::Farmer => BuildingKind::Farm,
            Self::Lumberjack => BuildingKind::LumberCamp,
            Self::Quarryman => BuildingKind::Quarry,
            Self::Miner => BuildingKind::Mine,
            Self::Builder => BuildingKind::WorkerHouse,
        }
    }

    pub fn industry(&self) -> IndustryKind {
        match self {
            Self::Farmer => IndustryKind::AgricultureSociety,
            Self::Lumberjack => IndustryKind::ForestrySociety,
            Self::Quarryman => IndustryKind::QuarrySociety,
            Self::Miner => IndustryKind::MineSociety,
            Self::Builder => IndustryKind::ConstructionSociety,
        }
    }

    fn per_building(&self) -> u32 {
        match self {
            Self::Builder => capacity::PER_WORKER_HOUSE,
            _ => capacity::PER_PRODUCTION_BUILDING,
        }
    }

    fn society_bonus(&self) -> u32 {
        match self {
            Self::Builder => capacity::CONSTRUCTION_SOCIETY_BONUS,
            _ => capacity::PRODUCTION_SOCIETY_BONUS,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for WorkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Housing capacity for a worker kind given current construction.
pub fn capacity_of(
    worker: WorkerKind,
    buildings: &BuildingRegistry,
    industries: &IndustryRegistry,
) -> u32 {
    let housed = buildings
        .count(worker.housing())
        .saturating_mul(worker.per_building());
    let bonus = if industries.is_unlocked(worker.industry()) {
        worker.society_bonus()
    } else {
        0
    };
    housed.saturating_add(bonus)
}

/// Resources produced in one tick by the given workforce.
pub fn production(population: &PopulationRegistry) -> ResourceAmounts {
    let mut produced = ResourceAmounts::ZERO;
    for &worker in WorkerKind::all() {
        if let Some(resource) = worker.produces() {
            *produced.get_mut(resource) += population.hired(worker) as u64 * PRODUCTION_PER_WORKER;
        }
    }
    produced
}

/// Hired head count per worker kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationRegistry {
    hired: [u32; WorkerKind::COUNT],
}

impl PopulationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hired(&self, worker: WorkerKind) -> u32 {
        self.hired[worker.index()]
    }

    pub fn can_hire(&self, worker: WorkerKind, capacity: u32) -> bool {
        self.hired(worker) < capacity
    }

    /// Hire one worker into the given capacity, returning the new head count.
    ///
    /// Housing is checked before the price.
    pub fn hire(
        &mut self,
        worker: WorkerKind,
        capacity: u32,
        ledger: &mut ResourceLedger,
    ) -> Result<u32, HireError> {
        if !self.can_hire(worker, capacity) {
            return Err(HireError::CapacityExceeded { worker });
        }
        ledger.apply_cost(&worker.hire_cost())?;
        let slot = &mut self.hired[worker.index()];
        *slot += 1;
        Ok(*slot)
    }
}
