//! Housing buildings: each kind raises the capacity of one worker kind.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::prices;
use crate::error::BuildError;
use crate::industry::{IndustryKind, IndustryRegistry};
use crate::population::WorkerKind;
use crate::resources::{ResourceAmounts, ResourceLedger};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BuildingKind {
    Farm = 0,
    LumberCamp = 1,
    Quarry = 2,
    Mine = 3,
    WorkerHouse = 4,
}

impl BuildingKind {
    pub const COUNT: usize = 5;

    pub fn all() -> &'static [BuildingKind] {
        &[
            BuildingKind::Farm,
            BuildingKind::LumberCamp,
            BuildingKind::Quarry,
            BuildingKind::Mine,
            BuildingKind::WorkerHouse,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Farm => "farm",
            Self::LumberCamp => "lumber camp",
            Self::Quarry => "quarry",
            Self::Mine => "mine",
            Self::WorkerHouse => "worker house",
        }
    }

    pub fn cost(&self) -> ResourceAmounts {
        match self {
            Self::Farm => prices::BUILD_FARM,
            Self::LumberCamp => prices::BUILD_LUMBER_CAMP,
            Self::Quarry => prices::BUILD_QUARRY,
            Self::Mine => prices::BUILD_MINE,
            Self::WorkerHouse => prices::BUILD_WORKER_HOUSE,
        }
    }

    /// Society that must exist before this building can go up.
    pub fn required_industry(&self) -> IndustryKind {
        match self {
            Self::Farm => IndustryKind::AgricultureSociety,
            Self::LumberCamp => IndustryKind::ForestrySociety,
            Self::Quarry => IndustryKind::QuarrySociety,
            Self::Mine => IndustryKind::MineSociety,
            Self::WorkerHouse => IndustryKind::ConstructionSociety,
        }
    }

    /// Worker kind housed by this building.
    pub fn houses(&self) -> WorkerKind {
        match self {
            Self::Farm => WorkerKind::Farmer,
            Self::LumberCamp => WorkerKind::Lumberjack,
            Self::Quarry => WorkerKind::Quarryman,
            Self::Mine => WorkerKind::Miner,
            Self::WorkerHouse => WorkerKind::Builder,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of each building constructed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingRegistry {
    counts: [u32; BuildingKind::COUNT],
}

impl BuildingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: BuildingKind) -> u32 {
        self.counts[kind.index()]
    }

    pub fn can_build(
        &self,
        kind: BuildingKind,
        industries: &IndustryRegistry,
        ledger: &ResourceLedger,
    ) -> bool {
        industries.is_unlocked(kind.required_industry()) && ledger.can_afford(&kind.cost())
    }

    /// Construct one building, returning the new count for that kind.
    ///
    /// The society check comes before the price check, so a missing society
    /// is reported even when the stockpile is also short.
    pub fn build(
        &mut self,
        kind: BuildingKind,
        industries: &IndustryRegistry,
        ledger: &mut ResourceLedger,
    ) -> Result<u32, BuildError> {
        let industry = kind.required_industry();
        if !industries.is_unlocked(industry) {
            return Err(BuildError::IndustryRequired {
                building: kind,
                industry,
            });
        }
        ledger.apply_cost(&kind.cost())?;
        let slot = &mut self.counts[kind.index()];
        *slot += 1;
        Ok(*slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn industries_with(kind: IndustryKind) -> IndustryRegistry {
        let mut industries = IndustryRegistry::new();
        let mut ledger = ResourceLedger::with_amounts(&kind.cost());
        industries.unlock(kind, &mut ledger).unwrap();
        industries
    }

    #[test]
    fn test_build_requires_industry() {
        let mut buildings = BuildingRegistry::new();
        let industries = IndustryRegistry::new();
        let mut ledger = ResourceLedger::with_amounts(&ResourceAmounts::uniform(5000));
        let err = buildings
            .build(BuildingKind::Farm, &industries, &mut ledger)
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::IndustryRequired {
                building: BuildingKind::Farm,
                industry: IndustryKind::AgricultureSociety,
            }
        );
        assert_eq!(ledger.amounts(), ResourceAmounts::uniform(5000));
        assert_eq!(buildings.count(BuildingKind::Farm), 0);
    }

    #[test]
    fn test_build_increments_count() {
        let mut buildings = BuildingRegistry::new();
        let industries = industries_with(IndustryKind::ForestrySociety);
        let mut ledger = ResourceLedger::with_amounts(&ResourceAmounts::new(0, 450, 0, 0));
        assert_eq!(
            buildings.build(BuildingKind::LumberCamp, &industries, &mut ledger),
            Ok(1)
        );
        assert_eq!(
            buildings.build(BuildingKind::LumberCamp, &industries, &mut ledger),
            Ok(2)
        );
        assert_eq!(ledger.amounts(), ResourceAmounts::new(0, 50, 0, 0));
        assert!(matches!(
            buildings.build(BuildingKind::LumberCamp, &industries, &mut ledger),
            Err(BuildError::InsufficientResource(_))
        ));
        assert_eq!(buildings.count(BuildingKind::LumberCamp), 2);
    }

    #[test]
    fn test_worker_house_cost_is_atomic() {
        let mut buildings = BuildingRegistry::new();
        let industries = industries_with(IndustryKind::ConstructionSociety);
        let mut ledger = ResourceLedger::with_amounts(&ResourceAmounts::new(1000, 1000, 500, 499));
        assert!(buildings
            .build(BuildingKind::WorkerHouse, &industries, &mut ledger)
            .is_err());
        assert_eq!(ledger.amounts(), ResourceAmounts::new(1000, 1000, 500, 499));
    }

    #[test]
    fn test_pairings_are_consistent() {
        for &kind in BuildingKind::all() {
            assert_eq!(kind.required_industry().worker(), kind.houses());
            assert_eq!(kind.houses().housing(), kind);
        }
    }
}
