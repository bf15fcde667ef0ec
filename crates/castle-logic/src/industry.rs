//! Industry societies: one-time unlocks that open up a production chain.
//!
//! A society gates its matching building and adds a flat housing bonus for
//! its matching worker kind. Once established it can never be lost.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::prices;
use crate::error::IndustryError;
use crate::population::WorkerKind;
use crate::resources::{ResourceAmounts, ResourceLedger};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum IndustryKind {
    AgricultureSociety = 0,
    ForestrySociety = 1,
    QuarrySociety = 2,
    MineSociety = 3,
    ConstructionSociety = 4,
}

impl IndustryKind {
    pub const COUNT: usize = 5;

    pub fn all() -> &'static [IndustryKind] {
        &[
            IndustryKind::AgricultureSociety,
            IndustryKind::ForestrySociety,
            IndustryKind::QuarrySociety,
            IndustryKind::MineSociety,
            IndustryKind::ConstructionSociety,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::AgricultureSociety => "agriculture society",
            Self::ForestrySociety => "forestry society",
            Self::QuarrySociety => "quarry society",
            Self::MineSociety => "mine society",
            Self::ConstructionSociety => "construction society",
        }
    }

    pub fn cost(&self) -> ResourceAmounts {
        match self {
            Self::AgricultureSociety => prices::UNLOCK_AGRICULTURE,
            Self::ForestrySociety => prices::UNLOCK_FORESTRY,
            Self::QuarrySociety => prices::UNLOCK_QUARRY,
            Self::MineSociety => prices::UNLOCK_MINE,
            Self::ConstructionSociety => prices::UNLOCK_CONSTRUCTION,
        }
    }

    /// Worker kind whose housing this society expands.
    pub fn worker(&self) -> WorkerKind {
        match self {
            Self::AgricultureSociety => WorkerKind::Farmer,
            Self::ForestrySociety => WorkerKind::Lumberjack,
            Self::QuarrySociety => WorkerKind::Quarryman,
            Self::MineSociety => WorkerKind::Miner,
            Self::ConstructionSociety => WorkerKind::Builder,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for IndustryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which societies have been established.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryRegistry {
    unlocked: [bool; IndustryKind::COUNT],
}

impl IndustryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, kind: IndustryKind) -> bool {
        self.unlocked[kind.index()]
    }

    pub fn can_unlock(&self, kind: IndustryKind, ledger: &ResourceLedger) -> bool {
        !self.is_unlocked(kind) && ledger.can_afford(&kind.cost())
    }

    /// Pay for and establish a society.
    pub fn unlock(
        &mut self,
        kind: IndustryKind,
        ledger: &mut ResourceLedger,
    ) -> Result<(), IndustryError> {
        if self.is_unlocked(kind) {
            return Err(IndustryError::AlreadyUnlocked { industry: kind });
        }
        ledger.apply_cost(&kind.cost())?;
        self.unlocked[kind.index()] = true;
        Ok(())
    }
}
