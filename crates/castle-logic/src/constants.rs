//! Game balance constants: prices, capacity multipliers, production rates.
//!
//! These are fixed rules of the game. Per-session knobs such as the starting
//! stockpile live in [`crate::config`].

use crate::resources::ResourceAmounts;

pub mod prices {
    use super::ResourceAmounts;

    // Hiring
    pub const HIRE_FARMER: ResourceAmounts = ResourceAmounts::new(20, 0, 0, 0);
    pub const HIRE_LUMBERJACK: ResourceAmounts = ResourceAmounts::new(50, 0, 0, 0);
    pub const HIRE_QUARRYMAN: ResourceAmounts = ResourceAmounts::new(0, 50, 0, 0);
    pub const HIRE_MINER: ResourceAmounts = ResourceAmounts::new(0, 0, 50, 0);
    pub const HIRE_BUILDER: ResourceAmounts = ResourceAmounts::uniform(50);

    // Buildings
    pub const BUILD_FARM: ResourceAmounts = ResourceAmounts::new(200, 0, 0, 0);
    pub const BUILD_LUMBER_CAMP: ResourceAmounts = ResourceAmounts::new(0, 200, 0, 0);
    pub const BUILD_QUARRY: ResourceAmounts = ResourceAmounts::new(0, 0, 200, 0);
    pub const BUILD_MINE: ResourceAmounts = ResourceAmounts::new(0, 0, 0, 200);
    pub const BUILD_WORKER_HOUSE: ResourceAmounts = ResourceAmounts::new(1000, 1000, 500, 500);

    // Societies
    pub const UNLOCK_AGRICULTURE: ResourceAmounts = ResourceAmounts::new(120, 0, 0, 0);
    pub const UNLOCK_FORESTRY: ResourceAmounts = ResourceAmounts::new(500, 0, 0, 0);
    pub const UNLOCK_QUARRY: ResourceAmounts = ResourceAmounts::new(500, 500, 0, 0);
    pub const UNLOCK_MINE: ResourceAmounts = ResourceAmounts::new(500, 500, 500, 0);
    pub const UNLOCK_CONSTRUCTION: ResourceAmounts = ResourceAmounts::new(2000, 2000, 1000, 1000);

    // Research center
    pub const START_RESEARCH_CENTER: ResourceAmounts =
        ResourceAmounts::new(10_000, 10_000, 5_000, 5_000);
}

pub mod capacity {
    /// Housing per production building (farm, lumber camp, quarry, mine).
    pub const PER_PRODUCTION_BUILDING: u32 = 10;
    /// Flat bonus from the matching production society.
    pub const PRODUCTION_SOCIETY_BONUS: u32 = 10;
    /// Builders housed per worker house.
    pub const PER_WORKER_HOUSE: u32 = 5;
    /// Flat builder bonus from the construction society.
    pub const CONSTRUCTION_SOCIETY_BONUS: u32 = 5;
}

/// Units produced per hired producer per tick.
pub const PRODUCTION_PER_WORKER: u64 = 1;

/// Builder-ticks needed to finish the research center.
pub const RESEARCH_CENTER_REQUIRED: u32 = 500;

/// Default amount credited to every resource by the debug grant.
pub const DEBUG_GRANT_AMOUNT: u64 = 1000;

/// Stockpile at the start of a new game.
pub const STARTING_RESOURCES: ResourceAmounts = ResourceAmounts::new(150, 0, 0, 0);

/// Length of one simulation tick, in milliseconds.
pub const TICK_PERIOD_MS: u64 = 1000;
