//! Game engine: the only entry point for mutating a play session.
//!
//! The engine owns the complete [`GameState`]. Player intents come in through
//! the action methods (or [`GameEngine::apply`]) and time advances through
//! [`GameEngine::tick`]. Both take `&mut self`, so an action can never
//! interleave with a tick. A presentation layer renders from
//! [`GameEngine::snapshot`] and never reads state back from its own widgets.
//!
//! Every action validates before it mutates: a rejected action leaves the
//! state exactly as it was.

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::buildings::{BuildingKind, BuildingRegistry};
use crate::capstone::{ConstructionProject, ProjectState};
use crate::config::GameConfig;
use crate::error::{ActionError, BuildError, CapstoneError, HireError, IndustryError};
use crate::industry::{IndustryKind, IndustryRegistry};
use crate::population::{self, PopulationRegistry, WorkerKind};
use crate::resources::{ResourceAmounts, ResourceKind, ResourceLedger};

// ============================================================================
// STATE
// ============================================================================

/// Everything that makes up one play session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub resources: ResourceLedger,
    pub population: PopulationRegistry,
    pub buildings: BuildingRegistry,
    pub industries: IndustryRegistry,
    pub capstone: ConstructionProject,
    /// Ticks elapsed since the session began.
    pub ticks: u64,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            resources: ResourceLedger::with_amounts(&config.starting_resources),
            population: PopulationRegistry::new(),
            buildings: BuildingRegistry::new(),
            industries: IndustryRegistry::new(),
            capstone: ConstructionProject::new(config.capstone_required),
            ticks: 0,
        }
    }

    pub fn capacity_of(&self, worker: WorkerKind) -> u32 {
        population::capacity_of(worker, &self.buildings, &self.industries)
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// A discrete player intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "kind")]
pub enum Action {
    Hire(WorkerKind),
    Build(BuildingKind),
    Unlock(IndustryKind),
    StartCapstone,
}

impl Action {
    /// Every action a player could attempt.
    pub fn all() -> Vec<Action> {
        let mut actions: Vec<Action> = Vec::with_capacity(16);
        actions.extend(WorkerKind::all().iter().map(|&w| Action::Hire(w)));
        actions.extend(BuildingKind::all().iter().map(|&b| Action::Build(b)));
        actions.extend(IndustryKind::all().iter().map(|&i| Action::Unlock(i)));
        actions.push(Action::StartCapstone);
        actions
    }

    /// Price of the action, for tooltips.
    pub fn cost(&self) -> ResourceAmounts {
        match self {
            Self::Hire(worker) => worker.hire_cost(),
            Self::Build(building) => building.cost(),
            Self::Unlock(industry) => industry.cost(),
            Self::StartCapstone => ConstructionProject::cost(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hire(worker) => write!(f, "hire {}", worker),
            Self::Build(building) => write!(f, "build {}", building),
            Self::Unlock(industry) => write!(f, "establish {}", industry),
            Self::StartCapstone => f.write_str("start research center"),
        }
    }
}

/// Result of a successful action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// New head count for the hired kind.
    Hired(u32),
    /// New building count for the built kind.
    Built(u32),
    Unlocked,
    CapstoneStarted,
}

// ============================================================================
// REPORTS
// ============================================================================

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickReport {
    /// Tick number, starting at 1.
    pub tick: u64,
    pub resources_produced: ResourceAmounts,
    pub capstone_progress_delta: u32,
    /// Set on exactly one tick: the one that finished the research center.
    pub capstone_just_completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapstoneSnapshot {
    pub state: ProjectState,
    /// Clamped at `required`.
    pub progress: u32,
    pub required: u32,
}

/// Read-only view of the session for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub resources: BTreeMap<ResourceKind, u64>,
    pub workers: BTreeMap<WorkerKind, u32>,
    pub population_capacities: BTreeMap<WorkerKind, u32>,
    pub building_counts: BTreeMap<BuildingKind, u32>,
    pub industry_unlocked: BTreeMap<IndustryKind, bool>,
    pub capstone: CapstoneSnapshot,
}

// ============================================================================
// ENGINE
// ============================================================================

#[derive(Debug, Clone)]
pub struct GameEngine {
    state: GameState,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl GameEngine {
    /// Build a fresh game from `config` without validating it. A zero tick
    /// period is the clock's concern; a zero research center threshold is
    /// raised to one. Use [`crate::session::Session::new_game`] to reject
    /// invalid configs outright.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            state: GameState::new(config),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tick_count(&self) -> u64 {
        self.state.ticks
    }

    pub fn resources(&self) -> ResourceAmounts {
        self.state.resources.amounts()
    }

    pub fn resource(&self, kind: ResourceKind) -> u64 {
        self.state.resources.quantity(kind)
    }

    pub fn hired(&self, worker: WorkerKind) -> u32 {
        self.state.population.hired(worker)
    }

    pub fn capacity_of(&self, worker: WorkerKind) -> u32 {
        self.state.capacity_of(worker)
    }

    pub fn building_count(&self, building: BuildingKind) -> u32 {
        self.state.buildings.count(building)
    }

    pub fn is_unlocked(&self, industry: IndustryKind) -> bool {
        self.state.industries.is_unlocked(industry)
    }

    pub fn capstone(&self) -> &ConstructionProject {
        &self.state.capstone
    }

    /// The game ends when the research center is complete.
    pub fn is_game_over(&self) -> bool {
        self.state.capstone.is_complete()
    }

    // ── Availability (for greying out buttons) ──────────────────────────

    pub fn can_hire(&self, worker: WorkerKind) -> bool {
        self.state
            .population
            .can_hire(worker, self.capacity_of(worker))
            && self.state.resources.can_afford(&worker.hire_cost())
    }

    pub fn can_build(&self, building: BuildingKind) -> bool {
        self.state
            .buildings
            .can_build(building, &self.state.industries, &self.state.resources)
    }

    pub fn can_unlock(&self, industry: IndustryKind) -> bool {
        self.state
            .industries
            .can_unlock(industry, &self.state.resources)
    }

    pub fn can_start_capstone(&self) -> bool {
        self.state.capstone.can_start(&self.state.resources)
    }

    pub fn can_apply(&self, action: Action) -> bool {
        match action {
            Action::Hire(worker) => self.can_hire(worker),
            Action::Build(building) => self.can_build(building),
            Action::Unlock(industry) => self.can_unlock(industry),
            Action::StartCapstone => self.can_start_capstone(),
        }
    }

    // ── Actions ─────────────────────────────────────────────────────────

    /// Hire one worker. Returns the new head count for that kind.
    pub fn hire_worker(&mut self, worker: WorkerKind) -> Result<u32, HireError> {
        let capacity = self.capacity_of(worker);
        let state = &mut self.state;
        match state.population.hire(worker, capacity, &mut state.resources) {
            Ok(count) => {
                info!("Hired {} ({}/{})", worker, count, capacity);
                Ok(count)
            }
            Err(e) => {
                debug!("Hire {} rejected: {}", worker, e);
                Err(e)
            }
        }
    }

    /// Construct one building. Returns the new count for that kind.
    pub fn build_structure(&mut self, building: BuildingKind) -> Result<u32, BuildError> {
        let state = &mut self.state;
        match state
            .buildings
            .build(building, &state.industries, &mut state.resources)
        {
            Ok(count) => {
                let worker = building.houses();
                info!(
                    "Built {} #{}; {} capacity now {}",
                    building,
                    count,
                    worker,
                    state.capacity_of(worker)
                );
                Ok(count)
            }
            Err(e) => {
                debug!("Build {} rejected: {}", building, e);
                Err(e)
            }
        }
    }

    pub fn unlock_industry(&mut self, industry: IndustryKind) -> Result<(), IndustryError> {
        let state = &mut self.state;
        match state.industries.unlock(industry, &mut state.resources) {
            Ok(()) => {
                let worker = industry.worker();
                info!(
                    "Established {}; {} capacity now {}",
                    industry,
                    worker,
                    state.capacity_of(worker)
                );
                Ok(())
            }
            Err(e) => {
                debug!("Establish {} rejected: {}", industry, e);
                Err(e)
            }
        }
    }

    pub fn start_capstone(&mut self) -> Result<(), CapstoneError> {
        let state = &mut self.state;
        match state.capstone.start(&mut state.resources) {
            Ok(()) => {
                info!(
                    "Research center construction started (0/{})",
                    state.capstone.required()
                );
                Ok(())
            }
            Err(e) => {
                debug!("Research center start rejected: {}", e);
                Err(e)
            }
        }
    }

    /// Dispatch any action through its dedicated method.
    pub fn apply(&mut self, action: Action) -> Result<ActionOutcome, ActionError> {
        let outcome = match action {
            Action::Hire(worker) => ActionOutcome::Hired(self.hire_worker(worker)?),
            Action::Build(building) => ActionOutcome::Built(self.build_structure(building)?),
            Action::Unlock(industry) => {
                self.unlock_industry(industry)?;
                ActionOutcome::Unlocked
            }
            Action::StartCapstone => {
                self.start_capstone()?;
                ActionOutcome::CapstoneStarted
            }
        };
        Ok(outcome)
    }

    // ── Time ────────────────────────────────────────────────────────────

    /// Advance the simulation by one period.
    ///
    /// Production is credited first, then builders work on the research
    /// center. No prices are checked here.
    pub fn tick(&mut self) -> TickReport {
        let state = &mut self.state;
        state.ticks += 1;

        let produced = population::production(&state.population);
        state.resources.credit_all(&produced);

        let builders = state.population.hired(WorkerKind::Builder);
        let outcome = state.capstone.tick(builders);

        debug!(
            "Tick {}: produced {}, research center {}/{}",
            state.ticks,
            produced,
            state.capstone.displayed_progress(),
            state.capstone.required()
        );
        if outcome.just_completed {
            info!("Research center complete after {} ticks", state.ticks);
        }

        TickReport {
            tick: state.ticks,
            resources_produced: produced,
            capstone_progress_delta: outcome.delta,
            capstone_just_completed: outcome.just_completed,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        Snapshot {
            tick: state.ticks,
            resources: ResourceKind::all()
                .iter()
                .map(|&k| (k, state.resources.quantity(k)))
                .collect(),
            workers: WorkerKind::all()
                .iter()
                .map(|&w| (w, state.population.hired(w)))
                .collect(),
            population_capacities: WorkerKind::all()
                .iter()
                .map(|&w| (w, state.capacity_of(w)))
                .collect(),
            building_counts: BuildingKind::all()
                .iter()
                .map(|&b| (b, state.buildings.count(b)))
                .collect(),
            industry_unlocked: IndustryKind::all()
                .iter()
                .map(|&i| (i, state.industries.is_unlocked(i)))
                .collect(),
            capstone: CapstoneSnapshot {
                state: state.capstone.state(),
                progress: state.capstone.displayed_progress(),
                required: state.capstone.required(),
            },
        }
    }

    /// Credit every resource by `amount`. Manual testing only.
    #[cfg(any(test, feature = "debug-cheats"))]
    pub fn debug_grant_all(&mut self, amount: u64) {
        log::warn!("Debug grant: +{} of every resource", amount);
        self.state
            .resources
            .credit_all(&ResourceAmounts::uniform(amount));
    }
}
