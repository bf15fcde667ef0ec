//! Greedy autoplay: plays a session from a fresh start to the research
//! center without cheats.
//!
//! Priorities each decision: start the research center, establish societies,
//! hire, then expand housing. Housing is only built for a worker kind that is
//! full, and capped per kind so stockpiles eventually accumulate for the
//! expensive unlocks.

use std::time::{Duration, Instant};

use castle_logic::buildings::BuildingKind;
use castle_logic::engine::{Action, GameEngine};
use castle_logic::error::ActionError;
use castle_logic::industry::IndustryKind;
use castle_logic::population::WorkerKind;
use castle_logic::session::Session;
use log::{debug, info};

/// Caps on how far autoplay expands housing.
#[derive(Debug, Clone, Copy)]
pub struct AutoplayLimits {
    pub max_production_buildings: u32,
    pub max_worker_houses: u32,
    pub max_ticks: u64,
}

impl Default for AutoplayLimits {
    fn default() -> Self {
        Self {
            max_production_buildings: 10,
            max_worker_houses: 10,
            max_ticks: 100_000,
        }
    }
}

const HIRE_ORDER: [WorkerKind; 5] = [
    WorkerKind::Builder,
    WorkerKind::Miner,
    WorkerKind::Quarryman,
    WorkerKind::Lumberjack,
    WorkerKind::Farmer,
];

/// Safety valve against a strategy bug spinning inside a single tick.
const MAX_ACTIONS_PER_TICK: usize = 1_000;

#[derive(Debug, Clone, Default)]
pub struct AutoplayOutcome {
    pub completed: bool,
    pub ticks: u64,
    pub actions: usize,
    pub first_unlock_tick: Vec<(IndustryKind, u64)>,
    pub capstone_started_tick: Option<u64>,
    /// Action the strategy judged affordable but the engine rejected.
    pub rejected: Option<(Action, ActionError)>,
}

/// Next action to take, or `None` to wait for the next tick.
pub fn choose_action(engine: &GameEngine, limits: &AutoplayLimits) -> Option<Action> {
    if engine.can_start_capstone() {
        return Some(Action::StartCapstone);
    }
    if let Some(&industry) = IndustryKind::all().iter().find(|&&i| engine.can_unlock(i)) {
        return Some(Action::Unlock(industry));
    }
    if let Some(&worker) = HIRE_ORDER.iter().find(|&&w| engine.can_hire(w)) {
        return Some(Action::Hire(worker));
    }
    BuildingKind::all()
        .iter()
        .copied()
        .find(|&b| {
            let worker = b.houses();
            let cap = if b == BuildingKind::WorkerHouse {
                limits.max_worker_houses
            } else {
                limits.max_production_buildings
            };
            engine.building_count(b) < cap
                && engine.hired(worker) >= engine.capacity_of(worker)
                && engine.can_build(b)
        })
        .map(Action::Build)
}

/// Take every action the strategy wants right now.
fn act(engine: &mut GameEngine, limits: &AutoplayLimits, outcome: &mut AutoplayOutcome) -> bool {
    for _ in 0..MAX_ACTIONS_PER_TICK {
        let Some(action) = choose_action(engine, limits) else {
            return true;
        };
        match engine.apply(action) {
            Ok(_) => {
                outcome.actions += 1;
                debug!("tick {}: {}", engine.tick_count(), action);
                match action {
                    Action::Unlock(industry) => {
                        outcome
                            .first_unlock_tick
                            .push((industry, engine.tick_count()));
                    }
                    Action::StartCapstone => {
                        outcome.capstone_started_tick = Some(engine.tick_count());
                    }
                    _ => {}
                }
            }
            Err(e) => {
                outcome.rejected = Some((action, e));
                return false;
            }
        }
    }
    true
}

/// Play on a bare engine, one tick per loop iteration.
pub fn run(engine: &mut GameEngine, limits: &AutoplayLimits) -> AutoplayOutcome {
    let mut outcome = AutoplayOutcome::default();
    while !engine.is_game_over() && engine.tick_count() < limits.max_ticks {
        if !act(engine, limits, &mut outcome) {
            break;
        }
        engine.tick();
    }
    outcome.completed = engine.is_game_over();
    outcome.ticks = engine.tick_count();
    info!(
        "Autoplay finished: completed={} ticks={} actions={}",
        outcome.completed, outcome.ticks, outcome.actions
    );
    outcome
}

/// Play through a session in wall-clock time, sleeping between ticks.
pub fn run_realtime(session: &mut Session, limits: &AutoplayLimits) -> AutoplayOutcome {
    let mut outcome = AutoplayOutcome::default();
    let mut last = Instant::now();
    while session.clock().is_running() && session.engine().tick_count() < limits.max_ticks {
        if !act(session.engine_mut(), limits, &mut outcome) {
            break;
        }
        let wait = session.clock().until_next_tick();
        std::thread::sleep(wait.max(Duration::from_millis(1)));
        let now = Instant::now();
        for report in session.advance(now - last) {
            if report.capstone_just_completed {
                info!("Research center complete at tick {}", report.tick);
            }
        }
        last = now;
    }
    outcome.completed = session.is_over();
    outcome.ticks = session.engine().tick_count();
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use castle_logic::config::GameConfig;
    use castle_logic::resources::ResourceAmounts;

    #[test]
    fn test_first_move_is_agriculture() {
        let engine = GameEngine::default();
        assert_eq!(
            choose_action(&engine, &AutoplayLimits::default()),
            Some(Action::Unlock(IndustryKind::AgricultureSociety))
        );
    }

    #[test]
    fn test_waits_when_nothing_affordable() {
        let engine = GameEngine::new(&GameConfig {
            starting_resources: ResourceAmounts::ZERO,
            ..GameConfig::default()
        });
        assert_eq!(choose_action(&engine, &AutoplayLimits::default()), None);
    }

    #[test]
    fn test_prefers_research_center() {
        let engine = GameEngine::new(&GameConfig {
            starting_resources: ResourceAmounts::uniform(100_000),
            ..GameConfig::default()
        });
        assert_eq!(
            choose_action(&engine, &AutoplayLimits::default()),
            Some(Action::StartCapstone)
        );
    }

    #[test]
    fn test_plays_to_completion() {
        let mut engine = GameEngine::default();
        let outcome = run(&mut engine, &AutoplayLimits::default());
        assert!(outcome.completed, "{:?}", outcome);
        assert!(outcome.rejected.is_none());
        assert_eq!(outcome.first_unlock_tick.len(), IndustryKind::COUNT);
    }
}
