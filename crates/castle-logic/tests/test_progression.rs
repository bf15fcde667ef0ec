//! Integration tests for a play session from first hire to research center.
//!
//! Exercises: unlock society → build housing → hire → tick production
//! → start research center → builder progress → completion.
//!
//! All tests are pure logic: no clock thread, no rendering.

use castle_logic::buildings::BuildingKind;
use castle_logic::capstone::ProjectState;
use castle_logic::config::GameConfig;
use castle_logic::engine::GameEngine;
use castle_logic::error::{BuildError, CapstoneError, HireError, IndustryError};
use castle_logic::industry::IndustryKind;
use castle_logic::population::WorkerKind;
use castle_logic::resources::{ResourceAmounts, ResourceKind};
use castle_logic::session::Session;

// ── Helpers ────────────────────────────────────────────────────────────

fn engine_with(resources: ResourceAmounts) -> GameEngine {
    GameEngine::new(&GameConfig {
        starting_resources: resources,
        ..GameConfig::default()
    })
}

/// 50 builders housed and hired, with exactly the research center price left.
fn engine_ready_for_research_center() -> GameEngine {
    let mut engine = engine_with(ResourceAmounts::new(23_500, 23_500, 13_000, 13_000));
    engine
        .unlock_industry(IndustryKind::ConstructionSociety)
        .unwrap();
    for _ in 0..9 {
        engine.build_structure(BuildingKind::WorkerHouse).unwrap();
    }
    assert_eq!(engine.capacity_of(WorkerKind::Builder), 50);
    for _ in 0..50 {
        engine.hire_worker(WorkerKind::Builder).unwrap();
    }
    assert_eq!(
        engine.resources(),
        ResourceAmounts::new(10_000, 10_000, 5_000, 5_000)
    );
    engine
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn hire_before_any_housing_fails() {
    let mut engine = GameEngine::default();
    assert_eq!(engine.resource(ResourceKind::Food), 150);
    assert_eq!(
        engine.hire_worker(WorkerKind::Farmer),
        Err(HireError::CapacityExceeded {
            worker: WorkerKind::Farmer
        })
    );
    assert_eq!(engine.resource(ResourceKind::Food), 150);
    assert_eq!(engine.hired(WorkerKind::Farmer), 0);
}

#[test]
fn first_farmer_after_agriculture_society() {
    let mut engine = GameEngine::default();
    engine
        .unlock_industry(IndustryKind::AgricultureSociety)
        .unwrap();
    assert_eq!(engine.resource(ResourceKind::Food), 30);
    assert_eq!(engine.hire_worker(WorkerKind::Farmer), Ok(1));
    assert_eq!(engine.resource(ResourceKind::Food), 10);
}

#[test]
fn unlock_then_build_farm() {
    let mut engine = engine_with(ResourceAmounts::new(1200, 0, 0, 0));
    engine
        .unlock_industry(IndustryKind::AgricultureSociety)
        .unwrap();
    assert_eq!(engine.resource(ResourceKind::Food), 1080);

    assert_eq!(engine.build_structure(BuildingKind::Farm), Ok(1));
    assert_eq!(engine.resource(ResourceKind::Food), 880);
    assert_eq!(engine.building_count(BuildingKind::Farm), 1);
    assert_eq!(engine.capacity_of(WorkerKind::Farmer), 20);
}

#[test]
fn hiring_stops_at_capacity() {
    let mut engine = engine_with(ResourceAmounts::new(1200, 0, 0, 0));
    engine
        .unlock_industry(IndustryKind::AgricultureSociety)
        .unwrap();
    engine.build_structure(BuildingKind::Farm).unwrap();

    for expected in 1..=20 {
        assert_eq!(engine.hire_worker(WorkerKind::Farmer), Ok(expected));
    }
    assert_eq!(engine.resource(ResourceKind::Food), 480);
    assert_eq!(
        engine.hire_worker(WorkerKind::Farmer),
        Err(HireError::CapacityExceeded {
            worker: WorkerKind::Farmer
        })
    );
    assert_eq!(engine.resource(ResourceKind::Food), 480);
    assert_eq!(engine.hired(WorkerKind::Farmer), 20);
}

#[test]
fn research_center_completes_on_tenth_tick() {
    let mut engine = engine_ready_for_research_center();
    engine.start_capstone().unwrap();
    assert!(engine.resources().is_zero());
    assert_eq!(engine.capstone().state(), ProjectState::InProgress);
    assert_eq!(engine.capstone().progress(), 0);

    let report = engine.tick();
    assert_eq!(report.capstone_progress_delta, 50);
    assert_eq!(engine.capstone().progress(), 50);

    for tick in 2..=9 {
        let report = engine.tick();
        assert!(!report.capstone_just_completed, "tick {}", tick);
        assert_eq!(engine.capstone().state(), ProjectState::InProgress);
    }

    let report = engine.tick();
    assert!(report.capstone_just_completed);
    assert_eq!(engine.capstone().progress(), 500);
    assert_eq!(engine.capstone().state(), ProjectState::Complete);
    assert!(engine.is_game_over());

    let report = engine.tick();
    assert_eq!(report.capstone_progress_delta, 0);
    assert!(!report.capstone_just_completed);
    assert_eq!(engine.capstone().progress(), 500);
}

#[test]
fn mine_requires_mine_society() {
    let start = ResourceAmounts::uniform(5_000);
    let mut engine = engine_with(start);
    assert_eq!(
        engine.build_structure(BuildingKind::Mine),
        Err(BuildError::IndustryRequired {
            building: BuildingKind::Mine,
            industry: IndustryKind::MineSociety,
        })
    );
    assert_eq!(engine.resources(), start);
    assert_eq!(engine.building_count(BuildingKind::Mine), 0);
}

// ── Error paths ────────────────────────────────────────────────────────

#[test]
fn second_unlock_is_rejected_without_debit() {
    let mut engine = engine_with(ResourceAmounts::new(2_000, 0, 0, 0));
    engine
        .unlock_industry(IndustryKind::ForestrySociety)
        .unwrap();
    assert_eq!(engine.resource(ResourceKind::Food), 1_500);
    assert_eq!(
        engine.unlock_industry(IndustryKind::ForestrySociety),
        Err(IndustryError::AlreadyUnlocked {
            industry: IndustryKind::ForestrySociety
        })
    );
    assert_eq!(engine.resource(ResourceKind::Food), 1_500);
}

#[test]
fn research_center_start_errors() {
    let mut engine = engine_with(ResourceAmounts::new(10_000, 10_000, 5_000, 0));
    match engine.start_capstone() {
        Err(CapstoneError::InsufficientResource(shortage)) => {
            assert_eq!(shortage.missing_kinds(), vec![ResourceKind::Iron]);
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(engine.capstone().state(), ProjectState::NotStarted);

    let mut engine = engine_ready_for_research_center();
    engine.start_capstone().unwrap();
    assert_eq!(engine.start_capstone(), Err(CapstoneError::AlreadyInProgress));
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.start_capstone(), Err(CapstoneError::AlreadyComplete));
}

#[test]
fn production_is_not_spent_during_tick() {
    let mut engine = engine_with(ResourceAmounts::new(140, 0, 0, 0));
    engine
        .unlock_industry(IndustryKind::AgricultureSociety)
        .unwrap();
    engine.hire_worker(WorkerKind::Farmer).unwrap();
    assert_eq!(engine.resource(ResourceKind::Food), 0);

    let report = engine.tick();
    assert_eq!(report.resources_produced.food, 1);
    assert_eq!(engine.resource(ResourceKind::Food), 1);
    assert_eq!(engine.hired(WorkerKind::Farmer), 1);
}

// ── Full progression ───────────────────────────────────────────────────

#[test]
fn food_economy_grows_from_default_start() {
    let mut engine = GameEngine::default();
    engine
        .unlock_industry(IndustryKind::AgricultureSociety)
        .unwrap();
    engine.hire_worker(WorkerKind::Farmer).unwrap();

    // Reinvest every tick: hire when housed, build a farm when full.
    for _ in 0..400 {
        engine.tick();
        if engine.can_hire(WorkerKind::Farmer) {
            engine.hire_worker(WorkerKind::Farmer).unwrap();
        } else if engine.hired(WorkerKind::Farmer) == engine.capacity_of(WorkerKind::Farmer)
            && engine.can_build(BuildingKind::Farm)
        {
            engine.build_structure(BuildingKind::Farm).unwrap();
        }
    }

    assert!(engine.hired(WorkerKind::Farmer) > 10);
    assert!(engine.building_count(BuildingKind::Farm) >= 1);
    assert!(engine.hired(WorkerKind::Farmer) <= engine.capacity_of(WorkerKind::Farmer));
}

#[test]
fn session_clock_drives_research_center_to_completion() {
    let config = GameConfig {
        starting_resources: ResourceAmounts::new(23_500, 23_500, 13_000, 13_000),
        tick_period_ms: 100,
        ..GameConfig::default()
    };
    let mut session = Session::new_game(&config).unwrap();
    {
        let engine = session.engine_mut();
        engine
            .unlock_industry(IndustryKind::ConstructionSociety)
            .unwrap();
        for _ in 0..9 {
            engine.build_structure(BuildingKind::WorkerHouse).unwrap();
        }
        for _ in 0..50 {
            engine.hire_worker(WorkerKind::Builder).unwrap();
        }
        engine.start_capstone().unwrap();
    }

    let reports = session.advance(std::time::Duration::from_secs(5));
    assert_eq!(reports.len(), 10);
    assert!(reports.last().is_some_and(|r| r.capstone_just_completed));
    assert!(session.is_over());
    assert!(!session.clock().is_running());
}
