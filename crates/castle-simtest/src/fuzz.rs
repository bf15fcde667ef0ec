//! Seeded random play: hammers the action API and checks invariants after
//! every step.

use castle_logic::constants::DEBUG_GRANT_AMOUNT;
use castle_logic::engine::{Action, GameEngine, Snapshot};
use castle_logic::population::WorkerKind;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Default)]
pub struct FuzzReport {
    pub steps: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub ticks: u64,
    pub grants: usize,
    pub violations: Vec<String>,
    pub final_snapshot: Option<Snapshot>,
}

/// Run `steps` random steps against a fresh engine seeded with `seed`.
pub fn run(seed: u64, steps: usize) -> FuzzReport {
    let mut rng = StdRng::seed_from_u64(seed);
    let actions = Action::all();
    let mut engine = GameEngine::default();
    let mut report = FuzzReport {
        steps,
        ..FuzzReport::default()
    };
    let mut last_progress = 0;

    for step in 0..steps {
        let roll: f32 = rng.gen();
        if roll < 0.05 {
            engine.debug_grant_all(DEBUG_GRANT_AMOUNT);
            report.grants += 1;
        } else if roll < 0.30 {
            let was_complete = engine.is_game_over();
            let tick = engine.tick();
            report.ticks += 1;
            if was_complete && (tick.capstone_progress_delta > 0 || tick.capstone_just_completed)
            {
                report
                    .violations
                    .push(format!("step {}: completed project advanced", step));
            }
        } else if let Some(&action) = actions.choose(&mut rng) {
            let before = engine.state().clone();
            let predicted = engine.can_apply(action);
            match engine.apply(action) {
                Ok(_) => report.accepted += 1,
                Err(e) => {
                    report.rejected += 1;
                    if engine.state() != &before {
                        report.violations.push(format!(
                            "step {}: rejected {} ({}) but state changed",
                            step, action, e
                        ));
                    }
                }
            }
            let succeeded = engine.state() != &before;
            if predicted != succeeded {
                report.violations.push(format!(
                    "step {}: can_apply({}) said {} but apply {}",
                    step,
                    action,
                    predicted,
                    if succeeded { "succeeded" } else { "failed" }
                ));
            }
        }

        for &worker in WorkerKind::all() {
            let hired = engine.hired(worker);
            let capacity = engine.capacity_of(worker);
            if hired > capacity {
                report.violations.push(format!(
                    "step {}: {} hired {} over capacity {}",
                    step, worker, hired, capacity
                ));
            }
        }
        let progress = engine.capstone().progress();
        if progress < last_progress {
            report.violations.push(format!(
                "step {}: research center progress fell {} -> {}",
                step, last_progress, progress
            ));
        }
        last_progress = progress;
    }

    report.final_snapshot = Some(engine.snapshot());
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzz_finds_no_violations() {
        let report = run(7, 2_000);
        assert!(report.violations.is_empty(), "{:?}", report.violations);
        assert!(report.accepted > 0);
        assert!(report.rejected > 0);
    }

    #[test]
    fn test_same_seed_same_game() {
        let a = run(42, 500);
        let b = run(42, 500);
        assert_eq!(a.final_snapshot, b.final_snapshot);
        assert_eq!(a.accepted, b.accepted);
    }
}
