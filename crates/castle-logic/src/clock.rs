//! Fixed-period simulation clock.
//!
//! The clock accumulates elapsed wall time and converts it into whole engine
//! ticks. It is a plain value owned by the session, so there is exactly one
//! schedule per game and it cannot be started twice. Stopping it is the
//! cancellation: a stopped clock drops elapsed time on the floor.

use std::time::Duration;

use log::{debug, info};

use crate::engine::{GameEngine, TickReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClockState {
    Running,
    Stopped,
}

#[derive(Debug, Clone)]
pub struct SimulationClock {
    period: Duration,
    pending: Duration,
    state: ClockState,
    stop_on_completion: bool,
    ticks_fired: u64,
}

impl SimulationClock {
    /// A running clock. A zero period is bumped to one millisecond.
    pub fn new(period: Duration, stop_on_completion: bool) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            pending: Duration::ZERO,
            state: ClockState::Running,
            stop_on_completion,
            ticks_fired: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn ticks_fired(&self) -> u64 {
        self.ticks_fired
    }

    /// Time left until the next tick fires.
    pub fn until_next_tick(&self) -> Duration {
        self.period.saturating_sub(self.pending)
    }

    /// Resume a stopped clock. Returns false if it was already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.pending = Duration::ZERO;
        self.state = ClockState::Running;
        debug!("Clock started ({:?} period)", self.period);
        true
    }

    /// Cancel the schedule. Returns false if it was already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.pending = Duration::ZERO;
        self.state = ClockState::Stopped;
        debug!("Clock stopped after {} ticks", self.ticks_fired);
        true
    }

    /// Feed elapsed time and fire every tick that has come due.
    pub fn advance(&mut self, elapsed: Duration, engine: &mut GameEngine) -> Vec<TickReport> {
        let mut reports = Vec::new();
        if !self.is_running() {
            return reports;
        }
        self.pending += elapsed;
        while self.pending >= self.period && self.is_running() {
            self.pending -= self.period;
            reports.push(self.fire(engine));
        }
        reports
    }

    /// Fire a single tick immediately, ignoring accumulated time.
    pub fn step(&mut self, engine: &mut GameEngine) -> Option<TickReport> {
        self.is_running().then(|| self.fire(engine))
    }

    fn fire(&mut self, engine: &mut GameEngine) -> TickReport {
        let report = engine.tick();
        self.ticks_fired += 1;
        if report.capstone_just_completed && self.stop_on_completion {
            info!("Research center complete; stopping clock");
            self.stop();
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::industry::IndustryKind;
    use crate::population::WorkerKind;
    use crate::resources::ResourceAmounts;

    fn second() -> Duration {
        Duration::from_secs(1)
    }

    #[test]
    fn test_accumulates_partial_periods() {
        let mut engine = GameEngine::default();
        let mut clock = SimulationClock::new(second(), true);
        assert!(clock.advance(Duration::from_millis(600), &mut engine).is_empty());
        assert_eq!(clock.until_next_tick(), Duration::from_millis(400));
        let reports = clock.advance(Duration::from_millis(600), &mut engine);
        assert_eq!(reports.len(), 1);
        assert_eq!(engine.tick_count(), 1);
    }

    #[test]
    fn test_fires_multiple_ticks_for_long_gap() {
        let mut engine = GameEngine::default();
        let mut clock = SimulationClock::new(second(), true);
        let reports = clock.advance(Duration::from_millis(3500), &mut engine);
        assert_eq!(reports.iter().map(|r| r.tick).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(clock.ticks_fired(), 3);
    }

    #[test]
    fn test_stopped_clock_is_inert() {
        let mut engine = GameEngine::default();
        let mut clock = SimulationClock::new(second(), true);
        assert!(clock.stop());
        assert!(!clock.stop());
        assert!(clock.advance(Duration::from_secs(10), &mut engine).is_empty());
        assert!(clock.step(&mut engine).is_none());
        assert_eq!(engine.tick_count(), 0);
    }

    #[test]
    fn test_start_does_not_double_schedule() {
        let mut engine = GameEngine::default();
        let mut clock = SimulationClock::new(second(), true);
        assert!(!clock.start());
        let reports = clock.advance(second(), &mut engine);
        assert_eq!(reports.len(), 1);
    }

    #[test]
    fn test_stops_on_completion() {
        let mut engine = GameEngine::new(&GameConfig {
            starting_resources: ResourceAmounts::uniform(20_000),
            capstone_required: 10,
            ..GameConfig::default()
        });
        engine
            .unlock_industry(IndustryKind::ConstructionSociety)
            .unwrap();
        for _ in 0..5 {
            engine.hire_worker(WorkerKind::Builder).unwrap();
        }
        engine.start_capstone().unwrap();

        let mut clock = SimulationClock::new(second(), true);
        let reports = clock.advance(Duration::from_secs(10), &mut engine);
        assert_eq!(reports.len(), 2);
        assert!(reports[1].capstone_just_completed);
        assert!(!clock.is_running());
        assert_eq!(engine.tick_count(), 2);
    }

    #[test]
    fn test_keeps_running_when_configured() {
        let mut engine = GameEngine::new(&GameConfig {
            starting_resources: ResourceAmounts::uniform(20_000),
            capstone_required: 5,
            ..GameConfig::default()
        });
        engine
            .unlock_industry(IndustryKind::ConstructionSociety)
            .unwrap();
        for _ in 0..5 {
            engine.hire_worker(WorkerKind::Builder).unwrap();
        }
        engine.start_capstone().unwrap();

        let mut clock = SimulationClock::new(second(), false);
        let reports = clock.advance(Duration::from_secs(4), &mut engine);
        assert_eq!(reports.len(), 4);
        assert_eq!(reports.iter().filter(|r| r.capstone_just_completed).count(), 1);
        assert!(clock.is_running());
    }
}
