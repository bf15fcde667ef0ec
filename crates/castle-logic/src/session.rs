//! Play session: the composition root that pairs an engine with its clock.
//!
//! Mirrors the title-screen flow: start a new game, continue a saved game
//! (not supported yet), or exit.

use std::path::Path;
use std::time::Duration;

use log::{info, warn};
use thiserror::Error;

use crate::clock::SimulationClock;
use crate::config::{validate_config, ConfigIssue, GameConfig};
use crate::engine::{GameEngine, TickReport};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("loading a saved game is not implemented")]
    NotImplemented,
    #[error("invalid config: {0:?}")]
    InvalidConfig(Vec<ConfigIssue>),
}

#[derive(Debug)]
pub struct Session {
    engine: GameEngine,
    clock: SimulationClock,
}

impl Session {
    pub fn new_game(config: &GameConfig) -> Result<Self, SessionError> {
        let issues = validate_config(config);
        if !issues.is_empty() {
            return Err(SessionError::InvalidConfig(issues));
        }
        info!(
            "New game: starting with {}, {:?} ticks",
            config.starting_resources,
            config.tick_period()
        );
        Ok(Self {
            engine: GameEngine::new(config),
            clock: SimulationClock::new(config.tick_period(), config.stop_clock_on_completion),
        })
    }

    /// Continue a saved game. Saves are not supported.
    pub fn load_game(path: &Path) -> Result<Self, SessionError> {
        warn!("Cannot load {}: saved games are not supported", path.display());
        Err(SessionError::NotImplemented)
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine {
        &mut self.engine
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Feed elapsed wall time to the clock.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TickReport> {
        self.clock.advance(elapsed, &mut self.engine)
    }

    /// Fire one tick right away, if the clock is running.
    pub fn step(&mut self) -> Option<TickReport> {
        self.clock.step(&mut self.engine)
    }

    pub fn is_over(&self) -> bool {
        self.engine.is_game_over()
    }

    /// End the session and cancel its clock.
    pub fn end(mut self) -> GameEngine {
        self.clock.stop();
        info!("Session ended after {} ticks", self.engine.tick_count());
        self.engine
    }
}
