//! Pure simulation logic for the castle economy game.
//!
//! This crate contains all game rules and state, independent of any UI or
//! runtime. A presentation layer calls the [`engine::GameEngine`] action
//! methods on player intent and renders from [`engine::GameEngine::snapshot`];
//! a [`clock::SimulationClock`] drives the per-tick update.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`buildings`] | Housing buildings and their construction rules |
//! | [`capstone`] | Research center construction project |
//! | [`clock`] | Fixed-period tick driver |
//! | [`config`] | Session configuration (starting stockpile, tick period) |
//! | [`constants`] | Prices, capacity multipliers, production rates |
//! | [`engine`] | Game state, action API, per-tick update, snapshots |
//! | [`error`] | Action error types |
//! | [`industry`] | One-time society unlocks |
//! | [`population`] | Worker kinds, hiring, capacity formulas, production |
//! | [`resources`] | Resource kinds, bundles, and the stockpile ledger |
//! | [`session`] | Composition root pairing an engine with its clock |
//!
//! ```
//! use castle_logic::engine::GameEngine;
//! use castle_logic::industry::IndustryKind;
//! use castle_logic::population::WorkerKind;
//!
//! let mut engine = GameEngine::default();
//! engine.unlock_industry(IndustryKind::AgricultureSociety).unwrap();
//! assert_eq!(engine.hire_worker(WorkerKind::Farmer), Ok(1));
//! assert_eq!(engine.tick().resources_produced.food, 1);
//! ```

pub mod buildings;
pub mod capstone;
pub mod clock;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod industry;
pub mod population;
pub mod resources;
pub mod session;
