//! Research center: the long-running capstone construction.
//!
//! Once paid for, the project gains one point of progress per hired builder
//! per tick. Reaching the required total completes it, which ends the game.
//!
//! ```text
//! NotStarted ──start()──▶ InProgress ──tick(progress ≥ required)──▶ Complete
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{prices, RESEARCH_CENTER_REQUIRED};
use crate::error::CapstoneError;
use crate::resources::{ResourceAmounts, ResourceLedger};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectState {
    #[default]
    NotStarted,
    InProgress,
    Complete,
}

/// What a single tick did to the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressOutcome {
    pub delta: u32,
    /// True only on the tick that finished the project.
    pub just_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionProject {
    state: ProjectState,
    progress: u32,
    required: u32,
}

impl Default for ConstructionProject {
    fn default() -> Self {
        Self::new(RESEARCH_CENTER_REQUIRED)
    }
}

impl ConstructionProject {
    /// A project needing `required` builder-ticks. Zero is raised to one, so
    /// completion always takes at least one builder on site.
    pub fn new(required: u32) -> Self {
        Self {
            state: ProjectState::NotStarted,
            progress: 0,
            required: required.max(1),
        }
    }

    pub fn cost() -> ResourceAmounts {
        prices::START_RESEARCH_CENTER
    }

    pub fn state(&self) -> ProjectState {
        self.state
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn required(&self) -> u32 {
        self.required
    }

    pub fn is_complete(&self) -> bool {
        self.state == ProjectState::Complete
    }

    /// Progress for display, never above `required`.
    pub fn displayed_progress(&self) -> u32 {
        self.progress.min(self.required)
    }

    /// Completion as a fraction in 0.0..=1.0.
    pub fn fraction(&self) -> f32 {
        self.displayed_progress() as f32 / self.required as f32
    }

    pub fn can_start(&self, ledger: &ResourceLedger) -> bool {
        self.state == ProjectState::NotStarted && ledger.can_afford(&Self::cost())
    }

    pub fn start(&mut self, ledger: &mut ResourceLedger) -> Result<(), CapstoneError> {
        match self.state {
            ProjectState::Complete => return Err(CapstoneError::AlreadyComplete),
            ProjectState::InProgress => return Err(CapstoneError::AlreadyInProgress),
            ProjectState::NotStarted => {}
        }
        ledger.apply_cost(&Self::cost())?;
        self.state = ProjectState::InProgress;
        self.progress = 0;
        Ok(())
    }

    /// Advance by one tick with the given number of builders on site.
    pub fn tick(&mut self, builders: u32) -> ProgressOutcome {
        if self.state != ProjectState::InProgress {
            return ProgressOutcome::default();
        }
        self.progress = self.progress.saturating_add(builders);
        let just_completed = self.progress >= self.required;
        if just_completed {
            self.state = ProjectState::Complete;
        }
        ProgressOutcome {
            delta: builders,
            just_completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> ConstructionProject {
        let mut project = ConstructionProject::default();
        let mut ledger = ResourceLedger::with_amounts(&ConstructionProject::cost());
        project.start(&mut ledger).unwrap();
        project
    }

    #[test]
    fn test_tick_before_start_is_noop() {
        let mut project = ConstructionProject::default();
        assert_eq!(project.tick(100), ProgressOutcome::default());
        assert_eq!(project.progress(), 0);
        assert_eq!(project.state(), ProjectState::NotStarted);
    }

    #[test]
    fn test_start_debits_full_cost() {
        let mut project = ConstructionProject::default();
        let mut ledger = ResourceLedger::with_amounts(&ResourceAmounts::new(10_000, 10_000, 5_000, 5_100));
        project.start(&mut ledger).unwrap();
        assert_eq!(project.state(), ProjectState::InProgress);
        assert_eq!(ledger.amounts(), ResourceAmounts::new(0, 0, 0, 100));
    }

    #[test]
    fn test_start_insufficient_keeps_state() {
        let mut project = ConstructionProject::default();
        let mut ledger = ResourceLedger::with_amounts(&ResourceAmounts::new(10_000, 10_000, 5_000, 4_999));
        assert!(matches!(
            project.start(&mut ledger),
            Err(CapstoneError::InsufficientResource(_))
        ));
        assert_eq!(project.state(), ProjectState::NotStarted);
        assert_eq!(ledger.amounts().iron, 4_999);
    }

    #[test]
    fn test_start_twice() {
        let mut project = started();
        let mut ledger = ResourceLedger::with_amounts(&ConstructionProject::cost());
        assert_eq!(
            project.start(&mut ledger),
            Err(CapstoneError::AlreadyInProgress)
        );
        assert_eq!(ledger.amounts(), ConstructionProject::cost());
    }

    #[test]
    fn test_completes_once() {
        let mut project = started();
        assert!(!project.tick(499).just_completed);
        let outcome = project.tick(3);
        assert!(outcome.just_completed);
        assert_eq!(outcome.delta, 3);
        assert_eq!(project.progress(), 502);
        assert_eq!(project.displayed_progress(), 500);
        assert_eq!(project.fraction(), 1.0);

        assert_eq!(project.tick(50), ProgressOutcome::default());
        assert_eq!(project.progress(), 502);

        let mut ledger = ResourceLedger::with_amounts(&ConstructionProject::cost());
        assert_eq!(project.start(&mut ledger), Err(CapstoneError::AlreadyComplete));
    }

    #[test]
    fn test_zero_builders_make_no_progress() {
        let mut project = started();
        for _ in 0..10 {
            project.tick(0);
        }
        assert_eq!(project.progress(), 0);
        assert_eq!(project.state(), ProjectState::InProgress);
    }

    #[test]
    fn test_zero_requirement_still_needs_a_builder() {
        let mut project = ConstructionProject::new(0);
        assert_eq!(project.required(), 1);
        let mut ledger = ResourceLedger::with_amounts(&ConstructionProject::cost());
        project.start(&mut ledger).unwrap();
        assert!(!project.tick(0).just_completed);
        assert_eq!(project.state(), ProjectState::InProgress);
        assert!(project.tick(1).just_completed);
    }
}
