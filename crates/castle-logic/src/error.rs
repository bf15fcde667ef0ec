//! Action errors returned by the engine.
//!
//! All of them are recoverable: an action that returns an error has not
//! changed any state, and the caller only needs to show the reason.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buildings::BuildingKind;
use crate::industry::IndustryKind;
use crate::population::WorkerKind;
use crate::resources::ResourceKind;

/// One resource kind the stockpile could not cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub kind: ResourceKind,
    pub required: u64,
    pub available: u64,
}

impl Shortfall {
    pub fn missing(&self) -> u64 {
        self.required.saturating_sub(self.available)
    }
}

/// Every kind that fell short for a single payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub struct Shortage {
    shortfalls: Vec<Shortfall>,
}

impl Shortage {
    pub fn new(shortfalls: Vec<Shortfall>) -> Self {
        Self { shortfalls }
    }

    pub fn shortfalls(&self) -> &[Shortfall] {
        &self.shortfalls
    }

    pub fn missing_kinds(&self) -> Vec<ResourceKind> {
        self.shortfalls.iter().map(|s| s.kind).collect()
    }
}

impl fmt::Display for Shortage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("insufficient resources: ")?;
        for (i, s) in self.shortfalls.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "need {} {} (have {})", s.required, s.kind, s.available)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HireError {
    #[error("no housing left for another {worker}")]
    CapacityExceeded { worker: WorkerKind },
    #[error(transparent)]
    InsufficientResource(#[from] Shortage),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("{building} requires the {industry} first")]
    IndustryRequired {
        building: BuildingKind,
        industry: IndustryKind,
    },
    #[error(transparent)]
    InsufficientResource(#[from] Shortage),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndustryError {
    #[error("{industry} is already established")]
    AlreadyUnlocked { industry: IndustryKind },
    #[error(transparent)]
    InsufficientResource(#[from] Shortage),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapstoneError {
    #[error("the research center is already under construction")]
    AlreadyInProgress,
    #[error("the research center is already complete")]
    AlreadyComplete,
    #[error(transparent)]
    InsufficientResource(#[from] Shortage),
}

/// Any rejected player action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error(transparent)]
    Hire(#[from] HireError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Industry(#[from] IndustryError),
    #[error(transparent)]
    Capstone(#[from] CapstoneError),
}

impl ActionError {
    /// The shortage behind the rejection, if it was a resource problem.
    pub fn shortage(&self) -> Option<&Shortage> {
        match self {
            Self::Hire(HireError::InsufficientResource(s))
            | Self::Build(BuildError::InsufficientResource(s))
            | Self::Industry(IndustryError::InsufficientResource(s))
            | Self::Capstone(CapstoneError::InsufficientResource(s)) => Some(s),
            _ => None,
        }
    }
}
