//! Phase enumeration and the activation component driven by the campaign.
use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// One of the two ordered sub-periods of a campaign day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    #[serde(alias = "phase1")]
    Morning,
    #[serde(alias = "phase2")]
    Night,
}

impl Phase {
    pub fn is_first(self) -> bool {
        matches!(self, Self::Morning)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Night => "Night",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Cursor value broadcast whenever a phase has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhaseStamp {
    pub day: u32,
    pub phase: Phase,
}

impl PhaseStamp {
    pub fn new(day: u32, phase: Phase) -> Self {
        Self { day, phase }
    }
}

impl fmt::Display for PhaseStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day {} / {}", self.day, self.phase)
    }
}

/// The active flag of a world entity. The campaign only ever touches this.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    active: bool,
}

impl Activation {
    pub fn new(active: bool) -> Self {
        Self { active }
    }

    pub fn active() -> Self {
        Self::new(true)
    }

    pub fn inactive() -> Self {
        Self::new(false)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set(&mut self, active: bool) {
        self.active = active;
    }
}

impl Default for Activation {
    fn default() -> Self {
        Self::active()
    }
}
