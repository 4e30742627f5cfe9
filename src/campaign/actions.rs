//! Declarative activation changes grouped per phase and per day.
use bevy::prelude::Entity;

use super::components::Phase;

pub const DEFAULT_CAMPAIGN_LENGTH: u32 = 7;

/// One desired activation or deactivation of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseAction {
    pub entity: Entity,
    pub persistent: bool,
}

impl PhaseAction {
    pub fn persistent(entity: Entity) -> Self {
        Self {
            entity,
            persistent: true,
        }
    }

    pub fn transient(entity: Entity) -> Self {
        Self {
            entity,
            persistent: false,
        }
    }
}

/// Activations and deactivations applied together for one phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseActionSet {
    pub activate: Vec<PhaseAction>,
    pub deactivate: Vec<PhaseAction>,
}

impl PhaseActionSet {
    pub fn new(activate: Vec<PhaseAction>, deactivate: Vec<PhaseAction>) -> Self {
        Self {
            activate,
            deactivate,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.activate.is_empty() && self.deactivate.is_empty()
    }

    pub fn len(&self) -> usize {
        self.activate.len() + self.deactivate.len()
    }

    /// Every action as `(action, requested_state)`, activations first.
    pub fn requests(&self) -> impl Iterator<Item = (PhaseAction, bool)> + '_ {
        self.activate
            .iter()
            .map(|action| (*action, true))
            .chain(self.deactivate.iter().map(|action| (*action, false)))
    }
}

/// Per-day configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayConfig {
    pub has_second_phase: bool,
    pub morning: PhaseActionSet,
    pub night: PhaseActionSet,
}

impl DayConfig {
    pub fn actions_for(&self, phase: Phase) -> &PhaseActionSet {
        match phase {
            Phase::Morning => &self.morning,
            Phase::Night => &self.night,
        }
    }
}

/// Fixed-length campaign: ordered day configurations plus global action sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    days: Vec<DayConfig>,
    global_morning: PhaseActionSet,
    global_night: PhaseActionSet,
    start_day: u32,
    start_phase: Phase,
}

impl Campaign {
    /// Builds a campaign of exactly `length` days (at least one), padding with
    /// empty days or truncating the supplied list as needed.
    pub fn new(
        length: u32,
        mut days: Vec<DayConfig>,
        global_morning: PhaseActionSet,
        global_night: PhaseActionSet,
    ) -> Self {
        let length = length.max(1);
        days.resize_with(length as usize, DayConfig::default);

        Self {
            days,
            global_morning,
            global_night,
            start_day: 1,
            start_phase: Phase::Morning,
        }
    }

    pub fn with_start(mut self, day: u32, phase: Phase) -> Self {
        self.start_day = self.clamp_day(day);
        self.start_phase = phase;
        self
    }

    pub fn length(&self) -> u32 {
        self.days.len() as u32
    }

    pub fn clamp_day(&self, day: u32) -> u32 {
        day.clamp(1, self.length())
    }

    /// Day configuration for a 1-based day index.
    pub fn day(&self, day: u32) -> Option<&DayConfig> {
        let index = day.checked_sub(1)?;
        self.days.get(index as usize)
    }

    pub fn global_actions(&self, phase: Phase) -> &PhaseActionSet {
        match phase {
            Phase::Morning => &self.global_morning,
            Phase::Night => &self.global_night,
        }
    }

    pub fn start_day(&self) -> u32 {
        self.start_day
    }

    pub fn start_phase(&self) -> Phase {
        self.start_phase
    }
}

impl Default for Campaign {
    fn default() -> Self {
        Self::new(
            DEFAULT_CAMPAIGN_LENGTH,
            Vec::new(),
            PhaseActionSet::default(),
            PhaseActionSet::default(),
        )
    }
}
