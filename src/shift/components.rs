//! Collaborators the campaign pokes at the start of every day.
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum IdleTimerState {
    #[default]
    Idle,
    Running {
        elapsed_seconds: f32,
    },
}

/// Shift timer that runs while the player works and idles between shifts.
#[derive(Component, Debug, Clone, Default)]
pub struct IdleTimer {
    state: IdleTimerState,
    resets: u32,
}

impl IdleTimer {
    pub fn state(&self) -> IdleTimerState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, IdleTimerState::Idle)
    }

    pub fn elapsed_seconds(&self) -> f32 {
        match self.state {
            IdleTimerState::Idle => 0.0,
            IdleTimerState::Running { elapsed_seconds } => elapsed_seconds,
        }
    }

    pub fn resets(&self) -> u32 {
        self.resets
    }

    pub fn start(&mut self) {
        if self.is_idle() {
            self.state = IdleTimerState::Running {
                elapsed_seconds: 0.0,
            };
        }
    }

    pub fn tick(&mut self, delta_seconds: f32) {
        if let IdleTimerState::Running { elapsed_seconds } = &mut self.state {
            *elapsed_seconds += delta_seconds.max(0.0);
        }
    }

    pub fn reset_to_idle(&mut self) {
        self.state = IdleTimerState::Idle;
        self.resets = self.resets.saturating_add(1);
    }
}

/// Menu board listing the day's dishes; sold-out marks clear on refresh.
#[derive(Component, Debug, Clone, Default)]
pub struct MenuBoard {
    dishes: Vec<String>,
    sold_out: Vec<String>,
    headline: String,
    refreshes: u32,
}

impl MenuBoard {
    pub fn new(dishes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            dishes: dishes.into_iter().map(Into::into).collect(),
            ..default()
        }
    }

    pub fn available(&self) -> impl Iterator<Item = &str> {
        self.dishes
            .iter()
            .filter(|dish| !self.sold_out.contains(*dish))
            .map(String::as_str)
    }

    pub fn mark_sold_out(&mut self, dish: &str) {
        if self.dishes.iter().any(|known| known == dish)
            && !self.sold_out.iter().any(|sold| sold == dish)
        {
            self.sold_out.push(dish.to_string());
        }
    }

    pub fn headline(&self) -> &str {
        &self.headline
    }

    pub fn set_headline(&mut self, headline: impl Into<String>) {
        self.headline = headline.into();
    }

    pub fn refreshes(&self) -> u32 {
        self.refreshes
    }

    pub fn refresh(&mut self) {
        self.sold_out.clear();
        self.refreshes = self.refreshes.saturating_add(1);
    }
}
