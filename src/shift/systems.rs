//! Listeners reacting to campaign phase changes.
use bevy::prelude::*;

use crate::campaign::{components::Phase, events::PhaseChangedEvent};

use super::components::{IdleTimer, MenuBoard};

/// Logs every phase change for the console.
pub fn log_phase_changes(mut phase_changes: MessageReader<PhaseChangedEvent>) {
    for event in phase_changes.read() {
        info!("Now day {} ({})", event.day, event.phase);
    }
}

/// Updates menu board headlines and starts the shift timer when night falls.
pub fn react_to_phase_changes(
    mut phase_changes: MessageReader<PhaseChangedEvent>,
    mut boards: Query<&mut MenuBoard>,
    mut timers: Query<&mut IdleTimer>,
) {
    for event in phase_changes.read() {
        for mut board in boards.iter_mut() {
            board.set_headline(format!("Day {} - {}", event.day, event.phase));
        }

        if event.phase == Phase::Night {
            for mut timer in timers.iter_mut() {
                timer.start();
            }
        }
    }
}

pub fn tick_idle_timers(time: Res<Time>, mut timers: Query<&mut IdleTimer>) {
    let delta = time.delta_secs();
    for mut timer in timers.iter_mut() {
        timer.tick(delta);
    }
}
