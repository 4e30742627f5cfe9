//! Shift plugin wiring the collaborators that listen to the campaign.
use bevy::prelude::*;

use crate::campaign::systems::process_phase_requests;

use super::systems::{log_phase_changes, react_to_phase_changes, tick_idle_timers};

pub struct ShiftPlugin;

impl Plugin for ShiftPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                tick_idle_timers,
                log_phase_changes.after(process_phase_requests),
                react_to_phase_changes.after(process_phase_requests),
            ),
        );
    }
}
