//! WorldPlugin spawns the scene and mirrors campaign activation into rendering.
use bevy::prelude::*;

use crate::{
    campaign::systems::{initialise_campaign, process_phase_requests},
    world::systems::{apply_phase_lighting, spawn_world_environment, sync_activation_visibility},
};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_world_environment)
            .add_systems(PostStartup, sync_activation_visibility.after(initialise_campaign))
            .add_systems(
                Update,
                (
                    sync_activation_visibility.after(process_phase_requests),
                    apply_phase_lighting.after(process_phase_requests),
                ),
            );
    }
}
