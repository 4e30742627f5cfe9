//! Systems binding the phase orchestrator to the ECS world.
use std::collections::HashMap;

use bevy::{ecs::system::SystemParam, prelude::*};

use crate::shift::components::{IdleTimer, MenuBoard};

use super::{
    components::{Activation, PhaseStamp},
    config::CampaignBlueprint,
    events::{PhaseChangedEvent, PhaseRequest},
    orchestrator::{PhaseEnvironment, PhaseOrchestrator},
    telemetry::PhaseRecorder,
};

/// ECS view the orchestrator reads and writes while applying a phase.
///
/// Entities without an [`Activation`] component count as gone.
#[derive(SystemParam)]
pub struct PhaseWorld<'w, 's> {
    activations: Query<'w, 's, &'static mut Activation>,
    timers: Query<'w, 's, &'static mut IdleTimer>,
    menu_boards: Query<'w, 's, &'static mut MenuBoard>,
    phase_changes: MessageWriter<'w, PhaseChangedEvent>,
}

impl PhaseEnvironment for PhaseWorld<'_, '_> {
    fn active_state(&self, entity: Entity) -> Option<bool> {
        self.activations
            .get(entity)
            .ok()
            .map(|activation| activation.is_active())
    }

    fn set_active(&mut self, entity: Entity, active: bool) -> bool {
        match self.activations.get_mut(entity) {
            Ok(mut activation) => {
                activation.set_if_neq(Activation::new(active));
                true
            }
            Err(_) => false,
        }
    }

    fn announce(&mut self, stamp: PhaseStamp) {
        self.phase_changes.write(stamp.into());
    }

    fn reset_timer_to_idle(&mut self) {
        for mut timer in self.timers.iter_mut() {
            timer.reset_to_idle();
        }
    }

    fn refresh_menu_boards(&mut self) {
        for mut board in self.menu_boards.iter_mut() {
            board.refresh();
        }
    }
}

/// Resolves the loaded blueprint against named entities and applies the
/// starting phase. Does nothing when an orchestrator is already installed.
pub fn initialise_campaign(
    mut commands: Commands,
    existing: Option<Res<PhaseOrchestrator>>,
    blueprint: Option<Res<CampaignBlueprint>>,
    named: Query<(Entity, &Name)>,
    mut phase_world: PhaseWorld,
    mut recorder: PhaseRecorder,
) {
    if existing.is_some() {
        warn!("A phase orchestrator is already installed; ignoring the configured campaign");
        return;
    }

    let blueprint = blueprint
        .map(|res| CampaignBlueprint::clone(&res))
        .unwrap_or_default();
    let by_name: HashMap<&str, Entity> = named
        .iter()
        .map(|(entity, name)| (name.as_str(), entity))
        .collect();

    let (campaign, unresolved) = blueprint.resolve(|target| by_name.get(target).copied());
    for target in &unresolved {
        warn!("Campaign target '{target}' matches no named entity; its actions are ignored");
    }

    info!(
        "Campaign configured: {} days, starting on day {} ({})",
        campaign.length(),
        campaign.start_day(),
        campaign.start_phase()
    );

    let start_day = campaign.start_day();
    let start_phase = campaign.start_phase();
    let mut orchestrator = PhaseOrchestrator::new(campaign);
    let report = orchestrator.reset_campaign(&mut phase_world, start_day, start_phase);
    recorder.record(report);

    commands.queue(move |world: &mut World| {
        orchestrator.install(world);
    });
}

/// Runs queued phase requests in arrival order, one phase application each.
pub fn process_phase_requests(
    orchestrator: Option<ResMut<PhaseOrchestrator>>,
    mut requests: MessageReader<PhaseRequest>,
    mut phase_world: PhaseWorld,
    mut recorder: PhaseRecorder,
) {
    let Some(mut orchestrator) = orchestrator else {
        if !requests.is_empty() {
            warn!("Phase requests received before the campaign was initialised; dropping them");
        }
        requests.clear();
        return;
    };

    for request in requests.read() {
        let report = match *request {
            PhaseRequest::Advance => orchestrator.advance_phase(&mut phase_world),
            PhaseRequest::Reset { day, phase } => {
                orchestrator.reset_campaign(&mut phase_world, day, phase)
            }
        };
        recorder.record(report);
    }
}

/// Debug bindings: `N` advances the phase, `R` restarts the campaign.
#[cfg(feature = "core_debug")]
pub fn debug_phase_controls(
    keys: Res<ButtonInput<KeyCode>>,
    mut requests: MessageWriter<PhaseRequest>,
) {
    if keys.just_pressed(KeyCode::KeyN) {
        requests.write(PhaseRequest::Advance);
    }
    if keys.just_pressed(KeyCode::KeyR) {
        requests.write(PhaseRequest::restart());
    }
}
