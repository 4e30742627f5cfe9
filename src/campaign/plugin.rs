//! CampaignPlugin wires the phase orchestrator, its messages and telemetry.
use bevy::prelude::*;

use super::{
    config::CampaignBlueprint,
    events::{PhaseChangedEvent, PhaseRequest},
    systems::{initialise_campaign, process_phase_requests},
    telemetry::{flush_phase_journal_log, PhaseJournal, PhaseJournalLog},
};

/// Marks that a campaign plugin has already been built into the app.
#[derive(Resource)]
struct CampaignInstalled;

/// Registers the campaign core. Only the first instance added to an app takes
/// effect; later ones log a warning and leave the app untouched.
#[derive(Debug, Clone, Default)]
pub struct CampaignPlugin {
    blueprint: Option<CampaignBlueprint>,
    journal_log: bool,
}

impl CampaignPlugin {
    /// Uses `blueprint` instead of reading `config/campaign.toml`.
    pub fn with_blueprint(blueprint: CampaignBlueprint) -> Self {
        Self {
            blueprint: Some(blueprint),
            ..default()
        }
    }

    /// Mirrors the phase journal to `logs/phase_history.jsonl`.
    pub fn with_journal_log(mut self) -> Self {
        self.journal_log = true;
        self
    }
}

impl Plugin for CampaignPlugin {
    fn build(&self, app: &mut App) {
        if app.world().contains_resource::<CampaignInstalled>() {
            warn!("CampaignPlugin added twice; keeping the first campaign");
            return;
        }
        app.insert_resource(CampaignInstalled);

        match &self.blueprint {
            Some(blueprint) => {
                app.insert_resource(blueprint.clone());
            }
            None if app.world().contains_resource::<CampaignBlueprint>() => {}
            None => {
                app.insert_resource(CampaignBlueprint::load_or_default());
            }
        }

        app.init_resource::<PhaseJournal>()
            .add_message::<PhaseChangedEvent>()
            .add_message::<PhaseRequest>()
            .add_systems(PostStartup, initialise_campaign)
            .add_systems(Update, process_phase_requests);

        if self.journal_log {
            app.init_resource::<PhaseJournalLog>()
                .add_systems(Last, flush_phase_journal_log);
        }

        #[cfg(feature = "core_debug")]
        {
            use super::systems::debug_phase_controls;

            app.add_systems(Update, debug_phase_controls.before(process_phase_requests));
        }
    }

    fn is_unique(&self) -> bool {
        false
    }
}
