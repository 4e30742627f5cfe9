use bevy::prelude::*;

use shiftwork::{CampaignPlugin, ShiftPlugin, WorldPlugin};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            CampaignPlugin::default().with_journal_log(),
            ShiftPlugin,
            WorldPlugin,
        ))
        .run();
}
