//! Campaign configuration loaded from `config/campaign.toml`.
use std::{collections::BTreeSet, fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use super::{
    actions::{Campaign, DayConfig, PhaseAction, PhaseActionSet, DEFAULT_CAMPAIGN_LENGTH},
    components::Phase,
};

const CONFIG_PATH: &str = "config/campaign.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawCampaignConfig {
    #[serde(default)]
    campaign: RawCampaignSection,
    #[serde(default)]
    global: RawGlobalSection,
    #[serde(default)]
    days: Vec<RawDay>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawCampaignSection {
    length: u32,
    start_day: u32,
    start_phase: Phase,
}

impl Default for RawCampaignSection {
    fn default() -> Self {
        Self {
            length: DEFAULT_CAMPAIGN_LENGTH,
            start_day: 1,
            start_phase: Phase::Morning,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawGlobalSection {
    morning: RawActionSet,
    night: RawActionSet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawDay {
    second_phase: bool,
    morning: RawActionSet,
    night: RawActionSet,
}

impl Default for RawDay {
    fn default() -> Self {
        Self {
            second_phase: true,
            morning: RawActionSet::default(),
            night: RawActionSet::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawActionSet {
    activate: Vec<RawAction>,
    deactivate: Vec<RawAction>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawAction {
    target: String,
    #[serde(default)]
    persistent: bool,
}

/// An action that still refers to its target by `Name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBlueprint {
    pub target: String,
    pub persistent: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionSetBlueprint {
    pub activate: Vec<ActionBlueprint>,
    pub deactivate: Vec<ActionBlueprint>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBlueprint {
    pub has_second_phase: bool,
    pub morning: ActionSetBlueprint,
    pub night: ActionSetBlueprint,
}

/// Name-keyed campaign description, resolved to entities once the scene exists.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct CampaignBlueprint {
    pub length: u32,
    pub start_day: u32,
    pub start_phase: Phase,
    pub global_morning: ActionSetBlueprint,
    pub global_night: ActionSetBlueprint,
    pub days: Vec<DayBlueprint>,
}

impl CampaignBlueprint {
    pub fn load_or_default() -> Self {
        Self::load_from_path(CONFIG_PATH)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(data) => match Self::from_toml_str(&data) {
                Ok(blueprint) => blueprint,
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        path.display(),
                        err
                    );
                    RawCampaignConfig::default().into()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    path.display(),
                    err
                );
                RawCampaignConfig::default().into()
            }
        }
    }

    pub fn from_toml_str(data: &str) -> Result<Self, String> {
        toml::from_str::<RawCampaignConfig>(data)
            .map(Self::from)
            .map_err(|err| format!("invalid campaign config: {err}"))
    }

    /// Maps every target name to an entity. Names that match nothing are
    /// returned (sorted, deduplicated) and their actions are dropped.
    pub fn resolve(&self, lookup: impl Fn(&str) -> Option<Entity>) -> (Campaign, Vec<String>) {
        let mut unresolved = BTreeSet::new();
        let mut resolve_set = |set: &ActionSetBlueprint| {
            let mut convert = |actions: &[ActionBlueprint]| {
                actions
                    .iter()
                    .filter_map(|action| match lookup(action.target.as_str()) {
                        Some(entity) => Some(PhaseAction {
                            entity,
                            persistent: action.persistent,
                        }),
                        None => {
                            unresolved.insert(action.target.clone());
                            None
                        }
                    })
                    .collect::<Vec<_>>()
            };
            let activate = convert(&set.activate);
            let deactivate = convert(&set.deactivate);
            PhaseActionSet::new(activate, deactivate)
        };

        let global_morning = resolve_set(&self.global_morning);
        let global_night = resolve_set(&self.global_night);
        let days = self
            .days
            .iter()
            .map(|day| DayConfig {
                has_second_phase: day.has_second_phase,
                morning: resolve_set(&day.morning),
                night: resolve_set(&day.night),
            })
            .collect();

        let campaign = Campaign::new(self.length, days, global_morning, global_night)
            .with_start(self.start_day, self.start_phase);
        (campaign, unresolved.into_iter().collect())
    }
}

impl Default for CampaignBlueprint {
    fn default() -> Self {
        RawCampaignConfig::default().into()
    }
}

impl From<RawActionSet> for ActionSetBlueprint {
    fn from(value: RawActionSet) -> Self {
        let convert = |actions: Vec<RawAction>| {
            actions
                .into_iter()
                .map(|action| ActionBlueprint {
                    target: action.target.trim().to_string(),
                    persistent: action.persistent,
                })
                .filter(|action| !action.target.is_empty())
                .collect()
        };

        Self {
            activate: convert(value.activate),
            deactivate: convert(value.deactivate),
        }
    }
}

impl From<RawCampaignConfig> for CampaignBlueprint {
    fn from(value: RawCampaignConfig) -> Self {
        let length = value.campaign.length.max(1);
        let mut days: Vec<DayBlueprint> = value
            .days
            .into_iter()
            .map(|day| DayBlueprint {
                has_second_phase: day.second_phase,
                morning: day.morning.into(),
                night: day.night.into(),
            })
            .collect();
        if days.len() > length as usize {
            warn!(
                "Campaign config lists {} days but the campaign lasts {}; extra days are ignored",
                days.len(),
                length
            );
            days.truncate(length as usize);
        }

        Self {
            length,
            start_day: value.campaign.start_day.clamp(1, length),
            start_phase: value.campaign.start_phase,
            global_morning: value.global.morning.into(),
            global_night: value.global.night.into(),
            days,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const SAMPLE: &str = r#"
        [campaign]
        length = 3
        start_day = 5
        start_phase = "night"

        [global.morning]
        activate = [{ target = "Open Sign", persistent = false }]

        [global.night]
        deactivate = [{ target = "Open Sign" }]

        [[days]]
        second_phase = false
        [days.morning]
        deactivate = [{ target = "Broken Fridge", persistent = true }, { target = "  " }]

        [[days]]
        [days.night]
        activate = [{ target = "Missing Prop" }]
    "#;

    #[test]
    fn parses_sections_and_clamps_start() {
        let blueprint = CampaignBlueprint::from_toml_str(SAMPLE).expect("sample should parse");

        assert_eq!(blueprint.length, 3);
        assert_eq!(blueprint.start_day, 3);
        assert_eq!(blueprint.start_phase, Phase::Night);
        assert_eq!(blueprint.days.len(), 2);
        assert!(!blueprint.days[0].has_second_phase);
        assert!(blueprint.days[1].has_second_phase);
        assert_eq!(
            blueprint.days[0].morning.deactivate,
            vec![ActionBlueprint {
                target: "Broken Fridge".to_string(),
                persistent: true,
            }]
        );
        assert!(!blueprint.global_night.deactivate[0].persistent);
    }

    #[test]
    fn config_falls_back_to_defaults() {
        let blueprint = CampaignBlueprint::default();
        assert_eq!(blueprint.length, DEFAULT_CAMPAIGN_LENGTH);
        assert_eq!(blueprint.start_day, 1);
        assert_eq!(blueprint.start_phase, Phase::Morning);
        assert!(blueprint.days.is_empty());

        let missing = CampaignBlueprint::load_from_path("config/does_not_exist.toml");
        assert_eq!(missing, blueprint);
    }

    #[test]
    fn rejects_malformed_toml() {
        let error = CampaignBlueprint::from_toml_str("[campaign]\nlength = \"seven\"")
            .expect_err("string length should be rejected");
        assert!(error.contains("invalid campaign config"));
    }

    #[test]
    fn resolves_names_and_reports_missing_targets() {
        let blueprint = CampaignBlueprint::from_toml_str(SAMPLE).expect("sample should parse");

        let mut world = World::new();
        let sign = world.spawn_empty().id();
        let fridge = world.spawn_empty().id();
        let names: HashMap<&str, Entity> =
            HashMap::from([("Open Sign", sign), ("Broken Fridge", fridge)]);

        let (campaign, unresolved) = blueprint.resolve(|name| names.get(name).copied());

        assert_eq!(unresolved, vec!["Missing Prop".to_string()]);
        assert_eq!(campaign.length(), 3);
        assert_eq!(campaign.start_day(), 3);
        assert_eq!(
            campaign.global_actions(Phase::Morning).activate,
            vec![PhaseAction::transient(sign)]
        );
        let day_one = campaign.day(1).expect("day one exists");
        assert_eq!(day_one.morning.deactivate, vec![PhaseAction::persistent(fridge)]);
        assert!(campaign.day(2).is_some_and(|day| day.night.is_empty()));
        assert!(campaign.day(3).is_some_and(|day| !day.has_second_phase));
    }
}
