//! Campaign module: day/phase progression and declarative entity activation.
pub mod actions;
pub mod components;
pub mod config;
pub mod events;
pub mod ledger;
pub mod orchestrator;
pub mod plugin;
pub mod systems;
pub mod telemetry;

pub use actions::{Campaign, DayConfig, PhaseAction, PhaseActionSet};
pub use components::{Activation, Phase, PhaseStamp};
pub use events::{PhaseChangedEvent, PhaseRequest};
pub use orchestrator::{PhaseEnvironment, PhaseOrchestrator, PhaseReport, SubscriptionId};
pub use plugin::CampaignPlugin;
