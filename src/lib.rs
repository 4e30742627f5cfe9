//! Day/phase campaign progression for a small restaurant game built on Bevy.
pub mod campaign;
pub mod shift;
pub mod world;

pub use campaign::CampaignPlugin;
pub use shift::ShiftPlugin;
pub use world::WorldPlugin;
