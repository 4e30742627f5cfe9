//! Shift module hosting the timer and menu-board collaborators of the campaign.
pub mod components;
pub mod plugin;
pub mod systems;

pub use components::{IdleTimer, MenuBoard};
pub use plugin::ShiftPlugin;
