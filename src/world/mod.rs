//! World module housing the demo scene and activation visuals.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::WorldPlugin;
