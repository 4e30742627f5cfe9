//! Components used by the world module.
use bevy::prelude::*;

/// Marker component identifying the main directional light (the "sun").
#[derive(Component, Default)]
pub struct PrimarySun;

/// Marker for scene props whose activation the campaign configures.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct CampaignProp;
