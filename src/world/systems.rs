//! Systems for the world module.
use bevy::{math::primitives::Plane3d, prelude::*};

use crate::{
    campaign::{components::Activation, events::PhaseChangedEvent, Phase},
    shift::components::{IdleTimer, MenuBoard},
    world::components::{CampaignProp, PrimarySun},
};

const GROUND_SCALE: f32 = 40.0;
const CAMERA_START_POS: Vec3 = Vec3::new(-8.0, 7.0, 12.0);
const MORNING_LUX: f32 = 20_000.0;
const NIGHT_LUX: f32 = 400.0;

/// Spawns the demo scene: ground, sun, camera, campaign props and collaborators.
pub fn spawn_world_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Mesh::from(Plane3d::default()))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(120, 110, 100),
            perceptual_roughness: 0.9,
            metallic: 0.0,
            ..default()
        })),
        Transform::from_scale(Vec3::splat(GROUND_SCALE)),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: MORNING_LUX,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(16.0, 32.0, 16.0).looking_at(Vec3::ZERO, Vec3::Y),
        PrimarySun,
    ));

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(CAMERA_START_POS).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let props = [
        ("Open Sign", Color::srgb_u8(230, 200, 80), Vec3::new(-3.0, 0.5, 0.0), true),
        ("Lantern", Color::srgb_u8(240, 150, 60), Vec3::new(-1.0, 0.5, 0.0), true),
        ("Delivery Crate", Color::srgb_u8(150, 110, 70), Vec3::new(1.0, 0.5, 0.0), false),
        ("Broken Fridge", Color::srgb_u8(200, 210, 220), Vec3::new(3.0, 0.5, 0.0), true),
        ("Night Stall", Color::srgb_u8(90, 80, 160), Vec3::new(0.0, 0.5, -3.0), false),
    ];

    let mesh = meshes.add(Mesh::from(Cuboid::new(1.0, 1.0, 1.0)));
    for (name, color, position, active) in props {
        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                ..default()
            })),
            Transform::from_translation(position),
            Visibility::default(),
            Activation::new(active),
            CampaignProp,
            Name::new(name),
        ));
    }

    commands.spawn((Name::new("Shift Timer"), IdleTimer::default()));
    commands.spawn((
        Name::new("Menu Board"),
        MenuBoard::new(["Shoyu Ramen", "Gyoza", "Karaage", "Matcha"]),
    ));
}

/// Hides props the campaign has deactivated.
pub fn sync_activation_visibility(
    mut query: Query<(&Activation, &mut Visibility), (With<CampaignProp>, Changed<Activation>)>,
) {
    for (activation, mut visibility) in query.iter_mut() {
        let target = if activation.is_active() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        visibility.set_if_neq(target);
    }
}

/// Dims the sun at night and restores it in the morning.
pub fn apply_phase_lighting(
    mut phase_changes: MessageReader<PhaseChangedEvent>,
    mut sun_query: Query<&mut DirectionalLight, With<PrimarySun>>,
) {
    let Some(latest) = phase_changes.read().last() else {
        return;
    };

    let illuminance = match latest.phase {
        Phase::Morning => MORNING_LUX,
        Phase::Night => NIGHT_LUX,
    };
    for mut light in sun_query.iter_mut() {
        light.illuminance = illuminance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deactivated_props_are_hidden() {
        let mut app = App::new();
        app.add_systems(Update, sync_activation_visibility);

        let prop = app
            .world_mut()
            .spawn((Activation::inactive(), Visibility::default(), CampaignProp))
            .id();
        let scenery = app
            .world_mut()
            .spawn((Activation::inactive(), Visibility::default()))
            .id();
        app.update();
        assert_eq!(app.world().get::<Visibility>(prop), Some(&Visibility::Hidden));
        assert_eq!(
            app.world().get::<Visibility>(scenery),
            Some(&Visibility::Inherited)
        );

        if let Some(mut activation) = app.world_mut().get_mut::<Activation>(prop) {
            activation.set(true);
        }
        app.update();
        assert_eq!(
            app.world().get::<Visibility>(prop),
            Some(&Visibility::Inherited)
        );
    }
}
