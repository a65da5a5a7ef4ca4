use bevy::prelude::*;
use rand::Rng;

use simulation::performance::quality_settings;
use simulation::settings::EffectSettings;
use simulation::sim_rng::SimRng;

use super::types::{
    grass_sway_angle, random_flight_target, step_toward, tree_sway_angle, wing_offset, wing_scale,
    Butterfly, ButterflyWing, EnvironmentToggles, FallingLeaf, GrassBlade, SwayingTree,
    BUTTERFLY_ARRIVE_DIST, FLUTTER_RATE, LEAF_COUNT, LEAF_GRAVITY, YAW_WOBBLE,
};

const TREE_COUNT: usize = 5;
const GRASS_BLADE_COUNT: usize = 40;

/// Spawns the static garden: ground plane, trees, and grass blades.
pub fn setup_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rng: ResMut<SimRng>,
) {
    // Ground.
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(24.0, 24.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(96, 169, 92),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::default(),
    ));

    // Trees: cylinder trunk + sphere canopy under a swaying root, placed on
    // a loose ring around the garden.
    let trunk_mesh = meshes.add(Cylinder::new(0.15, 1.5));
    let canopy_mesh = meshes.add(Sphere::new(1.0));
    let trunk_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(121, 85, 61),
        perceptual_roughness: 1.0,
        ..default()
    });
    let canopy_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(60, 140, 70),
        perceptual_roughness: 1.0,
        ..default()
    });
    for i in 0..TREE_COUNT {
        let angle = i as f32 / TREE_COUNT as f32 * std::f32::consts::TAU;
        let radius = rng.0.gen_range(6.0..9.0);
        commands
            .spawn((
                SwayingTree,
                Transform::from_xyz(angle.cos() * radius, 0.0, angle.sin() * radius),
                Visibility::default(),
            ))
            .with_children(|tree| {
                tree.spawn((
                    Mesh3d(trunk_mesh.clone()),
                    MeshMaterial3d(trunk_material.clone()),
                    Transform::from_xyz(0.0, 0.75, 0.0),
                ));
                tree.spawn((
                    Mesh3d(canopy_mesh.clone()),
                    MeshMaterial3d(canopy_material.clone()),
                    Transform::from_xyz(0.0, 2.0, 0.0),
                ));
            });
    }

    // Grass: thin blades scattered on the ground.
    let blade_mesh = meshes.add(Cuboid::new(0.04, 0.4, 0.01));
    let blade_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(80, 160, 72),
        perceptual_roughness: 1.0,
        ..default()
    });
    for index in 0..GRASS_BLADE_COUNT {
        commands.spawn((
            GrassBlade { index },
            Mesh3d(blade_mesh.clone()),
            MeshMaterial3d(blade_material.clone()),
            Transform::from_xyz(
                rng.0.gen_range(-8.0..8.0),
                0.2,
                rng.0.gen_range(-8.0..8.0),
            ),
        ));
    }
}

pub fn sway_trees(
    time: Res<Time>,
    toggles: Res<EnvironmentToggles>,
    mut trees: Query<&mut Transform, With<SwayingTree>>,
) {
    if !toggles.trees_sway {
        return;
    }
    let angle = tree_sway_angle(time.elapsed_secs());
    for mut transform in &mut trees {
        transform.rotation = Quat::from_rotation_z(angle);
    }
}

pub fn sway_grass(
    time: Res<Time>,
    toggles: Res<EnvironmentToggles>,
    mut blades: Query<(&GrassBlade, &mut Transform)>,
) {
    if !toggles.grass_sway {
        return;
    }
    let t = time.elapsed_secs();
    for (blade, mut transform) in &mut blades {
        transform.rotation = Quat::from_rotation_x(grass_sway_angle(t, blade.index));
    }
}

/// Keeps the butterfly population at the quality preset's cap (zero while
/// disabled), spawning or despawning whole bodies as needed.
pub fn sync_butterflies(
    mut commands: Commands,
    toggles: Res<EnvironmentToggles>,
    settings: Res<EffectSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rng: ResMut<SimRng>,
    butterflies: Query<Entity, With<Butterfly>>,
) {
    let target = if toggles.butterflies {
        quality_settings(settings.quality_level).max_butterflies
    } else {
        0
    };
    let current = butterflies.iter().count();

    for entity in butterflies.iter().skip(target) {
        commands.entity(entity).despawn_recursive();
    }
    if current >= target {
        return;
    }

    let body_mesh = meshes.add(Sphere::new(0.06));
    let wing_mesh = meshes.add(Plane3d::default().mesh().size(0.3, 0.2));
    for _ in current..target {
        let color = Color::srgb(
            rng.0.gen_range(0.6..1.0),
            rng.0.gen_range(0.3..0.8),
            rng.0.gen_range(0.5..1.0),
        );
        let material = materials.add(StandardMaterial {
            base_color: color,
            double_sided: true,
            cull_mode: None,
            ..default()
        });
        let start = random_flight_target(&mut rng.0);
        commands
            .spawn((
                Butterfly {
                    target: random_flight_target(&mut rng.0),
                    speed: rng.0.gen_range(1.0..1.5),
                    flutter: rng.0.gen_range(0.0..std::f32::consts::TAU),
                },
                Mesh3d(body_mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_translation(start),
            ))
            .with_children(|body| {
                for side in [-1.0, 1.0] {
                    body.spawn((
                        ButterflyWing { side },
                        Mesh3d(wing_mesh.clone()),
                        MeshMaterial3d(material.clone()),
                        Transform::from_xyz(wing_offset(side, 0.0), 0.0, 0.0),
                    ));
                }
            });
    }
}

/// Seeks each butterfly toward its target, retargeting on arrival, and
/// advances the flutter phase that drives the yaw wobble.
pub fn animate_butterflies(
    time: Res<Time>,
    mut rng: ResMut<SimRng>,
    mut butterflies: Query<(&mut Butterfly, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (mut butterfly, mut transform) in &mut butterflies {
        let speed = butterfly.speed;
        let target = butterfly.target;
        transform.translation = step_toward(transform.translation, target, speed, dt);
        if transform.translation.distance(target) < BUTTERFLY_ARRIVE_DIST {
            butterfly.target = random_flight_target(&mut rng.0);
        }

        butterfly.flutter += FLUTTER_RATE * dt;

        let heading = butterfly.target - transform.translation;
        let yaw = heading.x.atan2(heading.z);
        transform.rotation =
            Quat::from_rotation_y(yaw + butterfly.flutter.sin() * YAW_WOBBLE);
    }
}

/// Beats the wings in sync with the parent's flutter phase, each wing
/// sliding outward on its own side as the beat widens.
pub fn flap_butterfly_wings(
    butterflies: Query<&Butterfly>,
    mut wings: Query<(&ButterflyWing, &Parent, &mut Transform)>,
) {
    for (wing, parent, mut transform) in &mut wings {
        let Ok(butterfly) = butterflies.get(parent.get()) else {
            continue;
        };
        let scale = wing_scale(butterfly.flutter);
        transform.scale = Vec3::new(scale, 1.0, 1.0);
        transform.translation.x = wing_offset(wing.side, butterfly.flutter);
    }
}

/// Keeps the leaf flock alive while enabled. Disabling despawns the
/// entities outright (dropping their mesh and material handles) rather than
/// hiding them.
pub fn sync_leaves(
    mut commands: Commands,
    toggles: Res<EnvironmentToggles>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rng: ResMut<SimRng>,
    leaves: Query<Entity, With<FallingLeaf>>,
) {
    if !toggles.leaves {
        for entity in &leaves {
            commands.entity(entity).despawn();
        }
        return;
    }
    if !leaves.is_empty() {
        return;
    }

    let leaf_mesh = meshes.add(Plane3d::default().mesh().size(0.2, 0.2));
    for _ in 0..LEAF_COUNT {
        let material = materials.add(StandardMaterial {
            base_color: Color::srgb(
                rng.0.gen_range(0.7..0.95),
                rng.0.gen_range(0.3..0.6),
                rng.0.gen_range(0.1..0.25),
            ),
            double_sided: true,
            cull_mode: None,
            ..default()
        });
        commands.spawn((
            FallingLeaf {
                velocity: Vec3::new(
                    rng.0.gen_range(-0.2..0.2),
                    0.0,
                    rng.0.gen_range(-0.2..0.2),
                ),
                rot_speed: Vec3::new(
                    rng.0.gen_range(-1.0..1.0),
                    rng.0.gen_range(-1.0..1.0),
                    rng.0.gen_range(-1.0..1.0),
                ),
            },
            Mesh3d(leaf_mesh.clone()),
            MeshMaterial3d(material),
            Transform::from_xyz(
                rng.0.gen_range(-6.0..6.0),
                rng.0.gen_range(6.0..10.0),
                rng.0.gen_range(-6.0..6.0),
            ),
        ));
    }
}

/// Gravity, tumble, and respawn above the canopy once a leaf lands.
pub fn fall_leaves(
    time: Res<Time>,
    mut rng: ResMut<SimRng>,
    mut leaves: Query<(&mut FallingLeaf, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (mut leaf, mut transform) in &mut leaves {
        leaf.velocity.y -= LEAF_GRAVITY * dt;
        let velocity = leaf.velocity;
        transform.translation += velocity * dt;
        let spin = leaf.rot_speed * dt;
        transform.rotation *= Quat::from_euler(EulerRot::XYZ, spin.x, spin.y, spin.z);

        if transform.translation.y < 0.0 {
            transform.translation = Vec3::new(
                rng.0.gen_range(-6.0..6.0),
                rng.0.gen_range(6.0..10.0),
                rng.0.gen_range(-6.0..6.0),
            );
            leaf.velocity = Vec3::new(
                rng.0.gen_range(-0.2..0.2),
                0.0,
                rng.0.gen_range(-0.2..0.2),
            );
        }
    }
}
