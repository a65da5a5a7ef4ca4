//! Sky actors: the dome, the sun/moon pair, the star field, and the clouds.
//!
//! Everything here is a pure consumer of `DayCycle`; positions come from the
//! shared arc functions in `simulation::day_cycle` so the visible bodies can
//! never drift from the lighting rig.

use bevy::prelude::*;
use rand::Rng;

use simulation::day_cycle::{moon_position, sun_position, DayCycle, Period};
use simulation::sim_rng::SimRng;

const DOME_RADIUS: f32 = 50.0;

const SUN_RADIUS: f32 = 1.5;
const MOON_RADIUS: f32 = 1.2;
const SUN_LIGHT_LUMENS: f32 = 1_500_000.0;
const MOON_LIGHT_LUMENS: f32 = 400_000.0;

const STAR_COUNT: usize = 80;
const STAR_SHELL_RADIUS: f32 = 40.0;
const STAR_RADIUS: f32 = 0.08;
/// Per-frame easing step for the star field's global opacity.
const STAR_FADE_RATE: f32 = 0.05;

const CLOUD_COUNT: usize = 4;
const CLOUD_WRAP_X: f32 = 15.0;
const CLOUD_OPACITY_DAY: f32 = 0.7;
const CLOUD_OPACITY_NIGHT: f32 = 0.2;
/// Per-frame easing step for cloud opacity.
const CLOUD_FADE_RATE: f32 = 0.02;

#[derive(Component)]
pub struct SkyDome;

#[derive(Component)]
pub struct SunActor;

#[derive(Component)]
pub struct MoonActor;

#[derive(Component)]
pub struct Star {
    /// Per-star twinkle phase offset in radians.
    pub phase: f32,
}

#[derive(Component)]
pub struct Cloud {
    /// Drift speed along +x, units per second.
    pub speed: f32,
}

/// Global star-field opacity, eased toward 1 only at night.
#[derive(Resource, Default)]
pub struct StarFade {
    pub opacity: f32,
}

/// Shared cloud opacity, eased between the day and night targets.
#[derive(Resource)]
pub struct CloudFade {
    pub opacity: f32,
}

impl Default for CloudFade {
    fn default() -> Self {
        Self {
            opacity: CLOUD_OPACITY_DAY,
        }
    }
}

pub fn setup_sky(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rng: ResMut<SimRng>,
) {
    // Dome: a large sphere viewed from the inside, so backface culling is
    // disabled. The material's base color is retinted every frame.
    commands.spawn((
        SkyDome,
        Mesh3d(meshes.add(Sphere::new(DOME_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(135, 206, 235),
            unlit: true,
            cull_mode: None,
            ..default()
        })),
        Transform::default(),
    ));

    // Sun: emissive sphere plus a point light riding along.
    let sun_color = Color::srgb_u8(255, 236, 120);
    commands.spawn((
        SunActor,
        Mesh3d(meshes.add(Sphere::new(SUN_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: sun_color,
            emissive: sun_color.to_linear(),
            unlit: true,
            ..default()
        })),
        PointLight {
            color: sun_color,
            intensity: SUN_LIGHT_LUMENS,
            range: 60.0,
            ..default()
        },
        Transform::from_translation(sun_position(0.0)),
    ));

    // Moon: smaller, dimmer.
    let moon_color = Color::srgb_u8(220, 225, 235);
    commands.spawn((
        MoonActor,
        Mesh3d(meshes.add(Sphere::new(MOON_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: moon_color,
            emissive: moon_color.to_linear(),
            unlit: true,
            ..default()
        })),
        PointLight {
            color: moon_color,
            intensity: MOON_LIGHT_LUMENS,
            range: 60.0,
            ..default()
        },
        Transform::from_translation(moon_position(12.0)),
    ));

    // Stars: small emissive points scattered on the upper hemisphere of a
    // larger shell. Each gets its own material so twinkle phases differ.
    let star_mesh = meshes.add(Sphere::new(STAR_RADIUS));
    for _ in 0..STAR_COUNT {
        let yaw = rng.0.gen_range(0.0..std::f32::consts::TAU);
        let pitch = rng.0.gen_range(0.05..std::f32::consts::FRAC_PI_2);
        let position = Vec3::new(
            STAR_SHELL_RADIUS * pitch.cos() * yaw.cos(),
            STAR_SHELL_RADIUS * pitch.sin(),
            STAR_SHELL_RADIUS * pitch.cos() * yaw.sin(),
        );
        commands.spawn((
            Star {
                phase: rng.0.gen_range(0.0..std::f32::consts::TAU),
            },
            Mesh3d(star_mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgba(1.0, 1.0, 1.0, 0.0),
                unlit: true,
                alpha_mode: AlphaMode::Blend,
                ..default()
            })),
            Transform::from_translation(position),
        ));
    }

    // Clouds: flat quads drifting across the scene.
    let cloud_mesh = meshes.add(Plane3d::default().mesh().size(4.0, 2.0));
    for _ in 0..CLOUD_COUNT {
        commands.spawn((
            Cloud {
                speed: rng.0.gen_range(0.3..0.7),
            },
            Mesh3d(cloud_mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgba(1.0, 1.0, 1.0, CLOUD_OPACITY_DAY),
                unlit: true,
                alpha_mode: AlphaMode::Blend,
                double_sided: true,
                cull_mode: None,
                ..default()
            })),
            Transform::from_xyz(
                rng.0.gen_range(-CLOUD_WRAP_X..CLOUD_WRAP_X),
                rng.0.gen_range(8.0..12.0),
                rng.0.gen_range(-10.0..-4.0),
            ),
        ));
    }

    commands.init_resource::<StarFade>();
    commands.init_resource::<CloudFade>();
}

/// Retints the dome and moves the sun and moon along the shared arc. A body
/// parked below the horizon is hidden rather than lit from underneath.
pub fn update_sky(
    cycle: Res<DayCycle>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    dome: Query<&MeshMaterial3d<StandardMaterial>, With<SkyDome>>,
    mut sun: Query<(&mut Transform, &mut Visibility), (With<SunActor>, Without<MoonActor>)>,
    mut moon: Query<(&mut Transform, &mut Visibility), (With<MoonActor>, Without<SunActor>)>,
) {
    if let Ok(handle) = dome.get_single() {
        if let Some(material) = materials.get_mut(&handle.0) {
            material.base_color = cycle.sky_colors().top;
        }
    }

    if let Ok((mut transform, mut visibility)) = sun.get_single_mut() {
        let position = sun_position(cycle.minute);
        transform.translation = position;
        *visibility = if position.y >= 0.0 {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }

    if let Ok((mut transform, mut visibility)) = moon.get_single_mut() {
        let position = moon_position(cycle.minute);
        transform.translation = position;
        *visibility = if position.y >= 0.0 {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

/// Eases the star field in at night and out otherwise, with a per-star
/// sinusoidal twinkle once fully faded in.
pub fn update_stars(
    time: Res<Time>,
    cycle: Res<DayCycle>,
    mut fade: ResMut<StarFade>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    stars: Query<(&Star, &MeshMaterial3d<StandardMaterial>)>,
) {
    let target = if cycle.period() == Period::Night {
        1.0
    } else {
        0.0
    };
    fade.opacity += (target - fade.opacity) * STAR_FADE_RATE;

    let t = time.elapsed_secs();
    for (star, handle) in &stars {
        let Some(material) = materials.get_mut(&handle.0) else {
            continue;
        };
        let twinkle = if fade.opacity > 0.95 {
            // Fully night: brightness wanders in [0.8, 1].
            (0.9 + (t * 2.0 + star.phase).sin() * 0.2).clamp(0.8, 1.0)
        } else {
            1.0
        };
        material.base_color = Color::srgba(1.0, 1.0, 1.0, fade.opacity * twinkle);
    }
}

/// Drifts clouds along +x with wraparound, easing their opacity between the
/// day and night targets.
pub fn update_clouds(
    time: Res<Time>,
    cycle: Res<DayCycle>,
    mut fade: ResMut<CloudFade>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut clouds: Query<(&Cloud, &mut Transform, &MeshMaterial3d<StandardMaterial>)>,
) {
    let target = if cycle.period().is_daytime() {
        CLOUD_OPACITY_DAY
    } else {
        CLOUD_OPACITY_NIGHT
    };
    fade.opacity += (target - fade.opacity) * CLOUD_FADE_RATE;

    let dt = time.delta_secs();
    for (cloud, mut transform, handle) in &mut clouds {
        transform.translation.x += cloud.speed * dt;
        if transform.translation.x > CLOUD_WRAP_X {
            transform.translation.x = -CLOUD_WRAP_X;
        }
        if let Some(material) = materials.get_mut(&handle.0) {
            material.base_color = Color::srgba(1.0, 1.0, 1.0, fade.opacity);
        }
    }
}
