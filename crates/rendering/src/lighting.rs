//! The main lighting rig: one directional light plus the ambient resource.
//!
//! Color and intensity follow the day cycle; the directional transform is
//! derived from the same arc the sky uses, so shadows always agree with the
//! visible sun or moon. Active weather dims the ambient term.

use bevy::prelude::*;

use simulation::day_cycle::{celestial_position, DayCycle, Period};
use simulation::settings::EffectSettings;
use simulation::weather::WeatherState;

/// Directional illuminance at intensity 1.0.
const DIRECTIONAL_LUX: f32 = 10_000.0;

/// Ambient brightness at intensity 1.0 (ambient runs at half the
/// directional level).
const AMBIENT_BRIGHTNESS: f32 = 500.0;

/// Marker for the rig's directional light.
#[derive(Component)]
pub struct GardenLight;

/// Per-period directional light color.
pub fn period_light_color(period: Period) -> Color {
    match period {
        Period::Morning => Color::srgb_u8(255, 179, 102), // warm orange
        Period::Day => Color::WHITE,
        Period::Evening => Color::srgb_u8(255, 140, 66), // deep orange
        Period::Night => Color::srgb_u8(107, 142, 255),  // moonlight blue
    }
}

pub fn setup_lighting(mut commands: Commands, settings: Res<EffectSettings>) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS * 0.4,
    });

    commands.spawn((
        GardenLight,
        DirectionalLight {
            illuminance: DIRECTIONAL_LUX * 0.8,
            color: Color::WHITE,
            shadows_enabled: settings.shadows_enabled,
            ..default()
        },
        Transform::from_translation(celestial_position(0.0)).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Drives the rig from the clock and the weather dimmer.
pub fn update_lighting(
    cycle: Res<DayCycle>,
    weather: Res<WeatherState>,
    settings: Res<EffectSettings>,
    mut ambient: ResMut<AmbientLight>,
    mut lights: Query<(&mut DirectionalLight, &mut Transform), With<GardenLight>>,
) {
    let intensity = cycle.light_intensity();
    let color = period_light_color(cycle.period());

    for (mut light, mut transform) in &mut lights {
        light.illuminance = DIRECTIONAL_LUX * intensity;
        light.color = color;
        light.shadows_enabled = settings.shadows_enabled;
        *transform =
            Transform::from_translation(celestial_position(cycle.minute)).looking_at(Vec3::ZERO, Vec3::Y);
    }

    ambient.color = color;
    ambient.brightness = AMBIENT_BRIGHTNESS * intensity * weather.lighting_factor();
}
