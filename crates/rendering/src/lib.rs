use bevy::prelude::*;

pub mod action_lights;
pub mod camera;
pub mod environment;
pub mod lighting;
pub mod particle_render;
pub mod sky;
pub mod weather_render;

use simulation::effects_sets::EffectsSet;

/// Visual layer: camera, sky, lighting, garden ambience, and the entity
/// mirrors for particles and weather. Every per-frame system here runs in
/// [`EffectsSet::Visual`], strictly after the simulation has settled.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<environment::EnvironmentToggles>()
            .init_resource::<weather_render::WeatherFieldView>()
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    lighting::setup_lighting,
                    sky::setup_sky,
                    environment::setup_environment,
                    action_lights::setup_action_lights,
                    particle_render::setup_particle_mesh,
                ),
            )
            .add_systems(
                Update,
                (
                    (sky::update_sky, sky::update_stars, sky::update_clouds),
                    lighting::update_lighting,
                    (
                        action_lights::spawn_action_lights,
                        action_lights::fade_action_lights,
                    )
                        .chain(),
                )
                    .in_set(EffectsSet::Visual),
            )
            .add_systems(
                Update,
                (
                    environment::sway_trees,
                    environment::sway_grass,
                    environment::sync_butterflies,
                    (
                        environment::animate_butterflies,
                        environment::flap_butterfly_wings,
                    )
                        .chain(),
                    environment::sync_leaves,
                    environment::fall_leaves,
                )
                    .in_set(EffectsSet::Visual),
            )
            .add_systems(
                Update,
                (
                    particle_render::sync_particle_sprites,
                    weather_render::sync_weather_sprites,
                )
                    .in_set(EffectsSet::Visual),
            );
    }
}
