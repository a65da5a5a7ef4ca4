use bevy::prelude::*;

pub mod day_cycle;
pub mod effects_sets;
pub mod events;
pub mod particles;
pub mod performance;
pub mod settings;
pub mod sim_rng;
pub mod weather;

use day_cycle::{DayCycle, PeriodChangeEvent};
use effects_sets::EffectsSet;
use events::{ActionEffectEvent, HappinessHeartsEvent, MovementTrailEvent};
use particles::{EmissionEvent, ParticlePool};
use performance::{PerformanceState, QualityChangeEvent};
use settings::{EffectSettings, PerfSettings};
use sim_rng::SimRng;
use weather::{WeatherChangeEvent, WeatherState};

/// Headless effects simulation: the compressed day clock, weather scheduling,
/// the pooled particle field, and the frame-rate-driven quality manager.
///
/// Everything here runs without rendering; the rendering crate subscribes to
/// the resources and events this plugin owns and draws them in
/// [`EffectsSet::Visual`].
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                EffectsSet::Clock,
                EffectsSet::Control,
                EffectsSet::Integrate,
                EffectsSet::Visual,
            )
                .chain(),
        );

        app.init_resource::<SimRng>()
            .init_resource::<DayCycle>()
            .init_resource::<WeatherState>()
            .init_resource::<ParticlePool>()
            .init_resource::<PerformanceState>()
            .init_resource::<EffectSettings>()
            .init_resource::<PerfSettings>();

        app.add_event::<PeriodChangeEvent>()
            .add_event::<WeatherChangeEvent>()
            .add_event::<EmissionEvent>()
            .add_event::<QualityChangeEvent>()
            .add_event::<ActionEffectEvent>()
            .add_event::<HappinessHeartsEvent>()
            .add_event::<MovementTrailEvent>();

        app.add_systems(
            Update,
            day_cycle::tick_day_cycle.in_set(EffectsSet::Clock),
        );

        app.add_systems(
            Update,
            (
                settings::apply_effect_settings,
                settings::apply_perf_settings,
                weather::trigger_weather,
                (
                    performance::sample_frame_rate,
                    performance::check_quality,
                    performance::apply_quality_change,
                    settings::sync_perf_settings,
                )
                    .chain(),
                events::fan_out_triggers,
            )
                .in_set(EffectsSet::Control),
        );

        app.add_systems(
            Update,
            (
                (particles::drain_emission_queue, particles::integrate_particles).chain(),
                weather::integrate_weather,
            )
                .in_set(EffectsSet::Integrate),
        );
    }
}

#[cfg(test)]
mod plugin_tests {
    use super::*;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, SimulationPlugin));
        app
    }

    #[test]
    fn test_plugin_registers_resources() {
        let app = test_app();
        assert!(app.world().contains_resource::<DayCycle>());
        assert!(app.world().contains_resource::<WeatherState>());
        assert!(app.world().contains_resource::<ParticlePool>());
        assert!(app.world().contains_resource::<PerformanceState>());
        assert!(app.world().contains_resource::<EffectSettings>());
        assert!(app.world().contains_resource::<PerfSettings>());
    }

    #[test]
    fn test_action_trigger_spawns_particles_same_frame() {
        let mut app = test_app();
        // Prime change detection so the settings appliers settle.
        app.update();

        app.world_mut().send_event(ActionEffectEvent {
            action: events::ActionKind::LevelUp,
            position: Vec3::ZERO,
        });
        app.update();

        let pool = app.world().resource::<ParticlePool>();
        assert_eq!(pool.active_count(), 40);
    }

    #[test]
    fn test_particles_disabled_drops_triggers() {
        let mut app = test_app();
        app.update();
        app.world_mut()
            .resource_mut::<EffectSettings>()
            .particles_enabled = false;
        app.update();

        app.world_mut().send_event(HappinessHeartsEvent {
            position: Vec3::ZERO,
        });
        app.update();

        let pool = app.world().resource::<ParticlePool>();
        assert_eq!(pool.active_count(), 0);
    }
}
