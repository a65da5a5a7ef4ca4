use bevy::prelude::*;

use crate::particles::ParticlePool;
use crate::settings::EffectSettings;
use crate::weather::WeatherState;

use super::types::{quality_settings, PerformanceState, QualityChangeEvent};

/// Pushes one instantaneous FPS sample per frame into the ring buffer.
pub fn sample_frame_rate(time: Res<Time>, mut state: ResMut<PerformanceState>) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    state.push_sample(1.0 / dt);
}

/// Once per second, runs the hysteresis check and reports downgrades.
pub fn check_quality(
    time: Res<Time>,
    mut state: ResMut<PerformanceState>,
    mut changes: EventWriter<QualityChangeEvent>,
) {
    state.check_timer.tick(time.delta());
    if !state.check_timer.just_finished() {
        return;
    }
    if let Some(level) = state.run_check() {
        warn!(
            "sustained low frame rate ({:.0} FPS), downgrading quality to {}",
            state.current_fps,
            level.label()
        );
        changes.send(QualityChangeEvent { level });
    }
}

/// Fans a quality change out into the consumers: the particle pool cap, the
/// weather field cap (next allocation), and the user-facing settings record
/// (which the lighting rig and environment read).
pub fn apply_quality_change(
    mut changes: EventReader<QualityChangeEvent>,
    mut pool: ResMut<ParticlePool>,
    mut weather: ResMut<WeatherState>,
    mut settings: ResMut<EffectSettings>,
) {
    for change in changes.read() {
        let preset = quality_settings(change.level);
        pool.set_capacity(preset.particle_count);
        weather.set_max_drops(preset.weather_particle_count);
        settings.quality_level = change.level;
        settings.shadows_enabled = preset.shadows_enabled;
    }
}
