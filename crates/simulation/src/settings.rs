//! User-facing effect settings.
//!
//! Two small records, mirroring the two persisted blobs: `EffectSettings`
//! (quality plus the weather/particles/shadows toggles and time speed) and
//! `PerfSettings` (quality level and the auto-adjust flag). The save crate
//! loads both at startup and rewrites them on change; systems here fan the
//! values out into the owning components.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::day_cycle::DayCycle;
use crate::particles::ParticlePool;
use crate::performance::{PerformanceState, QualityLevel};
use crate::weather::WeatherState;

/// Player-facing visual effect settings.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct EffectSettings {
    pub quality_level: QualityLevel,
    pub weather_enabled: bool,
    pub particles_enabled: bool,
    pub shadows_enabled: bool,
    /// Day-cycle speed multiplier (1.0 = 24 real minutes per day).
    pub time_speed: f32,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            quality_level: QualityLevel::default(),
            weather_enabled: true,
            particles_enabled: true,
            shadows_enabled: true,
            time_speed: 1.0,
        }
    }
}

/// Persisted slice of the performance manager's state.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct PerfSettings {
    pub quality_level: QualityLevel,
    pub auto_adjust: bool,
}

impl Default for PerfSettings {
    fn default() -> Self {
        Self {
            quality_level: QualityLevel::default(),
            auto_adjust: true,
        }
    }
}

/// Pushes settings changes into the components that own the behavior:
/// time speed into the clock, the weather toggle into the weather system
/// (clearing any running event), the particle toggle into the pool.
pub fn apply_effect_settings(
    settings: Res<EffectSettings>,
    mut cycle: ResMut<DayCycle>,
    mut weather: ResMut<WeatherState>,
    mut pool: ResMut<ParticlePool>,
) {
    if !settings.is_changed() {
        return;
    }
    cycle.speed = settings.time_speed;
    if !settings.weather_enabled {
        weather.clear();
    }
    if !settings.particles_enabled {
        pool.clear();
    }
}

/// Mirrors the persisted performance record into the live state.
pub fn apply_perf_settings(settings: Res<PerfSettings>, mut state: ResMut<PerformanceState>) {
    if !settings.is_changed() {
        return;
    }
    state.quality = settings.quality_level;
    state.auto_adjust = settings.auto_adjust;
}

/// Keeps the persisted performance record in sync with automatic quality
/// downgrades, so the chosen level survives a restart.
pub fn sync_perf_settings(state: Res<PerformanceState>, mut settings: ResMut<PerfSettings>) {
    if state.quality != settings.quality_level {
        settings.quality_level = state.quality;
    }
}
