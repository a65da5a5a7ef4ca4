use bevy::prelude::*;
use rand::Rng;

use crate::settings::EffectSettings;
use crate::sim_rng::SimRng;

use super::types::{
    WeatherChangeEvent, WeatherKind, WeatherState, DURATION_RANGE_SECS, WEATHER_PROBABILITY,
};

/// Rolls the periodic weather trial and expires running events.
pub fn trigger_weather(
    time: Res<Time>,
    settings: Res<EffectSettings>,
    mut state: ResMut<WeatherState>,
    mut rng: ResMut<SimRng>,
    mut changes: EventWriter<WeatherChangeEvent>,
) {
    if !settings.weather_enabled {
        return;
    }

    state.check_timer.tick(time.delta());
    if state.check_timer.just_finished()
        && !state.active
        && state.fade_remaining.is_none()
        && rng.0.gen_bool(WEATHER_PROBABILITY)
    {
        let kind = if rng.0.gen_bool(0.5) {
            WeatherKind::Rain
        } else {
            WeatherKind::Snow
        };
        let duration = rng.0.gen_range(DURATION_RANGE_SECS);
        state.begin(kind, duration, &mut rng.0);
        info!("weather: {} for {:.0}s", kind.label(), duration);
        changes.send(WeatherChangeEvent {
            old: None,
            new: Some(kind),
        });
    }

    if state.active && state.elapsed >= state.duration {
        let old = state.kind;
        state.clear();
        info!("weather: clearing");
        changes.send(WeatherChangeEvent { old, new: None });
    }
}

/// Advances the drop field and the clear fade.
pub fn integrate_weather(
    time: Res<Time>,
    mut state: ResMut<WeatherState>,
    mut rng: ResMut<SimRng>,
) {
    state.advance(time.delta_secs(), &mut rng.0);
}
