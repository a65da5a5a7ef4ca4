use bevy::prelude::*;

use crate::settings::EffectSettings;
use crate::sim_rng::SimRng;

use super::types::{EmissionEvent, ParticlePool};

/// Drains the emission queue in FIFO order, once per frame, before
/// integration. With particles disabled in settings, pending requests are
/// discarded rather than left to pile up.
pub fn drain_emission_queue(
    mut requests: EventReader<EmissionEvent>,
    settings: Res<EffectSettings>,
    mut pool: ResMut<ParticlePool>,
    mut rng: ResMut<SimRng>,
) {
    if !settings.particles_enabled {
        requests.clear();
        return;
    }
    for request in requests.read() {
        pool.spawn(request.effect, request.position, request.count, &mut rng.0);
    }
}

/// Advances live particles and retires the expired ones.
pub fn integrate_particles(time: Res<Time>, mut pool: ResMut<ParticlePool>) {
    pool.update(time.delta_secs());
}
