use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(3)
}

fn assert_conserved(pool: &ParticlePool) {
    assert_eq!(
        pool.active_count() + pool.pooled_count(),
        pool.slots().len(),
        "pool conservation violated"
    );
}

#[test]
fn test_pool_conservation_across_emission_and_updates() {
    let mut pool = ParticlePool::with_capacity(50);
    let mut rng = rng();

    pool.spawn(Effect::Sparks, Vec3::ZERO, 20, &mut rng);
    assert_eq!(pool.active_count(), 20);
    assert_conserved(&pool);

    for _ in 0..100 {
        pool.update(0.05);
        pool.spawn(Effect::Hearts, Vec3::Y, 3, &mut rng);
        assert_conserved(&pool);
    }

    // Everything emitted above has a lifetime under 2.5s.
    for _ in 0..60 {
        pool.update(0.05);
    }
    assert_eq!(pool.active_count(), 0);
    assert_conserved(&pool);
}

#[test]
fn test_overflow_silently_truncated() {
    let mut pool = ParticlePool::with_capacity(10);
    let mut rng = rng();

    pool.spawn(Effect::Bubbles, Vec3::ZERO, 25, &mut rng);
    assert_eq!(pool.active_count(), 10);

    // A full pool absorbs further requests without panicking.
    pool.spawn(Effect::Sparks, Vec3::ZERO, 5, &mut rng);
    assert_eq!(pool.active_count(), 10);
    assert_conserved(&pool);
}

#[test]
fn test_particles_retire_exactly_at_lifetime() {
    let mut pool = ParticlePool::with_capacity(8);
    let mut rng = rng();
    pool.spawn(Effect::Trail, Vec3::ZERO, 4, &mut rng); // 0.5s lifetime

    pool.update(0.4);
    assert_eq!(pool.active_count(), 4);
    pool.update(0.2);
    assert_eq!(pool.active_count(), 0);
    assert_conserved(&pool);
}

#[test]
fn test_fade_drives_opacity_and_size() {
    let mut pool = ParticlePool::with_capacity(4);
    let mut rng = rng();
    pool.spawn(Effect::Hearts, Vec3::ZERO, 1, &mut rng); // 2.0s lifetime
    pool.update(1.0);

    let p = pool.slots().iter().find(|p| p.alive).unwrap();
    assert!((p.progress() - 0.5).abs() < 1e-4);
    assert!((p.opacity() - 0.5).abs() < 1e-4);
    assert!((p.render_size() - 0.25 * 0.75).abs() < 1e-4);
}

#[test]
fn test_sparks_spread_radially_and_fall() {
    let mut pool = ParticlePool::with_capacity(16);
    let mut rng = rng();
    pool.spawn(Effect::Sparks, Vec3::ZERO, 16, &mut rng);

    let live: Vec<_> = pool.slots().iter().filter(|p| p.alive).collect();
    assert!(live.iter().any(|p| p.velocity.x > 0.0));
    assert!(live.iter().any(|p| p.velocity.x < 0.0));

    let vy_before: f32 = live.iter().map(|p| p.velocity.y).sum();
    pool.update(0.5);
    let vy_after: f32 = pool
        .slots()
        .iter()
        .filter(|p| p.alive)
        .map(|p| p.velocity.y)
        .sum();
    assert!(vy_after < vy_before, "gravity should pull sparks down");
}

#[test]
fn test_capacity_grow_and_shrink() {
    let mut pool = ParticlePool::with_capacity(10);
    let mut rng = rng();
    pool.spawn(Effect::Sparkles, Vec3::ZERO, 10, &mut rng);

    // Shrinking never culls live particles, only limits new emissions.
    pool.set_capacity(4);
    assert_eq!(pool.active_count(), 10);
    pool.spawn(Effect::Sparkles, Vec3::ZERO, 5, &mut rng);
    assert_eq!(pool.active_count(), 10);
    assert_conserved(&pool);

    // Growing extends the arena with dead slots.
    pool.set_capacity(20);
    pool.spawn(Effect::Hearts, Vec3::ZERO, 20, &mut rng);
    assert_eq!(pool.active_count(), 20);
    assert_conserved(&pool);
}

#[test]
fn test_clear_is_idempotent() {
    let mut pool = ParticlePool::with_capacity(6);
    let mut rng = rng();
    pool.spawn(Effect::Bubbles, Vec3::ZERO, 6, &mut rng);

    pool.clear();
    assert_eq!(pool.active_count(), 0);
    assert_conserved(&pool);

    pool.clear();
    assert_eq!(pool.active_count(), 0);
    assert_conserved(&pool);
}

#[test]
fn test_every_effect_emits_live_particles() {
    let mut rng = rng();
    for effect in Effect::ALL {
        let mut pool = ParticlePool::with_capacity(8);
        pool.spawn(effect, Vec3::ONE, 4, &mut rng);
        assert_eq!(pool.active_count(), 4, "{effect:?}");
        for p in pool.slots().iter().filter(|p| p.alive) {
            assert!(p.max_lifetime > 0.0, "{effect:?}");
            assert!(p.size > 0.0, "{effect:?}");
            assert_eq!(p.opacity(), 1.0, "fresh particles start opaque");
        }
        assert_conserved(&pool);
    }
}

#[test]
fn test_emission_queue_drains_fifo() {
    // Queue two requests that together exceed capacity: the first must win.
    let mut app = App::new();
    app.add_event::<EmissionEvent>();
    app.init_resource::<crate::settings::EffectSettings>();
    app.init_resource::<crate::sim_rng::SimRng>();
    app.insert_resource(ParticlePool::with_capacity(10));
    app.add_systems(Update, drain_emission_queue);

    app.world_mut().send_event(EmissionEvent {
        effect: Effect::Hearts,
        position: Vec3::ZERO,
        count: 8,
    });
    app.world_mut().send_event(EmissionEvent {
        effect: Effect::Sparks,
        position: Vec3::ZERO,
        count: 8,
    });
    app.update();

    let pool = app.world().resource::<ParticlePool>();
    let hearts = pool
        .slots()
        .iter()
        .filter(|p| p.alive && p.effect == Effect::Hearts)
        .count();
    let sparks = pool
        .slots()
        .iter()
        .filter(|p| p.alive && p.effect == Effect::Sparks)
        .count();
    assert_eq!(hearts, 8, "first request served in full");
    assert_eq!(sparks, 2, "second request truncated to the remainder");
}
