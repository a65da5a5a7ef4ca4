use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default pool capacity before any quality preset applies.
const DEFAULT_CAPACITY: usize = 200;

/// Downward acceleration applied to sparks and bubbles.
const GRAVITY: f32 = 2.0;

// =============================================================================
// Effect
// =============================================================================

/// Visual flavor of an emitted particle burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// Radial firework burst, gold.
    Sparks,
    /// Upward wobble, pink.
    Hearts,
    /// Rising and popping, sky blue.
    Bubbles,
    /// Ring orbit, white.
    Sparkles,
    /// Short-lived drift behind a moving pet, light pink.
    Trail,
}

impl Effect {
    /// Every effect kind.
    pub const ALL: [Effect; 5] = [
        Effect::Sparks,
        Effect::Hearts,
        Effect::Bubbles,
        Effect::Sparkles,
        Effect::Trail,
    ];

    /// Base color for the effect.
    pub fn color(self) -> Color {
        match self {
            Effect::Sparks => Color::srgb_u8(255, 215, 0),    // gold
            Effect::Hearts => Color::srgb_u8(255, 105, 180),  // pink
            Effect::Bubbles => Color::srgb_u8(135, 206, 235), // sky blue
            Effect::Sparkles => Color::WHITE,
            Effect::Trail => Color::srgb_u8(255, 182, 193), // light pink
        }
    }
}

// =============================================================================
// Emission queue
// =============================================================================

/// A queued instruction to create particles of a given effect at a position.
///
/// Fire-and-forget: no return value, no error surface. Sent from game-layer
/// handlers at arbitrary points in the frame; drained once per update.
#[derive(Event, Debug, Clone)]
pub struct EmissionEvent {
    pub effect: Effect,
    pub position: Vec3,
    pub count: usize,
}

// =============================================================================
// Particle slot
// =============================================================================

/// One slot in the arena. Dead slots keep their last values and sit on the
/// free list.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Seconds since emission.
    pub age: f32,
    pub max_lifetime: f32,
    pub size: f32,
    pub effect: Effect,
    pub alive: bool,
}

impl Particle {
    fn dead() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            age: 0.0,
            max_lifetime: 1.0,
            size: 0.2,
            effect: Effect::Sparks,
            alive: false,
        }
    }

    /// Fraction of the lifetime already spent, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        (self.age / self.max_lifetime).clamp(0.0, 1.0)
    }

    /// Render opacity: fades out linearly over the lifetime.
    pub fn opacity(&self) -> f32 {
        1.0 - self.progress()
    }

    /// Render size: shrinks to half over the lifetime.
    pub fn render_size(&self) -> f32 {
        self.size * (1.0 - self.progress() * 0.5)
    }

    fn init(&mut self, effect: Effect, origin: Vec3, index: usize, total: usize, rng: &mut impl Rng) {
        self.effect = effect;
        self.position = origin;
        self.age = 0.0;
        self.alive = true;

        match effect {
            Effect::Sparks => {
                // Firework burst: evenly spread around the ring, kicked up.
                let angle = (index as f32 / total as f32) * std::f32::consts::TAU;
                let speed = rng.gen_range(2.0..4.0);
                self.velocity = Vec3::new(
                    angle.cos() * speed,
                    angle.sin() * speed + 1.0,
                    rng.gen_range(-0.5..0.5) * speed,
                );
                self.size = rng.gen_range(0.15..0.25);
                self.max_lifetime = 1.5;
            }
            Effect::Hearts => {
                // Float upward with wobble.
                self.velocity = Vec3::new(
                    rng.gen_range(-0.25..0.25),
                    rng.gen_range(1.0..1.5),
                    rng.gen_range(-0.25..0.25),
                );
                self.size = 0.25;
                self.max_lifetime = 2.0;
            }
            Effect::Bubbles => {
                // Rise and pop.
                self.velocity = Vec3::new(
                    rng.gen_range(-0.15..0.15),
                    rng.gen_range(0.8..1.2),
                    rng.gen_range(-0.15..0.15),
                );
                self.size = rng.gen_range(0.2..0.35);
                self.max_lifetime = 1.8;
            }
            Effect::Sparkles => {
                // Start on a ring around the origin, drifting slowly up.
                let angle = (index as f32 / total as f32) * std::f32::consts::TAU;
                let radius = 0.5;
                self.position += Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius);
                self.velocity = Vec3::new(0.0, 0.2, 0.0);
                self.size = 0.15;
                self.max_lifetime = 1.2;
            }
            Effect::Trail => {
                // Minimal movement, quick fade.
                self.velocity = Vec3::new(
                    rng.gen_range(-0.05..0.05),
                    -0.1,
                    rng.gen_range(-0.05..0.05),
                );
                self.size = 0.1;
                self.max_lifetime = 0.5;
            }
        }
    }

    fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        match self.effect {
            Effect::Sparks | Effect::Bubbles => self.velocity.y -= GRAVITY * dt,
            Effect::Sparkles => {
                // Slow orbital drift around the emission point.
                let angle = self.age * 3.0;
                self.position.x += angle.cos() * 0.01;
                self.position.z += angle.sin() * 0.01;
            }
            Effect::Hearts | Effect::Trail => {}
        }
    }
}

// =============================================================================
// Pool
// =============================================================================

/// Slot arena with an explicit free list.
///
/// Invariant: `active_count() + free.len() == slots.len()` after every
/// mutation, and a slot's index never moves, so the render layer can keep a
/// stable one-entity-per-slot mapping.
#[derive(Resource, Debug)]
pub struct ParticlePool {
    slots: Vec<Particle>,
    free: Vec<usize>,
    /// Soft cap on live particles for subsequent emissions. May be lower
    /// than `slots.len()` after a quality downgrade; live particles are
    /// never culled by a cap change.
    cap: usize,
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ParticlePool {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            slots: vec![Particle::dead(); cap],
            free: (0..cap).rev().collect(),
            cap,
        }
    }

    /// All slots, alive and dead, in stable index order.
    pub fn slots(&self) -> &[Particle] {
        &self.slots
    }

    /// Number of live particles.
    pub fn active_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Number of dead slots ready for reuse.
    pub fn pooled_count(&self) -> usize {
        self.free.len()
    }

    /// Current emission cap.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Spawn up to `count` particles of `effect` at `origin`; the excess
    /// beyond the remaining budget is silently dropped.
    pub fn spawn(&mut self, effect: Effect, origin: Vec3, count: usize, rng: &mut impl Rng) {
        let budget = self.cap.saturating_sub(self.active_count()).min(count);
        for i in 0..budget {
            // The free list can only run dry if the cap exceeds the arena,
            // which `set_capacity` prevents by growing the arena first.
            let Some(slot) = self.free.pop() else { break };
            self.slots[slot].init(effect, origin, i, budget, rng);
        }
    }

    /// Advance live particles, retiring each one exactly when its lifetime
    /// is spent.
    pub fn update(&mut self, dt: f32) {
        for index in 0..self.slots.len() {
            let slot = &mut self.slots[index];
            if !slot.alive {
                continue;
            }
            slot.age += dt;
            if slot.age >= slot.max_lifetime {
                slot.alive = false;
                self.free.push(index);
                continue;
            }
            slot.advance(dt);
        }
    }

    /// Change the emission cap. Growing extends the arena with dead slots;
    /// shrinking only constrains subsequent emissions.
    pub fn set_capacity(&mut self, cap: usize) {
        if cap > self.slots.len() {
            for index in self.slots.len()..cap {
                self.slots.push(Particle::dead());
                self.free.push(index);
            }
        }
        self.cap = cap;
    }

    /// Retire every live particle. Idempotent.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.alive {
                slot.alive = false;
                self.free.push(index);
            }
        }
    }
}
