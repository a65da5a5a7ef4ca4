use bevy::prelude::*;
use rand::Rng;

/// Tree sway period in seconds.
const TREE_SWAY_PERIOD: f32 = 2.5;

/// Tree sway amplitude in radians.
const TREE_SWAY_AMPLITUDE: f32 = 0.05;

/// Grass sway amplitude in radians.
const GRASS_SWAY_AMPLITUDE: f32 = 0.02;

/// Per-blade phase offset step.
const GRASS_PHASE_STEP: f32 = 0.1;

/// Distance at which a butterfly counts as arrived and picks a new target.
pub(crate) const BUTTERFLY_ARRIVE_DIST: f32 = 0.5;

/// Wing-flap phase advance per second.
pub(crate) const FLUTTER_RATE: f32 = 10.0;

/// Yaw wobble amplitude in radians while fluttering.
pub(crate) const YAW_WOBBLE: f32 = 0.3;

/// Number of falling leaves while enabled.
pub(crate) const LEAF_COUNT: usize = 12;

/// Downward acceleration applied to leaves.
pub(crate) const LEAF_GRAVITY: f32 = 0.98;

/// Per-behavior enable switches for the garden ambience.
#[derive(Resource, Debug, Clone, Copy)]
pub struct EnvironmentToggles {
    pub trees_sway: bool,
    pub grass_sway: bool,
    pub butterflies: bool,
    pub leaves: bool,
}

impl Default for EnvironmentToggles {
    fn default() -> Self {
        Self {
            trees_sway: true,
            grass_sway: true,
            butterflies: true,
            leaves: true,
        }
    }
}

/// A tree root whose whole canopy rocks gently.
#[derive(Component)]
pub struct SwayingTree;

/// One grass blade; the index gives it a phase offset from its neighbors.
#[derive(Component)]
pub struct GrassBlade {
    pub index: usize,
}

/// A wandering butterfly.
#[derive(Component)]
pub struct Butterfly {
    pub target: Vec3,
    /// Cruise speed in units per second.
    pub speed: f32,
    /// Wing-flap phase in radians.
    pub flutter: f32,
}

/// One of a butterfly's two wing quads. `side` is -1 or 1.
#[derive(Component)]
pub struct ButterflyWing {
    pub side: f32,
}

/// A leaf tumbling toward the ground.
#[derive(Component)]
pub struct FallingLeaf {
    pub velocity: Vec3,
    /// Per-axis rotation speeds in radians per second.
    pub rot_speed: Vec3,
}

/// Tree sway angle (z rotation) at elapsed time `t`.
pub fn tree_sway_angle(t: f32) -> f32 {
    (t / TREE_SWAY_PERIOD * std::f32::consts::TAU).sin() * TREE_SWAY_AMPLITUDE
}

/// Grass sway angle (x rotation) for blade `index` at elapsed time `t`.
pub fn grass_sway_angle(t: f32, index: usize) -> f32 {
    (t * 2.0 + index as f32 * GRASS_PHASE_STEP).sin() * GRASS_SWAY_AMPLITUDE
}

/// Lateral wing offset from the body center at rest scale.
const WING_OFFSET: f32 = 0.18;

/// Wing scale from the flutter phase: both wings beat together, never
/// collapsing below 0.8 of their rest size.
pub fn wing_scale(flutter: f32) -> f32 {
    0.8 + (flutter * 2.0).sin().abs() * 0.4
}

/// Lateral wing position for a side (-1 or 1). The wings slide outward in
/// mirror as the beat widens, staying attached to the body.
pub fn wing_offset(side: f32, flutter: f32) -> f32 {
    side * WING_OFFSET * wing_scale(flutter)
}

/// Uniform random point in the butterflies' flight volume: a 10x10 footprint
/// between one and four units up.
pub fn random_flight_target(rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        rng.gen_range(-5.0..5.0),
        rng.gen_range(1.0..4.0),
        rng.gen_range(-5.0..5.0),
    )
}

/// One movement step toward `target`, never overshooting.
pub fn step_toward(position: Vec3, target: Vec3, speed: f32, dt: f32) -> Vec3 {
    let offset = target - position;
    let distance = offset.length();
    if distance <= speed * dt || distance < f32::EPSILON {
        target
    } else {
        position + offset / distance * speed * dt
    }
}
