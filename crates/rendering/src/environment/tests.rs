use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::types::{
    grass_sway_angle, random_flight_target, step_toward, tree_sway_angle, wing_offset, wing_scale,
};

#[test]
fn test_sway_amplitudes_bounded() {
    for i in 0..200 {
        let t = i as f32 * 0.1;
        assert!(tree_sway_angle(t).abs() <= 0.05 + 1e-6);
        assert!(grass_sway_angle(t, i).abs() <= 0.02 + 1e-6);
    }
}

#[test]
fn test_grass_blades_out_of_phase() {
    // Neighboring blades should not move in lockstep.
    let t = 1.0;
    assert!((grass_sway_angle(t, 0) - grass_sway_angle(t, 10)).abs() > 1e-4);
}

#[test]
fn test_wing_scale_range() {
    let mut seen_min = f32::MAX;
    let mut seen_max = f32::MIN;
    for i in 0..500 {
        let s = wing_scale(i as f32 * 0.05);
        assert!((0.8..=1.2).contains(&s));
        seen_min = seen_min.min(s);
        seen_max = seen_max.max(s);
    }
    // The beat actually spans the range, not just a sliver of it.
    assert!(seen_min < 0.81 && seen_max > 1.19);
}

#[test]
fn test_wing_offsets_mirror_across_the_body() {
    for i in 0..500 {
        let flutter = i as f32 * 0.05;
        let left = wing_offset(-1.0, flutter);
        let right = wing_offset(1.0, flutter);
        assert!(right > 0.0);
        assert!((left + right).abs() < 1e-6, "wings must stay symmetric");
        // The offset follows the beat so the wing root stays on the body.
        assert!((right - 0.18 * wing_scale(flutter)).abs() < 1e-6);
    }
}

#[test]
fn test_flight_targets_inside_volume() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..100 {
        let target = random_flight_target(&mut rng);
        assert!(target.x.abs() <= 5.0);
        assert!((1.0..4.0).contains(&target.y));
        assert!(target.z.abs() <= 5.0);
    }
}

#[test]
fn test_step_toward_converges_without_overshoot() {
    let target = Vec3::new(3.0, 2.0, -1.0);
    let mut position = Vec3::ZERO;
    let mut last_distance = position.distance(target);
    for _ in 0..200 {
        position = step_toward(position, target, 1.25, 1.0 / 30.0);
        let distance = position.distance(target);
        assert!(distance <= last_distance + 1e-6);
        last_distance = distance;
    }
    assert!(last_distance < 1e-3);
}
