use super::types::{FPS_THRESHOLD, LOW_CHECKS_BEFORE_DOWNGRADE};
use super::*;

fn state_at(quality: QualityLevel, fps: f32) -> PerformanceState {
    let mut state = PerformanceState::default();
    state.quality = quality;
    for _ in 0..60 {
        state.push_sample(fps);
    }
    state
}

#[test]
fn test_average_over_ring_buffer() {
    let mut state = PerformanceState::default();
    state.push_sample(30.0);
    state.push_sample(60.0);
    assert!((state.current_fps - 45.0).abs() < 1e-4);

    // Once full, old samples fall out of the window.
    for _ in 0..120 {
        state.push_sample(50.0);
    }
    assert!((state.current_fps - 50.0).abs() < 1e-4);
}

#[test]
fn test_downgrade_needs_three_consecutive_low_checks() {
    let mut state = state_at(QualityLevel::High, 30.0);

    assert_eq!(state.run_check(), None);
    assert_eq!(state.run_check(), None);
    assert_eq!(state.low_fps_count, 2);
    assert_eq!(state.run_check(), Some(QualityLevel::Medium));
    assert_eq!(state.quality, QualityLevel::Medium);
    assert_eq!(state.low_fps_count, 0, "counter resets after downgrade");
}

#[test]
fn test_single_good_reading_resets_counter() {
    let mut state = state_at(QualityLevel::High, 30.0);
    assert_eq!(state.run_check(), None);
    assert_eq!(state.run_check(), None);

    // One healthy second wipes the streak.
    for _ in 0..60 {
        state.push_sample(FPS_THRESHOLD + 15.0);
    }
    assert_eq!(state.run_check(), None);
    assert_eq!(state.low_fps_count, 0);

    // The streak must start over from scratch.
    for _ in 0..60 {
        state.push_sample(30.0);
    }
    for _ in 0..LOW_CHECKS_BEFORE_DOWNGRADE - 1 {
        assert_eq!(state.run_check(), None);
    }
    assert_eq!(state.run_check(), Some(QualityLevel::Medium));
}

#[test]
fn test_no_downgrade_below_low() {
    let mut state = state_at(QualityLevel::Low, 10.0);
    for _ in 0..10 {
        assert_eq!(state.run_check(), None);
    }
    assert_eq!(state.quality, QualityLevel::Low);
}

#[test]
fn test_no_upgrade_on_recovery() {
    // Downgrade-only by design: a recovered frame rate never steps the
    // level back up.
    let mut state = state_at(QualityLevel::Medium, 120.0);
    for _ in 0..10 {
        assert_eq!(state.run_check(), None);
    }
    assert_eq!(state.quality, QualityLevel::Medium);
}

#[test]
fn test_auto_adjust_off_disables_downgrades() {
    let mut state = state_at(QualityLevel::High, 10.0);
    state.auto_adjust = false;
    for _ in 0..10 {
        assert_eq!(state.run_check(), None);
    }
    assert_eq!(state.quality, QualityLevel::High);
}

#[test]
fn test_presets_scale_down_with_level() {
    let low = quality_settings(QualityLevel::Low);
    let medium = quality_settings(QualityLevel::Medium);
    let high = quality_settings(QualityLevel::High);

    assert!(low.particle_count < medium.particle_count);
    assert!(medium.particle_count < high.particle_count);
    assert!(low.weather_particle_count < high.weather_particle_count);
    assert!(low.max_butterflies < high.max_butterflies);
    assert!(!low.shadows_enabled);
    assert!(high.antialiasing && !medium.antialiasing);
}
