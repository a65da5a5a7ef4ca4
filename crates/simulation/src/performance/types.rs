use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// =============================================================================
// Thresholds
// =============================================================================

/// Rolling-average FPS below which a check counts as "low".
pub(crate) const FPS_THRESHOLD: f32 = 45.0;

/// Consecutive low checks required before a downgrade.
pub(crate) const LOW_CHECKS_BEFORE_DOWNGRADE: u32 = 3;

/// Seconds between hysteresis checks.
pub(crate) const CHECK_INTERVAL_SECS: f32 = 1.0;

/// Ring-buffer length for FPS samples.
const FRAME_HISTORY_LEN: usize = 60;

// =============================================================================
// Quality level
// =============================================================================

/// A named bundle of particle/shadow/antialiasing settings traded off
/// against measured frame rate.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    bitcode::Encode,
    bitcode::Decode,
)]
pub enum QualityLevel {
    Low,
    Medium,
    High,
}

impl Default for QualityLevel {
    /// Mobile devices start one tier lower.
    fn default() -> Self {
        if cfg!(any(target_os = "android", target_os = "ios")) {
            QualityLevel::Medium
        } else {
            QualityLevel::High
        }
    }
}

impl QualityLevel {
    /// The next tier down, or `None` at the bottom.
    pub fn step_down(self) -> Option<QualityLevel> {
        match self {
            QualityLevel::High => Some(QualityLevel::Medium),
            QualityLevel::Medium => Some(QualityLevel::Low),
            QualityLevel::Low => None,
        }
    }

    /// Human-readable name for debug display.
    pub fn label(self) -> &'static str {
        match self {
            QualityLevel::Low => "Low",
            QualityLevel::Medium => "Medium",
            QualityLevel::High => "High",
        }
    }
}

/// Immutable settings bundle for one quality level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualitySettings {
    pub particle_count: usize,
    pub shadows_enabled: bool,
    pub weather_particle_count: usize,
    pub antialiasing: bool,
    pub max_butterflies: usize,
}

/// Preset table consumed by the particle pool, weather field, lighting rig,
/// and environment animator.
pub fn quality_settings(level: QualityLevel) -> QualitySettings {
    match level {
        QualityLevel::Low => QualitySettings {
            particle_count: 100,
            shadows_enabled: false,
            weather_particle_count: 100,
            antialiasing: false,
            max_butterflies: 2,
        },
        QualityLevel::Medium => QualitySettings {
            particle_count: 150,
            shadows_enabled: true,
            weather_particle_count: 200,
            antialiasing: false,
            max_butterflies: 3,
        },
        QualityLevel::High => QualitySettings {
            particle_count: 200,
            shadows_enabled: true,
            weather_particle_count: 300,
            antialiasing: true,
            max_butterflies: 5,
        },
    }
}

/// Fired when the quality level changes, automatically or by hand.
#[derive(Event, Debug, Clone)]
pub struct QualityChangeEvent {
    pub level: QualityLevel,
}

// =============================================================================
// Resource
// =============================================================================

/// Rolling frame-rate measurement and the hysteresis counter.
#[derive(Resource, Debug)]
pub struct PerformanceState {
    history: [f32; FRAME_HISTORY_LEN],
    len: usize,
    head: usize,
    /// Rolling average of the sample buffer.
    pub current_fps: f32,
    pub quality: QualityLevel,
    pub auto_adjust: bool,
    /// Consecutive sub-threshold checks so far (0..3).
    pub low_fps_count: u32,
    pub(crate) check_timer: Timer,
}

impl Default for PerformanceState {
    fn default() -> Self {
        Self {
            history: [0.0; FRAME_HISTORY_LEN],
            len: 0,
            head: 0,
            current_fps: 60.0,
            quality: QualityLevel::default(),
            auto_adjust: true,
            low_fps_count: 0,
            check_timer: Timer::from_seconds(CHECK_INTERVAL_SECS, TimerMode::Repeating),
        }
    }
}

impl PerformanceState {
    /// Push one instantaneous FPS sample and refresh the rolling average.
    pub fn push_sample(&mut self, fps: f32) {
        self.history[self.head] = fps;
        self.head = (self.head + 1) % FRAME_HISTORY_LEN;
        self.len = (self.len + 1).min(FRAME_HISTORY_LEN);
        self.current_fps = self.history[..self.len].iter().sum::<f32>() / self.len as f32;
    }

    /// One hysteresis check against the rolling average. Returns the new
    /// level when this check causes a downgrade.
    pub fn run_check(&mut self) -> Option<QualityLevel> {
        if !self.auto_adjust {
            return None;
        }
        if self.current_fps < FPS_THRESHOLD {
            self.low_fps_count += 1;
            if self.low_fps_count >= LOW_CHECKS_BEFORE_DOWNGRADE {
                self.low_fps_count = 0;
                if let Some(lower) = self.quality.step_down() {
                    self.quality = lower;
                    return Some(lower);
                }
            }
        } else {
            self.low_fps_count = 0;
        }
        None
    }
}
