use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

// =============================================================================
// Tuning constants
// =============================================================================

/// Seconds between Bernoulli trials for starting weather.
pub(crate) const CHECK_INTERVAL_SECS: f32 = 2.0 * 60.0;

/// Probability that a trial starts a weather event.
pub(crate) const WEATHER_PROBABILITY: f64 = 0.15;

/// Event duration range in seconds (one to three minutes).
pub(crate) const DURATION_RANGE_SECS: std::ops::Range<f32> = 60.0..180.0;

/// Seconds over which a cleared field fades to transparent.
pub const FADE_SECS: f32 = 2.0;

/// Base drop counts per kind, clamped by the quality cap at allocation.
const RAIN_DROPS: usize = 250;
const SNOW_DROPS: usize = 180;

/// Default quality cap on the drop field.
const DEFAULT_MAX_DROPS: usize = 300;

/// Horizontal extent of the spawn box (centered on the origin).
const FIELD_HALF_EXTENT: f32 = 10.0;

/// Initial spawn height range above the scene.
const SPAWN_Y_RANGE: std::ops::Range<f32> = 5.0..15.0;

/// Respawn height range once a drop crosses the ground plane.
pub(crate) const RESPAWN_Y_RANGE: std::ops::Range<f32> = 10.0..15.0;

// =============================================================================
// Types
// =============================================================================

/// Kind of precipitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherKind {
    Rain,
    Snow,
}

impl WeatherKind {
    /// Human-readable name for debug display.
    pub fn label(self) -> &'static str {
        match self {
            WeatherKind::Rain => "Rain",
            WeatherKind::Snow => "Snow",
        }
    }

    fn base_drop_count(self) -> usize {
        match self {
            WeatherKind::Rain => RAIN_DROPS,
            WeatherKind::Snow => SNOW_DROPS,
        }
    }

    fn initial_velocity(self, rng: &mut impl Rng) -> Vec3 {
        match self {
            // Rain falls straight down, fast.
            WeatherKind::Rain => Vec3::new(0.0, -rng.gen_range(5.0..7.0), 0.0),
            // Snow falls slowly with horizontal drift.
            WeatherKind::Snow => Vec3::new(
                rng.gen_range(-0.25..0.25),
                -rng.gen_range(1.0..2.0),
                rng.gen_range(-0.25..0.25),
            ),
        }
    }
}

/// One drop in the recycling field. Drops never die; they respawn at the
/// top when they cross the ground plane.
#[derive(Debug, Clone, Copy)]
pub struct WeatherDrop {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Fired whenever precipitation starts or stops.
#[derive(Event, Debug, Clone)]
pub struct WeatherChangeEvent {
    pub old: Option<WeatherKind>,
    pub new: Option<WeatherKind>,
}

// =============================================================================
// Resource
// =============================================================================

/// Owner of all weather state: the trigger timer, the active event, and the
/// drop field.
#[derive(Resource, Debug)]
pub struct WeatherState {
    /// Whether a weather event is currently running.
    pub active: bool,
    /// Kind of the running (or fading) event. Kept through the fade so the
    /// renderer can hold the drop color, cleared when teardown completes.
    pub kind: Option<WeatherKind>,
    /// Seconds since the event started.
    pub elapsed: f32,
    /// Total event duration in seconds.
    pub duration: f32,
    /// Seconds left in the clear fade, if fading out.
    pub fade_remaining: Option<f32>,
    /// The drop field. Sized at allocation; constant for the event.
    pub drops: Vec<WeatherDrop>,
    /// Quality cap, applied at the *next* allocation only.
    pub max_drops: usize,
    pub(crate) check_timer: Timer,
}

impl Default for WeatherState {
    fn default() -> Self {
        Self {
            active: false,
            kind: None,
            elapsed: 0.0,
            duration: 0.0,
            fade_remaining: None,
            drops: Vec::new(),
            max_drops: DEFAULT_MAX_DROPS,
            check_timer: Timer::from_seconds(CHECK_INTERVAL_SECS, TimerMode::Repeating),
        }
    }
}

impl WeatherState {
    /// Start a weather event, replacing any running one. Allocates the drop
    /// field sized from the kind's base count clamped by the quality cap.
    pub fn begin(&mut self, kind: WeatherKind, duration_secs: f32, rng: &mut impl Rng) {
        self.teardown();

        self.active = true;
        self.kind = Some(kind);
        self.elapsed = 0.0;
        self.duration = duration_secs;
        self.fade_remaining = None;

        let count = kind.base_drop_count().min(self.max_drops);
        self.drops.reserve_exact(count);
        for _ in 0..count {
            self.drops.push(WeatherDrop {
                position: Vec3::new(
                    rng.gen_range(-FIELD_HALF_EXTENT..FIELD_HALF_EXTENT),
                    rng.gen_range(SPAWN_Y_RANGE.clone()),
                    rng.gen_range(-FIELD_HALF_EXTENT..FIELD_HALF_EXTENT),
                ),
                velocity: kind.initial_velocity(rng),
            });
        }
    }

    /// Stop the running event and begin the two-second fade. Idempotent:
    /// clearing inactive weather is a no-op.
    pub fn clear(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.fade_remaining = Some(FADE_SECS);
    }

    /// Drop the field immediately, skipping any fade. Idempotent.
    pub fn teardown(&mut self) {
        self.active = false;
        self.kind = None;
        self.elapsed = 0.0;
        self.duration = 0.0;
        self.fade_remaining = None;
        self.drops.clear();
    }

    /// Field opacity for the renderer: 1.0 while active, winding down to
    /// 0.0 across the clear fade.
    pub fn fade_opacity(&self) -> f32 {
        if self.active {
            1.0
        } else {
            match self.fade_remaining {
                Some(remaining) => (remaining / FADE_SECS).clamp(0.0, 1.0),
                None => 0.0,
            }
        }
    }

    /// Ambient-light multiplier consumed by the lighting rig.
    pub fn lighting_factor(&self) -> f32 {
        if self.active {
            0.8
        } else {
            1.0
        }
    }

    /// Quality hook. Takes effect at the next field allocation; a running
    /// event keeps its current field.
    pub fn set_max_drops(&mut self, max: usize) {
        self.max_drops = max;
    }

    /// Advance the event clock, the clear fade, and the drop field by
    /// `dt` seconds. Drops below the ground plane respawn at the top.
    pub fn advance(&mut self, dt: f32, rng: &mut impl Rng) {
        if self.active {
            self.elapsed += dt;
        }

        // Wind down the clear fade, then tear the field down.
        if let Some(remaining) = self.fade_remaining {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                self.teardown();
            } else {
                self.fade_remaining = Some(remaining);
            }
        }

        // Integrate drops while the field exists (running or fading).
        for drop in &mut self.drops {
            drop.position += drop.velocity * dt;
            if drop.position.y < 0.0 {
                drop.position = Vec3::new(
                    rng.gen_range(-FIELD_HALF_EXTENT..FIELD_HALF_EXTENT),
                    rng.gen_range(RESPAWN_Y_RANGE.clone()),
                    rng.gen_range(-FIELD_HALF_EXTENT..FIELD_HALF_EXTENT),
                );
            }
        }
    }
}
