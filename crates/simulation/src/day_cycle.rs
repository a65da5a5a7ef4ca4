//! Compressed day/night clock.
//!
//! 24 minutes of real time = 24 game hours, so one real minute is one game
//! hour and one real second is one game minute. The cycle is divided into
//! four fixed 6-minute periods (morning/day/evening/night); sky colors and
//! light intensity blend across the first half minute of each period so
//! there are no visible jumps at the boundaries.
//!
//! Sun and moon share a single semicircular arc. `sun_position` /
//! `moon_position` / `celestial_position` are pure functions of the clock
//! minute so the sky renderer and the lighting rig cannot drift apart.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Real-time length of one full day cycle, in seconds.
pub const CYCLE_DURATION_SECS: f32 = 24.0 * 60.0;

/// Clock minutes at the start of a period during which colors and light
/// intensity blend from the previous period.
pub const TRANSITION_MINUTES: f32 = 0.5;

/// Arc radius for the sun/moon path.
const CELESTIAL_RADIUS: f32 = 15.0;

/// Depth at which celestial bodies travel.
const CELESTIAL_Z: f32 = -8.0;

/// Parking position for a body below the horizon.
const BELOW_HORIZON: Vec3 = Vec3::new(0.0, -10.0, CELESTIAL_Z);

// =============================================================================
// Period
// =============================================================================

/// One of four fixed 6-minute bins of the compressed day cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    Morning,
    Day,
    Evening,
    Night,
}

impl Period {
    /// Derive the period from a clock minute in `[0, 24)`.
    pub fn from_minute(minute: f32) -> Period {
        debug_assert!((0.0..24.0).contains(&minute));
        match minute {
            m if m < 6.0 => Period::Morning,
            m if m < 12.0 => Period::Day,
            m if m < 18.0 => Period::Evening,
            _ => Period::Night,
        }
    }

    /// Clock minute at which this period begins.
    pub fn start_minute(self) -> f32 {
        match self {
            Period::Morning => 0.0,
            Period::Day => 6.0,
            Period::Evening => 12.0,
            Period::Night => 18.0,
        }
    }

    /// The period that follows this one (wrapping).
    pub fn next(self) -> Period {
        match self {
            Period::Morning => Period::Day,
            Period::Day => Period::Evening,
            Period::Evening => Period::Night,
            Period::Night => Period::Morning,
        }
    }

    /// The period that precedes this one (wrapping).
    pub fn prev(self) -> Period {
        match self {
            Period::Morning => Period::Night,
            Period::Day => Period::Morning,
            Period::Evening => Period::Day,
            Period::Night => Period::Evening,
        }
    }

    /// Human-readable name for debug display.
    pub fn label(self) -> &'static str {
        match self {
            Period::Morning => "Morning",
            Period::Day => "Day",
            Period::Evening => "Evening",
            Period::Night => "Night",
        }
    }

    /// `true` while the sun is up (first 12-minute half-cycle).
    pub fn is_daytime(self) -> bool {
        matches!(self, Period::Morning | Period::Day)
    }
}

// =============================================================================
// Sky palette
// =============================================================================

/// Three-stop vertical gradient for the sky dome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyPalette {
    pub top: Color,
    pub middle: Color,
    pub bottom: Color,
}

/// Characteristic sky palette for a period.
pub fn period_palette(period: Period) -> SkyPalette {
    match period {
        Period::Morning => SkyPalette {
            top: Color::srgb_u8(255, 154, 118),    // warm orange
            middle: Color::srgb_u8(255, 182, 163), // light pink
            bottom: Color::srgb_u8(135, 206, 235), // sky blue
        },
        Period::Day => SkyPalette {
            top: Color::srgb_u8(135, 206, 235),    // sky blue
            middle: Color::srgb_u8(176, 224, 230), // powder blue
            bottom: Color::srgb_u8(224, 246, 255), // very light blue
        },
        Period::Evening => SkyPalette {
            top: Color::srgb_u8(255, 107, 53),    // deep orange
            middle: Color::srgb_u8(155, 89, 182), // purple
            bottom: Color::srgb_u8(44, 62, 80),   // dark blue
        },
        Period::Night => SkyPalette {
            top: Color::srgb_u8(15, 20, 25),    // very dark blue
            middle: Color::srgb_u8(26, 35, 50), // dark blue
            bottom: Color::srgb_u8(44, 62, 80), // lighter dark blue
        },
    }
}

/// Directional light intensity for a period (no transition smoothing).
pub fn period_light_intensity(period: Period) -> f32 {
    match period {
        Period::Morning => 0.5,
        Period::Day => 0.8,
        Period::Evening => 0.5,
        Period::Night => 0.3,
    }
}

/// Linear interpolation between two sRGB colors.
pub fn color_lerp(a: Color, b: Color, t: f32) -> Color {
    let a = a.to_srgba();
    let b = b.to_srgba();
    let t = t.clamp(0.0, 1.0);
    Color::srgb(
        a.red + (b.red - a.red) * t,
        a.green + (b.green - a.green) * t,
        a.blue + (b.blue - a.blue) * t,
    )
}

fn palette_lerp(a: SkyPalette, b: SkyPalette, t: f32) -> SkyPalette {
    SkyPalette {
        top: color_lerp(a.top, b.top, t),
        middle: color_lerp(a.middle, b.middle, t),
        bottom: color_lerp(a.bottom, b.bottom, t),
    }
}

// =============================================================================
// Celestial arc
// =============================================================================

/// Position along the shared semicircular arc for `progress` in `[0, 1]`
/// (rise at +x, zenith at the top, set at -x).
fn arc_point(progress: f32) -> Vec3 {
    let angle = std::f32::consts::PI * progress;
    Vec3::new(
        angle.cos() * CELESTIAL_RADIUS,
        angle.sin() * CELESTIAL_RADIUS,
        CELESTIAL_Z,
    )
}

/// Sun position for a clock minute. Parked below the horizon outside the
/// first 12-minute half-cycle.
pub fn sun_position(minute: f32) -> Vec3 {
    if (0.0..12.0).contains(&minute) {
        arc_point(minute / 12.0)
    } else {
        BELOW_HORIZON
    }
}

/// Moon position for a clock minute. Parked below the horizon outside the
/// second 12-minute half-cycle.
pub fn moon_position(minute: f32) -> Vec3 {
    if (12.0..24.0).contains(&minute) {
        arc_point((minute - 12.0) / 12.0)
    } else {
        BELOW_HORIZON
    }
}

/// Position of whichever body is currently above the horizon. This is the
/// single source of truth for the lighting rig's directional light so the
/// light and the visible sun/moon mesh can never disagree.
pub fn celestial_position(minute: f32) -> Vec3 {
    if minute < 12.0 {
        sun_position(minute)
    } else {
        moon_position(minute)
    }
}

// =============================================================================
// Events
// =============================================================================

/// Fired whenever the clock crosses a period boundary.
///
/// Consumers listen with `EventReader<PeriodChangeEvent>` instead of polling
/// the `DayCycle` resource every frame.
#[derive(Event, Debug, Clone)]
pub struct PeriodChangeEvent {
    /// Clock minute at the moment of the change.
    pub minute: f32,
    /// The period just entered.
    pub period: Period,
}

// =============================================================================
// Resource
// =============================================================================

/// The compressed day/night clock.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct DayCycle {
    /// Clock minute in `[0, 24)`. One clock minute = one game hour.
    pub minute: f32,
    /// Time-speed multiplier from user settings (1.0 = normal).
    pub speed: f32,
    /// When `false` the clock holds; pausing never resets the minute.
    pub running: bool,
}

impl Default for DayCycle {
    fn default() -> Self {
        Self {
            minute: 0.0,
            speed: 1.0,
            running: true,
        }
    }
}

impl DayCycle {
    /// Create a clock starting at the given minute (wrapped into `[0, 24)`).
    pub fn starting_at(minute: f32) -> Self {
        Self {
            minute: minute.rem_euclid(24.0),
            ..Default::default()
        }
    }

    /// Advance the clock by `delta_secs` of real time. No-op while paused.
    pub fn tick(&mut self, delta_secs: f32) {
        if !self.running {
            return;
        }
        let minutes = delta_secs * self.speed * (24.0 / CYCLE_DURATION_SECS);
        self.minute = (self.minute + minutes).rem_euclid(24.0);
    }

    /// Current period of the cycle.
    pub fn period(&self) -> Period {
        Period::from_minute(self.minute)
    }

    /// Deterministic test hook: jump to an absolute minute.
    pub fn set_minute(&mut self, minute: f32) {
        self.minute = minute.rem_euclid(24.0);
    }

    /// Deterministic test hook: advance by a number of clock minutes.
    pub fn advance(&mut self, minutes: f32) {
        self.minute = (self.minute + minutes).rem_euclid(24.0);
    }

    /// Blend factor into the current period, or `None` once the transition
    /// window has passed.
    fn transition_t(&self) -> Option<f32> {
        let since_start = self.minute - self.period().start_minute();
        (since_start < TRANSITION_MINUTES).then(|| since_start / TRANSITION_MINUTES)
    }

    /// Sky gradient for the current minute. Inside the first half minute of
    /// a period, blends per-channel from the previous period's palette.
    pub fn sky_colors(&self) -> SkyPalette {
        let period = self.period();
        let current = period_palette(period);
        match self.transition_t() {
            Some(t) => palette_lerp(period_palette(period.prev()), current, t),
            None => current,
        }
    }

    /// Directional light intensity for the current minute, smoothed across
    /// period boundaries with the same rule as `sky_colors`.
    pub fn light_intensity(&self) -> f32 {
        let period = self.period();
        let current = period_light_intensity(period);
        match self.transition_t() {
            Some(t) => {
                let prev = period_light_intensity(period.prev());
                prev + (current - prev) * t
            }
            None => current,
        }
    }

    /// Clock readout for debug display, e.g. `"06:30"` (game hours:minutes).
    pub fn formatted(&self) -> String {
        let h = self.minute as u32;
        let m = ((self.minute - h as f32) * 60.0) as u32;
        format!("{h:02}:{m:02}")
    }
}

// =============================================================================
// Systems
// =============================================================================

/// Advances the clock once per frame and reports period boundary crossings.
pub fn tick_day_cycle(
    time: Res<Time>,
    mut cycle: ResMut<DayCycle>,
    mut period_changes: EventWriter<PeriodChangeEvent>,
) {
    let before = cycle.period();
    cycle.tick(time.delta_secs());
    let after = cycle.period();
    if before != after {
        period_changes.send(PeriodChangeEvent {
            minute: cycle.minute,
            period: after,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn srgb_channels(c: Color) -> [f32; 3] {
        let c = c.to_srgba();
        [c.red, c.green, c.blue]
    }

    fn palette_distance(a: SkyPalette, b: SkyPalette) -> f32 {
        let stops = [(a.top, b.top), (a.middle, b.middle), (a.bottom, b.bottom)];
        stops
            .iter()
            .flat_map(|(x, y)| {
                srgb_channels(*x)
                    .into_iter()
                    .zip(srgb_channels(*y))
                    .map(|(p, q)| (p - q).abs())
            })
            .fold(0.0f32, f32::max)
    }

    #[test]
    fn test_period_bins() {
        // Boundary scenario from the period contract.
        let cases = [
            (5.9, Period::Morning),
            (6.1, Period::Day),
            (11.9, Period::Day),
            (12.1, Period::Evening),
            (23.9, Period::Night),
            (0.1, Period::Morning),
        ];
        for (minute, expected) in cases {
            let cycle = DayCycle::starting_at(minute);
            assert_eq!(cycle.period(), expected, "minute {minute}");
        }
    }

    #[test]
    fn test_cycle_closure_round_trip() {
        for start in [0.0, 3.3, 5.9, 11.2, 17.99, 23.5] {
            let mut cycle = DayCycle::starting_at(start);
            let period = cycle.period();
            let colors = cycle.sky_colors();
            let intensity = cycle.light_intensity();

            cycle.advance(24.0);

            assert_eq!(cycle.period(), period, "start {start}");
            assert!(
                palette_distance(cycle.sky_colors(), colors) < 1e-4,
                "start {start}"
            );
            assert!((cycle.light_intensity() - intensity).abs() < 1e-4);
        }
    }

    #[test]
    fn test_smoothness_no_discontinuous_jumps() {
        // Sample across the evening→night boundary in small steps; the
        // per-channel delta must stay proportional to the elapsed time.
        let mut cycle = DayCycle::starting_at(17.8);
        let step = 0.01; // clock minutes
        let mut prev = cycle.sky_colors();
        for _ in 0..60 {
            cycle.advance(step);
            let next = cycle.sky_colors();
            // Full palette swing is at most 1.0 per channel over the 0.5
            // minute transition, i.e. 2.0 per minute.
            assert!(
                palette_distance(prev, next) <= step * 2.0 + 1e-5,
                "jump at minute {}",
                cycle.minute
            );
            prev = next;
        }
    }

    #[test]
    fn test_period_palette_membership() {
        // Interior samples (past the transition window) match the period's
        // characteristic palette exactly.
        let day = DayCycle::starting_at(9.0);
        assert_eq!(day.sky_colors(), period_palette(Period::Day));
        let top = day.sky_colors().top.to_srgba();
        assert!(top.blue > top.red, "day sky should be blue-biased");

        let night = DayCycle::starting_at(21.0);
        let palette = night.sky_colors();
        let avg: f32 = [palette.top, palette.middle, palette.bottom]
            .iter()
            .flat_map(|c| srgb_channels(*c))
            .sum::<f32>()
            / 9.0;
        assert!(avg < 0.4, "night sky should be dark, got {avg}");
    }

    #[test]
    fn test_intensity_correlation() {
        assert!(DayCycle::starting_at(9.0).light_intensity() >= 0.7);
        assert!(DayCycle::starting_at(21.0).light_intensity() <= 0.4);
        for minute in [3.0, 15.0] {
            let i = DayCycle::starting_at(minute).light_intensity();
            assert!(i > 0.4 && i < 0.7, "minute {minute} intensity {i}");
        }
    }

    #[test]
    fn test_intensity_blends_at_boundary() {
        // Just after the day→evening boundary, intensity sits between the
        // two period values.
        let cycle = DayCycle::starting_at(12.25);
        let i = cycle.light_intensity();
        assert!(i > 0.5 && i < 0.8, "got {i}");
    }

    #[test]
    fn test_tick_wraps_and_pause_holds() {
        let mut cycle = DayCycle::starting_at(23.9);
        // 0.2 clock minutes = 12 real seconds.
        cycle.tick(12.0);
        assert!(cycle.minute < 24.0 && cycle.minute >= 0.0);
        assert_eq!(cycle.period(), Period::Morning);

        cycle.running = false;
        let held = cycle.minute;
        cycle.tick(100.0);
        assert_eq!(cycle.minute, held);
    }

    #[test]
    fn test_time_speed_scales_tick() {
        let mut normal = DayCycle::starting_at(0.0);
        let mut fast = DayCycle::starting_at(0.0);
        fast.speed = 2.0;
        normal.tick(30.0);
        fast.tick(30.0);
        assert!((fast.minute - normal.minute * 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_celestial_arc_shared_and_parked() {
        // Sun at mid-morning half-cycle sits at the zenith.
        let zenith = sun_position(6.0);
        assert!(zenith.y > 14.9);
        // Sun parked at night, moon parked during the day.
        assert!(sun_position(18.0).y < 0.0);
        assert!(moon_position(6.0).y < 0.0);
        // The lighting rig's position matches whichever body is up.
        assert_eq!(celestial_position(3.0), sun_position(3.0));
        assert_eq!(celestial_position(20.0), moon_position(20.0));
    }

    #[test]
    fn test_set_minute_wraps_negative() {
        let mut cycle = DayCycle::default();
        cycle.set_minute(-1.0);
        assert!((cycle.minute - 23.0).abs() < 1e-6);
        assert_eq!(cycle.period(), Period::Night);
    }
}
