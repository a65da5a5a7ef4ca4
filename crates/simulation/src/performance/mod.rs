//! Frame-rate measurement and automatic quality degradation.
//!
//! Every frame the instantaneous FPS is pushed into a 60-sample ring
//! buffer; once per second a hysteresis check compares the rolling average
//! against the 45 FPS threshold. Three consecutive low checks downgrade one
//! quality step; a single healthy check resets the counter. There is no
//! automatic upgrade path when frame rate recovers.

mod systems;
mod types;

pub use systems::{apply_quality_change, check_quality, sample_frame_rate};
pub use types::{
    quality_settings, PerformanceState, QualityChangeEvent, QualityLevel, QualitySettings,
};

#[cfg(test)]
mod tests;
