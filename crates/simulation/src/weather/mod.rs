//! Probabilistic rain/snow with a recycling drop field.
//!
//! Every two minutes of real time an inactive weather system rolls a 15%
//! chance to start rain or snow for one to three minutes. The drop field is
//! a fixed-size arena allocated when the event starts; drops that fall below
//! the ground respawn at the top rather than dying, so the field density is
//! constant for the lifetime of the event. Clearing fades the field out over
//! two seconds before it is torn down.

mod systems;
mod types;

pub use systems::{integrate_weather, trigger_weather};
pub use types::{WeatherChangeEvent, WeatherDrop, WeatherKind, WeatherState};
