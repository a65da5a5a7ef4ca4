//! Deterministic frame ordering via `SystemSet` phases.
//!
//! These sets establish a **contract** for system execution order within the
//! `Update` schedule. Plugins place their systems into the appropriate set so
//! that inter-plugin ordering is explicit and testable rather than relying on
//! implicit timing assumptions.
//!
//! ```text
//! Clock  →  Control  →  Integrate  →  Visual
//! ```
//!
//! * **Clock** – Advances the day cycle. Everything downstream reads its
//!   output within the same frame, so it must run first.
//! * **Control** – Decision logic: weather trigger/expiry rolls, performance
//!   sampling and the quality check, settings application, and fan-out of
//!   game-layer trigger events into emission requests.
//! * **Integrate** – Numeric integration: particle pool drain + advance,
//!   weather drop field advance.
//! * **Visual** – Rendering-crate systems that sync entities to simulation
//!   state. Pure consumers; they never mutate simulation resources.
//!
//! Weather and environment animation have no ordering dependency on each
//! other; both merely live in their phase.

use bevy::prelude::*;

/// Ordered phases for systems running in the `Update` schedule.
///
/// Configured as a chain: `Clock` → `Control` → `Integrate` → `Visual`.
/// Individual plugins use `.in_set(EffectsSet::X)` when registering their
/// systems, which gives them automatic ordering relative to other phases
/// while retaining the ability to add fine-grained `.after()` / `.before()`
/// constraints within the same phase.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum EffectsSet {
    /// Day-cycle tick. Runs before anything that reads time-of-day.
    Clock,
    /// Weather rolls, performance/quality checks, settings application,
    /// trigger-event fan-out.
    Control,
    /// Particle and weather-field integration.
    Integrate,
    /// Visual-only entity sync (rendering crate).
    Visual,
}
