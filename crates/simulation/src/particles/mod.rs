//! Effect-tagged pooled particle engine.
//!
//! Particles live in a preallocated slot arena with an explicit free list:
//! a slot is either alive (contributing to the render sync) or on the free
//! list, and `alive + free == slots` holds after every update. Emission is
//! a same-thread producer/consumer queue — game code sends `EmissionEvent`s
//! at any point during a frame and the queue is drained FIFO exactly once
//! at the start of the Integrate phase. Requests beyond capacity are
//! silently truncated.

mod systems;
mod types;

pub use systems::{drain_emission_queue, integrate_particles};
pub use types::{Effect, EmissionEvent, Particle, ParticlePool};

#[cfg(test)]
mod tests;
