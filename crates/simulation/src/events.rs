//! Trigger API consumed by the game layer.
//!
//! All three triggers are fire-and-forget Bevy events: no return value, no
//! error surface. The fan-out system translates them into particle emission
//! requests; the lighting rig independently reads `ActionEffectEvent` to
//! spawn its action light.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::particles::{Effect, EmissionEvent};

/// A pet-care action worth celebrating visually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Feed,
    Wash,
    Play,
    Heal,
    LevelUp,
}

impl ActionKind {
    /// Particle burst for the action: effect kind and count.
    pub fn burst(self) -> (Effect, usize) {
        match self {
            ActionKind::Feed => (Effect::Sparkles, 15),
            ActionKind::Wash => (Effect::Bubbles, 25),
            ActionKind::Play => (Effect::Hearts, 8),
            ActionKind::Heal => (Effect::Sparkles, 20),
            ActionKind::LevelUp => (Effect::Sparks, 40),
        }
    }
}

/// A game action happened at `position`; celebrate it.
#[derive(Event, Debug, Clone)]
pub struct ActionEffectEvent {
    pub action: ActionKind,
    pub position: Vec3,
}

/// The pet is happy; float a few hearts.
#[derive(Event, Debug, Clone)]
pub struct HappinessHeartsEvent {
    pub position: Vec3,
}

/// The pet moved; leave a short-lived trail puff.
#[derive(Event, Debug, Clone)]
pub struct MovementTrailEvent {
    pub position: Vec3,
}

/// Hearts emitted per happiness trigger.
const HAPPINESS_HEART_COUNT: usize = 6;

/// Trail particles emitted per movement trigger.
const TRAIL_PUFF_COUNT: usize = 3;

/// Fans game-layer triggers out into particle emission requests.
pub fn fan_out_triggers(
    mut actions: EventReader<ActionEffectEvent>,
    mut hearts: EventReader<HappinessHeartsEvent>,
    mut trails: EventReader<MovementTrailEvent>,
    mut emissions: EventWriter<EmissionEvent>,
) {
    for event in actions.read() {
        let (effect, count) = event.action.burst();
        emissions.send(EmissionEvent {
            effect,
            position: event.position,
            count,
        });
    }
    for event in hearts.read() {
        emissions.send(EmissionEvent {
            effect: Effect::Hearts,
            position: event.position,
            count: HAPPINESS_HEART_COUNT,
        });
    }
    for event in trails.read() {
        emissions.send(EmissionEvent {
            effect: Effect::Trail,
            position: event.position,
            count: TRAIL_PUFF_COUNT,
        });
    }
}
