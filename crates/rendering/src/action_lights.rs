//! Short-lived accent lights for pet-care actions.
//!
//! A fixed arena of point-light entities is spawned dark at startup. Each
//! action claims a slot (the oldest claim is evicted when all slots are
//! busy), flashes in the action's color, and fades back to dark over one
//! second. Entities are never spawned or despawned after setup.

use bevy::prelude::*;

use simulation::events::{ActionEffectEvent, ActionKind};

const ACTION_LIGHT_SLOTS: usize = 8;

/// Seconds from claim to fully dark.
const ACTION_LIGHT_SECS: f32 = 1.0;

/// Peak intensity at the moment of the claim.
const ACTION_LIGHT_LUMENS: f32 = 300_000.0;

/// Height above the action position at which the light hovers.
const LIGHT_HEIGHT_OFFSET: f32 = 1.5;

/// Accent color per action.
pub fn action_light_color(action: ActionKind) -> Color {
    match action {
        ActionKind::Feed => Color::srgb_u8(255, 215, 0),  // gold
        ActionKind::Wash => Color::srgb_u8(74, 144, 226), // water blue
        ActionKind::Play => Color::srgb_u8(255, 105, 180), // pink
        ActionKind::Heal => Color::srgb_u8(0, 255, 127),  // spring green
        ActionKind::LevelUp => Color::WHITE,
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct LightSlot {
    /// Seconds of fade left; `<= 0` means the slot is free.
    remaining: f32,
    /// Claim order, for oldest-first eviction.
    seq: u64,
}

/// Slot bookkeeping plus the pre-spawned light entities, index-aligned.
#[derive(Resource, Default)]
pub struct ActionLightArena {
    slots: Vec<LightSlot>,
    entities: Vec<Entity>,
    next_seq: u64,
}

impl ActionLightArena {
    fn with_slots(count: usize) -> Self {
        Self {
            slots: vec![LightSlot::default(); count],
            entities: Vec::new(),
            next_seq: 0,
        }
    }

    /// Claim a slot: a free one if available, otherwise the oldest claim.
    fn claim(&mut self) -> usize {
        let index = self
            .slots
            .iter()
            .position(|slot| slot.remaining <= 0.0)
            .unwrap_or_else(|| {
                self.slots
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, slot)| slot.seq)
                    .map(|(i, _)| i)
                    .unwrap_or(0)
            });
        self.slots[index] = LightSlot {
            remaining: ACTION_LIGHT_SECS,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        index
    }

    /// Linear fade factor for a slot, in `[0, 1]`.
    fn fade(&self, index: usize) -> f32 {
        (self.slots[index].remaining / ACTION_LIGHT_SECS).clamp(0.0, 1.0)
    }

    fn tick(&mut self, dt: f32) {
        for slot in &mut self.slots {
            if slot.remaining > 0.0 {
                slot.remaining -= dt;
            }
        }
    }

    #[cfg(test)]
    fn busy_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.remaining > 0.0).count()
    }
}

pub fn setup_action_lights(mut commands: Commands) {
    let mut arena = ActionLightArena::with_slots(ACTION_LIGHT_SLOTS);
    for _ in 0..ACTION_LIGHT_SLOTS {
        let entity = commands
            .spawn((
                PointLight {
                    intensity: 0.0,
                    range: 8.0,
                    ..default()
                },
                Transform::default(),
            ))
            .id();
        arena.entities.push(entity);
    }
    commands.insert_resource(arena);
}

/// Claims a slot for each action this frame and flashes it on.
pub fn spawn_action_lights(
    mut actions: EventReader<ActionEffectEvent>,
    mut arena: ResMut<ActionLightArena>,
    mut lights: Query<(&mut PointLight, &mut Transform)>,
) {
    for event in actions.read() {
        let index = arena.claim();
        let Ok((mut light, mut transform)) = lights.get_mut(arena.entities[index]) else {
            continue;
        };
        light.color = action_light_color(event.action);
        light.intensity = ACTION_LIGHT_LUMENS;
        transform.translation = event.position + Vec3::Y * LIGHT_HEIGHT_OFFSET;
    }
}

/// Fades busy slots toward dark and frees them on expiry.
pub fn fade_action_lights(
    time: Res<Time>,
    mut arena: ResMut<ActionLightArena>,
    mut lights: Query<&mut PointLight>,
) {
    arena.tick(time.delta_secs());
    for index in 0..arena.entities.len() {
        if let Ok(mut light) = lights.get_mut(arena.entities[index]) {
            light.intensity = ACTION_LIGHT_LUMENS * arena.fade(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_fill_free_slots_first() {
        let mut arena = ActionLightArena::with_slots(3);
        assert_eq!(arena.claim(), 0);
        assert_eq!(arena.claim(), 1);
        assert_eq!(arena.claim(), 2);
        assert_eq!(arena.busy_count(), 3);
    }

    #[test]
    fn test_full_arena_evicts_oldest() {
        let mut arena = ActionLightArena::with_slots(2);
        arena.claim();
        arena.tick(0.1);
        arena.claim();
        // Both busy; the first claim is older and gets evicted.
        assert_eq!(arena.claim(), 0);
        assert_eq!(arena.busy_count(), 2);
        // Next eviction takes the slot claimed second.
        assert_eq!(arena.claim(), 1);
    }

    #[test]
    fn test_expired_slot_is_reused() {
        let mut arena = ActionLightArena::with_slots(2);
        let first = arena.claim();
        arena.claim();
        arena.tick(ACTION_LIGHT_SECS + 0.01);
        assert_eq!(arena.busy_count(), 0);
        assert_eq!(arena.claim(), first);
    }

    #[test]
    fn test_fade_is_linear() {
        let mut arena = ActionLightArena::with_slots(1);
        let index = arena.claim();
        assert!((arena.fade(index) - 1.0).abs() < 1e-6);
        arena.tick(0.5);
        assert!((arena.fade(index) - 0.5).abs() < 1e-6);
        arena.tick(1.0);
        assert_eq!(arena.fade(index), 0.0);
    }
}
