//! One renderable entity per particle-pool slot.
//!
//! The pool guarantees slot indices are stable, so the mapping is built once
//! and only extended when the arena grows after a capacity change. Dead
//! slots are hidden, not despawned.

use bevy::prelude::*;

use simulation::particles::ParticlePool;

/// Links a renderable to its pool slot.
#[derive(Component)]
pub struct ParticleSprite {
    pub slot: usize,
}

/// Shared unit mesh; per-entity materials carry the fading color.
#[derive(Resource)]
pub struct ParticleMesh(pub Handle<Mesh>);

pub fn setup_particle_mesh(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    commands.insert_resource(ParticleMesh(meshes.add(Sphere::new(1.0))));
}

/// Extends the entity set to cover the arena, then mirrors every slot's
/// position, size, and fade into its entity.
pub fn sync_particle_sprites(
    mut commands: Commands,
    pool: Res<ParticlePool>,
    mesh: Res<ParticleMesh>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut sprites: Query<(
        &ParticleSprite,
        &mut Transform,
        &mut Visibility,
        &MeshMaterial3d<StandardMaterial>,
    )>,
) {
    let covered = sprites.iter().count();
    for slot in covered..pool.slots().len() {
        commands.spawn((
            ParticleSprite { slot },
            Mesh3d(mesh.0.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::WHITE,
                unlit: true,
                alpha_mode: AlphaMode::Blend,
                ..default()
            })),
            Transform::default(),
            Visibility::Hidden,
        ));
    }

    for (sprite, mut transform, mut visibility, handle) in &mut sprites {
        let Some(particle) = pool.slots().get(sprite.slot) else {
            continue;
        };
        if !particle.alive {
            *visibility = Visibility::Hidden;
            continue;
        }
        *visibility = Visibility::Inherited;
        transform.translation = particle.position;
        transform.scale = Vec3::splat(particle.render_size());
        if let Some(material) = materials.get_mut(&handle.0) {
            material.base_color = particle.effect.color().with_alpha(particle.opacity());
        }
    }
}
