//! Renderable entities for the weather drop field.
//!
//! The field is allocated per event and torn down after the clear fade, so
//! unlike the particle pool the entity set is rebuilt when an event starts
//! and destroyed when the field empties. All drops of an event share one
//! material; the clear fade is a single alpha write per frame.

use bevy::prelude::*;

use simulation::weather::{WeatherKind, WeatherState};

/// Links a renderable to its index in the drop field.
#[derive(Component)]
pub struct WeatherSprite {
    pub index: usize,
}

/// Tracks which event the current entity set was built for.
#[derive(Resource, Default)]
pub struct WeatherFieldView {
    pub kind: Option<WeatherKind>,
    pub material: Option<Handle<StandardMaterial>>,
}

fn drop_color(kind: WeatherKind) -> Color {
    match kind {
        WeatherKind::Rain => Color::srgb_u8(120, 160, 220),
        WeatherKind::Snow => Color::WHITE,
    }
}

fn drop_mesh(kind: WeatherKind, meshes: &mut Assets<Mesh>) -> Handle<Mesh> {
    match kind {
        // Rain: thin vertical streaks.
        WeatherKind::Rain => meshes.add(Cuboid::new(0.02, 0.35, 0.02)),
        // Snow: small flakes.
        WeatherKind::Snow => meshes.add(Sphere::new(0.05)),
    }
}

/// Rebuilds the entity set on kind changes, destroys it once the field is
/// torn down, and otherwise mirrors drop positions and the fade alpha.
pub fn sync_weather_sprites(
    mut commands: Commands,
    weather: Res<WeatherState>,
    mut view: ResMut<WeatherFieldView>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut sprites: Query<(Entity, &WeatherSprite, &mut Transform)>,
) {
    // Field gone: drop everything, including the shared material handle.
    if weather.drops.is_empty() {
        if view.kind.is_some() {
            for (entity, _, _) in &sprites {
                commands.entity(entity).despawn();
            }
            *view = WeatherFieldView::default();
        }
        return;
    }

    // New event (or a kind change): rebuild the set from scratch.
    if view.kind != weather.kind {
        for (entity, _, _) in &sprites {
            commands.entity(entity).despawn();
        }
        let kind = match weather.kind {
            Some(kind) => kind,
            None => return,
        };
        let mesh = drop_mesh(kind, &mut meshes);
        let material = materials.add(StandardMaterial {
            base_color: drop_color(kind),
            unlit: true,
            alpha_mode: AlphaMode::Blend,
            ..default()
        });
        for (index, drop) in weather.drops.iter().enumerate() {
            commands.spawn((
                WeatherSprite { index },
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_translation(drop.position),
            ));
        }
        view.kind = Some(kind);
        view.material = Some(material);
        return;
    }

    for (_, sprite, mut transform) in &mut sprites {
        if let Some(drop) = weather.drops.get(sprite.index) {
            transform.translation = drop.position;
        }
    }

    if let Some(handle) = &view.material {
        if let Some(material) = materials.get_mut(handle) {
            let alpha = weather.fade_opacity();
            material.base_color = material.base_color.with_alpha(alpha);
        }
    }
}
