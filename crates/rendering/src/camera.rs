use bevy::prelude::*;

/// Fixed garden viewpoint: slightly above and behind the scene, looking at
/// the pet's spot just above the ground.
const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 7.0, 13.0);
const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 1.0, 0.0);

pub fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(CAMERA_POSITION).looking_at(CAMERA_TARGET, Vec3::Y),
    ));
}
