//! Room-by-room camera follow.
//!
//! The level is cut into camera-sized boxes. The camera glides toward the box
//! the player is in and never shows anything left of or below the origin.

use bevy::prelude::*;

use super::components::{MainCamera, Player, PlayerConfig};
use crate::core::constants::{CAMERA_BOX, ZOOM};
use crate::core::{approach, timed_factor};
use crate::level::LevelSession;

/// Bottom-left corner of the camera box containing `player`.
pub fn camera_box_target(player: Vec2, box_size: Vec2, offset: Vec2) -> Vec2 {
    ((player / box_size).floor() * box_size + offset).max(Vec2::ZERO)
}

/// One frame of camera glide. `speed` is the time constant in seconds.
pub fn follow_camera(camera: Vec2, target: Vec2, speed: f32, dt: f32) -> Vec2 {
    let factor = if speed > 0.0 {
        timed_factor(1.0 / speed, dt)
    } else {
        1.0
    };
    approach(camera, target, factor)
}

pub fn spawn_main_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scale: 1.0 / ZOOM,
            ..OrthographicProjection::default_2d()
        },
        Transform::from_translation((-CAMERA_BOX / 2.0).extend(0.0)),
        MainCamera,
    ));
}

/// Glide the session camera toward the player's box.
pub fn follow_player(
    time: Res<Time>,
    config: Res<PlayerConfig>,
    mut session: ResMut<LevelSession>,
    player_query: Query<&Transform, With<Player>>,
) {
    let Ok(transform) = player_query.get_single() else {
        return;
    };
    let target = camera_box_target(
        transform.translation.truncate(),
        CAMERA_BOX,
        config.camera_offset(),
    );
    session.camera = follow_camera(session.camera, target, config.camera_speed, time.delta_secs());
}

/// Place the render camera over the session camera box.
pub fn apply_camera(
    session: Res<LevelSession>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = camera_query.get_single_mut() else {
        return;
    };
    let center = session.camera + CAMERA_BOX / 2.0;
    transform.translation.x = center.x;
    transform.translation.y = center.y;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_snaps_to_containing_box() {
        let box_size = Vec2::new(100.0, 50.0);
        let target = camera_box_target(Vec2::new(250.0, 120.0), box_size, Vec2::ZERO);
        assert_eq!(target, Vec2::new(200.0, 100.0));
    }

    #[test]
    fn target_never_goes_negative() {
        let box_size = Vec2::new(100.0, 50.0);
        let target = camera_box_target(Vec2::new(-30.0, 10.0), box_size, Vec2::new(-5.0, -5.0));
        assert_eq!(target, Vec2::ZERO);
    }

    #[test]
    fn glide_covers_share_of_gap() {
        let next = follow_camera(Vec2::ZERO, Vec2::new(100.0, 0.0), 0.1, 0.01);
        assert!((next.x - 10.0).abs() < 1e-3);
        assert_eq!(follow_camera(Vec2::ZERO, Vec2::ONE, 0.1, 1.0), Vec2::ONE);
    }
}
