//! Player plugin - movement, camera, and player-related systems.

use bevy::prelude::*;

use super::camera::{apply_camera, follow_player, spawn_main_camera};
use super::components::load_player_config;
use super::controller::player_movement;
use crate::core::LevelSet;
use crate::level::session_running;

/// Player plugin - handles player input and the camera.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (load_player_config, spawn_main_camera))
            .add_systems(
                Update,
                (player_movement, follow_player)
                    .chain()
                    .in_set(LevelSet::Player)
                    .run_if(session_running),
            )
            .add_systems(Update, apply_camera.in_set(LevelSet::Effects));
    }
}
