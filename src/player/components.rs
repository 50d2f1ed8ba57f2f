//! Player-related components and tuning.

use std::fs;

use bevy::prelude::*;
use serde::Deserialize;

/// Marker component for the player body.
#[derive(Component)]
pub struct Player;

/// Marker for the game camera.
#[derive(Component)]
pub struct MainCamera;

/// Horizontal direction of the last movement input.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn is_left(self) -> bool {
        self == Facing::Left
    }
}

/// Player tuning loaded from assets/data/player_config.ron.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct PlayerConfig {
    /// Body width and height in pixels
    pub size: (f32, f32),
    pub density: f32,
    pub restitution: f32,
    pub linear_damping: f32,
    /// Friction of the lower circle against the ground
    pub ground_friction: f32,
    /// Horizontal speed gained per second of input
    pub acceleration: f32,
    /// Input stops accelerating past this speed
    pub max_speed: f32,
    /// Upward impulse of one jump; the speed gained depends on body mass
    pub jump_impulse: f32,
    /// Seconds the camera takes to cover the gap to its target
    pub camera_speed: f32,
    pub camera_offset: (f32, f32),
    /// Seconds of holding fire for a full charge
    pub charge_time: f32,
    /// Hand position relative to the body center
    pub weapon_offset: (f32, f32),
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: (8.0, 16.0),
            density: 1.0,
            restitution: 0.0,
            linear_damping: 0.5,
            ground_friction: 1.0,
            acceleration: 600.0,
            max_speed: 80.0,
            jump_impulse: 180.0,
            camera_speed: 0.1,
            camera_offset: (0.0, 0.0),
            charge_time: 1.0,
            weapon_offset: (0.0, 0.0),
        }
    }
}

impl PlayerConfig {
    /// Load player config from RON file.
    pub fn load() -> Self {
        let path = "assets/data/player_config.ron";
        match fs::read_to_string(path) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded player config from {}", path);
                    config
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }

    pub fn body_size(&self) -> Vec2 {
        Vec2::new(self.size.0, self.size.1)
    }

    pub fn camera_offset(&self) -> Vec2 {
        Vec2::new(self.camera_offset.0, self.camera_offset.1)
    }

    pub fn weapon_offset(&self) -> Vec2 {
        Vec2::new(self.weapon_offset.0, self.weapon_offset.1)
    }
}

/// System to load player config at startup.
pub fn load_player_config(mut commands: Commands) {
    commands.insert_resource(PlayerConfig::load());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parses_from_ron() {
        let source = "(
            size: (10.0, 20.0),
            density: 1.0,
            restitution: 0.0,
            linear_damping: 0.5,
            ground_friction: 1.8,
            acceleration: 500.0,
            max_speed: 70.0,
            jump_impulse: 160.0,
            camera_speed: 0.1,
            camera_offset: (0.0, 8.0),
            charge_time: 0.8,
            weapon_offset: (0.0, 1.0),
        )";
        let config: PlayerConfig = ron::from_str(source).expect("valid config");
        assert_eq!(config.body_size(), Vec2::new(10.0, 20.0));
        assert_eq!(config.camera_offset(), Vec2::new(0.0, 8.0));
    }
}
