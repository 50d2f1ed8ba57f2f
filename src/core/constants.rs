//! Game-wide tuning constants.

use bevy::prelude::*;

pub const GAME_WIDTH: f32 = 1280.0;
pub const GAME_HEIGHT: f32 = 720.0;
pub const ZOOM: f32 = 3.0;

/// Downward acceleration in pixels per second squared.
pub const GRAVITY: f32 = 200.0;
pub const PIXELS_PER_METER: f32 = 10.0;

/// Size of one camera "room" in world units.
pub const CAMERA_BOX: Vec2 = Vec2::new(GAME_WIDTH / ZOOM, GAME_HEIGHT / ZOOM);

// Sprite depths
pub const PLAYER_DEPTH: f32 = 1.0;
pub const DELETE_RAY_DEPTH: f32 = 2.0;
pub const WEAPON_DEPTH: f32 = 3.0;
pub const SPECIAL_DEPTH: f32 = 4.0;
