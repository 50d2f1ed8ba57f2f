//! Player module - player body, controls, and camera.

mod camera;
mod components;
mod controller;
mod plugin;

pub use camera::{camera_box_target, follow_camera};
pub use components::*;
pub use controller::{spawn_player, steer};
pub use plugin::PlayerPlugin;
