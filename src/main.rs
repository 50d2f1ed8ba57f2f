//! Erasure - Entry Point
//!
//! A 2D platformer where the only way forward is deleting the level.
//!
//! Controls:
//! - A/D or arrows: Move
//! - W or Space: Jump
//! - Left mouse (hold, release): Charge and fire at the cursor
//! - Mouse wheel, Q/E: Switch weapon
//! - R: Restart level
//! - P, Backspace, Escape: Pause/Unpause
//! - F3: Toggle physics debug view

use bevy::prelude::*;
use bevy_kira_audio::AudioPlugin;

fn main() {
    App::new()
        // Bevy default plugins, with kira replacing bevy's own audio
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Erasure".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest())
                .disable::<bevy::audio::AudioPlugin>(),
        )
        .add_plugins(AudioPlugin)
        // Our game plugin
        .add_plugins(erasure::ErasurePlugin)
        .run();
}
