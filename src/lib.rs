//! Erasure - a 2D deletion platformer in Bevy.
//!
//! The player crosses short hand-built levels armed with weapons that shoot a
//! beam and delete whatever targetable blocks it touches, clearing paths or
//! dropping enemies off the map.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, events, sound playback, interpolation helpers
//! - **Physics**: Rapier setup, collision categories, the world-facing traits
//!   weapons and effects are written against
//! - **Player**: Platformer controller, camera box follow, tunable config
//! - **Weapons**: Weapon contract, the deletion weapon, visual effects
//! - **Level**: Level data files, spawning, the level session state machine
//! - **UI**: Level select, HUD, session menus, inventory bar

pub mod core;
pub mod level;
pub mod physics;
pub mod player;
pub mod ui;
pub mod weapons;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct ErasurePlugin;

impl Plugin for ErasurePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)
            .add_plugins(physics::PhysicsPlugin)
            .add_plugins(player::PlayerPlugin)
            .add_plugins(weapons::WeaponsPlugin)
            .add_plugins(level::LevelPlugin)
            .add_plugins(ui::UiPlugin);
    }
}
