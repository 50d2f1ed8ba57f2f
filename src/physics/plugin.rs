//! Physics plugin - Rapier setup, gravity and the debug view toggle.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::world::DisappearingFixtures;
use crate::core::constants::{GRAVITY, PIXELS_PER_METER};
use crate::core::{GameState, SessionCommand};

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(PIXELS_PER_METER))
            .add_plugins(RapierDebugRenderPlugin {
                enabled: false,
                ..default()
            })
            .init_resource::<DisappearingFixtures>()
            .add_systems(Startup, configure_gravity)
            .add_systems(Update, toggle_debug_view)
            .add_systems(OnExit(GameState::InGame), clear_disappearing);
    }
}

fn configure_gravity(mut configs: Query<&mut RapierConfiguration>) {
    for mut config in configs.iter_mut() {
        config.gravity = Vec2::new(0.0, -GRAVITY);
    }
}

fn toggle_debug_view(
    mut commands: EventReader<SessionCommand>,
    mut debug: ResMut<DebugRenderContext>,
) {
    for command in commands.read() {
        if *command == SessionCommand::ToggleDebugView {
            debug.enabled = !debug.enabled;
            let state = if debug.enabled { "on" } else { "off" };
            info!("Physics debug view {}", state);
        }
    }
}

/// Removed bodies are gone with the level; drop any marks that outlived them.
fn clear_disappearing(mut disappearing: ResMut<DisappearingFixtures>) {
    disappearing.clear();
}
