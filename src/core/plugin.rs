//! Core plugin that sets up game states, events, and fundamental systems.

use bevy::prelude::*;

use super::audio::{play_sounds, SoundSettings};
use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, LevelSelect, InGame, Restarting)
/// - Global events (PlayerDied, PlaySound, SessionCommand)
/// - Frame ordering of level systems
/// - Sound playback
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            .init_resource::<SelectedLevel>()
            .init_resource::<SoundSettings>()

            // Register global events
            .add_event::<PlayerDied>()
            .add_event::<PlaySound>()
            .add_event::<SessionCommand>()

            // Strict per-frame ordering inside a level
            .configure_sets(
                Update,
                (
                    LevelSet::Session,
                    LevelSet::Player,
                    LevelSet::Weapons,
                    LevelSet::Effects,
                    LevelSet::Ui,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )

            // Restarting is a pass-through state: the old level was torn
            // down on exit from InGame, entering InGame builds the new one.
            .add_systems(OnEnter(GameState::Restarting), reenter_level)

            .add_systems(Update, play_sounds);
    }
}

fn reenter_level(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}
