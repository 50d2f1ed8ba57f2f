//! Level plugin - level loading, session flow, and level entities.

use bevy::prelude::*;

use super::data::load_level_library;
use super::spawning::{build_level, teardown_level};
use super::systems::*;
use crate::core::{GameState, LevelSet};
use crate::weapons::disarm_arsenals;

/// Level plugin - builds levels and runs their session.
pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app
            // Every level set also needs a live session
            .configure_sets(
                Update,
                (
                    LevelSet::Session,
                    LevelSet::Player,
                    LevelSet::Weapons,
                    LevelSet::Effects,
                    LevelSet::Ui,
                )
                    .run_if(session_present),
            )
            .add_systems(Startup, (load_level_library, finish_loading).chain())
            .add_systems(OnEnter(GameState::InGame), build_level)
            .add_systems(
                OnExit(GameState::InGame),
                (disarm_arsenals, teardown_level).chain(),
            )
            .add_systems(
                Update,
                (
                    (
                        read_session_input,
                        apply_session_commands,
                        sync_viewport,
                        sync_physics_pause,
                        step_menus,
                    )
                        .chain(),
                    (
                        refresh_enemies,
                        check_player_fall,
                        check_spike_contact,
                        evaluate_win_condition,
                    )
                        .chain()
                        .run_if(session_running),
                )
                    .chain()
                    .in_set(LevelSet::Session),
            )
            .add_systems(
                Update,
                patrol_enemies
                    .in_set(LevelSet::Player)
                    .run_if(session_running),
            )
            .add_systems(
                Update,
                age_collect_bursts
                    .in_set(LevelSet::Effects)
                    .run_if(session_running),
            );
    }
}

/// Loading is synchronous; move straight on to level select.
fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::LevelSelect);
}
