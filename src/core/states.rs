//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Level systems only
//! run in `InGame`; the level-select screen only in `LevelSelect`.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while level data and config are read
/// - Move to `LevelSelect` once loading completes
/// - `InGame` while a level session is alive
/// - `Restarting` is a one-frame hop used to tear down and rebuild a level
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading level data files
    #[default]
    Loading,
    /// Level selection screen
    LevelSelect,
    /// A level session is running (possibly paused or showing a menu)
    InGame,
    /// Previous session torn down, next one not built yet
    Restarting,
}

/// Marker for every entity that belongs to the current level and must be
/// despawned when the session ends.
#[derive(Component)]
pub struct LevelEntity;

/// Per-frame ordering inside a level.
///
/// Physics queries in a frame must see that frame's body state, so the
/// session decides first, then the player moves, then weapons act, then
/// short-lived effects age, and the UI observes the result last.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LevelSet {
    Session,
    Player,
    Weapons,
    Effects,
    Ui,
}

/// Currently selected level (index into the level library).
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectedLevel(pub usize);
