//! Global events used for cross-system communication.

use bevy::prelude::*;

/// Why the player died.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Dropped below the bottom of the map.
    Fell,
    /// Touched a spike.
    Spiked,
}

/// Sent once when the player dies.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDied {
    pub player: Entity,
    pub cause: DeathCause,
}

/// Sound effects the level can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sfx {
    Jump,
    Shoot,
    TargetCollect,
    Button,
    ButtonPressed,
}

impl Sfx {
    pub fn path(self) -> &'static str {
        match self {
            Sfx::Jump => "sounds/jump.wav",
            Sfx::Shoot => "sounds/shoot.wav",
            Sfx::TargetCollect => "sounds/target_collect.wav",
            Sfx::Button => "sounds/button.wav",
            Sfx::ButtonPressed => "sounds/button_pressed.wav",
        }
    }
}

/// Fire-and-forget request to play a sound.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlaySound(pub Sfx);

/// Requests coming from menu buttons and keyboard shortcuts.
///
/// The level session consumes these; the UI never mutates the session
/// directly.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Restart,
    BackToSelect,
    ContinueToNext,
    TogglePause,
    ToggleOptions,
    ToggleSound,
    ToggleDebugView,
}
