//! Core game module - states, events, and fundamental systems.
//!
//! This module provides the foundation that all other game systems build upon.

mod audio;
pub mod constants;
mod events;
mod glide;
mod plugin;
mod states;

pub use audio::SoundSettings;
pub use events::*;
pub use glide::*;
pub use plugin::CorePlugin;
pub use states::*;
