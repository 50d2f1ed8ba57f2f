//! Level module - level data, the session state machine, and the systems
//! that build and run a level.

mod components;
mod data;
mod error;
mod menu;
mod plugin;
mod session;
mod spawning;
mod systems;

pub use components::{Block, Enemy, Ground, Spike, Target};
pub use data::*;
pub use error::LevelLoadError;
pub use menu::*;
pub use plugin::LevelPlugin;
pub use session::*;
pub use systems::{session_present, session_running};
