//! Weapons module - the weapon contract, the deletion weapon, the player's
//! arsenal, and the systems driving them.

mod arsenal;
mod contract;
mod deletion;
mod effects;
mod plugin;
mod systems;

pub use arsenal::{Arsenal, Loadout, WeaponKind};
pub use contract::*;
pub use deletion::*;
pub use effects::{Beam, Effect, EffectClock, Sparkles, Trace};
pub use plugin::WeaponsPlugin;
pub use systems::{disarm_arsenals, Trigger};
