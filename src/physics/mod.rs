//! Physics module - collision categories, the world seam weapons act on,
//! and its Rapier and in-memory implementations.

pub mod categories;
mod plugin;
mod rapier;
mod sandbox;
mod world;

pub use plugin::PhysicsPlugin;
pub use rapier::{BodyExtent, EffectVisual, RapierLevel};
pub use sandbox::SandboxWorld;
pub use world::*;
