//! Collision category bits.
//!
//! Every collider the level spawns carries explicit `CollisionGroups`, so a
//! query filtered on one of these bits only sees fixtures that opted in.

use bevy_rapier2d::prelude::*;

pub const PLAYER: Group = Group::GROUP_1;
pub const PLAYER_FEET: Group = Group::GROUP_2;
pub const GROUND: Group = Group::GROUP_3;
/// Fixtures the deletion weapon is allowed to remove.
pub const WEAPON_TARGETABLE: Group = Group::GROUP_4;
pub const ENEMY: Group = Group::GROUP_5;
pub const SPIKE: Group = Group::GROUP_12;

/// Groups for a fixture that collides with everything.
pub fn solid(memberships: Group) -> CollisionGroups {
    CollisionGroups::new(memberships, Group::ALL)
}
