//! The surface the level core consumes from the physics engine and the
//! renderer.
//!
//! Weapons never touch Bevy or Rapier directly. They act on a `LevelWorld`,
//! which the running game provides through [`RapierLevel`](super::RapierLevel)
//! and headless code through [`SandboxWorld`](super::SandboxWorld).

use std::collections::HashSet;

use bevy::prelude::*;
use bevy_rapier2d::prelude::Group;

use crate::core::Sfx;

/// One fixture crossed by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub fixture: Entity,
    /// Rigid body owning the fixture.
    pub body: Entity,
    /// Position along the ray in `[0, 1]`.
    pub fraction: f32,
}

/// Body/fixture queries and mutations.
pub trait PhysicsWorld {
    /// Every fixture whose category includes `category` crossed by the
    /// segment `origin .. origin + ray`, ordered by `fraction`.
    fn raycast(&self, origin: Vec2, ray: Vec2, category: Group) -> Vec<RayHit>;

    /// All fixtures attached to `body`. Empty for a stale handle.
    fn fixtures_of(&self, body: Entity) -> Vec<Entity>;

    /// World-space bounds of `body`, if known.
    fn body_extent(&self, body: Entity) -> Option<Rect>;

    fn is_disappearing(&self, fixture: Entity) -> bool;

    fn mark_disappearing(&mut self, fixture: Entity);

    /// Remove `body` and all its fixtures. Unknown handles are ignored.
    fn remove_body(&mut self, body: Entity);
}

/// Draw-roster and sound collaborators.
pub trait EffectStage {
    fn spawn_visual(&mut self, visual: Visual) -> Entity;

    fn update_visual(&mut self, handle: Entity, visual: Visual);

    fn set_visible(&mut self, handle: Entity, visible: bool);

    fn despawn_visual(&mut self, handle: Entity);

    fn play_sound(&mut self, sound: Sfx);
}

/// Everything a weapon may act on.
pub trait LevelWorld: PhysicsWorld + EffectStage {}

impl<T: PhysicsWorld + EffectStage> LevelWorld for T {}

/// What a transient or held visual looks like this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    /// Deletion ray flash.
    Beam {
        center: Vec2,
        angle: f32,
        length: f32,
        width: f32,
    },
    /// Disappearance sparkle over a body; `fade` runs 0 to 1.
    Sparkles { area: Rect, fade: f32 },
    /// Base weapon shot line.
    Trace { from: Vec2, to: Vec2, color: Color },
    /// The weapon sprite in the player's hand.
    Held {
        position: Vec2,
        flip: bool,
        texture: &'static str,
    },
    /// Target collection flash; `fade` runs 0 to 1.
    Burst { position: Vec2, fade: f32 },
}

/// Side table of fixtures already scheduled to disappear.
///
/// Keeps a body with several fixtures from being triggered twice.
#[derive(Resource, Debug, Default)]
pub struct DisappearingFixtures {
    fixtures: HashSet<Entity>,
}

impl DisappearingFixtures {
    pub fn contains(&self, fixture: Entity) -> bool {
        self.fixtures.contains(&fixture)
    }

    pub fn mark(&mut self, fixture: Entity) {
        self.fixtures.insert(fixture);
    }

    /// Drop entries for fixtures that no longer exist.
    pub fn forget(&mut self, fixtures: impl IntoIterator<Item = Entity>) {
        for fixture in fixtures {
            self.fixtures.remove(&fixture);
        }
    }

    pub fn clear(&mut self) {
        self.fixtures.clear();
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }
}

/// Bodies a ray hit that are not yet fully disappearing, in hit order.
///
/// A body counts as already handled only when *every* one of its fixtures is
/// marked. Each body is returned once together with the first point the ray
/// touched it.
pub fn deletion_candidates<W>(world: &W, origin: Vec2, ray: Vec2, hits: &[RayHit]) -> Vec<(Entity, Vec2)>
where
    W: PhysicsWorld + ?Sized,
{
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    for hit in hits {
        if !seen.insert(hit.body) {
            continue;
        }
        let disappeared = world
            .fixtures_of(hit.body)
            .into_iter()
            .all(|fixture| world.is_disappearing(fixture));
        if !disappeared {
            candidates.push((hit.body, origin + ray * hit.fraction));
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_table_forgets_removed_fixtures() {
        let mut table = DisappearingFixtures::default();
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        table.mark(a);
        table.mark(b);
        table.forget([a]);
        assert!(!table.contains(a));
        assert!(table.contains(b));
        assert_eq!(table.len(), 1);
    }
}
