//! In-memory level world for headless runs and tests.
//!
//! Fixtures are axis-aligned boxes; raycasts use a slab test. There is no
//! integration step, which is all the level core needs to exercise its
//! query and deletion logic.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy_rapier2d::prelude::Group;

use super::world::{DisappearingFixtures, EffectStage, PhysicsWorld, RayHit, Visual};
use crate::core::Sfx;

#[derive(Debug, Clone)]
struct SandboxFixture {
    entity: Entity,
    area: Rect,
    category: Group,
}

#[derive(Debug, Clone)]
struct SandboxVisual {
    visual: Visual,
    visible: bool,
}

/// Headless `LevelWorld` backed by plain collections.
#[derive(Debug, Default)]
pub struct SandboxWorld {
    next_id: u32,
    bodies: Vec<(Entity, Vec<SandboxFixture>)>,
    disappearing: DisappearingFixtures,
    visuals: HashMap<Entity, SandboxVisual>,
    sounds: Vec<Sfx>,
    removed: Vec<Entity>,
}

impl SandboxWorld {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> Entity {
        self.next_id += 1;
        Entity::from_raw(self.next_id)
    }

    /// Add a body made of the given `(area, category)` fixtures.
    pub fn add_body(&mut self, fixtures: &[(Rect, Group)]) -> Entity {
        let body = self.allocate();
        let fixtures = fixtures
            .iter()
            .map(|&(area, category)| SandboxFixture {
                entity: self.allocate(),
                area,
                category,
            })
            .collect();
        self.bodies.push((body, fixtures));
        body
    }

    pub fn contains_body(&self, body: Entity) -> bool {
        self.bodies.iter().any(|(entity, _)| *entity == body)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Bodies removed so far, in removal order.
    pub fn removed_bodies(&self) -> &[Entity] {
        &self.removed
    }

    pub fn visual(&self, handle: Entity) -> Option<&Visual> {
        self.visuals.get(&handle).map(|entry| &entry.visual)
    }

    pub fn is_visible(&self, handle: Entity) -> bool {
        self.visuals.get(&handle).is_some_and(|entry| entry.visible)
    }

    pub fn visual_handles(&self) -> Vec<Entity> {
        self.visuals.keys().copied().collect()
    }

    /// Live visuals on the draw roster.
    pub fn visual_count(&self) -> usize {
        self.visuals.len()
    }

    /// Live visuals matching `predicate`.
    pub fn count_visuals(&self, predicate: impl Fn(&Visual) -> bool) -> usize {
        self.visuals.values().filter(|entry| predicate(&entry.visual)).count()
    }

    pub fn sounds(&self) -> &[Sfx] {
        &self.sounds
    }

    fn fixtures(&self, body: Entity) -> Option<&[SandboxFixture]> {
        self.bodies
            .iter()
            .find(|(entity, _)| *entity == body)
            .map(|(_, fixtures)| fixtures.as_slice())
    }
}

/// Entry fraction of the segment `origin .. origin + ray` into `area`.
fn segment_enters(origin: Vec2, ray: Vec2, area: Rect) -> Option<f32> {
    let mut near = 0.0_f32;
    let mut far = 1.0_f32;
    for axis in 0..2 {
        let start = origin[axis];
        let delta = ray[axis];
        let (low, high) = (area.min[axis], area.max[axis]);
        if delta.abs() <= f32::EPSILON {
            if start < low || start > high {
                return None;
            }
            continue;
        }
        let mut t0 = (low - start) / delta;
        let mut t1 = (high - start) / delta;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        near = near.max(t0);
        far = far.min(t1);
        if near > far {
            return None;
        }
    }
    Some(near)
}

impl PhysicsWorld for SandboxWorld {
    fn raycast(&self, origin: Vec2, ray: Vec2, category: Group) -> Vec<RayHit> {
        let mut hits: Vec<RayHit> = self
            .bodies
            .iter()
            .flat_map(|(body, fixtures)| {
                fixtures
                    .iter()
                    .filter(|fixture| fixture.category.contains(category))
                    .filter_map(move |fixture| {
                        segment_enters(origin, ray, fixture.area).map(|fraction| RayHit {
                            fixture: fixture.entity,
                            body: *body,
                            fraction,
                        })
                    })
            })
            .collect();
        hits.sort_by(|a, b| a.fraction.total_cmp(&b.fraction));
        hits
    }

    fn fixtures_of(&self, body: Entity) -> Vec<Entity> {
        self.fixtures(body)
            .map(|fixtures| fixtures.iter().map(|fixture| fixture.entity).collect())
            .unwrap_or_default()
    }

    fn body_extent(&self, body: Entity) -> Option<Rect> {
        self.fixtures(body)?
            .iter()
            .map(|fixture| fixture.area)
            .reduce(|a, b| a.union(b))
    }

    fn is_disappearing(&self, fixture: Entity) -> bool {
        self.disappearing.contains(fixture)
    }

    fn mark_disappearing(&mut self, fixture: Entity) {
        self.disappearing.mark(fixture);
    }

    fn remove_body(&mut self, body: Entity) {
        let Some(index) = self.bodies.iter().position(|(entity, _)| *entity == body) else {
            return;
        };
        let (_, fixtures) = self.bodies.remove(index);
        self.disappearing
            .forget(fixtures.iter().map(|fixture| fixture.entity));
        self.removed.push(body);
    }
}

impl EffectStage for SandboxWorld {
    fn spawn_visual(&mut self, visual: Visual) -> Entity {
        let handle = self.allocate();
        self.visuals.insert(
            handle,
            SandboxVisual {
                visual,
                visible: true,
            },
        );
        handle
    }

    fn update_visual(&mut self, handle: Entity, visual: Visual) {
        if let Some(entry) = self.visuals.get_mut(&handle) {
            entry.visual = visual;
        }
    }

    fn set_visible(&mut self, handle: Entity, visible: bool) {
        if let Some(entry) = self.visuals.get_mut(&handle) {
            entry.visible = visible;
        }
    }

    fn despawn_visual(&mut self, handle: Entity) {
        self.visuals.remove(&handle);
    }

    fn play_sound(&mut self, sound: Sfx) {
        self.sounds.push(sound);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::categories;

    fn block(center: Vec2) -> Rect {
        Rect::from_center_size(center, Vec2::splat(10.0))
    }

    #[test]
    fn raycast_orders_hits_and_filters_category() {
        let mut world = SandboxWorld::new();
        let far = world.add_body(&[(block(Vec2::new(80.0, 0.0)), categories::WEAPON_TARGETABLE)]);
        let near = world.add_body(&[(block(Vec2::new(30.0, 0.0)), categories::WEAPON_TARGETABLE)]);
        world.add_body(&[(block(Vec2::new(50.0, 0.0)), categories::GROUND)]);

        let hits = world.raycast(Vec2::ZERO, Vec2::new(100.0, 0.0), categories::WEAPON_TARGETABLE);

        let bodies: Vec<Entity> = hits.iter().map(|hit| hit.body).collect();
        assert_eq!(bodies, vec![near, far]);
        assert!((hits[0].fraction - 0.25).abs() < 1e-5);
    }

    #[test]
    fn raycast_stops_at_segment_end() {
        let mut world = SandboxWorld::new();
        world.add_body(&[(block(Vec2::new(150.0, 0.0)), categories::WEAPON_TARGETABLE)]);
        let hits = world.raycast(Vec2::ZERO, Vec2::new(100.0, 0.0), categories::WEAPON_TARGETABLE);
        assert!(hits.is_empty());
    }

    #[test]
    fn removing_body_clears_its_disappearing_marks() {
        let mut world = SandboxWorld::new();
        let body = world.add_body(&[(block(Vec2::ZERO), categories::WEAPON_TARGETABLE)]);
        let fixture = world.fixtures_of(body)[0];
        world.mark_disappearing(fixture);

        world.remove_body(body);
        world.remove_body(body);

        assert!(!world.is_disappearing(fixture));
        assert!(world.fixtures_of(body).is_empty());
        assert_eq!(world.removed_bodies(), &[body]);
    }
}
