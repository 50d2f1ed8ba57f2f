//! The deletion weapon: a ray that makes targetable bodies disappear.

use bevy::prelude::*;

use super::contract::{Holder, NilWeapon, Selection, Weapon, WeaponIcon};
use super::effects::{
    finish_effects, pause_effects, resume_effects, step_effects, Beam, Effect, Sparkles,
};
use crate::core::Sfx;
use crate::physics::{categories, deletion_candidates, LevelWorld};

pub const DELETE_WEAPON_AMMO: u32 = 1;
pub const DELETE_RANGE: f32 = 400.0;
pub const BEAM_WIDTH: f32 = 5.0;
pub const BEAM_DURATION: f32 = 0.3;
pub const SPARKLE_DURATION: f32 = 0.6;

const SPRITE: &str = "textures/delete_weapon.png";
const ICON: &str = "textures/delete_weapon_icon.png";

/// Size of the sparkle drawn over a body with unknown bounds.
const FALLBACK_SPARKLE: Vec2 = Vec2::splat(6.0);

#[derive(Debug)]
pub struct DeleteWeapon {
    base: NilWeapon,
    beams: Vec<Beam>,
    sparkles: Vec<Sparkles>,
}

impl Default for DeleteWeapon {
    fn default() -> Self {
        Self::with_stock(DELETE_WEAPON_AMMO)
    }
}

impl DeleteWeapon {
    pub fn with_stock(stock: u32) -> Self {
        Self {
            base: NilWeapon::with_stock(stock)
                .with_sprite(SPRITE)
                .with_icon(WeaponIcon::Texture(ICON)),
            beams: Vec::new(),
            sparkles: Vec::new(),
        }
    }

    /// Bodies currently sparkling on their way out.
    pub fn pending_removals(&self) -> Vec<Entity> {
        self.sparkles.iter().map(Sparkles::body).collect()
    }

    pub fn live_effects(&self) -> usize {
        self.beams.len() + self.sparkles.len()
    }
}

impl Weapon for DeleteWeapon {
    fn name(&self) -> &'static str {
        "delete"
    }

    fn on_add(&mut self, owner: Entity, world: &mut dyn LevelWorld) {
        self.base.on_add(owner, world);
    }

    fn on_change(&mut self, change: Selection, world: &mut dyn LevelWorld) {
        self.base.on_change(change, world);
    }

    fn fire(&mut self, holder: &Holder, target: Vec2, _energy: f32, world: &mut dyn LevelWorld) {
        let origin = holder.position + holder.grip;
        let direction = (target - origin).try_normalize().unwrap_or_else(|| holder.facing());
        let ray = direction * DELETE_RANGE;

        let mut beam = Beam::spawn(origin, direction, DELETE_RANGE, BEAM_WIDTH, BEAM_DURATION, world);
        if self.base.is_paused() {
            beam.clock_mut().pause();
        }
        self.beams.push(beam);

        // The query completes before any fixture is marked.
        let hits = world.raycast(origin, ray, categories::WEAPON_TARGETABLE);
        let candidates = deletion_candidates(&*world, origin, ray, &hits);

        for (body, contact) in candidates {
            for fixture in world.fixtures_of(body) {
                world.mark_disappearing(fixture);
            }
            let area = world
                .body_extent(body)
                .unwrap_or_else(|| Rect::from_center_size(contact, FALLBACK_SPARKLE));
            let mut sparkles = Sparkles::spawn(body, area, SPARKLE_DURATION, world);
            if self.base.is_paused() {
                sparkles.clock_mut().pause();
            }
            self.sparkles.push(sparkles);
        }

        self.base.spend_ammo();
        world.play_sound(Sfx::Shoot);
    }

    fn update(&mut self, holder: &Holder, dt: f32, world: &mut dyn LevelWorld) {
        if self.base.is_paused() {
            return;
        }
        step_effects(&mut self.beams, dt, world);
        step_effects(&mut self.sparkles, dt, world);
        self.base.update(holder, dt, world);
    }

    fn pause(&mut self) {
        self.base.pause();
        pause_effects(&mut self.beams);
        pause_effects(&mut self.sparkles);
    }

    fn resume(&mut self) {
        self.base.resume();
        resume_effects(&mut self.beams);
        resume_effects(&mut self.sparkles);
    }

    fn is_paused(&self) -> bool {
        self.base.is_paused()
    }

    fn ammo(&self) -> u32 {
        self.base.ammo()
    }

    fn inventory_icon(&self) -> WeaponIcon {
        self.base.inventory_icon()
    }

    fn terminate(&mut self, world: &mut dyn LevelWorld) {
        finish_effects(&mut self.beams, world);
        // Bodies under a sparkle are already committed; finishing removes them.
        finish_effects(&mut self.sparkles, world);
        self.base.terminate(world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{PhysicsWorld, SandboxWorld, Visual};

    fn holder() -> Holder {
        Holder {
            position: Vec2::ZERO,
            grip: Vec2::ZERO,
            flipped: false,
        }
    }

    fn crate_at(world: &mut SandboxWorld, x: f32) -> Entity {
        world.add_body(&[(
            Rect::from_center_size(Vec2::new(x, 0.0), Vec2::splat(10.0)),
            categories::WEAPON_TARGETABLE,
        )])
    }

    fn armed(world: &mut SandboxWorld, stock: u32) -> DeleteWeapon {
        let mut weapon = DeleteWeapon::with_stock(stock);
        weapon.on_add(Entity::from_raw(900), world);
        weapon
    }

    #[test]
    fn miss_spawns_beam_only_and_still_costs_ammo() {
        let mut world = SandboxWorld::new();
        world.add_body(&[(
            Rect::from_center_size(Vec2::new(50.0, 0.0), Vec2::splat(10.0)),
            categories::GROUND,
        )]);
        let mut weapon = armed(&mut world, 3);

        weapon.fire(&holder(), Vec2::new(10.0, 0.0), 1.0, &mut world);

        assert_eq!(weapon.ammo(), 2);
        assert!(weapon.pending_removals().is_empty());
        assert_eq!(world.count_visuals(|v| matches!(v, Visual::Beam { .. })), 1);
        assert_eq!(world.count_visuals(|v| matches!(v, Visual::Sparkles { .. })), 0);
    }

    #[test]
    fn multi_fixture_body_is_processed_once() {
        let mut world = SandboxWorld::new();
        let body = world.add_body(&[
            (
                Rect::from_center_size(Vec2::new(40.0, 0.0), Vec2::splat(10.0)),
                categories::WEAPON_TARGETABLE,
            ),
            (
                Rect::from_center_size(Vec2::new(60.0, 0.0), Vec2::splat(10.0)),
                categories::WEAPON_TARGETABLE,
            ),
        ]);
        let mut weapon = armed(&mut world, 3);

        weapon.fire(&holder(), Vec2::new(100.0, 0.0), 1.0, &mut world);

        assert_eq!(weapon.pending_removals(), vec![body]);
        assert!(world
            .fixtures_of(body)
            .iter()
            .all(|fixture| world.is_disappearing(*fixture)));
    }

    #[test]
    fn every_body_on_the_ray_goes_for_one_ammo() {
        let mut world = SandboxWorld::new();
        let near = crate_at(&mut world, 30.0);
        let far = crate_at(&mut world, 60.0);
        let mut weapon = armed(&mut world, 3);

        weapon.fire(&holder(), Vec2::new(100.0, 0.0), 1.0, &mut world);

        assert_eq!(weapon.ammo(), 2);
        assert_eq!(weapon.pending_removals(), vec![near, far]);
        assert_eq!(world.count_visuals(|v| matches!(v, Visual::Sparkles { .. })), 2);
    }

    #[test]
    fn ray_leaves_from_the_grip() {
        let mut world = SandboxWorld::new();
        let level = crate_at(&mut world, 50.0);
        let raised = world.add_body(&[(
            Rect::from_center_size(Vec2::new(50.0, 20.0), Vec2::splat(10.0)),
            categories::WEAPON_TARGETABLE,
        )]);
        let mut weapon = armed(&mut world, 1);
        let holder = Holder {
            grip: Vec2::new(0.0, 20.0),
            ..holder()
        };

        weapon.fire(&holder, Vec2::new(100.0, 20.0), 1.0, &mut world);

        assert_eq!(weapon.pending_removals(), vec![raised]);
        assert!(!weapon.pending_removals().contains(&level));
        let beam = world
            .visual_handles()
            .into_iter()
            .find_map(|handle| match world.visual(handle) {
                Some(Visual::Beam { center, .. }) => Some(*center),
                _ => None,
            });
        assert_eq!(beam, Some(Vec2::new(DELETE_RANGE / 2.0, 20.0)));
    }

    #[test]
    fn disappearing_body_is_not_reselected() {
        let mut world = SandboxWorld::new();
        let body = crate_at(&mut world, 50.0);
        let mut weapon = armed(&mut world, 3);

        weapon.fire(&holder(), Vec2::new(100.0, 0.0), 1.0, &mut world);
        weapon.fire(&holder(), Vec2::new(100.0, 0.0), 1.0, &mut world);

        assert_eq!(weapon.pending_removals(), vec![body]);
        assert_eq!(weapon.ammo(), 1);
    }

    #[test]
    fn body_removed_when_sparkles_end() {
        let mut world = SandboxWorld::new();
        let body = crate_at(&mut world, 50.0);
        let mut weapon = armed(&mut world, 1);

        weapon.fire(&holder(), Vec2::new(100.0, 0.0), 1.0, &mut world);
        weapon.update(&holder(), 0.4, &mut world);
        assert!(world.contains_body(body));

        weapon.update(&holder(), 0.4, &mut world);
        assert!(!world.contains_body(body));
        assert_eq!(weapon.live_effects(), 0);
    }

    #[test]
    fn paused_weapon_holds_its_effects() {
        let mut world = SandboxWorld::new();
        let body = crate_at(&mut world, 50.0);
        let mut weapon = armed(&mut world, 1);

        weapon.fire(&holder(), Vec2::new(100.0, 0.0), 1.0, &mut world);
        weapon.pause();
        weapon.update(&holder(), 10.0, &mut world);
        assert!(world.contains_body(body));

        weapon.resume();
        weapon.update(&holder(), 1.0, &mut world);
        assert!(!world.contains_body(body));
    }

    #[test]
    fn zero_length_aim_fires_along_facing() {
        let mut world = SandboxWorld::new();
        let body = crate_at(&mut world, -50.0);
        let mut weapon = armed(&mut world, 1);
        let left = Holder {
            flipped: true,
            ..holder()
        };

        weapon.fire(&left, Vec2::ZERO, 1.0, &mut world);

        assert_eq!(weapon.pending_removals(), vec![body]);
    }
}
