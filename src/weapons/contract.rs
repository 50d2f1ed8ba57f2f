//! The weapon contract and the base weapon every variant builds on.

use bevy::prelude::*;

use super::effects::{finish_effects, pause_effects, resume_effects, step_effects, Effect, Trace};
use crate::core::Sfx;
use crate::physics::{LevelWorld, Visual};

/// Starting ammo of the base weapon.
pub const DEFAULT_WEAPON_AMMO: u32 = 10;

/// Offset of the held sprite from the holder's grip point, for a holder
/// facing right.
pub const HELD_OFFSET: Vec2 = Vec2::new(5.0, -2.0);

const TRACE_DURATION: f32 = 0.15;

/// Direction of an inventory selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Selected,
    Deselected,
}

/// How a weapon shows up in the inventory bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeaponIcon {
    Fill(Color),
    Texture(&'static str),
}

/// Where the weapon is being held from this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Holder {
    pub position: Vec2,
    /// Offset from `position` to the hand.
    pub grip: Vec2,
    /// Facing left.
    pub flipped: bool,
}

impl Holder {
    pub fn facing(&self) -> Vec2 {
        if self.flipped {
            Vec2::NEG_X
        } else {
            Vec2::X
        }
    }

    /// World position of the held sprite.
    pub fn held_position(&self) -> Vec2 {
        let offset = if self.flipped {
            Vec2::new(-HELD_OFFSET.x, HELD_OFFSET.y)
        } else {
            HELD_OFFSET
        };
        self.position + self.grip + offset
    }
}

/// Anything the player can carry in the inventory and fire.
///
/// Every method taking a `LevelWorld` may spawn, update or release visuals on
/// it; only `fire` and the effects it starts may touch physics bodies.
pub trait Weapon: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Bind to `owner`, reset ammo and create the (hidden) held visual.
    fn on_add(&mut self, owner: Entity, world: &mut dyn LevelWorld);

    fn on_change(&mut self, change: Selection, world: &mut dyn LevelWorld);

    fn on_die(&mut self, world: &mut dyn LevelWorld) {
        self.terminate(world);
    }

    /// Activate toward `target`. `energy` is clamped to `[0, 1]`.
    fn fire(&mut self, holder: &Holder, target: Vec2, energy: f32, world: &mut dyn LevelWorld);

    /// Age owned effects and follow the holder. Does nothing while paused.
    fn update(&mut self, holder: &Holder, dt: f32, world: &mut dyn LevelWorld);

    fn pause(&mut self);

    fn resume(&mut self);

    fn is_paused(&self) -> bool;

    fn ammo(&self) -> u32;

    fn inventory_icon(&self) -> WeaponIcon;

    /// Release every owned effect and the held visual. Idempotent.
    fn terminate(&mut self, world: &mut dyn LevelWorld);
}

/// Base weapon: draws a fading line to the target and spends one ammo.
#[derive(Debug)]
pub struct NilWeapon {
    owner: Option<Entity>,
    stock: u32,
    ammo: u32,
    paused: bool,
    sprite: Option<&'static str>,
    icon: WeaponIcon,
    held: Option<Entity>,
    traces: Vec<Trace>,
}

impl Default for NilWeapon {
    fn default() -> Self {
        Self::with_stock(DEFAULT_WEAPON_AMMO)
    }
}

impl NilWeapon {
    pub fn with_stock(stock: u32) -> Self {
        Self {
            owner: None,
            stock,
            ammo: stock,
            paused: false,
            sprite: None,
            icon: WeaponIcon::Fill(Color::srgb(0.55, 0.55, 0.6)),
            held: None,
            traces: Vec::new(),
        }
    }

    /// Show `texture` in the holder's hand while selected.
    pub fn with_sprite(mut self, texture: &'static str) -> Self {
        self.sprite = Some(texture);
        self
    }

    pub fn with_icon(mut self, icon: WeaponIcon) -> Self {
        self.icon = icon;
        self
    }

    pub fn owner(&self) -> Option<Entity> {
        self.owner
    }

    pub(crate) fn spend_ammo(&mut self) {
        self.ammo = self.ammo.saturating_sub(1);
    }

    fn place_held(&self, holder: &Holder, world: &mut dyn LevelWorld) {
        let (Some(handle), Some(texture)) = (self.held, self.sprite) else {
            return;
        };
        world.update_visual(
            handle,
            Visual::Held {
                position: holder.held_position(),
                flip: holder.flipped,
                texture,
            },
        );
    }
}

impl Weapon for NilWeapon {
    fn name(&self) -> &'static str {
        "default"
    }

    fn on_add(&mut self, owner: Entity, world: &mut dyn LevelWorld) {
        self.owner = Some(owner);
        self.ammo = self.stock;
        if let (None, Some(texture)) = (self.held, self.sprite) {
            let handle = world.spawn_visual(Visual::Held {
                position: Vec2::ZERO,
                flip: false,
                texture,
            });
            world.set_visible(handle, false);
            self.held = Some(handle);
        }
    }

    fn on_change(&mut self, change: Selection, world: &mut dyn LevelWorld) {
        if let Some(handle) = self.held {
            world.set_visible(handle, change == Selection::Selected);
        }
    }

    fn fire(&mut self, holder: &Holder, target: Vec2, energy: f32, world: &mut dyn LevelWorld) {
        let energy = energy.clamp(0.0, 1.0);
        let tint = Color::srgb(1.0, 1.0 - energy, 1.0 - energy);
        let mut trace = Trace::spawn(holder.position, target, tint, TRACE_DURATION, world);
        if self.paused {
            trace.clock_mut().pause();
        }
        self.traces.push(trace);
        self.spend_ammo();
        world.play_sound(Sfx::Shoot);
    }

    fn update(&mut self, holder: &Holder, dt: f32, world: &mut dyn LevelWorld) {
        if self.paused {
            return;
        }
        step_effects(&mut self.traces, dt, world);
        self.place_held(holder, world);
    }

    fn pause(&mut self) {
        self.paused = true;
        pause_effects(&mut self.traces);
    }

    fn resume(&mut self) {
        self.paused = false;
        resume_effects(&mut self.traces);
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn ammo(&self) -> u32 {
        self.ammo
    }

    fn inventory_icon(&self) -> WeaponIcon {
        self.icon
    }

    fn terminate(&mut self, world: &mut dyn LevelWorld) {
        finish_effects(&mut self.traces, world);
        if let Some(handle) = self.held.take() {
            world.despawn_visual(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::SandboxWorld;

    #[test]
    fn held_offset_mirrors_with_facing() {
        let holder = Holder {
            position: Vec2::new(100.0, 50.0),
            grip: Vec2::new(0.0, 2.0),
            flipped: true,
        };
        assert_eq!(holder.held_position(), Vec2::new(95.0, 50.0));
        assert_eq!(holder.facing(), Vec2::NEG_X);
    }

    #[test]
    fn base_fire_draws_trace_and_saturates_ammo() {
        let mut world = SandboxWorld::new();
        let mut weapon = NilWeapon::with_stock(1);
        assert_eq!(weapon.owner(), None);
        weapon.on_add(Entity::from_raw(900), &mut world);
        assert_eq!(weapon.owner(), Some(Entity::from_raw(900)));
        let holder = Holder {
            position: Vec2::ZERO,
            grip: Vec2::ZERO,
            flipped: false,
        };

        weapon.fire(&holder, Vec2::new(30.0, 0.0), 2.0, &mut world);
        weapon.fire(&holder, Vec2::new(30.0, 0.0), 0.5, &mut world);

        assert_eq!(weapon.ammo(), 0);
        assert_eq!(world.count_visuals(|v| matches!(v, Visual::Trace { .. })), 2);
        assert_eq!(world.sounds(), &[Sfx::Shoot, Sfx::Shoot]);
    }

    #[test]
    fn terminate_twice_releases_once() {
        let mut world = SandboxWorld::new();
        let mut weapon = NilWeapon::default().with_sprite("textures/weapon.png");
        weapon.on_add(Entity::from_raw(900), &mut world);
        assert_eq!(world.visual_count(), 1);

        weapon.terminate(&mut world);
        weapon.terminate(&mut world);

        assert_eq!(world.visual_count(), 0);
    }
}
