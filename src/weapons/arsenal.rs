//! The player's weapon roster and current selection.

use bevy::prelude::*;
use serde::Deserialize;

use super::contract::{Holder, NilWeapon, Selection, Weapon, WeaponIcon};
use super::deletion::DeleteWeapon;
use crate::physics::LevelWorld;

/// Weapon variants a level can hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum WeaponKind {
    Default,
    Delete,
}

impl WeaponKind {
    /// Build a fresh weapon, overriding its starting ammo if given.
    pub fn build(self, ammo: Option<u32>) -> Box<dyn Weapon> {
        match (self, ammo) {
            (WeaponKind::Default, Some(stock)) => Box::new(NilWeapon::with_stock(stock)),
            (WeaponKind::Default, None) => Box::new(NilWeapon::default()),
            (WeaponKind::Delete, Some(stock)) => Box::new(DeleteWeapon::with_stock(stock)),
            (WeaponKind::Delete, None) => Box::new(DeleteWeapon::default()),
        }
    }
}

/// Weapons waiting to be handed to their owner once a `LevelWorld` is at hand.
#[derive(Component, Debug, Clone, Default)]
pub struct Loadout(pub Vec<(WeaponKind, Option<u32>)>);

/// Ordered weapon roster with one selected slot.
#[derive(Component, Default)]
pub struct Arsenal {
    weapons: Vec<Box<dyn Weapon>>,
    current: usize,
    paused: bool,
}

impl Arsenal {
    /// Append `weapon`. The first weapon added becomes the selection.
    pub fn add(&mut self, owner: Entity, mut weapon: Box<dyn Weapon>, world: &mut dyn LevelWorld) {
        weapon.on_add(owner, world);
        if self.weapons.is_empty() {
            weapon.on_change(Selection::Selected, world);
        }
        if self.paused {
            weapon.pause();
        }
        self.weapons.push(weapon);
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_weapon(&self) -> Option<&dyn Weapon> {
        self.weapons.get(self.current).map(|weapon| weapon.as_ref())
    }

    /// Select slot `index`, wrapping around either end.
    pub fn select(&mut self, index: isize, world: &mut dyn LevelWorld) {
        if self.weapons.is_empty() {
            return;
        }
        let next = index.rem_euclid(self.weapons.len() as isize) as usize;
        if next == self.current {
            return;
        }
        self.weapons[self.current].on_change(Selection::Deselected, world);
        self.current = next;
        self.weapons[self.current].on_change(Selection::Selected, world);
    }

    /// Move the selection `step` slots, wrapping.
    pub fn cycle(&mut self, step: isize, world: &mut dyn LevelWorld) {
        self.select(self.current as isize + step, world);
    }

    /// Fire the selected weapon. Refused when it has no ammo left.
    pub fn fire(&mut self, holder: &Holder, target: Vec2, energy: f32, world: &mut dyn LevelWorld) -> bool {
        let Some(weapon) = self.weapons.get_mut(self.current) else {
            return false;
        };
        if weapon.ammo() == 0 {
            return false;
        }
        weapon.fire(holder, target, energy, world);
        true
    }

    pub fn update(&mut self, holder: &Holder, dt: f32, world: &mut dyn LevelWorld) {
        if self.paused {
            return;
        }
        for weapon in &mut self.weapons {
            weapon.update(holder, dt, world);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        for weapon in &mut self.weapons {
            weapon.pause();
        }
    }

    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        for weapon in &mut self.weapons {
            weapon.resume();
        }
    }

    pub fn on_die(&mut self, world: &mut dyn LevelWorld) {
        for weapon in &mut self.weapons {
            weapon.on_die(world);
        }
    }

    pub fn terminate(&mut self, world: &mut dyn LevelWorld) {
        for weapon in &mut self.weapons {
            weapon.terminate(world);
        }
    }

    pub fn ammo_counts(&self) -> Vec<u32> {
        self.weapons.iter().map(|weapon| weapon.ammo()).collect()
    }

    pub fn icons(&self) -> Vec<WeaponIcon> {
        self.weapons.iter().map(|weapon| weapon.inventory_icon()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::SandboxWorld;

    fn stocked(world: &mut SandboxWorld) -> Arsenal {
        let mut arsenal = Arsenal::default();
        let owner = Entity::from_raw(900);
        arsenal.add(owner, WeaponKind::Default.build(Some(2)), world);
        arsenal.add(owner, WeaponKind::Delete.build(None), world);
        arsenal.add(owner, WeaponKind::Default.build(Some(0)), world);
        arsenal
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut world = SandboxWorld::new();
        let mut arsenal = stocked(&mut world);

        arsenal.cycle(-1, &mut world);
        assert_eq!(arsenal.current(), 2);
        arsenal.cycle(1, &mut world);
        assert_eq!(arsenal.current(), 0);
        arsenal.select(4, &mut world);
        assert_eq!(arsenal.current(), 1);
        assert_eq!(arsenal.current_weapon().map(|weapon| weapon.name()), Some("delete"));
    }

    #[test]
    fn empty_weapon_refuses_to_fire() {
        let mut world = SandboxWorld::new();
        let mut arsenal = stocked(&mut world);
        let holder = Holder {
            position: Vec2::ZERO,
            grip: Vec2::ZERO,
            flipped: false,
        };

        arsenal.select(2, &mut world);
        assert!(!arsenal.fire(&holder, Vec2::X, 1.0, &mut world));
        assert!(world.sounds().is_empty());

        arsenal.select(0, &mut world);
        assert!(arsenal.fire(&holder, Vec2::X, 1.0, &mut world));
        assert_eq!(arsenal.ammo_counts(), vec![1, 1, 0]);
    }

    #[test]
    fn only_selected_held_sprite_is_visible() {
        let mut world = SandboxWorld::new();
        let mut arsenal = stocked(&mut world);
        // Only the deletion weapon carries a held sprite.
        assert_eq!(world.visual_count(), 1);
        let held = world.visual_handles()[0];
        assert!(!world.is_visible(held));

        arsenal.select(1, &mut world);
        assert!(world.is_visible(held));
    }
}
