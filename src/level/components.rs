//! Level entity components.

use bevy::prelude::*;

#[derive(Component)]
pub struct Ground;

/// Removable box.
#[derive(Component)]
pub struct Block;

#[derive(Component)]
pub struct Spike;

#[derive(Component)]
pub struct Target;

pub const ENEMY_SPEED: f32 = 25.0;

/// Walks back and forth around its spawn point.
#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy {
    pub origin_x: f32,
    pub patrol: f32,
    /// -1 or 1
    pub heading: f32,
}

impl Enemy {
    pub fn new(origin_x: f32, patrol: f32) -> Self {
        Self {
            origin_x,
            patrol,
            heading: 1.0,
        }
    }

    /// Heading after reaching `x`: turns around at either end of the patrol.
    pub fn turn_at(&mut self, x: f32) -> f32 {
        if x > self.origin_x + self.patrol {
            self.heading = -1.0;
        } else if x < self.origin_x - self.patrol {
            self.heading = 1.0;
        }
        self.heading
    }
}

/// Target collection flash.
#[derive(Component, Debug)]
pub struct CollectBurst {
    pub position: Vec2,
    pub age: f32,
}

pub const COLLECT_BURST_DURATION: f32 = 0.5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enemy_turns_at_patrol_ends() {
        let mut enemy = Enemy::new(100.0, 20.0);
        assert_eq!(enemy.turn_at(110.0), 1.0);
        assert_eq!(enemy.turn_at(121.0), -1.0);
        assert_eq!(enemy.turn_at(100.0), -1.0);
        assert_eq!(enemy.turn_at(79.0), 1.0);
    }
}
