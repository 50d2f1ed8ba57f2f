//! Manual interpolation helpers for camera and menu movement.
//!
//! There is no animation system: callers keep `(current, target, rate)` and
//! step it every frame, recomputing the target as they go.

use bevy::prelude::*;

/// Move `current` a fraction of the remaining way toward `target`.
pub fn approach(current: Vec2, target: Vec2, factor: f32) -> Vec2 {
    current + (target - current) * factor.clamp(0.0, 1.0)
}

/// Frame-time scaled factor, capped so a long frame never overshoots.
pub fn timed_factor(speed: f32, dt: f32) -> f32 {
    (speed * dt).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approach_moves_fraction_of_gap() {
        let next = approach(Vec2::ZERO, Vec2::new(100.0, -50.0), 0.1);
        assert_eq!(next, Vec2::new(10.0, -5.0));
    }

    #[test]
    fn long_frame_lands_on_target() {
        let factor = timed_factor(10.0, 0.5);
        assert_eq!(factor, 1.0);
        assert_eq!(approach(Vec2::ONE, Vec2::splat(3.0), factor), Vec2::splat(3.0));
    }
}
