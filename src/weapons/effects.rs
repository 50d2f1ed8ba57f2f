//! Short-lived, self-terminating visual effects owned by weapons.

use std::mem;

use bevy::prelude::*;

use crate::physics::{LevelWorld, Visual};

/// Age and pause bookkeeping shared by every effect.
#[derive(Debug, Clone)]
pub struct EffectClock {
    age: f32,
    duration: f32,
    paused: bool,
    /// Flag to restore on the next owner-driven `resume`.
    saved: Option<bool>,
}

impl EffectClock {
    pub fn new(duration: f32) -> Self {
        Self {
            age: 0.0,
            duration,
            paused: false,
            saved: None,
        }
    }

    /// Advance by `dt` unless paused.
    pub fn tick(&mut self, dt: f32) {
        if !self.paused {
            self.age += dt;
        }
    }

    /// Elapsed share of the lifetime, 0 to 1.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.age / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_done(&self) -> bool {
        self.age >= self.duration
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause or unpause this effect alone.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Owner-driven pause; remembers the flag it overrides.
    pub fn pause(&mut self) {
        if self.saved.is_none() {
            self.saved = Some(self.paused);
        }
        self.paused = true;
    }

    /// Undo the owner-driven pause, restoring the remembered flag.
    pub fn resume(&mut self) {
        if let Some(previous) = self.saved.take() {
            self.paused = previous;
        }
    }
}

/// Something with a clock and a visual that tears itself down at the end.
pub trait Effect {
    fn clock(&self) -> &EffectClock;

    fn clock_mut(&mut self) -> &mut EffectClock;

    /// Push this frame's look to the stage.
    fn redraw(&self, world: &mut dyn LevelWorld);

    /// Release everything the effect owns. Consumes the effect, so it can only
    /// happen once.
    fn finish(self, world: &mut dyn LevelWorld);
}

/// Age every effect, redraw the live ones and finish the expired ones.
pub fn step_effects<E: Effect>(effects: &mut Vec<E>, dt: f32, world: &mut dyn LevelWorld) {
    for effect in effects.iter_mut() {
        effect.clock_mut().tick(dt);
    }
    let (done, alive): (Vec<E>, Vec<E>) = mem::take(effects)
        .into_iter()
        .partition(|effect| effect.clock().is_done());
    for effect in done {
        effect.finish(world);
    }
    for effect in &alive {
        effect.redraw(world);
    }
    *effects = alive;
}

pub fn pause_effects<E: Effect>(effects: &mut [E]) {
    for effect in effects {
        effect.clock_mut().pause();
    }
}

pub fn resume_effects<E: Effect>(effects: &mut [E]) {
    for effect in effects {
        effect.clock_mut().resume();
    }
}

pub fn finish_effects<E: Effect>(effects: &mut Vec<E>, world: &mut dyn LevelWorld) {
    for effect in effects.drain(..) {
        effect.finish(world);
    }
}

/// Deletion ray flash. Narrows from its full width to nothing.
#[derive(Debug)]
pub struct Beam {
    clock: EffectClock,
    visual: Entity,
    center: Vec2,
    angle: f32,
    length: f32,
    width: f32,
}

impl Beam {
    pub fn spawn(
        origin: Vec2,
        direction: Vec2,
        length: f32,
        width: f32,
        duration: f32,
        world: &mut dyn LevelWorld,
    ) -> Self {
        let center = origin + direction * length / 2.0;
        let angle = direction.to_angle();
        let visual = world.spawn_visual(Visual::Beam {
            center,
            angle,
            length,
            width,
        });
        Self {
            clock: EffectClock::new(duration),
            visual,
            center,
            angle,
            length,
            width,
        }
    }

    pub fn current_width(&self) -> f32 {
        self.width * (1.0 - self.clock.progress())
    }
}

impl Effect for Beam {
    fn clock(&self) -> &EffectClock {
        &self.clock
    }

    fn clock_mut(&mut self) -> &mut EffectClock {
        &mut self.clock
    }

    fn redraw(&self, world: &mut dyn LevelWorld) {
        world.update_visual(
            self.visual,
            Visual::Beam {
                center: self.center,
                angle: self.angle,
                length: self.length,
                width: self.current_width(),
            },
        );
    }

    fn finish(self, world: &mut dyn LevelWorld) {
        world.despawn_visual(self.visual);
    }
}

/// Disappearance sparkle over a body. Removes the body when it ends, however
/// it ends.
#[derive(Debug)]
pub struct Sparkles {
    clock: EffectClock,
    visual: Entity,
    body: Entity,
    area: Rect,
}

impl Sparkles {
    pub fn spawn(body: Entity, area: Rect, duration: f32, world: &mut dyn LevelWorld) -> Self {
        let visual = world.spawn_visual(Visual::Sparkles { area, fade: 0.0 });
        Self {
            clock: EffectClock::new(duration),
            visual,
            body,
            area,
        }
    }

    pub fn body(&self) -> Entity {
        self.body
    }
}

impl Effect for Sparkles {
    fn clock(&self) -> &EffectClock {
        &self.clock
    }

    fn clock_mut(&mut self) -> &mut EffectClock {
        &mut self.clock
    }

    fn redraw(&self, world: &mut dyn LevelWorld) {
        world.update_visual(
            self.visual,
            Visual::Sparkles {
                area: self.area,
                fade: self.clock.progress(),
            },
        );
    }

    fn finish(self, world: &mut dyn LevelWorld) {
        world.despawn_visual(self.visual);
        world.remove_body(self.body);
    }
}

/// Base weapon shot line, fading out.
#[derive(Debug)]
pub struct Trace {
    clock: EffectClock,
    visual: Entity,
    from: Vec2,
    to: Vec2,
    color: Color,
}

impl Trace {
    pub fn spawn(from: Vec2, to: Vec2, color: Color, duration: f32, world: &mut dyn LevelWorld) -> Self {
        let visual = world.spawn_visual(Visual::Trace { from, to, color });
        Self {
            clock: EffectClock::new(duration),
            visual,
            from,
            to,
            color,
        }
    }
}

impl Effect for Trace {
    fn clock(&self) -> &EffectClock {
        &self.clock
    }

    fn clock_mut(&mut self) -> &mut EffectClock {
        &mut self.clock
    }

    fn redraw(&self, world: &mut dyn LevelWorld) {
        world.update_visual(
            self.visual,
            Visual::Trace {
                from: self.from,
                to: self.to,
                color: self.color.with_alpha(1.0 - self.clock.progress()),
            },
        );
    }

    fn finish(self, world: &mut dyn LevelWorld) {
        world.despawn_visual(self.visual);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{categories, SandboxWorld};

    #[test]
    fn paused_clock_does_not_age() {
        let mut clock = EffectClock::new(1.0);
        clock.tick(0.25);
        clock.pause();
        clock.tick(5.0);
        assert!(!clock.is_done());
        clock.resume();
        clock.tick(0.75);
        assert!(clock.is_done());
    }

    #[test]
    fn resume_restores_individual_pause() {
        let mut clock = EffectClock::new(1.0);
        clock.set_paused(true);
        clock.pause();
        clock.pause();
        clock.resume();
        assert!(clock.is_paused());
    }

    #[test]
    fn beam_narrows_then_despawns() {
        let mut world = SandboxWorld::new();
        let mut beams = vec![Beam::spawn(Vec2::ZERO, Vec2::X, 400.0, 5.0, 0.3, &mut world)];

        step_effects(&mut beams, 0.15, &mut world);
        assert!((beams[0].current_width() - 2.5).abs() < 1e-4);

        step_effects(&mut beams, 0.2, &mut world);
        assert!(beams.is_empty());
        assert_eq!(world.visual_count(), 0);
    }

    #[test]
    fn sparkles_remove_body_when_finished_early() {
        let mut world = SandboxWorld::new();
        let body = world.add_body(&[(
            Rect::from_center_size(Vec2::ZERO, Vec2::splat(8.0)),
            categories::WEAPON_TARGETABLE,
        )]);
        let mut sparkles = vec![Sparkles::spawn(body, Rect::default(), 0.6, &mut world)];

        finish_effects(&mut sparkles, &mut world);

        assert!(!world.contains_body(body));
        assert_eq!(world.visual_count(), 0);
    }
}
