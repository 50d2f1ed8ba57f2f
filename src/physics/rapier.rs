//! `LevelWorld` backed by the running Bevy world and Rapier context.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

use super::world::{DisappearingFixtures, EffectStage, PhysicsWorld, RayHit, Visual};
use crate::core::constants::{DELETE_RAY_DEPTH, SPECIAL_DEPTH, WEAPON_DEPTH};
use crate::core::{LevelEntity, PlaySound, Sfx};

/// Half extents of a body's bounding box, in its local frame.
///
/// Attached to every body the level spawns so the session and the effects
/// can reason about body bounds without walking collider shapes.
#[derive(Component, Debug, Clone, Copy)]
pub struct BodyExtent {
    pub half_size: Vec2,
}

/// Marker for sprites spawned on behalf of weapons and effects.
#[derive(Component)]
pub struct EffectVisual;

/// Bevy/Rapier implementation of [`PhysicsWorld`] and [`EffectStage`].
///
/// Mutations go through `Commands`, so removals land at the next sync point
/// after the system that issued them.
#[derive(SystemParam)]
pub struct RapierLevel<'w, 's> {
    commands: Commands<'w, 's>,
    context: Query<'w, 's, &'static RapierContext>,
    parents: Query<'w, 's, &'static Parent>,
    children: Query<'w, 's, &'static Children>,
    colliders: Query<'w, 's, (), With<Collider>>,
    rigid_bodies: Query<'w, 's, (), With<RigidBody>>,
    bodies: Query<'w, 's, (&'static GlobalTransform, &'static BodyExtent)>,
    disappearing: ResMut<'w, DisappearingFixtures>,
    sounds: EventWriter<'w, PlaySound>,
    asset_server: Res<'w, AssetServer>,
}

impl<'w, 's> RapierLevel<'w, 's> {
    pub fn commands(&mut self) -> &mut Commands<'w, 's> {
        &mut self.commands
    }

    /// Rigid body a collider belongs to.
    fn owning_body(&self, collider: Entity) -> Entity {
        if self.rigid_bodies.contains(collider) {
            return collider;
        }
        self.parents
            .get(collider)
            .map(|parent| parent.get())
            .unwrap_or(collider)
    }

    fn sprite_for(&self, visual: &Visual) -> (Sprite, Transform) {
        let mut rng = rand::thread_rng();
        match visual {
            Visual::Beam {
                center,
                angle,
                length,
                width,
            } => (
                Sprite::from_color(Color::srgba(1.0, 0.25, 0.3, 0.85), Vec2::new(*length, *width)),
                Transform::from_translation(center.extend(DELETE_RAY_DEPTH))
                    .with_rotation(Quat::from_rotation_z(*angle)),
            ),
            Visual::Sparkles { area, fade } => {
                let jitter = Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
                (
                    Sprite::from_color(Color::srgba(1.0, 1.0, 1.0, 1.0 - fade), area.size()),
                    Transform::from_translation((area.center() + jitter).extend(SPECIAL_DEPTH)),
                )
            }
            Visual::Trace { from, to, color } => {
                let span = *to - *from;
                (
                    Sprite::from_color(*color, Vec2::new(span.length(), 1.0)),
                    Transform::from_translation(((*from + *to) / 2.0).extend(DELETE_RAY_DEPTH))
                        .with_rotation(Quat::from_rotation_z(span.to_angle())),
                )
            }
            Visual::Held {
                position,
                flip,
                texture,
            } => (
                Sprite {
                    image: self.asset_server.load(*texture),
                    flip_x: *flip,
                    ..default()
                },
                Transform::from_translation(position.extend(WEAPON_DEPTH)),
            ),
            Visual::Burst { position, fade } => {
                let size = 8.0 * (1.0 + fade) + rng.gen_range(0.0..2.0);
                (
                    Sprite::from_color(Color::srgba(1.0, 0.84, 0.0, 1.0 - fade), Vec2::splat(size)),
                    Transform::from_translation(position.extend(SPECIAL_DEPTH)),
                )
            }
        }
    }
}

impl PhysicsWorld for RapierLevel<'_, '_> {
    fn raycast(&self, origin: Vec2, ray: Vec2, category: Group) -> Vec<RayHit> {
        let Ok(context) = self.context.get_single() else {
            return Vec::new();
        };
        if ray.length_squared() <= f32::EPSILON {
            return Vec::new();
        }

        let filter = QueryFilter::new().groups(CollisionGroups::new(Group::ALL, category));
        let mut hits = Vec::new();
        // Time of impact is measured in multiples of `ray`, so a max of 1
        // bounds the cast to the segment.
        context.intersections_with_ray(origin, ray, 1.0, true, filter, |fixture, intersection| {
            hits.push(RayHit {
                fixture,
                body: self.owning_body(fixture),
                fraction: intersection.time_of_impact,
            });
            true
        });
        hits.sort_by(|a, b| a.fraction.total_cmp(&b.fraction));
        hits
    }

    fn fixtures_of(&self, body: Entity) -> Vec<Entity> {
        let mut fixtures = Vec::new();
        if self.colliders.contains(body) {
            fixtures.push(body);
        }
        if let Ok(children) = self.children.get(body) {
            fixtures.extend(children.iter().copied().filter(|child| self.colliders.contains(*child)));
        }
        fixtures
    }

    fn body_extent(&self, body: Entity) -> Option<Rect> {
        let (transform, extent) = self.bodies.get(body).ok()?;
        Some(Rect::from_center_half_size(
            transform.translation().truncate(),
            extent.half_size,
        ))
    }

    fn is_disappearing(&self, fixture: Entity) -> bool {
        self.disappearing.contains(fixture)
    }

    fn mark_disappearing(&mut self, fixture: Entity) {
        self.disappearing.mark(fixture);
    }

    fn remove_body(&mut self, body: Entity) {
        let fixtures = self.fixtures_of(body);
        self.disappearing.forget(fixtures);
        if let Some(entity) = self.commands.get_entity(body) {
            entity.despawn_recursive();
        }
    }
}

impl EffectStage for RapierLevel<'_, '_> {
    fn spawn_visual(&mut self, visual: Visual) -> Entity {
        let (sprite, transform) = self.sprite_for(&visual);
        self.commands
            .spawn((sprite, transform, EffectVisual, LevelEntity))
            .id()
    }

    fn update_visual(&mut self, handle: Entity, visual: Visual) {
        let (sprite, transform) = self.sprite_for(&visual);
        if let Some(mut entity) = self.commands.get_entity(handle) {
            entity.insert((sprite, transform));
        }
    }

    fn set_visible(&mut self, handle: Entity, visible: bool) {
        let visibility = if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if let Some(mut entity) = self.commands.get_entity(handle) {
            entity.insert(visibility);
        }
    }

    fn despawn_visual(&mut self, handle: Entity) {
        if let Some(entity) = self.commands.get_entity(handle) {
            entity.despawn_recursive();
        }
    }

    fn play_sound(&mut self, sound: Sfx) {
        self.sounds.send(PlaySound(sound));
    }
}
