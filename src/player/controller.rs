//! Side-view player body and controls.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use crate::core::constants::PLAYER_DEPTH;
use crate::core::{LevelEntity, PlaySound, Sfx};
use crate::physics::{categories, BodyExtent};
use crate::weapons::{Arsenal, Loadout, Trigger};

/// New horizontal velocity after one frame of input.
///
/// Input only accelerates while the body is below `max_speed` in the input
/// direction; it never brakes.
pub fn steer(vx: f32, input: f32, acceleration: f32, max_speed: f32, dt: f32) -> f32 {
    if input > 0.0 && vx < max_speed {
        vx + acceleration * dt
    } else if input < 0.0 && vx > -max_speed {
        vx - acceleration * dt
    } else {
        vx
    }
}

/// Spawn the player body with its three fixtures.
pub fn spawn_player(
    commands: &mut Commands,
    asset_server: &AssetServer,
    position: Vec2,
    config: &PlayerConfig,
    loadout: Loadout,
) -> Entity {
    let size = config.body_size();
    let radius = size.x / 2.0;
    let quarter = size.y / 4.0;
    let density = ColliderMassProperties::Density(config.density);

    commands
        .spawn((
            Player,
            Facing::default(),
            Arsenal::default(),
            Trigger::default(),
            loadout,
            LevelEntity,
            Sprite {
                image: asset_server.load("textures/player.png"),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(position.extend(PLAYER_DEPTH)),
            BodyExtent {
                half_size: size / 2.0,
            },
            // Rapier physics components
            RigidBody::Dynamic,
            Velocity::zero(),
            ExternalImpulse::default(),
            Damping {
                linear_damping: config.linear_damping,
                angular_damping: 0.0,
            },
            LockedAxes::ROTATION_LOCKED,
        ))
        .with_children(|body| {
            body.spawn((
                Collider::ball(radius),
                Transform::from_xyz(0.0, quarter, 0.0),
                Friction::coefficient(0.0),
                Restitution::coefficient(config.restitution),
                density,
                categories::solid(categories::PLAYER),
            ));
            body.spawn((
                Collider::ball(radius),
                Transform::from_xyz(0.0, -quarter, 0.0),
                Friction::coefficient(config.ground_friction),
                Restitution::coefficient(config.restitution),
                density,
                categories::solid(categories::PLAYER | categories::PLAYER_FEET),
            ));
            body.spawn((
                Collider::cuboid(radius, quarter),
                Transform::default(),
                Friction::coefficient(0.0),
                Restitution::coefficient(config.restitution),
                density,
                categories::solid(categories::PLAYER),
            ));
        })
        .id()
}

/// Handle A/D movement and W/Space jumping.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    mut player_query: Query<
        (&mut Velocity, &mut ExternalImpulse, &mut Facing, &mut Sprite),
        With<Player>,
    >,
    mut sounds: EventWriter<PlaySound>,
) {
    let Ok((mut velocity, mut impulse, mut facing, mut sprite)) = player_query.get_single_mut() else {
        return;
    };

    let input = if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        1.0
    } else if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        -1.0
    } else {
        0.0
    };

    velocity.linvel.x = steer(
        velocity.linvel.x,
        input,
        config.acceleration,
        config.max_speed,
        time.delta_secs(),
    );

    if input != 0.0 {
        *facing = if input < 0.0 { Facing::Left } else { Facing::Right };
        sprite.flip_x = facing.is_left();
    }

    // Edge-triggered: holding the key jumps once
    if keyboard.any_just_pressed([KeyCode::KeyW, KeyCode::Space]) {
        impulse.impulse.y += config.jump_impulse;
        sounds.send(PlaySound(Sfx::Jump));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_accelerates_below_max_speed() {
        assert_eq!(steer(0.0, 1.0, 600.0, 80.0, 0.1), 60.0);
        assert_eq!(steer(10.0, -1.0, 600.0, 80.0, 0.1), -50.0);
    }

    #[test]
    fn input_does_not_push_past_max_speed() {
        assert_eq!(steer(80.0, 1.0, 600.0, 80.0, 0.1), 80.0);
        assert_eq!(steer(-90.0, -1.0, 600.0, 80.0, 0.1), -90.0);
    }

    #[test]
    fn no_input_keeps_velocity() {
        assert_eq!(steer(42.0, 0.0, 600.0, 80.0, 0.1), 42.0);
    }

    #[test]
    fn jump_press_applies_one_impulse() {
        let mut app = App::new();
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::Space);
        app.insert_resource(keyboard)
            .init_resource::<Time>()
            .insert_resource(PlayerConfig::default())
            .add_event::<PlaySound>()
            .add_systems(Update, player_movement);
        let player = app
            .world_mut()
            .spawn((
                Player,
                Velocity::zero(),
                ExternalImpulse::default(),
                Facing::default(),
                Sprite::default(),
            ))
            .id();

        app.update();

        let world = app.world();
        let impulse = world.get::<ExternalImpulse>(player).expect("impulse");
        assert_eq!(impulse.impulse, Vec2::new(0.0, PlayerConfig::default().jump_impulse));
        let velocity = world.get::<Velocity>(player).expect("velocity");
        assert_eq!(velocity.linvel, Vec2::ZERO);
        assert_eq!(world.resource::<Events<PlaySound>>().len(), 1);
    }
}
