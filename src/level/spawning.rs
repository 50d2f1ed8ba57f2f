//! Entity spawning functions for level construction.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier2d::prelude::*;

use super::components::{Block, Enemy, Ground, Spike, Target};
use super::data::{Area, BlockDef, EnemyDef, LevelDefinition, LevelLibrary};
use super::session::{LevelSession, RestartCarry};
use crate::core::constants::{GAME_HEIGHT, GAME_WIDTH, SPECIAL_DEPTH};
use crate::core::{GameState, LevelEntity, SelectedLevel};
use crate::physics::{categories, BodyExtent};
use crate::player::{spawn_player, PlayerConfig};
use crate::weapons::Loadout;

pub const GROUND_FRICTION: f32 = 1.8;
pub const ENEMY_SIZE: Vec2 = Vec2::new(10.0, 10.0);
pub const TARGET_SIZE: Vec2 = Vec2::new(8.0, 8.0);

const GROUND_COLOR: Color = Color::srgb(0.22, 0.2, 0.25);
const BLOCK_COLOR: Color = Color::srgb(0.45, 0.35, 0.6);
const SPIKE_COLOR: Color = Color::srgb(0.75, 0.2, 0.2);

fn area_sprite(area: &Area, color: Color) -> (Sprite, Transform) {
    let rect = area.rect();
    (
        Sprite::from_color(color, rect.size()),
        Transform::from_translation(rect.center().extend(0.0)),
    )
}

/// Spawn static ground.
pub fn spawn_ground(commands: &mut Commands, area: &Area) {
    let half = area.rect().half_size();
    commands.spawn((
        Ground,
        LevelEntity,
        area_sprite(area, GROUND_COLOR),
        BodyExtent { half_size: half },
        RigidBody::Fixed,
        Collider::cuboid(half.x, half.y),
        Friction::coefficient(GROUND_FRICTION),
        categories::solid(categories::GROUND),
    ));
}

/// Spawn a box the deletion weapon can remove.
pub fn spawn_block(commands: &mut Commands, block: &BlockDef) {
    let half = block.area.rect().half_size();
    let body = if block.dynamic {
        RigidBody::Dynamic
    } else {
        RigidBody::Fixed
    };
    commands.spawn((
        Block,
        LevelEntity,
        area_sprite(&block.area, BLOCK_COLOR),
        BodyExtent { half_size: half },
        body,
        Collider::cuboid(half.x, half.y),
        Friction::coefficient(GROUND_FRICTION),
        categories::solid(categories::GROUND | categories::WEAPON_TARGETABLE),
    ));
}

/// Spawn a spike strip. Touching it kills the player.
pub fn spawn_spike(commands: &mut Commands, area: &Area) {
    let half = area.rect().half_size();
    commands.spawn((
        Spike,
        LevelEntity,
        area_sprite(area, SPIKE_COLOR),
        RigidBody::Fixed,
        Collider::cuboid(half.x, half.y),
        Friction::coefficient(GROUND_FRICTION),
        categories::solid(categories::SPIKE),
        ActiveEvents::COLLISION_EVENTS,
    ));
}

pub fn spawn_enemy(commands: &mut Commands, asset_server: &AssetServer, enemy: &EnemyDef) -> Entity {
    let position = Vec2::new(enemy.position.0, enemy.position.1);
    let half = ENEMY_SIZE / 2.0;
    commands
        .spawn((
            Enemy::new(position.x, enemy.patrol),
            LevelEntity,
            Sprite {
                image: asset_server.load("textures/enemy.png"),
                custom_size: Some(ENEMY_SIZE),
                ..default()
            },
            Transform::from_translation(position.extend(0.5)),
            BodyExtent { half_size: half },
            RigidBody::Dynamic,
            Velocity::zero(),
            LockedAxes::ROTATION_LOCKED,
            Collider::cuboid(half.x, half.y),
            categories::solid(categories::ENEMY | categories::WEAPON_TARGETABLE),
        ))
        .id()
}

/// Spawn a collectible target. Targets are overlap-checked, not simulated.
pub fn spawn_target(commands: &mut Commands, asset_server: &AssetServer, position: Vec2) -> (Entity, Rect) {
    let visual = commands
        .spawn((
            Target,
            LevelEntity,
            Sprite {
                image: asset_server.load("textures/target.png"),
                custom_size: Some(TARGET_SIZE),
                ..default()
            },
            Transform::from_translation(position.extend(SPECIAL_DEPTH)),
        ))
        .id();
    (visual, Rect::from_center_size(position, TARGET_SIZE))
}

/// Spawn everything a level definition describes and register it with
/// `session`.
pub fn populate_level(
    commands: &mut Commands,
    asset_server: &AssetServer,
    level: &LevelDefinition,
    session: &mut LevelSession,
) {
    for area in &level.ground {
        spawn_ground(commands, area);
    }
    for block in &level.blocks {
        spawn_block(commands, block);
    }
    for area in &level.spikes {
        spawn_spike(commands, area);
    }
    for enemy in &level.enemies {
        let body = spawn_enemy(commands, asset_server, enemy);
        session.add_enemy(body);
    }
    for &(x, y) in &level.targets {
        let (visual, area) = spawn_target(commands, asset_server, Vec2::new(x, y));
        session.add_target(visual, area);
    }
}

/// Build the selected level and its session.
#[allow(clippy::too_many_arguments)]
pub fn build_level(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    library: Res<LevelLibrary>,
    selected: Res<SelectedLevel>,
    config: Res<PlayerConfig>,
    carry: Option<Res<RestartCarry>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(level) = library.get(selected.0) else {
        error!("Level {} not found in library!", selected.0);
        next_state.set(GameState::LevelSelect);
        return;
    };

    info!("Building level: {}", level.title);

    let viewport = windows
        .get_single()
        .map(|window| window.size())
        .unwrap_or(Vec2::new(GAME_WIDTH, GAME_HEIGHT));

    let mut session = match carry.as_deref() {
        Some(carry) if carry.level == selected.0 => {
            LevelSession::from_carry(*carry, level.win_condition, viewport)
        }
        _ => {
            let mut session = LevelSession::new(selected.0, level.win_condition);
            session.set_viewport(viewport);
            session
        }
    };
    commands.remove_resource::<RestartCarry>();

    populate_level(&mut commands, &asset_server, level, &mut session);
    spawn_player(
        &mut commands,
        &asset_server,
        level.player_start(),
        &config,
        Loadout(level.loadout()),
    );

    info!(
        "Level {} ready: {} enemies, {} targets",
        selected.0 + 1,
        session.enemies().len(),
        session.targets().len()
    );
    commands.insert_resource(session);
}

/// Despawn the level and drop its session.
pub fn teardown_level(mut commands: Commands, level_query: Query<Entity, With<LevelEntity>>) {
    for entity in level_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<LevelSession>();
}
