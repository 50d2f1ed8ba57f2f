//! Weapon input and per-frame weapon systems.

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::arsenal::{Arsenal, Loadout};
use super::contract::Holder;
use crate::core::PlayerDied;
use crate::level::LevelSession;
use crate::physics::RapierLevel;
use crate::player::{Facing, MainCamera, Player, PlayerConfig};

/// Fire button charge state.
#[derive(Component, Debug, Default)]
pub struct Trigger {
    pub charging: bool,
    /// Charge level, 0 to 1.
    pub energy: f32,
}

fn holder_of(transform: &Transform, facing: Facing, config: &PlayerConfig) -> Holder {
    Holder {
        position: transform.translation.truncate(),
        grip: config.weapon_offset(),
        flipped: facing.is_left(),
    }
}

/// Hand the player the weapons the level grants.
pub fn equip_loadout(
    mut level: RapierLevel,
    mut player_query: Query<(Entity, &Loadout, &mut Arsenal)>,
) {
    for (owner, loadout, mut arsenal) in player_query.iter_mut() {
        for (kind, ammo) in &loadout.0 {
            arsenal.add(owner, kind.build(*ammo), &mut level);
        }
        info!("Equipped {} weapon(s)", arsenal.len());
        level.commands().entity(owner).remove::<Loadout>();
    }
}

/// Keep weapon pause state in step with the session.
pub fn sync_weapon_pause(session: Res<LevelSession>, mut arsenals: Query<&mut Arsenal>) {
    for mut arsenal in arsenals.iter_mut() {
        if session.is_simulating() {
            arsenal.resume();
        } else {
            arsenal.pause();
        }
    }
}

/// Cycle the selection with the mouse wheel or Q/E.
pub fn select_weapon(
    mut wheel: EventReader<MouseWheel>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut level: RapierLevel,
    mut arsenals: Query<&mut Arsenal, With<Player>>,
) {
    let mut step: isize = 0;
    for event in wheel.read() {
        if event.y > 0.0 {
            step -= 1;
        } else if event.y < 0.0 {
            step += 1;
        }
    }
    if keyboard.just_pressed(KeyCode::KeyQ) {
        step -= 1;
    }
    if keyboard.just_pressed(KeyCode::KeyE) {
        step += 1;
    }
    if step == 0 {
        return;
    }
    let Ok(mut arsenal) = arsenals.get_single_mut() else {
        return;
    };
    arsenal.cycle(step, &mut level);
}

/// Charge while the fire button is held; fire at the cursor on release.
#[allow(clippy::too_many_arguments)]
pub fn charge_and_fire(
    mouse: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    interactions: Query<&Interaction>,
    mut level: RapierLevel,
    mut player_query: Query<(&Transform, &Facing, &mut Arsenal, &mut Trigger), With<Player>>,
) {
    let Ok((transform, facing, mut arsenal, mut trigger)) = player_query.get_single_mut() else {
        return;
    };

    if mouse.pressed(MouseButton::Left) {
        let over_ui = interactions.iter().any(|i| *i != Interaction::None);
        if !trigger.charging && over_ui {
            return;
        }
        trigger.charging = true;
        let rate = if config.charge_time > 0.0 {
            time.delta_secs() / config.charge_time
        } else {
            1.0
        };
        trigger.energy = (trigger.energy + rate).min(1.0);
        return;
    }

    let released = trigger.charging && mouse.just_released(MouseButton::Left);
    let energy = trigger.energy;
    trigger.charging = false;
    trigger.energy = 0.0;
    if !released {
        return;
    }

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    let Some(target) = window
        .cursor_position()
        .and_then(|cursor| camera.viewport_to_world_2d(camera_transform, cursor).ok())
    else {
        return;
    };

    let holder = holder_of(transform, *facing, &config);
    if !arsenal.fire(&holder, target, energy, &mut level) {
        debug!("Fire refused: selected weapon is out of ammo");
    }
}

/// Age weapon effects and move held sprites with the player.
pub fn update_weapons(
    time: Res<Time>,
    config: Res<PlayerConfig>,
    mut level: RapierLevel,
    mut player_query: Query<(&Transform, &Facing, &mut Arsenal), With<Player>>,
) {
    for (transform, facing, mut arsenal) in player_query.iter_mut() {
        let holder = holder_of(transform, *facing, &config);
        arsenal.update(&holder, time.delta_secs(), &mut level);
    }
}

/// Weapons of a dead player release everything they own.
pub fn disarm_on_death(
    mut deaths: EventReader<PlayerDied>,
    mut level: RapierLevel,
    mut arsenals: Query<&mut Arsenal>,
) {
    for death in deaths.read() {
        if let Ok(mut arsenal) = arsenals.get_mut(death.player) {
            arsenal.on_die(&mut level);
        }
    }
}

/// Release all weapon-owned effects before the level is torn down.
pub fn disarm_arsenals(mut level: RapierLevel, mut arsenals: Query<&mut Arsenal>) {
    for mut arsenal in arsenals.iter_mut() {
        arsenal.terminate(&mut level);
    }
}
