//! Per-frame systems driving the level session.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier2d::prelude::*;

use super::components::{CollectBurst, Enemy, Spike, COLLECT_BURST_DURATION, ENEMY_SPEED};
use super::data::LevelLibrary;
use super::session::{LevelSession, SessionState};
use crate::core::{
    DeathCause, GameState, PlayerDied, SelectedLevel, SessionCommand, Sfx, SoundSettings,
};
use crate::physics::{BodyExtent, EffectStage, RapierLevel, Visual};
use crate::player::Player;

/// Run condition: a level session exists.
pub fn session_present(session: Option<Res<LevelSession>>) -> bool {
    session.is_some()
}

/// Run condition: the level is live and not paused, dying or won.
pub fn session_running(session: Option<Res<LevelSession>>) -> bool {
    session.is_some_and(|session| session.is_simulating())
}

fn bounds(transform: &Transform, extent: &BodyExtent) -> Rect {
    Rect::from_center_half_size(transform.translation.truncate(), extent.half_size)
}

/// Map level keys to session commands.
pub fn read_session_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut commands: EventWriter<SessionCommand>,
) {
    if keyboard.just_pressed(KeyCode::F3) {
        commands.send(SessionCommand::ToggleDebugView);
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        commands.send(SessionCommand::Restart);
    }
    if keyboard.any_just_pressed([KeyCode::KeyP, KeyCode::Backspace, KeyCode::Escape]) {
        commands.send(SessionCommand::TogglePause);
    }
}

/// Apply menu and keyboard requests to the session.
pub fn apply_session_commands(
    mut commands: Commands,
    mut requests: EventReader<SessionCommand>,
    mut session: ResMut<LevelSession>,
    mut selected: ResMut<SelectedLevel>,
    mut sound: ResMut<SoundSettings>,
    library: Res<LevelLibrary>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for request in requests.read() {
        if session.state() == SessionState::Restarting {
            break;
        }
        match request {
            SessionCommand::TogglePause => {
                if !session.toggle_pause() {
                    debug!("Pause ignored in {:?}", session.state());
                }
            }
            SessionCommand::ToggleOptions => {
                session.toggle_options();
            }
            SessionCommand::Restart => {
                if let Some(carry) = session.restart() {
                    info!("Restarting level {}", carry.level + 1);
                    commands.insert_resource(carry);
                    next_state.set(GameState::Restarting);
                }
            }
            SessionCommand::BackToSelect => {
                next_state.set(GameState::LevelSelect);
            }
            SessionCommand::ContinueToNext => {
                if session.state() != SessionState::WinMenu {
                    continue;
                }
                let next = session.level + 1;
                if next < library.len() {
                    selected.0 = next;
                    next_state.set(GameState::Restarting);
                } else {
                    info!("Last level finished");
                    next_state.set(GameState::LevelSelect);
                }
            }
            SessionCommand::ToggleSound => {
                sound.enabled = !sound.enabled;
                info!("Sound {}", if sound.enabled { "on" } else { "off" });
            }
            SessionCommand::ToggleDebugView => {}
        }
    }
}

/// Track the window size so menu anchors follow resizes.
pub fn sync_viewport(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut session: ResMut<LevelSession>,
) {
    if let Ok(window) = windows.get_single() {
        session.set_viewport(window.size());
    }
}

/// Stop the physics pipeline whenever the session is not simulating.
pub fn sync_physics_pause(
    session: Res<LevelSession>,
    mut configs: Query<&mut RapierConfiguration>,
) {
    for mut config in configs.iter_mut() {
        if config.physics_pipeline_active != session.is_simulating() {
            config.physics_pipeline_active = session.is_simulating();
        }
    }
}

pub fn step_menus(mut session: ResMut<LevelSession>) {
    session.step_menus();
}

/// Flag enemies that were deleted or fell out of the map.
pub fn refresh_enemies(
    mut session: ResMut<LevelSession>,
    enemies: Query<(&Transform, &BodyExtent), With<Enemy>>,
) {
    session.refresh_enemies(|body| {
        enemies
            .get(body)
            .map_or(true, |(transform, extent)| bounds(transform, extent).max.y < 0.0)
    });
}

/// Kill the player once they drop fully below the map.
pub fn check_player_fall(
    mut session: ResMut<LevelSession>,
    player_query: Query<(Entity, &Transform, &BodyExtent), With<Player>>,
    mut deaths: EventWriter<PlayerDied>,
) {
    let Ok((player, transform, extent)) = player_query.get_single() else {
        return;
    };
    if bounds(transform, extent).max.y < 0.0 && session.kill_player() {
        info!("Player fell out of the map");
        deaths.send(PlayerDied {
            player,
            cause: DeathCause::Fell,
        });
    }
}

/// Kill the player on spike contact.
pub fn check_spike_contact(
    mut collisions: EventReader<CollisionEvent>,
    mut session: ResMut<LevelSession>,
    spikes: Query<(), With<Spike>>,
    players: Query<(), With<Player>>,
    parents: Query<&Parent>,
    mut deaths: EventWriter<PlayerDied>,
) {
    let owner = |collider: Entity| {
        if players.contains(collider) {
            return Some(collider);
        }
        parents
            .get(collider)
            .ok()
            .map(|parent| parent.get())
            .filter(|body| players.contains(*body))
    };

    for collision in collisions.read() {
        let CollisionEvent::Started(a, b, _) = collision else {
            continue;
        };
        let player = if spikes.contains(*a) {
            owner(*b)
        } else if spikes.contains(*b) {
            owner(*a)
        } else {
            None
        };
        let Some(player) = player else {
            continue;
        };
        if session.kill_player() {
            info!("Player hit a spike");
            deaths.send(PlayerDied {
                player,
                cause: DeathCause::Spiked,
            });
        }
    }
}

/// Collect touched targets and open the win menu when the level is done.
pub fn evaluate_win_condition(
    mut session: ResMut<LevelSession>,
    mut level: RapierLevel,
    player_query: Query<(&Transform, &BodyExtent), With<Player>>,
) {
    let Ok((transform, extent)) = player_query.get_single() else {
        return;
    };
    let check = session.evaluate_win(bounds(transform, extent));

    for target in check.collected {
        level.despawn_visual(target.visual);
        let position = target.area.center();
        let burst = level.spawn_visual(Visual::Burst {
            position,
            fade: 0.0,
        });
        level
            .commands()
            .entity(burst)
            .insert(CollectBurst { position, age: 0.0 });
        level.play_sound(Sfx::TargetCollect);
    }

    if check.won {
        info!("Level {} complete", session.level + 1);
    }
}

/// Walk enemies back and forth.
pub fn patrol_enemies(mut enemies: Query<(&Transform, &mut Velocity, &mut Enemy, &mut Sprite)>) {
    for (transform, mut velocity, mut enemy, mut sprite) in enemies.iter_mut() {
        let heading = enemy.turn_at(transform.translation.x);
        velocity.linvel.x = heading * ENEMY_SPEED;
        sprite.flip_x = heading < 0.0;
    }
}

/// Fade and expire target collection flashes.
pub fn age_collect_bursts(
    time: Res<Time>,
    mut level: RapierLevel,
    mut bursts: Query<(Entity, &mut CollectBurst)>,
) {
    for (entity, mut burst) in bursts.iter_mut() {
        burst.age += time.delta_secs();
        if burst.age >= COLLECT_BURST_DURATION {
            level.despawn_visual(entity);
            continue;
        }
        level.update_visual(
            entity,
            Visual::Burst {
                position: burst.position,
                fade: burst.age / COLLECT_BURST_DURATION,
            },
        );
    }
}
