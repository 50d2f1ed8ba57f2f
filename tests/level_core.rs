//! Headless run-throughs of a level: weapons acting on a sandbox world while
//! the session decides the outcome.

use bevy::prelude::*;
use erasure::level::{LevelSession, SessionState, WinCondition};
use erasure::physics::categories;
use erasure::physics::{PhysicsWorld, SandboxWorld, Visual};
use erasure::ui::InventoryCache;
use erasure::weapons::{Arsenal, Holder, WeaponKind};

fn holder() -> Holder {
    Holder {
        position: Vec2::ZERO,
        grip: Vec2::ZERO,
        flipped: false,
    }
}

fn player_box(x: f32) -> Rect {
    Rect::from_center_size(Vec2::new(x, 10.0), Vec2::new(8.0, 16.0))
}

#[test]
fn deleting_the_floor_under_an_enemy_wins_the_level() {
    let mut world = SandboxWorld::new();
    let floor = world.add_body(&[(
        Rect::from_center_size(Vec2::new(60.0, 0.0), Vec2::new(20.0, 20.0)),
        categories::WEAPON_TARGETABLE | categories::GROUND,
    )]);
    let enemy = world.add_body(&[(
        Rect::from_center_size(Vec2::new(60.0, 15.0), Vec2::splat(10.0)),
        categories::ENEMY,
    )]);

    let mut session = LevelSession::new(1, WinCondition::Enemies);
    session.add_enemy(enemy);

    let owner = Entity::from_raw(500);
    let mut arsenal = Arsenal::default();
    arsenal.add(owner, WeaponKind::Delete.build(Some(1)), &mut world);

    assert!(arsenal.fire(&holder(), Vec2::new(100.0, -2.0), 1.0, &mut world));
    assert_eq!(arsenal.ammo_counts(), vec![0]);
    assert!(world.contains_body(floor));

    // Sparkles outlive the beam; the floor goes when they end.
    arsenal.update(&holder(), 0.7, &mut world);
    assert!(!world.contains_body(floor));
    assert_eq!(world.body_count(), 1);
    assert_eq!(world.count_visuals(|v| matches!(v, Visual::Sparkles { .. })), 0);

    session.refresh_enemies(|body| !world.contains_body(body));
    assert!(!session.evaluate_win(player_box(0.0)).won);

    // With nothing underneath the enemy drops out of the map.
    world.remove_body(enemy);
    session.refresh_enemies(|body| !world.contains_body(body));
    assert!(session.evaluate_win(player_box(0.0)).won);
    assert_eq!(session.state(), SessionState::WinMenu);
    assert!(!session.toggle_pause());
}

#[test]
fn empty_weapon_refuses_to_fire() {
    let mut world = SandboxWorld::new();
    let block = world.add_body(&[(
        Rect::from_center_size(Vec2::new(60.0, 0.0), Vec2::splat(20.0)),
        categories::WEAPON_TARGETABLE,
    )]);

    let mut arsenal = Arsenal::default();
    arsenal.add(Entity::from_raw(500), WeaponKind::Delete.build(Some(0)), &mut world);

    assert!(!arsenal.fire(&holder(), Vec2::new(100.0, -2.0), 1.0, &mut world));
    arsenal.update(&holder(), 1.0, &mut world);
    assert!(world.contains_body(block));
    assert_eq!(world.count_visuals(|v| matches!(v, Visual::Beam { .. })), 0);
}

#[test]
fn targets_are_collected_only_while_running() {
    let mut session = LevelSession::new(0, WinCondition::Targets);
    session.add_target(
        Entity::from_raw(1),
        Rect::from_center_size(Vec2::new(40.0, 10.0), Vec2::splat(8.0)),
    );
    session.add_target(
        Entity::from_raw(2),
        Rect::from_center_size(Vec2::new(120.0, 10.0), Vec2::splat(8.0)),
    );

    let first = session.evaluate_win(player_box(40.0));
    assert_eq!(first.collected.len(), 1);
    assert!(!first.won);

    assert!(session.pause());
    let paused = session.evaluate_win(player_box(120.0));
    assert!(paused.collected.is_empty());
    assert_eq!(session.targets().len(), 1);

    assert!(session.resume());
    let last = session.evaluate_win(player_box(120.0));
    assert_eq!(last.collected.len(), 1);
    assert!(last.won);
}

#[test]
fn inventory_redraws_follow_the_arsenal() {
    let mut world = SandboxWorld::new();
    world.add_body(&[(
        Rect::from_center_size(Vec2::new(60.0, 0.0), Vec2::splat(20.0)),
        categories::WEAPON_TARGETABLE,
    )]);

    let owner = Entity::from_raw(500);
    let mut arsenal = Arsenal::default();
    arsenal.add(owner, WeaponKind::Default.build(None), &mut world);
    arsenal.add(owner, WeaponKind::Delete.build(Some(2)), &mut world);

    let mut cache = InventoryCache::default();
    assert!(cache.observe(arsenal.current(), &arsenal.ammo_counts()));
    assert!(!cache.observe(arsenal.current(), &arsenal.ammo_counts()));

    arsenal.cycle(1, &mut world);
    assert!(cache.observe(arsenal.current(), &arsenal.ammo_counts()));

    arsenal.fire(&holder(), Vec2::new(100.0, -2.0), 1.0, &mut world);
    assert!(cache.observe(arsenal.current(), &arsenal.ammo_counts()));
    assert_eq!(arsenal.ammo_counts()[1], 1);
    assert!(!cache.observe(arsenal.current(), &arsenal.ammo_counts()));
}
