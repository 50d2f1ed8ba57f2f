//! Level session state machine.
//!
//! Owns everything that decides the fate of a level: the run state, the
//! enemy and target rosters, the camera, and the animated menus. It holds no
//! Bevy handles beyond plain `Entity` ids, so the whole machine can be driven
//! without an app.

use bevy::prelude::*;

use super::data::WinCondition;
use super::menu::{MenuKind, MenuSlide};
use crate::core::constants::{CAMERA_BOX, GAME_HEIGHT, GAME_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Paused,
    WinMenu,
    Dying,
    Restarting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyEntry {
    pub body: Entity,
    pub terminated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetEntry {
    pub visual: Entity,
    pub area: Rect,
}

/// What survives a restart.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct RestartCarry {
    pub level: usize,
    pub camera: Vec2,
    pub died: bool,
}

/// Outcome of one win evaluation.
#[derive(Debug, Default, PartialEq)]
pub struct WinCheck {
    /// Targets touched this frame, already removed from the roster.
    pub collected: Vec<TargetEntry>,
    pub won: bool,
}

fn overlaps(a: Rect, b: Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

#[derive(Resource, Debug)]
pub struct LevelSession {
    pub level: usize,
    pub win_condition: WinCondition,
    /// Bottom-left corner of the visible camera box in world space.
    pub camera: Vec2,
    state: SessionState,
    enemies: Vec<EnemyEntry>,
    targets: Vec<TargetEntry>,
    /// Pause or death menu.
    pub menu: Option<MenuSlide>,
    pub win_menu: Option<MenuSlide>,
    pub options_menu: Option<MenuSlide>,
    viewport: Vec2,
}

impl LevelSession {
    pub fn new(level: usize, win_condition: WinCondition) -> Self {
        Self {
            level,
            win_condition,
            camera: -CAMERA_BOX,
            state: SessionState::Running,
            enemies: Vec::new(),
            targets: Vec::new(),
            menu: None,
            win_menu: None,
            options_menu: None,
            viewport: Vec2::new(GAME_WIDTH, GAME_HEIGHT),
        }
    }

    /// Fresh session continuing from a restarted one.
    ///
    /// The camera is taken over verbatim. After a death the death menu starts
    /// at rest in the middle and slides away.
    pub fn from_carry(carry: RestartCarry, win_condition: WinCondition, viewport: Vec2) -> Self {
        let mut session = Self::new(carry.level, win_condition);
        session.viewport = viewport;
        session.camera = carry.camera;
        if carry.died {
            session.menu = Some(MenuSlide::centered(MenuKind::Death, viewport));
        }
        session
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Physics, enemies, the player and weapon effects advance only here.
    pub fn is_simulating(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn is_dead(&self) -> bool {
        self.state == SessionState::Dying
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    pub fn add_enemy(&mut self, body: Entity) {
        self.enemies.push(EnemyEntry {
            body,
            terminated: false,
        });
    }

    pub fn add_target(&mut self, visual: Entity, area: Rect) {
        self.targets.push(TargetEntry { visual, area });
    }

    pub fn enemies(&self) -> &[EnemyEntry] {
        &self.enemies
    }

    pub fn targets(&self) -> &[TargetEntry] {
        &self.targets
    }

    /// Flag every enemy `is_gone` reports as no longer in play.
    pub fn refresh_enemies(&mut self, is_gone: impl Fn(Entity) -> bool) {
        for enemy in self.enemies.iter_mut().filter(|enemy| !enemy.terminated) {
            enemy.terminated = is_gone(enemy.body);
        }
    }

    /// Running -> Paused with the pause menu sliding in.
    pub fn pause(&mut self) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        self.state = SessionState::Paused;
        // A death menu still sliding out after a restart turns back as the
        // pause menu from where it is.
        match self.menu.as_mut() {
            Some(menu) => {
                menu.kind = MenuKind::Pause;
                menu.slide_in();
            }
            None => self.menu = Some(MenuSlide::offscreen(MenuKind::Pause, self.viewport)),
        }
        true
    }

    /// Paused -> Running; pause and options menus slide away.
    pub fn resume(&mut self) -> bool {
        if self.state != SessionState::Paused {
            return false;
        }
        self.state = SessionState::Running;
        if let Some(menu) = &mut self.menu {
            menu.slide_out();
        }
        if let Some(options) = &mut self.options_menu {
            options.slide_out();
        }
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            SessionState::Running => self.pause(),
            SessionState::Paused => self.resume(),
            _ => false,
        }
    }

    pub fn options_open(&self) -> bool {
        self.options_menu
            .as_ref()
            .is_some_and(|options| options.is_sliding_in())
    }

    /// Open or close the options panel. Opening pauses without the pause
    /// menu; closing resumes.
    pub fn toggle_options(&mut self) -> bool {
        if matches!(
            self.state,
            SessionState::WinMenu | SessionState::Dying | SessionState::Restarting
        ) {
            return false;
        }
        if self.options_open() {
            return self.resume();
        }
        if let Some(menu) = &mut self.menu {
            menu.slide_out();
        }
        if let Some(options) = self.options_menu.as_mut() {
            options.slide_in();
        } else {
            self.options_menu = Some(MenuSlide::offscreen(MenuKind::Options, self.viewport));
        }
        self.state = SessionState::Paused;
        true
    }

    /// Running -> Dying with the death menu sliding in.
    pub fn kill_player(&mut self) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        self.state = SessionState::Dying;
        self.menu = Some(MenuSlide::offscreen(MenuKind::Death, self.viewport));
        true
    }

    /// Any -> Restarting. Returns what the next session inherits.
    pub fn restart(&mut self) -> Option<RestartCarry> {
        if self.state == SessionState::Restarting {
            return None;
        }
        let carry = RestartCarry {
            level: self.level,
            camera: self.camera,
            died: self.is_dead(),
        };
        self.state = SessionState::Restarting;
        Some(carry)
    }

    /// Show the win menu over a paused game.
    pub fn show_win_menu(&mut self) -> bool {
        if self.state == SessionState::Paused {
            self.resume();
        }
        if self.state != SessionState::Running {
            return false;
        }
        self.state = SessionState::WinMenu;
        self.win_menu = Some(MenuSlide::offscreen(MenuKind::Win, self.viewport));
        true
    }

    /// Check the win condition against the player's bounds. Only acts while
    /// running.
    pub fn evaluate_win(&mut self, player: Rect) -> WinCheck {
        let mut check = WinCheck::default();
        if self.state != SessionState::Running {
            return check;
        }

        check.won = match self.win_condition {
            WinCondition::Enemies => self.enemies.iter().all(|enemy| enemy.terminated),
            WinCondition::Targets => {
                let (touched, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut self.targets)
                    .into_iter()
                    .partition(|target| overlaps(player, target.area));
                self.targets = remaining;
                check.collected = touched;
                self.targets.is_empty()
            }
        };

        if check.won {
            self.show_win_menu();
        }
        check
    }

    /// Advance every menu one frame; drop the ones that left the window.
    pub fn step_menus(&mut self) {
        let viewport = self.viewport;
        for slot in [&mut self.menu, &mut self.win_menu, &mut self.options_menu] {
            if let Some(menu) = slot {
                menu.step(viewport);
                if menu.is_gone() {
                    *slot = None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::menu::Slide;

    fn area(x: f32) -> Rect {
        Rect::from_center_size(Vec2::new(x, 10.0), Vec2::splat(8.0))
    }

    fn player_at(x: f32) -> Rect {
        Rect::from_center_size(Vec2::new(x, 10.0), Vec2::new(8.0, 16.0))
    }

    #[test]
    fn starts_running_below_the_origin() {
        let session = LevelSession::new(0, WinCondition::Targets);
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.camera, -CAMERA_BOX);
    }

    #[test]
    fn pause_round_trip_slides_menu_in_then_out() {
        let mut session = LevelSession::new(0, WinCondition::Targets);
        assert!(session.toggle_pause());
        assert_eq!(session.state(), SessionState::Paused);
        assert!(!session.pause());

        assert!(session.toggle_pause());
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.menu.as_ref().map(|m| m.direction), Some(Slide::Out));
    }

    #[test]
    fn dead_player_cannot_pause_or_open_options() {
        let mut session = LevelSession::new(0, WinCondition::Targets);
        assert!(session.kill_player());
        assert!(!session.pause());
        assert!(!session.toggle_options());
        assert_eq!(session.menu.as_ref().map(|m| m.kind), Some(MenuKind::Death));
    }

    #[test]
    fn options_pause_without_pause_menu() {
        let mut session = LevelSession::new(0, WinCondition::Targets);
        assert!(session.toggle_options());
        assert_eq!(session.state(), SessionState::Paused);
        assert!(session.menu.is_none());
        assert!(session.options_open());

        assert!(session.toggle_options());
        assert_eq!(session.state(), SessionState::Running);
        assert!(!session.options_open());
    }

    #[test]
    fn pause_menu_retracts_when_options_open() {
        let mut session = LevelSession::new(0, WinCondition::Targets);
        session.pause();
        session.toggle_options();
        assert_eq!(session.menu.as_ref().map(|m| m.direction), Some(Slide::Out));
        assert_eq!(session.state(), SessionState::Paused);
    }

    #[test]
    fn win_menu_blocks_pause_and_options() {
        let mut session = LevelSession::new(0, WinCondition::Targets);
        let check = session.evaluate_win(player_at(0.0));
        assert!(check.won);
        assert_eq!(session.state(), SessionState::WinMenu);
        assert!(!session.is_simulating());
        assert!(!session.toggle_pause());
        assert!(!session.toggle_options());
    }

    #[test]
    fn win_while_paused_resumes_first() {
        let mut session = LevelSession::new(0, WinCondition::Enemies);
        session.pause();
        assert!(session.show_win_menu());
        assert_eq!(session.menu.as_ref().map(|m| m.direction), Some(Slide::Out));
        assert_eq!(session.state(), SessionState::WinMenu);
    }

    #[test]
    fn enemies_win_needs_every_enemy_terminated() {
        let mut session = LevelSession::new(0, WinCondition::Enemies);
        let a = Entity::from_raw(10);
        let b = Entity::from_raw(11);
        session.add_enemy(a);
        session.add_enemy(b);

        assert!(!session.evaluate_win(player_at(0.0)).won);
        session.refresh_enemies(|body| body == a);
        assert!(!session.evaluate_win(player_at(0.0)).won);
        session.refresh_enemies(|body| body == b);
        assert!(session.evaluate_win(player_at(0.0)).won);
        assert!(session.win_menu.is_some());
    }

    #[test]
    fn terminated_enemy_stays_terminated() {
        let mut session = LevelSession::new(0, WinCondition::Enemies);
        let a = Entity::from_raw(10);
        session.add_enemy(a);
        session.refresh_enemies(|_| true);
        session.refresh_enemies(|_| false);
        assert!(session.enemies()[0].terminated);
    }

    #[test]
    fn touching_target_collects_it() {
        let mut session = LevelSession::new(0, WinCondition::Targets);
        session.add_target(Entity::from_raw(1), area(0.0));
        session.add_target(Entity::from_raw(2), area(100.0));

        let check = session.evaluate_win(player_at(2.0));
        assert_eq!(check.collected.len(), 1);
        assert!(!check.won);
        assert_eq!(session.targets().len(), 1);

        let check = session.evaluate_win(player_at(50.0));
        assert!(check.collected.is_empty());
    }

    #[test]
    fn restart_carries_camera_and_death() {
        let mut session = LevelSession::new(3, WinCondition::Targets);
        session.camera = Vec2::new(120.0, 45.0);
        session.kill_player();

        let carry = session.restart().expect("first restart");
        assert!(session.restart().is_none());
        assert_eq!(
            carry,
            RestartCarry {
                level: 3,
                camera: Vec2::new(120.0, 45.0),
                died: true
            }
        );

        let next = LevelSession::from_carry(carry, WinCondition::Targets, Vec2::new(1280.0, 720.0));
        assert_eq!(next.camera, Vec2::new(120.0, 45.0));
        assert_eq!(next.state(), SessionState::Running);
        let menu = next.menu.as_ref().expect("death menu carried");
        assert_eq!(menu.direction, Slide::Out);
        assert_eq!(menu.primary, Vec2::new(540.0, 360.0));
    }

    #[test]
    fn pausing_during_carried_death_slide_reuses_the_menu() {
        let carry = RestartCarry {
            level: 0,
            camera: Vec2::ZERO,
            died: true,
        };
        let mut session = LevelSession::from_carry(carry, WinCondition::Targets, Vec2::new(1280.0, 720.0));
        session.step_menus();
        let before = session.menu.clone().expect("death menu carried");

        assert!(session.pause());
        let menu = session.menu.as_ref().expect("menu kept");
        assert_eq!(menu.kind, MenuKind::Pause);
        assert_eq!(menu.direction, Slide::In);
        assert_eq!(menu.primary, before.primary);
    }

    #[test]
    fn three_targets_win_on_the_last_overlap() {
        let mut session = LevelSession::new(0, WinCondition::Targets);
        for (index, x) in [0.0, 100.0, 200.0].into_iter().enumerate() {
            session.add_target(Entity::from_raw(index as u32 + 1), area(x));
        }

        for (visited, x) in [0.0, 100.0].into_iter().enumerate() {
            let check = session.evaluate_win(player_at(x));
            assert_eq!(check.collected.len(), 1);
            assert!(!check.won);
            assert_eq!(session.targets().len(), 2 - visited);
            assert!(session.win_menu.is_none());
        }

        let check = session.evaluate_win(player_at(200.0));
        assert!(check.won);
        assert!(session.targets().is_empty());
        assert_eq!(session.state(), SessionState::WinMenu);
        assert!(session.win_menu.is_some());
    }

    #[test]
    fn hidden_menus_are_dropped() {
        let mut session = LevelSession::new(0, WinCondition::Targets);
        session.pause();
        session.resume();
        for _ in 0..10 {
            session.step_menus();
        }
        assert!(session.menu.is_none());
    }
}
