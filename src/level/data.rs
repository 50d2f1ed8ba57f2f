//! Level definitions loaded from assets/levels/.
//!
//! Coordinates are in world pixels with y up; the playable map spans
//! `[0, width] x [0, height]`.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use super::error::LevelLoadError;
use crate::weapons::WeaponKind;

const LEVELS_DIR: &str = "assets/levels";

/// What the player has to do to finish a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum WinCondition {
    /// Touch every target.
    #[default]
    Targets,
    /// Get rid of every enemy.
    Enemies,
}

impl WinCondition {
    pub fn hint(self) -> &'static str {
        match self {
            WinCondition::Targets => "Collect all targets",
            WinCondition::Enemies => "Defeat all enemies",
        }
    }
}

/// Axis-aligned box given by its bottom-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Area {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Area {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// A box the deletion weapon can remove.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BlockDef {
    pub area: Area,
    /// Falls and tumbles instead of staying put.
    #[serde(default)]
    pub dynamic: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EnemyDef {
    pub position: (f32, f32),
    /// Half-width of the walk back and forth around `position`.
    #[serde(default = "default_patrol")]
    pub patrol: f32,
}

fn default_patrol() -> f32 {
    32.0
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WeaponDef {
    pub kind: WeaponKind,
    /// Starting ammo; the weapon's own stock when absent.
    #[serde(default)]
    pub ammo: Option<u32>,
}

/// One playable level.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDefinition {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub player_start: (f32, f32),
    #[serde(default)]
    pub win_condition: WinCondition,
    #[serde(default)]
    pub weapons: Vec<WeaponDef>,
    #[serde(default)]
    pub ground: Vec<Area>,
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
    #[serde(default)]
    pub spikes: Vec<Area>,
    #[serde(default)]
    pub enemies: Vec<EnemyDef>,
    #[serde(default)]
    pub targets: Vec<(f32, f32)>,
}

impl LevelDefinition {
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(self.player_start.0, self.player_start.1)
    }

    /// Weapons handed out at start. A level granting none gets the base weapon.
    pub fn loadout(&self) -> Vec<(WeaponKind, Option<u32>)> {
        if self.weapons.is_empty() {
            return vec![(WeaponKind::Default, None)];
        }
        self.weapons.iter().map(|weapon| (weapon.kind, weapon.ammo)).collect()
    }

    fn validate(&self, path: &str) -> Result<(), LevelLoadError> {
        let invalid = |reason: String| LevelLoadError::InvalidLevel {
            path: path.to_string(),
            reason,
        };
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(invalid(format!(
                "map size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        let (x, y) = self.player_start;
        if x < 0.0 || x > self.width || y < 0.0 || y > self.height {
            return Err(invalid(format!("player start ({}, {}) is outside the map", x, y)));
        }
        let areas = self
            .ground
            .iter()
            .chain(self.spikes.iter())
            .chain(self.blocks.iter().map(|block| &block.area));
        for area in areas {
            if area.width <= 0.0 || area.height <= 0.0 {
                return Err(invalid(format!(
                    "area at ({}, {}) has non-positive size",
                    area.x, area.y
                )));
            }
        }
        Ok(())
    }
}

/// Parse and validate a level from RON source.
pub fn parse_level(path: &str, contents: &str) -> Result<LevelDefinition, LevelLoadError> {
    let level: LevelDefinition = ron::from_str(contents).map_err(|e| LevelLoadError::ParseError {
        path: path.to_string(),
        details: e.to_string(),
    })?;
    level.validate(path)?;
    Ok(level)
}

pub fn load_level_file(path: &Path) -> Result<LevelDefinition, LevelLoadError> {
    let display = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| LevelLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;
    parse_level(&display, &contents)
}

/// Resource storing all loaded levels in play order.
#[derive(Resource, Debug, Default)]
pub struct LevelLibrary {
    pub levels: Vec<LevelDefinition>,
}

impl LevelLibrary {
    pub fn get(&self, index: usize) -> Option<&LevelDefinition> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Load every level under assets/levels/, ordered by file name.
pub fn load_level_library(mut commands: Commands) {
    let mut library = LevelLibrary::default();
    let levels_path = Path::new(LEVELS_DIR);

    match fs::read_dir(levels_path) {
        Ok(entries) => {
            let mut paths: Vec<_> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "ron"))
                .collect();
            paths.sort();

            for path in paths {
                match load_level_file(&path) {
                    Ok(level) => {
                        info!("Loaded level: {}", level.title);
                        library.levels.push(level);
                    }
                    Err(e) => error!("Skipping level: {}", e),
                }
            }
        }
        Err(e) => warn!("Levels directory not found: {:?} ({})", levels_path, e),
    }

    info!("Loaded {} level(s)", library.len());
    commands.insert_resource(library);
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: &str = r#"(
        title: "Test",
        width: 400.0,
        height: 200.0,
        player_start: (20.0, 40.0),
        win_condition: Enemies,
        weapons: [(kind: Delete, ammo: Some(3))],
        ground: [(x: 0.0, y: 0.0, width: 400.0, height: 16.0)],
        enemies: [(position: (200.0, 30.0))],
    )"#;

    #[test]
    fn parses_level_with_defaults() {
        let level = parse_level("test.ron", LEVEL).expect("valid level");
        assert_eq!(level.win_condition, WinCondition::Enemies);
        assert_eq!(level.enemies[0].patrol, 32.0);
        assert!(level.targets.is_empty());
        assert_eq!(level.loadout(), vec![(WeaponKind::Delete, Some(3))]);
    }

    #[test]
    fn level_without_weapons_gets_base_weapon() {
        let source = r#"(title: "Bare", width: 10.0, height: 10.0, player_start: (1.0, 1.0))"#;
        let level = parse_level("bare.ron", source).expect("valid level");
        assert_eq!(level.loadout(), vec![(WeaponKind::Default, None)]);
        assert_eq!(level.win_condition, WinCondition::Targets);
    }

    #[test]
    fn start_outside_map_is_rejected() {
        let source = r#"(title: "Bad", width: 10.0, height: 10.0, player_start: (20.0, 1.0))"#;
        let err = parse_level("bad.ron", source).unwrap_err();
        assert!(matches!(err, LevelLoadError::InvalidLevel { .. }));
    }

    #[test]
    fn malformed_source_is_parse_error() {
        let err = parse_level("broken.ron", "(title: ").unwrap_err();
        assert!(matches!(err, LevelLoadError::ParseError { .. }));
    }
}
