//! UI plugin - level select, HUD, menus, and the inventory bar.

use bevy::prelude::*;

use super::buttons::command_button_input;
use super::hud::{spawn_hud, update_pause_label};
use super::inventory::{refresh_inventory, spawn_inventory_bar, InventoryCache};
use super::level_select::{cleanup_level_select, level_select_input, setup_level_select};
use super::menus::sync_menus;
use super::title::{fade_level_title, spawn_level_title};
use crate::core::{GameState, LevelSet};

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InventoryCache>()
            // Level select
            .add_systems(OnEnter(GameState::LevelSelect), setup_level_select)
            .add_systems(
                Update,
                level_select_input.run_if(in_state(GameState::LevelSelect)),
            )
            .add_systems(OnExit(GameState::LevelSelect), cleanup_level_select)
            // In-level overlay, despawned with the rest of the level
            .add_systems(
                OnEnter(GameState::InGame),
                (spawn_hud, spawn_inventory_bar, spawn_level_title),
            )
            .add_systems(
                Update,
                (
                    command_button_input,
                    sync_menus,
                    update_pause_label,
                    refresh_inventory,
                    fade_level_title,
                )
                    .in_set(LevelSet::Ui),
            );
    }
}
