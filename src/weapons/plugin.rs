//! Weapons plugin - loadout, selection, firing and effect aging.

use bevy::prelude::*;

use super::systems::*;
use crate::core::LevelSet;
use crate::level::session_running;

pub struct WeaponsPlugin;

impl Plugin for WeaponsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                (equip_loadout, sync_weapon_pause).chain(),
                (select_weapon, charge_and_fire, update_weapons)
                    .chain()
                    .run_if(session_running),
                disarm_on_death,
            )
                .chain()
                .in_set(LevelSet::Weapons),
        );
    }
}
