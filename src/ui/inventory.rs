//! Inventory bar with a dirty-check cache.
//!
//! The bar is rebuilt only when the selection, the number of weapons, or any
//! ammo count changes.

use bevy::prelude::*;

use crate::core::LevelEntity;
use crate::player::Player;
use crate::weapons::{Arsenal, WeaponIcon};

const SLOT_SIZE: f32 = 40.0;
const SLOT_BORDER: f32 = 3.0;
const SLOT_GAP: f32 = 4.0;
const FRAME_COLOR: Color = Color::srgb(0.4, 0.4, 0.42);
const SELECTED_COLOR: Color = Color::srgb(1.0, 0.84, 0.0);

/// Last rendered `{selected, ammo per weapon}`.
#[derive(Resource, Debug, Default)]
pub struct InventoryCache {
    snapshot: Option<(usize, Vec<u32>)>,
}

impl InventoryCache {
    /// Record the roster state; `true` when it differs from the last one.
    ///
    /// The weapon count is `ammo.len()`. The first observation always counts
    /// as a change.
    pub fn observe(&mut self, selected: usize, ammo: &[u32]) -> bool {
        if let Some((last_selected, last_ammo)) = &self.snapshot {
            if *last_selected == selected && last_ammo.as_slice() == ammo {
                return false;
            }
        }
        self.snapshot = Some((selected, ammo.to_vec()));
        true
    }
}

/// Marker for the bar's root node.
#[derive(Component)]
pub struct InventoryBar;

pub fn spawn_inventory_bar(mut commands: Commands) {
    commands.insert_resource(InventoryCache::default());
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            flex_direction: FlexDirection::Row,
            column_gap: Val::Px(SLOT_GAP),
            ..default()
        },
        InventoryBar,
        LevelEntity,
    ));
}

/// Rebuild the bar when the player's arsenal changed.
pub fn refresh_inventory(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut cache: ResMut<InventoryCache>,
    arsenals: Query<&Arsenal, With<Player>>,
    bars: Query<Entity, With<InventoryBar>>,
) {
    let Ok(arsenal) = arsenals.get_single() else {
        return;
    };
    let Ok(bar) = bars.get_single() else {
        return;
    };

    let ammo = arsenal.ammo_counts();
    if !cache.observe(arsenal.current(), &ammo) {
        return;
    }

    let icons = arsenal.icons();
    commands.entity(bar).despawn_descendants();
    commands.entity(bar).with_children(|parent| {
        for (index, (icon, count)) in icons.iter().zip(&ammo).enumerate() {
            spawn_slot(parent, &asset_server, *icon, *count, index == arsenal.current());
        }
    });
}

fn spawn_slot(
    parent: &mut ChildBuilder,
    asset_server: &AssetServer,
    icon: WeaponIcon,
    ammo: u32,
    selected: bool,
) {
    let frame = if selected { SELECTED_COLOR } else { FRAME_COLOR };
    parent
        .spawn((
            Node {
                width: Val::Px(SLOT_SIZE),
                height: Val::Px(SLOT_SIZE),
                border: UiRect::all(Val::Px(SLOT_BORDER)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BorderColor(frame),
            BackgroundColor(Color::srgba(0.05, 0.05, 0.08, 0.8)),
        ))
        .with_children(|slot| {
            let icon_node = Node {
                width: Val::Percent(80.0),
                height: Val::Percent(80.0),
                ..default()
            };
            match icon {
                WeaponIcon::Fill(color) => {
                    slot.spawn((icon_node, BackgroundColor(color)));
                }
                WeaponIcon::Texture(path) => {
                    slot.spawn((icon_node, ImageNode::new(asset_server.load(path))));
                }
            }

            // Ammo count
            slot.spawn((
                Text::new(ammo.to_string()),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    right: Val::Px(1.0),
                    bottom: Val::Px(0.0),
                    ..default()
                },
            ));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_observation_renders() {
        let mut cache = InventoryCache::default();
        assert!(cache.observe(0, &[]));
    }

    #[test]
    fn unchanged_roster_does_not_render() {
        let mut cache = InventoryCache::default();
        cache.observe(1, &[10, 1]);
        assert!(!cache.observe(1, &[10, 1]));
        assert!(!cache.observe(1, &[10, 1]));
    }

    #[test]
    fn any_tracked_change_renders() {
        let mut cache = InventoryCache::default();
        cache.observe(0, &[10, 1]);

        assert!(cache.observe(1, &[10, 1]), "selection");
        assert!(cache.observe(1, &[10, 0]), "ammo");
        assert!(cache.observe(1, &[10, 0, 5]), "count");
        assert!(!cache.observe(1, &[10, 0, 5]));
    }
}
