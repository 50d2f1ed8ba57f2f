//! Level selection screen.

use bevy::prelude::*;

use super::buttons::{spawn_button, BUTTON_HOVERED, BUTTON_IDLE, BUTTON_PRESSED};
use crate::core::{GameState, PlaySound, SelectedLevel, Sfx};
use crate::level::LevelLibrary;

const LEVEL_BUTTON_SIZE: f32 = 80.0;

#[derive(Component)]
pub struct LevelSelectUi;

/// Button that starts the level at this library index.
#[derive(Component, Debug, Clone, Copy)]
pub struct LevelButton(pub usize);

pub fn setup_level_select(mut commands: Commands, library: Option<Res<LevelLibrary>>) {
    let count = library.as_ref().map_or(0, |library| library.len());

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgb(0.05, 0.05, 0.08)),
            LevelSelectUi,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("ERASURE"),
                TextFont {
                    font_size: 80.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.7, 0.6)),
                Node {
                    margin: UiRect::bottom(Val::Px(50.0)),
                    ..default()
                },
            ));

            if count == 0 {
                parent.spawn((
                    Text::new("No levels found in assets/levels"),
                    TextFont {
                        font_size: 24.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.8, 0.3, 0.3)),
                ));
                return;
            }

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    flex_wrap: FlexWrap::Wrap,
                    justify_content: JustifyContent::Center,
                    column_gap: Val::Px(10.0),
                    row_gap: Val::Px(10.0),
                    max_width: Val::Px(600.0),
                    ..default()
                })
                .with_children(|grid| {
                    for index in 0..count {
                        let label = format!("{}", index + 1);
                        spawn_button(grid, &label, LEVEL_BUTTON_SIZE, 32.0, LevelButton(index));
                    }
                });
        });
}

pub fn level_select_input(
    mut interaction_query: Query<
        (&Interaction, &LevelButton, &mut BackgroundColor),
        Changed<Interaction>,
    >,
    mut selected: ResMut<SelectedLevel>,
    mut next_state: ResMut<NextState<GameState>>,
    mut sounds: EventWriter<PlaySound>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                *bg_color = BUTTON_PRESSED.into();
                sounds.send(PlaySound(Sfx::ButtonPressed));
                selected.0 = button.0;
                next_state.set(GameState::InGame);
            }
            Interaction::Hovered => {
                *bg_color = BUTTON_HOVERED.into();
            }
            Interaction::None => {
                *bg_color = BUTTON_IDLE.into();
            }
        }
    }
}

pub fn cleanup_level_select(mut commands: Commands, query: Query<Entity, With<LevelSelectUi>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
