//! Shared button look and the button-to-command bridge.

use bevy::prelude::*;

use crate::core::{PlaySound, SessionCommand, Sfx};

pub const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.2);
pub const BUTTON_HOVERED: Color = Color::srgb(0.25, 0.25, 0.3);
pub const BUTTON_PRESSED: Color = Color::srgb(0.3, 0.3, 0.35);

/// A button that issues a session command when pressed.
#[derive(Component, Debug, Clone, Copy)]
pub struct CommandButton(pub SessionCommand);

/// Spawn a square button with a centered label.
pub fn spawn_button<B: Bundle>(
    parent: &mut ChildBuilder,
    label: &str,
    size: f32,
    font_size: f32,
    extra: B,
) -> Entity {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(size),
                height: Val::Px(size),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            extra,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(label),
                TextFont {
                    font_size,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        })
        .id()
}

/// Color feedback, click sounds and command dispatch for command buttons.
pub fn command_button_input(
    mut interaction_query: Query<
        (&Interaction, &CommandButton, &mut BackgroundColor),
        Changed<Interaction>,
    >,
    mut commands: EventWriter<SessionCommand>,
    mut sounds: EventWriter<PlaySound>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                *bg_color = BUTTON_PRESSED.into();
                sounds.send(PlaySound(Sfx::ButtonPressed));
                commands.send(button.0);
            }
            Interaction::Hovered => {
                *bg_color = BUTTON_HOVERED.into();
                sounds.send(PlaySound(Sfx::Button));
            }
            Interaction::None => {
                *bg_color = BUTTON_IDLE.into();
            }
        }
    }
}
