//! Pause and options buttons in the top-right corner.

use bevy::prelude::*;

use super::buttons::{CommandButton, BUTTON_IDLE};
use crate::core::{LevelEntity, SessionCommand};
use crate::level::{LevelSession, SessionState};

const HUD_BUTTON_SIZE: f32 = 25.0;
const HUD_MARGIN: f32 = 8.0;

/// Label of the pause button; shows the action it will take.
#[derive(Component)]
pub struct PauseLabel;

fn pause_label(paused: bool) -> &'static str {
    if paused {
        ">"
    } else {
        "||"
    }
}

fn spawn_hud_button(
    commands: &mut Commands,
    right: f32,
    label: &str,
    command: SessionCommand,
    label_marker: Option<PauseLabel>,
) {
    commands
        .spawn((
            Button,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(HUD_MARGIN),
                right: Val::Px(right),
                width: Val::Px(HUD_BUTTON_SIZE),
                height: Val::Px(HUD_BUTTON_SIZE),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            CommandButton(command),
            LevelEntity,
        ))
        .with_children(|button| {
            let mut text = button.spawn((
                Text::new(label),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
            if let Some(marker) = label_marker {
                text.insert(marker);
            }
        });
}

pub fn spawn_hud(mut commands: Commands) {
    spawn_hud_button(
        &mut commands,
        HUD_MARGIN,
        pause_label(false),
        SessionCommand::TogglePause,
        Some(PauseLabel),
    );
    spawn_hud_button(
        &mut commands,
        HUD_MARGIN * 2.0 + HUD_BUTTON_SIZE,
        "*",
        SessionCommand::ToggleOptions,
        None,
    );
}

pub fn update_pause_label(
    session: Res<LevelSession>,
    mut labels: Query<&mut Text, With<PauseLabel>>,
) {
    if !session.is_changed() {
        return;
    }
    let label = pause_label(session.state() == SessionState::Paused);
    for mut text in labels.iter_mut() {
        if text.0 != label {
            text.0 = label.to_string();
        }
    }
}
