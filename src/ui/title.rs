//! Level banner shown when a level starts.

use bevy::prelude::*;

use crate::core::{LevelEntity, SelectedLevel};
use crate::level::LevelLibrary;

const TITLE_HOLD: f32 = 1.5;
const TITLE_FADE: f32 = 1.0;

#[derive(Component, Debug, Default)]
pub struct LevelTitle {
    age: f32,
}

/// Opacity after `age` seconds: fully visible while holding, then linear.
pub fn title_alpha(age: f32) -> f32 {
    if age <= TITLE_HOLD {
        1.0
    } else {
        (1.0 - (age - TITLE_HOLD) / TITLE_FADE).max(0.0)
    }
}

pub fn spawn_level_title(
    mut commands: Commands,
    selected: Res<SelectedLevel>,
    library: Option<Res<LevelLibrary>>,
) {
    let Some(level) = library.as_ref().and_then(|library| library.get(selected.0)) else {
        return;
    };

    let mut heading = format!("Level {}", selected.0 + 1);
    if !level.title.is_empty() {
        heading = format!("{heading}: {}", level.title);
    }

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                top: Val::Percent(20.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                ..default()
            },
            LevelTitle::default(),
            LevelEntity,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(heading),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.85, 0.8)),
            ));
            parent.spawn((
                Text::new(level.win_condition.hint()),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.6, 0.65)),
            ));
        });
}

pub fn fade_level_title(
    mut commands: Commands,
    time: Res<Time>,
    mut titles: Query<(Entity, &mut LevelTitle, &Children)>,
    mut texts: Query<&mut TextColor>,
) {
    for (entity, mut title, children) in titles.iter_mut() {
        title.age += time.delta_secs();
        let alpha = title_alpha(title.age);
        if alpha <= 0.0 {
            commands.entity(entity).despawn_recursive();
            continue;
        }
        for &child in children.iter() {
            if let Ok(mut color) = texts.get_mut(child) {
                color.0.set_alpha(alpha);
            }
        }
    }
}
