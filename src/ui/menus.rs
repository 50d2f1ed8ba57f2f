//! Bevy UI widgets mirroring the session's animated menus.

use bevy::prelude::*;

use super::buttons::{spawn_button, CommandButton};
use crate::core::{LevelEntity, SessionCommand};
use crate::level::{LevelSession, MenuKind, MenuSlide, MENU_BUTTON_SIZE};

const BANNER_WIDTH: f32 = 400.0;
const BANNER_FONT_SIZE: f32 = 36.0;

/// Which session menu a widget belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSlot {
    Main,
    Win,
    Options,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPart {
    Primary,
    Secondary,
    Banner,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct MenuWidget {
    pub slot: MenuSlot,
    pub kind: MenuKind,
    pub part: MenuPart,
}

fn slot_menu(session: &LevelSession, slot: MenuSlot) -> Option<&MenuSlide> {
    match slot {
        MenuSlot::Main => session.menu.as_ref(),
        MenuSlot::Win => session.win_menu.as_ref(),
        MenuSlot::Options => session.options_menu.as_ref(),
    }
}

fn actions(kind: MenuKind) -> [(&'static str, SessionCommand); 2] {
    match kind {
        MenuKind::Pause | MenuKind::Death => [
            ("Restart", SessionCommand::Restart),
            ("Back", SessionCommand::BackToSelect),
        ],
        MenuKind::Win => [
            ("Continue", SessionCommand::ContinueToNext),
            ("Back", SessionCommand::BackToSelect),
        ],
        MenuKind::Options => [
            ("Sound", SessionCommand::ToggleSound),
            ("Debug", SessionCommand::ToggleDebugView),
        ],
    }
}

/// Center `part` of `menu` on its current position.
fn place(node: &mut Node, menu: &MenuSlide, part: MenuPart) {
    let (position, size) = match part {
        MenuPart::Primary => (menu.primary, Vec2::splat(MENU_BUTTON_SIZE)),
        MenuPart::Secondary => (menu.secondary, Vec2::splat(MENU_BUTTON_SIZE)),
        MenuPart::Banner => (menu.banner, Vec2::new(BANNER_WIDTH, BANNER_FONT_SIZE)),
    };
    node.left = Val::Px(position.x - size.x / 2.0);
    node.top = Val::Px(position.y - size.y / 2.0);
}

fn placed(mut node: Node, menu: &MenuSlide, part: MenuPart) -> Node {
    node.position_type = PositionType::Absolute;
    place(&mut node, menu, part);
    node
}

fn spawn_menu(commands: &mut Commands, slot: MenuSlot, menu: &MenuSlide) {
    let [primary, secondary] = actions(menu.kind);
    for (part, (label, command)) in [(MenuPart::Primary, primary), (MenuPart::Secondary, secondary)] {
        commands
            .spawn((
                placed(Node::default(), menu, part),
                GlobalZIndex(10),
                MenuWidget {
                    slot,
                    kind: menu.kind,
                    part,
                },
                LevelEntity,
            ))
            .with_children(|parent| {
                spawn_button(parent, label, MENU_BUTTON_SIZE, 20.0, CommandButton(command));
            });
    }

    if let Some(text) = menu.kind.banner() {
        commands.spawn((
            Text::new(text),
            TextFont {
                font_size: BANNER_FONT_SIZE,
                ..default()
            },
            TextColor(Color::srgb(0.9, 0.85, 0.8)),
            TextLayout::new_with_justify(JustifyText::Center),
            placed(
                Node {
                    width: Val::Px(BANNER_WIDTH),
                    ..default()
                },
                menu,
                MenuPart::Banner,
            ),
            GlobalZIndex(10),
            MenuWidget {
                slot,
                kind: menu.kind,
                part: MenuPart::Banner,
            },
            LevelEntity,
        ));
    }
}

/// Spawn, move and despawn menu widgets to match the session.
pub fn sync_menus(
    mut commands: Commands,
    session: Res<LevelSession>,
    mut widgets: Query<(Entity, &MenuWidget, &mut Node)>,
) {
    for slot in [MenuSlot::Main, MenuSlot::Win, MenuSlot::Options] {
        let menu = slot_menu(&session, slot);
        let mut present = false;

        for (entity, widget, mut node) in widgets.iter_mut().filter(|(_, w, _)| w.slot == slot) {
            let Some(menu) = menu.filter(|menu| menu.kind == widget.kind) else {
                commands.entity(entity).despawn_recursive();
                continue;
            };
            present = true;
            place(&mut node, menu, widget.part);
        }

        if let (false, Some(menu)) = (present, menu) {
            spawn_menu(&mut commands, slot, menu);
        }
    }
}
