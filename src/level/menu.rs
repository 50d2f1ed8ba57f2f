//! Slide-in/slide-out menu model.
//!
//! Positions are in window pixels with y pointing down, so a menu hidden
//! above the window has negative y. Anchors are recomputed from the live
//! viewport every step.

use bevy::prelude::*;

use crate::core::approach;

pub const MENU_BUTTON_SIZE: f32 = 100.0;
pub const MENU_BUTTON_PADDING: f32 = 100.0;
pub const BANNER_PADDING: f32 = 25.0;

const SLIDE_IN_BUTTON_RATE: f32 = 0.05;
const SLIDE_IN_BANNER_RATE: f32 = 0.04;
const SLIDE_OUT_BUTTON_RATE: f32 = 0.1;
const SLIDE_OUT_BANNER_RATE: f32 = 0.08;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    /// Restart and back.
    Pause,
    /// Restart and back, with a banner.
    Death,
    /// Continue and back, with a banner.
    Win,
    /// Sound and debug view toggles.
    Options,
}

impl MenuKind {
    pub fn banner(self) -> Option<&'static str> {
        match self {
            MenuKind::Pause => None,
            MenuKind::Death => Some("You died"),
            MenuKind::Win => Some("Level complete"),
            MenuKind::Options => Some("Options"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slide {
    In,
    Out,
}

/// Resting places of one menu's pieces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuAnchors {
    pub primary: Vec2,
    pub secondary: Vec2,
    pub banner: Vec2,
}

impl MenuAnchors {
    /// Button centers' distance from the middle of the row.
    fn half_row() -> f32 {
        (2.0 * MENU_BUTTON_SIZE + MENU_BUTTON_PADDING) / 2.0 - MENU_BUTTON_SIZE / 2.0
    }

    /// Centered in the viewport.
    pub fn shown(viewport: Vec2) -> Self {
        let mid = viewport / 2.0;
        let half_row = Self::half_row();
        Self {
            primary: mid + Vec2::new(-half_row, 0.0),
            secondary: mid + Vec2::new(half_row, 0.0),
            banner: mid + Vec2::new(10.0, -MENU_BUTTON_SIZE - BANNER_PADDING),
        }
    }

    /// Just above the top edge.
    pub fn hidden(viewport: Vec2) -> Self {
        let mid = viewport / 2.0;
        let half_row = Self::half_row();
        Self {
            primary: Vec2::new(mid.x - half_row, -MENU_BUTTON_SIZE),
            secondary: Vec2::new(mid.x + half_row, -MENU_BUTTON_SIZE),
            banner: Vec2::new(mid.x + 10.0, -MENU_BUTTON_SIZE * 1.5 - BANNER_PADDING),
        }
    }
}

/// One animated menu: two buttons and an optional banner.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSlide {
    pub kind: MenuKind,
    pub direction: Slide,
    pub primary: Vec2,
    pub secondary: Vec2,
    pub banner: Vec2,
}

impl MenuSlide {
    /// Hidden above the window, about to slide in.
    pub fn offscreen(kind: MenuKind, viewport: Vec2) -> Self {
        Self::at(kind, Slide::In, MenuAnchors::hidden(viewport))
    }

    /// Resting in the middle, about to slide out.
    pub fn centered(kind: MenuKind, viewport: Vec2) -> Self {
        Self::at(kind, Slide::Out, MenuAnchors::shown(viewport))
    }

    fn at(kind: MenuKind, direction: Slide, anchors: MenuAnchors) -> Self {
        Self {
            kind,
            direction,
            primary: anchors.primary,
            secondary: anchors.secondary,
            banner: anchors.banner,
        }
    }

    pub fn slide_in(&mut self) {
        self.direction = Slide::In;
    }

    pub fn slide_out(&mut self) {
        self.direction = Slide::Out;
    }

    pub fn is_sliding_in(&self) -> bool {
        self.direction == Slide::In
    }

    /// One frame of movement toward the current anchors.
    pub fn step(&mut self, viewport: Vec2) {
        let (anchors, button_rate, banner_rate) = match self.direction {
            Slide::In => (
                MenuAnchors::shown(viewport),
                SLIDE_IN_BUTTON_RATE,
                SLIDE_IN_BANNER_RATE,
            ),
            Slide::Out => (
                MenuAnchors::hidden(viewport),
                SLIDE_OUT_BUTTON_RATE,
                SLIDE_OUT_BANNER_RATE,
            ),
        };
        self.primary = approach(self.primary, anchors.primary, button_rate);
        self.secondary = approach(self.secondary, anchors.secondary, button_rate);
        self.banner = approach(self.banner, anchors.banner, banner_rate);
    }

    /// Fully above the window on the way out; safe to tear down.
    pub fn is_gone(&self) -> bool {
        self.direction == Slide::Out && self.primary.y + MENU_BUTTON_SIZE / 2.0 < 0.0
    }
}
