//! Sound playback through kira.

use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl, AudioSource};

use super::events::PlaySound;

/// Player-facing sound settings.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SoundSettings {
    pub enabled: bool,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Play every requested sound once.
pub fn play_sounds(
    mut requests: EventReader<PlaySound>,
    settings: Res<SoundSettings>,
    asset_server: Res<AssetServer>,
    audio: Res<Audio>,
) {
    for PlaySound(sfx) in requests.read() {
        if !settings.enabled {
            continue;
        }
        let source: Handle<AudioSource> = asset_server.load(sfx.path());
        audio.play(source);
    }
}
