//! Presentation backend that narrates to the log.

use anyhow::{bail, Result};
use dronewell_core::{EntityId, MusicTrack, Scene, SoundCue, SoundMix};
use dronewell_presentation::{Appearance, Backend, Hud, SceneText, SpriteKey};
use glam::Vec2;
use log::{debug, info, trace};
use std::collections::BTreeMap;

/// Tracks what a real backend would be holding and logs every call.
#[derive(Debug, Default)]
pub(crate) struct LogBackend {
    sprites: BTreeMap<EntityId, SpriteKey>,
    sounds_played: usize,
    peak_sprites: usize,
    last_alert: Option<String>,
}

impl LogBackend {
    pub(crate) fn sounds_played(&self) -> usize {
        self.sounds_played
    }

    pub(crate) fn peak_sprites(&self) -> usize {
        self.peak_sprites
    }
}

impl Backend for LogBackend {
    fn spawn_body(&mut self, entity: EntityId, sprite: SpriteKey, position: Vec2) -> Result<()> {
        if self.sprites.insert(entity, sprite).is_some() {
            bail!("{entity} spawned twice without being destroyed");
        }
        self.peak_sprites = self.peak_sprites.max(self.sprites.len());
        debug!("spawn {entity} as {} at {position}", sprite.sheet);
        Ok(())
    }

    fn destroy_body(&mut self, entity: EntityId) -> Result<()> {
        if self.sprites.remove(&entity).is_none() {
            bail!("{entity} destroyed without being spawned");
        }
        debug!("destroy {entity}");
        Ok(())
    }

    fn update_body(&mut self, entity: EntityId, appearance: &Appearance) -> Result<()> {
        if !self.sprites.contains_key(&entity) {
            bail!("{entity} updated without being spawned");
        }
        trace!("{entity} at {} depth {}", appearance.position, appearance.depth);
        Ok(())
    }

    fn play_sound(&mut self, cue: SoundCue, mix: SoundMix) -> Result<()> {
        self.sounds_played += 1;
        trace!("sound {cue:?} pan {:.2} volume {:.2}", mix.pan, mix.volume);
        Ok(())
    }

    fn play_music(&mut self, track: MusicTrack) -> Result<()> {
        info!("music: {track:?}");
        Ok(())
    }

    fn show_explosion(&mut self, position: Vec2, progress: f32) -> Result<()> {
        trace!("explosion at {position} ({:.0}%)", progress * 100.0);
        Ok(())
    }

    fn show_scene(&mut self, scene: Scene, text: &SceneText) -> Result<()> {
        info!("scene: {scene:?}");
        if !text.title.is_empty() {
            info!("{}", text.title);
        }
        Ok(())
    }

    fn draw_hud(&mut self, hud: &Hud) -> Result<()> {
        if let Some(alert) = hud.alerts.last() {
            if self.last_alert.as_ref() != Some(alert) {
                info!("alert: {alert}");
                self.last_alert = Some(alert.clone());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_spawns_are_errors() {
        let mut backend = LogBackend::default();
        let id = EntityId::new(0, 0);
        let sprite = SpriteKey {
            sheet: "pylon",
            overlay: None,
        };
        backend
            .spawn_body(id, sprite, Vec2::ZERO)
            .expect("first spawn");
        assert!(backend.spawn_body(id, sprite, Vec2::ZERO).is_err());
        backend.destroy_body(id).expect("spawned");
        assert!(backend.destroy_body(id).is_err());
        assert_eq!(backend.peak_sprites(), 1);
    }
}
