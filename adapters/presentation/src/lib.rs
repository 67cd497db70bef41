#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Presentation contracts for Dronewell adapters.
//!
//! The [`Presenter`] turns world events and query snapshots into calls on a
//! [`Backend`], which owns sprites, audio and text. Backends never read the
//! world directly.

mod hud;
mod input;
mod sprites;

use std::{collections::BTreeSet, f32::consts::PI, time::Duration};

use anyhow::{Context, Result as AnyResult};
use dronewell_core::{BodyKind, EntityId, Event, Heading, MusicTrack, Scene, SoundCue, SoundMix};
use dronewell_world::{query, World};
use glam::Vec2;
use log::debug;

pub use hud::{
    format_play_time, game_over_summary, game_over_title, power_bar_frame, Hud, SchematicSlot,
    CONTROLS_HELP, MENU_TEXT, POWER_BAR_FRAMES,
};
pub use input::{input_from_keys, Key, UnknownKey};
pub use sprites::{animations, player_animation, Animations, SpriteKey};

/// Rate at which hurt bodies flash, in half-cycles per second.
const HURT_FLASH_RATE: f32 = 16.0;

/// RGBA color used to tint sprites.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Untinted.
    pub const WHITE: Self = Self::from_rgb_u8(0xFF, 0xFF, 0xFF);
    /// Flash applied while a body is recovering from a hit.
    pub const HURT: Self = Self::from_rgb_u8(0xFF, 0x00, 0x00);

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Tint for a body at presentation time `clock`.
#[must_use]
pub fn hurt_tint(hurt: bool, clock: f32) -> Color {
    if hurt && (clock * PI * HURT_FLASH_RATE).sin() > 0.0 {
        Color::HURT
    } else {
        Color::WHITE
    }
}

/// How a spawned body should look this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Appearance {
    /// World position of the sprite's center.
    pub position: Vec2,
    /// Draw order; larger values are drawn on top.
    pub depth: f32,
    /// Whether the sprite is drawn at all.
    pub visible: bool,
    /// Sheets the body is drawn with.
    pub sprite: SpriteKey,
    /// Animations to loop on those sheets.
    pub animations: Animations,
    /// Fixed frame of the base sheet, for gauges.
    pub frame: Option<u32>,
    /// Multiplicative tint.
    pub tint: Color,
}

/// Title and body text of a full-screen scene.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneText {
    /// Large heading.
    pub title: String,
    /// Paragraph under the heading.
    pub body: String,
}

impl SceneText {
    /// Text shown for `scene`, reading the score from `world` on game over.
    #[must_use]
    pub fn for_scene(scene: Scene, world: &World) -> Self {
        match scene {
            Scene::Menu => Self {
                title: String::new(),
                body: MENU_TEXT.to_owned(),
            },
            Scene::Gameplay => Self {
                title: String::new(),
                body: String::new(),
            },
            Scene::GameOver { won } => Self {
                title: game_over_title(won).to_owned(),
                body: game_over_summary(won, &query::score(world)),
            },
        }
    }
}

/// Output surface driven by the [`Presenter`].
pub trait Backend {
    /// Creates the sprites for a body.
    fn spawn_body(&mut self, entity: EntityId, sprite: SpriteKey, position: Vec2)
        -> AnyResult<()>;

    /// Releases the sprites of a body.
    fn destroy_body(&mut self, entity: EntityId) -> AnyResult<()>;

    /// Updates a previously spawned body.
    fn update_body(&mut self, entity: EntityId, appearance: &Appearance) -> AnyResult<()>;

    /// Plays a one-shot sound effect.
    fn play_sound(&mut self, cue: SoundCue, mix: SoundMix) -> AnyResult<()>;

    /// Switches the looping background track.
    fn play_music(&mut self, track: MusicTrack) -> AnyResult<()>;

    /// Draws one frame of an explosion; `progress` runs from 0 to 1.
    fn show_explosion(&mut self, position: Vec2, progress: f32) -> AnyResult<()>;

    /// Switches to a full-screen scene.
    fn show_scene(&mut self, scene: Scene, text: &SceneText) -> AnyResult<()>;

    /// Draws the gameplay overlay.
    fn draw_hud(&mut self, hud: &Hud) -> AnyResult<()>;
}

/// Keeps a backend in step with the world.
#[derive(Debug, Default)]
pub struct Presenter {
    spawned: BTreeSet<EntityId>,
    clock: f32,
}

impl Presenter {
    /// Creates a presenter with nothing on screen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bodies the backend currently holds sprites for.
    #[must_use]
    pub fn spawned_count(&self) -> usize {
        self.spawned.len()
    }

    /// Forwards the world's events for a frame to the backend.
    pub fn present_events<B: Backend>(
        &mut self,
        world: &World,
        events: &[Event],
        backend: &mut B,
    ) -> AnyResult<()> {
        for event in events {
            match event {
                Event::EntitySpawned {
                    entity,
                    kind,
                    position,
                } => self.spawn(world, *entity, *kind, *position, backend)?,
                Event::EntityDespawned { entity } | Event::EntityRemoved { entity } => {
                    self.destroy(*entity, backend)?;
                }
                Event::SoundPlayed { cue, mix } => backend
                    .play_sound(*cue, *mix)
                    .with_context(|| format!("failed to play {cue:?}"))?,
                Event::MusicChanged { track } => backend
                    .play_music(*track)
                    .with_context(|| format!("failed to switch music to {track:?}"))?,
                Event::SceneChanged { scene } => {
                    if *scene == Scene::Gameplay {
                        self.clear(backend)?;
                    }
                    backend
                        .show_scene(*scene, &SceneText::for_scene(*scene, world))
                        .with_context(|| format!("failed to show {scene:?}"))?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Pushes the current look of every spawned body and the overlay.
    pub fn sync<B: Backend>(
        &mut self,
        world: &World,
        dt: Duration,
        backend: &mut B,
    ) -> AnyResult<()> {
        self.clock += dt.as_secs_f32();
        if query::scene(world) != Scene::Gameplay {
            return Ok(());
        }

        for body in query::active_bodies(world) {
            if !self.spawned.contains(&body.entity) {
                debug!("skipping {}; not spawned on the backend", body.entity);
                continue;
            }
            let frame = match body.kind {
                BodyKind::Pylon { .. } => body.power,
                BodyKind::Drone(_) | BodyKind::Enemy(_) => body
                    .power
                    .zip(body.max_power)
                    .map(|(power, max)| power_bar_frame(power, max)),
                _ => None,
            };
            let appearance = Appearance {
                position: body.position,
                depth: body.position.y,
                visible: body.visible,
                sprite: SpriteKey::for_body(body.kind, body.shielded),
                animations: animations(&body),
                frame,
                tint: hurt_tint(body.hurt, self.clock),
            };
            backend
                .update_body(body.entity, &appearance)
                .with_context(|| format!("failed to update {}", body.entity))?;
        }

        if self.spawned.contains(&EntityId::PLAYER) {
            let player = query::player(world);
            let appearance = Appearance {
                position: player.position,
                depth: player.position.y,
                visible: !player.dead,
                sprite: SpriteKey::for_body(BodyKind::Player, false),
                animations: Animations {
                    base: Some(player_animation(Heading::from_direction(player.velocity))),
                    overlay: None,
                },
                frame: None,
                tint: hurt_tint(player.hurt_time > 0.0, self.clock),
            };
            backend
                .update_body(EntityId::PLAYER, &appearance)
                .context("failed to update the player")?;
        }

        for explosion in query::explosions(world) {
            backend.show_explosion(explosion.position, explosion.progress)?;
        }
        backend.draw_hud(&Hud::capture(world))
    }

    fn spawn<B: Backend>(
        &mut self,
        world: &World,
        entity: EntityId,
        kind: BodyKind,
        position: Vec2,
        backend: &mut B,
    ) -> AnyResult<()> {
        // Bodies re-enter when the player returns to their floor.
        self.destroy(entity, backend)?;
        let shielded = query::body(world, entity).is_some_and(|body| body.shielded);
        backend
            .spawn_body(entity, SpriteKey::for_body(kind, shielded), position)
            .with_context(|| format!("failed to spawn {entity} ({kind:?})"))?;
        let _ = self.spawned.insert(entity);
        Ok(())
    }

    fn destroy<B: Backend>(&mut self, entity: EntityId, backend: &mut B) -> AnyResult<()> {
        if self.spawned.remove(&entity) {
            backend
                .destroy_body(entity)
                .with_context(|| format!("failed to destroy {entity}"))?;
        }
        Ok(())
    }

    fn clear<B: Backend>(&mut self, backend: &mut B) -> AnyResult<()> {
        for entity in std::mem::take(&mut self.spawned) {
            backend
                .destroy_body(entity)
                .with_context(|| format!("failed to destroy {entity}"))?;
        }
        Ok(())
    }
}
