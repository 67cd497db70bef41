use std::time::Duration;

use anyhow::Result as AnyResult;
use dronewell_core::{
    BodyKind, Command, EntityId, Event, InputState, MusicTrack, Scene, SoundCue, SoundMix,
    DEFAULT_TICK_RATE,
};
use dronewell_presentation::{
    Appearance, Backend, Hud, Presenter, SceneText, SpriteKey, CONTROLS_HELP, MENU_TEXT,
};
use dronewell_world::{apply, Config, World};
use glam::Vec2;

#[derive(Debug, Default)]
struct Recorder {
    spawned: Vec<(EntityId, SpriteKey)>,
    destroyed: Vec<EntityId>,
    updated: Vec<(EntityId, Appearance)>,
    sounds: Vec<SoundCue>,
    music: Vec<MusicTrack>,
    scenes: Vec<(Scene, SceneText)>,
    huds: Vec<Hud>,
}

impl Backend for Recorder {
    fn spawn_body(&mut self, entity: EntityId, sprite: SpriteKey, _: Vec2) -> AnyResult<()> {
        self.spawned.push((entity, sprite));
        Ok(())
    }

    fn destroy_body(&mut self, entity: EntityId) -> AnyResult<()> {
        self.destroyed.push(entity);
        Ok(())
    }

    fn update_body(&mut self, entity: EntityId, appearance: &Appearance) -> AnyResult<()> {
        self.updated.push((entity, appearance.clone()));
        Ok(())
    }

    fn play_sound(&mut self, cue: SoundCue, _: SoundMix) -> AnyResult<()> {
        self.sounds.push(cue);
        Ok(())
    }

    fn play_music(&mut self, track: MusicTrack) -> AnyResult<()> {
        self.music.push(track);
        Ok(())
    }

    fn show_explosion(&mut self, _: Vec2, _: f32) -> AnyResult<()> {
        Ok(())
    }

    fn show_scene(&mut self, scene: Scene, text: &SceneText) -> AnyResult<()> {
        self.scenes.push((scene, text.clone()));
        Ok(())
    }

    fn draw_hud(&mut self, hud: &Hud) -> AnyResult<()> {
        self.huds.push(hud.clone());
        Ok(())
    }
}

struct Harness {
    world: World,
    presenter: Presenter,
    backend: Recorder,
}

impl Harness {
    fn new() -> Self {
        Self {
            world: World::new(Config::new(DEFAULT_TICK_RATE, 42)),
            presenter: Presenter::new(),
            backend: Recorder::default(),
        }
    }

    fn frame(&mut self, commands: impl IntoIterator<Item = Command>, dt: Duration) {
        let mut events = Vec::new();
        for command in commands {
            apply(&mut self.world, command, &mut events);
        }
        apply(&mut self.world, Command::Tick { dt }, &mut events);
        self.present(&events, dt);
    }

    fn present(&mut self, events: &[Event], dt: Duration) {
        self.presenter
            .present_events(&self.world, events, &mut self.backend)
            .expect("recorder never fails");
        self.presenter
            .sync(&self.world, dt, &mut self.backend)
            .expect("recorder never fails");
    }
}

#[test]
fn starting_a_run_spawns_sprites_and_starts_the_music() {
    let mut harness = Harness::new();
    harness.frame([Command::StartGame], Duration::from_millis(16));

    let backend = &harness.backend;
    let player = SpriteKey::for_body(BodyKind::Player, false);
    assert!(backend.spawned.contains(&(EntityId::PLAYER, player)));
    assert_eq!(backend.music, vec![MusicTrack::Normal]);
    assert_eq!(backend.scenes.len(), 1);
    assert_eq!(backend.scenes[0].0, Scene::Gameplay);
    assert_eq!(harness.presenter.spawned_count(), backend.spawned.len());

    let hud = backend.huds.last().expect("hud drawn during gameplay");
    assert!(hud.help.ends_with(CONTROLS_HELP));
    assert!(backend
        .updated
        .iter()
        .any(|(entity, _)| *entity == EntityId::PLAYER));
}

#[test]
fn every_update_targets_a_spawned_body() {
    let mut harness = Harness::new();
    harness.frame([Command::StartGame], Duration::from_millis(16));
    for _ in 0..120 {
        harness.frame([], Duration::from_millis(16));
    }

    let backend = &harness.backend;
    for (entity, _) in &backend.updated {
        assert!(
            backend.spawned.iter().any(|(spawned, _)| spawned == entity),
            "{entity} updated without being spawned"
        );
    }
}

#[test]
fn restarting_clears_the_previous_sprites() {
    let mut harness = Harness::new();
    harness.frame([Command::StartGame], Duration::from_millis(16));
    let before = harness.presenter.spawned_count();
    assert!(before > 0);

    let mut events = Vec::new();
    apply(&mut harness.world, Command::StartGame, &mut events);
    harness
        .presenter
        .present_events(&harness.world, &events, &mut harness.backend)
        .expect("recorder never fails");

    assert_eq!(harness.backend.destroyed.len(), before);
    // Only the player comes back before the next tick populates the floor.
    assert_eq!(harness.presenter.spawned_count(), 1);
}

#[test]
fn deploying_plays_the_shot_cue_once_the_turret_fires() {
    let mut harness = Harness::new();
    harness.frame([Command::StartGame], Duration::from_millis(16));
    let input = InputState {
        primary: true,
        ..InputState::default()
    };
    harness.frame([Command::SetInput { input }], Duration::from_millis(16));
    harness.frame(
        [Command::SetInput {
            input: InputState::default(),
        }],
        Duration::from_millis(16),
    );
    for _ in 0..40 {
        harness.frame([], Duration::from_millis(50));
    }
    assert!(harness.backend.sounds.contains(&SoundCue::Shoot));
}

#[test]
fn menu_text_is_static() {
    let world = World::default();
    let text = SceneText::for_scene(Scene::Menu, &world);
    assert!(text.title.is_empty());
    assert_eq!(text.body, MENU_TEXT);
}
