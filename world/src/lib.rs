#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation state for Dronewell.
//!
//! The world owns the player, every floor and every entity living on them.
//! Adapters drive it exclusively through [`apply`], feeding [`Command`]s and
//! reading back the [`Event`]s each command produced. Read-only views for
//! rendering and physics live in [`query`].
//!
//! A frame runs four passes in a fixed order: spawn, despawn, update and
//! post-update. Only objects scoped to the player's floor are spawned, and
//! only active objects update, so floors the player left stay frozen until
//! the player returns.

mod arena;
mod combat;
mod effects;
mod entity;
mod floor;
mod lifecycle;
mod pickups;
mod player;
mod projectile;
mod pylon;
mod unit;
mod units;

use std::time::Duration;

use dronewell_core::{
    BodyKind, Command, EnemyKind, EntityId, Event, Facing, FloorIndex, InputState,
    InteractableKind, MusicTrack, Scene, Score, SoundCue, SoundMix, DEFAULT_TICK_RATE,
};
use dronewell_system_behavior::TickContext;
use dronewell_system_floor_generation::{
    plan_boss_wave, populate_floor, EnemyPlacement, FloorLayout,
};
use dronewell_system_tick_scheduler::{Config as ClockConfig, TickClock};
use glam::Vec2;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

use crate::{
    arena::Arena,
    effects::Effects,
    entity::{Body, Category, Entity},
    floor::{Floor, Gate},
    lifecycle::{Lifecycle, Spatial},
    pickups::{elevator_button, POWER_CORE},
    player::Player,
    projectile::Bullet,
    pylon::{ChargeStep, Pylon, PYLON_MAX_POWER},
    unit::Combatant,
    units::{snap_to_tile, DroneLike, Tickable},
};

/// Seed used by [`Config::default`].
pub const DEFAULT_SEED: u64 = 0x0d2d_9e11_5eed_0001;

/// Construction parameters of a [`World`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    tick_rate: Duration,
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration with the given logic tick period and seed.
    #[must_use]
    pub const fn new(tick_rate: Duration, rng_seed: u64) -> Self {
        Self {
            tick_rate,
            rng_seed,
        }
    }

    /// Period between logic ticks.
    #[must_use]
    pub const fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Seed of the world's random stream.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE, DEFAULT_SEED)
    }
}

/// Represents the complete simulation state.
#[derive(Debug)]
pub struct World {
    config: Config,
    rng: ChaCha8Rng,
    clock: TickClock,
    scene: Scene,
    music: MusicTrack,
    input: InputState,
    score: Score,
    player: Player,
    entities: Arena<Entity>,
    floors: Vec<Floor>,
    effects: Effects,
}

impl World {
    /// Creates a world sitting in the main menu.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            clock: TickClock::new(ClockConfig::new(config.tick_rate)),
            scene: Scene::Menu,
            music: MusicTrack::Normal,
            input: InputState::default(),
            score: Score::default(),
            player: Player::new(),
            entities: Arena::new(),
            floors: Vec::new(),
            effects: Effects::default(),
        }
    }

    fn start_game(&mut self, out: &mut Vec<Event>) {
        self.clock = TickClock::new(ClockConfig::new(self.config.tick_rate));
        self.input = InputState::default();
        self.score = Score::default();
        self.player = Player::new();
        self.entities = Arena::new();
        self.floors.clear();
        self.effects = Effects::default();
        self.music = MusicTrack::Normal;
        info!("starting a new run");

        self.change_scene(Scene::Gameplay, out);
        out.push(Event::MusicChanged {
            track: MusicTrack::Normal,
        });
        out.push(Event::EntitySpawned {
            entity: EntityId::PLAYER,
            kind: BodyKind::Player,
            position: self.player.position,
        });
    }

    pub(crate) fn change_scene(&mut self, scene: Scene, out: &mut Vec<Event>) {
        info!("scene changed to {scene:?}");
        self.scene = scene;
        out.push(Event::SceneChanged { scene });
    }

    fn advance(&mut self, dt: Duration, out: &mut Vec<Event>) {
        out.push(Event::TimeAdvanced { dt });
        let ticked = self.clock.advance(dt);
        if ticked {
            out.push(Event::LogicTick {
                index: self.clock.ticks(),
            });
        }

        self.score.play_time = self.clock.elapsed().as_secs_f64();
        self.score.floors_cleared = self.score.floors_cleared.max(self.player.floor.get());

        let seconds = dt.as_secs_f32();
        self.ensure_floors(out);
        self.spawn_pass(out);
        self.despawn_pass(out);
        self.update_pass(seconds, ticked, out);
        self.post_update(out);
    }

    /// Generates every floor down to the player's.
    fn ensure_floors(&mut self, out: &mut Vec<Event>) {
        while self.floors.len() <= self.player.floor.get() as usize {
            let index = FloorIndex::new(u32::try_from(self.floors.len()).unwrap_or(u32::MAX));
            let layout = FloorLayout::roll(index, &mut self.rng);
            info!(
                "generated floor {index} with {} rooms",
                layout.room_count()
            );
            self.floors.push(Floor::new(layout));
            out.push(Event::FloorGenerated { floor: index });
        }
    }

    fn spawn_pass(&mut self, out: &mut Vec<Event>) {
        let current = self.player.floor;
        for id in self.ordered_ids(|entity| entity.should_spawn(current)) {
            let Some(entity) = self.entities.get_mut(id) else {
                continue;
            };
            let first = entity.lifecycle_mut().spawn();
            let shot = match entity.body {
                Body::Unit(_) => {
                    entity.position = snap_to_tile(entity.position);
                    false
                }
                Body::Bullet(_) => first,
                Body::Drop(_) | Body::Interactable(_) | Body::Pylon(_) => false,
            };
            let (kind, position) = (entity.body_kind(), entity.position);
            out.push(Event::EntitySpawned {
                entity: id,
                kind,
                position,
            });
            if shot {
                self.sound(SoundCue::Shoot, position, out);
            }
        }

        let Some(floor) = self
            .floor_mut(current)
            .filter(|floor| floor.should_spawn(current))
        else {
            return;
        };
        let _ = floor.spawn();
        let fresh = !floor.has_spawned_objects;
        debug!("floor {current} spawned");
        out.push(Event::FloorEntered { floor: current });
        if fresh {
            self.populate(current);
        }
    }

    /// Creates the generated population of a floor the first time it spawns.
    fn populate(&mut self, index: FloorIndex) {
        let Some(floor) = self.floors.get(index.get() as usize) else {
            return;
        };
        let Some(map) = floor.map() else {
            return;
        };
        let population = populate_floor(&floor.layout, map, &mut self.rng);
        debug!(
            "populating floor {index}: {} enemies, {} power cores, {} pylons",
            population.enemies.len(),
            population.power_cores.len(),
            population.pylons.len()
        );

        for placement in population.enemies {
            let _ = self.insert_enemy(placement, index);
        }
        for position in population.power_cores {
            let core = InteractableKind::PowerCore { power: POWER_CORE };
            let _ = self
                .entities
                .insert(Entity::new(index, position, Body::Interactable(core)));
        }
        for button in population.buttons {
            let kind = elevator_button(button.direction, button.main);
            let _ = self
                .entities
                .insert(Entity::new(index, button.position, Body::Interactable(kind)));
        }
        for pylon in population.pylons {
            let _ = self.entities.insert(Entity::new(
                index,
                pylon.position,
                Body::Pylon(Pylon::new(pylon.boss)),
            ));
        }
        if let Some(position) = population.boss {
            let boss = self.insert_enemy(
                EnemyPlacement {
                    kind: EnemyKind::Boss,
                    position,
                    facing: Facing::Down,
                },
                index,
            );
            info!("supervisor {boss} waits on floor {index}");
        }

        if let Some(floor) = self.floor_mut(index) {
            floor.has_spawned_objects = true;
        }
    }

    fn insert_enemy(&mut self, placement: EnemyPlacement, floor: FloorIndex) -> EntityId {
        let unit = DroneLike::enemy(placement.kind, placement.facing, floor.section_number());
        self.entities
            .insert(Entity::new(floor, placement.position, Body::Unit(unit)))
    }

    fn despawn_pass(&mut self, out: &mut Vec<Event>) {
        let current = self.player.floor;
        for id in self.ordered_ids(|entity| entity.should_despawn(current)) {
            if let Some(entity) = self.entities.get_mut(id) {
                entity.lifecycle_mut().despawn();
                out.push(Event::EntityDespawned { entity: id });
            }
        }
        for floor in &mut self.floors {
            if floor.should_despawn(current) {
                debug!("floor {} despawned", floor.index());
                floor.despawn();
            }
        }
    }

    fn update_pass(&mut self, dt: f32, ticked: bool, out: &mut Vec<Event>) {
        self.update_player(dt, out);

        for id in self.ordered_ids(|entity| entity.is_active()) {
            // Earlier updates in this pass may have removed the entity.
            let Some(category) = self
                .entities
                .get(id)
                .filter(|entity| entity.is_active())
                .map(Entity::category)
            else {
                continue;
            };
            match category {
                Category::Drone | Category::Enemy => self.update_unit(id, dt, ticked),
                Category::Bullet => self.update_bullet(id, dt, out),
                Category::Pylon => self.update_pylon(id, dt, out),
                Category::Drop | Category::Interactable => {}
            }
        }

        self.update_effects(dt, out);
        self.update_floor(out);
        if ticked {
            self.update_music(out);
        }
    }

    fn update_unit(&mut self, id: EntityId, dt: f32, ticked: bool) {
        let Some(entity) = self.entities.get_mut(id) else {
            return;
        };
        entity.integrate(dt);
        let Some(unit) = entity.unit_mut() else {
            return;
        };
        unit.unit.cool_down(dt);
        if !ticked || unit.unit.is_dead() {
            return;
        }

        let Some(ctx) = self.tick_context(id) else {
            return;
        };
        let mut commands = Vec::new();
        let Self { entities, rng, .. } = self;
        if let Some(unit) = entities.get_mut(id).and_then(Entity::unit_mut) {
            unit.tick(&ctx, rng, &mut commands);
        }
        for command in commands {
            self.apply_unit_command(command);
        }
    }

    fn update_bullet(&mut self, id: EntityId, dt: f32, out: &mut Vec<Event>) {
        let target = Some(self.player.position);
        let Some(entity) = self.entities.get_mut(id) else {
            return;
        };
        let position = entity.position;
        let Body::Bullet(bullet) = &mut entity.body else {
            return;
        };
        let alive = bullet.advance(dt, position, target);
        entity.velocity = bullet.velocity();
        if !alive {
            self.destroy(id, out);
            return;
        }
        entity.integrate(dt);
    }

    fn update_pylon(&mut self, id: EntityId, dt: f32, out: &mut Vec<Event>) {
        let player = self.player.position;
        let Some(entity) = self.entities.get_mut(id) else {
            return;
        };
        let (position, floor) = (entity.position, entity.floor());
        let Body::Pylon(pylon) = &mut entity.body else {
            return;
        };
        if !Pylon::in_range(position, player) {
            return;
        }
        let boss = pylon.boss;
        let steps = pylon.charge(dt);

        for step in steps {
            match step {
                ChargeStep::Charged(power) => {
                    self.sound(SoundCue::Click, position, out);
                    out.push(Event::PylonCharged { entity: id, power });
                }
                ChargeStep::Powered => {
                    self.sound(SoundCue::PowerUp, position, out);
                    out.push(Event::PylonCharged {
                        entity: id,
                        power: PYLON_MAX_POWER,
                    });
                    out.push(Event::PylonPowered { entity: id, boss });
                    info!("pylon {id} fully powered");
                    let first_boss_pylon =
                        floor.is_some_and(|floor| self.powered_boss_pylons(floor) == 1);
                    if boss && first_boss_pylon {
                        self.alert("Power Surge! Drones have no power cost!".to_owned(), out);
                    }
                }
            }
        }
    }

    fn update_effects(&mut self, dt: f32, out: &mut Vec<Event>) {
        self.effects.age(dt);
        let (blasts, finished) = self.effects.advance_boss_deaths(dt, &mut self.rng);
        for position in blasts {
            self.explode(position, out);
        }
        for death in finished {
            self.finish_boss(death, out);
        }
    }

    /// Progression checks for the floor the player stands on.
    fn update_floor(&mut self, out: &mut Vec<Event>) {
        let index = self.player.floor;
        let Some(floor) = self.floor(index).filter(|floor| floor.is_active()) else {
            return;
        };
        let boss_arena = index.is_boss_floor() && floor.has_spawned_objects;
        let room_open = floor.has_opened_boss_room;
        let exit_open = floor.has_opened_boss_elevator;
        let unlocked = floor.has_unlocked_elevator;
        let key = floor.has_found_key;

        if boss_arena {
            if !room_open && self.pylons_on(index, false).all(Pylon::is_powered) {
                self.open_gate(index, Gate::BossRoom, out);
            }
            let boss_alive = self
                .entities
                .iter()
                .any(|(_, entity)| entity.is_on(index) && entity.is_boss());
            if !exit_open && !boss_alive {
                self.open_gate(index, Gate::BossElevator, out);
            }
        }

        if !unlocked {
            let enemies_left = self.entities.iter().any(|(_, entity)| {
                entity.is_on(index) && entity.enemy().is_some_and(|enemy| !enemy.unit.is_dead())
            });
            if !enemies_left || key {
                if let Some(floor) = self.floor_mut(index) {
                    floor.has_unlocked_elevator = true;
                }
                info!("elevator on floor {index} unlocked");
                self.alert("Elevator has been unlocked".to_owned(), out);
                out.push(Event::ElevatorUnlocked { floor: index });
            }
        }
    }

    fn open_gate(&mut self, index: FloorIndex, gate: Gate, out: &mut Vec<Event>) {
        if !self.floor_mut(index).is_some_and(|floor| floor.open_gate(gate)) {
            return;
        }
        info!("{gate:?} gate opened on floor {index}");
        match gate {
            Gate::BossRoom => {
                self.alert("The supervisor drone has activated!".to_owned(), out);
                out.push(Event::BossRoomOpened { floor: index });
            }
            Gate::BossElevator => {
                self.alert("The supervisor drone was defeated!".to_owned(), out);
                out.push(Event::BossElevatorOpened { floor: index });
            }
        }
    }

    fn update_music(&mut self, out: &mut Vec<Event>) {
        let index = self.player.floor;
        let room_open = self
            .floor(index)
            .is_some_and(|floor| floor.has_opened_boss_room);
        let boss_present = self
            .entities
            .iter()
            .any(|(_, entity)| entity.is_active() && entity.is_on(index) && entity.is_boss());
        let track = if room_open && boss_present {
            MusicTrack::Boss
        } else {
            MusicTrack::Normal
        };
        if track != self.music {
            info!("music switched to {track:?}");
            self.music = track;
            out.push(Event::MusicChanged { track });
        }
    }

    /// Applies a command emitted by a unit behavior.
    pub(crate) fn apply_unit_command(&mut self, command: Command) {
        match command {
            Command::TickUpkeep { entity } => {
                let surge = self
                    .entities
                    .get(entity)
                    .and_then(Entity::floor)
                    .is_some_and(|floor| self.power_surge(floor));
                let Some(target) = self.entities.get_mut(entity) else {
                    warn_stale(entity, "upkeep");
                    return;
                };
                target.position = snap_to_tile(target.position);
                if let Some(unit) = target.unit_mut() {
                    if unit.drone_kind().is_some() && !surge {
                        unit.unit.drain(1);
                    }
                }
            }
            Command::SetFacing { entity, facing } => {
                match self.entities.get_mut(entity).and_then(Entity::unit_mut) {
                    Some(unit) => unit.facing = facing,
                    None => warn_stale(entity, "facing change"),
                }
            }
            Command::SetVelocity { entity, velocity } => match self.entities.get_mut(entity) {
                Some(target) => target.velocity = velocity,
                None => warn_stale(entity, "velocity change"),
            },
            Command::FireProjectile {
                source,
                origin,
                direction,
                allegiance,
                spec,
            } => {
                let Some(floor) = self.entities.get(source).and_then(Entity::floor) else {
                    warn_stale(source, "projectile launch");
                    return;
                };
                let bullet = Bullet::new(spec, allegiance, direction);
                let id = self
                    .entities
                    .insert(Entity::new(floor, origin, Body::Bullet(bullet)));
                debug!("{source} fired {id}");
            }
            Command::SpawnEnemyWave { source, budget } => self.spawn_wave(source, budget),
            other => warn!("{other:?} cannot be issued by a unit"),
        }
    }

    fn spawn_wave(&mut self, source: EntityId, budget: u32) {
        let Some((floor, origin)) = self
            .entities
            .get(source)
            .and_then(|entity| Some((entity.floor()?, entity.position)))
        else {
            warn_stale(source, "enemy wave");
            return;
        };
        let occupied: Vec<Vec2> = self
            .entities
            .iter()
            .filter(|(_, entity)| entity.is_on(floor) && entity.enemy().is_some())
            .map(|(_, entity)| entity.position)
            .collect();
        let Some(map) = self.floors.get(floor.get() as usize).and_then(Floor::map) else {
            return;
        };
        let wave = plan_boss_wave(map, origin, &occupied, budget, &mut self.rng);
        info!("{source} summoned {} enemies with budget {budget}", wave.len());
        for placement in wave {
            let _ = self.insert_enemy(placement, floor);
        }
    }

    /// Snapshot a unit behavior decides from.
    pub(crate) fn tick_context(&self, id: EntityId) -> Option<TickContext> {
        let entity = self.entities.get(id)?;
        let unit = entity.unit()?;
        let floor = entity.floor()?;
        let state = self.floor(floor)?;
        Some(TickContext {
            entity: id,
            position: entity.position,
            facing: unit.facing,
            allegiance: unit.kind.allegiance(),
            power: unit.unit().power(),
            player_position: (self.player.floor == floor).then_some(self.player.position),
            boss_room_open: state.has_opened_boss_room,
            powered_boss_pylons: self.powered_boss_pylons(floor),
            section: floor.section_number(),
        })
    }

    fn pylons_on(&self, floor: FloorIndex, boss: bool) -> impl Iterator<Item = &Pylon> + '_ {
        self.entities.iter().filter_map(move |(_, entity)| {
            entity
                .pylon()
                .filter(|pylon| pylon.boss == boss && entity.is_on(floor))
        })
    }

    fn powered_boss_pylons(&self, floor: FloorIndex) -> u32 {
        let powered = self
            .pylons_on(floor, true)
            .filter(|pylon| pylon.is_powered())
            .count();
        u32::try_from(powered).unwrap_or(u32::MAX)
    }

    /// Any powered boss pylon makes drones free to deploy and run.
    pub(crate) fn power_surge(&self, floor: FloorIndex) -> bool {
        self.pylons_on(floor, true).any(Pylon::is_powered)
    }

    /// The supervisor ignores damage until every boss pylon is powered.
    pub(crate) fn boss_shielded(&self, floor: FloorIndex) -> bool {
        !self.pylons_on(floor, true).all(Pylon::is_powered)
    }

    pub(crate) fn floor(&self, index: FloorIndex) -> Option<&Floor> {
        self.floors.get(index.get() as usize)
    }

    pub(crate) fn floor_mut(&mut self, index: FloorIndex) -> Option<&mut Floor> {
        self.floors.get_mut(index.get() as usize)
    }

    /// Entities matching `filter`, grouped by category in update order.
    pub(crate) fn ordered_ids(&self, filter: impl Fn(&Entity) -> bool) -> Vec<EntityId> {
        let mut ids: Vec<(Category, EntityId)> = self
            .entities
            .iter()
            .filter(|(_, entity)| filter(entity))
            .map(|(id, entity)| (entity.category(), id))
            .collect();
        ids.sort_by_key(|(category, _)| *category);
        ids.into_iter().map(|(_, id)| id).collect()
    }

    pub(crate) fn sound(&self, cue: SoundCue, source: Vec2, out: &mut Vec<Event>) {
        out.push(Event::SoundPlayed {
            cue,
            mix: SoundMix::spatial(source, self.player.position),
        });
    }

    pub(crate) fn alert(&mut self, message: String, out: &mut Vec<Event>) {
        self.effects.alert(message.clone());
        out.push(Event::AlertRaised { message });
    }

    /// Removes an entity for good, invalidating its handle.
    pub(crate) fn destroy(&mut self, id: EntityId, out: &mut Vec<Event>) {
        if self.entities.remove(id).is_some() {
            out.push(Event::EntityRemoved { entity: id });
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

fn warn_stale(id: EntityId, what: &str) {
    warn!("ignoring {what} for stale handle {id}");
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartGame => world.start_game(out_events),
        Command::SetInput { input } => world.input = input,
        command if world.scene != Scene::Gameplay => {
            debug!("ignoring {command:?} outside gameplay");
        }
        Command::Tick { dt } => world.advance(dt, out_events),
        Command::ReportOverlap { first, second } => {
            world.resolve_overlap(first, second, out_events);
        }
        Command::ReportWallCollision {
            entity,
            blocked,
            resolved,
        } => world.resolve_wall_collision(entity, blocked, resolved, out_events),
        command @ (Command::TickUpkeep { .. }
        | Command::SetFacing { .. }
        | Command::SetVelocity { .. }
        | Command::FireProjectile { .. }
        | Command::SpawnEnemyWave { .. }) => world.apply_unit_command(command),
    }
}

/// Read-only views of the world for adapters.
pub mod query {
    use std::time::Duration;

    use dronewell_core::{
        BodyKind, DroneKind, EntityId, Facing, FloorIndex, InteractableKind, MusicTrack, Scene,
        Score, Scope,
    };
    use dronewell_system_floor_generation::TileMap;
    use glam::Vec2;

    use super::{
        effects::EXPLOSION_LIFETIME,
        entity::{Body, Entity},
        lifecycle::Lifecycle,
        player::PLAYER_SIZE,
        pylon::PYLON_MAX_POWER,
        unit::Combatant,
        World,
    };

    /// Scene the world is currently in.
    #[must_use]
    pub fn scene(world: &World) -> Scene {
        world.scene
    }

    /// Statistics of the current or last run.
    #[must_use]
    pub fn score(world: &World) -> Score {
        world.score
    }

    /// Music track that should be playing.
    #[must_use]
    pub fn music(world: &World) -> MusicTrack {
        world.music
    }

    /// Simulated time since the run started.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.clock.elapsed()
    }

    /// Logic ticks fired since the run started.
    #[must_use]
    pub fn tick_count(world: &World) -> u64 {
        world.clock.ticks()
    }

    /// Floor the player stands on.
    #[must_use]
    pub fn current_floor(world: &World) -> FloorIndex {
        world.player.floor
    }

    /// Number of floors generated so far.
    #[must_use]
    pub fn floor_count(world: &World) -> usize {
        world.floors.len()
    }

    /// State of the player.
    #[derive(Clone, Debug, PartialEq)]
    pub struct PlayerSnapshot {
        /// Centre of the player's body.
        pub position: Vec2,
        /// Current velocity.
        pub velocity: Vec2,
        /// Side length of the player's body.
        pub size: f32,
        /// Direction the player faces.
        pub facing: Facing,
        /// Floor the player stands on.
        pub floor: FloorIndex,
        /// Current power.
        pub power: u32,
        /// Maximum power.
        pub max_power: u32,
        /// Seconds left in the invulnerability window.
        pub hurt_time: f32,
        /// Whether the player has been destroyed.
        pub dead: bool,
        /// Drone schematics the player can deploy.
        pub schematics: Vec<DroneKind>,
        /// Schematic the next deploy will use.
        pub selected: Option<DroneKind>,
    }

    /// Captures the player's state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let player = &world.player;
        PlayerSnapshot {
            position: player.position,
            velocity: player.velocity,
            size: PLAYER_SIZE,
            facing: player.facing,
            floor: player.floor,
            power: player.unit().power(),
            max_power: player.unit().max_power(),
            hurt_time: player.unit().hurt_time(),
            dead: player.unit().is_dead(),
            schematics: player.schematics.clone(),
            selected: player.selected(),
        }
    }

    /// State of a single arena entity.
    #[derive(Clone, Debug, PartialEq)]
    pub struct BodySnapshot {
        /// Handle of the entity.
        pub entity: EntityId,
        /// What the entity is.
        pub kind: BodyKind,
        /// Floor binding of the entity.
        pub scope: Scope,
        /// Whether the entity is spawned and updating.
        pub active: bool,
        /// Whether the entity should be drawn; unusable elevator buttons hide.
        pub visible: bool,
        /// Centre of the entity's body.
        pub position: Vec2,
        /// Current velocity.
        pub velocity: Vec2,
        /// Side length of the entity's square body.
        pub size: f32,
        /// Facing of drone-like units.
        pub facing: Option<Facing>,
        /// Power of units and pylons.
        pub power: Option<u32>,
        /// Maximum power of units and pylons.
        pub max_power: Option<u32>,
        /// Whether the unit is inside its invulnerability window.
        pub hurt: bool,
        /// Whether a supervisor is protected by its unpowered boss pylons.
        pub shielded: bool,
        /// Whether the unit has been destroyed.
        pub dead: bool,
    }

    fn snapshot(world: &World, id: EntityId, entity: &Entity) -> BodySnapshot {
        let (facing, power, max_power, hurt, dead) = match &entity.body {
            Body::Unit(unit) => (
                Some(unit.facing),
                Some(unit.unit().power()),
                Some(unit.unit().max_power()),
                unit.unit().is_invulnerable(),
                unit.unit().is_dead(),
            ),
            Body::Pylon(pylon) => (None, Some(pylon.power), Some(PYLON_MAX_POWER), false, false),
            Body::Bullet(_) | Body::Drop(_) | Body::Interactable(_) => {
                (None, None, None, false, false)
            }
        };
        let visible = match entity.body {
            Body::Interactable(InteractableKind::ElevatorButton { direction, main }) => entity
                .floor()
                .and_then(|floor| world.floor(floor))
                .is_some_and(|floor| floor.elevator(direction, main).is_ok()),
            _ => true,
        };
        let shielded = entity.is_boss()
            && entity
                .floor()
                .is_some_and(|floor| world.boss_shielded(floor));
        BodySnapshot {
            entity: id,
            kind: entity.body_kind(),
            scope: entity.scope,
            active: entity.is_active(),
            visible,
            position: entity.position,
            velocity: entity.velocity,
            size: entity.size(),
            facing,
            power,
            max_power,
            hurt,
            shielded,
            dead,
        }
    }

    /// Captures every entity, in update order.
    #[must_use]
    pub fn bodies(world: &World) -> Vec<BodySnapshot> {
        world
            .ordered_ids(|_| true)
            .into_iter()
            .filter_map(|id| body(world, id))
            .collect()
    }

    /// Captures the entities spawned on the player's floor, in update order.
    #[must_use]
    pub fn active_bodies(world: &World) -> Vec<BodySnapshot> {
        world
            .ordered_ids(|entity| entity.is_active())
            .into_iter()
            .filter_map(|id| body(world, id))
            .collect()
    }

    /// Captures a single entity, if its handle is still live.
    #[must_use]
    pub fn body(world: &World, id: EntityId) -> Option<BodySnapshot> {
        world
            .entities
            .get(id)
            .map(|entity| snapshot(world, id, entity))
    }

    /// Progression latches of a generated floor.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct FloorSnapshot {
        /// Floor described.
        pub index: FloorIndex,
        /// Rooms carved into the floor.
        pub room_count: usize,
        /// Whether the player currently stands on the floor.
        pub active: bool,
        /// Whether the floor has created its population.
        pub has_spawned_objects: bool,
        /// Whether the floor's elevator key was collected.
        pub has_found_key: bool,
        /// Whether the hub elevator may travel down.
        pub has_unlocked_elevator: bool,
        /// Whether the boss room gate has opened.
        pub has_opened_boss_room: bool,
        /// Whether the boss arena exit has opened.
        pub has_opened_boss_elevator: bool,
    }

    /// Captures a generated floor.
    #[must_use]
    pub fn floor(world: &World, index: FloorIndex) -> Option<FloorSnapshot> {
        let floor = world.floor(index)?;
        Some(FloorSnapshot {
            index,
            room_count: floor.layout.room_count(),
            active: floor.is_active(),
            has_spawned_objects: floor.has_spawned_objects,
            has_found_key: floor.has_found_key,
            has_unlocked_elevator: floor.has_unlocked_elevator,
            has_opened_boss_room: floor.has_opened_boss_room,
            has_opened_boss_elevator: floor.has_opened_boss_elevator,
        })
    }

    /// Collision map of the player's floor, once it has spawned.
    #[must_use]
    pub fn tile_map(world: &World) -> Option<&TileMap> {
        world.floor(world.player.floor)?.map()
    }

    /// Messages of the alerts still on screen, oldest first.
    #[must_use]
    pub fn alerts(world: &World) -> Vec<&str> {
        world
            .effects
            .alerts()
            .iter()
            .map(|alert| alert.message.as_str())
            .collect()
    }

    /// A running explosion effect.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct ExplosionSnapshot {
        /// Centre of the blast.
        pub position: Vec2,
        /// Fraction of the effect already played, in `0.0..=1.0`.
        pub progress: f32,
    }

    /// Captures the explosions still playing.
    #[must_use]
    pub fn explosions(world: &World) -> Vec<ExplosionSnapshot> {
        world
            .effects
            .explosions()
            .iter()
            .map(|explosion| ExplosionSnapshot {
                position: explosion.position,
                progress: (1.0 - explosion.remaining / EXPLOSION_LIFETIME).clamp(0.0, 1.0),
            })
            .collect()
    }

    /// Hint describing what the primary action would do, prefixed with its key.
    #[must_use]
    pub fn context_hint(world: &World) -> Option<String> {
        world.context_hint()
    }
}
