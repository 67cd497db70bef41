#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Dronewell simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for presenters
//! and systems to react to. Systems read immutable context and respond
//! exclusively with new command batches.

mod catalog;
pub mod math;

use std::{fmt, time::Duration};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use catalog::{DroneKind, DroneSchematic, EnemyKind, EnemySchematic, MovementType};
pub use math::SoundMix;

/// Side length of a map tile in world units.
pub const TILE_SIZE: f32 = 32.0;
/// Logical screen width used for sound attenuation.
pub const SCREEN_WIDTH: f32 = 640.0;
/// Logical screen height.
pub const SCREEN_HEIGHT: f32 = 360.0;
/// Number of floors grouped into one difficulty section.
pub const FLOORS_PER_SECTION: u32 = 5;
/// Position of the boss floor within a section.
pub const BOSS_FLOOR_NUMBER: u32 = 4;
/// Bosses that must fall before the run is won.
pub const BOSSES_TO_WIN: u32 = 5;
/// Default interval between logic ticks.
pub const DEFAULT_TICK_RATE: Duration = Duration::from_millis(500);
/// Component magnitude above which a direction leans toward an axis.
pub const HEADING_THRESHOLD: f32 = 0.25;

/// Generation-checked handle addressing a simulated entity.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

impl EntityId {
    /// Reserved handle of the player singleton.
    pub const PLAYER: Self = Self::new(u32::MAX, 0);

    /// Creates a handle from a slot index and its generation.
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index of the entity within its arena.
    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Generation of the slot when the handle was issued.
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Reports whether the handle addresses the player.
    #[must_use]
    pub const fn is_player(&self) -> bool {
        self.index == u32::MAX
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_player() {
            f.write_str("player")
        } else {
            write!(f, "#{}v{}", self.index, self.generation)
        }
    }
}

/// Zero-based index of a floor within the dungeon.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct FloorIndex(u32);

impl FloorIndex {
    /// The topmost floor where every run begins.
    pub const TOP: Self = Self(0);

    /// Creates a new floor index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Retrieves the raw index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Position of the floor within its section.
    #[must_use]
    pub const fn floor_number(&self) -> u32 {
        self.0 % FLOORS_PER_SECTION
    }

    /// Difficulty section the floor belongs to.
    #[must_use]
    pub const fn section_number(&self) -> u32 {
        self.0 / FLOORS_PER_SECTION
    }

    /// Reports whether the floor hosts a boss arena.
    #[must_use]
    pub const fn is_boss_floor(&self) -> bool {
        self.floor_number() == BOSS_FLOOR_NUMBER
    }

    /// Reports whether the floor opens a section.
    #[must_use]
    pub const fn is_top_floor(&self) -> bool {
        self.floor_number() == 0
    }

    /// Floor reached by travelling `delta` floors, if it exists.
    #[must_use]
    pub fn offset(&self, delta: i32) -> Option<Self> {
        self.0.checked_add_signed(delta).map(Self)
    }
}

impl fmt::Display for FloorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Floor binding that decides when an entity simulates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Entity only simulates while the player stands on this floor.
    Floor(FloorIndex),
    /// Entity simulates regardless of the player's floor.
    Global,
}

impl Scope {
    /// Reports whether the scope is live when the player is on `current`.
    #[must_use]
    pub fn is_live_on(&self, current: FloorIndex) -> bool {
        match self {
            Self::Floor(floor) => *floor == current,
            Self::Global => true,
        }
    }
}

/// Four-way facing used by units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Toward negative y.
    Up,
    /// Toward positive x.
    Right,
    /// Toward positive y.
    Down,
    /// Toward negative x.
    Left,
}

impl Facing {
    /// Every facing in clockwise order starting from up.
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Facing a quarter turn clockwise.
    #[must_use]
    pub const fn clockwise(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    /// Facing pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Unit vector along the facing.
    #[must_use]
    pub const fn vector(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Right => Vec2::new(1.0, 0.0),
            Self::Down => Vec2::new(0.0, 1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
        }
    }

    /// Perpendicular spread applied to the outer bullets of a fan.
    #[must_use]
    pub const fn fan_offset(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(0.0, 1.0),
            Self::Down => Vec2::new(1.0, 0.0),
            Self::Left => Vec2::new(0.0, -1.0),
        }
    }

    /// Diagonal travel direction of spinning units.
    #[must_use]
    pub const fn spin_vector(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(1.0, -1.0),
            Self::Right => Vec2::new(1.0, 1.0),
            Self::Down => Vec2::new(-1.0, 1.0),
            Self::Left => Vec2::new(-1.0, -1.0),
        }
    }

    /// Facing along the dominant axis of `delta`, preferring vertical on ties.
    #[must_use]
    pub fn toward(delta: Vec2) -> Self {
        if delta.x.abs() > delta.y.abs() {
            Self::horizontal(delta.x)
        } else {
            Self::vertical(delta.y)
        }
    }

    /// Horizontal facing matching the sign of `dx`.
    #[must_use]
    pub fn horizontal(dx: f32) -> Self {
        if dx < 0.0 {
            Self::Left
        } else {
            Self::Right
        }
    }

    /// Vertical facing matching the sign of `dy`.
    #[must_use]
    pub fn vertical(dy: f32) -> Self {
        if dy < 0.0 {
            Self::Up
        } else {
            Self::Down
        }
    }

    /// Lower-case name used in keys and messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
        }
    }
}

impl Default for Facing {
    fn default() -> Self {
        Self::Down
    }
}

/// Nine-way bucket of an arbitrary direction vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// No dominant direction.
    CenterCenter,
    /// Up and to the left.
    UpLeft,
    /// Straight up.
    UpCenter,
    /// Up and to the right.
    UpRight,
    /// Straight right.
    CenterRight,
    /// Down and to the right.
    DownRight,
    /// Straight down.
    DownCenter,
    /// Down and to the left.
    DownLeft,
    /// Straight left.
    CenterLeft,
}

impl Heading {
    /// Buckets each component of `direction` against [`HEADING_THRESHOLD`].
    #[must_use]
    pub fn from_direction(direction: Vec2) -> Self {
        let vertical = bucket(direction.y);
        let horizontal = bucket(direction.x);
        match (vertical, horizontal) {
            (-1, -1) => Self::UpLeft,
            (-1, 0) => Self::UpCenter,
            (-1, _) => Self::UpRight,
            (0, -1) => Self::CenterLeft,
            (0, 0) => Self::CenterCenter,
            (0, _) => Self::CenterRight,
            (_, -1) => Self::DownLeft,
            (_, 0) => Self::DownCenter,
            _ => Self::DownRight,
        }
    }

    /// Animation key fragment such as `up-left`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::CenterCenter => "center-center",
            Self::UpLeft => "up-left",
            Self::UpCenter => "up-center",
            Self::UpRight => "up-right",
            Self::CenterRight => "center-right",
            Self::DownRight => "down-right",
            Self::DownCenter => "down-center",
            Self::DownLeft => "down-left",
            Self::CenterLeft => "center-left",
        }
    }
}

fn bucket(component: f32) -> i8 {
    if component < -HEADING_THRESHOLD {
        -1
    } else if component > HEADING_THRESHOLD {
        1
    } else {
        0
    }
}

/// Side of the conflict a unit or projectile belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Allegiance {
    /// The player and the player's drones.
    Friendly,
    /// Enemies and the boss.
    Hostile,
}

impl Allegiance {
    /// Reports whether a projectile of this allegiance may hit `target`.
    #[must_use]
    pub fn can_hit(self, target: Self) -> bool {
        self != target
    }
}

/// Projectile families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Straight-line bullet.
    Pulse,
    /// Bullet steering toward the player early in its life.
    Tracker,
}

/// Ballistics of a projectile at launch time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSpec {
    kind: ProjectileKind,
    speed: f32,
    lifetime: f32,
    damage: u32,
}

impl ProjectileSpec {
    /// Single gun shot.
    pub const GUN: Self = Self::pulse(512.0, 2.0, 5);
    /// One bullet of a three-way fan.
    pub const FAN: Self = Self::pulse(256.0, 2.0, 5);
    /// Homing missile.
    pub const TRACKER: Self = Self {
        kind: ProjectileKind::Tracker,
        speed: 192.0,
        lifetime: 5.0,
        damage: 15,
    };
    /// Seconds a tracker steers toward the player after launch.
    pub const TRACKING_WINDOW: f32 = 0.125;

    /// Creates a straight-line projectile.
    #[must_use]
    pub const fn pulse(speed: f32, lifetime: f32, damage: u32) -> Self {
        Self {
            kind: ProjectileKind::Pulse,
            speed,
            lifetime,
            damage,
        }
    }

    /// Family of the projectile.
    #[must_use]
    pub const fn kind(&self) -> ProjectileKind {
        self.kind
    }

    /// Travel speed in world units per second.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Seconds before the projectile expires.
    #[must_use]
    pub const fn lifetime(&self) -> f32 {
        self.lifetime
    }

    /// Damage dealt on a valid hit.
    #[must_use]
    pub const fn damage(&self) -> u32 {
        self.damage
    }
}

/// Travel direction of an elevator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElevatorDirection {
    /// Toward lower floor indices.
    Up,
    /// Toward higher floor indices.
    Down,
}

impl ElevatorDirection {
    /// Change applied to the floor index.
    #[must_use]
    pub const fn delta(self) -> i32 {
        match self {
            Self::Up => -1,
            Self::Down => 1,
        }
    }
}

impl fmt::Display for ElevatorDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
        })
    }
}

/// Pickups left behind by destroyed enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropKind {
    /// Restores power up to the player's maximum.
    Power {
        /// Power restored on pickup.
        amount: u32,
    },
    /// Unlocks a drone schematic.
    Schematic(DroneKind),
    /// Unlocks the floor's elevator.
    Key,
}

/// Stationary objects the player can use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractableKind {
    /// Consumable power reserve.
    PowerCore {
        /// Power restored when used.
        power: u32,
    },
    /// Button moving the player between floors.
    ElevatorButton {
        /// Travel direction.
        direction: ElevatorDirection,
        /// Whether the button belongs to the hub elevator.
        main: bool,
    },
}

/// Describes what a spawned body represents so presenters can dress it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    /// The player.
    Player,
    /// A player-deployed drone.
    Drone(DroneKind),
    /// A hostile drone or the boss.
    Enemy(EnemyKind),
    /// A projectile.
    Bullet {
        /// Projectile family.
        projectile: ProjectileKind,
        /// Side that fired it.
        allegiance: Allegiance,
    },
    /// A pickup.
    Drop(DropKind),
    /// An interactable object.
    Interactable(InteractableKind),
    /// A proximity-charged pylon.
    Pylon {
        /// Whether the pylon gates boss vulnerability.
        boss: bool,
    },
}

/// Discrete key-down state polled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputState {
    /// Move left.
    pub left: bool,
    /// Move right.
    pub right: bool,
    /// Move up.
    pub up: bool,
    /// Move down.
    pub down: bool,
    /// Pick up, interact, or deploy.
    pub primary: bool,
    /// Cycle the selected schematic.
    pub cycle: bool,
}

/// Sides of a body blocked by wall tiles during a collision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockedSides {
    /// Blocked toward negative y.
    pub up: bool,
    /// Blocked toward positive x.
    pub right: bool,
    /// Blocked toward positive y.
    pub down: bool,
    /// Blocked toward negative x.
    pub left: bool,
}

impl BlockedSides {
    /// Reports whether the side in `facing` is blocked.
    #[must_use]
    pub const fn blocks(&self, facing: Facing) -> bool {
        match facing {
            Facing::Up => self.up,
            Facing::Right => self.right,
            Facing::Down => self.down,
            Facing::Left => self.left,
        }
    }

    /// Reports whether any side is blocked.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.up || self.right || self.down || self.left
    }
}

/// Sound effects requested from the audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Body bumped into a wall.
    Bump,
    /// Unit took damage.
    Damage,
    /// Projectile launched.
    Shoot,
    /// Power restored or pylon fully charged.
    PowerUp,
    /// Drone picked up or pylon charge step.
    Click,
    /// Elevator departed.
    Elevator,
    /// Explosion.
    Explosion,
}

/// Background music tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MusicTrack {
    /// Regular exploration music.
    Normal,
    /// Boss encounter music.
    Boss,
}

/// Named scenes of the presentation shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scene {
    /// Title menu.
    Menu,
    /// Active play.
    Gameplay,
    /// Run summary.
    GameOver {
        /// Whether the run ended in victory.
        won: bool,
    },
}

/// Running score counters for a playthrough.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Enemies destroyed, bosses included.
    pub enemies_killed: u32,
    /// Bosses destroyed.
    pub bosses_defeated: u32,
    /// Deepest floor index reached.
    pub floors_cleared: u32,
    /// Simulated seconds spent playing.
    pub play_time: f64,
    /// Whether the run was won.
    pub won: bool,
}

/// Reasons a drone deployment may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum DeployError {
    /// A drone built from the same schematic is still on the field.
    #[error("Existing {kind} must be picked up before redeploying")]
    AlreadyDeployed {
        /// Schematic the player tried to deploy.
        kind: DroneKind,
    },
    /// The player cannot afford the deployment.
    #[error("Insufficient power to deploy {kind} drone")]
    InsufficientPower {
        /// Schematic the player tried to deploy.
        kind: DroneKind,
        /// Power required.
        cost: u32,
        /// Power available.
        available: u32,
    },
}

/// Reasons an interaction may be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum InteractError {
    /// The elevator cannot travel in the requested direction from this floor.
    #[error("Cannot take elevator {direction}")]
    ElevatorUnavailable {
        /// Requested direction.
        direction: ElevatorDirection,
    },
    /// The elevator remains locked.
    #[error("Cannot take elevator (locked by enemies)")]
    ElevatorLocked,
    /// The player is already at full power.
    #[error("Cannot pick up power core (already at max power)")]
    PowerCoreAtMax,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Begins a fresh playthrough, discarding any previous state.
    StartGame,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous frame.
        dt: Duration,
    },
    /// Replaces the input snapshot polled by the player.
    SetInput {
        /// Key-down state for the coming frames.
        input: InputState,
    },
    /// Reports that two bodies overlap.
    ReportOverlap {
        /// First overlapping body.
        first: EntityId,
        /// Second overlapping body.
        second: EntityId,
    },
    /// Reports that a body collided with wall tiles.
    ReportWallCollision {
        /// Body that collided.
        entity: EntityId,
        /// Sides blocked by the collision.
        blocked: BlockedSides,
        /// Position of the body after separation from the walls.
        resolved: Vec2,
    },
    /// Applies the per-tick upkeep shared by drone-like units.
    TickUpkeep {
        /// Unit performing the upkeep.
        entity: EntityId,
    },
    /// Turns a unit to a new facing.
    SetFacing {
        /// Unit to turn.
        entity: EntityId,
        /// New facing.
        facing: Facing,
    },
    /// Sets the velocity of a unit.
    SetVelocity {
        /// Unit to move.
        entity: EntityId,
        /// Velocity in world units per second.
        velocity: Vec2,
    },
    /// Launches a projectile.
    FireProjectile {
        /// Unit firing the projectile.
        source: EntityId,
        /// Launch position.
        origin: Vec2,
        /// Direction; its magnitude scales speed.
        direction: Vec2,
        /// Side the projectile belongs to.
        allegiance: Allegiance,
        /// Ballistics of the projectile.
        spec: ProjectileSpec,
    },
    /// Spends a budget on enemies around a boss.
    SpawnEnemyWave {
        /// Boss summoning the wave.
        source: EntityId,
        /// Budget spent greedily on enemy schematics.
        budget: u32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed.
        dt: Duration,
    },
    /// Indicates that a logic tick boundary was crossed.
    LogicTick {
        /// Sequence number of the tick.
        index: u64,
    },
    /// Announces that an entity became active and needs presentation resources.
    EntitySpawned {
        /// Handle of the entity.
        entity: EntityId,
        /// What the entity represents.
        kind: BodyKind,
        /// Position at spawn time.
        position: Vec2,
    },
    /// Announces that an entity became inactive and released its resources.
    EntityDespawned {
        /// Handle of the entity.
        entity: EntityId,
    },
    /// Announces that an entity was permanently removed.
    EntityRemoved {
        /// Handle of the entity.
        entity: EntityId,
    },
    /// Reports that a unit took damage.
    UnitHurt {
        /// Damaged unit.
        entity: EntityId,
        /// Damage applied after clamping.
        damage: u32,
        /// Power left after the hit.
        remaining: u32,
        /// Normalized knockback direction.
        knockback: Vec2,
    },
    /// Reports that a unit died.
    UnitDied {
        /// Unit that died.
        entity: EntityId,
    },
    /// Requests playback of a sound effect.
    SoundPlayed {
        /// Sound to play.
        cue: SoundCue,
        /// Stereo placement.
        mix: SoundMix,
    },
    /// Requests a change of background music.
    MusicChanged {
        /// Track that should be playing.
        track: MusicTrack,
    },
    /// Requests an on-screen alert.
    AlertRaised {
        /// Message to display.
        message: String,
    },
    /// Requests an explosion effect.
    ExplosionStarted {
        /// World position of the blast.
        position: Vec2,
    },
    /// Confirms that a drone was deployed.
    DroneDeployed {
        /// Handle of the new drone.
        entity: EntityId,
        /// Schematic used.
        kind: DroneKind,
        /// Power deducted from the player.
        cost: u32,
    },
    /// Reports that a deployment was refused.
    DeployRejected {
        /// Reason for the refusal.
        reason: DeployError,
    },
    /// Confirms that a drone was picked up.
    DronePickedUp {
        /// Handle of the drone.
        entity: EntityId,
        /// Schematic of the drone.
        kind: DroneKind,
        /// Power refunded to the player.
        refund: u32,
    },
    /// Reports that an interaction was refused.
    InteractionRejected {
        /// Reason for the refusal.
        reason: InteractError,
    },
    /// Confirms that the player collected a pickup.
    DropCollected {
        /// Handle of the pickup.
        entity: EntityId,
        /// Pickup collected.
        drop: DropKind,
    },
    /// Confirms that a power core was consumed.
    PowerCoreUsed {
        /// Handle of the power core.
        entity: EntityId,
        /// Power gained.
        gained: u32,
    },
    /// Announces that the player can now deploy a new schematic.
    SchematicAcquired {
        /// Newly owned schematic.
        kind: DroneKind,
    },
    /// Announces that the player selected a different schematic.
    SchematicSelected {
        /// Schematic now selected.
        kind: DroneKind,
    },
    /// Reports charge gained by a pylon.
    PylonCharged {
        /// Pylon charged.
        entity: EntityId,
        /// Charge after the step.
        power: u32,
    },
    /// Announces that a pylon reached full charge.
    PylonPowered {
        /// Pylon powered.
        entity: EntityId,
        /// Whether the pylon gates boss vulnerability.
        boss: bool,
    },
    /// Announces that a floor was generated.
    FloorGenerated {
        /// Floor generated.
        floor: FloorIndex,
    },
    /// Announces that the player arrived on a floor.
    FloorEntered {
        /// Floor entered.
        floor: FloorIndex,
    },
    /// Announces that the boss room gate opened.
    BossRoomOpened {
        /// Floor of the boss room.
        floor: FloorIndex,
    },
    /// Announces that the boss arena's exit opened.
    BossElevatorOpened {
        /// Floor of the boss arena.
        floor: FloorIndex,
    },
    /// Announces that the floor's elevator key was found.
    ElevatorKeyFound {
        /// Floor of the key.
        floor: FloorIndex,
    },
    /// Announces that the floor's elevator unlocked.
    ElevatorUnlocked {
        /// Floor of the elevator.
        floor: FloorIndex,
    },
    /// Confirms that the player travelled between floors.
    ElevatorTaken {
        /// Floor departed.
        from: FloorIndex,
        /// Floor reached.
        to: FloorIndex,
    },
    /// Announces that a boss finished its death sequence.
    BossDefeated {
        /// Floor of the boss.
        floor: FloorIndex,
        /// Bosses defeated so far.
        bosses_defeated: u32,
    },
    /// Requests a scene transition.
    SceneChanged {
        /// Scene to show.
        scene: Scene,
    },
}
