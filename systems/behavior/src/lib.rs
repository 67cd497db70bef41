#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Drone and enemy decision making.
//!
//! Every drone-like unit owns a [`Behavior`] whose [`Behavior::tick`] runs once
//! per logic tick and whose [`Behavior::wall_collision`] runs when the physics
//! collaborator reports a wall hit. Behaviors never touch the world directly:
//! they read a [`TickContext`] snapshot and push [`Command`] values that the
//! world applies in order.

use dronewell_core::{
    math, Allegiance, BlockedSides, Command, DroneKind, EnemyKind, EntityId, Facing,
    ProjectileSpec,
};
use dronewell_system_tick_scheduler::{Debounce, Subtick};
use glam::Vec2;
use rand::Rng;

/// Distance in front of a unit where its projectiles appear.
pub const MUZZLE_OFFSET: f32 = 8.0;
/// Travel speed of hovering punchers.
pub const PUNCH_SPEED: f32 = 128.0;
/// Travel speed of spinning, patrolling, chasing, and boss units.
pub const CRUISE_SPEED: f32 = 64.0;
/// Boss ticks between random-walk bursts.
pub const BOSS_STEP_INTERVAL: u32 = 4;
/// Boss subtick on which a wave is summoned.
pub const BOSS_SUMMON_PHASE: u32 = 16;
/// Budget granted per wave roll.
pub const BOSS_WAVE_UNIT: u32 = 10;

/// Read-only snapshot handed to a behavior on each decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickContext {
    /// Unit making the decision.
    pub entity: EntityId,
    /// Current position of the unit.
    pub position: Vec2,
    /// Current facing of the unit.
    pub facing: Facing,
    /// Side the unit fights for.
    pub allegiance: Allegiance,
    /// Current power of the unit.
    pub power: u32,
    /// Player position, if the player is present on the unit's floor.
    pub player_position: Option<Vec2>,
    /// Whether the unit's floor has opened its boss room.
    pub boss_room_open: bool,
    /// Boss pylons at full charge on the unit's floor.
    pub powered_boss_pylons: u32,
    /// Difficulty section of the unit's floor.
    pub section: u32,
}

/// Per-unit decision state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Behavior {
    /// Fires along its facing every tick.
    Gun,
    /// Aims at the player every tick and launches a homing missile every other tick.
    Tracker {
        /// Alternates aim-only and fire ticks.
        subtick: Subtick,
    },
    /// Hovers straight ahead and reverses on walls.
    Punch {
        /// Wall reversal cooldown.
        debounce: Debounce,
    },
    /// Travels diagonally and reflects off walls.
    Spin {
        /// Wall reflection cooldown.
        debounce: Debounce,
    },
    /// Patrols perpendicular to its facing while firing.
    Strafe {
        /// Patrol direction.
        move_facing: Facing,
        /// Patrol reversal cooldown.
        debounce: Debounce,
    },
    /// Fires a fan every other tick without turning.
    Fan {
        /// Alternates idle and fire ticks.
        subtick: Subtick,
    },
    /// Turns clockwise, then fires.
    RotatingGun {
        /// Alternates turn and fire ticks.
        subtick: Subtick,
        /// Fires a fan instead of a single shot.
        fan: bool,
    },
    /// Aims at the player, then fires.
    Seeker {
        /// Alternates aim and fire ticks.
        subtick: Subtick,
        /// Fires a fan instead of a single shot.
        fan: bool,
    },
    /// Chases the player one axis per tick.
    Chaser {
        /// Alternates horizontal and vertical pursuit.
        subtick: Subtick,
    },
    /// Random-walks and summons waves once its room opens.
    Boss {
        /// Counts ticks toward the next summon.
        subtick: Subtick,
    },
}

impl Behavior {
    /// Behavior of a freshly deployed drone.
    #[must_use]
    pub fn for_drone(kind: DroneKind, facing: Facing) -> Self {
        match kind {
            DroneKind::Turret => Self::Gun,
            DroneKind::Tracker => Self::Tracker {
                subtick: Subtick::new(2),
            },
            DroneKind::Puncher => Self::Punch {
                debounce: Debounce::new(),
            },
            DroneKind::Boomerang => Self::Spin {
                debounce: Debounce::new(),
            },
            DroneKind::Strafer => Self::strafe(facing),
            DroneKind::Multishot => Self::Fan {
                subtick: Subtick::new(2),
            },
        }
    }

    /// Behavior of a freshly spawned enemy.
    #[must_use]
    pub fn for_enemy(kind: EnemyKind, facing: Facing) -> Self {
        match kind {
            EnemyKind::Turret => Self::RotatingGun {
                subtick: Subtick::new(2),
                fan: false,
            },
            EnemyKind::MultishotTurret => Self::RotatingGun {
                subtick: Subtick::new(2),
                fan: true,
            },
            EnemyKind::HoverTurret => Self::Seeker {
                subtick: Subtick::new(2),
                fan: false,
            },
            EnemyKind::HoverMultishot => Self::Seeker {
                subtick: Subtick::new(2),
                fan: true,
            },
            EnemyKind::HoverPuncher => Self::Chaser {
                subtick: Subtick::new(2),
            },
            EnemyKind::SpinBoomerang => Self::Spin {
                debounce: Debounce::new(),
            },
            EnemyKind::DirectionalTurret => Self::strafe(facing),
            EnemyKind::Boss => Self::Boss {
                subtick: Subtick::new(BOSS_SUMMON_PHASE + 1),
            },
        }
    }

    fn strafe(facing: Facing) -> Self {
        Self::Strafe {
            move_facing: facing.clockwise(),
            debounce: Debounce::new(),
        }
    }

    /// Runs one logic tick, starting with the shared upkeep.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        ctx: &TickContext,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) {
        out.push(Command::TickUpkeep { entity: ctx.entity });
        let mut facing = ctx.facing;

        match self {
            Self::Gun => fire(ctx, facing, ProjectileSpec::GUN, out),
            Self::Tracker { subtick } => {
                if let Some(target) = ctx.player_position {
                    let aim = Facing::toward(target - ctx.position);
                    turn(ctx, facing, aim, out);
                    facing = aim;
                }
                if subtick.get() == 1 {
                    fire(ctx, facing, ProjectileSpec::TRACKER, out);
                }
                subtick.advance();
            }
            Self::Punch { debounce } => {
                set_velocity(ctx, facing.vector() * PUNCH_SPEED, out);
                debounce.tick();
            }
            Self::Spin { debounce } => {
                set_velocity(ctx, facing.spin_vector() * CRUISE_SPEED, out);
                debounce.tick();
            }
            Self::Strafe {
                move_facing,
                debounce,
            } => {
                set_velocity(ctx, move_facing.vector() * CRUISE_SPEED, out);
                debounce.tick();
                fire(ctx, facing, ProjectileSpec::GUN, out);
            }
            Self::Fan { subtick } => {
                if subtick.get() == 1 {
                    fire_fan(ctx, facing, out);
                }
                subtick.advance();
            }
            Self::RotatingGun { subtick, fan } => {
                match subtick.get() {
                    0 => turn(ctx, facing, facing.clockwise(), out),
                    _ => fire_single_or_fan(ctx, facing, *fan, out),
                }
                subtick.advance();
            }
            Self::Seeker { subtick, fan } => {
                match subtick.get() {
                    0 => {
                        if let Some(target) = ctx.player_position {
                            turn(ctx, facing, Facing::toward(target - ctx.position), out);
                        }
                    }
                    _ => fire_single_or_fan(ctx, facing, *fan, out),
                }
                subtick.advance();
            }
            Self::Chaser { subtick } => {
                if let Some(target) = ctx.player_position {
                    let delta = target - ctx.position;
                    let chase = if subtick.get() == 0 {
                        Facing::horizontal(delta.x)
                    } else {
                        Facing::vertical(delta.y)
                    };
                    turn(ctx, facing, chase, out);
                    facing = chase;
                }
                set_velocity(ctx, facing.vector() * CRUISE_SPEED, out);
                subtick.advance();
            }
            Self::Boss { subtick } => {
                if !ctx.boss_room_open || ctx.power == 0 {
                    return;
                }
                let velocity = if subtick.get() % BOSS_STEP_INTERVAL == 0 {
                    let step_x = math::rand_int(rng, -1, 1) as f32;
                    let step_y = math::rand_int(rng, -1, 1) as f32;
                    Vec2::new(step_x, step_y) * CRUISE_SPEED
                } else {
                    Vec2::ZERO
                };
                set_velocity(ctx, velocity, out);

                if subtick.get() == BOSS_SUMMON_PHASE {
                    let ceiling = 1 + i32::try_from(ctx.powered_boss_pylons).unwrap_or(i32::MAX - 1);
                    let roll = math::rand_int(rng, 1, ceiling).unsigned_abs();
                    let budget = roll.saturating_add(ctx.section).saturating_mul(BOSS_WAVE_UNIT);
                    out.push(Command::SpawnEnemyWave {
                        source: ctx.entity,
                        budget,
                    });
                    subtick.reset();
                } else {
                    subtick.advance();
                }
            }
        }
    }

    /// Responds to a wall hit, returning `true` if the behavior reacted.
    pub fn wall_collision<R: Rng + ?Sized>(
        &mut self,
        ctx: &TickContext,
        blocked: BlockedSides,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) -> bool {
        match self {
            Self::Punch { debounce } => {
                if !debounce.try_trigger() {
                    return false;
                }
                let facing = ctx.facing.opposite();
                turn(ctx, ctx.facing, facing, out);
                set_velocity(ctx, facing.vector() * PUNCH_SPEED, out);
                out.push(Command::TickUpkeep { entity: ctx.entity });
                true
            }
            Self::Strafe {
                move_facing,
                debounce,
            } => {
                if !debounce.try_trigger() {
                    return false;
                }
                *move_facing = move_facing.opposite();
                set_velocity(ctx, move_facing.vector() * CRUISE_SPEED, out);
                out.push(Command::TickUpkeep { entity: ctx.entity });
                true
            }
            Self::Spin { debounce } => {
                if !debounce.try_trigger() {
                    return false;
                }
                let reflected = reflect_spin(ctx.facing, blocked);
                turn(ctx, ctx.facing, reflected, out);
                let retick = TickContext {
                    facing: reflected,
                    ..*ctx
                };
                self.tick(&retick, rng, out);
                true
            }
            _ => false,
        }
    }

    /// Current subtick phase, if the behavior keeps one.
    #[must_use]
    pub fn subtick(&self) -> Option<u32> {
        match self {
            Self::Tracker { subtick }
            | Self::Fan { subtick }
            | Self::RotatingGun { subtick, .. }
            | Self::Seeker { subtick, .. }
            | Self::Chaser { subtick }
            | Self::Boss { subtick } => Some(subtick.get()),
            _ => None,
        }
    }
}

/// Facing a spinning unit adopts after hitting walls on `blocked` sides.
#[must_use]
pub fn reflect_spin(facing: Facing, blocked: BlockedSides) -> Facing {
    let (primary, primary_turn, secondary, secondary_turn) = match facing {
        Facing::Up => (Facing::Up, Facing::Right, Facing::Right, Facing::Left),
        Facing::Right => (Facing::Right, Facing::Down, Facing::Down, Facing::Up),
        Facing::Down => (Facing::Down, Facing::Left, Facing::Left, Facing::Right),
        Facing::Left => (Facing::Left, Facing::Up, Facing::Up, Facing::Down),
    };
    let mut reflected = facing;
    if blocked.blocks(primary) {
        reflected = primary_turn;
    }
    if blocked.blocks(secondary) {
        reflected = secondary_turn;
    }
    reflected
}

fn turn(ctx: &TickContext, current: Facing, next: Facing, out: &mut Vec<Command>) {
    if current != next {
        out.push(Command::SetFacing {
            entity: ctx.entity,
            facing: next,
        });
    }
}

fn set_velocity(ctx: &TickContext, velocity: Vec2, out: &mut Vec<Command>) {
    out.push(Command::SetVelocity {
        entity: ctx.entity,
        velocity,
    });
}

fn fire_single_or_fan(ctx: &TickContext, facing: Facing, fan: bool, out: &mut Vec<Command>) {
    if fan {
        fire_fan(ctx, facing, out);
    } else {
        fire(ctx, facing, ProjectileSpec::GUN, out);
    }
}

fn fire(ctx: &TickContext, facing: Facing, spec: ProjectileSpec, out: &mut Vec<Command>) {
    launch(ctx, facing, facing.vector(), spec, out);
}

fn fire_fan(ctx: &TickContext, facing: Facing, out: &mut Vec<Command>) {
    let direction = facing.vector();
    let offset = facing.fan_offset();
    for spread in [direction + offset, direction, direction - offset] {
        launch(ctx, facing, spread, ProjectileSpec::FAN, out);
    }
}

fn launch(
    ctx: &TickContext,
    facing: Facing,
    direction: Vec2,
    spec: ProjectileSpec,
    out: &mut Vec<Command>,
) {
    out.push(Command::FireProjectile {
        source: ctx.entity,
        origin: ctx.position + facing.vector() * MUZZLE_OFFSET,
        direction,
        allegiance: ctx.allegiance,
        spec,
    });
}
