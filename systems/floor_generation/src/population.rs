use dronewell_core::{math, ElevatorDirection, EnemyKind, EnemySchematic, Facing, FloorIndex};
use glam::Vec2;
use log::debug;
use rand::Rng;

use crate::{
    layout::{FloorLayout, RoomSlot},
    tiles::{TileMap, TilePos},
};

/// Highest number of power cores placed in one room.
pub const MAX_POWER_CORES_PER_ROOM: i32 = 2;
/// Budget granted per room budget roll.
pub const ROOM_BUDGET_UNIT: u32 = 5;
/// Room budget rolls available on the top floor.
pub const ROOM_BUDGET_BASE: u32 = 5;
/// Spawn position of the supervisor.
pub const BOSS_POSITION: Vec2 = Vec2::new(0.0, -638.0);

/// An enemy to create at generation time or during a boss wave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPlacement {
    /// Enemy to create.
    pub kind: EnemyKind,
    /// Spawn position.
    pub position: Vec2,
    /// Initial facing.
    pub facing: Facing,
}

/// An elevator button fixture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonPlacement {
    /// Button position.
    pub position: Vec2,
    /// Travel direction.
    pub direction: ElevatorDirection,
    /// Whether the button belongs to the hub elevator.
    pub main: bool,
}

/// A pylon fixture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PylonPlacement {
    /// Pylon position.
    pub position: Vec2,
    /// Whether the pylon gates boss vulnerability.
    pub boss: bool,
}

/// Everything a floor spawns the first time it is generated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FloorPopulation {
    /// Budgeted room enemies.
    pub enemies: Vec<EnemyPlacement>,
    /// Power core positions.
    pub power_cores: Vec<Vec2>,
    /// Elevator buttons.
    pub buttons: Vec<ButtonPlacement>,
    /// Pylons.
    pub pylons: Vec<PylonPlacement>,
    /// Supervisor position on boss floors.
    pub boss: Option<Vec2>,
}

/// Populates every room of the floor and adds its fixed fixtures.
pub fn populate_floor<R: Rng + ?Sized>(
    layout: &FloorLayout,
    map: &TileMap,
    rng: &mut R,
) -> FloorPopulation {
    let floor = layout.floor();
    let mut population = FloorPopulation::default();

    for slot in RoomSlot::ALL {
        if floor.is_boss_floor() && slot == RoomSlot::UpCenter {
            continue;
        }
        if layout.room_type(slot).is_some() {
            populate_room(map, slot, floor, rng, &mut population);
        }
    }

    add_fixtures(floor, &mut population);
    debug!(
        "populated floor {floor}: {} enemies, {} power cores, {} pylons",
        population.enemies.len(),
        population.power_cores.len(),
        population.pylons.len()
    );
    population
}

fn populate_room<R: Rng + ?Sized>(
    map: &TileMap,
    slot: RoomSlot,
    floor: FloorIndex,
    rng: &mut R,
    population: &mut FloorPopulation,
) {
    let origin = slot.origin();
    let interior = TilePos::new(origin.x() + 1, origin.y() + 1);
    let mut tiles: Vec<Vec2> = map
        .walkable_tiles(interior, 6, 6)
        .into_iter()
        .map(TileMap::center)
        .collect();
    math::shuffle(rng, &mut tiles);

    let power_cores = math::rand_int(rng, 0, MAX_POWER_CORES_PER_ROOM);
    let budget = room_budget(floor, rng);
    population
        .enemies
        .extend(fill_budget(budget, &mut tiles, rng));
    for _ in 0..power_cores {
        let Some(position) = tiles.pop() else {
            break;
        };
        population.power_cores.push(position);
    }
}

/// Rolls the enemy budget of a room on `floor`.
pub fn room_budget<R: Rng + ?Sized>(floor: FloorIndex, rng: &mut R) -> u32 {
    let rolls = ROOM_BUDGET_BASE.saturating_add(floor.get());
    let ceiling = i32::try_from(rolls).unwrap_or(i32::MAX);
    math::rand_int(rng, 0, ceiling)
        .unsigned_abs()
        .saturating_mul(ROOM_BUDGET_UNIT)
}

/// Greedily spends `budget` on random affordable enemies, consuming tiles
/// from the back of `tiles` until either runs out.
pub fn fill_budget<R: Rng + ?Sized>(
    budget: u32,
    tiles: &mut Vec<Vec2>,
    rng: &mut R,
) -> Vec<EnemyPlacement> {
    let mut remaining = budget;
    let mut placed = Vec::new();
    while remaining > 0 {
        let Some(position) = tiles.pop() else {
            break;
        };
        let affordable: Vec<EnemySchematic> = EnemySchematic::affordable(remaining).collect();
        let Some(schematic) = math::rand_item(rng, &affordable).copied() else {
            break;
        };
        remaining -= schematic.cost();
        let facing = math::rand_item(rng, &Facing::ALL)
            .copied()
            .unwrap_or_default();
        placed.push(EnemyPlacement {
            kind: schematic.kind(),
            position,
            facing,
        });
    }
    placed
}

/// Plans the enemies a boss summons into free tiles around itself.
///
/// Candidate tiles are the walkable tiles of the 3x3 block centred on the
/// boss, minus tiles already holding an enemy listed in `occupied`.
pub fn plan_boss_wave<R: Rng + ?Sized>(
    map: &TileMap,
    boss: Vec2,
    occupied: &[Vec2],
    budget: u32,
    rng: &mut R,
) -> Vec<EnemyPlacement> {
    let Some(centre) = TileMap::locate(boss) else {
        return Vec::new();
    };
    let origin = TilePos::new(centre.x().saturating_sub(1), centre.y().saturating_sub(1));
    let taken: Vec<TilePos> = occupied
        .iter()
        .filter_map(|position| TileMap::locate(*position))
        .collect();
    let mut tiles: Vec<Vec2> = map
        .walkable_tiles(origin, 3, 3)
        .into_iter()
        .filter(|tile| !taken.contains(tile))
        .map(TileMap::center)
        .collect();
    fill_budget(budget, &mut tiles, rng)
}

fn add_fixtures(floor: FloorIndex, population: &mut FloorPopulation) {
    if !floor.is_boss_floor() {
        population.buttons.push(ButtonPlacement {
            position: Vec2::new(-64.0, -80.0),
            direction: ElevatorDirection::Down,
            main: true,
        });
    }
    if !floor.is_top_floor() {
        population.buttons.push(ButtonPlacement {
            position: Vec2::new(64.0, -80.0),
            direction: ElevatorDirection::Up,
            main: true,
        });
    }
    if !floor.is_boss_floor() {
        return;
    }

    population.buttons.push(ButtonPlacement {
        position: Vec2::new(-64.0, -1104.0),
        direction: ElevatorDirection::Down,
        main: false,
    });
    for (x, y) in [(-16.0, -268.0), (16.0, -268.0), (-16.0, -236.0), (16.0, -236.0)] {
        population.pylons.push(PylonPlacement {
            position: Vec2::new(x, y),
            boss: false,
        });
    }
    for (x, y) in [
        (-112.0, -524.0),
        (112.0, -524.0),
        (-112.0, -748.0),
        (112.0, -748.0),
    ] {
        population.pylons.push(PylonPlacement {
            position: Vec2::new(x, y),
            boss: true,
        });
    }
    population.boss = Some(BOSS_POSITION);
}
