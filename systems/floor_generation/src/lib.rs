#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Procedural floor generation.
//!
//! A floor is eight compass room slots around a fixed elevator hub. The
//! [`FloorLayout`] is rolled once per floor; the collision [`TileMap`] is
//! rebuilt from it on every visit so that latched gates stay open; and
//! [`populate_floor`] places the enemies, power cores, and fixtures the
//! floor spawns the first time it is generated. Boss floors replace the
//! northern rooms with a fixed arena and its pylon puzzle.

mod layout;
mod population;
mod tiles;

pub use layout::{
    roll_room_type, FloorLayout, Neighbor, RoomSlot, RoomType, HUB_ORIGIN, ROOM_SIZE,
    ROOM_TEMPLATE_COUNT,
};
pub use population::{
    fill_budget, plan_boss_wave, populate_floor, room_budget, ButtonPlacement, EnemyPlacement,
    FloorPopulation, PylonPlacement, BOSS_POSITION, MAX_POWER_CORES_PER_ROOM, ROOM_BUDGET_BASE,
    ROOM_BUDGET_UNIT,
};
pub use tiles::{
    GateState, Tile, TileMap, TilePos, ARENA_ORIGIN, BOSS_ELEVATOR_GATE, BOSS_ROOM_GATE,
    MAP_HEIGHT, MAP_ORIGIN, MAP_WIDTH,
};
