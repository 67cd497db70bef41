use dronewell_core::{Facing, TILE_SIZE};
use glam::Vec2;

use crate::layout::{FloorLayout, RoomSlot, HUB_ORIGIN, ROOM_SIZE};

/// Map width in tiles.
pub const MAP_WIDTH: u32 = 24;
/// Map height in tiles.
pub const MAP_HEIGHT: u32 = 48;
/// World position of the map's top-left corner.
pub const MAP_ORIGIN: Vec2 = Vec2::new(-384.0, -1152.0);
/// Top-left tile of the boss arena.
pub const ARENA_ORIGIN: TilePos = TilePos::new(4, 0);
/// Gate between the pylon antechamber and the boss arena.
pub const BOSS_ROOM_GATE: [TilePos; 4] = [
    TilePos::new(11, 23),
    TilePos::new(12, 23),
    TilePos::new(11, 24),
    TilePos::new(12, 24),
];
/// Gate between the boss arena and the exit elevator.
pub const BOSS_ELEVATOR_GATE: [TilePos; 4] = [
    TilePos::new(11, 7),
    TilePos::new(12, 7),
    TilePos::new(11, 8),
    TilePos::new(12, 8),
];

const HUB_TEMPLATE: [&str; 8] = [
    "########",
    "#......#",
    "#......#",
    "#......#",
    "#......#",
    "#......#",
    "#......#",
    "########",
];

const ROOM_TEMPLATES: [[&str; 8]; 4] = [
    [
        "########",
        "#......#",
        "#......#",
        "#......#",
        "#......#",
        "#......#",
        "#......#",
        "########",
    ],
    [
        "########",
        "#......#",
        "#.#..#.#",
        "#......#",
        "#......#",
        "#.#..#.#",
        "#......#",
        "########",
    ],
    [
        "########",
        "#......#",
        "#......#",
        "#..##..#",
        "#..##..#",
        "#......#",
        "#......#",
        "########",
    ],
    [
        "########",
        "#......#",
        "#.##...#",
        "#......#",
        "#......#",
        "#...##.#",
        "#......#",
        "########",
    ],
];

const ARENA_TEMPLATE: [&str; 32] = [
    "    ########    ",
    "    #......#    ",
    "    #......#    ",
    "    #......#    ",
    "    #......#    ",
    "    #......#    ",
    "    #......#    ",
    "    ###GG###    ",
    "#######GG#######",
    "#..............#",
    "#..............#",
    "#.#..........#.#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#.#..........#.#",
    "#..............#",
    "#..............#",
    "#######GG#######",
    "    ###GG###    ",
    "    #......#    ",
    "    #......#    ",
    "    #......#    ",
    "    #......#    ",
    "    #......#    ",
    "    #......#    ",
    "    ###..###    ",
];

/// Integer tile coordinate on the floor map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TilePos {
    x: u32,
    y: u32,
}

impl TilePos {
    /// Creates a tile coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Column of the tile.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Row of the tile.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    const fn offset(self, dx: u32, dy: u32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Contents of a single map tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Outside every room.
    #[default]
    Void,
    /// Walkable ground.
    Floor,
    /// Solid wall.
    Wall,
    /// Doorway that is solid while closed.
    Door {
        /// Whether the doorway can be walked through.
        open: bool,
    },
}

impl Tile {
    /// Reports whether bodies collide with the tile.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Wall | Self::Door { open: false })
    }

    /// Reports whether units may stand on the tile.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Floor | Self::Door { open: true })
    }

    fn from_glyph(glyph: char) -> Self {
        match glyph {
            '#' => Self::Wall,
            '.' => Self::Floor,
            'G' => Self::Door { open: false },
            _ => Self::Void,
        }
    }
}

/// Latched gate state of a boss floor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GateState {
    /// The antechamber gate has opened.
    pub boss_room_open: bool,
    /// The exit elevator gate has opened.
    pub boss_elevator_open: bool,
}

/// Collision map of one floor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    tiles: Vec<Tile>,
}

impl Default for TileMap {
    fn default() -> Self {
        Self {
            tiles: vec![Tile::Void; (MAP_WIDTH * MAP_HEIGHT) as usize],
        }
    }
}

impl TileMap {
    /// Builds the map for `layout`, keeping latched gates open.
    #[must_use]
    pub fn build(layout: &FloorLayout, gates: GateState) -> Self {
        let mut map = Self::default();
        map.stamp(HUB_ORIGIN, &HUB_TEMPLATE);

        let boss_floor = layout.floor().is_boss_floor();
        if boss_floor {
            map.stamp(ARENA_ORIGIN, &ARENA_TEMPLATE);
            map.set_gate(&BOSS_ROOM_GATE, gates.boss_room_open);
            map.set_gate(&BOSS_ELEVATOR_GATE, gates.boss_elevator_open);
        }

        for slot in RoomSlot::ALL {
            if boss_floor && slot == RoomSlot::UpCenter {
                continue;
            }
            let origin = slot.origin();
            match layout.room_type(slot) {
                Some(room) => {
                    map.stamp(origin, &ROOM_TEMPLATES[usize::from(room.index())]);
                    for side in Facing::ALL {
                        if let Some(open) = layout.door(slot, side) {
                            map.set_door(origin, side, open);
                        }
                    }
                }
                None => map.clear(origin, ROOM_SIZE, ROOM_SIZE),
            }
        }

        for side in Facing::ALL {
            map.set_door(HUB_ORIGIN, side, layout.hub_door(side));
        }
        map
    }

    /// Tile at `pos`; positions off the map are void.
    #[must_use]
    pub fn tile(&self, pos: TilePos) -> Tile {
        Self::slot(pos)
            .and_then(|index| self.tiles.get(index).copied())
            .unwrap_or(Tile::Void)
    }

    /// World position of the centre of `pos`.
    #[must_use]
    pub fn center(pos: TilePos) -> Vec2 {
        MAP_ORIGIN
            + Vec2::new(
                pos.x as f32 * TILE_SIZE + TILE_SIZE / 2.0,
                pos.y as f32 * TILE_SIZE + TILE_SIZE / 2.0,
            )
    }

    /// Tile containing the world position, if it lies on the map.
    #[must_use]
    pub fn locate(world: Vec2) -> Option<TilePos> {
        let local = (world - MAP_ORIGIN) / TILE_SIZE;
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let pos = TilePos::new(local.x.floor() as u32, local.y.floor() as u32);
        Self::slot(pos).map(|_| pos)
    }

    /// Reports whether the world position lies inside a solid tile.
    #[must_use]
    pub fn is_solid_at(&self, world: Vec2) -> bool {
        Self::locate(world).is_some_and(|pos| self.tile(pos).is_solid())
    }

    /// Solid tiles overlapping the axis-aligned box from `min` to `max`.
    #[must_use]
    pub fn solid_tiles_between(&self, min: Vec2, max: Vec2) -> Vec<TilePos> {
        let clamp = |world: Vec2| {
            let local = ((world - MAP_ORIGIN) / TILE_SIZE).floor();
            let x = local.x.clamp(0.0, (MAP_WIDTH - 1) as f32) as u32;
            let y = local.y.clamp(0.0, (MAP_HEIGHT - 1) as f32) as u32;
            TilePos::new(x, y)
        };
        let (low, high) = (clamp(min), clamp(max));
        let mut solid = Vec::new();
        for y in low.y..=high.y {
            for x in low.x..=high.x {
                let pos = TilePos::new(x, y);
                if self.tile(pos).is_solid() {
                    solid.push(pos);
                }
            }
        }
        solid
    }

    /// Walkable tiles in the `width` by `height` window starting at `origin`,
    /// in column-major order.
    #[must_use]
    pub fn walkable_tiles(&self, origin: TilePos, width: u32, height: u32) -> Vec<TilePos> {
        let mut tiles = Vec::new();
        for dx in 0..width {
            for dy in 0..height {
                let pos = origin.offset(dx, dy);
                if self.tile(pos).is_walkable() {
                    tiles.push(pos);
                }
            }
        }
        tiles
    }

    /// Opens or closes the gate tiles in `gate`.
    pub fn set_gate(&mut self, gate: &[TilePos], open: bool) {
        for pos in gate {
            self.set(*pos, Tile::Door { open });
        }
    }

    fn slot(pos: TilePos) -> Option<usize> {
        (pos.x < MAP_WIDTH && pos.y < MAP_HEIGHT).then(|| (pos.y * MAP_WIDTH + pos.x) as usize)
    }

    fn set(&mut self, pos: TilePos, tile: Tile) {
        if let Some(cell) = Self::slot(pos).and_then(|index| self.tiles.get_mut(index)) {
            *cell = tile;
        }
    }

    fn stamp<const ROWS: usize>(&mut self, origin: TilePos, template: &[&str; ROWS]) {
        for (dy, row) in template.iter().enumerate() {
            for (dx, glyph) in row.chars().enumerate() {
                self.set(
                    origin.offset(dx as u32, dy as u32),
                    Tile::from_glyph(glyph),
                );
            }
        }
    }

    fn clear(&mut self, origin: TilePos, width: u32, height: u32) {
        for dx in 0..width {
            for dy in 0..height {
                self.set(origin.offset(dx, dy), Tile::Void);
            }
        }
    }

    fn set_door(&mut self, origin: TilePos, side: Facing, open: bool) {
        let last = ROOM_SIZE - 1;
        let (first, second) = match side {
            Facing::Up => (origin.offset(3, 0), origin.offset(4, 0)),
            Facing::Down => (origin.offset(3, last), origin.offset(4, last)),
            Facing::Left => (origin.offset(0, 3), origin.offset(0, 4)),
            Facing::Right => (origin.offset(last, 3), origin.offset(last, 4)),
        };
        self.set(first, Tile::Door { open });
        self.set(second, Tile::Door { open });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rect<const H: usize>(template: &[&str; H], width: usize) {
        for row in template {
            assert_eq!(row.chars().count(), width, "row {row:?}");
        }
    }

    #[test]
    fn templates_are_rectangular() {
        assert_rect(&HUB_TEMPLATE, 8);
        for template in &ROOM_TEMPLATES {
            assert_rect(template, 8);
        }
        assert_rect(&ARENA_TEMPLATE, 16);
    }

    #[test]
    fn tile_centres_round_trip_through_locate() {
        let pos = TilePos::new(11, 35);
        let centre = TileMap::center(pos);
        assert_eq!(centre, Vec2::new(-16.0, -16.0));
        assert_eq!(TileMap::locate(centre), Some(pos));
        assert_eq!(TileMap::locate(Vec2::new(-400.0, 0.0)), None);
        assert_eq!(TileMap::locate(Vec2::new(0.0, 400.0)), None);
    }

    #[test]
    fn gate_tiles_line_up_with_the_arena_template() {
        let mut map = TileMap::default();
        map.stamp(ARENA_ORIGIN, &ARENA_TEMPLATE);
        for pos in BOSS_ROOM_GATE.iter().chain(BOSS_ELEVATOR_GATE.iter()) {
            assert_eq!(map.tile(*pos), Tile::Door { open: false }, "{pos:?}");
        }
    }
}
