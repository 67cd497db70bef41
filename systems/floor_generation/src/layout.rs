use dronewell_core::{math, Facing, FloorIndex};
use log::info;
use rand::Rng;

use crate::tiles::TilePos;

/// Side length of a room slot in tiles.
pub const ROOM_SIZE: u32 = 8;
/// Number of distinct room templates.
pub const ROOM_TEMPLATE_COUNT: u8 = 4;
/// Top-left tile of the central elevator hub.
pub const HUB_ORIGIN: TilePos = TilePos::new(8, 32);

/// Eight compass slots arranged around the elevator hub.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoomSlot {
    /// North-west corner.
    UpLeft,
    /// North edge; hosts the arena on boss floors.
    UpCenter,
    /// North-east corner.
    UpRight,
    /// East edge.
    CenterRight,
    /// South-east corner.
    DownRight,
    /// South edge.
    DownCenter,
    /// South-west corner.
    DownLeft,
    /// West edge.
    CenterLeft,
}

impl RoomSlot {
    /// Every slot in clockwise order starting north-west.
    pub const ALL: [Self; 8] = [
        Self::UpLeft,
        Self::UpCenter,
        Self::UpRight,
        Self::CenterRight,
        Self::DownRight,
        Self::DownCenter,
        Self::DownLeft,
        Self::CenterLeft,
    ];

    /// Slots sharing a wall with the hub, in roll order.
    pub const EDGES: [Self; 4] = [
        Self::UpCenter,
        Self::CenterRight,
        Self::DownCenter,
        Self::CenterLeft,
    ];

    /// Slots touching the hub only diagonally, in roll order.
    pub const CORNERS: [Self; 4] = [
        Self::UpLeft,
        Self::UpRight,
        Self::DownRight,
        Self::DownLeft,
    ];

    const fn index(self) -> usize {
        self as usize
    }

    /// Top-left tile of the slot.
    #[must_use]
    pub const fn origin(self) -> TilePos {
        match self {
            Self::UpLeft => TilePos::new(0, 24),
            Self::UpCenter => TilePos::new(8, 24),
            Self::UpRight => TilePos::new(16, 24),
            Self::CenterRight => TilePos::new(16, 32),
            Self::DownRight => TilePos::new(16, 40),
            Self::DownCenter => TilePos::new(8, 40),
            Self::DownLeft => TilePos::new(0, 40),
            Self::CenterLeft => TilePos::new(0, 32),
        }
    }

    /// Reports whether the slot is a corner.
    #[must_use]
    pub const fn is_corner(self) -> bool {
        matches!(
            self,
            Self::UpLeft | Self::UpRight | Self::DownRight | Self::DownLeft
        )
    }

    /// Edge slots adjacent to a corner; `None` for edges.
    #[must_use]
    pub const fn supporting_edges(self) -> Option<[Self; 2]> {
        match self {
            Self::UpLeft => Some([Self::CenterLeft, Self::UpCenter]),
            Self::UpRight => Some([Self::UpCenter, Self::CenterRight]),
            Self::DownRight => Some([Self::CenterRight, Self::DownCenter]),
            Self::DownLeft => Some([Self::DownCenter, Self::CenterLeft]),
            Self::UpCenter | Self::CenterRight | Self::DownCenter | Self::CenterLeft => None,
        }
    }

    /// Area across the wall on `side`, if the map continues there.
    #[must_use]
    pub const fn neighbor(self, side: Facing) -> Option<Neighbor> {
        use Facing::{Down, Left, Right, Up};
        let slot = match (self, side) {
            (Self::UpLeft, Right) => Self::UpCenter,
            (Self::UpLeft, Down) => Self::CenterLeft,
            (Self::UpCenter, Right) => Self::UpRight,
            (Self::UpCenter, Left) => Self::UpLeft,
            (Self::UpRight, Down) => Self::CenterRight,
            (Self::UpRight, Left) => Self::UpCenter,
            (Self::CenterRight, Up) => Self::UpRight,
            (Self::CenterRight, Down) => Self::DownRight,
            (Self::DownRight, Up) => Self::CenterRight,
            (Self::DownRight, Left) => Self::DownCenter,
            (Self::DownCenter, Right) => Self::DownRight,
            (Self::DownCenter, Left) => Self::DownLeft,
            (Self::DownLeft, Up) => Self::CenterLeft,
            (Self::DownLeft, Right) => Self::DownCenter,
            (Self::CenterLeft, Up) => Self::UpLeft,
            (Self::CenterLeft, Down) => Self::DownLeft,
            (Self::UpCenter, Down)
            | (Self::CenterRight, Left)
            | (Self::DownCenter, Up)
            | (Self::CenterLeft, Right) => return Some(Neighbor::Hub),
            _ => return None,
        };
        Some(Neighbor::Room(slot))
    }

    /// Slot the hub opens onto at `side`.
    #[must_use]
    pub const fn from_hub(side: Facing) -> Self {
        match side {
            Facing::Up => Self::UpCenter,
            Facing::Right => Self::CenterRight,
            Facing::Down => Self::DownCenter,
            Facing::Left => Self::CenterLeft,
        }
    }
}

/// Area on the far side of a room wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Neighbor {
    /// The elevator hub, which always exists.
    Hub,
    /// Another room slot.
    Room(RoomSlot),
}

/// Index of the template a room is built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RoomType(u8);

impl RoomType {
    /// Creates a room type, returning `None` for unknown templates.
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if index < ROOM_TEMPLATE_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Template index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// Room slot assignment of a floor, rolled once and never changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FloorLayout {
    floor: FloorIndex,
    rooms: [Option<RoomType>; 8],
}

impl FloorLayout {
    /// Layout without any rooms besides the hub and the forced boss arena.
    #[must_use]
    pub const fn empty(floor: FloorIndex) -> Self {
        Self {
            floor,
            rooms: [None; 8],
        }
    }

    /// Rolls edge slots first, then corners only where an adjacent edge exists.
    pub fn roll<R: Rng + ?Sized>(floor: FloorIndex, rng: &mut R) -> Self {
        let mut layout = Self::empty(floor);
        for slot in RoomSlot::EDGES {
            layout.rooms[slot.index()] = roll_room_type(floor, rng);
        }
        for slot in RoomSlot::CORNERS {
            let supported = slot
                .supporting_edges()
                .is_some_and(|edges| edges.iter().any(|edge| layout.has_room(*edge)));
            if supported {
                layout.rooms[slot.index()] = roll_room_type(floor, rng);
            }
        }
        info!(
            "rolled layout for floor {floor}: {} rooms{}",
            layout.room_count(),
            if floor.is_boss_floor() { " (boss floor)" } else { "" }
        );
        layout
    }

    /// Returns a copy with `slot` assigned to `room`.
    #[must_use]
    pub fn with_room(mut self, slot: RoomSlot, room: Option<RoomType>) -> Self {
        self.rooms[slot.index()] = room;
        self
    }

    /// Floor the layout belongs to.
    #[must_use]
    pub const fn floor(&self) -> FloorIndex {
        self.floor
    }

    /// Stored template of `slot`; the boss arena has none.
    #[must_use]
    pub const fn room_type(&self, slot: RoomSlot) -> Option<RoomType> {
        self.rooms[slot.index()]
    }

    /// Reports whether `slot` holds a room, counting the boss arena.
    #[must_use]
    pub const fn has_room(&self, slot: RoomSlot) -> bool {
        self.rooms[slot.index()].is_some()
            || (matches!(slot, RoomSlot::UpCenter) && self.floor.is_boss_floor())
    }

    /// Number of populated slots.
    #[must_use]
    pub fn room_count(&self) -> usize {
        RoomSlot::ALL
            .iter()
            .filter(|slot| self.has_room(**slot))
            .count()
    }

    /// Door state on `side` of `slot`: `None` when the side has no doorway.
    #[must_use]
    pub fn door(&self, slot: RoomSlot, side: Facing) -> Option<bool> {
        slot.neighbor(side).map(|neighbor| match neighbor {
            Neighbor::Hub => true,
            Neighbor::Room(other) => self.has_room(other),
        })
    }

    /// Door state on `side` of the hub.
    #[must_use]
    pub fn hub_door(&self, side: Facing) -> bool {
        self.has_room(RoomSlot::from_hub(side))
    }
}

/// Rolls the template of a single slot; boss floors never roll rooms.
pub fn roll_room_type<R: Rng + ?Sized>(floor: FloorIndex, rng: &mut R) -> Option<RoomType> {
    if floor.is_boss_floor() {
        return None;
    }
    let chance = 0.25 + 0.2 * floor.floor_number() as f32;
    if rng.gen::<f32>() >= chance {
        return None;
    }
    let index = math::rand_int(rng, 0, i32::from(ROOM_TEMPLATE_COUNT) - 1);
    u8::try_from(index).ok().and_then(RoomType::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_are_symmetric() {
        for slot in RoomSlot::ALL {
            for side in Facing::ALL {
                if let Some(Neighbor::Room(other)) = slot.neighbor(side) {
                    assert_eq!(
                        other.neighbor(side.opposite()),
                        Some(Neighbor::Room(slot)),
                        "{slot:?} -> {other:?} via {side:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn every_edge_faces_the_hub() {
        for side in Facing::ALL {
            let slot = RoomSlot::from_hub(side);
            assert!(!slot.is_corner());
            assert_eq!(slot.neighbor(side.opposite()), Some(Neighbor::Hub));
        }
    }

    #[test]
    fn boss_arena_counts_as_a_room() {
        let layout = FloorLayout::empty(FloorIndex::new(4));
        assert!(layout.has_room(RoomSlot::UpCenter));
        assert_eq!(layout.room_type(RoomSlot::UpCenter), None);
        assert!(layout.hub_door(Facing::Up));
        assert!(!layout.hub_door(Facing::Down));
    }
}
