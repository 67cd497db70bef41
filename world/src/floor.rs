//! Per-floor state: layout, collision map, and progression latches.

use dronewell_core::{ElevatorDirection, FloorIndex, InteractError, Scope};
use dronewell_system_floor_generation::{
    FloorLayout, GateState, TileMap, TilePos, BOSS_ELEVATOR_GATE, BOSS_ROOM_GATE,
};

use crate::lifecycle::{Lifecycle, LifecycleState};

/// Gates a boss floor can open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Gate {
    BossRoom,
    BossElevator,
}

impl Gate {
    const fn tiles(self) -> &'static [TilePos] {
        match self {
            Self::BossRoom => &BOSS_ROOM_GATE,
            Self::BossElevator => &BOSS_ELEVATOR_GATE,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Floor {
    pub(crate) layout: FloorLayout,
    map: Option<TileMap>,
    lifecycle: LifecycleState,
    pub(crate) has_spawned_objects: bool,
    pub(crate) has_found_key: bool,
    pub(crate) has_unlocked_elevator: bool,
    pub(crate) has_opened_boss_room: bool,
    pub(crate) has_opened_boss_elevator: bool,
}

impl Floor {
    pub(crate) fn new(layout: FloorLayout) -> Self {
        Self {
            layout,
            map: None,
            lifecycle: LifecycleState::default(),
            has_spawned_objects: false,
            has_found_key: false,
            has_unlocked_elevator: false,
            has_opened_boss_room: false,
            has_opened_boss_elevator: false,
        }
    }

    pub(crate) fn index(&self) -> FloorIndex {
        self.layout.floor()
    }

    /// Collision map, present only while the floor is spawned.
    pub(crate) fn map(&self) -> Option<&TileMap> {
        self.map.as_ref()
    }

    /// Spawns the floor, rebuilding its tile map from the latched gates.
    ///
    /// Returns `true` the first time the floor ever spawns.
    pub(crate) fn spawn(&mut self) -> bool {
        let first = self.lifecycle.spawn();
        let gates = GateState {
            boss_room_open: self.has_opened_boss_room,
            boss_elevator_open: self.has_opened_boss_elevator,
        };
        self.map = Some(TileMap::build(&self.layout, gates));
        first
    }

    pub(crate) fn despawn(&mut self) {
        self.lifecycle.despawn();
        self.map = None;
    }

    /// Latches a gate open, returning `false` if it already was.
    pub(crate) fn open_gate(&mut self, gate: Gate) -> bool {
        let flag = match gate {
            Gate::BossRoom => &mut self.has_opened_boss_room,
            Gate::BossElevator => &mut self.has_opened_boss_elevator,
        };
        if *flag {
            return false;
        }
        *flag = true;
        if let Some(map) = self.map.as_mut() {
            map.set_gate(gate.tiles(), true);
        }
        true
    }

    /// Destination of an elevator button on this floor.
    ///
    /// Hub buttons travel up from every floor below a section's first and
    /// down from every floor but the boss floor. The boss arena's exit only
    /// travels down. Upward travel is never locked; downward travel waits
    /// for the elevator to unlock, or for the boss to fall in the arena.
    pub(crate) fn elevator(
        &self,
        direction: ElevatorDirection,
        main: bool,
    ) -> Result<FloorIndex, InteractError> {
        let floor = self.index();
        let valid = match (main, direction) {
            (true, ElevatorDirection::Up) => !floor.is_top_floor(),
            (true, ElevatorDirection::Down) => !floor.is_boss_floor(),
            (false, ElevatorDirection::Down) => true,
            (false, ElevatorDirection::Up) => false,
        };
        let destination = floor
            .offset(direction.delta())
            .filter(|_| valid)
            .ok_or(InteractError::ElevatorUnavailable { direction })?;

        let unlocked = match direction {
            ElevatorDirection::Up => true,
            ElevatorDirection::Down if main => self.has_unlocked_elevator,
            ElevatorDirection::Down => self.has_opened_boss_elevator || self.has_unlocked_elevator,
        };
        if !unlocked {
            return Err(InteractError::ElevatorLocked);
        }
        Ok(destination)
    }
}

impl Lifecycle for Floor {
    fn scope(&self) -> Scope {
        Scope::Floor(self.index())
    }

    fn lifecycle(&self) -> &LifecycleState {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut LifecycleState {
        &mut self.lifecycle
    }
}
