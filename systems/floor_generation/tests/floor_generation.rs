use std::collections::HashSet;

use dronewell_core::{ElevatorDirection, EnemySchematic, Facing, FloorIndex};
use dronewell_system_floor_generation::{
    fill_budget, plan_boss_wave, populate_floor, room_budget, FloorLayout, GateState, RoomSlot,
    RoomType, Tile, TileMap, TilePos, BOSS_ELEVATOR_GATE, BOSS_POSITION, BOSS_ROOM_GATE,
};
use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

fn room(index: u8) -> Option<RoomType> {
    RoomType::new(index)
}

#[test]
fn corners_never_generate_in_isolation() {
    for seed in 0..200 {
        for floor in 0..4 {
            let layout = FloorLayout::roll(FloorIndex::new(floor), &mut rng(seed));
            for corner in RoomSlot::CORNERS {
                if !layout.has_room(corner) {
                    continue;
                }
                let edges = corner.supporting_edges().expect("corners have supporting edges");
                assert!(
                    edges.iter().any(|edge| layout.has_room(*edge)),
                    "seed {seed} floor {floor}: isolated corner {corner:?}"
                );
            }
        }
    }
}

#[test]
fn up_left_is_never_rolled_without_its_edges() {
    let mut observed = 0;
    for seed in 0..500 {
        let layout = FloorLayout::roll(FloorIndex::new(1), &mut rng(seed));
        if !layout.has_room(RoomSlot::UpCenter) && !layout.has_room(RoomSlot::CenterLeft) {
            observed += 1;
            assert_eq!(layout.room_type(RoomSlot::UpLeft), None, "seed {seed}");
        }
    }
    assert!(observed > 0, "scenario should occur for some seed");
}

#[test]
fn deeper_floors_roll_more_rooms() {
    let total = |floor: u32| -> usize {
        (0..300)
            .map(|seed| FloorLayout::roll(FloorIndex::new(floor), &mut rng(seed)).room_count())
            .sum()
    };
    assert!(total(3) > total(0));
}

#[test]
fn boss_floors_hold_only_the_arena() {
    let floor = FloorIndex::new(9);
    let layout = FloorLayout::roll(floor, &mut rng(7));
    for slot in RoomSlot::ALL {
        assert_eq!(layout.room_type(slot), None, "{slot:?}");
    }
    assert!(layout.has_room(RoomSlot::UpCenter));
    assert_eq!(layout.room_count(), 1);

    let map = TileMap::build(&layout, GateState::default());
    let population = populate_floor(&layout, &map, &mut rng(7));
    assert!(population.enemies.is_empty());
    assert!(population.power_cores.is_empty());
    assert_eq!(population.boss, Some(BOSS_POSITION));
    assert_eq!(population.pylons.len(), 8);
    assert_eq!(population.pylons.iter().filter(|p| p.boss).count(), 4);

    let buttons: Vec<_> = population
        .buttons
        .iter()
        .map(|b| (b.direction, b.main))
        .collect();
    assert_eq!(
        buttons,
        vec![
            (ElevatorDirection::Up, true),
            (ElevatorDirection::Down, false)
        ]
    );
}

#[test]
fn fixtures_stand_on_walkable_tiles() {
    let layout = FloorLayout::empty(FloorIndex::new(4));
    let map = TileMap::build(&layout, GateState::default());
    let population = populate_floor(&layout, &map, &mut rng(1));
    let mut positions: Vec<Vec2> = population.pylons.iter().map(|p| p.position).collect();
    positions.extend(population.buttons.iter().map(|b| b.position));
    positions.extend(population.boss);
    positions.push(Vec2::ZERO);
    for position in positions {
        let tile = TileMap::locate(position).map(|pos| map.tile(pos));
        assert_eq!(tile, Some(Tile::Floor), "fixture at {position}");
    }
}

#[test]
fn top_floor_only_offers_the_way_down() {
    let layout = FloorLayout::empty(FloorIndex::TOP);
    let map = TileMap::build(&layout, GateState::default());
    let population = populate_floor(&layout, &map, &mut rng(3));
    assert_eq!(population.buttons.len(), 1);
    assert_eq!(population.buttons[0].direction, ElevatorDirection::Down);
    assert!(population.buttons[0].main);
    assert!(population.pylons.is_empty());
    assert_eq!(population.boss, None);
}

#[test]
fn doors_open_only_between_existing_rooms() {
    let layout = FloorLayout::empty(FloorIndex::new(2))
        .with_room(RoomSlot::UpCenter, room(0))
        .with_room(RoomSlot::UpLeft, room(1));
    let map = TileMap::build(&layout, GateState::default());

    let open = Tile::Door { open: true };
    let closed = Tile::Door { open: false };
    // Between the two northern rooms.
    assert_eq!(map.tile(TilePos::new(7, 27)), open);
    assert_eq!(map.tile(TilePos::new(8, 28)), open);
    // Hub to the northern edge room.
    assert_eq!(map.tile(TilePos::new(11, 31)), open);
    assert_eq!(map.tile(TilePos::new(12, 32)), open);
    // Hub toward the missing southern room.
    assert_eq!(map.tile(TilePos::new(11, 39)), closed);
    // Corner toward the missing western room.
    assert_eq!(map.tile(TilePos::new(3, 31)), closed);
    // Missing rooms are cleared.
    assert_eq!(map.tile(TilePos::new(20, 28)), Tile::Void);
}

#[test]
fn latched_gates_stay_open_on_rebuild() {
    let layout = FloorLayout::empty(FloorIndex::new(4));
    let gates = GateState {
        boss_room_open: true,
        boss_elevator_open: false,
    };
    let map = TileMap::build(&layout, gates);
    for pos in BOSS_ROOM_GATE {
        assert!(map.tile(pos).is_walkable(), "{pos:?}");
    }
    for pos in BOSS_ELEVATOR_GATE {
        assert!(map.tile(pos).is_solid(), "{pos:?}");
    }
}

#[test]
fn room_contents_occupy_distinct_interior_tiles() {
    for seed in 0..50 {
        let floor = FloorIndex::new(3);
        let mut rng = rng(seed);
        let layout = FloorLayout::roll(floor, &mut rng);
        let map = TileMap::build(&layout, GateState::default());
        let population = populate_floor(&layout, &map, &mut rng);

        let mut seen = HashSet::new();
        let positions = population
            .enemies
            .iter()
            .map(|e| e.position)
            .chain(population.power_cores.iter().copied());
        for position in positions {
            let tile = TileMap::locate(position).expect("on map");
            assert!(map.tile(tile).is_walkable(), "seed {seed}: {tile:?}");
            assert!(seen.insert(tile), "seed {seed}: shared tile {tile:?}");
        }
    }
}

#[test]
fn room_budget_is_a_multiple_of_five_within_range() {
    let mut rng = rng(11);
    for floor in [0, 3, 8] {
        for _ in 0..100 {
            let budget = room_budget(FloorIndex::new(floor), &mut rng);
            assert_eq!(budget % 5, 0);
            assert!(budget <= (5 + floor) * 5, "budget {budget} on floor {floor}");
        }
    }
}

#[test]
fn greedy_fill_never_overspends() {
    let mut rng = rng(5);
    for budget in [0, 5, 10, 35, 80] {
        let mut tiles: Vec<Vec2> = (0..20).map(|i| Vec2::new(i as f32 * 32.0, 0.0)).collect();
        let placed = fill_budget(budget, &mut tiles, &mut rng);
        let spent: u32 = placed.iter().map(|p| p.kind.schematic().cost()).sum();
        assert!(spent <= budget, "spent {spent} of {budget}");
        let cheapest = EnemySchematic::ALL.iter().map(|s| s.cost()).min().unwrap_or(0);
        assert!(
            budget - spent < cheapest,
            "stopped early with {} left",
            budget - spent
        );
        assert!(placed.iter().all(|p| Facing::ALL.contains(&p.facing)));
    }
}

#[test]
fn greedy_fill_stops_when_tiles_run_out() {
    let mut tiles = vec![Vec2::ZERO, Vec2::ONE];
    let placed = fill_budget(1_000, &mut tiles, &mut rng(2));
    assert_eq!(placed.len(), 2);
    assert!(tiles.is_empty());
}

#[test]
fn boss_waves_avoid_occupied_tiles() {
    let layout = FloorLayout::empty(FloorIndex::new(4));
    let map = TileMap::build(&layout, GateState::default());
    let occupant = BOSS_POSITION + Vec2::new(32.0, 0.0);
    let placed = plan_boss_wave(
        &map,
        BOSS_POSITION,
        &[BOSS_POSITION, occupant],
        1_000,
        &mut rng(9),
    );
    assert_eq!(placed.len(), 7);
    let blocked = [
        TileMap::locate(BOSS_POSITION),
        TileMap::locate(occupant),
    ];
    for placement in &placed {
        let tile = TileMap::locate(placement.position);
        assert!(!blocked.contains(&tile), "{tile:?} already occupied");
    }
}
