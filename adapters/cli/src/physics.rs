//! Axis-aligned box physics for headless runs.
//!
//! Reports wall collisions and body overlaps back to the world as commands;
//! the world owns all motion.

use dronewell_core::{BlockedSides, BodyKind, Command, EntityId, TILE_SIZE};
use dronewell_system_floor_generation::{TileMap, TilePos};
use dronewell_world::{query, World};
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Collider {
    entity: EntityId,
    position: Vec2,
    half: f32,
    solid: bool,
}

impl Collider {
    fn overlaps(&self, other: &Self) -> bool {
        let gap = (self.position - other.position).abs();
        let reach = self.half + other.half;
        gap.x < reach && gap.y < reach
    }
}

/// Collision reports for the bodies on the player's floor.
pub(crate) fn step(world: &World) -> Vec<Command> {
    let player = query::player(world);
    let mut colliders = vec![Collider {
        entity: EntityId::PLAYER,
        position: player.position,
        half: player.size / 2.0,
        solid: true,
    }];
    colliders.extend(query::active_bodies(world).into_iter().map(|body| Collider {
        entity: body.entity,
        position: body.position,
        half: body.size / 2.0,
        solid: matches!(
            body.kind,
            BodyKind::Drone(_) | BodyKind::Enemy(_) | BodyKind::Bullet { .. }
        ),
    }));

    let mut commands = Vec::new();
    if let Some(map) = query::tile_map(world) {
        for collider in colliders.iter_mut().filter(|collider| collider.solid) {
            if let Some((blocked, resolved)) = separate(map, collider.position, collider.half) {
                collider.position = resolved;
                commands.push(Command::ReportWallCollision {
                    entity: collider.entity,
                    blocked,
                    resolved,
                });
            }
        }
    }

    for (index, first) in colliders.iter().enumerate() {
        for second in &colliders[index + 1..] {
            if first.overlaps(second) {
                commands.push(Command::ReportOverlap {
                    first: first.entity,
                    second: second.entity,
                });
            }
        }
    }
    commands
}

/// Pushes a box out of every solid tile it overlaps, along the shallower axis.
fn separate(map: &TileMap, position: Vec2, half: f32) -> Option<(BlockedSides, Vec2)> {
    let extent = Vec2::splat(half);
    let tiles: Vec<TilePos> = map.solid_tiles_between(position - extent, position + extent);
    let mut blocked = BlockedSides::default();
    let mut resolved = position;
    let mut moved = false;

    for tile in tiles {
        let center = TileMap::center(tile);
        let delta = resolved - center;
        let reach = half + TILE_SIZE / 2.0;
        let depth = Vec2::splat(reach) - delta.abs();
        if depth.x <= 0.0 || depth.y <= 0.0 {
            continue;
        }
        moved = true;
        if depth.x < depth.y {
            if delta.x < 0.0 {
                resolved.x -= depth.x;
                blocked.right = true;
            } else {
                resolved.x += depth.x;
                blocked.left = true;
            }
        } else if delta.y < 0.0 {
            resolved.y -= depth.y;
            blocked.down = true;
        } else {
            resolved.y += depth.y;
            blocked.up = true;
        }
    }
    moved.then_some((blocked, resolved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dronewell_core::DEFAULT_TICK_RATE;
    use dronewell_world::{apply, Config};
    use std::time::Duration;

    fn started() -> World {
        let mut world = World::new(Config::new(DEFAULT_TICK_RATE, 17));
        let mut events = Vec::new();
        apply(&mut world, Command::StartGame, &mut events);
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(1),
            },
            &mut events,
        );
        world
    }

    #[test]
    fn boxes_touching_edge_to_edge_do_not_overlap() {
        let a = Collider {
            entity: EntityId::PLAYER,
            position: Vec2::ZERO,
            half: 10.0,
            solid: true,
        };
        let touching = Collider {
            position: Vec2::new(20.0, 0.0),
            ..a
        };
        let inside = Collider {
            position: Vec2::new(19.0, 5.0),
            ..a
        };
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
    }

    #[test]
    fn bodies_are_pushed_out_of_walls() {
        let world = started();
        let map = query::tile_map(&world).expect("floor generated");
        let wall = (0..48)
            .flat_map(|y| (0..24).map(move |x| TilePos::new(x, y)))
            .find(|pos| map.tile(*pos).is_solid())
            .expect("every floor has walls");

        let center = TileMap::center(wall);
        let (blocked, resolved) =
            separate(map, center + Vec2::new(0.0, 1.0), 10.0).expect("inside a wall");
        assert!(blocked.any());
        assert_ne!(resolved, center + Vec2::new(0.0, 1.0));
    }

    #[test]
    fn the_player_starts_clear_of_walls() {
        let world = started();
        let commands = step(&world);
        assert!(!commands.iter().any(|command| matches!(
            command,
            Command::ReportWallCollision { entity, .. } if *entity == EntityId::PLAYER
        )));
    }
}
