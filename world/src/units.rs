//! Drone-like units: player drones and hostile drones share one shape.

use dronewell_core::{
    Allegiance, BlockedSides, BodyKind, Command, DroneKind, EnemyKind, Facing, TILE_SIZE,
};
use dronewell_system_behavior::{Behavior, TickContext};
use glam::Vec2;
use rand::Rng;

use crate::unit::{Combatant, Unit, FRIENDLY_INVULN_PERIOD, HOSTILE_INVULN_PERIOD};

/// Side length of a regular unit body.
pub(crate) const UNIT_SIZE: f32 = 24.0;
/// Side length of the supervisor's body.
pub(crate) const BOSS_SIZE: f32 = 60.0;

/// What a drone-like unit was built as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum UnitKind {
    Drone(DroneKind),
    Enemy(EnemyKind),
}

impl UnitKind {
    pub(crate) const fn allegiance(self) -> Allegiance {
        match self {
            Self::Drone(_) => Allegiance::Friendly,
            Self::Enemy(_) => Allegiance::Hostile,
        }
    }

    pub(crate) const fn impact_damage(self) -> u32 {
        match self {
            Self::Drone(kind) => kind.impact_damage(),
            Self::Enemy(kind) => kind.impact_damage(),
        }
    }

    pub(crate) const fn body_kind(self) -> BodyKind {
        match self {
            Self::Drone(kind) => BodyKind::Drone(kind),
            Self::Enemy(kind) => BodyKind::Enemy(kind),
        }
    }

    pub(crate) const fn is_boss(self) -> bool {
        matches!(self, Self::Enemy(EnemyKind::Boss))
    }

    pub(crate) const fn size(self) -> f32 {
        if self.is_boss() {
            BOSS_SIZE
        } else {
            UNIT_SIZE
        }
    }
}

/// A drone or enemy with its behavior and combat state.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DroneLike {
    pub(crate) kind: UnitKind,
    pub(crate) unit: Unit,
    pub(crate) facing: Facing,
    behavior: Behavior,
}

impl DroneLike {
    /// Drone deployed from a schematic; it starts with the schematic's cost as power.
    pub(crate) fn drone(kind: DroneKind, facing: Facing) -> Self {
        Self {
            kind: UnitKind::Drone(kind),
            unit: Unit::new(kind.cost(), FRIENDLY_INVULN_PERIOD),
            facing,
            behavior: Behavior::for_drone(kind, facing),
        }
    }

    /// Enemy spawned in a room, a boss wave, or the boss arena.
    pub(crate) fn enemy(kind: EnemyKind, facing: Facing, section: u32) -> Self {
        Self {
            kind: UnitKind::Enemy(kind),
            unit: Unit::new(kind.power(section), HOSTILE_INVULN_PERIOD),
            facing,
            behavior: Behavior::for_enemy(kind, facing),
        }
    }

    pub(crate) const fn drone_kind(&self) -> Option<DroneKind> {
        match self.kind {
            UnitKind::Drone(kind) => Some(kind),
            UnitKind::Enemy(_) => None,
        }
    }

    pub(crate) const fn is_enemy(&self) -> bool {
        matches!(self.kind, UnitKind::Enemy(_))
    }

    /// Contact damage dealt on overlap; drones only hurt while alive and powered.
    pub(crate) fn contact_damage(&self) -> u32 {
        let armed = match self.kind {
            UnitKind::Drone(_) => !self.unit.is_dead() && self.unit.power() > 0,
            UnitKind::Enemy(_) => !self.unit.is_dead(),
        };
        if armed {
            self.kind.impact_damage()
        } else {
            0
        }
    }
}

impl Combatant for DroneLike {
    fn unit(&self) -> &Unit {
        &self.unit
    }

    fn unit_mut(&mut self) -> &mut Unit {
        &mut self.unit
    }
}

/// Units making discrete decisions on logic ticks.
pub(crate) trait Tickable {
    fn tick<R: Rng + ?Sized>(&mut self, ctx: &TickContext, rng: &mut R, out: &mut Vec<Command>);

    fn wall_collision<R: Rng + ?Sized>(
        &mut self,
        ctx: &TickContext,
        blocked: BlockedSides,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) -> bool;
}

impl Tickable for DroneLike {
    fn tick<R: Rng + ?Sized>(&mut self, ctx: &TickContext, rng: &mut R, out: &mut Vec<Command>) {
        self.behavior.tick(ctx, rng, out);
    }

    fn wall_collision<R: Rng + ?Sized>(
        &mut self,
        ctx: &TickContext,
        blocked: BlockedSides,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) -> bool {
        self.behavior.wall_collision(ctx, blocked, rng, out)
    }
}

/// Centre of the tile containing `position`.
pub(crate) fn snap_to_tile(position: Vec2) -> Vec2 {
    let half = TILE_SIZE / 2.0;
    (position / TILE_SIZE).floor() * TILE_SIZE + Vec2::splat(half)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapping_lands_on_tile_centres() {
        assert_eq!(snap_to_tile(Vec2::new(0.0, 0.0)), Vec2::new(16.0, 16.0));
        assert_eq!(snap_to_tile(Vec2::new(-1.0, 40.0)), Vec2::new(-16.0, 48.0));
        assert_eq!(snap_to_tile(Vec2::new(-16.0, -16.0)), Vec2::new(-16.0, -16.0));
    }

    #[test]
    fn drones_start_with_their_cost_as_power() {
        let drone = DroneLike::drone(DroneKind::Multishot, Facing::Left);
        assert_eq!(drone.unit.power(), 20);
        assert_eq!(drone.unit.max_power(), 20);
        assert_eq!(drone.kind.allegiance(), Allegiance::Friendly);
    }

    #[test]
    fn drained_drones_stop_dealing_contact_damage() {
        let mut drone = DroneLike::drone(DroneKind::Boomerang, Facing::Up);
        assert_eq!(drone.contact_damage(), 15);
        drone.unit.drain(15);
        assert_eq!(drone.contact_damage(), 0);
    }

    #[test]
    fn boss_power_scales_with_the_section() {
        let boss = DroneLike::enemy(EnemyKind::Boss, Facing::Down, 1);
        assert_eq!(boss.unit.power(), 150);
        assert_eq!(boss.kind.size(), BOSS_SIZE);
    }
}
