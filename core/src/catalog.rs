//! Static catalogs describing every drone and enemy the simulation can build.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Movement archetype shared by drones and enemies of the same family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementType {
    /// Unit never moves on its own.
    Stationary,
    /// Unit hovers along straight lines chosen at tick time.
    Hovering,
    /// Unit travels diagonally and reflects off walls.
    Spinning,
    /// Unit patrols perpendicular to its firing axis.
    Directional,
    /// Supervisor unit with burst random walks.
    Boss,
}

/// Drone variants the player may deploy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DroneKind {
    /// Stationary gun firing along its facing every tick.
    Turret,
    /// Hovering puncher that rams enemies.
    Puncher,
    /// Spinning boomerang bouncing between walls.
    Boomerang,
    /// Stationary launcher of homing projectiles.
    Tracker,
    /// Directional gun strafing along a patrol axis.
    Strafer,
    /// Stationary launcher of three-bullet fans.
    Multishot,
}

impl DroneKind {
    /// Every drone kind in catalog order.
    pub const ALL: [Self; 6] = [
        Self::Turret,
        Self::Puncher,
        Self::Boomerang,
        Self::Tracker,
        Self::Strafer,
        Self::Multishot,
    ];

    /// Schematic describing how the drone is built.
    #[must_use]
    pub const fn schematic(self) -> DroneSchematic {
        match self {
            Self::Turret => DroneSchematic::new(self, "Turret", 10),
            Self::Puncher => DroneSchematic::new(self, "Puncher", 15),
            Self::Boomerang => DroneSchematic::new(self, "Boomerang", 15),
            Self::Tracker => DroneSchematic::new(self, "Tracker", 15),
            Self::Strafer => DroneSchematic::new(self, "Strafer", 15),
            Self::Multishot => DroneSchematic::new(self, "Multishot", 20),
        }
    }

    /// Display name used in alerts and context hints.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.schematic().name()
    }

    /// Power spent to deploy the drone; also its starting power.
    #[must_use]
    pub const fn cost(self) -> u32 {
        self.schematic().cost()
    }

    /// Contact damage dealt to overlapping enemies.
    #[must_use]
    pub const fn impact_damage(self) -> u32 {
        match self {
            Self::Turret | Self::Tracker => 0,
            Self::Puncher => 10,
            Self::Boomerang => 15,
            Self::Strafer | Self::Multishot => 5,
        }
    }

    /// Movement archetype of the drone.
    #[must_use]
    pub const fn movement_type(self) -> MovementType {
        match self {
            Self::Turret | Self::Tracker | Self::Multishot => MovementType::Stationary,
            Self::Puncher => MovementType::Hovering,
            Self::Boomerang => MovementType::Spinning,
            Self::Strafer => MovementType::Directional,
        }
    }
}

impl fmt::Display for DroneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable blueprint enabling the player to deploy a drone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DroneSchematic {
    kind: DroneKind,
    name: &'static str,
    cost: u32,
}

impl DroneSchematic {
    /// Catalog of every drone schematic.
    pub const ALL: [Self; 6] = [
        DroneKind::Turret.schematic(),
        DroneKind::Puncher.schematic(),
        DroneKind::Boomerang.schematic(),
        DroneKind::Tracker.schematic(),
        DroneKind::Strafer.schematic(),
        DroneKind::Multishot.schematic(),
    ];

    const fn new(kind: DroneKind, name: &'static str, cost: u32) -> Self {
        Self { kind, name, cost }
    }

    /// Drone built by the schematic.
    #[must_use]
    pub const fn kind(&self) -> DroneKind {
        self.kind
    }

    /// Display name of the schematic.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Deployment cost measured in power.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }
}

/// Hostile drone variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Stationary gun rotating clockwise between shots.
    Turret,
    /// Hovering gun aiming at the player.
    HoverTurret,
    /// Spinning boomerang bouncing between walls.
    SpinBoomerang,
    /// Directional gun strafing along a patrol axis.
    DirectionalTurret,
    /// Hovering puncher chasing the player one axis at a time.
    HoverPuncher,
    /// Stationary fan launcher rotating clockwise between volleys.
    MultishotTurret,
    /// Hovering fan launcher aiming at the player.
    HoverMultishot,
    /// Floor supervisor guarding the boss arena.
    Boss,
}

impl EnemyKind {
    /// Schematic describing how the enemy is built.
    #[must_use]
    pub const fn schematic(self) -> EnemySchematic {
        match self {
            Self::Turret => EnemySchematic::new(self, "Turret", 10),
            Self::HoverTurret => EnemySchematic::new(self, "Hover Turret", 15),
            Self::SpinBoomerang => EnemySchematic::new(self, "Spin Boomerang", 15),
            Self::DirectionalTurret => EnemySchematic::new(self, "Directional Turret", 15),
            Self::HoverPuncher => EnemySchematic::new(self, "Hover Puncher", 20),
            Self::MultishotTurret => EnemySchematic::new(self, "Multishot Turret", 20),
            Self::HoverMultishot => EnemySchematic::new(self, "Hover Multishot", 25),
            Self::Boss => EnemySchematic::new(self, "Boss", u32::MAX),
        }
    }

    /// Display name of the enemy.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.schematic().name()
    }

    /// Starting power of the enemy within the provided difficulty section.
    #[must_use]
    pub const fn power(self, section: u32) -> u32 {
        match self {
            Self::Turret => 15,
            Self::DirectionalTurret => 10,
            Self::HoverTurret | Self::SpinBoomerang | Self::HoverPuncher | Self::MultishotTurret => {
                20
            }
            Self::HoverMultishot => 25,
            Self::Boss => 100 + section.saturating_mul(50),
        }
    }

    /// Contact damage dealt to overlapping friendly units.
    #[must_use]
    pub const fn impact_damage(self) -> u32 {
        match self {
            Self::SpinBoomerang | Self::HoverPuncher | Self::Boss => 10,
            _ => 5,
        }
    }

    /// Movement archetype of the enemy.
    #[must_use]
    pub const fn movement_type(self) -> MovementType {
        match self {
            Self::Turret | Self::MultishotTurret => MovementType::Stationary,
            Self::HoverTurret | Self::HoverPuncher | Self::HoverMultishot => MovementType::Hovering,
            Self::SpinBoomerang => MovementType::Spinning,
            Self::DirectionalTurret => MovementType::Directional,
            Self::Boss => MovementType::Boss,
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable template used when populating floors with enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnemySchematic {
    kind: EnemyKind,
    name: &'static str,
    cost: u32,
}

impl EnemySchematic {
    /// Enemies drawn by budgeted population.
    pub const ALL: [Self; 7] = [
        EnemyKind::Turret.schematic(),
        EnemyKind::HoverTurret.schematic(),
        EnemyKind::SpinBoomerang.schematic(),
        EnemyKind::DirectionalTurret.schematic(),
        EnemyKind::HoverPuncher.schematic(),
        EnemyKind::MultishotTurret.schematic(),
        EnemyKind::HoverMultishot.schematic(),
    ];

    /// Sentinel template for the supervisor; its cost never fits a budget.
    pub const BOSS: Self = EnemyKind::Boss.schematic();

    const fn new(kind: EnemyKind, name: &'static str, cost: u32) -> Self {
        Self { kind, name, cost }
    }

    /// Enemy built by the schematic.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        self.kind
    }

    /// Display name of the schematic.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Budget cost of the enemy.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Budgeted schematics whose cost fits within `budget`.
    pub fn affordable(budget: u32) -> impl Iterator<Item = Self> {
        Self::ALL
            .into_iter()
            .filter(move |schematic| schematic.cost <= budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drone_power_matches_schematic_cost() {
        for kind in DroneKind::ALL {
            assert_eq!(kind.cost(), kind.schematic().cost());
        }
        assert_eq!(DroneKind::Multishot.cost(), 20);
        assert_eq!(DroneKind::Turret.cost(), 10);
    }

    #[test]
    fn boss_is_never_affordable() {
        let affordable: Vec<_> = EnemySchematic::affordable(u32::MAX - 1).collect();
        assert_eq!(affordable.len(), EnemySchematic::ALL.len());
        assert!(affordable.iter().all(|s| s.kind() != EnemyKind::Boss));
    }

    #[test]
    fn affordable_filters_by_budget() {
        let kinds: Vec<_> = EnemySchematic::affordable(15).map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                EnemyKind::Turret,
                EnemyKind::HoverTurret,
                EnemyKind::SpinBoomerang,
                EnemyKind::DirectionalTurret
            ]
        );
        assert_eq!(EnemySchematic::affordable(5).count(), 0);
    }

    #[test]
    fn boss_power_scales_with_section() {
        assert_eq!(EnemyKind::Boss.power(0), 100);
        assert_eq!(EnemyKind::Boss.power(2), 200);
    }
}
