//! Sprite sheet and animation keys for every kind of body.

use dronewell_core::{
    Allegiance, BodyKind, DropKind, DroneKind, ElevatorDirection, EnemyKind, Facing, Heading,
    InteractableKind, MovementType, ProjectileKind,
};
use dronewell_world::query::BodySnapshot;

/// Sprite sheets a body is drawn with.
///
/// Drone-like units draw a core sheet matching their movement archetype with
/// a weapon overlay on top; everything else is a single sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpriteKey {
    /// Base sheet.
    pub sheet: &'static str,
    /// Sheet drawn over the base, if any.
    pub overlay: Option<&'static str>,
}

impl SpriteKey {
    const fn single(sheet: &'static str) -> Self {
        Self {
            sheet,
            overlay: None,
        }
    }

    const fn layered(sheet: &'static str, overlay: &'static str) -> Self {
        Self {
            sheet,
            overlay: Some(overlay),
        }
    }

    /// Sheets for a body of the given kind.
    ///
    /// `shielded` only matters for the supervisor, which swaps sheets while
    /// it cannot be damaged.
    #[must_use]
    pub const fn for_body(kind: BodyKind, shielded: bool) -> Self {
        match kind {
            BodyKind::Player => Self::single("player"),
            BodyKind::Drone(kind) => {
                Self::layered(drone_core(kind.movement_type()), drone_overlay(kind))
            }
            BodyKind::Enemy(EnemyKind::Boss) if shielded => Self::single("boss-invulnerable"),
            BodyKind::Enemy(EnemyKind::Boss) => Self::single("boss-vulnerable"),
            BodyKind::Enemy(kind) => {
                Self::layered(enemy_core(kind.movement_type()), enemy_overlay(kind))
            }
            BodyKind::Bullet {
                allegiance: Allegiance::Hostile,
                ..
            } => Self::single("projectile-enemy"),
            BodyKind::Bullet {
                projectile: ProjectileKind::Tracker,
                ..
            } => Self::single("projectile-ally-tracking"),
            BodyKind::Bullet { .. } => Self::single("projectile-ally"),
            BodyKind::Drop(DropKind::Power { .. }) => Self::single("pickup-energy"),
            BodyKind::Drop(DropKind::Schematic(_)) => Self::single("pickup-schematic"),
            BodyKind::Drop(DropKind::Key) => Self::single("pickup-key"),
            BodyKind::Interactable(InteractableKind::PowerCore { .. }) => {
                Self::single("interactable-power-core")
            }
            BodyKind::Interactable(InteractableKind::ElevatorButton { .. }) => {
                Self::single("interactable-arrows")
            }
            BodyKind::Pylon { .. } => Self::single("pylon"),
        }
    }
}

const fn drone_core(movement: MovementType) -> &'static str {
    match movement {
        MovementType::Hovering | MovementType::Boss => "drone-core-hover",
        MovementType::Spinning => "drone-core-spin",
        MovementType::Directional => "drone-core-directional",
        MovementType::Stationary => "drone-core",
    }
}

const fn enemy_core(movement: MovementType) -> &'static str {
    match movement {
        MovementType::Hovering | MovementType::Boss => "enemy-core-hover",
        MovementType::Spinning => "enemy-core-spin",
        MovementType::Directional => "enemy-core-directional",
        MovementType::Stationary => "enemy-core",
    }
}

const fn drone_overlay(kind: DroneKind) -> &'static str {
    match kind {
        DroneKind::Turret => "drone-gun",
        DroneKind::Puncher => "drone-punch-hover",
        DroneKind::Boomerang => "drone-boomerang-spin",
        DroneKind::Tracker => "drone-tracking",
        DroneKind::Strafer => "drone-gun-hover",
        DroneKind::Multishot => "drone-multishot",
    }
}

const fn enemy_overlay(kind: EnemyKind) -> &'static str {
    match kind {
        EnemyKind::Turret => "enemy-gun",
        EnemyKind::HoverTurret | EnemyKind::DirectionalTurret | EnemyKind::Boss => {
            "enemy-gun-hover"
        }
        EnemyKind::SpinBoomerang => "enemy-boomerang-spin",
        EnemyKind::HoverPuncher => "enemy-punch-hover",
        EnemyKind::MultishotTurret => "enemy-multishot",
        EnemyKind::HoverMultishot => "enemy-multishot-hover",
    }
}

/// Looping animations to play on a body's sheets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Animations {
    /// Animation of the base sheet; `None` holds the current frame.
    pub base: Option<String>,
    /// Animation of the overlay sheet.
    pub overlay: Option<String>,
}

/// Animations matching the current state of a body.
#[must_use]
pub fn animations(body: &BodySnapshot) -> Animations {
    let sprite = SpriteKey::for_body(body.kind, body.shielded);
    match body.kind {
        BodyKind::Drone(_) | BodyKind::Enemy(_) => {
            let facing = body.facing.unwrap_or_default();
            let moving = movement_of(body.kind) != Some(MovementType::Stationary);
            Animations {
                base: moving.then(|| unit_animation(facing, sprite.sheet)),
                overlay: sprite
                    .overlay
                    .map(|overlay| unit_animation(facing, overlay)),
            }
        }
        BodyKind::Bullet { .. } => Animations {
            base: Some(format!(
                "bullet-{}-{}",
                Heading::from_direction(body.velocity).key(),
                sprite.sheet
            )),
            overlay: None,
        },
        BodyKind::Interactable(InteractableKind::ElevatorButton { direction, .. }) => Animations {
            base: Some(format!("elevator-button-{}", elevator_key(direction))),
            overlay: None,
        },
        BodyKind::Player
        | BodyKind::Drop(_)
        | BodyKind::Interactable(_)
        | BodyKind::Pylon { .. } => Animations::default(),
    }
}

/// Walking animation of the player for a heading.
#[must_use]
pub fn player_animation(heading: Heading) -> String {
    format!("player-{}", heading.key())
}

fn unit_animation(facing: Facing, sheet: &str) -> String {
    format!("drone-{}-{sheet}", facing.as_str())
}

const fn movement_of(kind: BodyKind) -> Option<MovementType> {
    match kind {
        BodyKind::Drone(kind) => Some(kind.movement_type()),
        BodyKind::Enemy(kind) => Some(kind.movement_type()),
        _ => None,
    }
}

const fn elevator_key(direction: ElevatorDirection) -> &'static str {
    match direction {
        ElevatorDirection::Up => "up",
        ElevatorDirection::Down => "down",
    }
}
