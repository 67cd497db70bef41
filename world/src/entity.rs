//! Arena entries: every simulated object except the player and floors.

use dronewell_core::{BodyKind, DropKind, FloorIndex, InteractableKind, Scope};
use glam::Vec2;

use crate::{
    lifecycle::{Lifecycle, LifecycleState, Spatial},
    pickups::{FIXTURE_SIZE, PICKUP_SIZE},
    projectile::{Bullet, BULLET_SIZE},
    pylon::Pylon,
    units::DroneLike,
};

/// Collections in the order the update pass walks them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Category {
    Drone,
    Enemy,
    Drop,
    Bullet,
    Interactable,
    Pylon,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Body {
    Unit(DroneLike),
    Bullet(Bullet),
    Drop(DropKind),
    Interactable(InteractableKind),
    Pylon(Pylon),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Entity {
    pub(crate) scope: Scope,
    pub(crate) lifecycle: LifecycleState,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) body: Body,
}

impl Entity {
    pub(crate) fn new(floor: FloorIndex, position: Vec2, body: Body) -> Self {
        let velocity = match &body {
            Body::Bullet(bullet) => bullet.velocity(),
            _ => Vec2::ZERO,
        };
        Self {
            scope: Scope::Floor(floor),
            lifecycle: LifecycleState::default(),
            position,
            velocity,
            body,
        }
    }

    /// Floor the entity lives on; arena entities are always floor-scoped.
    pub(crate) fn floor(&self) -> Option<FloorIndex> {
        match self.scope {
            Scope::Floor(floor) => Some(floor),
            Scope::Global => None,
        }
    }

    pub(crate) fn is_on(&self, floor: FloorIndex) -> bool {
        self.floor() == Some(floor)
    }

    pub(crate) fn category(&self) -> Category {
        match &self.body {
            Body::Unit(unit) if unit.is_enemy() => Category::Enemy,
            Body::Unit(_) => Category::Drone,
            Body::Bullet(_) => Category::Bullet,
            Body::Drop(_) => Category::Drop,
            Body::Interactable(_) => Category::Interactable,
            Body::Pylon(_) => Category::Pylon,
        }
    }

    pub(crate) fn body_kind(&self) -> BodyKind {
        match &self.body {
            Body::Unit(unit) => unit.kind.body_kind(),
            Body::Bullet(bullet) => bullet.body_kind(),
            Body::Drop(drop) => BodyKind::Drop(*drop),
            Body::Interactable(kind) => BodyKind::Interactable(*kind),
            Body::Pylon(pylon) => BodyKind::Pylon { boss: pylon.boss },
        }
    }

    pub(crate) fn size(&self) -> f32 {
        match &self.body {
            Body::Unit(unit) => unit.kind.size(),
            Body::Bullet(_) => BULLET_SIZE,
            Body::Drop(_) => PICKUP_SIZE,
            Body::Interactable(_) | Body::Pylon(_) => FIXTURE_SIZE,
        }
    }

    pub(crate) fn unit(&self) -> Option<&DroneLike> {
        match &self.body {
            Body::Unit(unit) => Some(unit),
            _ => None,
        }
    }

    pub(crate) fn unit_mut(&mut self) -> Option<&mut DroneLike> {
        match &mut self.body {
            Body::Unit(unit) => Some(unit),
            _ => None,
        }
    }

    /// Enemy state if the entity is a living-or-dying enemy.
    pub(crate) fn enemy(&self) -> Option<&DroneLike> {
        self.unit().filter(|unit| unit.is_enemy())
    }

    pub(crate) fn is_boss(&self) -> bool {
        self.unit().is_some_and(|unit| unit.kind.is_boss())
    }

    pub(crate) fn pylon(&self) -> Option<&Pylon> {
        match &self.body {
            Body::Pylon(pylon) => Some(pylon),
            _ => None,
        }
    }
}

impl Lifecycle for Entity {
    fn scope(&self) -> Scope {
        self.scope
    }

    fn lifecycle(&self) -> &LifecycleState {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut LifecycleState {
        &mut self.lifecycle
    }
}

impl Spatial for Entity {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }
}
