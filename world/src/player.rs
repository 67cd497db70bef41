//! The player singleton and everything it can do with the primary action.

use dronewell_core::{
    math, DeployError, DroneKind, EntityId, Event, Facing, FloorIndex, InputState,
    InteractError, InteractableKind, SoundCue,
};
use glam::Vec2;
use log::{debug, info};

use crate::{
    entity::{Body, Category, Entity},
    lifecycle::{Lifecycle, Spatial},
    pickups::{action_text, REACH},
    unit::{Combatant, Unit, FRIENDLY_INVULN_PERIOD},
    units::DroneLike,
    World,
};

/// Starting and maximum power of the player.
pub(crate) const PLAYER_POWER: u32 = 100;
/// Walking speed in world units per second.
pub(crate) const PLAYER_SPEED: f32 = 128.0;
/// Side length of the player's body.
pub(crate) const PLAYER_SIZE: f32 = 20.0;
/// Hurt time above which knockback pushes the player.
const KNOCKBACK_WINDOW: f32 = 0.75;
/// Strength of the knockback push relative to walking.
const KNOCKBACK_SCALE: f32 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Player {
    pub(crate) unit: Unit,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) facing: Facing,
    pub(crate) floor: FloorIndex,
    pub(crate) schematics: Vec<DroneKind>,
    schematic_index: usize,
    placing: bool,
    cycling: bool,
}

impl Player {
    pub(crate) fn new() -> Self {
        Self {
            unit: Unit::new(PLAYER_POWER, FRIENDLY_INVULN_PERIOD),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            facing: Facing::default(),
            floor: FloorIndex::TOP,
            schematics: vec![DroneKind::Turret],
            schematic_index: 0,
            placing: false,
            cycling: false,
        }
    }

    pub(crate) fn selected(&self) -> Option<DroneKind> {
        self.schematics.get(self.schematic_index).copied()
    }

    pub(crate) fn owns(&self, kind: DroneKind) -> bool {
        self.schematics.contains(&kind)
    }

    /// Latches the primary key, returning `true` only on the press edge.
    fn press_primary(&mut self, held: bool) -> bool {
        let pressed = held && !self.placing;
        self.placing = held;
        pressed
    }

    /// Latches the cycle key, returning `true` only on the press edge.
    fn press_cycle(&mut self, held: bool) -> bool {
        let pressed = held && !self.cycling;
        self.cycling = held;
        pressed
    }

    fn cycle_schematic(&mut self) -> Option<DroneKind> {
        if self.schematics.is_empty() {
            return None;
        }
        self.schematic_index = (self.schematic_index + 1) % self.schematics.len();
        self.selected()
    }

    /// Derives velocity and facing from the held movement keys.
    fn steer(&mut self, input: InputState) {
        let axis = |negative: bool, positive: bool| match (negative, positive) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        let mut direction = Vec2::new(axis(input.left, input.right), axis(input.up, input.down));
        if direction.x != 0.0 && direction.y != 0.0 {
            direction *= 0.5_f32.sqrt();
        }
        if direction.x != 0.0 {
            self.facing = Facing::horizontal(direction.x);
        }
        if direction.y != 0.0 {
            self.facing = Facing::vertical(direction.y);
        }
        if self.unit.hurt_time() > KNOCKBACK_WINDOW {
            direction += self.unit.knockback() * KNOCKBACK_SCALE;
        }
        self.velocity = direction * PLAYER_SPEED;
    }
}

impl Combatant for Player {
    fn unit(&self) -> &Unit {
        &self.unit
    }

    fn unit_mut(&mut self) -> &mut Unit {
        &mut self.unit
    }
}

impl Spatial for Player {
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

/// What the primary action would do right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Target {
    Drone(EntityId),
    Interactable(EntityId),
    Deploy(DroneKind),
}

impl World {
    pub(crate) fn update_player(&mut self, dt: f32, out: &mut Vec<Event>) {
        let input = self.input;
        self.player.unit.cool_down(dt);

        if self.player.press_cycle(input.cycle) {
            if let Some(kind) = self.player.cycle_schematic() {
                debug!("selected {kind} schematic");
                out.push(Event::SchematicSelected { kind });
            }
        }
        if self.player.press_primary(input.primary) {
            match self.interaction_target() {
                Some(Target::Drone(id)) => self.pick_up_drone(id, out),
                Some(Target::Interactable(id)) => self.interact(id, out),
                Some(Target::Deploy(kind)) => self.deploy(kind, out),
                None => {}
            }
        }

        self.player.steer(input);
        self.player.integrate(dt);
    }

    /// Nearest drone in reach, else nearest interactable in reach, else the
    /// selected schematic.
    pub(crate) fn interaction_target(&self) -> Option<Target> {
        let origin = self.player.position;
        let floor = self.player.floor;
        let nearest = |category: Category| {
            self.entities
                .iter()
                .filter(|(_, entity)| {
                    entity.category() == category && entity.is_active() && entity.is_on(floor)
                })
                .map(|(id, entity)| (id, math::manhattan(origin, entity.position)))
                .filter(|(_, distance)| *distance < REACH)
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(id, _)| id)
        };

        if let Some(id) = nearest(Category::Drone) {
            return Some(Target::Drone(id));
        }
        if let Some(id) = nearest(Category::Interactable) {
            return Some(Target::Interactable(id));
        }
        self.player.selected().map(Target::Deploy)
    }

    /// Hint describing what the primary action would do.
    pub(crate) fn context_hint(&self) -> Option<String> {
        let action = match self.interaction_target()? {
            Target::Drone(id) => {
                let drone = self.entities.get(id)?.unit()?;
                let kind = drone.drone_kind()?;
                let refund = self.pickup_refund(drone);
                format!("Pick up {kind} (+{refund} power)")
            }
            Target::Interactable(id) => match &self.entities.get(id)?.body {
                Body::Interactable(kind) => action_text(*kind),
                _ => return None,
            },
            Target::Deploy(kind) => format!("Deploy {kind} (-{} power)", kind.cost()),
        };
        Some(format!("(Spacebar) {action}"))
    }

    fn pickup_refund(&self, drone: &DroneLike) -> u32 {
        self.player.unit.missing_power().min(drone.unit.power())
    }

    fn pick_up_drone(&mut self, id: EntityId, out: &mut Vec<Event>) {
        let Some(entity) = self.entities.get(id) else {
            return;
        };
        let Some((kind, refund)) = entity
            .unit()
            .and_then(|drone| Some((drone.drone_kind()?, self.pickup_refund(drone))))
        else {
            return;
        };
        let position = entity.position;

        let _ = self.player.unit.restore(refund);
        self.sound(SoundCue::Click, position, out);
        self.destroy(id, out);
        debug!("picked up {kind} drone {id}, refunded {refund}");
        out.push(Event::DronePickedUp {
            entity: id,
            kind,
            refund,
        });
    }

    fn deploy(&mut self, kind: DroneKind, out: &mut Vec<Event>) {
        let exists = self
            .entities
            .iter()
            .any(|(_, entity)| entity.unit().and_then(DroneLike::drone_kind) == Some(kind));
        if exists {
            self.reject_deploy(DeployError::AlreadyDeployed { kind }, out);
            return;
        }

        let floor = self.player.floor;
        let free = self.power_surge(floor);
        let cost = kind.cost();
        let available = self.player.unit.power();
        if !free && available <= cost {
            self.reject_deploy(
                DeployError::InsufficientPower {
                    kind,
                    cost,
                    available,
                },
                out,
            );
            return;
        }

        let charged = if free { 0 } else { cost };
        self.player.unit.drain(charged);
        let drone = DroneLike::drone(kind, self.player.facing);
        let id = self.entities.insert(Entity::new(
            floor,
            self.player.position,
            Body::Unit(drone),
        ));
        debug!("deployed {kind} drone {id} for {charged} power");
        out.push(Event::DroneDeployed {
            entity: id,
            kind,
            cost: charged,
        });
    }

    fn reject_deploy(&mut self, reason: DeployError, out: &mut Vec<Event>) {
        debug!("deploy rejected: {reason}");
        self.alert(reason.to_string(), out);
        out.push(Event::DeployRejected { reason });
    }

    fn reject_interaction(&mut self, reason: InteractError, out: &mut Vec<Event>) {
        debug!("interaction rejected: {reason}");
        self.alert(reason.to_string(), out);
        out.push(Event::InteractionRejected { reason });
    }

    fn interact(&mut self, id: EntityId, out: &mut Vec<Event>) {
        let Some(entity) = self.entities.get(id) else {
            return;
        };
        let Body::Interactable(kind) = entity.body else {
            return;
        };
        let position = entity.position;

        match kind {
            InteractableKind::PowerCore { power } => {
                if self.player.unit.missing_power() == 0 {
                    self.reject_interaction(InteractError::PowerCoreAtMax, out);
                    return;
                }
                let gained = self.player.unit.restore(power);
                self.sound(SoundCue::PowerUp, position, out);
                self.destroy(id, out);
                out.push(Event::PowerCoreUsed {
                    entity: id,
                    gained,
                });
            }
            InteractableKind::ElevatorButton { direction, main } => {
                let Some(floor) = self.floor(self.player.floor) else {
                    return;
                };
                match floor.elevator(direction, main) {
                    Ok(destination) => self.take_elevator(destination, out),
                    Err(reason) => self.reject_interaction(reason, out),
                }
            }
        }
    }

    fn take_elevator(&mut self, destination: FloorIndex, out: &mut Vec<Event>) {
        let from = self.player.floor;
        self.sound(SoundCue::Elevator, self.player.position, out);
        for id in self.entities.ids_where(|entity| entity.category() == Category::Drone) {
            self.destroy(id, out);
        }
        self.player.floor = destination;
        self.player.position = Vec2::ZERO;
        info!("took the elevator from floor {from} to floor {destination}");
        out.push(Event::ElevatorTaken {
            from,
            to: destination,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(configure: impl FnOnce(&mut InputState)) -> InputState {
        let mut input = InputState::default();
        configure(&mut input);
        input
    }

    #[test]
    fn diagonals_are_normalized_and_face_vertically() {
        let mut player = Player::new();
        player.steer(held(|input| {
            input.left = true;
            input.up = true;
        }));
        assert!((player.velocity.length() - PLAYER_SPEED).abs() < 1e-3);
        assert_eq!(player.facing, Facing::Up);

        player.steer(held(|input| input.right = true));
        assert_eq!(player.velocity, Vec2::new(PLAYER_SPEED, 0.0));
        assert_eq!(player.facing, Facing::Right);
    }

    #[test]
    fn opposing_keys_cancel_out() {
        let mut player = Player::new();
        player.steer(held(|input| {
            input.left = true;
            input.right = true;
        }));
        assert_eq!(player.velocity, Vec2::ZERO);
        assert_eq!(player.facing, Facing::Down);
    }

    #[test]
    fn fresh_hits_push_the_player_back() {
        let mut player = Player::new();
        let _ = player.unit.hurt(5, Vec2::new(0.0, 1.0));
        player.steer(InputState::default());
        assert_eq!(player.velocity, Vec2::new(0.0, 2.0 * PLAYER_SPEED));
        player.unit.cool_down(0.3);
        player.steer(InputState::default());
        assert_eq!(player.velocity, Vec2::ZERO);
    }

    #[test]
    fn held_keys_act_once() {
        let mut player = Player::new();
        assert!(player.press_primary(true));
        assert!(!player.press_primary(true));
        assert!(!player.press_primary(false));
        assert!(player.press_primary(true));
    }

    #[test]
    fn cycling_wraps_through_owned_schematics() {
        let mut player = Player::new();
        player.schematics.push(DroneKind::Puncher);
        assert_eq!(player.cycle_schematic(), Some(DroneKind::Puncher));
        assert_eq!(player.cycle_schematic(), Some(DroneKind::Turret));
        assert!(player.press_cycle(true));
        assert!(!player.press_cycle(true));
    }
}
