//! Hits, contact damage, wall collisions, and deaths.

use dronewell_core::{
    Allegiance, BlockedSides, DropKind, DroneKind, EntityId, Event, Scene, SoundCue,
    BOSSES_TO_WIN,
};
use glam::Vec2;
use log::{debug, info};

use crate::{
    effects::BossDeath,
    entity::{Body, Category, Entity},
    lifecycle::Lifecycle,
    pickups::roll_loot,
    unit::{strike, Strike},
    units::Tickable,
    World,
};

/// How a body takes part in an overlap.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Party {
    Player,
    Unit {
        allegiance: Allegiance,
        contact: u32,
        position: Vec2,
    },
    Bullet,
    Drop(DropKind),
    Other,
}

impl World {
    fn party(&self, id: EntityId) -> Option<Party> {
        if id.is_player() {
            return Some(Party::Player);
        }
        let entity = self.entities.get(id).filter(|entity| entity.is_active())?;
        Some(match &entity.body {
            Body::Unit(unit) => Party::Unit {
                allegiance: unit.kind.allegiance(),
                contact: unit.contact_damage(),
                position: entity.position,
            },
            Body::Bullet(_) => Party::Bullet,
            Body::Drop(drop) => Party::Drop(*drop),
            Body::Interactable(_) | Body::Pylon(_) => Party::Other,
        })
    }

    /// Resolves an overlap reported by the physics collaborator.
    pub(crate) fn resolve_overlap(
        &mut self,
        first: EntityId,
        second: EntityId,
        out: &mut Vec<Event>,
    ) {
        let (Some(a), Some(b)) = (self.party(first), self.party(second)) else {
            debug!("ignoring overlap of inactive bodies {first} and {second}");
            return;
        };
        match (a, b) {
            (Party::Bullet, Party::Player | Party::Unit { .. }) => {
                self.bullet_hit(first, second, out);
            }
            (Party::Player | Party::Unit { .. }, Party::Bullet) => {
                self.bullet_hit(second, first, out);
            }
            (Party::Player, Party::Drop(drop)) => self.collect(second, drop, out),
            (Party::Drop(drop), Party::Player) => self.collect(first, drop, out),
            (
                Party::Player,
                Party::Unit {
                    allegiance: Allegiance::Hostile,
                    contact,
                    position,
                },
            ) => self.contact(first, contact, position, out),
            (
                Party::Unit {
                    allegiance: Allegiance::Hostile,
                    contact,
                    position,
                },
                Party::Player,
            ) => self.contact(second, contact, position, out),
            (
                Party::Unit {
                    allegiance: left,
                    contact: left_contact,
                    position: left_position,
                },
                Party::Unit {
                    allegiance: right,
                    contact: right_contact,
                    position: right_position,
                },
            ) if left != right => {
                self.contact(second, left_contact, left_position, out);
                self.contact(first, right_contact, right_position, out);
            }
            _ => {}
        }
    }

    fn contact(&mut self, target: EntityId, damage: u32, source: Vec2, out: &mut Vec<Event>) {
        if damage > 0 {
            self.hurt(target, damage, source, out);
        }
    }

    fn bullet_hit(&mut self, bullet: EntityId, target: EntityId, out: &mut Vec<Event>) {
        let Some(entity) = self.entities.get(bullet) else {
            return;
        };
        let Body::Bullet(projectile) = &entity.body else {
            return;
        };
        let target_allegiance = if target.is_player() {
            Allegiance::Friendly
        } else {
            match self.entities.get(target).and_then(Entity::unit) {
                Some(unit) => unit.kind.allegiance(),
                None => return,
            }
        };
        if !projectile.allegiance.can_hit(target_allegiance) {
            return;
        }
        let (damage, position) = (projectile.spec.damage(), entity.position);
        self.hurt(target, damage, position, out);
        self.destroy(bullet, out);
    }

    fn collect(&mut self, id: EntityId, drop: DropKind, out: &mut Vec<Event>) {
        let floor = self.player.floor;
        let collected = match drop {
            DropKind::Power { amount } => self.player.unit.restore(amount) > 0,
            DropKind::Schematic(kind) => {
                if self.player.owns(kind) {
                    false
                } else {
                    self.player.schematics.push(kind);
                    self.alert(format!("Acquired {kind} drone"), out);
                    out.push(Event::SchematicAcquired { kind });
                    true
                }
            }
            DropKind::Key => {
                let found = match self.floor_mut(floor) {
                    Some(state) if !state.has_found_key => {
                        state.has_found_key = true;
                        true
                    }
                    _ => false,
                };
                if found {
                    self.alert("Found an elevator key".to_owned(), out);
                    out.push(Event::ElevatorKeyFound { floor });
                }
                found
            }
        };
        if !collected {
            return;
        }
        let position = self
            .entities
            .get(id)
            .map_or(self.player.position, |entity| entity.position);
        self.sound(SoundCue::PowerUp, position, out);
        self.destroy(id, out);
        out.push(Event::DropCollected { entity: id, drop });
    }

    /// Damages a unit or the player, honouring the boss pylon shield.
    pub(crate) fn hurt(
        &mut self,
        target: EntityId,
        damage: u32,
        inflictor: Vec2,
        out: &mut Vec<Event>,
    ) {
        let (hit, position) = if target.is_player() {
            let position = self.player.position;
            (strike(&mut self.player, damage, position, inflictor), position)
        } else {
            let shielded = match self.entities.get(target) {
                Some(entity) if entity.is_boss() => {
                    entity.floor().is_some_and(|floor| self.boss_shielded(floor))
                }
                Some(_) => false,
                None => return,
            };
            if shielded {
                return;
            }
            let Some(entity) = self.entities.get_mut(target) else {
                return;
            };
            let position = entity.position;
            let Some(unit) = entity.unit_mut() else {
                return;
            };
            (strike(unit, damage, position, inflictor), position)
        };

        let Some(Strike {
            damage,
            remaining,
            knockback,
        }) = hit
        else {
            return;
        };
        debug!("{target} took {damage} damage, {remaining} power left");
        self.sound(SoundCue::Damage, position, out);
        out.push(Event::UnitHurt {
            entity: target,
            damage,
            remaining,
            knockback,
        });
    }

    /// Moves a body out of the walls and lets its behavior react.
    pub(crate) fn resolve_wall_collision(
        &mut self,
        id: EntityId,
        blocked: BlockedSides,
        resolved: Vec2,
        out: &mut Vec<Event>,
    ) {
        if id.is_player() {
            self.player.position = resolved;
            if blocked.any() && self.player.unit.try_bump() {
                self.sound(SoundCue::Bump, resolved, out);
            }
            return;
        }

        let Some(entity) = self.entities.get_mut(id).filter(|entity| entity.is_active()) else {
            return;
        };
        entity.position = resolved;
        let bumped = match &mut entity.body {
            Body::Unit(unit) => Some(blocked.any() && unit.unit.try_bump()),
            Body::Bullet(_) => None,
            Body::Drop(_) | Body::Interactable(_) | Body::Pylon(_) => return,
        };
        let Some(bumped) = bumped else {
            self.destroy(id, out);
            return;
        };
        if bumped {
            self.sound(SoundCue::Bump, resolved, out);
        }

        let Some(ctx) = self.tick_context(id) else {
            return;
        };
        let mut commands = Vec::new();
        let Self { entities, rng, .. } = self;
        if let Some(unit) = entities.get_mut(id).and_then(Entity::unit_mut) {
            if !unit.unit.is_dead() {
                let _ = unit.wall_collision(&ctx, blocked, rng, &mut commands);
            }
        }
        for command in commands {
            self.apply_unit_command(command);
        }
    }

    /// Runs death checks for every active unit and the player.
    pub(crate) fn post_update(&mut self, out: &mut Vec<Event>) {
        if self.player.unit.should_die() {
            self.player.unit.mark_dead();
            self.score.won = false;
            info!("player destroyed on floor {}", self.player.floor);
            out.push(Event::UnitDied {
                entity: EntityId::PLAYER,
            });
            self.change_scene(Scene::GameOver { won: false }, out);
        }

        let dying = self.ordered_ids(|entity| {
            entity.is_active()
                && entity
                    .unit()
                    .is_some_and(|unit| unit.unit.should_die())
        });
        for id in dying {
            let Some(entity) = self.entities.get_mut(id) else {
                continue;
            };
            let category = entity.category();
            let boss = entity.is_boss();
            let position = entity.position;
            let floor = entity.floor();
            entity.velocity = Vec2::ZERO;
            if let Some(unit) = entity.unit_mut() {
                unit.unit.mark_dead();
            }
            out.push(Event::UnitDied { entity: id });

            match (category, boss, floor) {
                (Category::Enemy, true, Some(floor)) => {
                    self.score.enemies_killed += 1;
                    info!("boss {id} on floor {floor} is going down");
                    self.effects
                        .begin_boss_death(BossDeath::new(id, floor, position));
                }
                (Category::Enemy, _, _) => self.kill_enemy(id, position, out),
                _ => debug!("drone {id} ran out of power"),
            }
        }
    }

    fn kill_enemy(&mut self, id: EntityId, position: Vec2, out: &mut Vec<Event>) {
        self.score.enemies_killed += 1;
        let Some(floor) = self.entities.get(id).and_then(Entity::floor) else {
            return;
        };

        let key_on_floor = self.entities.iter().any(|(_, entity)| {
            entity.is_on(floor) && matches!(entity.body, Body::Drop(DropKind::Key))
        });
        let key_eligible = !key_on_floor
            && !floor.is_boss_floor()
            && self
                .floor(floor)
                .is_some_and(|state| !state.has_found_key && !state.has_unlocked_elevator);
        let unowned: Vec<DroneKind> = DroneKind::ALL
            .into_iter()
            .filter(|kind| !self.player.owns(*kind))
            .collect();
        match roll_loot(&mut self.rng, key_eligible, &unowned) {
            Some(loot) => {
                let drop = self
                    .entities
                    .insert(Entity::new(floor, position, Body::Drop(loot)));
                debug!("enemy {id} destroyed, dropped {loot:?} as {drop}");
            }
            None => debug!("enemy {id} destroyed, dropped nothing"),
        }

        self.explode(position, out);
        self.destroy(id, out);
    }

    /// Completes a boss death sequence.
    pub(crate) fn finish_boss(&mut self, death: BossDeath, out: &mut Vec<Event>) {
        for id in self.entities.ids_where(|entity| {
            entity.is_on(death.floor) && entity.enemy().is_some() && !entity.is_boss()
        }) {
            if let Some(unit) = self.entities.get_mut(id).and_then(Entity::unit_mut) {
                let power = unit.unit.power();
                unit.unit.drain(power);
            }
        }
        self.destroy(death.boss, out);

        self.score.bosses_defeated += 1;
        let bosses_defeated = self.score.bosses_defeated;
        info!("boss on floor {} defeated ({bosses_defeated} total)", death.floor);
        out.push(Event::BossDefeated {
            floor: death.floor,
            bosses_defeated,
        });
        if bosses_defeated >= BOSSES_TO_WIN {
            self.score.won = true;
            self.change_scene(Scene::GameOver { won: true }, out);
        }
    }

    pub(crate) fn explode(&mut self, position: Vec2, out: &mut Vec<Event>) {
        self.effects.explode(position);
        self.sound(SoundCue::Explosion, position, out);
        out.push(Event::ExplosionStarted { position });
    }
}
