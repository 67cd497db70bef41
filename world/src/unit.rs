//! Power-as-health combat model shared by the player, drones, and enemies.

use glam::Vec2;

/// Seconds the player and drones ignore damage after a hit.
pub(crate) const FRIENDLY_INVULN_PERIOD: f32 = 1.0;
/// Seconds enemies ignore damage after a hit.
pub(crate) const HOSTILE_INVULN_PERIOD: f32 = 0.25;
/// Seconds between wall bump sounds of one body.
pub(crate) const BUMP_COOLDOWN: f32 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Unit {
    power: u32,
    max_power: u32,
    invuln_period: f32,
    hurt_time: f32,
    knockback: Vec2,
    dead: bool,
    bump_cooldown: f32,
}

impl Unit {
    pub(crate) const fn new(power: u32, invuln_period: f32) -> Self {
        Self {
            power,
            max_power: power,
            invuln_period,
            hurt_time: 0.0,
            knockback: Vec2::ZERO,
            dead: false,
            bump_cooldown: 0.0,
        }
    }

    pub(crate) const fn power(&self) -> u32 {
        self.power
    }

    pub(crate) const fn max_power(&self) -> u32 {
        self.max_power
    }

    pub(crate) const fn hurt_time(&self) -> f32 {
        self.hurt_time
    }

    pub(crate) const fn knockback(&self) -> Vec2 {
        self.knockback
    }

    pub(crate) const fn is_dead(&self) -> bool {
        self.dead
    }

    pub(crate) fn is_invulnerable(&self) -> bool {
        self.hurt_time > 0.0
    }

    /// Applies a hit, returning the damage actually taken.
    ///
    /// Hits landing while invulnerable, after death, or on a unit with no
    /// power left change nothing.
    pub(crate) fn hurt(&mut self, damage: u32, knockback: Vec2) -> Option<u32> {
        if self.is_invulnerable() || self.dead {
            return None;
        }
        let damage = damage.min(self.power);
        if damage == 0 {
            return None;
        }
        self.power -= damage;
        self.hurt_time = self.invuln_period;
        self.knockback = knockback;
        Some(damage)
    }

    /// Counts down the invulnerability window and bump cooldown.
    pub(crate) fn cool_down(&mut self, dt: f32) {
        self.hurt_time -= dt;
        self.bump_cooldown -= dt;
    }

    /// Reports whether the unit has run out of power but not yet died.
    pub(crate) const fn should_die(&self) -> bool {
        self.power == 0 && !self.dead
    }

    pub(crate) fn mark_dead(&mut self) {
        self.dead = true;
    }

    /// Power missing from a full charge.
    pub(crate) const fn missing_power(&self) -> u32 {
        self.max_power.saturating_sub(self.power)
    }

    /// Adds up to `amount` power without exceeding the maximum.
    pub(crate) fn restore(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.missing_power());
        self.power += gained;
        gained
    }

    pub(crate) fn drain(&mut self, amount: u32) {
        self.power = self.power.saturating_sub(amount);
    }

    /// Starts the bump cooldown, returning `false` while it is still running.
    pub(crate) fn try_bump(&mut self) -> bool {
        if self.bump_cooldown > 0.0 {
            return false;
        }
        self.bump_cooldown = BUMP_COOLDOWN;
        true
    }
}

/// Anything that carries a [`Unit`].
pub(crate) trait Combatant {
    fn unit(&self) -> &Unit;

    fn unit_mut(&mut self) -> &mut Unit;
}

/// Outcome of a hit that changed a combatant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Strike {
    pub(crate) damage: u32,
    pub(crate) remaining: u32,
    pub(crate) knockback: Vec2,
}

/// Hurts `target` standing at `position` with a hit coming from `inflictor`.
pub(crate) fn strike<C: Combatant + ?Sized>(
    target: &mut C,
    damage: u32,
    position: Vec2,
    inflictor: Vec2,
) -> Option<Strike> {
    let knockback = (position - inflictor).normalize_or_zero();
    let damage = target.unit_mut().hurt(damage, knockback)?;
    Some(Strike {
        damage,
        remaining: target.unit().power(),
        knockback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_hit_inside_the_window_is_ignored() {
        let mut unit = Unit::new(30, HOSTILE_INVULN_PERIOD);
        assert_eq!(unit.hurt(10, Vec2::X), Some(10));
        assert_eq!(unit.hurt(10, Vec2::X), None);
        assert_eq!(unit.power(), 20);
        unit.cool_down(0.25);
        assert_eq!(unit.hurt(10, Vec2::Y), Some(10));
        assert_eq!(unit.knockback(), Vec2::Y);
    }

    #[test]
    fn damage_is_clamped_to_remaining_power() {
        let mut unit = Unit::new(15, HOSTILE_INVULN_PERIOD);
        assert_eq!(unit.hurt(20, Vec2::ZERO), Some(15));
        assert_eq!(unit.power(), 0);
        assert!(unit.should_die());
    }

    #[test]
    fn empty_units_ignore_hits_without_resetting_the_window() {
        let mut unit = Unit::new(5, FRIENDLY_INVULN_PERIOD);
        unit.drain(5);
        assert_eq!(unit.hurt(10, Vec2::X), None);
        assert!(!unit.is_invulnerable());
        assert_eq!(unit.knockback(), Vec2::ZERO);
    }

    #[test]
    fn restore_caps_at_max_power() {
        let mut unit = Unit::new(100, FRIENDLY_INVULN_PERIOD);
        unit.drain(7);
        assert_eq!(unit.restore(20), 7);
        assert_eq!(unit.power(), 100);
        assert_eq!(unit.restore(20), 0);
    }

    #[test]
    fn bumps_are_debounced() {
        let mut unit = Unit::new(10, FRIENDLY_INVULN_PERIOD);
        assert!(unit.try_bump());
        assert!(!unit.try_bump());
        unit.cool_down(BUMP_COOLDOWN);
        assert!(unit.try_bump());
    }

    #[test]
    fn strike_points_knockback_away_from_the_inflictor() {
        struct Dummy(Unit);
        impl Combatant for Dummy {
            fn unit(&self) -> &Unit {
                &self.0
            }
            fn unit_mut(&mut self) -> &mut Unit {
                &mut self.0
            }
        }

        let mut dummy = Dummy(Unit::new(20, HOSTILE_INVULN_PERIOD));
        let hit = strike(&mut dummy, 5, Vec2::new(10.0, 0.0), Vec2::new(30.0, 0.0));
        assert_eq!(
            hit,
            Some(Strike {
                damage: 5,
                remaining: 15,
                knockback: Vec2::new(-1.0, 0.0),
            })
        );
    }
}
