//! Proximity-charged pylons gating the boss room and the boss itself.

use glam::Vec2;

/// Charge at which a pylon counts as powered.
pub(crate) const PYLON_MAX_POWER: u32 = 9;
/// Distance on each axis within which the player charges a pylon.
pub(crate) const PYLON_RANGE: f32 = 48.0;
/// Charge gained per second by room-access pylons.
pub(crate) const PYLON_RATE: f32 = 2.0;
/// Charge gained per second by boss pylons.
pub(crate) const BOSS_PYLON_RATE: f32 = 1.5;

/// One unit of charge gained by a pylon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ChargeStep {
    /// Charge rose to the given value below the maximum.
    Charged(u32),
    /// Charge reached the maximum.
    Powered,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Pylon {
    pub(crate) boss: bool,
    pub(crate) power: u32,
    progress: f32,
}

impl Pylon {
    pub(crate) const fn new(boss: bool) -> Self {
        Self {
            boss,
            power: 0,
            progress: 0.0,
        }
    }

    pub(crate) const fn is_powered(&self) -> bool {
        self.power >= PYLON_MAX_POWER
    }

    pub(crate) fn in_range(position: Vec2, player: Vec2) -> bool {
        let delta = (player - position).abs();
        delta.x < PYLON_RANGE && delta.y < PYLON_RANGE
    }

    /// Accumulates `dt` seconds of charge and converts whole units into steps.
    ///
    /// Steps past the maximum are swallowed, so [`ChargeStep::Powered`] is
    /// reported exactly once.
    pub(crate) fn charge(&mut self, dt: f32) -> Vec<ChargeStep> {
        let mut steps = Vec::new();
        if self.is_powered() {
            return steps;
        }
        let rate = if self.boss { BOSS_PYLON_RATE } else { PYLON_RATE };
        self.progress += dt * rate;
        while self.progress >= 1.0 {
            self.progress -= 1.0;
            let before = self.power;
            self.power = (self.power + 1).min(PYLON_MAX_POWER);
            if self.power == before {
                continue;
            }
            if self.is_powered() {
                steps.push(ChargeStep::Powered);
            } else {
                steps.push(ChargeStep::Charged(self.power));
            }
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overshooting_charge_powers_up_once() {
        let mut pylon = Pylon::new(false);
        pylon.power = 8;
        assert_eq!(pylon.charge(1.0), vec![ChargeStep::Powered]);
        assert_eq!(pylon.power, PYLON_MAX_POWER);
        assert!(pylon.charge(1.0).is_empty());
    }

    #[test]
    fn boss_pylons_charge_slower() {
        let mut room = Pylon::new(false);
        let mut boss = Pylon::new(true);
        assert_eq!(room.charge(1.0).len(), 2);
        assert_eq!(boss.charge(1.0), vec![ChargeStep::Charged(1)]);
        assert_eq!(boss.charge(1.0), vec![ChargeStep::Charged(2), ChargeStep::Charged(3)]);
    }

    #[test]
    fn range_is_checked_per_axis() {
        assert!(Pylon::in_range(Vec2::ZERO, Vec2::new(47.0, -47.0)));
        assert!(!Pylon::in_range(Vec2::ZERO, Vec2::new(48.0, 0.0)));
    }
}
