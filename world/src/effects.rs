//! Global short-lived elements: alerts, explosions, and boss death sequences.

use dronewell_core::{math, EntityId, FloorIndex};
use glam::Vec2;
use rand::Rng;

/// Seconds an alert stays on screen.
pub(crate) const ALERT_LIFETIME: f32 = 5.0;
/// Seconds an explosion effect lasts.
pub(crate) const EXPLOSION_LIFETIME: f32 = 0.7;
/// Explosions in a boss death sequence.
pub(crate) const BOSS_BLASTS: u32 = 8;
/// Seconds between boss death explosions.
pub(crate) const BLAST_INTERVAL: f32 = 0.125;
/// Largest offset of a boss death explosion from the boss.
pub(crate) const BLAST_SPREAD: f32 = 24.0;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Alert {
    pub(crate) message: String,
    remaining: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Explosion {
    pub(crate) position: Vec2,
    pub(crate) remaining: f32,
}

/// Staggered explosions played over a dying boss before it is removed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct BossDeath {
    pub(crate) boss: EntityId,
    pub(crate) floor: FloorIndex,
    origin: Vec2,
    elapsed: f32,
    fired: u32,
}

impl BossDeath {
    pub(crate) const fn new(boss: EntityId, floor: FloorIndex, origin: Vec2) -> Self {
        Self {
            boss,
            floor,
            origin,
            elapsed: 0.0,
            fired: 0,
        }
    }

    /// Advances the sequence, pushing due blast positions into `blasts`.
    ///
    /// Returns `true` once the sequence has run its full length.
    pub(crate) fn advance<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        rng: &mut R,
        blasts: &mut Vec<Vec2>,
    ) -> bool {
        while self.fired < BOSS_BLASTS && self.elapsed >= self.fired as f32 * BLAST_INTERVAL {
            let offset = Vec2::new(
                math::rand_float(rng, -BLAST_SPREAD, BLAST_SPREAD),
                math::rand_float(rng, -BLAST_SPREAD, BLAST_SPREAD),
            );
            blasts.push(self.origin + offset);
            self.fired += 1;
        }
        let finished = self.elapsed >= BOSS_BLASTS as f32 * BLAST_INTERVAL;
        self.elapsed += dt;
        finished
    }
}

/// Elements that simulate regardless of the player's floor.
#[derive(Debug, Default)]
pub(crate) struct Effects {
    alerts: Vec<Alert>,
    explosions: Vec<Explosion>,
    boss_deaths: Vec<BossDeath>,
}

impl Effects {
    pub(crate) fn alert(&mut self, message: String) {
        self.alerts.push(Alert {
            message,
            remaining: ALERT_LIFETIME,
        });
    }

    pub(crate) fn explode(&mut self, position: Vec2) {
        self.explosions.push(Explosion {
            position,
            remaining: EXPLOSION_LIFETIME,
        });
    }

    pub(crate) fn begin_boss_death(&mut self, death: BossDeath) {
        self.boss_deaths.push(death);
    }

    /// Ages alerts and explosions, dropping the expired ones.
    pub(crate) fn age(&mut self, dt: f32) {
        for alert in &mut self.alerts {
            alert.remaining -= dt;
        }
        for explosion in &mut self.explosions {
            explosion.remaining -= dt;
        }
        self.alerts.retain(|alert| alert.remaining >= 0.0);
        self.explosions.retain(|explosion| explosion.remaining >= 0.0);
    }

    /// Advances every boss death sequence, returning new blasts and the
    /// sequences that finished.
    pub(crate) fn advance_boss_deaths<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        rng: &mut R,
    ) -> (Vec<Vec2>, Vec<BossDeath>) {
        let mut blasts = Vec::new();
        let mut finished = Vec::new();
        let mut running = Vec::with_capacity(self.boss_deaths.len());
        for mut death in self.boss_deaths.drain(..) {
            if death.advance(dt, rng, &mut blasts) {
                finished.push(death);
            } else {
                running.push(death);
            }
        }
        self.boss_deaths = running;
        (blasts, finished)
    }

    pub(crate) fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub(crate) fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn alerts_expire_after_five_seconds() {
        let mut effects = Effects::default();
        effects.alert("Elevator has been unlocked".to_owned());
        effects.explode(Vec2::ZERO);
        effects.age(0.7);
        assert_eq!(effects.alerts().len(), 1);
        assert_eq!(effects.explosions().len(), 1);
        effects.age(0.01);
        assert!(effects.explosions().is_empty());
        effects.age(4.3);
        assert!(effects.alerts().is_empty());
    }

    #[test]
    fn boss_death_fires_eight_blasts_then_finishes() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let origin = Vec2::new(0.0, -638.0);
        let mut death = BossDeath::new(EntityId::new(3, 0), FloorIndex::new(4), origin);
        let mut blasts = Vec::new();
        let mut frames = 0;
        while !death.advance(1.0 / 60.0, &mut rng, &mut blasts) {
            frames += 1;
            assert!(frames < 600, "sequence never finished");
        }
        assert_eq!(blasts.len(), BOSS_BLASTS as usize);
        for blast in blasts {
            let offset = (blast - origin).abs();
            assert!(offset.x <= BLAST_SPREAD && offset.y <= BLAST_SPREAD);
        }
        assert!((59..=61).contains(&frames), "took {frames} frames");
    }
}
