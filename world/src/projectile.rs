//! Bullets and homing missiles.

use dronewell_core::{Allegiance, BodyKind, ProjectileKind, ProjectileSpec};
use glam::Vec2;

/// Side length of a bullet body.
pub(crate) const BULLET_SIZE: f32 = 8.0;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Bullet {
    pub(crate) spec: ProjectileSpec,
    pub(crate) allegiance: Allegiance,
    direction: Vec2,
    lifetime: f32,
    tracking: f32,
}

impl Bullet {
    pub(crate) fn new(spec: ProjectileSpec, allegiance: Allegiance, direction: Vec2) -> Self {
        let tracking = match spec.kind() {
            ProjectileKind::Tracker => ProjectileSpec::TRACKING_WINDOW,
            ProjectileKind::Pulse => 0.0,
        };
        Self {
            spec,
            allegiance,
            direction,
            lifetime: spec.lifetime(),
            tracking,
        }
    }

    pub(crate) fn velocity(&self) -> Vec2 {
        self.direction * self.spec.speed()
    }

    /// Steers and ages the bullet, returning `false` once it expired.
    ///
    /// Trackers re-aim at `target` while their tracking window lasts.
    pub(crate) fn advance(&mut self, dt: f32, position: Vec2, target: Option<Vec2>) -> bool {
        if self.tracking > 0.0 {
            if let Some(target) = target {
                self.direction = (target - position).normalize_or_zero();
            }
            self.tracking -= dt;
        }
        self.lifetime -= dt;
        self.lifetime > 0.0
    }

    pub(crate) const fn body_kind(&self) -> BodyKind {
        BodyKind::Bullet {
            projectile: self.spec.kind(),
            allegiance: self.allegiance,
        }
    }
}
