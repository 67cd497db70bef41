//! Spawn bookkeeping shared by every simulated object.

use dronewell_core::{FloorIndex, Scope};
use glam::Vec2;

/// Presence flags of a simulated object.
///
/// Spawning always despawns first, so re-entering a floor never leaves a
/// second set of presentation resources behind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct LifecycleState {
    initialized: bool,
    spawned: bool,
    active: bool,
}

impl LifecycleState {
    /// Marks the object live, returning `true` on its first ever spawn.
    pub(crate) fn spawn(&mut self) -> bool {
        self.despawn();
        self.spawned = true;
        self.active = true;
        let first = !self.initialized;
        self.initialized = true;
        first
    }

    pub(crate) fn despawn(&mut self) {
        self.spawned = false;
        self.active = false;
    }

    pub(crate) const fn is_spawned(&self) -> bool {
        self.spawned
    }

    pub(crate) const fn is_active(&self) -> bool {
        self.active
    }
}

/// Objects bound to a floor scope.
pub(crate) trait Lifecycle {
    fn scope(&self) -> Scope;

    fn lifecycle(&self) -> &LifecycleState;

    fn lifecycle_mut(&mut self) -> &mut LifecycleState;

    /// Reports whether the object should be spawned while the player is on `current`.
    fn should_spawn(&self, current: FloorIndex) -> bool {
        !self.lifecycle().is_spawned() && self.scope().is_live_on(current)
    }

    /// Reports whether the object should be despawned while the player is on `current`.
    fn should_despawn(&self, current: FloorIndex) -> bool {
        self.lifecycle().is_spawned() && !self.scope().is_live_on(current)
    }

    fn is_active(&self) -> bool {
        self.lifecycle().is_active()
    }
}

/// Objects with a position integrated from a velocity every frame.
pub(crate) trait Spatial {
    fn position(&self) -> Vec2;

    fn set_position(&mut self, position: Vec2);

    fn velocity(&self) -> Vec2;

    fn integrate(&mut self, dt: f32) {
        let next = self.position() + self.velocity() * dt;
        self.set_position(next);
    }
}
