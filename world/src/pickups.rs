//! Loot drops and interactable fixtures.

use dronewell_core::{math, DropKind, DroneKind, ElevatorDirection, InteractableKind};
use rand::Rng;

/// Power restored by a power drop.
pub(crate) const POWER_DROP: u32 = 10;
/// Power restored by a power core.
pub(crate) const POWER_CORE: u32 = 20;
/// Chance an eligible enemy drops the floor's elevator key.
pub(crate) const KEY_DROP_CHANCE: f32 = 0.1;
/// Chance an enemy drops an unowned schematic.
pub(crate) const SCHEMATIC_DROP_CHANCE: f32 = 0.1;
/// Manhattan distance within which the player reaches drones and fixtures.
pub(crate) const REACH: f32 = 20.0;
/// Side length of pickup and fixture bodies.
pub(crate) const PICKUP_SIZE: f32 = 16.0;
/// Side length of interactable and pylon bodies.
pub(crate) const FIXTURE_SIZE: f32 = 32.0;

/// Rolls what a fallen enemy leaves behind.
///
/// A successful schematic roll leaves nothing once every schematic is owned.
pub(crate) fn roll_loot<R: Rng + ?Sized>(
    rng: &mut R,
    key_eligible: bool,
    unowned: &[DroneKind],
) -> Option<DropKind> {
    if key_eligible && rng.gen::<f32>() < KEY_DROP_CHANCE {
        return Some(DropKind::Key);
    }
    if rng.gen::<f32>() < SCHEMATIC_DROP_CHANCE {
        return math::rand_item(rng, unowned).map(|kind| DropKind::Schematic(*kind));
    }
    Some(DropKind::Power { amount: POWER_DROP })
}

/// Verb phrase shown while the player stands next to an interactable.
pub(crate) fn action_text(kind: InteractableKind) -> String {
    match kind {
        InteractableKind::PowerCore { power } => format!("Pick up power core (+{power} power)"),
        InteractableKind::ElevatorButton { direction, .. } => format!("Take elevator {direction}"),
    }
}

/// Interactable placed for an elevator button fixture.
pub(crate) const fn elevator_button(direction: ElevatorDirection, main: bool) -> InteractableKind {
    InteractableKind::ElevatorButton { direction, main }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn schematic_rolls_with_nothing_left_to_give_drop_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let (mut power, mut empty) = (0, 0);
        for _ in 0..500 {
            match roll_loot(&mut rng, false, &[]) {
                Some(DropKind::Power { amount }) => {
                    assert_eq!(amount, POWER_DROP);
                    power += 1;
                }
                None => empty += 1,
                Some(other) => panic!("unexpected loot {other:?}"),
            }
        }
        assert!(empty > 0, "the schematic roll never came up");
        assert!(power > empty);
    }

    #[test]
    fn ineligible_floors_never_drop_keys() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut schematics = 0;
        for _ in 0..500 {
            match roll_loot(&mut rng, false, &[DroneKind::Strafer]) {
                Some(DropKind::Key) => panic!("key dropped on an ineligible floor"),
                Some(DropKind::Schematic(kind)) => {
                    assert_eq!(kind, DroneKind::Strafer);
                    schematics += 1;
                }
                Some(DropKind::Power { .. }) => {}
                None => panic!("an unowned schematic was available"),
            }
        }
        assert!(schematics > 0);
    }

    #[test]
    fn action_texts_read_naturally() {
        assert_eq!(
            action_text(InteractableKind::PowerCore { power: POWER_CORE }),
            "Pick up power core (+20 power)"
        );
        assert_eq!(
            action_text(elevator_button(ElevatorDirection::Down, true)),
            "Take elevator down"
        );
    }
}
