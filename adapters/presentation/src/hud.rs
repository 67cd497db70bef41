//! Heads-up display text and gauges.

use dronewell_core::{DroneKind, FloorIndex, Score};
use dronewell_world::{query, World};

/// Frames in the power bar sheet; frame 0 is a full bar.
pub const POWER_BAR_FRAMES: u32 = 29;

/// Key reminder shown under the context hint.
pub const CONTROLS_HELP: &str = "(WASD/Arrow Keys) move | (Shift/Tab) cycle drones";

/// Story text shown on the title menu.
pub const MENU_TEXT: &str = "You are a specialized power supply drone from a deep underground \
military installation. Some of the other drones have gone haywire, attacking the facility's \
personnel. While you have no attacks of your own, you can carry and deploy other drones as long \
as you have their schematics and enough power to spare. Use your ability to find and destroy all \
the rogue supervisor drones in the lower levels of the facility before the surface is overrun!";

const VICTORY_TEXT: &str = "You defeated all the rogue supervisors! The world is saved!";
const DEFEAT_TEXT: &str = "You failed to stop the rogue supervisors. The surface was overrun by \
hostile robots. There were no survivors.";

/// Frame of the power bar sheet for the given charge.
#[must_use]
pub fn power_bar_frame(power: u32, max_power: u32) -> u32 {
    if max_power == 0 {
        return POWER_BAR_FRAMES;
    }
    let filled = (power.min(max_power) as f32 / max_power as f32 * POWER_BAR_FRAMES as f32).floor();
    POWER_BAR_FRAMES - filled as u32
}

/// Formats simulated seconds as `h:mm:ss`.
#[must_use]
pub fn format_play_time(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let (hours, minutes, seconds) = (total / 3600, total / 60 % 60, total % 60);
    format!("{hours}:{minutes:02}:{seconds:02}")
}

/// Title of the run summary screen.
#[must_use]
pub const fn game_over_title(won: bool) -> &'static str {
    if won {
        "Victory"
    } else {
        "Game Over"
    }
}

/// Body of the run summary screen for a run that ended as `won` says.
#[must_use]
pub fn game_over_summary(won: bool, score: &Score) -> String {
    let verdict = if won { VICTORY_TEXT } else { DEFEAT_TEXT };
    format!(
        "{verdict}\n\nEnemies Destroyed: {}\nBosses Defeated: {}\nFloors Cleared: {}\nTotal Playtime: {}",
        score.enemies_killed,
        score.bosses_defeated,
        score.floors_cleared,
        format_play_time(score.play_time)
    )
}

/// One schematic slot of the drone bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchematicSlot {
    /// Schematic in the slot.
    pub kind: DroneKind,
    /// Power needed to deploy it.
    pub cost: u32,
    /// Whether the slot is highlighted.
    pub selected: bool,
    /// Whether the player can currently afford it.
    pub affordable: bool,
}

/// Everything the overlay draws for a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    /// Context hint followed by the control reminder.
    pub help: String,
    /// Floor the player is on.
    pub floor: FloorIndex,
    /// Player charge.
    pub power: u32,
    /// Player capacity.
    pub max_power: u32,
    /// Frame of the power bar sheet.
    pub power_frame: u32,
    /// Power readout, e.g. `Power: 90 / 100`.
    pub power_text: String,
    /// Name of the selected schematic, empty when none is owned.
    pub selected_name: String,
    /// Owned schematics in acquisition order.
    pub slots: Vec<SchematicSlot>,
    /// Alerts still on screen, oldest first.
    pub alerts: Vec<String>,
}

impl Hud {
    /// Reads the overlay state from the world.
    #[must_use]
    pub fn capture(world: &World) -> Self {
        let player = query::player(world);
        let hint = query::context_hint(world).unwrap_or_default();
        let slots = player
            .schematics
            .iter()
            .map(|&kind| SchematicSlot {
                kind,
                cost: kind.cost(),
                selected: player.selected == Some(kind),
                affordable: kind.cost() <= player.power,
            })
            .collect();
        Self {
            help: format!("{hint}\n{CONTROLS_HELP}").trim().to_owned(),
            floor: player.floor,
            power: player.power,
            max_power: player.max_power,
            power_frame: power_bar_frame(player.power, player.max_power),
            power_text: format!("Power: {} / {}", player.power, player.max_power),
            selected_name: player
                .selected
                .map(|kind| kind.name().to_owned())
                .unwrap_or_default(),
            slots,
            alerts: query::alerts(world).into_iter().map(str::to_owned).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_bar_runs_from_full_to_empty() {
        assert_eq!(power_bar_frame(100, 100), 0);
        assert_eq!(power_bar_frame(0, 100), POWER_BAR_FRAMES);
        assert_eq!(power_bar_frame(50, 100), 15);
        assert_eq!(power_bar_frame(7, 0), POWER_BAR_FRAMES);
    }

    #[test]
    fn play_time_pads_minutes_and_seconds_only() {
        assert_eq!(format_play_time(0.0), "0:00:00");
        assert_eq!(format_play_time(65.9), "0:01:05");
        assert_eq!(format_play_time(3600.0 * 12.0 + 61.0), "12:01:01");
    }

    #[test]
    fn summary_lists_run_statistics() {
        let score = Score {
            enemies_killed: 31,
            bosses_defeated: 2,
            floors_cleared: 9,
            play_time: 754.0,
            won: false,
        };
        let summary = game_over_summary(score.won, &score);
        assert!(summary.starts_with("You failed to stop the rogue supervisors."));
        assert!(summary.ends_with(
            "\n\nEnemies Destroyed: 31\nBosses Defeated: 2\nFloors Cleared: 9\nTotal Playtime: 0:12:34"
        ));
        assert_eq!(game_over_title(score.won), "Game Over");
    }

    #[test]
    fn verdict_follows_the_outcome_not_the_counters() {
        let score = Score::default();
        assert!(game_over_summary(true, &score).starts_with(VICTORY_TEXT));
        assert!(game_over_summary(false, &score).starts_with(DEFEAT_TEXT));
    }

    #[test]
    fn fresh_player_is_offered_the_starting_turret() {
        let world = World::default();
        let hud = Hud::capture(&world);
        assert_eq!(
            hud.help,
            format!("(Spacebar) Deploy Turret (-10 power)\n{CONTROLS_HELP}")
        );
        assert_eq!(hud.power_frame, 0);
        assert_eq!(hud.power_text, "Power: 100 / 100");
        assert_eq!(hud.selected_name, "Turret");
        assert_eq!(
            hud.slots,
            vec![SchematicSlot {
                kind: DroneKind::Turret,
                cost: 10,
                selected: true,
                affordable: true,
            }]
        );
    }
}
