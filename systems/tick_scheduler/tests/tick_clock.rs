use std::time::Duration;

use dronewell_core::Event;
use dronewell_system_tick_scheduler::{Config, TickClock};

fn run_frames(frames: &[u64]) -> (TickClock, Vec<Duration>) {
    let mut clock = TickClock::new(Config::default());
    let mut fired_at = Vec::new();
    for millis in frames {
        if clock.advance(Duration::from_millis(*millis)) {
            fired_at.push(clock.elapsed());
        }
    }
    (clock, fired_at)
}

#[test]
fn fires_once_per_interval_regardless_of_frame_rate() {
    let steady: Vec<u64> = std::iter::repeat(16).take(625).collect();
    let jittery: Vec<u64> = [7, 33, 16, 49, 3, 25, 41, 12]
        .iter()
        .copied()
        .cycle()
        .take(400)
        .collect();

    for frames in [steady, jittery] {
        let total: u64 = frames.iter().sum();
        let (clock, fired_at) = run_frames(&frames);
        assert_eq!(
            clock.ticks(),
            total / 500,
            "expected one tick per 500ms boundary across {total}ms"
        );
        assert_eq!(fired_at.len() as u64, clock.ticks());
    }
}

#[test]
fn landing_exactly_on_a_boundary_fires_once() {
    let (clock, fired_at) = run_frames(&[250, 250, 250, 250]);
    assert_eq!(clock.ticks(), 2);
    assert_eq!(
        fired_at,
        vec![Duration::from_millis(500), Duration::from_millis(1000)]
    );
}

#[test]
fn long_frames_collapse_to_a_single_tick() {
    let (clock, _) = run_frames(&[1_600]);
    assert_eq!(clock.ticks(), 1, "a frame spanning boundaries ticks once");
}

#[test]
fn zero_length_frames_never_tick() {
    let (clock, _) = run_frames(&[500, 0, 0, 0]);
    assert_eq!(clock.ticks(), 1);
}

#[test]
fn handle_counts_ticks_from_time_events() {
    let mut clock = TickClock::new(Config::new(Duration::from_millis(100)));
    let events = vec![
        Event::TimeAdvanced {
            dt: Duration::from_millis(60),
        },
        Event::TimeAdvanced {
            dt: Duration::from_millis(60),
        },
        Event::LogicTick { index: 0 },
        Event::TimeAdvanced {
            dt: Duration::from_millis(90),
        },
    ];
    assert_eq!(clock.handle(&events), 2);
    assert_eq!(clock.elapsed(), Duration::from_millis(210));
}
