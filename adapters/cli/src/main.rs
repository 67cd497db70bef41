#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line runner for Dronewell.
//!
//! Plays a scripted session against the world with box physics and a
//! logging presentation backend, then prints the run summary.

mod backend;
mod logging;
mod physics;
mod session;

use std::{panic, path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Parser;
use dronewell_core::{Command, Event, Scene};
use dronewell_presentation::{format_play_time, game_over_summary, game_over_title, Presenter};
use dronewell_world::{apply, query, World};
use log::{debug, info};

use crate::{backend::LogBackend, session::SessionConfig};

/// Runs a scripted Dronewell session without a window.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML session file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Overrides the session's random seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Overrides the number of frames to simulate.
    #[arg(long)]
    frames: Option<u32>,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match panic::catch_unwind(|| run(&args)) {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(error)) => {
            report(&format!("{error:#}"));
            ExitCode::FAILURE
        }
        Err(_) => {
            report("the simulation panicked");
            ExitCode::FAILURE
        }
    }
}

fn report(detail: &str) {
    eprintln!("Something went wrong and the session had to stop.");
    eprintln!("Please report this along with the session file and seed you used.");
    eprintln!("Details: {detail}");
}

fn run(args: &Args) -> Result<()> {
    let mut session = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if let Some(seed) = args.seed {
        session.seed = seed;
    }
    if let Some(frames) = args.frames {
        session.frames = frames;
    }
    let script = session.script()?;
    let dt = session.frame_time();
    info!(
        "running {} frames of {dt:?} with seed {:#x}",
        session.frames, session.seed
    );

    let mut world = World::new(session.world_config());
    let mut presenter = Presenter::new();
    let mut backend = LogBackend::default();
    let mut events = Vec::new();
    apply(&mut world, Command::StartGame, &mut events);

    let mut played = 0;
    for frame in 0..session.frames {
        let input = script.input_at(frame);
        apply(&mut world, Command::SetInput { input }, &mut events);
        apply(&mut world, Command::Tick { dt }, &mut events);
        for command in physics::step(&world) {
            apply(&mut world, command, &mut events);
        }

        presenter.present_events(&world, &events, &mut backend)?;
        presenter.sync(&world, dt, &mut backend)?;
        events.drain(..).for_each(|event| log_event(&event));
        played = frame + 1;

        if matches!(query::scene(&world), Scene::GameOver { .. }) {
            break;
        }
    }

    print_summary(&world, played, &backend);
    Ok(())
}

fn log_event(event: &Event) {
    match event {
        Event::TimeAdvanced { .. } | Event::LogicTick { .. } | Event::SoundPlayed { .. } => {}
        Event::FloorEntered { floor } => info!("entered floor {floor}"),
        Event::BossDefeated {
            floor,
            bosses_defeated,
        } => info!("supervisor on floor {floor} defeated ({bosses_defeated} total)"),
        Event::DroneDeployed { kind, cost, .. } => info!("deployed {kind} for {cost} power"),
        Event::SchematicAcquired { kind } => info!("acquired the {kind} schematic"),
        other => debug!("{other:?}"),
    }
}

fn print_summary(world: &World, frames: u32, backend: &LogBackend) {
    let score = query::score(world);
    match query::scene(world) {
        Scene::GameOver { won } => {
            println!("{}", game_over_title(won));
            println!("{}", game_over_summary(won, &score));
        }
        Scene::Menu | Scene::Gameplay => {
            let player = query::player(world);
            println!("Session ended after {frames} frames on floor {}", player.floor);
            println!(
                "Power: {} / {}\nEnemies Destroyed: {}\nBosses Defeated: {}\nFloors Cleared: {}\nTotal Playtime: {}",
                player.power,
                player.max_power,
                score.enemies_killed,
                score.bosses_defeated,
                score.floors_cleared,
                format_play_time(score.play_time)
            );
        }
    }
    println!(
        "Sprites at peak: {}; sounds played: {}",
        backend.peak_sprites(),
        backend.sounds_played()
    );
}
