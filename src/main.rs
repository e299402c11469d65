//! Dungeons & Zombies headless runner
//!
//! Drives the simulation at a fixed 60 Hz clock with the autopilot as the
//! input collaborator. Rendering is not part of this binary; `--snapshot`
//! prints the final frame state as JSON instead.

use std::fs;

use anyhow::{Context, Result, bail};
use clap::Parser;

use dungeons_zombies::sim::{GameEvent, GamePhase, GameState, autopilot_input, tick};
use dungeons_zombies::{BoostExpiry, Settings, tick_to_ms};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON settings file (any subset of fields)
    #[arg(short, long)]
    config: Option<String>,

    /// RNG seed, overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 60 * 60)]
    ticks: u64,

    /// Starting level, overrides the config file
    #[arg(short, long)]
    level: Option<u32>,

    /// Let speed, damage and shield power-ups run out
    #[arg(long)]
    timed_boosts: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    snapshot: bool,
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings file: {path}"))?;
            Settings::from_json(&json).with_context(|| format!("Invalid settings in {path}"))?
        }
        None => Settings::default(),
    };

    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(level) = args.level {
        if level == 0 {
            bail!("--level must be at least 1");
        }
        settings.start_level = level;
        settings.opening_layout = false;
    }
    if args.timed_boosts {
        settings.boost_expiry = BoostExpiry::Timed;
    }
    Ok(settings)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let settings = load_settings(&args)?;

    log::info!("Dungeons & Zombies (headless) starting...");
    let mut state = GameState::new(settings);

    let mut levels_cleared = 0u32;
    let mut deaths = 0u32;
    let mut best_score = 0u64;

    for t in 0..args.ticks {
        let input = autopilot_input(&state);
        tick(&mut state, &input, tick_to_ms(t));

        for event in &state.events {
            match event {
                GameEvent::LevelComplete { .. } => levels_cleared += 1,
                GameEvent::PlayerDied => deaths += 1,
                _ => {}
            }
        }
        best_score = best_score.max(state.session.score);

        if state.quit_requested {
            break;
        }
    }

    let session = &state.session;
    println!("Ticks simulated: {}", state.time_ticks);
    println!(
        "Level: {} ({:?}), coins {}/{}",
        session.level, session.phase, session.coins_collected, session.coins_required
    );
    println!("Score: {} (best {})", session.score, best_score);
    println!("Levels cleared: {levels_cleared}, deaths: {deaths}");
    if session.phase == GamePhase::GameOver {
        println!("Run ended in game over");
    }

    if args.snapshot {
        let json = serde_json::to_string_pretty(&state.snapshot())
            .context("Failed to serialize snapshot")?;
        println!("{json}");
    }

    Ok(())
}
