#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Cat Chase round.
//!
//! The runner sweeps a scripted cursor across the playfield, periodically
//! charges and releases the toy ability, and prints every action the cat
//! starts until the round ends or the frame budget runs out.

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use cat_chase_core::{Command, Event, ScreenState, Toy};
use cat_chase_world::{apply, query, GameConfig, World};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

mod script;

use script::CursorScript;

#[derive(Parser, Debug)]
#[command(name = "cat-chase")]
#[command(about = "Run a headless Cat Chase round and report the cat's actions")]
struct Args {
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 3600)]
    frames: u32,

    /// Milliseconds of game time per frame.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Seed for the cat's decisions; overrides the config file.
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding the default game configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Toy the scripted player controls.
    #[arg(long, value_enum, default_value_t = ToyArg::Laser)]
    toy: ToyArg,

    /// Frames between ability releases; zero never uses the ability.
    #[arg(long, default_value_t = 90)]
    ability_every: u32,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ToyArg {
    Laser,
    Mouse,
}

impl From<ToyArg> for Toy {
    fn from(value: ToyArg) -> Self {
        match value {
            ToyArg::Laser => Self::Laser,
            ToyArg::Mouse => Self::Mouse,
        }
    }
}

/// Entry point for the Cat Chase command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = load_config(args.config.as_ref())?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    if args.print_config {
        let rendered =
            toml::to_string_pretty(&config).context("failed to render configuration as toml")?;
        print!("{rendered}");
        return Ok(());
    }

    run(&args, config)
}

fn load_config(path: Option<&PathBuf>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration at {}", path.display()))?;
    let config = toml::from_str(&contents)
        .with_context(|| format!("failed to parse configuration at {}", path.display()))?;
    info!(path = %path.display(), "loaded configuration");
    Ok(config)
}

fn run(args: &Args, config: GameConfig) -> Result<()> {
    let boundary = config.boundary();
    let mut world = World::new(config);
    let script = CursorScript::new(boundary, args.ability_every);
    let dt = Duration::from_millis(args.frame_ms);
    let mut events = Vec::new();

    apply(
        &mut world,
        Command::SelectToy {
            toy: args.toy.into(),
        },
        &mut events,
    )?;

    for frame in 0..args.frames {
        for command in script.commands(frame) {
            apply(&mut world, command, &mut events)?;
        }
        apply(&mut world, Command::Tick { dt }, &mut events)?;

        let elapsed = query::score(&world).as_millis();
        for event in events.drain(..) {
            report(frame, elapsed, &event);
        }

        if query::screen(&world) != ScreenState::Active {
            break;
        }
    }

    let player = query::player(&world);
    let cat = query::cat(&world);
    println!(
        "score {:.1}s | difficulty {} | health {} | screen {:?}",
        query::score(&world).as_secs_f32(),
        query::difficulty(&world).level(),
        player.health,
        query::screen(&world),
    );
    println!(
        "cat at ({:.1}, {:.1}) as {} | recent actions: {}",
        cat.position.x,
        cat.position.y,
        cat.state,
        cat.history.join(", "),
    );
    Ok(())
}

fn report(frame: u32, elapsed_ms: u128, event: &Event) {
    match event {
        Event::CatActionStarted { label } => {
            println!("[{frame:>5} {elapsed_ms:>7}ms] cat    {label}");
        }
        Event::PlayerHit { health } => {
            println!("[{frame:>5} {elapsed_ms:>7}ms] player hit, {health} health left");
        }
        Event::AbilityTriggered { toy } => {
            println!("[{frame:>5} {elapsed_ms:>7}ms] {} ability", toy.as_str());
        }
        Event::DifficultyChanged { difficulty } => {
            println!(
                "[{frame:>5} {elapsed_ms:>7}ms] difficulty {}",
                difficulty.level()
            );
        }
        Event::PlayerDefeated { score_seconds } => {
            println!("[{frame:>5} {elapsed_ms:>7}ms] defeated after {score_seconds}s");
        }
        Event::TimeAdvanced { .. }
        | Event::ScreenChanged { .. }
        | Event::RoundStarted { .. }
        | Event::AbilityEnded { .. } => {}
    }
}
