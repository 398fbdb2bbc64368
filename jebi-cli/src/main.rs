mod commands;
mod config;

use clap::{Parser, Subcommand};
use commands::{DrawExit, SetupExit};
use config::CliConfig;
use jebi_core::{Game, PhaseKind};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jebi")]
#[command(about = "Rigged lottery: assign hidden outcomes to balls, then let everyone draw")]
#[command(version)]
struct Cli {
    /// Settings file (JSON); defaults to the user config directory
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session: set up outcomes, lock, then draw
    Play,
    /// Auto-assign and draw every ball in one go
    Auto {
        /// Number of balls (defaults to the sum of outcome counts)
        #[arg(short, long)]
        balls: Option<u32>,
        /// Outcome as LABEL:COUNT, repeatable
        #[arg(short, long = "outcome")]
        outcomes: Vec<String>,
        /// Seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the effective settings as JSON
    Defaults,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "jebi_cli={},jebi_core={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let result = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => match cli.command {
            Commands::Play => play(config).await,
            Commands::Auto {
                balls,
                outcomes,
                seed,
            } => commands::run_auto(&config.settings, balls, &outcomes, seed),
            Commands::Defaults => config
                .settings
                .to_json()
                .map(|json| println!("{}", json))
                .map_err(Into::into),
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn play(config: CliConfig) -> anyhow::Result<()> {
    let mut game = Game::new(config.settings)?;

    loop {
        match game.phase_kind() {
            PhaseKind::Setup => match commands::run_setup(&mut game)? {
                SetupExit::Locked => continue,
                SetupExit::Quit => break,
            },
            PhaseKind::Drawing => match commands::run_draw(&game).await? {
                DrawExit::Setup => game.unlock()?,
                DrawExit::Quit => break,
            },
        }
    }

    println!("Bye!");
    Ok(())
}
