use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use race_car_env::modes::{HumanMode, Session, SessionConfig};
use race_car_env::rl::{ObservationBackend, WeightedRandomPolicy, default_device};
use race_car_env::sim::EnvConfig;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "race_car_env")]
#[command(version, about = "Oval-track race car environment for reinforcement learning")]
struct Cli {
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Episodes to run in session mode
    #[arg(long, default_value = "100")]
    episodes: usize,

    /// Run the session as validation episodes
    #[arg(long)]
    validation: bool,

    /// Per-episode results file for session mode
    #[arg(long)]
    results: Option<PathBuf>,

    /// Environment config as JSON (defaults if omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the session policy
    #[arg(long, default_value = "0")]
    seed: u64,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Drive the car with the keyboard
    Human,
    /// Run episodes with a random baseline policy
    Session,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_config = match &cli.config {
        Some(path) => EnvConfig::from_json_file(path)?,
        None => EnvConfig::default(),
    };
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(env_config);
            human_mode.run().await?;
        }
        Mode::Session => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .with_writer(std::io::stderr)
                .init();

            let config = SessionConfig {
                validation: cli.validation,
                results_path: cli.results,
                seed: cli.seed,
                env_config,
                ..SessionConfig::new(cli.episodes)
            };
            let policy = WeightedRandomPolicy::new(config.seed)
                .context("Failed to build action distribution")?;
            let mut session =
                Session::<ObservationBackend, _>::new(config, policy, default_device())?;

            // Finish the current episode on Ctrl+C, then stop
            let stop = session.stop_handle();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    stop.store(true, Ordering::SeqCst);
                }
            });

            let summary = tokio::task::block_in_place(|| {
                session.run().map(|stats| stats.format_summary())
            })?;
            println!("{}", summary);
        }
    }

    Ok(())
}
