use anyhow::{Context, Result};
use clap::Parser;
use flock_client::settings::load_settings;
use flock_client::{Driver, DriverOptions, HttpSink, JsonLinesSink};
use flock_core::{FlockSimulation, SimulationConfig};
use flock_shared::FlockSettings;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless flock simulation driver", long_about = None)]
struct Args {
    /// JSON settings file (FlockSettings or {"settings": ...}); defaults if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of agents
    #[arg(short = 'n', long)]
    agents: Option<usize>,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Target ticks per second (0 runs unthrottled)
    #[arg(short, long, default_value_t = 60.0)]
    rate: f64,

    /// Seed for the spawn RNG, for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write one JSON frame snapshot per line to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Renderer base URL (e.g., http://127.0.0.1:8080); frames are POSTed to /api/frame
    #[arg(short = 'u', long)]
    renderer_url: Option<String>,

    /// Emit a frame every N ticks
    #[arg(short, long, default_value_t = 1)]
    every: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn build_config(args: &Args) -> Result<SimulationConfig> {
    let mut settings = match &args.config {
        Some(path) => load_settings(path)?,
        None => FlockSettings::default(),
    };
    if let Some(agents) = args.agents {
        settings.agent_count = agents;
    }
    Ok(settings.into())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("Flock client starting...");

    let config = build_config(&args)?;
    let flock = match args.seed {
        Some(seed) => {
            log::info!("Seeding spawn RNG with {}", seed);
            FlockSimulation::with_rng(config, &mut StdRng::seed_from_u64(seed))
        }
        None => FlockSimulation::new(config),
    }
    .context("Failed to create flock")?;

    let mut driver = Driver::new(
        flock,
        DriverOptions {
            ticks: args.ticks,
            rate: args.rate,
            every: args.every,
        },
    );

    if let Some(path) = &args.output {
        log::info!("Writing frames to {}", path.display());
        driver.add_sink(JsonLinesSink::create(path)?);
    }
    if let Some(url) = &args.renderer_url {
        log::info!("Streaming frames to {}", url);
        driver.add_sink(HttpSink::new(url)?);
    }

    driver.run().context("Simulation run failed")?;

    Ok(())
}
