use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vivarium_core::SandboxConfig;
use vivarium_io::{JsonFileStore, KeyValueStore, MemoryStore};
use vivarium_lib::Session;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board side length (overrides config and stored settings)
    #[arg(short, long)]
    size: Option<u16>,

    /// Edge topology used when counting neighbours
    #[arg(short, long, value_enum)]
    edges: Option<Edges>,

    /// Probability a cell starts alive when seeding randomly
    #[arg(short, long)]
    probability: Option<f64>,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Start from an exported pattern token instead of a random board
    #[arg(short, long)]
    token: Option<String>,

    /// Stop after this many generations even if still changing
    #[arg(short = 'g', long, default_value_t = 1000)]
    max_generations: u64,

    /// Sleep the configured tick interval between generations
    #[arg(long)]
    realtime: bool,

    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// JSON file backing the settings store (in-memory when omitted)
    #[arg(long)]
    store: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Edges {
    Wrap,
    Bounded,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SandboxConfig::load_or_default(&args.config)?;
    let store: Box<dyn KeyValueStore> = match &args.store {
        Some(path) => Box::new(JsonFileStore::open(path)?),
        None => Box::new(MemoryStore::new()),
    };

    let mut session = match args.seed {
        Some(seed) => Session::with_seed(config, store, seed)?,
        None => Session::new(config, store)?,
    };

    if let Some(size) = args.size {
        session.resize(size)?;
    }
    if let Some(edges) = args.edges {
        session.set_wrap_edges(matches!(edges, Edges::Wrap))?;
    }
    if let Some(probability) = args.probability {
        session.set_randomize_chance(probability)?;
    }

    match &args.token {
        Some(token) => session.import_token(token)?,
        None => session.randomize(),
    }

    tracing::info!(
        size = session.board().size(),
        population = session.board().alive_count(),
        wrap = session.wrap_edges(),
        "starting simulation"
    );

    let interval = Duration::from_millis(session.config().simulation.tick_interval_ms);
    session.play();

    while session.playing() && session.generation() < args.max_generations {
        session.tick();
        if args.realtime {
            std::thread::sleep(interval);
        }
    }

    tracing::info!(
        generations = session.generation(),
        population = session.board().alive_count(),
        auto_paused = !session.playing(),
        "simulation finished"
    );

    Ok(())
}
