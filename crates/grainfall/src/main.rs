//! Grainfall - headless scenario runner

use anyhow::Result;
use clap::Parser;
use grainfall::{App, ScenarioConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (RON). Runs the built-in demo when omitted.
    scenario: Option<PathBuf>,

    /// Override the number of ticks to simulate
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Write the final grid snapshot here
    #[arg(long)]
    save: Option<PathBuf>,

    /// Print the built-in demo scenario as RON and exit
    #[arg(long)]
    print_default: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.print_default {
        println!("{}", ScenarioConfig::default().to_ron_string()?);
        return Ok(());
    }

    let mut scenario = match &args.scenario {
        Some(path) => {
            log::info!("Loading scenario {}", path.display());
            ScenarioConfig::from_file(path)?
        }
        None => {
            log::info!("No scenario given, running the built-in demo");
            ScenarioConfig::default()
        }
    };

    if let Some(ticks) = args.ticks {
        scenario.ticks = ticks;
    }
    if let Some(seed) = args.seed {
        scenario.engine.seed = seed;
    }
    if args.save.is_some() {
        scenario.save_path = args.save;
    }

    log::info!("Starting Grainfall");

    let save_path = scenario.save_path.clone();
    let mut app = App::new(scenario)?;
    app.run()?;

    if let Some(path) = save_path {
        app.save(&path)?;
    }

    Ok(())
}
