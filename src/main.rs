//! Wildgrid - Entry Point
//!
//! Loads a landscape, runs the ecosystem for a number of ticks and reports
//! who is left.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use wildgrid::core::config::SimulationConfig;
use wildgrid::core::error::Result;
use wildgrid::core::types::Species;
use wildgrid::ecs::world::World;
use wildgrid::entity::events::CreatureEvent;
use wildgrid::simulation::tick::{run_simulation_tick, SimulationEvent};

const DEFAULT_LAYOUT: &str = "\
,,,,,,,,,,,,,,,,,,,,
,R,,,p,,,,,,,,,D,,,,
,,,,,,,,bb,,,,,,,,,,
,,,~~~,,,,,,,,W,,,,,
,,R~~~,,,,s,,,,,,,,,
,,,~~~,,,,,,,,,,,R,,
,,,,,,,,##,,,,,,,,,,
,,D,,,,,##,,,~~,,,,,
,,,,,,p,,,,,,~~,,,F,
,,,,,,,,,,R,,,,,,,,,
,,,,bb,,,,,,,,,,D,,,
,,,,,,,,,s,,,,,,,,,,
";

/// Grid ecosystem simulation
#[derive(Parser, Debug)]
#[command(name = "wildgrid")]
#[command(about = "Run a grid ecosystem of grazers and hunters")]
struct Args {
    /// Landscape layout file (built-in meadow if omitted)
    #[arg(long)]
    layout: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 200)]
    ticks: u64,

    /// Random seed for deterministic runs (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Print a JSON summary instead of text
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct RunSummary {
    ticks: u64,
    seed: u64,
    population: BTreeMap<String, usize>,
    births: usize,
    deaths: BTreeMap<String, usize>,
    water_sources: usize,
    dry_water_sources: usize,
    map: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "wildgrid=debug"
    } else {
        "wildgrid=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let seed = config.seed;

    let mut world = match &args.layout {
        Some(path) => World::load(path, config)?,
        None => World::from_layout(DEFAULT_LAYOUT, config)?,
    };

    tracing::info!("Wildgrid starting with seed {} for {} ticks", seed, args.ticks);

    let mut births = 0;
    let mut deaths: BTreeMap<String, usize> = BTreeMap::new();
    for _ in 0..args.ticks {
        for event in run_simulation_tick(&mut world) {
            match event {
                SimulationEvent::Born { .. } => births += 1,
                SimulationEvent::Creature(CreatureEvent::Died { cause, .. }) => {
                    *deaths.entry(format!("{:?}", cause)).or_insert(0) += 1;
                }
                _ => {}
            }
        }
        if world.entity_count() == 0 {
            tracing::info!("Every creature is gone at tick {}", world.current_tick);
            break;
        }
    }

    let population: BTreeMap<String, usize> = Species::ALL
        .iter()
        .map(|&s| (s.tag().to_string(), world.count_species(s)))
        .collect();

    let summary = RunSummary {
        ticks: world.current_tick,
        seed,
        population,
        births,
        deaths,
        water_sources: world.water_sources.len(),
        dry_water_sources: world.water_sources.iter().filter(|w| w.is_dry()).count(),
        map: world.render(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("=== WILDGRID: tick {} (seed {}) ===", summary.ticks, summary.seed);
        println!("{}", summary.map);
        for (species, count) in &summary.population {
            println!("  {:<8} {}", species, count);
        }
        println!("  births   {}", summary.births);
        println!(
            "  water    {} ({} dry)",
            summary.water_sources, summary.dry_water_sources
        );
        for (cause, count) in &summary.deaths {
            println!("  died of {:<12} {}", cause, count);
        }
    }

    Ok(())
}
