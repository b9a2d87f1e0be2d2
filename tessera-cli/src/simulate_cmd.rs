//! Simulate command - play many seeded games in parallel
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: execute_games_parallel(), aggregate(), report_results()
//! - Level 4: formatting

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rayon::prelude::*;

use tessera_core::{GameConfig, RandomSource, TileCatalog};

use crate::play_cmd::{load_catalog, load_config, play_scripted_game, GameSummary};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Override the configured stack size
    #[arg(long)]
    pub stack_size: Option<usize>,

    /// Game configuration (JSON)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Custom tile definitions (JSON)
    #[arg(long, value_name = "FILE")]
    pub tiles: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Aggregate over all games
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
struct SimulationReport {
    games: usize,
    base_seed: u64,
    avg_turns: f64,
    avg_discarded: f64,
    avg_largest_region: f64,
    max_largest_region: usize,
    /// How often each feature formed the largest region
    largest_by_feature: BTreeMap<String, usize>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
pub fn run(args: SimulateArgs, seed: Option<u64>) -> Result<()> {
    let mut config = load_config(args.config.as_ref(), None)?;
    if let Some(stack_size) = args.stack_size {
        config = config.with_stack_size(stack_size);
    }
    let base_seed = seed.or(config.seed).unwrap_or_else(|| RandomSource::new(None).seed());
    let catalog = load_catalog(args.tiles.as_ref())?;

    tracing::info!(
        "Simulating {} games from base seed {} ({} tiles each)",
        args.games,
        base_seed,
        config.stack_size
    );

    let summaries = execute_games_parallel(&config, &catalog, base_seed, args.games)?;
    let report = aggregate(&summaries, base_seed);

    report_results(&report, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Game `i` uses seed `base_seed + i`, so any single game can be replayed with `play`
fn execute_games_parallel(
    config: &GameConfig,
    catalog: &TileCatalog,
    base_seed: u64,
    games: usize,
) -> Result<Vec<GameSummary>> {
    (0..games)
        .into_par_iter()
        .map(|i| {
            let seed = base_seed.wrapping_add(i as u64);
            play_scripted_game(&config.clone().with_seed(seed), catalog, None)
        })
        .collect()
}

fn aggregate(summaries: &[GameSummary], base_seed: u64) -> SimulationReport {
    let games = summaries.len();
    let mean = |total: usize| {
        if games == 0 {
            0.0
        } else {
            total as f64 / games as f64
        }
    };

    let mut largest_by_feature = BTreeMap::new();
    let mut region_total = 0;
    let mut region_max = 0;
    for region in summaries.iter().filter_map(|s| s.largest_region.as_ref()) {
        *largest_by_feature
            .entry(format!("{:?}", region.feature))
            .or_insert(0) += 1;
        region_total += region.tiles;
        region_max = region_max.max(region.tiles);
    }

    SimulationReport {
        games,
        base_seed,
        avg_turns: mean(summaries.iter().map(|s| s.turns as usize).sum()),
        avg_discarded: mean(summaries.iter().map(|s| s.discarded).sum()),
        avg_largest_region: mean(region_total),
        max_largest_region: region_max,
        largest_by_feature,
    }
}

fn report_results(report: &SimulationReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_text_results(report);
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_text_results(report: &SimulationReport) {
    println!("\n=== Simulation Results ===\n");
    println!("Games:              {}", report.games);
    println!("Base seed:          {}", report.base_seed);
    println!("Avg turns:          {:.1}", report.avg_turns);
    println!("Avg discarded:      {:.2}", report.avg_discarded);
    println!("Avg largest region: {:.1} tiles", report.avg_largest_region);
    println!("Max largest region: {} tiles", report.max_largest_region);
    for (feature, count) in &report.largest_by_feature {
        println!("  {:<10} {}", feature, count);
    }
}

// ============================================================================
// TESTS
// ============================================================================
