//! Draw command - show the seeded draw order
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_report(), report_draw()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use tessera_core::{RandomSource, TileCatalog, TileStack};

use crate::play_cmd::load_catalog;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct DrawArgs {
    /// Number of tiles to draw
    #[arg(long, default_value = "82")]
    pub count: usize,

    /// Custom tile definitions (JSON)
    #[arg(long, value_name = "FILE")]
    pub tiles: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Seeded draw order, first drawn first
#[derive(Clone, Debug, serde::Serialize)]
struct DrawReport {
    seed: u64,
    tiles: Vec<String>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run draw command
pub fn run(args: DrawArgs, seed: Option<u64>) -> Result<()> {
    let catalog = load_catalog(args.tiles.as_ref())?;

    let report = build_report(&catalog, args.count, seed)?;
    tracing::info!("Drew {} tiles with seed {}", report.tiles.len(), report.seed);

    report_draw(&report, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_report(catalog: &TileCatalog, count: usize, seed: Option<u64>) -> Result<DrawReport> {
    let mut rng = RandomSource::new(seed);
    let stack = TileStack::generate(count, catalog, &mut rng)?;

    Ok(DrawReport {
        seed: rng.seed(),
        tiles: stack.draw_order().iter().map(|s| s.to_string()).collect(),
    })
}

fn report_draw(report: &DrawReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("Seed: {}", report.seed);
        for (i, name) in report.tiles.iter().enumerate() {
            println!("{:>3}. {}", i + 1, name);
        }
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
