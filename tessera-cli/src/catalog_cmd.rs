//! Catalog command - list tile templates
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: describe_catalog(), report_catalog()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use tessera_core::{Feature, Tile, TileCatalog};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct CatalogArgs {
    /// Custom tile definitions (JSON)
    #[arg(long, value_name = "FILE")]
    pub tiles: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, serde::Serialize)]
struct TileSummary {
    index: Option<usize>,
    name: String,
    /// One symbol per node, index 0 first
    layout: String,
    features: Vec<Feature>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run catalog command
pub fn run(args: CatalogArgs) -> Result<()> {
    let catalog = match &args.tiles {
        Some(path) => {
            tracing::info!("Loading tile definitions from {}", path.display());
            TileCatalog::load(path)?
        }
        None => TileCatalog::builtin(),
    };

    let summaries = describe_catalog(&catalog);
    report_catalog(&summaries, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn describe_catalog(catalog: &TileCatalog) -> Vec<TileSummary> {
    let mut summaries: Vec<TileSummary> = catalog
        .templates()
        .iter()
        .enumerate()
        .map(|(i, tile)| summarize(Some(i), tile))
        .collect();
    summaries.push(summarize(None, catalog.start()));
    summaries.push(summarize(None, catalog.empty()));
    summaries
}

fn report_catalog(summaries: &[TileSummary], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summaries)?);
        return Ok(());
    }

    for summary in summaries {
        let index = summary
            .index
            .map(|i| format!("{:>3}", i))
            .unwrap_or_else(|| "  -".to_string());
        println!("{}  {}  {}", index, summary.layout, summary.name);
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn summarize(index: Option<usize>, tile: &Tile) -> TileSummary {
    let features = tile.features().to_vec();
    TileSummary {
        index,
        name: tile.name().to_string(),
        layout: features.iter().map(|f| f.symbol()).collect(),
        features,
    }
}

// ============================================================================
// TESTS
// ============================================================================
