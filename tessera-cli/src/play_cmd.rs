//! Play command - run a single scripted game
//!
//! Every turn the current player takes the first legal placement in
//! frontier order. Useful for checking that a seed replays identically.
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_config(), load_catalog(), play_scripted_game(), report_results()
//! - Level 3: play_turn(), largest_region()
//! - Level 4: observer, formatting

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rustc_hash::FxHashSet;

use tessera_core::{
    Feature, GameConfig, GameObserver, GameState, NodeAddress, Phase, PlaceOutcome, RandomSource,
    TileCatalog, TurnPhaseMachine, NODE_COUNT,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Game configuration (JSON)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Custom tile definitions (JSON)
    #[arg(long, value_name = "FILE")]
    pub tiles: Option<PathBuf>,

    /// Stop after this many turns
    #[arg(long)]
    pub max_turns: Option<u32>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Summary of one finished (or cut off) game
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GameSummary {
    pub seed: u64,
    pub turns: u32,
    /// Tiles placed, start tile excluded
    pub placed: usize,
    pub discarded: usize,
    pub remaining: usize,
    pub finished: bool,
    pub largest_region: Option<RegionSummary>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RegionSummary {
    pub feature: Feature,
    pub nodes: usize,
    pub tiles: usize,
}

/// Features whose regions are worth reporting
const SCORED_FEATURES: [Feature; 3] = [Feature::City, Feature::Road, Feature::River];

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = load_config(args.config.as_ref(), seed)?;
    let catalog = load_catalog(args.tiles.as_ref())?;

    let summary = play_scripted_game(&config, &catalog, args.max_turns)?;
    tracing::info!(
        "Game over after {} turns ({} placed, {} discarded)",
        summary.turns,
        summary.placed,
        summary.discarded
    );

    report_results(&summary, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Config file if given, defaults otherwise. A CLI seed wins over the file's.
pub fn load_config(path: Option<&PathBuf>, seed: Option<u64>) -> Result<GameConfig> {
    let config = match path {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    Ok(match seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    })
}

/// Tile definitions file if given, built-in catalog otherwise
pub fn load_catalog(path: Option<&PathBuf>) -> Result<TileCatalog> {
    match path {
        Some(path) => {
            tracing::info!("Loading tile definitions from {}", path.display());
            TileCatalog::load(path)
        }
        None => Ok(TileCatalog::builtin()),
    }
}

/// Play one game to the end (or to `max_turns`)
pub fn play_scripted_game(
    config: &GameConfig,
    catalog: &TileCatalog,
    max_turns: Option<u32>,
) -> Result<GameSummary> {
    let mut rng = RandomSource::new(config.seed);
    let mut machine = TurnPhaseMachine::new(config, catalog, &mut rng)?.with_observer(TurnLogger);

    while !machine.state().is_over() {
        if max_turns.is_some_and(|max| machine.state().turn() >= max) {
            tracing::debug!("Turn limit reached");
            break;
        }
        play_turn(&mut machine)?;
    }

    Ok(summarize(machine.state()))
}

fn report_results(summary: &GameSummary, json: bool) -> Result<()> {
    if json {
        print_json_results(summary)
    } else {
        print_text_results(summary);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// One pass through pick-tile, place-tile and place-meeple
fn play_turn(machine: &mut TurnPhaseMachine) -> Result<()> {
    if machine.pick_tile()? == Phase::Endgame {
        return Ok(());
    }

    let Some(placement) = machine.legal_placements().first().copied() else {
        // Only reachable with discard_unplaceable switched off
        machine.discard_pending()?;
        return Ok(());
    };

    match machine.place_tile(placement.position, placement.rotation)? {
        PlaceOutcome::Placed { .. } => {}
        PlaceOutcome::Rejected(reason) => {
            anyhow::bail!("Legal placement at {} rejected: {}", placement.position, reason)
        }
    }

    machine.end_turn()?;
    Ok(())
}

fn summarize(state: &GameState) -> GameSummary {
    GameSummary {
        seed: state.seed(),
        turns: state.turn(),
        placed: state.world().len().saturating_sub(1),
        discarded: state.discarded().len(),
        remaining: state.stack().len(),
        finished: state.is_over(),
        largest_region: largest_region(state),
    }
}

/// Region spanning the most tiles. Ties go to the first found in row order.
fn largest_region(state: &GameState) -> Option<RegionSummary> {
    let mut seen: FxHashSet<NodeAddress> = FxHashSet::default();
    let mut best: Option<RegionSummary> = None;

    for position in state.world().positions() {
        for node in 0..NODE_COUNT as u8 {
            let address = NodeAddress::new(position, node);
            let Some(feature) = state.region_feature(address) else {
                continue;
            };
            if !SCORED_FEATURES.contains(&feature) || seen.contains(&address) {
                continue;
            }

            let component = state.connected_component(address);
            let tiles: FxHashSet<_> = component.iter().map(|a| a.position).collect();
            let region = RegionSummary {
                feature,
                nodes: component.len(),
                tiles: tiles.len(),
            };
            seen.extend(component);

            if best.as_ref().map_or(true, |b| region.tiles > b.tiles) {
                best = Some(region);
            }
        }
    }

    best
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Logs every committed change at trace level
struct TurnLogger;

impl GameObserver for TurnLogger {
    fn state_changed(&mut self, state: &GameState) {
        tracing::trace!(
            turn = state.turn(),
            phase = %state.phase(),
            player = %state.current_player().name,
            placed = state.world().len(),
            remaining = state.stack().len(),
            "State changed"
        );
    }
}

fn print_json_results(summary: &GameSummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

fn print_text_results(summary: &GameSummary) {
    println!("Seed:        {}", summary.seed);
    println!("Turns:       {}", summary.turns);
    println!("Placed:      {}", summary.placed);
    println!("Discarded:   {}", summary.discarded);
    println!("Remaining:   {}", summary.remaining);
    println!("Finished:    {}", summary.finished);
    match &summary.largest_region {
        Some(region) => println!(
            "Largest:     {:?} over {} tiles ({} nodes)",
            region.feature, region.tiles, region.nodes
        ),
        None => println!("Largest:     -"),
    }
}

// ============================================================================
// TESTS
// ============================================================================
