//! Tessera CLI - Command-line interface
//!
//! Commands:
//! - draw: Show the seeded draw order
//! - catalog: List tile templates
//! - play: Play a scripted game
//! - simulate: Play many seeded games in parallel

mod catalog_cmd;
mod draw_cmd;
mod play_cmd;
mod simulate_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tessera")]
#[command(about = "Tessera tile-laying game engine")]
struct Cli {
    /// Seed for reproducible runs (random when omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log phase transitions and placements
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the order tiles would be drawn in
    Draw(draw_cmd::DrawArgs),
    /// List tile templates
    Catalog(catalog_cmd::CatalogArgs),
    /// Play a single scripted game
    Play(play_cmd::PlayArgs),
    /// Play many games in parallel and report statistics
    Simulate(simulate_cmd::SimulateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Draw(args) => draw_cmd::run(args, cli.seed),
        Commands::Catalog(args) => catalog_cmd::run(args),
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Simulate(args) => simulate_cmd::run(args, cli.seed),
    }
}

/// Log to stderr so JSON output on stdout stays clean
fn init_tracing(verbose: bool) {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref(), verbose);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `RUST_LOG` directives (default `info`), with `--verbose` raising the
/// default level to `debug` on top of them
fn build_filter(env: Option<&str>, verbose: bool) -> EnvFilter {
    let filter = env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));
    if verbose {
        filter.add_directive(LevelFilter::DEBUG.into())
    } else {
        filter
    }
}
