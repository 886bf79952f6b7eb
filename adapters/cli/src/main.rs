#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Host-engine adapter for the Diamond Siege decision engine.
//!
//! Standard input carries the engine configuration followed by one frame per
//! line. Each deploy frame is answered with two lines on standard output.
//! Diagnostics go to standard error so they never corrupt the submission.

mod session;

use std::{
    io::{self, BufWriter},
    path::PathBuf,
};

use anyhow::Result;
use clap::Parser;
use diamond_siege_system_strategy::StrategyConfig;
use session::Session;
use tracing_subscriber::EnvFilter;

/// Command-line arguments accepted by the adapter.
#[derive(Debug, Parser)]
#[command(name = "diamond-siege", about = "Plays Diamond Siege over the engine line protocol")]
struct CliArgs {
    /// TOML file overriding the default placement tables and tuning.
    #[arg(long, value_name = "PATH")]
    strategy: Option<PathBuf>,
    /// Seed for the maze toggle coin flips. Drawn at random when omitted.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
}

/// Entry point for the Diamond Siege command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = match &args.strategy {
        Some(path) => StrategyConfig::load(path)?,
        None => StrategyConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, strategy = ?args.strategy, "starting engine session");

    let mut session = Session::new(config, seed);
    let stdin = io::stdin();
    let mut stdout = BufWriter::new(io::stdout().lock());
    let turns = session::run(stdin.lock(), &mut stdout, &mut session)?;
    tracing::info!(turns, "engine session closed");
    Ok(())
}
