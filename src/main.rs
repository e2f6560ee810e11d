use anyhow::{Context, Result};
use chiton::{config::Config, risk};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const YEAR: u32 = 2021;
const DAY: u8 = 15;

/// Find the lowest total risk across a cave, then across the cave tiled into a larger one.
#[derive(Parser)]
#[command(name = "chiton")]
#[command(version)]
struct Args {
    /// Input file; defaults to the configured input for 2021 day 15.
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = Config::load_or_default().context("loading configuration")?;
    let input = args.input.unwrap_or_else(|| config.input_for(YEAR, DAY));

    let map = risk::read_map(&input).with_context(|| format!("reading {}", input.display()))?;
    let answers = risk::solve(&map, config.expansion)?;

    println!("Part 1 answer: {}", answers.part1);
    println!("Part 2 answer: {}", answers.part2);
    Ok(())
}
