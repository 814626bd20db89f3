//! Smoke check for the Kona Bloom Filter.
//!
//! Loads settings (defaults, an optional `--config` file, then `KONA__*` environment
//! overrides), builds a filter, runs an insert/check/clear round and
//! prints the resulting statistics as JSON.

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use tracing::info;

use kona_bloom_lib::config::{ConfigLoader, ENV_PREFIX};
use kona_bloom_lib::data_structures::KonaBloomFilter;
use kona_bloom_lib::{build_filter, logging};

/// Command line arguments for the Kona Bloom check.
#[derive(Parser, Debug)]
#[clap(name = "kona_check", version, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,
}

/// Keys inserted during the check.
const SAMPLE_KEYS: [&str; 4] = ["hello", "kona", "mauka", "makai"];

fn run_round(filter: &mut KonaBloomFilter) -> Result<()> {
    for key in SAMPLE_KEYS {
        filter.insert(key.as_bytes());
    }
    for key in SAMPLE_KEYS {
        ensure!(filter.check(key.as_bytes()), "inserted key {key:?} was not found");
    }

    let probe = "world";
    info!(
        key = probe,
        possibly_present = filter.check(probe.as_bytes()),
        "probed a key that was never inserted"
    );

    let snapshot = filter.try_clone()?;
    filter.clear();
    ensure!(
        SAMPLE_KEYS.iter().all(|key| !filter.check(key.as_bytes())),
        "keys survived clear"
    );
    ensure!(
        SAMPLE_KEYS.iter().all(|key| snapshot.check(key.as_bytes())),
        "clone was affected by clear"
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX)
        .load()
        .context("loading configuration")?;

    logging::init_logging(&config.log)?;
    info!(version = kona_bloom_lib::VERSION, "Starting Kona Bloom check");

    let mut filter = build_filter(&config.filter).context("building filter")?;
    info!(
        bit_vector_length = filter.bit_vector_length(),
        hash_methods = ?filter.hash_method_names(),
        "Filter built"
    );

    run_round(&mut filter)?;
    for key in SAMPLE_KEYS {
        filter.insert(key.as_bytes());
    }

    let stats = serde_json::to_string_pretty(&filter.stats())?;
    println!("{stats}");

    info!("Kona Bloom check passed");
    Ok(())
}
