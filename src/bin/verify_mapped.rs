// src/bin/verify_mapped.rs
//
// Cross-checks invTypes_mapped.csv against data/invTypes.csv without
// rewriting anything.

use anyhow::Result;
use invtypes_map::{
    config::{DEFAULT_LOG_FILTER, DEST_PATH, SOURCE_PATH},
    mapping::{check_mapped_rows, load_projected_rows, read_mapped_table},
};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // 1) What the source should produce
    let (expected, stats) = load_projected_rows(Path::new(SOURCE_PATH))?;
    info!(
        records = stats.records_read,
        skipped = stats.rows_skipped,
        "source scanned"
    );

    // 2) What is actually on disk
    let mapped = read_mapped_table(Path::new(DEST_PATH))?;

    println!("{}: {} qualifying rows", SOURCE_PATH, expected.len());
    println!("{}: {} rows", DEST_PATH, mapped.len());

    // 3) Same rows, same order
    check_mapped_rows(&expected, &mapped)?;

    println!("OK");
    Ok(())
}
