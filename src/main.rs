use anyhow::Result;
use invtypes_map::{
    config::{DEFAULT_LOG_FILTER, DEST_PATH, SOURCE_PATH},
    convert_with_stats,
};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // logs go to stderr; stdout carries only the summary line
    let env =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
    debug!(source = SOURCE_PATH, dest = DEST_PATH, "startup");

    let stats = convert_with_stats(SOURCE_PATH, DEST_PATH)?;
    debug!(
        read = stats.records_read,
        skipped = stats.rows_skipped,
        "conversion finished"
    );

    println!("Saved {} rows to {}.", stats.rows_written, DEST_PATH);
    Ok(())
}
