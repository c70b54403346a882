use anyhow::{bail, Result};
use tracing::warn;

use super::ProjectedRow;

/// Checks a re-read mapped table against the rows its source projects to.
/// Fails on a length mismatch, otherwise on the first row that differs.
pub fn check_mapped_rows(expected: &[ProjectedRow], mapped: &[ProjectedRow]) -> Result<()> {
    if expected.len() != mapped.len() {
        bail!(
            "row count mismatch: {} expected, {} found",
            expected.len(),
            mapped.len()
        );
    }

    if let Some((idx, (want, got))) = expected
        .iter()
        .zip(mapped)
        .enumerate()
        .find(|(_, (want, got))| want != got)
    {
        warn!(row = idx, ?want, ?got, "rows differ");
        bail!("row {} differs: expected {:?}, found {:?}", idx, want, got);
    }

    Ok(())
}
