use anyhow::{bail, Context, Result};
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use std::{fs::File, io::Write, path::Path};

use super::ProjectedRow;
use crate::config::OUTPUT_HEADER;

/// Writes the `TypeID,TypeName` header followed by `rows`. Fields are quoted
/// only when they contain a comma, a quote or a line break; records end in CRLF.
pub fn write_table<W: Write>(writer: W, rows: &[ProjectedRow]) -> Result<usize> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false) // header is written by hand so an empty table still gets one
        .delimiter(b',')
        .quote(b'"')
        .double_quote(true)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::CRLF)
        .from_writer(writer);

    wtr.write_record(OUTPUT_HEADER).context("writing header row")?;
    for (idx, row) in rows.iter().enumerate() {
        wtr.serialize(row).with_context(|| format!("writing row {}", idx))?;
    }
    wtr.flush().context("flushing mapped table")?;

    Ok(rows.len())
}

/// Creates or truncates `path` and writes the mapped table into it.
pub fn save_table(path: &Path, rows: &[ProjectedRow]) -> Result<usize> {
    let file = File::create(path).with_context(|| format!("creating file {}", path.display()))?;
    write_table(file, rows).with_context(|| format!("Failed to write {}", path.display()))
}

/// Re-parses a table produced by [`save_table`]. Fails unless the header is
/// exactly `TypeID,TypeName` and every row has two fields.
pub fn read_mapped_table(path: &Path) -> Result<Vec<ProjectedRow>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open mapped table: {}", path.display()))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(file);

    let headers = rdr
        .headers()
        .with_context(|| format!("reading header of {}", path.display()))?
        .clone();
    if !headers.iter().eq(OUTPUT_HEADER) {
        bail!(
            "unexpected header in {}: {:?} (expected {:?})",
            path.display(),
            headers,
            OUTPUT_HEADER
        );
    }

    let mut rows = Vec::new();
    for (idx, result) in rdr.deserialize::<ProjectedRow>().enumerate() {
        let row = result.with_context(|| format!("bad row {} in {}", idx, path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}
