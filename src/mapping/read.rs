use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::{
    fs::File,
    io::{Cursor, Read},
    path::Path,
};
use tracing::trace;

use super::ProjectedRow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadStats {
    pub records_read: usize,
    pub rows_skipped: usize,
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Takes a leading UTF-8 BOM off `reader` so the csv reader never sees it.
/// Returns whether the BOM belongs to the first record's first field, i.e. it
/// is not followed directly by a line break.
fn split_bom<R: Read>(mut reader: R) -> Result<(bool, impl Read)> {
    let mut head = Vec::with_capacity(UTF8_BOM.len() + 1);
    (&mut reader)
        .take(UTF8_BOM.len() as u64 + 1)
        .read_to_end(&mut head)
        .context("reading start of source")?;

    let mut bom_in_first_field = false;
    if head.starts_with(UTF8_BOM) {
        bom_in_first_field = !matches!(head.get(UTF8_BOM.len()), Some(b'\r' | b'\n'));
        head = head.split_off(UTF8_BOM.len());
    }
    Ok((bom_in_first_field, Cursor::new(head).chain(reader)))
}

/// Parses headerless CSV from `reader` and projects every record with enough
/// fields. Order is preserved; short records are dropped.
///
/// A leading BOM is kept as part of the first record's field 0, the same as
/// any other character of a strictly UTF-8 decoded source.
pub fn read_records<R: Read>(reader: R) -> Result<(Vec<ProjectedRow>, ReadStats)> {
    let (bom_in_first_field, reader) = split_bom(reader)?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // records differ in field count, short ones get filtered below
        .delimiter(b',')
        .quote(b'"')
        .double_quote(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut stats = ReadStats::default();

    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        stats.records_read += 1;

        match ProjectedRow::from_record(&record) {
            Some(mut row) => {
                if idx == 0 && bom_in_first_field {
                    row.type_id.insert(0, '\u{feff}');
                }
                rows.push(row);
            }
            None => {
                stats.rows_skipped += 1;
                trace!(record = idx, fields = record.len(), "skipping short record");
            }
        }
    }

    Ok((rows, stats))
}

/// Opens `path` and runs [`read_records`] over it. The file handle is closed
/// before this returns.
pub fn load_projected_rows(path: &Path) -> Result<(Vec<ProjectedRow>, ReadStats)> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open source CSV: {}", path.display()))?;
    read_records(file).with_context(|| format!("Failed to read {}", path.display()))
}
