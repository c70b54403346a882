// src/mapping/mod.rs
use anyhow::Result;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::config::{MIN_FIELDS, TYPE_ID_COLUMN, TYPE_NAME_COLUMN};

pub mod read;
pub mod verify;
pub mod write;

pub use read::{load_projected_rows, read_records, ReadStats};
pub use verify::check_mapped_rows;
pub use write::{read_mapped_table, save_table, write_table};

/// One row of the mapped table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedRow {
    #[serde(rename = "TypeID")]
    pub type_id: String,
    #[serde(rename = "TypeName")]
    pub type_name: String,
}

impl ProjectedRow {
    pub fn new(type_id: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            type_name: type_name.into(),
        }
    }

    /// Projects fields 0 and 2 of `record`. Returns `None` for records with
    /// fewer than `MIN_FIELDS` fields.
    pub fn from_record(record: &StringRecord) -> Option<Self> {
        if record.len() < MIN_FIELDS {
            return None;
        }
        Some(Self::new(
            record.get(TYPE_ID_COLUMN)?,
            record.get(TYPE_NAME_COLUMN)?,
        ))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    /// Every record parsed from the source, short ones included.
    pub records_read: usize,
    pub rows_written: usize,
    pub rows_skipped: usize,
}

/// Reads `source`, keeps `(field 0, field 2)` of every record with at least
/// three fields and writes them under a `TypeID,TypeName` header to `dest`.
///
/// The whole source is loaded before `dest` is created or truncated. A write
/// failure can leave a truncated `dest` behind.
#[tracing::instrument(
    level = "debug",
    skip(source, dest),
    fields(source = %source.as_ref().display(), dest = %dest.as_ref().display())
)]
pub fn convert_with_stats<S: AsRef<Path>, D: AsRef<Path>>(
    source: S,
    dest: D,
) -> Result<ConvertStats> {
    let (rows, read_stats) = load_projected_rows(source.as_ref())?;
    debug!(
        records = read_stats.records_read,
        kept = rows.len(),
        skipped = read_stats.rows_skipped,
        "source loaded"
    );

    let rows_written = save_table(dest.as_ref(), &rows)?;
    debug!(rows = rows_written, "mapped table saved");

    Ok(ConvertStats {
        records_read: read_stats.records_read,
        rows_written,
        rows_skipped: read_stats.rows_skipped,
    })
}

/// Same as [`convert_with_stats`], returning only the number of rows written.
pub fn convert<S: AsRef<Path>, D: AsRef<Path>>(source: S, dest: D) -> Result<usize> {
    convert_with_stats(source, dest).map(|stats| stats.rows_written)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    pub(crate) fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,invtypes_map::mapping=trace")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    #[test]
    fn from_record_takes_first_and_third_field() {
        let record = StringRecord::from(vec!["1", "Item", "Cat", "Extra"]);
        assert_eq!(
            ProjectedRow::from_record(&record),
            Some(ProjectedRow::new("1", "Cat"))
        );
    }

    #[test]
    fn from_record_rejects_short_records() {
        assert_eq!(ProjectedRow::from_record(&StringRecord::new()), None);
        assert_eq!(
            ProjectedRow::from_record(&StringRecord::from(vec!["2", "OnlyTwo"])),
            None
        );
    }

    #[test]
    fn from_record_keeps_empty_fields() {
        let record = StringRecord::from(vec!["", "ignored", ""]);
        assert_eq!(
            ProjectedRow::from_record(&record),
            Some(ProjectedRow::new("", ""))
        );
    }

    #[test]
    fn convert_maps_example_file() -> Result<()> {
        init_test_logging();
        let tmp = tempdir()?;
        let source = tmp.path().join("invTypes.csv");
        let dest = tmp.path().join("invTypes_mapped.csv");
        fs::write(&source, "1,Item,Cat,Extra\n2,OnlyTwo\n3,Widget,Gadget\n")?;

        let stats = convert_with_stats(&source, &dest)?;
        assert_eq!(
            stats,
            ConvertStats {
                records_read: 3,
                rows_written: 2,
                rows_skipped: 1,
            }
        );
        assert_eq!(
            fs::read_to_string(&dest)?,
            "TypeID,TypeName\r\n1,Cat\r\n3,Gadget\r\n"
        );
        Ok(())
    }

    #[test]
    fn convert_truncates_existing_destination() -> Result<()> {
        let tmp = tempdir()?;
        let source = tmp.path().join("invTypes.csv");
        let dest = tmp.path().join("invTypes_mapped.csv");
        fs::write(&source, "7,x,Seven\n")?;
        fs::write(&dest, "stale,content,that,is,longer\n".repeat(4))?;

        assert_eq!(convert(&source, &dest)?, 1);
        assert_eq!(fs::read_to_string(&dest)?, "TypeID,TypeName\r\n7,Seven\r\n");
        Ok(())
    }

    #[test]
    fn missing_source_fails_without_touching_destination() {
        let tmp = tempdir().unwrap();
        let dest = tmp.path().join("invTypes_mapped.csv");

        let err = convert(tmp.path().join("nope.csv"), &dest).unwrap_err();
        assert!(format!("{:#}", err).contains("nope.csv"));
        assert!(!dest.exists());
    }

    #[test]
    fn unwritable_destination_fails() {
        let tmp = tempdir().unwrap();
        let source = tmp.path().join("invTypes.csv");
        fs::write(&source, "1,a,b\n").unwrap();

        let dest = tmp.path().join("missing-dir").join("out.csv");
        assert!(convert(&source, &dest).is_err());
    }
}
