// src/config.rs

/// Source dump, read with no header row.
pub const SOURCE_PATH: &str = "data/invTypes.csv";

/// Mapped table, written relative to the current directory.
pub const DEST_PATH: &str = "invTypes_mapped.csv";

pub const OUTPUT_HEADER: [&str; 2] = ["TypeID", "TypeName"];

/// Records shorter than this are dropped.
pub const MIN_FIELDS: usize = 3;

pub const TYPE_ID_COLUMN: usize = 0;
pub const TYPE_NAME_COLUMN: usize = 2;

/// Used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "warn";
