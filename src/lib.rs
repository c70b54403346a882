pub mod config;
pub mod mapping;

pub use mapping::{convert, convert_with_stats, ConvertStats, ProjectedRow};
