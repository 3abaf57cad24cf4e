// File I/O collaborators around the reconciliation core

pub mod dataset;
pub mod error;
pub mod export;
pub mod report;
pub mod text;

pub use dataset::{load_existing, read_pairs, write_pairs};
pub use error::IoError;
pub use export::{parse_export, read_export};
pub use report::{splice_stats_section, stats_table, update_report};
