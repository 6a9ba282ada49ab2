pub mod aggregate;
pub mod colors;
pub mod export;

pub use aggregate::{aggregate, MonthlySummary, MISCELLANEOUS, TOTAL_COLUMN};
pub use colors::{ColorMap, DEFAULT_COLOR};
pub use export::{write_summary, write_summary_file, write_unmatched, write_unmatched_file, ExportError};
