pub mod error;
pub mod reader;

pub use error::IoError;

/// Report location used when no `--report` path is given.
pub const DEFAULT_REPORT_PATH: &str = "report.json";
