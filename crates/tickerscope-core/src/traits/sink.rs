//! Result sink trait definitions.

use std::path::PathBuf;

use crate::error::DataError;
use crate::types::AnalysisReport;

/// Destination for finished per-ticker analysis records.
pub trait ResultSink: Send + Sync {
    /// Persist one record keyed by its ticker, returning where it went.
    fn write(&self, report: &AnalysisReport) -> Result<PathBuf, DataError>;

    /// Get the sink name.
    fn name(&self) -> &str;
}
