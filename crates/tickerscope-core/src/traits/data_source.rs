//! Series loader trait definitions.

use async_trait::async_trait;

use crate::error::DataError;
use crate::types::Series;

/// Trait for historical price sources.
#[async_trait]
pub trait SeriesLoader: Send + Sync {
    /// Load the recent bar history for a symbol.
    ///
    /// # Returns
    /// A validated series ordered from oldest to newest, or
    /// `DataError::NoDataAvailable` when the source has no bars and
    /// `DataError::Malformed` when a required price field is missing.
    async fn load(&self, symbol: &str) -> Result<Series, DataError>;

    /// Get the loader name.
    fn name(&self) -> &str;
}
