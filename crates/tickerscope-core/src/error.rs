//! Error types for the analysis pipeline.

use thiserror::Error;

/// Top-level analysis error.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Whether the error means the ticker simply had nothing usable to analyze.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(
            self,
            AnalysisError::Data(DataError::NoDataAvailable | DataError::Malformed(_))
        )
    }
}

/// Strategy-specific errors.
#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Data source and sink errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Malformed source: {0}")]
    Malformed(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_unavailable_classification() {
        assert!(AnalysisError::from(DataError::NoDataAvailable).is_data_unavailable());
        assert!(AnalysisError::from(DataError::Malformed("no Close".into())).is_data_unavailable());
        assert!(!AnalysisError::from(DataError::Connection("timeout".into())).is_data_unavailable());
        assert!(!AnalysisError::Config("bad".into()).is_data_unavailable());
    }

    #[test]
    fn test_error_messages() {
        let err = AnalysisError::from(DataError::Malformed("missing field `Close`".into()));
        assert_eq!(
            err.to_string(),
            "Data error: Malformed source: missing field `Close`"
        );
    }
}
