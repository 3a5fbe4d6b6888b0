//! Core traits for the analysis pipeline.

mod data_source;
mod indicator;
mod sink;

pub use data_source::SeriesLoader;
pub use indicator::Indicator;
pub use sink::ResultSink;
