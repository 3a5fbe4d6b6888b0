//! Series loaders and result sinks.
//!
//! - [`YahooChartLoader`] fetches recent bars from the Yahoo Finance chart API
//! - [`CsvSeriesLoader`] / [`CsvSeriesWriter`] read and write staged CSV bars
//! - [`JsonResultSink`] persists one JSON record per ticker

mod csv_source;
mod json_sink;
mod yahoo;

pub use csv_source::{parse_timestamp, CsvSeriesLoader, CsvSeriesWriter};
pub use json_sink::JsonResultSink;
pub use yahoo::{YahooChartLoader, YahooConfig};
