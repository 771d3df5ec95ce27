//! `ts-output` — structured output for rides and transports.
//!
//! | Module    | Contents                                                          |
//! |-----------|-------------------------------------------------------------------|
//! | [`sink`]  | `OutputSink` trait (open tag / attribute / close tag), `TagRecorder` |
//! | [`xml`]   | `XmlSink` — quick-xml backed sink over any `io::Write`            |
//! | [`stats`] | `RideSummary`, `RideStatsSink` trait, `RideStatistics` aggregator |
//! | [`csv`]   | `CsvRideWriter` — one CSV row per ride summary                    |
//! | [`error`] | `OutputError`, `OutputResult<T>`                                  |
//!
//! # Usage
//!
//! ```rust,ignore
//! use ts_output::{OutputSink, XmlSink};
//!
//! let mut sink = XmlSink::new(std::io::stdout());
//! sink.open_tag("ride")?;
//! sink.write_attr("from", "E0")?;
//! sink.close_tag(None)?;
//! ```
//!
//! Attribute order is part of the output contract with downstream tools:
//! sinks must emit attributes exactly in the order they were written.

pub mod csv;
pub mod error;
pub mod sink;
pub mod stats;
pub mod xml;

#[cfg(test)]
mod tests;

pub use csv::CsvRideWriter;
pub use error::{OutputError, OutputResult};
pub use sink::{OutputSink, RecordedTag, TagRecorder};
pub use stats::{RideStatistics, RideStatsSink, RideSummary, RideTotals};
pub use xml::XmlSink;
