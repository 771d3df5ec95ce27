//! CSV ride output.
//!
//! One row per reported ride:
//! `kind,vclass,line,route_length,duration,waiting_time`.  Durations and
//! waiting times are in seconds; a missing waiting time is an empty cell.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{OutputResult, RideStatsSink, RideSummary};

/// Writes ride summaries to a CSV file.
pub struct CsvRideWriter {
    rides:    Writer<File>,
    finished: bool,
}

impl CsvRideWriter {
    /// Create (or truncate) `path` and write the header row.
    pub fn new(path: &Path) -> OutputResult<Self> {
        let mut rides = Writer::from_path(path)?;
        rides.write_record(["kind", "vclass", "line", "route_length", "duration", "waiting_time"])?;
        Ok(Self { rides, finished: false })
    }

    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.rides.flush()?;
        Ok(())
    }
}

impl RideStatsSink for CsvRideWriter {
    fn add_ride(&mut self, ride: &RideSummary) -> OutputResult<()> {
        self.rides.write_record(&[
            ride.kind.as_str().to_owned(),
            ride.vclass.as_str().to_owned(),
            ride.line.clone(),
            format!("{:.2}", ride.route_length),
            ride.duration.to_string(),
            ride.waiting_time.map(|w| w.to_string()).unwrap_or_default(),
        ])?;
        Ok(())
    }
}
