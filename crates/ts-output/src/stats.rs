//! Aggregated ride statistics.
//!
//! Every finished or aborted ride of a person or container is reported once
//! as a [`RideSummary`].  [`RideStatistics`] folds these into per-kind
//! totals; a ride with a non-positive duration counts as aborted.

use ts_core::{OutputConfig, SimTime, TransportableKind, VehicleClass};

use crate::{OutputResult, OutputSink};

/// One ride as seen by the statistics collector.
#[derive(Clone, Debug, PartialEq)]
pub struct RideSummary {
    pub kind:         TransportableKind,
    /// Distance ridden in metres; `-1` if never boarded.
    pub route_length: f64,
    /// Time from boarding to alighting; negative if the ride never completed.
    pub duration:     SimTime,
    pub vclass:       VehicleClass,
    /// Line label of the vehicle; empty if never boarded.
    pub line:         String,
    /// Time spent waiting before boarding, if waiting was ever started.
    pub waiting_time: Option<SimTime>,
}

/// Receiver of ride summaries.
pub trait RideStatsSink {
    fn add_ride(&mut self, ride: &RideSummary) -> OutputResult<()>;
}

// ── RideTotals ────────────────────────────────────────────────────────────────

/// Running totals for one transportable kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RideTotals {
    pub count:        usize,
    pub aborted:      usize,
    pub bus:          usize,
    pub rail:         usize,
    pub bike:         usize,
    pub taxi:         usize,
    pub waiting_time: SimTime,
    pub route_length: f64,
    pub duration:     SimTime,
}

impl RideTotals {
    fn add(&mut self, ride: &RideSummary) {
        self.count += 1;
        if !ride.duration.is_positive() {
            self.aborted += 1;
            return;
        }
        if let Some(w) = ride.waiting_time {
            self.waiting_time += w;
        }
        self.route_length += ride.route_length;
        self.duration += ride.duration;
        match ride.vclass {
            VehicleClass::Bus => self.bus += 1,
            VehicleClass::Bicycle => self.bike += 1,
            VehicleClass::Taxi => self.taxi += 1,
            c if c.is_rail() => self.rail += 1,
            _ => {}
        }
    }

    /// Number of rides that completed.
    pub fn completed(&self) -> usize {
        self.count - self.aborted
    }

    fn mean(&self, total: f64) -> f64 {
        match self.completed() {
            0 => 0.0,
            n => total / n as f64,
        }
    }

    pub fn mean_waiting_time(&self) -> f64 {
        self.mean(self.waiting_time.as_secs_f64())
    }

    pub fn mean_route_length(&self) -> f64 {
        self.mean(self.route_length)
    }

    pub fn mean_duration(&self) -> f64 {
        self.mean(self.duration.as_secs_f64())
    }
}

// ── RideStatistics ───────────────────────────────────────────────────────────

/// Per-kind aggregation of ride summaries.
#[derive(Clone, Debug, Default)]
pub struct RideStatistics {
    persons:    RideTotals,
    containers: RideTotals,
}

impl RideStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn totals(&self, kind: TransportableKind) -> &RideTotals {
        match kind {
            TransportableKind::Person => &self.persons,
            TransportableKind::Container => &self.containers,
        }
    }

    /// Write `<rideStatistics>` and `<transportStatistics>` elements with
    /// the mean values of completed rides.
    pub fn write(&self, sink: &mut dyn OutputSink, cfg: &OutputConfig) -> OutputResult<()> {
        for (tag, t) in [
            ("rideStatistics", &self.persons),
            ("transportStatistics", &self.containers),
        ] {
            sink.open_tag(tag)?;
            sink.write_attr("number", &t.count.to_string())?;
            if t.count > 0 {
                sink.write_attr("waitingTime", &cfg.fmt_f64(t.mean_waiting_time()))?;
                sink.write_attr("routeLength", &cfg.fmt_f64(t.mean_route_length()))?;
                sink.write_attr("duration", &cfg.fmt_f64(t.mean_duration()))?;
                sink.write_attr("bus", &t.bus.to_string())?;
                sink.write_attr("train", &t.rail.to_string())?;
                sink.write_attr("bike", &t.bike.to_string())?;
                sink.write_attr("taxi", &t.taxi.to_string())?;
                sink.write_attr("aborted", &t.aborted.to_string())?;
            }
            sink.close_tag(None)?;
        }
        Ok(())
    }
}

impl RideStatsSink for RideStatistics {
    fn add_ride(&mut self, ride: &RideSummary) -> OutputResult<()> {
        match ride.kind {
            TransportableKind::Person => self.persons.add(ride),
            TransportableKind::Container => self.containers.add(ride),
        }
        Ok(())
    }
}
