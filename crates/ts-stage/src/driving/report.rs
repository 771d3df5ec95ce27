//! Trip statistics and route fragment output.
//!
//! Attribute names and order are read by external tools and must not
//! change.

use log::trace;
use ts_core::{OutputConfig, SimTime, TransportableId, TransportableKind, VehicleClass};
use ts_network::Network;
use ts_output::{OutputSink, RideStatsSink, RideSummary};

use crate::StageResult;

use super::DrivingStage;

/// Sentinel written for times that never happened.
const UNSET: &str = "-1";

impl DrivingStage {
    /// Time between starting to wait and departing (or `now`, if still
    /// waiting).  `None` if the stage never started waiting.
    pub fn boarding_wait(&self, now: SimTime) -> Option<SimTime> {
        let departed = self.common.departed.unwrap_or(now);
        self.waiting_since.map(|since| departed - since)
    }

    /// The summary handed to ride statistics.
    pub fn ride_summary(&self, kind: TransportableKind, now: SimTime) -> RideSummary {
        let duration = match (self.common.departed, self.common.arrived) {
            (Some(d), Some(a)) => a - d,
            _ => SimTime::from_secs(-1),
        };
        RideSummary {
            kind,
            route_length: self.distance.value(),
            duration,
            vclass:       self.vehicle.as_ref().map_or(VehicleClass::Ignoring, |b| b.vclass),
            line:         self.vehicle.as_ref().map(|b| b.line.clone()).unwrap_or_default(),
            waiting_time: self.boarding_wait(now),
        }
    }

    /// Write the `<ride>`/`<transport>` statistics record and forward a
    /// [`RideSummary`] to `stats`.
    pub fn tripinfo_output(
        &self,
        sink:  &mut dyn OutputSink,
        stats: &mut dyn RideStatsSink,
        id:    &TransportableId,
        kind:  TransportableKind,
        now:   SimTime,
        cfg:   &OutputConfig,
    ) -> StageResult<()> {
        let summary = self.ride_summary(kind, now);
        stats.add_ride(&summary)?;
        trace!("tripinfo for {kind} '{id}'");

        let fmt_time = |t: Option<SimTime>| t.map_or_else(|| UNSET.to_owned(), |t| t.to_string());
        let duration = match (self.common.departed, self.common.arrived) {
            (Some(d), Some(a)) => Some(a - d),
            (Some(d), None) => Some(now - d),
            (None, _) => None,
        };

        sink.open_tag(kind.ride_tag())?;
        sink.write_attr("waitingTime", &fmt_time(summary.waiting_time.filter(|w| w.millis() >= 0)))?;
        sink.write_attr("vehicle", self.vehicle_id())?;
        sink.write_attr("depart", &fmt_time(self.common.departed))?;
        sink.write_attr("arrival", &fmt_time(self.common.arrived))?;
        sink.write_attr("arrivalPos", &cfg.fmt_f64(self.common.arrival_pos))?;
        sink.write_attr("duration", &fmt_time(duration))?;
        sink.write_attr("routeLength", &cfg.fmt_f64(self.distance.value()))?;
        sink.close_tag(None)?;
        Ok(())
    }

    /// Write the ride as a route-file element that [`crate::load_rides`]
    /// reads back into an equivalent stage.
    pub fn route_output(
        &self,
        sink:              &mut dyn OutputSink,
        network:           &Network,
        kind:              TransportableKind,
        with_route_length: bool,
        cfg:               &OutputConfig,
    ) -> StageResult<()> {
        sink.open_tag(kind.ride_tag())?;
        if let Some(from) = self.from_edge() {
            sink.write_attr("from", from.as_str())?;
        }
        sink.write_attr("to", self.common.destination.as_str())?;
        let mut comment = None;
        if let Some(stop) = &self.common.destination_stop {
            sink.write_attr("busStop", stop.as_str())?;
            comment = network
                .stop(stop)
                .map(|s| s.name.as_str())
                .filter(|name| !name.is_empty());
        }
        sink.write_attr("lines", &self.joined_lines(" "))?;
        if let Some(v) = &self.intended_vehicle {
            sink.write_attr("intended", v.as_str())?;
        }
        if let Some(t) = self.intended_depart {
            sink.write_attr("depart", &t.to_string())?;
        }
        if with_route_length {
            sink.write_attr("routeLength", &cfg.fmt_f64(self.distance.value()))?;
        }
        sink.close_tag(comment)?;
        Ok(())
    }
}
