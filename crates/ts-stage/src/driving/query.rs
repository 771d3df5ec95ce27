//! Read-only queries on a driving stage.
//!
//! While waiting, answers come from the recorded waiting location; once
//! bound, from the carrying vehicle.  A bound vehicle missing from the
//! registry is treated as if the entity still stood where it boarded.

use std::f64::consts::FRAC_PI_2;

use ts_core::{EdgeId, Position, SimTime, TransportableKind};
use ts_network::Network;
use ts_vehicle::Vehicle;

use crate::{ReservationDispatcher, SimNet};

use super::DrivingStage;

impl DrivingStage {
    fn bound_vehicle<'a, D: ReservationDispatcher>(&self, net: &'a SimNet<D>) -> Option<&'a dyn Vehicle> {
        self.vehicle.as_ref().and_then(|b| net.vehicles.get(&b.vehicle))
    }

    /// The edge the entity is on.
    pub fn edge<'a, D: ReservationDispatcher>(&'a self, net: &'a SimNet<D>) -> Option<&'a EdgeId> {
        match self.bound_vehicle(net) {
            Some(v) => v
                .lane()
                .and_then(|lane| net.network.lane_edge(lane))
                .or_else(|| v.current_edge()),
            None => self.waiting_edge.as_ref(),
        }
    }

    /// Where the ride started, even after boarding.
    pub fn from_edge(&self) -> Option<&EdgeId> {
        self.waiting_edge.as_ref()
    }

    /// Offset along [`edge`](Self::edge), never beyond its end.
    pub fn edge_pos<D: ReservationDispatcher>(&self, net: &SimNet<D>, _now: SimTime) -> f64 {
        let Some(v) = self.bound_vehicle(net) else {
            return self.waiting_pos;
        };
        let pos = v.position_on_lane();
        match self.edge(net).and_then(|e| net.network.edge_length(e)) {
            Some(length) => pos.min(length),
            None => pos,
        }
    }

    /// Spatial position: the vehicle's while riding, else the stop's
    /// boarding point or the roadside beside the waiting offset.
    pub fn position<D: ReservationDispatcher>(&self, net: &SimNet<D>) -> Option<Position> {
        if let Some(v) = self.bound_vehicle(net) {
            return Some(v.position(&net.network));
        }
        if self.waiting_stop_position.is_some() {
            return self.waiting_stop_position;
        }
        let network: &Network = &net.network;
        network.edge_position(self.waiting_edge.as_ref()?, self.waiting_pos, network.roadside_offset())
    }

    /// Facing in radians: the vehicle's heading while riding (0 for models
    /// without one), else perpendicular to the road, towards it.
    pub fn angle<D: ReservationDispatcher>(&self, net: &SimNet<D>) -> f64 {
        if self.vehicle.is_some() {
            return self.bound_vehicle(net).and_then(|v| v.heading()).unwrap_or(0.0);
        }
        let side = if net.network.lefthand { -FRAC_PI_2 } else { FRAC_PI_2 };
        self.waiting_edge
            .as_ref()
            .and_then(|e| net.network.edge_angle(e, self.waiting_pos))
            .map_or(0.0, |a| a + side)
    }

    pub fn speed<D: ReservationDispatcher>(&self, net: &SimNet<D>) -> f64 {
        self.bound_vehicle(net).map_or(0.0, |v| v.speed())
    }

    /// Time spent waiting so far; zero once aboard.
    pub fn waiting_time(&self, now: SimTime) -> SimTime {
        match (&self.vehicle, self.waiting_since) {
            (None, Some(since)) => now - since,
            _ => SimTime::ZERO,
        }
    }

    /// Origin then destination; intermediate route edges are not listed.
    pub fn edges(&self) -> Vec<EdgeId> {
        self.waiting_edge
            .iter()
            .cloned()
            .chain(std::iter::once(self.common.destination.clone()))
            .collect()
    }

    pub fn stage_description(&self, kind: TransportableKind) -> String {
        if self.is_waiting_for_vehicle() {
            format!("waiting for {}", self.joined_lines(","))
        } else if kind.is_person() {
            "driving".to_owned()
        } else {
            "transport".to_owned()
        }
    }

    /// One-line summary naming the destination and any intended vehicle.
    pub fn stage_summary(&self, network: &Network, kind: TransportableKind) -> String {
        let dest = match &self.common.destination_stop {
            Some(stop) => match network.stop(stop).map(|s| s.name.as_str()) {
                Some(name) if !name.is_empty() => format!("stop '{stop}' ({name})"),
                _ => format!("stop '{stop}'"),
            },
            None => format!("edge '{}'", self.common.destination),
        };
        let mode = if kind.is_person() { "driving" } else { "transported" };
        if !self.is_waiting_for_vehicle() {
            return format!("{mode} to {dest}");
        }
        let intended = match (&self.intended_vehicle, self.intended_depart) {
            (Some(v), Some(t)) => format!(" (vehicle {v} at time {t})"),
            (Some(v), None) => format!(" (vehicle {v})"),
            (None, _) => String::new(),
        };
        format!("waiting for {}{intended} then {mode} to {dest}", self.joined_lines(","))
    }

    /// What the entity waits for and where; empty once aboard.
    pub fn waiting_description(&self) -> String {
        if !self.is_waiting_for_vehicle() {
            return String::new();
        }
        let at = match (&self.origin_stop, &self.waiting_edge) {
            (Some(stop), _) => format!("busStop '{stop}'"),
            (None, Some(edge)) => format!("edge '{edge}'"),
            (None, None) => return format!("waiting for {}", self.joined_lines(",")),
        };
        format!("waiting for {} at {at}", self.joined_lines(","))
    }
}
