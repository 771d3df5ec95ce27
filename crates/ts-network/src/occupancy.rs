//! Live occupancy of edges and stopping places.
//!
//! Entries are kept in insertion order (`Vec`) so that whoever scans an edge
//! sees waiting vehicles and entities in the order they arrived.

use std::collections::BTreeMap;

use ts_core::{EdgeId, StopId, TransportableId, TransportableKind, VehicleId};

// ── EdgeOccupancy ─────────────────────────────────────────────────────────────

/// What is currently waiting on one edge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeOccupancy {
    /// Vehicles parked on the edge until a transportable boards them.
    waiting_vehicles: Vec<VehicleId>,
    persons:          Vec<TransportableId>,
    containers:       Vec<TransportableId>,
}

impl EdgeOccupancy {
    /// Register a vehicle that waits here.  No-op if already present.
    pub fn add_waiting_vehicle(&mut self, vehicle: VehicleId) {
        if !self.waiting_vehicles.contains(&vehicle) {
            self.waiting_vehicles.push(vehicle);
        }
    }

    /// Returns `true` if the vehicle was registered.
    pub fn remove_waiting_vehicle(&mut self, vehicle: &VehicleId) -> bool {
        let before = self.waiting_vehicles.len();
        self.waiting_vehicles.retain(|v| v != vehicle);
        before != self.waiting_vehicles.len()
    }

    #[inline]
    pub fn waiting_vehicles(&self) -> &[VehicleId] {
        &self.waiting_vehicles
    }

    fn list_mut(&mut self, kind: TransportableKind) -> &mut Vec<TransportableId> {
        match kind {
            TransportableKind::Person    => &mut self.persons,
            TransportableKind::Container => &mut self.containers,
        }
    }

    /// Add a person or container to the edge.  No-op if already present.
    pub fn add_transportable(&mut self, kind: TransportableKind, id: TransportableId) {
        let list = self.list_mut(kind);
        if !list.contains(&id) {
            list.push(id);
        }
    }

    /// Returns `true` if the entity was on the edge.
    pub fn remove_transportable(&mut self, kind: TransportableKind, id: &TransportableId) -> bool {
        let list = self.list_mut(kind);
        let before = list.len();
        list.retain(|t| t != id);
        before != list.len()
    }

    pub fn transportables(&self, kind: TransportableKind) -> &[TransportableId] {
        match kind {
            TransportableKind::Person    => &self.persons,
            TransportableKind::Container => &self.containers,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.waiting_vehicles.is_empty() && self.persons.is_empty() && self.containers.is_empty()
    }
}

// ── StopOccupancy ─────────────────────────────────────────────────────────────

/// Waiting-slot assignment at one stopping place.
///
/// Each entity waiting at the stop holds the lowest slot that was free when
/// it arrived; slots are released when it leaves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopOccupancy {
    slots: BTreeMap<TransportableId, usize>,
}

impl StopOccupancy {
    /// Assign a slot to `id` (or return the one it already holds).
    pub fn add_transportable(&mut self, id: TransportableId) -> usize {
        if let Some(&slot) = self.slots.get(&id) {
            return slot;
        }
        let mut taken: Vec<usize> = self.slots.values().copied().collect();
        taken.sort_unstable();
        let slot = taken
            .iter()
            .enumerate()
            .find(|&(i, &s)| i != s)
            .map_or(taken.len(), |(i, _)| i);
        self.slots.insert(id, slot);
        slot
    }

    pub fn remove_transportable(&mut self, id: &TransportableId) -> Option<usize> {
        self.slots.remove(id)
    }

    #[inline]
    pub fn slot(&self, id: &TransportableId) -> Option<usize> {
        self.slots.get(id).copied()
    }

    pub fn waiting_count(&self) -> usize {
        self.slots.len()
    }
}

// ── Occupancy ─────────────────────────────────────────────────────────────────

/// Occupancy of the whole network.  Edges and stops without anyone waiting
/// have no entry.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occupancy {
    edges: BTreeMap<EdgeId, EdgeOccupancy>,
    stops: BTreeMap<StopId, StopOccupancy>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn edge(&self, id: &EdgeId) -> Option<&EdgeOccupancy> {
        self.edges.get(id)
    }

    /// Mutable occupancy for `id`, created on first use.
    pub fn edge_mut(&mut self, id: &EdgeId) -> &mut EdgeOccupancy {
        self.edges.entry(id.clone()).or_default()
    }

    #[inline]
    pub fn stop(&self, id: &StopId) -> Option<&StopOccupancy> {
        self.stops.get(id)
    }

    pub fn stop_mut(&mut self, id: &StopId) -> &mut StopOccupancy {
        self.stops.entry(id.clone()).or_default()
    }

    /// Slot held by `t` at `stop`, if any.
    pub fn stop_slot(&self, stop: &StopId, t: &TransportableId) -> Option<usize> {
        self.stop(stop).and_then(|s| s.slot(t))
    }

    /// Release `t` from every stop it holds a slot at.
    pub fn leave_stops(&mut self, t: &TransportableId) {
        for stop in self.stops.values_mut() {
            stop.remove_transportable(t);
        }
    }
}
